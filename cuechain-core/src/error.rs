//! Error types for chain editing operations
//!
//! Errors fall into three families:
//!
//! - **Not found** - an id or path no longer resolves against the chain,
//!   usually because the chain changed after a gesture started.
//! - **Rejected** - the edit is structurally illegal (mixed parents, a drop
//!   into the dragged subtree, nesting too deep). The chain is left as it was.
//! - **Consistency** - the chain itself is broken (duplicate ids). This only
//!   happens through a bug; the command layer asserts on it.
//!
//! Settings files have their own [`ConfigError`].

use std::path::PathBuf;

use crate::models::ItemId;
use crate::tree::ItemPath;

/// Errors that can occur while editing a chain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainError {
    /// The item does not exist in the chain.
    #[error("item not found: {0}")]
    ItemNotFound(ItemId),

    /// The path does not resolve to an item.
    #[error("path not found: {0}")]
    PathNotFound(ItemPath),

    /// None of the requested ids resolved.
    #[error("no items to operate on")]
    EmptySelection,

    /// Items to be grouped do not share one parent.
    #[error("items do not share the same parent")]
    MixedParents,

    /// The drop target is being dragged or lies inside a dragged group.
    #[error("cannot drop an item onto itself or into its own subtree")]
    CyclicDrop,

    /// The edit would nest groups deeper than allowed.
    #[error("group nesting depth {depth} exceeds maximum of {max}")]
    DepthExceeded {
        /// Depth the edit would produce.
        depth: usize,
        /// Allowed maximum.
        max: usize,
    },

    /// The item exists but is a leaf where a group is required.
    #[error("item is not a group: {0}")]
    NotAGroup(ItemId),

    /// `Into` was requested on a leaf target.
    #[error("items can only be dropped into a group")]
    InvalidDropPosition,

    /// A drop or drag-over arrived with no drag in progress.
    #[error("no drag in progress")]
    NotDragging,

    /// The drag was released with no valid drop target.
    #[error("no valid drop target")]
    NoDropTarget,

    /// An id occurs more than once in the chain.
    #[error("duplicate item id in chain: {0}")]
    DuplicateId(ItemId),
}

impl ChainError {
    /// Returns true for structural rejections.
    ///
    /// Rejections come from ordinary UI races; callers drop the edit and
    /// may show a transient hint.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::MixedParents
                | Self::CyclicDrop
                | Self::DepthExceeded { .. }
                | Self::NotAGroup(_)
                | Self::InvalidDropPosition
                | Self::NotDragging
                | Self::NoDropTarget
        )
    }

    /// Returns true if the error means a target could not be resolved.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ItemNotFound(_) | Self::PathNotFound(_) | Self::EmptySelection
        )
    }

    /// Returns true if the chain violates its own invariants.
    #[must_use]
    pub const fn is_consistency_violation(&self) -> bool {
        matches!(self, Self::DuplicateId(_))
    }
}

/// Result type for chain operations.
pub type ChainResult<T> = Result<T, ChainError>;

/// Errors that can occur while loading or saving editor settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The settings file does not exist.
    #[error("settings file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The settings file could not be read or parsed.
    #[error("failed to parse settings: {0}")]
    Parse(String),

    /// Settings could not be serialized.
    #[error("failed to serialize settings: {0}")]
    Serialize(String),

    /// The settings file could not be written.
    #[error("failed to write settings: {0}")]
    Write(String),

    /// A value is out of range.
    #[error("invalid value for {field}: {reason}")]
    Validation {
        /// Dotted name of the offending field.
        field: String,
        /// What is wrong with it.
        reason: String,
    },
}

/// Result type for settings operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
