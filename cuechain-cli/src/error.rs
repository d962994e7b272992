//! CLI error types and exit codes.

use cuechain_core::{ChainError, ConfigError};

/// Exit codes for CLI operations
pub mod exit_codes {
    /// General error - file, settings, or usage problems
    pub const GENERAL_ERROR: i32 = 1;
    /// The edit was rejected or named an item that does not exist
    pub const EDIT_REJECTED: i32 = 2;
}

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Missing or conflicting arguments
    #[error("Usage error: {0}")]
    Usage(String),

    /// Chain file could not be read, parsed, or written
    #[error("Chain file error: {0}")]
    ChainFile(String),

    /// Catalog file could not be read or parsed
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Settings file error
    #[error("Settings error: {0}")]
    Settings(#[from] ConfigError),

    /// No item matches the given reference
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// The reference matches more than one item
    #[error("Ambiguous item '{reference}'. Matches: {matches}")]
    Ambiguous {
        /// What the user typed
        reference: String,
        /// Labels of the matching items
        matches: String,
    },

    /// The editor refused the operation
    #[error("Edit rejected: {0}")]
    Edit(#[from] ChainError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Returns the appropriate exit code for this error type.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: General error (usage, files, settings, IO)
    /// - 2: Edit rejected or item not found
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::ItemNotFound(_) | Self::Ambiguous { .. } | Self::Edit(_) => {
                exit_codes::EDIT_REJECTED
            }
            Self::Usage(_)
            | Self::ChainFile(_)
            | Self::Catalog(_)
            | Self::Settings(_)
            | Self::Io(_) => exit_codes::GENERAL_ERROR,
        }
    }
}
