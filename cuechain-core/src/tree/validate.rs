//! Whole-chain invariant checks
//!
//! A chain produced by the editing operations always passes these checks.
//! A failure means an operation has a bug, not that the user did something
//! wrong.

use std::collections::HashSet;

use crate::error::{ChainError, ChainResult};
use crate::models::{Chain, MAX_GROUP_DEPTH};

use super::index::max_group_depth;

/// Checks id uniqueness and the group nesting bound.
///
/// # Errors
///
/// Returns `DuplicateId` for the first repeated id in document order, or
/// `DepthExceeded` if any group sits deeper than [`MAX_GROUP_DEPTH`].
pub fn validate_chain<P>(chain: &Chain<P>) -> ChainResult<()> {
    let mut seen = HashSet::new();
    let mut duplicate = None;
    chain.walk(|item| {
        if duplicate.is_none() && !seen.insert(item.id()) {
            duplicate = Some(item.id());
        }
    });
    if let Some(id) = duplicate {
        return Err(ChainError::DuplicateId(id));
    }

    let depth = max_group_depth(chain);
    if depth > MAX_GROUP_DEPTH {
        return Err(ChainError::DepthExceeded {
            depth,
            max: MAX_GROUP_DEPTH,
        });
    }
    Ok(())
}
