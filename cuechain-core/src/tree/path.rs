//! Structural addresses into a chain
//!
//! An [`ItemPath`] is the sequence of indices walked from the root: the
//! root index first, then the index inside each nested group. Paths are
//! derived from the current chain and go stale after any mutation, so they
//! are never stored.

use std::fmt;

/// Position of an item inside a chain.
///
/// The empty path addresses the chain itself.
///
/// Ordering is lexicographic over the indices, which is also pre-order
/// document order: a parent sorts before its children, and an earlier
/// sibling's subtree sorts before a later sibling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemPath(Vec<usize>);

impl ItemPath {
    /// Creates a path from raw indices.
    #[must_use]
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    /// Path of a root-level item.
    #[must_use]
    pub fn root(index: usize) -> Self {
        Self(vec![index])
    }

    /// Path of the `index`-th child of the item at this path.
    #[must_use]
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    /// Raw indices.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Number of indices. Root-level items have depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the path is empty and so addresses nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true for a root-level item.
    #[must_use]
    pub fn is_root_level(&self) -> bool {
        self.0.len() == 1
    }

    /// Index within the parent's sequence.
    #[must_use]
    pub fn last_index(&self) -> Option<usize> {
        self.0.last().copied()
    }

    /// Indices of the containing group; empty for root-level items.
    #[must_use]
    pub fn parent_indices(&self) -> &[usize] {
        match self.0.split_last() {
            Some((_, parent)) => parent,
            None => &[],
        }
    }

    /// Path of the containing group, or `None` for root-level items.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.0.len() > 1 {
            Some(Self(self.parent_indices().to_vec()))
        } else {
            None
        }
    }

    /// Same parent, different final index.
    #[must_use]
    pub fn with_last_index(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        if let Some(last) = indices.last_mut() {
            *last = index;
        } else {
            indices.push(index);
        }
        Self(indices)
    }

    /// Returns true if both paths live in the same sequence.
    #[must_use]
    pub fn is_sibling_of(&self, other: &Self) -> bool {
        !self.0.is_empty() && !other.0.is_empty() && self.parent_indices() == other.parent_indices()
    }

    /// Returns true if `other` lies strictly inside the subtree at this path.
    #[must_use]
    pub fn is_ancestor_of(&self, other: &Self) -> bool {
        other.0.len() > self.0.len() && other.0.starts_with(&self.0)
    }
}

impl fmt::Display for ItemPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl From<Vec<usize>> for ItemPath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}
