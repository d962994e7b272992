//! Pure structural edits addressed by path
//!
//! Every function takes the chain by reference, clones it, and returns the
//! edited copy; the input is never modified. A failed edit leaves the caller holding the
//! untouched original.

use tracing::debug;

use crate::error::{ChainError, ChainResult};
use crate::models::{Chain, Item, MAX_GROUP_DEPTH};

use super::path::ItemPath;

/// Returns the item at a path.
///
/// # Errors
///
/// Returns `PathNotFound` if any index is out of range or descends
/// through a leaf.
pub fn get_at<'a, P>(chain: &'a Chain<P>, path: &ItemPath) -> ChainResult<&'a Item<P>> {
    let mut items = chain.items();
    let mut found = None;
    for &index in path.indices() {
        let item = items
            .get(index)
            .ok_or_else(|| ChainError::PathNotFound(path.clone()))?;
        items = item.children();
        found = Some(item);
    }
    found.ok_or_else(|| ChainError::PathNotFound(path.clone()))
}

/// Returns a new chain with `f` applied to the item at `path`.
///
/// The whole chain is cloned and the edit applied to the copy.
///
/// # Errors
///
/// Returns `PathNotFound` if the path does not resolve, or `DepthExceeded`
/// if the replacement would nest groups too deep at this position.
pub fn update_at<P: Clone>(
    chain: &Chain<P>,
    path: &ItemPath,
    f: impl FnOnce(Item<P>) -> Item<P>,
) -> ChainResult<Chain<P>> {
    let index = path
        .last_index()
        .ok_or_else(|| ChainError::PathNotFound(path.clone()))?;
    let mut next = chain.clone();
    let siblings = sequence_at_mut(&mut next, path.parent_indices())
        .filter(|siblings| index < siblings.len())
        .ok_or_else(|| ChainError::PathNotFound(path.clone()))?;
    let updated = f(siblings.remove(index));
    check_depth(path.depth(), &updated)?;
    siblings.insert(index, updated);
    Ok(next)
}

/// Inserts an item so that it ends up at `path`.
///
/// The final index is an insertion point in the parent's sequence
/// (`0..=len`), not a pointer to an existing item.
///
/// # Errors
///
/// Returns `PathNotFound` if the parent does not resolve to the root or a
/// group, or the index is past the end; `DepthExceeded` if the inserted
/// subtree would nest groups too deep.
pub fn insert_at<P: Clone>(
    chain: &Chain<P>,
    path: &ItemPath,
    item: Item<P>,
) -> ChainResult<Chain<P>> {
    insert_many_at(chain, path, vec![item])
}

/// Inserts a contiguous run of items starting at `path`.
///
/// # Errors
///
/// Same as [`insert_at`].
pub fn insert_many_at<P: Clone>(
    chain: &Chain<P>,
    path: &ItemPath,
    items: Vec<Item<P>>,
) -> ChainResult<Chain<P>> {
    let index = path
        .last_index()
        .ok_or_else(|| ChainError::PathNotFound(path.clone()))?;
    for item in &items {
        check_depth(path.depth(), item)?;
    }
    let mut next = chain.clone();
    let siblings = sequence_at_mut(&mut next, path.parent_indices())
        .filter(|siblings| index <= siblings.len())
        .ok_or_else(|| ChainError::PathNotFound(path.clone()))?;
    siblings.splice(index..index, items);
    Ok(next)
}

/// Removes the item at `path`.
///
/// # Errors
///
/// Returns `PathNotFound` if the path does not resolve.
pub fn delete_at<P: Clone>(chain: &Chain<P>, path: &ItemPath) -> ChainResult<Chain<P>> {
    let index = path
        .last_index()
        .ok_or_else(|| ChainError::PathNotFound(path.clone()))?;
    let mut next = chain.clone();
    let siblings = sequence_at_mut(&mut next, path.parent_indices())
        .filter(|siblings| index < siblings.len())
        .ok_or_else(|| ChainError::PathNotFound(path.clone()))?;
    siblings.remove(index);
    Ok(next)
}

/// Removes several items, all addressed against the same snapshot.
///
/// Paths are applied from the last in document order to the first, so no
/// removal shifts an index that is still pending. Paths inside another
/// requested path go with their ancestor. Paths that do not resolve are
/// skipped.
#[must_use]
pub fn delete_at_safely<P: Clone>(chain: &Chain<P>, paths: &[ItemPath]) -> Chain<P> {
    extract_at_safely(chain, paths).0
}

/// Removes several items and returns them in document order.
///
/// Same ordering rules as [`delete_at_safely`]. Each returned item carries
/// its full subtree.
#[must_use]
pub fn extract_at_safely<P: Clone>(
    chain: &Chain<P>,
    paths: &[ItemPath],
) -> (Chain<P>, Vec<Item<P>>) {
    let mut next = chain.clone();
    let mut extracted = Vec::with_capacity(paths.len());
    for path in top_most_paths(paths).iter().rev() {
        let removed = path.last_index().and_then(|index| {
            sequence_at_mut(&mut next, path.parent_indices())
                .filter(|siblings| index < siblings.len())
                .map(|siblings| siblings.remove(index))
        });
        match removed {
            Some(item) => extracted.push(item),
            None => debug!(path = %path, "Skipping unresolved path"),
        }
    }
    extracted.reverse();
    (next, extracted)
}

/// Sorts paths into document order, dropping duplicates and any path that
/// lies inside another one in the list.
#[must_use]
pub fn top_most_paths(paths: &[ItemPath]) -> Vec<ItemPath> {
    let mut sorted = paths.to_vec();
    sorted.sort();
    sorted.dedup();
    let mut kept: Vec<ItemPath> = Vec::with_capacity(sorted.len());
    for path in sorted {
        // Sorted order puts an ancestor directly before its subtree.
        if kept.last().is_some_and(|last| last.is_ancestor_of(&path)) {
            continue;
        }
        kept.push(path);
    }
    kept
}

/// Checks that `item` placed at a path of length `path_depth` stays within
/// the group nesting bound.
///
/// # Errors
///
/// Returns `DepthExceeded` with the depth the placement would produce.
pub fn check_depth<P>(path_depth: usize, item: &Item<P>) -> ChainResult<()> {
    let depth = path_depth.saturating_sub(1) + item.group_depth();
    if depth > MAX_GROUP_DEPTH {
        return Err(ChainError::DepthExceeded {
            depth,
            max: MAX_GROUP_DEPTH,
        });
    }
    Ok(())
}

/// Mutable access to the sequence a parent path addresses: the root for an
/// empty slice, otherwise the children of the group there.
fn sequence_at_mut<'a, P>(
    chain: &'a mut Chain<P>,
    parent_indices: &[usize],
) -> Option<&'a mut Vec<Item<P>>> {
    let mut items = &mut chain.items;
    for &index in parent_indices {
        let current = items;
        items = &mut current.get_mut(index)?.as_group_mut()?.children;
    }
    Some(items)
}
