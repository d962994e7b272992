//! Copy, cut, paste and duplicate for chain items
//!
//! The clipboard holds detached subtrees. Every id in them is regenerated on
//! the way in and again on every paste, so pasting the same clipboard twice
//! can never introduce a duplicate id.

use std::collections::HashSet;

use tracing::debug;

use crate::error::{ChainError, ChainResult};
use crate::models::{Chain, Item, ItemId};
use crate::selection::top_most_ids;
use crate::tree::{
    ItemPath, delete_at_safely, find_item, find_path, find_paths, insert_many_at,
};

/// Detached subtrees ready to be pasted.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipboardBuffer<P> {
    items: Vec<Item<P>>,
}

impl<P> Default for ClipboardBuffer<P> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<P: Clone> ClipboardBuffer<P> {
    /// Creates a buffer from items, regenerating their ids.
    #[must_use]
    pub fn from_items(items: &[Item<P>]) -> Self {
        Self {
            items: deep_copy_with_new_ids(items),
        }
    }
}

impl<P> ClipboardBuffer<P> {
    /// Creates an empty clipboard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffered top-level items, in copy order.
    #[must_use]
    pub fn items(&self) -> &[Item<P>] {
        &self.items
    }

    /// Number of top-level items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if nothing has been copied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total leaves across all buffered subtrees.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.items.iter().map(Item::leaf_count).sum()
    }
}

/// Clones the subtrees of the given items in document order.
///
/// A selected item inside another selected group is copied once, as part
/// of the group. Missing ids are skipped. The chain is not modified.
#[must_use]
pub fn copy_subtrees<P: Clone>(chain: &Chain<P>, ids: &HashSet<ItemId>) -> Vec<Item<P>> {
    top_most_ids(ids, chain)
        .into_iter()
        .filter_map(|id| find_item(chain, id).cloned())
        .collect()
}

/// Copies items into a fresh clipboard buffer.
#[must_use]
pub fn copy<P: Clone>(chain: &Chain<P>, ids: &HashSet<ItemId>) -> ClipboardBuffer<P> {
    let subtrees = copy_subtrees(chain, ids);
    debug!(items = subtrees.len(), "Copied to clipboard");
    ClipboardBuffer::from_items(&subtrees)
}

/// Copies items into a clipboard and removes them from the chain.
#[must_use]
pub fn cut<P: Clone>(chain: &Chain<P>, ids: &HashSet<ItemId>) -> (Chain<P>, ClipboardBuffer<P>) {
    let buffer = copy(chain, ids);
    let paths: Vec<ItemPath> = find_paths(chain, ids).into_values().collect();
    (delete_at_safely(chain, &paths), buffer)
}

/// Clones items, giving every leaf and group at every depth a new id.
#[must_use]
pub fn deep_copy_with_new_ids<P: Clone>(items: &[Item<P>]) -> Vec<Item<P>> {
    items.iter().map(regenerate_ids).collect()
}

fn regenerate_ids<P: Clone>(item: &Item<P>) -> Item<P> {
    match item {
        Item::Leaf(leaf) => {
            let mut copy = leaf.clone();
            copy.id = ItemId::new();
            Item::Leaf(copy)
        }
        Item::Group(group) => {
            let mut copy = group.clone();
            copy.id = ItemId::new();
            copy.children = deep_copy_with_new_ids(&group.children);
            Item::Group(copy)
        }
    }
}

/// Pastes a fresh copy of the clipboard into the root sequence.
///
/// Lands directly after `after_id` when that is a root-level item, otherwise
/// at the end of the chain. Returns the new chain and the ids of the pasted
/// top-level items.
///
/// # Errors
///
/// Returns `DepthExceeded` if a buffered subtree nests deeper than allowed.
pub fn paste<P: Clone>(
    chain: &Chain<P>,
    clipboard: &ClipboardBuffer<P>,
    after_id: Option<ItemId>,
) -> ChainResult<(Chain<P>, Vec<ItemId>)> {
    let index = after_id
        .and_then(|id| find_path(chain, id))
        .filter(ItemPath::is_root_level)
        .and_then(|path| path.last_index())
        .map_or(chain.len(), |index| index + 1);

    let items = deep_copy_with_new_ids(clipboard.items());
    let pasted: Vec<ItemId> = items.iter().map(Item::id).collect();
    let next = insert_many_at(chain, &ItemPath::root(index), items)?;
    debug!(items = pasted.len(), index, "Pasted from clipboard");
    Ok((next, pasted))
}

/// Inserts fresh copies of the items right after the last of them.
///
/// The copies land in the parent of the last item (document order), as one
/// run. Returns the new chain and the ids of the copies.
///
/// # Errors
///
/// Returns `EmptySelection` if no id resolves, or `DepthExceeded` if a
/// copied group would nest too deep in that parent.
pub fn duplicate<P: Clone>(
    chain: &Chain<P>,
    ids: &HashSet<ItemId>,
) -> ChainResult<(Chain<P>, Vec<ItemId>)> {
    let subtrees = copy_subtrees(chain, ids);
    let last = subtrees.last().ok_or(ChainError::EmptySelection)?;
    let last_path = find_path(chain, last.id()).ok_or(ChainError::ItemNotFound(last.id()))?;
    let index = last_path.last_index().unwrap_or(0);

    let copies = deep_copy_with_new_ids(&subtrees);
    let created: Vec<ItemId> = copies.iter().map(Item::id).collect();
    let next = insert_many_at(chain, &last_path.with_last_index(index + 1), copies)?;
    Ok((next, created))
}
