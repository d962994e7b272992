//! Id-to-path resolution and flattened ordering
//!
//! Everything here is a read-only walk over the chain. Lookups that must
//! agree with each other for one logical edit (deleting a selection,
//! grouping, copying) should use [`find_paths`] so every id is resolved
//! against the same snapshot.

use std::collections::{HashMap, HashSet};

use crate::models::{Chain, Item, ItemId};

use super::path::ItemPath;

/// Finds the path of an item by id.
///
/// Depth-first; ids are unique so the first match is the only one.
#[must_use]
pub fn find_path<P>(chain: &Chain<P>, id: ItemId) -> Option<ItemPath> {
    let mut indices = Vec::new();
    if find_in(chain.items(), id, &mut indices) {
        Some(ItemPath::new(indices))
    } else {
        None
    }
}

fn find_in<P>(items: &[Item<P>], id: ItemId, indices: &mut Vec<usize>) -> bool {
    for (index, item) in items.iter().enumerate() {
        indices.push(index);
        if item.id() == id || find_in(item.children(), id, indices) {
            return true;
        }
        indices.pop();
    }
    false
}

/// Resolves many ids in a single walk.
///
/// Ids that are not in the chain are simply absent from the result.
#[must_use]
pub fn find_paths<P>(chain: &Chain<P>, ids: &HashSet<ItemId>) -> HashMap<ItemId, ItemPath> {
    let mut found = HashMap::with_capacity(ids.len());
    if ids.is_empty() {
        return found;
    }
    let mut indices = Vec::new();
    collect_paths(chain.items(), ids, &mut indices, &mut found);
    found
}

fn collect_paths<P>(
    items: &[Item<P>],
    ids: &HashSet<ItemId>,
    indices: &mut Vec<usize>,
    found: &mut HashMap<ItemId, ItemPath>,
) {
    for (index, item) in items.iter().enumerate() {
        if found.len() == ids.len() {
            return;
        }
        indices.push(index);
        if ids.contains(&item.id()) {
            found.insert(item.id(), ItemPath::new(indices.clone()));
        }
        collect_paths(item.children(), ids, indices, found);
        indices.pop();
    }
}

/// Pre-order list of every id in the chain, groups included.
///
/// Collapsed groups are descended like any other: collapse is a display
/// flag and range selection must work through it.
#[must_use]
pub fn flatten<P>(chain: &Chain<P>) -> Vec<ItemId> {
    let mut ids = Vec::new();
    chain.walk(|item| ids.push(item.id()));
    ids
}

/// Pre-order list of ids a renderer would show, skipping the children of
/// collapsed groups.
#[must_use]
pub fn flatten_visible<P>(chain: &Chain<P>) -> Vec<ItemId> {
    fn visit<P>(items: &[Item<P>], ids: &mut Vec<ItemId>) {
        for item in items {
            ids.push(item.id());
            if let Item::Group(group) = item
                && !group.collapsed
            {
                visit(&group.children, ids);
            }
        }
    }

    let mut ids = Vec::new();
    visit(chain.items(), &mut ids);
    ids
}

/// Recursive leaf count of a whole chain.
#[must_use]
pub fn count_leaves<P>(chain: &Chain<P>) -> usize {
    chain.items().iter().map(Item::leaf_count).sum()
}

/// Finds an item by id.
#[must_use]
pub fn find_item<P>(chain: &Chain<P>, id: ItemId) -> Option<&Item<P>> {
    fn search<P>(items: &[Item<P>], id: ItemId) -> Option<&Item<P>> {
        items.iter().find_map(|item| {
            if item.id() == id {
                Some(item)
            } else {
                search(item.children(), id)
            }
        })
    }

    search(chain.items(), id)
}

/// Returns true if an item with this id exists anywhere in the chain.
#[must_use]
pub fn contains<P>(chain: &Chain<P>, id: ItemId) -> bool {
    find_item(chain, id).is_some()
}

/// Pre-order ids strictly below the given item.
///
/// `None` if the id does not resolve; empty for leaves and empty groups.
#[must_use]
pub fn descendant_ids<P>(chain: &Chain<P>, id: ItemId) -> Option<Vec<ItemId>> {
    let item = find_item(chain, id)?;
    let mut ids = Vec::new();
    for child in item.children() {
        child.walk(&mut |descendant| ids.push(descendant.id()));
    }
    Some(ids)
}

/// Ids of the groups enclosing an item, outermost first.
#[must_use]
pub fn ancestor_ids<P>(chain: &Chain<P>, id: ItemId) -> Vec<ItemId> {
    let Some(path) = find_path(chain, id) else {
        return Vec::new();
    };
    let mut ancestors = Vec::with_capacity(path.depth().saturating_sub(1));
    let mut items = chain.items();
    for &index in path.parent_indices() {
        let Some(group) = items.get(index) else {
            break;
        };
        ancestors.push(group.id());
        items = group.children();
    }
    ancestors
}

/// Returns true if `id` lies strictly inside the subtree of `ancestor`.
#[must_use]
pub fn is_descendant_of<P>(chain: &Chain<P>, id: ItemId, ancestor: ItemId) -> bool {
    ancestor_ids(chain, id).contains(&ancestor)
}

/// Deepest group level found in the chain (0 for a chain of leaves).
#[must_use]
pub fn max_group_depth<P>(chain: &Chain<P>) -> usize {
    chain
        .items()
        .iter()
        .map(Item::group_depth)
        .max()
        .unwrap_or(0)
}
