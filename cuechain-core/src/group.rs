//! Grouping, ungrouping and per-item group edits
//!
//! Grouping wraps sibling items into a new group placed where the first of
//! them used to be. Ungrouping splices a group's children back into its
//! parent in place of the group.

use std::collections::HashSet;

use tracing::debug;

use crate::error::{ChainError, ChainResult};
use crate::models::{Chain, DEFAULT_GROUP_NAME, GroupItem, Item, ItemId};
use crate::tree::{
    delete_at, extract_at_safely, find_path, find_paths, get_at, insert_at, insert_many_at,
    update_at,
};

/// Wraps items into a new group named [`DEFAULT_GROUP_NAME`].
///
/// # Errors
///
/// See [`create_group_named`].
pub fn create_group<P: Clone>(
    chain: &Chain<P>,
    item_ids: impl IntoIterator<Item = ItemId>,
) -> ChainResult<(Chain<P>, ItemId)> {
    create_group_named(chain, item_ids, DEFAULT_GROUP_NAME)
}

/// Wraps items into a new, enabled and expanded group.
///
/// Every resolvable id must share one parent. The items keep their relative
/// order inside the group, and the group takes the position of the first
/// of them. Ids that do not resolve are ignored.
///
/// # Errors
///
/// - `EmptySelection` if no id resolves
/// - `MixedParents` if the items live in different sequences
/// - `DepthExceeded` if a grouped item is a group already at the nesting limit
pub fn create_group_named<P: Clone>(
    chain: &Chain<P>,
    item_ids: impl IntoIterator<Item = ItemId>,
    name: impl Into<String>,
) -> ChainResult<(Chain<P>, ItemId)> {
    let ids: HashSet<ItemId> = item_ids.into_iter().collect();
    let mut paths: Vec<_> = find_paths(chain, &ids).into_values().collect();
    if paths.is_empty() {
        return Err(ChainError::EmptySelection);
    }
    paths.sort();

    let first = paths[0].clone();
    if !paths.iter().all(|path| path.is_sibling_of(&first)) {
        return Err(ChainError::MixedParents);
    }

    let (remaining, members) = extract_at_safely(chain, &paths);
    let group = GroupItem::new(name, members);
    let group_id = group.id;
    let next = insert_at(&remaining, &first, Item::Group(group))?;

    debug!(group_id = %group_id, members = paths.len(), at = %first, "Created group");
    Ok((next, group_id))
}

/// Replaces a group with its children, in place and in order.
///
/// # Errors
///
/// Returns `ItemNotFound` if the id does not resolve, or `NotAGroup` if it
/// names a leaf.
pub fn ungroup<P: Clone>(chain: &Chain<P>, group_id: ItemId) -> ChainResult<Chain<P>> {
    let path = find_path(chain, group_id).ok_or(ChainError::ItemNotFound(group_id))?;
    let children = match get_at(chain, &path)? {
        Item::Group(group) => group.children.clone(),
        Item::Leaf(_) => return Err(ChainError::NotAGroup(group_id)),
    };
    let remaining = delete_at(chain, &path)?;
    debug!(group_id = %group_id, children = children.len(), "Ungrouped");
    insert_many_at(&remaining, &path, children)
}

/// Flips a group's collapsed flag.
///
/// # Errors
///
/// Returns `ItemNotFound` or `NotAGroup`.
pub fn toggle_collapse<P: Clone>(chain: &Chain<P>, group_id: ItemId) -> ChainResult<Chain<P>> {
    update_group(chain, group_id, |group| group.collapsed = !group.collapsed)
}

/// Renames a group.
///
/// # Errors
///
/// Returns `ItemNotFound` or `NotAGroup`.
pub fn rename<P: Clone>(
    chain: &Chain<P>,
    group_id: ItemId,
    name: impl Into<String>,
) -> ChainResult<Chain<P>> {
    let name = name.into();
    update_group(chain, group_id, move |group| group.name = name)
}

/// Sets the enabled flag of a leaf or group.
///
/// Descendants keep their own flags; a disabled group makes them
/// effectively disabled without rewriting them.
///
/// # Errors
///
/// Returns `ItemNotFound` if the id does not resolve.
pub fn set_enabled<P: Clone>(
    chain: &Chain<P>,
    item_id: ItemId,
    enabled: bool,
) -> ChainResult<Chain<P>> {
    let path = find_path(chain, item_id).ok_or(ChainError::ItemNotFound(item_id))?;
    update_at(chain, &path, |mut item| {
        item.set_enabled(enabled);
        item
    })
}

fn update_group<P: Clone>(
    chain: &Chain<P>,
    group_id: ItemId,
    f: impl FnOnce(&mut GroupItem<P>),
) -> ChainResult<Chain<P>> {
    let path = find_path(chain, group_id).ok_or(ChainError::ItemNotFound(group_id))?;
    let mut not_a_group = false;
    let next = update_at(chain, &path, |mut item| {
        match item.as_group_mut() {
            Some(group) => f(group),
            None => not_a_group = true,
        }
        item
    })?;
    if not_a_group {
        return Err(ChainError::NotAGroup(group_id));
    }
    Ok(next)
}
