//! Shared generators and structural helpers

use std::collections::HashSet;

use cuechain_core::models::{Chain, Item, ItemId, MAX_GROUP_DEPTH};
use cuechain_core::tree::flatten;
use proptest::prelude::*;
use proptest::sample::Index;

/// An item whose groups nest at most `group_levels` deep.
pub fn item_strategy(group_levels: usize) -> BoxedStrategy<Item<u32>> {
    let leaf = (any::<u32>(), any::<bool>()).prop_map(|(payload, enabled)| {
        let mut item = Item::leaf(payload);
        item.set_enabled(enabled);
        item
    });
    if group_levels == 0 {
        return leaf.boxed();
    }
    let group = (
        prop::collection::vec(item_strategy(group_levels - 1), 0..4),
        "[a-z]{1,6}",
        any::<bool>(),
    )
        .prop_map(|(children, name, collapsed)| {
            let mut item = Item::group(name, children);
            if let Some(group) = item.as_group_mut() {
                group.collapsed = collapsed;
            }
            item
        });
    prop_oneof![3 => leaf, 1 => group].boxed()
}

/// A non-empty chain within the nesting limit.
pub fn chain_strategy() -> impl Strategy<Value = Chain<u32>> {
    prop::collection::vec(item_strategy(MAX_GROUP_DEPTH), 1..8).prop_map(Chain::from_items)
}

/// Picks ids from the chain by index (duplicates collapse).
pub fn pick_ids(chain: &Chain<u32>, picks: &[Index]) -> HashSet<ItemId> {
    let ids = flatten(chain);
    picks.iter().map(|pick| ids[pick.index(ids.len())]).collect()
}

/// Id-free structure of an item, for comparing copies with originals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// Payload and enabled flag
    Leaf(u32, bool),
    /// Name, enabled, collapsed, children
    Group(String, bool, bool, Vec<Shape>),
}

pub fn shape(item: &Item<u32>) -> Shape {
    match item {
        Item::Leaf(leaf) => Shape::Leaf(leaf.payload, leaf.enabled),
        Item::Group(group) => Shape::Group(
            group.name.clone(),
            group.enabled,
            group.collapsed,
            group.children.iter().map(shape).collect(),
        ),
    }
}

/// Every id in a list of subtrees.
pub fn subtree_ids(items: &[Item<u32>]) -> HashSet<ItemId> {
    let mut ids = HashSet::new();
    for item in items {
        item.walk(&mut |node| {
            ids.insert(node.id());
        });
    }
    ids
}
