//! Multi-item selection for chain lists
//!
//! Tracks which items are selected by id, independently of where they sit in
//! the tree, plus the anchor used by range (shift) clicks. All transitions are
//! pure: they take the current state and the chain and return the next state.

use std::collections::HashSet;
use std::ops::RangeInclusive;

use crate::models::{Chain, Item, ItemId};
use crate::tree::{descendant_ids, find_item, flatten};

/// How a click modifies the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClickMode {
    /// Plain click: select only the clicked item.
    #[default]
    Single,
    /// Ctrl/Cmd-click: add or remove the clicked item.
    Toggle,
    /// Shift-click: select everything between the anchor and the clicked item.
    Range,
}

impl ClickMode {
    /// Derives the mode from modifier keys. Shift wins over ctrl.
    #[must_use]
    pub const fn from_modifiers(ctrl: bool, shift: bool) -> Self {
        if shift {
            Self::Range
        } else if ctrl {
            Self::Toggle
        } else {
            Self::Single
        }
    }
}

/// Selection state for one editing session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    /// Set of selected item IDs
    selected_ids: HashSet<ItemId>,
    /// Anchor for range selection
    last_selected_id: Option<ItemId>,
}

impl SelectionState {
    /// Creates a new empty selection state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a selection of exactly one item, anchored on it
    #[must_use]
    pub fn single(id: ItemId) -> Self {
        Self {
            selected_ids: HashSet::from([id]),
            last_selected_id: Some(id),
        }
    }

    /// Creates a selection from a set of ids with the given anchor
    #[must_use]
    pub fn with_ids(ids: HashSet<ItemId>, anchor: Option<ItemId>) -> Self {
        Self {
            selected_ids: ids,
            last_selected_id: anchor,
        }
    }

    /// Selects an item by ID
    pub fn select(&mut self, id: ItemId) {
        self.selected_ids.insert(id);
    }

    /// Deselects an item by ID
    pub fn deselect(&mut self, id: ItemId) {
        self.selected_ids.remove(&id);
    }

    /// Toggles selection state for an item
    pub fn toggle(&mut self, id: ItemId) {
        if !self.selected_ids.remove(&id) {
            self.selected_ids.insert(id);
        }
    }

    /// Checks if an item is selected
    #[must_use]
    pub fn is_selected(&self, id: ItemId) -> bool {
        self.selected_ids.contains(&id)
    }

    /// Returns all selected IDs
    #[must_use]
    pub const fn selected_ids(&self) -> &HashSet<ItemId> {
        &self.selected_ids
    }

    /// Returns the range anchor
    #[must_use]
    pub const fn last_selected_id(&self) -> Option<ItemId> {
        self.last_selected_id
    }

    /// Returns the count of selected items
    #[must_use]
    pub fn selection_count(&self) -> usize {
        self.selected_ids.len()
    }

    /// Returns true if no items are selected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected_ids.is_empty()
    }

    /// Clears all selections and the anchor
    pub fn clear(&mut self) {
        self.selected_ids.clear();
        self.last_selected_id = None;
    }

    /// Returns an iterator over selected IDs
    pub fn iter(&self) -> impl Iterator<Item = &ItemId> {
        self.selected_ids.iter()
    }

    /// Returns the selected ids in flattened (document) order
    #[must_use]
    pub fn ordered_ids<P>(&self, chain: &Chain<P>) -> Vec<ItemId> {
        flatten(chain)
            .into_iter()
            .filter(|id| self.selected_ids.contains(id))
            .collect()
    }

    /// Drops ids (and an anchor) that no longer exist in the chain
    #[must_use]
    pub fn prune<P>(&self, chain: &Chain<P>) -> Self {
        let present: HashSet<ItemId> = flatten(chain).into_iter().collect();
        Self {
            selected_ids: self
                .selected_ids
                .intersection(&present)
                .copied()
                .collect(),
            last_selected_id: self.last_selected_id.filter(|id| present.contains(id)),
        }
    }
}

/// Computes the selection after a click on `clicked_id`.
///
/// A click on an id that is not in the chain changes nothing beyond
/// dropping stale ids.
#[must_use]
pub fn apply_click<P>(
    chain: &Chain<P>,
    state: &SelectionState,
    clicked_id: ItemId,
    mode: ClickMode,
) -> SelectionState {
    let flattened = flatten(chain);
    if !flattened.contains(&clicked_id) {
        return state.prune(chain);
    }

    let next = match mode {
        ClickMode::Single => SelectionState::single(clicked_id),
        ClickMode::Toggle => {
            let mut next = state.clone();
            next.toggle(clicked_id);
            next.last_selected_id = Some(clicked_id);
            next
        }
        ClickMode::Range => range_select(&flattened, state, clicked_id),
    };
    next.prune(chain)
}

/// Shift-click: everything between the anchor and the click, inclusive.
///
/// The anchor stays put so repeated shift-clicks pivot around it. Without a
/// usable anchor the click itself becomes the anchor.
fn range_select(
    flattened: &[ItemId],
    state: &SelectionState,
    clicked_id: ItemId,
) -> SelectionState {
    let position = |id: ItemId| flattened.iter().position(|candidate| *candidate == id);
    let anchor_id = state.last_selected_id.unwrap_or(clicked_id);

    let range = match (position(anchor_id), position(clicked_id)) {
        (Some(anchor), Some(clicked)) => inclusive_index_range(anchor, clicked, flattened.len()),
        _ => None,
    };
    match range {
        Some(range) => SelectionState {
            selected_ids: flattened[range].iter().copied().collect(),
            last_selected_id: Some(anchor_id),
        },
        None => SelectionState::single(clicked_id),
    }
}

/// Inclusive index range between two positions, in either order.
#[must_use]
pub fn inclusive_index_range(
    anchor_index: usize,
    target_index: usize,
    len: usize,
) -> Option<RangeInclusive<usize>> {
    if len == 0 || anchor_index >= len || target_index >= len {
        return None;
    }
    let (start, end) = if anchor_index <= target_index {
        (anchor_index, target_index)
    } else {
        (target_index, anchor_index)
    };
    Some(start..=end)
}

/// Collapses "group plus its whole subtree" down to just the group.
///
/// Each group is judged against the selection as given, never against a
/// partially reduced set, so the outcome does not depend on visit order.
/// Ids not present in the chain are dropped.
#[must_use]
pub fn normalize<P>(selected_ids: &HashSet<ItemId>, chain: &Chain<P>) -> HashSet<ItemId> {
    let mut covered = HashSet::new();
    for &id in selected_ids {
        let Some(item) = find_item(chain, id) else {
            continue;
        };
        if !item.is_group() {
            continue;
        }
        let descendants = descendant_ids(chain, id).unwrap_or_default();
        if descendants.iter().all(|d| selected_ids.contains(d)) {
            covered.extend(descendants);
        }
    }

    let present: HashSet<ItemId> = flatten(chain).into_iter().collect();
    selected_ids
        .iter()
        .filter(|id| present.contains(id) && !covered.contains(id))
        .copied()
        .collect()
}

/// Every id in the chain, groups included.
#[must_use]
pub fn select_all<P>(chain: &Chain<P>) -> HashSet<ItemId> {
    flatten(chain).into_iter().collect()
}

/// Reduces a set of ids to those with no selected ancestor.
///
/// Used wherever a subtree travels as a unit (drag, copy): a child whose
/// group is also in the set goes along with the group.
#[must_use]
pub fn top_most_ids<P>(ids: &HashSet<ItemId>, chain: &Chain<P>) -> Vec<ItemId> {
    fn visit<P>(items: &[Item<P>], ids: &HashSet<ItemId>, out: &mut Vec<ItemId>) {
        for item in items {
            if ids.contains(&item.id()) {
                out.push(item.id());
            } else {
                visit(item.children(), ids, out);
            }
        }
    }

    let mut out = Vec::new();
    visit(chain.items(), ids, &mut out);
    out
}
