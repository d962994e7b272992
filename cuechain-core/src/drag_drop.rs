//! Drag-and-drop model for chain lists
//!
//! This module provides a pure data model for drag-and-drop reordering,
//! allowing property-based testing without any UI toolkit. A drag moves a
//! whole set of items (possibly discontiguous, possibly at different depths)
//! and lands them as one contiguous run in their original relative order.
//!
//! # Lifecycle
//!
//! ```text
//! Idle --start--> Dragging --drop (valid)--> Idle   (chain replaced)
//!                    |  ^
//!                    |  +-- drag_over (retarget, many times)
//!                    +----- cancel / invalid drop --> Idle (chain untouched)
//! ```

use std::collections::HashSet;

use tracing::debug;

use crate::error::{ChainError, ChainResult};
use crate::models::{Chain, ItemId};
use crate::selection::{SelectionState, top_most_ids};
use crate::tree::{
    ancestor_ids, extract_at_safely, find_item, find_path, find_paths, insert_many_at,
};

/// Drop position relative to a target item
///
/// Determines where dragged items will be placed relative to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropPosition {
    /// Drop before the target item (line indicator above)
    Before,
    /// Drop into the target item, appended to its children (groups only)
    Into,
    /// Drop after the target item (line indicator below)
    After,
}

/// Kind of item under the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// A leaf item
    Leaf,
    /// A group item
    Group,
}

impl TargetKind {
    /// Maps a group flag to a target kind
    #[must_use]
    pub const fn from_is_group(is_group: bool) -> Self {
        if is_group { Self::Group } else { Self::Leaf }
    }
}

/// Configuration for drop position calculation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropConfig {
    /// Height of each row in pixels
    pub row_height: f64,
    /// Fraction of a group row, from the top, that means "before the group"
    pub group_before_ratio: f64,
    /// Fraction of a leaf row, from the top, that means "before the leaf"
    pub leaf_split_ratio: f64,
}

impl Default for DropConfig {
    fn default() -> Self {
        Self {
            row_height: 32.0,
            group_before_ratio: 0.25,
            leaf_split_ratio: 0.5,
        }
    }
}

impl DropConfig {
    /// Resolves a drop position from a pointer fraction within the row
    ///
    /// For groups the row has two zones: the top `group_before_ratio`
    /// is Before, the rest is Into. For leaves the row is split at
    /// `leaf_split_ratio` into Before and After.
    #[must_use]
    pub fn resolve(&self, pointer_fraction_y: f64, kind: TargetKind) -> DropPosition {
        match kind {
            TargetKind::Group => {
                if pointer_fraction_y < self.group_before_ratio {
                    DropPosition::Before
                } else {
                    DropPosition::Into
                }
            }
            TargetKind::Leaf => {
                if pointer_fraction_y < self.leaf_split_ratio {
                    DropPosition::Before
                } else {
                    DropPosition::After
                }
            }
        }
    }
}

/// Resolves a drop position with the default zones (0.25 for groups,
/// 0.5 for leaves)
#[must_use]
pub fn resolve_drop_position(pointer_fraction_y: f64, is_group: bool) -> DropPosition {
    DropConfig::default().resolve(pointer_fraction_y, TargetKind::from_is_group(is_group))
}

/// Converts a Y coordinate within a row to a fraction in `[0, 1]`
#[must_use]
pub fn pointer_fraction(y_in_row: f64, row_height: f64) -> f64 {
    if row_height <= 0.0 || !y_in_row.is_finite() {
        return 0.0;
    }
    (y_in_row / row_height).clamp(0.0, 1.0)
}

/// Calculates the drop position based on Y coordinate within a row
///
/// # Arguments
/// * `y_in_row` - Y coordinate relative to the top of the row
/// * `kind` - Kind of the target item
/// * `config` - Drop configuration
#[must_use]
pub fn calculate_drop_position(
    y_in_row: f64,
    kind: TargetKind,
    config: &DropConfig,
) -> DropPosition {
    config.resolve(pointer_fraction(y_in_row, config.row_height), kind)
}

/// Validates that a drop position is valid for the given target kind
///
/// - Leaves can only have Before or After positions
/// - Groups can have Before, After, or Into positions
#[must_use]
pub const fn is_valid_drop_position(position: DropPosition, kind: TargetKind) -> bool {
    match kind {
        TargetKind::Leaf => !matches!(position, DropPosition::Into),
        TargetKind::Group => true,
    }
}

/// Current drop target of a drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropTarget {
    /// Item under the pointer
    pub id: ItemId,
    /// Where the drag set would land relative to it
    pub position: DropPosition,
}

/// State of an in-progress drag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragState {
    /// Ids being moved
    pub dragging_ids: HashSet<ItemId>,
    /// Where a drop would currently land, if anywhere valid
    pub drop_target: Option<DropTarget>,
}

impl DragState {
    /// Returns true if the item is part of the drag set
    #[must_use]
    pub fn is_dragging(&self, id: ItemId) -> bool {
        self.dragging_ids.contains(&id)
    }

    /// Drop position if `id` is the current drop target
    #[must_use]
    pub fn drop_position_for(&self, id: ItemId) -> Option<DropPosition> {
        self.drop_target
            .filter(|target| target.id == id)
            .map(|target| target.position)
    }
}

/// Begins a drag on `initiating_id`
///
/// Dragging a selected item drags the whole selection. Dragging an
/// unselected item drags only that item, and it becomes the sole selection.
///
/// # Errors
///
/// Returns `ItemNotFound` if the initiating item is not in the chain.
pub fn start_drag<P>(
    chain: &Chain<P>,
    selection: &SelectionState,
    initiating_id: ItemId,
) -> ChainResult<(DragState, SelectionState)> {
    if find_item(chain, initiating_id).is_none() {
        return Err(ChainError::ItemNotFound(initiating_id));
    }
    let selection = selection.prune(chain);
    if selection.is_selected(initiating_id) {
        let drag = DragState {
            dragging_ids: selection.selected_ids().clone(),
            drop_target: None,
        };
        Ok((drag, selection))
    } else {
        let drag = DragState {
            dragging_ids: HashSet::from([initiating_id]),
            drop_target: None,
        };
        Ok((drag, SelectionState::single(initiating_id)))
    }
}

/// Checks whether the drag set may be dropped on `target_id`
///
/// Fails for a target that is itself being dragged or that lies inside a
/// dragged group.
#[must_use]
pub fn can_drop<P>(chain: &Chain<P>, dragging_ids: &HashSet<ItemId>, target_id: ItemId) -> bool {
    if dragging_ids.contains(&target_id) {
        return false;
    }
    !ancestor_ids(chain, target_id)
        .iter()
        .any(|ancestor| dragging_ids.contains(ancestor))
}

/// Moves the drag set next to (or into) the target
///
/// Items keep their document order and land as one contiguous run. A
/// dragged item inside another dragged group moves with that group.
///
/// # Errors
///
/// - `EmptySelection` if no dragged id resolves
/// - `ItemNotFound` if the target does not resolve
/// - `CyclicDrop` if [`can_drop`] is false
/// - `InvalidDropPosition` for `Into` on a leaf
/// - `DepthExceeded` if the moved groups would nest too deep
pub fn perform_move<P: Clone>(
    chain: &Chain<P>,
    dragging_ids: &HashSet<ItemId>,
    target_id: ItemId,
    position: DropPosition,
) -> ChainResult<Chain<P>> {
    let _span = crate::trace_operation_debug!(
        crate::tracing::span_names::DRAG_DROP,
        item_count = dragging_ids.len(),
        target_id = %target_id
    )
    .entered();

    let target = find_item(chain, target_id).ok_or(ChainError::ItemNotFound(target_id))?;
    if !can_drop(chain, dragging_ids, target_id) {
        return Err(ChainError::CyclicDrop);
    }
    if !is_valid_drop_position(position, TargetKind::from_is_group(target.is_group())) {
        return Err(ChainError::InvalidDropPosition);
    }

    let ordered = top_most_ids(dragging_ids, chain);
    if ordered.is_empty() {
        return Err(ChainError::EmptySelection);
    }
    let paths = find_paths(chain, &ordered.iter().copied().collect());
    let ordered_paths: Vec<_> = ordered
        .iter()
        .filter_map(|id| paths.get(id).cloned())
        .collect();

    let (remaining, moved) = extract_at_safely(chain, &ordered_paths);
    let target_path =
        find_path(&remaining, target_id).ok_or(ChainError::ItemNotFound(target_id))?;
    let insertion = match position {
        DropPosition::Before => target_path,
        DropPosition::After => {
            let index = target_path.last_index().unwrap_or(0);
            target_path.with_last_index(index + 1)
        }
        DropPosition::Into => {
            let children = find_item(&remaining, target_id).map_or(0, |t| t.children().len());
            target_path.child(children)
        }
    };

    debug!(
        moved = moved.len(),
        insertion = %insertion,
        ?position,
        "Moving dragged items"
    );
    insert_many_at(&remaining, &insertion, moved)
}

/// Drag state machine for one editing session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragSession {
    /// No drag in progress
    #[default]
    Idle,
    /// A drag is in progress
    Dragging(DragState),
}

impl DragSession {
    /// Returns true while a drag is in progress
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }

    /// Returns the drag state, if dragging
    #[must_use]
    pub const fn state(&self) -> Option<&DragState> {
        match self {
            Self::Idle => None,
            Self::Dragging(state) => Some(state),
        }
    }

    /// Starts a drag and returns the selection to adopt
    ///
    /// # Errors
    ///
    /// Returns `ItemNotFound` if the initiating item is not in the chain;
    /// the session is left unchanged.
    pub fn start<P>(
        &mut self,
        chain: &Chain<P>,
        selection: &SelectionState,
        initiating_id: ItemId,
    ) -> ChainResult<SelectionState> {
        let (drag, selection) = start_drag(chain, selection, initiating_id)?;
        *self = Self::Dragging(drag);
        Ok(selection)
    }

    /// Recomputes the drop target for a pointer move
    ///
    /// Cheap enough to run on every pointer-move notification. The target is
    /// cleared when the drop would be illegal, so a later release there is a
    /// cancel.
    pub fn drag_over<P>(
        &mut self,
        chain: &Chain<P>,
        target_id: ItemId,
        pointer_fraction_y: f64,
        config: &DropConfig,
    ) -> Option<DropTarget> {
        let Self::Dragging(state) = self else {
            return None;
        };
        state.drop_target = find_item(chain, target_id)
            .filter(|_| can_drop(chain, &state.dragging_ids, target_id))
            .map(|target| DropTarget {
                id: target_id,
                position: config.resolve(
                    pointer_fraction_y,
                    TargetKind::from_is_group(target.is_group()),
                ),
            });
        state.drop_target
    }

    /// Clears the drop target (pointer left every row)
    pub fn leave_target(&mut self) {
        if let Self::Dragging(state) = self {
            state.drop_target = None;
        }
    }

    /// Ends the drag, committing the move if there is a valid target
    ///
    /// The session is Idle afterwards whatever the outcome.
    ///
    /// # Errors
    ///
    /// Returns `NotDragging` when idle, `NoDropTarget` when released with no
    /// valid target, or any error from [`perform_move`].
    pub fn release<P: Clone>(&mut self, chain: &Chain<P>) -> ChainResult<Chain<P>> {
        let session = std::mem::take(self);
        let Self::Dragging(state) = session else {
            return Err(ChainError::NotDragging);
        };
        let Some(target) = state.drop_target else {
            debug!("Drag released without a drop target");
            return Err(ChainError::NoDropTarget);
        };
        perform_move(chain, &state.dragging_ids, target.id, target.position)
    }

    /// Abandons the drag without touching the chain
    pub fn cancel(&mut self) {
        *self = Self::Idle;
    }

    /// Drops dragged ids and a drop target that no longer exist
    pub fn prune<P>(&mut self, chain: &Chain<P>) {
        if let Self::Dragging(state) = self {
            state.dragging_ids.retain(|id| find_item(chain, *id).is_some());
            if state
                .drop_target
                .is_some_and(|target| find_item(chain, target.id).is_none())
            {
                state.drop_target = None;
            }
            if state.dragging_ids.is_empty() {
                *self = Self::Idle;
            }
        }
    }
}
