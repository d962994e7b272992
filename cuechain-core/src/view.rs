//! Row view models for a list renderer
//!
//! [`build_rows`] walks the chain once, top-down, and computes everything a
//! renderer needs per row. Renderers paint; they never inspect the chain or
//! the session state themselves.

use crate::drag_drop::{DragState, DropPosition};
use crate::models::{Chain, ChainPayload, Item, ItemId, MAX_GROUP_DEPTH};
use crate::registry::DefinitionRegistry;
use crate::selection::SelectionState;
use crate::tree::ItemPath;

/// Which rows to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowVisibility {
    /// Every item, including children of collapsed groups
    All,
    /// Skip children of collapsed groups
    #[default]
    Visible,
}

/// Everything a renderer needs to paint one row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    /// Item id
    pub id: ItemId,
    /// Structural location
    pub path: ItemPath,
    /// Nesting depth (root items are 0)
    pub depth: usize,
    /// Indentation level, capped at [`MAX_GROUP_DEPTH`]
    pub indent_level: usize,
    /// Whether the row is a group header
    pub is_group: bool,
    /// Group collapse flag (false for leaves)
    pub collapsed: bool,
    /// Display label: group name or registry name of the leaf
    pub label: String,
    /// Leaves under this item (1 for a leaf)
    pub leaf_count: usize,
    /// The item's own enabled flag
    pub enabled: bool,
    /// Disabled itself or under a disabled group
    pub effectively_disabled: bool,
    /// Part of the selection
    pub selected: bool,
    /// Part of the drag set
    pub dragging: bool,
    /// Drop indicator when this row is the current drop target
    pub drop_position: Option<DropPosition>,
    /// Showing an inline rename editor
    pub renaming: bool,
}

impl RowView {
    /// Returns true if this row is the current drop target.
    #[must_use]
    pub const fn is_drop_target(&self) -> bool {
        self.drop_position.is_some()
    }
}

/// Session state that decorates rows
#[derive(Debug, Clone, Copy)]
pub struct RowContext<'a, R> {
    /// Current selection
    pub selection: &'a SelectionState,
    /// Drag in progress, if any
    pub drag: Option<&'a DragState>,
    /// Item being renamed, if any
    pub renaming: Option<ItemId>,
    /// Catalog used for leaf labels
    pub registry: &'a R,
    /// Which rows to produce
    pub visibility: RowVisibility,
}

/// Builds one row per item, in document order.
#[must_use]
pub fn build_rows<P, R>(chain: &Chain<P>, context: &RowContext<'_, R>) -> Vec<RowView>
where
    P: ChainPayload,
    R: DefinitionRegistry,
{
    let mut rows = Vec::new();
    push_rows(chain.items(), &ItemPath::default(), false, context, &mut rows);
    rows
}

fn push_rows<P, R>(
    items: &[Item<P>],
    parent: &ItemPath,
    parent_disabled: bool,
    context: &RowContext<'_, R>,
    rows: &mut Vec<RowView>,
) where
    P: ChainPayload,
    R: DefinitionRegistry,
{
    for (index, item) in items.iter().enumerate() {
        let id = item.id();
        let path = parent.child(index);
        let depth = path.depth().saturating_sub(1);
        let effectively_disabled = parent_disabled || !item.is_enabled();
        let (label, collapsed) = match item {
            Item::Leaf(leaf) => (context.registry.label_for(&leaf.payload), false),
            Item::Group(group) => (group.name.clone(), group.collapsed),
        };

        rows.push(RowView {
            id,
            path: path.clone(),
            depth,
            indent_level: depth.min(MAX_GROUP_DEPTH),
            is_group: item.is_group(),
            collapsed,
            label,
            leaf_count: item.leaf_count(),
            enabled: item.is_enabled(),
            effectively_disabled,
            selected: context.selection.is_selected(id),
            dragging: context.drag.is_some_and(|drag| drag.is_dragging(id)),
            drop_position: context.drag.and_then(|drag| drag.drop_position_for(id)),
            renaming: context.renaming == Some(id),
        });

        let hidden = collapsed && context.visibility == RowVisibility::Visible;
        if !hidden {
            push_rows(item.children(), &path, effectively_disabled, context, rows);
        }
    }
}
