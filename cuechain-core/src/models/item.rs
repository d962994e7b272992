//! Chain items and the chain root
//!
//! A chain is an ordered sequence of items. Each item is either a leaf
//! wrapping an opaque payload, or a group holding further items. Order is
//! evaluation order, so every sequence here is significant.
//!
//! # Structure
//!
//! ```text
//! Chain
//! ├── Leaf(A)
//! ├── Group(G)
//! │   ├── Leaf(X)
//! │   └── Group(H)
//! │       └── Leaf(Y)
//! └── Leaf(B)
//! ```

use serde::{Deserialize, Serialize};

use super::types::ItemId;

/// Maximum group-within-group nesting.
///
/// A group at the root of the chain sits at level 1, a group inside it at
/// level 2, and so on. No group may sit deeper than this level.
pub const MAX_GROUP_DEPTH: usize = 3;

/// Name given to groups created without an explicit name.
pub const DEFAULT_GROUP_NAME: &str = "Group";

/// A node in the chain tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Item<P> {
    /// A leaf wrapping an opaque payload.
    Leaf(LeafItem<P>),
    /// A named group of child items.
    Group(GroupItem<P>),
}

/// A leaf item.
///
/// The payload is never interpreted by the tree engine; it is carried
/// through moves and copies unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafItem<P> {
    /// Unique identifier.
    pub id: ItemId,
    /// Whether the leaf takes part in evaluation.
    pub enabled: bool,
    /// Opaque payload (definition reference plus parameters).
    pub payload: P,
}

/// A group item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupItem<P> {
    /// Unique identifier.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Whether the group (and so all of its descendants) is active.
    pub enabled: bool,
    /// Display-only collapse flag. Structure ignores it.
    #[serde(default)]
    pub collapsed: bool,
    /// Ordered children.
    #[serde(default = "Vec::new")]
    pub children: Vec<Item<P>>,
}

impl<P> LeafItem<P> {
    /// Creates an enabled leaf with a fresh id.
    #[must_use]
    pub fn new(payload: P) -> Self {
        Self {
            id: ItemId::new(),
            enabled: true,
            payload,
        }
    }
}

impl<P> GroupItem<P> {
    /// Creates an enabled, expanded group with a fresh id.
    #[must_use]
    pub fn new(name: impl Into<String>, children: Vec<Item<P>>) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            enabled: true,
            collapsed: false,
            children,
        }
    }
}

impl<P> Item<P> {
    /// Creates a leaf item with a fresh id.
    #[must_use]
    pub fn leaf(payload: P) -> Self {
        Self::Leaf(LeafItem::new(payload))
    }

    /// Creates a group item with a fresh id.
    #[must_use]
    pub fn group(name: impl Into<String>, children: Vec<Self>) -> Self {
        Self::Group(GroupItem::new(name, children))
    }

    /// Returns the item's id.
    #[must_use]
    pub const fn id(&self) -> ItemId {
        match self {
            Self::Leaf(leaf) => leaf.id,
            Self::Group(group) => group.id,
        }
    }

    /// Replaces the item's own id (children are untouched).
    pub fn set_id(&mut self, id: ItemId) {
        match self {
            Self::Leaf(leaf) => leaf.id = id,
            Self::Group(group) => group.id = id,
        }
    }

    /// Returns true if this is a group.
    #[must_use]
    pub const fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }

    /// Returns true if this is a leaf.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    /// Returns the item's own enabled flag (ancestors not considered).
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        match self {
            Self::Leaf(leaf) => leaf.enabled,
            Self::Group(group) => group.enabled,
        }
    }

    /// Sets the item's own enabled flag.
    pub fn set_enabled(&mut self, enabled: bool) {
        match self {
            Self::Leaf(leaf) => leaf.enabled = enabled,
            Self::Group(group) => group.enabled = enabled,
        }
    }

    /// Returns the group if this is a group item.
    #[must_use]
    pub const fn as_group(&self) -> Option<&GroupItem<P>> {
        match self {
            Self::Leaf(_) => None,
            Self::Group(group) => Some(group),
        }
    }

    /// Returns a mutable reference to the group if this is a group item.
    #[must_use]
    pub fn as_group_mut(&mut self) -> Option<&mut GroupItem<P>> {
        match self {
            Self::Leaf(_) => None,
            Self::Group(group) => Some(group),
        }
    }

    /// Returns the leaf if this is a leaf item.
    #[must_use]
    pub const fn as_leaf(&self) -> Option<&LeafItem<P>> {
        match self {
            Self::Leaf(leaf) => Some(leaf),
            Self::Group(_) => None,
        }
    }

    /// Returns the children of a group, or an empty slice for a leaf.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Leaf(_) => &[],
            Self::Group(group) => &group.children,
        }
    }

    /// Number of group levels contained in this item, itself included.
    ///
    /// A leaf has depth 0, a group of leaves 1, a group holding such a
    /// group 2.
    #[must_use]
    pub fn group_depth(&self) -> usize {
        match self {
            Self::Leaf(_) => 0,
            Self::Group(group) => {
                1 + group
                    .children
                    .iter()
                    .map(Self::group_depth)
                    .max()
                    .unwrap_or(0)
            }
        }
    }

    /// Recursive leaf count. Groups count leaf descendants, not children.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Group(group) => group.children.iter().map(Self::leaf_count).sum(),
        }
    }

    /// Pre-order walk over this item and every descendant.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Self)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }
}

/// The root of an editable list: an ordered sequence of items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Chain<P> {
    /// Root-level items in evaluation order.
    pub items: Vec<Item<P>>,
}

impl<P> Default for Chain<P> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<P> Chain<P> {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a chain from root-level items.
    #[must_use]
    pub fn from_items(items: Vec<Item<P>>) -> Self {
        Self { items }
    }

    /// Returns the root-level items.
    #[must_use]
    pub fn items(&self) -> &[Item<P>] {
        &self.items
    }

    /// Number of root-level items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the chain has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Ids of the root-level items, in order.
    #[must_use]
    pub fn root_ids(&self) -> Vec<ItemId> {
        self.items.iter().map(Item::id).collect()
    }

    /// Pre-order walk over every item in the chain.
    pub fn walk<'a>(&'a self, mut visit: impl FnMut(&'a Item<P>)) {
        for item in &self.items {
            item.walk(&mut visit);
        }
    }
}

impl<P> From<Vec<Item<P>>> for Chain<P> {
    fn from(items: Vec<Item<P>>) -> Self {
        Self::from_items(items)
    }
}
