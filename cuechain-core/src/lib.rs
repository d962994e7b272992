//! CueChain Core Library
//!
//! Tree, selection and drag-and-drop engine behind the editable, nestable
//! lists of a show-control editor: effect chains, preset lists, cue lists.
//! Items can be grouped up to [`MAX_GROUP_DEPTH`] levels, multi-selected,
//! dragged as a set, copied and pasted with fresh identities, and
//! grouped or ungrouped.
//!
//! The engine is generic over the leaf payload and never paints anything.
//! Structural operations are pure functions from one [`Chain`] value to the
//! next; [`ChainEditor`] wraps them into a session with selection, drag and
//! clipboard state.
//!
//! # Crate Structure
//!
//! - [`models`] - Items, groups, chains, ids and payloads
//! - [`tree`] - Path addressing, lookups and structural surgery
//! - [`selection`] - Click semantics, range selection, normalization
//! - [`drag_drop`] - Drop zones, drag sets and moves
//! - [`group`] - Group, ungroup, rename, collapse, enable
//! - [`clipboard`] - Copy, cut, paste, duplicate
//! - [`view`] / [`registry`] - Row view models and definition lookup
//! - [`editor`] - The command layer
//! - [`config`] - Settings and keybindings
//! - [`tracing`] - Logging setup and span names

#![warn(missing_docs)]

pub mod clipboard;
pub mod config;
pub mod drag_drop;
pub mod editor;
pub mod error;
pub mod group;
pub mod models;
pub mod registry;
pub mod selection;
pub mod tracing;
pub mod tree;
pub mod view;

pub use clipboard::{ClipboardBuffer, copy, cut, deep_copy_with_new_ids, duplicate, paste};
pub use config::{EditorAction, EditorSettings, KeybindingSettings, default_keybindings};
pub use crate::tracing::{
    TracingConfig, TracingError, TracingLevel, TracingOutput, init_tracing,
    is_tracing_initialized,
};
pub use drag_drop::{
    DragSession, DragState, DropConfig, DropPosition, DropTarget, TargetKind, can_drop,
    perform_move, resolve_drop_position, start_drag,
};
pub use editor::ChainEditor;
pub use error::{ChainError, ChainResult, ConfigError, ConfigResult};
pub use group::{create_group, create_group_named, ungroup};
pub use models::{
    Chain, ChainPayload, DEFAULT_GROUP_NAME, Definition, GroupItem, Item, ItemId, LeafItem,
    MAX_GROUP_DEPTH,
};
pub use registry::{DefinitionInfo, DefinitionRegistry, StaticRegistry};
pub use selection::{ClickMode, SelectionState, apply_click, normalize, select_all};
pub use tree::{ItemPath, count_leaves, find_path, find_paths, flatten, validate_chain};
pub use view::{RowContext, RowView, RowVisibility, build_rows};
