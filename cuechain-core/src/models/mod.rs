//! Core data structures for editable chains
//!
//! - `types` - [`ItemId`]
//! - `item` - [`Item`], [`LeafItem`], [`GroupItem`], [`Chain`]
//! - `definition` - leaf payloads ([`Definition`], [`ChainPayload`])

mod definition;
mod item;
mod types;

pub use definition::{ChainPayload, Definition};
pub use item::{Chain, DEFAULT_GROUP_NAME, GroupItem, Item, LeafItem, MAX_GROUP_DEPTH};
pub use types::ItemId;
