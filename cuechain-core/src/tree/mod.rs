//! Path addressing and structural surgery
//!
//! # Module Structure
//!
//! - `path` - [`ItemPath`], the derived position of an item
//! - `index` - id lookups, flattened ordering, leaf counts
//! - `surgery` - read/update/insert/delete by path, batch-safe deletion
//! - `validate` - whole-chain invariant checks
//!
//! # Example
//!
//! ```
//! use cuechain_core::models::{Chain, Item};
//! use cuechain_core::tree::{self, ItemPath};
//!
//! let chain = Chain::from_items(vec![Item::leaf("a"), Item::leaf("b")]);
//! let b = chain.items()[1].id();
//!
//! let chain = tree::insert_at(&chain, &ItemPath::root(0), Item::leaf("c")).unwrap();
//! assert_eq!(tree::find_path(&chain, b), Some(ItemPath::root(2)));
//! ```

pub mod index;
mod path;
pub mod surgery;
mod validate;

pub use index::{
    ancestor_ids, contains, count_leaves, descendant_ids, find_item, find_path, find_paths,
    flatten, flatten_visible, is_descendant_of, max_group_depth,
};
pub use path::ItemPath;
pub use surgery::{
    check_depth, delete_at, delete_at_safely, extract_at_safely, get_at, insert_at,
    insert_many_at, top_most_paths, update_at,
};
pub use validate::validate_chain;
