//! Editor settings and keybindings
//!
//! Settings are stored as TOML. See [`EditorSettings`] for the layout.

pub mod keybindings;
pub mod settings;

pub use keybindings::{
    EditorAction, KeybindingCategory, KeybindingDef, KeybindingSettings, default_keybindings,
    is_valid_accelerator,
};
pub use settings::{ClipboardSettings, DropSettings, EditorSettings, LoggingSettings};
