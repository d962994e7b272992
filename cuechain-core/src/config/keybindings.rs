//! Keyboard shortcuts for chain editor commands
//!
//! The registry is data only. A host toolkit reads [`default_keybindings`]
//! and the user's [`KeybindingSettings`], installs the accelerators, and
//! routes each action to the matching `ChainEditor` command.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Custom keybinding overrides stored in user settings.
///
/// Each entry maps an action name (e.g. `"chain.copy"`) to an accelerator
/// string (e.g. `"<Control>c"`). Actions not present in `overrides` use
/// their built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeybindingSettings {
    /// Action name to accelerator string.
    ///
    /// Only overridden bindings are stored; defaults are implicit.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub overrides: HashMap<String, String>,
}

/// Editor commands that can be bound to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorAction {
    /// Copy the selection to the clipboard
    Copy,
    /// Cut the selection to the clipboard
    Cut,
    /// Paste the clipboard
    Paste,
    /// Duplicate the selection in place
    Duplicate,
    /// Delete the selection
    DeleteSelected,
    /// Select every item
    SelectAll,
    /// Clear the selection
    ClearSelection,
    /// Wrap the selection in a new group
    GroupSelected,
    /// Ungroup the selected group
    Ungroup,
    /// Cancel a drag in progress
    CancelDrag,
}

impl EditorAction {
    /// Every action, in display order.
    pub const ALL: [Self; 10] = [
        Self::Copy,
        Self::Cut,
        Self::Paste,
        Self::Duplicate,
        Self::DeleteSelected,
        Self::SelectAll,
        Self::ClearSelection,
        Self::GroupSelected,
        Self::Ungroup,
        Self::CancelDrag,
    ];

    /// Action name used in settings files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Copy => "chain.copy",
            Self::Cut => "chain.cut",
            Self::Paste => "chain.paste",
            Self::Duplicate => "chain.duplicate",
            Self::DeleteSelected => "chain.delete-selected",
            Self::SelectAll => "chain.select-all",
            Self::ClearSelection => "chain.clear-selection",
            Self::GroupSelected => "chain.group-selected",
            Self::Ungroup => "chain.ungroup",
            Self::CancelDrag => "chain.cancel-drag",
        }
    }
}

impl fmt::Display for EditorAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EditorAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.name() == s)
            .ok_or_else(|| format!("unknown action: {s}"))
    }
}

/// A single keybinding definition with its default accelerator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeybindingDef {
    /// The bound command
    pub action: EditorAction,
    /// Default accelerator(s), pipe-separated for multiple (e.g. `"Delete|BackSpace"`)
    pub default_accels: String,
    /// Human-readable label for a settings UI
    pub label: String,
    /// Category for grouping in a settings UI
    pub category: KeybindingCategory,
}

/// Categories for organizing keybindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeybindingCategory {
    /// Clipboard commands (copy, cut, paste, duplicate)
    Clipboard,
    /// Selection commands
    Selection,
    /// Structural edits (delete, group, ungroup)
    Structure,
    /// Drag gestures
    Drag,
}

impl KeybindingCategory {
    /// Returns the display label for this category.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Clipboard => "Clipboard",
            Self::Selection => "Selection",
            Self::Structure => "Structure",
            Self::Drag => "Drag and Drop",
        }
    }

    /// Returns all categories in display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Clipboard, Self::Selection, Self::Structure, Self::Drag]
    }
}

impl KeybindingDef {
    /// Creates a new keybinding definition.
    #[must_use]
    pub fn new(
        action: EditorAction,
        default_accels: impl Into<String>,
        label: impl Into<String>,
        category: KeybindingCategory,
    ) -> Self {
        Self {
            action,
            default_accels: default_accels.into(),
            label: label.into(),
            category,
        }
    }

    /// Splits the default accelerators into a list.
    #[must_use]
    pub fn default_accel_list(&self) -> Vec<&str> {
        self.default_accels.split('|').collect()
    }
}

impl KeybindingSettings {
    /// Returns the accelerator(s) for an action, falling back to the default.
    #[must_use]
    pub fn get_accel<'a>(&'a self, def: &'a KeybindingDef) -> &'a str {
        self.overrides
            .get(def.action.name())
            .map_or(def.default_accels.as_str(), String::as_str)
    }

    /// Returns `true` if the user has overridden any keybindings.
    #[must_use]
    pub fn has_overrides(&self) -> bool {
        !self.overrides.is_empty()
    }

    /// Override keys that name no known action.
    #[must_use]
    pub fn unknown_actions(&self) -> Vec<&str> {
        let mut unknown: Vec<&str> = self
            .overrides
            .keys()
            .map(String::as_str)
            .filter(|name| name.parse::<EditorAction>().is_err())
            .collect();
        unknown.sort_unstable();
        unknown
    }

    /// Resets a single action to its default binding.
    pub fn reset(&mut self, action: EditorAction) {
        self.overrides.remove(action.name());
    }

    /// Resets all overrides.
    pub fn reset_all(&mut self) {
        self.overrides.clear();
    }
}

/// Returns the default keybinding for every editor action.
#[must_use]
pub fn default_keybindings() -> Vec<KeybindingDef> {
    use EditorAction::{
        CancelDrag, ClearSelection, Copy, Cut, DeleteSelected, Duplicate, GroupSelected, Paste,
        SelectAll, Ungroup,
    };
    use KeybindingCategory::{Clipboard, Drag, Selection, Structure};
    vec![
        KeybindingDef::new(Copy, "<Control>c", "Copy", Clipboard),
        KeybindingDef::new(Cut, "<Control>x", "Cut", Clipboard),
        KeybindingDef::new(Paste, "<Control>v", "Paste", Clipboard),
        KeybindingDef::new(Duplicate, "<Control>d", "Duplicate", Clipboard),
        KeybindingDef::new(SelectAll, "<Control>a", "Select All", Selection),
        KeybindingDef::new(ClearSelection, "Escape", "Clear Selection", Selection),
        KeybindingDef::new(DeleteSelected, "Delete|BackSpace", "Delete", Structure),
        KeybindingDef::new(GroupSelected, "<Control>g", "Group", Structure),
        KeybindingDef::new(Ungroup, "<Control><Shift>g", "Ungroup", Structure),
        KeybindingDef::new(CancelDrag, "Escape", "Cancel Drag", Drag),
    ]
}

/// Validates an accelerator string.
///
/// Accepts a key name optionally preceded by `<Modifier>` tags.
#[must_use]
pub fn is_valid_accelerator(accel: &str) -> bool {
    let trimmed = accel.trim();
    !trimmed.is_empty() && !trimmed.ends_with('>')
}
