//! Editor settings
//!
//! Every section and field has a default, so a settings file only needs
//! the values it changes.
//!
//! ```toml
//! [drop]
//! group_before_fraction = 0.3
//!
//! [clipboard]
//! paste_after_selection = false
//!
//! [logging]
//! level = "debug"
//!
//! [keybindings.overrides]
//! "chain.duplicate" = "<Control><Shift>d"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::keybindings::KeybindingSettings;
use crate::drag_drop::DropConfig;
use crate::error::{ConfigError, ConfigResult};
use crate::tracing::TracingLevel;

/// All editor settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Drop zone geometry
    pub drop: DropSettings,
    /// Clipboard behaviour
    pub clipboard: ClipboardSettings,
    /// Log output
    pub logging: LoggingSettings,
    /// Keyboard shortcut overrides
    pub keybindings: KeybindingSettings,
}

/// Drop zone geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropSettings {
    /// Row height in pixels
    pub row_height: f64,
    /// Top fraction of a group row that drops before the group
    pub group_before_fraction: f64,
    /// Fraction of a leaf row that splits Before from After
    pub leaf_split_fraction: f64,
}

impl Default for DropSettings {
    fn default() -> Self {
        let config = DropConfig::default();
        Self {
            row_height: config.row_height,
            group_before_fraction: config.group_before_ratio,
            leaf_split_fraction: config.leaf_split_ratio,
        }
    }
}

impl From<DropSettings> for DropConfig {
    fn from(settings: DropSettings) -> Self {
        Self {
            row_height: settings.row_height,
            group_before_ratio: settings.group_before_fraction,
            leaf_split_ratio: settings.leaf_split_fraction,
        }
    }
}

/// Clipboard behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipboardSettings {
    /// Paste after the selection anchor when it is a root item
    pub paste_after_selection: bool,
}

impl Default for ClipboardSettings {
    fn default() -> Self {
        Self {
            paste_after_selection: true,
        }
    }
}

/// Log output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Level name: error, warn, info, debug or trace
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: TracingLevel::default().to_string(),
        }
    }
}

impl LoggingSettings {
    /// Parsed level, or `None` if the name is not recognised
    #[must_use]
    pub fn tracing_level(&self) -> Option<TracingLevel> {
        self.level.parse().ok()
    }
}

impl EditorSettings {
    /// Parses and validates settings from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `Parse` for malformed TOML or `Validation` for values out of
    /// range.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let settings: Self =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serializes the settings to TOML text.
    ///
    /// # Errors
    ///
    /// Returns `Serialize` if TOML serialization fails.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Loads settings from a file.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the file does not exist, otherwise any error
    /// from [`Self::from_toml_str`].
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let _span = crate::trace_operation!(
            crate::tracing::span_names::CONFIG_LOAD,
            path = %path.display()
        )
        .entered();

        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Loads settings, using defaults if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns any error from [`Self::load`] other than `NotFound`.
    pub fn load_or_default(path: &Path) -> ConfigResult<Self> {
        match Self::load(path) {
            Err(ConfigError::NotFound(_)) => {
                tracing::debug!(path = %path.display(), "No settings file, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Writes settings to a file, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns `Validation`, `Serialize` or `Write`.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let _span = crate::trace_operation!(
            crate::tracing::span_names::CONFIG_SAVE,
            path = %path.display()
        )
        .entered();

        self.validate()?;
        let content = self.to_toml_string()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Write(e.to_string()))?;
        }
        fs::write(path, content).map_err(|e| ConfigError::Write(e.to_string()))
    }

    /// Checks that every value is in range.
    ///
    /// # Errors
    ///
    /// Returns `Validation` naming the first offending field.
    pub fn validate(&self) -> ConfigResult<()> {
        check_fraction("drop.group_before_fraction", self.drop.group_before_fraction)?;
        check_fraction("drop.leaf_split_fraction", self.drop.leaf_split_fraction)?;
        if !(self.drop.row_height.is_finite() && self.drop.row_height > 0.0) {
            return Err(ConfigError::Validation {
                field: "drop.row_height".to_string(),
                reason: "must be a positive number of pixels".to_string(),
            });
        }
        if self.logging.tracing_level().is_none() {
            return Err(ConfigError::Validation {
                field: "logging.level".to_string(),
                reason: format!("unknown level '{}'", self.logging.level),
            });
        }
        if let Some(action) = self.keybindings.unknown_actions().first() {
            return Err(ConfigError::Validation {
                field: "keybindings.overrides".to_string(),
                reason: format!("unknown action '{action}'"),
            });
        }
        Ok(())
    }

    /// Drop geometry for the drag engine
    #[must_use]
    pub fn drop_config(&self) -> DropConfig {
        self.drop.into()
    }
}

fn check_fraction(field: &str, value: f64) -> ConfigResult<()> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(ConfigError::Validation {
            field: field.to_string(),
            reason: format!("{value} must lie strictly between 0 and 1"),
        })
    }
}
