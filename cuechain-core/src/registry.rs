//! Definition lookup
//!
//! Leaves carry only a definition key. Display metadata lives in a catalog
//! owned by the host, passed in wherever labels are needed. Any
//! `Fn(&str) -> Option<DefinitionInfo>` is a registry, so a catalog can be
//! injected as a closure.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::ChainPayload;

/// Display metadata for one definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionInfo {
    /// Human-readable name shown in the row
    pub display_name: String,
    /// Optional catalog category (e.g. "effect", "preset", "cue")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl DefinitionInfo {
    /// Creates metadata with only a display name.
    #[must_use]
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            category: None,
        }
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// Resolves definition keys to display metadata.
pub trait DefinitionRegistry {
    /// Looks up a definition, returning `None` for unknown keys.
    fn lookup(&self, definition_ref: &str) -> Option<DefinitionInfo>;

    /// Label for a leaf payload, falling back to the raw key.
    fn label_for<P: ChainPayload>(&self, payload: &P) -> String
    where
        Self: Sized,
    {
        let key = payload.definition_ref();
        self.lookup(key)
            .map_or_else(|| key.to_string(), |info| info.display_name)
    }
}

impl<F> DefinitionRegistry for F
where
    F: Fn(&str) -> Option<DefinitionInfo>,
{
    fn lookup(&self, definition_ref: &str) -> Option<DefinitionInfo> {
        self(definition_ref)
    }
}

/// A fixed in-memory catalog.
///
/// Serializes as a plain map from key to metadata, so a catalog file can be
/// loaded with serde directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaticRegistry {
    entries: HashMap<String, DefinitionInfo>,
}

impl StaticRegistry {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an entry.
    pub fn insert(&mut self, definition_ref: impl Into<String>, info: DefinitionInfo) {
        self.entries.insert(definition_ref.into(), info);
    }

    /// Builder form of [`Self::insert`].
    #[must_use]
    pub fn with(mut self, definition_ref: impl Into<String>, info: DefinitionInfo) -> Self {
        self.insert(definition_ref, info);
        self
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DefinitionRegistry for StaticRegistry {
    fn lookup(&self, definition_ref: &str) -> Option<DefinitionInfo> {
        self.entries.get(definition_ref).cloned()
    }
}
