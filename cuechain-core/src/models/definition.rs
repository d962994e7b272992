//! Leaf payloads
//!
//! The tree engine is generic over the leaf payload. Effects, presets and
//! cues all use [`Definition`]: a key into an external catalog plus opaque
//! parameters that are passed through verbatim.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Payloads that can be labelled through a definition registry.
pub trait ChainPayload: Clone {
    /// Catalog key used to look up display metadata.
    fn definition_ref(&self) -> &str;
}

/// Default leaf payload: a definition reference and its parameters.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Definition {
    /// Key into the external definition catalog.
    pub definition_ref: String,
    /// Parameter values, never interpreted by the engine.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, serde_json::Value>,
}

impl Definition {
    /// Creates a definition payload with no parameters.
    #[must_use]
    pub fn new(definition_ref: impl Into<String>) -> Self {
        Self {
            definition_ref: definition_ref.into(),
            params: BTreeMap::new(),
        }
    }

    /// Adds a parameter value.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

impl ChainPayload for Definition {
    fn definition_ref(&self) -> &str {
        &self.definition_ref
    }
}

impl ChainPayload for String {
    fn definition_ref(&self) -> &str {
        self
    }
}

impl ChainPayload for &'static str {
    fn definition_ref(&self) -> &str {
        self
    }
}
