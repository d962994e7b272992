//! Shared utility functions used across command modules.

use std::fs;
use std::path::{Path, PathBuf};

use cuechain_core::{
    Chain, ChainEditor, Definition, DefinitionRegistry, EditorSettings, Item, ItemId,
    StaticRegistry, TracingLevel,
};

use crate::error::CliError;

/// Chain payload used by chain files
pub type ChainFile = Chain<Definition>;

/// Editor over a chain file
pub type FileEditor = ChainEditor<Definition>;

/// File locations shared by every command
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Chain file
    pub chain: Option<PathBuf>,
    /// Settings file
    pub settings: Option<PathBuf>,
    /// Catalog file
    pub catalog: Option<PathBuf>,
}

impl Context {
    /// Returns the chain file path or a usage error.
    pub fn chain_path(&self) -> Result<&Path, CliError> {
        self.chain.as_deref().ok_or_else(|| {
            CliError::Usage("no chain file given; pass --chain or set CUECHAIN_CHAIN".to_string())
        })
    }

    /// Loads settings from the settings file, or defaults when it is absent.
    pub fn load_settings(&self) -> Result<EditorSettings, CliError> {
        match &self.settings {
            Some(path) => Ok(EditorSettings::load_or_default(path)?),
            None => Ok(EditorSettings::default()),
        }
    }

    /// Settings from an explicitly given settings file, if it loads.
    pub fn file_settings(&self) -> Option<EditorSettings> {
        self.settings.as_ref()?;
        self.load_settings().ok()
    }

    /// Loads the catalog, or an empty one when none is given.
    pub fn load_catalog(&self) -> Result<StaticRegistry, CliError> {
        let Some(path) = &self.catalog else {
            return Ok(StaticRegistry::new());
        };
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::Catalog(format!("{}: {e}", path.display())))?;
        serde_json::from_str(&content)
            .map_err(|e| CliError::Catalog(format!("{}: {e}", path.display())))
    }

    /// Opens an editor over the chain file.
    pub fn open_editor(&self) -> Result<FileEditor, CliError> {
        let chain = read_chain(self.chain_path()?)?;
        let settings = self.load_settings()?;
        Ok(ChainEditor::with_settings(chain, settings)?)
    }

    /// Writes the editor's chain back to the chain file.
    pub fn save_editor(&self, editor: &FileEditor) -> Result<(), CliError> {
        write_chain(self.chain_path()?, editor.chain())
    }
}

/// Log level: `-v` wins, then the settings file's `[logging] level`, then warn
pub fn log_level(verbose: u8, settings: Option<&EditorSettings>) -> TracingLevel {
    if verbose > 0 {
        return TracingLevel::from_verbosity(verbose);
    }
    settings
        .and_then(|settings| settings.logging.tracing_level())
        .unwrap_or(TracingLevel::Warn)
}

/// On-disk chain encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChainFormat {
    Json,
    Yaml,
}

impl ChainFormat {
    fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

/// Reads a chain file, choosing the format by extension.
pub fn read_chain(path: &Path) -> Result<ChainFile, CliError> {
    let content = fs::read_to_string(path)
        .map_err(|e| CliError::ChainFile(format!("{}: {e}", path.display())))?;
    let chain = match ChainFormat::for_path(path) {
        ChainFormat::Json => serde_json::from_str(&content).map_err(|e| e.to_string()),
        ChainFormat::Yaml => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
    }
    .map_err(|e| CliError::ChainFile(format!("{}: {e}", path.display())))?;
    tracing::debug!(path = %path.display(), "Loaded chain file");
    Ok(chain)
}

/// Writes a chain file, choosing the format by extension.
pub fn write_chain(path: &Path, chain: &ChainFile) -> Result<(), CliError> {
    let content = match ChainFormat::for_path(path) {
        ChainFormat::Json => serde_json::to_string_pretty(chain).map_err(|e| e.to_string()),
        ChainFormat::Yaml => serde_yaml::to_string(chain).map_err(|e| e.to_string()),
    }
    .map_err(|e| CliError::ChainFile(format!("Failed to serialize: {e}")))?;
    fs::write(path, content)?;
    tracing::debug!(path = %path.display(), "Saved chain file");
    Ok(())
}

/// Parse a key=value pair for leaf parameters
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid KEY=value: no `=` found in `{s}`"))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

/// Parameter value: JSON when it parses, otherwise a plain string
pub fn param_value(raw: &str) -> serde_json::Value {
    serde_json::from_str(raw).unwrap_or_else(|_| serde_json::Value::String(raw.to_string()))
}

/// First eight characters of an id, enough to type back in
pub fn short_id(id: ItemId) -> String {
    id.to_string().chars().take(8).collect()
}

/// Display label of an item: group name or catalog name of the leaf
pub fn item_label<R: DefinitionRegistry>(item: &Item<Definition>, registry: &R) -> String {
    match item {
        Item::Leaf(leaf) => registry.label_for(&leaf.payload),
        Item::Group(group) => group.name.clone(),
    }
}

/// Find an item by full id, exact label, or id prefix
pub fn resolve_item<R: DefinitionRegistry>(
    chain: &ChainFile,
    registry: &R,
    reference: &str,
) -> Result<ItemId, CliError> {
    let mut items = Vec::new();
    chain.walk(|item| items.push(item));

    if let Ok(uuid) = uuid::Uuid::parse_str(reference) {
        let id = ItemId::from_uuid(uuid);
        if items.iter().any(|item| item.id() == id) {
            return Ok(id);
        }
    }

    let by_label: Vec<_> = items
        .iter()
        .filter(|item| item_label(item, registry) == reference)
        .collect();
    if let Some(id) = single_match(reference, &by_label, registry)? {
        return Ok(id);
    }

    let prefix = reference.to_lowercase();
    let by_prefix: Vec<_> = items
        .iter()
        .filter(|item| item.id().to_string().starts_with(&prefix))
        .collect();
    single_match(reference, &by_prefix, registry)?
        .ok_or_else(|| CliError::ItemNotFound(reference.to_string()))
}

fn single_match<R: DefinitionRegistry>(
    reference: &str,
    matches: &[&&Item<Definition>],
    registry: &R,
) -> Result<Option<ItemId>, CliError> {
    match matches {
        [] => Ok(None),
        [item] => Ok(Some(item.id())),
        _ => {
            let labels: Vec<_> = matches
                .iter()
                .map(|item| format!("{} ({})", item_label(item, registry), short_id(item.id())))
                .collect();
            Err(CliError::Ambiguous {
                reference: reference.to_string(),
                matches: labels.join(", "),
            })
        }
    }
}

/// Resolves every reference, in the order given
pub fn resolve_items<R: DefinitionRegistry>(
    chain: &ChainFile,
    registry: &R,
    references: &[String],
) -> Result<Vec<ItemId>, CliError> {
    references
        .iter()
        .map(|reference| resolve_item(chain, registry, reference))
        .collect()
}

/// Selects exactly `ids`, anchored on the last one
pub fn select_items(editor: &mut FileEditor, ids: &[ItemId]) {
    editor.select_ids(ids);
}
