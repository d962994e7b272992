//! Collapse and enable flags.

use crate::error::CliError;
use crate::util::{Context, resolve_item};

/// Collapse command handler
pub fn cmd_collapse(context: &Context, group: &str) -> Result<(), CliError> {
    let mut editor = context.open_editor()?;
    let group_id = resolve_item(editor.chain(), &context.load_catalog()?, group)?;

    editor.toggle_collapse(group_id)?;
    context.save_editor(&editor)
}

/// Enable/disable command handler
pub fn cmd_set_enabled(context: &Context, item: &str, enabled: bool) -> Result<(), CliError> {
    let mut editor = context.open_editor()?;
    let id = resolve_item(editor.chain(), &context.load_catalog()?, item)?;

    editor.set_enabled(id, enabled)?;
    context.save_editor(&editor)
}
