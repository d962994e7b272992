//! Group management commands.

use crate::error::CliError;
use crate::util::{Context, resolve_item, resolve_items, select_items};

/// Group command handler
pub fn cmd_group(context: &Context, items: &[String], name: Option<&str>) -> Result<(), CliError> {
    let mut editor = context.open_editor()?;
    let catalog = context.load_catalog()?;
    let ids = resolve_items(editor.chain(), &catalog, items)?;

    select_items(&mut editor, &ids);
    let group_id = editor.group_selected()?;
    if let Some(name) = name {
        editor.rename(group_id, name)?;
    }
    context.save_editor(&editor)?;
    println!("{group_id}");
    Ok(())
}

/// Ungroup command handler
pub fn cmd_ungroup(context: &Context, group: &str) -> Result<(), CliError> {
    let mut editor = context.open_editor()?;
    let group_id = resolve_item(editor.chain(), &context.load_catalog()?, group)?;

    editor.ungroup(group_id)?;
    context.save_editor(&editor)?;
    Ok(())
}

/// Rename command handler
pub fn cmd_rename(context: &Context, group: &str, name: &str) -> Result<(), CliError> {
    let mut editor = context.open_editor()?;
    let group_id = resolve_item(editor.chain(), &context.load_catalog()?, group)?;

    editor.begin_rename(group_id)?;
    editor.rename(group_id, name)?;
    context.save_editor(&editor)?;
    Ok(())
}
