//! Copy and duplicate commands.
//!
//! The clipboard does not outlive one invocation, so `copy` copies and
//! pastes in a single step.

use cuechain_core::ClickMode;

use crate::error::CliError;
use crate::util::{Context, resolve_item, resolve_items, select_items};

/// Copy command handler
pub fn cmd_copy(context: &Context, items: &[String], after: Option<&str>) -> Result<(), CliError> {
    let mut editor = context.open_editor()?;
    let catalog = context.load_catalog()?;
    let ids = resolve_items(editor.chain(), &catalog, items)?;
    let after_id = match after {
        Some(reference) => Some(resolve_item(editor.chain(), &catalog, reference)?),
        None => None,
    };

    select_items(&mut editor, &ids);
    editor.copy_selected();
    match after_id {
        Some(id) => editor.click(id, ClickMode::Single),
        None => editor.clear_selection(),
    }
    let pasted = editor.paste()?;
    context.save_editor(&editor)?;
    for id in pasted {
        println!("{id}");
    }
    Ok(())
}

/// Duplicate command handler
pub fn cmd_duplicate(context: &Context, items: &[String]) -> Result<(), CliError> {
    let mut editor = context.open_editor()?;
    let ids = resolve_items(editor.chain(), &context.load_catalog()?, items)?;

    select_items(&mut editor, &ids);
    let created = editor.duplicate_selected()?;
    context.save_editor(&editor)?;
    for id in created {
        println!("{id}");
    }
    Ok(())
}
