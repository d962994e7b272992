//! Delete command.

use crate::error::CliError;
use crate::util::{Context, resolve_items, select_items};

/// Delete command handler
pub fn cmd_delete(context: &Context, items: &[String]) -> Result<(), CliError> {
    let mut editor = context.open_editor()?;
    let ids = resolve_items(editor.chain(), &context.load_catalog()?, items)?;

    select_items(&mut editor, &ids);
    let deleted = editor.delete_selected()?;
    context.save_editor(&editor)?;
    println!("Deleted {deleted} item(s)");
    Ok(())
}
