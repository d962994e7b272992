//! Item creation commands.

use cuechain_core::{Definition, Item};

use crate::error::CliError;
use crate::util::{Context, FileEditor, param_value, resolve_item};

/// Add command handler
pub fn cmd_add(
    context: &Context,
    definition: &str,
    after: Option<&str>,
    params: &[(String, String)],
) -> Result<(), CliError> {
    let payload = params
        .iter()
        .fold(Definition::new(definition), |payload, (key, value)| {
            payload.with_param(key.as_str(), param_value(value))
        });
    add_item(context, Item::leaf(payload), after)
}

/// Add-group command handler
pub fn cmd_add_group(context: &Context, name: &str, after: Option<&str>) -> Result<(), CliError> {
    add_item(context, Item::group(name, Vec::new()), after)
}

fn add_item(
    context: &Context,
    item: Item<Definition>,
    after: Option<&str>,
) -> Result<(), CliError> {
    let mut editor: FileEditor = context.open_editor()?;
    let after_id = match after {
        Some(reference) => Some(resolve_item(
            editor.chain(),
            &context.load_catalog()?,
            reference,
        )?),
        None => None,
    };

    let id = editor.add_item(item, after_id)?;
    context.save_editor(&editor)?;
    println!("{id}");
    Ok(())
}
