//! Move command.
//!
//! Runs the same drag set rules as a pointer drag, but takes the drop
//! position directly, so `after` a group is reachable too.

use cuechain_core::{DropPosition, SelectionState, perform_move, start_drag};

use crate::error::CliError;
use crate::util::{Context, resolve_item, resolve_items};

/// Move command handler
pub fn cmd_move(
    context: &Context,
    items: &[String],
    target: &str,
    position: DropPosition,
) -> Result<(), CliError> {
    let mut editor = context.open_editor()?;
    let catalog = context.load_catalog()?;
    let ids = resolve_items(editor.chain(), &catalog, items)?;
    let target_id = resolve_item(editor.chain(), &catalog, target)?;
    let first = *ids
        .first()
        .ok_or_else(|| CliError::Usage("nothing to move".to_string()))?;

    let selection = SelectionState::with_ids(ids.iter().copied().collect(), ids.last().copied());
    let (drag, _) = start_drag(editor.chain(), &selection, first)?;
    let next = perform_move(editor.chain(), &drag.dragging_ids, target_id, position)?;
    editor.replace_chain(next)?;
    context.save_editor(&editor)?;
    tracing::info!(items = ids.len(), target = %target_id, ?position, "Moved items");
    Ok(())
}
