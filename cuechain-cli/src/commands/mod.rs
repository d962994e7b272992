//! Command handler modules for the CLI.

mod add;
mod clipboard;
mod delete;
mod group;
mod init;
mod move_items;
mod settings;
mod show;
mod toggle;

use crate::cli::Commands;
use crate::error::CliError;
use crate::util::Context;

/// Dispatch a CLI command to the appropriate handler.
pub fn dispatch(context: &Context, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Init { force } => init::cmd_init(context, force),
        Commands::Show { format, all } => show::cmd_show(context, format, all),
        Commands::Flatten => show::cmd_flatten(context),
        Commands::Add {
            definition,
            after,
            params,
        } => add::cmd_add(context, &definition, after.as_deref(), &params),
        Commands::AddGroup { name, after } => {
            add::cmd_add_group(context, &name, after.as_deref())
        }
        Commands::Group { items, name } => group::cmd_group(context, &items, name.as_deref()),
        Commands::Ungroup { group } => group::cmd_ungroup(context, &group),
        Commands::Rename { group, name } => group::cmd_rename(context, &group, &name),
        Commands::Move {
            items,
            target,
            position,
        } => move_items::cmd_move(context, &items, &target, position.into()),
        Commands::Copy { items, after } => {
            clipboard::cmd_copy(context, &items, after.as_deref())
        }
        Commands::Duplicate { items } => clipboard::cmd_duplicate(context, &items),
        Commands::Delete { items } => delete::cmd_delete(context, &items),
        Commands::Collapse { group } => toggle::cmd_collapse(context, &group),
        Commands::Enable { item } => toggle::cmd_set_enabled(context, &item, true),
        Commands::Disable { item } => toggle::cmd_set_enabled(context, &item, false),
        Commands::Settings(subcmd) => settings::cmd_settings(context, subcmd),
    }
}
