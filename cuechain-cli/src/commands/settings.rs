//! Settings commands.

use cuechain_core::config::KeybindingCategory;
use cuechain_core::{EditorSettings, default_keybindings};

use crate::cli::SettingsCommands;
use crate::error::CliError;
use crate::util::Context;

/// Settings command handler
pub fn cmd_settings(context: &Context, subcmd: SettingsCommands) -> Result<(), CliError> {
    match subcmd {
        SettingsCommands::Show => cmd_settings_show(context),
        SettingsCommands::Init { force } => cmd_settings_init(context, force),
        SettingsCommands::Keybindings => cmd_settings_keybindings(context),
    }
}

fn cmd_settings_show(context: &Context) -> Result<(), CliError> {
    let settings = context.load_settings()?;
    print!("{}", settings.to_toml_string()?);
    Ok(())
}

fn cmd_settings_init(context: &Context, force: bool) -> Result<(), CliError> {
    let path = context.settings.as_deref().ok_or_else(|| {
        CliError::Usage("no settings file given; pass --settings or set CUECHAIN_SETTINGS".into())
    })?;
    if path.exists() && !force {
        return Err(CliError::Usage(format!(
            "{} already exists; pass --force to overwrite",
            path.display()
        )));
    }
    EditorSettings::default().save(path)?;
    println!("Wrote default settings to {}", path.display());
    Ok(())
}

fn cmd_settings_keybindings(context: &Context) -> Result<(), CliError> {
    let settings = context.load_settings()?;
    let defs = default_keybindings();

    for category in KeybindingCategory::all() {
        println!("{}:", category.label());
        for def in defs.iter().filter(|def| def.category == *category) {
            let accel = settings.keybindings.get_accel(def);
            let marker = if accel == def.default_accels {
                ""
            } else {
                " (custom)"
            };
            println!("  {:<16} {accel}{marker}", def.label);
        }
    }
    Ok(())
}
