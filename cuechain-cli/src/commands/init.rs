//! Chain file creation.

use cuechain_core::Chain;

use crate::error::CliError;
use crate::util::{Context, write_chain};

/// Init command handler
pub fn cmd_init(context: &Context, force: bool) -> Result<(), CliError> {
    let path = context.chain_path()?;
    if path.exists() && !force {
        return Err(CliError::ChainFile(format!(
            "{} already exists; pass --force to overwrite",
            path.display()
        )));
    }
    write_chain(path, &Chain::new())?;
    println!("Created empty chain at {}", path.display());
    Ok(())
}
