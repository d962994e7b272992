//! `CueChain` CLI - edit chain files from the command line
//!
//! Every command loads a chain file, runs one editor operation against it,
//! and writes the result back. Rejected edits leave the file untouched.

mod cli;
mod commands;
mod error;
mod util;

use clap::Parser;
use cli::Cli;
use cuechain_core::{TracingConfig, TracingOutput, init_tracing};

fn main() {
    let cli = Cli::parse();
    let context = cli.context();

    if !cli.quiet {
        let settings = context.file_settings();
        let config = TracingConfig::new()
            .with_level(util::log_level(cli.verbose, settings.as_ref()))
            .with_output(TracingOutput::Stderr);
        if let Err(e) = init_tracing(&config) {
            eprintln!("Warning: logging unavailable: {e}");
        }
    }

    let result = commands::dispatch(&context, cli.command);

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(e.exit_code());
    }
}
