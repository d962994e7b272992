//! CLI argument parsing types using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use cuechain_core::DropPosition;

use crate::util::{Context, parse_key_val};

/// `CueChain` command-line interface for editing chain files
#[derive(Parser)]
#[command(name = "cuechain-cli")]
#[command(author, version, about = "CueChain command-line interface")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Chain file to edit (.json, .yaml or .yml)
    #[arg(short = 'f', long, global = true, env = "CUECHAIN_CHAIN")]
    pub chain: Option<PathBuf>,

    /// Editor settings file (TOML)
    #[arg(short, long, global = true, env = "CUECHAIN_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Definition catalog used for row labels (JSON map of key to metadata)
    #[arg(long, global = true, env = "CUECHAIN_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Increase output verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except results
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// File locations shared by every command
    pub fn context(&self) -> Context {
        Context {
            chain: self.chain.clone(),
            settings: self.settings.clone(),
            catalog: self.catalog.clone(),
        }
    }
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Create an empty chain file
    #[command(about = "Create an empty chain file")]
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show the chain as rows
    #[command(about = "Show the chain as indented rows")]
    Show {
        /// Output format
        #[arg(short = 'o', long, default_value = "table", value_enum)]
        format: OutputFormat,

        /// Include children of collapsed groups
        #[arg(short, long)]
        all: bool,
    },

    /// Print every item id in document order
    #[command(about = "Print item ids in document order")]
    Flatten,

    /// Add a leaf
    #[command(about = "Add a leaf item referencing a catalog definition")]
    Add {
        /// Definition key (e.g. fx.strobe)
        definition: String,

        /// Insert after this item instead of at the end
        #[arg(long)]
        after: Option<String>,

        /// Parameter value (KEY=VALUE, VALUE parsed as JSON when possible)
        #[arg(short, long = "param", value_parser = parse_key_val)]
        params: Vec<(String, String)>,
    },

    /// Add an empty group
    #[command(about = "Add an empty group")]
    AddGroup {
        /// Group name
        name: String,

        /// Insert after this item instead of at the end
        #[arg(long)]
        after: Option<String>,
    },

    /// Wrap items in a new group
    #[command(about = "Wrap sibling items in a new group")]
    Group {
        /// Items to group (ids, id prefixes or group names)
        #[arg(required = true)]
        items: Vec<String>,

        /// Name for the new group
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Replace a group with its children
    #[command(about = "Replace a group with its children")]
    Ungroup {
        /// Group to dissolve
        group: String,
    },

    /// Move items next to or into another item
    #[command(about = "Move items next to or into a target item")]
    Move {
        /// Items to move
        #[arg(required = true)]
        items: Vec<String>,

        /// Target item
        #[arg(short, long)]
        target: String,

        /// Where to place the items relative to the target
        #[arg(short, long, default_value = "after", value_enum)]
        position: PositionArg,
    },

    /// Copy items and paste the copies
    #[command(about = "Copy items and paste them with fresh ids")]
    Copy {
        /// Items to copy
        #[arg(required = true)]
        items: Vec<String>,

        /// Paste after this root item instead of at the end
        #[arg(long)]
        after: Option<String>,
    },

    /// Duplicate items in place
    #[command(about = "Duplicate items right after themselves")]
    Duplicate {
        /// Items to duplicate
        #[arg(required = true)]
        items: Vec<String>,
    },

    /// Delete items and their subtrees
    #[command(about = "Delete items and their subtrees")]
    Delete {
        /// Items to delete
        #[arg(required = true)]
        items: Vec<String>,
    },

    /// Rename a group
    #[command(about = "Rename a group")]
    Rename {
        /// Group to rename
        group: String,

        /// New name
        name: String,
    },

    /// Collapse or expand a group
    #[command(about = "Toggle a group's collapsed flag")]
    Collapse {
        /// Group to toggle
        group: String,
    },

    /// Enable an item
    #[command(about = "Enable an item")]
    Enable {
        /// Item to enable
        item: String,
    },

    /// Disable an item
    #[command(about = "Disable an item (and, for groups, its subtree)")]
    Disable {
        /// Item to disable
        item: String,
    },

    /// Editor settings
    #[command(subcommand, about = "Inspect or create editor settings")]
    Settings(SettingsCommands),
}

/// Settings subcommands
#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Print the effective settings as TOML
    Show,

    /// Write default settings to the settings file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// List keyboard shortcuts with any overrides applied
    Keybindings,
}

/// Output format for the show command
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Indented table
    #[default]
    Table,
    /// JSON array of rows
    Json,
}

/// Drop position argument
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PositionArg {
    /// Before the target
    Before,
    /// After the target
    After,
    /// Into the target group, after its last child
    Into,
}

impl From<PositionArg> for DropPosition {
    fn from(arg: PositionArg) -> Self {
        match arg {
            PositionArg::Before => Self::Before,
            PositionArg::After => Self::After,
            PositionArg::Into => Self::Into,
        }
    }
}
