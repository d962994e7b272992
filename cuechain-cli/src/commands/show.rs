//! Read-only views of a chain.

use cuechain_core::{RowView, RowVisibility, flatten};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::util::{Context, read_chain, short_id};

/// One row of `show --format json`
#[derive(Debug, Serialize)]
struct JsonRow<'a> {
    id: String,
    depth: usize,
    kind: &'static str,
    label: &'a str,
    enabled: bool,
    effectively_disabled: bool,
    collapsed: bool,
    leaf_count: usize,
}

impl<'a> From<&'a RowView> for JsonRow<'a> {
    fn from(row: &'a RowView) -> Self {
        Self {
            id: row.id.to_string(),
            depth: row.depth,
            kind: if row.is_group { "group" } else { "leaf" },
            label: &row.label,
            enabled: row.enabled,
            effectively_disabled: row.effectively_disabled,
            collapsed: row.collapsed,
            leaf_count: row.leaf_count,
        }
    }
}

/// Show command handler
pub fn cmd_show(context: &Context, format: OutputFormat, all: bool) -> Result<(), CliError> {
    let editor = context.open_editor()?;
    let catalog = context.load_catalog()?;
    let visibility = if all {
        RowVisibility::All
    } else {
        RowVisibility::Visible
    };
    let rows = editor.rows(&catalog, visibility);

    match format {
        OutputFormat::Table => print_row_table(&rows),
        OutputFormat::Json => print_row_json(&rows)?,
    }
    Ok(())
}

fn print_row_table(rows: &[RowView]) {
    if rows.is_empty() {
        println!("Chain is empty.");
        return;
    }

    println!("{:<8}  {:<5}  {:>6}  ITEM", "ID", "STATE", "LEAVES");
    println!("{:-<8}  {:-<5}  {:->6}  {:-<20}", "", "", "", "");

    for row in rows {
        let state = if !row.enabled {
            "off"
        } else if row.effectively_disabled {
            "(off)"
        } else {
            "on"
        };
        let marker = match (row.is_group, row.collapsed) {
            (false, _) => "",
            (true, false) => "[-] ",
            (true, true) => "[+] ",
        };
        let leaves = if row.is_group {
            row.leaf_count.to_string()
        } else {
            "-".to_string()
        };
        let indent = "  ".repeat(row.indent_level);
        println!(
            "{:<8}  {state:<5}  {leaves:>6}  {indent}{marker}{}",
            short_id(row.id),
            row.label
        );
    }
}

fn print_row_json(rows: &[RowView]) -> Result<(), CliError> {
    let rows: Vec<JsonRow<'_>> = rows.iter().map(JsonRow::from).collect();
    let json = serde_json::to_string_pretty(&rows)
        .map_err(|e| CliError::ChainFile(format!("Failed to serialize: {e}")))?;
    println!("{json}");
    Ok(())
}

/// Flatten command handler
pub fn cmd_flatten(context: &Context) -> Result<(), CliError> {
    let chain = read_chain(context.chain_path()?)?;
    for id in flatten(&chain) {
        println!("{id}");
    }
    Ok(())
}
