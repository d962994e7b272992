//! Integration tests for cuechain-cli
//!
//! These tests drive the binary end-to-end against chain files in a
//! temporary directory: building chains, structural edits, rejected edits
//! and their exit codes, file formats, catalogs and settings.

#![allow(clippy::uninlined_format_args)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

/// Helper to run the CLI with given arguments and no ambient env config
fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cuechain-cli"))
        .env_remove("CUECHAIN_CHAIN")
        .env_remove("CUECHAIN_SETTINGS")
        .env_remove("CUECHAIN_CATALOG")
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

/// Helper to run the CLI against a chain file
fn run_on(chain: &Path, args: &[&str]) -> Output {
    let chain = chain.to_str().expect("utf-8 path");
    let mut full = vec!["--chain", chain];
    full.extend_from_slice(args);
    run_cli(&full)
}

/// Helper to get stdout as string
fn stdout_str(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Helper to get stderr as string
fn stderr_str(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Runs a command that must succeed and returns its trimmed stdout
fn ok(chain: &Path, args: &[&str]) -> String {
    let output = run_on(chain, args);
    assert!(
        output.status.success(),
        "{:?} failed: {}",
        args,
        stderr_str(&output)
    );
    stdout_str(&output).trim().to_string()
}

/// Fresh empty chain file
fn new_chain(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    ok(&path, &["init"]);
    path
}

fn flatten(chain: &Path) -> Vec<String> {
    ok(chain, &["flatten"])
        .lines()
        .map(str::to_string)
        .collect()
}

fn rows(chain: &Path, extra: &[&str]) -> Vec<Value> {
    let mut args = vec!["show", "--format", "json"];
    args.extend_from_slice(extra);
    let json: Value = serde_json::from_str(&ok(chain, &args)).expect("valid JSON rows");
    json.as_array().expect("array of rows").clone()
}

fn file_contents(path: &Path) -> String {
    std::fs::read_to_string(path).expect("chain file readable")
}

// ============================================================================
// Help and usage
// ============================================================================

#[test]
fn test_help_command() {
    let output = run_cli(&["--help"]);
    assert!(output.status.success(), "Help command should succeed");

    let stdout = stdout_str(&output);
    assert!(stdout.contains("cuechain-cli"));
    for command in ["init", "show", "add", "group", "ungroup", "move", "copy", "delete"] {
        assert!(stdout.contains(command), "Help should mention {}", command);
    }
}

#[test]
fn test_missing_chain_is_usage_error() {
    let output = run_cli(&["show"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_str(&output).contains("--chain"));
}

#[test]
fn test_init_refuses_to_overwrite() {
    let dir = TempDir::new().unwrap();
    let chain = new_chain(&dir, "chain.json");

    let output = run_on(&chain, &["init"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(run_on(&chain, &["init", "--force"]).status.success());
}

#[test]
fn test_empty_chain_show() {
    let dir = TempDir::new().unwrap();
    let chain = new_chain(&dir, "chain.json");
    assert_eq!(ok(&chain, &["show"]), "Chain is empty.");
}

// ============================================================================
// Building chains
// ============================================================================

#[test]
fn test_add_appends_in_order() {
    let dir = TempDir::new().unwrap();
    let chain = new_chain(&dir, "chain.json");
    let a = ok(&chain, &["add", "fx.dimmer"]);
    let b = ok(&chain, &["add", "fx.strobe"]);

    assert_eq!(flatten(&chain), vec![a, b]);
}

#[test]
fn test_add_after_inserts_next_sibling() {
    let dir = TempDir::new().unwrap();
    let chain = new_chain(&dir, "chain.json");
    let a = ok(&chain, &["add", "fx.dimmer"]);
    let c = ok(&chain, &["add", "fx.fog"]);
    let b = ok(&chain, &["add", "fx.strobe", "--after", &a]);

    assert_eq!(flatten(&chain), vec![a, b, c]);
}

#[test]
fn test_add_stores_params() {
    let dir = TempDir::new().unwrap();
    let chain = new_chain(&dir, "chain.json");
    ok(&chain, &["add", "fx.strobe", "-p", "rate=4.5", "-p", "color=red"]);

    let json: Value = serde_json::from_str(&file_contents(&chain)).unwrap();
    let payload = &json[0]["payload"];
    assert_eq!(payload["definition_ref"], "fx.strobe");
    assert_eq!(payload["params"]["rate"], 4.5);
    assert_eq!(payload["params"]["color"], "red");
}

#[test]
fn test_items_resolve_by_short_id() {
    let dir = TempDir::new().unwrap();
    let chain = new_chain(&dir, "chain.json");
    let a = ok(&chain, &["add", "fx.dimmer"]);

    ok(&chain, &["disable", &a[..8]]);
    assert_eq!(rows(&chain, &[])[0]["enabled"], false);
}

// ============================================================================
// Grouping
// ============================================================================

#[test]
fn test_group_and_ungroup() {
    let dir = TempDir::new().unwrap();
    let chain = new_chain(&dir, "chain.json");
    let a = ok(&chain, &["add", "fx.dimmer"]);
    let b = ok(&chain, &["add", "fx.strobe"]);
    let c = ok(&chain, &["add", "fx.fog"]);

    let group = ok(&chain, &["group", &a, &b, "--name", "Intro"]);
    assert_eq!(flatten(&chain), vec![group.clone(), a.clone(), b.clone(), c.clone()]);
    let all = rows(&chain, &[]);
    assert_eq!(all[0]["label"], "Intro");
    assert_eq!(all[0]["kind"], "group");
    assert_eq!(all[0]["leaf_count"], 2);
    assert_eq!(all[1]["depth"], 1);

    ok(&chain, &["ungroup", "Intro"]);
    assert_eq!(flatten(&chain), vec![a, b, c]);
}

#[test]
fn test_group_mixed_parents_rejected() {
    let dir = TempDir::new().unwrap();
    let chain = new_chain(&dir, "chain.json");
    let a = ok(&chain, &["add", "fx.dimmer"]);
    let b = ok(&chain, &["add", "fx.strobe"]);
    ok(&chain, &["group", &b, "--name", "Outer"]);
    let before = file_contents(&chain);

    let output = run_on(&chain, &["group", &a, &b]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_str(&output).contains("same parent"));
    assert_eq!(file_contents(&chain), before, "rejected edit must not write");
}

#[test]
fn test_rename_group() {
    let dir = TempDir::new().unwrap();
    let chain = new_chain(&dir, "chain.json");
    ok(&chain, &["add-group", "Verse"]);

    ok(&chain, &["rename", "Verse", "Chorus"]);
    assert_eq!(rows(&chain, &[])[0]["label"], "Chorus");
}

#[test]
fn test_rename_leaf_rejected() {
    let dir = TempDir::new().unwrap();
    let chain = new_chain(&dir, "chain.json");
    let a = ok(&chain, &["add", "fx.dimmer"]);

    let output = run_on(&chain, &["rename", &a, "Nope"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_group_depth_limit() {
    let dir = TempDir::new().unwrap();
    let chain = new_chain(&dir, "chain.json");
    let leaf = ok(&chain, &["add", "fx.dimmer"]);
    let g1 = ok(&chain, &["group", &leaf, "--name", "One"]);
    let g2 = ok(&chain, &["group", &leaf, "--name", "Two"]);
    ok(&chain, &["group", &leaf, "--name", "Three"]);

    let output = run_on(&chain, &["group", &leaf]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_str(&output).contains("depth"));
    assert_eq!(flatten(&chain).len(), 4);
    assert_ne!(g1, g2);
}

// ============================================================================
// Moving
// ============================================================================

#[test]
fn test_move_before_and_into() {
    let dir = TempDir::new().unwrap();
    let chain = new_chain(&dir, "chain.json");
    let a = ok(&chain, &["add", "fx.dimmer"]);
    let b = ok(&chain, &["add", "fx.strobe"]);
    let group = ok(&chain, &["add-group", "Scene"]);

    ok(&chain, &["move", &b, "--target", &a, "--position", "before"]);
    assert_eq!(flatten(&chain), vec![b.clone(), a.clone(), group.clone()]);

    ok(&chain, &["move", &a, &b, "--target", "Scene", "--position", "into"]);
    assert_eq!(flatten(&chain), vec![group, b, a]);
    let all = rows(&chain, &[]);
    assert_eq!(all[1]["depth"], 1);
    assert_eq!(all[2]["depth"], 1);
}

#[test]
fn test_move_into_leaf_rejected() {
    let dir = TempDir::new().unwrap();
    let chain = new_chain(&dir, "chain.json");
    let a = ok(&chain, &["add", "fx.dimmer"]);
    let b = ok(&chain, &["add", "fx.strobe"]);

    let output = run_on(&chain, &["move", &a, "--target", &b, "--position", "into"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_move_into_own_subtree_rejected() {
    let dir = TempDir::new().unwrap();
    let chain = new_chain(&dir, "chain.json");
    let a = ok(&chain, &["add", "fx.dimmer"]);
    let group = ok(&chain, &["group", &a, "--name", "Outer"]);
    let before = file_contents(&chain);

    let output = run_on(&chain, &["move", &group, "--target", &a, "--position", "after"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_str(&output).contains("own subtree"));
    assert_eq!(file_contents(&chain), before);
}

// ============================================================================
// Clipboard and deletion
// ============================================================================

#[test]
fn test_copy_mints_fresh_ids() {
    let dir = TempDir::new().unwrap();
    let chain = new_chain(&dir, "chain.json");
    let a = ok(&chain, &["add", "fx.dimmer"]);
    let b = ok(&chain, &["add", "fx.strobe"]);
    let group = ok(&chain, &["group", &a, "--name", "Scene"]);

    let pasted = ok(&chain, &["copy", &group, "--after", &group]);
    let pasted: Vec<_> = pasted.lines().collect();
    assert_eq!(pasted.len(), 1);

    let ids = flatten(&chain);
    assert_eq!(ids.len(), 5);
    assert_eq!(ids[0], group);
    assert_eq!(ids[2], pasted[0]);
    assert_eq!(ids[4], b);
    assert_ne!(ids[3], a, "pasted children get fresh ids");
}

#[test]
fn test_duplicate_lands_after_original() {
    let dir = TempDir::new().unwrap();
    let chain = new_chain(&dir, "chain.json");
    let a = ok(&chain, &["add", "fx.dimmer"]);
    let b = ok(&chain, &["add", "fx.strobe"]);

    let copy = ok(&chain, &["duplicate", &a]);
    assert_eq!(flatten(&chain), vec![a, copy, b]);
}

#[test]
fn test_delete_removes_subtree() {
    let dir = TempDir::new().unwrap();
    let chain = new_chain(&dir, "chain.json");
    let a = ok(&chain, &["add", "fx.dimmer"]);
    let b = ok(&chain, &["add", "fx.strobe"]);
    let group = ok(&chain, &["group", &a, "--name", "Scene"]);

    assert_eq!(ok(&chain, &["delete", &group, &a]), "Deleted 1 item(s)");
    assert_eq!(flatten(&chain), vec![b]);
}

#[test]
fn test_repeated_reference_counts_once() {
    let dir = TempDir::new().unwrap();
    let chain = new_chain(&dir, "chain.json");
    let a = ok(&chain, &["add", "fx.dimmer"]);
    let b = ok(&chain, &["add", "fx.strobe"]);

    let pasted = ok(&chain, &["copy", &b, &b]);
    assert_eq!(pasted.lines().count(), 1);

    let group = ok(&chain, &["group", &a, &a, "--name", "Solo"]);
    let all = rows(&chain, &[]);
    assert_eq!(all[0]["id"], group.as_str());
    assert_eq!(all[0]["leaf_count"], 1);

    assert_eq!(ok(&chain, &["delete", &b, &b]), "Deleted 1 item(s)");
    assert_eq!(flatten(&chain).len(), 3);
}

#[test]
fn test_unknown_item_exits_with_two() {
    let dir = TempDir::new().unwrap();
    let chain = new_chain(&dir, "chain.json");
    ok(&chain, &["add", "fx.dimmer"]);

    let output = run_on(&chain, &["delete", "no-such-item"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_str(&output).contains("not found"));
}

// ============================================================================
// Flags and rows
// ============================================================================

#[test]
fn test_disabled_group_disables_children() {
    let dir = TempDir::new().unwrap();
    let chain = new_chain(&dir, "chain.json");
    let a = ok(&chain, &["add", "fx.dimmer"]);
    ok(&chain, &["group", &a, "--name", "Scene"]);

    ok(&chain, &["disable", "Scene"]);
    let all = rows(&chain, &[]);
    assert_eq!(all[1]["enabled"], true);
    assert_eq!(all[1]["effectively_disabled"], true);

    ok(&chain, &["enable", "Scene"]);
    assert_eq!(rows(&chain, &[])[1]["effectively_disabled"], false);
}

#[test]
fn test_collapse_hides_children() {
    let dir = TempDir::new().unwrap();
    let chain = new_chain(&dir, "chain.json");
    let a = ok(&chain, &["add", "fx.dimmer"]);
    ok(&chain, &["group", &a, "--name", "Scene"]);

    ok(&chain, &["collapse", "Scene"]);
    assert_eq!(rows(&chain, &[]).len(), 1);
    assert_eq!(rows(&chain, &["--all"]).len(), 2);
    assert!(ok(&chain, &["show"]).contains("[+] Scene"));

    ok(&chain, &["collapse", "Scene"]);
    assert_eq!(rows(&chain, &[]).len(), 2);
}

#[test]
fn test_catalog_labels_rows() {
    let dir = TempDir::new().unwrap();
    let chain = new_chain(&dir, "chain.json");
    let catalog = dir.path().join("catalog.json");
    std::fs::write(
        &catalog,
        r#"{"fx.dimmer": {"display_name": "Dimmer", "category": "effect"}}"#,
    )
    .unwrap();
    ok(&chain, &["add", "fx.dimmer"]);
    ok(&chain, &["add", "fx.fog"]);

    let catalog = catalog.to_str().unwrap();
    let table = ok(&chain, &["--catalog", catalog, "show"]);
    assert!(table.contains("Dimmer"));
    assert!(table.contains("fx.fog"), "unknown keys fall back to the raw key");

    ok(&chain, &["--catalog", catalog, "disable", "Dimmer"]);
    assert_eq!(rows(&chain, &[])[0]["enabled"], false);
}

#[test]
fn test_yaml_chain_file() {
    let dir = TempDir::new().unwrap();
    let chain = new_chain(&dir, "chain.yaml");
    let a = ok(&chain, &["add", "cue.go"]);
    ok(&chain, &["group", &a, "--name", "Act 1"]);

    let contents = file_contents(&chain);
    assert!(contents.contains("kind: group"));
    assert!(contents.contains("Act 1"));
    assert_eq!(flatten(&chain).len(), 2);
}

#[test]
fn test_corrupt_chain_file() {
    let dir = TempDir::new().unwrap();
    let chain = dir.path().join("chain.json");
    std::fs::write(&chain, "{ not a chain").unwrap();

    let output = run_on(&chain, &["show"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_str(&output).contains("Chain file error"));
}

// ============================================================================
// Settings
// ============================================================================

#[test]
fn test_settings_init_and_show() {
    let dir = TempDir::new().unwrap();
    let settings = dir.path().join("settings.toml");
    let settings = settings.to_str().unwrap();

    let output = run_cli(&["--settings", settings, "settings", "init"]);
    assert!(output.status.success(), "{}", stderr_str(&output));

    let output = run_cli(&["--settings", settings, "settings", "show"]);
    let stdout = stdout_str(&output);
    assert!(stdout.contains("[drop]"));
    assert!(stdout.contains("leaf_split_fraction"));

    let output = run_cli(&["--settings", settings, "settings", "init"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_invalid_settings_rejected() {
    let dir = TempDir::new().unwrap();
    let settings = dir.path().join("settings.toml");
    std::fs::write(&settings, "[drop]\nleaf_split_fraction = 2.0\n").unwrap();

    let output = run_cli(&["--settings", settings.to_str().unwrap(), "settings", "show"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_str(&output).contains("leaf_split_fraction"));
}

#[test]
fn test_keybinding_overrides_listed() {
    let dir = TempDir::new().unwrap();
    let settings = dir.path().join("settings.toml");
    std::fs::write(
        &settings,
        "[keybindings.overrides]\n\"chain.group-selected\" = \"<Control><Alt>g\"\n",
    )
    .unwrap();

    let output = run_cli(&["--settings", settings.to_str().unwrap(), "settings", "keybindings"]);
    assert!(output.status.success(), "{}", stderr_str(&output));
    let stdout = stdout_str(&output);
    assert!(stdout.contains("<Control><Alt>g (custom)"));
    assert!(stdout.contains("<Control>c"));
}

#[test]
fn test_settings_logging_level_applies() {
    let dir = TempDir::new().unwrap();
    let chain = new_chain(&dir, "chain.json");
    let chain_arg = chain.to_str().unwrap();
    let settings = dir.path().join("settings.toml");
    std::fs::write(&settings, "[logging]\nlevel = \"debug\"\n").unwrap();
    let settings_arg = settings.to_str().unwrap();

    let quiet = run_on(&chain, &["show"]);
    assert!(!stderr_str(&quiet).contains("Loaded chain file"));

    let output = run_cli(&["--chain", chain_arg, "--settings", settings_arg, "show"]);
    assert!(output.status.success(), "{}", stderr_str(&output));
    assert!(stderr_str(&output).contains("Loaded chain file"));

    let output = run_cli(&["--chain", chain_arg, "--settings", settings_arg, "-v", "show"]);
    assert!(!stderr_str(&output).contains("Loaded chain file"));
}
