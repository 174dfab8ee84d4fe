//! Basic CLI E2E tests.
//!
//! Commands run via cargo with HOME pointed at a temp directory so each
//! test gets its own store.

use std::path::Path;
use std::process::Command;

/// Run a CLI command against the store under `home` and return output.
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "amal-cli", "--quiet", "--"])
        .args(args)
        .env("HOME", home)
        .env("AMAL_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_catalog_list_seeds_defaults() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["catalog", "list"]);
    assert_eq!(code, 0, "catalog list failed");

    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 18);
}

#[test]
fn test_log_toggle_and_summary() {
    let home = tempfile::tempdir().unwrap();

    let (_, _, code) = run_cli(
        home.path(),
        &["log", "toggle", "13", "--date", "2024-05-01"],
    );
    assert_eq!(code, 0, "log toggle failed");

    let (stdout, _, code) = run_cli(
        home.path(),
        &["stats", "summary", "--date", "2024-05-01"],
    );
    assert_eq!(code, 0, "stats summary failed");

    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["totalPoints"].as_u64(), Some(10));
    assert_eq!(parsed["streak"].as_u64(), Some(1));
}

#[test]
fn test_excluded_date_refuses_toggle() {
    let home = tempfile::tempdir().unwrap();

    let (_, _, code) = run_cli(
        home.path(),
        &[
            "exclusion", "add", "2024-06-01", "2024-06-05", "--reason", "sakit",
        ],
    );
    assert_eq!(code, 0, "exclusion add failed");

    let (_, stderr, code) = run_cli(
        home.path(),
        &["log", "toggle", "1", "--date", "2024-06-03"],
    );
    assert_eq!(code, 1, "toggle on excluded date should fail");
    assert!(stderr.contains("suspended"));
}

#[test]
fn test_backup_export_import_roundtrip() {
    let home = tempfile::tempdir().unwrap();
    let snapshot_path = home.path().join("backup.json");
    let snapshot_arg = snapshot_path.to_str().unwrap();

    run_cli(home.path(), &["log", "toggle", "1", "--date", "2024-05-01"]);
    let (_, _, code) = run_cli(
        home.path(),
        &["backup", "export", "--output", snapshot_arg],
    );
    assert_eq!(code, 0, "backup export failed");

    let other = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(other.path(), &["backup", "import", snapshot_arg]);
    assert_eq!(code, 0, "backup import failed");

    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["practices"].as_u64(), Some(18));
    assert_eq!(parsed["logs"].as_u64(), Some(1));
}

#[test]
fn test_settings_roundtrip() {
    let home = tempfile::tempdir().unwrap();

    let (stdout, _, code) = run_cli(home.path(), &["settings", "show"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("No settings yet"));

    let (_, _, code) = run_cli(home.path(), &["settings", "set-name", "Ani"]);
    assert_eq!(code, 0, "set-name failed");

    let (stdout, _, code) = run_cli(home.path(), &["settings", "show"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["name"].as_str(), Some("Ani"));
}
