//! Integration tests for the reweave CLI
//!
//! These tests run the binary end to end against temporary projects

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const FORMATTED: &str = "int max(int a, int b) {\n    if (a > b) {\n        return a;\n    }\n    return b;\n}\n";
const UNFORMATTED: &str = "int max(int a,int b){\nif(a>b){\nreturn a;\n}\n  return b;\n}\n";

/// Helper function to create a test CLI command
#[allow(deprecated)]
fn cli() -> Command {
    Command::cargo_bin("reweave").unwrap()
}

fn create_test_project(source: &str) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join("src")).unwrap();
    fs::write(temp_dir.path().join("src/Max.java"), source).unwrap();
    temp_dir
}

#[test]
fn test_help_command() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("fmt"));
}

#[test]
fn test_version_command() {
    cli()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(VERSION));
}

#[test]
fn test_check_round_trips_sources() {
    let temp_dir = create_test_project(UNFORMATTED);
    fs::write(temp_dir.path().join("settings.json"), "{\n  // comment\n  \"a\": [1, 2,]\n}\n").unwrap();

    cli()
        .args(["--no-color", "check", temp_dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Files checked: 2"))
        .stdout(predicate::str::contains("All files OK"));
}

#[test]
fn test_check_reports_parse_errors() {
    let temp_dir = create_test_project("int x = ;\n");
    cli()
        .args(["--no-color", "check", temp_dir.path().to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Max.java"));
}

#[test]
fn test_check_continues_past_unparseable_files() {
    let temp_dir = create_test_project(FORMATTED);
    fs::write(temp_dir.path().join("src/Broken.java"), "y = ;\n").unwrap();
    cli()
        .args(["--no-color", "check", temp_dir.path().to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Broken.java"))
        .stdout(predicate::str::contains("Files checked: 2"))
        .stdout(predicate::str::contains("Failed: 1"));
}

#[test]
fn test_check_nonexistent_path() {
    cli().args(["check", "/nonexistent/path"]).assert().failure();
}

#[test]
fn test_fmt_check_reports_unformatted_files() {
    let temp_dir = create_test_project(UNFORMATTED);
    cli()
        .args(["--no-color", "fmt", "--check", temp_dir.path().to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("needs formatting"));

    let untouched = fs::read_to_string(temp_dir.path().join("src/Max.java")).unwrap();
    assert_eq!(untouched, UNFORMATTED);
}

#[test]
fn test_fmt_check_accepts_formatted_files() {
    let temp_dir = create_test_project(FORMATTED);
    cli()
        .args(["--no-color", "fmt", "--check", temp_dir.path().to_str().unwrap()])
        .assert()
        .success();
}

#[test]
fn test_fmt_writes_formatted_source() {
    let temp_dir = create_test_project(UNFORMATTED);
    cli()
        .args(["--no-color", "fmt", temp_dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Files written: 1"));

    let formatted = fs::read_to_string(temp_dir.path().join("src/Max.java")).unwrap();
    assert_eq!(formatted, FORMATTED);
}

#[test]
fn test_fmt_diff_shows_changes() {
    let temp_dir = create_test_project(UNFORMATTED);
    cli()
        .args(["--no-color", "fmt", "--diff", temp_dir.path().to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("+    return b;"))
        .stdout(predicate::str::contains("-  return b;"));
}

#[test]
fn test_fmt_uses_discovered_config() {
    let temp_dir = create_test_project(UNFORMATTED);
    fs::write(temp_dir.path().join("reweave.toml"), "[formatter]\nindentSize = 2\n").unwrap();

    cli()
        .args(["--no-color", "fmt", temp_dir.path().to_str().unwrap()])
        .assert()
        .success();

    let formatted = fs::read_to_string(temp_dir.path().join("src/Max.java")).unwrap();
    assert!(formatted.contains("\n  if (a > b) {\n    return a;\n  }\n"));
}

#[test]
fn test_fmt_respects_exclude() {
    let temp_dir = create_test_project(UNFORMATTED);
    cli()
        .args(["--no-color", "fmt", "--check", "--exclude", "src/**", temp_dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No Java files found"));
}

#[test]
fn test_config_init_and_validate() {
    let temp_dir = TempDir::new().unwrap();
    cli()
        .current_dir(temp_dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("reweave.toml"));
    assert!(temp_dir.path().join("reweave.toml").exists());

    cli()
        .current_dir(temp_dir.path())
        .args(["config", "init"])
        .assert()
        .failure();

    cli()
        .current_dir(temp_dir.path())
        .args(["config", "validate", "reweave.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Indent size: 4"));
}

#[test]
fn test_config_show_resolved() {
    let temp_dir = TempDir::new().unwrap();
    cli()
        .current_dir(temp_dir.path())
        .args(["config", "show", "--resolved"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"indentSize\": 4"))
        .stdout(predicate::str::contains("\"continuationIndent\": 8"));
}

#[test]
fn test_config_schema() {
    cli()
        .args(["config", "schema"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"$schema\""))
        .stdout(predicate::str::contains("indentSize"));
}
