//! Black-box tests for the three reporters, driven through the compiled
//! binary.

#![allow(clippy::unwrap_used)]

use std::path::PathBuf;
use std::process::Command;

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_lean_mutator"))
}

fn write_fixture(dir: &std::path::Path) -> PathBuf {
    let file = dir.join("x.lean");
    std::fs::write(&file, "def f (a b : Bool) := a && b").unwrap();
    file
}

#[test]
fn json_report_matches_the_stable_v1_schema() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_fixture(dir.path());
    let report = dir.path().join("report.json");

    Command::new(bin())
        .arg("mutate")
        .arg(&file)
        .args(["--operators", "boolean-and-or", "--isolated", "--output", "json", "--report"])
        .arg(&report)
        .status()
        .unwrap();

    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["version"], "1.0");
    assert_eq!(json["generator"], "LeanMutator");
    assert!(json["stats"]["score"].is_string());
    assert!(json["mutations"].is_array());
}

#[test]
fn html_report_is_self_contained() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_fixture(dir.path());
    let report = dir.path().join("report.html");

    Command::new(bin())
        .arg("mutate")
        .arg(&file)
        .args(["--operators", "boolean-and-or", "--isolated", "--output", "html", "--report"])
        .arg(&report)
        .status()
        .unwrap();

    let html = std::fs::read_to_string(&report).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(!html.contains("<link"));
    assert!(!html.contains("src=\"http"));
}

#[test]
fn console_report_lists_survivors_with_file_and_column() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_fixture(dir.path());

    let output = Command::new(bin())
        .arg("mutate")
        .arg(&file)
        .args(["--operators", "boolean-and-or", "--isolated", "--output", "console", "--no-color"])
        .output()
        .unwrap();

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("boolean-and-or"));
    assert!(stdout.contains("Score:"));
}
