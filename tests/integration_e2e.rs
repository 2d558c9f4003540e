//! Full pipeline scenarios: discovery through to exit code.

#![allow(clippy::unwrap_used)]

use std::path::PathBuf;
use std::process::Command;

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_lean_mutator"))
}

#[test]
fn numeric_boundary_on_literal_one_collapses_the_degenerate_duplicate() {
    // n=1 makes n-1 (=0) coincide with the explicit "append 0 if n != 0"
    // mutation; both candidates share the same byte range and mutated text,
    // so the dedup pass collapses them into a single survivor.
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("x.lean");
    std::fs::write(&file, "def x : Nat := 1").unwrap();
    let report = dir.path().join("report.json");

    Command::new(bin())
        .arg("mutate")
        .arg(&file)
        .args(["--operators", "numeric-boundary", "--isolated", "--output", "json", "--report"])
        .arg(&report)
        .status()
        .unwrap();

    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
    let mutated: Vec<_> = json["mutations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["mutation"]["mutated"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(mutated, vec!["2".to_owned(), "0".to_owned()]);
}

#[test]
fn exit_code_reflects_the_configured_threshold() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("x.lean");
    // Every relational mutant here is syntactically valid, so isolated mode
    // survives all of them: score is 0.
    std::fs::write(&file, "def p (n : Nat) : Bool := n > 0").unwrap();

    let status = Command::new(bin())
        .arg("mutate")
        .arg(&file)
        .args(["--operators", "comparison-relational", "--isolated"])
        .status()
        .unwrap();
    assert!(!status.success());

    let status = Command::new(bin())
        .arg("mutate")
        .arg(&file)
        .args(["--operators", "comparison-relational", "--isolated", "--threshold", "0"])
        .status()
        .unwrap();
    assert!(status.success());
}

#[test]
fn build_mode_classifies_by_the_test_commands_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("x.lean");
    std::fs::write(&file, "def f (a b : Bool) := a && b").unwrap();
    let report = dir.path().join("report.json");

    Command::new(bin())
        .arg("mutate")
        .arg(&file)
        .args(["--operators", "boolean-and-or", "--output", "json", "--report"])
        .arg(&report)
        .args(["--test-command", "false"])
        .status()
        .unwrap();

    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["stats"]["killed"], 1);
    assert_eq!(json["stats"]["survived"], 0);
}
