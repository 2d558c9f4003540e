//! Black-box tests for the runner's isolated judge and its restore
//! invariant, driven through the compiled binary.

#![allow(clippy::unwrap_used)]

use std::path::PathBuf;
use std::process::Command;

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_lean_mutator"))
}

#[test]
fn isolated_mode_restores_the_source_file_after_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("x.lean");
    let original = "def p (n : Nat) : Bool := n > 0";
    std::fs::write(&file, original).unwrap();

    let report = dir.path().join("report.json");
    Command::new(bin())
        .arg("mutate")
        .arg(&file)
        .args(["--isolated", "--output", "json", "--report"])
        .arg(&report)
        .status()
        .unwrap();

    assert_eq!(std::fs::read_to_string(&file).unwrap(), original);
}

#[test]
fn isolated_mode_survives_every_syntactically_valid_mutant() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("x.lean");
    std::fs::write(&file, "def p (n : Nat) : Bool := n > 0").unwrap();

    let report = dir.path().join("report.json");
    Command::new(bin())
        .arg("mutate")
        .arg(&file)
        .args(["--operators", "comparison-relational", "--isolated", "--output", "json", "--report"])
        .arg(&report)
        .status()
        .unwrap();

    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
    let stats = &json["stats"];
    assert_eq!(stats["survived"], 2);
    assert_eq!(stats["killed"], 0);
}

fn running_as_root() -> bool {
    Command::new("id")
        .arg("-u")
        .output()
        .is_ok_and(|out| String::from_utf8_lossy(&out.stdout).trim() == "0")
}

#[cfg(unix)]
#[test]
fn read_only_source_tree_reports_every_mutation_as_error_and_leaves_the_file_untouched() {
    use std::os::unix::fs::PermissionsExt;

    if running_as_root() {
        // chmod-based read-only enforcement is meaningless for root.
        return;
    }

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("x.lean");
    let original = "def x : Nat := 1";
    std::fs::write(&file, original).unwrap();

    let mut perms = std::fs::metadata(&file).unwrap().permissions();
    perms.set_mode(0o444);
    std::fs::set_permissions(&file, perms.clone()).unwrap();
    let mut dir_perms = std::fs::metadata(dir.path()).unwrap().permissions();
    dir_perms.set_mode(0o555);
    std::fs::set_permissions(dir.path(), dir_perms.clone()).unwrap();

    let report = dir.path().join("..").join("ro-report.json");
    Command::new(bin())
        .arg("mutate")
        .arg(&file)
        .args(["--isolated", "--output", "json", "--report"])
        .arg(&report)
        .status()
        .unwrap();

    // Restore permissions so the tempdir can clean itself up.
    dir_perms.set_mode(0o755);
    std::fs::set_permissions(dir.path(), dir_perms).unwrap();
    perms.set_mode(0o644);
    std::fs::set_permissions(&file, perms).unwrap();

    assert_eq!(std::fs::read_to_string(&file).unwrap(), original);
    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
    assert!(json["stats"]["errors"].as_u64().unwrap() > 0);
    let _ = std::fs::remove_file(&report);
}
