//! Black-box tests for `list-operators` and the scenario-exact mutation
//! counts from the design spec's end-to-end examples.

#![allow(clippy::unwrap_used)]

use std::path::PathBuf;
use std::process::Command;

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_lean_mutator"))
}

#[test]
fn list_operators_prints_every_builtin_in_registration_order() {
    let output = Command::new(bin()).arg("list-operators").output().unwrap();
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    let names = [
        "boolean-flip",
        "boolean-and-or",
        "boolean-negation",
        "arithmetic-add-sub",
        "arithmetic-mul-div",
        "arithmetic-swap",
        "numeric-boundary",
        "comparison-equality",
        "comparison-relational",
        "comparison-boundary",
        "string-literal",
        "char-literal",
    ];
    let mut last_pos = 0;
    for name in names {
        let pos = text.find(name).unwrap_or_else(|| panic!("missing operator {name}"));
        assert!(pos >= last_pos, "{name} out of registration order");
        last_pos = pos;
    }
}

fn mutate_json(source: &str, operators: &str) -> serde_json::Value {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("x.lean");
    std::fs::write(&file, source).unwrap();
    let report = dir.path().join("report.json");
    Command::new(bin())
        .arg("mutate")
        .arg(&file)
        .args(["--operators", operators, "--isolated", "--output", "json", "--report"])
        .arg(&report)
        .status()
        .unwrap();
    serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap()
}

#[test]
fn scenario_relational_produces_two_mutations() {
    let json = mutate_json("def p (n : Nat) : Bool := n > 0", "comparison-relational");
    let mutations = json["mutations"].as_array().unwrap();
    assert_eq!(mutations.len(), 2);
    let mutated: Vec<_> = mutations.iter().map(|m| m["mutation"]["mutated"].as_str().unwrap()).collect();
    assert_eq!(mutated, vec![">=", "<"]);
}

#[test]
fn scenario_boolean_and_or_produces_one_mutation_on_exact_range() {
    let json = mutate_json("def f (a b : Bool) := a && b", "boolean-and-or");
    let mutations = json["mutations"].as_array().unwrap();
    assert_eq!(mutations.len(), 1);
    assert_eq!(mutations[0]["mutation"]["original"], "&&");
    assert_eq!(mutations[0]["mutation"]["mutated"], "||");
}

#[test]
fn scenario_string_literal_produces_empty_then_mutated() {
    let json = mutate_json(r#"def g : String := "hi""#, "string-literal");
    let mutations = json["mutations"].as_array().unwrap();
    assert_eq!(mutations.len(), 2);
    assert_eq!(mutations[0]["mutation"]["mutated"], "\"\"");
    assert_eq!(mutations[1]["mutation"]["mutated"], "\"MUTATED\"");
}
