//! Traversal & codegen: walks the parsed tree applying operators, and merges
//! in the source-pattern pass, producing a deduplicated, ID-stable list of
//! [`Mutation`] records.

use crate::mutation::{Mutation, SourceLocation};
use crate::operators::{source_pattern, MutationOperator};
use crate::parser::{pretty_print, Node};
use std::collections::HashSet;
use std::path::Path;

struct Candidate {
    mutation: Mutation,
    syntactic: bool,
}

/// Walk one parsed file's syntax tree, apply every selected operator, merge
/// in the source-pattern pass, and return the deduplicated mutation list.
///
/// `ops` is the already-name-filtered operator selection (see
/// [`crate::operators::OperatorRegistry::get_by_names`]). IDs are assigned
/// after deduplication, in final order, starting from 0 — callers stitching
/// multiple files together should renumber across the whole batch.
#[must_use]
pub fn generate(
    root: &Node,
    source: &str,
    file: &Path,
    ops: &[&dyn MutationOperator],
    source_pattern_enabled: bool,
) -> Vec<Mutation> {
    let newlines = newline_offsets(source);
    let mut candidates = Vec::new();
    walk(root, source, file, ops, &newlines, &mut candidates);

    if source_pattern_enabled {
        for raw in source_pattern::generate(source) {
            candidates.push(Candidate {
                mutation: Mutation {
                    id: 0,
                    file: file.to_path_buf(),
                    location: location(file, source, &newlines, raw.byte_start, raw.byte_end),
                    original_text: raw.original,
                    mutated_text: raw.mutated,
                    operator_name: "source-pattern".to_owned(),
                    description: raw.description,
                },
                syntactic: false,
            });
        }
    }

    renumber(dedupe(candidates))
}

fn walk(
    node: &Node,
    source: &str,
    file: &Path,
    ops: &[&dyn MutationOperator],
    newlines: &[usize],
    out: &mut Vec<Candidate>,
) {
    for op in ops {
        if op.can_mutate(node) {
            for (replacement, description) in op.mutate(node) {
                let mutated_text = pretty_print(&replacement, source);
                let original_text = pretty_print(node, source);
                if mutated_text == original_text {
                    continue;
                }
                let span = node.span();
                out.push(Candidate {
                    mutation: Mutation {
                        id: 0,
                        file: file.to_path_buf(),
                        location: location(file, source, newlines, span.byte_start, span.byte_end),
                        original_text,
                        mutated_text,
                        operator_name: op.name().to_owned(),
                        description,
                    },
                    syntactic: true,
                });
            }
        }
    }
    for child in node.children() {
        walk(child, source, file, ops, newlines, out);
    }
}

fn newline_offsets(source: &str) -> Vec<usize> {
    source
        .char_indices()
        .filter(|&(_, c)| c == '\n')
        .map(|(i, _)| i)
        .collect()
}

fn line_col(source: &str, newlines: &[usize], byte_offset: usize) -> (usize, usize) {
    let line_index = newlines.partition_point(|&o| o < byte_offset);
    let line = line_index + 1;
    let line_start = if line_index == 0 {
        0
    } else {
        newlines[line_index - 1] + 1
    };
    let col = source
        .get(line_start..byte_offset)
        .map_or(1, |slice| slice.chars().count() + 1);
    (line, col)
}

fn location(
    file: &Path,
    source: &str,
    newlines: &[usize],
    byte_start: usize,
    byte_end: usize,
) -> SourceLocation {
    let (start_line, start_col) = line_col(source, newlines, byte_start);
    let (end_line, end_col) = line_col(source, newlines, byte_end);
    SourceLocation {
        file: file.to_path_buf(),
        start_line,
        start_col,
        end_line,
        end_col,
        byte_start,
        byte_end,
    }
}

fn ranges_overlap(a: (usize, usize), b: (usize, usize)) -> bool {
    a.0 < b.1 && b.0 < a.1
}

/// Resolve exact duplicates and syntactic/source-pattern overlaps, per the
/// rule: identical `(file, byte_start, byte_end, mutated_text)` is a
/// duplicate (first producer wins); an overlapping-but-not-identical range
/// between the two passes keeps the syntactic mutation and drops the
/// source-pattern one.
fn dedupe(candidates: Vec<Candidate>) -> Vec<Mutation> {
    let syntactic_ranges: Vec<(usize, usize)> = candidates
        .iter()
        .filter(|c| c.syntactic)
        .map(|c| (c.mutation.location.byte_start, c.mutation.location.byte_end))
        .collect();

    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for candidate in candidates {
        let range = (
            candidate.mutation.location.byte_start,
            candidate.mutation.location.byte_end,
        );
        let key = (
            candidate.mutation.file.clone(),
            range.0,
            range.1,
            candidate.mutation.mutated_text.clone(),
        );
        if !seen.insert(key) {
            continue;
        }
        if !candidate.syntactic
            && syntactic_ranges
                .iter()
                .any(|&r| r != range && ranges_overlap(r, range))
        {
            continue;
        }
        out.push(candidate.mutation);
    }
    out
}

fn renumber(mut mutations: Vec<Mutation>) -> Vec<Mutation> {
    for (i, mutation) in mutations.iter_mut().enumerate() {
        mutation.id = i as u64;
    }
    mutations
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operators::OperatorRegistry;
    use std::path::PathBuf;

    fn file() -> PathBuf {
        PathBuf::from("x.lean")
    }

    #[test]
    fn assigns_monotonic_ids_in_traversal_order() {
        let source = "def f (a b : Bool) := a && b || true";
        let parsed = crate::parser::parse(source, &file()).unwrap();
        let registry = OperatorRegistry::with_builtins();
        let ops = registry.get_by_names(&[]).unwrap();
        let mutations = generate(&parsed.root, source, &file(), &ops, false);
        let ids: Vec<_> = mutations.iter().map(|m| m.id).collect();
        let expected: Vec<u64> = (0..ids.len() as u64).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn boolean_and_or_scenario() {
        let source = "def f (a b : Bool) := a && b";
        let parsed = crate::parser::parse(source, &file()).unwrap();
        let registry = OperatorRegistry::with_builtins();
        let ops = registry.get_by_names(&["boolean-and-or".to_owned()]).unwrap();
        let mutations = generate(&parsed.root, source, &file(), &ops, false);
        assert_eq!(mutations.len(), 1);
        assert_eq!(mutations[0].original_text, "&&");
        assert_eq!(mutations[0].mutated_text, "||");
        assert_eq!(&source[mutations[0].location.byte_start..mutations[0].location.byte_end], "&&");
    }

    #[test]
    fn relational_scenario_two_mutations() {
        let source = "def p (n : Nat) : Bool := n > 0";
        let parsed = crate::parser::parse(source, &file()).unwrap();
        let registry = OperatorRegistry::with_builtins();
        let ops = registry.get_by_names(&["comparison-relational".to_owned()]).unwrap();
        let mutations = generate(&parsed.root, source, &file(), &ops, false);
        assert_eq!(mutations.len(), 2);
        assert_eq!(mutations[0].mutated_text, ">=");
        assert_eq!(mutations[1].mutated_text, "<");
    }

    #[test]
    fn string_literal_scenario() {
        let source = r#"def g : String := "hi""#;
        let parsed = crate::parser::parse(source, &file()).unwrap();
        let registry = OperatorRegistry::with_builtins();
        let ops = registry.get_by_names(&["string-literal".to_owned()]).unwrap();
        let mutations = generate(&parsed.root, source, &file(), &ops, false);
        assert_eq!(mutations.len(), 2);
        assert_eq!(mutations[0].mutated_text, "\"\"");
        assert_eq!(mutations[1].mutated_text, "\"MUTATED\"");
    }

    #[test]
    fn source_pattern_duplicate_of_syntactic_is_dropped() {
        let source = "def f (a b : Nat) := a + b";
        let parsed = crate::parser::parse(source, &file()).unwrap();
        let registry = OperatorRegistry::with_builtins();
        let ops = registry.get_by_names(&["arithmetic-add-sub".to_owned()]).unwrap();
        let mutations = generate(&parsed.root, source, &file(), &ops, true);
        // The syntactic "+" -> "-" mutation and the source-pattern " + " ->
        // " - " mutation overlap; only the syntactic one should remain.
        assert_eq!(mutations.len(), 1);
        assert_eq!(mutations[0].operator_name, "arithmetic-add-sub");
    }

    #[test]
    fn determinism_two_runs_match() {
        let source = "def f (a b : Bool) := a && b";
        let parsed = crate::parser::parse(source, &file()).unwrap();
        let registry = OperatorRegistry::with_builtins();
        let ops = registry.get_by_names(&[]).unwrap();
        let first = generate(&parsed.root, source, &file(), &ops, true);
        let second = generate(&parsed.root, source, &file(), &ops, true);
        let first_texts: Vec<_> = first.iter().map(|m| (m.id, m.mutated_text.clone())).collect();
        let second_texts: Vec<_> = second.iter().map(|m| (m.id, m.mutated_text.clone())).collect();
        assert_eq!(first_texts, second_texts);
    }
}
