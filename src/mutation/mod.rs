//! Core data model for the mutation pipeline: locations, mutants, statuses,
//! results and aggregated stats.
//!
//! This module is pure data — no I/O, no process spawning. [`crate::parser`]
//! and [`crate::traversal`] produce [`Mutation`] values; [`crate::runner`]
//! and [`crate::scheduler`] produce and fold [`MutationResult`] values.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Byte- and line/column-accurate location of a mutation in a source file.
///
/// Invariants: `byte_start <= byte_end <= file length`, and
/// `(start_line, start_col) <= (end_line, end_col)` lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    /// File this location refers to.
    pub file: PathBuf,
    /// 1-based start line.
    pub start_line: usize,
    /// 1-based start column.
    pub start_col: usize,
    /// 1-based end line.
    pub end_line: usize,
    /// 1-based end column.
    pub end_col: usize,
    /// Start offset into the file's UTF-8 byte stream.
    pub byte_start: usize,
    /// End offset into the file's UTF-8 byte stream (exclusive).
    pub byte_end: usize,
}

/// Status of a mutant after it has been judged.
///
/// Transitions are write-once: `Pending` to exactly one of the other four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MutationStatus {
    /// Not yet judged.
    Pending,
    /// The judge rejected the mutant — a test caught it.
    Killed,
    /// The judge accepted the mutant — no test caught it.
    Survived,
    /// The judge exceeded its wall-clock budget.
    Timeout,
    /// The workflow itself failed (I/O, restore, build-tool spawn).
    Error,
}

/// A single textual replacement at a specific byte range of a file.
///
/// `id` is assigned in traversal order starting from 0 and is stable across
/// runs of the same input. `original_text` must equal the substring of the
/// on-disk file at
/// `location.byte_start..location.byte_end`; producers are responsible for
/// this precondition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mutation {
    /// Monotonic identifier, unique within one run.
    pub id: u64,
    /// File this mutation applies to.
    pub file: PathBuf,
    /// Location of the mutated span.
    pub location: SourceLocation,
    /// The text currently at `location` in the unmodified file.
    pub original_text: String,
    /// The text to substitute in its place.
    pub mutated_text: String,
    /// Name of the operator that produced this mutation.
    pub operator_name: String,
    /// Human-readable description, e.g. `"boolean-flip: true -> false"`.
    pub description: String,
}

impl Mutation {
    /// Apply `self` to `source`, returning the mutated buffer.
    ///
    /// Takes the primary byte-range splice when indices are in range and
    /// consistent with `source`; otherwise falls back to a best-effort
    /// single textual find-and-replace of `original_text` -> `mutated_text`.
    #[must_use]
    pub fn apply(&self, source: &str) -> String {
        let start = self.location.byte_start;
        let end = self.location.byte_end;

        let indices_valid = start <= end
            && end <= source.len()
            && source.is_char_boundary(start)
            && source.is_char_boundary(end);

        if indices_valid {
            let mut result = String::with_capacity(source.len());
            result.push_str(&source[..start]);
            result.push_str(&self.mutated_text);
            result.push_str(&source[end..]);
            return result;
        }

        source.replacen(&self.original_text, &self.mutated_text, 1)
    }
}

/// Aggregated outcome of judging one mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationResult {
    /// The mutation that was judged.
    pub mutation: Mutation,
    /// The outcome.
    pub status: MutationStatus,
    /// Wall-clock time spent judging this mutant.
    pub duration_ms: u64,
    /// Diagnostic text: build/test output, or an error message.
    pub message: Option<String>,
}

/// Aggregate statistics over a stream of [`MutationResult`]s.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Stats {
    /// Total number of mutations judged.
    pub total: usize,
    /// Number killed.
    pub killed: usize,
    /// Number survived.
    pub survived: usize,
    /// Number timed out.
    pub timed_out: usize,
    /// Number that errored out of the workflow.
    pub errors: usize,
    /// Wall-clock time of the whole scheduling run.
    pub total_time_ms: u64,
}

impl Stats {
    /// Fold a single result into running totals.
    pub fn record(&mut self, result: &MutationResult) {
        self.total += 1;
        match result.status {
            MutationStatus::Killed => self.killed += 1,
            MutationStatus::Survived => self.survived += 1,
            MutationStatus::Timeout => self.timed_out += 1,
            MutationStatus::Error => self.errors += 1,
            MutationStatus::Pending => {}
        }
    }

    /// Fold an entire result stream from scratch.
    #[must_use]
    pub fn from_results(results: &[MutationResult]) -> Self {
        let mut stats = Self::default();
        for result in results {
            stats.record(result);
        }
        stats
    }

    /// Mutation score in `[0, 100]`.
    ///
    /// `effective = total - errors`. An empty-effective run scores 100 —
    /// infrastructure failures must never move the score, and an empty run
    /// has nothing to be unhappy about. Timeouts count toward the
    /// denominator but not the numerator: they are not "killed" by a test
    /// assertion, but they are not free passes either.
    #[must_use]
    pub fn score(&self) -> f64 {
        let effective = self.total.saturating_sub(self.errors);
        if effective == 0 {
            return 100.0;
        }
        100.0 * (self.killed as f64) / (effective as f64)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn loc(start: usize, end: usize) -> SourceLocation {
        SourceLocation {
            file: PathBuf::from("x.lean"),
            start_line: 1,
            start_col: start + 1,
            end_line: 1,
            end_col: end + 1,
            byte_start: start,
            byte_end: end,
        }
    }

    fn mutation(original: &str, mutated: &str, start: usize, end: usize) -> Mutation {
        Mutation {
            id: 0,
            file: PathBuf::from("x.lean"),
            location: loc(start, end),
            original_text: original.to_owned(),
            mutated_text: mutated.to_owned(),
            operator_name: "test".to_owned(),
            description: format!("test: {original} -> {mutated}"),
        }
    }

    #[test]
    fn apply_splices_byte_range() {
        let source = "def p (n : Nat) : Bool := n > 0";
        let m = mutation(">", "<", 27, 28);
        assert_eq!(
            m.apply(source),
            "def p (n : Nat) : Bool := n < 0"
        );
    }

    #[test]
    fn apply_falls_back_to_find_replace_on_bad_indices() {
        let source = "a && b";
        let m = mutation("&&", "||", 100, 200);
        assert_eq!(m.apply(source), "a || b");
    }

    #[test]
    fn score_is_100_for_empty_effective_run() {
        let stats = Stats::default();
        assert!((stats.score() - 100.0).abs() < f64::EPSILON);

        let mut only_errors = Stats::default();
        only_errors.total = 3;
        only_errors.errors = 3;
        assert!((only_errors.score() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn score_ignores_errors_in_denominator() {
        let mut stats = Stats::default();
        stats.total = 10;
        stats.killed = 7;
        stats.survived = 2;
        stats.errors = 1;
        let score = stats.score();
        assert!((score - (700.0 / 9.0)).abs() < 1e-9);
    }

    #[test]
    fn score_bounds_hold() {
        let mut killed_all = Stats::default();
        killed_all.total = 5;
        killed_all.killed = 5;
        assert!((killed_all.score() - 100.0).abs() < f64::EPSILON);

        let mut killed_none = Stats::default();
        killed_none.total = 5;
        killed_none.survived = 5;
        assert!((killed_none.score() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn errors_appended_do_not_change_score() {
        let base = vec![
            MutationResult {
                mutation: mutation("+", "-", 0, 1),
                status: MutationStatus::Killed,
                duration_ms: 1,
                message: None,
            },
            MutationResult {
                mutation: mutation("+", "-", 0, 1),
                status: MutationStatus::Survived,
                duration_ms: 1,
                message: None,
            },
        ];
        let before = Stats::from_results(&base).score();

        let mut extended = base;
        for _ in 0..5 {
            extended.push(MutationResult {
                mutation: mutation("+", "-", 0, 1),
                status: MutationStatus::Error,
                duration_ms: 1,
                message: Some("boom".to_owned()),
            });
        }
        let after = Stats::from_results(&extended).score();

        assert!((before - after).abs() < f64::EPSILON);
    }
}
