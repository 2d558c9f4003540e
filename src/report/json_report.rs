//! JSON reporter: the stable v1.0 schema from the external interfaces spec.

use crate::mutation::{MutationResult, Stats};
use anyhow::Result;
use serde::Serialize;

#[derive(Serialize)]
struct Report {
    version: &'static str,
    generator: &'static str,
    stats: ReportStats,
    mutations: Vec<ReportMutation>,
}

#[derive(Serialize)]
struct ReportStats {
    total: usize,
    killed: usize,
    survived: usize,
    #[serde(rename = "timedOut")]
    timed_out: usize,
    errors: usize,
    /// Serialized as a string to sidestep float-format ambiguity.
    score: String,
    #[serde(rename = "totalTime")]
    total_time: u64,
}

#[derive(Serialize)]
struct ReportLocation {
    file: String,
    #[serde(rename = "startLine")]
    start_line: usize,
    #[serde(rename = "startCol")]
    start_col: usize,
    #[serde(rename = "endLine")]
    end_line: usize,
    #[serde(rename = "endCol")]
    end_col: usize,
}

#[derive(Serialize)]
struct ReportMutationRecord {
    id: u64,
    file: String,
    location: ReportLocation,
    original: String,
    mutated: String,
    operator: String,
}

#[derive(Serialize)]
struct ReportMutation {
    mutation: ReportMutationRecord,
    status: &'static str,
    duration: u64,
    message: Option<String>,
}

fn status_name(status: crate::mutation::MutationStatus) -> &'static str {
    match status {
        crate::mutation::MutationStatus::Pending => "pending",
        crate::mutation::MutationStatus::Killed => "killed",
        crate::mutation::MutationStatus::Survived => "survived",
        crate::mutation::MutationStatus::Timeout => "timedOut",
        crate::mutation::MutationStatus::Error => "error",
    }
}

/// Render the JSON report body.
pub fn render_json(stats: &Stats, results: &[MutationResult]) -> Result<String> {
    let report = Report {
        version: "1.0",
        generator: "LeanMutator",
        stats: ReportStats {
            total: stats.total,
            killed: stats.killed,
            survived: stats.survived,
            timed_out: stats.timed_out,
            errors: stats.errors,
            score: format!("{:.2}", stats.score()),
            total_time: stats.total_time_ms,
        },
        mutations: results
            .iter()
            .map(|r| ReportMutation {
                mutation: ReportMutationRecord {
                    id: r.mutation.id,
                    file: r.mutation.file.display().to_string(),
                    location: ReportLocation {
                        file: r.mutation.location.file.display().to_string(),
                        start_line: r.mutation.location.start_line,
                        start_col: r.mutation.location.start_col,
                        end_line: r.mutation.location.end_line,
                        end_col: r.mutation.location.end_col,
                    },
                    original: r.mutation.original_text.clone(),
                    mutated: r.mutation.mutated_text.clone(),
                    operator: r.mutation.operator_name.clone(),
                },
                status: status_name(r.status),
                duration: r.duration_ms,
                message: r.message.clone(),
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
