//! Console reporter: a header, a colored score, the five status counts,
//! total time, and one line per surviving mutation.

use crate::mutation::{MutationResult, MutationStatus, Stats};
use colored::{Color, Colorize};
use std::fmt::Write as _;

fn score_color(score: f64) -> Color {
    if score >= 80.0 {
        Color::Green
    } else if score >= 50.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Render the console report. `color` toggles ANSI output.
#[must_use]
pub fn render_console(stats: &Stats, results: &[MutationResult], color: bool) -> String {
    colored::control::set_override(color);

    let mut out = String::new();
    let _ = writeln!(out, "LeanMutator mutation testing report");
    let _ = writeln!(out);

    let score = stats.score();
    let score_line = format!("Score: {score:.2}%").color(score_color(score)).bold();
    let _ = writeln!(out, "{score_line}");
    let _ = writeln!(out);

    let _ = writeln!(out, "Total:     {}", stats.total);
    let _ = writeln!(out, "Killed:    {}", stats.killed);
    let _ = writeln!(out, "Survived:  {}", stats.survived);
    let _ = writeln!(out, "Timed out: {}", stats.timed_out);
    let _ = writeln!(out, "Errors:    {}", stats.errors);
    let _ = writeln!(out, "Total time: {}ms", stats.total_time_ms);
    let _ = writeln!(out);

    let survivors: Vec<&MutationResult> = results
        .iter()
        .filter(|r| r.status == MutationStatus::Survived)
        .collect();

    if survivors.is_empty() {
        let _ = writeln!(out, "No surviving mutations.");
    } else {
        let _ = writeln!(out, "Surviving mutations:");
        for result in survivors {
            let loc = &result.mutation.location;
            let _ = writeln!(
                out,
                "  {}:{} - {}",
                loc.file.display(),
                loc.start_col,
                result.mutation.operator_name
            );
        }
    }

    out
}
