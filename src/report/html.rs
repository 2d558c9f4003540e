//! HTML reporter: a self-contained page with inline CSS/JS, a stat grid and
//! an accordion of mutation entries.

use super::css;
use crate::mutation::{MutationResult, MutationStatus, Stats};
use std::fmt::Write as _;

fn status_class(status: MutationStatus) -> &'static str {
    match status {
        MutationStatus::Killed => "killed",
        MutationStatus::Survived => "survived",
        MutationStatus::Timeout => "timeout",
        MutationStatus::Error | MutationStatus::Pending => "error",
    }
}

fn status_label(status: MutationStatus) -> &'static str {
    match status {
        MutationStatus::Killed => "Killed",
        MutationStatus::Survived => "Survived",
        MutationStatus::Timeout => "Timed out",
        MutationStatus::Error => "Error",
        MutationStatus::Pending => "Pending",
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn score_class(score: f64) -> &'static str {
    if score >= 80.0 {
        "high"
    } else if score >= 50.0 {
        "medium"
    } else {
        "low"
    }
}

/// Render the standalone HTML report.
#[must_use]
pub fn render_html(stats: &Stats, results: &[MutationResult]) -> String {
    let score = stats.score();
    let mut entries = String::new();
    for result in results {
        let loc = &result.mutation.location;
        let _ = write!(
            entries,
            r#"<div class="entry {class}">
  <div class="entry-header">
    <span class="entry-location">{file}:{line}:{col}</span>
    <span class="entry-status">{status}</span>
  </div>
  <div class="entry-body">
    <div class="entry-operator">{operator}</div>
    <div class="entry-code">
      <span class="original">{original}</span>
      <span class="arrow">&rarr;</span>
      <span class="mutated">{mutated}</span>
    </div>
  </div>
</div>
"#,
            class = status_class(result.status),
            file = html_escape(&loc.file.display().to_string()),
            line = loc.start_line,
            col = loc.start_col,
            status = status_label(result.status),
            operator = html_escape(&result.mutation.operator_name),
            original = html_escape(&result.mutation.original_text),
            mutated = html_escape(&result.mutation.mutated_text),
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>LeanMutator report</title>
<style>
{css}
</style>
</head>
<body>
<div class="container">
  <header><h1>LeanMutator</h1></header>
  <div class="score-card">
    <div class="score {score_class}">{score:.1}%</div>
    <div class="stats">
      <div>Total: {total}</div>
      <div>Killed: {killed}</div>
      <div>Survived: {survived}</div>
      <div>Timed out: {timed_out}</div>
      <div>Errors: {errors}</div>
      <div>Total time: {total_time}ms</div>
    </div>
  </div>
  <section class="accordion">
{entries}
  </section>
</div>
<script>
document.querySelectorAll('.entry-header').forEach((header) => {{
  header.addEventListener('click', () => {{
    header.parentElement.classList.toggle('expanded');
  }});
}});
</script>
</body>
</html>"#,
        css = css::REPORT_CSS,
        score_class = score_class(score),
        score = score,
        total = stats.total,
        killed = stats.killed,
        survived = stats.survived,
        timed_out = stats.timed_out,
        errors = stats.errors,
        total_time = stats.total_time_ms,
        entries = entries,
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::mutation::{Mutation, SourceLocation};
    use std::path::PathBuf;

    #[test]
    fn escapes_source_text_and_embeds_no_external_assets() {
        let mutation = Mutation {
            id: 0,
            file: PathBuf::from("a.lean"),
            location: SourceLocation {
                file: PathBuf::from("a.lean"),
                start_line: 1,
                start_col: 1,
                end_line: 1,
                end_col: 2,
                byte_start: 0,
                byte_end: 1,
            },
            original_text: "\"<hi>\"".to_owned(),
            mutated_text: "\"\"".to_owned(),
            operator_name: "string-literal".to_owned(),
            description: "test".to_owned(),
        };
        let results = vec![MutationResult {
            mutation,
            status: MutationStatus::Survived,
            duration_ms: 1,
            message: None,
        }];
        let stats = Stats::from_results(&results);
        let html = render_html(&stats, &results);
        assert!(html.contains("&lt;hi&gt;"));
        assert!(!html.contains("<link"));
        assert!(!html.contains("http://"));
        assert!(!html.contains("https://"));
    }
}
