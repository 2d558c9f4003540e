//! Reporters: console, JSON, and HTML renderings of a finished run.

mod console;
mod css;
mod html;
mod json_report;

use crate::mutation::{MutationResult, Stats};
use anyhow::{Context, Result};
use std::path::Path;

pub use console::render_console;
pub use html::render_html;
pub use json_report::render_json;

/// Write a report in `format` to `path`, or stdout when `path` is `None`
/// and the format is `console`.
pub fn write_report(
    format: crate::cli::OutputFormat,
    stats: &Stats,
    results: &[MutationResult],
    path: Option<&Path>,
    color: bool,
) -> Result<()> {
    let body = match format {
        crate::cli::OutputFormat::Console => render_console(stats, results, color),
        crate::cli::OutputFormat::Json => render_json(stats, results)?,
        crate::cli::OutputFormat::Html => render_html(stats, results),
    };

    match path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("failed to create {}", parent.display()))?;
                }
            }
            std::fs::write(path, body).with_context(|| format!("failed to write {}", path.display()))?;
        }
        None => println!("{body}"),
    }
    Ok(())
}
