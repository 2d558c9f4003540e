//! The runner: applies one mutation to disk, lets a judge classify it, and
//! restores the original bytes on every exit path.
//!
//! "Isolated" and "build" mode are the same pipeline with different judges.

use crate::error::LeanMutatorError;
use crate::mutation::{Mutation, MutationResult, MutationStatus};
use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tokio::time::timeout;

/// Runner configuration shared across all mutations in a run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Wall-clock budget per mutation.
    pub timeout: Duration,
    /// `true` selects the fast parse-only judge; `false` invokes the build
    /// command.
    pub isolated: bool,
    /// Shell command run in build mode, split on whitespace.
    pub test_command: String,
    /// Keep `.bak` and scratch files around after a run, for debugging.
    pub keep_temp_files: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            isolated: false,
            test_command: "lake build".to_owned(),
            keep_temp_files: false,
        }
    }
}

/// RAII guard that restores a file to its original bytes on drop,
/// regardless of how the scope is exited. `run` performs the restore
/// explicitly on its own return paths and disarms the guard once that
/// explicit restore lands; the guard's own write is the last-resort
/// fallback for a path that panics before reaching it (its failure can only
/// be logged, since `Drop` cannot return a `Result`).
struct RestoreGuard<'a> {
    path: &'a Path,
    original: &'a str,
    disarmed: Cell<bool>,
}

impl RestoreGuard<'_> {
    fn disarm(&self) {
        self.disarmed.set(true);
    }
}

impl Drop for RestoreGuard<'_> {
    fn drop(&mut self) {
        if self.disarmed.get() {
            return;
        }
        if let Err(e) = std::fs::write(self.path, self.original) {
            tracing::error!(path = %self.path.display(), error = %e, "failed to restore mutated file");
        }
    }
}

/// Apply `mutation`, judge it, and restore `original` before returning.
///
/// Precondition: `mutation.file` currently holds exactly `original`.
/// Postcondition: on every `Ok` return path, `mutation.file` holds
/// `original` again. An `Err` return means the final restore write itself
/// failed — the invariant that originals are restored is broken, and the
/// caller must abort the whole run rather than keep scheduling mutations
/// against this file.
pub async fn run(mutation: &Mutation, original: &str, config: &RunnerConfig) -> Result<MutationResult, LeanMutatorError> {
    let start = Instant::now();
    let file = &mutation.file;
    let mutated = mutation.apply(original);

    let backup_path = backup_path(file);
    if let Err(e) = std::fs::write(&backup_path, original) {
        return Ok(error_result(mutation, start, format!("failed to write backup: {e}")));
    }

    let restore = RestoreGuard { path: file, original, disarmed: Cell::new(false) };

    if let Err(e) = std::fs::write(file, &mutated) {
        cleanup_backup(&backup_path, config.keep_temp_files);
        restore.disarm();
        return Ok(error_result(mutation, start, format!("failed to write mutated file: {e}")));
    }

    let status = if config.isolated {
        judge_isolated(file, &mutated).await
    } else {
        judge_build(file, &config.test_command, config.timeout).await
    };

    cleanup_backup(&backup_path, config.keep_temp_files);

    let (status, message) = match status {
        Ok((status, message)) => (status, message),
        Err(e) => (MutationStatus::Error, Some(e)),
    };

    // Leave the guard armed until this succeeds: its `Drop` is the
    // last-resort retry. If that also fails it can only log, but this
    // `Err` already carries the failure back to the caller so the run
    // can abort.
    restore_original(file, original)?;
    restore.disarm();

    Ok(MutationResult {
        mutation: mutation.clone(),
        status,
        duration_ms: duration_ms(start),
        message,
    })
}

/// Write `original` back to `file`. A failure here breaks the "file is
/// back the way we found it" invariant and must abort the whole run.
fn restore_original(file: &Path, original: &str) -> Result<(), LeanMutatorError> {
    std::fs::write(file, original).map_err(|e| LeanMutatorError::Restore { path: file.to_path_buf(), source: e })
}

fn backup_path(file: &Path) -> PathBuf {
    let mut name = file.as_os_str().to_owned();
    name.push(".bak");
    PathBuf::from(name)
}

fn cleanup_backup(path: &Path, keep: bool) {
    if keep {
        return;
    }
    if path.exists() {
        if let Err(e) = std::fs::remove_file(path) {
            tracing::warn!(path = %path.display(), error = %e, "failed to remove backup file");
        }
    }
}

fn error_result(mutation: &Mutation, start: Instant, message: String) -> MutationResult {
    MutationResult {
        mutation: mutation.clone(),
        status: MutationStatus::Error,
        duration_ms: duration_ms(start),
        message: Some(message),
    }
}

fn duration_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Isolated judge: re-parse the mutated buffer. A parse error is a signal
/// the mutant is dead on arrival — classified `Killed`.
async fn judge_isolated(file: &Path, mutated: &str) -> Result<(MutationStatus, Option<String>), String> {
    match crate::parser::parse(mutated, file) {
        Ok(result) if result.errors.is_empty() => Ok((MutationStatus::Survived, None)),
        Ok(result) => Ok((MutationStatus::Killed, result.errors.into_iter().next())),
        Err(e) => Ok((MutationStatus::Killed, Some(e.to_string()))),
    }
}

/// Build judge: invoke the project's build command and interpret only the
/// exit code.
async fn judge_build(
    file: &Path,
    test_command: &str,
    timeout_duration: Duration,
) -> Result<(MutationStatus, Option<String>), String> {
    let project_root = find_project_root(file);
    let mut parts = test_command.split_whitespace();
    let Some(program) = parts.next() else {
        return Err(LeanMutatorError::BuildTool("empty test command".to_owned()).to_string());
    };

    let run = Command::new(program)
        .args(parts)
        .current_dir(&project_root)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output();

    match timeout(timeout_duration, run).await {
        Ok(Ok(output)) => {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            if output.status.success() {
                Ok((MutationStatus::Survived, None))
            } else {
                Ok((MutationStatus::Killed, Some(stderr)))
            }
        }
        Ok(Err(e)) => Err(LeanMutatorError::BuildTool(format!("failed to spawn build command: {e}")).to_string()),
        Err(_) => Ok((MutationStatus::Timeout, Some("build timed out".to_owned()))),
    }
}

/// Walk upward from `file` looking for `lakefile.lean` or `lakefile.toml`;
/// fall back to the file's parent directory.
fn find_project_root(file: &Path) -> PathBuf {
    let mut dir = file.parent().map(Path::to_path_buf).unwrap_or_default();
    loop {
        if dir.join("lakefile.lean").exists() || dir.join("lakefile.toml").exists() {
            return dir;
        }
        let Some(parent) = dir.parent() else {
            break;
        };
        dir = parent.to_path_buf();
    }
    file.parent().map(Path::to_path_buf).unwrap_or_default()
}
