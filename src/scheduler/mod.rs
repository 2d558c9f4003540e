//! Scheduler: fans a batch of mutations out across workers and folds their
//! results into aggregate stats.
//!
//! Mutations are partitioned by file before dispatch so the per-file lock
//! below ever needs to block a worker on its own file, never on another.
//! The caller hands over every file's original bytes once, read during
//! traversal, so dispatch never has to re-read a file from disk — a file
//! left in a mutated state by a failed restore would otherwise be
//! misread as "original" for every later mutation against it.

use crate::error::LeanMutatorError;
use crate::mutation::{Mutation, MutationResult, Stats};
use crate::runner::{self, RunnerConfig};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{Mutex, Semaphore};

/// Scheduler configuration.
#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    /// Runner settings applied to every mutation.
    pub runner: RunnerConfig,
    /// Number of concurrent workers. `<= 1` runs sequentially.
    pub workers: usize,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            runner: RunnerConfig::default(),
            workers: 1,
        }
    }
}

/// Outcome of a full scheduling pass: every result plus folded stats.
#[derive(Debug)]
pub struct ScheduleOutcome {
    /// Every mutation's judged result, in completion order.
    pub results: Vec<MutationResult>,
    /// Stats folded over `results`.
    pub stats: Stats,
    /// Set when a restore failure forced the run to stop early. The caller
    /// must treat this as fatal regardless of `stats.score()`.
    pub aborted: bool,
}

/// Per-file mutual exclusion so two mutants of the same file never run
/// concurrently (they'd stomp each other's on-disk bytes).
type FileLocks = Arc<Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>>;

async fn file_lock(locks: &FileLocks, path: &PathBuf) -> Arc<Mutex<()>> {
    let mut map = locks.lock().await;
    map.entry(path.clone()).or_insert_with(|| Arc::new(Mutex::new(()))).clone()
}

/// Run `mutations` to completion, calling `on_result` as each one finishes
/// (not necessarily in `id` order when `workers > 1`).
///
/// `originals` maps each mutated file to the source bytes it held before
/// any mutation touched it. If a restore failure is detected mid-run, the
/// remaining mutations are skipped, every file in `originals` is given a
/// best-effort restore pass, and `ScheduleOutcome::aborted` is set.
pub async fn run<F>(
    mutations: Vec<Mutation>,
    originals: &HashMap<PathBuf, String>,
    config: &ScheduleConfig,
    mut on_result: F,
) -> ScheduleOutcome
where
    F: FnMut(&MutationResult),
{
    let start = Instant::now();
    let mut stats = Stats::default();

    let (results, aborted) = if config.workers <= 1 {
        run_sequential(mutations, originals, &config.runner, &mut on_result).await
    } else {
        let originals = Arc::new(originals.clone());
        run_parallel(mutations, &originals, &config.runner, config.workers, &mut on_result).await
    };

    if aborted {
        tracing::error!("a restore failure forced the run to stop; restoring every known file as a best effort");
        for (file, original) in originals {
            if let Err(e) = std::fs::write(file, original) {
                tracing::error!(path = %file.display(), error = %e, "best-effort restore after abort failed");
            }
        }
    }

    for result in &results {
        stats.record(result);
    }
    stats.total_time_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

    ScheduleOutcome { results, stats, aborted }
}

async fn run_sequential<F>(
    mutations: Vec<Mutation>,
    originals: &HashMap<PathBuf, String>,
    runner_config: &RunnerConfig,
    on_result: &mut F,
) -> (Vec<MutationResult>, bool)
where
    F: FnMut(&MutationResult),
{
    let mut results = Vec::with_capacity(mutations.len());
    let mut aborted = false;
    for mutation in mutations {
        let result = if aborted {
            infra_error(&mutation, "skipped: run aborted after a restore failure".to_owned())
        } else {
            match originals.get(&mutation.file) {
                None => infra_error(&mutation, "no original source recorded for mutation".to_owned()),
                Some(original) => match runner::run(&mutation, original, runner_config).await {
                    Ok(result) => result,
                    Err(e) => {
                        aborted = true;
                        restore_failure_result(&mutation, &e)
                    }
                },
            }
        };
        on_result(&result);
        results.push(result);
    }
    (results, aborted)
}

async fn run_parallel<F>(
    mutations: Vec<Mutation>,
    originals: &Arc<HashMap<PathBuf, String>>,
    runner_config: &RunnerConfig,
    workers: usize,
    on_result: &mut F,
) -> (Vec<MutationResult>, bool)
where
    F: FnMut(&MutationResult),
{
    let semaphore = Arc::new(Semaphore::new(workers));
    let locks: FileLocks = Arc::new(Mutex::new(HashMap::new()));
    let progress = Arc::new(AtomicUsize::new(0));
    let aborted = Arc::new(AtomicBool::new(false));
    let total = mutations.len();

    let mut handles = Vec::with_capacity(total);
    for mutation in mutations {
        let semaphore = Arc::clone(&semaphore);
        let locks = Arc::clone(&locks);
        let progress = Arc::clone(&progress);
        let aborted = Arc::clone(&aborted);
        let originals = Arc::clone(originals);
        let runner_config = runner_config.clone();
        handles.push(tokio::spawn(async move {
            let Ok(_permit) = semaphore.acquire_owned().await else {
                return infra_error(&mutation, "worker semaphore closed unexpectedly".to_owned());
            };
            if aborted.load(Ordering::SeqCst) {
                return infra_error(&mutation, "skipped: run aborted after a restore failure".to_owned());
            }
            let file_lock = file_lock(&locks, &mutation.file).await;
            let _file_guard = file_lock.lock().await;

            let result = match originals.get(&mutation.file) {
                None => infra_error(&mutation, "no original source recorded for mutation".to_owned()),
                Some(original) => match runner::run(&mutation, original, &runner_config).await {
                    Ok(result) => result,
                    Err(e) => {
                        aborted.store(true, Ordering::SeqCst);
                        restore_failure_result(&mutation, &e)
                    }
                },
            };
            progress.fetch_add(1, Ordering::SeqCst);
            result
        }));
    }

    let mut results = Vec::with_capacity(total);
    for handle in handles {
        match handle.await {
            Ok(result) => {
                on_result(&result);
                results.push(result);
            }
            Err(e) => {
                tracing::error!(error = %e, "mutation task panicked");
            }
        }
    }
    (results, aborted.load(Ordering::SeqCst))
}

fn infra_error(mutation: &Mutation, message: String) -> MutationResult {
    MutationResult {
        mutation: mutation.clone(),
        status: crate::mutation::MutationStatus::Error,
        duration_ms: 0,
        message: Some(message),
    }
}

fn restore_failure_result(mutation: &Mutation, err: &LeanMutatorError) -> MutationResult {
    MutationResult {
        mutation: mutation.clone(),
        status: crate::mutation::MutationStatus::Error,
        duration_ms: 0,
        message: Some(format!("aborting run: {err}")),
    }
}
