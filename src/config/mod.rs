//! Config loader: TOML-backed settings with a three-layer precedence merge
//! (defaults < file < CLI).

use crate::error::{LeanMutatorError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that overrides the default config file path.
pub const CONFIG_PATH_ENV: &str = "LEAN_MUTATOR_CONFIG";

const DEFAULT_CONFIG_FILE: &str = "lean-mutator.toml";

/// Resolved configuration for a `mutate` run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Operator names to run. Empty means "all registered operators".
    #[serde(default)]
    pub operators: Vec<String>,
    /// Substring patterns; any matching path is skipped during discovery.
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Per-mutation wall-clock budget, in milliseconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Worker count for the scheduler.
    #[serde(default = "default_parallel")]
    pub parallel: usize,
    /// Report format: `console`, `json`, or `html`.
    #[serde(default = "default_output")]
    pub output: String,
    /// Optional report file path; `None` means stdout for console, required
    /// for json/html.
    #[serde(default)]
    pub report: Option<PathBuf>,
    /// Minimum score (0-100) required for a successful exit code.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Explicit source roots; empty means the paths given on the command
    /// line.
    #[serde(default)]
    pub sources: Vec<PathBuf>,
    /// Build command invoked in build mode.
    #[serde(default = "default_test_command")]
    pub test_command: String,
}

fn default_timeout() -> u64 {
    30_000
}

fn default_parallel() -> usize {
    1
}

fn default_output() -> String {
    "console".to_owned()
}

fn default_threshold() -> f64 {
    80.0
}

fn default_test_command() -> String {
    "lake build".to_owned()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            operators: Vec::new(),
            exclude: Vec::new(),
            timeout: default_timeout(),
            parallel: default_parallel(),
            output: default_output(),
            report: None,
            threshold: default_threshold(),
            sources: Vec::new(),
            test_command: default_test_command(),
        }
    }
}

/// CLI overrides: only fields the user actually passed are `Some`.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// `--operators` if passed.
    pub operators: Option<Vec<String>>,
    /// `--exclude` if passed.
    pub exclude: Option<Vec<String>>,
    /// `--timeout` if passed.
    pub timeout: Option<u64>,
    /// `--parallel` if passed.
    pub parallel: Option<usize>,
    /// `--output` if passed.
    pub output: Option<String>,
    /// `--report` if passed.
    pub report: Option<PathBuf>,
    /// `--threshold` if passed.
    pub threshold: Option<f64>,
    /// Source paths from the command line.
    pub sources: Option<Vec<PathBuf>>,
    /// `--test-command` if passed.
    pub test_command: Option<String>,
}

impl Config {
    /// Load defaults, overlay a config file if present at `path`, then
    /// overlay `overrides`.
    pub fn load(path: &Path, overrides: &ConfigOverrides) -> Result<Self> {
        let mut config = if path.exists() {
            let text = std::fs::read_to_string(path).map_err(|e| LeanMutatorError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;
            toml::from_str(&text).map_err(|e| LeanMutatorError::Config(e.to_string()))?
        } else {
            Self::default()
        };
        config.apply(overrides);
        Ok(config)
    }

    fn apply(&mut self, overrides: &ConfigOverrides) {
        if let Some(v) = &overrides.operators {
            self.operators = v.clone();
        }
        if let Some(v) = &overrides.exclude {
            self.exclude = v.clone();
        }
        if let Some(v) = overrides.timeout {
            self.timeout = v;
        }
        if let Some(v) = overrides.parallel {
            self.parallel = v;
        }
        if let Some(v) = &overrides.output {
            self.output = v.clone();
        }
        if overrides.report.is_some() {
            self.report = overrides.report.clone();
        }
        if let Some(v) = overrides.threshold {
            self.threshold = v;
        }
        if let Some(v) = &overrides.sources {
            self.sources = v.clone();
        }
        if let Some(v) = &overrides.test_command {
            self.test_command = v.clone();
        }
    }

    /// Write `self` as pretty TOML to `path`; refuses to overwrite.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            return Err(LeanMutatorError::Config(format!(
                "{} already exists; refusing to overwrite",
                path.display()
            )));
        }
        let text = toml::to_string_pretty(&Self::default())
            .map_err(|e| LeanMutatorError::Config(e.to_string()))?;
        std::fs::write(path, text).map_err(|e| LeanMutatorError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Resolve the config file path: `--config` flag, then
/// `LEAN_MUTATOR_CONFIG`, then the default filename in the current
/// directory.
#[must_use]
pub fn resolve_path(flag: Option<&Path>) -> PathBuf {
    if let Some(p) = flag {
        return p.to_path_buf();
    }
    if let Ok(p) = std::env::var(CONFIG_PATH_ENV) {
        return PathBuf::from(p);
    }
    PathBuf::from(DEFAULT_CONFIG_FILE)
}
