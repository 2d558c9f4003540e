//! Library-wide error type.
//!
//! Crate internals return [`LeanMutatorError`]; the binary boundary converts
//! to `anyhow::Error` via `?` and attaches user-facing context.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the mutation pipeline's library components.
#[derive(Debug, Error)]
pub enum LeanMutatorError {
    /// Filesystem I/O failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path being operated on.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The parser could not make sense of a source file.
    #[error("failed to parse {path}: {message}")]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        /// Human-readable parser diagnostic.
        message: String,
    },

    /// The configuration file was malformed or could not be written.
    #[error("configuration error: {0}")]
    Config(String),

    /// A user requested an operator name that isn't registered.
    #[error("unknown mutation operator: {0}")]
    UnknownOperator(String),

    /// Restoring a mutated file to its original bytes failed.
    #[error("failed to restore {path}: {source}")]
    Restore {
        /// File that could not be restored.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The host build tool could not be located or spawned.
    #[error("build tool error: {0}")]
    BuildTool(String),
}

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, LeanMutatorError>;
