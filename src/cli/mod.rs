//! Command-line interface for lean-mutator

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Console,
    Json,
    Html,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Console => "console",
            Self::Json => "json",
            Self::Html => "html",
        };
        f.write_str(s)
    }
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "lean-mutator",
    author,
    version,
    about = "Mutation testing for Lean 4 projects",
    long_about = r#"
lean-mutator generates and runs mutants over Lean 4 source files to measure
how well a test suite (#guard statements, theorems) actually exercises the
code it covers.

EXAMPLES:
    # Run mutation testing on a directory
    lean-mutator mutate ./src

    # Run with 8 parallel workers and a JSON report
    lean-mutator mutate ./src --parallel 8 --output json --report report.json

    # List every registered operator
    lean-mutator list-operators

    # Write a default config file
    lean-mutator init
"#
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the config file (overrides LEAN_MUTATOR_CONFIG and the
    /// default lean-mutator.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable ANSI color output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Raise log verbosity to debug
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run mutation testing over one or more files or directories
    Mutate(MutateArgs),
    /// Print every registered operator's name and description
    ListOperators,
    /// Write a default configuration file into the current directory
    Init,
}

#[derive(Parser, Debug, Clone)]
pub struct MutateArgs {
    /// Files or directories to mutate
    pub paths: Vec<PathBuf>,

    /// Mutation operators to run (default: all registered operators)
    #[arg(long, value_delimiter = ',')]
    pub operators: Option<Vec<String>>,

    /// Substring patterns; any matching path is skipped
    #[arg(long, value_delimiter = ',')]
    pub exclude: Option<Vec<String>>,

    /// Per-mutation timeout in milliseconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Number of parallel workers
    #[arg(short = 'j', long)]
    pub parallel: Option<usize>,

    /// Report output format
    #[arg(long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Report file path (required for json/html, optional for console)
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Minimum mutation score required for a zero exit code (0-100)
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Build command to run in build mode (default: `lake build`)
    #[arg(long)]
    pub test_command: Option<String>,

    /// Use the fast parse-only judge instead of invoking the build tool
    #[arg(long)]
    pub isolated: bool,
}
