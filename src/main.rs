//! lean-mutator — mutation testing for Lean 4 source files.

mod cli;
mod config;
mod error;
mod mutation;
mod operators;
mod parser;
mod report;
mod runner;
mod scheduler;
mod traversal;

use anyhow::{Context, Result};
use clap::Parser as _;
use cli::{Cli, Command, MutateArgs};
use colored::Colorize;
use config::{Config, ConfigOverrides};
use indicatif::{ProgressBar, ProgressStyle};
use mutation::Stats;
use operators::OperatorRegistry;
use std::collections::HashMap;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    print_banner();

    match cli.command.clone() {
        Command::ListOperators => {
            list_operators();
            Ok(())
        }
        Command::Init => run_init(),
        Command::Mutate(args) => run_mutate(&cli, &args).await,
    }
}

/// `--verbose` overrides whatever `RUST_LOG` says, same as CLI flags beat
/// environment/file settings in the config loader; otherwise `RUST_LOG` is
/// consulted and falls back to `info`.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn print_banner() {
    println!(
        "{} {}",
        "LeanMutator".bright_cyan().bold(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
}

fn list_operators() {
    let registry = OperatorRegistry::with_builtins();
    for op in registry.all() {
        println!("{:<24} {}", op.name().cyan(), op.description());
    }
}

fn run_init() -> Result<()> {
    let path = config::resolve_path(None);
    Config::init(&path).with_context(|| format!("failed to write {}", path.display()))?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

async fn run_mutate(cli: &Cli, args: &MutateArgs) -> Result<()> {
    let config_path = config::resolve_path(cli.config.as_deref());
    let overrides = ConfigOverrides {
        operators: args.operators.clone(),
        exclude: args.exclude.clone(),
        timeout: args.timeout,
        parallel: args.parallel,
        output: args.output.map(|o| o.to_string()),
        report: args.report.clone(),
        threshold: args.threshold,
        sources: if args.paths.is_empty() { None } else { Some(args.paths.clone()) },
        test_command: args.test_command.clone(),
    };
    let config = Config::load(&config_path, &overrides)?;

    let roots = if config.sources.is_empty() {
        vec![std::path::PathBuf::from(".")]
    } else {
        config.sources.clone()
    };

    let spinner = create_spinner("Discovering source files...");
    let mut files = parser::discover_source_files(&roots);
    files.retain(|f| !config.exclude.iter().any(|pattern| f.to_string_lossy().contains(pattern.as_str())));
    spinner.finish_with_message(format!("Found {} source files", files.len()));
    tracing::info!(count = files.len(), roots = ?roots, "discovery complete");

    if files.is_empty() {
        anyhow::bail!("no source files found under {:?}", roots);
    }

    let registry = OperatorRegistry::with_builtins();
    let ops = registry.get_by_names(&config.operators)?;

    let parse_bar = create_bar(files.len() as u64, "Parsing and generating mutations");
    let mut all_mutations = Vec::new();
    let mut originals = HashMap::with_capacity(files.len());
    let mut parsed_count = 0usize;
    for file in &files {
        let source = std::fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))?;
        match parser::parse(&source, file) {
            Ok(parsed) => {
                let mutations = traversal::generate(&parsed.root, &source, file, &ops, true);
                all_mutations.extend(mutations);
                originals.insert(file.clone(), source);
                parsed_count += 1;
            }
            Err(e) => {
                tracing::warn!(file = %file.display(), error = %e, "skipping file that failed to parse");
            }
        }
        parse_bar.inc(1);
    }
    for (i, mutation) in all_mutations.iter_mut().enumerate() {
        mutation.id = i as u64;
    }
    parse_bar.finish_with_message(format!("Generated {} mutations", all_mutations.len()));
    tracing::info!(parsed = parsed_count, skipped = files.len() - parsed_count, "parse complete");
    tracing::info!(mutations = all_mutations.len(), "traversal complete");

    if all_mutations.is_empty() {
        println!("{}", "No mutations generated.".yellow());
        return Ok(());
    }

    let run_bar = create_bar(all_mutations.len() as u64, "Running mutants");
    let schedule_config = scheduler::ScheduleConfig {
        runner: runner::RunnerConfig {
            timeout: Duration::from_millis(config.timeout),
            isolated: args.isolated,
            test_command: config.test_command.clone(),
            keep_temp_files: false,
        },
        workers: config.parallel,
    };
    let outcome = scheduler::run(all_mutations, &originals, &schedule_config, |_| run_bar.inc(1)).await;
    run_bar.finish_with_message("Done");
    tracing::info!(results = outcome.results.len(), aborted = outcome.aborted, "schedule complete");

    let output_format: cli::OutputFormat = config.output.parse().unwrap_or_default();
    let color = !cli.no_color && std::env::var_os("NO_COLOR").is_none();
    report::write_report(output_format, &outcome.stats, &outcome.results, config.report.as_deref(), color)?;
    tracing::info!(format = %output_format, "report complete");

    print_summary(&outcome.stats);

    if outcome.aborted {
        eprintln!("{}", "Run aborted: a mutated file could not be restored to its original contents.".red());
        std::process::exit(1);
    }

    if outcome.stats.score() >= config.threshold {
        Ok(())
    } else {
        std::process::exit(1);
    }
}

impl std::str::FromStr for cli::OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "console" => Ok(Self::Console),
            "json" => Ok(Self::Json),
            "html" => Ok(Self::Html),
            other => anyhow::bail!("unknown output format: {other}"),
        }
    }
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_owned());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn create_bar(len: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} {msg} [{bar:40.cyan/blue}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    pb.set_message(message.to_owned());
    pb
}

fn print_summary(stats: &Stats) {
    let score = stats.score();
    let colored_score = if score >= 80.0 {
        format!("{score:.1}%").green()
    } else if score >= 50.0 {
        format!("{score:.1}%").yellow()
    } else {
        format!("{score:.1}%").red()
    };
    println!("\nScore: {colored_score}");
    println!(
        "Killed: {}  Survived: {}  Timed out: {}  Errors: {}  Total: {}",
        stats.killed, stats.survived, stats.timed_out, stats.errors, stats.total
    );
}
