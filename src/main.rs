use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::{Generator, generate};
use codetext::cli::Cli;
use codetext::output::{self, Verbosity};
use codetext::RunContext;
use colored::Colorize;
use std::io;
use std::process;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter, e.g. `codetext=debug`
const LOG_ENV: &str = "CODETEXT_LOG";

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        print_completions(shell, &mut Cli::command());
        return Ok(());
    }

    if cli.debug {
        output::set_verbosity(Verbosity::Verbose);
    } else if cli.quiet {
        output::set_verbosity(Verbosity::Quiet);
    }

    let codebase_path = cli
        .codebase_path
        .context("The codebase path is required")?;

    let context = RunContext::new(
        codebase_path,
        cli.config,
        &cli.exclude,
        cli.follow_symlinks,
    )?;
    let summary = context.serializer()?.run()?;

    output::verbose(&format!(
        "Listed {} directories and {} files; wrote {} sections, excluded {} files and {} directories",
        summary.directories_listed,
        summary.files_listed,
        summary.files_written,
        summary.files_excluded,
        summary.directories_pruned
    ));
    if summary.walk_errors > 0 {
        output::info(&format!(
            "{} traversal error(s); unreadable entries were left out",
            summary.walk_errors
        ));
    }
    if !summary.skipped.is_empty() {
        output::warning(&format!(
            "{} file(s) could not be read and were skipped",
            summary.skipped.len()
        ));
    }
    output::completion_banner(&summary.output);

    Ok(())
}

fn print_completions<G: Generator>(g: G, cmd: &mut clap::Command) {
    generate(g, cmd, cmd.get_name().to_string(), &mut io::stdout());
}
