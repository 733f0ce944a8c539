//! Operator-facing output for the codetext CLI.
//!
//! - Dimmed colors for routine messages
//! - Bold colors for warnings and errors
//! - Plain stdout lines for `--debug` traces and the final banner, so they can
//!   be piped or captured like the rest of the run's report
//! - Verbosity control (quiet, normal, verbose)

use colored::Colorize;
use std::sync::atomic::{AtomicU8, Ordering};

/// Verbosity level for output messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Suppress informational messages and the success banner.
    Quiet = 0,
    /// Default verbosity level, show all standard messages.
    Normal = 1,
    /// `--debug`: per-entry trace lines in addition to standard output.
    Verbose = 2,
}

/// Global verbosity setting (default: Normal).
static VERBOSITY: AtomicU8 = AtomicU8::new(1);

/// Sets the global verbosity level for all output functions.
pub fn set_verbosity(level: Verbosity) {
    VERBOSITY.store(level as u8, Ordering::Relaxed);
}

/// Gets the current global verbosity level.
pub fn get_verbosity() -> Verbosity {
    match VERBOSITY.load(Ordering::Relaxed) {
        0 => Verbosity::Quiet,
        2 => Verbosity::Verbose,
        _ => Verbosity::Normal,
    }
}

/// Prints a success message in green (respects quiet mode).
pub fn success(message: &str) {
    if get_verbosity() == Verbosity::Quiet {
        return;
    }
    println!("{}", message.green());
}

/// Prints an error message in bold red (always shown).
pub fn error(message: &str) {
    eprintln!("{}", message.red().bold());
}

/// Prints a warning message in bold yellow (always shown).
pub fn warning(message: &str) {
    eprintln!("{}", message.yellow().bold());
}

/// Prints an informational message in dimmed color (respects quiet mode).
pub fn info(message: &str) {
    if get_verbosity() == Verbosity::Quiet {
        return;
    }
    eprintln!("{}", message.dimmed());
}

/// Prints a dimmed message on stderr (only in verbose mode).
pub fn verbose(message: &str) {
    if get_verbosity() != Verbosity::Verbose {
        return;
    }
    eprintln!("{}", message.dimmed());
}

/// Prints a per-entry trace line on stdout (only in verbose mode).
pub fn trace(message: &str) {
    if get_verbosity() != Verbosity::Verbose {
        return;
    }
    println!("{message}");
}

/// Prints a trace line framed by blank lines (only in verbose mode).
pub fn trace_block(message: &str) {
    if get_verbosity() != Verbosity::Verbose {
        return;
    }
    println!();
    println!("{message}");
    println!();
}

/// Formats a trace line for a visited entry, marking excluded ones.
#[must_use]
pub fn processing_line(kind: &str, relative: &str, excluded: bool) -> String {
    if excluded {
        format!("Processing {kind}: {relative} [EXCLUDED]")
    } else {
        format!("Processing {kind}: {relative}")
    }
}

/// Prints the end-of-run banner naming the output file (respects quiet mode).
pub fn completion_banner(output_file: &std::path::Path) {
    if get_verbosity() == Verbosity::Quiet {
        return;
    }
    println!();
    success("Conversion completed successfully!");
    println!("Output File: \"{}\"", output_file.display());
    println!();
}
