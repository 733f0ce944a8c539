//! Command-line interface definitions for codetext.
//!
//! The CLI definitions are shared between the main binary and build tools
//! (like xtask) for man page generation.
//!
//! Note: Field-level documentation is provided via clap doc comments, so we
//! allow `missing_docs` for this module to avoid redundant documentation.

#![allow(missing_docs)]

use clap::Parser;
use clap_complete::Shell;
use std::path::PathBuf;

/// Main CLI structure for codetext.
#[derive(Parser, Debug)]
#[command(
    name = "codetext",
    version = crate::VERSION,
    about = "Converts a structured codebase into a single TXT file",
    long_about = "Walks a codebase and writes <codebase>.txt next to it: the folder \
                  structure first, then the content of every file that is not excluded. \
                  The .git folder at the root is always left out."
)]
pub struct Cli {
    /// Path to the codebase directory
    #[arg(required_unless_present = "completions", value_name = "CODEBASE_PATH")]
    pub codebase_path: Option<PathBuf>,

    /// Files and folders to exclude, relative to the codebase root
    ///
    /// Excluding a folder excludes everything under it; `src` does not
    /// exclude `src2`. Excluded entries still appear in the structure listing.
    #[arg(long, value_name = "PATH", num_args = 0.., action = clap::ArgAction::Append)]
    pub exclude: Vec<String>,

    /// Print every processed file and excluded folder
    #[arg(long, conflicts_with = "quiet")]
    pub debug: bool,

    /// Suppress the completion banner
    #[arg(short, long)]
    pub quiet: bool,

    /// TOML configuration file
    #[arg(long, value_name = "FILE", env = crate::config::CONFIG_ENV)]
    pub config: Option<PathBuf>,

    /// Descend into symlinked directories
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,
}
