#![warn(missing_docs)]
#![allow(clippy::arithmetic_side_effects)] // Counters over directory entries cannot overflow
#![allow(clippy::indexing_slicing)] // Bounds checked by logic

//! # codetext - flatten a codebase into one text file
//!
//! codetext walks a directory and writes `<dirname>.txt` next to it: an
//! indented outline of every folder and file, followed by one delimited
//! section per file holding its text content. The result can be pasted or
//! uploaded anywhere that only accepts flat text.
//!
//! ## Architecture
//!
//! - [`cli`]: Command-line definitions (shared with the man page generator)
//! - [`config`]: Optional TOML configuration, parsing and validation
//! - [`exclude`]: Exclusion entries and prefix-segment matching
//! - [`walk`]: Lazy depth-first traversal over `walkdir`
//! - [`decode`]: Lossy UTF-8 decoding of file contents
//! - [`document`]: The output document and its fixed layout
//! - [`serializer`]: The two passes (tree listing, content dump)
//! - [`output`]: Colored operator messages and verbosity
//!
//! ## Example Usage
//!
//! ```no_run
//! use codetext::exclude::ExclusionSet;
//! use codetext::serializer::{SerializeOptions, TreeSerializer};
//!
//! # fn main() -> anyhow::Result<()> {
//! let options = SerializeOptions {
//!     exclusions: ExclusionSet::from_entries(["target", "docs/generated"])?,
//!     ..SerializeOptions::default()
//! };
//!
//! let summary = TreeSerializer::new("my-project".as_ref(), options)?.run()?;
//! println!("wrote {} files to {}", summary.files_written, summary.output.display());
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions (argument parsing structures).
pub mod cli;

/// Configuration parsing, validation, and loading.
#[allow(missing_docs)]
pub mod config;

/// Lossy text decoding for file contents.
pub mod decode;

/// Output document layout and writer.
pub mod document;

/// Exclusion set and path matching.
pub mod exclude;

/// Operator-facing output and verbosity.
pub mod output;

/// Tree listing and content dump passes.
pub mod serializer;

/// Directory traversal yielding (path, depth) entries.
pub mod walk;

use anyhow::Result;
use std::path::PathBuf;

/// Current version of the codetext binary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version-control metadata folder at the root, always left out.
pub const VCS_DIR: &str = ".git";

/// Everything a run needs, resolved from flags and the optional config file.
///
/// Exclusions from the config file come first, then `--exclude` values;
/// `--follow-symlinks` turns link following on even when the config leaves it
/// off.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Directory to serialize, as given
    pub codebase_path: PathBuf,

    /// Config file the settings were read from, if any
    pub config_path: Option<PathBuf>,

    /// Loaded configuration settings
    pub config: config::Config,

    /// Validated exclusions (config entries, then command-line entries)
    pub exclusions: exclude::ExclusionSet,

    /// Descend into symlinked directories
    pub follow_symlinks: bool,
}

impl RunContext {
    /// Loads the config file (if any) and validates every exclusion.
    ///
    /// Nothing is written to disk here, so a failure leaves any previous
    /// output untouched.
    ///
    /// # Errors
    /// Returns an error if the config file cannot be loaded or an exclusion
    /// entry is malformed.
    pub fn new(
        codebase_path: PathBuf,
        config_path: Option<PathBuf>,
        cli_excludes: &[String],
        follow_symlinks: bool,
    ) -> Result<Self> {
        let config = config::Config::load_or_default(config_path.as_deref())?;

        if let Some(path) = &config_path {
            let validator = config::validator::ConfigValidator::new();
            if let Err(e) = validator.validate_config_file(path) {
                output::warning(&format!("Warning: Configuration validation failed: {e}"));
            }
        }

        let exclusions = exclude::ExclusionSet::from_entries(
            config.exclude.paths.iter().chain(cli_excludes.iter()),
        )?;
        let follow_symlinks = follow_symlinks || config.walk.follow_symlinks;

        Ok(Self {
            codebase_path,
            config_path,
            config,
            exclusions,
            follow_symlinks,
        })
    }

    /// Builds the serializer for this run.
    ///
    /// # Errors
    /// Returns an error if the codebase path is not a directory or the
    /// configured separator is invalid.
    pub fn serializer(&self) -> Result<serializer::TreeSerializer> {
        let options = serializer::SerializeOptions {
            exclusions: self.exclusions.clone(),
            follow_symlinks: self.follow_symlinks,
            separator: self.config.separator()?,
        };
        serializer::TreeSerializer::new(&self.codebase_path, options)
    }
}
