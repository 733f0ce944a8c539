//! Directory-to-text serialization.
//!
//! A run makes two passes over the input directory through one
//! [`OutputDocument`]:
//!
//! 1. [`listing`] writes the indented tree of every folder and file. Only the
//!    version-control folder is left out; user exclusions do not apply here,
//!    so the outline always shows the whole project.
//! 2. [`dump`] walks again, pruning excluded folders, and appends a content
//!    section for every file that is not excluded.

pub mod dump;
pub mod listing;

use crate::document::{self, OutputDocument, Separator};
use crate::exclude::ExclusionSet;
use crate::output;
use crate::walk::TreeWalker;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{Level, info, span};

/// Settings for one serialization run
#[derive(Debug, Clone, Default)]
pub struct SerializeOptions {
    /// Paths left out of the content dump
    pub exclusions: ExclusionSet,
    /// Descend into symlinked directories
    pub follow_symlinks: bool,
    /// Separator for rendered paths and directory markers
    pub separator: Separator,
}

/// A file whose content could not be dumped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    /// Path relative to the root, `/` separated
    pub relative: String,
    /// Underlying cause, with its context chain
    pub reason: String,
}

/// Counters and outcome of a finished run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// The written document
    pub output: PathBuf,
    /// Directory lines in the tree listing, root included
    pub directories_listed: usize,
    /// File lines in the tree listing
    pub files_listed: usize,
    /// Content sections written
    pub files_written: usize,
    /// Files visited but excluded from the dump
    pub files_excluded: usize,
    /// Excluded directories whose contents were never visited
    pub directories_pruned: usize,
    /// Files that failed to read
    pub skipped: Vec<SkippedFile>,
    /// Traversal errors (unreadable directories and the like)
    pub walk_errors: usize,
}

/// Serializes one directory tree into `<dirname>.txt` next to it
#[derive(Debug, Clone)]
pub struct TreeSerializer {
    /// Canonical input directory
    root: PathBuf,
    /// Name printed on the first line of the listing
    root_name: String,
    /// Where the document goes
    output_path: PathBuf,
    /// Run settings
    options: SerializeOptions,
}

impl TreeSerializer {
    /// Validates the input directory and resolves the output path.
    /// Nothing on disk is touched.
    ///
    /// The output file and the root line of the listing take the input's own
    /// name, even when it is a symlink; only the traversal follows the link.
    ///
    /// # Errors
    ///
    /// Returns an error if `input` is not an existing directory or has no
    /// usable name (filesystem root).
    pub fn new(input: &Path, options: SerializeOptions) -> Result<Self> {
        if !input.is_dir() {
            anyhow::bail!("The directory '{}' does not exist.", input.display());
        }

        // Named as given (links kept), walked through the resolved path
        let named = document::absolute_input(input)?;
        let output_path = document::output_path_for(&named)?;
        let root_name = named
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let root = input
            .canonicalize()
            .with_context(|| format!("Failed to resolve {}", input.display()))?;

        Ok(Self {
            root,
            root_name,
            output_path,
            options,
        })
    }

    /// Path the document will be written to
    #[must_use]
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Run settings
    #[must_use]
    pub const fn options(&self) -> &SerializeOptions {
        &self.options
    }

    /// Recreates the output document and writes both passes into it.
    ///
    /// Per-file read failures are reported and recorded in the summary; only
    /// failures to create or write the document itself abort the run.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be created or written.
    pub fn run(&self) -> Result<RunSummary> {
        let span = span!(Level::DEBUG, "serialize", root = %self.root.display());
        let _guard = span.enter();

        output::trace_block(&format!(
            "Exclude Paths: [{}]",
            self.options.exclusions.describe()
        ));

        let mut summary = RunSummary::default();
        let mut doc = OutputDocument::create(&self.output_path, self.options.separator)?;

        let walker = TreeWalker::new(&self.root).follow_links(self.options.follow_symlinks);
        listing::write_listing(&walker, &self.root_name, &mut doc, &mut summary)?;
        dump::write_contents(&walker, &self.options.exclusions, &mut doc, &mut summary)?;

        summary.output = doc.finish()?;

        info!(
            files_written = summary.files_written,
            files_excluded = summary.files_excluded,
            skipped = summary.skipped.len(),
            "Serialization complete"
        );

        Ok(summary)
    }
}
