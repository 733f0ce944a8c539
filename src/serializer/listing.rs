use super::RunSummary;
use crate::document::OutputDocument;
use crate::exclude::ExclusionSet;
use crate::output;
use crate::walk::{TreeWalker, WalkEntry};
use crate::VCS_DIR;
use anyhow::Result;
use tracing::{Level, debug, span, warn};

/// Writes the structure banner and the indented tree.
///
/// The root line carries `root_name`; every other directory prints its own
/// name followed by the separator marker, and files sit one level deeper
/// than their directory. Only version-control folders are pruned, at any
/// depth, along with a `.git` file at the root.
///
/// # Errors
///
/// Returns an error if writing to the document fails. Traversal errors are
/// reported and counted instead.
pub fn write_listing(
    walker: &TreeWalker,
    root_name: &str,
    doc: &mut OutputDocument,
    summary: &mut RunSummary,
) -> Result<()> {
    let span = span!(Level::DEBUG, "listing");
    let _guard = span.enter();

    doc.write_structure_banner()?;

    for item in walker.entries(is_vcs_entry) {
        let entry = match item {
            Ok(entry) => entry,
            Err(err) => {
                warn!(error = %err, "Skipping unreadable entry in listing");
                output::warning(&format!("Warning: {err:#}"));
                summary.walk_errors += 1;
                continue;
            }
        };

        if entry.is_root() {
            doc.write_directory_line(root_name, 0)?;
            summary.directories_listed += 1;
            continue;
        }

        if is_vcs_entry(&entry) {
            continue;
        }

        debug!(path = %entry.relative, depth = entry.depth, "Listing entry");
        if entry.is_dir() {
            doc.write_directory_line(&entry.name, entry.depth)?;
            summary.directories_listed += 1;
        } else {
            doc.write_file_line(&entry.name, entry.depth - 1)?;
            summary.files_listed += 1;
        }
    }

    Ok(())
}

/// `.git` folders anywhere in the tree, or the root's `.git` entry
fn is_vcs_entry(entry: &WalkEntry) -> bool {
    (entry.is_dir() && entry.name == VCS_DIR) || ExclusionSet::is_vcs(&entry.relative)
}
