use super::{RunSummary, SkippedFile};
use crate::decode;
use crate::document::OutputDocument;
use crate::exclude::ExclusionSet;
use crate::output;
use crate::walk::{EntryKind, TreeWalker};
use anyhow::Result;
use tracing::{Level, debug, span, warn};

/// Appends one content section per non-excluded file.
///
/// Excluded directories are pruned, so nothing under them is read. A file
/// is read in full before its header is written; a failed read leaves no
/// section behind, is reported, and is recorded in `summary.skipped`.
///
/// # Errors
///
/// Returns an error only if writing to the document fails.
pub fn write_contents(
    walker: &TreeWalker,
    exclusions: &ExclusionSet,
    doc: &mut OutputDocument,
    summary: &mut RunSummary,
) -> Result<()> {
    let span = span!(Level::DEBUG, "dump");
    let _guard = span.enter();

    for item in walker.entries(|entry| exclusions.is_excluded(&entry.relative)) {
        let entry = match item {
            Ok(entry) => entry,
            Err(err) => {
                warn!(error = %err, "Skipping unreadable entry in content dump");
                output::warning(&format!("Warning: {err:#}"));
                summary.walk_errors += 1;
                continue;
            }
        };

        // Silent, even with --debug
        if entry.is_root() || ExclusionSet::is_vcs(&entry.relative) {
            continue;
        }

        let excluded = exclusions.is_excluded(&entry.relative);

        if entry.is_dir() {
            if excluded {
                output::trace(&output::processing_line("Folder", &entry.relative, true));
                summary.directories_pruned += 1;
            }
            continue;
        }

        output::trace(&output::processing_line("File", &entry.relative, excluded));
        if excluded {
            summary.files_excluded += 1;
            continue;
        }

        if entry.kind == EntryKind::Special {
            let reason = "not a regular file".to_string();
            output::error(&format!(
                "Error reading file {}: {reason}",
                entry.path.display()
            ));
            summary.skipped.push(SkippedFile {
                relative: entry.relative,
                reason,
            });
            continue;
        }

        match decode::read_text(&entry.path) {
            Ok(mut content) => {
                decode::ensure_trailing_newline(&mut content);
                doc.write_section(&entry.relative, &content)?;
                debug!(path = %entry.relative, bytes = content.len(), "Wrote section");
                summary.files_written += 1;
            }
            Err(err) => {
                warn!(path = %entry.relative, error = %err, "Failed to read file");
                output::error(&format!(
                    "Error reading file {}: {err:#}",
                    entry.path.display()
                ));
                summary.skipped.push(SkippedFile {
                    relative: entry.relative,
                    reason: format!("{err:#}"),
                });
            }
        }
    }

    Ok(())
}
