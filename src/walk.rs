use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// What a traversal entry refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Directory, or a symlink to one when links are not followed
    Directory,
    /// Regular file, or a symlink to one
    File,
    /// Sockets, fifos, devices and dangling links
    Special,
}

/// One item yielded by [`TreeWalker::entries`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    /// Path on disk (root joined with the relative path)
    pub path: PathBuf,
    /// Path relative to the root in canonical `/` form, empty for the root
    pub relative: String,
    /// Final component of the path
    pub name: String,
    /// Number of separators between the root and this entry (root is 0)
    pub depth: usize,
    /// Entry type
    pub kind: EntryKind,
}

impl WalkEntry {
    /// True for directories (including unfollowed directory symlinks)
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// True for the traversal root itself
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.depth == 0
    }
}

/// Lazy depth-first traversal of a directory tree.
///
/// Every directory is yielded before its contents; inside a directory, files
/// come first and subdirectories after them. The relative order inside each
/// group is whatever the filesystem returns, so output is only as stable as
/// the underlying `readdir` order.
#[derive(Debug, Clone)]
pub struct TreeWalker {
    /// Directory the traversal starts from
    root: PathBuf,
    /// Whether to descend into symlinked directories
    follow_links: bool,
}

impl TreeWalker {
    /// Creates a walker rooted at `root`
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            follow_links: false,
        }
    }

    /// Sets whether symlinked directories are descended into
    #[must_use]
    pub const fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Iterates the tree, skipping the contents of every directory for which
    /// `prune` returns true. Pruned directories are still yielded themselves,
    /// so callers can report them; their contents are never yielded.
    ///
    /// Errors (unreadable directories, link loops when following links) are
    /// yielded in place and the traversal continues.
    pub fn entries<P>(&self, prune: P) -> Entries<P>
    where
        P: FnMut(&WalkEntry) -> bool,
    {
        let inner = WalkDir::new(&self.root)
            .follow_links(self.follow_links)
            .sort_by(|a, b| is_dir_like(a).cmp(&is_dir_like(b)))
            .into_iter();

        Entries {
            inner,
            root: self.root.clone(),
            prune,
        }
    }
}

/// Iterator returned by [`TreeWalker::entries`]
pub struct Entries<P> {
    /// Underlying walkdir iterator
    inner: walkdir::IntoIter,
    /// Root used to compute relative paths
    root: PathBuf,
    /// Predicate deciding which directories are not descended into
    prune: P,
}

impl<P> Iterator for Entries<P>
where
    P: FnMut(&WalkEntry) -> bool,
{
    type Item = Result<WalkEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        let dir_entry = match self.inner.next()? {
            Ok(dir_entry) => dir_entry,
            Err(err) => {
                let location = err
                    .path()
                    .unwrap_or(self.root.as_path())
                    .display()
                    .to_string();
                return Some(
                    Err(anyhow::Error::new(err))
                        .with_context(|| format!("Failed to read {location}")),
                );
            }
        };

        let entry = to_walk_entry(&self.root, &dir_entry);
        if entry.is_dir() && !entry.is_root() && (self.prune)(&entry) {
            // Unfollowed links were never pushed; skipping would pop the parent
            if dir_entry.file_type().is_dir() {
                self.inner.skip_current_dir();
            }
        }
        Some(Ok(entry))
    }
}

fn is_dir_like(entry: &walkdir::DirEntry) -> bool {
    entry.file_type().is_dir() || (entry.path_is_symlink() && entry.path().is_dir())
}

fn classify(entry: &walkdir::DirEntry) -> EntryKind {
    let file_type = entry.file_type();
    if file_type.is_dir() {
        EntryKind::Directory
    } else if file_type.is_file() {
        EntryKind::File
    } else if file_type.is_symlink() {
        // Unfollowed link: report what it points at
        let path = entry.path();
        if path.is_dir() {
            EntryKind::Directory
        } else if path.is_file() {
            EntryKind::File
        } else {
            EntryKind::Special
        }
    } else {
        EntryKind::Special
    }
}

fn to_walk_entry(root: &Path, entry: &walkdir::DirEntry) -> WalkEntry {
    let relative = relative_path(root, entry.path());
    WalkEntry {
        path: entry.path().to_path_buf(),
        name: entry.file_name().to_string_lossy().into_owned(),
        relative,
        depth: entry.depth(),
        kind: classify(entry),
    }
}

/// Renders `path` relative to `root` using `/` between components.
#[must_use]
pub fn relative_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
