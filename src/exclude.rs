//! Exclusion entries and prefix-segment matching.
//!
//! Entries are plain relative paths. `\` and `/` are both accepted on input and
//! stored in the canonical `/` form with no leading or trailing separator. A
//! candidate path is excluded when it equals an entry or starts with
//! `entry + "/"`, so excluding `src` leaves `src2` and `src-backup` alone.
//!
//! The version-control folder at the root is tracked apart from user entries:
//! it is always excluded and never reported.

use std::fmt;

use crate::VCS_DIR;

/// Canonical separator used for every relative path inside the crate.
pub const SEPARATOR: char = '/';

/// Reasons an exclusion entry is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExcludeError {
    /// Nothing left after stripping separators
    Empty(String),
    /// Contains a `.` or `..` segment
    RelativeSegment(String),
    /// Starts with a drive or UNC prefix such as `C:`
    DrivePrefix(String),
}

impl fmt::Display for ExcludeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty(raw) => write!(
                f,
                "Invalid exclude path '{raw}': path is empty after normalization"
            ),
            Self::RelativeSegment(raw) => write!(
                f,
                "Invalid exclude path '{raw}': '.' and '..' segments are not allowed, \
                 use a path relative to the codebase root"
            ),
            Self::DrivePrefix(raw) => write!(
                f,
                "Invalid exclude path '{raw}': absolute paths are not allowed, \
                 use a path relative to the codebase root"
            ),
        }
    }
}

impl std::error::Error for ExcludeError {}

/// Converts both separator styles to `/`, collapses repeats and strips
/// leading and trailing separators.
#[must_use]
pub fn normalize(path: &str) -> String {
    path.split(['/', '\\'])
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Normalizes and validates one user-supplied entry.
///
/// # Errors
///
/// Returns an [`ExcludeError`] when the entry is empty, walks out of the
/// root with `.`/`..`, or carries a drive prefix.
pub fn parse_entry(raw: &str) -> Result<String, ExcludeError> {
    let normalized = normalize(raw);

    if normalized.is_empty() {
        return Err(ExcludeError::Empty(raw.to_string()));
    }

    if raw.starts_with("\\\\") || has_drive_prefix(&normalized) {
        return Err(ExcludeError::DrivePrefix(raw.to_string()));
    }

    if normalized
        .split(SEPARATOR)
        .any(|segment| segment == "." || segment == "..")
    {
        return Err(ExcludeError::RelativeSegment(raw.to_string()));
    }

    Ok(normalized)
}

fn has_drive_prefix(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// True when `path` is `entry` itself or lies underneath it.
#[must_use]
pub fn matches_entry(path: &str, entry: &str) -> bool {
    path.strip_prefix(entry)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(SEPARATOR))
}

/// Immutable set of exclusion entries built once per run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    /// Normalized user entries, first occurrence order, no duplicates
    entries: Vec<String>,
}

impl ExclusionSet {
    /// Creates an empty set (only the version-control folder is excluded).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Builds a set from raw entries, validating every one of them.
    ///
    /// # Errors
    ///
    /// Returns the first [`ExcludeError`] encountered.
    pub fn from_entries<I, S>(raw: I) -> Result<Self, ExcludeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for item in raw {
            let entry = parse_entry(item.as_ref())?;
            if !set.entries.contains(&entry) {
                set.entries.push(entry);
            }
        }
        Ok(set)
    }

    /// User entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// True when no user entries were given.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True for the root version-control folder and anything inside it.
    #[must_use]
    pub fn is_vcs(path: &str) -> bool {
        matches_entry(path, VCS_DIR)
    }

    /// Decides whether a normalized relative path is excluded.
    ///
    /// The version-control folder counts as excluded; callers that must stay
    /// silent about it check [`ExclusionSet::is_vcs`] first.
    #[must_use]
    pub fn is_excluded(&self, path: &str) -> bool {
        Self::is_vcs(path) || self.entries.iter().any(|entry| matches_entry(path, entry))
    }

    /// Renders the effective list the way `--debug` reports it:
    /// version-control folder first, then user entries.
    #[must_use]
    pub fn describe(&self) -> String {
        std::iter::once(VCS_DIR)
            .chain(self.entries.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_mixed_separators() {
        assert_eq!(normalize("\\src\\utils/"), "src/utils");
        assert_eq!(normalize("//a///b//"), "a/b");
        assert_eq!(normalize("file.txt"), "file.txt");
        assert_eq!(normalize("///"), "");
    }

    #[test]
    fn test_prefix_segment_boundary() {
        let set = ExclusionSet::from_entries(["src"]).unwrap();

        assert!(set.is_excluded("src"));
        assert!(set.is_excluded("src/main.rs"));
        assert!(set.is_excluded("src/deep/nested/file.rs"));
        assert!(!set.is_excluded("src2"));
        assert!(!set.is_excluded("src-backup/main.rs"));
        assert!(!set.is_excluded("lib/src"));
    }

    #[test]
    fn test_file_entry_is_exact() {
        let set = ExclusionSet::from_entries(["docs/readme.md"]).unwrap();

        assert!(set.is_excluded("docs/readme.md"));
        assert!(!set.is_excluded("docs/readme.md.bak"));
        assert!(!set.is_excluded("docs"));
    }

    #[test]
    fn test_duplicates_collapse() {
        let set = ExclusionSet::from_entries(["build", "/build/", "build\\"]).unwrap();
        assert_eq!(set.entries(), ["build".to_string()]);
    }

    #[test]
    fn test_vcs_always_excluded() {
        let set = ExclusionSet::new();

        assert!(set.is_empty());
        assert!(set.is_excluded(".git"));
        assert!(set.is_excluded(".git/HEAD"));
        assert!(!set.is_excluded(".github/workflows/ci.yml"));
        assert!(!set.is_excluded("vendor/.git"));
    }

    #[test]
    fn test_rejects_malformed_entries() {
        assert!(matches!(parse_entry(""), Err(ExcludeError::Empty(_))));
        assert!(matches!(parse_entry("/"), Err(ExcludeError::Empty(_))));
        assert!(matches!(
            parse_entry("../outside"),
            Err(ExcludeError::RelativeSegment(_))
        ));
        assert!(matches!(
            parse_entry("a/./b"),
            Err(ExcludeError::RelativeSegment(_))
        ));
        assert!(matches!(
            parse_entry("C:\\code\\proj"),
            Err(ExcludeError::DrivePrefix(_))
        ));
        assert!(matches!(
            parse_entry("\\\\server\\share"),
            Err(ExcludeError::DrivePrefix(_))
        ));
    }

    #[test]
    fn test_leading_separator_accepted() {
        assert_eq!(parse_entry("\\src\\main.rs").unwrap(), "src/main.rs");
        assert_eq!(parse_entry("/target").unwrap(), "target");
    }

    #[test]
    fn test_describe_lists_vcs_first() {
        let set = ExclusionSet::from_entries(["target", "node_modules"]).unwrap();
        assert_eq!(set.describe(), ".git, target, node_modules");
        assert_eq!(ExclusionSet::new().describe(), ".git");
    }

    #[test]
    fn test_error_message_names_entry() {
        let err = parse_entry("../x").unwrap_err();
        assert!(err.to_string().contains("'../x'"));
    }
}
