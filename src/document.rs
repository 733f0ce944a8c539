//! The output document: one text file, written through a single owned handle.
//!
//! Layout:
//!
//! ```text
//!
//! ********** BELOW IS THE FILE AND FOLDER STRUCTURE OF THE CODEBASE **********
//!
//! proj\
//!     a.txt
//!     sub\
//!         b.txt
//!
//! ********** BELOW IS THE CONTENT OF FILE: \a.txt **********
//!
//! hi
//! ```

use anyhow::{Context, Result};
use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

/// Banner opening the tree listing
pub const STRUCTURE_BANNER: &str =
    "********** BELOW IS THE FILE AND FOLDER STRUCTURE OF THE CODEBASE **********";

/// Text before the path in a content section header
pub const SECTION_PREFIX: &str = "********** BELOW IS THE CONTENT OF FILE: ";

/// Text after the path in a content section header
pub const SECTION_SUFFIX: &str = " **********";

/// Spaces per depth level in the tree listing
pub const INDENT_WIDTH: usize = 4;

/// Separator used when rendering paths into the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Separator {
    /// `\`
    #[default]
    Backslash,
    /// `/`
    Slash,
}

impl Separator {
    /// The separator character
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Backslash => '\\',
            Self::Slash => '/',
        }
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Separator {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "\\" => Ok(Self::Backslash),
            "/" => Ok(Self::Slash),
            other => Err(anyhow::anyhow!(
                "Invalid separator '{other}': expected '\\' or '/'"
            )),
        }
    }
}

/// Renders a canonical relative path (`a/b.txt`) with a leading marker and
/// the chosen separator (`\a\b.txt`).
#[must_use]
pub fn render_path(relative: &str, separator: Separator) -> String {
    let sep = separator.as_char();
    let mut rendered = String::with_capacity(relative.len() + 1);
    rendered.push(sep);
    rendered.extend(relative.chars().map(|c| if c == '/' { sep } else { c }));
    rendered
}

/// Full header line for a content section, without the newline.
#[must_use]
pub fn section_header(relative: &str, separator: Separator) -> String {
    format!(
        "{SECTION_PREFIX}{}{SECTION_SUFFIX}",
        render_path(relative, separator)
    )
}

/// Makes `input` absolute and folds `.` and `..` components lexically.
///
/// Symlinks are left alone, so a linked directory keeps the name it was
/// given on the command line. Trailing separators disappear with the
/// component split.
///
/// # Errors
///
/// Returns an error if the current directory cannot be determined.
pub fn absolute_input(input: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(input)
        .with_context(|| format!("Failed to resolve {}", input.display()))?;

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    Ok(normalized)
}

/// Derives `<parent>/<dirname>.txt` from an input directory made absolute
/// with [`absolute_input`].
///
/// # Errors
///
/// Returns an error if the directory has no name (filesystem root).
pub fn output_path_for(root: &Path) -> Result<PathBuf> {
    let name = root.file_name().with_context(|| {
        format!(
            "Cannot derive an output file name from '{}'",
            root.display()
        )
    })?;
    let mut file_name = name.to_os_string();
    file_name.push(".txt");

    Ok(root
        .parent()
        .map_or_else(|| PathBuf::from(&file_name), |parent| parent.join(&file_name)))
}

/// Append-only text document owned for the duration of one run
pub struct OutputDocument {
    /// Where the document lives
    path: PathBuf,
    /// The only handle to the file
    writer: BufWriter<File>,
    /// Separator used for rendered paths and directory markers
    separator: Separator,
}

impl OutputDocument {
    /// Removes any previous document at `path` and creates an empty one.
    ///
    /// # Errors
    ///
    /// Returns an error if the old file cannot be removed or the new one
    /// cannot be created.
    pub fn create(path: &Path, separator: Separator) -> Result<Self> {
        if path.exists() {
            fs::remove_file(path)
                .with_context(|| format!("Failed to remove previous output {}", path.display()))?;
        }

        let file = File::create(path)
            .with_context(|| format!("Failed to create output file {}", path.display()))?;

        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            separator,
        })
    }

    /// Writes the blank-line framed structure banner.
    ///
    /// # Errors
    ///
    /// Returns an error on write failure.
    pub fn write_structure_banner(&mut self) -> Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "{STRUCTURE_BANNER}")?;
        writeln!(self.writer)?;
        Ok(())
    }

    /// Writes a directory line: `indent(depth) + name + marker`.
    ///
    /// # Errors
    ///
    /// Returns an error on write failure.
    pub fn write_directory_line(&mut self, name: &str, depth: usize) -> Result<()> {
        writeln!(
            self.writer,
            "{}{name}{}",
            indent(depth),
            self.separator.as_char()
        )?;
        Ok(())
    }

    /// Writes a file line one level deeper than its directory.
    ///
    /// # Errors
    ///
    /// Returns an error on write failure.
    pub fn write_file_line(&mut self, name: &str, parent_depth: usize) -> Result<()> {
        writeln!(self.writer, "{}{name}", indent(parent_depth + 1))?;
        Ok(())
    }

    /// Appends one content section and flushes it to disk, so an interrupted
    /// run leaves a document ending on a section boundary.
    ///
    /// `content` must already be newline terminated.
    ///
    /// # Errors
    ///
    /// Returns an error on write or flush failure.
    pub fn write_section(&mut self, relative: &str, content: &str) -> Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", section_header(relative, self.separator))?;
        writeln!(self.writer)?;
        self.writer.write_all(content.as_bytes())?;
        self.writer
            .flush()
            .with_context(|| format!("Failed to flush {}", self.path.display()))?;
        Ok(())
    }

    /// Flushes buffered output and closes the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the final flush fails.
    pub fn finish(mut self) -> Result<PathBuf> {
        self.writer
            .flush()
            .with_context(|| format!("Failed to flush {}", self.path.display()))?;
        Ok(self.path)
    }
}

fn indent(depth: usize) -> String {
    " ".repeat(INDENT_WIDTH * depth)
}
