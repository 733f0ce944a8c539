use anyhow::{Context, Result};
use memmap2::MmapOptions;
use std::borrow::Cow;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Files at or above this size are memory mapped instead of read into a buffer
pub const MMAP_THRESHOLD: u64 = 1_048_576;

/// Decodes bytes as UTF-8, dropping any invalid sequences.
///
/// Valid input is borrowed after a SIMD validation pass; only input with
/// invalid bytes is copied.
#[must_use]
pub fn decode_lossy(bytes: &[u8]) -> Cow<'_, str> {
    if let Ok(text) = simdutf8::basic::from_utf8(bytes) {
        return Cow::Borrowed(text);
    }

    let mut text = String::with_capacity(bytes.len());
    let mut dropped = 0usize;
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
        dropped += chunk.invalid().len();
    }
    debug!(dropped, "Dropped invalid UTF-8 bytes");
    Cow::Owned(text)
}

/// Reads a file and decodes it with [`decode_lossy`].
///
/// # Errors
///
/// Returns an error if the file cannot be opened, stat'ed, mapped or read.
pub fn read_text(path: &Path) -> Result<String> {
    let mut file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let len = file
        .metadata()
        .with_context(|| format!("Failed to read metadata for {}", path.display()))?
        .len();

    if len >= MMAP_THRESHOLD {
        // SAFETY: read-only map, dropped before returning
        let mmap = unsafe { MmapOptions::new().map(&file) }
            .with_context(|| format!("Failed to map {}", path.display()))?;
        return Ok(decode_lossy(&mmap).into_owned());
    }

    let mut bytes = Vec::with_capacity(usize::try_from(len).unwrap_or_default());
    file.read_to_end(&mut bytes)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(decode_lossy(&bytes).into_owned())
}

/// Appends `\n` unless the text already ends with one.
///
/// Line endings are kept as written, so a file ending in a bare `\r` still
/// gets a `\n` after it.
pub fn ensure_trailing_newline(text: &mut String) {
    if !text.ends_with('\n') {
        text.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_valid_utf8_is_borrowed() {
        let decoded = decode_lossy("héllo wörld".as_bytes());
        assert!(matches!(decoded, Cow::Borrowed(_)));
        assert_eq!(decoded, "héllo wörld");
    }

    #[test]
    fn test_invalid_bytes_are_dropped() {
        let bytes = [b'a', 0xFF, b'b', 0xC3, b'c', 0xE2, 0x82];
        assert_eq!(decode_lossy(&bytes), "abc");
    }

    #[test]
    fn test_only_invalid_bytes() {
        assert_eq!(decode_lossy(&[0xFF, 0xFE, 0x00]), "\0");
        assert_eq!(decode_lossy(&[0xFF, 0xFE]), "");
    }

    #[test]
    fn test_trailing_newline() {
        let mut text = String::from("hi");
        ensure_trailing_newline(&mut text);
        assert_eq!(text, "hi\n");

        ensure_trailing_newline(&mut text);
        assert_eq!(text, "hi\n");

        let mut carriage = String::from("a\rb\r");
        ensure_trailing_newline(&mut carriage);
        assert_eq!(carriage, "a\rb\r\n");

        let mut empty = String::new();
        ensure_trailing_newline(&mut empty);
        assert_eq!(empty, "\n");
    }

    #[test]
    fn test_read_text_small_file() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(b"line one\n\xFFline two")?;

        assert_eq!(read_text(file.path())?, "line one\nline two");
        Ok(())
    }

    #[test]
    fn test_read_text_mapped_file() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        let line = "x".repeat(1023) + "\n";
        for _ in 0..1100 {
            file.write_all(line.as_bytes())?;
        }
        file.flush()?;

        let text = read_text(file.path())?;
        assert_eq!(text.len(), 1024 * 1100);
        assert!(text.ends_with("x\n"));
        Ok(())
    }

    #[test]
    fn test_read_text_missing_file() {
        let err = read_text(Path::new("/nonexistent/codetext/file.txt")).unwrap_err();
        assert!(err.to_string().contains("Failed to open"));
    }
}
