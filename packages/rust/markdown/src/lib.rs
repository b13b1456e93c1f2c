//! Canonical Markdown formatting for generated documents.
//!
//! The formatter pass is modelled as a capability: anything implementing
//! [`Formatter`] can rewrite a file in place. [`NativeFormatter`] does it in
//! process, [`CommandFormatter`] delegates to an external tool such as
//! `mdformat`, and [`NoopFormatter`] leaves the file alone.

mod canonical;
mod command;
mod table;

use std::path::Path;

use tracing::{debug, instrument};

use ordliste_shared::{Extension, OrdlisteError, Result};

pub use canonical::format_markdown;
pub use command::CommandFormatter;

// ---------------------------------------------------------------------------
// Formatter capability
// ---------------------------------------------------------------------------

/// Rewrites a Markdown file into canonical form.
///
/// Implementations must be idempotent: formatting an already formatted file
/// leaves its bytes unchanged.
pub trait Formatter {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Format the file at `path` in place with the given dialect extensions.
    fn format_file(&self, path: &Path, extensions: &[Extension]) -> Result<()>;

    /// Report whether `path` is already what this formatter would produce.
    ///
    /// The default formats a scratch copy and compares bytes, leaving the
    /// file itself untouched.
    fn check_file(&self, path: &Path, extensions: &[Extension]) -> Result<bool> {
        let current = read_document(path)?;
        let scratch = std::env::temp_dir().join(format!(
            "ordliste-check-{}.md",
            uuid::Uuid::now_v7()
        ));
        std::fs::write(&scratch, &current).map_err(|e| OrdlisteError::write(&scratch, e))?;

        let formatted = self
            .format_file(&scratch, extensions)
            .and_then(|()| read_document(&scratch));
        std::fs::remove_file(&scratch).ok();

        let formatted = formatted?;
        debug!(formatter = self.name(), path = %path.display(), "checked scratch copy");
        Ok(formatted == current)
    }
}

/// In-process formatter backed by [`format_markdown`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeFormatter;

impl Formatter for NativeFormatter {
    fn name(&self) -> &str {
        "native"
    }

    #[instrument(skip(self, path), fields(path = %path.display()))]
    fn format_file(&self, path: &Path, extensions: &[Extension]) -> Result<()> {
        let original = read_document(path)?;
        let formatted = format_markdown(&original, extensions)?;

        if formatted == original {
            debug!("already canonical");
            return Ok(());
        }

        std::fs::write(path, &formatted).map_err(|e| OrdlisteError::write(path, e))?;
        debug!(
            before = original.len(),
            after = formatted.len(),
            "rewrote document"
        );
        Ok(())
    }

    fn check_file(&self, path: &Path, extensions: &[Extension]) -> Result<bool> {
        check_file(path, extensions)
    }
}

/// Formatter that skips the pass entirely.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFormatter;

impl Formatter for NoopFormatter {
    fn name(&self) -> &str {
        "none"
    }

    fn format_file(&self, path: &Path, _extensions: &[Extension]) -> Result<()> {
        debug!(path = %path.display(), "formatter disabled, leaving file as written");
        Ok(())
    }

    fn check_file(&self, _path: &Path, _extensions: &[Extension]) -> Result<bool> {
        Err(OrdlisteError::config(
            "formatter kind `none` has no canonical form to check against",
        ))
    }
}

/// Report whether the file at `path` is already in the form
/// [`format_markdown`] produces.
#[instrument(skip(path), fields(path = %path.display()))]
pub fn check_file(path: &Path, extensions: &[Extension]) -> Result<bool> {
    let original = read_document(path)?;
    let formatted = format_markdown(&original, extensions)?;
    Ok(formatted == original)
}

fn read_document(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| OrdlisteError::io(path, e))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ordliste-markdown-test-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    const RAW: &str = "\n# Dictionary\n\n## English-Norwegian\n\n| **English**            | **Norwegian**           |\n| ---------------------- | ----------------------- |\n| ant | myre |\n\n";

    #[test]
    fn native_formatter_rewrites_in_place() {
        let dir = temp_dir();
        let path = dir.join("dictionary.md");
        std::fs::write(&path, RAW).unwrap();

        NativeFormatter.format_file(&path, &[Extension::Myst]).unwrap();
        let formatted = std::fs::read_to_string(&path).unwrap();

        assert!(formatted.starts_with("# Dictionary\n"));
        assert!(formatted.contains("| ant         | myre          |"));
        assert!(check_file(&path, &[Extension::Myst]).unwrap());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn native_formatter_is_idempotent_on_disk() {
        let dir = temp_dir();
        let path = dir.join("dictionary.md");
        std::fs::write(&path, RAW).unwrap();

        NativeFormatter.format_file(&path, &[Extension::Myst]).unwrap();
        let once = std::fs::read(&path).unwrap();
        NativeFormatter.format_file(&path, &[Extension::Myst]).unwrap();
        let twice = std::fs::read(&path).unwrap();

        assert_eq!(once, twice);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn failed_format_leaves_file_untouched() {
        let dir = temp_dir();
        let path = dir.join("dictionary.md");
        let broken = "| a | b |\n| --- | --- |\n| a|b | c |\n";
        std::fs::write(&path, broken).unwrap();

        let err = NativeFormatter.format_file(&path, &[Extension::Myst]).unwrap_err();
        assert!(matches!(err, OrdlisteError::Format { .. }));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), broken);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn check_file_detects_unformatted() {
        let dir = temp_dir();
        let path = dir.join("dictionary.md");
        std::fs::write(&path, RAW).unwrap();

        assert!(!check_file(&path, &[Extension::Myst]).unwrap());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn noop_formatter_keeps_bytes() {
        let dir = temp_dir();
        let path = dir.join("dictionary.md");
        std::fs::write(&path, RAW).unwrap();

        NoopFormatter.format_file(&path, &[Extension::Myst]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), RAW);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn noop_formatter_refuses_to_check() {
        let dir = temp_dir();
        let path = dir.join("dictionary.md");
        std::fs::write(&path, RAW).unwrap();

        let err = Formatter::check_file(&NoopFormatter, &path, &[Extension::Myst]).unwrap_err();
        assert!(matches!(err, OrdlisteError::Config { .. }));
        std::fs::remove_dir_all(&dir).ok();
    }

    /// Appends a newline, so nothing it sees is ever a fixed point.
    struct AppendingFormatter;

    impl Formatter for AppendingFormatter {
        fn name(&self) -> &str {
            "appending"
        }

        fn format_file(&self, path: &Path, _extensions: &[Extension]) -> Result<()> {
            let mut text = read_document(path)?;
            text.push('\n');
            std::fs::write(path, text).map_err(|e| OrdlisteError::write(path, e))
        }
    }

    #[test]
    fn default_check_formats_a_scratch_copy() {
        let dir = temp_dir();
        let path = dir.join("dictionary.md");
        std::fs::write(&path, RAW).unwrap();

        assert!(!AppendingFormatter.check_file(&path, &[]).unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), RAW);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn native_check_matches_free_function() {
        let dir = temp_dir();
        let path = dir.join("dictionary.md");
        std::fs::write(&path, RAW).unwrap();

        assert!(!Formatter::check_file(&NativeFormatter, &path, &[Extension::Myst]).unwrap());
        NativeFormatter.format_file(&path, &[Extension::Myst]).unwrap();
        assert!(Formatter::check_file(&NativeFormatter, &path, &[Extension::Myst]).unwrap());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = temp_dir();
        let err = NativeFormatter
            .format_file(&dir.join("absent.md"), &[Extension::Myst])
            .unwrap_err();
        assert!(matches!(err, OrdlisteError::Io { .. }));
        std::fs::remove_dir_all(&dir).ok();
    }
}
