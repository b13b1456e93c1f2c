//! Error types for Ordliste.
//!
//! Library crates use [`OrdlisteError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all Ordliste operations.
#[derive(Debug, thiserror::Error)]
pub enum OrdlisteError {
    /// The word list could not be read or lacks the expected columns.
    #[error("input error in {path:?}: {message}")]
    Input { path: PathBuf, message: String },

    /// The output document could not be written.
    #[error("write error at {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The formatter rejected the produced markup.
    #[error("format error: {message}")]
    Format { message: String },

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error outside the input and output documents.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, OrdlisteError>;

impl OrdlisteError {
    /// Create an input error for the given source file.
    pub fn input(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::Input {
            path: path.into(),
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` raised while writing the output document.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Create a format error from any displayable message.
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format {
            message: msg.into(),
        }
    }

    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = OrdlisteError::format("row 7 has 3 cells, expected 2");
        assert_eq!(err.to_string(), "format error: row 7 has 3 cells, expected 2");

        let err = OrdlisteError::input("wordlist.csv", "missing column `Bokmål`");
        assert!(err.to_string().contains("wordlist.csv"));
        assert!(err.to_string().contains("Bokmål"));
    }

    #[test]
    fn write_error_keeps_io_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory");
        let err = OrdlisteError::write("missing/dictionary.md", io);
        assert!(matches!(err, OrdlisteError::Write { .. }));
        assert!(err.to_string().contains("no such directory"));
    }
}
