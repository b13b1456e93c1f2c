//! Core domain types for the dictionary builder.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// WordRecord
// ---------------------------------------------------------------------------

/// One English/Norwegian term pair from the word list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WordRecord {
    /// The English term.
    pub english: String,
    /// The Norwegian (bokmål) term.
    pub norwegian: String,
}

impl WordRecord {
    pub fn new(english: impl Into<String>, norwegian: impl Into<String>) -> Self {
        Self {
            english: english.into(),
            norwegian: norwegian.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Extension
// ---------------------------------------------------------------------------

/// Markdown dialect extensions understood by the formatter pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extension {
    /// GFM pipe tables.
    Tables,
    /// MyST directives and callouts. Includes pipe tables.
    Myst,
}

impl Extension {
    /// Name used on an external formatter's command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tables => "tables",
            Self::Myst => "myst",
        }
    }

    /// Whether the given set enables pipe-table normalization.
    pub fn tables_enabled(extensions: &[Extension]) -> bool {
        extensions
            .iter()
            .any(|e| matches!(e, Self::Tables | Self::Myst))
    }

    /// Whether the given set enables MyST directive checks.
    pub fn myst_enabled(extensions: &[Extension]) -> bool {
        extensions.contains(&Self::Myst)
    }
}

impl std::fmt::Display for Extension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn myst_implies_tables() {
        assert!(Extension::tables_enabled(&[Extension::Myst]));
        assert!(Extension::tables_enabled(&[Extension::Tables]));
        assert!(!Extension::tables_enabled(&[]));
        assert!(!Extension::myst_enabled(&[Extension::Tables]));
    }

    #[test]
    fn extension_serde_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            extensions: Vec<Extension>,
        }

        let parsed: Wrapper = toml::from_str(r#"extensions = ["myst", "tables"]"#).unwrap();
        assert_eq!(parsed.extensions, vec![Extension::Myst, Extension::Tables]);
        assert_eq!(Extension::Myst.to_string(), "myst");
    }
}
