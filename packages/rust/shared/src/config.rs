//! Application configuration for Ordliste.
//!
//! The project config lives at `ordliste.toml` in the working directory.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{OrdlisteError, Result};
use crate::types::Extension;

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "ordliste.toml";

// ---------------------------------------------------------------------------
// Config structs (matching ordliste.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Word list source.
    #[serde(default)]
    pub input: InputConfig,

    /// Rendered document destination.
    #[serde(default)]
    pub output: OutputConfig,

    /// Fixed text of the document.
    #[serde(default)]
    pub document: DocumentConfig,

    /// Formatter pass settings.
    #[serde(default)]
    pub formatter: FormatterConfig,
}

/// `[input]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Path to the CSV word list.
    #[serde(default = "default_input_path")]
    pub path: PathBuf,

    /// Header names of the two term columns.
    #[serde(flatten)]
    pub columns: ColumnNames,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: default_input_path(),
            columns: ColumnNames::default(),
        }
    }
}

fn default_input_path() -> PathBuf {
    PathBuf::from("wordlist.csv")
}

/// Header names used to locate the English and Norwegian columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnNames {
    #[serde(default = "default_english_column")]
    pub english_column: String,

    #[serde(default = "default_norwegian_column")]
    pub norwegian_column: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            english_column: default_english_column(),
            norwegian_column: default_norwegian_column(),
        }
    }
}

fn default_english_column() -> String {
    "Engelsk".into()
}
fn default_norwegian_column() -> String {
    "Bokmål".into()
}

/// `[output]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Path of the generated Markdown document.
    #[serde(default = "default_output_path")]
    pub path: PathBuf,

    /// Escape `|` in term values so every record stays one table row.
    #[serde(default = "default_true")]
    pub escape_delimiters: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            escape_delimiters: true,
        }
    }
}

fn default_output_path() -> PathBuf {
    PathBuf::from("book/docs/info/dictionary.md")
}
fn default_true() -> bool {
    true
}

/// `[document]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// Top-level heading.
    #[serde(default = "default_title")]
    pub title: String,

    /// Paragraph under the heading.
    #[serde(default = "default_intro")]
    pub intro: String,

    /// Address readers can send new words to.
    #[serde(default = "default_contact_email")]
    pub contact_email: String,

    /// Subject line pre-filled in the `mailto:` link.
    #[serde(default = "default_contact_subject")]
    pub contact_subject: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            intro: default_intro(),
            contact_email: default_contact_email(),
            contact_subject: default_contact_subject(),
        }
    }
}

fn default_title() -> String {
    "Dictionary".into()
}
fn default_intro() -> String {
    "Here you will find norwegian (bokmål) and english translations of common words used in this course".into()
}
fn default_contact_email() -> String {
    "henriknf@simula.no".into()
}
fn default_contact_subject() -> String {
    "Ordliste-IN1910".into()
}

/// Which formatter runs after the document is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatterKind {
    /// Built-in canonicalizer.
    #[default]
    Native,
    /// External program such as `mdformat`.
    Command,
    /// Skip the formatter pass.
    None,
}

impl std::str::FromStr for FormatterKind {
    type Err = OrdlisteError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "native" => Ok(Self::Native),
            "command" => Ok(Self::Command),
            "none" => Ok(Self::None),
            other => Err(OrdlisteError::config(format!(
                "unknown formatter kind '{other}': expected native, command or none"
            ))),
        }
    }
}

/// `[formatter]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatterConfig {
    #[serde(default)]
    pub kind: FormatterKind,

    /// Program run when `kind = "command"`.
    #[serde(default = "default_command")]
    pub command: String,

    /// Extra arguments passed before the extensions and the file path.
    #[serde(default)]
    pub args: Vec<String>,

    /// Dialect extensions to enable.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<Extension>,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            kind: FormatterKind::default(),
            command: default_command(),
            args: Vec::new(),
            extensions: default_extensions(),
        }
    }
}

fn default_command() -> String {
    "mdformat".into()
}
fn default_extensions() -> Vec<Extension> {
    vec![Extension::Myst]
}

// ---------------------------------------------------------------------------
// Build config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime build configuration, merged from config file + CLI flags.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// CSV word list to read.
    pub input: PathBuf,
    /// Markdown document to write.
    pub output: PathBuf,
    /// Column header names.
    pub columns: ColumnNames,
    /// Escape table delimiters inside term values.
    pub escape_delimiters: bool,
    /// Fixed document text.
    pub document: DocumentConfig,
    /// Extensions handed to the formatter pass.
    pub extensions: Vec<Extension>,
}

impl From<&AppConfig> for BuildConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            input: config.input.path.clone(),
            output: config.output.path.clone(),
            columns: config.input.columns.clone(),
            escape_delimiters: config.output.escape_delimiters,
            document: config.document.clone(),
            extensions: config.formatter.extensions.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Path to the project config file (`./ordliste.toml`).
pub fn config_file_path() -> PathBuf {
    PathBuf::from(CONFIG_FILE_NAME)
}

/// Load the project config. Returns defaults if the file does not exist.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(config_file_path);

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| OrdlisteError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        OrdlisteError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Write a default config file at `path`. Refuses to overwrite an existing file.
pub fn init_config(path: &Path) -> Result<PathBuf> {
    if path.exists() {
        return Err(OrdlisteError::config(format!(
            "{} already exists",
            path.display()
        )));
    }

    let content = toml::to_string_pretty(&AppConfig::default())
        .map_err(|e| OrdlisteError::config(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| OrdlisteError::io(path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path.to_path_buf())
}
