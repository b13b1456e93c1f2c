//! Shared types, error model, and configuration for Ordliste.
//!
//! This crate is the foundation depended on by all other Ordliste crates.
//! It provides:
//! - [`OrdlisteError`], the unified error type
//! - Domain types ([`WordRecord`], [`Extension`])
//! - Configuration ([`AppConfig`], [`BuildConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, BuildConfig, CONFIG_FILE_NAME, ColumnNames, DocumentConfig, FormatterConfig,
    FormatterKind, InputConfig, OutputConfig, config_file_path, init_config, load_config,
    load_config_from,
};
pub use error::{OrdlisteError, Result};
pub use types::{Extension, WordRecord};
