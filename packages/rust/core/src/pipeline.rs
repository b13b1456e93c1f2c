//! End-to-end `build` pipeline: CSV → sort → render → assemble → write → format.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{info, instrument};

use ordliste_markdown::{CommandFormatter, Formatter, NativeFormatter, NoopFormatter};
use ordliste_shared::{BuildConfig, FormatterConfig, FormatterKind, Result, WordRecord};

use crate::document;
use crate::loader;
use crate::render::{self, EscapePolicy, SortKey};
use crate::writer;

/// Result of a successful build.
#[derive(Debug)]
pub struct BuildResult {
    /// Path of the written document.
    pub output: PathBuf,
    /// Number of word pairs loaded (each appears once per table).
    pub record_count: usize,
    /// Name of the formatter that ran.
    pub formatter: String,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Pick the formatter described by the `[formatter]` config section.
pub fn formatter_for(config: &FormatterConfig) -> Box<dyn Formatter> {
    match config.kind {
        FormatterKind::Native => Box::new(NativeFormatter),
        FormatterKind::Command => Box::new(CommandFormatter::new(
            config.command.clone(),
            config.args.clone(),
        )),
        FormatterKind::None => Box::new(NoopFormatter),
    }
}

/// Render both directional tables and assemble the unformatted document.
pub fn render_document(records: &[WordRecord], config: &BuildConfig) -> String {
    let policy = EscapePolicy::from_flag(config.escape_delimiters);
    let english = render::render_rows(records, SortKey::English, policy);
    let norwegian = render::render_rows(records, SortKey::Norwegian, policy);
    document::assemble(&config.document, &english, &norwegian)
}

/// Run the full build.
///
/// 1. Load the word list
/// 2. Render the English-sorted and Norwegian-sorted tables
/// 3. Assemble and write the document
/// 4. Run the formatter pass on the written file
///
/// Any failure aborts the run. If only the formatter fails, the document is
/// left on disk as written.
#[instrument(skip_all, fields(input = %config.input.display(), output = %config.output.display()))]
pub fn build_dictionary(config: &BuildConfig, formatter: &dyn Formatter) -> Result<BuildResult> {
    let start = Instant::now();
    info!("starting dictionary build");

    let records = loader::load_records(&config.input, &config.columns)?;
    let text = render_document(&records, config);
    writer::write_document(&config.output, &text)?;

    info!(formatter = formatter.name(), extensions = ?config.extensions, "running formatter pass");
    formatter.format_file(&config.output, &config.extensions)?;

    let result = BuildResult {
        output: config.output.clone(),
        record_count: records.len(),
        formatter: formatter.name().to_string(),
        elapsed: start.elapsed(),
    };

    info!(
        records = result.record_count,
        elapsed_ms = result.elapsed.as_millis() as u64,
        "dictionary build complete"
    );

    Ok(result)
}
