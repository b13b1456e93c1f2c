//! Output document writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, instrument};

use ordliste_shared::{OrdlisteError, Result};

/// Create or truncate `path` and write `text` to it.
///
/// The parent directory must already exist. The file handle is dropped on
/// every return path; a successful return means the buffer was flushed.
#[instrument(skip(path, text), fields(path = %path.display(), bytes = text.len()))]
pub fn write_document(path: &Path, text: &str) -> Result<()> {
    let file = File::create(path).map_err(|e| OrdlisteError::write(path, e))?;
    let mut writer = BufWriter::new(file);

    writer
        .write_all(text.as_bytes())
        .map_err(|e| OrdlisteError::write(path, e))?;
    writer.flush().map_err(|e| OrdlisteError::write(path, e))?;

    debug!("document written");
    Ok(())
}
