//! Word list loading.
//!
//! Reads a CSV file whose header names the English and Norwegian columns and
//! turns every data row into a [`WordRecord`]. Fields are taken verbatim.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info, instrument};

use ordliste_shared::{ColumnNames, OrdlisteError, Result, WordRecord};

/// Load all records from the CSV file at `path`.
#[instrument(skip(path, columns), fields(path = %path.display()))]
pub fn load_records(path: &Path, columns: &ColumnNames) -> Result<Vec<WordRecord>> {
    let file = File::open(path)
        .map_err(|e| OrdlisteError::input(path, format!("cannot open word list: {e}")))?;

    let records = parse_records(file, columns, path)?;
    info!(count = records.len(), "loaded word list");
    Ok(records)
}

/// Parse records from any CSV reader. `origin` labels errors.
pub fn parse_records<R: Read>(
    reader: R,
    columns: &ColumnNames,
    origin: &Path,
) -> Result<Vec<WordRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::None)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| OrdlisteError::input(origin, format!("cannot read header: {e}")))?
        .clone();

    let english = column_index(&headers, &columns.english_column, origin)?;
    let norwegian = column_index(&headers, &columns.norwegian_column, origin)?;
    debug!(english, norwegian, columns = headers.len(), "resolved header columns");

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.map_err(|e| OrdlisteError::input(origin, e.to_string()))?;
        let line = row.position().map_or(0, |p| p.line());

        let field = |idx: usize| {
            row.get(idx).map(str::to_string).ok_or_else(|| {
                OrdlisteError::input(origin, format!("line {line}: missing field {}", idx + 1))
            })
        };

        records.push(WordRecord {
            english: field(english)?,
            norwegian: field(norwegian)?,
        });
    }

    Ok(records)
}

/// Find a header by exact name, ignoring a leading byte-order mark.
fn column_index(headers: &csv::StringRecord, name: &str, origin: &Path) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}') == name)
        .ok_or_else(|| {
            let found: Vec<&str> = headers.iter().collect();
            OrdlisteError::input(
                origin,
                format!("missing column `{name}` (header is {found:?})"),
            )
        })
}
