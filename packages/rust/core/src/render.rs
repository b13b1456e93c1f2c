//! Directional table rendering.
//!
//! Each table is the record list sorted by one language, rendered as pipe
//! table rows with that language in the first column.

use std::borrow::Cow;
use std::fmt::Write;

use ordliste_shared::WordRecord;

/// Which field a table is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    English,
    Norwegian,
}

impl SortKey {
    /// The field this key sorts on.
    pub fn field<'a>(&self, record: &'a WordRecord) -> &'a str {
        match self {
            Self::English => &record.english,
            Self::Norwegian => &record.norwegian,
        }
    }

    /// `(source, target)` cells of a row.
    pub fn cells<'a>(&self, record: &'a WordRecord) -> (&'a str, &'a str) {
        match self {
            Self::English => (&record.english, &record.norwegian),
            Self::Norwegian => (&record.norwegian, &record.english),
        }
    }

    /// Section heading for the table.
    pub fn heading(&self) -> &'static str {
        match self {
            Self::English => "English-Norwegian",
            Self::Norwegian => "Norwegian-English",
        }
    }

    /// Bold column titles, source first.
    pub fn column_titles(&self) -> (&'static str, &'static str) {
        match self {
            Self::English => ("**English**", "**Norwegian**"),
            Self::Norwegian => ("**Norwegian**", "**English**"),
        }
    }
}

/// How term values containing table syntax are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EscapePolicy {
    /// `|` becomes `\|`, backslashes directly before a `|` are doubled, and
    /// line breaks become spaces.
    #[default]
    Escape,
    /// Values are written verbatim; a `|` breaks the row.
    Raw,
}

impl EscapePolicy {
    pub fn from_flag(escape: bool) -> Self {
        if escape { Self::Escape } else { Self::Raw }
    }
}

/// Stable ascending sort on the raw string value of the selected field.
pub fn sorted_by(records: &[WordRecord], key: SortKey) -> Vec<&WordRecord> {
    let mut sorted: Vec<&WordRecord> = records.iter().collect();
    sorted.sort_by(|a, b| key.field(a).cmp(key.field(b)));
    sorted
}

/// Render one `| source | target |` line per record, in sorted order.
pub fn render_rows(records: &[WordRecord], key: SortKey, policy: EscapePolicy) -> String {
    let mut out = String::new();
    for record in sorted_by(records, key) {
        let (source, target) = key.cells(record);
        // Writing to a String cannot fail.
        let _ = writeln!(
            out,
            "| {} | {} |",
            escape_cell(source, policy),
            escape_cell(target, policy)
        );
    }
    out
}

fn escape_cell(value: &str, policy: EscapePolicy) -> Cow<'_, str> {
    match policy {
        EscapePolicy::Raw => Cow::Borrowed(value),
        EscapePolicy::Escape if !value.contains(['|', '\n', '\r']) => Cow::Borrowed(value),
        EscapePolicy::Escape => {
            let flat = value.replace("\r\n", " ").replace(['\n', '\r'], " ");
            Cow::Owned(escape_pipes(&flat))
        }
    }
}

/// Escape every `|` so it stays inside its cell once the row is split.
///
/// A run of backslashes right before a pipe would otherwise pair up with the
/// pipe's own escape, so each of them gets a partner first.
fn escape_pipes(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 4);
    let mut backslashes = 0;
    for ch in value.chars() {
        match ch {
            '\\' => backslashes += 1,
            '|' => {
                out.extend(std::iter::repeat_n('\\', backslashes + 1));
                backslashes = 0;
            }
            _ => backslashes = 0,
        }
        out.push(ch);
    }
    out
}
