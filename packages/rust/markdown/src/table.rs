//! Pipe-table parsing and column alignment.
//!
//! A table is a header row, a delimiter row of dash cells, and zero or more
//! data rows. Rendering pads every column to its widest cell so the output
//! is stable under repeated formatting.

use std::sync::LazyLock;

use regex::Regex;
use unicode_width::UnicodeWidthStr;

use ordliste_shared::{OrdlisteError, Result};

/// Narrowest column a delimiter row can express with alignment markers.
const MIN_COLUMN_WIDTH: usize = 3;

/// Column alignment, taken from the delimiter row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Align {
    None,
    Left,
    Right,
    Center,
}

/// A parsed pipe table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Table {
    pub header: Vec<String>,
    pub aligns: Vec<Align>,
    pub rows: Vec<Vec<String>>,
}

/// Whether `header` followed by `delimiter` opens a table.
pub(crate) fn starts_table(header: &str, delimiter: &str) -> bool {
    if !header.trim_start().starts_with('|') {
        return false;
    }
    match parse_delimiter_row(delimiter) {
        Some(aligns) => aligns.len() == split_cells(header).len(),
        None => false,
    }
}

/// Whether a line can continue an open table.
pub(crate) fn is_table_row(line: &str) -> bool {
    line.trim_start().starts_with('|')
}

/// Parse table lines. Each entry is `(line_number, text)`.
///
/// The first two lines must satisfy [`starts_table`]. Data rows must have the
/// same number of cells as the header.
pub(crate) fn parse_table(lines: &[(usize, &str)]) -> Result<Table> {
    let [(_, header_line), (delim_no, delim_line), rest @ ..] = lines else {
        return Err(OrdlisteError::format("table needs a header and a delimiter row"));
    };

    let header = split_cells(header_line);
    let aligns = parse_delimiter_row(delim_line).ok_or_else(|| {
        OrdlisteError::format(format!("line {delim_no}: invalid table delimiter row"))
    })?;

    let mut rows = Vec::with_capacity(rest.len());
    for (line_no, line) in rest {
        let cells = split_cells(line);
        if cells.len() != header.len() {
            return Err(OrdlisteError::format(format!(
                "line {line_no}: table row has {} cells, expected {}: {}",
                cells.len(),
                header.len(),
                line.trim()
            )));
        }
        rows.push(cells);
    }

    Ok(Table {
        header,
        aligns,
        rows,
    })
}

/// Render a table with every column padded to its widest cell.
pub(crate) fn render_table(table: &Table) -> String {
    let widths: Vec<usize> = (0..table.header.len())
        .map(|col| {
            std::iter::once(&table.header)
                .chain(table.rows.iter())
                .map(|row| display_width(&row[col]))
                .max()
                .unwrap_or(0)
                .max(MIN_COLUMN_WIDTH)
        })
        .collect();

    let mut lines = Vec::with_capacity(table.rows.len() + 2);
    lines.push(render_row(&table.header, &table.aligns, &widths));
    lines.push(render_delimiter(&table.aligns, &widths));
    for row in &table.rows {
        lines.push(render_row(row, &table.aligns, &widths));
    }

    lines.join("\n")
}

// ---------------------------------------------------------------------------
// Cell splitting
// ---------------------------------------------------------------------------

/// Split a row into trimmed cells on unescaped `|`.
///
/// The optional leading and trailing pipes do not produce cells. A backslash
/// always pairs with the next character, so `\|` is cell text while `\\|`
/// is a literal backslash followed by a cell boundary. Cell text is kept
/// verbatim, escapes included.
pub(crate) fn split_cells(line: &str) -> Vec<String> {
    let line = line.trim();
    let body = line.strip_prefix('|').unwrap_or(line);

    let mut cells = Vec::new();
    let mut current = String::new();
    let mut ended_on_pipe = false;
    let mut chars = body.chars();

    while let Some(ch) = chars.next() {
        ended_on_pipe = false;
        match ch {
            '\\' => {
                current.push(ch);
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            '|' => {
                cells.push(current.trim().to_string());
                current.clear();
                ended_on_pipe = true;
            }
            _ => current.push(ch),
        }
    }

    if !ended_on_pipe {
        cells.push(current.trim().to_string());
    }

    cells
}

fn parse_delimiter_row(line: &str) -> Option<Vec<Align>> {
    static DELIM_CELL_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^(:?)-+(:?)$").expect("valid regex"));

    if !line.trim_start().starts_with('|') {
        return None;
    }

    split_cells(line)
        .iter()
        .map(|cell| {
            let caps = DELIM_CELL_RE.captures(cell)?;
            let align = match (!caps[1].is_empty(), !caps[2].is_empty()) {
                (true, true) => Align::Center,
                (true, false) => Align::Left,
                (false, true) => Align::Right,
                (false, false) => Align::None,
            };
            Some(align)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Rendering helpers
// ---------------------------------------------------------------------------

/// Terminal columns the cell occupies. Combining marks take none, wide
/// characters take two.
fn display_width(cell: &str) -> usize {
    UnicodeWidthStr::width(cell)
}

fn render_row(cells: &[String], aligns: &[Align], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(aligns)
        .zip(widths)
        .map(|((cell, align), width)| pad(cell, *align, *width))
        .collect();
    format!("| {} |", padded.join(" | "))
}

fn render_delimiter(aligns: &[Align], widths: &[usize]) -> String {
    let cells: Vec<String> = aligns
        .iter()
        .zip(widths)
        .map(|(align, width)| match align {
            Align::None => "-".repeat(*width),
            Align::Left => format!(":{}", "-".repeat(width - 1)),
            Align::Right => format!("{}:", "-".repeat(width - 1)),
            Align::Center => format!(":{}:", "-".repeat(width - 2)),
        })
        .collect();
    format!("| {} |", cells.join(" | "))
}

fn pad(cell: &str, align: Align, width: usize) -> String {
    let fill = width.saturating_sub(display_width(cell));
    match align {
        Align::None | Align::Left => format!("{cell}{}", " ".repeat(fill)),
        Align::Right => format!("{}{cell}", " ".repeat(fill)),
        Align::Center => {
            let left = fill / 2;
            format!("{}{cell}{}", " ".repeat(left), " ".repeat(fill - left))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered<'a>(lines: &[&'a str]) -> Vec<(usize, &'a str)> {
        lines.iter().enumerate().map(|(i, l)| (i + 1, *l)).collect()
    }

    #[test]
    fn split_cells_strips_outer_pipes() {
        assert_eq!(split_cells("| ant | myre |"), vec!["ant", "myre"]);
        assert_eq!(split_cells("ant | myre"), vec!["ant", "myre"]);
        assert_eq!(split_cells("| a |  |"), vec!["a", ""]);
    }

    #[test]
    fn split_cells_keeps_escaped_pipe() {
        assert_eq!(split_cells(r"| a\|b | c |"), vec![r"a\|b", "c"]);
        assert_eq!(split_cells(r"| a \|"), vec![r"a \|"]);
        assert_eq!(split_cells(r"| a\\\|b | c |"), vec![r"a\\\|b", "c"]);
    }

    #[test]
    fn split_cells_pairs_backslash_with_next_char() {
        assert_eq!(split_cells(r"| a\\|b |"), vec![r"a\\", "b"]);
        assert_eq!(split_cells(r"| a\ | b |"), vec![r"a\", "b"]);
    }

    #[test]
    fn starts_table_requires_matching_delimiter() {
        assert!(starts_table("| a | b |", "| --- | :-: |"));
        assert!(!starts_table("| a | b |", "| --- |"));
        assert!(!starts_table("| a | b |", "| a | b |"));
        assert!(!starts_table("a | b", "| --- | --- |"));
    }

    #[test]
    fn render_pads_columns_to_widest_cell() {
        let lines = numbered(&[
            "| **English** | **Norwegian** |",
            "| --- | --- |",
            "| ant | myre |",
            "| dog | hund |",
        ]);
        let table = parse_table(&lines).unwrap();
        assert_eq!(
            render_table(&table),
            "| **English** | **Norwegian** |\n\
             | ----------- | ------------- |\n\
             | ant         | myre          |\n\
             | dog         | hund          |"
        );
    }

    #[test]
    fn render_pads_by_display_width() {
        let lines = numbered(&[
            "| a | b |",
            "|-|-|",
            "| bla\u{30A}bær | x |",
            "| blåbær | y |",
            "| 辞書 | z |",
        ]);
        let table = parse_table(&lines).unwrap();
        assert_eq!(
            render_table(&table),
            "| a      | b   |\n\
             | ------ | --- |\n\
             | bla\u{30A}bær | x   |\n\
             | blåbær | y   |\n\
             | 辞書   | z   |"
        );
    }

    #[test]
    fn render_counts_columns_not_bytes() {
        let lines = numbered(&["| a | b |", "|-|-|", "| blåbær | x |"]);
        let table = parse_table(&lines).unwrap();
        let rendered = render_table(&table);
        assert!(rendered.contains("| blåbær | x   |"));
        assert!(rendered.contains("| ------ | --- |"));
    }

    #[test]
    fn render_preserves_alignment_markers() {
        let lines = numbered(&["| l | c | r |", "| :- | :-: | -: |", "| x | y | z |"]);
        let table = parse_table(&lines).unwrap();
        assert_eq!(
            render_table(&table),
            "| l   |  c  |   r |\n| :-- | :-: | --: |\n| x   |  y  |   z |"
        );
    }

    #[test]
    fn header_only_table_renders() {
        let lines = numbered(&["| **Norwegian** | **English** |", "| --- | --- |"]);
        let table = parse_table(&lines).unwrap();
        assert!(table.rows.is_empty());
        assert_eq!(render_table(&table).lines().count(), 2);
    }

    #[test]
    fn rendering_is_stable() {
        let lines = numbered(&["| a | bb |", "| - | :-: |", "| ccc | d |"]);
        let once = render_table(&parse_table(&lines).unwrap());
        let relines: Vec<&str> = once.lines().collect();
        let twice = render_table(&parse_table(&numbered(&relines)).unwrap());
        assert_eq!(once, twice);
    }

    #[test]
    fn row_with_extra_cell_is_rejected() {
        let lines = numbered(&["| a | b |", "| --- | --- |", "| a|b | c |"]);
        let err = parse_table(&lines).unwrap_err();
        assert!(matches!(err, OrdlisteError::Format { .. }));
        assert!(err.to_string().contains("line 3"));
        assert!(err.to_string().contains("3 cells, expected 2"));
    }
}
