//! Canonical Markdown rendering.
//!
//! The document is split into blocks (headings, fences, tables, paragraphs),
//! each block is normalized on its own, and the blocks are joined with a
//! single blank line. Output of [`format_markdown`] is a fixed point: feeding
//! it back in yields the same bytes.

use std::sync::LazyLock;

use regex::Regex;

use ordliste_shared::{Extension, OrdlisteError, Result};

use crate::table;

/// A top-level Markdown block, borrowing its lines from the source.
#[derive(Debug, PartialEq, Eq)]
enum Block<'a> {
    Heading { level: usize, text: &'a str },
    Fence { lines: Vec<&'a str> },
    Table { lines: Vec<(usize, &'a str)> },
    Paragraph { lines: Vec<&'a str> },
}

/// Rewrite Markdown into its canonical form.
pub fn format_markdown(md: &str, extensions: &[Extension]) -> Result<String> {
    let text = normalize_line_endings(md);
    let blocks = split_blocks(&text, extensions)?;

    let rendered = blocks
        .iter()
        .map(render_block)
        .collect::<Result<Vec<_>>>()?;

    if rendered.is_empty() {
        return Ok(String::new());
    }

    Ok(format!("{}\n", rendered.join("\n\n")))
}

// ---------------------------------------------------------------------------
// Pass 1: Line endings
// ---------------------------------------------------------------------------

fn normalize_line_endings(md: &str) -> String {
    md.replace("\r\n", "\n").replace('\r', "\n")
}

// ---------------------------------------------------------------------------
// Pass 2: Block splitting
// ---------------------------------------------------------------------------

fn split_blocks<'a>(text: &'a str, extensions: &[Extension]) -> Result<Vec<Block<'a>>> {
    let tables = Extension::tables_enabled(extensions);
    let myst = Extension::myst_enabled(extensions);

    let lines: Vec<&str> = text.lines().collect();
    let mut blocks = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if line.trim().is_empty() {
            flush_paragraph(&mut paragraph, &mut blocks);
            i += 1;
            continue;
        }

        if let Some(fence) = fence_opener(line) {
            flush_paragraph(&mut paragraph, &mut blocks);
            if myst {
                check_directive(fence.info, i + 1)?;
            }
            let end = find_fence_close(&lines, i, &fence)?;
            blocks.push(Block::Fence {
                lines: lines[i..=end].to_vec(),
            });
            i = end + 1;
            continue;
        }

        if let Some((level, text)) = parse_heading(line) {
            flush_paragraph(&mut paragraph, &mut blocks);
            blocks.push(Block::Heading { level, text });
            i += 1;
            continue;
        }

        if tables && i + 1 < lines.len() && table::starts_table(line, lines[i + 1]) {
            flush_paragraph(&mut paragraph, &mut blocks);
            let mut rows = vec![(i + 1, line), (i + 2, lines[i + 1])];
            i += 2;
            while i < lines.len() && table::is_table_row(lines[i]) {
                rows.push((i + 1, lines[i]));
                i += 1;
            }
            blocks.push(Block::Table { lines: rows });
            continue;
        }

        paragraph.push(line);
        i += 1;
    }

    flush_paragraph(&mut paragraph, &mut blocks);
    Ok(blocks)
}

fn flush_paragraph<'a>(paragraph: &mut Vec<&'a str>, blocks: &mut Vec<Block<'a>>) {
    if !paragraph.is_empty() {
        blocks.push(Block::Paragraph {
            lines: std::mem::take(paragraph),
        });
    }
}

// ---------------------------------------------------------------------------
// Headings
// ---------------------------------------------------------------------------

/// Parse an ATX heading into its level and trimmed text.
fn parse_heading(line: &str) -> Option<(usize, &str)> {
    static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^ {0,3}(#{1,6})(?:[ \t]+(.*?))?[ \t]*$").expect("valid regex")
    });

    let caps = HEADING_RE.captures(line)?;
    let level = caps.get(1)?.as_str().len();
    let text = caps.get(2).map_or("", |m| m.as_str());

    Some((level, strip_closing_hashes(text)))
}

/// Drop an optional closing `###` sequence.
fn strip_closing_hashes(text: &str) -> &str {
    let without = text.trim_end_matches('#');
    if without.len() == text.len() {
        return text;
    }
    if without.is_empty() {
        return without;
    }
    if without.ends_with([' ', '\t']) {
        without.trim_end()
    } else {
        text
    }
}

// ---------------------------------------------------------------------------
// Fences
// ---------------------------------------------------------------------------

struct FenceOpener<'a> {
    marker: char,
    len: usize,
    info: &'a str,
}

fn fence_opener(line: &str) -> Option<FenceOpener<'_>> {
    static FENCE_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^ {0,3}(`{3,}|~{3,})(.*)$").expect("valid regex"));

    let caps = FENCE_RE.captures(line)?;
    let run = caps.get(1)?.as_str();
    let info = caps.get(2).map_or("", |m| m.as_str()).trim();
    let marker = run.chars().next()?;

    // Backtick fences cannot carry backticks in their info string.
    if marker == '`' && info.contains('`') {
        return None;
    }

    Some(FenceOpener {
        marker,
        len: run.len(),
        info,
    })
}

fn find_fence_close(lines: &[&str], open: usize, fence: &FenceOpener<'_>) -> Result<usize> {
    for (offset, line) in lines[open + 1..].iter().enumerate() {
        let trimmed = line.trim();
        let run = trimmed.chars().take_while(|c| *c == fence.marker).count();
        if run >= fence.len && run == trimmed.chars().count() {
            return Ok(open + 1 + offset);
        }
    }

    Err(OrdlisteError::format(format!(
        "line {}: unclosed code fence",
        open + 1
    )))
}

/// Validate a MyST directive fence such as ```` ```{note} ````.
fn check_directive(info: &str, line_no: usize) -> Result<()> {
    static DIRECTIVE_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^\{[A-Za-z0-9_-]+\}").expect("valid regex"));

    if info.starts_with('{') && !DIRECTIVE_RE.is_match(info) {
        return Err(OrdlisteError::format(format!(
            "line {line_no}: malformed directive `{info}`"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Pass 3: Block rendering
// ---------------------------------------------------------------------------

fn render_block(block: &Block<'_>) -> Result<String> {
    match block {
        Block::Heading { level, text } if text.is_empty() => Ok("#".repeat(*level)),
        Block::Heading { level, text } => Ok(format!("{} {text}", "#".repeat(*level))),
        Block::Fence { lines } => Ok(lines.join("\n")),
        Block::Table { lines } => table::parse_table(lines).map(|t| table::render_table(&t)),
        Block::Paragraph { lines } => Ok(lines
            .iter()
            .map(|line| line.trim_end())
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
