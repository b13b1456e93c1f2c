//! Dictionary document assembly.
//!
//! Pure string building: an intro fragment followed by the English-Norwegian
//! and Norwegian-English table sections, in that order.

use ordliste_shared::DocumentConfig;

use crate::render::SortKey;

/// Delimiter row used by both table skeletons before formatting.
const DELIMITER_ROW: &str = "| ---------------------- | ----------------------- |";

/// Assemble the full document from pre-rendered table rows.
pub fn assemble(doc: &DocumentConfig, english_rows: &str, norwegian_rows: &str) -> String {
    let mut text = intro(doc);
    text.push_str(&table_section(SortKey::English, english_rows));
    text.push_str(&table_section(SortKey::Norwegian, norwegian_rows));
    text
}

/// Title, intro paragraph and the MyST `note` callout with the contact link.
fn intro(doc: &DocumentConfig) -> String {
    let email = &doc.contact_email;
    format!(
        "\n# {title}\n\n{intro}\n\n```{{note}}\n\
         If you find a word that you want to add to the dictionary please send an email to \
         [{email}](mailto:{email}?subject={subject})\n```\n",
        title = doc.title,
        intro = doc.intro,
        subject = doc.contact_subject,
    )
}

/// Heading, column header, delimiter row and the given rows.
fn table_section(key: SortKey, rows: &str) -> String {
    let (source, target) = key.column_titles();
    format!(
        "\n## {heading}\n\n| {source:<22} | {target:<23} |\n{DELIMITER_ROW}\n{rows}\n",
        heading = key.heading(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headings(text: &str) -> Vec<&str> {
        text.lines().filter(|l| l.starts_with('#')).collect()
    }

    #[test]
    fn sections_in_fixed_order() {
        let text = assemble(&DocumentConfig::default(), "| a | b |\n", "| b | a |\n");
        assert_eq!(
            headings(&text),
            vec!["# Dictionary", "## English-Norwegian", "## Norwegian-English"]
        );
        let eng = text.find("| a | b |").unwrap();
        let nor = text.find("| b | a |").unwrap();
        assert!(eng < nor);
    }

    #[test]
    fn intro_contains_contact_callout() {
        let text = assemble(&DocumentConfig::default(), "", "");
        assert!(text.contains("```{note}\nIf you find a word"));
        assert!(text.contains(
            "[henriknf@simula.no](mailto:henriknf@simula.no?subject=Ordliste-IN1910)"
        ));
        assert!(text.contains("common words used in this course"));
    }

    #[test]
    fn column_headers_follow_direction() {
        let text = assemble(&DocumentConfig::default(), "", "");
        let eng = text.find("| **English**            | **Norwegian**           |");
        let nor = text.find("| **Norwegian**          | **English**             |");
        assert!(eng.is_some());
        assert!(nor.is_some());
        assert!(eng < nor);
    }

    #[test]
    fn empty_tables_have_header_and_delimiter_only() {
        let text = assemble(&DocumentConfig::default(), "", "");
        let table_lines: Vec<&str> = text.lines().filter(|l| l.starts_with('|')).collect();
        assert_eq!(table_lines.len(), 4);
        assert_eq!(text.matches(DELIMITER_ROW).count(), 2);
    }

    #[test]
    fn custom_document_text() {
        let doc = DocumentConfig {
            title: "Ordliste".into(),
            intro: "Ord fra kurset".into(),
            contact_email: "kurs@example.no".into(),
            contact_subject: "Nytt-ord".into(),
        };
        let text = assemble(&doc, "", "");
        assert!(text.starts_with("\n# Ordliste\n\nOrd fra kurset\n"));
        assert!(text.contains("mailto:kurs@example.no?subject=Nytt-ord"));
    }
}
