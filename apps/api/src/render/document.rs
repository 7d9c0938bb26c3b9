//! The export document: what goes into a .docx or .pdf, independent of format.

use crate::models::analysis::AnalysisResult;
use crate::render::table::{extract_table, MissingSeparator, ParsedTable};

pub const ANALYSIS_TITLE: &str = "1. Analysis";
pub const REVISION_TITLE: &str = "2. Revised Job Description";
pub const DOCUMENTATION_TITLE: &str = "3. Change Documentation";

pub const EXPORT_BASENAME: &str = "job-description-analysis";

#[derive(Debug, Clone, PartialEq)]
pub enum SectionBody {
    /// One entry per source line; blank lines kept as empty strings.
    Lines(Vec<String>),
    Table(ParsedTable),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSection {
    pub title: &'static str,
    pub body: SectionBody,
}

/// Always exactly three sections, in fixed order.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportDocument {
    pub sections: Vec<DocumentSection>,
}

impl ExportDocument {
    pub fn from_result(result: &AnalysisResult, policy: MissingSeparator) -> Self {
        let documentation = match extract_table(&result.documentation, policy) {
            Some(table) => SectionBody::Table(table),
            None => SectionBody::Lines(split_lines(&result.documentation)),
        };

        Self {
            sections: vec![
                DocumentSection {
                    title: ANALYSIS_TITLE,
                    body: SectionBody::Lines(split_lines(&result.analysis)),
                },
                DocumentSection {
                    title: REVISION_TITLE,
                    body: SectionBody::Lines(split_lines(&result.revision)),
                },
                DocumentSection {
                    title: DOCUMENTATION_TITLE,
                    body: documentation,
                },
            ],
        }
    }
}

/// Splits on `\n` keeping blank lines; a trailing `\r` is dropped from each line.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(documentation: &str) -> AnalysisResult {
        AnalysisResult {
            analysis: "Strengths\n\nWeaknesses".to_string(),
            revision: "Position Summary\r\nDuties".to_string(),
            documentation: documentation.to_string(),
        }
    }

    #[test]
    fn test_three_fixed_sections_in_order() {
        let doc = ExportDocument::from_result(&result("a | b\n---\n1 | 2"), MissingSeparator::default());
        let titles: Vec<&str> = doc.sections.iter().map(|s| s.title).collect();
        assert_eq!(titles, vec![ANALYSIS_TITLE, REVISION_TITLE, DOCUMENTATION_TITLE]);
    }

    #[test]
    fn test_blank_lines_preserved_and_crlf_stripped() {
        let doc = ExportDocument::from_result(&result(""), MissingSeparator::default());
        assert_eq!(
            doc.sections[0].body,
            SectionBody::Lines(vec!["Strengths".into(), "".into(), "Weaknesses".into()])
        );
        assert_eq!(
            doc.sections[1].body,
            SectionBody::Lines(vec!["Position Summary".into(), "Duties".into()])
        );
    }

    #[test]
    fn test_documentation_table_when_extractable() {
        let doc = ExportDocument::from_result(
            &result("Section | Original | Updated\n---|---|---\nTitle | Old Title | New Title"),
            MissingSeparator::default(),
        );
        match &doc.sections[2].body {
            SectionBody::Table(table) => {
                assert_eq!(table.column_count(), 3);
                assert_eq!(table.rows.len(), 1);
            }
            other => panic!("expected table, got {other:?}"),
        }
    }

    #[test]
    fn test_documentation_falls_back_to_lines() {
        let doc = ExportDocument::from_result(&result("No table\nat all"), MissingSeparator::default());
        assert_eq!(
            doc.sections[2].body,
            SectionBody::Lines(vec!["No table".into(), "at all".into()])
        );
    }
}
