//! Pipe-table extraction shared by every render target.
//!
//! The documentation stage is asked for a table, but what comes back is free
//! text that usually *contains* one:
//!
//! ```text
//! Here are the changes:
//!
//! | Section | Original | Updated |
//! |---------|----------|---------|
//! | Title   | Old      | New     |
//! ```
//!
//! # Extraction rules
//! 1. Blank lines are discarded; indices below refer to the remaining lines.
//! 2. The header is the first line containing `|`. No such line → no table.
//! 3. Cells = split on `|`, trim, drop empty strings.
//! 4. Data starts on the line after the first line containing `---`.
//! 5. Every line from there on that contains `|` is a data row.
//! 6. Rows are kept as parsed; `aligned_rows` reconciles them with the header.
//!
//! When no separator line exists the data start index is `0`. What happens
//! next is a [`MissingSeparator`] policy decision.

use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// What to do when a table has no `---` separator line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingSeparator {
    /// Data rows start after the header line.
    #[default]
    AfterHeader,
    /// Data rows are scanned from the first line again, so the header line is
    /// also emitted as a data row.
    Rescan,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown missing-separator policy '{0}'")]
pub struct UnknownPolicy(pub String);

impl FromStr for MissingSeparator {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "after-header" | "after_header" => Ok(MissingSeparator::AfterHeader),
            "rescan" => Ok(MissingSeparator::Rescan),
            other => Err(UnknownPolicy(other.to_string())),
        }
    }
}

/// Header/row structure recovered from a pipe table. Derived and ephemeral:
/// recomputed from the source text on every render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ParsedTable {
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Rows padded with empty cells or truncated to exactly `column_count()` cells.
    pub fn aligned_rows(&self) -> Vec<Vec<String>> {
        let width = self.column_count();
        self.rows
            .iter()
            .map(|row| {
                let mut cells: Vec<String> = row.iter().take(width).cloned().collect();
                cells.resize(width, String::new());
                cells
            })
            .collect()
    }
}

/// Non-blank lines of `text`, untrimmed.
pub fn content_lines(text: &str) -> Vec<&str> {
    text.lines().filter(|line| !line.trim().is_empty()).collect()
}

/// Splits a table line into trimmed, non-empty cells.
pub fn split_cells(line: &str) -> Vec<String> {
    line.split('|')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(str::to_string)
        .collect()
}

/// Index of the line after the first separator line, or `0` when there is none.
pub fn data_start_index(lines: &[&str]) -> usize {
    lines
        .iter()
        .position(|line| line.contains("---"))
        .map_or(0, |i| i + 1)
}

/// Extracts the first pipe table in `text`, or `None` when the text should be
/// shown as plain text instead.
pub fn extract_table(text: &str, policy: MissingSeparator) -> Option<ParsedTable> {
    let lines = content_lines(text);

    let header_index = lines.iter().position(|line| line.contains('|'))?;
    let headers = split_cells(lines[header_index]);
    if headers.is_empty() {
        // A line of bare pipes gives nothing to lay columns out against.
        return None;
    }

    let has_separator = lines.iter().any(|line| line.contains("---"));
    let start = match (has_separator, policy) {
        (true, _) | (false, MissingSeparator::Rescan) => data_start_index(&lines),
        (false, MissingSeparator::AfterHeader) => header_index + 1,
    };

    let rows = lines
        .iter()
        .skip(start)
        .filter(|line| line.contains('|'))
        .map(|line| split_cells(line))
        .collect();

    Some(ParsedTable { headers, rows })
}
