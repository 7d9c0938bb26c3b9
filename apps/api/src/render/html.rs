//! Inline HTML view of an analysis result.
//!
//! Only the change-documentation section is ever turned into a `<table>`; every
//! other section, and a documentation section without an extractable table,
//! is shown as pre-wrapped text so line breaks survive.

use html_escape::encode_text;
use serde::Deserialize;

use crate::models::analysis::AnalysisResult;
use crate::render::document::{ANALYSIS_TITLE, DOCUMENTATION_TITLE, REVISION_TITLE};
use crate::render::table::{extract_table, MissingSeparator, ParsedTable};

/// View state supplied by the caller rather than read from ambient storage.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ViewOptions {
    #[serde(default)]
    pub dark_mode: bool,
}

struct Palette {
    section_bg: &'static str,
    title_bg: &'static str,
    body_bg: &'static str,
    text: &'static str,
    table_bg: &'static str,
    header_bg: &'static str,
    border: &'static str,
}

static LIGHT: Palette = Palette {
    section_bg: "#f5f5f5",
    title_bg: "#e0e0e0",
    body_bg: "#ffffff",
    text: "#333",
    table_bg: "#ffffff",
    header_bg: "#f5f5f5",
    border: "#ddd",
};

static DARK: Palette = Palette {
    section_bg: "#333",
    title_bg: "#444",
    body_bg: "#222",
    text: "#fff",
    table_bg: "#333",
    header_bg: "#444",
    border: "#666",
};

impl ViewOptions {
    fn palette(&self) -> &'static Palette {
        if self.dark_mode {
            &DARK
        } else {
            &LIGHT
        }
    }
}

/// Renders every non-empty section of `result`, in fixed order.
pub fn render_result_html(
    result: &AnalysisResult,
    options: ViewOptions,
    policy: MissingSeparator,
) -> String {
    [
        (ANALYSIS_TITLE, &result.analysis),
        (REVISION_TITLE, &result.revision),
        (DOCUMENTATION_TITLE, &result.documentation),
    ]
    .into_iter()
    .filter(|(_, content)| !content.is_empty())
    .map(|(title, content)| render_section_html(title, content, options, policy))
    .collect::<Vec<_>>()
    .join("\n")
}

/// Renders one titled section.
pub fn render_section_html(
    title: &str,
    content: &str,
    options: ViewOptions,
    policy: MissingSeparator,
) -> String {
    let p = options.palette();

    let table = if is_documentation_title(title) {
        extract_table(content, policy)
    } else {
        None
    };

    let body = match table {
        Some(table) => render_table_html(&table, p),
        None => encode_text(content).into_owned(),
    };

    format!(
        "<section class=\"response-section\" style=\"width: 100%; margin: 1rem auto; \
         background-color: {section_bg}; border-radius: 4px; overflow: hidden;\">\n\
         <div class=\"response-section-title\" style=\"background-color: {title_bg}; \
         color: {text}; text-align: left; padding: 1rem 1.5rem;\">{title}</div>\n\
         <div class=\"response-section-body\" style=\"padding: 1.5rem; white-space: pre-wrap; \
         background-color: {body_bg}; color: {text};\">{body}</div>\n\
         </section>",
        section_bg = p.section_bg,
        title_bg = p.title_bg,
        body_bg = p.body_bg,
        text = p.text,
        title = encode_text(title),
        body = body,
    )
}

fn is_documentation_title(title: &str) -> bool {
    title.to_lowercase().contains("change documentation")
}

fn render_table_html(table: &ParsedTable, p: &Palette) -> String {
    let th_style = format!(
        "background-color: {}; color: {}; padding: 12px; border-bottom: 2px solid {}; \
         border-right: 1px solid {}; text-align: left; font-weight: bold;",
        p.header_bg, p.text, p.border, p.border
    );
    let td_style = format!(
        "padding: 12px; border-bottom: 1px solid {}; border-right: 1px solid {}; color: {};",
        p.border, p.border, p.text
    );

    let mut html = format!(
        "<table style=\"width: 100%; border-collapse: collapse; margin-top: 1rem; \
         background-color: {}; border: 1px solid {};\">\n<thead>\n<tr>",
        p.table_bg, p.border
    );
    for header in &table.headers {
        html.push_str(&format!(
            "<th style=\"{th_style}\">{}</th>",
            encode_text(header)
        ));
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    for row in table.aligned_rows() {
        html.push_str("<tr>");
        for cell in &row {
            html.push_str(&format!(
                "<td style=\"{td_style}\">{}</td>",
                encode_text(cell)
            ));
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>");
    html
}
