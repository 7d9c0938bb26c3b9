//! Word export.

use std::io::Cursor;

use docx_rs::{
    Docx, LineSpacing, Paragraph, Pic, Run, Style, StyleType, Table, TableCell, TableRow,
    WidthType,
};

use crate::render::assets::Logo;
use crate::render::document::{ExportDocument, SectionBody};
use crate::render::table::ParsedTable;
use crate::render::ExportError;

const HEADING_STYLE: &str = "Heading1";
/// 1 px at 96 dpi in English Metric Units.
const EMU_PER_PX: u32 = 9525;
const LOGO_WIDTH_PX: u32 = 150;
const LOGO_HEIGHT_PX: u32 = 50;
const LOGO_SPACING_AFTER_TWIPS: u32 = 400;
/// Table widths are given in fiftieths of a percent.
const FULL_WIDTH_PCT: usize = 5000;

/// Renders `document` as a packed .docx.
pub fn render_docx(document: &ExportDocument, logo: &Logo) -> Result<Vec<u8>, ExportError> {
    let mut buf = Cursor::new(Vec::new());
    build_docx(document, logo)
        .build()
        .pack(&mut buf)
        .map_err(|e| ExportError::Docx(e.to_string()))?;
    Ok(buf.into_inner())
}

fn build_docx(document: &ExportDocument, logo: &Logo) -> Docx {
    let heading = Style::new(HEADING_STYLE, StyleType::Paragraph)
        .name("Heading 1")
        .size(32)
        .bold();

    let logo_paragraph = Paragraph::new()
        .add_run(Run::new().add_image(
            Pic::new(&logo.bytes).size(LOGO_WIDTH_PX * EMU_PER_PX, LOGO_HEIGHT_PX * EMU_PER_PX),
        ))
        .line_spacing(LineSpacing::new().after(LOGO_SPACING_AFTER_TWIPS));

    let mut docx = Docx::new().add_style(heading).add_paragraph(logo_paragraph);

    for section in &document.sections {
        docx = docx.add_paragraph(
            Paragraph::new()
                .add_run(Run::new().add_text(section.title))
                .style(HEADING_STYLE),
        );
        docx = match &section.body {
            SectionBody::Lines(lines) => lines
                .iter()
                .fold(docx, |docx, line| docx.add_paragraph(text_paragraph(line))),
            SectionBody::Table(table) => docx.add_table(build_table(table)),
        };
    }

    docx
}

fn text_paragraph(text: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text))
}

fn build_table(table: &ParsedTable) -> Table {
    let cell_width = FULL_WIDTH_PCT / table.column_count().max(1);
    let cell = |text: &str| {
        TableCell::new()
            .add_paragraph(text_paragraph(text))
            .width(cell_width, WidthType::Pct)
    };

    let mut rows = vec![TableRow::new(
        table.headers.iter().map(|h| cell(h.as_str())).collect(),
    )];
    rows.extend(
        table
            .aligned_rows()
            .iter()
            .map(|row| TableRow::new(row.iter().map(|c| cell(c.as_str())).collect())),
    );

    Table::new(rows).width(FULL_WIDTH_PCT, WidthType::Pct)
}
