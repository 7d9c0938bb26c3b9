//! PDF export.
//!
//! Two phases: [`layout_document`] turns the export document into positioned
//! marks per page (pure, testable), and [`render_pdf`] paints those marks with
//! printpdf's builtin Times faces.
//!
//! Vertical rhythm (mm): logo 20 tall with a 30 advance, headings 8 per line
//! plus 5, body lines 7, 10 between sections. The change-documentation
//! section always starts on a new page; its heading advances 20.

use printpdf::image_crate::DynamicImage;
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument, PdfLayerReference,
    Rect,
};

use crate::layout::{wrap_text, Block, FlowLayout, FontFace, LaidOutPage, Mark, PageGeometry};
use crate::render::assets::Logo;
use crate::render::document::{ExportDocument, SectionBody, DOCUMENTATION_TITLE};
use crate::render::table::ParsedTable;
use crate::render::ExportError;

const BODY_PT: f32 = 12.0;
const HEADING_PT: f32 = 14.0;

const LOGO_WIDTH_MM: f32 = 50.0;
const LOGO_HEIGHT_MM: f32 = 20.0;
const LOGO_ADVANCE_MM: f32 = 30.0;

const HEADING_LINE_MM: f32 = 8.0;
const HEADING_GAP_MM: f32 = 5.0;
const BODY_LINE_MM: f32 = 7.0;
const SECTION_GAP_MM: f32 = 10.0;
const DOCUMENTATION_HEADING_ADVANCE_MM: f32 = 20.0;

const MIN_ROW_MM: f32 = 15.0;
const CELL_PADDING_MM: f32 = 3.0;
/// Row rectangles start this far above the text baseline.
const ROW_RISE_MM: f32 = 5.0;

const LOGO_DPI: f32 = 300.0;
const OUTLINE_PT: f32 = 0.2;

/// Lays out `document` on A4 pages.
pub fn layout_document(document: &ExportDocument) -> Vec<LaidOutPage> {
    let geometry = PageGeometry::a4();
    let mut flow = FlowLayout::new(geometry);

    flow.push(Block::new(
        LOGO_HEIGHT_MM,
        LOGO_ADVANCE_MM,
        vec![Mark::Logo {
            x_mm: geometry.margin_mm,
            y_mm: 0.0,
            width_mm: LOGO_WIDTH_MM,
            height_mm: LOGO_HEIGHT_MM,
        }],
    ));

    for section in &document.sections {
        if section.title == DOCUMENTATION_TITLE {
            flow.break_page();
            flow.push(heading_block(
                section.title,
                &geometry,
                Some(DOCUMENTATION_HEADING_ADVANCE_MM),
            ));
        } else {
            flow.push(heading_block(section.title, &geometry, None));
        }

        match &section.body {
            SectionBody::Lines(lines) => {
                for line in lines {
                    for wrapped in
                        wrap_text(line, geometry.content_width_mm(), FontFace::TimesRoman, BODY_PT)
                    {
                        flow.push(body_line_block(wrapped, &geometry));
                    }
                }
                flow.advance(SECTION_GAP_MM);
            }
            SectionBody::Table(table) => layout_table(&mut flow, table),
        }
    }

    flow.finish()
}

fn heading_block(title: &str, geometry: &PageGeometry, advance_mm: Option<f32>) -> Block {
    let lines = wrap_text(title, geometry.content_width_mm(), FontFace::TimesBold, HEADING_PT);
    let height = lines.len() as f32 * HEADING_LINE_MM + HEADING_GAP_MM;
    let marks = lines
        .into_iter()
        .enumerate()
        .map(|(i, text)| Mark::Text {
            x_mm: geometry.margin_mm,
            baseline_mm: i as f32 * HEADING_LINE_MM,
            text,
            face: FontFace::TimesBold,
            size_pt: HEADING_PT,
        })
        .collect();
    Block::new(height, advance_mm.unwrap_or(height), marks)
}

fn body_line_block(text: String, geometry: &PageGeometry) -> Block {
    let marks = if text.is_empty() {
        Vec::new()
    } else {
        vec![Mark::Text {
            x_mm: geometry.margin_mm,
            baseline_mm: 0.0,
            text,
            face: FontFace::TimesRoman,
            size_pt: BODY_PT,
        }]
    };
    Block::new(BODY_LINE_MM, BODY_LINE_MM, marks)
}

fn layout_table(flow: &mut FlowLayout, table: &ParsedTable) {
    let geometry = *flow.geometry();
    let col_width = geometry.content_width_mm() / table.column_count().max(1) as f32;

    let header = row_block(&table.headers, FontFace::TimesBold, col_width, &geometry);
    flow.push(header.clone());
    flow.set_repeating_header(Some(header));

    for row in table.aligned_rows() {
        flow.push(row_block(&row, FontFace::TimesRoman, col_width, &geometry));
    }

    flow.set_repeating_header(None);
}

/// One table row: a stroked rectangle per column with the wrapped cell text
/// inside. Height grows with the tallest cell.
fn row_block(cells: &[String], face: FontFace, col_width: f32, geometry: &PageGeometry) -> Block {
    let text_width = col_width - 2.0 * CELL_PADDING_MM;
    let wrapped: Vec<Vec<String>> = cells
        .iter()
        .map(|cell| wrap_text(cell, text_width, face, BODY_PT))
        .collect();
    let max_lines = wrapped.iter().map(Vec::len).max().unwrap_or(1).max(1);
    let height = MIN_ROW_MM.max(max_lines as f32 * BODY_LINE_MM + 2.0 * CELL_PADDING_MM);

    let mut marks = Vec::new();
    for (i, lines) in wrapped.into_iter().enumerate() {
        let x = geometry.margin_mm + i as f32 * col_width;
        marks.push(Mark::Rect {
            x_mm: x,
            y_mm: -ROW_RISE_MM,
            width_mm: col_width,
            height_mm: height,
        });
        marks.extend(
            lines
                .into_iter()
                .enumerate()
                .filter(|(_, text)| !text.is_empty())
                .map(|(n, text)| Mark::Text {
                    x_mm: x + CELL_PADDING_MM,
                    baseline_mm: n as f32 * BODY_LINE_MM,
                    text,
                    face,
                    size_pt: BODY_PT,
                }),
        );
    }

    Block::new(height - ROW_RISE_MM, height, marks)
}

/// Renders `document` to PDF bytes.
pub fn render_pdf(document: &ExportDocument, logo: &Logo) -> Result<Vec<u8>, ExportError> {
    let geometry = PageGeometry::a4();
    let pages = layout_document(document);
    let (w, h) = (Mm(geometry.width_mm), Mm(geometry.height_mm));

    let (doc, first_page, first_layer) =
        PdfDocument::new("Job Description Analysis", w, h, "Layer 1");
    let roman = doc
        .add_builtin_font(BuiltinFont::TimesRoman)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::TimesBold)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    let logo_image = DynamicImage::ImageRgb8(logo.flattened_rgb());

    for (i, page) in pages.iter().enumerate() {
        let (page_index, layer_index) = if i == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(w, h, "Layer 1")
        };
        let layer = doc.get_page(page_index).get_layer(layer_index);
        layer.set_outline_thickness(OUTLINE_PT);

        let painter = Painter {
            layer: &layer,
            page_height_mm: geometry.height_mm,
            roman: &roman,
            bold: &bold,
        };
        for mark in &page.marks {
            painter.paint(mark, &logo_image);
        }
    }

    doc.save_to_bytes().map_err(|e| ExportError::Pdf(e.to_string()))
}

/// Paints marks onto one layer, flipping top-down millimetres into PDF space.
struct Painter<'a> {
    layer: &'a PdfLayerReference,
    page_height_mm: f32,
    roman: &'a IndirectFontRef,
    bold: &'a IndirectFontRef,
}

impl Painter<'_> {
    fn paint(&self, mark: &Mark, logo: &DynamicImage) {
        match mark {
            Mark::Text {
                x_mm,
                baseline_mm,
                text,
                face,
                size_pt,
            } => {
                let font = match face {
                    FontFace::TimesRoman => self.roman,
                    FontFace::TimesBold => self.bold,
                };
                self.layer.use_text(
                    text.as_str(),
                    *size_pt,
                    Mm(*x_mm),
                    Mm(self.page_height_mm - baseline_mm),
                    font,
                );
            }
            Mark::Rect {
                x_mm,
                y_mm,
                width_mm,
                height_mm,
            } => {
                let rect = Rect::new(
                    Mm(*x_mm),
                    Mm(self.page_height_mm - (y_mm + height_mm)),
                    Mm(x_mm + width_mm),
                    Mm(self.page_height_mm - y_mm),
                )
                .with_mode(PaintMode::Stroke);
                self.layer.add_rect(rect);
            }
            Mark::Logo {
                x_mm,
                y_mm,
                width_mm,
                height_mm,
            } => {
                let natural_w = logo.width() as f32 / LOGO_DPI * 25.4;
                let natural_h = logo.height() as f32 / LOGO_DPI * 25.4;
                if natural_w <= 0.0 || natural_h <= 0.0 {
                    return;
                }
                Image::from_dynamic_image(logo).add_to_layer(
                    self.layer.clone(),
                    ImageTransform {
                        translate_x: Some(Mm(*x_mm)),
                        translate_y: Some(Mm(self.page_height_mm - (y_mm + height_mm))),
                        scale_x: Some(width_mm / natural_w),
                        scale_y: Some(height_mm / natural_h),
                        dpi: Some(LOGO_DPI),
                        ..Default::default()
                    },
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::analysis::AnalysisResult;
    use crate::render::assets::LogoSource;
    use crate::render::document::{ANALYSIS_TITLE, REVISION_TITLE};
    use crate::render::table::MissingSeparator;

    const BOTTOM: f32 = 277.0;

    fn document(analysis: &str, documentation: &str) -> ExportDocument {
        ExportDocument::from_result(
            &AnalysisResult {
                analysis: analysis.to_string(),
                revision: "Administrative Specialist\n\nCoordinates records.".to_string(),
                documentation: documentation.to_string(),
            },
            MissingSeparator::default(),
        )
    }

    fn texts(page: &LaidOutPage) -> Vec<&str> {
        page.marks
            .iter()
            .filter_map(|m| match m {
                Mark::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn page_with(pages: &[LaidOutPage], needle: &str) -> usize {
        pages
            .iter()
            .position(|p| texts(p).contains(&needle))
            .unwrap_or_else(|| panic!("{needle:?} not laid out"))
    }

    fn long_table(rows: usize) -> String {
        let mut text = String::from("Section | Original | Updated\n---|---|---\n");
        for i in 0..rows {
            text.push_str(&format!("Row {i} | old text {i} | new text {i}\n"));
        }
        text
    }

    // ── layout ──────────────────────────────────────────────────────────────

    #[test]
    fn test_logo_then_first_heading_on_page_one() {
        let pages = layout_document(&document("Short.", "a | b\n---\n1 | 2"));
        assert!(matches!(
            pages[0].marks[0],
            Mark::Logo { y_mm, width_mm, height_mm, .. }
                if y_mm == 20.0 && width_mm == 50.0 && height_mm == 20.0
        ));
        match &pages[0].marks[1] {
            Mark::Text { text, baseline_mm, .. } => {
                assert_eq!(text, ANALYSIS_TITLE);
                assert_eq!(*baseline_mm, 50.0);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_documentation_always_starts_a_new_page() {
        let pages = layout_document(&document("Short.", "a | b\n---\n1 | 2"));
        assert_eq!(pages.len(), 2);
        assert_eq!(page_with(&pages, REVISION_TITLE), 0);
        assert_eq!(page_with(&pages, DOCUMENTATION_TITLE), 1);
        assert_eq!(texts(&pages[1])[0], DOCUMENTATION_TITLE);
    }

    #[test]
    fn test_table_header_sits_below_documentation_heading() {
        let pages = layout_document(&document("Short.", "a | b\n---\n1 | 2"));
        let rect_top = pages[1]
            .marks
            .iter()
            .find_map(|m| match m {
                Mark::Rect { y_mm, .. } => Some(*y_mm),
                _ => None,
            })
            .unwrap();
        // heading at 20, advance 20, rect rises 5 above the header baseline
        assert_eq!(rect_top, 35.0);
    }

    #[test]
    fn test_long_table_breaks_and_repeats_header() {
        let pages = layout_document(&document("Short.", &long_table(40)));
        let doc_page = page_with(&pages, DOCUMENTATION_TITLE);
        assert!(pages.len() > doc_page + 1, "expected continuation pages");
        for page in &pages[doc_page + 1..] {
            assert_eq!(&texts(page)[..3], &["Section", "Original", "Updated"]);
        }
        let row_count: usize = pages
            .iter()
            .map(|p| texts(p).iter().filter(|t| t.starts_with("Row ")).count())
            .sum();
        assert_eq!(row_count, 40);
    }

    #[test]
    fn test_table_rows_stay_above_bottom_margin() {
        let pages = layout_document(&document("Short.", &long_table(60)));
        for page in &pages {
            for mark in &page.marks {
                if let Mark::Rect { y_mm, height_mm, .. } = mark {
                    assert!(y_mm + height_mm <= BOTTOM + 1e-3);
                }
            }
        }
    }

    #[test]
    fn test_wrapped_cell_grows_row() {
        let long_cell = "word ".repeat(60);
        let table = format!("a | b\n---\n{long_cell} | x");
        let pages = layout_document(&document("Short.", &table));
        let heights: Vec<f32> = pages[1]
            .marks
            .iter()
            .filter_map(|m| match m {
                Mark::Rect { height_mm, .. } => Some(*height_mm),
                _ => None,
            })
            .collect();
        assert_eq!(heights[0], MIN_ROW_MM);
        assert!(heights[2] > MIN_ROW_MM);
        assert_eq!(heights[2], heights[3], "all cells in a row share its height");
    }

    #[test]
    fn test_long_body_text_paginates() {
        let analysis = (0..120)
            .map(|i| format!("Observation {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let pages = layout_document(&document(&analysis, "a | b\n---\n1 | 2"));
        assert!(page_with(&pages, "Observation 119") > 0);
        for page in &pages {
            for mark in &page.marks {
                if let Mark::Text { baseline_mm, .. } = mark {
                    assert!(*baseline_mm <= BOTTOM);
                }
            }
        }
    }

    #[test]
    fn test_documentation_without_table_renders_as_lines() {
        let pages = layout_document(&document("Short.", "No changes required."));
        let doc_page = page_with(&pages, DOCUMENTATION_TITLE);
        assert!(texts(&pages[doc_page]).contains(&"No changes required."));
        assert!(!pages[doc_page]
            .marks
            .iter()
            .any(|m| matches!(m, Mark::Rect { .. })));
    }

    #[test]
    fn test_three_column_documentation_grid() {
        let pages = layout_document(&document(
            "Short.",
            "Section | Original | Updated\n---|---|---\nTitle | Old Title | New Title",
        ));
        let doc_page = &pages[page_with(&pages, DOCUMENTATION_TITLE)];

        let rects: Vec<(f32, f32)> = doc_page
            .marks
            .iter()
            .filter_map(|m| match m {
                Mark::Rect { x_mm, y_mm, .. } => Some((*x_mm, *y_mm)),
                _ => None,
            })
            .collect();
        assert_eq!(rects.len(), 6, "one header row and one data row of three cells");
        let col_width = 170.0 / 3.0;
        for (i, (x, _)) in rects.iter().enumerate() {
            assert!((x - (20.0 + (i % 3) as f32 * col_width)).abs() < 1e-3);
        }
        assert!(rects[3].1 > rects[0].1, "data row sits below the header row");

        assert_eq!(
            texts(doc_page),
            vec![
                DOCUMENTATION_TITLE,
                "Section",
                "Original",
                "Updated",
                "Title",
                "Old Title",
                "New Title"
            ]
        );
    }

    // ── painting ────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_render_pdf_produces_pdf_bytes() {
        let logo = LogoSource::Bundled.load().await.unwrap();
        let bytes = render_pdf(&document("Short.", &long_table(40)), &logo).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_pdf_accepts_transparent_logo() {
        let rgba = printpdf::image_crate::RgbaImage::from_pixel(
            8,
            4,
            printpdf::image_crate::Rgba([0, 0, 0, 0]),
        );
        let logo = Logo {
            bytes: Vec::new(),
            image: DynamicImage::ImageRgba8(rgba),
        };
        let bytes = render_pdf(&document("Short.", "a | b\n---\n1 | 2"), &logo).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
