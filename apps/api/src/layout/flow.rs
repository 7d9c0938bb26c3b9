//! Flow layout: places measured blocks top-down onto fixed-size pages.
//!
//! # Model
//! - A [`Block`] is an indivisible unit (a text line, a heading, a table row,
//!   an image) with the room it needs below the cursor (`fit_mm`), how far it
//!   moves the cursor (`advance_mm`), and marks positioned relative to the cursor.
//! - [`FlowLayout`] owns the cursor. Before placing a block it asks whether the
//!   block still fits above the bottom margin; if not, it starts a new page.
//! - A repeating header (a table's header row) is re-placed at the top of every
//!   page started by overflow, so continuation pages are self-describing.
//!
//! Coordinates are millimetres from the top-left corner of the page. The PDF
//! painter flips them into PDF space.

use crate::layout::font_metrics::FontFace;

/// Page size and uniform margin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width_mm: f32,
    pub height_mm: f32,
    pub margin_mm: f32,
}

impl PageGeometry {
    /// A4 portrait with 20 mm margins.
    pub const fn a4() -> Self {
        Self {
            width_mm: 210.0,
            height_mm: 297.0,
            margin_mm: 20.0,
        }
    }

    pub fn content_width_mm(&self) -> f32 {
        self.width_mm - 2.0 * self.margin_mm
    }

    /// Lowest y any block may reach.
    pub fn bottom_limit_mm(&self) -> f32 {
        self.height_mm - self.margin_mm
    }
}

/// Something drawn at an absolute (after placement) position.
#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    Text {
        x_mm: f32,
        baseline_mm: f32,
        text: String,
        face: FontFace,
        size_pt: f32,
    },
    /// Stroked outline; `y_mm` is the top edge.
    Rect {
        x_mm: f32,
        y_mm: f32,
        width_mm: f32,
        height_mm: f32,
    },
    /// The document logo; `y_mm` is the top edge.
    Logo {
        x_mm: f32,
        y_mm: f32,
        width_mm: f32,
        height_mm: f32,
    },
}

impl Mark {
    fn shifted(mut self, dy: f32) -> Self {
        match &mut self {
            Mark::Text { baseline_mm, .. } => *baseline_mm += dy,
            Mark::Rect { y_mm, .. } | Mark::Logo { y_mm, .. } => *y_mm += dy,
        }
        self
    }
}

/// An indivisible unit of content.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Room needed below the cursor for the block to be drawn on this page.
    pub fit_mm: f32,
    /// Distance the cursor moves once the block is placed.
    pub advance_mm: f32,
    /// Marks with y relative to the cursor.
    pub marks: Vec<Mark>,
}

impl Block {
    pub fn new(fit_mm: f32, advance_mm: f32, marks: Vec<Mark>) -> Self {
        Self {
            fit_mm,
            advance_mm,
            marks,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaidOutPage {
    pub marks: Vec<Mark>,
}

/// The page-break policy object. Restartable: `break_page` and overflow both
/// reset the cursor to the top margin of a fresh page.
#[derive(Debug)]
pub struct FlowLayout {
    geometry: PageGeometry,
    pages: Vec<LaidOutPage>,
    cursor_mm: f32,
    repeating_header: Option<Block>,
    /// False until a non-header block lands on the current page. A block that
    /// does not fit on an otherwise empty page is placed anyway.
    page_has_content: bool,
}

impl FlowLayout {
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: vec![LaidOutPage::default()],
            cursor_mm: geometry.margin_mm,
            repeating_header: None,
            page_has_content: false,
        }
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    #[cfg(test)]
    fn cursor_mm(&self) -> f32 {
        self.cursor_mm
    }

    #[cfg(test)]
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Places `block`, starting a continuation page first if it would cross the
    /// bottom margin.
    pub fn push(&mut self, block: Block) {
        if self.page_has_content && self.cursor_mm + block.fit_mm > self.geometry.bottom_limit_mm()
        {
            self.start_continuation_page();
        }
        self.place(block);
        self.page_has_content = true;
    }

    /// Moves the cursor without placing anything. Never breaks a page; the next
    /// block does that if the gap pushed it past the margin.
    pub fn advance(&mut self, mm: f32) {
        self.cursor_mm += mm;
    }

    /// Unconditional page break. The repeating header is not re-emitted.
    pub fn break_page(&mut self) {
        self.new_page();
    }

    /// Sets (or clears) the block re-emitted at the top of overflow pages.
    /// Setting it does not place it; push it once yourself.
    pub fn set_repeating_header(&mut self, header: Option<Block>) {
        self.repeating_header = header;
    }

    pub fn finish(self) -> Vec<LaidOutPage> {
        self.pages
    }

    fn start_continuation_page(&mut self) {
        self.new_page();
        if let Some(header) = self.repeating_header.clone() {
            self.place(header);
        }
    }

    fn new_page(&mut self) {
        self.pages.push(LaidOutPage::default());
        self.cursor_mm = self.geometry.margin_mm;
        self.page_has_content = false;
    }

    fn place(&mut self, block: Block) {
        let dy = self.cursor_mm;
        if let Some(page) = self.pages.last_mut() {
            page.marks
                .extend(block.marks.into_iter().map(|mark| mark.shifted(dy)));
        }
        self.cursor_mm += block.advance_mm;
    }
}
