// Page layout for PDF exports: font metrics, word wrap, and page-break flow.
// Pure and CPU-bound; callers run it inside tokio::task::spawn_blocking.

pub mod flow;
pub mod font_metrics;

pub use flow::{Block, FlowLayout, LaidOutPage, Mark, PageGeometry};
pub use font_metrics::{wrap_text, FontFace};
