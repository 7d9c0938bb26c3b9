// Document rendering: inline HTML view plus DOCX and PDF exports.
// Every target reads the same AnalysisResult and the same pipe-table parse.

pub mod assets;
pub mod document;
pub mod docx;
pub mod handlers;
pub mod html;
pub mod pdf;
pub mod table;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::models::analysis::AnalysisResult;
use crate::render::document::{ExportDocument, EXPORT_BASENAME};
use crate::state::RenderSettings;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("logo: {0}")]
    Asset(String),

    #[error("docx: {0}")]
    Docx(String),

    #[error("pdf: {0}")]
    Pdf(String),

    #[error("export task failed: {0}")]
    Task(String),
}

impl From<ExportError> for AppError {
    fn from(e: ExportError) -> Self {
        AppError::Export(e.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Docx,
    Pdf,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Docx => "docx",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ExportFormat::Pdf => "application/pdf",
        }
    }

    pub fn filename(self) -> String {
        format!("{EXPORT_BASENAME}.{}", self.extension())
    }
}

/// Builds the export file for `result`.
///
/// The logo is loaded asynchronously; document assembly and encoding are
/// CPU-bound and run on the blocking pool.
pub async fn export(
    result: &AnalysisResult,
    format: ExportFormat,
    settings: &RenderSettings,
) -> Result<Vec<u8>, ExportError> {
    let logo = settings.logo.load().await?;
    debug!(
        width = logo.width_px(),
        height = logo.height_px(),
        "Logo loaded"
    );
    let document = ExportDocument::from_result(result, settings.missing_separator);

    let bytes = tokio::task::spawn_blocking(move || match format {
        ExportFormat::Docx => docx::render_docx(&document, &logo),
        ExportFormat::Pdf => pdf::render_pdf(&document, &logo),
    })
    .await
    .map_err(|e| ExportError::Task(e.to_string()))??;

    info!(format = format.extension(), size = bytes.len(), "Export rendered");
    Ok(bytes)
}
