//! Axum route handlers for the document renderer.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::header,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::analysis::AnalysisResult;
use crate::render::html::{render_result_html, ViewOptions};
use crate::render::table::{extract_table, ParsedTable};
use crate::render::{export, ExportFormat};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TableRequest {
    #[serde(default)]
    pub documentation: String,
}

/// POST /api/render/preview?dark_mode=true
pub async fn handle_preview(
    State(state): State<AppState>,
    query: Result<Query<ViewOptions>, QueryRejection>,
    payload: Result<Json<AnalysisResult>, JsonRejection>,
) -> Result<Html<String>, AppError> {
    let Query(options) = query?;
    let Json(result) = payload?;
    Ok(Html(render_result_html(
        &result,
        options,
        state.render.missing_separator,
    )))
}

/// POST /api/render/table
///
/// Returns the parsed documentation table, or `null` when the text has none.
pub async fn handle_table(
    State(state): State<AppState>,
    payload: Result<Json<TableRequest>, JsonRejection>,
) -> Result<Json<Option<ParsedTable>>, AppError> {
    let Json(request) = payload?;
    Ok(Json(extract_table(
        &request.documentation,
        state.render.missing_separator,
    )))
}

/// POST /api/export/:format
///
/// Streams back a .docx or .pdf as an attachment.
pub async fn handle_export(
    State(state): State<AppState>,
    format: Result<Path<ExportFormat>, PathRejection>,
    payload: Result<Json<AnalysisResult>, JsonRejection>,
) -> Result<Response, AppError> {
    let Path(format) = format?;
    let Json(result) = payload?;
    let bytes = export(&result, format, &state.render).await?;
    let disposition = format!("attachment; filename=\"{}\"", format.filename());

    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
