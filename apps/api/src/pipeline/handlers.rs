//! Axum route handlers for the analysis pipeline.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::analysis::{AnalysisResult, AnalyzeRequest};
use crate::pipeline::orchestrator::run_pipeline;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AuthTestResponse {
    pub message: &'static str,
}

/// POST /api/analyze
///
/// Runs analysis → revision → documentation and returns all three outputs.
pub async fn handle_analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, AppError> {
    let Json(request) = payload?;
    let result = run_pipeline(state.generator.as_ref(), &request).await?;
    Ok(Json(result))
}

/// GET /api/auth-test
///
/// Reachable only through the basic-auth gate; lets a client check a login.
pub async fn handle_auth_test() -> Json<AuthTestResponse> {
    Json(AuthTestResponse {
        message: "Successfully authenticated!",
    })
}
