//! Pipeline orchestrator: runs the three dependent stages and assembles the result.
//!
//! Flow: validate → analysis(JD + comparators) → revision(analysis + JD)
//!       → documentation(JD + revision) → AnalysisResult.
//!
//! Stages are awaited one after another; there is nothing to parallelise since
//! every stage consumes the previous stage's output. The first failure aborts.

use std::fmt;

use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::TextGenerator;
use crate::models::analysis::{AnalysisResult, AnalyzeRequest};
use crate::pipeline::prompts::{
    build_analysis_prompt, build_documentation_prompt, build_revision_prompt, ANALYSIS_SYSTEM,
    DOCUMENTATION_SYSTEM, REVISION_SYSTEM,
};

/// One of the three sequential model calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Analysis,
    Revision,
    Documentation,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Analysis => "analysis",
            Stage::Revision => "revision",
            Stage::Documentation => "documentation",
        };
        f.write_str(name)
    }
}

/// A request that passed validation: trimmed-empty comparators already dropped.
#[derive(Debug)]
pub struct ValidatedRequest<'a> {
    pub original_jd: &'a str,
    pub comparators: Vec<&'a str>,
}

/// Rejects requests that must never reach the network.
pub fn validate_request(request: &AnalyzeRequest) -> Result<ValidatedRequest<'_>, AppError> {
    if request.original_jd.trim().is_empty() {
        return Err(AppError::Validation("Original JD is required".to_string()));
    }

    let comparators: Vec<&str> = request
        .comparators
        .iter()
        .map(String::as_str)
        .filter(|c| !c.trim().is_empty())
        .collect();

    if comparators.is_empty() {
        return Err(AppError::Validation(
            "At least one comparator is required".to_string(),
        ));
    }

    Ok(ValidatedRequest {
        original_jd: &request.original_jd,
        comparators,
    })
}

/// Runs analysis → revision → documentation against `generator`.
pub async fn run_pipeline(
    generator: &dyn TextGenerator,
    request: &AnalyzeRequest,
) -> Result<AnalysisResult, AppError> {
    let validated = validate_request(request)?;
    let run_id = Uuid::new_v4();

    info!(
        %run_id,
        original_jd_len = validated.original_jd.len(),
        comparators = validated.comparators.len(),
        "Starting JD pipeline"
    );

    let analysis = run_stage(
        generator,
        run_id,
        Stage::Analysis,
        ANALYSIS_SYSTEM,
        &build_analysis_prompt(validated.original_jd, &validated.comparators),
    )
    .await?;

    let revision = run_stage(
        generator,
        run_id,
        Stage::Revision,
        REVISION_SYSTEM,
        &build_revision_prompt(&analysis, validated.original_jd),
    )
    .await?;

    let documentation = run_stage(
        generator,
        run_id,
        Stage::Documentation,
        DOCUMENTATION_SYSTEM,
        &build_documentation_prompt(validated.original_jd, &revision),
    )
    .await?;

    info!(%run_id, "JD pipeline complete");

    Ok(AnalysisResult {
        analysis,
        revision,
        documentation,
    })
}

async fn run_stage(
    generator: &dyn TextGenerator,
    run_id: Uuid,
    stage: Stage,
    system: &str,
    prompt: &str,
) -> Result<String, AppError> {
    info!(%run_id, %stage, "Starting stage");
    let text = generator
        .complete(system, prompt)
        .await
        .map_err(|e| AppError::Llm(format!("{stage} stage failed: {e}")))?;
    info!(%run_id, %stage, output_len = text.len(), "Stage complete");
    Ok(text)
}
