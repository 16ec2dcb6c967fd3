use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::achievements::models::{AchievementStatement, DedupSummary, DeduplicatedRecord};
use crate::achievements::similarity::MetricSignal;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DeduplicateRequest {
    pub statements: Vec<AchievementStatement>,
}

/// One deduplicated achievement as the rendering stage consumes it.
#[derive(Debug, Serialize)]
pub struct RecordResponse {
    pub text: String,
    pub sources: Vec<String>,
    pub similar_count: usize,
    /// Raw metric strings, e.g. `["20%", "$1M"]`.
    pub metrics: Vec<String>,
}

impl From<DeduplicatedRecord> for RecordResponse {
    fn from(record: DeduplicatedRecord) -> Self {
        let metrics = record.metric_strings();
        Self {
            text: record.text,
            sources: record.sources,
            similar_count: record.similar_count,
            metrics,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeduplicateResponse {
    pub batch_id: Uuid,
    pub records: Vec<RecordResponse>,
    pub summary: DedupSummary,
}

#[derive(Debug, Deserialize)]
pub struct SimilarityRequest {
    pub a: String,
    pub b: String,
}

#[derive(Debug, Serialize)]
pub struct SimilarityResponse {
    pub score: f64,
    pub lexical: f64,
    pub metric_signal: MetricSignal,
    pub opposing_direction: bool,
    pub is_duplicate: bool,
}

/// POST /api/v1/achievements/deduplicate
pub async fn handle_deduplicate(
    State(state): State<AppState>,
    payload: Result<Json<DeduplicateRequest>, JsonRejection>,
) -> Result<Json<DeduplicateResponse>, AppError> {
    // A missing, null or non-array `statements` field fails here, before any work.
    let Json(req) = payload.map_err(|e| AppError::Validation(e.body_text()))?;

    let max = state.config.max_statements;
    if req.statements.len() > max {
        return Err(AppError::Validation(format!(
            "Too many statements: {} (limit {max})",
            req.statements.len()
        )));
    }

    let batch_id = Uuid::new_v4();
    let deduplicator = state.deduplicator;
    let outcome =
        tokio::task::spawn_blocking(move || deduplicator.deduplicate_with_summary(&req.statements))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Deduplication task failed: {e}")))?;

    info!(
        %batch_id,
        input = outcome.summary.input_count,
        records = outcome.summary.record_count,
        merged = outcome.summary.merged_count,
        "Achievement batch deduplicated"
    );

    Ok(Json(DeduplicateResponse {
        batch_id,
        records: outcome.records.into_iter().map(RecordResponse::from).collect(),
        summary: outcome.summary,
    }))
}

/// POST /api/v1/achievements/similarity
pub async fn handle_similarity(
    State(state): State<AppState>,
    payload: Result<Json<SimilarityRequest>, JsonRejection>,
) -> Result<Json<SimilarityResponse>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    let breakdown = state.deduplicator.similarity(&req.a, &req.b);
    Ok(Json(SimilarityResponse {
        score: breakdown.score,
        lexical: breakdown.lexical,
        metric_signal: breakdown.metric_signal,
        opposing_direction: breakdown.opposing_direction,
        is_duplicate: breakdown.is_duplicate(),
    }))
}
