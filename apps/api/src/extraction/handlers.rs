use axum::{
    extract::{Multipart, State},
    Json,
};
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::document::{extract_text, RawDocument};
use crate::extraction::models::{ExtractionIssue, ExtractionResult, ExtractionStatus};
use crate::profile::readiness::{compute_readiness, ReadinessReport};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExtractTextRequest {
    #[serde(default)]
    pub raw_text: String,
    /// Reference year for open-ended ranges. Defaults to the current UTC year.
    pub current_year: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct ExtractionResponse {
    pub extraction_id: Uuid,
    pub processed_at: DateTime<Utc>,
    pub status: ExtractionStatus,
    pub issues: Vec<ExtractionIssue>,
    pub result: ExtractionResult,
    pub readiness: ReadinessReport,
}

/// POST /api/v1/cv/extract
pub async fn handle_extract_text(
    State(state): State<AppState>,
    Json(req): Json<ExtractTextRequest>,
) -> Result<Json<ExtractionResponse>, AppError> {
    let current_year = req.current_year.unwrap_or_else(current_utc_year);
    let response = run_pipeline(&state, req.raw_text, current_year).await?;
    Ok(Json(response))
}

/// POST /api/v1/cv/upload
///
/// Multipart body with a `file` field (PDF, DOCX or TXT) and an optional
/// `current_year` text field.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ExtractionResponse>, AppError> {
    let mut upload = None;
    let mut current_year = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await?;
                upload = Some((filename, data));
            }
            Some("current_year") => {
                let raw = field.text().await?;
                let year = raw.trim().parse::<i32>().map_err(|_| {
                    AppError::Validation(format!("current_year must be an integer, got '{raw}'"))
                })?;
                current_year = Some(year);
            }
            _ => {}
        }
    }

    let (filename, data) =
        upload.ok_or_else(|| AppError::Validation("No file provided in field 'file'".to_string()))?;
    let document = RawDocument::from_upload(&filename, data)?;
    info!(
        "Extracting text from {:?} upload ({} bytes)",
        document.kind,
        document.bytes.len()
    );

    let text = tokio::task::spawn_blocking(move || extract_text(&document))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Document extraction task failed: {e}")))??;

    let current_year = current_year.unwrap_or_else(current_utc_year);
    let response = run_pipeline(&state, text, current_year).await?;
    Ok(Json(response))
}

/// Runs the CPU-bound pipeline off the async workers and wraps the outcome.
async fn run_pipeline(
    state: &AppState,
    text: String,
    current_year: i32,
) -> Result<ExtractionResponse, AppError> {
    let pipeline = state.pipeline.clone();
    let outcome = tokio::task::spawn_blocking(move || pipeline.extract(&text, current_year))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Extraction task failed: {e}")))?;
    if !outcome.succeeded() {
        warn!("Every extraction component failed; returning an empty result");
    }

    let readiness = compute_readiness(&outcome.result);
    Ok(ExtractionResponse {
        extraction_id: Uuid::new_v4(),
        processed_at: Utc::now(),
        status: outcome.status,
        issues: outcome.issues,
        result: outcome.result,
        readiness,
    })
}

fn current_utc_year() -> i32 {
    Utc::now().year()
}
