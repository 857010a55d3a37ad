use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::matching::similarity::{rank, JobPosting, RankedMatch};

pub const DEFAULT_LIMIT: usize = 20;
pub const MAX_LIMIT: usize = 100;

#[derive(Debug, Deserialize)]
pub struct EmbeddedPosting {
    pub posting: JobPosting,
    pub vector: Vec<f32>,
}

#[derive(Debug, Deserialize)]
pub struct RankRequest {
    pub candidate_vector: Vec<f32>,
    pub postings: Vec<EmbeddedPosting>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RankResponse {
    /// Number of ranked postings before pagination.
    pub total: usize,
    pub matches: Vec<RankedMatch>,
}

/// POST /api/v1/matches/rank
pub async fn handle_rank(Json(req): Json<RankRequest>) -> Result<Json<RankResponse>, AppError> {
    let limit = req.limit.unwrap_or(DEFAULT_LIMIT);
    if limit == 0 || limit > MAX_LIMIT {
        return Err(AppError::Validation(format!(
            "limit must be between 1 and {MAX_LIMIT}"
        )));
    }
    let offset = req.offset.unwrap_or(0);

    let ranked = rank(
        &req.candidate_vector,
        req.postings.into_iter().map(|p| (p.posting, p.vector)),
    )?;
    let total = ranked.len();
    info!("Ranked {} postings (offset={}, limit={})", total, offset, limit);

    Ok(Json(RankResponse {
        total,
        matches: ranked.into_iter().skip(offset).take(limit).collect(),
    }))
}
