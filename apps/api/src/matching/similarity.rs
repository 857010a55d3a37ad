//! Cosine-similarity ranking of job postings against a candidate embedding.
//!
//! Pure and synchronous. Embeddings are produced elsewhere; this module only
//! scores and orders them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Scores are cosine similarity scaled to this range.
pub const MAX_SCORE: f64 = 100.0;

#[derive(Debug, Error, PartialEq)]
pub enum MatchError {
    #[error("candidate vector is empty")]
    EmptyCandidate,

    #[error("posting {index} has a {found}-dimensional vector, expected {expected}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobPosting {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_link: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedMatch {
    pub posting: JobPosting,
    /// Cosine similarity × 100, in [-100, 100].
    pub similarity_score: f64,
}

/// `100 · a·b / (‖a‖·‖b‖)`, accumulated in f64.
///
/// Returns 0 when either vector has zero norm or the result is not finite.
/// Extra trailing components of the longer vector are ignored; callers that
/// care about dimensions check them first (see [`rank`]).
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let (mut dot, mut norm_a, mut norm_b) = (0.0f64, 0.0f64, 0.0f64);
    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        return 0.0;
    }
    let score = MAX_SCORE * dot / denom;
    if score.is_finite() {
        score.clamp(-MAX_SCORE, MAX_SCORE)
    } else {
        0.0
    }
}

/// Scores every posting and sorts by score, highest first. Ties keep input order.
pub fn rank<V: AsRef<[f32]>>(
    candidate: &[f32],
    postings: impl IntoIterator<Item = (JobPosting, V)>,
) -> Result<Vec<RankedMatch>, MatchError> {
    if candidate.is_empty() {
        return Err(MatchError::EmptyCandidate);
    }

    let mut ranked = Vec::new();
    for (index, (posting, vector)) in postings.into_iter().enumerate() {
        let vector = vector.as_ref();
        if vector.len() != candidate.len() {
            return Err(MatchError::DimensionMismatch {
                index,
                expected: candidate.len(),
                found: vector.len(),
            });
        }
        ranked.push(RankedMatch {
            posting,
            similarity_score: cosine_similarity(candidate, vector),
        });
    }

    // sort_by is stable
    ranked.sort_by(|a, b| b.similarity_score.total_cmp(&a.similarity_score));
    Ok(ranked)
}
