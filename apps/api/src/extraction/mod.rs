//! CV extraction: raw resume text in, structured `ExtractionResult` out.
//! Components are pure and synchronous; `pipeline` is the only entry point the
//! HTTP layer uses. `document` turns uploaded PDF/DOCX bytes into text first.

use thiserror::Error;

pub mod document;
pub mod education;
pub mod entities;
pub mod experience;
pub mod handlers;
pub mod models;
pub mod normalizer;
pub mod pipeline;
pub mod sections;
pub mod skills;
pub mod vocabulary;

/// Failure inside a single extraction component. The pipeline turns these into
/// `ExtractionIssue`s instead of letting them reach the caller.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("invalid section header pattern '{header}': {source}")]
    Pattern {
        header: String,
        #[source]
        source: regex::Error,
    },

    #[error("reference year {0} is outside the supported range")]
    InvalidReferenceYear(i32),
}
