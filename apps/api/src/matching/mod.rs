//! Candidate to job-posting ranking over externally supplied embeddings.

pub mod handlers;
pub mod similarity;
