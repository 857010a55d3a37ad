use std::sync::Arc;

use crate::config::Config;
use crate::extraction::pipeline::CvExtractionPipeline;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Read-only after startup; vocabulary and NER collaborator live inside.
    pub pipeline: Arc<CvExtractionPipeline>,
}

impl AppState {
    pub fn new(config: Config, pipeline: CvExtractionPipeline) -> Self {
        Self {
            config,
            pipeline: Arc::new(pipeline),
        }
    }
}
