mod config;
mod errors;
mod extraction;
mod matching;
mod profile;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extraction::entities::{EntityRecognizer, GazetteerRecognizer};
use crate::extraction::pipeline::CvExtractionPipeline;
use crate::extraction::vocabulary::SkillVocabulary;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CareerLens API v{}", env!("CARGO_PKG_VERSION"));

    // Skill vocabulary (immutable after load)
    let vocabulary = match &config.skill_vocabulary_path {
        Some(path) => SkillVocabulary::from_file(path)
            .with_context(|| format!("Failed to load skill vocabulary from {path}"))?,
        None => SkillVocabulary::builtin(),
    };
    info!("Skill vocabulary loaded ({} terms)", vocabulary.len());

    // Optional NER collaborator
    let recognizer: Option<Arc<dyn EntityRecognizer>> = match &config.ner_gazetteer_path {
        Some(path) => {
            let gazetteer = GazetteerRecognizer::from_file(path)
                .with_context(|| format!("Failed to load NER gazetteer from {path}"))?;
            info!("NER gazetteer loaded ({} entries)", gazetteer.len());
            Some(Arc::new(gazetteer))
        }
        None => {
            info!("No NER gazetteer configured; location will not be extracted");
            None
        }
    };

    let pipeline = CvExtractionPipeline::new(Arc::new(vocabulary), recognizer);
    let state = AppState::new(config.clone(), pipeline);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client's domain is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
