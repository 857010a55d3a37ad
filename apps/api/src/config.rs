use anyhow::{Context, Result};

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable is optional; startup fails only on values that do not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Newline-delimited skill vocabulary. Built-in vocabulary when unset.
    pub skill_vocabulary_path: Option<String>,
    /// Gazetteer for the NER collaborator. No NER when unset.
    pub ner_gazetteer_path: Option<String>,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            skill_vocabulary_path: optional_env("SKILL_VOCABULARY_PATH"),
            ner_gazetteer_path: optional_env("NER_GAZETTEER_PATH"),
            max_upload_bytes: match optional_env("MAX_UPLOAD_BYTES") {
                Some(raw) => raw
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a positive integer")?,
                None => DEFAULT_MAX_UPLOAD_BYTES,
            },
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            skill_vocabulary_path: None,
            ner_gazetteer_path: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Reads an env var, treating blank values the same as unset ones.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
