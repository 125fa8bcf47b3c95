use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
///
/// Only `DATABASE_URL` is required. Every external data source degrades to
/// a no-op when its key is missing — a partially configured process still
/// starts and serves what it can.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// SerpAPI key for the knowledge-graph source. Optional.
    pub serp_api_key: Option<String>,
    /// Google API key for the YouTube Data API v3. Optional.
    pub google_api_key: Option<String>,
    /// Base URL of an OpenAI-compatible completion endpoint. Optional.
    pub llm_api_url: Option<String>,
    pub llm_model: String,
    /// Path to the bulk company CSV dataset. Optional.
    pub dataset_path: Option<PathBuf>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            serp_api_key: optional_env("SERP_API_KEY"),
            google_api_key: optional_env("GOOGLE_API_KEY"),
            llm_api_url: optional_env("LLM_API_URL"),
            llm_model: optional_env("LLM_MODEL").unwrap_or_else(|| "local-model".to_string()),
            dataset_path: optional_env("COMPANY_DATASET_PATH").map(PathBuf::from),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Returns None for unset or blank variables, so `FOO=` behaves like unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
