use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::render::Template;

/// Application configuration loaded from environment variables.
///
/// The upstream credential is optional at startup: requests that need it fail
/// with a configuration error instead, so the health endpoint stays reachable.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: Option<String>,
    /// Messages-compatible endpoint override, e.g. a proxy.
    pub anthropic_api_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub data_dir: PathBuf,
    pub default_template: Template,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let anthropic_api_key =
            optional_env("ANTHROPIC_API_KEY").or_else(|| optional_env("CLAUDE_API_KEY"));

        Ok(Config {
            anthropic_api_key,
            anthropic_api_url: optional_env("ANTHROPIC_API_URL"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8787".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            data_dir: optional_env("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./data")),
            default_template: optional_env("DEFAULT_TEMPLATE")
                .map(|t| Template::from_id(&t))
                .unwrap_or_default(),
        })
    }
}

/// Treats an empty value the same as an unset one.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
