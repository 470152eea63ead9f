use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
///
/// The model API key is deliberately optional at startup: a missing key is a
/// per-run `Configuration` error surfaced to the caller, never a crash. This
/// keeps the service bootable for health checks and input validation without
/// credentials.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
