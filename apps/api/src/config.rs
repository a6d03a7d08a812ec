use anyhow::{Context, Result};

use crate::editing::registry::DEFAULT_SESSION_CAPACITY;
use crate::layout::PageGeometry;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    /// When unset, topic history is kept in memory for the life of the process.
    pub redis_url: Option<String>,
    /// Prefix of exported file names.
    pub product_name: String,
    pub page_geometry: PageGeometry,
    /// Open report sessions kept in memory before the stalest is evicted.
    pub session_capacity: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let page_format =
            std::env::var("EXPORT_PAGE_FORMAT").unwrap_or_else(|_| "a4".to_string());

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            redis_url: std::env::var("REDIS_URL").ok().filter(|v| !v.is_empty()),
            product_name: std::env::var("PRODUCT_NAME")
                .unwrap_or_else(|_| "InsightForge".to_string()),
            page_geometry: PageGeometry::from_format(&page_format).with_context(|| {
                format!("EXPORT_PAGE_FORMAT must be 'a4' or 'letter', got '{page_format}'")
            })?,
            session_capacity: match std::env::var("SESSION_CAPACITY") {
                Ok(v) => v
                    .parse::<usize>()
                    .context("SESSION_CAPACITY must be a positive integer")?,
                Err(_) => DEFAULT_SESSION_CAPACITY,
            },
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
