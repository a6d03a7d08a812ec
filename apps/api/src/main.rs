mod config;
mod editing;
mod errors;
mod export;
mod generation;
mod history;
mod layout;
mod llm_client;
mod report;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::editing::registry::SessionRegistry;
use crate::generation::generator::LlmReportBackend;
use crate::history::store::{KeyValueStore, MemoryStore, RedisStore};
use crate::history::topics::TopicHistory;
use crate::layout::default_typography;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting InsightForge API v{}", env!("CARGO_PKG_VERSION"));

    // Topic history: Redis when configured, otherwise process memory
    let store: Arc<dyn KeyValueStore> = match &config.redis_url {
        Some(url) => {
            let client = redis::Client::open(url.as_str())?;
            info!("Redis client initialized for topic history");
            Arc::new(RedisStore::new(client))
        }
        None => {
            info!("REDIS_URL not set; topic history kept in memory");
            Arc::new(MemoryStore::new())
        }
    };

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let typography = default_typography();
    config.page_geometry.validate()?;
    info!(
        "Export page {}x{}mm, margin {}mm",
        config.page_geometry.width, config.page_geometry.height, config.page_geometry.margin
    );

    let state = AppState {
        config: config.clone(),
        backend: Arc::new(LlmReportBackend::new(llm)),
        history: TopicHistory::new(store),
        sessions: SessionRegistry::with_capacity(config.session_capacity),
        typography,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
