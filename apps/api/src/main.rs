mod analysis;
mod config;
mod errors;
mod llm_client;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{CompletionClient, OpenAiClient};
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

    info!("Starting Qualify API v{}", env!("CARGO_PKG_VERSION"));

    // A missing key is not fatal at startup; each analysis run will surface
    // it as a configuration error instead.
    if config.openai_api_key.is_none() {
        warn!("OPENAI_API_KEY is not set; analysis requests will fail until it is provided");
    }

    let llm: Arc<dyn CompletionClient> = Arc::new(OpenAiClient::new(config.openai_api_key.clone()));
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let state = AppState {
        llm,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
