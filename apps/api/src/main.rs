mod config;
mod enhance;
mod errors;
mod extract;
mod llm_client;
mod models;
mod render;
mod resume;
mod routes;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::enhance::service::LlmEnhancer;
use crate::enhance::workflow::EnhancementWorkflow;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::PortfolioStore;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CareerCanvas API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let mut llm = LlmClient::new(config.anthropic_api_key.clone())?;
    if let Some(url) = &config.anthropic_api_url {
        info!("Using LLM endpoint override: {url}");
        llm = llm.with_endpoint(url.clone());
    }
    if llm.has_credential() {
        info!("LLM client initialized (model: {})", llm_client::MODEL);
    } else {
        warn!("ANTHROPIC_API_KEY is not set; AI requests will fail with a configuration error");
    }

    let store = PortfolioStore::new(&config.data_dir);
    info!("Portfolio store at {}", store.path().display());
    info!("Default template: {}", config.default_template);

    // Build app state
    let state = AppState {
        enhancer: Arc::new(LlmEnhancer::new(llm.clone())),
        llm,
        config: config.clone(),
        store,
        workflow: Arc::new(Mutex::new(EnhancementWorkflow::new())),
    };

    // Build router
    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
