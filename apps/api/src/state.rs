use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::Config;
use crate::enhance::service::Enhancer;
use crate::enhance::workflow::EnhancementWorkflow;
use crate::llm_client::LlmClient;
use crate::store::PortfolioStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    pub config: Config,
    /// Pluggable field enhancer. Default: `LlmEnhancer` over `llm`.
    pub enhancer: Arc<dyn Enhancer>,
    pub store: PortfolioStore,
    /// The single enhancement review flow. A running batch holds the lock.
    pub workflow: Arc<Mutex<EnhancementWorkflow>>,
}
