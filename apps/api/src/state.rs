use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::CompletionClient;

/// Shared application state injected into all route handlers via Axum
/// extractors. Read-only after startup: no component holds cross-request
/// mutable state, so concurrent runs are independent.
#[derive(Clone)]
pub struct AppState {
    /// Completion client behind the trait so tests can swap in stubs.
    pub llm: Arc<dyn CompletionClient>,
    pub config: Config,
}
