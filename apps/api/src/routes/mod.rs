pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/analysis", post(handlers::handle_analyze))
        .route(
            "/api/v1/analysis/upload",
            post(handlers::handle_analyze_upload),
        )
        .with_state(state)
}
