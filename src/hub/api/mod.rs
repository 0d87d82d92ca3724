//! Hub API route registration

pub mod collect;
pub mod health;
pub mod history;
pub mod mute;

use crate::hub::HubState;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Largest accepted request body. Reports are a few dozen bytes.
const MAX_REPORT_BYTES: usize = 16 * 1024;

/// Build the complete Vault Hub API router
pub fn build_router(state: Arc<HubState>) -> Router {
    let api_routes = Router::new()
        // Node reports
        .route("/collect", axum::routing::post(collect::collect))
        // Operator actions
        .route(
            "/mute",
            axum::routing::post(mute::queue_mute).get(mute::queue_mute),
        )
        // Dashboard data
        .route("/history", axum::routing::get(history::get_history))
        // Health
        .route("/health", axum::routing::get(health::get_health));

    Router::new()
        .nest("/api", api_routes)
        .layer(RequestBodyLimitLayer::new(MAX_REPORT_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
