//! API Routes
//!
//! Route definitions for all API endpoints.

use axum::routing::get;
use axum::Router;
use std::sync::Arc;

use crate::handlers;
use crate::state::AppState;

/// Create API v1 routes
pub fn api_v1_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/devices", get(handlers::devices::list_devices))
        .route(
            "/devices/:id",
            get(handlers::devices::get_device).post(handlers::devices::create_device),
        )
        .route(
            "/devices/:id/signatures",
            get(handlers::signatures::list_signatures)
                .post(handlers::signatures::create_signature),
        )
}
