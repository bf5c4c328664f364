//! sigchain REST API
//!
//! Thin HTTP layer over the device manager.
//!
//! # API Structure
//!
//! ```text
//! /api/v1/
//! ├── /health                    - Liveness probe
//! ├── /devices                   - List devices
//! ├── /devices/{id}              - Create (POST) / fetch (GET) a device
//! └── /devices/{id}/signatures   - Sign data (POST) / list the chain (GET)
//! ```
//!
//! # Response envelope
//!
//! Successful responses wrap their payload as `{"data": <payload>}`; error
//! responses carry `{"errors": ["..."]}` with human-readable messages and
//! never leak internal detail.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::response::{IntoResponse, Response};
use axum::Router;
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as CorsAny, CorsLayer};
use tower_http::trace::TraceLayer;

/// API configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Enable CORS for browser clients
    pub enable_cors: bool,
    /// Enable per-request tracing spans
    pub enable_tracing: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            enable_cors: true,
            enable_tracing: true,
        }
    }
}

/// Create the main API router with all middleware
pub fn create_router(state: Arc<AppState>, config: ApiConfig) -> Router {
    let mut router = Router::new()
        .nest("/api/v1", routes::api_v1_routes())
        .with_state(state);

    if config.enable_tracing {
        router = router.layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        );
    }

    if config.enable_cors {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(CorsAny)
                .allow_methods(CorsAny)
                .allow_headers(CorsAny),
        );
    }

    // Outermost: a panic anywhere upstream becomes a logged 500 with the
    // standard error envelope instead of a dropped connection.
    router.layer(CatchPanicLayer::custom(handle_panic))
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!(panic = %detail, "recovered from panic in request handler");

    ApiError::Internal("internal server error".to_string()).into_response()
}
