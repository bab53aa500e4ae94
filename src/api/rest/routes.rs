//! # REST Routes
//!
//! Router construction and middleware.

use crate::api::rest::handlers::{AppState, calculate_distance, calculate_shipping, health};
use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{get, post};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// Builds the CORS layer. An empty list allows any origin.
#[must_use]
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Creates the application router.
///
/// # Routes
///
/// - `POST /calculate-shipping`
/// - `POST /calculate-distance`
/// - `GET /health`
pub fn create_router(state: Arc<AppState>, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/calculate-shipping", post(calculate_shipping))
        .route("/calculate-distance", post(calculate_distance))
        .route("/health", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(allowed_origins)),
        )
        .with_state(state)
}
