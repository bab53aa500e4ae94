//! # REST API
//!
//! HTTP endpoints using axum.
//!
//! # Endpoints
//!
//! - `POST /calculate-shipping` - Quote shipping to a postal code
//! - `POST /calculate-distance` - Road distance between two places
//! - `GET /health` - Health check
//!
//! # Usage
//!
//! ```ignore
//! use storefront::api::rest::{AppState, create_router};
//! use std::sync::Arc;
//!
//! let state = Arc::new(AppState {
//!     estimator: Arc::new(estimator),
//!     routes: resolvers.routes.clone(),
//! });
//!
//! let router = create_router(state, &config.server.allowed_origins);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, router).await?;
//! ```

pub mod error;
pub mod handlers;
pub mod routes;

pub use error::{ApiError, ErrorResponse};
pub use handlers::{
    AppState, DistanceRequest, DistanceResponse, HealthResponse, ShippingRequest,
    ShippingResponse,
};
pub use routes::{cors_layer, create_router};
