//! # REST Handlers
//!
//! Request handlers and wire types for the REST API.
//!
//! Field names on the shipping endpoint are kept as the storefront frontend
//! already consumes them (`customerZipCode`, `valor`, `servico`, `prazo`,
//! `distanciaKm`, `endereco`).

use crate::api::rest::error::ApiError;
use crate::application::services::ShippingEstimator;
use crate::domain::entities::ShippingQuote;
use crate::infrastructure::geocoding::RouteDistanceResolver;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shared state for all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Shipping estimator.
    pub estimator: Arc<ShippingEstimator>,
    /// Road distance lookup.
    pub routes: Arc<dyn RouteDistanceResolver>,
}

/// Body of `POST /calculate-shipping`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingRequest {
    /// Destination postal code in any common formatting.
    #[serde(default)]
    pub customer_zip_code: Option<String>,
}

/// Body of a successful `POST /calculate-shipping`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingResponse {
    /// Price in reais.
    pub valor: f64,
    /// Service name; suffixed when the quote is an estimate.
    pub servico: String,
    /// Delivery window.
    pub prazo: String,
    /// Customer-facing explanation.
    pub message: String,
    /// Distance in km with two decimals; absent for estimates.
    #[serde(rename = "distanciaKm", skip_serializing_if = "Option::is_none")]
    pub distancia_km: Option<String>,
    /// Resolved destination address, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endereco: Option<String>,
}

impl From<&ShippingQuote> for ShippingResponse {
    fn from(quote: &ShippingQuote) -> Self {
        Self {
            valor: quote.price().to_decimal().to_f64().unwrap_or_default(),
            servico: quote.service_name(),
            prazo: quote.window().to_string(),
            message: quote.message(),
            distancia_km: quote.distance().map(|d| d.to_string()),
            endereco: quote.address().map(ToString::to_string),
        }
    }
}

/// Body of `POST /calculate-distance`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DistanceRequest {
    /// Free-text origin.
    #[serde(default)]
    pub origin: Option<String>,
    /// Free-text destination.
    #[serde(default)]
    pub destination: Option<String>,
}

/// Body of a successful `POST /calculate-distance`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceResponse {
    /// Road distance in kilometers.
    pub distance: f64,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `healthy` while the process serves requests.
    pub status: String,
    /// Service name.
    pub service: String,
    /// Crate version.
    pub version: String,
    /// RFC 3339 timestamp.
    pub timestamp: String,
}

/// `POST /calculate-shipping`
///
/// # Errors
///
/// 400 for an unparsable body or an invalid postal code; 500 otherwise.
pub async fn calculate_shipping(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ShippingRequest>, JsonRejection>,
) -> Result<Json<ShippingResponse>, ApiError> {
    let Json(request) = payload?;
    let raw = request.customer_zip_code.unwrap_or_default();

    let quote = state.estimator.estimate(&raw).await?;
    Ok(Json(ShippingResponse::from(&quote)))
}

/// `POST /calculate-distance`
///
/// # Errors
///
/// 400 for a blank or rejected origin/destination; 503 when no distance
/// could be determined.
pub async fn calculate_distance(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<DistanceRequest>, JsonRejection>,
) -> Result<Json<DistanceResponse>, ApiError> {
    let Json(request) = payload?;
    let origin = request.origin.unwrap_or_default();
    let destination = request.destination.unwrap_or_default();
    if origin.trim().is_empty() || destination.trim().is_empty() {
        return Err(ApiError::bad_request("origin and destination are required"));
    }

    match state.routes.road_distance(origin.trim(), destination.trim()).await {
        Ok(Some(distance)) => Ok(Json(DistanceResponse {
            distance: distance.km(),
        })),
        Ok(None) => Err(ApiError::service_unavailable(
            "distance could not be determined",
        )),
        Err(e) => Err(ApiError::bad_request(e.to_string())),
    }
}

/// `GET /health`
#[allow(clippy::unused_async)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
