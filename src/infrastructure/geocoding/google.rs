//! # Google Maps Adapter
//!
//! Coordinate lookup through the Geocoding API and road distance through the
//! Distance Matrix API.
//!
//! Both APIs answer HTTP 200 and report failures in a `status` field, which
//! is mapped onto [`ResolutionError`] here:
//!
//! | status              | error            |
//! |---------------------|------------------|
//! | `ZERO_RESULTS`, `NOT_FOUND` | `NotFound` |
//! | `OVER_QUERY_LIMIT`, `OVER_DAILY_LIMIT` | `RateLimited` |
//! | `REQUEST_DENIED`    | `Authentication` |
//! | `INVALID_REQUEST`, `MAX_ELEMENTS_EXCEEDED` | `InvalidRequest` |
//! | anything else       | `Protocol`       |

use crate::domain::value_objects::{Distance, GeoCoordinate};
use crate::infrastructure::geocoding::error::{ResolutionError, ResolutionResult};
use crate::infrastructure::geocoding::http_client::HttpClient;
use crate::infrastructure::geocoding::traits::{
    CoordinateResolver, GeocodeQuery, RouteDistanceResolver, absorb,
};
use async_trait::async_trait;
use serde::Deserialize;

/// Public Google Maps endpoint.
pub const DEFAULT_GOOGLE_BASE_URL: &str = "https://maps.googleapis.com";

const GEOCODE_PATH: &str = "/maps/api/geocode/json";
const DISTANCE_MATRIX_PATH: &str = "/maps/api/distancematrix/json";

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct DistanceMatrixResponse {
    status: String,
    #[serde(default)]
    rows: Vec<MatrixRow>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MatrixRow {
    #[serde(default)]
    elements: Vec<MatrixElement>,
}

#[derive(Debug, Deserialize)]
struct MatrixElement {
    status: String,
    #[serde(default)]
    distance: Option<MatrixDistance>,
}

#[derive(Debug, Deserialize)]
struct MatrixDistance {
    value: f64,
}

fn map_api_status(status: &str, detail: Option<&str>) -> ResolutionResult<()> {
    let message = match detail {
        Some(detail) => format!("{}: {}", status, detail),
        None => status.to_string(),
    };
    match status {
        "OK" => Ok(()),
        "ZERO_RESULTS" | "NOT_FOUND" => Err(ResolutionError::not_found(message)),
        "OVER_QUERY_LIMIT" | "OVER_DAILY_LIMIT" => Err(ResolutionError::rate_limited(message)),
        "REQUEST_DENIED" => Err(ResolutionError::authentication(message)),
        "INVALID_REQUEST" | "MAX_ELEMENTS_EXCEEDED" | "MAX_DIMENSIONS_EXCEEDED" => {
            Err(ResolutionError::invalid_request(message))
        }
        _ => Err(ResolutionError::protocol(message)),
    }
}

/// Google Maps client for geocoding and road distance.
#[derive(Debug, Clone)]
pub struct GoogleMapsClient {
    http: HttpClient,
    base_url: String,
    api_key: String,
}

impl GoogleMapsClient {
    /// Creates a client for the given base URL and API key.
    ///
    /// # Errors
    ///
    /// Returns `ResolutionError::Internal` if the HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout_ms: u64,
    ) -> ResolutionResult<Self> {
        Ok(Self {
            http: HttpClient::new(timeout_ms)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    async fn geocode(&self, query: &GeocodeQuery) -> ResolutionResult<Option<GeoCoordinate>> {
        let url = format!("{}{}", self.base_url, GEOCODE_PATH);
        let address = query.to_query_string();
        let params = [
            ("address", address.as_str()),
            ("components", "country:BR"),
            ("key", self.api_key.as_str()),
        ];

        let body: GeocodeResponse = self.http.get_with_params(&url, &params).await?;
        map_api_status(&body.status, body.error_message.as_deref())?;

        let location = body
            .results
            .first()
            .map(|r| &r.geometry.location)
            .ok_or_else(|| ResolutionError::not_found(format!("no geocode result for {}", query)))?;

        GeoCoordinate::new(location.lat, location.lng)
            .map(Some)
            .map_err(|e| ResolutionError::protocol(e.to_string()))
    }

    async fn distance_matrix(
        &self,
        origin: &str,
        destination: &str,
    ) -> ResolutionResult<Option<Distance>> {
        if origin.trim().is_empty() || destination.trim().is_empty() {
            return Err(ResolutionError::invalid_request(
                "origin and destination are required",
            ));
        }

        let url = format!("{}{}", self.base_url, DISTANCE_MATRIX_PATH);
        let params = [
            ("origins", origin),
            ("destinations", destination),
            ("key", self.api_key.as_str()),
        ];

        let body: DistanceMatrixResponse = self.http.get_with_params(&url, &params).await?;
        map_api_status(&body.status, body.error_message.as_deref())?;

        let element = body
            .rows
            .first()
            .and_then(|row| row.elements.first())
            .ok_or_else(|| ResolutionError::protocol("distance matrix returned no elements"))?;
        map_api_status(&element.status, None)?;

        let meters = element
            .distance
            .as_ref()
            .map(|d| d.value)
            .ok_or_else(|| ResolutionError::protocol("distance matrix element has no distance"))?;

        Distance::from_meters(meters)
            .map(Some)
            .map_err(|e| ResolutionError::protocol(e.to_string()))
    }
}

#[async_trait]
impl CoordinateResolver for GoogleMapsClient {
    async fn resolve_coordinate(
        &self,
        query: &GeocodeQuery,
    ) -> ResolutionResult<Option<GeoCoordinate>> {
        absorb(
            CoordinateResolver::name(self),
            "resolve_coordinate",
            self.geocode(query).await,
        )
    }

    fn name(&self) -> &'static str {
        "google_geocoding"
    }
}

#[async_trait]
impl RouteDistanceResolver for GoogleMapsClient {
    async fn road_distance(
        &self,
        origin: &str,
        destination: &str,
    ) -> ResolutionResult<Option<Distance>> {
        absorb(
            RouteDistanceResolver::name(self),
            "road_distance",
            self.distance_matrix(origin, destination).await,
        )
    }

    fn name(&self) -> &'static str {
        "google_distance_matrix"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert!(map_api_status("OK", None).is_ok());
        assert!(matches!(
            map_api_status("ZERO_RESULTS", None),
            Err(ResolutionError::NotFound { .. })
        ));
        assert!(matches!(
            map_api_status("OVER_QUERY_LIMIT", None),
            Err(ResolutionError::RateLimited { .. })
        ));
        assert!(matches!(
            map_api_status("REQUEST_DENIED", Some("bad key")),
            Err(ResolutionError::Authentication { message }) if message == "REQUEST_DENIED: bad key"
        ));
        assert!(matches!(
            map_api_status("INVALID_REQUEST", None),
            Err(ResolutionError::InvalidRequest { .. })
        ));
        assert!(matches!(
            map_api_status("UNKNOWN_ERROR", None),
            Err(ResolutionError::Protocol { .. })
        ));
    }
}
