#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end tests for the REST API through a real axum router backed by
//! in-memory resolvers.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::{Duration, Instant};
use storefront::api::rest::{AppState, create_router};
use storefront::config::{PricingStrategy, ShippingConfig};
use storefront::domain::entities::ResolvedAddress;
use storefront::domain::value_objects::{Distance, GeoCoordinate, PostalCode};
use storefront::infrastructure::factory::{Resolvers, build_estimator};
use storefront::infrastructure::geocoding::{ResolutionError, StaticGeocoder};
use tower::ServiceExt;

const ORIGIN_LAT: f64 = -23.5614;
const ORIGIN_LON: f64 = -46.5637;

/// Degrees of latitude per kilometer on a 6371 km sphere.
const DEG_PER_KM: f64 = 180.0 / (std::f64::consts::PI * 6371.0);

fn cep(raw: &str) -> PostalCode {
    PostalCode::parse(raw).unwrap()
}

fn km_north_of_origin(km: f64) -> GeoCoordinate {
    GeoCoordinate::new(ORIGIN_LAT + km * DEG_PER_KM, ORIGIN_LON).unwrap()
}

fn sao_paulo() -> StaticGeocoder {
    StaticGeocoder::new()
        .with_coordinate(
            cep("03346030"),
            GeoCoordinate::new(ORIGIN_LAT, ORIGIN_LON).unwrap(),
        )
        .with_address(ResolvedAddress {
            postal_code: cep("01311000"),
            street: "Avenida Paulista".to_string(),
            neighborhood: "Bela Vista".to_string(),
            city: "São Paulo".to_string(),
            state: "SP".to_string(),
        })
        .with_coordinate(cep("01311000"), km_north_of_origin(5.0))
        .with_route("São Paulo", "Campinas", Distance::from_km(95.3).unwrap())
}

fn app_with(geocoder: StaticGeocoder, config: ShippingConfig) -> Router {
    let resolvers = Resolvers::in_memory(geocoder);
    let estimator = build_estimator(&config, &resolvers).unwrap();
    let state = Arc::new(AppState {
        estimator: Arc::new(estimator),
        routes: resolvers.routes.clone(),
    });
    create_router(state, &[])
}

fn app(geocoder: StaticGeocoder) -> Router {
    app_with(geocoder, ShippingConfig::default())
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let json = serde_json::from_slice(&body).expect("Failed to parse JSON body");
    (status, json)
}

async fn quote(app: Router, zip: &str) -> (StatusCode, Value) {
    send(
        app,
        post_json("/calculate-shipping", &json!({ "customerZipCode": zip })),
    )
    .await
}

#[tokio::test]
async fn origin_postal_code_ships_free() {
    let geocoder = sao_paulo();
    let (status, body) = quote(app(geocoder.clone()), "03346-030").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["servico"], "Local Delivery");
    assert_eq!(body["valor"], 0.0);
    assert_eq!(body["prazo"], "same day");
    assert_eq!(body["distanciaKm"], "0.00");
    assert_eq!(geocoder.call_count(), 0);
}

#[tokio::test]
async fn located_destination_is_priced_by_distance() {
    let (status, body) = quote(app(sao_paulo()), "01311000").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["servico"], "Zone Delivery");
    assert_eq!(body["valor"], 15.0);
    assert_eq!(body["prazo"], "1-2 business days");
    assert_eq!(body["distanciaKm"], "5.00");
    assert_eq!(body["endereco"], "Avenida Paulista, Bela Vista, São Paulo, SP");
}

#[tokio::test]
async fn per_kilometer_strategy_prices_located_destination() {
    let mut config = ShippingConfig::default();
    config.pricing.strategy = PricingStrategy::PerKilometer;

    let (status, body) = quote(app_with(sao_paulo(), config), "01311000").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["servico"], "Zone Delivery");
    // 5 km at R$ 1.50/km is below the R$ 11.00 floor
    assert_eq!(body["valor"], 11.0);
}

#[tokio::test]
async fn unknown_destination_falls_back_to_prefix_estimate() {
    let (status, body) = quote(app(sao_paulo()), "99999999").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["servico"], "National Delivery (estimate)");
    assert_eq!(body["valor"], 35.0);
    assert_eq!(body["prazo"], "5-9 business days");
    assert!(body.get("distanciaKm").is_none());
    assert!(body.get("endereco").is_none());
}

#[tokio::test]
async fn malformed_postal_code_is_rejected_without_lookups() {
    let geocoder = sao_paulo();
    let (status, body) = quote(app(geocoder.clone()), "abc").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"].as_str().unwrap().contains("invalid postal code"),
        "{}",
        body
    );
    assert_eq!(geocoder.call_count(), 0);
}

#[tokio::test]
async fn missing_postal_code_is_rejected() {
    let (status, body) = send(app(sao_paulo()), post_json("/calculate-shipping", &json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "postal code is required");
}

#[tokio::test]
async fn unparsable_body_is_rejected() {
    let request = Request::builder()
        .method("POST")
        .uri("/calculate-shipping")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = send(app(sao_paulo()), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn slow_resolution_falls_back_within_deadline() {
    let mut config = ShippingConfig::default();
    config.resolution_timeout_ms = 100;
    let geocoder = sao_paulo().with_delay(Duration::from_secs(10));

    let started = Instant::now();
    let (status, body) = quote(app_with(geocoder, config), "01311000").await;
    let elapsed = started.elapsed();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["servico"], "Capital Delivery (estimate)");
    assert_eq!(body["valor"], 18.0);
    assert!(body.get("distanciaKm").is_none());
    assert!(elapsed < Duration::from_secs(2), "took {:?}", elapsed);
}

#[tokio::test]
async fn malformed_lookup_request_is_an_internal_error() {
    let geocoder = StaticGeocoder::new().with_failure(ResolutionError::invalid_request("bad"));
    let (status, body) = quote(app(geocoder), "01311000").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "internal server error");
}

#[tokio::test]
async fn road_distance_is_returned_in_km() {
    let (status, body) = send(
        app(sao_paulo()),
        post_json(
            "/calculate-distance",
            &json!({ "origin": "São Paulo", "destination": "Campinas" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["distance"], 95.3);
}

#[tokio::test]
async fn road_distance_requires_both_places() {
    let (status, body) = send(
        app(sao_paulo()),
        post_json("/calculate-distance", &json!({ "origin": "São Paulo" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "origin and destination are required");
}

#[tokio::test]
async fn unknown_road_distance_is_unavailable() {
    let (status, body) = send(
        app(sao_paulo()),
        post_json(
            "/calculate-distance",
            &json!({ "origin": "São Paulo", "destination": "Atlantis" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "distance could not be determined");
}

#[tokio::test]
async fn health_check() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(app(sao_paulo()), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "storefront");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn cors_allows_configured_origin() {
    let resolvers = Resolvers::in_memory(sao_paulo());
    let estimator = build_estimator(&ShippingConfig::default(), &resolvers).unwrap();
    let state = Arc::new(AppState {
        estimator: Arc::new(estimator),
        routes: resolvers.routes.clone(),
    });
    let app = create_router(state, &["https://bichinhosousados.com".to_string()]);

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/calculate-shipping")
        .header(header::ORIGIN, "https://bichinhosousados.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "https://bichinhosousados.com"
    );
}
