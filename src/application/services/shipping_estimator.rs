//! # Shipping Estimator
//!
//! Orchestrates postal-code validation, coordinate resolution and pricing.
//!
//! The estimator prices by great-circle distance when both the origin and
//! the destination can be located, and falls back to the postal-prefix
//! policy otherwise. Resolution runs under a single deadline; a slow or
//! failing lookup degrades the quote to an estimate instead of failing the
//! request.
//!
//! ```text
//! raw CEP ──parse──▶ PostalCode
//!                      │ same as origin? ──▶ distance 0 ──▶ distance policy
//!                      ▼
//!        ┌── origin coordinate (configured / memoized / geocoded)
//!  join ─┤
//!        └── destination address ──▶ destination coordinate
//!                      │ both found? ──▶ haversine ──▶ distance policy
//!                      ▼
//!               prefix fallback policy (estimate)
//! ```

use crate::application::error::ApplicationResult;
use crate::application::services::shipping_policy::{ShipmentContext, ShippingPolicy};
use crate::domain::entities::{ResolvedAddress, ShippingQuote};
use crate::domain::value_objects::{Distance, GeoCoordinate, PostalCode, ShippingOrigin};
use crate::infrastructure::geocoding::error::ResolutionResult;
use crate::infrastructure::geocoding::traits::{
    AddressResolver, CoordinateResolver, GeocodeQuery,
};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tokio::time::timeout;

/// Configuration for the shipping estimator.
#[derive(Debug, Clone)]
pub struct EstimatorConfig {
    /// Deadline for the whole resolution stage in milliseconds.
    pub resolution_timeout_ms: u64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            resolution_timeout_ms: 4000,
        }
    }
}

impl EstimatorConfig {
    /// Creates a configuration with the specified resolution deadline.
    #[must_use]
    pub fn with_timeout(resolution_timeout_ms: u64) -> Self {
        Self {
            resolution_timeout_ms,
        }
    }

    fn deadline(&self) -> Duration {
        Duration::from_millis(self.resolution_timeout_ms)
    }
}

/// Why a quote fell back to the postal-prefix policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// The resolution deadline elapsed.
    Timeout,
    /// The origin could not be located.
    OriginUnresolved,
    /// The destination could not be located.
    DestinationUnresolved,
}

impl FallbackReason {
    /// Returns the reason as a log-friendly string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::OriginUnresolved => "origin_unresolved",
            Self::DestinationUnresolved => "destination_unresolved",
        }
    }
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of the resolution stage.
#[derive(Debug)]
enum Resolution {
    Located {
        distance: Distance,
        address: Option<ResolvedAddress>,
    },
    Unresolved {
        reason: FallbackReason,
        address: Option<ResolvedAddress>,
    },
}

/// Computes shipping quotes from a fixed origin.
pub struct ShippingEstimator {
    origin: ShippingOrigin,
    origin_coordinate: OnceCell<GeoCoordinate>,
    addresses: Arc<dyn AddressResolver>,
    coordinates: Arc<dyn CoordinateResolver>,
    distance_policy: Arc<dyn ShippingPolicy>,
    fallback_policy: Arc<dyn ShippingPolicy>,
    config: EstimatorConfig,
}

impl fmt::Debug for ShippingEstimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShippingEstimator")
            .field("origin", &self.origin)
            .field("origin_coordinate", &self.origin_coordinate.get())
            .field("addresses", &self.addresses.name())
            .field("coordinates", &self.coordinates.name())
            .field("distance_policy", &self.distance_policy.name())
            .field("fallback_policy", &self.fallback_policy.name())
            .field("config", &self.config)
            .finish()
    }
}

impl ShippingEstimator {
    /// Creates a new estimator.
    #[must_use]
    pub fn new(
        origin: ShippingOrigin,
        addresses: Arc<dyn AddressResolver>,
        coordinates: Arc<dyn CoordinateResolver>,
        distance_policy: Arc<dyn ShippingPolicy>,
        fallback_policy: Arc<dyn ShippingPolicy>,
        config: EstimatorConfig,
    ) -> Self {
        Self {
            origin,
            origin_coordinate: OnceCell::new(),
            addresses,
            coordinates,
            distance_policy,
            fallback_policy,
            config,
        }
    }

    /// Returns the configured origin.
    #[must_use]
    pub fn origin(&self) -> &ShippingOrigin {
        &self.origin
    }

    /// Returns the estimator configuration.
    #[must_use]
    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Quotes shipping to a raw destination postal code.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Domain` with an invalid-input error if the
    /// postal code is blank or not 8 digits; no lookup is made in that case.
    /// Returns `ApplicationError::Resolution` only for a malformed lookup
    /// request.
    pub async fn estimate(&self, raw_postal_code: &str) -> ApplicationResult<ShippingQuote> {
        let destination = PostalCode::parse(raw_postal_code)?;

        if &destination == self.origin.postal_code() {
            tracing::debug!(destination = %destination, "destination is the origin");
            let context = ShipmentContext::with_distance(destination, Distance::ZERO);
            return Ok(self.distance_policy.quote(&context)?);
        }

        let resolution = match timeout(self.config.deadline(), self.resolve(&destination)).await
        {
            Ok(resolution) => resolution?,
            Err(_) => Resolution::Unresolved {
                reason: FallbackReason::Timeout,
                address: None,
            },
        };

        match resolution {
            Resolution::Located { distance, address } => {
                let context = ShipmentContext::with_distance(destination, distance);
                let quote = self.distance_policy.quote(&context)?.with_address(address);
                tracing::info!(
                    destination = %context.destination,
                    distance_km = distance.km(),
                    tier = %quote.tier(),
                    price = %quote.price(),
                    policy = self.distance_policy.name(),
                    "shipping quoted by distance"
                );
                Ok(quote)
            }
            Resolution::Unresolved { reason, address } => {
                let context = ShipmentContext::without_distance(destination);
                let quote = self.fallback_policy.quote(&context)?.with_address(address);
                tracing::warn!(
                    destination = %context.destination,
                    reason = %reason,
                    tier = %quote.tier(),
                    price = %quote.price(),
                    "shipping estimated from postal prefix"
                );
                Ok(quote)
            }
        }
    }

    /// Resolves and memoizes the origin coordinate ahead of the first request.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Resolution` only for a malformed lookup
    /// request.
    pub async fn warm_up(&self) -> ApplicationResult<Option<GeoCoordinate>> {
        if self.origin.coordinate().is_none() && !self.coordinates.can_resolve() {
            tracing::warn!(
                origin = %self.origin,
                resolver = self.coordinates.name(),
                "coordinate resolver cannot locate the origin, quotes will be estimates"
            );
            return Ok(None);
        }
        match timeout(self.config.deadline(), self.origin_coordinate()).await {
            Ok(coordinate) => Ok(coordinate?),
            Err(_) => {
                tracing::warn!(origin = %self.origin, "origin warm-up timed out");
                Ok(None)
            }
        }
    }

    async fn resolve(&self, destination: &PostalCode) -> ResolutionResult<Resolution> {
        let (origin, located) =
            tokio::join!(self.origin_coordinate(), self.locate(destination));
        let origin = origin?;
        let (address, destination_coordinate) = located?;

        let resolution = match (origin, destination_coordinate) {
            (Some(from), Some(to)) => Resolution::Located {
                distance: from.distance_to(&to),
                address,
            },
            (None, _) => Resolution::Unresolved {
                reason: FallbackReason::OriginUnresolved,
                address,
            },
            (Some(_), None) => Resolution::Unresolved {
                reason: FallbackReason::DestinationUnresolved,
                address,
            },
        };
        Ok(resolution)
    }

    async fn origin_coordinate(&self) -> ResolutionResult<Option<GeoCoordinate>> {
        if let Some(configured) = self.origin.coordinate() {
            return Ok(Some(configured));
        }
        if let Some(memoized) = self.origin_coordinate.get() {
            return Ok(Some(*memoized));
        }
        if !self.coordinates.can_resolve() {
            return Ok(None);
        }

        let (_, coordinate) = self.locate(self.origin.postal_code()).await?;
        match coordinate {
            // a concurrent request may have filled the cell first; either value is the same origin
            Some(c) => Ok(Some(*self.origin_coordinate.get_or_init(|| async { c }).await)),
            None => {
                tracing::warn!(origin = %self.origin, "origin coordinate unresolved");
                Ok(None)
            }
        }
    }

    async fn locate(
        &self,
        postal_code: &PostalCode,
    ) -> ResolutionResult<(Option<ResolvedAddress>, Option<GeoCoordinate>)> {
        let address = self.addresses.resolve_address(postal_code).await?;
        let query = match &address {
            Some(found) => GeocodeQuery::Address(found.clone()),
            None => GeocodeQuery::PostalCode(postal_code.clone()),
        };
        let coordinate = self.coordinates.resolve_coordinate(&query).await?;
        Ok((address, coordinate))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::application::error::ApplicationError;
    use crate::application::services::shipping_policy::{
        DistanceTierPolicy, PrefixFallbackPolicy,
    };
    use crate::domain::entities::{ESTIMATE_SUFFIX, QuoteBasis};
    use crate::domain::errors::DomainError;
    use crate::domain::value_objects::ServiceTier;
    use crate::infrastructure::geocoding::error::ResolutionError;
    use crate::infrastructure::geocoding::in_memory::StaticGeocoder;

    const ORIGIN: &str = "03346030";

    fn cep(raw: &str) -> PostalCode {
        PostalCode::parse(raw).unwrap()
    }

    fn coord(lat: f64, lon: f64) -> GeoCoordinate {
        GeoCoordinate::new(lat, lon).unwrap()
    }

    fn estimator_with(geocoder: StaticGeocoder, config: EstimatorConfig) -> ShippingEstimator {
        let shared = Arc::new(geocoder);
        ShippingEstimator::new(
            ShippingOrigin::new(cep(ORIGIN)),
            shared.clone(),
            shared,
            Arc::new(DistanceTierPolicy::default()),
            Arc::new(PrefixFallbackPolicy::with_defaults(cep(ORIGIN))),
            config,
        )
    }

    fn sao_paulo() -> StaticGeocoder {
        StaticGeocoder::new()
            .with_coordinate(cep(ORIGIN), coord(-23.5614, -46.5637))
            .with_coordinate(cep("01311000"), coord(-23.5614, -46.6559))
    }

    #[tokio::test]
    async fn invalid_input_fails_without_lookups() {
        let geocoder = sao_paulo();
        let estimator = estimator_with(geocoder.clone(), EstimatorConfig::default());

        let err = estimator.estimate("123").await.unwrap_err();
        assert!(err.is_invalid_input());
        let err = estimator.estimate("   ").await.unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::MissingPostalCode)
        ));

        assert_eq!(geocoder.call_count(), 0);
    }

    #[tokio::test]
    async fn same_postal_code_is_free_without_lookups() {
        let geocoder = sao_paulo();
        let estimator = estimator_with(geocoder.clone(), EstimatorConfig::default());

        let quote = estimator.estimate("03346-030").await.unwrap();
        assert_eq!(quote.tier(), ServiceTier::Local);
        assert!(quote.price().is_zero());
        assert_eq!(quote.distance(), Some(Distance::ZERO));
        assert!(!quote.is_estimate());
        assert_eq!(geocoder.call_count(), 0);
    }

    #[tokio::test]
    async fn located_destination_is_priced_by_distance() {
        let estimator = estimator_with(sao_paulo(), EstimatorConfig::default());

        let quote = estimator.estimate("01311-000").await.unwrap();
        assert_eq!(quote.basis(), QuoteBasis::Distance);
        // about 9.4 km across the city
        assert_eq!(quote.tier(), ServiceTier::Capital);
        assert_eq!(quote.price().minor_units(), 1800);
        let km = quote.distance().unwrap().km();
        assert!(km > 9.0 && km < 10.0, "{}", km);
    }

    #[tokio::test]
    async fn unresolved_destination_falls_back() {
        let estimator = estimator_with(sao_paulo(), EstimatorConfig::default());

        let quote = estimator.estimate("20040-002").await.unwrap();
        assert!(quote.is_estimate());
        assert_eq!(quote.tier(), ServiceTier::National);
        assert_eq!(quote.price().minor_units(), 3500);
        assert!(quote.service_name().ends_with(ESTIMATE_SUFFIX));
        assert!(quote.distance().is_none());
    }

    #[tokio::test]
    async fn unresolved_origin_falls_back() {
        let geocoder =
            StaticGeocoder::new().with_coordinate(cep("01311000"), coord(-23.5614, -46.6559));
        let estimator = estimator_with(geocoder, EstimatorConfig::default());

        let quote = estimator.estimate("01311000").await.unwrap();
        assert!(quote.is_estimate());
        assert_eq!(quote.tier(), ServiceTier::Capital);
    }

    #[tokio::test]
    async fn slow_lookups_hit_the_deadline() {
        let geocoder = sao_paulo().with_delay(Duration::from_secs(5));
        let estimator = estimator_with(geocoder, EstimatorConfig::with_timeout(50));

        let quote = estimator.estimate("01311000").await.unwrap();
        assert!(quote.is_estimate());
        assert_eq!(quote.tier(), ServiceTier::Capital);
    }

    #[tokio::test]
    async fn invalid_request_surfaces_as_error() {
        let geocoder = StaticGeocoder::new().with_failure(ResolutionError::invalid_request("bad"));
        let estimator = estimator_with(geocoder, EstimatorConfig::default());

        let err = estimator.estimate("01311000").await.unwrap_err();
        assert!(matches!(err, ApplicationError::Resolution(_)));
        assert!(!err.is_invalid_input());
    }

    #[tokio::test]
    async fn origin_coordinate_is_memoized() {
        let geocoder = sao_paulo();
        let estimator = estimator_with(geocoder.clone(), EstimatorConfig::default());

        let warmed = estimator.warm_up().await.unwrap();
        assert!(warmed.is_some());
        // address lookup + coordinate lookup
        assert_eq!(geocoder.call_count(), 2);

        estimator.estimate("01311000").await.unwrap();
        assert_eq!(geocoder.call_count(), 4);
        estimator.estimate("01311000").await.unwrap();
        assert_eq!(geocoder.call_count(), 6);
    }

    #[tokio::test]
    async fn configured_origin_coordinate_skips_lookup() {
        let geocoder = sao_paulo();
        let shared = Arc::new(geocoder.clone());
        let estimator = ShippingEstimator::new(
            ShippingOrigin::new(cep(ORIGIN)).with_coordinate(coord(-23.5614, -46.5637)),
            shared.clone(),
            shared,
            Arc::new(DistanceTierPolicy::default()),
            Arc::new(PrefixFallbackPolicy::with_defaults(cep(ORIGIN))),
            EstimatorConfig::default(),
        );

        estimator.warm_up().await.unwrap();
        assert_eq!(geocoder.call_count(), 0);
    }

    #[tokio::test]
    async fn origin_is_not_looked_up_when_coordinates_are_unavailable() {
        let addresses = StaticGeocoder::new().with_address(ResolvedAddress {
            postal_code: cep("01311000"),
            street: "Avenida Paulista".to_string(),
            neighborhood: "Bela Vista".to_string(),
            city: "São Paulo".to_string(),
            state: "SP".to_string(),
        });
        let estimator = ShippingEstimator::new(
            ShippingOrigin::new(cep(ORIGIN)),
            Arc::new(addresses.clone()),
            Arc::new(StaticGeocoder::new()),
            Arc::new(DistanceTierPolicy::default()),
            Arc::new(PrefixFallbackPolicy::with_defaults(cep(ORIGIN))),
            EstimatorConfig::default(),
        );

        assert!(estimator.warm_up().await.unwrap().is_none());
        assert_eq!(addresses.call_count(), 0);

        let quote = estimator.estimate("01311000").await.unwrap();
        assert!(quote.is_estimate());
        assert!(quote.address().is_some());
        // destination address only
        assert_eq!(addresses.call_count(), 1);

        estimator.estimate("01311000").await.unwrap();
        assert_eq!(addresses.call_count(), 2);
    }

    #[test]
    fn fallback_reasons_render_for_logs() {
        assert_eq!(FallbackReason::Timeout.to_string(), "timeout");
        assert_eq!(
            FallbackReason::DestinationUnresolved.as_str(),
            "destination_unresolved"
        );
    }
}
