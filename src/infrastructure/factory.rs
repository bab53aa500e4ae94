//! # Service Factory
//!
//! Builds resolvers and the shipping estimator from configuration.
//!
//! With a Google Maps key, coordinates and road distances come from Google.
//! Without one, those lookups are served by an empty [`StaticGeocoder`], so
//! every shipping quote is a postal-prefix estimate and road distances are
//! unavailable. Addresses always come from ViaCEP.
//!
//! # Example
//!
//! ```ignore
//! use storefront::config::AppConfig;
//! use storefront::infrastructure::factory::{Resolvers, build_estimator};
//!
//! let config = AppConfig::load()?;
//! let resolvers = Resolvers::from_config(&config.geocoding)?;
//! let estimator = build_estimator(&config.shipping, &resolvers)?;
//! ```

use crate::application::error::ApplicationResult;
use crate::application::services::{
    DistanceTierPolicy, EstimatorConfig, PerKilometerPolicy, PrefixFallbackPolicy,
    ShippingEstimator, ShippingPolicy,
};
use crate::config::{GeocodingConfig, PricingStrategy, ShippingConfig};
use crate::infrastructure::geocoding::{
    AddressResolver, CoordinateResolver, GoogleMapsClient, ResolutionResult,
    RouteDistanceResolver, StaticGeocoder, ViaCepClient,
};
use std::sync::Arc;

/// The lookup adapters in use.
#[derive(Debug, Clone)]
pub struct Resolvers {
    /// Address by postal code.
    pub addresses: Arc<dyn AddressResolver>,
    /// Coordinate by address or postal code.
    pub coordinates: Arc<dyn CoordinateResolver>,
    /// Road distance between free-text places.
    pub routes: Arc<dyn RouteDistanceResolver>,
}

impl Resolvers {
    /// Builds the adapters selected by configuration.
    ///
    /// # Errors
    ///
    /// Returns `ResolutionError::Internal` if an HTTP client cannot be built.
    pub fn from_config(config: &GeocodingConfig) -> ResolutionResult<Self> {
        let addresses: Arc<dyn AddressResolver> = Arc::new(ViaCepClient::new(
            config.viacep_base_url.as_str(),
            config.timeout_ms,
        )?);

        match config.google_api_key() {
            Some(key) => {
                let google = Arc::new(GoogleMapsClient::new(
                    config.google_base_url.as_str(),
                    key,
                    config.timeout_ms,
                )?);
                tracing::info!(base_url = %config.google_base_url, "using google maps for coordinates");
                Ok(Self {
                    addresses,
                    coordinates: google.clone(),
                    routes: google,
                })
            }
            None => {
                tracing::warn!("no google maps api key configured, shipping quotes will be estimates");
                let offline = Arc::new(StaticGeocoder::new());
                Ok(Self {
                    addresses,
                    coordinates: offline.clone(),
                    routes: offline,
                })
            }
        }
    }

    /// Uses one in-memory geocoder for every lookup.
    #[must_use]
    pub fn in_memory(geocoder: StaticGeocoder) -> Self {
        let shared = Arc::new(geocoder);
        Self {
            addresses: shared.clone(),
            coordinates: shared.clone(),
            routes: shared,
        }
    }
}

/// Builds the distance policy selected by configuration.
///
/// # Errors
///
/// Returns `ApplicationError::Domain` if the configured rules are invalid.
pub fn build_distance_policy(config: &ShippingConfig) -> ApplicationResult<Arc<dyn ShippingPolicy>> {
    let policy: Arc<dyn ShippingPolicy> = match config.pricing.strategy {
        PricingStrategy::Tiered => Arc::new(DistanceTierPolicy::new(
            config.breakpoints,
            config.schedule,
        )?),
        PricingStrategy::PerKilometer => Arc::new(PerKilometerPolicy::new(
            config.breakpoints,
            config.schedule,
            config.pricing.per_km,
        )?),
    };
    Ok(policy)
}

/// Builds the shipping estimator.
///
/// # Errors
///
/// Returns `ApplicationError::Domain` if the origin or any rule set is
/// invalid.
pub fn build_estimator(
    config: &ShippingConfig,
    resolvers: &Resolvers,
) -> ApplicationResult<ShippingEstimator> {
    let origin = config.origin.to_origin()?;
    let distance_policy = build_distance_policy(config)?;
    let fallback_policy: Arc<dyn ShippingPolicy> = Arc::new(PrefixFallbackPolicy::new(
        origin.postal_code().clone(),
        config.prefixes.clone(),
        config.schedule,
    )?);

    tracing::info!(
        origin = %origin,
        distance_policy = distance_policy.name(),
        fallback_policy = fallback_policy.name(),
        resolution_timeout_ms = config.resolution_timeout_ms,
        "shipping estimator configured"
    );

    Ok(ShippingEstimator::new(
        origin,
        resolvers.addresses.clone(),
        resolvers.coordinates.clone(),
        distance_policy,
        fallback_policy,
        EstimatorConfig::with_timeout(config.resolution_timeout_ms),
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{DistanceBreakpoints, TierTerms};

    #[test]
    fn offline_resolvers_without_key() {
        let resolvers = Resolvers::from_config(&GeocodingConfig::default()).unwrap();
        assert_eq!(resolvers.addresses.name(), "viacep");
        assert_eq!(resolvers.coordinates.name(), "static");
        assert_eq!(resolvers.routes.name(), "static");
    }

    #[test]
    fn google_resolvers_with_key() {
        let config = GeocodingConfig {
            google_api_key: Some("test-key".to_string()),
            ..GeocodingConfig::default()
        };
        let resolvers = Resolvers::from_config(&config).unwrap();
        assert_eq!(resolvers.coordinates.name(), "google_geocoding");
        assert_eq!(resolvers.routes.name(), "google_distance_matrix");
    }

    #[test]
    fn strategy_selects_policy() {
        let mut config = ShippingConfig::default();
        assert_eq!(build_distance_policy(&config).unwrap().name(), "tiered");

        config.pricing.strategy = PricingStrategy::PerKilometer;
        assert_eq!(build_distance_policy(&config).unwrap().name(), "per_kilometer");
    }

    #[test]
    fn invalid_rules_fail_the_build() {
        let resolvers = Resolvers::in_memory(StaticGeocoder::new());

        let config = ShippingConfig {
            breakpoints: DistanceBreakpoints {
                neighborhood_km: 0.1,
                ..DistanceBreakpoints::default()
            },
            ..ShippingConfig::default()
        };
        assert!(build_estimator(&config, &resolvers).is_err());

        let mut config = ShippingConfig::default();
        config.schedule.zone = TierTerms::new(1500, 4, 2);
        assert!(build_estimator(&config, &resolvers).is_err());

        let mut config = ShippingConfig::default();
        config.origin.postal_code = "abc".to_string();
        assert!(build_estimator(&config, &resolvers).is_err());
    }
}
