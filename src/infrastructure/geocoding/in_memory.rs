//! # Static Geocoder
//!
//! In-memory implementation of every resolver trait.
//!
//! Used when no Google Maps key is configured, and in tests. Lookups answer
//! from fixed tables; an optional delay simulates a slow provider and an
//! injected error simulates a failing one. Clones share the call counter.

use crate::domain::entities::ResolvedAddress;
use crate::domain::value_objects::{Distance, GeoCoordinate, PostalCode};
use crate::infrastructure::geocoding::error::{ResolutionError, ResolutionResult};
use crate::infrastructure::geocoding::traits::{
    AddressResolver, CoordinateResolver, GeocodeQuery, RouteDistanceResolver, absorb,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// In-memory resolver with fixed answers.
#[derive(Debug, Clone, Default)]
pub struct StaticGeocoder {
    addresses: HashMap<PostalCode, ResolvedAddress>,
    coordinates: HashMap<PostalCode, GeoCoordinate>,
    routes: HashMap<(String, String), Distance>,
    delay: Option<Duration>,
    failure: Option<ResolutionError>,
    calls: Arc<AtomicUsize>,
}

impl StaticGeocoder {
    /// Creates a geocoder that knows nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an address for its postal code.
    #[must_use]
    pub fn with_address(mut self, address: ResolvedAddress) -> Self {
        self.addresses.insert(address.postal_code.clone(), address);
        self
    }

    /// Adds a coordinate for a postal code, answered for both query kinds.
    #[must_use]
    pub fn with_coordinate(mut self, postal_code: PostalCode, coordinate: GeoCoordinate) -> Self {
        self.coordinates.insert(postal_code, coordinate);
        self
    }

    /// Adds a road distance between two free-text places.
    #[must_use]
    pub fn with_route(
        mut self,
        origin: impl Into<String>,
        destination: impl Into<String>,
        distance: Distance,
    ) -> Self {
        self.routes.insert((origin.into(), destination.into()), distance);
        self
    }

    /// Delays every lookup.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Makes every lookup fail with the given error.
    #[must_use]
    pub fn with_failure(mut self, error: ResolutionError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Returns how many lookups have been made across all clones.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn answer<T>(&self, found: Option<T>) -> ResolutionResult<Option<T>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(found),
        }
    }
}

#[async_trait]
impl AddressResolver for StaticGeocoder {
    async fn resolve_address(
        &self,
        postal_code: &PostalCode,
    ) -> ResolutionResult<Option<ResolvedAddress>> {
        let found = self.addresses.get(postal_code).cloned();
        absorb(
            AddressResolver::name(self),
            "resolve_address",
            self.answer(found).await,
        )
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

#[async_trait]
impl CoordinateResolver for StaticGeocoder {
    async fn resolve_coordinate(
        &self,
        query: &GeocodeQuery,
    ) -> ResolutionResult<Option<GeoCoordinate>> {
        let found = self.coordinates.get(query.postal_code()).copied();
        absorb(
            CoordinateResolver::name(self),
            "resolve_coordinate",
            self.answer(found).await,
        )
    }

    fn can_resolve(&self) -> bool {
        !self.coordinates.is_empty() || self.failure.is_some()
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

#[async_trait]
impl RouteDistanceResolver for StaticGeocoder {
    async fn road_distance(
        &self,
        origin: &str,
        destination: &str,
    ) -> ResolutionResult<Option<Distance>> {
        let found = self
            .routes
            .get(&(origin.to_string(), destination.to_string()))
            .copied();
        absorb(
            RouteDistanceResolver::name(self),
            "road_distance",
            self.answer(found).await,
        )
    }

    fn name(&self) -> &'static str {
        "static"
    }
}
