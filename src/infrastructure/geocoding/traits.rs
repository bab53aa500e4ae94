//! # Resolver Traits
//!
//! Ports for the lookups the shipping estimator depends on.
//!
//! Every lookup answers `Ok(None)` when it cannot produce a result for an
//! ordinary reason (not found, timeout, upstream outage, quota, bad
//! credentials, unparsable body). Those failures are logged by the adapter
//! through [`absorb`]. Only `ResolutionError::InvalidRequest` reaches the
//! caller as `Err`.
//!
//! # Examples
//!
//! ```ignore
//! use storefront::infrastructure::geocoding::traits::{AddressResolver, GeocodeQuery};
//!
//! struct MyLookup;
//!
//! #[async_trait::async_trait]
//! impl AddressResolver for MyLookup {
//!     // ...
//! }
//! ```

use crate::domain::entities::ResolvedAddress;
use crate::domain::value_objects::{Distance, GeoCoordinate, PostalCode};
use crate::infrastructure::geocoding::error::ResolutionResult;
use async_trait::async_trait;
use std::fmt;

/// What to geocode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeocodeQuery {
    /// A street address found by postal-code lookup.
    Address(ResolvedAddress),
    /// A bare postal code.
    PostalCode(PostalCode),
}

impl GeocodeQuery {
    /// Returns the postal code the query refers to.
    #[must_use]
    pub fn postal_code(&self) -> &PostalCode {
        match self {
            Self::Address(address) => &address.postal_code,
            Self::PostalCode(code) => code,
        }
    }

    /// Free-text form sent to geocoding providers.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        match self {
            Self::Address(address) => address.geocoding_query(),
            Self::PostalCode(code) => format!("{}, Brazil", code),
        }
    }
}

impl fmt::Display for GeocodeQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address(address) => write!(f, "address({})", address),
            Self::PostalCode(code) => write!(f, "postal_code({})", code),
        }
    }
}

/// Looks up a street address by postal code.
#[async_trait]
pub trait AddressResolver: Send + Sync + fmt::Debug {
    /// Resolves the address for a postal code.
    ///
    /// # Errors
    ///
    /// Returns `ResolutionError::InvalidRequest` only; every other failure
    /// is reported as `Ok(None)`.
    async fn resolve_address(
        &self,
        postal_code: &PostalCode,
    ) -> ResolutionResult<Option<ResolvedAddress>>;

    /// Returns the adapter name used in logs.
    fn name(&self) -> &'static str;
}

/// Looks up a coordinate for an address or postal code.
#[async_trait]
pub trait CoordinateResolver: Send + Sync + fmt::Debug {
    /// Resolves the coordinate for a query.
    ///
    /// # Errors
    ///
    /// Returns `ResolutionError::InvalidRequest` only; every other failure
    /// is reported as `Ok(None)`.
    async fn resolve_coordinate(
        &self,
        query: &GeocodeQuery,
    ) -> ResolutionResult<Option<GeoCoordinate>>;

    /// Returns false when no query can ever produce a coordinate.
    fn can_resolve(&self) -> bool {
        true
    }

    /// Returns the adapter name used in logs.
    fn name(&self) -> &'static str;
}

/// Measures the road distance between two free-text places.
#[async_trait]
pub trait RouteDistanceResolver: Send + Sync + fmt::Debug {
    /// Returns the driving distance from `origin` to `destination`.
    ///
    /// # Errors
    ///
    /// Returns `ResolutionError::InvalidRequest` only; every other failure
    /// is reported as `Ok(None)`.
    async fn road_distance(
        &self,
        origin: &str,
        destination: &str,
    ) -> ResolutionResult<Option<Distance>>;

    /// Returns the adapter name used in logs.
    fn name(&self) -> &'static str;
}

/// Turns an unavailable lookup into `Ok(None)`, logging the cause.
///
/// # Errors
///
/// Passes `ResolutionError::InvalidRequest` through unchanged.
pub fn absorb<T>(
    provider: &'static str,
    operation: &'static str,
    result: ResolutionResult<Option<T>>,
) -> ResolutionResult<Option<T>> {
    match result {
        Ok(value) => Ok(value),
        Err(e) if e.is_not_found() => {
            tracing::debug!(provider, operation, error = %e, "lookup found no result");
            Ok(None)
        }
        Err(e) if e.is_unavailable() => {
            tracing::warn!(provider, operation, error = %e, "lookup failed, continuing without it");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::infrastructure::geocoding::error::ResolutionError;

    #[test]
    fn absorb_keeps_values() {
        let result = absorb("test", "op", Ok(Some(42)));
        assert_eq!(result.unwrap(), Some(42));
    }

    #[test]
    fn absorb_swallows_unavailable() {
        let result: ResolutionResult<Option<u8>> =
            absorb("test", "op", Err(ResolutionError::timeout("slow")));
        assert_eq!(result.unwrap(), None);

        let result: ResolutionResult<Option<u8>> =
            absorb("test", "op", Err(ResolutionError::not_found("none")));
        assert_eq!(result.unwrap(), None);
    }

    #[test]
    fn absorb_passes_invalid_request() {
        let result: ResolutionResult<Option<u8>> =
            absorb("test", "op", Err(ResolutionError::invalid_request("bad")));
        assert!(matches!(result, Err(ResolutionError::InvalidRequest { .. })));
    }

    #[test]
    fn query_strings() {
        let cep = PostalCode::parse("01311-000").unwrap();
        let query = GeocodeQuery::PostalCode(cep.clone());
        assert_eq!(query.to_query_string(), "01311-000, Brazil");
        assert_eq!(query.postal_code(), &cep);
        assert_eq!(query.to_string(), "postal_code(01311-000)");
    }
}
