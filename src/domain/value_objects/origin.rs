//! # Shipping Origin
//!
//! The depot every quote is measured from.

use crate::domain::value_objects::geo::GeoCoordinate;
use crate::domain::value_objects::postal_code::PostalCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed depot location, set once at startup.
///
/// The coordinate is optional: when it is not configured the estimator
/// geocodes the postal code on first use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingOrigin {
    postal_code: PostalCode,
    coordinate: Option<GeoCoordinate>,
}

impl ShippingOrigin {
    /// Creates an origin known only by postal code.
    #[must_use]
    pub fn new(postal_code: PostalCode) -> Self {
        Self {
            postal_code,
            coordinate: None,
        }
    }

    /// Sets a known coordinate, skipping origin geocoding entirely.
    #[must_use]
    pub fn with_coordinate(mut self, coordinate: GeoCoordinate) -> Self {
        self.coordinate = Some(coordinate);
        self
    }

    /// Returns the origin postal code.
    #[inline]
    #[must_use]
    pub fn postal_code(&self) -> &PostalCode {
        &self.postal_code
    }

    /// Returns the configured coordinate, if any.
    #[inline]
    #[must_use]
    pub fn coordinate(&self) -> Option<GeoCoordinate> {
        self.coordinate
    }
}

impl fmt::Display for ShippingOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.coordinate {
            Some(c) => write!(f, "{} {}", self.postal_code, c),
            None => write!(f, "{}", self.postal_code),
        }
    }
}
