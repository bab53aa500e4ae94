//! # Geographic Value Objects
//!
//! Coordinates, distances and the haversine great-circle formula.
//!
//! # Examples
//!
//! ```
//! use storefront::domain::value_objects::{Distance, GeoCoordinate};
//!
//! let paulista = GeoCoordinate::new(-23.5614, -46.6559).unwrap();
//! let analia_franco = GeoCoordinate::new(-23.5605, -46.5606).unwrap();
//!
//! let d = paulista.distance_to(&analia_franco);
//! assert!(d.km() > 9.0 && d.km() < 10.5);
//! assert_eq!(analia_franco.distance_to(&analia_franco), Distance::ZERO);
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mean Earth radius used by the haversine formula, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in decimal degrees.
///
/// # Invariants
///
/// - Both components are finite
/// - Latitude is within `[-90, 90]`
/// - Longitude is within `[-180, 180]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CoordinateFields")]
pub struct GeoCoordinate {
    latitude: f64,
    longitude: f64,
}

/// Unchecked wire shape of [`GeoCoordinate`].
#[derive(Deserialize)]
struct CoordinateFields {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<CoordinateFields> for GeoCoordinate {
    type Error = DomainError;

    fn try_from(fields: CoordinateFields) -> Result<Self, Self::Error> {
        Self::new(fields.latitude, fields.longitude)
    }
}

impl GeoCoordinate {
    /// Creates a validated coordinate.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinate` if either component is NaN,
    /// infinite or out of range.
    pub fn new(latitude: f64, longitude: f64) -> DomainResult<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);

        if !valid {
            return Err(DomainError::InvalidCoordinate {
                latitude,
                longitude,
            });
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Returns the latitude in decimal degrees.
    #[inline]
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Returns the longitude in decimal degrees.
    #[inline]
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to another coordinate.
    ///
    /// ```text
    /// a = sin²(Δlat/2) + cos(lat1)·cos(lat2)·sin²(Δlon/2)
    /// d = 2 · R · atan2(√a, √(1−a))
    /// ```
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> Distance {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        // rounding can push `a` a hair outside [0, 1] for antipodal points
        let a = a.clamp(0.0, 1.0);

        Distance(2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt()))
    }
}

impl fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

/// Validates raw components and computes the haversine distance in kilometers.
///
/// # Errors
///
/// Returns `DomainError::InvalidCoordinate` if any component is malformed.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> DomainResult<f64> {
    let a = GeoCoordinate::new(lat1, lon1)?;
    let b = GeoCoordinate::new(lat2, lon2)?;
    Ok(a.distance_to(&b).km())
}

/// A non-negative, finite distance in kilometers.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Distance(f64);

impl Distance {
    /// Zero kilometers.
    pub const ZERO: Self = Self(0.0);

    /// Creates a distance from kilometers.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDistance` if the value is negative or
    /// not finite.
    pub fn from_km(km: f64) -> DomainResult<Self> {
        if !km.is_finite() || km < 0.0 {
            return Err(DomainError::InvalidDistance(km));
        }
        Ok(Self(km))
    }

    /// Creates a distance from meters.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDistance` if the value is negative or
    /// not finite.
    pub fn from_meters(meters: f64) -> DomainResult<Self> {
        Self::from_km(meters / 1000.0)
    }

    /// Returns the distance in kilometers.
    #[inline]
    #[must_use]
    pub const fn km(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl TryFrom<f64> for Distance {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_km(value)
    }
}

impl From<Distance> for f64 {
    fn from(distance: Distance) -> Self {
        distance.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TOLERANCE_KM: f64 = 1e-6;

    fn coord(lat: f64, lon: f64) -> GeoCoordinate {
        GeoCoordinate::new(lat, lon).unwrap()
    }

    #[test]
    fn rejects_out_of_range_and_nan() {
        assert!(GeoCoordinate::new(90.1, 0.0).is_err());
        assert!(GeoCoordinate::new(0.0, -180.5).is_err());
        assert!(GeoCoordinate::new(f64::NAN, 0.0).is_err());
        assert!(GeoCoordinate::new(0.0, f64::INFINITY).is_err());
        assert!(GeoCoordinate::new(-90.0, 180.0).is_ok());
    }

    #[test]
    fn deserialization_enforces_ranges() {
        let parsed: GeoCoordinate =
            serde_json::from_str(r#"{"latitude":-23.5614,"longitude":-46.5637}"#).unwrap();
        assert_eq!(parsed, coord(-23.5614, -46.5637));

        assert!(
            serde_json::from_str::<GeoCoordinate>(r#"{"latitude":500.0,"longitude":-999.0}"#)
                .is_err()
        );
        assert!(
            serde_json::from_str::<GeoCoordinate>(r#"{"latitude":0.0,"longitude":180.5}"#)
                .is_err()
        );
    }

    #[test]
    fn one_degree_of_latitude() {
        let d = coord(0.0, 0.0).distance_to(&coord(1.0, 0.0));
        let expected = EARTH_RADIUS_KM * 1f64.to_radians();
        assert!((d.km() - expected).abs() < TOLERANCE_KM);
    }

    #[test]
    fn sao_paulo_to_rio() {
        // Praça da Sé to Cinelândia, roughly 357 km apart
        let d = coord(-23.5505, -46.6333).distance_to(&coord(-22.9111, -43.1758));
        assert!(d.km() > 350.0 && d.km() < 365.0, "got {}", d);
    }

    #[test]
    fn antipodal_points_do_not_produce_nan() {
        let d = coord(0.0, 0.0).distance_to(&coord(0.0, 180.0));
        assert!(d.km().is_finite());
        assert!((d.km() - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-3);
    }

    #[test]
    fn haversine_km_validates_inputs() {
        assert!(haversine_km(f64::NAN, 0.0, 0.0, 0.0).is_err());
        assert!(haversine_km(0.0, 0.0, 100.0, 0.0).is_err());
        assert!(haversine_km(0.0, 0.0, 0.0, 0.0).unwrap().abs() < TOLERANCE_KM);
    }

    #[test]
    fn distance_rejects_negative_and_non_finite() {
        assert!(Distance::from_km(-0.01).is_err());
        assert!(Distance::from_km(f64::NAN).is_err());
        assert!(Distance::from_km(f64::INFINITY).is_err());
        assert_eq!(Distance::from_meters(2500.0).unwrap().km(), 2.5);
    }

    #[test]
    fn distance_display_has_two_decimals() {
        assert_eq!(Distance::from_km(5.0).unwrap().to_string(), "5.00");
        assert_eq!(Distance::from_km(12.3456).unwrap().to_string(), "12.35");
    }

    prop_compose! {
        fn any_coordinate()(lat in -90.0f64..=90.0, lon in -180.0f64..=180.0) -> GeoCoordinate {
            coord(lat, lon)
        }
    }

    proptest! {
        #[test]
        fn distance_is_symmetric(a in any_coordinate(), b in any_coordinate()) {
            let ab = a.distance_to(&b).km();
            let ba = b.distance_to(&a).km();
            prop_assert!((ab - ba).abs() < TOLERANCE_KM);
        }

        #[test]
        fn distance_to_self_is_zero(a in any_coordinate()) {
            prop_assert!(a.distance_to(&a).km().abs() < TOLERANCE_KM);
        }

        #[test]
        fn distance_is_bounded_by_half_circumference(a in any_coordinate(), b in any_coordinate()) {
            let d = a.distance_to(&b).km();
            prop_assert!(d >= 0.0);
            prop_assert!(d <= std::f64::consts::PI * EARTH_RADIUS_KM + TOLERANCE_KM);
        }
    }
}
