//! # Shipping Rules
//!
//! Named, overridable parameters for the shipping policies.
//!
//! This module provides:
//! - [`DistanceBreakpoints`]: Upper distance bound of each tier
//! - [`TierSchedule`]: Price and delivery window of each tier
//! - [`PrefixRules`]: CEP prefixes standing in for distance when geocoding fails
//! - [`PerKilometerRate`]: Clamped linear pricing for the per-km variant
//!
//! All values deserialize from configuration and default to the rules the
//! store ships with today. Each type has a `validate` method that enforces
//! the ordering constraints the policies rely on.
//!
//! # Examples
//!
//! ```
//! use storefront::domain::value_objects::{Distance, DistanceBreakpoints, ServiceTier};
//!
//! let breakpoints = DistanceBreakpoints::default();
//! breakpoints.validate().unwrap();
//!
//! let tier = breakpoints.classify(Distance::from_km(5.0).unwrap());
//! assert_eq!(tier, ServiceTier::Zone);
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::geo::Distance;
use crate::domain::value_objects::money::Money;
use crate::domain::value_objects::postal_code::{POSTAL_CODE_DIGITS, PostalCode};
use crate::domain::value_objects::service_tier::{DeliveryWindow, ServiceTier};
use serde::{Deserialize, Serialize};

/// Upper bound, in kilometers, of each distance tier.
///
/// A distance belongs to the first tier whose bound it does not exceed;
/// anything past `metro_km` is national.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistanceBreakpoints {
    /// Free delivery radius.
    pub free_radius_km: f64,
    /// Neighborhood delivery radius.
    pub neighborhood_km: f64,
    /// City zone radius.
    pub zone_km: f64,
    /// Capital city radius.
    pub city_km: f64,
    /// Metropolitan region radius.
    pub metro_km: f64,
}

impl Default for DistanceBreakpoints {
    fn default() -> Self {
        Self {
            free_radius_km: 0.3,
            neighborhood_km: 2.0,
            zone_km: 8.0,
            city_km: 20.0,
            metro_km: 50.0,
        }
    }
}

impl DistanceBreakpoints {
    fn bounds(&self) -> [(ServiceTier, f64); 5] {
        [
            (ServiceTier::Local, self.free_radius_km),
            (ServiceTier::Neighborhood, self.neighborhood_km),
            (ServiceTier::Zone, self.zone_km),
            (ServiceTier::Capital, self.city_km),
            (ServiceTier::MetroArea, self.metro_km),
        ]
    }

    /// Checks that the bounds are finite, non-negative and strictly increasing.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidConfiguration` describing the first
    /// offending bound.
    pub fn validate(&self) -> DomainResult<()> {
        let mut previous: Option<f64> = None;
        for (tier, bound) in self.bounds() {
            if !bound.is_finite() || bound < 0.0 {
                return Err(DomainError::invalid_configuration(format!(
                    "{} bound must be a non-negative number, got {}",
                    tier, bound
                )));
            }
            if previous.is_some_and(|p| bound <= p) {
                return Err(DomainError::invalid_configuration(format!(
                    "{} bound {} km must exceed the previous tier's bound",
                    tier, bound
                )));
            }
            previous = Some(bound);
        }
        Ok(())
    }

    /// Returns the tier a distance falls into.
    #[must_use]
    pub fn classify(&self, distance: Distance) -> ServiceTier {
        self.bounds()
            .into_iter()
            .find(|(_, bound)| distance.km() <= *bound)
            .map_or(ServiceTier::National, |(tier, _)| tier)
    }
}

/// Price and delivery window for one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierTerms {
    /// Price in minor units.
    pub price_cents: u64,
    /// Minimum business days.
    pub min_days: u8,
    /// Maximum business days.
    pub max_days: u8,
}

impl TierTerms {
    /// Creates tier terms.
    #[must_use]
    pub const fn new(price_cents: u64, min_days: u8, max_days: u8) -> Self {
        Self {
            price_cents,
            min_days,
            max_days,
        }
    }

    /// Returns the price.
    #[inline]
    #[must_use]
    pub const fn price(&self) -> Money {
        Money::from_minor_units(self.price_cents)
    }

    /// Returns the delivery window.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidConfiguration` if the window is reversed.
    pub fn window(&self) -> DomainResult<DeliveryWindow> {
        DeliveryWindow::new(self.min_days, self.max_days)
    }
}

/// Terms for every tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierSchedule {
    /// Local delivery terms.
    pub local: TierTerms,
    /// Neighborhood delivery terms.
    pub neighborhood: TierTerms,
    /// Zone delivery terms.
    pub zone: TierTerms,
    /// Capital delivery terms.
    pub capital: TierTerms,
    /// Metro-area delivery terms.
    pub metro_area: TierTerms,
    /// National delivery terms.
    pub national: TierTerms,
}

impl Default for TierSchedule {
    fn default() -> Self {
        Self {
            local: TierTerms::new(0, 0, 0),
            neighborhood: TierTerms::new(1000, 1, 1),
            zone: TierTerms::new(1500, 1, 2),
            capital: TierTerms::new(1800, 2, 3),
            metro_area: TierTerms::new(2500, 3, 4),
            national: TierTerms::new(3500, 5, 9),
        }
    }
}

impl TierSchedule {
    /// Returns the terms for a tier.
    #[must_use]
    pub const fn terms(&self, tier: ServiceTier) -> &TierTerms {
        match tier {
            ServiceTier::Local => &self.local,
            ServiceTier::Neighborhood => &self.neighborhood,
            ServiceTier::Zone => &self.zone,
            ServiceTier::Capital => &self.capital,
            ServiceTier::MetroArea => &self.metro_area,
            ServiceTier::National => &self.national,
        }
    }

    /// Checks that every window is well-formed and that prices never drop
    /// from a nearer tier to a farther one.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidConfiguration` on the first violation.
    pub fn validate(&self) -> DomainResult<()> {
        let mut previous: Option<(ServiceTier, u64)> = None;
        for tier in ServiceTier::ALL {
            let terms = self.terms(tier);
            terms.window()?;
            if let Some((nearer, price)) = previous
                && terms.price_cents < price
            {
                return Err(DomainError::invalid_configuration(format!(
                    "{} price {} is below {} price {}",
                    tier,
                    terms.price(),
                    nearer,
                    Money::from_minor_units(price)
                )));
            }
            previous = Some((tier, terms.price_cents));
        }
        Ok(())
    }
}

/// Postal-prefix rules used when no distance is available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrefixRules {
    /// Leading digits a destination must share with the origin to count as
    /// the same neighborhood.
    pub neighborhood_prefix_len: usize,
    /// Prefixes of the origin's city zone.
    pub zone_prefixes: Vec<String>,
    /// Prefixes of the rest of the capital.
    pub capital_prefixes: Vec<String>,
    /// Prefixes of the metropolitan region.
    pub metro_prefixes: Vec<String>,
}

impl Default for PrefixRules {
    fn default() -> Self {
        let owned = |prefixes: &[&str]| -> Vec<String> {
            prefixes.iter().map(|p| (*p).to_string()).collect()
        };
        Self {
            neighborhood_prefix_len: 5,
            zone_prefixes: owned(&["03"]),
            capital_prefixes: owned(&["01", "02", "04", "05"]),
            metro_prefixes: owned(&["06", "07", "08", "09"]),
        }
    }
}

impl PrefixRules {
    /// Checks the prefix length and that every prefix is 1 to 8 digits.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidConfiguration` on the first bad entry.
    pub fn validate(&self) -> DomainResult<()> {
        if !(1..=POSTAL_CODE_DIGITS).contains(&self.neighborhood_prefix_len) {
            return Err(DomainError::invalid_configuration(format!(
                "neighborhood prefix length must be 1..={}, got {}",
                POSTAL_CODE_DIGITS, self.neighborhood_prefix_len
            )));
        }

        let all = self
            .zone_prefixes
            .iter()
            .chain(&self.capital_prefixes)
            .chain(&self.metro_prefixes);
        for prefix in all {
            let well_formed = !prefix.is_empty()
                && prefix.len() <= POSTAL_CODE_DIGITS
                && prefix.bytes().all(|b| b.is_ascii_digit());
            if !well_formed {
                return Err(DomainError::invalid_configuration(format!(
                    "postal prefix '{}' must be 1 to {} digits",
                    prefix, POSTAL_CODE_DIGITS
                )));
            }
        }
        Ok(())
    }

    /// Returns the tier a destination falls into relative to the origin.
    #[must_use]
    pub fn classify(&self, destination: &PostalCode, origin: &PostalCode) -> ServiceTier {
        let matches_any = |prefixes: &[String]| prefixes.iter().any(|p| destination.has_prefix(p));

        if destination == origin {
            ServiceTier::Local
        } else if destination.shares_prefix(origin, self.neighborhood_prefix_len) {
            ServiceTier::Neighborhood
        } else if matches_any(self.zone_prefixes.as_slice()) {
            ServiceTier::Zone
        } else if matches_any(self.capital_prefixes.as_slice()) {
            ServiceTier::Capital
        } else if matches_any(self.metro_prefixes.as_slice()) {
            ServiceTier::MetroArea
        } else {
            ServiceTier::National
        }
    }
}

/// Clamped linear price per kilometer, all amounts in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerKilometerRate {
    /// Price per kilometer.
    pub cents_per_km: u64,
    /// Floor applied to every quote.
    pub min_cents: u64,
    /// Ceiling applied to every quote.
    pub max_cents: u64,
}

impl Default for PerKilometerRate {
    fn default() -> Self {
        Self {
            cents_per_km: 150,
            min_cents: 1100,
            max_cents: 5500,
        }
    }
}

impl PerKilometerRate {
    /// Checks that the floor does not exceed the ceiling.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidConfiguration` if `min_cents > max_cents`.
    pub fn validate(&self) -> DomainResult<()> {
        if self.min_cents > self.max_cents {
            return Err(DomainError::invalid_configuration(format!(
                "per-km floor {} exceeds ceiling {}",
                Money::from_minor_units(self.min_cents),
                Money::from_minor_units(self.max_cents)
            )));
        }
        Ok(())
    }

    /// Computes `clamp(round(km × rate), min, max)`.
    ///
    /// An unvalidated rate whose floor exceeds its ceiling prices at the
    /// ceiling.
    #[must_use]
    pub fn price_for(&self, distance: Distance) -> Money {
        let raw = (distance.km() * self.cents_per_km as f64).round();
        let clamped = raw
            .max(self.min_cents as f64)
            .min(self.max_cents as f64);
        Money::from_minor_units(clamped as u64)
    }
}
