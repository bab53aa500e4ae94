//! # Shipping Policies
//!
//! Strategies that turn a destination into a [`ShippingQuote`].
//!
//! This module provides the [`ShippingPolicy`] trait and three
//! implementations:
//! - [`DistanceTierPolicy`]: fixed price per distance tier
//! - [`PerKilometerPolicy`]: clamped price per kilometer, tiered windows
//! - [`PrefixFallbackPolicy`]: postal-prefix tiers when no distance is known
//!
//! # Examples
//!
//! ```
//! use storefront::application::services::shipping_policy::DistanceTierPolicy;
//!
//! let policy = DistanceTierPolicy::default();
//! let quote = policy.quote_for_distance(5.0).unwrap();
//! assert_eq!(quote.price().minor_units(), 1500);
//! assert_eq!(quote.window().to_string(), "1-2 business days");
//! ```

use crate::domain::entities::{QuoteBasis, ShippingQuote};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{
    Distance, DistanceBreakpoints, PerKilometerRate, PostalCode, PrefixRules, TierSchedule,
};
use std::fmt;

/// What a policy knows about the shipment.
#[derive(Debug, Clone, PartialEq)]
pub struct ShipmentContext {
    /// Normalized destination postal code.
    pub destination: PostalCode,
    /// Distance from the origin, when both ends were resolved.
    pub distance: Option<Distance>,
}

impl ShipmentContext {
    /// Creates a context with a measured distance.
    #[must_use]
    pub fn with_distance(destination: PostalCode, distance: Distance) -> Self {
        Self {
            destination,
            distance: Some(distance),
        }
    }

    /// Creates a context with no distance.
    #[must_use]
    pub fn without_distance(destination: PostalCode) -> Self {
        Self {
            destination,
            distance: None,
        }
    }
}

/// Trait for shipping pricing strategies.
///
/// Implementations must be total over their inputs: every valid context
/// yields a quote, and prices never decrease as tiers get farther.
pub trait ShippingPolicy: Send + Sync + fmt::Debug {
    /// Prices the shipment.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DistanceRequired` when a distance-based policy
    /// receives a context without a distance.
    fn quote(&self, context: &ShipmentContext) -> DomainResult<ShippingQuote>;

    /// Returns the name of this policy.
    fn name(&self) -> &'static str;
}

/// Fixed price and window per distance tier.
#[derive(Debug, Clone, Default)]
pub struct DistanceTierPolicy {
    breakpoints: DistanceBreakpoints,
    schedule: TierSchedule,
}

impl DistanceTierPolicy {
    /// Creates a policy from validated rules.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidConfiguration` if either argument fails
    /// validation.
    pub fn new(breakpoints: DistanceBreakpoints, schedule: TierSchedule) -> DomainResult<Self> {
        breakpoints.validate()?;
        schedule.validate()?;
        Ok(Self {
            breakpoints,
            schedule,
        })
    }

    /// Prices a raw distance in kilometers.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDistance` if `km` is negative or not finite.
    pub fn quote_for_distance(&self, km: f64) -> DomainResult<ShippingQuote> {
        self.quote_distance(Distance::from_km(km)?)
    }

    fn quote_distance(&self, distance: Distance) -> DomainResult<ShippingQuote> {
        let tier = self.breakpoints.classify(distance);
        let terms = self.schedule.terms(tier);
        Ok(
            ShippingQuote::new(tier, terms.price(), terms.window()?, QuoteBasis::Distance)
                .with_distance(distance),
        )
    }
}

impl ShippingPolicy for DistanceTierPolicy {
    fn quote(&self, context: &ShipmentContext) -> DomainResult<ShippingQuote> {
        let distance = context
            .distance
            .ok_or(DomainError::DistanceRequired(self.name()))?;
        self.quote_distance(distance)
    }

    fn name(&self) -> &'static str {
        "tiered"
    }
}

/// Clamped linear price per kilometer.
///
/// Tier and delivery window still come from the distance breakpoints; only
/// the price differs from [`DistanceTierPolicy`]. Free delivery inside the
/// local radius is kept.
#[derive(Debug, Clone, Default)]
pub struct PerKilometerPolicy {
    breakpoints: DistanceBreakpoints,
    schedule: TierSchedule,
    rate: PerKilometerRate,
}

impl PerKilometerPolicy {
    /// Creates a policy from validated rules.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidConfiguration` if any argument fails
    /// validation.
    pub fn new(
        breakpoints: DistanceBreakpoints,
        schedule: TierSchedule,
        rate: PerKilometerRate,
    ) -> DomainResult<Self> {
        breakpoints.validate()?;
        schedule.validate()?;
        rate.validate()?;
        Ok(Self {
            breakpoints,
            schedule,
            rate,
        })
    }
}

impl ShippingPolicy for PerKilometerPolicy {
    fn quote(&self, context: &ShipmentContext) -> DomainResult<ShippingQuote> {
        let distance = context
            .distance
            .ok_or(DomainError::DistanceRequired(self.name()))?;
        let tier = self.breakpoints.classify(distance);
        let terms = self.schedule.terms(tier);
        let price = if terms.price().is_zero() {
            terms.price()
        } else {
            self.rate.price_for(distance)
        };
        Ok(
            ShippingQuote::new(tier, price, terms.window()?, QuoteBasis::Distance)
                .with_distance(distance),
        )
    }

    fn name(&self) -> &'static str {
        "per_kilometer"
    }
}

/// Prices from the destination's postal prefix relative to the origin.
#[derive(Debug, Clone)]
pub struct PrefixFallbackPolicy {
    origin: PostalCode,
    rules: PrefixRules,
    schedule: TierSchedule,
}

impl PrefixFallbackPolicy {
    /// Creates a policy from validated rules.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidConfiguration` if either rule set fails
    /// validation.
    pub fn new(origin: PostalCode, rules: PrefixRules, schedule: TierSchedule) -> DomainResult<Self> {
        rules.validate()?;
        schedule.validate()?;
        Ok(Self {
            origin,
            rules,
            schedule,
        })
    }

    /// Creates a policy with the default rules.
    #[must_use]
    pub fn with_defaults(origin: PostalCode) -> Self {
        Self {
            origin,
            rules: PrefixRules::default(),
            schedule: TierSchedule::default(),
        }
    }
}

impl ShippingPolicy for PrefixFallbackPolicy {
    fn quote(&self, context: &ShipmentContext) -> DomainResult<ShippingQuote> {
        let tier = self.rules.classify(&context.destination, &self.origin);
        let terms = self.schedule.terms(tier);
        Ok(ShippingQuote::new(
            tier,
            terms.price(),
            terms.window()?,
            QuoteBasis::PostalPrefix,
        ))
    }

    fn name(&self) -> &'static str {
        "postal_prefix"
    }
}
