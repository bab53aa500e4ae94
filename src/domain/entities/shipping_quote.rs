//! # Shipping Quote Entity
//!
//! The per-request result of a shipping estimate.
//!
//! A quote is either precise, priced from a measured distance, or an
//! estimate priced from the destination's postal prefix. Estimates never
//! carry a distance.
//!
//! # Examples
//!
//! ```
//! use storefront::domain::entities::{QuoteBasis, ShippingQuote};
//! use storefront::domain::value_objects::{DeliveryWindow, Money, ServiceTier};
//!
//! let quote = ShippingQuote::new(
//!     ServiceTier::National,
//!     Money::from_minor_units(3500),
//!     DeliveryWindow::new(5, 9).unwrap(),
//!     QuoteBasis::PostalPrefix,
//! );
//! assert!(quote.is_estimate());
//! assert_eq!(quote.service_name(), "National Delivery (estimate)");
//! ```

use crate::domain::entities::address::ResolvedAddress;
use crate::domain::value_objects::{DeliveryWindow, Distance, Money, ServiceTier};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Suffix appended to the service name of estimated quotes.
pub const ESTIMATE_SUFFIX: &str = " (estimate)";

/// How a quote was priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteBasis {
    /// Priced from the distance between origin and destination.
    Distance,
    /// Priced from the destination postal code's prefix.
    PostalPrefix,
}

impl fmt::Display for QuoteBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Distance => write!(f, "distance"),
            Self::PostalPrefix => write!(f, "postal_prefix"),
        }
    }
}

/// A computed shipping quote. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingQuote {
    tier: ServiceTier,
    price: Money,
    window: DeliveryWindow,
    basis: QuoteBasis,
    distance: Option<Distance>,
    address: Option<ResolvedAddress>,
}

impl ShippingQuote {
    /// Creates a quote with no distance or address attached.
    #[must_use]
    pub fn new(
        tier: ServiceTier,
        price: Money,
        window: DeliveryWindow,
        basis: QuoteBasis,
    ) -> Self {
        Self {
            tier,
            price,
            window,
            basis,
            distance: None,
            address: None,
        }
    }

    /// Attaches the measured distance.
    #[must_use]
    pub fn with_distance(mut self, distance: Distance) -> Self {
        self.distance = Some(distance);
        self
    }

    /// Attaches the resolved destination address, if one is known.
    #[must_use]
    pub fn with_address(mut self, address: Option<ResolvedAddress>) -> Self {
        self.address = address;
        self
    }

    /// Returns the service tier.
    #[inline]
    #[must_use]
    pub fn tier(&self) -> ServiceTier {
        self.tier
    }

    /// Returns the price.
    #[inline]
    #[must_use]
    pub fn price(&self) -> Money {
        self.price
    }

    /// Returns the delivery window.
    #[inline]
    #[must_use]
    pub fn window(&self) -> DeliveryWindow {
        self.window
    }

    /// Returns how the quote was priced.
    #[inline]
    #[must_use]
    pub fn basis(&self) -> QuoteBasis {
        self.basis
    }

    /// Returns the measured distance, if any.
    #[inline]
    #[must_use]
    pub fn distance(&self) -> Option<Distance> {
        self.distance
    }

    /// Returns the resolved destination address, if any.
    #[inline]
    #[must_use]
    pub fn address(&self) -> Option<&ResolvedAddress> {
        self.address.as_ref()
    }

    /// Returns true if the quote was priced without a measured distance.
    #[inline]
    #[must_use]
    pub fn is_estimate(&self) -> bool {
        self.basis == QuoteBasis::PostalPrefix
    }

    /// Customer-facing service name, flagged when the quote is an estimate.
    #[must_use]
    pub fn service_name(&self) -> String {
        if self.is_estimate() {
            format!("{}{}", self.tier.label(), ESTIMATE_SUFFIX)
        } else {
            self.tier.label().to_string()
        }
    }

    /// Customer-facing explanation of the quote.
    #[must_use]
    pub fn message(&self) -> String {
        match self.basis {
            QuoteBasis::Distance => self.tier.description().to_string(),
            QuoteBasis::PostalPrefix => format!(
                "{} (estimated from postal code, distance unavailable)",
                self.tier.description()
            ),
        }
    }
}

impl fmt::Display for ShippingQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ShippingQuote({} {} {} basis={}",
            self.tier, self.price, self.window, self.basis
        )?;
        if let Some(distance) = self.distance {
            write!(f, " distance={}km", distance)?;
        }
        write!(f, ")")
    }
}
