//! # Service Tiers and Delivery Windows
//!
//! The shared vocabulary of every shipping policy: a [`ServiceTier`] names the
//! service level, a [`DeliveryWindow`] states how many business days it takes.
//!
//! # Examples
//!
//! ```
//! use storefront::domain::value_objects::{DeliveryWindow, ServiceTier};
//!
//! assert_eq!(ServiceTier::Zone.label(), "Zone Delivery");
//! assert!(ServiceTier::Local < ServiceTier::National);
//!
//! let window = DeliveryWindow::new(1, 2).unwrap();
//! assert_eq!(window.to_string(), "1-2 business days");
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shipping service level, ordered from nearest to farthest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ServiceTier {
    /// Same street as the depot.
    Local = 0,
    /// Same neighborhood.
    Neighborhood = 1,
    /// Same broad city zone.
    Zone = 2,
    /// Elsewhere in the capital.
    Capital = 3,
    /// Metropolitan region around the capital.
    MetroArea = 4,
    /// Rest of the country.
    National = 5,
}

impl ServiceTier {
    /// All tiers, nearest first.
    pub const ALL: [Self; 6] = [
        Self::Local,
        Self::Neighborhood,
        Self::Zone,
        Self::Capital,
        Self::MetroArea,
        Self::National,
    ];

    /// Customer-facing service name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Local => "Local Delivery",
            Self::Neighborhood => "Neighborhood Delivery",
            Self::Zone => "Zone Delivery",
            Self::Capital => "Capital Delivery",
            Self::MetroArea => "Metro-Area Delivery",
            Self::National => "National Delivery",
        }
    }

    /// Short customer-facing explanation of where the tier applies.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Local => "Free shipping - same street as our store",
            Self::Neighborhood => "Delivery within the same neighborhood",
            Self::Zone => "Delivery within the same city zone",
            Self::Capital => "Delivery to other zones of the capital",
            Self::MetroArea => "Delivery within the metropolitan region",
            Self::National => "Delivery to other regions of Brazil",
        }
    }
}

impl fmt::Display for ServiceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Estimated delivery time in business days, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "WindowFields")]
pub struct DeliveryWindow {
    min_days: u8,
    max_days: u8,
}

#[derive(Deserialize)]
struct WindowFields {
    min_days: u8,
    max_days: u8,
}

impl TryFrom<WindowFields> for DeliveryWindow {
    type Error = DomainError;

    fn try_from(fields: WindowFields) -> Result<Self, Self::Error> {
        Self::new(fields.min_days, fields.max_days)
    }
}

impl DeliveryWindow {
    /// Same-day delivery.
    pub const SAME_DAY: Self = Self {
        min_days: 0,
        max_days: 0,
    };

    /// Creates a window of `min_days..=max_days` business days.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidConfiguration` if `min_days > max_days`.
    pub fn new(min_days: u8, max_days: u8) -> DomainResult<Self> {
        if min_days > max_days {
            return Err(DomainError::invalid_configuration(format!(
                "delivery window {}..={} is reversed",
                min_days, max_days
            )));
        }
        Ok(Self { min_days, max_days })
    }

    /// Minimum business days.
    #[inline]
    #[must_use]
    pub const fn min_days(&self) -> u8 {
        self.min_days
    }

    /// Maximum business days.
    #[inline]
    #[must_use]
    pub const fn max_days(&self) -> u8 {
        self.max_days
    }
}

impl fmt::Display for DeliveryWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min_days, self.max_days) {
            (0, 0) => f.write_str("same day"),
            (1, 1) => f.write_str("1 business day"),
            (min, max) if min == max => write!(f, "{} business days", min),
            (min, max) => write!(f, "{}-{} business days", min, max),
        }
    }
}
