//! # Money Value Object
//!
//! Shipping prices held in currency minor units (centavos).
//!
//! Every price in configuration and in the policies is an integer count of
//! centavos; conversion to a decimal amount of reais only happens at the
//! API edge through [`Money::to_decimal`].
//!
//! # Examples
//!
//! ```
//! use storefront::domain::value_objects::Money;
//! use rust_decimal::Decimal;
//!
//! let price = Money::from_minor_units(1500);
//! assert_eq!(price.to_decimal(), Decimal::new(1500, 2));
//! assert_eq!(price.to_string(), "R$ 15.00");
//! assert!(Money::ZERO.is_zero());
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// ISO 4217 code of the only currency the store sells in.
pub const CURRENCY: &str = "BRL";

/// A non-negative amount in minor units of [`CURRENCY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    /// Zero, i.e. free shipping.
    pub const ZERO: Self = Self(0);

    /// Creates an amount from minor units (centavos).
    #[inline]
    #[must_use]
    pub const fn from_minor_units(cents: u64) -> Self {
        Self(cents)
    }

    /// Returns the amount in minor units.
    #[inline]
    #[must_use]
    pub const fn minor_units(&self) -> u64 {
        self.0
    }

    /// Returns true for a zero amount.
    #[inline]
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns the amount in major units (reais) as an exact decimal.
    #[must_use]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::from(self.0) / Decimal::ONE_HUNDRED
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R$ {}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_conversion_is_exact() {
        assert_eq!(Money::from_minor_units(0).to_decimal(), Decimal::ZERO);
        assert_eq!(
            Money::from_minor_units(3500).to_decimal(),
            Decimal::new(35, 0)
        );
        assert_eq!(
            Money::from_minor_units(1099).to_decimal(),
            Decimal::new(1099, 2)
        );
    }

    #[test]
    fn display_pads_centavos() {
        assert_eq!(Money::from_minor_units(5).to_string(), "R$ 0.05");
        assert_eq!(Money::from_minor_units(1100).to_string(), "R$ 11.00");
    }

    #[test]
    fn ordering_follows_amount() {
        assert!(Money::from_minor_units(1000) < Money::from_minor_units(1500));
        assert_eq!(Money::default(), Money::ZERO);
    }
}
