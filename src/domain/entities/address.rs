//! # Resolved Address
//!
//! Street address returned by a postal-code lookup.

use crate::domain::value_objects::PostalCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A street address resolved from a postal code.
///
/// Any component may be empty; lookups for city-wide CEPs commonly return
/// only city and state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedAddress {
    /// Postal code the address was resolved from.
    pub postal_code: PostalCode,
    /// Street name.
    pub street: String,
    /// Neighborhood (bairro).
    pub neighborhood: String,
    /// City.
    pub city: String,
    /// Two-letter state code.
    pub state: String,
}

impl ResolvedAddress {
    /// Formats the address for a geocoding query, skipping empty parts.
    ///
    /// ```
    /// use storefront::domain::entities::ResolvedAddress;
    /// use storefront::domain::value_objects::PostalCode;
    ///
    /// let address = ResolvedAddress {
    ///     postal_code: PostalCode::parse("01311000").unwrap(),
    ///     street: "Avenida Paulista".into(),
    ///     neighborhood: "Bela Vista".into(),
    ///     city: "São Paulo".into(),
    ///     state: "SP".into(),
    /// };
    /// assert_eq!(
    ///     address.geocoding_query(),
    ///     "Avenida Paulista, Bela Vista, São Paulo - SP, 01311-000, Brazil"
    /// );
    /// ```
    #[must_use]
    pub fn geocoding_query(&self) -> String {
        let mut parts: Vec<String> = [&self.street, &self.neighborhood]
            .into_iter()
            .filter(|p| !p.trim().is_empty())
            .cloned()
            .collect();

        match (self.city.trim().is_empty(), self.state.trim().is_empty()) {
            (false, false) => parts.push(format!("{} - {}", self.city, self.state)),
            (false, true) => parts.push(self.city.clone()),
            (true, false) => parts.push(self.state.clone()),
            (true, true) => {}
        }

        parts.push(self.postal_code.to_string());
        parts.push("Brazil".to_string());
        parts.join(", ")
    }
}

impl fmt::Display for ResolvedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line: Vec<&str> = [
            self.street.as_str(),
            self.neighborhood.as_str(),
            self.city.as_str(),
            self.state.as_str(),
        ]
        .into_iter()
        .filter(|p| !p.trim().is_empty())
        .collect();

        if line.is_empty() {
            write!(f, "{}", self.postal_code)
        } else {
            write!(f, "{}", line.join(", "))
        }
    }
}
