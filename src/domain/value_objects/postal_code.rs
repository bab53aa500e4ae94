//! # Postal Code Value Object
//!
//! Brazilian postal code (CEP) normalization and validation.
//!
//! Customers type CEPs in many shapes (`03346-030`, `03.346-030`,
//! ` 03346030 `). [`PostalCode::parse`] strips everything that is not an
//! ASCII digit and accepts the result only if exactly 8 digits remain.
//!
//! # Examples
//!
//! ```
//! use storefront::domain::value_objects::PostalCode;
//!
//! let cep = PostalCode::parse("03346-030").unwrap();
//! assert_eq!(cep.as_str(), "03346030");
//! assert_eq!(cep.to_string(), "03346-030");
//!
//! assert!(PostalCode::parse("abc").is_err());
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of digits in a canonical CEP.
pub const POSTAL_CODE_DIGITS: usize = 8;

/// A canonical 8-digit Brazilian postal code.
///
/// # Invariants
///
/// - Exactly 8 ASCII digits
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PostalCode(String);

impl PostalCode {
    /// Normalizes and validates a raw postal code.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingPostalCode` if the input is empty or blank.
    /// Returns `DomainError::InvalidPostalCode` if the input does not contain
    /// exactly 8 digits once every non-digit character is removed.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        if raw.trim().is_empty() {
            return Err(DomainError::MissingPostalCode);
        }

        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        if digits.len() != POSTAL_CODE_DIGITS {
            return Err(DomainError::invalid_postal_code(raw));
        }

        Ok(Self(digits))
    }

    /// Returns the 8 bare digits.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the code starts with the given digit prefix.
    #[inline]
    #[must_use]
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }

    /// Returns true if both codes share their first `len` digits.
    ///
    /// A `len` of zero always matches; lengths past 8 compare the whole code.
    #[must_use]
    pub fn shares_prefix(&self, other: &Self, len: usize) -> bool {
        let len = len.min(POSTAL_CODE_DIGITS);
        self.0.bytes().take(len).eq(other.0.bytes().take(len))
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (head, tail) = self.0.split_at(5);
        write!(f, "{}-{}", head, tail)
    }
}

impl FromStr for PostalCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PostalCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PostalCode> for String {
    fn from(code: PostalCode) -> Self {
        code.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parse_strips_punctuation() {
        let cep = PostalCode::parse("03346-030").unwrap();
        assert_eq!(cep.as_str(), "03346030");

        let cep = PostalCode::parse(" 01.311-000 ").unwrap();
        assert_eq!(cep.as_str(), "01311000");
    }

    #[test]
    fn parse_rejects_blank_input() {
        assert_eq!(PostalCode::parse(""), Err(DomainError::MissingPostalCode));
        assert_eq!(PostalCode::parse("   "), Err(DomainError::MissingPostalCode));
    }

    #[test]
    fn parse_rejects_wrong_digit_count() {
        assert!(matches!(
            PostalCode::parse("abc"),
            Err(DomainError::InvalidPostalCode { digits: 0, .. })
        ));
        assert!(matches!(
            PostalCode::parse("0334603"),
            Err(DomainError::InvalidPostalCode { digits: 7, .. })
        ));
        assert!(matches!(
            PostalCode::parse("033460301"),
            Err(DomainError::InvalidPostalCode { digits: 9, .. })
        ));
    }

    #[test]
    fn display_uses_hyphenated_form() {
        let cep = PostalCode::parse("99999999").unwrap();
        assert_eq!(cep.to_string(), "99999-999");
    }

    #[test]
    fn prefix_helpers() {
        let a = PostalCode::parse("03346030").unwrap();
        let b = PostalCode::parse("03346999").unwrap();
        let c = PostalCode::parse("03347000").unwrap();

        assert!(a.has_prefix("03"));
        assert!(!a.has_prefix("04"));
        assert!(a.shares_prefix(&b, 5));
        assert!(!a.shares_prefix(&c, 5));
        assert!(a.shares_prefix(&c, 4));
        assert!(a.shares_prefix(&c, 0));
        assert!(!a.shares_prefix(&b, 20));
    }

    #[test]
    fn serde_uses_bare_digits() {
        let cep = PostalCode::parse("03346-030").unwrap();
        let json = serde_json::to_string(&cep).unwrap();
        assert_eq!(json, "\"03346030\"");

        let back: PostalCode = serde_json::from_str("\"03346-030\"").unwrap();
        assert_eq!(back, cep);
        assert!(serde_json::from_str::<PostalCode>("\"12\"").is_err());
    }

    proptest! {
        #[test]
        fn eight_digits_with_noise_normalize(
            digits in "[0-9]{8}",
            noise in proptest::collection::vec("[ .\\-/a-zA-Z]{0,2}", 9),
        ) {
            let mut raw = String::new();
            for (i, ch) in digits.chars().enumerate() {
                raw.push_str(noise.get(i).map(String::as_str).unwrap_or(""));
                raw.push(ch);
            }
            raw.push_str(noise.get(8).map(String::as_str).unwrap_or(""));

            let cep = PostalCode::parse(&raw).unwrap();
            prop_assert_eq!(cep.as_str(), digits.as_str());
        }

        #[test]
        fn other_digit_counts_are_rejected(raw in "[0-9a-z\\- ]{0,16}") {
            let count = raw.chars().filter(char::is_ascii_digit).count();
            prop_assume!(count != POSTAL_CODE_DIGITS);
            prop_assert!(PostalCode::parse(&raw).is_err());
        }
    }
}
