//! # Entities
//!
//! - [`ShippingQuote`]: Result of a shipping estimate
//! - [`ResolvedAddress`]: Address returned by postal-code lookup

pub mod address;
pub mod shipping_quote;

pub use address::ResolvedAddress;
pub use shipping_quote::{ESTIMATE_SUFFIX, QuoteBasis, ShippingQuote};
