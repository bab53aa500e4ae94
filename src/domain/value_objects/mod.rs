//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Location
//!
//! - [`PostalCode`]: Normalized 8-digit CEP
//! - [`GeoCoordinate`], [`Distance`]: Coordinates and haversine distance
//! - [`ShippingOrigin`]: The depot quotes are measured from
//!
//! ## Pricing
//!
//! - [`Money`]: Amounts in minor units
//! - [`ServiceTier`], [`DeliveryWindow`]: Tier vocabulary shared by all policies
//! - [`DistanceBreakpoints`], [`TierSchedule`], [`PrefixRules`],
//!   [`PerKilometerRate`]: Configurable policy parameters

pub mod geo;
pub mod money;
pub mod origin;
pub mod postal_code;
pub mod service_tier;
pub mod shipping_rules;

pub use geo::{Distance, EARTH_RADIUS_KM, GeoCoordinate, haversine_km};
pub use money::Money;
pub use origin::ShippingOrigin;
pub use postal_code::PostalCode;
pub use service_tier::{DeliveryWindow, ServiceTier};
pub use shipping_rules::{
    DistanceBreakpoints, PerKilometerRate, PrefixRules, TierSchedule, TierTerms,
};
