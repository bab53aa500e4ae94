//! # Application Services
//!
//! - [`ShippingEstimator`]: Resolves locations and picks a pricing policy
//! - [`ShippingPolicy`]: Strategies that price a shipment

pub mod shipping_estimator;
pub mod shipping_policy;

pub use shipping_estimator::{EstimatorConfig, FallbackReason, ShippingEstimator};
pub use shipping_policy::{
    DistanceTierPolicy, PerKilometerPolicy, PrefixFallbackPolicy, ShipmentContext, ShippingPolicy,
};
