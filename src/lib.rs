//! # Storefront
//!
//! Shipping-cost estimation backend for a small Brazilian e-commerce site.
//!
//! Given a destination postal code (CEP), the service prices a delivery from
//! a fixed depot. When both ends can be geocoded the price follows the
//! great-circle distance; otherwise it is estimated from the postal prefix.
//!
//! # Architecture
//!
//! - [`domain`]: Postal codes, coordinates, tiers and pricing rules
//! - [`application`]: Shipping policies and the estimator
//! - [`infrastructure`]: ViaCEP and Google Maps adapters, wiring
//! - [`api`]: axum REST endpoints
//! - [`config`], [`telemetry`]: Startup concerns

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod telemetry;
