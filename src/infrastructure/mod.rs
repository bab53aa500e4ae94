//! # Infrastructure Layer
//!
//! Adapters for the external services the shipping estimator calls, and the
//! factory that wires them from configuration.

pub mod factory;
pub mod geocoding;
