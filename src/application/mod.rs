//! # Application Layer
//!
//! Use-case orchestration over the domain and the geocoding ports.

pub mod error;
pub mod services;
