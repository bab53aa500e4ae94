//! # Domain Layer
//!
//! Postal codes, coordinates, tiers and the rules that price a shipment.
//! Nothing in this layer performs I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;
