//! # API Layer
//!
//! HTTP surface of the service.

pub mod rest;
