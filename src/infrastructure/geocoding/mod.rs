//! # Geocoding Adapters
//!
//! Address, coordinate and road-distance lookups.
//!
//! - [`ViaCepClient`]: Address by postal code
//! - [`GoogleMapsClient`]: Coordinates and road distance
//! - [`StaticGeocoder`]: Fixed in-memory answers

pub mod error;
pub mod google;
pub mod http_client;
pub mod in_memory;
pub mod traits;
pub mod viacep;

pub use error::{ResolutionError, ResolutionResult};
pub use google::{DEFAULT_GOOGLE_BASE_URL, GoogleMapsClient};
pub use http_client::HttpClient;
pub use in_memory::StaticGeocoder;
pub use traits::{AddressResolver, CoordinateResolver, GeocodeQuery, RouteDistanceResolver};
pub use viacep::{DEFAULT_VIACEP_BASE_URL, ViaCepClient};
