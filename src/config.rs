//! # Configuration
//!
//! Layered application configuration.
//!
//! Sources, later ones winning:
//!
//! 1. Built-in defaults
//! 2. `config/default.toml`, if present
//! 3. The file named by `STOREFRONT_CONFIG`, if set
//! 4. `STOREFRONT__*` environment variables, `__` between path segments
//!    (e.g. `STOREFRONT__SHIPPING__ORIGIN__POSTAL_CODE=03346030`)
//! 5. Legacy deployment variables `PORT` and `GOOGLE_MAPS_API_KEY`
//!
//! # Examples
//!
//! ```
//! use storefront::config::{AppConfig, PricingStrategy};
//!
//! let config = AppConfig::from_toml_str(r#"
//!     [shipping.pricing]
//!     strategy = "per_kilometer"
//! "#).unwrap();
//! assert_eq!(config.shipping.pricing.strategy, PricingStrategy::PerKilometer);
//! assert_eq!(config.shipping.origin.postal_code, "03346030");
//! ```

use crate::domain::errors::DomainResult;
use crate::domain::value_objects::{
    DistanceBreakpoints, GeoCoordinate, PerKilometerRate, PostalCode, PrefixRules, ShippingOrigin,
    TierSchedule,
};
use crate::infrastructure::geocoding::{DEFAULT_GOOGLE_BASE_URL, DEFAULT_VIACEP_BASE_URL};
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "STOREFRONT";

/// Environment variable naming an extra config file.
pub const CONFIG_FILE_ENV: &str = "STOREFRONT_CONFIG";

/// Root configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// External lookup settings.
    pub geocoding: GeocodingConfig,
    /// Shipping rules.
    pub shipping: ShippingConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Origins allowed by CORS. Empty allows any origin.
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            allowed_origins: vec![
                "https://bichinhosousados.com".to_string(),
                "http://localhost:3000".to_string(),
            ],
        }
    }
}

impl ServerConfig {
    /// Returns `host:port`.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable multi-line output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info,tower_http=debug".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// External lookup settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeocodingConfig {
    /// Google Maps API key. Without one, coordinates are never resolved.
    pub google_api_key: Option<String>,
    /// Google Maps base URL.
    pub google_base_url: String,
    /// ViaCEP base URL.
    pub viacep_base_url: String,
    /// Per-request HTTP timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            google_api_key: None,
            google_base_url: DEFAULT_GOOGLE_BASE_URL.to_string(),
            viacep_base_url: DEFAULT_VIACEP_BASE_URL.to_string(),
            timeout_ms: 5000,
        }
    }
}

impl GeocodingConfig {
    /// Returns the API key if one is set and not blank.
    #[must_use]
    pub fn google_api_key(&self) -> Option<&str> {
        self.google_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

/// Depot location.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OriginConfig {
    /// Depot postal code.
    pub postal_code: String,
    /// Depot latitude; skips origin geocoding together with `longitude`.
    pub latitude: Option<f64>,
    /// Depot longitude.
    pub longitude: Option<f64>,
}

impl Default for OriginConfig {
    fn default() -> Self {
        Self {
            postal_code: "03346030".to_string(),
            latitude: None,
            longitude: None,
        }
    }
}

impl OriginConfig {
    /// Builds the validated origin.
    ///
    /// # Errors
    ///
    /// Returns a `DomainError` if the postal code or coordinate is invalid.
    pub fn to_origin(&self) -> DomainResult<ShippingOrigin> {
        let origin = ShippingOrigin::new(PostalCode::parse(&self.postal_code)?);
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Ok(origin.with_coordinate(GeoCoordinate::new(lat, lon)?)),
            _ => Ok(origin),
        }
    }
}

/// Which distance policy prices located shipments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingStrategy {
    /// Fixed price per distance tier.
    #[default]
    Tiered,
    /// Clamped price per kilometer.
    PerKilometer,
}

/// Pricing settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Distance policy.
    pub strategy: PricingStrategy,
    /// Rate for the per-kilometer policy.
    pub per_km: PerKilometerRate,
}

/// Shipping rules.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShippingConfig {
    /// Depot location.
    pub origin: OriginConfig,
    /// Deadline for resolving both ends of a shipment.
    pub resolution_timeout_ms: u64,
    /// Distance tier bounds.
    pub breakpoints: DistanceBreakpoints,
    /// Price and window per tier.
    pub schedule: TierSchedule,
    /// Postal-prefix fallback rules.
    pub prefixes: PrefixRules,
    /// Distance policy selection.
    pub pricing: PricingConfig,
}

impl Default for ShippingConfig {
    fn default() -> Self {
        Self {
            origin: OriginConfig::default(),
            resolution_timeout_ms: 4000,
            breakpoints: DistanceBreakpoints::default(),
            schedule: TierSchedule::default(),
            prefixes: PrefixRules::default(),
            pricing: PricingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from files and the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be read or a value has the
    /// wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_layered(
            std::env::var(CONFIG_FILE_ENV).ok(),
            Environment::with_prefix(ENV_PREFIX),
            std::env::var("PORT").ok(),
            std::env::var("GOOGLE_MAPS_API_KEY").ok(),
        )
    }

    /// Values stay strings until deserialization so that CEPs keep their
    /// leading zeros; numeric fields are converted by their target type.
    fn load_layered(
        extra_file: Option<String>,
        environment: Environment,
        port: Option<String>,
        google_api_key: Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut builder =
            Config::builder().add_source(File::with_name("config/default").required(false));

        if let Some(path) = extra_file {
            builder = builder.add_source(File::with_name(&path));
        }

        builder
            .add_source(
                environment
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins"),
            )
            .set_override_option("server.port", port)?
            .set_override_option("geocoding.google_api_key", google_api_key)?
            .build()?
            .try_deserialize()
    }

    /// Parses configuration from a TOML document, defaults filling the gaps.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the document is malformed.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}
