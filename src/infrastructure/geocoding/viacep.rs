//! # ViaCEP Adapter
//!
//! Address lookup against the public ViaCEP API.
//!
//! `GET {base}/ws/{cep}/json/` returns the street address for a CEP, or
//! `{"erro": true}` when the CEP does not exist.

use crate::domain::entities::ResolvedAddress;
use crate::domain::value_objects::PostalCode;
use crate::infrastructure::geocoding::error::{ResolutionError, ResolutionResult};
use crate::infrastructure::geocoding::http_client::HttpClient;
use crate::infrastructure::geocoding::traits::{AddressResolver, absorb};
use async_trait::async_trait;
use serde::Deserialize;

/// Public ViaCEP endpoint.
pub const DEFAULT_VIACEP_BASE_URL: &str = "https://viacep.com.br";

/// ViaCEP response body.
///
/// Older deployments send `"erro": true`, newer ones `"erro": "true"`.
#[derive(Debug, Deserialize)]
struct ViaCepResponse {
    #[serde(default)]
    erro: Option<serde_json::Value>,
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    bairro: String,
    #[serde(default)]
    localidade: String,
    #[serde(default)]
    uf: String,
}

impl ViaCepResponse {
    fn is_error(&self) -> bool {
        match &self.erro {
            Some(serde_json::Value::Bool(flag)) => *flag,
            Some(serde_json::Value::String(flag)) => flag.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }
}

/// Address resolver backed by ViaCEP.
#[derive(Debug, Clone)]
pub struct ViaCepClient {
    http: HttpClient,
    base_url: String,
}

impl ViaCepClient {
    /// Creates a client for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns `ResolutionError::Internal` if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout_ms: u64) -> ResolutionResult<Self> {
        Ok(Self {
            http: HttpClient::new(timeout_ms)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url_for(&self, postal_code: &PostalCode) -> String {
        format!("{}/ws/{}/json/", self.base_url, postal_code.as_str())
    }

    async fn lookup(&self, postal_code: &PostalCode) -> ResolutionResult<Option<ResolvedAddress>> {
        let body: ViaCepResponse = self.http.get(&self.url_for(postal_code)).await?;
        if body.is_error() {
            return Err(ResolutionError::not_found(format!(
                "viacep has no address for {}",
                postal_code
            )));
        }

        Ok(Some(ResolvedAddress {
            postal_code: postal_code.clone(),
            street: body.logradouro,
            neighborhood: body.bairro,
            city: body.localidade,
            state: body.uf,
        }))
    }
}

#[async_trait]
impl AddressResolver for ViaCepClient {
    async fn resolve_address(
        &self,
        postal_code: &PostalCode,
    ) -> ResolutionResult<Option<ResolvedAddress>> {
        absorb(self.name(), "resolve_address", self.lookup(postal_code).await)
    }

    fn name(&self) -> &'static str {
        "viacep"
    }
}
