//! # HTTP Client
//!
//! Shared HTTP client for the geocoding adapters.
//!
//! Wraps `reqwest` with a per-request timeout, JSON decoding and a mapping
//! from transport failures and status codes to [`ResolutionError`].
//!
//! # Examples
//!
//! ```ignore
//! use storefront::infrastructure::geocoding::http_client::HttpClient;
//!
//! let client = HttpClient::new(5000)?;
//! let body: MyResponse = client.get("https://viacep.com.br/ws/01311000/json/").await?;
//! ```

use crate::infrastructure::geocoding::error::{ResolutionError, ResolutionResult};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client wrapper for geocoding adapters.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    timeout_ms: u64,
}

impl HttpClient {
    /// Creates a new HTTP client with the specified timeout.
    ///
    /// # Errors
    ///
    /// Returns `ResolutionError::Internal` if the client cannot be created.
    pub fn new(timeout_ms: u64) -> ResolutionResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| {
                ResolutionError::internal(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client, timeout_ms })
    }

    /// Returns the configured timeout in milliseconds.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Makes a GET request and deserializes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns `ResolutionError::Timeout` or `ResolutionError::Connection`
    /// if the request fails, a status-specific error for non-2xx responses
    /// and `ResolutionError::Protocol` if the body cannot be parsed.
    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> ResolutionResult<T> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        self.handle_response(response).await
    }

    /// Makes a GET request with query parameters and deserializes the JSON response.
    ///
    /// # Errors
    ///
    /// Same as [`HttpClient::get`].
    pub async fn get_with_params<T: DeserializeOwned, P: serde::Serialize + ?Sized>(
        &self,
        url: &str,
        params: &P,
    ) -> ResolutionResult<T> {
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        self.handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: Response,
    ) -> ResolutionResult<T> {
        let status = response.status();

        if status.is_success() {
            response.json::<T>().await.map_err(|e| {
                ResolutionError::protocol(format!("Failed to parse response: {}", e))
            })
        } else {
            let error_body = response.text().await.unwrap_or_default();
            Err(self.map_status_error(status, &error_body))
        }
    }

    fn map_reqwest_error(&self, error: reqwest::Error) -> ResolutionError {
        if error.is_timeout() {
            ResolutionError::timeout_with_duration("Request timed out", self.timeout_ms)
        } else if error.is_connect() {
            ResolutionError::connection(format!("Connection failed: {}", error))
        } else {
            ResolutionError::connection(format!("HTTP request failed: {}", error))
        }
    }

    fn map_status_error(&self, status: StatusCode, body: &str) -> ResolutionError {
        match status {
            StatusCode::BAD_REQUEST => {
                ResolutionError::invalid_request(format!("Bad request: {}", body))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                ResolutionError::authentication(format!("Authentication failed: {}", body))
            }
            StatusCode::NOT_FOUND => {
                ResolutionError::not_found(format!("Resource not found: {}", body))
            }
            StatusCode::TOO_MANY_REQUESTS => ResolutionError::rate_limited("Rate limit exceeded"),
            s if s.is_server_error() => {
                ResolutionError::connection(format!("Server error ({}): {}", status, body))
            }
            _ => ResolutionError::protocol(format!("HTTP error ({}): {}", status, body)),
        }
    }
}
