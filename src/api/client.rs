//! HTTP client for the Well service.
//!
//! One resource per entry type, addressed as `<base_url>/<type>`:
//! - `GET` returns the full stored text (404 means nothing stored yet)
//! - `POST` appends one entry
//! - `PUT` replaces everything
//!
//! Every request carries the key in an `X-API-Key` header.

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{Method, StatusCode};

use crate::EntryType;
use crate::api::provider::{ApiError, EntryApi, Receipt};
use crate::api::types::EntryPayload;
use crate::core::config::Config;

const API_KEY_HEADER: &str = "X-API-Key";

pub struct WellClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl WellClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.base_url.clone(), config.api_key.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, entry_type: EntryType) -> String {
        format!("{}/{}", self.base_url, entry_type)
    }

    /// Sends a POST or PUT with the JSON payload and maps the response.
    async fn write(&self, method: Method, entry_type: EntryType, text: &str) -> Result<Receipt, ApiError> {
        let payload = EntryPayload {
            entry_type,
            body: text,
        };

        info!("{} {} ({} bytes)", method, self.url(entry_type), text.len());

        let response = self
            .client
            .request(method.clone(), self.url(entry_type))
            .header(API_KEY_HEADER, &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(send_error)?;

        let status = response.status();
        debug!("{} {} -> {}", method, entry_type, status);

        if !status.is_success() {
            return Err(error_from(response).await);
        }

        let body = response.text().await.unwrap_or_else(|e| {
            warn!("Could not read {} response body: {}", method, e);
            String::new()
        });

        Ok(Receipt {
            status: status.as_u16(),
            body,
        })
    }
}

/// Builder failures come from our own key or URL, not the network.
fn send_error(e: reqwest::Error) -> ApiError {
    if e.is_builder() {
        let detail = match std::error::Error::source(&e) {
            Some(source) => source.to_string(),
            None => e.to_string(),
        };
        warn!("Could not build Well API request: {}", detail);
        ApiError::Request(detail)
    } else {
        ApiError::Network(e.to_string())
    }
}

/// Drains a failed response into an `ApiError`.
async fn error_from(response: reqwest::Response) -> ApiError {
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "unknown error".to_string());
    warn!("Well API error: {} - {}", status, body);
    ApiError::from_status(status, body)
}

#[async_trait]
impl EntryApi for WellClient {
    async fn fetch_all(&self, entry_type: EntryType) -> Result<String, ApiError> {
        info!("GET {}", self.url(entry_type));

        let response = self
            .client
            .get(self.url(entry_type))
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(send_error)?;

        let status = response.status();
        debug!("GET {} -> {}", entry_type, status);

        if status == StatusCode::NOT_FOUND {
            info!("No {} entries stored yet", entry_type);
            return Ok(String::new());
        }
        if !status.is_success() {
            return Err(error_from(response).await);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        // Content must survive edit and PUT byte for byte
        let text = String::from_utf8(bytes.to_vec()).map_err(|e| {
            warn!("{} content is not valid UTF-8: {}", entry_type, e);
            ApiError::Remote {
                status: status.as_u16(),
                body: format!("response is not valid UTF-8: {e}"),
            }
        })?;
        debug!("Fetched {} bytes of {}", text.len(), entry_type);
        Ok(text)
    }

    async fn append(&self, entry_type: EntryType, text: &str) -> Result<Receipt, ApiError> {
        self.write(Method::POST, entry_type, text).await
    }

    async fn replace_all(&self, entry_type: EntryType, text: &str) -> Result<Receipt, ApiError> {
        self.write(Method::PUT, entry_type, text).await
    }
}
