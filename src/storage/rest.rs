//! Hosted record store over a PostgREST-style HTTP API
//!
//! Rows live in the `payment_requests` table under `<url>/rest/v1/`. Filters
//! use the `column=eq.value` query syntax and writes ask for the affected
//! rows back with `Prefer: return=representation`. Calls are blocking and
//! never retried.

use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::config::StoreSettings;
use crate::error::{BuzzPayError, BuzzPayResult};
use crate::models::{NewPaymentRequest, PaymentRequest, RequestId, RequestUpdate};

use super::RecordStore;

const TABLE: &str = "payment_requests";
const RETURN_REPRESENTATION: &str = "return=representation";

/// Error body returned by the data API
#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Option<String>,
}

pub struct RestStore {
    http: Client,
    endpoint: String,
}

impl RestStore {
    /// Build a client for `base_url` authenticated with the anonymous key
    pub fn new(base_url: &str, anon_key: &str, timeout: Duration) -> BuzzPayResult<Self> {
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(BuzzPayError::Config("Store URL is empty".into()));
        }

        let header = |value: String| {
            HeaderValue::from_str(&value)
                .map_err(|e| BuzzPayError::Config(format!("Invalid API key: {}", e)))
        };

        let mut headers = HeaderMap::new();
        headers.insert("apikey", header(anon_key.to_string())?);
        headers.insert(AUTHORIZATION, header(format!("Bearer {}", anon_key))?);
        headers.insert(
            "x-client-info",
            header(format!("buzzpay/{}", env!("CARGO_PKG_VERSION")))?,
        );

        let http = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| BuzzPayError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            endpoint: format!("{}/rest/v1/{}", base_url, TABLE),
        })
    }

    /// Build from settings, requiring both URL and key
    pub fn from_settings(settings: &StoreSettings) -> BuzzPayResult<Self> {
        let url = settings
            .url
            .as_deref()
            .ok_or_else(|| BuzzPayError::Config("Remote store URL not configured".into()))?;
        let key = settings
            .anon_key
            .as_deref()
            .ok_or_else(|| BuzzPayError::Config("Remote store API key not configured".into()))?;
        Self::new(url, key, settings.http_timeout())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Turn a response into rows, mapping non-2xx statuses to store errors
    fn rows(response: Response) -> BuzzPayResult<Vec<PaymentRequest>> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&body)
                .ok()
                .and_then(|e| e.message.or(e.details))
                .unwrap_or(body);
            return Err(BuzzPayError::Store(format!(
                "HTTP {}: {}",
                status.as_u16(),
                message.trim()
            )));
        }

        response
            .json::<Vec<PaymentRequest>>()
            .map_err(|e| BuzzPayError::Store(format!("Unexpected response body: {}", e)))
    }

    fn eq(id: &RequestId) -> String {
        format!("eq.{}", id.as_str())
    }
}

impl RecordStore for RestStore {
    fn create(&self, new: &NewPaymentRequest) -> BuzzPayResult<PaymentRequest> {
        debug!(endpoint = %self.endpoint, "POST payment request");
        let response = self
            .http
            .post(&self.endpoint)
            .header("Prefer", RETURN_REPRESENTATION)
            .json(new)
            .send()?;

        Self::rows(response)?
            .into_iter()
            .next()
            .ok_or_else(|| BuzzPayError::Store("Insert returned no rows".into()))
    }

    fn get(&self, id: &RequestId) -> BuzzPayResult<PaymentRequest> {
        debug!(id = %id, "GET payment request");
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("id", Self::eq(id).as_str()), ("select", "*")])
            .send()?;

        Self::rows(response)?
            .into_iter()
            .next()
            .ok_or_else(|| BuzzPayError::request_not_found(id.as_str()))
    }

    fn update(&self, id: &RequestId, update: &RequestUpdate) -> BuzzPayResult<PaymentRequest> {
        debug!(id = %id, "PATCH payment request");
        let response = self
            .http
            .patch(&self.endpoint)
            .query(&[("id", Self::eq(id).as_str())])
            .header("Prefer", RETURN_REPRESENTATION)
            .json(update)
            .send()?;

        Self::rows(response)?
            .into_iter()
            .next()
            .ok_or_else(|| BuzzPayError::request_not_found(id.as_str()))
    }

    fn list(&self) -> BuzzPayResult<Vec<PaymentRequest>> {
        debug!(endpoint = %self.endpoint, "GET payment requests");
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()?;

        Self::rows(response)
    }
}
