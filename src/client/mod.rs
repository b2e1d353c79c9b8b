//! HTTP client for the receipt service.
//!
//! This module provides a synchronous HTTP client that can be used from async contexts
//! via `tokio::task::spawn_blocking`. It submits the verification form the same way
//! the page does: the phone number goes in a form-encoded `phone_number` field.

mod async_wrapper;
pub use async_wrapper::{AsyncReceiptClient, AsyncReceiptClientImpl};

use crate::config::Config;
use crate::error::{ReceiptApiError, ReceiptApiResult};
use crate::metrics::{HttpTimer, Metrics};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::sync::Arc;
use std::time::Duration;

/// Response from the service health endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub service: String,
}

/// Error body returned by the service for rejected requests.
#[derive(Debug, Deserialize)]
struct ErrorDetail {
    detail: String,
}

/// HTTP client for the receipt service.
///
/// This client uses `ureq` for synchronous HTTP requests and can be called
/// from async contexts using `tokio::task::spawn_blocking`.
#[derive(Clone)]
pub struct ReceiptClient {
    /// Base URL of the receipt service
    base_url: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl ReceiptClient {
    /// Create a new ReceiptClient from configuration.
    ///
    /// # Errors
    ///
    /// Returns `ReceiptApiError::NotConfigured` when no service URL is set.
    pub fn new(config: &Config) -> ReceiptApiResult<Self> {
        let base_url = config
            .receipt_api_url
            .clone()
            .ok_or(ReceiptApiError::NotConfigured)?;

        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build();

        Ok(Self {
            base_url,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        })
    }

    /// Create a ReceiptClient with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            base_url,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Share a metrics collector with the client.
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Path of a per-receipt endpoint, with the ID percent-encoded.
    fn receipt_path(receipt_id: &str, action: &str) -> String {
        format!("/receipt/{}/{}", urlencoding::encode(receipt_id), action)
    }

    /// Execute a GET request.
    fn get(&self, path: &str) -> ReceiptApiResult<ureq::Response> {
        let timer = HttpTimer::new(self.metrics.clone());
        let url = self.build_url(path);

        tracing::debug!("GET {}", url);
        let result = self.agent.get(&url).call().map_err(|e| self.map_error(e));

        match &result {
            Ok(_) => timer.complete(),
            Err(e) => {
                tracing::error!("GET {} - Error: {:?}", url, e);
                timer.complete_with_error();
            }
        }

        result
    }

    /// Execute a form-encoded POST request.
    fn post_form(&self, path: &str, form: &[(&str, &str)]) -> ReceiptApiResult<ureq::Response> {
        let timer = HttpTimer::new(self.metrics.clone());
        let url = self.build_url(path);

        tracing::debug!("POST {}", url);
        let result = self
            .agent
            .post(&url)
            .send_form(form)
            .map_err(|e| self.map_error(e));

        match &result {
            Ok(response) => {
                tracing::debug!("POST {} - Success (status: {})", url, response.status());
                timer.complete();
            }
            Err(e) => {
                tracing::error!("POST {} - Error: {:?}", url, e);
                timer.complete_with_error();
            }
        }

        result
    }

    /// Map a ureq error to a ReceiptApiError.
    fn map_error(&self, error: ureq::Error) -> ReceiptApiError {
        match error {
            ureq::Error::Status(code, response) => {
                let body = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());

                // Rejections carry {"detail": "..."}; fall back to the raw body
                let message = serde_json::from_str::<ErrorDetail>(&body)
                    .map(|d| d.detail)
                    .unwrap_or(body);

                match code {
                    403 => ReceiptApiError::PhoneMismatch,
                    404 => ReceiptApiError::NotFound(message),
                    _ => ReceiptApiError::ApiError {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    ReceiptApiError::HttpError("Connection failed".to_string())
                } else if transport.kind() == ureq::ErrorKind::Io {
                    ReceiptApiError::Timeout
                } else {
                    ReceiptApiError::HttpError(transport.to_string())
                }
            }
        }
    }

    /// Check that the receipt service is up.
    pub fn health(&self) -> ReceiptApiResult<HealthStatus> {
        let response = self.get("/health")?;
        let body = response
            .into_string()
            .map_err(|e| ReceiptApiError::HttpError(e.to_string()))?;

        Ok(serde_json::from_str(&body)?)
    }

    /// Submit the verification form for a receipt.
    ///
    /// Returns the page the service renders in response: the receipt when the
    /// phone matches, an explanatory error page otherwise.
    pub fn verify(&self, receipt_id: &str, phone_number: &str) -> ReceiptApiResult<String> {
        let path = Self::receipt_path(receipt_id, "verify");
        let response = self.post_form(&path, &[("phone_number", phone_number)])?;

        response
            .into_string()
            .map_err(|e| ReceiptApiError::HttpError(e.to_string()))
    }

    /// Download the receipt PDF.
    ///
    /// Fails with `NotFound` for an unknown receipt and `PhoneMismatch` when
    /// the phone does not match the one on record.
    pub fn download(&self, receipt_id: &str, phone_number: &str) -> ReceiptApiResult<Vec<u8>> {
        let path = Self::receipt_path(receipt_id, "download");
        let response = self.post_form(&path, &[("phone_number", phone_number)])?;

        let mut bytes = Vec::new();
        response.into_reader().read_to_end(&mut bytes)?;

        self.metrics.record_receipt_downloaded();
        Ok(bytes)
    }
}
