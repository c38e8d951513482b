//! Authenticated HTTP client for the Paystack REST API
//!
//! One attempt per call: failures are reported, never retried.

use super::models::{
    InitializeTransactionData, InitializeTransactionRequest, PaystackEnvelope,
    PaystackTransaction, RefundData, RefundRequest,
};
use crate::config::PaystackOptions;
use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error};

pub type GatewayResult<T> = Result<T, GatewayError>;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Paystack API error: {message}")]
    Rejected { message: String },

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Network error: {message}")]
    Transport { message: String },

    #[error("Timeout error: request timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    #[error("Invalid response format: {message}")]
    Decode { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl GatewayError {
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Transport {
            message: format!("Request error: {}", err),
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::decode(err.to_string())
    }
}

pub struct PaystackClient {
    http_client: Client,
    base_url: Url,
    secret_key: String,
    timeout_secs: u64,
}

impl PaystackClient {
    pub fn new(options: &PaystackOptions) -> GatewayResult<Self> {
        let base_url = Url::parse(options.base_url.trim()).map_err(|e| {
            GatewayError::config(format!("Invalid base URL '{}': {}", options.base_url, e))
        })?;

        if base_url.cannot_be_a_base() {
            return Err(GatewayError::config(format!(
                "Base URL '{}' cannot carry a path",
                options.base_url
            )));
        }

        let http_client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_secs))
            .user_agent(concat!("paystack-civ/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GatewayError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url,
            secret_key: options.secret_key.clone(),
            timeout_secs: options.timeout_secs,
        })
    }

    /// `POST /transaction/initialize`
    pub async fn initialize_transaction(
        &self,
        request: &InitializeTransactionRequest,
    ) -> GatewayResult<InitializeTransactionData> {
        self.request(Method::POST, &["transaction", "initialize"], Some(request))
            .await
    }

    /// `GET /transaction/verify/{reference}`
    pub async fn verify_transaction(&self, reference: &str) -> GatewayResult<PaystackTransaction> {
        self.request::<(), _>(Method::GET, &["transaction", "verify", reference], None)
            .await
    }

    /// `POST /refund`
    pub async fn create_refund(&self, request: &RefundRequest) -> GatewayResult<RefundData> {
        self.request(Method::POST, &["refund"], Some(request)).await
    }

    fn endpoint(&self, segments: &[&str]) -> GatewayResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GatewayError::config("Base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Make an authenticated request and unwrap the Paystack envelope
    async fn request<B, T>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> GatewayResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        debug!("Paystack request: {} {}", method, url.path());

        let mut request = self
            .http_client
            .request(method, url)
            .bearer_auth(&self.secret_key)
            .header(reqwest::header::CONTENT_TYPE, "application/json");

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();
        let response_text = response.text().await.map_err(|e| self.transport_error(e))?;

        debug!("Paystack response: HTTP {}", status);

        // Paystack reports business failures as `{"status": false, ...}`,
        // usually alongside a 4xx, so the envelope is decoded first.
        let envelope = match serde_json::from_str::<PaystackEnvelope>(&response_text) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                error!("Paystack API error: HTTP {}", status);
                return Err(GatewayError::Http {
                    status: status.as_u16(),
                    body: response_text,
                });
            }
            Err(e) => {
                error!("Failed to parse Paystack response: {}", e);
                return Err(e.into());
            }
        };

        if !envelope.status {
            error!("Paystack API error: {}", envelope.message);
            return Err(GatewayError::Rejected {
                message: envelope.message,
            });
        }

        let data = envelope
            .data
            .ok_or_else(|| GatewayError::decode("response has no data"))?;

        serde_json::from_value(data).map_err(|e| {
            error!("Failed to parse Paystack response data: {}", e);
            e.into()
        })
    }

    fn transport_error(&self, err: reqwest::Error) -> GatewayError {
        if err.is_timeout() {
            GatewayError::Timeout {
                seconds: self.timeout_secs,
            }
        } else {
            err.into()
        }
    }
}
