//! Webhook transport.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use url::Url;

use super::WebhookPayload;

/// Request timeout used by [`ReqwestWebhookSender::with_default_timeout`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Failure of a single webhook delivery attempt.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeliveryError {
    /// The HTTP client could not be constructed.
    #[error("failed to configure webhook client: {message}")]
    Client {
        /// Error detail from the HTTP client builder.
        message: String,
    },

    /// The request did not complete.
    #[error("webhook request to {url} failed: {message}")]
    Transport {
        /// Destination URL.
        url: String,
        /// Transport error detail.
        message: String,
    },

    /// The destination answered with a non-success status.
    #[error("webhook {url} responded with status {status}")]
    Status {
        /// Destination URL.
        url: String,
        /// HTTP status code returned.
        status: u16,
    },
}

/// Delivers a payload to one destination.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WebhookSender: Send + Sync {
    /// POSTs `payload` as JSON to `url` once.
    async fn send(&self, url: &Url, payload: &WebhookPayload) -> Result<(), DeliveryError>;
}

/// [`WebhookSender`] backed by an async `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestWebhookSender {
    client: Client,
}

impl ReqwestWebhookSender {
    /// Creates a sender whose requests time out after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError::Client`] when the HTTP client cannot be
    /// built, e.g. because no TLS backend is available.
    pub fn new(timeout: Duration) -> Result<Self, DeliveryError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("herald/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|error| DeliveryError::Client {
                message: error.to_string(),
            })?;
        Ok(Self { client })
    }

    /// Creates a sender using [`DEFAULT_TIMEOUT`].
    ///
    /// # Errors
    ///
    /// See [`ReqwestWebhookSender::new`].
    pub fn with_default_timeout() -> Result<Self, DeliveryError> {
        Self::new(DEFAULT_TIMEOUT)
    }
}

#[async_trait]
impl WebhookSender for ReqwestWebhookSender {
    async fn send(&self, url: &Url, payload: &WebhookPayload) -> Result<(), DeliveryError> {
        let response = self
            .client
            .post(url.clone())
            .json(payload)
            .send()
            .await
            .map_err(|error| DeliveryError::Transport {
                url: url.to_string(),
                message: error.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DeliveryError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}
