use std::time::Duration;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, info};

use crate::{
    config::Config,
    models::gateway::{GatewayReceipt, OutboundMessage},
};

/// Errors a gateway call can surface, classified for the retry policy.
/// `Rejected` is terminal and must not be retried; `Transient` may be.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GatewayError {
    #[error("gateway rejected the message: {0}")]
    Rejected(String),
    #[error("transient gateway failure: {0}")]
    Transient(String),
}

/// The single outbound capability the dispatcher consumes:
/// `send(destination, body) -> delivery id`.
#[async_trait]
pub trait MessagingGateway: Send + Sync {
    async fn send(&self, destination: &str, body: &str) -> Result<GatewayReceipt, GatewayError>;
}

/// HTTP client for the WhatsApp messaging provider. The only component in
/// the crate that performs network I/O; every call is bounded by the
/// configured timeout.
pub struct WhatsAppClient {
    http_client: Client,
    base_url: String,
    api_token: String,
}

impl WhatsAppClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.gateway_timeout_seconds))
            .build()
            .map_err(|_| anyhow!("Failed to create HTTP client"))?;

        info!(base_url = %config.gateway_base_url, "WhatsApp gateway client initialized");

        Ok(Self {
            http_client,
            base_url: config.gateway_base_url.clone(),
            api_token: config.gateway_api_token.clone(),
        })
    }
}

#[async_trait]
impl MessagingGateway for WhatsAppClient {
    async fn send(&self, destination: &str, body: &str) -> Result<GatewayReceipt, GatewayError> {
        let url = format!("{}/v1/messages", self.base_url);
        let message = OutboundMessage {
            to: destination.to_string(),
            body: body.to_string(),
        };

        debug!(destination, "Sending WhatsApp message");

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_token)
            .json(&message)
            .send()
            .await
            .map_err(|e| GatewayError::Transient(e.to_string()))?;

        let status = response.status();

        if status.is_success() {
            let receipt: GatewayReceipt = response
                .json()
                .await
                .map_err(|e| GatewayError::Transient(format!("unreadable gateway response: {e}")))?;
            info!(message_id = %receipt.id, "WhatsApp message accepted by gateway");
            Ok(receipt)
        } else if status.is_server_error()
            || status == StatusCode::REQUEST_TIMEOUT
            || status == StatusCode::TOO_MANY_REQUESTS
        {
            Err(GatewayError::Transient(format!(
                "gateway returned status {status}"
            )))
        } else {
            let detail = response.text().await.unwrap_or_default();
            Err(GatewayError::Rejected(format!(
                "gateway returned status {status}: {detail}"
            )))
        }
    }
}
