//! Telemetry channel: one request per report, response body returned raw.

use std::time::Duration;

use async_trait::async_trait;

use crate::types::TelemetryPayload;

/// Telemetry transport errors
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid endpoint '{0}'")]
    InvalidEndpoint(String),
}

/// Transport-level response to one report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelResponse {
    pub status: u16,
    pub body: String,
}

impl ChannelResponse {
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Sends one payload and hands back whatever the endpoint answered.
///
/// Any HTTP status is a response. Only failures to get a response at all
/// are errors.
#[async_trait]
pub trait TelemetryChannel: Send + Sync {
    async fn post(&self, payload: &TelemetryPayload) -> Result<ChannelResponse, TelemetryError>;
}

/// JSON-over-HTTP(S) channel.
#[derive(Debug, Clone)]
pub struct HttpChannel {
    http: reqwest::Client,
    endpoint: reqwest::Url,
}

impl HttpChannel {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, TelemetryError> {
        let endpoint = reqwest::Url::parse(endpoint)
            .map_err(|_| TelemetryError::InvalidEndpoint(endpoint.to_string()))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(TelemetryError::InvalidEndpoint(endpoint.to_string()));
        }

        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }
}

#[async_trait]
impl TelemetryChannel for HttpChannel {
    async fn post(&self, payload: &TelemetryPayload) -> Result<ChannelResponse, TelemetryError> {
        let json = serde_json::to_vec(payload)?;

        let resp = self
            .http
            .post(self.endpoint.clone())
            .header("Content-Type", "application/json")
            .body(json)
            .send()
            .await?;

        let status = resp.status().as_u16();
        let body = resp.text().await?;

        Ok(ChannelResponse { status, body })
    }
}
