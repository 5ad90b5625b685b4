//! Device gateway abstraction.
//!
//! In the forwarding profile every accepted update is pushed to the
//! embedded processor (through its WiFi bridge) before the local state
//! commits. The trait keeps the transport out of the handlers so tests
//! can inject failures per section.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tonebridge_types::{DelayUpdate, EffectsConfig, GateUpdate, OverdriveUpdate};
use tracing::debug;

/// Device communication failure. Never fatal; handlers record it in
/// the per-section results and leave local state untouched.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("device request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("device returned status {0}")]
    Status(StatusCode),
}

/// Configuration channel toward the downstream device.
///
/// A single attempt per call, bounded by a fixed timeout; a timeout is
/// an ordinary [`GatewayError`].
#[async_trait]
pub trait DeviceGateway: Send + Sync {
    async fn push_volume(&self, volume: f32) -> Result<(), GatewayError>;
    async fn push_overdrive(&self, update: &OverdriveUpdate) -> Result<(), GatewayError>;
    async fn push_delay(&self, update: &DelayUpdate) -> Result<(), GatewayError>;
    async fn push_gate(&self, update: &GateUpdate) -> Result<(), GatewayError>;

    /// Fetch the device's live configuration.
    async fn pull_status(&self) -> Result<EffectsConfig, GatewayError>;

    /// Human-readable address of the device, for health reporting.
    fn endpoint(&self) -> &str;
}

/// HTTP gateway to the device bridge.
pub struct HttpDeviceGateway {
    base_url: String,
    client: reqwest::Client,
}

impl HttpDeviceGateway {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<(), GatewayError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Pushing to device: {}", url);
        let response = self.client.post(&url).json(body).send().await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(GatewayError::Status(response.status()))
        }
    }
}

#[async_trait]
impl DeviceGateway for HttpDeviceGateway {
    async fn push_volume(&self, volume: f32) -> Result<(), GatewayError> {
        self.post_json("/api/volume", &serde_json::json!({ "volume": volume }))
            .await
    }

    async fn push_overdrive(&self, update: &OverdriveUpdate) -> Result<(), GatewayError> {
        self.post_json("/api/overdrive", update).await
    }

    async fn push_delay(&self, update: &DelayUpdate) -> Result<(), GatewayError> {
        self.post_json("/api/delay", update).await
    }

    async fn push_gate(&self, update: &GateUpdate) -> Result<(), GatewayError> {
        self.post_json("/api/gate", update).await
    }

    async fn pull_status(&self) -> Result<EffectsConfig, GatewayError> {
        let url = format!("{}/api/status", self.base_url);
        debug!("Pulling device status: {}", url);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(GatewayError::Status(response.status()));
        }
        Ok(response.json().await?)
    }

    fn endpoint(&self) -> &str {
        &self.base_url
    }
}
