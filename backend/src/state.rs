//! Application state management.
//!
//! The effects configuration is a single shared record created at
//! startup with firmware defaults and living until shutdown; there is
//! no persistence across restarts. All mutation goes through the
//! methods here, with a `RwLock` so no reader ever observes a
//! partially merged section. Handlers receive already-sanitized
//! updates; no validation happens at this layer.

use std::sync::Arc;

use tokio::sync::RwLock;
use tonebridge_types::{DelayUpdate, EffectsConfig, GateUpdate, OverdriveUpdate};

use crate::gateway::DeviceGateway;
use crate::presets::PresetCatalog;
use crate::validator::Limits;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Canonical desired state of the effects chain
    effects: RwLock<EffectsConfig>,
    /// Fixed preset table
    presets: PresetCatalog,
    /// Device channel; `None` in the polling profile
    gateway: Option<Arc<dyn DeviceGateway>>,
    /// Active validation ranges
    limits: Limits,
}

impl AppState {
    pub fn new(gateway: Option<Arc<dyn DeviceGateway>>, limits: Limits) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                effects: RwLock::new(EffectsConfig::default()),
                presets: PresetCatalog::default(),
                gateway,
                limits,
            }),
        }
    }

    /// Get the device gateway, if this deployment forwards updates.
    pub fn gateway(&self) -> Option<&Arc<dyn DeviceGateway>> {
        self.inner.gateway.as_ref()
    }

    /// Get the preset catalog.
    pub fn presets(&self) -> &PresetCatalog {
        &self.inner.presets
    }

    /// Get the active validation limits.
    pub fn limits(&self) -> &Limits {
        &self.inner.limits
    }

    /// Full snapshot of the current configuration.
    pub async fn snapshot(&self) -> EffectsConfig {
        self.inner.effects.read().await.clone()
    }

    /// Replace the master volume.
    pub async fn set_volume(&self, volume: f32) {
        self.inner.effects.write().await.volume = volume;
    }

    /// Merge a sanitized overdrive update.
    pub async fn merge_overdrive(&self, update: &OverdriveUpdate) {
        update.apply_to(&mut self.inner.effects.write().await.overdrive);
    }

    /// Merge a sanitized delay update.
    pub async fn merge_delay(&self, update: &DelayUpdate) {
        update.apply_to(&mut self.inner.effects.write().await.delay);
    }

    /// Merge a sanitized gate update.
    pub async fn merge_gate(&self, update: &GateUpdate) {
        update.apply_to(&mut self.inner.effects.write().await.gate);
    }

    /// Atomically substitute the whole configuration (preset load,
    /// device status pull).
    pub async fn replace(&self, config: EffectsConfig) {
        *self.inner.effects.write().await = config;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(None, Limits::standard())
    }
}
