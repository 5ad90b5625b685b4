//! Shared types for the Tonebridge effects control plane.
//!
//! This crate contains the effects-chain domain models and the API
//! request/response types used by the backend.

/// Default port for the Tonebridge backend server.
pub const DEFAULT_PORT: u16 = 3000;

/// Default address of the device WiFi bridge.
pub const DEFAULT_DEVICE_URL: &str = "http://192.168.1.100";

pub mod api;
pub mod effects;
pub mod preset;
pub mod update;

// Re-export commonly used types
pub use effects::{DelayConfig, EffectsConfig, GateConfig, OverdriveConfig, Section};
pub use preset::PresetEntry;
pub use update::{DelayUpdate, GateUpdate, OverdriveUpdate, SetVolumeRequest, UpdateEffectsRequest};
