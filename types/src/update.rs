//! Strongly-typed partial updates for the effects chain.
//!
//! Every field is optional; absent fields leave the current value
//! untouched. The backend sanitizes an update (dropping out-of-range
//! fields) before merging it, so `apply_to` assumes validated input.

use crate::effects::{DelayConfig, GateConfig, OverdriveConfig};
use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Partial update for the overdrive stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct OverdriveUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gain: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mix: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<u8>,
}

impl OverdriveUpdate {
    /// True when no field is present.
    pub fn is_empty(&self) -> bool {
        self.enabled.is_none()
            && self.gain.is_none()
            && self.threshold.is_none()
            && self.tone.is_none()
            && self.mix.is_none()
            && self.mode.is_none()
    }

    /// Shallow-merge the present fields into `config`.
    pub fn apply_to(&self, config: &mut OverdriveConfig) {
        if let Some(enabled) = self.enabled {
            config.enabled = enabled;
        }
        if let Some(gain) = self.gain {
            config.gain = gain;
        }
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if let Some(tone) = self.tone {
            config.tone = tone;
        }
        if let Some(mix) = self.mix {
            config.mix = mix;
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
    }
}

/// Partial update for the delay stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct DelayUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_ms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mix: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<f32>,
}

impl DelayUpdate {
    /// True when no field is present.
    pub fn is_empty(&self) -> bool {
        self.enabled.is_none()
            && self.time_ms.is_none()
            && self.feedback.is_none()
            && self.mix.is_none()
            && self.tone.is_none()
    }

    /// Shallow-merge the present fields into `config`.
    pub fn apply_to(&self, config: &mut DelayConfig) {
        if let Some(enabled) = self.enabled {
            config.enabled = enabled;
        }
        if let Some(time_ms) = self.time_ms {
            config.time_ms = time_ms;
        }
        if let Some(feedback) = self.feedback {
            config.feedback = feedback;
        }
        if let Some(mix) = self.mix {
            config.mix = mix;
        }
        if let Some(tone) = self.tone {
            config.tone = tone;
        }
    }
}

/// Partial update for the noise gate stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct GateUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attack: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release: Option<f32>,
}

impl GateUpdate {
    /// True when no field is present.
    pub fn is_empty(&self) -> bool {
        self.enabled.is_none()
            && self.threshold.is_none()
            && self.attack.is_none()
            && self.release.is_none()
    }

    /// Shallow-merge the present fields into `config`.
    pub fn apply_to(&self, config: &mut GateConfig) {
        if let Some(enabled) = self.enabled {
            config.enabled = enabled;
        }
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if let Some(attack) = self.attack {
            config.attack = attack;
        }
        if let Some(release) = self.release {
            config.release = release;
        }
    }
}

/// Request body for the dedicated volume endpoint. The field is
/// optional at the wire level so a missing value surfaces as a 400
/// with an explanatory message instead of a deserialization error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SetVolumeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<f32>,
}

/// Bulk update request: any subset of the chain in one call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct UpdateEffectsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overdrive: Option<OverdriveUpdate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay: Option<DelayUpdate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gate: Option<GateUpdate>,
}

/// Build a full-config update for one preset section, used when a
/// preset is forwarded to the device section by section.
impl From<&OverdriveConfig> for OverdriveUpdate {
    fn from(config: &OverdriveConfig) -> Self {
        Self {
            enabled: Some(config.enabled),
            gain: Some(config.gain),
            threshold: Some(config.threshold),
            tone: Some(config.tone),
            mix: Some(config.mix),
            mode: Some(config.mode),
        }
    }
}

impl From<&DelayConfig> for DelayUpdate {
    fn from(config: &DelayConfig) -> Self {
        Self {
            enabled: Some(config.enabled),
            time_ms: Some(config.time_ms),
            feedback: Some(config.feedback),
            mix: Some(config.mix),
            tone: Some(config.tone),
        }
    }
}

impl From<&GateConfig> for GateUpdate {
    fn from(config: &GateConfig) -> Self {
        Self {
            enabled: Some(config.enabled),
            threshold: Some(config.threshold),
            attack: Some(config.attack),
            release: Some(config.release),
        }
    }
}
