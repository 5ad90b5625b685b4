//! Effects-chain configuration records.
//!
//! `EffectsConfig` is the canonical desired state of the downstream
//! processor. Every field is always populated; partial updates are
//! expressed separately (see [`crate::update`]) and merged in after
//! validation.

use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// One independently configurable stage of the effects chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Volume,
    Overdrive,
    Delay,
    Gate,
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Section::Volume => write!(f, "volume"),
            Section::Overdrive => write!(f, "overdrive"),
            Section::Delay => write!(f, "delay"),
            Section::Gate => write!(f, "gate"),
        }
    }
}

/// The full desired state of the effects chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct EffectsConfig {
    /// Master output volume, 0.0..=1.0.
    pub volume: f32,
    pub overdrive: OverdriveConfig,
    pub delay: DelayConfig,
    pub gate: GateConfig,
}

/// Soft-clipping overdrive stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct OverdriveConfig {
    pub enabled: bool,
    /// Pre-clip gain multiplier.
    pub gain: f32,
    /// Clipping threshold, 0.1..=0.95.
    pub threshold: f32,
    /// Post-clip tone control (low-pass blend), 0.0..=1.0.
    pub tone: f32,
    /// Dry/wet mix, 0.0..=1.0.
    pub mix: f32,
    /// Clipping curve: 0 = soft, 1 = hard, 2 = asymmetric.
    pub mode: u8,
}

/// Feedback delay stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct DelayConfig {
    pub enabled: bool,
    /// Delay time in milliseconds.
    pub time_ms: u32,
    /// Feedback amount, capped below 1.0 to keep the loop stable.
    pub feedback: f32,
    /// Dry/wet mix, 0.0..=1.0.
    pub mix: f32,
    /// Tone of the repeats (low-pass blend), 0.0..=1.0.
    pub tone: f32,
}

/// Noise gate stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct GateConfig {
    pub enabled: bool,
    /// Open threshold on the signal envelope.
    pub threshold: f32,
    /// Attack time in seconds.
    pub attack: f32,
    /// Release time in seconds.
    pub release: f32,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            volume: 0.7,
            overdrive: OverdriveConfig::default(),
            delay: DelayConfig::default(),
            gate: GateConfig::default(),
        }
    }
}

impl Default for OverdriveConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            gain: 5.0,
            threshold: 0.7,
            tone: 0.5,
            mix: 0.8,
            mode: 0,
        }
    }
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            time_ms: 100,
            feedback: 0.3,
            mix: 0.3,
            tone: 0.5,
        }
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: 0.02,
            attack: 0.001,
            release: 0.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_display_matches_wire_name() {
        for section in [
            Section::Volume,
            Section::Overdrive,
            Section::Delay,
            Section::Gate,
        ] {
            let wire = serde_json::to_value(section).unwrap();
            assert_eq!(wire.as_str().unwrap(), section.to_string());
        }
    }
}
