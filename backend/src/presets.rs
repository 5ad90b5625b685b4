//! Built-in preset catalog.
//!
//! Fixed set of named, fully-specified configurations, read-only after
//! startup. Values are tuned against the shipped device firmware
//! (realistic, non-clipping gains).

use tonebridge_types::{DelayConfig, EffectsConfig, GateConfig, OverdriveConfig, PresetEntry};

/// Ordered table of the built-in presets.
pub struct PresetCatalog {
    entries: Vec<PresetEntry>,
}

impl PresetCatalog {
    /// All presets, in listing order.
    pub fn entries(&self) -> &[PresetEntry] {
        &self.entries
    }

    /// Look up a preset by name.
    pub fn get(&self, name: &str) -> Option<&PresetEntry> {
        self.entries.iter().find(|p| p.name == name)
    }
}

impl Default for PresetCatalog {
    fn default() -> Self {
        Self {
            entries: vec![
                preset(
                    "clean",
                    "Crystal clear tone with minimal processing",
                    0.75,
                    OverdriveConfig {
                        enabled: false,
                        gain: 1.0,
                        threshold: 0.9,
                        tone: 0.5,
                        mix: 0.5,
                        mode: 0,
                    },
                    DelayConfig {
                        enabled: false,
                        time_ms: 50,
                        feedback: 0.25,
                        mix: 0.25,
                        tone: 0.5,
                    },
                    GateConfig {
                        enabled: true,
                        threshold: 0.02,
                        attack: 0.001,
                        release: 0.1,
                    },
                ),
                preset(
                    "crunch",
                    "Classic rock crunch with medium gain",
                    0.6,
                    OverdriveConfig {
                        enabled: true,
                        gain: 8.0,
                        threshold: 0.65,
                        tone: 0.5,
                        mix: 0.7,
                        mode: 0,
                    },
                    DelayConfig {
                        enabled: false,
                        time_ms: 60,
                        feedback: 0.3,
                        mix: 0.3,
                        tone: 0.5,
                    },
                    GateConfig {
                        enabled: true,
                        threshold: 0.02,
                        attack: 0.001,
                        release: 0.1,
                    },
                ),
                preset(
                    "lead",
                    "High gain lead tone with delay",
                    0.55,
                    OverdriveConfig {
                        enabled: true,
                        gain: 15.0,
                        threshold: 0.5,
                        tone: 0.6,
                        mix: 0.8,
                        mode: 1,
                    },
                    DelayConfig {
                        enabled: true,
                        time_ms: 80,
                        feedback: 0.4,
                        mix: 0.4,
                        tone: 0.6,
                    },
                    GateConfig {
                        enabled: true,
                        threshold: 0.03,
                        attack: 0.001,
                        release: 0.1,
                    },
                ),
                preset(
                    "ambient",
                    "Spacey atmospheric sound with heavy delay",
                    0.65,
                    OverdriveConfig {
                        enabled: true,
                        gain: 4.0,
                        threshold: 0.75,
                        tone: 0.7,
                        mix: 0.6,
                        mode: 0,
                    },
                    DelayConfig {
                        enabled: true,
                        time_ms: 100,
                        feedback: 0.55,
                        mix: 0.6,
                        tone: 0.7,
                    },
                    GateConfig {
                        enabled: false,
                        threshold: 0.02,
                        attack: 0.001,
                        release: 0.1,
                    },
                ),
                preset(
                    "metal",
                    "Heavy distortion for metal riffs",
                    0.5,
                    OverdriveConfig {
                        enabled: true,
                        gain: 20.0,
                        threshold: 0.4,
                        tone: 0.3,
                        mix: 0.9,
                        mode: 2,
                    },
                    DelayConfig {
                        enabled: false,
                        time_ms: 50,
                        feedback: 0.2,
                        mix: 0.2,
                        tone: 0.4,
                    },
                    GateConfig {
                        enabled: true,
                        threshold: 0.05,
                        attack: 0.0005,
                        release: 0.05,
                    },
                ),
            ],
        }
    }
}

fn preset(
    name: &str,
    description: &str,
    volume: f32,
    overdrive: OverdriveConfig,
    delay: DelayConfig,
    gate: GateConfig,
) -> PresetEntry {
    PresetEntry {
        name: name.to_string(),
        description: description.to_string(),
        config: EffectsConfig {
            volume,
            overdrive,
            delay,
            gate,
        },
    }
}
