//! API request and response types.

use crate::effects::{DelayConfig, EffectsConfig, GateConfig, OverdriveConfig, Section};
use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

// ============================================================================
// Health
// ============================================================================

/// Response for the health check endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct HealthResponse {
    pub status: String,
    /// RFC 3339 timestamp of the check.
    pub timestamp: String,
    /// Active deployment profile ("forwarding" or "polling").
    pub mode: String,
    /// Device bridge address (forwarding profile only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_url: Option<String>,
}

// ============================================================================
// Effects API Types
// ============================================================================

/// Response containing the current effects configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct EffectsResponse {
    pub success: bool,
    pub effects: EffectsConfig,
    /// Whether the state was refreshed from the device on this request.
    /// Omitted in the polling profile, where no device call is made.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synced: Option<bool>,
}

/// Outcome of one section within a multi-section update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SectionResult {
    pub section: Section,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SectionResult {
    pub fn ok(section: Section) -> Self {
        Self {
            section,
            success: true,
            error: None,
        }
    }

    pub fn failed(section: Section, error: impl Into<String>) -> Self {
        Self {
            section,
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Response for the bulk effects update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct UpdateEffectsResponse {
    pub success: bool,
    pub message: String,
    pub results: Vec<SectionResult>,
    pub effects: EffectsConfig,
}

/// Response for the dedicated volume endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct VolumeResponse {
    pub success: bool,
    pub message: String,
    pub volume: f32,
}

/// Response for the overdrive endpoint, echoing the committed state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct OverdriveResponse {
    pub success: bool,
    pub message: String,
    pub overdrive: OverdriveConfig,
}

/// Response for the delay endpoint, echoing the committed state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct DelayResponse {
    pub success: bool,
    pub message: String,
    pub delay: DelayConfig,
}

/// Response for the noise gate endpoint, echoing the committed state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct GateResponse {
    pub success: bool,
    pub message: String,
    pub gate: GateConfig,
}

// ============================================================================
// Preset API Types
// ============================================================================

/// One entry in the preset listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct PresetInfo {
    pub name: String,
    pub description: String,
}

/// Response listing the available presets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct PresetListResponse {
    pub success: bool,
    pub presets: Vec<PresetInfo>,
}

/// Response for a preset load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct LoadPresetResponse {
    pub success: bool,
    pub message: String,
    pub preset: String,
    pub results: Vec<SectionResult>,
    pub effects: EffectsConfig,
}

// ============================================================================
// Errors
// ============================================================================

/// Structured error body for 4xx/5xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}
