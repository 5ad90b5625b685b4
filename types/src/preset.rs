//! Preset definitions.

use crate::effects::EffectsConfig;
use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// A named, fully-specified effects configuration.
///
/// Presets are immutable process-wide constants; loading one replaces
/// the entire chain state in a single operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct PresetEntry {
    pub name: String,
    pub description: String,
    pub config: EffectsConfig,
}
