//! OpenAPI documentation configuration.

use tonebridge_types::api::{
    DelayResponse, EffectsResponse, ErrorResponse, GateResponse, HealthResponse,
    LoadPresetResponse, OverdriveResponse, PresetInfo, PresetListResponse, SectionResult,
    UpdateEffectsResponse, VolumeResponse,
};
use tonebridge_types::effects::{
    DelayConfig, EffectsConfig, GateConfig, OverdriveConfig, Section,
};
use tonebridge_types::update::{
    DelayUpdate, GateUpdate, OverdriveUpdate, SetVolumeRequest, UpdateEffectsRequest,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::health::health,
        crate::api::effects::get_effects,
        crate::api::effects::update_effects,
        crate::api::effects::set_volume,
        crate::api::effects::set_overdrive,
        crate::api::effects::set_delay,
        crate::api::effects::set_gate,
        crate::api::presets::list_presets,
        crate::api::presets::load_preset,
    ),
    components(
        schemas(
            HealthResponse,
            EffectsConfig,
            OverdriveConfig,
            DelayConfig,
            GateConfig,
            Section,
            EffectsResponse,
            UpdateEffectsRequest,
            UpdateEffectsResponse,
            SetVolumeRequest,
            VolumeResponse,
            OverdriveUpdate,
            OverdriveResponse,
            DelayUpdate,
            DelayResponse,
            GateUpdate,
            GateResponse,
            SectionResult,
            PresetInfo,
            PresetListResponse,
            LoadPresetResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "effects", description = "Effects chain configuration endpoints"),
        (name = "presets", description = "Named preset endpoints"),
        (name = "system", description = "System information endpoints")
    ),
    info(
        title = "Tonebridge Effects Control API",
        version = "0.2.1",
        description = "REST API for configuring an embedded multi-effects audio processor",
        license(
            name = "MIT OR Apache-2.0"
        )
    )
)]
pub struct ApiDoc;
