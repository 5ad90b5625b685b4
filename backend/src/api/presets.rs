//! Preset API handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tonebridge_types::{
    api::{ErrorResponse, LoadPresetResponse, PresetInfo, PresetListResponse, SectionResult},
    DelayUpdate, GateUpdate, OverdriveUpdate, Section,
};
use tracing::{error, info};
use utoipa;

use crate::state::AppState;

/// List the available presets with their descriptions.
#[utoipa::path(
    get,
    path = "/api/presets",
    tag = "presets",
    responses(
        (status = 200, description = "Available presets", body = PresetListResponse)
    )
)]
pub async fn list_presets(State(state): State<AppState>) -> Json<PresetListResponse> {
    let presets = state
        .presets()
        .entries()
        .iter()
        .map(|p| PresetInfo {
            name: p.name.clone(),
            description: p.description.clone(),
        })
        .collect();

    Json(PresetListResponse {
        success: true,
        presets,
    })
}

/// Load a preset, replacing the entire effects chain.
///
/// In the forwarding profile all four sections are pushed to the
/// device; the local state is replaced wholesale only if every push
/// succeeded. A failed load leaves the previous state intact.
#[utoipa::path(
    post,
    path = "/api/presets/{name}",
    tag = "presets",
    params(
        ("name" = String, Path, description = "Preset name")
    ),
    responses(
        (status = 200, description = "Preset load result", body = LoadPresetResponse),
        (status = 404, description = "Unknown preset", body = ErrorResponse)
    )
)]
pub async fn load_preset(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<LoadPresetResponse>, (StatusCode, Json<ErrorResponse>)> {
    let entry = state.presets().get(&name).cloned().ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(format!("Preset '{}' not found", name))),
        )
    })?;

    let mut results = Vec::new();
    if let Some(gateway) = state.gateway() {
        results.push(match gateway.push_volume(entry.config.volume).await {
            Ok(()) => SectionResult::ok(Section::Volume),
            Err(e) => SectionResult::failed(Section::Volume, e.to_string()),
        });
        results.push(
            match gateway
                .push_overdrive(&OverdriveUpdate::from(&entry.config.overdrive))
                .await
            {
                Ok(()) => SectionResult::ok(Section::Overdrive),
                Err(e) => SectionResult::failed(Section::Overdrive, e.to_string()),
            },
        );
        results.push(
            match gateway
                .push_delay(&DelayUpdate::from(&entry.config.delay))
                .await
            {
                Ok(()) => SectionResult::ok(Section::Delay),
                Err(e) => SectionResult::failed(Section::Delay, e.to_string()),
            },
        );
        results.push(
            match gateway
                .push_gate(&GateUpdate::from(&entry.config.gate))
                .await
            {
                Ok(()) => SectionResult::ok(Section::Gate),
                Err(e) => SectionResult::failed(Section::Gate, e.to_string()),
            },
        );
    }

    let success = results.iter().all(|r| r.success);
    if success {
        state.replace(entry.config).await;
        info!("Preset '{}' loaded", name);
    } else {
        error!("Failed to load preset '{}', state unchanged", name);
    }

    let message = if success {
        format!("Preset '{}' loaded", name)
    } else {
        "Failed to load preset".to_string()
    };

    Ok(Json(LoadPresetResponse {
        success,
        message,
        preset: name,
        results,
        effects: state.snapshot().await,
    }))
}
