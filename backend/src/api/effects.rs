//! Effects API handlers.
//!
//! Each section follows a two-phase protocol: push to the device first
//! (when a gateway is configured), commit the local merge only on
//! success. Per-section outcomes feed into the aggregate `success`
//! flag; a failed push leaves the section's state untouched.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use tonebridge_types::{
    api::{
        DelayResponse, EffectsResponse, ErrorResponse, GateResponse, OverdriveResponse,
        SectionResult, UpdateEffectsResponse, VolumeResponse,
    },
    DelayUpdate, GateUpdate, OverdriveUpdate, Section, SetVolumeRequest, UpdateEffectsRequest,
};
use tracing::{error, info, warn};
use utoipa;

use crate::state::AppState;
use crate::validator;

/// Get the current effects configuration.
///
/// In the forwarding profile the device is the source of truth when
/// reachable: its live status overwrites the local record before the
/// response is built. In the polling profile this endpoint is the
/// synchronization point the device itself fetches (~every 500 ms).
#[utoipa::path(
    get,
    path = "/api/effects",
    tag = "effects",
    responses(
        (status = 200, description = "Current effects configuration", body = EffectsResponse)
    )
)]
pub async fn get_effects(State(state): State<AppState>) -> Json<EffectsResponse> {
    let synced = match state.gateway() {
        Some(gateway) => match gateway.pull_status().await {
            Ok(device_state) => {
                state.replace(device_state).await;
                Some(true)
            }
            Err(e) => {
                warn!("Failed to pull device status, serving cached state: {}", e);
                Some(false)
            }
        },
        None => None,
    };

    Json(EffectsResponse {
        success: true,
        effects: state.snapshot().await,
        synced,
    })
}

/// Update any subset of the effects chain in one request.
///
/// Each present section is validated independently; sections whose
/// sanitized update is empty are skipped. Overall `success` is the AND
/// of the attempted sections.
#[utoipa::path(
    post,
    path = "/api/effects",
    tag = "effects",
    request_body = UpdateEffectsRequest,
    responses(
        (status = 200, description = "Per-section update results", body = UpdateEffectsResponse)
    )
)]
pub async fn update_effects(
    State(state): State<AppState>,
    Json(req): Json<UpdateEffectsRequest>,
) -> Json<UpdateEffectsResponse> {
    let mut results = Vec::new();

    if let Some(volume) = validator::sanitize_volume(req.volume) {
        results.push(apply_volume(&state, volume).await);
    }
    if let Some(ref update) = req.overdrive {
        let update = validator::sanitize_overdrive(update, state.limits());
        if !update.is_empty() {
            results.push(apply_overdrive(&state, &update).await);
        }
    }
    if let Some(ref update) = req.delay {
        let update = validator::sanitize_delay(update, state.limits());
        if !update.is_empty() {
            results.push(apply_delay(&state, &update).await);
        }
    }
    if let Some(ref update) = req.gate {
        let update = validator::sanitize_gate(update);
        if !update.is_empty() {
            results.push(apply_gate(&state, &update).await);
        }
    }

    let success = results.iter().all(|r| r.success);
    let message = if success {
        "Effects updated successfully"
    } else {
        "Some updates failed"
    };

    Json(UpdateEffectsResponse {
        success,
        message: message.to_string(),
        results,
        effects: state.snapshot().await,
    })
}

/// Set the master output volume.
///
/// Unlike the sub-effect endpoints, a missing or out-of-range volume
/// rejects the whole request before any push or state mutation.
#[utoipa::path(
    post,
    path = "/api/volume",
    tag = "effects",
    request_body = SetVolumeRequest,
    responses(
        (status = 200, description = "Volume updated", body = VolumeResponse),
        (status = 400, description = "Volume missing or out of range", body = ErrorResponse)
    )
)]
pub async fn set_volume(
    State(state): State<AppState>,
    Json(req): Json<SetVolumeRequest>,
) -> Result<Json<VolumeResponse>, (StatusCode, Json<ErrorResponse>)> {
    let volume = validator::validate_volume(req.volume).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(e.to_string())),
        )
    })?;

    let result = apply_volume(&state, volume).await;
    let message = if result.success {
        format!("Volume set to {:.0}%", volume * 100.0)
    } else {
        "Failed to set volume".to_string()
    };
    if result.success {
        info!("{}", message);
    }

    Ok(Json(VolumeResponse {
        success: result.success,
        message,
        volume: state.snapshot().await.volume,
    }))
}

/// Configure the overdrive stage. Out-of-range fields are dropped
/// silently; they are not an error.
#[utoipa::path(
    post,
    path = "/api/overdrive",
    tag = "effects",
    request_body = OverdriveUpdate,
    responses(
        (status = 200, description = "Overdrive configuration result", body = OverdriveResponse)
    )
)]
pub async fn set_overdrive(
    State(state): State<AppState>,
    Json(update): Json<OverdriveUpdate>,
) -> Json<OverdriveResponse> {
    let update = validator::sanitize_overdrive(&update, state.limits());
    let success = if update.is_empty() {
        true
    } else {
        apply_overdrive(&state, &update).await.success
    };

    Json(OverdriveResponse {
        success,
        message: section_message("overdrive", success),
        overdrive: state.snapshot().await.overdrive,
    })
}

/// Configure the delay stage. Out-of-range fields are dropped silently.
#[utoipa::path(
    post,
    path = "/api/delay",
    tag = "effects",
    request_body = DelayUpdate,
    responses(
        (status = 200, description = "Delay configuration result", body = DelayResponse)
    )
)]
pub async fn set_delay(
    State(state): State<AppState>,
    Json(update): Json<DelayUpdate>,
) -> Json<DelayResponse> {
    let update = validator::sanitize_delay(&update, state.limits());
    let success = if update.is_empty() {
        true
    } else {
        apply_delay(&state, &update).await.success
    };

    Json(DelayResponse {
        success,
        message: section_message("delay", success),
        delay: state.snapshot().await.delay,
    })
}

/// Configure the noise gate. Out-of-range fields are dropped silently.
#[utoipa::path(
    post,
    path = "/api/gate",
    tag = "effects",
    request_body = GateUpdate,
    responses(
        (status = 200, description = "Gate configuration result", body = GateResponse)
    )
)]
pub async fn set_gate(
    State(state): State<AppState>,
    Json(update): Json<GateUpdate>,
) -> Json<GateResponse> {
    let update = validator::sanitize_gate(&update);
    let success = if update.is_empty() {
        true
    } else {
        apply_gate(&state, &update).await.success
    };

    Json(GateResponse {
        success,
        message: section_message("gate", success),
        gate: state.snapshot().await.gate,
    })
}

fn section_message(section: &str, success: bool) -> String {
    if success {
        let mut chars = section.chars();
        match chars.next() {
            Some(first) => format!("{}{} updated", first.to_ascii_uppercase(), chars.as_str()),
            None => "Updated".to_string(),
        }
    } else {
        format!("Failed to update {}", section)
    }
}

// ============================================================================
// Per-section two-phase commit
// ============================================================================

pub(crate) async fn apply_volume(state: &AppState, volume: f32) -> SectionResult {
    if let Some(gateway) = state.gateway() {
        if let Err(e) = gateway.push_volume(volume).await {
            error!("Device push for {} failed: {}", Section::Volume, e);
            return SectionResult::failed(Section::Volume, e.to_string());
        }
    }
    state.set_volume(volume).await;
    SectionResult::ok(Section::Volume)
}

pub(crate) async fn apply_overdrive(state: &AppState, update: &OverdriveUpdate) -> SectionResult {
    if let Some(gateway) = state.gateway() {
        if let Err(e) = gateway.push_overdrive(update).await {
            error!("Device push for {} failed: {}", Section::Overdrive, e);
            return SectionResult::failed(Section::Overdrive, e.to_string());
        }
    }
    state.merge_overdrive(update).await;
    SectionResult::ok(Section::Overdrive)
}

pub(crate) async fn apply_delay(state: &AppState, update: &DelayUpdate) -> SectionResult {
    if let Some(gateway) = state.gateway() {
        if let Err(e) = gateway.push_delay(update).await {
            error!("Device push for {} failed: {}", Section::Delay, e);
            return SectionResult::failed(Section::Delay, e.to_string());
        }
    }
    state.merge_delay(update).await;
    SectionResult::ok(Section::Delay)
}

pub(crate) async fn apply_gate(state: &AppState, update: &GateUpdate) -> SectionResult {
    if let Some(gateway) = state.gateway() {
        if let Err(e) = gateway.push_gate(update).await {
            error!("Device push for {} failed: {}", Section::Gate, e);
            return SectionResult::failed(Section::Gate, e.to_string());
        }
    }
    state.merge_gate(update).await;
    SectionResult::ok(Section::Gate)
}
