//! Health check handler.

use axum::{extract::State, Json};
use tonebridge_types::api::HealthResponse;
use utoipa;

use crate::state::AppState;

/// Health check with the active deployment profile.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "system",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let (mode, device_url) = match state.gateway() {
        Some(gateway) => ("forwarding", Some(gateway.endpoint().to_string())),
        None => ("polling", None),
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        mode: mode.to_string(),
        device_url,
    })
}
