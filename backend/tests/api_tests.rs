//! Integration tests for the Tonebridge API.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt; // for `oneshot`

use tonebridge::create_app_with_state;
use tonebridge::gateway::{DeviceGateway, GatewayError};
use tonebridge::presets::PresetCatalog;
use tonebridge::state::AppState;
use tonebridge::validator::Limits;
use tonebridge_types::{
    DelayUpdate, EffectsConfig, GateUpdate, OverdriveUpdate, Section,
};

/// Gateway double: records pushed sections and fails the configured ones.
#[derive(Default)]
struct MockGateway {
    fail_sections: Vec<Section>,
    pushes: Mutex<Vec<Section>>,
    device_status: Option<EffectsConfig>,
}

impl MockGateway {
    fn failing(sections: Vec<Section>) -> Self {
        Self {
            fail_sections: sections,
            ..Default::default()
        }
    }

    fn with_status(status: EffectsConfig) -> Self {
        Self {
            device_status: Some(status),
            ..Default::default()
        }
    }

    fn pushed(&self) -> Vec<Section> {
        self.pushes.lock().unwrap().clone()
    }

    fn attempt(&self, section: Section) -> Result<(), GatewayError> {
        self.pushes.lock().unwrap().push(section);
        if self.fail_sections.contains(&section) {
            Err(GatewayError::Status(reqwest::StatusCode::GATEWAY_TIMEOUT))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl DeviceGateway for MockGateway {
    async fn push_volume(&self, _volume: f32) -> Result<(), GatewayError> {
        self.attempt(Section::Volume)
    }

    async fn push_overdrive(&self, _update: &OverdriveUpdate) -> Result<(), GatewayError> {
        self.attempt(Section::Overdrive)
    }

    async fn push_delay(&self, _update: &DelayUpdate) -> Result<(), GatewayError> {
        self.attempt(Section::Delay)
    }

    async fn push_gate(&self, _update: &GateUpdate) -> Result<(), GatewayError> {
        self.attempt(Section::Gate)
    }

    async fn pull_status(&self) -> Result<EffectsConfig, GatewayError> {
        self.device_status
            .clone()
            .ok_or(GatewayError::Status(reqwest::StatusCode::GATEWAY_TIMEOUT))
    }

    fn endpoint(&self) -> &str {
        "mock://device"
    }
}

/// Polling-profile test app: no gateway, standard limits.
fn polling_app() -> (Router, AppState) {
    let state = AppState::default();
    (create_app_with_state(state.clone()), state)
}

/// Forwarding-profile test app with the given gateway double.
fn forwarding_app(gateway: Arc<MockGateway>) -> (Router, AppState) {
    let state = AppState::new(
        Some(gateway as Arc<dyn DeviceGateway>),
        Limits::standard(),
    );
    (create_app_with_state(state.clone()), state)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .method("POST")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let (app, _) = polling_app();

    let (status, body) = get(&app, "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["mode"], "polling");
    assert!(body["device_url"].is_null());
    assert!(!body["timestamp"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_health_reports_forwarding_device() {
    let (app, _) = forwarding_app(Arc::new(MockGateway::default()));

    let (status, body) = get(&app, "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode"], "forwarding");
    assert_eq!(body["device_url"], "mock://device");
}

// ============================================================================
// GET /api/effects
// ============================================================================

#[tokio::test]
async fn test_get_effects_returns_defaults() {
    let (app, _) = polling_app();

    let (status, body) = get(&app, "/api/effects").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["effects"]["volume"], 0.7);
    assert_eq!(body["effects"]["overdrive"]["enabled"], false);
    assert_eq!(body["effects"]["delay"]["time_ms"], 100);
    assert_eq!(body["effects"]["gate"]["enabled"], true);
    // No device call in the polling profile
    assert!(body.get("synced").is_none());
}

#[tokio::test]
async fn test_get_effects_pulls_device_state_when_reachable() {
    let mut device_state = EffectsConfig::default();
    device_state.volume = 0.33;
    device_state.delay.enabled = true;

    let gateway = Arc::new(MockGateway::with_status(device_state.clone()));
    let (app, state) = forwarding_app(gateway);

    let (status, body) = get(&app, "/api/effects").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["synced"], true);
    assert_eq!(body["effects"]["volume"], 0.33);
    assert_eq!(state.snapshot().await, device_state);
}

#[tokio::test]
async fn test_get_effects_falls_back_to_cache_when_device_unreachable() {
    let gateway = Arc::new(MockGateway::default()); // no status configured
    let (app, _) = forwarding_app(gateway);

    let (status, body) = get(&app, "/api/effects").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["synced"], false);
    assert_eq!(body["effects"]["volume"], 0.7);
}

// ============================================================================
// POST /api/volume
// ============================================================================

#[tokio::test]
async fn test_set_volume() {
    let (app, state) = polling_app();

    let (status, body) = post(&app, "/api/volume", json!({ "volume": 0.4 })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Volume set to 40%");
    assert_eq!(state.snapshot().await.volume, 0.4);
}

#[tokio::test]
async fn test_set_volume_missing_is_bad_request() {
    let (app, state) = polling_app();

    let (status, body) = post(&app, "/api/volume", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "volume is required");
    assert_eq!(state.snapshot().await, EffectsConfig::default());
}

#[tokio::test]
async fn test_set_volume_out_of_range_is_bad_request() {
    let (app, state) = polling_app();

    for bad in [-0.5, 1.5] {
        let (status, body) = post(&app, "/api/volume", json!({ "volume": bad })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "volume must be between 0 and 1");
    }
    assert_eq!(state.snapshot().await, EffectsConfig::default());
}

#[tokio::test]
async fn test_set_volume_not_committed_when_push_fails() {
    let gateway = Arc::new(MockGateway::failing(vec![Section::Volume]));
    let (app, state) = forwarding_app(gateway);

    let (status, body) = post(&app, "/api/volume", json!({ "volume": 0.4 })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Failed to set volume");
    assert_eq!(state.snapshot().await.volume, 0.7);
}

// ============================================================================
// POST /api/overdrive, /api/delay, /api/gate
// ============================================================================

#[tokio::test]
async fn test_set_overdrive_merges_only_present_fields() {
    let (app, state) = polling_app();

    let (status, body) = post(
        &app,
        "/api/overdrive",
        json!({ "enabled": true, "gain": 12.0 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Overdrive updated");
    assert_eq!(body["overdrive"]["gain"], 12.0);

    let effects = state.snapshot().await;
    let defaults = EffectsConfig::default();
    assert!(effects.overdrive.enabled);
    assert_eq!(effects.overdrive.gain, 12.0);
    // Sibling fields untouched
    assert_eq!(effects.overdrive.threshold, defaults.overdrive.threshold);
    assert_eq!(effects.overdrive.tone, defaults.overdrive.tone);
    assert_eq!(effects.delay, defaults.delay);
}

#[tokio::test]
async fn test_set_overdrive_out_of_range_is_silently_dropped() {
    let (app, state) = polling_app();

    let (status, body) = post(&app, "/api/overdrive", json!({ "gain": 999.0 })).await;

    // Silent-drop policy: not an error, zero field changes
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(state.snapshot().await, EffectsConfig::default());
}

#[tokio::test]
async fn test_set_overdrive_empty_update_skips_device_push() {
    let gateway = Arc::new(MockGateway::failing(vec![Section::Overdrive]));
    let (app, state) = forwarding_app(gateway.clone());

    let (status, body) = post(&app, "/api/overdrive", json!({ "gain": 999.0 })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(gateway.pushed().is_empty());
    assert_eq!(state.snapshot().await, EffectsConfig::default());
}

#[tokio::test]
async fn test_set_delay() {
    let (app, state) = polling_app();

    let (status, body) = post(
        &app,
        "/api/delay",
        json!({ "enabled": true, "time_ms": 80, "feedback": 0.4 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Delay updated");

    let effects = state.snapshot().await;
    assert!(effects.delay.enabled);
    assert_eq!(effects.delay.time_ms, 80);
    assert_eq!(effects.delay.feedback, 0.4);
    assert_eq!(effects.delay.mix, EffectsConfig::default().delay.mix);
}

#[tokio::test]
async fn test_set_delay_rejects_out_of_range_time_in_standard_profile() {
    let (app, state) = polling_app();

    let (status, body) = post(&app, "/api/delay", json!({ "time_ms": 350 })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(state.snapshot().await.delay.time_ms, 100);
}

#[tokio::test]
async fn test_set_gate() {
    let (app, state) = polling_app();

    let (status, body) = post(
        &app,
        "/api/gate",
        json!({ "threshold": 0.05, "release": 0.2 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Gate updated");

    let effects = state.snapshot().await;
    assert_eq!(effects.gate.threshold, 0.05);
    assert_eq!(effects.gate.release, 0.2);
    assert_eq!(effects.gate.attack, EffectsConfig::default().gate.attack);
}

#[tokio::test]
async fn test_failed_push_leaves_section_unchanged() {
    let gateway = Arc::new(MockGateway::failing(vec![Section::Delay]));
    let (app, state) = forwarding_app(gateway);

    let (status, body) = post(&app, "/api/delay", json!({ "time_ms": 80 })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Failed to update delay");
    assert_eq!(state.snapshot().await.delay.time_ms, 100);
}

// ============================================================================
// POST /api/effects (bulk)
// ============================================================================

#[tokio::test]
async fn test_bulk_update_touches_only_present_sections() {
    let (app, state) = polling_app();

    let (status, body) = post(
        &app,
        "/api/effects",
        json!({
            "volume": 0.5,
            "overdrive": { "enabled": true, "gain": 8.0 }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Effects updated successfully");
    assert_eq!(body["results"].as_array().unwrap().len(), 2);

    let effects = state.snapshot().await;
    assert_eq!(effects.volume, 0.5);
    assert_eq!(effects.overdrive.gain, 8.0);
    assert_eq!(effects.delay, EffectsConfig::default().delay);
    assert_eq!(effects.gate, EffectsConfig::default().gate);
}

#[tokio::test]
async fn test_bulk_update_reports_partial_failure_per_section() {
    let gateway = Arc::new(MockGateway::failing(vec![Section::Overdrive]));
    let (app, state) = forwarding_app(gateway);

    let (status, body) = post(
        &app,
        "/api/effects",
        json!({
            "volume": 0.5,
            "overdrive": { "gain": 8.0 }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Some updates failed");

    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["section"], "volume");
    assert_eq!(results[0]["success"], true);
    assert_eq!(results[1]["section"], "overdrive");
    assert_eq!(results[1]["success"], false);
    assert!(!results[1]["error"].as_str().unwrap().is_empty());

    // Volume committed, overdrive untouched
    let effects = state.snapshot().await;
    assert_eq!(effects.volume, 0.5);
    assert_eq!(effects.overdrive, EffectsConfig::default().overdrive);
}

#[tokio::test]
async fn test_bulk_update_with_no_sections_is_a_no_op() {
    let (app, state) = polling_app();

    let (status, body) = post(&app, "/api/effects", json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["results"].as_array().unwrap().is_empty());
    assert_eq!(state.snapshot().await, EffectsConfig::default());
}

// ============================================================================
// Presets
// ============================================================================

#[tokio::test]
async fn test_list_presets() {
    let (app, _) = polling_app();

    let (status, body) = get(&app, "/api/presets").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let presets = body["presets"].as_array().unwrap();
    let names: Vec<&str> = presets
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["clean", "crunch", "lead", "ambient", "metal"]);
    for preset in presets {
        assert!(!preset["description"].as_str().unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_load_preset_replaces_whole_state() {
    let (app, state) = polling_app();

    let (status, body) = post(&app, "/api/presets/clean", json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Preset 'clean' loaded");
    assert_eq!(body["preset"], "clean");

    let expected = PresetCatalog::default().get("clean").unwrap().config.clone();
    assert_eq!(state.snapshot().await, expected);

    // A follow-up read returns the same configuration
    let (_, body) = get(&app, "/api/effects").await;
    let effects: EffectsConfig = serde_json::from_value(body["effects"].clone()).unwrap();
    assert_eq!(effects, expected);
}

#[tokio::test]
async fn test_load_unknown_preset_is_not_found() {
    let (app, state) = polling_app();

    let (status, body) = post(&app, "/api/presets/nonexistent", json!({})).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Preset 'nonexistent' not found");
    assert_eq!(state.snapshot().await, EffectsConfig::default());
}

#[tokio::test]
async fn test_load_preset_pushes_every_section() {
    let gateway = Arc::new(MockGateway::default());
    let (app, state) = forwarding_app(gateway.clone());

    let (status, body) = post(&app, "/api/presets/lead", json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["results"].as_array().unwrap().len(), 4);
    assert_eq!(
        gateway.pushed(),
        vec![
            Section::Volume,
            Section::Overdrive,
            Section::Delay,
            Section::Gate
        ]
    );

    let expected = PresetCatalog::default().get("lead").unwrap().config.clone();
    assert_eq!(state.snapshot().await, expected);
}

#[tokio::test]
async fn test_load_preset_is_all_or_nothing_when_push_fails() {
    let gateway = Arc::new(MockGateway::failing(vec![Section::Delay]));
    let (app, state) = forwarding_app(gateway);

    let (status, body) = post(&app, "/api/presets/lead", json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Failed to load preset");

    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 4);
    assert_eq!(results[2]["section"], "delay");
    assert_eq!(results[2]["success"], false);

    // Local state untouched even though volume and overdrive pushes succeeded
    assert_eq!(state.snapshot().await, EffectsConfig::default());
}
