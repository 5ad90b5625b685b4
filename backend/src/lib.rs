//! Tonebridge backend library.
//!
//! This module exposes the application builder for use in tests.

use axum::http::{header, Method};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod api;
pub mod config;
pub mod gateway;
pub mod openapi;
pub mod presets;
pub mod state;
pub mod validator;

use state::AppState;

/// Create the Axum application router with default (polling) state.
///
/// This function is used both by the main server binary and by integration tests.
pub fn create_app() -> Router {
    create_app_with_state(AppState::default())
}

/// Create the Axum application router with a given state.
pub fn create_app_with_state(state: AppState) -> Router {
    let api_router = Router::new()
        .route("/health", get(api::health::health))
        .route("/effects", get(api::effects::get_effects))
        .route("/effects", post(api::effects::update_effects))
        .route("/volume", post(api::effects::set_volume))
        .route("/overdrive", post(api::effects::set_overdrive))
        .route("/delay", post(api::effects::set_delay))
        .route("/gate", post(api::effects::set_gate))
        .route("/presets", get(api::presets::list_presets))
        .route("/presets/{name}", post(api::presets::load_preset));

    Router::new()
        .merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()),
        )
        .nest("/api", api_router)
        .layer(TraceLayer::new_for_http())
        // The mobile front-end is served from a different origin
        .layer(
            CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
                .allow_origin(Any),
        )
        .with_state(state)
}
