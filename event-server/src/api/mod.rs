//! HTTP API for event-server

pub mod download;
pub mod health;
pub mod register;
pub mod scan;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::{Router, middleware};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::rate_limit::register_rate_limit;
use crate::state::AppState;

/// Room for the JSON `data` field and multipart framing on top of the proof file
const FORM_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + FORM_OVERHEAD_BYTES;

    // Public registration (rate limited per client IP)
    let registration = Router::new()
        .route("/register", post(register::register))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            register_rate_limit,
        ));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/scan", get(scan::scan))
        .route("/download", get(download::download))
        .merge(registration)
        .nest_service("/uploads", ServeDir::new(state.config.upload_dir.clone()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
