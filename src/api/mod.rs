//! HTTP API module
//!
//! This module contains the host adapter: endpoint handlers exposing the
//! cover snapshot and its open/close/stop/seek operations.

pub mod handlers;
pub mod responses;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/cover", get(cover_handler))
        .route("/cover/open", post(open_handler))
        .route("/cover/close", post(close_handler))
        .route("/cover/stop", post(stop_handler))
        .route("/cover/position", post(position_handler))
        .route("/cover/sensor", post(sensor_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
