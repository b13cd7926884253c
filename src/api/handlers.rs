//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Json};
use tracing::{error, info, warn};

use super::responses::{
    ApiResponse, HealthResponse, PositionRequest, SensorRequest, StatusResponse,
};
use crate::{
    state::{AppState, CoverSnapshot},
    tasks::CoverCommand,
};

async fn dispatch(
    state: &AppState,
    command: CoverCommand,
    message: &str,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.cover.send(command).await {
        Ok(cover) => Ok(Json(ApiResponse::accepted(message.to_string(), cover))),
        Err(e) => {
            error!("Failed to deliver command: {}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

/// Handle POST /cover/open
pub async fn open_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    info!("Open endpoint called");
    dispatch(&state, CoverCommand::Open, "Open requested").await
}

/// Handle POST /cover/close
pub async fn close_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    info!("Close endpoint called");
    dispatch(&state, CoverCommand::Close, "Close requested").await
}

/// Handle POST /cover/stop
pub async fn stop_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    info!("Stop endpoint called");
    dispatch(&state, CoverCommand::Stop, "Stop requested").await
}

/// Handle POST /cover/position
pub async fn position_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PositionRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    if !(0..=100).contains(&request.position) {
        warn!("Rejecting position {}", request.position);
        return Err(StatusCode::BAD_REQUEST);
    }

    info!("Position endpoint called with {}", request.position);
    dispatch(
        &state,
        CoverCommand::SetPosition(request.position),
        &format!("Move to {} requested", request.position),
    )
    .await
}

/// Handle POST /cover/sensor - state change of the position sensor
pub async fn sensor_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SensorRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let command = CoverCommand::Sensor {
        entity_id: request.entity_id,
        state: request.state,
    };
    dispatch(&state, command, "Sensor state received").await
}

/// Handle GET /cover - last published snapshot
pub async fn cover_handler(State(state): State<Arc<AppState>>) -> Json<CoverSnapshot> {
    Json(state.cover.snapshot())
}

/// Handle GET /status - snapshot with server metadata
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        cover: state.cover.snapshot(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
