//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::CoverSnapshot;

/// API response structure for command endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub cover: CoverSnapshot,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, cover: CoverSnapshot) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            cover,
        }
    }

    /// Command was handed to the cover
    pub fn accepted(message: String, cover: CoverSnapshot) -> Self {
        Self::new("accepted".to_string(), message, cover)
    }
}

/// Status response with server metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub cover: CoverSnapshot,
    pub uptime: String,
    pub port: u16,
    pub host: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Body of `POST /cover/position`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionRequest {
    pub position: i32,
}

/// Body of `POST /cover/sensor`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorRequest {
    pub entity_id: String,
    #[serde(default)]
    pub state: Option<String>,
}
