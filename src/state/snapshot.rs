//! Read-only view of a cover handed to the host

use serde::{Deserialize, Serialize};

use crate::config::DeviceClass;

/// Operations the host may offer for this cover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverFeatures {
    pub open: bool,
    pub close: bool,
    pub stop: bool,
    pub set_position: bool,
}

impl CoverFeatures {
    /// Seeking needs a travel time to estimate position from
    pub fn for_travel_time(travel_time: Option<u32>) -> Self {
        Self {
            open: true,
            close: true,
            stop: true,
            set_position: travel_time.is_some(),
        }
    }
}

/// Host-level state of the cover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverStatus {
    Open,
    Opening,
    Closing,
    Closed,
}

/// Snapshot published after every state change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverSnapshot {
    pub unique_id: Option<String>,
    pub name: String,
    pub device_class: Option<DeviceClass>,
    pub device_code: u32,
    pub manufacturer: String,
    pub supported_models: Vec<String>,
    pub features: CoverFeatures,
    pub state: CoverStatus,
    pub position: Option<u8>,
    pub is_closed: bool,
    pub is_opened: bool,
    pub is_opening: bool,
    pub is_closing: bool,
}

impl CoverStatus {
    pub fn from_flags(is_opening: bool, is_closing: bool, is_closed: bool) -> Self {
        if is_opening {
            CoverStatus::Opening
        } else if is_closing {
            CoverStatus::Closing
        } else if is_closed {
            CoverStatus::Closed
        } else {
            CoverStatus::Open
        }
    }
}
