//! External position sensor reconciliation

use crate::config::DeviceClass;
use crate::state::CoverState;

/// Binary interpretation of a sensor state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorReading {
    Closed,
    NotClosed,
}

impl SensorReading {
    /// `false`, `closed` and `off` mean closed; anything else does not
    pub fn parse(state: &str) -> Self {
        match state.trim().to_ascii_lowercase().as_str() {
            "false" | "closed" | "off" => SensorReading::Closed,
            _ => SensorReading::NotClosed,
        }
    }
}

/// Apply a sensor reading on top of the simulated state.
///
/// Overrides the closed flag (and for windows the position) without touching
/// motion or the tick countdown. `tracks_position` is false for covers without
/// a travel time, whose position stays unknown.
pub fn reconcile(
    state: &mut CoverState,
    reading: SensorReading,
    device_class: Option<DeviceClass>,
    tracks_position: bool,
) {
    match reading {
        SensorReading::Closed => {
            if tracks_position && device_class == Some(DeviceClass::Window) {
                state.position = Some(0.0);
            }
            state.closed = true;
        }
        SensorReading::NotClosed => {
            state.closed = false;
            // No richer information: leaving closed means fully open.
            if state.rounded_position() == Some(0) {
                state.position = Some(100.0);
            }
        }
    }
}
