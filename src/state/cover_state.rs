//! Simulated cover state

use serde::{Deserialize, Serialize};

/// What the cover is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Motion {
    Idle,
    Opening,
    Closing,
}

/// Direction of a requested move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Open,
    Close,
}

impl Direction {
    /// Motion the cover enters while travelling this way
    pub fn motion(self) -> Motion {
        match self {
            Direction::Open => Motion::Opening,
            Direction::Close => Motion::Closing,
        }
    }
}

/// Position model of one cover.
///
/// `remaining_ticks` is non-zero exactly while `motion` is not `Idle`.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverState {
    /// 0 = fully closed, 100 = fully open; `None` until a position is known
    pub position: Option<f64>,
    /// Fallback used while `position` is unknown
    pub closed: bool,
    /// Fallback used while `position` is unknown
    pub opened: bool,
    pub motion: Motion,
    pub remaining_ticks: u32,
}

impl CoverState {
    /// Create an idle state at the given position
    pub fn new(position: Option<f64>) -> Self {
        Self {
            position: position.map(|p| p.clamp(0.0, 100.0)),
            closed: false,
            opened: false,
            motion: Motion::Idle,
            remaining_ticks: 0,
        }
    }

    /// Position rounded to the nearest whole percent
    pub fn rounded_position(&self) -> Option<u8> {
        self.position.map(|p| p.round().clamp(0.0, 100.0) as u8)
    }

    pub fn is_closed(&self) -> bool {
        match self.rounded_position() {
            Some(position) => position == 0,
            None => self.closed,
        }
    }

    pub fn is_opened(&self) -> bool {
        match self.rounded_position() {
            Some(position) => position == 100,
            None => self.opened,
        }
    }

    pub fn is_opening(&self) -> bool {
        self.motion == Motion::Opening
    }

    pub fn is_closing(&self) -> bool {
        self.motion == Motion::Closing
    }

    pub fn is_moving(&self) -> bool {
        self.motion != Motion::Idle
    }

    /// Enter a move lasting `ticks` ticks
    pub fn begin_travel(&mut self, direction: Direction, ticks: u32) {
        self.motion = direction.motion();
        self.remaining_ticks = ticks.max(1);
    }

    /// Return to idle, dropping whatever travel was left
    pub fn halt(&mut self) {
        self.motion = Motion::Idle;
        self.remaining_ticks = 0;
    }
}

impl Default for CoverState {
    fn default() -> Self {
        Self::new(None)
    }
}
