//! Travel time to tick conversion

use crate::state::Direction;

/// Outcome of planning a seek to an absolute position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekPlan {
    /// Run a full close
    Close,
    /// Run a full open
    Open,
    /// Travel for `ticks` ticks in `direction`
    Travel { ticks: u32, direction: Direction },
    /// Nothing to do
    NoOp,
}

impl SeekPlan {
    /// Targets at or beyond the end stops become full moves
    pub fn for_end_stop(target: i32) -> Option<Self> {
        if target <= 0 {
            Some(SeekPlan::Close)
        } else if target >= 100 {
            Some(SeekPlan::Open)
        } else {
            None
        }
    }
}

/// Linear position model derived from the configured travel time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TravelEstimator {
    travel_time: u32,
}

impl TravelEstimator {
    /// `travel_time` is the seconds (ticks) a full open or close takes
    pub fn new(travel_time: u32) -> Self {
        Self {
            travel_time: travel_time.max(1),
        }
    }

    pub fn travel_time(&self) -> u32 {
        self.travel_time
    }

    /// Percent of travel covered per tick
    pub fn step_size(&self) -> f64 {
        100.0 / f64::from(self.travel_time)
    }

    /// Ticks scheduled for a full open or close.
    ///
    /// One extra tick absorbs the jitter before the first real decrement.
    pub fn full_travel_ticks(&self) -> u32 {
        self.travel_time + 1
    }

    /// Plan a move from `current` to `target`
    pub fn plan_seek(&self, current: Option<f64>, target: i32, in_flight: bool) -> SeekPlan {
        if let Some(plan) = SeekPlan::for_end_stop(target) {
            return plan;
        }
        let Some(current) = current else {
            return SeekPlan::NoOp;
        };

        let target = f64::from(target);
        if current.round() == target.round() || in_flight {
            return SeekPlan::NoOp;
        }

        let steps = ((target - current) / self.step_size()).abs();
        let ticks = if steps >= 1.0 { steps.round() as u32 } else { 1 };
        let direction = if target < current {
            Direction::Close
        } else {
            Direction::Open
        };

        SeekPlan::Travel { ticks, direction }
    }
}
