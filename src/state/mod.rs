//! State management module
//!
//! This module contains the simulated cover state, the snapshot published to
//! the host and the state shared by request handlers.

pub mod app_state;
pub mod cover_state;
pub mod snapshot;

// Re-export main types
pub use app_state::AppState;
pub use cover_state::{CoverState, Direction, Motion};
pub use snapshot::{CoverFeatures, CoverSnapshot, CoverStatus};
