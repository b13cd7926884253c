//! SmartRF Cover - time-estimated position control for IR/RF covers
//!
//! Covers driven by open/close/stop pulses have no position feedback. This
//! library simulates their position from elapsed travel time, seeks absolute
//! positions, and reconciles the estimate with an optional open/closed sensor.

pub mod api;
pub mod config;
pub mod control;
pub mod error;
pub mod services;
pub mod setup;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::{Config, CoverConfig, DeviceClass};
pub use control::CoverController;
pub use error::{DescriptorError, RuntimeError, SetupError, TransmitterError};
pub use services::{DescriptorLoader, DeviceDescriptor, FileDescriptorLoader, Transmitter};
pub use setup::{setup_cover, try_setup_cover};
pub use state::{AppState, CoverSnapshot};
pub use tasks::{spawn_cover_runtime, CoverCommand, CoverHandle};
pub use utils::signals::shutdown_signal;
