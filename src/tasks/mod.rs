//! Background tasks module
//!
//! This module contains the cover runtime loop and the tick subscription that
//! drives position estimation.

pub mod cover_runtime;
pub mod tick_scheduler;

// Re-export main types
pub use cover_runtime::{
    cover_runtime_task, event_channel, spawn_cover_runtime, CoverCommand, CoverEvent, CoverHandle,
    EventReceiver, EventSender,
};
pub use tick_scheduler::{TickDisposition, TickScheduler};
