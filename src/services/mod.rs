//! External collaborator bindings
//!
//! This module contains the device descriptor loader and the transmitter
//! bindings used to emit open/close/stop payloads.

pub mod descriptor;
pub mod transmitter;

// Re-export main types
pub use descriptor::{CommandSet, DescriptorLoader, DeviceDescriptor, FileDescriptorLoader};
pub use transmitter::{get_controller, ControllerKind, Encoding, ProcessTransmitter, Transmitter};
