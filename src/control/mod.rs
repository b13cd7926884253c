//! Position estimation and command dispatch
//!
//! This module contains the cover controller together with the travel
//! estimator and the sensor reconciler it builds on.

pub mod controller;
pub mod estimator;
pub mod reconciler;

// Re-export main types
pub use controller::CoverController;
pub use estimator::{SeekPlan, TravelEstimator};
pub use reconciler::{reconcile, SensorReading};
