//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

/// Display name used when none is configured
pub const DEFAULT_NAME: &str = "SmartRF Cover";

/// Where missing device descriptors are downloaded from; `{}` is the device code
pub const DEFAULT_CODES_SOURCE: &str =
    "https://raw.githubusercontent.com/zoranke/SmartRF/master/codes/cover/{}.json";

/// Cover device classes understood by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    Awning,
    Blind,
    Curtain,
    Damper,
    Door,
    Garage,
    Gate,
    Shade,
    Shutter,
    Window,
}

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "smartrf-cover")]
#[command(about = "Time-estimated position control for IR/RF driven covers")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20560")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Unique id reported to the host
    #[arg(long)]
    pub unique_id: Option<String>,

    /// Display name of the cover
    #[arg(long, default_value = DEFAULT_NAME)]
    pub name: String,

    /// Device code selecting the descriptor file
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub device_code: u32,

    /// Command line of the transmitter bridge, passed through untouched
    #[arg(long)]
    pub controller_data: String,

    /// Full travel time in seconds; omit to disable position estimation
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub travel_time: Option<u32>,

    /// Entity id of an external open/closed sensor
    #[arg(long)]
    pub position_sensor: Option<String>,

    /// Device class of the cover
    #[arg(long, value_enum)]
    pub device_class: Option<DeviceClass>,

    /// Last known position to start from
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub initial_position: Option<u8>,

    /// Directory holding `<device_code>.json` descriptors
    #[arg(long, default_value = "codes/cover")]
    pub codes_dir: PathBuf,

    /// URL template used to fetch missing descriptors
    #[arg(long, default_value = DEFAULT_CODES_SOURCE)]
    pub codes_source: String,

    /// Tick period in milliseconds
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_interval_ms: u64,

    /// Upper bound for one transmitter emission in milliseconds
    #[arg(long, default_value = "5000")]
    pub emit_timeout_ms: u64,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Per-device settings consumed by the controller
    pub fn cover_config(&self) -> CoverConfig {
        CoverConfig {
            unique_id: self.unique_id.clone(),
            name: self.name.clone(),
            device_code: self.device_code,
            controller_data: self.controller_data.clone(),
            travel_time: self.travel_time,
            position_sensor: self.position_sensor.clone(),
            device_class: self.device_class,
            initial_position: self.initial_position,
            tick_interval: Duration::from_millis(self.tick_interval_ms),
            emit_timeout: Duration::from_millis(self.emit_timeout_ms),
        }
    }
}

/// Static configuration of one cover device
#[derive(Debug, Clone)]
pub struct CoverConfig {
    pub unique_id: Option<String>,
    pub name: String,
    pub device_code: u32,
    /// Opaque to the controller, handed to the transmitter binding
    pub controller_data: String,
    /// `None` keeps the position unknown for the whole lifetime
    pub travel_time: Option<u32>,
    pub position_sensor: Option<String>,
    pub device_class: Option<DeviceClass>,
    pub initial_position: Option<u8>,
    pub tick_interval: Duration,
    pub emit_timeout: Duration,
}

impl CoverConfig {
    /// Minimal configuration with defaults for everything optional
    pub fn new(device_code: u32, controller_data: impl Into<String>) -> Self {
        Self {
            unique_id: None,
            name: DEFAULT_NAME.to_string(),
            device_code,
            controller_data: controller_data.into(),
            travel_time: None,
            position_sensor: None,
            device_class: None,
            initial_position: None,
            tick_interval: Duration::from_secs(1),
            emit_timeout: Duration::from_secs(5),
        }
    }
}
