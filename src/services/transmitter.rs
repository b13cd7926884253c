//! IR/RF transmitter bindings

use std::{fmt, str::FromStr, time::Duration};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::TransmitterError;

/// Emits one encoded payload through IR/RF hardware.
///
/// Failures are reported as `false`; the controller never sees an error.
#[async_trait]
pub trait Transmitter: Send + Sync {
    async fn emit(&self, payload: &str) -> bool;
}

/// Controller families a descriptor can target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerKind {
    Broadlink,
    Xiaomi,
    Mqtt,
    Lookin,
    Esphome,
}

/// Payload encodings found in descriptors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Base64,
    Hex,
    Pronto,
    Raw,
}

impl ControllerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControllerKind::Broadlink => "Broadlink",
            ControllerKind::Xiaomi => "Xiaomi",
            ControllerKind::Mqtt => "MQTT",
            ControllerKind::Lookin => "LOOKin",
            ControllerKind::Esphome => "ESPHome",
        }
    }

    /// Encodings this controller family can emit
    pub fn encodings(&self) -> &'static [Encoding] {
        match self {
            ControllerKind::Broadlink => &[Encoding::Base64, Encoding::Hex, Encoding::Pronto],
            ControllerKind::Xiaomi => &[Encoding::Pronto, Encoding::Raw],
            ControllerKind::Mqtt => &[Encoding::Raw],
            ControllerKind::Lookin => &[Encoding::Pronto, Encoding::Raw],
            ControllerKind::Esphome => &[Encoding::Raw],
        }
    }

    pub fn supports(&self, encoding: Encoding) -> bool {
        self.encodings().contains(&encoding)
    }
}

impl FromStr for ControllerKind {
    type Err = TransmitterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "broadlink" => Ok(ControllerKind::Broadlink),
            "xiaomi" => Ok(ControllerKind::Xiaomi),
            "mqtt" => Ok(ControllerKind::Mqtt),
            "lookin" => Ok(ControllerKind::Lookin),
            "esphome" => Ok(ControllerKind::Esphome),
            _ => Err(TransmitterError::UnsupportedController(s.to_string())),
        }
    }
}

impl fmt::Display for ControllerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Encoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Base64 => "Base64",
            Encoding::Hex => "Hex",
            Encoding::Pronto => "Pronto",
            Encoding::Raw => "Raw",
        }
    }
}

impl FromStr for Encoding {
    type Err = TransmitterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "base64" => Ok(Encoding::Base64),
            "hex" => Ok(Encoding::Hex),
            "pronto" => Ok(Encoding::Pronto),
            "raw" => Ok(Encoding::Raw),
            _ => Err(TransmitterError::UnsupportedEncoding(s.to_string())),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hands payloads to an external bridge program.
///
/// `controller_data` is the bridge command line; every emission appends
/// `<controller> <encoding> <payload>` and waits for the exit status.
#[derive(Debug, Clone)]
pub struct ProcessTransmitter {
    program: String,
    args: Vec<String>,
    controller: ControllerKind,
    encoding: Encoding,
    timeout: Duration,
}

impl ProcessTransmitter {
    pub fn new(
        controller: ControllerKind,
        encoding: Encoding,
        controller_data: &str,
        timeout: Duration,
    ) -> Result<Self, TransmitterError> {
        let mut parts = controller_data.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or(TransmitterError::EmptyControllerData)?;

        Ok(Self {
            program,
            args: parts.collect(),
            controller,
            encoding,
            timeout,
        })
    }
}

#[async_trait]
impl Transmitter for ProcessTransmitter {
    async fn emit(&self, payload: &str) -> bool {
        debug!("Emitting {} payload through {}", self.encoding, self.program);

        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .arg(self.controller.as_str())
            .arg(self.encoding.as_str())
            .arg(payload)
            .kill_on_drop(true);

        match tokio::time::timeout(self.timeout, command.output()).await {
            Ok(Ok(output)) if output.status.success() => true,
            Ok(Ok(output)) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                warn!(
                    "Transmitter bridge exited with {}: {}",
                    output.status,
                    stderr.trim()
                );
                false
            }
            Ok(Err(e)) => {
                warn!("Failed to execute transmitter bridge {}: {}", self.program, e);
                false
            }
            Err(_) => {
                warn!(
                    "Transmitter bridge did not finish within {}ms",
                    self.timeout.as_millis()
                );
                false
            }
        }
    }
}

/// Build the binding selected by a descriptor's controller and encoding tags
pub fn get_controller(
    supported_controller: &str,
    commands_encoding: &str,
    controller_data: &str,
    timeout: Duration,
) -> Result<ProcessTransmitter, TransmitterError> {
    let controller: ControllerKind = supported_controller.parse()?;
    let encoding: Encoding = commands_encoding.parse()?;

    if !controller.supports(encoding) {
        return Err(TransmitterError::IncompatibleEncoding {
            controller: controller.to_string(),
            encoding: encoding.to_string(),
        });
    }

    ProcessTransmitter::new(controller, encoding, controller_data, timeout)
}
