//! Error types shared across the crate

use thiserror::Error;

/// Failures while locating or parsing a device descriptor
#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("descriptor file {path} not found")]
    Missing { path: String },

    #[error("descriptor download from {url} failed: {cause}")]
    Download { url: String, cause: String },

    #[error("descriptor for device code {device_code} is invalid: {cause}")]
    Parse { device_code: u32, cause: String },

    #[error("descriptor io error at {path}: {cause}")]
    Io { path: String, cause: String },
}

/// Failures while building a transmitter binding from descriptor data
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransmitterError {
    #[error("unsupported controller: {0}")]
    UnsupportedController(String),

    #[error("unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    #[error("{controller} does not accept {encoding} encoded commands")]
    IncompatibleEncoding { controller: String, encoding: String },

    #[error("controller data is empty")]
    EmptyControllerData,
}

/// Fatal errors that prevent a cover from being created
#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),

    #[error(transparent)]
    Transmitter(#[from] TransmitterError),
}

/// The cover runtime is no longer accepting events
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("cover runtime is not running")]
pub struct RuntimeError;
