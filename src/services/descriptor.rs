//! Device descriptor documents and their loading

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::error::DescriptorError;

/// Static per-device-code document describing how to drive a cover
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDescriptor {
    pub manufacturer: String,
    pub supported_models: Vec<String>,
    pub supported_controller: String,
    pub commands_encoding: String,
    pub commands: CommandSet,
}

/// The three payloads a cover understands, in the binding's native encoding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandSet {
    pub open: String,
    pub close: String,
    pub stop: String,
}

impl DeviceDescriptor {
    /// Parse a descriptor document
    pub fn from_json(device_code: u32, text: &str) -> Result<Self, DescriptorError> {
        serde_json::from_str(text).map_err(|e| DescriptorError::Parse {
            device_code,
            cause: e.to_string(),
        })
    }
}

/// Source of device descriptors keyed by device code
#[async_trait]
pub trait DescriptorLoader: Send + Sync {
    async fn load(&self, device_code: u32) -> Result<DeviceDescriptor, DescriptorError>;
}

/// Reads `<codes_dir>/<code>.json`, downloading it once when missing
#[derive(Debug, Clone)]
pub struct FileDescriptorLoader {
    codes_dir: PathBuf,
    codes_source: Option<String>,
    client: reqwest::Client,
    fetch_timeout: Duration,
}

impl FileDescriptorLoader {
    /// Loader that only looks at the local directory
    pub fn local(codes_dir: impl Into<PathBuf>) -> Self {
        Self {
            codes_dir: codes_dir.into(),
            codes_source: None,
            client: reqwest::Client::new(),
            fetch_timeout: Duration::from_secs(30),
        }
    }

    /// Loader that falls back to `codes_source` (with `{}` replaced by the device code)
    pub fn with_source(codes_dir: impl Into<PathBuf>, codes_source: impl Into<String>) -> Self {
        Self {
            codes_source: Some(codes_source.into()),
            ..Self::local(codes_dir)
        }
    }

    /// Path of the descriptor file for a device code
    pub fn descriptor_path(&self, device_code: u32) -> PathBuf {
        self.codes_dir.join(format!("{}.json", device_code))
    }

    async fn download(&self, device_code: u32, path: &Path) -> Result<(), DescriptorError> {
        let Some(template) = &self.codes_source else {
            return Err(DescriptorError::Missing {
                path: path.display().to_string(),
            });
        };
        let url = template.replace("{}", &device_code.to_string());
        info!("Downloading descriptor for device code {} from {}", device_code, url);

        let download_error = |cause: String| DescriptorError::Download {
            url: url.clone(),
            cause,
        };

        let response = self
            .client
            .get(&url)
            .timeout(self.fetch_timeout)
            .send()
            .await
            .map_err(|e| download_error(e.to_string()))?;
        let response = response
            .error_for_status()
            .map_err(|e| download_error(e.to_string()))?;
        let body = response
            .text()
            .await
            .map_err(|e| download_error(e.to_string()))?;

        tokio::fs::create_dir_all(&self.codes_dir)
            .await
            .map_err(|e| io_error(&self.codes_dir, e))?;
        tokio::fs::write(path, body)
            .await
            .map_err(|e| io_error(path, e))?;

        debug!("Descriptor saved to {}", path.display());
        Ok(())
    }
}

#[async_trait]
impl DescriptorLoader for FileDescriptorLoader {
    async fn load(&self, device_code: u32) -> Result<DeviceDescriptor, DescriptorError> {
        let path = self.descriptor_path(device_code);

        let exists = tokio::fs::try_exists(&path)
            .await
            .map_err(|e| io_error(&path, e))?;
        if !exists {
            warn!(
                "Couldn't find the descriptor file {}, trying to download it",
                path.display()
            );
            if let Err(e) = self.download(device_code, &path).await {
                error!(
                    "Descriptor for device code {} is unavailable; place the file manually in {}",
                    device_code,
                    self.codes_dir.display()
                );
                return Err(e);
            }
        }

        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| io_error(&path, e))?;
        DeviceDescriptor::from_json(device_code, &text)
    }
}

fn io_error(path: &Path, e: std::io::Error) -> DescriptorError {
    DescriptorError::Io {
        path: path.display().to_string(),
        cause: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "manufacturer": "Dooya",
        "supportedModels": ["DC1600", "DC2700"],
        "supportedController": "Broadlink",
        "commandsEncoding": "Base64",
        "commands": {
            "open": "JgBQAAAB",
            "close": "JgBQAAAC",
            "stop": "JgBQAAAD"
        }
    }"#;

    #[test]
    fn parses_descriptor_document() {
        let descriptor = DeviceDescriptor::from_json(1000, SAMPLE).unwrap();
        assert_eq!(descriptor.manufacturer, "Dooya");
        assert_eq!(descriptor.supported_models, vec!["DC1600", "DC2700"]);
        assert_eq!(descriptor.supported_controller, "Broadlink");
        assert_eq!(descriptor.commands_encoding, "Base64");
        assert_eq!(descriptor.commands.stop, "JgBQAAAD");
    }

    #[test]
    fn rejects_missing_command() {
        let text = SAMPLE.replace(r#""stop": "JgBQAAAD""#, r#""pause": "JgBQAAAD""#);
        let err = DeviceDescriptor::from_json(1000, &text).unwrap_err();
        assert!(matches!(err, DescriptorError::Parse { device_code: 1000, .. }));
    }

    #[tokio::test]
    async fn loads_local_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("1000.json"), SAMPLE).unwrap();

        let loader = FileDescriptorLoader::local(dir.path());
        let descriptor = loader.load(1000).await.unwrap();
        assert_eq!(descriptor.commands.open, "JgBQAAAB");
    }

    #[tokio::test]
    async fn invalid_local_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("1001.json"), "{ not json").unwrap();

        let loader = FileDescriptorLoader::local(dir.path());
        let err = loader.load(1001).await.unwrap_err();
        assert!(matches!(err, DescriptorError::Parse { .. }));
    }

    #[tokio::test]
    async fn missing_file_without_source_fails() {
        let dir = tempfile::tempdir().unwrap();
        let loader = FileDescriptorLoader::local(dir.path());
        let err = loader.load(9999).await.unwrap_err();
        assert!(matches!(err, DescriptorError::Missing { .. }));
    }

    #[tokio::test]
    async fn failed_download_leaves_no_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let loader = FileDescriptorLoader::with_source(dir.path(), "http://127.0.0.1:1/{}.json");

        let err = loader.load(9999).await.unwrap_err();
        assert!(matches!(err, DescriptorError::Download { .. }));
        assert!(!loader.descriptor_path(9999).exists());
    }
}
