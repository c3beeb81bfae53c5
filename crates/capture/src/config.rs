//! Capture configuration.

use kami_patch::PatchQuery;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default polling interval while waiting for the payload.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Default hard deadline for the payload to appear.
pub const DEFAULT_DEADLINE_MS: u64 = 1500;

/// Clipboard type Origami Studio writes when a patch is copied.
pub const ORIGAMI_PAYLOAD_TYPE: &str = "com.facebook.diamond.resourceInfo.v1";

/// Bundle ID of Origami Studio.
pub const ORIGAMI_BUNDLE_ID: &str = "com.facebook.Origami-Studio";

/// Tunables of the capture protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Time between clipboard reads.
    pub poll_interval_ms: u64,
    /// Give up when no payload appeared this long after the copy command.
    pub deadline_ms: u64,
    /// Clipboard representation type carrying the payload.
    pub payload_type: String,
    /// Which payload record names the script.
    pub query: PatchQuery,
    /// Only react to the shortcut while this app is frontmost.
    pub target_bundle_id: Option<String>,
    /// Show the system permission prompt when permission is missing.
    pub request_permission_when_denied: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            deadline_ms: DEFAULT_DEADLINE_MS,
            payload_type: ORIGAMI_PAYLOAD_TYPE.to_string(),
            query: PatchQuery::default(),
            target_bundle_id: Some(ORIGAMI_BUNDLE_ID.to_string()),
            request_permission_when_denied: true,
        }
    }
}

/// Error loading or validating a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl CaptureConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn deadline(&self) -> Duration {
        Duration::from_millis(self.deadline_ms)
    }

    /// Reject settings the polling loop cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "poll_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.deadline_ms < self.poll_interval_ms {
            return Err(ConfigError::Invalid(format!(
                "deadline_ms ({}) must be at least poll_interval_ms ({})",
                self.deadline_ms, self.poll_interval_ms
            )));
        }
        if self.payload_type.trim().is_empty() {
            return Err(ConfigError::Invalid("payload_type is empty".to_string()));
        }

        let query = &self.query;
        for (name, value) in [
            ("query.type_name_field", &query.type_name_field),
            ("query.type_name_value", &query.type_name_value),
            ("query.path_field", &query.path_field),
        ] {
            if value.is_empty() {
                return Err(ConfigError::Invalid(format!("{name} is empty")));
            }
        }

        Ok(())
    }

    /// Load and validate a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Self = serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded capture config");
        Ok(config)
    }

    /// Load `path`, or the default location when `None`.
    ///
    /// A missing file yields the defaults; a broken one is an error.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            tracing::debug!(path = %path.display(), "No capture config, using defaults");
            return Ok(Self::default());
        }

        Self::load(&path)
    }
}

/// `~/Library/Application Support/kami/capture.json` on macOS,
/// `$XDG_CONFIG_HOME/kami/capture.json` elsewhere.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("kami").join("capture.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_match_origami() {
        let config = CaptureConfig::default();
        assert_eq!(config.poll_interval(), Duration::from_millis(50));
        assert_eq!(config.deadline(), Duration::from_millis(1500));
        assert_eq!(config.payload_type, "com.facebook.diamond.resourceInfo.v1");
        assert_eq!(config.query.type_name_value, "Patch Script");
        assert_eq!(config.query.required_suffix, ".js");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "deadline_ms": 3000, "target_bundle_id": null, "query": {{ "required_suffix": ".mjs" }} }}"#
        )
        .unwrap();

        let config = CaptureConfig::load(file.path()).unwrap();
        assert_eq!(config.deadline_ms, 3000);
        assert_eq!(config.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
        assert_eq!(config.target_bundle_id, None);
        assert_eq!(config.query.required_suffix, ".mjs");
        assert_eq!(config.query.path_field, "file-path");
    }

    #[test]
    fn test_rejects_zero_interval() {
        let config = CaptureConfig {
            poll_interval_ms: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_deadline_shorter_than_interval() {
        let config = CaptureConfig {
            poll_interval_ms: 100,
            deadline_ms: 50,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_empty_query_field() {
        let mut config = CaptureConfig::default();
        config.query.path_field.clear();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_parse_error_names_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = CaptureConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config =
            CaptureConfig::load_or_default(Some(&dir.path().join("capture.json"))).unwrap();
        assert_eq!(config, CaptureConfig::default());
    }
}
