//! Application settings.
//!
//! Defaults, then `ecomind.toml` (or the file named by `ECOMIND_CONFIG`),
//! then `ECOMIND_*` environment variables, in increasing priority.

use resource_controller::{HttpTransport, TransportConfig, TransportError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "ecomind.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub data_endpoint: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".into(),
            timeout_secs: 30,
            data_endpoint: "/api/data".into(),
        }
    }
}

impl AppConfig {
    /// Loads settings from the process environment and working directory.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Like [`load`](Self::load), reading variables through `lookup`.
    pub fn load_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = match lookup("ECOMIND_CONFIG") {
            Some(path) => Self::from_file(Path::new(&path))?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        config.apply_overrides(lookup)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(v) = lookup("ECOMIND_BASE_URL") {
            self.base_url = v;
        }
        if let Some(v) = lookup("ECOMIND_TIMEOUT_SECS") {
            self.timeout_secs = v.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "ECOMIND_TIMEOUT_SECS",
                message: format!("{v:?} is not a whole number of seconds"),
            })?;
        }
        if let Some(v) = lookup("ECOMIND_DATA_ENDPOINT") {
            self.data_endpoint = v;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                key: "base_url",
                message: format!("{:?} must start with http:// or https://", self.base_url),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "timeout_secs",
                message: "must be greater than zero".into(),
            });
        }
        if !self.data_endpoint.starts_with('/') {
            return Err(ConfigError::Invalid {
                key: "data_endpoint",
                message: format!("{:?} must start with '/'", self.data_endpoint),
            });
        }
        Ok(())
    }

    pub fn transport_config(&self) -> TransportConfig {
        TransportConfig {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    pub fn http_transport(&self) -> Result<HttpTransport, TransportError> {
        HttpTransport::new(&self.transport_config())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("{name}-{}.toml", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let path = temp_file("ecomind-partial", "base_url = \"https://api.ecomind.example\"\n");
        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.base_url, "https://api.ecomind.example");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.data_endpoint, "/api/data");
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_env_overrides_file() {
        let path = temp_file("ecomind-env", "timeout_secs = 5\ndata_endpoint = \"/api/items\"\n");
        let config = AppConfig::load_with(env(&[
            ("ECOMIND_CONFIG", path.to_str().unwrap()),
            ("ECOMIND_TIMEOUT_SECS", "12"),
        ]))
        .unwrap();
        assert_eq!(config.timeout_secs, 12);
        assert_eq!(config.data_endpoint, "/api/items");
        assert_eq!(config.transport_config().timeout, Duration::from_secs(12));
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let path = temp_file("ecomind-unknown", "base_uri = \"http://x\"\n");
        let err = AppConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_invalid_values() {
        let err = AppConfig::load_with(env(&[
            ("ECOMIND_CONFIG", "/nonexistent/ecomind.toml"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));

        let mut config = AppConfig::default();
        let err = config
            .apply_overrides(env(&[("ECOMIND_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "ECOMIND_TIMEOUT_SECS", .. }));

        config.data_endpoint = "api/data".into();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { key: "data_endpoint", .. })
        ));
    }

    #[test]
    fn test_builds_http_transport() {
        let transport = AppConfig::default().http_transport().unwrap();
        assert_eq!(transport.base_url(), "http://127.0.0.1:3000");
    }
}
