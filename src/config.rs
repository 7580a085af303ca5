//! Client configuration.
//!
//! An explicit configuration record passed to the formatter and the dispatch
//! client; there is no process-wide state.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Request routing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RequestMode {
    /// Requests target live endpoints under the configured API prefix.
    #[default]
    Live,
    /// Requests target local fixture paths. Fixtures are always fetched with
    /// GET, regardless of the endpoint's configured verb.
    Mock,
}

/// Configuration for the API client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Scheme and authority requests are issued against.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path prefix for live API endpoints. Individual endpoints may override
    /// it.
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    /// Whether requests go to live endpoints or mock fixtures.
    #[serde(default)]
    pub mode: RequestMode,

    /// Client-side timeout in milliseconds, applied to every request unless
    /// an endpoint overrides it.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_api_prefix() -> String {
    "/api/v1".to_string()
}

fn default_timeout_ms() -> u64 {
    180_000
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_prefix: default_api_prefix(),
            mode: RequestMode::default(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.base_url.is_empty() {
            anyhow::bail!("base_url cannot be empty");
        }
        if self.base_url.ends_with('/') {
            anyhow::bail!("base_url must not end with a slash");
        }
        if !self.api_prefix.starts_with('/') {
            anyhow::bail!("api_prefix must start with a slash");
        }
        if self.timeout_ms == 0 {
            anyhow::bail!("timeout_ms must be greater than zero");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.api_prefix, "/api/v1");
        assert_eq!(config.mode, RequestMode::Live);
        assert_eq!(config.timeout_ms, 180_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
base_url: https://cluster.example.com
api_prefix: /api/v2
mode: mock
timeout_ms: 10000
"#;
        let config: ClientConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.base_url, "https://cluster.example.com");
        assert_eq!(config.api_prefix, "/api/v2");
        assert_eq!(config.mode, RequestMode::Mock);
        assert_eq!(config.timeout_ms, 10_000);
    }

    #[test]
    fn test_partial_yaml_falls_back_to_defaults() {
        let config: ClientConfig = serde_yaml::from_str("mode: mock\n").unwrap();
        assert_eq!(config.mode, RequestMode::Mock);
        assert_eq!(config.api_prefix, "/api/v1");
        assert_eq!(config.timeout_ms, 180_000);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<ClientConfig, _> = serde_yaml::from_str("retries: 3\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_failures() {
        let mut config = ClientConfig {
            api_prefix: "api/v1".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config.api_prefix = "/api/v1".to_string();
        config.timeout_ms = 0;
        assert!(config.validate().is_err());

        config.timeout_ms = 1000;
        config.base_url = "http://host/".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url: http://cv.internal:8443").unwrap();
        writeln!(file, "mode: live").unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(config.base_url, "http://cv.internal:8443");
        assert_eq!(config.mode, RequestMode::Live);
    }
}
