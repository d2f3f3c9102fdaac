//! Client connection settings.
//!
//! Resolved once at process start: defaults, then environment, then explicit
//! overrides from the caller (CLI flags in the MCP binary).

use std::time::Duration;

use url::Url;

use crate::error::{ClientError, ClientResult};

/// Public GenePattern server used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://cloud.genepattern.org/gp";

/// Environment variable naming the server base URL.
pub const BASE_URL_ENV: &str = "GENEPATTERN_URL";

/// Environment variable read by the default credential provider.
pub const API_KEY_ENV: &str = "GENEPATTERN_KEY";

/// Default per-call timeout.
pub const DEFAULT_TIMEOUT_MS: u64 = 120_000;

/// Connection settings for [`crate::GenePatternClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server base URL, e.g. `https://cloud.genepattern.org/gp`. The REST API
    /// lives under `{base_url}/rest`.
    pub base_url: String,
    /// Per-call request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Defaults overlaid with `GENEPATTERN_URL` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                config.base_url = url;
            }
        }
        config
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Parse and validate the base URL.
    pub fn base(&self) -> ClientResult<Url> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        let url = Url::parse(trimmed).map_err(|e| {
            ClientError::config_error(format!("Invalid base URL '{}': {}", self.base_url, e))
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ClientError::config_error(format!(
                "Invalid base URL '{}': unsupported scheme '{}'",
                self.base_url, other
            ))),
        }
    }

    /// REST root: `{base_url}/rest`, without a trailing slash.
    pub fn rest_url(&self) -> ClientResult<String> {
        let base = self.base()?;
        Ok(format!("{}/rest", base.as_str().trim_end_matches('/')))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), Duration::from_secs(120));
    }

    #[test]
    fn test_rest_url_strips_trailing_slash() {
        let config = ClientConfig::new("http://localhost:8080/gp/");
        assert_eq!(config.rest_url().unwrap(), "http://localhost:8080/gp/rest");
    }

    #[test]
    fn test_rest_url_default() {
        let config = ClientConfig::default();
        assert_eq!(
            config.rest_url().unwrap(),
            "https://cloud.genepattern.org/gp/rest"
        );
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        let err = ClientConfig::new("not a url").rest_url().unwrap_err();
        assert!(matches!(err, ClientError::ConfigError(_)));
    }

    #[test]
    fn test_unsupported_scheme_is_config_error() {
        let err = ClientConfig::new("ftp://example.org/gp").base().unwrap_err();
        assert!(err.to_string().contains("unsupported scheme"));
    }

    #[test]
    fn test_from_env_overrides_base_url() {
        temp_env::with_var(BASE_URL_ENV, Some("http://gp.internal:8080/gp"), || {
            let config = ClientConfig::from_env();
            assert_eq!(config.base_url, "http://gp.internal:8080/gp");
        });
    }

    #[test]
    fn test_from_env_ignores_blank() {
        temp_env::with_var(BASE_URL_ENV, Some("  "), || {
            let config = ClientConfig::from_env();
            assert_eq!(config.base_url, DEFAULT_BASE_URL);
        });
    }
}
