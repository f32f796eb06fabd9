//! Splunk connection configuration.
//!
//! Credentials come from environment variables so they never land in the
//! workspace config file, which is committed alongside the hunts.

use url::Url;

/// Configuration for connecting to a Splunk management endpoint.
///
/// Custom `Debug` implementation redacts the `token` field to prevent
/// credential leakage in log output.
#[derive(Clone)]
pub struct SplunkConfig {
    /// Management API base URL, e.g. `https://splunk.example.com:8089`.
    pub base_url: Url,
    /// Bearer token for API authentication.
    pub token: String,
    /// Whether to verify the server TLS certificate.
    pub verify_tls: bool,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for SplunkConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SplunkConfig")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .field("verify_tls", &self.verify_tls)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl SplunkConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `SPLUNK_HOST` (required, hostname or full `https://` URL)
    /// - `SPLUNK_TOKEN` (required)
    /// - `SPLUNK_PORT` (default: 8089, ignored when `SPLUNK_HOST` is a URL)
    /// - `SPLUNK_VERIFY_TLS` (default: true; `0`, `false`, or `no` disable)
    /// - `SPLUNK_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("SPLUNK_HOST").map_err(|_| ConfigError::MissingHost)?;
        let token = std::env::var("SPLUNK_TOKEN").map_err(|_| ConfigError::MissingToken)?;

        let base_url = if host.starts_with("http://") || host.starts_with("https://") {
            Url::parse(&host)
                .map_err(|e| ConfigError::InvalidUrl("SPLUNK_HOST".to_string(), e.to_string()))?
        } else {
            let port: u16 = std::env::var("SPLUNK_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8089);
            Url::parse(&format!("https://{host}:{port}"))
                .map_err(|e| ConfigError::InvalidUrl("SPLUNK_HOST".to_string(), e.to_string()))?
        };

        let verify_tls = std::env::var("SPLUNK_VERIFY_TLS")
            .map(|s| !matches!(s.to_lowercase().as_str(), "0" | "false" | "no"))
            .unwrap_or(true);

        Ok(Self {
            base_url,
            token,
            verify_tls,
            timeout_secs: std::env::var("SPLUNK_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        })
    }

    /// Create a configuration pointing at a local mock server (for testing).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if the URL cannot be parsed.
    pub fn local_mock(base_url: &str, token: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: Url::parse(base_url)
                .map_err(|e| ConfigError::InvalidUrl("mock".to_string(), e.to_string()))?,
            token: token.to_string(),
            verify_tls: false,
            timeout_secs: 5,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `SPLUNK_HOST` missing from the environment.
    #[error("SPLUNK_HOST environment variable is required")]
    MissingHost,
    /// `SPLUNK_TOKEN` missing from the environment.
    #[error("SPLUNK_TOKEN environment variable is required")]
    MissingToken,
    /// The token was provided but cannot be sent as an HTTP header.
    #[error("SPLUNK_TOKEN contains characters not valid in an HTTP header")]
    InvalidToken,
    /// A URL could not be parsed.
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_mock_builds_valid_config() {
        let cfg = SplunkConfig::local_mock("http://127.0.0.1:9000", "test-token").unwrap();
        assert_eq!(cfg.token, "test-token");
        assert_eq!(cfg.timeout_secs, 5);
        assert!(!cfg.verify_tls);
        assert_eq!(cfg.base_url.as_str(), "http://127.0.0.1:9000/");
    }

    #[test]
    fn debug_redacts_token() {
        let cfg = SplunkConfig::local_mock("http://127.0.0.1:9000", "secret").unwrap();
        let rendered = format!("{cfg:?}");
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("secret"));
    }
}
