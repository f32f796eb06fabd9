//! SIEM client error types.

/// Errors from SIEM API interactions.
#[derive(Debug, thiserror::Error)]
pub enum SiemError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        /// Endpoint being called when the error occurred.
        endpoint: String,
        /// Underlying transport error.
        source: reqwest::Error,
    },
    /// The SIEM returned a non-2xx status.
    #[error("SIEM {endpoint} returned {status}: {body}")]
    ApiError {
        /// Endpoint being called.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// Response body text, for diagnostics.
        body: String,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        /// Endpoint being called.
        endpoint: String,
        /// Underlying deserialization error.
        source: reqwest::Error,
    },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}
