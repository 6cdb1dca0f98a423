use thiserror::Error;

/// Application-wide error types for jobscout.
#[derive(Error, Debug)]
pub enum AppError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Structured-extraction backend rejected the request.
    #[error("Extraction error (HTTP {status_code}): {message}")]
    ExtractionError { message: String, status_code: u16 },

    /// Scoring (LLM) backend call failed.
    #[error("LLM error (HTTP {status_code}): {message}")]
    LlmError { message: String, status_code: u16 },

    /// JSON serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Reading or appending a local file failed.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Request timed out.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Network/connection error.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Missing or invalid configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    /// Returns true if the backend signalled throttling or a transient outage.
    ///
    /// Nothing retries on this; it only selects the log level for degraded calls.
    pub fn is_transient(&self) -> bool {
        match self {
            AppError::NetworkError(_) | AppError::Timeout(_) | AppError::RateLimitExceeded => true,
            AppError::ExtractionError { status_code, .. } | AppError::LlmError { status_code, .. } => {
                *status_code == 429 || *status_code >= 500
            }
            AppError::HttpError(msg) => {
                msg.contains("timeout") || msg.contains("connect") || msg.contains("reset")
            }
            _ => false,
        }
    }
}
