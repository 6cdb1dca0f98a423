use crate::error::AppError;

/// Environment variable holding the extraction backend key.
pub const EXTRACTION_KEY_VAR: &str = "FIRECRAWL_API_KEY";
/// Environment variable holding the scoring backend key.
pub const SCORING_KEY_VAR: &str = "GEMINI_API_KEY";

/// Credentials for both backends, validated before any client is built.
#[derive(Clone)]
pub struct ApiKeys {
    pub extraction: String,
    pub scoring: String,
}

impl ApiKeys {
    /// Validate the keys as read from flags or the environment.
    ///
    /// A missing or blank key is a configuration error; nothing is sent to a
    /// backend with an empty credential.
    pub fn new(extraction: Option<String>, scoring: Option<String>) -> Result<Self, AppError> {
        Ok(Self {
            extraction: require(extraction, EXTRACTION_KEY_VAR)?,
            scoring: require(scoring, SCORING_KEY_VAR)?,
        })
    }
}

impl std::fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeys")
            .field("extraction", &"<redacted>")
            .field("scoring", &"<redacted>")
            .finish()
    }
}

fn require(value: Option<String>, var: &str) -> Result<String, AppError> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::ConfigError(format!(
            "{var} not set. Required before any backend call."
        ))),
    }
}
