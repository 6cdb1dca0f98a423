use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Search parameters for one discovery run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub job_title: String,
    pub location: String,
    pub experience_years: u32,
    pub skills: Vec<String>,
}

impl SearchCriteria {
    pub fn new(
        job_title: impl Into<String>,
        location: impl Into<String>,
        experience_years: u32,
        skills: Vec<String>,
    ) -> Self {
        Self {
            job_title: job_title.into(),
            location: location.into(),
            experience_years,
            skills,
        }
    }

    /// Skills joined the way they appear in prompts: `"java, spring"`.
    pub fn skills_string(&self) -> String {
        self.skills.join(", ")
    }
}

/// One job-opening record as returned by the extraction backend.
///
/// Every field is optional; the backend fills in what it finds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_link: Option<String>,
}

impl JobPosting {
    /// Build a posting from an untrusted JSON value.
    ///
    /// Returns `None` if the value is not an object. Fields that are missing,
    /// not strings, or blank are treated as absent.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        let obj = value.as_object()?;
        let field = |key: &str| {
            obj.get(key)
                .and_then(|v| v.as_str())
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        Some(Self {
            region: field("region"),
            role: field("role"),
            job_title: field("job_title"),
            experience: field("experience"),
            job_link: field("job_link"),
        })
    }

    /// The posting's link, if it has a usable one.
    pub fn link(&self) -> Option<&str> {
        self.job_link.as_deref()
    }
}

/// A request to the structured-extraction backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractRequest {
    pub urls: Vec<String>,
    pub prompt: String,
    /// JSON Schema for the output; `None` lets the backend choose the shape.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<serde_json::Value>,
}

/// Response envelope of the structured-extraction backend.
///
/// Fields the backend omits, nulls or sends with an unexpected type read as
/// their defaults, so an odd envelope is an unsuccessful result rather than a
/// decode error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    #[serde(default, deserialize_with = "lenient_flag")]
    pub success: bool,
    #[serde(default)]
    pub data: serde_json::Value,
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: String,
    #[serde(
        rename = "expiresAt",
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub expires_at: Option<DateTime<Utc>>,
    /// Failure reason reported by the backend, if any.
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub error: Option<String>,
}

impl ExtractionResult {
    /// A successful, completed envelope around `data`.
    pub fn completed(data: serde_json::Value) -> Self {
        Self {
            success: true,
            data,
            status: "completed".to_string(),
            expires_at: None,
            error: None,
        }
    }

    /// An unsuccessful envelope with the given status.
    pub fn failed(status: impl Into<String>, error: Option<String>) -> Self {
        Self {
            success: false,
            data: serde_json::Value::Null,
            status: status.into(),
            expires_at: None,
            error,
        }
    }
}

/// Read a boolean, treating null or any non-boolean as `false`.
fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| v.as_bool()).unwrap_or(false))
}

/// Read a string, treating null or any non-string as absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| v.as_str().map(str::to_string)))
}

fn lenient_status<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

/// Parse an RFC 3339 timestamp, treating anything unparseable as absent.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(|v| v.as_str())
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc)))
}

/// The candidate's resume, split into the sections the scoring prompt quotes.
///
/// Sections are opaque text blocks (typically LaTeX fragments).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeProfile {
    #[serde(default)]
    pub education: String,
    #[serde(default)]
    pub technical_skills: String,
    #[serde(default)]
    pub experience: String,
}

impl ResumeProfile {
    /// Parse a profile from JSON text.
    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        let profile: Self = serde_json::from_str(raw)?;
        if profile.education.trim().is_empty()
            && profile.technical_skills.trim().is_empty()
            && profile.experience.trim().is_empty()
        {
            return Err(AppError::ConfigError(
                "Resume profile has no content in any section".into(),
            ));
        }
        Ok(profile)
    }

    /// Load a profile from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::ConfigError(format!(
                "Failed to read resume profile {}: {e}",
                path.display()
            ))
        })?;
        Self::from_json(&raw)
    }
}

/// One processed job as written to the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord {
    pub sequence_number: usize,
    pub job_link: String,
    pub analysis: String,
}
