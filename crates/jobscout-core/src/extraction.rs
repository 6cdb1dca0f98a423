use std::fmt;

use crate::error::AppError;
use crate::models::{ExtractRequest, ExtractionResult, JobPosting};
use crate::traits::StructuredExtractor;

/// Key under which the listing schema places the postings array.
pub const JOB_POSTINGS_KEY: &str = "job_postings";

/// JSON Schema describing the listing extraction output.
pub fn job_postings_schema() -> serde_json::Value {
    let field = |description: &str| {
        serde_json::json!({"type": "string", "description": description})
    };

    serde_json::json!({
        "type": "object",
        "title": "ExtractSchema",
        "description": "Schema for job postings extraction",
        "properties": {
            "job_postings": {
                "type": "array",
                "description": "List of job postings",
                "items": {
                    "type": "object",
                    "description": "Schema for job posting data",
                    "properties": {
                        "region": field("Region or area where the job is located"),
                        "role": field("Specific role or function within the job category"),
                        "job_title": field("Title of the job position"),
                        "experience": field("Experience required for the position"),
                        "job_link": field("Link to the job posting"),
                    }
                }
            }
        },
        "required": [JOB_POSTINGS_KEY]
    })
}

/// Why a listing extraction produced no postings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyReason {
    /// The backend reported `success = false`.
    Unsuccessful {
        status: String,
        error: Option<String>,
    },
    /// The payload had no `job_postings` key.
    MissingPostings,
    /// The payload or request did not have the expected shape.
    Malformed(String),
}

impl fmt::Display for EmptyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyReason::Unsuccessful { status, error } => {
                write!(f, "backend reported failure (status: {status:?})")?;
                if let Some(error) = error {
                    write!(f, ": {error}")?;
                }
                Ok(())
            }
            EmptyReason::MissingPostings => write!(f, "response has no {JOB_POSTINGS_KEY}"),
            EmptyReason::Malformed(detail) => write!(f, "malformed response: {detail}"),
        }
    }
}

/// Outcome of a listing extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listings {
    /// Postings as returned, in backend order. May be empty.
    Found(Vec<JobPosting>),
    /// No usable payload.
    Empty(EmptyReason),
}

impl Listings {
    /// The postings, or nothing for an empty outcome.
    pub fn into_postings(self) -> Vec<JobPosting> {
        match self {
            Listings::Found(postings) => postings,
            Listings::Empty(_) => Vec::new(),
        }
    }
}

/// Outcome of a description extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Description {
    /// Whatever the backend extracted from the posting page.
    Extracted(serde_json::Value),
    /// The extraction failed; the reason stands in for the description.
    Unavailable { reason: String },
}

impl Description {
    /// Text quoted in the scoring prompt.
    pub fn render(&self) -> String {
        match self {
            Description::Extracted(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            Description::Unavailable { reason } => {
                format!("[job description unavailable: {reason}]")
            }
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Description::Extracted(_))
    }
}

/// Normalizes structured-extraction calls into [`Listings`] and [`Description`].
#[derive(Clone)]
pub struct ExtractionClient<E: StructuredExtractor> {
    extractor: E,
}

impl<E: StructuredExtractor> ExtractionClient<E> {
    pub fn new(extractor: E) -> Self {
        Self { extractor }
    }

    /// Extract job postings from several listing pages.
    ///
    /// Backend-reported failures and unexpected payloads become
    /// [`Listings::Empty`]. Only a failed call (transport, authentication,
    /// rate limiting) is returned as `Err`.
    pub async fn extract_listings(
        &self,
        urls: &[String],
        instruction: &str,
        schema: &serde_json::Value,
    ) -> Result<Listings, AppError> {
        if urls.is_empty() {
            tracing::warn!("No listing URLs to extract from");
            return Ok(Listings::Empty(EmptyReason::Malformed(
                "no URLs supplied".into(),
            )));
        }

        let request = ExtractRequest {
            urls: urls.to_vec(),
            prompt: instruction.to_string(),
            schema: Some(schema.clone()),
        };

        tracing::info!(url_count = urls.len(), "Extracting job listings");
        let result = self.extractor.extract(&request).await?;
        let listings = parse_listings(&result);

        match &listings {
            Listings::Found(postings) => {
                tracing::info!(count = postings.len(), "Listing extraction returned postings");
            }
            Listings::Empty(reason) => {
                tracing::warn!(%reason, "Listing extraction returned no postings");
            }
        }
        Ok(listings)
    }

    /// Extract the description of one posting. Never fails.
    pub async fn extract_description(&self, url: &str, instruction: &str) -> Description {
        let request = ExtractRequest {
            urls: vec![url.to_string()],
            prompt: instruction.to_string(),
            schema: None,
        };

        tracing::info!(%url, "Getting job description");
        match self.extractor.extract(&request).await {
            Ok(result) if result.success => Description::Extracted(result.data),
            Ok(result) => {
                let reason = EmptyReason::Unsuccessful {
                    status: result.status,
                    error: result.error,
                }
                .to_string();
                tracing::warn!(%url, %reason, "Description extraction unsuccessful");
                Description::Unavailable { reason }
            }
            Err(e) => {
                if e.is_transient() {
                    tracing::warn!(%url, error = %e, "Description extraction failed");
                } else {
                    tracing::error!(%url, error = %e, "Description extraction failed");
                }
                Description::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }
}

/// Validate a listing envelope at the boundary.
///
/// Entries that are not objects are dropped; fields inside entries are
/// taken leniently by [`JobPosting::from_value`].
pub fn parse_listings(result: &ExtractionResult) -> Listings {
    if !result.success {
        return Listings::Empty(EmptyReason::Unsuccessful {
            status: result.status.clone(),
            error: result.error.clone(),
        });
    }

    let Some(data) = result.data.as_object() else {
        return Listings::Empty(EmptyReason::Malformed(format!(
            "data is {}, expected an object",
            json_kind(&result.data)
        )));
    };

    let Some(raw) = data.get(JOB_POSTINGS_KEY) else {
        return Listings::Empty(EmptyReason::MissingPostings);
    };

    let Some(entries) = raw.as_array() else {
        return Listings::Empty(EmptyReason::Malformed(format!(
            "{JOB_POSTINGS_KEY} is {}, expected an array",
            json_kind(raw)
        )));
    };

    let postings: Vec<JobPosting> = entries.iter().filter_map(JobPosting::from_value).collect();
    if postings.len() < entries.len() {
        tracing::warn!(
            dropped = entries.len() - postings.len(),
            "Dropped listing entries that were not objects"
        );
    }
    Listings::Found(postings)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
