//! Test utilities: mock implementations of all core traits.
//!
//! Handwritten mocks for dependency injection in unit tests. Every mock
//! records into a shared [`CallLog`] so tests can assert the order of
//! backend calls, pacing waits and report appends.

use std::sync::{Arc, Mutex};

use crate::error::AppError;
use crate::models::{ExtractRequest, ExtractionResult, OutputRecord, ResumeProfile};
use crate::traits::{Pacer, ReportSink, Scorer, StructuredExtractor};

// ---------------------------------------------------------------------------
// CallLog
// ---------------------------------------------------------------------------

/// One recorded interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Extract { urls: Vec<String> },
    Score,
    Wait,
    Append { sequence: usize },
}

impl Call {
    /// True for calls that reach an external backend.
    pub fn is_backend(&self) -> bool {
        matches!(self, Call::Extract { .. } | Call::Score)
    }
}

/// Ordered record of calls shared by all mocks of one test.
#[derive(Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// True if at least one wait separates every pair of backend calls.
    pub fn backend_calls_are_paced(&self) -> bool {
        let calls = self.calls();
        let mut waited_since_backend = true;
        for call in &calls {
            match call {
                Call::Wait => waited_since_backend = true,
                c if c.is_backend() => {
                    if !waited_since_backend {
                        return false;
                    }
                    waited_since_backend = false;
                }
                _ => {}
            }
        }
        true
    }
}

// ---------------------------------------------------------------------------
// MockExtractor
// ---------------------------------------------------------------------------

/// Mock extractor that returns queued envelopes.
#[derive(Clone)]
pub struct MockExtractor {
    log: CallLog,
    /// Queue of responses. Each call pops the first element.
    /// If empty, returns a default description payload.
    responses: Arc<Mutex<Vec<Result<ExtractionResult, AppError>>>>,
    pub requests: Arc<Mutex<Vec<ExtractRequest>>>,
}

impl MockExtractor {
    pub fn with_responses(log: CallLog, responses: Vec<Result<ExtractionResult, AppError>>) -> Self {
        Self {
            log,
            responses: Arc::new(Mutex::new(responses)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl StructuredExtractor for MockExtractor {
    async fn extract(&self, request: &ExtractRequest) -> Result<ExtractionResult, AppError> {
        self.log.push(Call::Extract {
            urls: request.urls.clone(),
        });
        self.requests.lock().unwrap().push(request.clone());

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(ExtractionResult::completed(
                serde_json::json!({"skills": ["Java", "Spring Boot", "Microservices"]}),
            ))
        } else {
            responses.remove(0)
        }
    }
}

// ---------------------------------------------------------------------------
// MockScorer
// ---------------------------------------------------------------------------

/// Mock scorer that returns queued replies, then echoes the prompt length.
#[derive(Clone)]
pub struct MockScorer {
    log: CallLog,
    responses: Arc<Mutex<Vec<Result<String, AppError>>>>,
    pub prompts: Arc<Mutex<Vec<String>>>,
}

impl MockScorer {
    /// Scorer that always replies with [`echo_length_reply`].
    pub fn echo_length(log: CallLog) -> Self {
        Self::with_responses(log, Vec::new())
    }

    pub fn with_responses(log: CallLog, responses: Vec<Result<String, AppError>>) -> Self {
        Self {
            log,
            responses: Arc::new(Mutex::new(responses)),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

/// The reply [`MockScorer::echo_length`] gives for `prompt`.
pub fn echo_length_reply(prompt: &str) -> String {
    format!("prompt length: {}", prompt.len())
}

impl Scorer for MockScorer {
    async fn generate(&self, prompt: &str) -> Result<String, AppError> {
        self.log.push(Call::Score);
        self.prompts.lock().unwrap().push(prompt.to_string());

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(echo_length_reply(prompt))
        } else {
            responses.remove(0)
        }
    }
}

// ---------------------------------------------------------------------------
// RecordingPacer
// ---------------------------------------------------------------------------

/// Pacer that records waits instead of sleeping.
#[derive(Clone)]
pub struct RecordingPacer {
    log: CallLog,
}

impl RecordingPacer {
    pub fn new(log: CallLog) -> Self {
        Self { log }
    }
}

impl Pacer for RecordingPacer {
    async fn wait(&self) {
        self.log.push(Call::Wait);
    }
}

// ---------------------------------------------------------------------------
// MockReport
// ---------------------------------------------------------------------------

/// Report sink that keeps records in memory.
#[derive(Clone)]
pub struct MockReport {
    log: CallLog,
    pub records: Arc<Mutex<Vec<OutputRecord>>>,
    error: Arc<Mutex<Option<AppError>>>,
}

impl MockReport {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            records: Arc::new(Mutex::new(Vec::new())),
            error: Arc::new(Mutex::new(None)),
        }
    }

    /// Sink whose first append fails with `error`.
    pub fn with_error(log: CallLog, error: AppError) -> Self {
        Self {
            log,
            records: Arc::new(Mutex::new(Vec::new())),
            error: Arc::new(Mutex::new(Some(error))),
        }
    }
}

impl ReportSink for MockReport {
    fn append(&self, record: &OutputRecord) -> Result<(), AppError> {
        if let Some(e) = self.error.lock().unwrap().take() {
            return Err(e);
        }
        self.log.push(Call::Append {
            sequence: record.sequence_number,
        });
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

/// A successful listing envelope with one posting per link.
pub fn listing_result(links: &[&str]) -> ExtractionResult {
    let postings: Vec<serde_json::Value> = links
        .iter()
        .map(|link| {
            serde_json::json!({
                "region": "Bengaluru",
                "role": "Software Development",
                "job_title": "Java Developer",
                "experience": "3-8 Yrs",
                "job_link": link,
            })
        })
        .collect();
    ExtractionResult::completed(serde_json::json!({ "job_postings": postings }))
}

/// A small resume with recognizable content in every section.
pub fn test_resume() -> ResumeProfile {
    ResumeProfile {
        education: "\\section{Education} NIT Rourkela, B.Tech ECE".to_string(),
        technical_skills: "\\section{Technical Skills} Java, Spring Boot, Kafka".to_string(),
        experience: "\\section{Experience} Barclays, Graduate Analyst".to_string(),
    }
}
