use std::time::Duration;

use jobscout_core::error::AppError;
use jobscout_core::models::{ExtractRequest, ExtractionResult};
use jobscout_core::traits::StructuredExtractor;
use reqwest::{Client, Response};
use serde::Deserialize;

use crate::http::{error_message, send_error};

const DEFAULT_BASE_URL: &str = "https://api.firecrawl.dev";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);
const DEFAULT_MAX_POLLS: u32 = 60;

/// Firecrawl `/v1/extract` client.
///
/// Extraction runs as an asynchronous backend job: the request returns a job
/// id, and the result is polled until the job completes, fails or is
/// cancelled.
#[derive(Clone)]
pub struct FirecrawlExtractor {
    client: Client,
    base_url: String,
    api_key: String,
    timeout_secs: u64,
    poll_interval: Duration,
    max_polls: u32,
}

impl FirecrawlExtractor {
    pub fn new(api_key: &str) -> Result<Self, AppError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: &str, base_url: &str) -> Result<Self, AppError> {
        Self::build(api_key, base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(self, timeout: Duration) -> Result<Self, AppError> {
        let rebuilt = Self::build(&self.api_key, &self.base_url, timeout)?;
        Ok(Self {
            poll_interval: self.poll_interval,
            max_polls: self.max_polls,
            ..rebuilt
        })
    }

    /// Set how often and how many times a pending job is polled.
    pub fn with_polling(mut self, interval: Duration, max_polls: u32) -> Self {
        self.poll_interval = interval;
        self.max_polls = max_polls.max(1);
        self
    }

    fn build(api_key: &str, base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::HttpError(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            timeout_secs: timeout.as_secs(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_polls: DEFAULT_MAX_POLLS,
        })
    }

    fn extract_url(&self) -> String {
        format!("{}/v1/extract", self.base_url)
    }

    fn status_url(&self, id: &str) -> String {
        format!("{}/v1/extract/{}", self.base_url, id)
    }

    async fn poll(&self, id: &str) -> Result<ExtractionResult, AppError> {
        let url = self.status_url(id);

        for attempt in 1..=self.max_polls {
            tokio::time::sleep(self.poll_interval).await;

            let response = self
                .client
                .get(&url)
                .bearer_auth(&self.api_key)
                .send()
                .await
                .map_err(|e| send_error(e, self.timeout_secs))?;
            let result: ExtractionResult = read_json(response).await?;

            match poll_state(&result.status) {
                PollState::Done => return Ok(result),
                PollState::Failed => {
                    return Ok(ExtractionResult {
                        success: false,
                        ..result
                    });
                }
                PollState::Pending => {
                    tracing::debug!(%id, attempt, status = %result.status, "Extraction still running");
                }
            }
        }

        let waited = self.poll_interval.as_secs() * u64::from(self.max_polls);
        tracing::warn!(%id, waited_secs = waited, "Extraction job did not finish");
        Err(AppError::Timeout(waited))
    }
}

// ---- Firecrawl API types ----

#[derive(Deserialize)]
struct StartResponse {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    data: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<String>,
}

/// What to do after the initial extract request.
#[derive(Debug, PartialEq)]
enum Started {
    /// The backend answered synchronously.
    Finished(ExtractionResult),
    /// Poll this job id.
    Job(String),
}

fn interpret_start(start: StartResponse) -> Result<Started, AppError> {
    if start.success != Some(true) {
        return Ok(Started::Finished(ExtractionResult::failed(
            "failed",
            start.error,
        )));
    }
    match (start.id, start.data) {
        (_, Some(data)) => Ok(Started::Finished(ExtractionResult::completed(data))),
        (Some(id), None) => Ok(Started::Job(id)),
        (None, None) => Err(AppError::ExtractionError {
            message: "Extract response had neither a job id nor data".into(),
            status_code: 200,
        }),
    }
}

#[derive(Debug, PartialEq, Eq)]
enum PollState {
    Done,
    Failed,
    Pending,
}

fn poll_state(status: &str) -> PollState {
    match status {
        "completed" => PollState::Done,
        "failed" | "cancelled" => PollState::Failed,
        _ => PollState::Pending,
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, AppError> {
    let status = response.status();
    if !status.is_success() {
        let status_code = status.as_u16();
        let body = response.text().await.unwrap_or_default();

        if status_code == 429 {
            return Err(AppError::RateLimitExceeded);
        }
        return Err(AppError::ExtractionError {
            message: error_message(status_code, &body),
            status_code,
        });
    }

    response
        .json()
        .await
        .map_err(|e| AppError::HttpError(format!("Failed to parse extraction response: {e}")))
}

impl StructuredExtractor for FirecrawlExtractor {
    async fn extract(&self, request: &ExtractRequest) -> Result<ExtractionResult, AppError> {
        let response = self
            .client
            .post(self.extract_url())
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| send_error(e, self.timeout_secs))?;
        let start: StartResponse = read_json(response).await?;

        match interpret_start(start)? {
            Started::Finished(result) => Ok(result),
            Started::Job(id) => {
                tracing::debug!(%id, "Extraction job started");
                self.poll(&id).await
            }
        }
    }
}
