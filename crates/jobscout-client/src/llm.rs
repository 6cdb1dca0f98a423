use std::time::Duration;

use jobscout_core::error::AppError;
use jobscout_core::prompts::ATS_EXPERT_PERSONA;
use jobscout_core::traits::Scorer;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::http::{error_message, send_error};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_LLM_TIMEOUT: Duration = Duration::from_secs(120);

/// OpenAI-compatible chat client used as the scoring backend.
///
/// Works with any OpenAI-compatible API, including:
/// - Gemini via compatibility layer (the default)
/// - OpenAI directly (`https://api.openai.com/v1`)
#[derive(Clone)]
pub struct OpenAiScorer {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    timeout_secs: u64,
    system_prompt: String,
}

impl OpenAiScorer {
    pub fn new(api_key: &str, model: &str) -> Result<Self, AppError> {
        Self::with_base_url(api_key, model, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: &str, model: &str, base_url: &str) -> Result<Self, AppError> {
        Self::build(api_key, model, base_url, DEFAULT_LLM_TIMEOUT)
    }

    pub fn with_timeout(self, timeout: Duration) -> Result<Self, AppError> {
        let rebuilt = Self::build(&self.api_key, &self.model, &self.base_url, timeout)?;
        Ok(Self {
            system_prompt: self.system_prompt,
            ..rebuilt
        })
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build(
        api_key: &str,
        model: &str,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::HttpError(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            timeout_secs: timeout.as_secs(),
            system_prompt: ATS_EXPERT_PERSONA.to_string(),
        })
    }

    fn chat_request(&self, prompt: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: self.system_prompt.clone(),
                },
                Message {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
        }
    }
}

// ---- OpenAI API types ----

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

fn first_content(response: ChatResponse) -> Result<String, AppError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| AppError::LlmError {
            message: "Empty response from LLM".into(),
            status_code: 200,
        })
}

impl Scorer for OpenAiScorer {
    async fn generate(&self, prompt: &str) -> Result<String, AppError> {
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.chat_request(prompt))
            .send()
            .await
            .map_err(|e| send_error(e, self.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            let status_code = status.as_u16();
            let body = response.text().await.unwrap_or_default();

            if status_code == 429 {
                return Err(AppError::RateLimitExceeded);
            }
            return Err(AppError::LlmError {
                message: error_message(status_code, &body),
                status_code,
            });
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::HttpError(format!("Failed to parse LLM response: {e}")))?;

        first_content(chat_response)
    }
}
