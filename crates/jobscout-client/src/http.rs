use jobscout_core::error::AppError;

/// Map a reqwest send failure onto the shared error type.
pub(crate) fn send_error(e: reqwest::Error, timeout_secs: u64) -> AppError {
    if e.is_timeout() {
        AppError::Timeout(timeout_secs)
    } else if e.is_connect() {
        AppError::NetworkError(format!("Connection failed: {e}"))
    } else {
        AppError::HttpError(e.to_string())
    }
}

/// Pull a human-readable message out of an error body.
///
/// Understands `{"error": "..."}` (Firecrawl) and
/// `{"error": {"message": "..."}}` (OpenAI-compatible APIs).
pub(crate) fn error_message(status_code: u16, body: &str) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
    let message = parsed.as_ref().and_then(|v| {
        let error = v.get("error")?;
        error
            .as_str()
            .or_else(|| error.get("message").and_then(|m| m.as_str()))
            .map(str::to_string)
    });
    message.unwrap_or_else(|| format!("HTTP {status_code}: {body}"))
}
