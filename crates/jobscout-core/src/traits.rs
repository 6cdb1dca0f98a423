use std::future::Future;

use crate::error::AppError;
use crate::models::{ExtractRequest, ExtractionResult, OutputRecord};

/// Runs structured extraction over one or more URLs.
pub trait StructuredExtractor: Send + Sync + Clone {
    /// Sends the URLs, instruction and optional schema to the backend and
    /// returns its envelope. Backend-reported failure is `Ok` with
    /// `success == false`; `Err` means the call itself failed.
    fn extract(
        &self,
        request: &ExtractRequest,
    ) -> impl Future<Output = Result<ExtractionResult, AppError>> + Send;
}

/// Generates free-form text from a prompt using a language model.
pub trait Scorer: Send + Sync + Clone {
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, AppError>> + Send;
}

/// Enforces the delay between successive backend calls.
pub trait Pacer: Send + Sync {
    fn wait(&self) -> impl Future<Output = ()> + Send;
}

/// Append-only destination for processed job records.
pub trait ReportSink: Send + Sync {
    fn append(&self, record: &OutputRecord) -> Result<(), AppError>;
}
