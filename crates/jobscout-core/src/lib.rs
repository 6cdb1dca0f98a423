pub mod analysis;
pub mod config;
pub mod discovery;
pub mod error;
pub mod extraction;
pub mod link_filter;
pub mod models;
pub mod pacing;
pub mod prompts;
pub mod report;
pub mod scoring;
pub mod traits;

#[cfg(test)]
pub(crate) mod testutil;

pub use analysis::JobAnalyzer;
pub use config::ApiKeys;
pub use discovery::{HuntOptions, HuntOutcome, HuntService};
pub use error::AppError;
pub use link_filter::{LinkFilter, is_job_detail_link};
pub use models::{ExtractionResult, JobPosting, OutputRecord, ResumeProfile, SearchCriteria};
pub use pacing::FixedDelay;
pub use report::ReportWriter;
pub use traits::{Pacer, ReportSink, Scorer, StructuredExtractor};
