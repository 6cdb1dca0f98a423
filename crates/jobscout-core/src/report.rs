use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use crate::error::AppError;
use crate::models::OutputRecord;
use crate::traits::ReportSink;

/// Line written after every record.
pub const RECORD_SEPARATOR: &str = "----------x--------NEXT JOB----------x--------";

/// Appends one prose record per processed job to a text file.
///
/// The file is opened in append mode for each record and closed again when
/// the write returns, so no handle is held between jobs. Existing content is
/// never truncated.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    path: PathBuf,
}

impl ReportWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Render a record exactly as it appears in the report file.
pub fn format_record(record: &OutputRecord) -> String {
    format!(
        "{}. Job link :- [ {} ] and my analysis :- {}\n\n\n{RECORD_SEPARATOR}\n\n\n",
        record.sequence_number, record.job_link, record.analysis
    )
}

impl ReportSink for ReportWriter {
    fn append(&self, record: &OutputRecord) -> Result<(), AppError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(format_record(record).as_bytes())?;
        file.flush()?;

        tracing::info!(
            sequence = record.sequence_number,
            path = %self.path.display(),
            "Appended analysis to report"
        );
        Ok(())
    }
}
