use crate::error::AppError;
use crate::extraction::ExtractionClient;
use crate::models::{OutputRecord, ResumeProfile};
use crate::prompts;
use crate::scoring::ScoringClient;
use crate::traits::{Pacer, ReportSink, Scorer, StructuredExtractor};

/// Scores the resume against one job posting and records the result.
///
/// Generic over every external dependency so tests run without network
/// access or wall-clock waits.
pub struct JobAnalyzer<E, S, P, R>
where
    E: StructuredExtractor,
    S: Scorer,
    P: Pacer,
    R: ReportSink,
{
    pub(crate) extraction: ExtractionClient<E>,
    pub(crate) scoring: ScoringClient<S>,
    pub(crate) pacer: P,
    report: R,
    resume: ResumeProfile,
}

impl<E, S, P, R> JobAnalyzer<E, S, P, R>
where
    E: StructuredExtractor,
    S: Scorer,
    P: Pacer,
    R: ReportSink,
{
    pub fn new(extractor: E, scorer: S, pacer: P, report: R, resume: ResumeProfile) -> Self {
        Self {
            extraction: ExtractionClient::new(extractor),
            scoring: ScoringClient::new(scorer),
            pacer,
            report,
            resume,
        }
    }

    /// Analyze one job link.
    ///
    /// 1. Extract the posting's description (a placeholder on failure)
    /// 2. Wait, then score the resume against it
    /// 3. Append the analysis to the report
    /// 4. Wait before handing control back
    ///
    /// Only a failed report write is returned as an error.
    pub async fn analyze(
        &self,
        sequence_number: usize,
        job_link: &str,
    ) -> Result<OutputRecord, AppError> {
        // 1. Describe
        let description = self
            .extraction
            .extract_description(job_link, prompts::DESCRIPTION_INSTRUCTION)
            .await;
        tracing::debug!(
            sequence = sequence_number,
            available = description.is_available(),
            "Job description: {}",
            description.render()
        );

        // 2. Score
        let prompt = prompts::ats_prompt(&description, &self.resume);
        self.pacer.wait().await;
        let analysis = self.scoring.score(&prompt).await;

        // 3. Record
        let record = OutputRecord {
            sequence_number,
            job_link: job_link.to_string(),
            analysis,
        };
        self.report.append(&record)?;

        // 4. Pace
        self.pacer.wait().await;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExtractionResult;
    use crate::testutil::*;

    const LINK: &str = "https://www.naukri.com/job-listings-java-developer-040425019070";

    fn analyzer(
        log: &CallLog,
        extractor: MockExtractor,
        scorer: MockScorer,
        report: MockReport,
    ) -> JobAnalyzer<MockExtractor, MockScorer, RecordingPacer, MockReport> {
        JobAnalyzer::new(
            extractor,
            scorer,
            RecordingPacer::new(log.clone()),
            report,
            test_resume(),
        )
    }

    #[tokio::test]
    async fn happy_path_writes_record() {
        let log = CallLog::new();
        let extractor = MockExtractor::with_responses(
            log.clone(),
            vec![Ok(ExtractionResult::completed(
                serde_json::json!({"skills": ["Spring Boot"]}),
            ))],
        );
        let scorer =
            MockScorer::with_responses(log.clone(), vec![Ok("ATS score: 81/100".to_string())]);
        let report = MockReport::new(log.clone());
        let svc = analyzer(&log, extractor, scorer.clone(), report.clone());

        let record = svc.analyze(4, LINK).await.unwrap();

        assert_eq!(record.sequence_number, 4);
        assert_eq!(record.job_link, LINK);
        assert_eq!(record.analysis, "ATS score: 81/100");
        assert_eq!(*report.records.lock().unwrap(), vec![record]);

        let prompts = scorer.prompts.lock().unwrap();
        assert!(prompts[0].contains("Spring Boot"));
        assert!(prompts[0].contains("NIT Rourkela"));
    }

    #[tokio::test]
    async fn waits_between_calls_and_before_returning() {
        let log = CallLog::new();
        let svc = analyzer(
            &log,
            MockExtractor::with_responses(log.clone(), vec![]),
            MockScorer::echo_length(log.clone()),
            MockReport::new(log.clone()),
        );

        svc.analyze(0, LINK).await.unwrap();

        assert_eq!(
            log.calls(),
            vec![
                Call::Extract {
                    urls: vec![LINK.to_string()]
                },
                Call::Wait,
                Call::Score,
                Call::Append { sequence: 0 },
                Call::Wait,
            ]
        );
    }

    #[tokio::test]
    async fn description_failure_still_writes_record() {
        let log = CallLog::new();
        let scorer = MockScorer::echo_length(log.clone());
        let report = MockReport::new(log.clone());
        let svc = analyzer(
            &log,
            MockExtractor::with_responses(
                log.clone(),
                vec![Err(AppError::HttpError("HTTP 502 for extract".into()))],
            ),
            scorer.clone(),
            report.clone(),
        );

        let record = svc.analyze(0, LINK).await.unwrap();

        assert_eq!(record.job_link, LINK);
        assert_eq!(report.records.lock().unwrap().len(), 1);
        let prompts = scorer.prompts.lock().unwrap();
        assert!(prompts[0].contains("[job description unavailable: HTTP error: HTTP 502 for extract]"));
    }

    #[tokio::test]
    async fn scoring_failure_is_written_as_analysis() {
        let log = CallLog::new();
        let report = MockReport::new(log.clone());
        let svc = analyzer(
            &log,
            MockExtractor::with_responses(log.clone(), vec![]),
            MockScorer::with_responses(log.clone(), vec![Err(AppError::RateLimitExceeded)]),
            report.clone(),
        );

        let record = svc.analyze(2, LINK).await.unwrap();

        assert_eq!(
            record.analysis,
            "An error occurred while scoring: Rate limit exceeded"
        );
        assert_eq!(report.records.lock().unwrap()[0].analysis, record.analysis);
    }

    #[tokio::test]
    async fn report_error_propagates() {
        let log = CallLog::new();
        let svc = analyzer(
            &log,
            MockExtractor::with_responses(log.clone(), vec![]),
            MockScorer::echo_length(log.clone()),
            MockReport::with_error(log.clone(), std::io::Error::other("disk full").into()),
        );

        let err = svc.analyze(0, LINK).await.unwrap_err();

        assert!(matches!(err, AppError::IoError(_)));
    }
}
