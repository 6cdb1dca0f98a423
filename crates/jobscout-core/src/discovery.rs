use std::collections::HashSet;
use std::fmt;

use crate::analysis::JobAnalyzer;
use crate::error::AppError;
use crate::extraction::{Listings, job_postings_schema};
use crate::link_filter::LinkFilter;
use crate::models::{JobPosting, SearchCriteria};
use crate::prompts;
use crate::traits::{Pacer, ReportSink, Scorer, StructuredExtractor};

/// Message returned when listing extraction yields nothing to analyze.
pub const NO_LISTINGS_MESSAGE: &str = "No job listings found matching your criteria. Try adjusting your search parameters or try different job sites.";

/// Job boards queried for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobBoard {
    Naukri,
    Indeed,
}

impl JobBoard {
    pub const ALL: [JobBoard; 2] = [JobBoard::Naukri, JobBoard::Indeed];

    /// Listing page URLs for this board: the first page plus alternates.
    pub fn listing_urls(&self, title: &str, location: &str, experience_years: u32) -> Vec<String> {
        match self {
            JobBoard::Naukri => ["", "-2", "-3"]
                .iter()
                .map(|page| {
                    format!(
                        "https://www.naukri.com/{title}-jobs-in-{location}{page}?experience={experience_years}"
                    )
                })
                .collect(),
            JobBoard::Indeed => {
                let base = format!("https://www.indeed.com/jobs?q={title}&l={location}");
                vec![base.clone(), format!("{base}&start=10")]
            }
        }
    }
}

/// Lowercase a search term and join its words with hyphens.
pub fn normalize_token(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// All listing URLs queried for `criteria`, in board order.
pub fn candidate_urls(criteria: &SearchCriteria) -> Vec<String> {
    let title = normalize_token(&criteria.job_title);
    let location = normalize_token(&criteria.location);

    JobBoard::ALL
        .iter()
        .flat_map(|board| board.listing_urls(&title, &location, criteria.experience_years))
        .collect()
}

/// Run-level switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct HuntOptions {
    /// Skip postings whose link does not look like a job-detail page.
    pub detail_links_only: bool,
}

/// What a discovery run would send, without sending it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuntPlan {
    pub urls: Vec<String>,
    pub instruction: String,
}

/// The listing URLs and instruction a run for `criteria` uses.
///
/// [`HuntService::hunt`] sends exactly this plan, so printing it is an
/// accurate dry run.
pub fn plan(criteria: &SearchCriteria) -> HuntPlan {
    HuntPlan {
        urls: candidate_urls(criteria),
        instruction: prompts::listing_instruction(criteria, &LinkFilter::default()),
    }
}

/// Result of a discovery run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuntOutcome {
    /// Every posting was analyzed; `summary` is the ranking response.
    Completed { processed: usize, summary: String },
    /// Listing extraction produced no postings.
    NoListings,
    /// The run stopped at the discovery boundary.
    Failed(String),
}

impl HuntOutcome {
    fn failed(err: &AppError) -> Self {
        HuntOutcome::Failed(format!(
            "An error occurred while searching for jobs: {err}\n\n\
             Please try again with different search parameters or check if the job sites are supported by the extraction backend."
        ))
    }

    /// The user-facing text for this outcome.
    pub fn message(&self) -> &str {
        match self {
            HuntOutcome::Completed { summary, .. } => summary,
            HuntOutcome::NoListings => NO_LISTINGS_MESSAGE,
            HuntOutcome::Failed(message) => message,
        }
    }
}

impl fmt::Display for HuntOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Orchestrates a discovery run: listings → per-job analysis → ranking.
pub struct HuntService<E, S, P, R>
where
    E: StructuredExtractor,
    S: Scorer,
    P: Pacer,
    R: ReportSink,
{
    analyzer: JobAnalyzer<E, S, P, R>,
    filter: LinkFilter,
    options: HuntOptions,
}

impl<E, S, P, R> HuntService<E, S, P, R>
where
    E: StructuredExtractor,
    S: Scorer,
    P: Pacer,
    R: ReportSink,
{
    pub fn new(analyzer: JobAnalyzer<E, S, P, R>) -> Self {
        Self {
            analyzer,
            filter: LinkFilter::default(),
            options: HuntOptions::default(),
        }
    }

    pub fn with_options(mut self, options: HuntOptions) -> Self {
        self.options = options;
        self
    }

    /// Run discovery for `criteria`. Never returns an error: failures are
    /// folded into [`HuntOutcome::Failed`].
    pub async fn hunt(&self, criteria: &SearchCriteria) -> HuntOutcome {
        match self.run(criteria).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(error = %e, "Job search failed");
                HuntOutcome::failed(&e)
            }
        }
    }

    async fn run(&self, criteria: &SearchCriteria) -> Result<HuntOutcome, AppError> {
        // 1. Listings
        let plan = plan(criteria);
        tracing::info!(urls = ?plan.urls, "Searching for jobs");
        let listings = self
            .analyzer
            .extraction
            .extract_listings(&plan.urls, &plan.instruction, &job_postings_schema())
            .await?;

        // 2. Validate
        let selected = self.select_postings(listings);
        if selected.is_empty() {
            tracing::info!("No postings to analyze");
            return Ok(HuntOutcome::NoListings);
        }
        tracing::info!(count = selected.len(), "Analyzing postings");

        // 3. Analyze, strictly in backend order
        for (sequence, (link, _)) in selected.iter().enumerate() {
            self.analyzer.pacer.wait().await;
            self.analyzer.analyze(sequence, link).await?;
        }

        // 4. Rank
        let (links, postings): (Vec<String>, Vec<JobPosting>) = selected.into_iter().unzip();
        let detail_links = self.filter.retain(links.iter().map(String::as_str));
        let prompt = prompts::ranking_prompt(&postings, &detail_links, &self.filter);
        let summary = self.analyzer.scoring.score(&prompt).await;

        Ok(HuntOutcome::Completed {
            processed: postings.len(),
            summary,
        })
    }

    /// Keep postings with a link, first occurrence of each link only, paired
    /// with that link.
    fn select_postings(&self, listings: Listings) -> Vec<(String, JobPosting)> {
        let mut seen = HashSet::new();
        let mut selected = Vec::new();

        for posting in listings.into_postings() {
            let Some(link) = posting.link().map(str::to_string) else {
                tracing::warn!(?posting, "Skipping posting without a job link");
                continue;
            };
            if !self.filter.is_job_detail(&link) {
                if self.options.detail_links_only {
                    tracing::info!(%link, "Skipping link that is not a job-detail page");
                    continue;
                }
                tracing::debug!(%link, "Link does not look like a job-detail page");
            }
            if !seen.insert(link.clone()) {
                tracing::warn!(%link, "Skipping duplicate job link");
                continue;
            }
            selected.push((link, posting));
        }
        selected
    }
}
