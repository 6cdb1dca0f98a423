use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::Instrument;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use jobscout_client::{FirecrawlExtractor, OpenAiScorer, llm};
use jobscout_core::discovery::{self, HuntOptions, HuntService};
use jobscout_core::{
    ApiKeys, FixedDelay, JobAnalyzer, LinkFilter, ReportWriter, ResumeProfile, SearchCriteria,
};

#[derive(Parser)]
#[command(name = "jobscout", version, about = "Job discovery and ATS resume scoring")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find postings, score the resume against each, and append the analyses to a report
    Hunt {
        /// Job title to search for (e.g., "java developer")
        #[arg(short, long)]
        job_title: String,

        /// Location to search in (e.g., "bangalore")
        #[arg(short, long)]
        location: String,

        /// Years of experience
        #[arg(short, long)]
        experience_years: u32,

        /// Comma-separated skills (e.g., "java,spring boot")
        #[arg(short, long, value_delimiter = ',')]
        skills: Vec<String>,

        /// Path to the resume profile JSON (education, technical_skills, experience)
        #[arg(short, long, env = "JOBSCOUT_RESUME")]
        resume: Option<PathBuf>,

        /// Report file the analyses are appended to
        #[arg(short, long, env = "JOBSCOUT_OUTPUT", default_value = "output.txt")]
        output: PathBuf,

        /// Seconds to wait between backend calls
        #[arg(long, env = "JOBSCOUT_DELAY_SECS", default_value_t = 10)]
        delay_secs: u64,

        /// Only analyze links that look like job-detail pages
        #[arg(long, default_value_t = false)]
        detail_links_only: bool,

        /// Print the listing URLs and instruction without calling any backend
        #[arg(long, default_value_t = false)]
        dry_run: bool,

        /// Firecrawl API key
        #[arg(long, env = "FIRECRAWL_API_KEY", hide_env_values = true)]
        firecrawl_api_key: Option<String>,

        /// Firecrawl API base URL
        #[arg(
            long,
            env = "FIRECRAWL_BASE_URL",
            default_value = "https://api.firecrawl.dev"
        )]
        firecrawl_base_url: String,

        /// Scoring backend API key
        #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
        scoring_api_key: Option<String>,

        /// OpenAI-compatible scoring API base URL
        #[arg(long, env = "JOBSCOUT_SCORING_BASE_URL", default_value = llm::DEFAULT_BASE_URL)]
        scoring_base_url: String,

        /// Scoring model (e.g., "gemini-2.0-flash", "gpt-4o-mini")
        #[arg(short, long, env = "JOBSCOUT_MODEL", default_value = llm::DEFAULT_MODEL)]
        model: String,
    },

    /// Report whether each URL looks like a job-detail page
    CheckLink {
        /// URLs to check
        #[arg(required = true)]
        urls: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Setup tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("jobscout=info".parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("An error occurred: {e:#}");
    }

    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Hunt {
            job_title,
            location,
            experience_years,
            skills,
            resume,
            output,
            delay_secs,
            detail_links_only,
            dry_run,
            firecrawl_api_key,
            firecrawl_base_url,
            scoring_api_key,
            scoring_base_url,
            model,
        } => {
            let criteria = SearchCriteria::new(
                job_title,
                location,
                experience_years,
                skills
                    .into_iter()
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
            );

            if dry_run {
                cmd_plan(&criteria);
                return Ok(());
            }

            let keys = ApiKeys::new(firecrawl_api_key, scoring_api_key)?;
            let resume_path = resume.context(
                "Resume profile not set. Pass --resume or set JOBSCOUT_RESUME.",
            )?;
            let resume = ResumeProfile::from_file(&resume_path)?;

            let extractor = FirecrawlExtractor::with_base_url(&keys.extraction, &firecrawl_base_url)
                .context("Failed to create extraction client")?;
            let scorer = OpenAiScorer::with_base_url(&keys.scoring, &model, &scoring_base_url)
                .context("Failed to create scoring client")?;

            let analyzer = JobAnalyzer::new(
                extractor,
                scorer,
                FixedDelay::new(Duration::from_secs(delay_secs)),
                ReportWriter::new(&output),
                resume,
            );
            let service = HuntService::new(analyzer).with_options(HuntOptions { detail_links_only });

            cmd_hunt(&service, &criteria, &output).await;
        }
        Commands::CheckLink { urls } => {
            cmd_check_link(&urls);
        }
    }

    Ok(())
}

async fn cmd_hunt(
    service: &HuntService<FirecrawlExtractor, OpenAiScorer, FixedDelay, ReportWriter>,
    criteria: &SearchCriteria,
    output: &std::path::Path,
) {
    let span = tracing::info_span!("hunt", run_id = %Uuid::new_v4());
    let outcome = service.hunt(criteria).instrument(span).await;

    if let discovery::HuntOutcome::Completed { processed, .. } = &outcome {
        tracing::info!(
            processed,
            report = %output.display(),
            "Finished analyzing postings"
        );
    }
    println!("{outcome}");
}

fn cmd_plan(criteria: &SearchCriteria) {
    let plan = discovery::plan(criteria);
    println!("Listing URLs:");
    for url in &plan.urls {
        println!("  {url}");
    }
    println!("\nInstruction:\n{}", plan.instruction);
}

fn cmd_check_link(urls: &[String]) {
    let filter = LinkFilter::default();
    for url in urls {
        let kind = if filter.is_job_detail(url) {
            "job-detail"
        } else {
            "listing"
        };
        println!("{kind}\t{url}");
    }
}
