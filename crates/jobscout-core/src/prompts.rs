//! Instructions and prompts sent to the extraction and scoring backends.
//!
//! The per-job ATS prompt and the discovery-summary prompt are separate
//! policies and are built independently.

use crate::extraction::Description;
use crate::link_filter::LinkFilter;
use crate::models::{JobPosting, ResumeProfile, SearchCriteria};

/// Minimum number of postings the listing instruction asks the backend for.
pub const MIN_LISTINGS: usize = 20;

/// Example of a job-detail link quoted to the backends.
pub const EXAMPLE_DETAIL_LINK: &str = "https://www.naukri.com/job-listings-java-developer-ab-pan-india-infosys-pune-chennai-bengaluru-3-to-8-years-040425019070";

/// System persona for the scoring backend.
pub const ATS_EXPERT_PERSONA: &str = "I want you to act as an ATS expert. First, analyze the following job description and my resume text. \
Then, provide an ATS compatibility score and feedback on how well my resume aligns with the job description. \
Also, offer suggestions on how to improve my resume to increase my chances of passing through an ATS. \
Use markdown to format your answers.";

/// Instruction for extracting a posting's full description.
pub const DESCRIPTION_INSTRUCTION: &str = "Extract all technical and functional skills required for the job from the job description provided, \
including programming languages, frameworks, tools, methodologies, and any other relevant skills of this job posting.";

/// Instruction for the multi-URL listing extraction.
pub fn listing_instruction(criteria: &SearchCriteria, filter: &LinkFilter) -> String {
    format!(
        "Extract job postings by region, roles, job titles, and experience from these job sites.\n\
         \n\
         Look for jobs that match these criteria:\n\
         - Job Title: Should be related to {title}\n\
         - Location: {location} (include remote jobs if available)\n\
         - Experience: Around {years} years\n\
         - Skills: Should match at least some of these skills: {skills}\n\
         - Job Type: Full-time, Part-time, Contract, Temporary, Internship\n\
         \n\
         Goal: extract only the urls having a {digits} digits number at the end (e.g., \"{EXAMPLE_DETAIL_LINK}\")\n\
         IMPORTANT: Return data for at least {MIN_LISTINGS} different job opportunities.",
        title = criteria.job_title,
        location = criteria.location,
        years = criteria.experience_years,
        skills = criteria.skills_string(),
        digits = filter.digits(),
    )
}

/// Per-job prompt asking for an ATS score, feedback and in-place resume edits.
pub fn ats_prompt(description: &Description, resume: &ResumeProfile) -> String {
    format!(
        "I want you to act as an ATS expert.\n\
         First, analyze the following job description :- {description}\n\
         and here is my education :{education}, technical skills :{skills} and my experience :{experience}.\n\
         Then, provide an ATS compatibility score out of 100 and feedback on how well my resume currently aligns with the job description.\n\
         Also, offer suggestions on how to improve my resume to increase my chances of passing through an ATS, give me updated ones in latex format.\n\
         Don't ask me to change the latex formatting; give the suggestions inside the latex I have already given, I like my latex formatting.\n\
         I just need suggestions as text inside it\n\
         (e.g. update this part in experience and update this part in technical skills to get above 90% match).",
        description = description.render(),
        education = resume.education,
        skills = resume.technical_skills,
        experience = resume.experience,
    )
}

/// Discovery-summary prompt asking for the collected detail links in order.
pub fn ranking_prompt(jobs: &[JobPosting], detail_links: &[&str], filter: &LinkFilter) -> String {
    let jobs_json = serde_json::to_string_pretty(jobs).unwrap_or_else(|_| "[]".to_string());
    let links = if detail_links.is_empty() {
        "(none of the links matched)".to_string()
    } else {
        detail_links
            .iter()
            .map(|link| format!("- {link}"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "As a json response expert, analyze json job opportunities:\n\
         \n\
         Jobs Found in json format:\n\
         {jobs_json}\n\
         \n\
         Links that end with a {digits} digits number:\n\
         {links}\n\
         \n\
         and give me the links in order by serialize to extract only the urls having a {digits} digits number at the end (e.g., \"{EXAMPLE_DETAIL_LINK}\")",
        digits = filter.digits(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criteria() -> SearchCriteria {
        SearchCriteria::new(
            "Java Developer",
            "New Delhi",
            3,
            vec!["java".into(), "spring".into()],
        )
    }

    fn resume() -> ResumeProfile {
        ResumeProfile {
            education: "\\section{Education} NIT Rourkela".into(),
            technical_skills: "\\section{Technical Skills} Java, Kafka".into(),
            experience: "\\section{Experience} Barclays".into(),
        }
    }

    #[test]
    fn test_listing_instruction_embeds_raw_criteria() {
        let text = listing_instruction(&criteria(), &LinkFilter::default());
        assert!(text.contains("Should be related to Java Developer"));
        assert!(text.contains("Location: New Delhi"));
        assert!(text.contains("Around 3 years"));
        assert!(text.contains("java, spring"));
    }

    #[test]
    fn test_listing_instruction_requests_breadth_and_pattern() {
        let text = listing_instruction(&criteria(), &LinkFilter::default());
        assert!(text.contains("at least 20 different job opportunities"));
        assert!(text.contains("12 digits number"));
        assert!(text.contains(EXAMPLE_DETAIL_LINK));
    }

    #[test]
    fn test_ats_prompt_includes_description_and_resume() {
        let description = Description::Extracted(serde_json::json!({"skills": ["Kotlin"]}));
        let text = ats_prompt(&description, &resume());

        assert!(text.contains("Kotlin"));
        assert!(text.contains("NIT Rourkela"));
        assert!(text.contains("Java, Kafka"));
        assert!(text.contains("Barclays"));
        assert!(text.contains("score out of 100"));
        assert!(text.contains("latex"));
    }

    #[test]
    fn test_ats_prompt_with_placeholder() {
        let description = Description::Unavailable {
            reason: "HTTP error: boom".into(),
        };
        let text = ats_prompt(&description, &resume());
        assert!(text.contains("[job description unavailable: HTTP error: boom]"));
    }

    #[test]
    fn test_ranking_prompt_lists_detail_links() {
        let jobs = vec![JobPosting {
            job_title: Some("Java Dev".into()),
            job_link: Some("https://www.naukri.com/a-040425019070".into()),
            ..Default::default()
        }];
        let text = ranking_prompt(
            &jobs,
            &["https://www.naukri.com/a-040425019070"],
            &LinkFilter::default(),
        );

        assert!(text.contains("\"job_title\": \"Java Dev\""));
        assert!(text.contains("- https://www.naukri.com/a-040425019070"));
    }

    #[test]
    fn test_ranking_prompt_without_detail_links() {
        let text = ranking_prompt(&[], &[], &LinkFilter::default());
        assert!(text.contains("(none of the links matched)"));
    }
}
