//! Heuristic recognition of job-detail pages.
//!
//! Job boards such as Naukri end the path of a real posting with a numeric
//! identifier (`...-3-to-8-years-040425019070`), while search and listing
//! pages end in words (`.../java-developer-jobs-in-bangalore`). The check is
//! a heuristic: some real postings are rejected and some listing pages pass,
//! so callers treat the answer as a hint.

use url::Url;

/// Length of the numeric posting identifier observed on supported boards.
pub const DEFAULT_ID_DIGITS: usize = 12;

/// Recognizes URLs whose last path segment ends in a fixed-length numeric id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkFilter {
    digits: usize,
}

impl Default for LinkFilter {
    fn default() -> Self {
        Self {
            digits: DEFAULT_ID_DIGITS,
        }
    }
}

impl LinkFilter {
    pub fn new(digits: usize) -> Self {
        Self { digits }
    }

    pub fn digits(&self) -> usize {
        self.digits
    }

    /// Returns true if `link` looks like a job-detail page.
    pub fn is_job_detail(&self, link: &str) -> bool {
        if self.digits == 0 {
            return false;
        }
        let path = link_path(link.trim());
        let segment = path
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default();

        let trailing_digits = segment
            .chars()
            .rev()
            .take_while(|c| c.is_ascii_digit())
            .count();
        if trailing_digits != self.digits {
            return false;
        }

        // The id must be its own token, not the tail of a longer word.
        let prefix = &segment[..segment.len() - trailing_digits];
        match prefix.chars().last() {
            None => true,
            Some(c) => !c.is_alphanumeric(),
        }
    }

    /// The subset of `links` that look like job-detail pages, in order.
    pub fn retain<'a, I>(&self, links: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        links
            .into_iter()
            .filter(|link| self.is_job_detail(link))
            .collect()
    }
}

/// Returns true if `link` looks like a job-detail page, using the default
/// 12-digit identifier.
pub fn is_job_detail_link(link: &str) -> bool {
    LinkFilter::default().is_job_detail(link)
}

/// The path component of `link`, without query or fragment.
///
/// Anything that is not an absolute URL is treated as a raw path.
fn link_path(link: &str) -> String {
    match Url::parse(link) {
        Ok(url) => url.path().to_string(),
        Err(_) => link
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    }
}
