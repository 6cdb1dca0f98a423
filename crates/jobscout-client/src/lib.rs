pub mod firecrawl;
mod http;
pub mod llm;

pub use firecrawl::FirecrawlExtractor;
pub use llm::OpenAiScorer;
