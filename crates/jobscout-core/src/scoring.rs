use crate::traits::Scorer;

/// Issues scoring prompts, turning backend failures into report text.
///
/// There is no retry: one failed call degrades one report entry.
#[derive(Clone)]
pub struct ScoringClient<S: Scorer> {
    scorer: S,
}

impl<S: Scorer> ScoringClient<S> {
    pub fn new(scorer: S) -> Self {
        Self { scorer }
    }

    pub async fn score(&self, prompt: &str) -> String {
        tracing::debug!(prompt_len = prompt.len(), "Sending scoring prompt");
        match self.scorer.generate(prompt).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(error = %e, "Scoring call failed");
                format!("An error occurred while scoring: {e}")
            }
        }
    }
}
