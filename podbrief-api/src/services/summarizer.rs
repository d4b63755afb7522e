//! Condenses fetched text into prompt-sized summaries

use std::sync::Arc;
use tracing::warn;

use super::completion_client::{CompletionClient, CompletionRequest, ModelTier};
use super::response_parsing::truncate_chars;

/// Input beyond this many characters is dropped before summarizing
pub const SUMMARY_INPUT_CHARS: usize = 3000;

const SYSTEM_PROMPT: &str =
    "You are a professional content summarizer. Provide concise, accurate summaries.";

/// What the summary will be used for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryIntent {
    /// 2-3 sentence professional bio
    Bio,
    /// 3-5 bullet-point themes from a past interview
    InterviewInsight,
}

impl SummaryIntent {
    fn instruction(&self) -> &'static str {
        match self {
            SummaryIntent::Bio => "Summarize the following professional content into a 2-3 sentence professional bio. Focus on key achievements, expertise, and background:",
            SummaryIntent::InterviewInsight => "Summarize the following interview content into 3-5 key themes or insights. Format as bullet points:",
        }
    }
}

/// Build the summarization prompt for `text`
pub fn summary_prompt(text: &str, intent: SummaryIntent) -> String {
    format!(
        "{}\n\n{}",
        intent.instruction(),
        truncate_chars(text, SUMMARY_INPUT_CHARS)
    )
}

pub struct Summarizer {
    client: Arc<dyn CompletionClient>,
}

impl Summarizer {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    /// Summarize `text`; `None` when the model call fails
    pub async fn summarize(&self, text: &str, intent: SummaryIntent) -> Option<String> {
        let request = CompletionRequest::new(
            ModelTier::Standard,
            SYSTEM_PROMPT,
            summary_prompt(text, intent),
        )
        .max_tokens(500)
        .temperature(0.3);

        match self.client.complete(&request).await {
            Ok(summary) => Some(summary.trim().to_string()).filter(|s| !s.is_empty()),
            Err(e) => {
                warn!(intent = ?intent, error = %e, "Summarization failed");
                None
            }
        }
    }
}
