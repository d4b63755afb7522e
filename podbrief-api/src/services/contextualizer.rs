//! Guest contextualization: bio summary plus prior-interview insights
//!
//! Every URL is processed independently. A URL that cannot be fetched or
//! summarized adds a message to `errors` and the rest carry on.

use futures::future::join_all;
use std::sync::Arc;
use tracing::info;

use super::content_fetcher::ContentFetcher;
use super::error::PipelineError;
use super::summarizer::{Summarizer, SummaryIntent};
use crate::models::ContextualSummary;

/// Contextual summary plus the per-URL problems met while building it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextualizeOutcome {
    pub summary: ContextualSummary,
    pub errors: Vec<String>,
}

pub struct GuestContextualizer {
    fetcher: Arc<dyn ContentFetcher>,
    summarizer: Summarizer,
}

impl GuestContextualizer {
    pub fn new(fetcher: Arc<dyn ContentFetcher>, summarizer: Summarizer) -> Self {
        Self {
            fetcher,
            summarizer,
        }
    }

    /// Summarize the bio page and each interview URL
    ///
    /// Blank URLs are ignored; with nothing left to process the request is
    /// rejected. Insights keep the order of `interview_urls`.
    pub async fn contextualize(
        &self,
        bio_url: Option<&str>,
        interview_urls: &[String],
    ) -> Result<ContextualizeOutcome, PipelineError> {
        let bio_url = bio_url.map(str::trim).filter(|u| !u.is_empty());
        let interview_urls: Vec<&str> = interview_urls
            .iter()
            .map(|u| u.trim())
            .filter(|u| !u.is_empty())
            .collect();

        if bio_url.is_none() && interview_urls.is_empty() {
            return Err(PipelineError::validation(
                "Provide a bio URL or at least one interview URL",
            ));
        }

        info!(
            bio_url = bio_url.unwrap_or("-"),
            interview_urls = interview_urls.len(),
            "Contextualizing guest"
        );

        let bio_task = async {
            match bio_url {
                Some(url) => Some(self.summarize_bio(url).await),
                None => None,
            }
        };
        let interview_tasks = join_all(interview_urls.iter().map(|url| self.summarize_interview(url)));

        let (bio_result, interview_results) = futures::join!(bio_task, interview_tasks);

        let mut outcome = ContextualizeOutcome::default();

        match bio_result {
            Some(Ok(summary)) => outcome.summary.bio_summary = Some(summary),
            Some(Err(message)) => outcome.errors.push(message),
            None => {}
        }

        for result in interview_results {
            match result {
                Ok(insight) => outcome.summary.interview_insights.push(insight),
                Err(message) => outcome.errors.push(message),
            }
        }

        info!(
            has_bio_summary = outcome.summary.bio_summary.is_some(),
            insights = outcome.summary.interview_insights.len(),
            errors = outcome.errors.len(),
            "Contextualization completed"
        );

        Ok(outcome)
    }

    async fn summarize_bio(&self, url: &str) -> Result<String, String> {
        let content = self
            .fetcher
            .fetch(url)
            .await
            .ok_or_else(|| format!("Failed to scrape content from bio URL: {}", url))?;

        self.summarizer
            .summarize(&content, SummaryIntent::Bio)
            .await
            .ok_or_else(|| format!("Failed to summarize bio content from {}", url))
    }

    async fn summarize_interview(&self, url: &str) -> Result<String, String> {
        let content = self
            .fetcher
            .fetch(url)
            .await
            .ok_or_else(|| format!("Failed to extract content from {}", url))?;

        self.summarizer
            .summarize(&content, SummaryIntent::InterviewInsight)
            .await
            .ok_or_else(|| format!("Failed to summarize content from {}", url))
    }
}
