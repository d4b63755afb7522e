//! Guest enrichment: public pages in, structured guest metadata out

use futures::future::join_all;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{info, warn};

use super::completion_client::{
    complete_with_fallback, CompletionClient, CompletionRequest, ModelTier,
};
use super::content_fetcher::ContentFetcher;
use super::error::PipelineError;
use super::response_parsing::{parse_json_object, string_field};
use crate::models::EnrichmentResult;

/// Combined fetched text below this length is not worth a model call
pub const MIN_ENRICHMENT_CHARS: usize = 100;

const SYSTEM_PROMPT: &str = "You are a smart podcast assistant. Always respond in valid JSON.";

/// Build the extraction prompt around the combined page text
pub fn enrichment_prompt(content: &str) -> String {
    format!(
        "You are a smart podcast assistant. Based on the following URLs (LinkedIn, personal website, and past interviews), extract and summarize:\n\
         - Full name\n\
         - Title / Role\n\
         - Company\n\
         - 2-sentence professional bio\n\
         - Key topics they frequently discuss\n\
         - Any memorable quotes or ideas\n\n\
         Content:\n{}\n\n\
         Return a JSON object with keys: name, title, company, bio, topics (array), quote (optional).",
        content
    )
}

/// Convert the model's JSON object into an [`EnrichmentResult`]
///
/// Missing keys become empty. `topics` may be an array of strings or one
/// comma-separated string.
pub fn parse_enrichment(map: &Map<String, Value>) -> EnrichmentResult {
    let topics = match map.get("topics") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
        Some(Value::String(joined)) => joined
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    };

    EnrichmentResult {
        name: string_field(map, "name").unwrap_or_default(),
        title: string_field(map, "title").unwrap_or_default(),
        company: string_field(map, "company").unwrap_or_default(),
        bio: string_field(map, "bio").unwrap_or_default(),
        topics,
        quote: string_field(map, "quote"),
    }
}

pub struct EnrichmentOrchestrator {
    fetcher: Arc<dyn ContentFetcher>,
    client: Arc<dyn CompletionClient>,
}

impl EnrichmentOrchestrator {
    pub fn new(fetcher: Arc<dyn ContentFetcher>, client: Arc<dyn CompletionClient>) -> Self {
        Self { fetcher, client }
    }

    /// Fetch every URL concurrently and ask the model to describe the guest
    pub async fn enrich(
        &self,
        profile_url: Option<&str>,
        site_url: Option<&str>,
        interview_urls: &[String],
    ) -> Result<EnrichmentResult, PipelineError> {
        let urls: Vec<&str> = profile_url
            .into_iter()
            .chain(site_url)
            .chain(interview_urls.iter().map(String::as_str))
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .collect();

        if urls.is_empty() {
            return Err(PipelineError::validation("At least one URL is required."));
        }

        info!(urls = urls.len(), "Enriching guest");

        let pages = join_all(urls.iter().map(|url| self.fetcher.fetch(url))).await;
        let combined = pages.into_iter().flatten().collect::<Vec<_>>().join("\n\n");

        let chars = combined.trim().chars().count();
        if chars < MIN_ENRICHMENT_CHARS {
            warn!(chars, "Not enough fetched content to enrich guest");
            return Err(PipelineError::InsufficientContent { chars });
        }

        let request = CompletionRequest::new(
            ModelTier::Advanced,
            SYSTEM_PROMPT,
            enrichment_prompt(&combined),
        )
        .max_tokens(700)
        .temperature(0.6);

        let text = complete_with_fallback(self.client.as_ref(), &request).await?;

        let map = parse_json_object(&text).ok_or_else(|| {
            warn!(response = %text, "Enrichment response held no JSON object");
            PipelineError::malformed("enrichment response is not a JSON object")
        })?;

        let result = parse_enrichment(&map);
        info!(name = %result.name, topics = result.topics.len(), "Guest enriched");
        Ok(result)
    }
}
