//! Markdown show notes for a finished brief

use std::sync::Arc;
use tracing::info;

use super::completion_client::{
    complete_with_fallback, CompletionClient, CompletionRequest, ModelTier,
};
use super::error::PipelineError;

const SYSTEM_PROMPT: &str =
    "You are a professional podcast show notes writer. Always respond in Markdown.";

/// Inputs for one set of show notes
#[derive(Debug, Clone, PartialEq)]
pub struct ShowNotesInput {
    pub guest_name: String,
    pub bio: String,
    pub topic: String,
    pub questions: Vec<String>,
    pub links: Vec<String>,
}

impl ShowNotesInput {
    /// Reject blank required fields and an empty question list
    pub fn validate(&self) -> Result<(), PipelineError> {
        fn blank(s: &str) -> bool {
            s.trim().is_empty()
        }

        if blank(&self.guest_name)
            || blank(&self.bio)
            || blank(&self.topic)
            || self.questions.iter().all(|q| blank(q))
        {
            return Err(PipelineError::validation("Missing required fields."));
        }
        Ok(())
    }
}

pub fn show_notes_prompt(input: &ShowNotesInput) -> String {
    let links = if input.links.is_empty() {
        "None".to_string()
    } else {
        input.links.join(", ")
    };

    format!(
        "Write SEO-optimized podcast show notes for an episode featuring guest {}. Use the following info:\n\
         - Bio: {}\n\
         - Topic: {}\n\
         - Interview Questions: {}\n\
         - Guest Links: {}\n\n\
         Include:\n\
         - A short 2–3 sentence summary of the episode\n\
         - 3–5 key takeaways (bulleted list)\n\
         - A guest info section (with links)\n\
         - A brief call to action for the listener",
        input.guest_name,
        input.bio,
        input.topic,
        input.questions.join("\n"),
        links,
    )
}

pub struct ShowNotesGenerator {
    client: Arc<dyn CompletionClient>,
}

impl ShowNotesGenerator {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    /// Markdown show notes, as returned by the model
    pub async fn generate(&self, input: &ShowNotesInput) -> Result<String, PipelineError> {
        input.validate()?;

        let request = CompletionRequest::new(
            ModelTier::Advanced,
            SYSTEM_PROMPT,
            show_notes_prompt(input),
        )
        .max_tokens(900)
        .temperature(0.7);

        let notes = complete_with_fallback(self.client.as_ref(), &request).await?;
        let notes = notes.trim();
        if notes.is_empty() {
            return Err(PipelineError::malformed("show notes response was empty"));
        }

        info!(guest = %input.guest_name, chars = notes.len(), "Show notes generated");
        Ok(notes.to_string())
    }
}
