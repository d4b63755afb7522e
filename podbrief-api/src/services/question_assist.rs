//! Single-question regenerate / refine

use std::sync::Arc;
use tracing::{debug, warn};

use super::completion_client::{
    complete_with_fallback, CompletionClient, CompletionRequest, ModelTier,
};
use super::error::PipelineError;
use super::response_parsing::strip_wrapping_quotes;
use crate::models::{QuestionMode, QuestionTone};

const SYSTEM_PROMPT: &str = "You are a podcast interview question expert. Always respond with only the improved or regenerated question.";

pub fn question_prompt(
    topic: &str,
    question: &str,
    mode: QuestionMode,
    tone: QuestionTone,
) -> String {
    match mode {
        QuestionMode::Regenerate => format!(
            "Regenerate the following podcast interview question for a guest discussing \"{}\". Keep it engaging and relevant:\n\"{}\"",
            topic, question
        ),
        QuestionMode::Refine => format!(
            "Improve the following podcast interview question to be more {} (e.g., personal, thought-provoking, funny, bold) while keeping it on-topic:\n\"{}\"",
            tone.as_str(),
            question
        ),
    }
}

pub struct QuestionAssistant {
    client: Arc<dyn CompletionClient>,
}

impl QuestionAssistant {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    /// Rewrite one interview question
    pub async fn assist(
        &self,
        topic: &str,
        question: &str,
        mode: QuestionMode,
        tone: QuestionTone,
    ) -> Result<String, PipelineError> {
        if topic.trim().is_empty() || question.trim().is_empty() {
            return Err(PipelineError::validation("Missing required fields."));
        }

        let request = CompletionRequest::new(
            ModelTier::Advanced,
            SYSTEM_PROMPT,
            question_prompt(topic.trim(), question.trim(), mode, tone),
        )
        .max_tokens(100)
        .temperature(0.7);

        let text = complete_with_fallback(self.client.as_ref(), &request).await?;
        let rewritten = strip_wrapping_quotes(&text);

        if rewritten.is_empty() {
            warn!(?mode, "Question assist returned nothing usable");
            return Err(PipelineError::malformed("empty question"));
        }

        debug!(?mode, tone = tone.as_str(), "Question rewritten");
        Ok(rewritten)
    }
}
