//! Interview brief generation
//!
//! One model call produces the bio, five questions, intro and outro. The
//! response must match that shape exactly before anything is stored; a
//! brief is either fully persisted with its guest or not at all.

use podbrief_common::models::{Brief, BRIEF_QUESTION_COUNT};
use podbrief_common::InterviewStyle;
use serde_json::{Map, Value};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{info, warn};

use super::completion_client::{CompletionClient, CompletionRequest, ModelTier};
use super::error::PipelineError;
use super::response_parsing::parse_json_object;
use crate::db;
use crate::models::{ContextualSummary, GeneratedBrief, GuestSubmission};

const SYSTEM_PROMPT: &str = "You are a professional podcast producer who creates engaging interview briefs. Always respond with valid JSON.";

/// Writing-tone instruction for each interview style
pub fn tone_instruction(style: InterviewStyle) -> &'static str {
    match style {
        InterviewStyle::Professional => {
            "Write in a formal, business-like tone with professional language and structure."
        }
        InterviewStyle::Casual => {
            "Write in a relaxed, conversational tone that feels natural and friendly."
        }
        InterviewStyle::Entertainer => {
            "Write in a fun, engaging tone that is entertaining and keeps listeners hooked."
        }
        InterviewStyle::ThoughtLeader => {
            "Write in an intellectual, insightful tone that demonstrates deep thinking and expertise."
        }
    }
}

/// Build the brief prompt for `guest`, folding in any research context
pub fn brief_prompt(guest: &GuestSubmission, context: Option<&ContextualSummary>) -> String {
    let mut prompt = format!(
        "Generate a professional podcast interview brief for {}",
        guest.name
    );
    if let Some(link) = &guest.link {
        prompt.push_str(&format!(" ({})", link));
    }
    if let Some(topic) = &guest.topic {
        prompt.push_str(&format!(" who will be discussing {}", topic));
    }
    prompt.push('.');

    if let Some(context) = context {
        if let Some(bio) = &context.bio_summary {
            prompt.push_str("\n\nProfessional Background: ");
            prompt.push_str(bio);
        }
        if !context.interview_insights.is_empty() {
            prompt.push_str("\n\nPrevious Interview Insights:");
            for insight in &context.interview_insights {
                prompt.push_str("\n• ");
                prompt.push_str(insight);
            }
            prompt.push_str(
                "\n\nAvoid repeating themes already covered in previous interviews; build on them with fresh angles.",
            );
        }
    }

    prompt.push_str(&format!(
        "\n\n{}\n\n\
         Please provide:\n\
         1. A compelling 2-3 sentence bio\n\
         2. {} thoughtful interview questions that would create engaging conversation\n\
         3. A 30-second intro script to introduce the guest\n\
         4. A 15-second outro script to close the interview\n\n\
         Format your response as JSON with the following structure:\n\
         {{\n  \"bio\": \"...\",\n  \"questions\": [\"...\", \"...\", \"...\", \"...\", \"...\"],\n  \"intro\": \"...\",\n  \"outro\": \"...\"\n}}",
        tone_instruction(guest.interview_style),
        BRIEF_QUESTION_COUNT,
    ));

    prompt
}

/// Validate the brief object strictly
///
/// All four keys must be present with non-empty text, and `questions` must
/// hold exactly five non-empty strings.
pub fn validate_brief(map: &Map<String, Value>) -> Result<GeneratedBrief, PipelineError> {
    let text = |key: &str| -> Result<String, PipelineError> {
        map.get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .ok_or_else(|| PipelineError::malformed(format!("missing or empty '{}'", key)))
    };

    let questions = map
        .get("questions")
        .and_then(Value::as_array)
        .ok_or_else(|| PipelineError::malformed("'questions' is not an array"))?;

    if questions.len() != BRIEF_QUESTION_COUNT {
        return Err(PipelineError::malformed(format!(
            "expected {} questions, got {}",
            BRIEF_QUESTION_COUNT,
            questions.len()
        )));
    }

    let questions = questions
        .iter()
        .map(|q| {
            q.as_str()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .ok_or_else(|| PipelineError::malformed("question is not a non-empty string"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(GeneratedBrief {
        bio: text("bio")?,
        questions,
        intro: text("intro")?,
        outro: text("outro")?,
    })
}

pub struct BriefGenerator {
    client: Arc<dyn CompletionClient>,
    db: SqlitePool,
}

impl BriefGenerator {
    pub fn new(client: Arc<dyn CompletionClient>, db: SqlitePool) -> Self {
        Self { client, db }
    }

    /// Generate, validate and store a brief for `guest`
    pub async fn generate(
        &self,
        guest: &GuestSubmission,
        context: Option<&ContextualSummary>,
    ) -> Result<Brief, PipelineError> {
        info!(
            guest = %guest.name,
            style = %guest.interview_style,
            has_context = context.is_some(),
            "Generating brief"
        );

        let request = CompletionRequest::new(
            ModelTier::Standard,
            SYSTEM_PROMPT,
            brief_prompt(guest, context),
        )
        .max_tokens(1500)
        .temperature(0.7);

        let text = self.client.complete(&request).await?;

        let map = parse_json_object(&text).ok_or_else(|| {
            warn!(response = %text, "Brief response held no JSON object");
            PipelineError::malformed("brief response is not a JSON object")
        })?;

        let content = validate_brief(&map).inspect_err(|e| {
            warn!(error = %e, response = %text, "Brief response rejected");
        })?;

        let brief = db::create_brief_with_guest(&self.db, guest, &content).await?;
        Ok(brief)
    }
}
