//! Content derived from a finished brief: show notes, social posts and
//! single-question rewrites

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use super::JsonBody;
use crate::models::{QuestionMode, QuestionTone, SocialPosts};
use crate::services::{
    QuestionAssistant, ShowNotesGenerator, ShowNotesInput, SocialPostsGenerator, SocialPostsInput,
};
use crate::{ApiError, ApiResult, AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowNotesRequest {
    pub guest_name: Option<String>,
    pub bio: Option<String>,
    pub topic: Option<String>,
    pub questions: Option<Vec<String>>,
    pub links: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowNotesResponse {
    pub success: bool,
    pub show_notes: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialPostsRequest {
    pub guest_name: Option<String>,
    pub episode_topic: Option<String>,
    pub bio: Option<String>,
    pub quote: Option<String>,
    pub post_types: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct SocialPostsResponse {
    pub success: bool,
    pub posts: SocialPosts,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistQuestionRequest {
    pub topic: Option<String>,
    pub original_question: Option<String>,
    pub mode: Option<String>,
    pub tone: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AssistQuestionResponse {
    pub success: bool,
    pub question: String,
}

/// POST /api/generate-show-notes
pub async fn generate_show_notes(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<ShowNotesRequest>,
) -> ApiResult<Json<ShowNotesResponse>> {
    let input = ShowNotesInput {
        guest_name: request.guest_name.unwrap_or_default().trim().to_string(),
        bio: request.bio.unwrap_or_default().trim().to_string(),
        topic: request.topic.unwrap_or_default().trim().to_string(),
        questions: request.questions.unwrap_or_default(),
        links: request
            .links
            .unwrap_or_default()
            .into_iter()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect(),
    };

    let show_notes = ShowNotesGenerator::new(state.completion.clone())
        .generate(&input)
        .await?;

    Ok(Json(ShowNotesResponse {
        success: true,
        show_notes,
    }))
}

/// POST /api/generate-social-posts
pub async fn generate_social_posts(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<SocialPostsRequest>,
) -> ApiResult<Json<SocialPostsResponse>> {
    let input = SocialPostsInput::new(
        request.guest_name.as_deref().unwrap_or_default(),
        request.episode_topic.as_deref().unwrap_or_default(),
        request.bio.as_deref().unwrap_or_default(),
        request.quote.as_deref(),
        request.post_types.as_deref().unwrap_or_default(),
    )?;

    let posts = SocialPostsGenerator::new(state.completion.clone())
        .generate(&input)
        .await?;

    Ok(Json(SocialPostsResponse {
        success: true,
        posts,
    }))
}

/// POST /api/assist-question
pub async fn assist_question(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<AssistQuestionRequest>,
) -> ApiResult<Json<AssistQuestionResponse>> {
    let (Some(topic), Some(question), Some(mode)) = (
        request.topic.as_deref(),
        request.original_question.as_deref(),
        request.mode.as_deref(),
    ) else {
        return Err(ApiError::bad_request("Missing required fields."));
    };

    let mode = QuestionMode::parse(mode).ok_or_else(|| ApiError::bad_request("Invalid mode."))?;
    let tone = match request.tone.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        Some(tone) => QuestionTone::parse(tone).ok_or_else(|| ApiError::bad_request("Invalid tone."))?,
        None => QuestionTone::default(),
    };

    let question = QuestionAssistant::new(state.completion.clone())
        .assist(topic, question, mode, tone)
        .await?;

    Ok(Json(AssistQuestionResponse {
        success: true,
        question,
    }))
}

pub fn content_routes() -> Router<AppState> {
    Router::new()
        .route("/api/generate-show-notes", post(generate_show_notes))
        .route("/api/generate-social-posts", post(generate_social_posts))
        .route("/api/assist-question", post(assist_question))
}
