//! Brief generation and saved-brief management
//!
//! `GET /api/generate[/{id}]` are kept as aliases of the `/api/briefs`
//! reads for older clients.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use podbrief_common::models::Brief;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{non_blank, JsonBody};
use crate::db;
use crate::models::{ContextualSummary, GuestSubmission};
use crate::services::BriefGenerator;
use crate::{ApiError, ApiResult, AppState};

const BRIEF_NOT_FOUND: &str = "Brief not found";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateBriefRequest {
    pub name: Option<String>,
    pub link: Option<String>,
    pub topic: Option<String>,
    pub interview_style: Option<String>,
    pub bio_summary: Option<String>,
    pub interview_insights: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct GenerateBriefResponse {
    pub success: bool,
    pub message: String,
    pub brief: Brief,
}

#[derive(Debug, Serialize)]
pub struct BriefListResponse {
    pub success: bool,
    pub briefs: Vec<Brief>,
}

#[derive(Debug, Serialize)]
pub struct BriefResponse {
    pub success: bool,
    pub brief: Brief,
}

#[derive(Debug, Serialize)]
pub struct DeleteBriefResponse {
    pub success: bool,
    pub message: String,
}

/// POST /api/generate
pub async fn generate_brief(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<GenerateBriefRequest>,
) -> ApiResult<(StatusCode, Json<GenerateBriefResponse>)> {
    let guest = GuestSubmission::new(
        request.name.as_deref(),
        request.link.as_deref(),
        request.topic.as_deref(),
        request.interview_style.as_deref(),
    )
    .map_err(ApiError::BadRequest)?;

    let context = ContextualSummary::from_parts(
        non_blank(request.bio_summary.as_deref()),
        request.interview_insights.as_deref().unwrap_or_default(),
    );

    let generator = BriefGenerator::new(state.completion.clone(), state.db.clone());
    let brief = generator.generate(&guest, context.as_ref()).await?;

    Ok((
        StatusCode::CREATED,
        Json(GenerateBriefResponse {
            success: true,
            message: "Brief generated successfully".to_string(),
            brief,
        }),
    ))
}

/// GET /api/briefs
pub async fn list_briefs(State(state): State<AppState>) -> ApiResult<Json<BriefListResponse>> {
    let briefs = db::list_briefs(&state.db).await?;
    Ok(Json(BriefListResponse {
        success: true,
        briefs,
    }))
}

/// GET /api/briefs/{id}
pub async fn get_brief(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<BriefResponse>> {
    let id = parse_brief_id(&id)?;
    let brief = db::get_brief(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(BRIEF_NOT_FOUND.to_string()))?;

    Ok(Json(BriefResponse {
        success: true,
        brief,
    }))
}

/// DELETE /api/briefs/{id}
pub async fn delete_brief(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteBriefResponse>> {
    let id = parse_brief_id(&id)?;
    if !db::delete_brief(&state.db, id).await? {
        return Err(ApiError::NotFound(BRIEF_NOT_FOUND.to_string()));
    }

    info!(brief_id = id, "Brief deleted");
    Ok(Json(DeleteBriefResponse {
        success: true,
        message: "Brief deleted successfully".to_string(),
    }))
}

fn parse_brief_id(raw: &str) -> ApiResult<i64> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| ApiError::bad_request("Invalid brief ID"))
}

pub fn brief_routes() -> Router<AppState> {
    Router::new()
        .route("/api/generate", get(list_briefs).post(generate_brief))
        .route("/api/generate/:id", get(get_brief))
        .route("/api/briefs", get(list_briefs))
        .route("/api/briefs/:id", get(get_brief).delete(delete_brief))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_brief_id() {
        assert_eq!(parse_brief_id("42").unwrap(), 42);
        assert!(parse_brief_id("abc").is_err());
        assert!(parse_brief_id("0").is_err());
        assert!(parse_brief_id("-3").is_err());
        assert!(parse_brief_id("1.5").is_err());
    }
}
