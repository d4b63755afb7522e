//! Guest research: contextualization and enrichment

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use super::{non_blank, JsonBody};
use crate::models::EnrichmentResult;
use crate::services::{EnrichmentOrchestrator, GuestContextualizer, Summarizer};
use crate::{ApiResult, AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextualizeRequest {
    pub bio_url: Option<String>,
    pub interview_urls: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextualizeResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio_summary: Option<String>,
    pub interview_insights: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct EnrichRequest {
    pub linkedin: Option<String>,
    pub website: Option<String>,
    pub interviews: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct EnrichResponse {
    pub success: bool,
    pub enrichment: EnrichmentResult,
}

/// POST /api/contextualizeGuest
pub async fn contextualize_guest(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<ContextualizeRequest>,
) -> ApiResult<Json<ContextualizeResponse>> {
    let contextualizer = GuestContextualizer::new(
        state.fetcher.clone(),
        Summarizer::new(state.completion.clone()),
    );

    let outcome = contextualizer
        .contextualize(
            request.bio_url.as_deref(),
            request.interview_urls.as_deref().unwrap_or_default(),
        )
        .await?;

    Ok(Json(ContextualizeResponse {
        bio_summary: outcome.summary.bio_summary,
        interview_insights: outcome.summary.interview_insights,
        errors: outcome.errors,
    }))
}

/// POST /api/enrich-guest
pub async fn enrich_guest(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<EnrichRequest>,
) -> ApiResult<Json<EnrichResponse>> {
    let orchestrator = EnrichmentOrchestrator::new(state.fetcher.clone(), state.completion.clone());

    let enrichment = orchestrator
        .enrich(
            non_blank(request.linkedin.as_deref()),
            non_blank(request.website.as_deref()),
            request.interviews.as_deref().unwrap_or_default(),
        )
        .await?;

    Ok(Json(EnrichResponse {
        success: true,
        enrichment,
    }))
}

pub fn research_routes() -> Router<AppState> {
    Router::new()
        .route("/api/contextualizeGuest", post(contextualize_guest))
        .route("/api/enrich-guest", post(enrich_guest))
}
