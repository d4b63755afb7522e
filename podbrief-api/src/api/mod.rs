//! HTTP API handlers
//!
//! All routes live under `/api` and answer with a JSON envelope carrying a
//! `success` flag.

pub mod briefs;
pub mod content;
pub mod health;
pub mod research;

pub use briefs::brief_routes;
pub use content::content_routes;
pub use health::health_routes;
pub use research::research_routes;

use axum::async_trait;
use axum::extract::{rejection::JsonRejection, FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;

use crate::ApiError;

/// `Json` extractor whose rejections use the API error envelope (400)
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(JsonBody(value))
    }
}

/// Trimmed, non-empty copy of an optional request string
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
