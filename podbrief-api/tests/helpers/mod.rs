//! Test helpers: scripted collaborators and request shortcuts
#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use podbrief_api::services::{CompletionClient, CompletionError, CompletionRequest, ContentFetcher};
use podbrief_api::{build_router, AppState};
use podbrief_common::db::init_memory_database;
use serde_json::Value;
use sqlx::SqlitePool;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tower::util::ServiceExt;

/// Completion client that replays canned replies in order and records every
/// request it receives
#[derive(Default)]
pub struct ScriptedCompletion {
    replies: Mutex<VecDeque<Result<String, CompletionError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedCompletion {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn replying(replies: Vec<Result<String, CompletionError>>) -> Arc<Self> {
        let client = Self::default();
        *client.replies.lock().unwrap() = replies.into();
        Arc::new(client)
    }

    pub fn push(&self, reply: Result<String, CompletionError>) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for ScriptedCompletion {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(CompletionError::Api {
                status: 500,
                message: "no scripted reply left".to_string(),
            }))
    }
}

/// Fetcher serving fixed text per URL; unknown URLs fail
#[derive(Default)]
pub struct FakeFetcher {
    pages: HashMap<String, String>,
}

impl FakeFetcher {
    pub fn with_pages(pages: &[(&str, &str)]) -> Arc<Self> {
        Arc::new(Self {
            pages: pages
                .iter()
                .map(|(url, text)| (url.to_string(), text.to_string()))
                .collect(),
        })
    }

    pub fn empty() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl ContentFetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Option<String> {
        self.pages.get(url).cloned()
    }
}

/// Router over an in-memory database with the given collaborators
pub async fn create_test_app(
    completion: Arc<ScriptedCompletion>,
    fetcher: Arc<FakeFetcher>,
) -> (Router, SqlitePool) {
    let pool = init_memory_database()
        .await
        .expect("Failed to create in-memory database");
    let state = AppState::new(pool.clone(), completion, fetcher);
    (build_router(state), pool)
}

/// Send a request and decode the JSON response body
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    send_request(app, builder.body(body).unwrap()).await
}

pub async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub async fn row_count(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .unwrap()
}

/// A well-formed brief reply
pub fn brief_reply(questions: usize) -> String {
    let questions: Vec<String> = (1..=questions)
        .map(|i| format!("Question {} about the Analytical Engine?", i))
        .collect();
    serde_json::json!({
        "bio": "Ada Lovelace was a mathematician and writer.",
        "questions": questions,
        "intro": "Welcome Ada Lovelace to the show.",
        "outro": "Thank you, Ada."
    })
    .to_string()
}
