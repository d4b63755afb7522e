//! Chat-completion API client
//!
//! Pipelines talk to the model through the [`CompletionClient`] trait so the
//! HTTP client can be swapped for a scripted one in tests. Requests name a
//! [`ModelTier`] rather than a model; the client maps tiers to configured
//! model names.

use async_trait::async_trait;
use podbrief_common::config::CompletionConfig;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

const USER_AGENT: &str = concat!("PodBrief/", env!("CARGO_PKG_VERSION"));

/// Model capability tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTier {
    /// Higher-capability model (may be unavailable to the account)
    Advanced,
    /// Lower-capability model, always expected to be available
    Standard,
}

/// One chat-completion call: a system prompt plus a single user prompt
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub tier: ModelTier,
    pub system: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn new(tier: ModelTier, system: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            tier,
            system: system.into(),
            prompt: prompt.into(),
            max_tokens: 500,
            temperature: 0.7,
        }
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    fn on_tier(&self, tier: ModelTier) -> Self {
        Self {
            tier,
            ..self.clone()
        }
    }
}

/// Completion client errors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CompletionError {
    /// The requested model does not exist or the key has no access to it
    #[error("Model unavailable: {model}")]
    ModelUnavailable { model: String },

    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Model returned an empty response")]
    EmptyResponse,

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Completion API not configured: {0}")]
    NotConfigured(String),
}

/// Text-in, text-out access to a chat-completion model
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Run one completion and return the trimmed text of the first choice
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError>;
}

/// Run `request` on the advanced tier, retrying once on the standard tier
/// when (and only when) the advanced model is unavailable
pub async fn complete_with_fallback(
    client: &dyn CompletionClient,
    request: &CompletionRequest,
) -> Result<String, CompletionError> {
    match client.complete(&request.on_tier(ModelTier::Advanced)).await {
        Err(CompletionError::ModelUnavailable { model }) => {
            warn!(model = %model, "Advanced model unavailable, falling back to standard tier");
            client.complete(&request.on_tier(ModelTier::Standard)).await
        }
        result => result,
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: String,
    #[serde(default)]
    code: Option<String>,
}

/// Map a non-success HTTP answer onto a typed error
///
/// Model availability is decided from the status and the structured error
/// code first; the message is only consulted for the two phrasings the API
/// uses for missing models and missing model access.
pub fn classify_api_error(status: u16, body: &str, model: &str) -> CompletionError {
    let (message, code) = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => (envelope.error.message, envelope.error.code),
        Err(_) => (body.trim().to_string(), None),
    };

    let lowered = message.to_lowercase();
    let model_missing = code.as_deref() == Some("model_not_found")
        || (lowered.contains("model") && lowered.contains("does not exist"))
        || lowered.contains("do not have access to the model")
        || lowered.contains("does not have access to model");

    if status == 404 || model_missing {
        return CompletionError::ModelUnavailable {
            model: model.to_string(),
        };
    }

    if status == 429 {
        return CompletionError::RateLimited(message);
    }

    CompletionError::Api { status, message }
}

/// OpenAI-compatible chat-completion client
pub struct OpenAiClient {
    http_client: reqwest::Client,
    api_key: Option<String>,
    endpoint: String,
    advanced_model: String,
    standard_model: String,
    rate_limiter: governor::RateLimiter<
        governor::state::NotKeyed,
        governor::state::InMemoryState,
        governor::clock::DefaultClock,
    >,
}

impl OpenAiClient {
    pub fn new(config: &CompletionConfig) -> Result<Self, CompletionError> {
        let per_minute = NonZeroU32::new(config.requests_per_minute).ok_or_else(|| {
            CompletionError::NotConfigured("requests_per_minute must be at least 1".to_string())
        })?;

        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CompletionError::Network(e.to_string()))?;

        let api_key = config
            .api_key
            .as_ref()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        if api_key.is_none() {
            warn!("No completion API key configured; model calls will fail until OPENAI_API_KEY is set");
        }

        Ok(Self {
            http_client,
            api_key,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            advanced_model: config.advanced_model.clone(),
            standard_model: config.standard_model.clone(),
            rate_limiter: governor::RateLimiter::direct(governor::Quota::per_minute(per_minute)),
        })
    }

    /// Configured model name for `tier`
    pub fn model_for(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::Advanced => &self.advanced_model,
            ModelTier::Standard => &self.standard_model,
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            CompletionError::NotConfigured("OPENAI_API_KEY is not set".to_string())
        })?;
        let model = self.model_for(request.tier);

        self.rate_limiter.until_ready().await;

        let body = ChatRequest {
            model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.prompt,
                },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        debug!(
            model = %model,
            prompt_chars = request.prompt.len(),
            max_tokens = request.max_tokens,
            "Sending chat completion request"
        );

        let response = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let error = classify_api_error(status.as_u16(), &error_text, model);
            warn!(model = %model, status = status.as_u16(), error = %error, "Chat completion failed");
            return Err(error);
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::Parse(e.to_string()))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(CompletionError::EmptyResponse)?;

        info!(model = %model, response_chars = content.len(), "Chat completion succeeded");
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records the tiers it was asked for and answers from a script
    struct TierScript {
        calls: Mutex<Vec<ModelTier>>,
        advanced: Result<String, CompletionError>,
        standard: Result<String, CompletionError>,
    }

    #[async_trait]
    impl CompletionClient for TierScript {
        async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
            self.calls.lock().unwrap().push(request.tier);
            match request.tier {
                ModelTier::Advanced => self.advanced.clone(),
                ModelTier::Standard => self.standard.clone(),
            }
        }
    }

    fn request() -> CompletionRequest {
        CompletionRequest::new(ModelTier::Standard, "system", "prompt")
    }

    #[tokio::test]
    async fn test_fallback_only_on_model_unavailable() {
        let client = TierScript {
            calls: Mutex::new(Vec::new()),
            advanced: Err(CompletionError::ModelUnavailable {
                model: "gpt-4".to_string(),
            }),
            standard: Ok("from standard".to_string()),
        };

        let text = complete_with_fallback(&client, &request()).await.unwrap();
        assert_eq!(text, "from standard");
        assert_eq!(
            *client.calls.lock().unwrap(),
            vec![ModelTier::Advanced, ModelTier::Standard]
        );
    }

    #[tokio::test]
    async fn test_no_fallback_on_other_errors() {
        let client = TierScript {
            calls: Mutex::new(Vec::new()),
            advanced: Err(CompletionError::RateLimited("slow down".to_string())),
            standard: Ok("unused".to_string()),
        };

        let result = complete_with_fallback(&client, &request()).await;
        assert!(matches!(result, Err(CompletionError::RateLimited(_))));
        assert_eq!(*client.calls.lock().unwrap(), vec![ModelTier::Advanced]);
    }

    #[tokio::test]
    async fn test_advanced_success_skips_standard() {
        let client = TierScript {
            calls: Mutex::new(Vec::new()),
            advanced: Ok("from advanced".to_string()),
            standard: Ok("unused".to_string()),
        };

        let text = complete_with_fallback(&client, &request()).await.unwrap();
        assert_eq!(text, "from advanced");
        assert_eq!(client.calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_classify_model_not_found_code() {
        let body = r#"{"error":{"message":"The model `gpt-4` does not exist or you do not have access to it.","type":"invalid_request_error","code":"model_not_found"}}"#;
        assert_eq!(
            classify_api_error(404, body, "gpt-4"),
            CompletionError::ModelUnavailable {
                model: "gpt-4".to_string()
            }
        );
        // Same body with a 400 status still means the model is missing
        assert!(matches!(
            classify_api_error(400, body, "gpt-4"),
            CompletionError::ModelUnavailable { .. }
        ));
    }

    #[test]
    fn test_classify_rate_limit_and_other() {
        let body = r#"{"error":{"message":"Rate limit reached","code":"rate_limit_exceeded"}}"#;
        assert!(matches!(
            classify_api_error(429, body, "gpt-4"),
            CompletionError::RateLimited(msg) if msg == "Rate limit reached"
        ));

        let body = r#"{"error":{"message":"Incorrect API key provided","code":"invalid_api_key"}}"#;
        assert_eq!(
            classify_api_error(401, body, "gpt-4"),
            CompletionError::Api {
                status: 401,
                message: "Incorrect API key provided".to_string()
            }
        );
    }

    #[test]
    fn test_classify_non_json_body() {
        assert_eq!(
            classify_api_error(502, "Bad Gateway\n", "gpt-4"),
            CompletionError::Api {
                status: 502,
                message: "Bad Gateway".to_string()
            }
        );
    }

    #[test]
    fn test_client_maps_tiers_to_models() {
        let config = CompletionConfig {
            api_key: Some("sk-test".to_string()),
            advanced_model: "big".to_string(),
            standard_model: "small".to_string(),
            ..CompletionConfig::default()
        };
        let client = OpenAiClient::new(&config).unwrap();
        assert_eq!(client.model_for(ModelTier::Advanced), "big");
        assert_eq!(client.model_for(ModelTier::Standard), "small");
        assert_eq!(client.endpoint, "https://api.openai.com/v1/chat/completions");
    }

    #[tokio::test]
    async fn test_missing_key_is_not_configured() {
        let client = OpenAiClient::new(&CompletionConfig::default()).unwrap();
        let result = client.complete(&request()).await;
        assert!(matches!(result, Err(CompletionError::NotConfigured(_))));
    }
}
