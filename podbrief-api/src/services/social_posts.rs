//! Promotional social copy for an episode
//!
//! The model is asked for a JSON object keyed by post type. Replies that
//! ignore that and answer in labelled prose ("Twitter: ... LinkedIn: ...")
//! are split on the platform headings instead.

use regex::Regex;
use serde_json::{Map, Value};
use std::sync::{Arc, OnceLock};
use tracing::{debug, info, warn};

use super::completion_client::{
    complete_with_fallback, CompletionClient, CompletionRequest, ModelTier,
};
use super::error::PipelineError;
use super::response_parsing::parse_json_object;
use crate::models::{PostType, SocialPosts};

const SYSTEM_PROMPT: &str = "You are a social media strategist for a podcast.";

#[derive(Debug, Clone, PartialEq)]
pub struct SocialPostsInput {
    pub guest_name: String,
    pub episode_topic: String,
    pub bio: String,
    pub quote: Option<String>,
    /// Deduplicated, in request order
    pub post_types: Vec<PostType>,
}

impl SocialPostsInput {
    /// Validate raw post type names and build the input
    ///
    /// Any unknown type name rejects the whole request.
    pub fn new(
        guest_name: &str,
        episode_topic: &str,
        bio: &str,
        quote: Option<&str>,
        post_types: &[String],
    ) -> Result<Self, PipelineError> {
        if [guest_name, episode_topic, bio].iter().any(|s| s.trim().is_empty())
            || post_types.is_empty()
        {
            return Err(PipelineError::validation("Missing required fields."));
        }

        let mut types = Vec::new();
        for name in post_types {
            let post_type = PostType::parse(name).ok_or_else(|| {
                PipelineError::validation(format!("Unsupported post type: {}", name))
            })?;
            if !types.contains(&post_type) {
                types.push(post_type);
            }
        }

        Ok(Self {
            guest_name: guest_name.trim().to_string(),
            episode_topic: episode_topic.trim().to_string(),
            bio: bio.trim().to_string(),
            quote: quote
                .map(str::trim)
                .filter(|q| !q.is_empty())
                .map(str::to_string),
            post_types: types,
        })
    }
}

pub fn social_posts_prompt(input: &SocialPostsInput) -> String {
    let mut prompt = format!(
        "You are a social media strategist for a podcast.\n\nGuest: {}\nTopic: {}\nBio: {}",
        input.guest_name, input.episode_topic, input.bio
    );
    if let Some(quote) = &input.quote {
        prompt.push_str(&format!("\nQuote: \"{}\"", quote));
    }

    prompt.push_str("\n\nGenerate the following:");
    for post_type in &input.post_types {
        prompt.push_str("\n- ");
        prompt.push_str(post_type.prompt_line());
    }

    let keys: Vec<String> = input
        .post_types
        .iter()
        .map(|t| match t {
            PostType::Twitter => "\"twitter\" (array of tweet strings)".to_string(),
            other => format!("\"{}\" (string)", other),
        })
        .collect();

    prompt.push_str(&format!(
        "\n\nKeep each output short, friendly, and ready to publish.\n\
         Respond with a JSON object with keys: {}.",
        keys.join(", ")
    ));
    prompt
}

/// Interpret the model reply, keeping only the requested post types
pub fn parse_social_posts(text: &str, requested: &[PostType]) -> SocialPosts {
    let posts = parse_json_object(text)
        .map(|map| posts_from_json(&map, requested))
        .filter(|posts| *posts != SocialPosts::default());

    match posts {
        Some(posts) => posts,
        None => {
            debug!("Social posts reply is not keyed JSON, splitting on headings");
            posts_from_headings(text, requested)
        }
    }
}

fn posts_from_json(map: &Map<String, Value>, requested: &[PostType]) -> SocialPosts {
    let mut posts = SocialPosts::default();

    for post_type in requested {
        let value = map.get(post_type.as_str());
        match post_type {
            PostType::Twitter => {
                posts.twitter = match value {
                    Some(Value::Array(items)) => items
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::trim)
                        .filter(|t| !t.is_empty())
                        .map(str::to_string)
                        .collect(),
                    Some(Value::String(thread)) => split_tweets(thread),
                    _ => Vec::new(),
                }
            }
            PostType::Linkedin => posts.linkedin = json_text(value),
            PostType::Instagram => posts.instagram = json_text(value),
        }
    }

    posts
}

fn json_text(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default()
        .to_string()
}

fn heading_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?im)^[^\w\n]*(twitter|linkedin|instagram)\b[^:\n]*:\**")
            .expect("heading pattern is valid")
    })
}

fn tweet_split_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^\s*\d+[.)]\s+|\n+|\s\d+[.)]\s+")
            .expect("tweet split pattern is valid")
    })
}

/// Split a labelled reply into sections
///
/// Headings start a line. A section runs from its heading to the next
/// platform heading or the end of the text. Only the first heading of each
/// platform counts.
pub fn posts_from_headings(text: &str, requested: &[PostType]) -> SocialPosts {
    let headings: Vec<(PostType, usize, usize)> = heading_regex()
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let post_type = PostType::parse(caps.get(1)?.as_str())?;
            Some((post_type, whole.start(), whole.end()))
        })
        .collect();

    let section = |wanted: PostType| -> Option<&str> {
        let index = headings.iter().position(|(t, _, _)| *t == wanted)?;
        let (_, _, body_start) = headings[index];
        let body_end = headings
            .get(index + 1)
            .map(|(_, start, _)| *start)
            .unwrap_or(text.len());
        Some(text[body_start..body_end].trim())
    };

    let mut posts = SocialPosts::default();
    for post_type in requested {
        let Some(body) = section(*post_type) else {
            continue;
        };
        match post_type {
            PostType::Twitter => posts.twitter = split_tweets(body),
            PostType::Linkedin => posts.linkedin = body.to_string(),
            PostType::Instagram => posts.instagram = body.to_string(),
        }
    }
    posts
}

/// Break a thread into tweets on line breaks and numbered-list markers
pub fn split_tweets(thread: &str) -> Vec<String> {
    tweet_split_regex()
        .split(thread)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

pub struct SocialPostsGenerator {
    client: Arc<dyn CompletionClient>,
}

impl SocialPostsGenerator {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    pub async fn generate(&self, input: &SocialPostsInput) -> Result<SocialPosts, PipelineError> {
        let request = CompletionRequest::new(
            ModelTier::Advanced,
            SYSTEM_PROMPT,
            social_posts_prompt(input),
        )
        .max_tokens(700)
        .temperature(0.8);

        let text = complete_with_fallback(self.client.as_ref(), &request).await?;
        let posts = parse_social_posts(&text, &input.post_types);

        if posts == SocialPosts::default() {
            warn!(response = %text, "No requested post type found in model reply");
        }

        info!(
            guest = %input.guest_name,
            tweets = posts.twitter.len(),
            linkedin = !posts.linkedin.is_empty(),
            instagram = !posts.instagram.is_empty(),
            "Social posts generated"
        );
        Ok(posts)
    }
}
