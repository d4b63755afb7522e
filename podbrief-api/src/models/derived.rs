//! Types for content derived from a finished brief

use serde::{Deserialize, Serialize};
use std::fmt;

/// Social platform a post can be written for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    Twitter,
    Linkedin,
    Instagram,
}

impl PostType {
    pub const ALL: [PostType; 3] = [PostType::Twitter, PostType::Linkedin, PostType::Instagram];

    pub fn as_str(&self) -> &'static str {
        match self {
            PostType::Twitter => "twitter",
            PostType::Linkedin => "linkedin",
            PostType::Instagram => "instagram",
        }
    }

    /// Case-insensitive; "x" is accepted for Twitter
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "twitter" | "x" => Some(PostType::Twitter),
            "linkedin" => Some(PostType::Linkedin),
            "instagram" => Some(PostType::Instagram),
            _ => None,
        }
    }

    /// What the prompt asks for under this type
    pub fn prompt_line(&self) -> &'static str {
        match self {
            PostType::Twitter => "Twitter/X thread (3–5 tweets)",
            PostType::Linkedin => "LinkedIn post (2–3 short paragraphs)",
            PostType::Instagram => "Instagram caption with a quote and CTA",
        }
    }
}

impl fmt::Display for PostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generated social copy; types that were not requested stay empty
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialPosts {
    pub twitter: Vec<String>,
    pub linkedin: String,
    pub instagram: String,
}

/// Question assist operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionMode {
    Regenerate,
    Refine,
}

impl QuestionMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "regenerate" => Some(QuestionMode::Regenerate),
            "refine" => Some(QuestionMode::Refine),
            _ => None,
        }
    }
}

/// Direction a refined question is pushed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuestionTone {
    #[default]
    Personal,
    Deeper,
    Provocative,
    Funny,
    Bold,
}

impl QuestionTone {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionTone::Personal => "personal",
            QuestionTone::Deeper => "deeper",
            QuestionTone::Provocative => "provocative",
            QuestionTone::Funny => "funny",
            QuestionTone::Bold => "bold",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "personal" => Some(QuestionTone::Personal),
            "deeper" => Some(QuestionTone::Deeper),
            "provocative" => Some(QuestionTone::Provocative),
            "funny" => Some(QuestionTone::Funny),
            "bold" => Some(QuestionTone::Bold),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_type_parse() {
        assert_eq!(PostType::parse("LinkedIn"), Some(PostType::Linkedin));
        assert_eq!(PostType::parse(" X "), Some(PostType::Twitter));
        assert_eq!(PostType::parse("tiktok"), None);
    }

    #[test]
    fn test_social_posts_default_shape() {
        let value = serde_json::to_value(SocialPosts::default()).unwrap();
        assert_eq!(value, serde_json::json!({"twitter": [], "linkedin": "", "instagram": ""}));
    }

    #[test]
    fn test_mode_and_tone_parse() {
        assert_eq!(QuestionMode::parse("Refine"), Some(QuestionMode::Refine));
        assert_eq!(QuestionMode::parse("rewrite"), None);
        assert_eq!(QuestionTone::parse("FUNNY"), Some(QuestionTone::Funny));
        assert_eq!(QuestionTone::parse("sarcastic"), None);
        assert_eq!(QuestionTone::default(), QuestionTone::Personal);
    }
}
