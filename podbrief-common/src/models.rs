//! Domain records shared across crates

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of interview questions every stored brief carries
pub const BRIEF_QUESTION_COUNT: usize = 5;

/// Interview style chosen for a guest; conditions the tone of generated text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum InterviewStyle {
    #[default]
    Professional,
    Casual,
    Entertainer,
    #[serde(rename = "Thought Leader", alias = "ThoughtLeader", alias = "Challenger")]
    ThoughtLeader,
}

impl InterviewStyle {
    pub const ALL: [InterviewStyle; 4] = [
        InterviewStyle::Professional,
        InterviewStyle::Casual,
        InterviewStyle::Entertainer,
        InterviewStyle::ThoughtLeader,
    ];

    /// Wire / storage name
    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewStyle::Professional => "Professional",
            InterviewStyle::Casual => "Casual",
            InterviewStyle::Entertainer => "Entertainer",
            InterviewStyle::ThoughtLeader => "Thought Leader",
        }
    }

    /// Parse a user-supplied style, case-insensitively
    ///
    /// Returns `None` for unrecognized names; callers fall back to Professional.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized: String = value
            .trim()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "professional" => Some(InterviewStyle::Professional),
            "casual" => Some(InterviewStyle::Casual),
            "entertainer" => Some(InterviewStyle::Entertainer),
            "thoughtleader" | "challenger" => Some(InterviewStyle::ThoughtLeader),
            _ => None,
        }
    }

    /// Parse with the Professional fallback applied
    pub fn parse_or_default(value: Option<&str>) -> Self {
        value.and_then(Self::parse).unwrap_or_default()
    }
}

impl fmt::Display for InterviewStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted guest row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub id: i64,
    pub name: String,
    pub link: Option<String>,
    pub topic: Option<String>,
    pub interview_style: InterviewStyle,
    pub created_at: DateTime<Utc>,
}

/// A brief joined with its guest, as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brief {
    pub id: i64,
    pub guest_id: i64,
    pub guest_name: String,
    pub guest_link: Option<String>,
    pub guest_topic: Option<String>,
    pub interview_style: InterviewStyle,
    pub bio: String,
    pub questions: Vec<String>,
    pub intro: String,
    pub outro: String,
    pub created_at: DateTime<Utc>,
}
