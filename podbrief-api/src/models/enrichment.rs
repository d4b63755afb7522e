//! Ephemeral guest research results

use serde::{Deserialize, Serialize};

/// Structured guest metadata extracted from the guest's public pages
///
/// Never stored; the client merges it into form state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentResult {
    pub name: String,
    pub title: String,
    pub company: String,
    pub bio: String,
    pub topics: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<String>,
}

/// Background material folded into the brief prompt, then discarded
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextualSummary {
    pub bio_summary: Option<String>,
    #[serde(default)]
    pub interview_insights: Vec<String>,
}

impl ContextualSummary {
    /// Build from optional request fields, dropping blank entries
    pub fn from_parts(bio_summary: Option<&str>, interview_insights: &[String]) -> Option<Self> {
        let bio_summary = bio_summary
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let interview_insights: Vec<String> = interview_insights
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        if bio_summary.is_none() && interview_insights.is_empty() {
            None
        } else {
            Some(Self {
                bio_summary,
                interview_insights,
            })
        }
    }
}
