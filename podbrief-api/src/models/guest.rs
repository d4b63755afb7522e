//! Guest input and raw generated brief content

use podbrief_common::InterviewStyle;
use serde::{Deserialize, Serialize};

/// Validated guest fields for one brief-generation request
#[derive(Debug, Clone, PartialEq)]
pub struct GuestSubmission {
    /// Trimmed, never empty
    pub name: String,
    pub link: Option<String>,
    pub topic: Option<String>,
    pub interview_style: InterviewStyle,
}

impl GuestSubmission {
    /// Trim all fields, drop blank optionals and parse the style
    ///
    /// Fails only when the name is missing or blank. Unrecognized styles
    /// become Professional.
    pub fn new(
        name: Option<&str>,
        link: Option<&str>,
        topic: Option<&str>,
        interview_style: Option<&str>,
    ) -> Result<Self, String> {
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| "Name is required and must be a non-empty string".to_string())?;

        Ok(Self {
            name: name.to_string(),
            link: non_blank(link),
            topic: non_blank(topic),
            interview_style: InterviewStyle::parse_or_default(interview_style),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// The four model-authored fields of a brief, after shape validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedBrief {
    pub bio: String,
    pub questions: Vec<String>,
    pub intro: String,
    pub outro: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_trims_and_defaults() {
        let guest = GuestSubmission::new(Some("  Ada Lovelace "), Some("   "), Some(" math "), None)
            .unwrap();
        assert_eq!(guest.name, "Ada Lovelace");
        assert_eq!(guest.link, None);
        assert_eq!(guest.topic.as_deref(), Some("math"));
        assert_eq!(guest.interview_style, InterviewStyle::Professional);
    }

    #[test]
    fn test_submission_requires_name() {
        assert!(GuestSubmission::new(None, None, None, None).is_err());
        assert!(GuestSubmission::new(Some("  "), None, None, None).is_err());
    }

    #[test]
    fn test_submission_parses_style() {
        let guest = GuestSubmission::new(Some("Bo"), None, None, Some("Entertainer")).unwrap();
        assert_eq!(guest.interview_style, InterviewStyle::Entertainer);

        let guest = GuestSubmission::new(Some("Bo"), None, None, Some("Mystery")).unwrap();
        assert_eq!(guest.interview_style, InterviewStyle::Professional);
    }
}
