//! Pipeline data models
//!
//! Ephemeral values passed between pipeline stages. Persisted records
//! (`Guest`, `Brief`) live in `podbrief_common::models`.

pub mod derived;
pub mod enrichment;
pub mod guest;

pub use derived::{PostType, QuestionMode, QuestionTone, SocialPosts};
pub use enrichment::{ContextualSummary, EnrichmentResult};
pub use guest::{GeneratedBrief, GuestSubmission};
