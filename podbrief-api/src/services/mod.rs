//! Generation pipelines and their collaborators
//!
//! Each pipeline is a small struct built from shared `Arc` collaborators
//! (completion client, content fetcher, database pool) held in `AppState`.

pub mod brief_generator;
pub mod completion_client;
pub mod content_fetcher;
pub mod contextualizer;
pub mod enrichment;
pub mod error;
pub mod question_assist;
pub mod response_parsing;
pub mod show_notes;
pub mod social_posts;
pub mod summarizer;

pub use brief_generator::BriefGenerator;
pub use completion_client::{
    complete_with_fallback, CompletionClient, CompletionError, CompletionRequest, ModelTier,
    OpenAiClient,
};
pub use content_fetcher::{ContentFetcher, FetchError, WebContentFetcher};
pub use contextualizer::{ContextualizeOutcome, GuestContextualizer};
pub use enrichment::EnrichmentOrchestrator;
pub use error::PipelineError;
pub use question_assist::QuestionAssistant;
pub use show_notes::{ShowNotesGenerator, ShowNotesInput};
pub use social_posts::{SocialPostsGenerator, SocialPostsInput};
pub use summarizer::{Summarizer, SummaryIntent};
