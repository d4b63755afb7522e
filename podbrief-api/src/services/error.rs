//! Pipeline error taxonomy
//!
//! Whole-request failures only. Per-URL fetch or summarize failures are
//! recorded by the pipeline that saw them and never become a `PipelineError`.

use thiserror::Error;

use super::completion_client::CompletionError;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Caller input is missing or malformed (400)
    #[error("{0}")]
    Validation(String),

    /// Too little text could be fetched to work with (400)
    #[error("Could not extract enough information from the provided URLs ({chars} characters fetched)")]
    InsufficientContent { chars: usize },

    /// The completion API failed after any tier fallback (500)
    #[error("Model call failed: {0}")]
    ModelCall(#[from] CompletionError),

    /// The model answered but not in the required shape (500)
    #[error("Malformed model output: {0}")]
    MalformedModelOutput(String),

    /// Persistence failed (500)
    #[error(transparent)]
    Storage(#[from] podbrief_common::Error),
}

impl PipelineError {
    pub fn validation(message: impl Into<String>) -> Self {
        PipelineError::Validation(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        PipelineError::MalformedModelOutput(message.into())
    }
}
