//! Skill-gap analysis core: name normalization, list diffing, the two AI
//! capability clients, and the pipeline state machine that sequences them.

pub mod diff;
pub mod extraction;
pub mod handlers;
pub mod normalize;
pub mod pipeline;
pub mod prompts;
pub mod recommend;

use thiserror::Error;

use crate::llm_client::LlmError;

/// Failure taxonomy for the analysis pipeline. Every variant is scoped to a
/// single request; nothing here is fatal to the process.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Caller-supplied precondition violation — fix the input, do not retry.
    #[error("input text is empty")]
    EmptyInput,

    /// Stage ordering violated (e.g. target analysis before profile analysis).
    #[error("{0}")]
    PreconditionNotMet(String),

    /// A request for the same stage is already outstanding.
    #[error("a request for this stage is already in flight")]
    StageBusy,

    /// The session was reset while the request was outstanding; the result
    /// was discarded rather than overwriting newer state.
    #[error("request superseded: the session changed while it was in flight")]
    Superseded,

    #[error("analysis session not found")]
    SessionNotFound,

    /// Gateway throttling. Recoverable by the user re-triggering later.
    #[error("rate limit exceeded, please try again later")]
    RateLimited,

    #[error("AI credits exhausted")]
    QuotaExhausted,

    #[error("AI service unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The capability returned output that could not be parsed into the
    /// expected shape. Hard failure for the request; no partial list is kept.
    #[error("invalid AI response: {0}")]
    MalformedResponse(String),
}

impl From<LlmError> for AnalysisError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Api { status: 429, .. } => AnalysisError::RateLimited,
            LlmError::Api { status: 402, .. } => AnalysisError::QuotaExhausted,
            LlmError::Api { status, message } => {
                AnalysisError::UpstreamUnavailable(format!("gateway returned {status}: {message}"))
            }
            LlmError::Http(e) => AnalysisError::UpstreamUnavailable(e.to_string()),
            LlmError::Parse(e) => AnalysisError::MalformedResponse(e.to_string()),
            LlmError::EmptyContent => {
                AnalysisError::MalformedResponse("empty completion".to_string())
            }
        }
    }
}
