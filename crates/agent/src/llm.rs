use async_trait::async_trait;
use thiserror::Error;

use bharatshop_core::UserPreference;

/// Outcome of one remote query analysis. Rate limiting is distinguishable
/// so the UI can show an advisory, but the pipeline treats both non-success
/// variants the same way: continue with local preferences only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnalysisOutcome {
    Preferences(UserPreference),
    RateLimited,
    Unavailable,
}

impl AnalysisOutcome {
    /// The preferences to merge over the local extraction; empty on any
    /// non-success outcome.
    pub fn into_preferences(self) -> UserPreference {
        match self {
            AnalysisOutcome::Preferences(preferences) => preferences,
            AnalysisOutcome::RateLimited | AnalysisOutcome::Unavailable => {
                UserPreference::default()
            }
        }
    }
}

/// Infers structured preferences from a raw user message. Implementations
/// must not fail outward; every error becomes a non-success outcome.
#[async_trait]
pub trait QueryAnalyzer: Send + Sync {
    async fn analyze(&self, message: &str) -> AnalysisOutcome;
}

/// Produces the conversational reply text shown above the product cards.
/// Implementations degrade to canned text rather than failing.
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    async fn reply(&self, message: &str) -> String;
}

/// Errors internal to an analyzer implementation, mapped to an
/// [`AnalysisOutcome`] before they reach the pipeline.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("http transport failure: {0}")]
    Http(#[from] reqwest::Error),
    #[error("remote service responded with status {0}")]
    Status(u16),
    #[error("rate limit exceeded")]
    RateLimited,
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Analyzer used when no API key is configured: local extraction only.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullAnalyzer;

#[async_trait]
impl QueryAnalyzer for NullAnalyzer {
    async fn analyze(&self, _message: &str) -> AnalysisOutcome {
        AnalysisOutcome::Unavailable
    }
}

#[async_trait]
impl ReplyGenerator for NullAnalyzer {
    async fn reply(&self, message: &str) -> String {
        fallback_reply(message)
    }
}

/// Canned reply used whenever the text-generation service cannot answer.
pub(crate) fn fallback_reply(message: &str) -> String {
    format!(
        "Based on your request for \"{message}\", here are some recommended products \
         that might interest you."
    )
}
