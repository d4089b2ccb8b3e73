//! AI boundary and chat orchestration for the BharatShop assistant.
//!
//! The language model here is strictly an enrichment step. It NEVER decides
//! what gets recommended: it may sharpen the locally extracted preferences
//! and it writes the conversational reply text, but scoring and ranking are
//! deterministic decisions made by `bharatshop-core`, and every remote
//! failure degrades to the local-only pipeline.
//!
//! Modules:
//! - `llm` — the `QueryAnalyzer` / `ReplyGenerator` traits and the tagged
//!   `AnalysisOutcome` the pipeline consumes.
//! - `gemini` — the Gemini HTTP client implementing both traits.
//! - `pipeline` — the assisted pipeline: analyze, merge, delegate to core.
//! - `session` — the in-memory chat transcript with per-turn sequence
//!   numbers so superseded responses are discarded, not displayed.

pub mod gemini;
pub mod llm;
pub mod pipeline;
pub mod session;

pub use gemini::GeminiClient;
pub use llm::{AnalysisOutcome, AnalyzerError, NullAnalyzer, QueryAnalyzer, ReplyGenerator};
pub use pipeline::{AssistedEngine, AssistedRecommendation};
pub use session::{ChatMessage, ChatSession, Sender, Turn, TurnOutcome};
