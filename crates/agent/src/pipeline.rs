//! The assisted pipeline: local extraction, optional AI analysis, merge,
//! then the deterministic core engine.

use bharatshop_core::{extract_preferences, RecommendationEngine, ScoredProduct};

use crate::llm::{AnalysisOutcome, QueryAnalyzer};

/// Result of one assisted recommendation pass. `rate_limited` lets the UI
/// show an advisory banner; the product list is always served regardless.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssistedRecommendation {
    pub products: Vec<ScoredProduct>,
    pub rate_limited: bool,
}

/// Wraps the core engine with a query analyzer. Analyzer failures are
/// swallowed here: the caller always gets recommendations.
pub struct AssistedEngine<A> {
    engine: RecommendationEngine,
    analyzer: A,
}

impl<A: QueryAnalyzer> AssistedEngine<A> {
    pub fn new(engine: RecommendationEngine, analyzer: A) -> Self {
        Self { engine, analyzer }
    }

    pub fn engine(&self) -> &RecommendationEngine {
        &self.engine
    }

    pub async fn recommend(&self, message: &str) -> AssistedRecommendation {
        let local = extract_preferences(message);

        let outcome = self.analyzer.analyze(message).await;
        let rate_limited = outcome == AnalysisOutcome::RateLimited;
        // AI fields override local ones; a non-success outcome merges as
        // empty and leaves the local extraction untouched.
        let combined = local.merged_with(&outcome.into_preferences());

        AssistedRecommendation {
            products: self.engine.recommend_for(&combined),
            rate_limited,
        }
    }
}
