//! Recommendation pipeline: extract → filter → score → rank → truncate,
//! with a popularity fallback so a non-empty catalog always yields results.

use crate::catalog::{filter_from, search_query_from, Catalog};
use crate::domain::preference::UserPreference;
use crate::extract::extract_preferences;
use crate::score::{MatchScorer, ScoredProduct, NEUTRAL_PERCENTAGE};

/// Result-list size for the local (no AI) pipeline.
pub const DEFAULT_TOP_K: usize = 4;
/// Result-list size when the AI analyzer participates.
pub const ASSISTED_TOP_K: usize = 6;
/// Reason stamped on popularity-fallback results.
pub const FALLBACK_REASON: &str = "Popular product you might like";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecommenderConfig {
    /// Maximum number of recommendations returned per query.
    pub top_k: usize,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self { top_k: DEFAULT_TOP_K }
    }
}

impl RecommenderConfig {
    pub fn assisted() -> Self {
        Self { top_k: ASSISTED_TOP_K }
    }
}

/// The local, synchronous recommendation engine. Stateless per call and
/// safe to share: it only reads the catalog.
#[derive(Clone, Debug)]
pub struct RecommendationEngine {
    catalog: Catalog,
    scorer: MatchScorer,
    config: RecommenderConfig,
}

impl RecommendationEngine {
    pub fn new(catalog: Catalog, config: RecommenderConfig) -> Self {
        Self { catalog, scorer: MatchScorer::new(), config }
    }

    pub fn with_demo_catalog(config: RecommenderConfig) -> Self {
        Self::new(Catalog::demo(), config)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> RecommenderConfig {
        self.config
    }

    /// The sole entry point the chat layer calls per user turn.
    pub fn recommend(&self, message: &str) -> Vec<ScoredProduct> {
        let preferences = extract_preferences(message);
        self.recommend_for(&preferences)
    }

    /// Score pre-built preferences, e.g. after merging an AI analysis.
    pub fn recommend_for(&self, preferences: &UserPreference) -> Vec<ScoredProduct> {
        let query = search_query_from(preferences);
        let filter = filter_from(preferences);
        let candidates = self.catalog.filter(&query, &filter);

        let mut scored: Vec<ScoredProduct> = candidates
            .into_iter()
            .map(|product| self.scorer.score_product(product, preferences))
            // The neutral 50 baseline is deliberately below the bar: only
            // preference-driven matches count as real recommendations.
            .filter(|scored| scored.match_percentage > NEUTRAL_PERCENTAGE)
            .collect();

        // Stable sort keeps catalog order for equal percentages.
        scored.sort_by(|a, b| b.match_percentage.cmp(&a.match_percentage));
        scored.truncate(self.config.top_k);

        if scored.is_empty() {
            return self.popularity_fallback();
        }
        scored
    }

    /// First `top_k` catalog products in catalog order, each at the neutral
    /// percentage. Never fails; empty only when the catalog itself is empty.
    pub fn popularity_fallback(&self) -> Vec<ScoredProduct> {
        tracing::info!(top_k = self.config.top_k, "no scored matches, serving popular products");
        self.catalog
            .products()
            .iter()
            .take(self.config.top_k)
            .map(|product| ScoredProduct {
                product: product.clone(),
                match_percentage: NEUTRAL_PERCENTAGE,
                match_reason: FALLBACK_REASON.to_string(),
            })
            .collect()
    }
}
