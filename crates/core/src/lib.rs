//! Core recommendation engine for the BharatShop shopping assistant.
//!
//! Everything here is deterministic and side-effect free: a static catalog,
//! a heuristic preference extractor, a weighted-factor match scorer, and
//! the pipeline that turns one free-text message into a ranked, explained
//! list of products. The AI boundary lives in `bharatshop-agent`; this
//! crate must produce sensible recommendations entirely on its own.

pub mod catalog;
pub mod config;
pub mod domain;
pub mod engine;
pub mod extract;
pub mod keywords;
pub mod score;

pub use catalog::{filter_from, search_query_from, Catalog, CatalogFilter};
pub use config::{
    AppConfig, ConfigError, GeminiConfig, LoadOptions, LogFormat, LoggingConfig,
    RecommenderSettings,
};
pub use domain::preference::{
    DietaryTag, PriceRange, Season, StyleTag, UserPreference,
};
pub use domain::product::{
    Category, FashionAttributes, FoodAttributes, Occasion, Product, ProductDetails, ProductId,
    SeasonTag,
};
pub use engine::{
    RecommendationEngine, RecommenderConfig, ASSISTED_TOP_K, DEFAULT_TOP_K, FALLBACK_REASON,
};
pub use extract::extract_preferences;
pub use score::{MatchScore, MatchScorer, ScoredProduct, NEUTRAL_PERCENTAGE};
