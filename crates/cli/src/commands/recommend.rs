use bharatshop_agent::{AssistedEngine, GeminiClient};
use bharatshop_core::{AppConfig, RecommendationEngine, ScoredProduct};

use super::CommandResult;

/// Local-only recommendation: extraction and scoring, no network.
pub fn run(config: &AppConfig, message: &str, json: bool) -> CommandResult {
    let engine = RecommendationEngine::with_demo_catalog(config.recommender.local());
    let products = engine.recommend(message);
    render(&products, json)
}

/// Assisted recommendation: the Gemini analyzer enriches the locally
/// extracted preferences before scoring. Falls back to local-only when no
/// API key is configured.
pub async fn run_assisted(config: &AppConfig, message: &str, json: bool) -> CommandResult {
    let engine = RecommendationEngine::with_demo_catalog(config.recommender.assisted());
    let analyzer = match GeminiClient::new(config.gemini.clone()) {
        Ok(analyzer) => analyzer,
        Err(error) => return CommandResult::failure(format!("gemini client error: {error}")),
    };
    if !analyzer.enabled() {
        tracing::warn!("GEMINI_API_KEY not set, running the local pipeline only");
    }

    let assisted = AssistedEngine::new(engine, analyzer);
    let result = assisted.recommend(message).await;

    let mut rendered = render(&result.products, json);
    if result.rate_limited && !json {
        rendered.output.push_str("\nNote: AI analysis was rate limited; results are keyword-based.\n");
    }
    rendered
}

fn render(products: &[ScoredProduct], json: bool) -> CommandResult {
    if json {
        return match serde_json::to_string_pretty(products) {
            Ok(body) => CommandResult::ok(body),
            Err(error) => CommandResult::failure(format!("serialization error: {error}")),
        };
    }
    if products.is_empty() {
        return CommandResult::ok("No products available.".to_string());
    }
    CommandResult::ok(super::render_products(products))
}
