//! Gemini HTTP client: query analysis and reply generation.
//!
//! The remote model is asked for a strict-JSON preference object; whatever
//! comes back is decoded leniently, field by field, and anything unknown or
//! malformed is dropped before it can reach the merge step.

use reqwest::StatusCode;
use secrecy::ExposeSecret;
use serde_json::{json, Value};

use async_trait::async_trait;

use bharatshop_core::{
    Category, DietaryTag, GeminiConfig, Occasion, PriceRange, Season, StyleTag, UserPreference,
};

use crate::llm::{
    fallback_reply, AnalysisOutcome, AnalyzerError, QueryAnalyzer, ReplyGenerator,
};

pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, AnalyzerError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    pub fn enabled(&self) -> bool {
        self.config.api_key.is_some()
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", self.config.base_url, self.config.model)
    }

    async fn generate_content(&self, prompt: String) -> Result<String, AnalyzerError> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or_else(|| AnalyzerError::MalformedResponse("api key not configured".into()))?;

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self
            .http
            .post(self.endpoint())
            .header("X-goog-api-key", api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        if let Some(error) = status_error(response.status()) {
            return Err(error);
        }

        let payload: Value = response.json().await?;
        reply_text(&payload)
            .ok_or_else(|| AnalyzerError::MalformedResponse("no text part in response".into()))
    }
}

#[async_trait]
impl QueryAnalyzer for GeminiClient {
    async fn analyze(&self, message: &str) -> AnalysisOutcome {
        if !self.enabled() {
            tracing::debug!("gemini api key not set, skipping query analysis");
            return AnalysisOutcome::Unavailable;
        }

        match self.generate_content(analysis_prompt(message)).await {
            Ok(text) => match extract_json_block(&text)
                .and_then(|block| serde_json::from_str::<Value>(block).ok())
            {
                Some(value) => AnalysisOutcome::Preferences(preferences_from_json(&value)),
                None => {
                    tracing::warn!("gemini returned no parseable preference JSON");
                    AnalysisOutcome::Unavailable
                }
            },
            Err(AnalyzerError::RateLimited) => {
                tracing::warn!("gemini rate limit exceeded, falling back to local analysis");
                AnalysisOutcome::RateLimited
            }
            Err(error) => {
                tracing::warn!(%error, "gemini query analysis failed");
                AnalysisOutcome::Unavailable
            }
        }
    }
}

#[async_trait]
impl ReplyGenerator for GeminiClient {
    async fn reply(&self, message: &str) -> String {
        if !self.enabled() {
            tracing::debug!("gemini api key not set, using fallback reply");
            return fallback_reply(message);
        }

        match self.generate_content(reply_prompt(message)).await {
            Ok(text) => text,
            Err(AnalyzerError::RateLimited) => {
                tracing::warn!("gemini rate limit exceeded for reply generation");
                "I apologize, but our AI service is currently experiencing high demand. \
                 I'll use my built-in knowledge to help you instead."
                    .to_string()
            }
            Err(error) => {
                tracing::warn!(%error, "gemini reply generation failed");
                "Sorry, I'm having trouble connecting to my recommendation engine. \
                 Please try again later."
                    .to_string()
            }
        }
    }
}

fn analysis_prompt(message: &str) -> String {
    format!(
        "Extract key product attributes from the user's query and return ONLY a valid \
         JSON object with the following properties:\n\
         - category: The main product category (food, fashion)\n\
         - subCategory: More specific category if available\n\
         - priceRange: Price range if mentioned (min, max)\n\
         - attributes: Array of key product attributes (vegan, cotton, etc.)\n\n\
         User query: {message}\n\n\
         Respond with ONLY the JSON object with NO additional text or explanation."
    )
}

fn reply_prompt(message: &str) -> String {
    format!(
        "You are an AI shopping assistant for BharatShop, an Indian D2C e-commerce \
         platform that specializes in food and fashion products. Your task is to \
         understand the user's request and provide relevant product recommendations.\n\n\
         Respond in a friendly, helpful manner and always maintain the persona of a \
         shopping assistant. If the user asks for product recommendations, suggest \
         relevant products from Indian D2C brands. Consider Indian context, \
         terminology, and preferences in your responses.\n\n\
         User query: {message}"
    )
}

/// Map a generateContent HTTP status to the analyzer error it stands for;
/// success statuses map to nothing. 429 is the one status with dedicated
/// handling downstream.
fn status_error(status: StatusCode) -> Option<AnalyzerError> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Some(AnalyzerError::RateLimited);
    }
    if !status.is_success() {
        return Some(AnalyzerError::Status(status.as_u16()));
    }
    None
}

/// Pull the generated text out of a generateContent response.
fn reply_text(payload: &Value) -> Option<String> {
    let part = payload
        .pointer("/candidates/0/content/parts/0/text")
        .or_else(|| payload.pointer("/contents/0/parts/0/text"))?;
    part.as_str().map(str::to_string)
}

/// The model sometimes wraps its JSON in prose or code fences; take the
/// outermost brace-delimited block.
pub(crate) fn extract_json_block(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Lenient, field-by-field decode of the model's preference JSON. Unknown
/// fields and ill-typed values are dropped, never trusted.
pub(crate) fn preferences_from_json(value: &Value) -> UserPreference {
    let mut preferences = UserPreference::default();
    let Some(object) = value.as_object() else {
        return preferences;
    };

    if let Some(category) = object.get("category").and_then(Value::as_str) {
        preferences.category = Category::parse(category);
    }
    if let Some(sub_category) = object
        .get("subCategory")
        .or_else(|| object.get("sub_category"))
        .and_then(Value::as_str)
    {
        let sub_category = sub_category.trim().to_lowercase();
        if !sub_category.is_empty() {
            preferences.sub_category = Some(sub_category);
        }
    }
    if let Some(range) = object.get("priceRange").or_else(|| object.get("price_range")) {
        preferences.price_range = price_range_from_json(range);
    }
    if let Some(attributes) = object.get("attributes").and_then(Value::as_array) {
        for attribute in attributes.iter().filter_map(Value::as_str) {
            apply_attribute(&mut preferences, attribute);
        }
    }
    if let Some(season) = object.get("season").and_then(Value::as_str) {
        preferences.season = Season::parse(season).or(preferences.season);
    }
    if let Some(occasion) = object.get("occasion").and_then(Value::as_str) {
        preferences.occasion = Occasion::parse(occasion).or(preferences.occasion);
    }

    preferences
}

fn price_range_from_json(value: &Value) -> Option<PriceRange> {
    if let Some(max) = value.as_u64() {
        return u32::try_from(max).ok().map(PriceRange::up_to);
    }
    let object = value.as_object()?;
    let max = object.get("max").and_then(Value::as_u64)?;
    let min = object.get("min").and_then(Value::as_u64).unwrap_or(0);
    let max = u32::try_from(max).ok()?;
    let min = u32::try_from(min).ok()?;
    Some(PriceRange { min_rupees: min, max_rupees: max })
}

/// Route one free-form attribute token to the preference field it belongs
/// to; unroutable tokens are dropped.
fn apply_attribute(preferences: &mut UserPreference, attribute: &str) {
    let token = attribute.trim().to_lowercase();
    if let Some(tag) = DietaryTag::parse(&token) {
        preferences.dietary.insert(tag);
    } else if token == "cotton" || token == "linen" {
        preferences.materials.insert(token);
    } else if let Some(style) = StyleTag::parse(&token) {
        preferences.styles.insert(style);
    } else if let Some(season) = Season::parse(&token) {
        preferences.season.get_or_insert(season);
    } else if let Some(occasion) = Occasion::parse(&token) {
        preferences.occasion.get_or_insert(occasion);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_block_is_extracted_from_fenced_text() {
        let text = "Here you go:\n```json\n{\"category\": \"food\"}\n```";
        assert_eq!(extract_json_block(text), Some("{\"category\": \"food\"}"));
        assert_eq!(extract_json_block("no json here"), None);
        assert_eq!(extract_json_block("} backwards {"), None);
    }

    #[test]
    fn lenient_decode_maps_known_fields() {
        let value: Value = serde_json::from_str(
            r#"{
                "category": "food",
                "subCategory": "Snacks",
                "priceRange": {"min": 0, "max": 300},
                "attributes": ["vegan", "gluten-free", "cotton", "summer"]
            }"#,
        )
        .unwrap();

        let preferences = preferences_from_json(&value);
        assert_eq!(preferences.category, Some(Category::Food));
        assert_eq!(preferences.sub_category.as_deref(), Some("snacks"));
        assert_eq!(preferences.price_range, Some(PriceRange { min_rupees: 0, max_rupees: 300 }));
        assert!(preferences.dietary.contains(&DietaryTag::Vegan));
        assert!(preferences.dietary.contains(&DietaryTag::GlutenFree));
        assert!(preferences.materials.contains("cotton"));
        assert_eq!(preferences.season, Some(Season::Summer));
    }

    #[test]
    fn unknown_and_ill_typed_fields_are_dropped() {
        let value: Value = serde_json::from_str(
            r#"{
                "category": "electronics",
                "subCategory": 42,
                "priceRange": "cheap",
                "attributes": ["luxurious", "vegan"],
                "intent": "buying",
                "mood": "excited"
            }"#,
        )
        .unwrap();

        let preferences = preferences_from_json(&value);
        assert!(preferences.category.is_none());
        assert!(preferences.sub_category.is_none());
        assert!(preferences.price_range.is_none());
        // Only the recognizable attribute survives.
        assert_eq!(preferences.dietary.len(), 1);
        assert!(preferences.dietary.contains(&DietaryTag::Vegan));
    }

    #[test]
    fn non_object_json_decodes_to_empty_preferences() {
        assert!(preferences_from_json(&Value::from("just a string")).is_empty());
        assert!(preferences_from_json(&Value::from(17)).is_empty());
    }

    #[test]
    fn bare_number_price_range_is_a_ceiling() {
        let value: Value = serde_json::from_str(r#"{"priceRange": 500}"#).unwrap();
        let preferences = preferences_from_json(&value);
        assert_eq!(preferences.price_range, Some(PriceRange::up_to(500)));
    }

    #[test]
    fn prompts_embed_the_user_message() {
        assert!(analysis_prompt("vegan snacks").contains("User query: vegan snacks"));
        assert!(reply_prompt("vegan snacks").contains("BharatShop"));
    }

    #[test]
    fn status_codes_map_to_analyzer_errors() {
        assert!(matches!(
            status_error(StatusCode::TOO_MANY_REQUESTS),
            Some(AnalyzerError::RateLimited)
        ));
        assert!(matches!(
            status_error(StatusCode::INTERNAL_SERVER_ERROR),
            Some(AnalyzerError::Status(500))
        ));
        assert!(matches!(
            status_error(StatusCode::FORBIDDEN),
            Some(AnalyzerError::Status(403))
        ));
        assert!(status_error(StatusCode::OK).is_none());
    }

    /// One-shot HTTP server answering every request with the given status
    /// line; returns the base URL to point the client at.
    fn serve_status_once(status_line: &'static str) -> String {
        use std::io::{Read, Write};

        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("local addr");
        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 4096];
                let _ = stream.read(&mut buf);
                let response =
                    format!("HTTP/1.1 {status_line}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n");
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{addr}")
    }

    fn client_against(base_url: String) -> GeminiClient {
        let config = GeminiConfig {
            api_key: Some(secrecy::SecretString::from("test-key".to_string())),
            base_url,
            model: "gemini-test".to_string(),
            timeout_secs: 5,
        };
        GeminiClient::new(config).expect("client")
    }

    #[tokio::test]
    async fn http_429_analyzes_as_rate_limited() {
        let client = client_against(serve_status_once("429 Too Many Requests"));
        assert_eq!(client.analyze("vegan snacks").await, AnalysisOutcome::RateLimited);
    }

    #[tokio::test]
    async fn http_5xx_analyzes_as_unavailable() {
        let client = client_against(serve_status_once("503 Service Unavailable"));
        assert_eq!(client.analyze("vegan snacks").await, AnalysisOutcome::Unavailable);
    }
}
