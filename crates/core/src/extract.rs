//! Heuristic preference extraction from free-text shopping queries.
//!
//! Pure and deterministic: the same message always yields the same
//! [`UserPreference`], and extraction never fails — unrecognized text simply
//! leaves fields unset.

use crate::domain::preference::{PriceRange, Season, StyleTag, UserPreference};
use crate::domain::product::{Category, Occasion};
use crate::keywords::{
    contains_any, BREAKFAST_TOKENS, CASUAL_WEAR_TOKENS, DIETARY_SYNONYMS, ETHNIC_TOKENS,
    FASHION_TOKENS, FOOD_TOKENS, MATERIAL_TOKENS, OCCASION_TOKENS, PRICE_CEILING_PHRASES,
    SEASON_SYNONYMS, SNACK_TOKENS, STYLE_TOKENS,
};

/// Parse a free-text message into structured shopping preferences.
pub fn extract_preferences(message: &str) -> UserPreference {
    let text = message.to_lowercase();

    let (category, sub_category) = extract_category(&text);
    let preferences = UserPreference {
        category,
        sub_category,
        price_range: extract_price_ceiling(&text),
        dietary: extract_dietary(&text),
        season: extract_season(&text),
        occasion: extract_occasion(&text),
        materials: extract_materials(&text),
        styles: extract_styles(&text),
    };

    tracing::debug!(
        category = preferences.category.map(|c| c.as_str()),
        dietary_tags = preferences.dietary.len(),
        has_price_ceiling = preferences.price_range.is_some(),
        "extracted preferences from message"
    );
    preferences
}

/// "under ₹N", "less than ₹N", "below ₹N", "within ₹N" — first phrase in
/// table order that appears anywhere wins, and always yields a {0, N} range.
fn extract_price_ceiling(text: &str) -> Option<PriceRange> {
    for phrase in PRICE_CEILING_PHRASES {
        if let Some(position) = text.find(phrase) {
            let rest = &text[position + phrase.len()..];
            let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
            if let Ok(max) = digits.parse::<u32>() {
                return Some(PriceRange::up_to(max));
            }
        }
    }
    None
}

fn extract_dietary(text: &str) -> std::collections::BTreeSet<crate::domain::preference::DietaryTag> {
    let mut dietary = std::collections::BTreeSet::new();
    for (tag, synonyms) in DIETARY_SYNONYMS {
        // First synonym hit settles this tag; other tags still get checked.
        if contains_any(text, synonyms) {
            dietary.insert(*tag);
        }
    }
    dietary
}

/// Food tokens are checked before fashion tokens and the checks are mutually
/// exclusive: the first vertical that matches claims the message.
fn extract_category(text: &str) -> (Option<Category>, Option<String>) {
    if contains_any(text, FOOD_TOKENS) {
        let sub_category = if contains_any(text, BREAKFAST_TOKENS) {
            Some("breakfast".to_string())
        } else if contains_any(text, SNACK_TOKENS) {
            Some("snacks".to_string())
        } else {
            None
        };
        return (Some(Category::Food), sub_category);
    }

    if contains_any(text, FASHION_TOKENS) {
        let sub_category = if contains_any(text, ETHNIC_TOKENS) {
            Some("ethnic".to_string())
        } else if contains_any(text, CASUAL_WEAR_TOKENS) {
            Some("casual".to_string())
        } else {
            None
        };
        return (Some(Category::Fashion), sub_category);
    }

    (None, None)
}

fn extract_season(text: &str) -> Option<Season> {
    for (season, synonyms) in SEASON_SYNONYMS {
        if contains_any(text, synonyms) {
            return Some(*season);
        }
    }
    None
}

fn extract_occasion(text: &str) -> Option<Occasion> {
    for (occasion, tokens) in OCCASION_TOKENS {
        if contains_any(text, tokens) {
            return Some(*occasion);
        }
    }
    None
}

fn extract_materials(text: &str) -> std::collections::BTreeSet<String> {
    MATERIAL_TOKENS
        .iter()
        .filter(|material| text.contains(*material))
        .map(|material| material.to_string())
        .collect()
}

fn extract_styles(text: &str) -> std::collections::BTreeSet<StyleTag> {
    let mut styles = std::collections::BTreeSet::new();
    for (style, tokens) in STYLE_TOKENS {
        if contains_any(text, tokens) {
            styles.insert(*style);
        }
    }
    styles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::preference::DietaryTag;

    #[test]
    fn price_ceiling_patterns_all_parse() {
        struct Case {
            text: &'static str,
            expect_max: Option<u32>,
        }

        let cases = [
            Case { text: "snacks under ₹500 please", expect_max: Some(500) },
            Case { text: "something less than ₹1200", expect_max: Some(1200) },
            Case { text: "kurtas below ₹999", expect_max: Some(999) },
            Case { text: "keep it within ₹250", expect_max: Some(250) },
            Case { text: "Under ₹300 only", expect_max: Some(300) },
            Case { text: "under 300 rupees", expect_max: None },
            Case { text: "no budget mentioned", expect_max: None },
        ];

        for case in cases {
            let preferences = extract_preferences(case.text);
            match case.expect_max {
                Some(max) => {
                    let range = preferences
                        .price_range
                        .unwrap_or_else(|| panic!("expected price range for {:?}", case.text));
                    assert_eq!(range.min_rupees, 0);
                    assert_eq!(range.max_rupees, max);
                }
                None => assert!(preferences.price_range.is_none(), "case {:?}", case.text),
            }
        }
    }

    #[test]
    fn first_price_phrase_in_table_order_wins() {
        // Both phrases are present; "under ₹" precedes "below ₹" in the table.
        let preferences = extract_preferences("below ₹900 but really under ₹400");
        assert_eq!(preferences.price_range.map(|r| r.max_rupees), Some(400));
    }

    #[test]
    fn dietary_synonyms_map_to_tags() {
        let preferences = extract_preferences("plant based and gluten free snacks");
        assert!(preferences.dietary.contains(&DietaryTag::Vegan));
        assert!(preferences.dietary.contains(&DietaryTag::GlutenFree));
        // "plant based" does not also hit vegetarian.
        assert!(!preferences.dietary.contains(&DietaryTag::Vegetarian));
    }

    #[test]
    fn vegan_also_matches_veg_as_vegetarian_substring() {
        // "vegan" contains "veg", so the vegetarian synonym matches too.
        let preferences = extract_preferences("vegan cookies");
        assert!(preferences.dietary.contains(&DietaryTag::Vegan));
        assert!(preferences.dietary.contains(&DietaryTag::Vegetarian));
    }

    #[test]
    fn category_inference_is_table_driven() {
        struct Case {
            text: &'static str,
            category: Option<Category>,
            sub_category: Option<&'static str>,
        }

        let cases = [
            Case {
                text: "healthy breakfast options",
                category: Some(Category::Food),
                sub_category: Some("breakfast"),
            },
            Case {
                text: "something to munch on",
                category: Some(Category::Food),
                sub_category: Some("snacks"),
            },
            Case { text: "protein bars", category: Some(Category::Food), sub_category: None },
            Case {
                text: "kurta for the festival",
                category: Some(Category::Fashion),
                sub_category: Some("ethnic"),
            },
            Case {
                text: "a plain t-shirt",
                category: Some(Category::Fashion),
                sub_category: Some("casual"),
            },
            Case { text: "something to wear", category: Some(Category::Fashion), sub_category: None },
            Case { text: "hello there", category: None, sub_category: None },
        ];

        for case in cases {
            let preferences = extract_preferences(case.text);
            assert_eq!(preferences.category, case.category, "case {:?}", case.text);
            assert_eq!(
                preferences.sub_category.as_deref(),
                case.sub_category,
                "case {:?}",
                case.text
            );
        }
    }

    #[test]
    fn food_check_precedes_fashion_check() {
        // "snack" (food) and "wear" (fashion) both present; food wins.
        let preferences = extract_preferences("snacks to wear out with");
        assert_eq!(preferences.category, Some(Category::Food));
    }

    #[test]
    fn first_season_in_fixed_order_wins() {
        // "hot" hits summer before "rainy" is ever checked.
        let preferences = extract_preferences("hot and rainy days");
        assert_eq!(preferences.season, Some(Season::Summer));
    }

    #[test]
    fn occasion_fixed_order_casual_first() {
        let preferences = extract_preferences("everyday festive wear");
        assert_eq!(preferences.occasion, Some(Occasion::Casual));

        let preferences = extract_preferences("festival shopping");
        assert_eq!(preferences.occasion, Some(Occasion::Festive));

        let preferences = extract_preferences("formal shirts");
        assert_eq!(preferences.occasion, Some(Occasion::Office));
    }

    #[test]
    fn materials_and_styles_accumulate_independently() {
        let preferences = extract_preferences("light cotton and linen, something modern");
        assert!(preferences.materials.contains("cotton"));
        assert!(preferences.materials.contains("linen"));
        assert!(preferences.styles.contains(&StyleTag::Trendy));
        assert!(preferences.styles.contains(&StyleTag::Light));
    }

    #[test]
    fn unrecognized_message_yields_empty_preferences() {
        let preferences = extract_preferences("hello");
        assert!(preferences.is_empty());
    }

    #[test]
    fn extraction_is_deterministic() {
        let a = extract_preferences("Vegan snacks under ₹300");
        let b = extract_preferences("Vegan snacks under ₹300");
        assert_eq!(a, b);
    }

    #[test]
    fn vegan_snacks_scenario() {
        let preferences = extract_preferences("Vegan snacks under ₹300");
        assert!(preferences.dietary.contains(&DietaryTag::Vegan));
        assert_eq!(preferences.category, Some(Category::Food));
        assert_eq!(preferences.sub_category.as_deref(), Some("snacks"));
        assert_eq!(preferences.price_range.map(|r| r.max_rupees), Some(300));
    }
}
