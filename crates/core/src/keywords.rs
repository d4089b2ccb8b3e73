//! Static keyword and synonym tables for the Indian shopping context.
//!
//! Every table is fixed data; the extractor and scorer only ever do
//! case-insensitive substring tests against these phrases.

use crate::domain::preference::{DietaryTag, Season, StyleTag};
use crate::domain::product::Occasion;

/// Natural-language phrases that indicate a dietary tag.
pub const DIETARY_SYNONYMS: &[(DietaryTag, &[&str])] = &[
    (DietaryTag::Vegan, &["vegan", "plant-based", "plant based", "no animal", "pure veg"]),
    (DietaryTag::Vegetarian, &["vegetarian", "veg"]),
    (DietaryTag::Protein, &["protein", "proteins", "protein-rich", "proteinaceous"]),
    (DietaryTag::GlutenFree, &["gluten-free", "gluten free", "no gluten", "without gluten"]),
    (DietaryTag::Organic, &["organic", "natural", "chemical-free", "pure"]),
];

/// Season synonyms, tested in declaration order; the first season with a
/// hit wins.
pub const SEASON_SYNONYMS: &[(Season, &[&str])] = &[
    (Season::Summer, &["summer", "hot", "heat", "warm weather", "grishma"]),
    (Season::Winter, &["winter", "cold", "cool", "shita"]),
    (Season::Monsoon, &["monsoon", "rainy", "rain", "wet", "varsha"]),
];

/// Occasion token sets, tested in declaration order; first match wins.
pub const OCCASION_TOKENS: &[(Occasion, &[&str])] = &[
    (Occasion::Casual, &["casual", "everyday", "daily"]),
    (Occasion::Festive, &["festive", "festival", "celebration", "party"]),
    (Occasion::Office, &["office", "work", "formal"]),
];

/// Tokens that put a message in the food vertical. Checked before fashion;
/// the first vertical that matches wins.
pub const FOOD_TOKENS: &[&str] = &[
    "food", "snack", "breakfast", "eat", "meal", "munch", "diet", "protein", "cookies", "bars",
];

pub const BREAKFAST_TOKENS: &[&str] = &["breakfast", "morning"];
pub const SNACK_TOKENS: &[&str] = &["snack", "munch", "bite"];

pub const FASHION_TOKENS: &[&str] = &[
    "cloth", "wear", "dress", "fashion", "outfit", "kurta", "ethnic", "saree", "shirt", "tee",
    "t-shirt",
];

pub const ETHNIC_TOKENS: &[&str] = &["ethnic", "traditional", "indian", "kurta", "saree"];
pub const CASUAL_WEAR_TOKENS: &[&str] = &["casual", "everyday", "tee", "t-shirt", "shirt"];

pub const MATERIAL_TOKENS: &[&str] = &["cotton", "linen"];

/// Tokens that add a style preference; the sets are independent, any or all
/// may match.
pub const STYLE_TOKENS: &[(StyleTag, &[&str])] = &[
    (StyleTag::Trendy, &["trendy", "stylish", "modern"]),
    (StyleTag::Traditional, &["traditional", "ethnic", "indian"]),
    (StyleTag::Light, &["light", "lightweight", "airy"]),
];

/// Phrases a product tag may contain to satisfy a style preference during
/// scoring. Includes the style token itself.
pub fn style_synonyms(style: StyleTag) -> &'static [&'static str] {
    match style {
        StyleTag::Trendy => &["trendy", "fashionable", "stylish", "modern", "in style"],
        StyleTag::Traditional => &["traditional", "ethnic", "desi"],
        StyleTag::Light => &["light", "lightweight", "airy", "thin"],
    }
}

/// Price-ceiling phrases, tested in declaration order against the whole
/// message; the first phrase that matches supplies the ceiling.
pub const PRICE_CEILING_PHRASES: &[&str] = &["under ₹", "less than ₹", "below ₹", "within ₹"];

pub fn contains_any(haystack: &str, tokens: &[&str]) -> bool {
    tokens.iter().any(|token| haystack.contains(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dietary_table_covers_all_tags_once() {
        let mut seen = std::collections::BTreeSet::new();
        for (tag, synonyms) in DIETARY_SYNONYMS {
            assert!(seen.insert(*tag), "duplicate dietary tag {tag}");
            assert!(!synonyms.is_empty());
        }
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn contains_any_matches_substrings() {
        assert!(contains_any("need gluten free bars", &["gluten free"]));
        assert!(!contains_any("need bars", &["gluten free"]));
    }
}
