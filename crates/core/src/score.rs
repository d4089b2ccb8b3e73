//! Weighted-factor match scoring and reason generation.
//!
//! Every applicable factor contributes `possible` points and may earn up to
//! that many; the final percentage is `earned / possible`, clamped to the
//! 50–99 band shown to shoppers. A product with no applicable factor scores
//! exactly 50, the neutral baseline.

use serde::{Deserialize, Serialize};

use crate::domain::preference::{DietaryTag, Season, UserPreference};
use crate::domain::product::{Category, Occasion, Product, SeasonTag};
use crate::keywords::style_synonyms;

/// Neutral percentage: no factor applied, or the popularity fallback.
pub const NEUTRAL_PERCENTAGE: u8 = 50;
/// Scored percentages never leave this band. The floor avoids discouraging
/// sub-50 numbers in the UI; the ceiling avoids a boastful 100.
pub const MIN_DISPLAY_PERCENTAGE: u8 = 50;
pub const MAX_DISPLAY_PERCENTAGE: u8 = 99;

const PRICE_POINTS: u32 = 30;
const PRICE_POINTS_NEAR: u32 = 15;
const CATEGORY_POINTS: u32 = 25;
const SUB_CATEGORY_POINTS: u32 = 15;
const DIETARY_POINTS: u32 = 10;
const VEGETARIAN_VIA_VEGAN_POINTS: u32 = 8;
const PROTEIN_PARTIAL_POINTS: u32 = 5;
const SEASON_POINTS: u32 = 15;
const SEASON_ALL_POINTS: u32 = 10;
const OCCASION_POINTS: u32 = 15;
const MATERIAL_POINTS: u32 = 10;
const STYLE_POINTS: u32 = 5;

/// Result of scoring one product against one preference set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchScore {
    pub percentage: u8,
    pub reason: String,
}

/// A catalog product stamped with its match score for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredProduct {
    pub product: Product,
    pub match_percentage: u8,
    pub match_reason: String,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct MatchScorer;

impl MatchScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, product: &Product, preferences: &UserPreference) -> MatchScore {
        let (earned, possible) = self.accumulate_points(product, preferences);
        let percentage = if possible == 0 {
            NEUTRAL_PERCENTAGE
        } else {
            let raw = ((earned as f64 / possible as f64) * 100.0).round() as u32;
            (raw as u8).clamp(MIN_DISPLAY_PERCENTAGE, MAX_DISPLAY_PERCENTAGE)
        };

        MatchScore { percentage, reason: self.reason(product, preferences) }
    }

    pub fn score_product(&self, product: &Product, preferences: &UserPreference) -> ScoredProduct {
        let score = self.score(product, preferences);
        ScoredProduct {
            product: product.clone(),
            match_percentage: score.percentage,
            match_reason: score.reason,
        }
    }

    fn accumulate_points(&self, product: &Product, preferences: &UserPreference) -> (u32, u32) {
        let mut earned = 0;
        let mut possible = 0;

        if let Some(range) = preferences.price_range {
            possible += PRICE_POINTS;
            if product.price_rupees <= range.max_rupees {
                earned += PRICE_POINTS;
            } else if within_tolerance(product.price_rupees, range.max_rupees) {
                earned += PRICE_POINTS_NEAR;
            }
        }

        if let Some(category) = preferences.category {
            possible += CATEGORY_POINTS;
            if product.category() == category {
                earned += CATEGORY_POINTS;
            }
        }

        // Sub-category only counts once the category itself lines up.
        if let (Some(sub_category), Some(category)) =
            (&preferences.sub_category, preferences.category)
        {
            if product.category() == category {
                possible += SUB_CATEGORY_POINTS;
                if product.sub_category.eq_ignore_ascii_case(sub_category) {
                    earned += SUB_CATEGORY_POINTS;
                }
            }
        }

        if let Some(food) = product.food() {
            for tag in &preferences.dietary {
                possible += DIETARY_POINTS;
                earned += match tag {
                    DietaryTag::Vegan if food.is_vegan => DIETARY_POINTS,
                    // Vegan implies vegetarian, at a slight discount.
                    DietaryTag::Vegetarian if food.is_vegan => VEGETARIAN_VIA_VEGAN_POINTS,
                    DietaryTag::GlutenFree if food.is_gluten_free => DIETARY_POINTS,
                    DietaryTag::Protein => match food.protein_grams {
                        Some(grams) if grams > 10 => DIETARY_POINTS,
                        Some(grams) if grams > 5 => PROTEIN_PARTIAL_POINTS,
                        _ => 0,
                    },
                    DietaryTag::Organic if product.tags.contains("organic") => DIETARY_POINTS,
                    _ => 0,
                };
            }
        }

        if let Some(fashion) = product.fashion() {
            if let Some(season) = preferences.season {
                possible += SEASON_POINTS;
                if fashion.seasons.contains(&season.tag()) {
                    earned += SEASON_POINTS;
                } else if fashion.seasons.contains(&SeasonTag::All) {
                    earned += SEASON_ALL_POINTS;
                }
            }

            if let Some(occasion) = preferences.occasion {
                possible += OCCASION_POINTS;
                if fashion.occasions.contains(&occasion) {
                    earned += OCCASION_POINTS;
                }
            }

            if !preferences.materials.is_empty() {
                if let Some(material) = &fashion.material {
                    possible += MATERIAL_POINTS;
                    if preferences.materials.contains(material) {
                        earned += MATERIAL_POINTS;
                    }
                }
            }

            for style in &preferences.styles {
                possible += STYLE_POINTS;
                let matched = product.tags.iter().any(|tag| {
                    tag.contains(style.as_str())
                        || style_synonyms(*style).iter().any(|synonym| tag.contains(synonym))
                });
                if matched {
                    earned += STYLE_POINTS;
                }
            }
        }

        (earned, possible)
    }

    /// Build the human-readable justification from the same factor checks.
    fn reason(&self, product: &Product, preferences: &UserPreference) -> String {
        let mut clauses = Vec::new();

        if let Some(range) = preferences.price_range {
            if product.price_rupees <= range.max_rupees {
                clauses.push(format!("fits your budget at ₹{}", product.price_rupees));
            }
        }

        if let Some(food) = product.food() {
            if preferences.dietary.contains(&DietaryTag::Vegan) && food.is_vegan {
                clauses.push("perfect for your vegan diet".to_string());
            }
            if preferences.dietary.contains(&DietaryTag::GlutenFree) && food.is_gluten_free {
                clauses.push("suitable for gluten-free needs".to_string());
            }
            if preferences.dietary.contains(&DietaryTag::Protein) {
                if let Some(grams) = food.protein_grams {
                    clauses.push(format!("provides {grams}g of protein per serving"));
                }
            }
            if preferences.dietary.contains(&DietaryTag::Organic)
                && product.tags.contains("organic")
            {
                clauses.push("made with organic ingredients".to_string());
            }
        }

        if let Some(fashion) = product.fashion() {
            let summer = preferences.season == Some(Season::Summer);
            match fashion.material.as_deref() {
                Some("cotton") if preferences.materials.contains("cotton") || summer => {
                    clauses.push("made with breathable cotton".to_string());
                }
                Some("linen") if preferences.materials.contains("linen") || summer => {
                    clauses.push("crafted from cool linen fabric".to_string());
                }
                _ => {}
            }

            if let Some(season) = preferences.season {
                if fashion.seasons.contains(&season.tag()) {
                    clauses.push(
                        match season {
                            Season::Summer => "perfect for hot summer days",
                            Season::Winter => "ideal for cold winter weather",
                            Season::Monsoon => "suitable for rainy monsoon season",
                        }
                        .to_string(),
                    );
                }
            }

            if let Some(occasion) = preferences.occasion {
                if fashion.occasions.contains(&occasion) {
                    clauses.push(
                        match occasion {
                            Occasion::Festive => "designed for festive occasions",
                            Occasion::Casual => "perfect for casual everyday wear",
                            Occasion::Office => "suitable for office and formal settings",
                        }
                        .to_string(),
                    );
                }
            }
        }

        join_clauses(&clauses).unwrap_or_else(|| generic_reason(product))
    }
}

/// Join clauses into one grammatical sentence: first clause capitalized,
/// two clauses joined with "and", three or more with an Oxford comma.
/// Returns `None` when there is nothing to say.
pub fn join_clauses(clauses: &[String]) -> Option<String> {
    let (first, rest) = clauses.split_first()?;
    let mut sentence = capitalize(first);
    match rest {
        [] => {}
        [only] => {
            sentence.push_str(" and ");
            sentence.push_str(only);
        }
        [middle @ .., last] => {
            for clause in middle {
                sentence.push_str(", ");
                sentence.push_str(clause);
            }
            sentence.push_str(", and ");
            sentence.push_str(last);
        }
    }
    sentence.push('.');
    Some(sentence)
}

fn generic_reason(product: &Product) -> String {
    match product.category() {
        Category::Food => "This premium food item aligns with your preferences.".to_string(),
        Category::Fashion => format!(
            "This stylish {} item matches your fashion preferences.",
            product.sub_category
        ),
    }
}

fn capitalize(clause: &str) -> String {
    let mut chars = clause.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Price within the 10% over-budget tolerance band.
fn within_tolerance(price_rupees: u32, max_rupees: u32) -> bool {
    u64::from(price_rupees) * 10 <= u64::from(max_rupees) * 11
}
