use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::product::{Category, Occasion, SeasonTag};

/// Season a shopper asked for. Unlike [`SeasonTag`] this never holds `all`;
/// only products advertise all-season fit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Summer,
    Winter,
    Monsoon,
}

impl Season {
    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Summer => "summer",
            Season::Winter => "winter",
            Season::Monsoon => "monsoon",
        }
    }

    pub fn tag(&self) -> SeasonTag {
        match self {
            Season::Summer => SeasonTag::Summer,
            Season::Winter => SeasonTag::Winter,
            Season::Monsoon => SeasonTag::Monsoon,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "summer" => Some(Season::Summer),
            "winter" => Some(Season::Winter),
            "monsoon" => Some(Season::Monsoon),
            _ => None,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DietaryTag {
    Vegan,
    Vegetarian,
    Protein,
    GlutenFree,
    Organic,
}

impl DietaryTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            DietaryTag::Vegan => "vegan",
            DietaryTag::Vegetarian => "vegetarian",
            DietaryTag::Protein => "protein",
            DietaryTag::GlutenFree => "gluten-free",
            DietaryTag::Organic => "organic",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "vegan" => Some(DietaryTag::Vegan),
            "vegetarian" => Some(DietaryTag::Vegetarian),
            "protein" => Some(DietaryTag::Protein),
            "gluten-free" | "gluten free" => Some(DietaryTag::GlutenFree),
            "organic" => Some(DietaryTag::Organic),
            _ => None,
        }
    }
}

impl fmt::Display for DietaryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleTag {
    Trendy,
    Traditional,
    Light,
}

impl StyleTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            StyleTag::Trendy => "trendy",
            StyleTag::Traditional => "traditional",
            StyleTag::Light => "light",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "trendy" => Some(StyleTag::Trendy),
            "traditional" => Some(StyleTag::Traditional),
            "light" => Some(StyleTag::Light),
            _ => None,
        }
    }
}

/// Inclusive price band in whole rupees.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min_rupees: u32,
    pub max_rupees: u32,
}

impl PriceRange {
    /// Ceiling-only range, the shape every "under ₹N" phrase produces.
    pub fn up_to(max_rupees: u32) -> Self {
        Self { min_rupees: 0, max_rupees }
    }

    pub fn contains(&self, price_rupees: u32) -> bool {
        price_rupees >= self.min_rupees && price_rupees <= self.max_rupees
    }

    /// Same band with the ceiling stretched by the 10% over-budget
    /// tolerance the scorer still awards partial points for.
    pub fn with_tolerance(self) -> Self {
        Self {
            min_rupees: self.min_rupees,
            max_rupees: self.max_rupees.saturating_add(self.max_rupees / 10),
        }
    }
}

/// Structured preferences inferred from one user message. Created fresh per
/// query and never persisted; absent matches leave fields unset or empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreference {
    pub category: Option<Category>,
    pub sub_category: Option<String>,
    pub price_range: Option<PriceRange>,
    pub dietary: BTreeSet<DietaryTag>,
    pub season: Option<Season>,
    pub occasion: Option<Occasion>,
    pub materials: BTreeSet<String>,
    pub styles: BTreeSet<StyleTag>,
}

impl UserPreference {
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.sub_category.is_none()
            && self.price_range.is_none()
            && self.dietary.is_empty()
            && self.season.is_none()
            && self.occasion.is_none()
            && self.materials.is_empty()
            && self.styles.is_empty()
    }

    /// Field-by-field merge: wherever `overlay` carries a value (or a
    /// non-empty set) it replaces this side's value. The AI-analysis result
    /// is the overlay, so its fields win.
    pub fn merged_with(&self, overlay: &UserPreference) -> UserPreference {
        UserPreference {
            category: overlay.category.or(self.category),
            sub_category: overlay.sub_category.clone().or_else(|| self.sub_category.clone()),
            price_range: overlay.price_range.or(self.price_range),
            dietary: if overlay.dietary.is_empty() {
                self.dietary.clone()
            } else {
                overlay.dietary.clone()
            },
            season: overlay.season.or(self.season),
            occasion: overlay.occasion.or(self.occasion),
            materials: if overlay.materials.is_empty() {
                self.materials.clone()
            } else {
                overlay.materials.clone()
            },
            styles: if overlay.styles.is_empty() {
                self.styles.clone()
            } else {
                overlay.styles.clone()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_preference_is_empty() {
        assert!(UserPreference::default().is_empty());
    }

    #[test]
    fn price_range_up_to_starts_at_zero() {
        let range = PriceRange::up_to(500);
        assert_eq!(range.min_rupees, 0);
        assert!(range.contains(0));
        assert!(range.contains(500));
        assert!(!range.contains(501));
    }

    #[test]
    fn tolerance_stretches_the_ceiling_by_ten_percent() {
        let range = PriceRange::up_to(300).with_tolerance();
        assert_eq!(range.max_rupees, 330);
        assert!(range.contains(330));
        assert!(!range.contains(331));
        // The floor is untouched.
        assert_eq!(range.min_rupees, 0);
    }

    #[test]
    fn merge_prefers_overlay_fields() {
        let local = UserPreference {
            category: Some(Category::Food),
            sub_category: Some("snacks".to_string()),
            price_range: Some(PriceRange::up_to(300)),
            dietary: [DietaryTag::Vegan].into_iter().collect(),
            ..UserPreference::default()
        };
        let overlay = UserPreference {
            category: Some(Category::Fashion),
            dietary: [DietaryTag::Protein].into_iter().collect(),
            ..UserPreference::default()
        };

        let merged = local.merged_with(&overlay);
        assert_eq!(merged.category, Some(Category::Fashion));
        // Overlay had no sub-category or price range, so the local ones hold.
        assert_eq!(merged.sub_category.as_deref(), Some("snacks"));
        assert_eq!(merged.price_range, Some(PriceRange::up_to(300)));
        // Non-empty overlay set replaces the local set wholesale.
        assert_eq!(merged.dietary.len(), 1);
        assert!(merged.dietary.contains(&DietaryTag::Protein));
    }

    #[test]
    fn merge_with_empty_overlay_is_identity() {
        let local = UserPreference {
            category: Some(Category::Food),
            season: Some(Season::Summer),
            ..UserPreference::default()
        };
        assert_eq!(local.merged_with(&UserPreference::default()), local);
    }
}
