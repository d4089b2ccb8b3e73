use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductId(pub String);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Top-level catalog category. The catalog carries exactly two verticals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Food,
    Fashion,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Fashion => "fashion",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "food" => Some(Category::Food),
            "fashion" => Some(Category::Fashion),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Season tag carried by a fashion product. `All` marks all-season garments
/// and earns a reduced season score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeasonTag {
    Summer,
    Winter,
    Monsoon,
    All,
}

impl SeasonTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeasonTag::Summer => "summer",
            SeasonTag::Winter => "winter",
            SeasonTag::Monsoon => "monsoon",
            SeasonTag::All => "all",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occasion {
    Casual,
    Festive,
    Office,
}

impl Occasion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Occasion::Casual => "casual",
            Occasion::Festive => "festive",
            Occasion::Office => "office",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "casual" => Some(Occasion::Casual),
            "festive" => Some(Occasion::Festive),
            "office" => Some(Occasion::Office),
            _ => None,
        }
    }
}

impl fmt::Display for Occasion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodAttributes {
    pub is_vegan: bool,
    pub is_gluten_free: bool,
    /// Protein per serving, whole grams.
    pub protein_grams: Option<u32>,
    pub dietary_info: BTreeSet<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FashionAttributes {
    pub material: Option<String>,
    pub seasons: BTreeSet<SeasonTag>,
    pub occasions: BTreeSet<Occasion>,
}

/// Category-specific attributes. Making this an enum keeps food fields off
/// fashion products and vice versa.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum ProductDetails {
    Food(FoodAttributes),
    Fashion(FashionAttributes),
}

/// Immutable catalog entry, loaded once at startup and never mutated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Smallest currency unit is one rupee.
    pub price_rupees: u32,
    pub sub_category: String,
    pub description: String,
    pub image: String,
    pub tags: BTreeSet<String>,
    pub details: ProductDetails,
}

impl Product {
    pub fn category(&self) -> Category {
        match self.details {
            ProductDetails::Food(_) => Category::Food,
            ProductDetails::Fashion(_) => Category::Fashion,
        }
    }

    pub fn food(&self) -> Option<&FoodAttributes> {
        match &self.details {
            ProductDetails::Food(attrs) => Some(attrs),
            ProductDetails::Fashion(_) => None,
        }
    }

    pub fn fashion(&self) -> Option<&FashionAttributes> {
        match &self.details {
            ProductDetails::Fashion(attrs) => Some(attrs),
            ProductDetails::Food(_) => None,
        }
    }

    /// Lower-cased haystack used by keyword filtering: name, description,
    /// category, sub-category, and tags.
    pub fn searchable_text(&self) -> String {
        let mut text = format!(
            "{} {} {} {}",
            self.name,
            self.description,
            self.category(),
            self.sub_category
        );
        for tag in &self.tags {
            text.push(' ');
            text.push_str(tag);
        }
        text.to_lowercase()
    }
}
