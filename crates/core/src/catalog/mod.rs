//! In-memory product catalog with keyword filtering.
//!
//! The catalog is loaded once at startup from fixture data and is read-only
//! thereafter. Filtering never fails: an unmatchable query simply narrows
//! the candidate set, and the recommendation pipeline has its own fallback
//! for an empty result.

mod fixtures;

pub use fixtures::demo_products;

use serde::{Deserialize, Serialize};

use crate::domain::preference::{PriceRange, UserPreference};
use crate::domain::product::{Category, Product, ProductId};

/// Explicit filters applied on top of free-text matching. Sub-category and
/// softer preferences travel in the query string instead.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogFilter {
    pub category: Option<Category>,
    pub price_range: Option<PriceRange>,
}

#[derive(Clone, Debug)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The built-in demo catalog of Indian D2C food and fashion products.
    pub fn demo() -> Self {
        Self::new(demo_products())
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == id)
    }

    /// Keyword filter: a product matches when any whitespace-split query
    /// term is a substring of its searchable text, and the explicit
    /// category/price filters pass. An empty query skips term matching.
    pub fn filter(&self, query: &str, filter: &CatalogFilter) -> Vec<&Product> {
        let terms: Vec<String> =
            query.split_whitespace().map(|term| term.to_lowercase()).collect();

        let matches = self
            .products
            .iter()
            .filter(|product| {
                if !terms.is_empty() {
                    let haystack = product.searchable_text();
                    if !terms.iter().any(|term| haystack.contains(term)) {
                        return false;
                    }
                }
                if let Some(category) = filter.category {
                    if product.category() != category {
                        return false;
                    }
                }
                if let Some(range) = filter.price_range {
                    if !range.contains(product.price_rupees) {
                        return false;
                    }
                }
                true
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            query,
            candidates = matches.len(),
            total = self.products.len(),
            "filtered catalog"
        );
        matches
    }
}

/// Fold the softer preference fields into a free-text catalog query.
pub fn search_query_from(preferences: &UserPreference) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(category) = preferences.category {
        parts.push(category.as_str().to_string());
    }
    if let Some(sub_category) = &preferences.sub_category {
        parts.push(sub_category.clone());
    }
    for tag in &preferences.dietary {
        parts.push(tag.as_str().to_string());
    }
    for material in &preferences.materials {
        parts.push(material.clone());
    }
    if let Some(occasion) = preferences.occasion {
        parts.push(occasion.as_str().to_string());
    }
    if let Some(season) = preferences.season {
        parts.push(season.as_str().to_string());
    }

    parts.join(" ")
}

/// Lift the hard constraints out of the preferences. The price ceiling is
/// stretched by the scorer's 10% tolerance so near-budget products stay in
/// the candidate set and earn their partial price points.
pub fn filter_from(preferences: &UserPreference) -> CatalogFilter {
    CatalogFilter {
        category: preferences.category,
        price_range: preferences.price_range.map(PriceRange::with_tolerance),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::preference::DietaryTag;

    #[test]
    fn demo_catalog_is_non_empty_and_ids_are_unique() {
        let catalog = Catalog::demo();
        assert!(catalog.len() >= 10);

        let mut ids = std::collections::BTreeSet::new();
        for product in catalog.products() {
            assert!(ids.insert(product.id.clone()), "duplicate id {}", product.id);
            assert!(product.price_rupees > 0, "{} has a zero price", product.id);
        }
    }

    #[test]
    fn lookup_by_id() {
        let catalog = Catalog::demo();
        let first = &catalog.products()[0];
        assert_eq!(catalog.get(&first.id), Some(first));
        assert!(catalog.get(&ProductId("no-such-product".to_string())).is_none());
    }

    #[test]
    fn empty_query_and_filter_return_everything() {
        let catalog = Catalog::demo();
        assert_eq!(catalog.filter("", &CatalogFilter::default()).len(), catalog.len());
    }

    #[test]
    fn any_term_match_is_enough() {
        let catalog = Catalog::demo();
        // "zzz" matches nothing but "food" matches every food product.
        let results = catalog.filter("zzz food", &CatalogFilter::default());
        assert!(!results.is_empty());
        assert!(results.iter().all(|product| product.category() == Category::Food));
    }

    #[test]
    fn category_and_price_filters_are_conjunctive() {
        let catalog = Catalog::demo();
        let filter = CatalogFilter {
            category: Some(Category::Fashion),
            price_range: Some(PriceRange::up_to(800)),
        };
        for product in catalog.filter("", &filter) {
            assert_eq!(product.category(), Category::Fashion);
            assert!(product.price_rupees <= 800);
        }
    }

    #[test]
    fn unmatchable_query_yields_empty_not_error() {
        let catalog = Catalog::demo();
        assert!(catalog.filter("qwxyzzy", &CatalogFilter::default()).is_empty());
    }

    #[test]
    fn query_builder_folds_soft_preferences() {
        let preferences = UserPreference {
            category: Some(Category::Food),
            sub_category: Some("snacks".to_string()),
            dietary: [DietaryTag::Vegan].into_iter().collect(),
            ..UserPreference::default()
        };
        assert_eq!(search_query_from(&preferences), "food snacks vegan");

        let filter = filter_from(&preferences);
        assert_eq!(filter.category, Some(Category::Food));
        assert!(filter.price_range.is_none());
    }

    #[test]
    fn price_filter_admits_the_tolerance_band() {
        let preferences = UserPreference {
            price_range: Some(PriceRange::up_to(240)),
            ..UserPreference::default()
        };
        let filter = filter_from(&preferences);
        assert_eq!(filter.price_range, Some(PriceRange::up_to(264)));

        // The ₹249 cookies survive the hard filter on a ₹240 ceiling.
        let catalog = Catalog::demo();
        let ids: Vec<_> =
            catalog.filter("", &filter).iter().map(|product| product.id.0.clone()).collect();
        assert!(ids.contains(&"food-millet-cookies".to_string()));
    }
}
