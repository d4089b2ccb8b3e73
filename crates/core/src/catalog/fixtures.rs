//! Built-in demo catalog: a small set of Indian D2C food and fashion
//! products. Deterministic order; the popularity fallback serves the first
//! entries, so the list leads with broadly appealing items.

use std::collections::BTreeSet;

use crate::domain::product::{
    FashionAttributes, FoodAttributes, Occasion, Product, ProductDetails, ProductId, SeasonTag,
};

pub fn demo_products() -> Vec<Product> {
    vec![
        food(
            "food-millet-cookies",
            "Millet & Jaggery Cookies",
            249,
            "snacks",
            "Crunchy ragi cookies sweetened with jaggery, baked in small batches",
            &["organic", "baked", "millet"],
            FoodAttributes {
                is_vegan: true,
                is_gluten_free: true,
                protein_grams: Some(6),
                dietary_info: strings(&["vegan", "gluten-free"]),
            },
        ),
        fashion(
            "fashion-cotton-kurta",
            "Jaipuri Cotton Kurta",
            899,
            "ethnic",
            "Hand-block printed cotton kurta from Jaipur",
            &["ethnic", "handblock", "cotton"],
            FashionAttributes {
                material: Some("cotton".to_string()),
                seasons: seasons(&[SeasonTag::Summer, SeasonTag::All]),
                occasions: occasions(&[Occasion::Casual, Occasion::Festive]),
            },
        ),
        food(
            "food-peri-peri-makhana",
            "Peri Peri Makhana",
            199,
            "snacks",
            "Roasted fox nuts tossed in peri peri masala",
            &["roasted", "makhana"],
            FoodAttributes {
                is_vegan: true,
                is_gluten_free: true,
                protein_grams: Some(9),
                dietary_info: strings(&["vegan", "gluten-free"]),
            },
        ),
        fashion(
            "fashion-everyday-tee",
            "Everyday Cotton Tee",
            399,
            "casual",
            "Soft combed-cotton t-shirt for daily wear",
            &["cotton", "trendy", "tee"],
            FashionAttributes {
                material: Some("cotton".to_string()),
                seasons: seasons(&[SeasonTag::All]),
                occasions: occasions(&[Occasion::Casual]),
            },
        ),
        food(
            "food-protein-bar",
            "Peanut Cocoa Protein Bars",
            299,
            "snacks",
            "Whey protein bars with roasted peanuts and dark cocoa",
            &["protein", "gym"],
            FoodAttributes {
                is_vegan: false,
                is_gluten_free: true,
                protein_grams: Some(20),
                dietary_info: strings(&["gluten-free", "high-protein"]),
            },
        ),
        food(
            "food-masala-oats",
            "Masala Oats",
            149,
            "breakfast",
            "Five-minute savoury oats with Indian spices and vegetables",
            &["breakfast", "quick"],
            FoodAttributes {
                is_vegan: true,
                is_gluten_free: false,
                protein_grams: Some(11),
                dietary_info: strings(&["vegan"]),
            },
        ),
        fashion(
            "fashion-linen-shirt",
            "Linen Summer Shirt",
            1299,
            "casual",
            "Breathable full-sleeve linen shirt in sage green",
            &["linen", "breathable", "trendy"],
            FashionAttributes {
                material: Some("linen".to_string()),
                seasons: seasons(&[SeasonTag::Summer]),
                occasions: occasions(&[Occasion::Casual, Occasion::Office]),
            },
        ),
        food(
            "food-almond-granola",
            "Almond Crunch Granola",
            349,
            "breakfast",
            "Baked oat granola with almonds and wild honey",
            &["breakfast", "baked"],
            FoodAttributes {
                is_vegan: false,
                is_gluten_free: false,
                protein_grams: Some(12),
                dietary_info: strings(&["high-protein"]),
            },
        ),
        fashion(
            "fashion-banarasi-saree",
            "Banarasi Silk Saree",
            2999,
            "ethnic",
            "Handloom Banarasi saree with zari border",
            &["ethnic", "traditional", "silk"],
            FashionAttributes {
                material: Some("silk".to_string()),
                seasons: seasons(&[SeasonTag::All]),
                occasions: occasions(&[Occasion::Festive]),
            },
        ),
        food(
            "food-dry-fruit-mix",
            "Premium Dry Fruit Mix",
            499,
            "snacks",
            "Almonds, cashews, raisins, and figs with no added sugar",
            &["organic", "natural"],
            FoodAttributes {
                is_vegan: true,
                is_gluten_free: true,
                protein_grams: Some(8),
                dietary_info: strings(&["vegan", "gluten-free"]),
            },
        ),
        fashion(
            "fashion-monsoon-windcheater",
            "Monsoon Windcheater",
            1499,
            "casual",
            "Packable water-resistant windcheater for rainy commutes",
            &["rainwear", "lightweight"],
            FashionAttributes {
                material: Some("polyester".to_string()),
                seasons: seasons(&[SeasonTag::Monsoon]),
                occasions: occasions(&[Occasion::Casual]),
            },
        ),
        fashion(
            "fashion-wool-stole",
            "Kashmiri Wool Stole",
            1199,
            "ethnic",
            "Hand-embroidered wool stole from Srinagar",
            &["traditional", "winter"],
            FashionAttributes {
                material: Some("wool".to_string()),
                seasons: seasons(&[SeasonTag::Winter]),
                occasions: occasions(&[Occasion::Festive, Occasion::Office]),
            },
        ),
    ]
}

fn food(
    id: &str,
    name: &str,
    price_rupees: u32,
    sub_category: &str,
    description: &str,
    tags: &[&str],
    attrs: FoodAttributes,
) -> Product {
    Product {
        id: ProductId(id.to_string()),
        name: name.to_string(),
        price_rupees,
        sub_category: sub_category.to_string(),
        description: description.to_string(),
        image: format!("{id}.jpg"),
        tags: strings(tags),
        details: ProductDetails::Food(attrs),
    }
}

fn fashion(
    id: &str,
    name: &str,
    price_rupees: u32,
    sub_category: &str,
    description: &str,
    tags: &[&str],
    attrs: FashionAttributes,
) -> Product {
    Product {
        id: ProductId(id.to_string()),
        name: name.to_string(),
        price_rupees,
        sub_category: sub_category.to_string(),
        description: description.to_string(),
        image: format!("{id}.jpg"),
        tags: strings(tags),
        details: ProductDetails::Fashion(attrs),
    }
}

fn strings(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn seasons(values: &[SeasonTag]) -> BTreeSet<SeasonTag> {
    values.iter().copied().collect()
}

fn occasions(values: &[Occasion]) -> BTreeSet<Occasion> {
    values.iter().copied().collect()
}
