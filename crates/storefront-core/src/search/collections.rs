//! Landing-page collections: featured, deals and trending.

use crate::catalog::Product;
use crate::config::CatalogConfig;
use serde::Serialize;

/// First `count` products in catalog order.
pub fn featured(products: &[Product], count: usize) -> Vec<&Product> {
    products.iter().take(count).collect()
}

/// Products marked down by more than `min_discount_percent`.
pub fn deals(products: &[Product], min_discount_percent: u8) -> Vec<&Product> {
    products
        .iter()
        .filter(|p| p.discount_percent > min_discount_percent)
        .collect()
}

/// Products rated at least `min_rating`.
pub fn trending(products: &[Product], min_rating: f64) -> Vec<&Product> {
    products.iter().filter(|p| p.rating >= min_rating).collect()
}

/// All three collections, sized by the catalog configuration.
#[derive(Debug, Clone, Serialize)]
pub struct Collections<'a> {
    pub featured: Vec<&'a Product>,
    pub deals: Vec<&'a Product>,
    pub trending: Vec<&'a Product>,
}

impl<'a> Collections<'a> {
    pub fn build(products: &'a [Product], config: &CatalogConfig) -> Self {
        Self {
            featured: featured(products, config.featured_count),
            deals: deals(products, config.deal_discount_percent),
            trending: trending(products, config.trending_min_rating),
        }
    }
}
