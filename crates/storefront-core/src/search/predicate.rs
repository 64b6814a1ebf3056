//! Filter predicate engine.
//!
//! A product passes when every dimension passes. Within the rating dimension
//! the thresholds are alternatives: clearing any one of them is enough.

use crate::catalog::Product;
use crate::search::criteria::{fold_case, FilterCriteria};
use serde::{Deserialize, Serialize};

/// One independent axis of filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    Category,
    Brand,
    Price,
    Rating,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Category,
        Dimension::Brand,
        Dimension::Price,
        Dimension::Rating,
    ];

    /// Evaluate this dimension alone.
    pub fn matches(&self, criteria: &FilterCriteria, product: &Product) -> bool {
        match self {
            Dimension::Category => {
                criteria.categories().is_empty()
                    || criteria.categories().contains(&fold_case(&product.category))
            }
            Dimension::Brand => {
                criteria.brands().is_empty()
                    || criteria.brands().contains(&fold_case(&product.brand))
            }
            Dimension::Price => criteria.price_range().contains(product.price.amount_minor),
            Dimension::Rating => {
                criteria.ratings().is_empty()
                    || criteria.ratings().iter().any(|t| product.rating >= *t)
            }
        }
    }
}

/// Build the combined predicate for `criteria`.
pub fn build_predicate(criteria: &FilterCriteria) -> impl Fn(&Product) -> bool + '_ {
    move |product: &Product| matches(criteria, product)
}

/// Whether `product` passes every dimension of `criteria`.
pub fn matches(criteria: &FilterCriteria, product: &Product) -> bool {
    Dimension::ALL.iter().all(|d| d.matches(criteria, product))
}

/// Keep the products that pass, in input order.
pub fn filter<'a>(products: &'a [Product], criteria: &FilterCriteria) -> Vec<&'a Product> {
    let predicate = build_predicate(criteria);
    products.iter().filter(|p| predicate(*p)).collect()
}
