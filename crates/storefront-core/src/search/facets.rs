//! Facet counts for the filter sidebar.

use crate::catalog::{count_values, Product};
use crate::search::criteria::{fold_case, FilterCriteria, RATING_THRESHOLDS};
use serde::{Deserialize, Serialize};

/// Type of facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FacetType {
    /// Discrete values (categories, brands).
    Terms,
    /// "At least" thresholds (ratings).
    Threshold,
}

/// A facet for filtering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Facet {
    /// Facet name (e.g., "Category").
    pub name: String,
    /// Field this facet filters on.
    pub field: String,
    pub facet_type: FacetType,
    pub values: Vec<FacetValue>,
}

impl Facet {
    fn new(name: &str, field: &str, facet_type: FacetType) -> Self {
        Self {
            name: name.to_string(),
            field: field.to_string(),
            facet_type,
            values: Vec::new(),
        }
    }

    /// Add a value to the facet.
    pub fn add_value(&mut self, value: impl Into<String>, count: usize, selected: bool) {
        self.values.push(FacetValue {
            value: value.into(),
            count,
            selected,
        });
    }

    /// Values currently selected in the criteria.
    pub fn selected(&self) -> impl Iterator<Item = &FacetValue> {
        self.values.iter().filter(|v| v.selected)
    }
}

/// A single facet value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FacetValue {
    pub value: String,
    /// Number of products with this value.
    pub count: usize,
    /// Whether currently selected.
    pub selected: bool,
}

/// Category, brand and rating facets over `products`.
///
/// Counts are taken over whatever slice is passed in; callers choose between
/// the whole catalog and the current result set.
pub fn facets<P>(products: &[P], criteria: &FilterCriteria) -> Vec<Facet>
where
    P: std::borrow::Borrow<Product>,
{
    let mut category = Facet::new("Category", "category", FacetType::Terms);
    for vc in count_values(products.iter().map(|p| p.borrow().category.as_str())) {
        let selected = criteria.categories().contains(&fold_case(&vc.value));
        category.add_value(vc.value, vc.count, selected);
    }

    let mut brand = Facet::new("Brand", "brand", FacetType::Terms);
    for vc in count_values(products.iter().map(|p| p.borrow().brand.as_str())) {
        let selected = criteria.brands().contains(&fold_case(&vc.value));
        brand.add_value(vc.value, vc.count, selected);
    }

    let mut rating = Facet::new("Customer Rating", "rating", FacetType::Threshold);
    for threshold in RATING_THRESHOLDS {
        let count = products
            .iter()
            .filter(|p| p.borrow().rating >= threshold)
            .count();
        let selected = criteria.ratings().contains(&threshold);
        rating.add_value(format!("{}", threshold), count, selected);
    }

    vec![category, brand, rating]
}
