//! Filter criteria value objects.
//!
//! Criteria are immutable. Every filter change produces a new value through
//! [`FilterCriteria::with_update`] or the builder; a rejected change leaves
//! the caller holding its previous criteria.

use crate::catalog::MAX_RATING;
use crate::error::{Result, StorefrontError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Rating thresholds offered by the filter sidebar, highest first.
pub const RATING_THRESHOLDS: [f64; 4] = [4.0, 3.0, 2.0, 1.0];

/// Inclusive price bounds in minor currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriceRange {
    min: i64,
    max: i64,
}

impl PriceRange {
    /// Create a range, rejecting negative bounds and `min > max`.
    pub fn new(min: i64, max: i64) -> Result<Self> {
        if min < 0 {
            return Err(StorefrontError::NegativeBound(min));
        }
        if max < 0 {
            return Err(StorefrontError::NegativeBound(max));
        }
        if min > max {
            return Err(StorefrontError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// The range that admits every valid price.
    pub const fn full() -> Self {
        Self { min: 0, max: i64::MAX }
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn is_full(&self) -> bool {
        *self == Self::full()
    }

    /// Both ends inclusive.
    pub fn contains(&self, amount_minor: i64) -> bool {
        amount_minor >= self.min && amount_minor <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::full()
    }
}

/// The four independent filter dimensions.
///
/// Categories and brands are stored case-folded; ratings are sorted and
/// deduplicated so equal selections compare equal.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "CriteriaInput", into = "CriteriaInput")]
pub struct FilterCriteria {
    categories: BTreeSet<String>,
    brands: BTreeSet<String>,
    price_range: PriceRange,
    ratings: Vec<f64>,
}

impl FilterCriteria {
    /// Criteria that constrain nothing; what a "clear filters" action yields.
    pub fn cleared() -> Self {
        Self::default()
    }

    pub fn builder() -> FilterCriteriaBuilder {
        FilterCriteriaBuilder::default()
    }

    pub fn categories(&self) -> &BTreeSet<String> {
        &self.categories
    }

    pub fn brands(&self) -> &BTreeSet<String> {
        &self.brands
    }

    pub fn price_range(&self) -> PriceRange {
        self.price_range
    }

    pub fn ratings(&self) -> &[f64] {
        &self.ratings
    }

    /// True when no dimension constrains the result.
    pub fn is_cleared(&self) -> bool {
        self.categories.is_empty()
            && self.brands.is_empty()
            && self.ratings.is_empty()
            && self.price_range.is_full()
    }

    /// Produce new criteria with one dimension replaced.
    ///
    /// `self` is never modified; on error the caller keeps using it.
    pub fn with_update(&self, update: CriteriaUpdate) -> Result<FilterCriteria> {
        let mut next = self.clone();
        match update {
            CriteriaUpdate::Categories(values) => next.categories = fold_all(values),
            CriteriaUpdate::Brands(values) => next.brands = fold_all(values),
            CriteriaUpdate::PriceRange { min, max } => {
                next.price_range = PriceRange::new(min, max).inspect_err(|e| {
                    tracing::warn!(error = %e, "price range rejected, keeping previous criteria");
                })?;
            }
            CriteriaUpdate::Ratings(values) => next.ratings = normalize_ratings(values)?,
            CriteriaUpdate::Clear => next = FilterCriteria::cleared(),
        }
        Ok(next)
    }
}

/// A single change coming from the filter controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CriteriaUpdate {
    Categories(Vec<String>),
    Brands(Vec<String>),
    PriceRange { min: i64, max: i64 },
    Ratings(Vec<f64>),
    Clear,
}

/// Incremental construction of [`FilterCriteria`]; validated on `build`.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteriaBuilder {
    categories: Vec<String>,
    brands: Vec<String>,
    price_range: Option<(i64, i64)>,
    ratings: Vec<f64>,
}

impl FilterCriteriaBuilder {
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.categories.push(category.into());
        self
    }

    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brands.push(brand.into());
        self
    }

    pub fn price_range(mut self, min: i64, max: i64) -> Self {
        self.price_range = Some((min, max));
        self
    }

    pub fn min_rating(mut self, threshold: f64) -> Self {
        self.ratings.push(threshold);
        self
    }

    pub fn build(self) -> Result<FilterCriteria> {
        let price_range = match self.price_range {
            Some((min, max)) => PriceRange::new(min, max)?,
            None => PriceRange::full(),
        };
        Ok(FilterCriteria {
            categories: fold_all(self.categories),
            brands: fold_all(self.brands),
            price_range,
            ratings: normalize_ratings(self.ratings)?,
        })
    }
}

/// Serialized shape of [`FilterCriteria`]; deserialization re-validates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CriteriaInput {
    pub categories: Vec<String>,
    pub brands: Vec<String>,
    pub price_range: Option<[i64; 2]>,
    pub ratings: Vec<f64>,
}

impl TryFrom<CriteriaInput> for FilterCriteria {
    type Error = StorefrontError;

    fn try_from(input: CriteriaInput) -> Result<Self> {
        let mut builder = FilterCriteriaBuilder {
            categories: input.categories,
            brands: input.brands,
            price_range: None,
            ratings: input.ratings,
        };
        if let Some([min, max]) = input.price_range {
            builder = builder.price_range(min, max);
        }
        builder.build()
    }
}

impl From<FilterCriteria> for CriteriaInput {
    fn from(criteria: FilterCriteria) -> Self {
        let range = criteria.price_range;
        Self {
            categories: criteria.categories.into_iter().collect(),
            brands: criteria.brands.into_iter().collect(),
            price_range: (!range.is_full()).then(|| [range.min, range.max]),
            ratings: criteria.ratings,
        }
    }
}

/// Case-fold a category or brand for comparison.
pub fn fold_case(value: &str) -> String {
    value.trim().to_lowercase()
}

fn fold_all(values: Vec<String>) -> BTreeSet<String> {
    values
        .iter()
        .map(|v| fold_case(v))
        .filter(|v| !v.is_empty())
        .collect()
}

fn normalize_ratings(mut values: Vec<f64>) -> Result<Vec<f64>> {
    if let Some(bad) = values
        .iter()
        .copied()
        .find(|r| !(0.0..=MAX_RATING).contains(r))
    {
        return Err(StorefrontError::InvalidRating(bad));
    }
    values.sort_by(f64::total_cmp);
    values.dedup();
    Ok(values)
}
