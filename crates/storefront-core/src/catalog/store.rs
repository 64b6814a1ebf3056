//! In-memory catalog store.

use crate::catalog::{Product, ProductRecord};
use crate::error::{Result, StorefrontError};
use crate::ids::ProductId;
use crate::money::Currency;
use crate::search::fold_case;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Read access to products by id.
///
/// Cart and wishlist resolve their entries through this trait so they can be
/// priced against any product source, not only a [`CatalogStore`].
pub trait ProductLookup {
    /// Resolve a product, or fail with [`StorefrontError::ProductNotFound`].
    fn get_by_id(&self, id: &ProductId) -> Result<&Product>;

    /// Resolve a product, treating a miss as absence.
    fn find(&self, id: &ProductId) -> Option<&Product> {
        self.get_by_id(id).ok()
    }
}

/// A distinct category or brand value with the number of products carrying it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

/// The immutable product set for one session or request.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl CatalogStore {
    /// Build a store from validated products, preserving their order.
    ///
    /// Fails on an invalid product, a repeated id, or products priced in
    /// more than one currency.
    pub fn new(products: Vec<Product>) -> Result<Self> {
        let mut index = HashMap::with_capacity(products.len());
        let currency = products.first().map(|p| p.price.currency);
        for (position, product) in products.iter().enumerate() {
            product.validate()?;
            if let Some(expected) = currency.filter(|c| *c != product.price.currency) {
                return Err(StorefrontError::CurrencyMismatch {
                    expected: expected.code().to_string(),
                    got: product.price.currency.code().to_string(),
                });
            }
            if index.insert(product.id.clone(), position).is_some() {
                return Err(StorefrontError::DuplicateProduct(product.id.to_string()));
            }
        }
        tracing::info!(products = products.len(), "catalog loaded");
        Ok(Self { products, index })
    }

    /// Build a store from repository records.
    pub fn from_records(records: Vec<ProductRecord>, currency: Currency) -> Result<Self> {
        let products = records
            .into_iter()
            .map(|record| record.into_product(currency))
            .collect::<Result<Vec<_>>>()?;
        Self::new(products)
    }

    /// Parse a JSON array of repository records.
    pub fn from_json(json: &str, currency: Currency) -> Result<Self> {
        let records: Vec<ProductRecord> = serde_json::from_str(json)?;
        Self::from_records(records, currency)
    }

    /// All products in catalog order.
    pub fn get_all(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Currency every product is priced in; `None` for an empty store.
    pub fn currency(&self) -> Option<Currency> {
        self.products.first().map(|p| p.price.currency)
    }

    /// Products in a category, compared the way filter criteria compare.
    pub fn by_category<'a>(&'a self, category: &str) -> impl Iterator<Item = &'a Product> + 'a {
        let key = fold_case(category);
        self.products
            .iter()
            .filter(move |p| fold_case(&p.category) == key)
    }

    /// Products of a brand, compared the way filter criteria compare.
    pub fn by_brand<'a>(&'a self, brand: &str) -> impl Iterator<Item = &'a Product> + 'a {
        let key = fold_case(brand);
        self.products
            .iter()
            .filter(move |p| fold_case(&p.brand) == key)
    }

    /// Distinct categories with product counts, in first-seen order.
    pub fn categories(&self) -> Vec<ValueCount> {
        count_values(self.products.iter().map(|p| p.category.as_str()))
    }

    /// Distinct brands with product counts, in first-seen order.
    pub fn brands(&self) -> Vec<ValueCount> {
        count_values(self.products.iter().map(|p| p.brand.as_str()))
    }
}

impl ProductLookup for CatalogStore {
    fn get_by_id(&self, id: &ProductId) -> Result<&Product> {
        self.index
            .get(id)
            .map(|&position| &self.products[position])
            .ok_or_else(|| StorefrontError::ProductNotFound(id.to_string()))
    }
}

/// Count values case-insensitively, keeping the first spelling seen.
pub(crate) fn count_values<'a>(values: impl Iterator<Item = &'a str>) -> Vec<ValueCount> {
    let mut counts: Vec<ValueCount> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for value in values {
        let key = fold_case(value);
        if key.is_empty() {
            continue;
        }
        match positions.get(&key) {
            Some(&i) => counts[i].count += 1,
            None => {
                positions.insert(key, counts.len());
                counts.push(ValueCount {
                    value: value.to_string(),
                    count: 1,
                });
            }
        }
    }
    counts
}
