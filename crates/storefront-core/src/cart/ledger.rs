//! Cart ledger: an ordered set of (product, quantity) entries.
//!
//! Entries hold product ids only. Prices are read from the catalog each time
//! pricing is derived, so a price change shows up on the next computation.

use crate::cart::{CartLine, PricingBreakdown};
use crate::catalog::ProductLookup;
use crate::config::PricingConfig;
use crate::error::{Result, StorefrontError};
use crate::ids::{CartId, ProductId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per entry.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// One product in the cart. `quantity` is always at least 1.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartEntry {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// A shopping cart.
///
/// Deserialization goes through [`CartInput`], which restores the entry
/// rules: quantities at least 1 and at most [`MAX_QUANTITY_PER_ITEM`], one
/// entry per product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "CartInput")]
pub struct Cart {
    /// Unique cart identifier.
    pub id: CartId,
    entries: Vec<CartEntry>,
}

impl Cart {
    pub fn new() -> Self {
        Self::with_id(CartId::generate())
    }

    pub fn with_id(id: CartId) -> Self {
        Self {
            id,
            entries: Vec::new(),
        }
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn quantity_of(&self, product_id: &ProductId) -> Option<i64> {
        self.position(product_id).map(|i| self.entries[i].quantity)
    }

    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.position(product_id).is_some()
    }

    /// Add `quantity` units of a product.
    ///
    /// An existing entry is incremented, otherwise a new entry is appended.
    /// Products that do not resolve and non-positive quantities are ignored.
    /// Quantities saturate at [`MAX_QUANTITY_PER_ITEM`]. Returns whether the
    /// cart changed.
    pub fn add(
        &mut self,
        lookup: &impl ProductLookup,
        product_id: &ProductId,
        quantity: i64,
    ) -> bool {
        if quantity <= 0 {
            return false;
        }
        if lookup.find(product_id).is_none() {
            tracing::debug!(product = %product_id, "add ignored, product not in catalog");
            return false;
        }

        match self.position(product_id) {
            Some(i) => {
                let entry = &mut self.entries[i];
                let capped = entry
                    .quantity
                    .saturating_add(quantity)
                    .min(MAX_QUANTITY_PER_ITEM);
                let changed = capped != entry.quantity;
                entry.quantity = capped;
                changed
            }
            None => {
                self.entries.push(CartEntry {
                    product_id: product_id.clone(),
                    quantity: quantity.min(MAX_QUANTITY_PER_ITEM),
                });
                true
            }
        }
    }

    /// Set an entry's quantity exactly.
    ///
    /// A quantity of zero or less removes the entry. Setting a product that
    /// is not in the cart does nothing.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) -> Result<()> {
        if quantity <= 0 {
            self.remove(product_id);
            return Ok(());
        }
        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(StorefrontError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }
        if let Some(i) = self.position(product_id) {
            self.entries[i].quantity = quantity;
        }
        Ok(())
    }

    /// Remove an entry. Returns whether one was removed.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let len_before = self.entries.len();
        self.entries.retain(|e| &e.product_id != product_id);
        self.entries.len() < len_before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Total units (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.entries.iter().map(|e| e.quantity).sum()
    }

    /// Number of distinct products.
    pub fn line_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve entries against the catalog, skipping ones that no longer
    /// resolve.
    pub fn lines<'a>(&self, lookup: &'a impl ProductLookup) -> Result<Vec<CartLine<'a>>> {
        self.entries
            .iter()
            .filter_map(|e| lookup.find(&e.product_id).map(|p| (p, e.quantity)))
            .map(|(product, quantity)| CartLine::new(product, quantity))
            .collect()
    }

    /// Drop entries whose product is gone. Returns the removed ids.
    pub fn prune(&mut self, lookup: &impl ProductLookup) -> Vec<ProductId> {
        let mut removed = Vec::new();
        self.entries.retain(|e| {
            let keep = lookup.find(&e.product_id).is_some();
            if !keep {
                removed.push(e.product_id.clone());
            }
            keep
        });
        if !removed.is_empty() {
            tracing::warn!(
                cart = %self.id,
                removed = removed.len(),
                "pruned stale cart entries"
            );
        }
        removed
    }

    /// Derive the pricing breakdown from current entries and product data.
    ///
    /// Entries that no longer resolve are left out without touching the
    /// cart; call [`Cart::prune`] to drop them for good.
    /// Pricing is in the currency of the resolved products. An empty cart is
    /// priced in `config.currency`.
    pub fn compute_pricing(
        &self,
        lookup: &impl ProductLookup,
        config: &PricingConfig,
    ) -> Result<PricingBreakdown> {
        let lines = self.lines(lookup)?;
        let currency = lines
            .first()
            .map_or(config.currency, |l| l.line_total.currency);
        let subtotal = Money::try_sum(lines.iter().map(|l| &l.line_total), currency)?;
        let original_total =
            Money::try_sum(lines.iter().map(|l| &l.line_original_total), currency)?;
        let item_count = lines.iter().map(|l| l.quantity).sum();
        if lines.len() < self.entries.len() {
            tracing::debug!(
                cart = %self.id,
                skipped = self.entries.len() - lines.len(),
                "stale entries left out of pricing"
            );
        }
        PricingBreakdown::from_totals(subtotal, original_total, item_count, config)
    }

    fn position(&self, product_id: &ProductId) -> Option<usize> {
        self.entries.iter().position(|e| &e.product_id == product_id)
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialized shape of [`Cart`] as read from storage.
#[derive(Debug, Clone, Deserialize)]
pub struct CartInput {
    pub id: CartId,
    #[serde(default)]
    pub entries: Vec<CartEntry>,
}

impl From<CartInput> for Cart {
    /// Drops non-positive quantities and merges repeated ids, keeping the
    /// first position and saturating at the cap.
    fn from(input: CartInput) -> Self {
        let mut cart = Cart::with_id(input.id);
        let mut dropped = 0usize;
        for entry in input.entries {
            if entry.quantity <= 0 {
                dropped += 1;
                continue;
            }
            match cart.position(&entry.product_id) {
                Some(i) => {
                    let existing = &mut cart.entries[i];
                    existing.quantity = existing
                        .quantity
                        .saturating_add(entry.quantity)
                        .min(MAX_QUANTITY_PER_ITEM);
                }
                None => cart.entries.push(CartEntry {
                    product_id: entry.product_id,
                    quantity: entry.quantity.min(MAX_QUANTITY_PER_ITEM),
                }),
            }
        }
        if dropped > 0 {
            tracing::warn!(cart = %cart.id, dropped, "dropped non-positive cart entries");
        }
        cart
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogStore, Product};
    use crate::money::Currency;

    fn inr(amount: i64) -> Money {
        Money::new(amount, Currency::INR)
    }

    fn catalog() -> CatalogStore {
        CatalogStore::new(vec![
            Product::new("1", "Headphones", inr(100)).with_original_price(inr(120)),
            Product::new("2", "Cable", inr(50)),
        ])
        .unwrap()
    }

    fn id(s: &str) -> ProductId {
        ProductId::new(s)
    }

    #[test]
    fn test_add_and_increment() {
        let catalog = catalog();
        let mut cart = Cart::new();
        assert!(cart.add(&catalog, &id("1"), 1));
        assert!(cart.add(&catalog, &id("1"), 2));
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.quantity_of(&id("1")), Some(3));
    }

    #[test]
    fn test_add_unknown_product_is_noop() {
        let catalog = catalog();
        let mut cart = Cart::new();
        assert!(!cart.add(&catalog, &id("404"), 1));
        assert!(!cart.add(&catalog, &id("1"), 0));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_saturates_at_limit() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add(&catalog, &id("1"), MAX_QUANTITY_PER_ITEM - 1);
        cart.add(&catalog, &id("1"), 5);
        assert_eq!(cart.quantity_of(&id("1")), Some(MAX_QUANTITY_PER_ITEM));
        assert!(!cart.add(&catalog, &id("1"), 1));
    }

    #[test]
    fn test_set_quantity() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add(&catalog, &id("1"), 1);
        cart.set_quantity(&id("1"), 5).unwrap();
        assert_eq!(cart.item_count(), 5);

        let err = cart.set_quantity(&id("1"), MAX_QUANTITY_PER_ITEM + 1).unwrap_err();
        assert_eq!(
            err,
            StorefrontError::QuantityExceedsLimit(MAX_QUANTITY_PER_ITEM + 1, MAX_QUANTITY_PER_ITEM)
        );
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add(&catalog, &id("1"), 2);
        cart.add(&catalog, &id("2"), 1);
        cart.set_quantity(&id("1"), 0).unwrap();
        assert!(!cart.contains(&id("1")));
        cart.set_quantity(&id("2"), -3).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add(&catalog, &id("1"), 1);
        assert!(cart.remove(&id("1")));
        assert!(!cart.remove(&id("1")));
    }

    #[test]
    fn test_pricing() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add(&catalog, &id("1"), 2);
        cart.add(&catalog, &id("2"), 1);

        let pricing = cart.compute_pricing(&catalog, &PricingConfig::default()).unwrap();
        assert_eq!(pricing.subtotal, inr(250));
        assert_eq!(pricing.original_total, inr(290));
        assert_eq!(pricing.total_discount, inr(40));
        assert_eq!(pricing.item_count, 3);
    }

    #[test]
    fn test_stale_entries_skipped_then_pruned() {
        let full = catalog();
        let mut cart = Cart::new();
        cart.add(&full, &id("1"), 1);
        cart.add(&full, &id("2"), 1);

        let reduced = CatalogStore::new(vec![Product::new("2", "Cable", inr(50))]).unwrap();
        let pricing = cart.compute_pricing(&reduced, &PricingConfig::default()).unwrap();
        assert_eq!(pricing.subtotal, inr(50));
        assert_eq!(cart.line_count(), 2);

        assert_eq!(cart.prune(&reduced), vec![id("1")]);
        assert_eq!(cart.line_count(), 1);
        assert!(cart.prune(&reduced).is_empty());
    }

    #[test]
    fn test_lines() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add(&catalog, &id("2"), 3);
        cart.add(&catalog, &id("1"), 1);
        let lines = cart.lines(&catalog).unwrap();
        assert_eq!(lines[0].product.id, id("2"));
        assert_eq!(lines[0].line_total, inr(150));
        assert_eq!(lines[1].line_savings, inr(20));
    }

    #[test]
    fn test_clear() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add(&catalog, &id("1"), 1);
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_deserialize_restores_entry_rules() {
        let json = r#"{"id":"c","entries":[
            {"product_id":"1","quantity":-5},
            {"product_id":"2","quantity":1},
            {"product_id":"1","quantity":2},
            {"product_id":"2","quantity":3},
            {"product_id":"3","quantity":0}
        ]}"#;
        let cart: Cart = serde_json::from_str(json).unwrap();
        assert_eq!(cart.id.as_str(), "c");
        assert_eq!(
            cart.entries(),
            &[
                CartEntry { product_id: id("2"), quantity: 4 },
                CartEntry { product_id: id("1"), quantity: 2 },
            ]
        );

        let pricing = cart.compute_pricing(&catalog(), &PricingConfig::default()).unwrap();
        assert_eq!(pricing.subtotal, inr(400));
        assert_eq!(pricing.item_count, 6);
    }

    #[test]
    fn test_deserialize_caps_merged_quantity() {
        let json = serde_json::json!({
            "id": "c",
            "entries": [
                { "product_id": "1", "quantity": MAX_QUANTITY_PER_ITEM },
                { "product_id": "1", "quantity": 9 }
            ]
        });
        let cart: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(cart.quantity_of(&id("1")), Some(MAX_QUANTITY_PER_ITEM));
    }

    #[test]
    fn test_serialized_cart_reads_back() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add(&catalog, &id("1"), 2);
        cart.add(&catalog, &id("2"), 1);
        let json = serde_json::to_string(&cart).unwrap();
        assert_eq!(serde_json::from_str::<Cart>(&json).unwrap(), cart);
    }

    #[test]
    fn test_pricing_uses_catalog_currency() {
        let usd = |amount| Money::new(amount, Currency::USD);
        let catalog = CatalogStore::new(vec![Product::new("1", "Mug", usd(1_200))]).unwrap();
        let mut cart = Cart::new();
        cart.add(&catalog, &id("1"), 2);

        let pricing = cart.compute_pricing(&catalog, &PricingConfig::default()).unwrap();
        assert_eq!(pricing.subtotal, usd(2_400));
        assert_eq!(pricing.shipping_cost, usd(5_000));
        assert_eq!(pricing.grand_total.currency, Currency::USD);
    }
}
