//! Wishlist: an ordered set of saved product ids.

use crate::cart::Cart;
use crate::catalog::{Product, ProductLookup};
use crate::error::{Result, StorefrontError};
use crate::ids::{ProductId, WishlistId};
use serde::{Deserialize, Serialize};

/// Saved products, unique, in the order they were added.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Wishlist {
    pub id: WishlistId,
    product_ids: Vec<ProductId>,
}

impl Wishlist {
    pub fn new() -> Self {
        Self {
            id: WishlistId::generate(),
            product_ids: Vec::new(),
        }
    }

    pub fn product_ids(&self) -> &[ProductId] {
        &self.product_ids
    }

    pub fn len(&self) -> usize {
        self.product_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.product_ids.is_empty()
    }

    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.product_ids.contains(product_id)
    }

    /// Save a product. Unknown or already saved products are ignored.
    pub fn add(&mut self, lookup: &impl ProductLookup, product_id: &ProductId) -> bool {
        if self.contains(product_id) || lookup.find(product_id).is_none() {
            return false;
        }
        self.product_ids.push(product_id.clone());
        true
    }

    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let len_before = self.product_ids.len();
        self.product_ids.retain(|id| id != product_id);
        self.product_ids.len() < len_before
    }

    /// Saved products that still resolve.
    pub fn items<'a>(&self, lookup: &'a impl ProductLookup) -> Vec<&'a Product> {
        self.product_ids
            .iter()
            .filter_map(|id| lookup.find(id))
            .collect()
    }

    /// Drop ids whose product is gone. Returns the removed ids.
    pub fn prune(&mut self, lookup: &impl ProductLookup) -> Vec<ProductId> {
        let (kept, removed): (Vec<_>, Vec<_>) = std::mem::take(&mut self.product_ids)
            .into_iter()
            .partition(|id| lookup.find(id).is_some());
        self.product_ids = kept;
        if !removed.is_empty() {
            tracing::warn!(
                wishlist = %self.id,
                removed = removed.len(),
                "pruned stale wishlist entries"
            );
        }
        removed
    }

    /// Move one unit of a saved product into `cart`.
    ///
    /// Fails with `InvalidProduct` when the product is out of stock; the id
    /// then stays on the wishlist. A product that no longer resolves is
    /// pruned and reported as `ProductNotFound`.
    pub fn move_to_cart(
        &mut self,
        product_id: &ProductId,
        cart: &mut Cart,
        lookup: &impl ProductLookup,
    ) -> Result<()> {
        if !self.contains(product_id) {
            return Err(StorefrontError::ProductNotFound(product_id.to_string()));
        }
        let product = match lookup.get_by_id(product_id) {
            Ok(product) => product,
            Err(e) => {
                if e.is_not_found() {
                    self.remove(product_id);
                }
                return Err(e);
            }
        };
        if !product.in_stock {
            return Err(StorefrontError::InvalidProduct {
                id: product_id.to_string(),
                reason: "out of stock".to_string(),
            });
        }
        cart.add(lookup, product_id, 1);
        self.remove(product_id);
        Ok(())
    }
}

impl Default for Wishlist {
    fn default() -> Self {
        Self::new()
    }
}
