//! Storefront catalog engine.
//!
//! Filters, sorts and prices a product collection, and keeps a shopping cart
//! whose totals are always derived from current product data.
//!
//! - **Catalog**: products, the in-memory store, the [`ProductLookup`] seam
//! - **Search**: filter criteria, predicates, sort keys, the query pipeline
//! - **Cart**: the cart ledger and its pricing breakdown
//! - **Wishlist**: saved products that can move into the cart
//!
//! # Example
//!
//! ```rust
//! use storefront_core::prelude::*;
//!
//! let catalog = CatalogStore::new(vec![
//!     Product::new("1", "Headphones", Money::new(100, Currency::INR))
//!         .with_original_price(Money::new(120, Currency::INR))
//!         .with_category("Electronics"),
//!     Product::new("2", "Cable", Money::new(50, Currency::INR)).with_category("Electronics"),
//! ])?;
//!
//! let criteria = FilterCriteria::builder().category("electronics").build()?;
//! let results = query(catalog.get_all(), None, &criteria, SortKey::PriceAsc);
//! assert_eq!(results[0].id.as_str(), "2");
//!
//! let mut cart = Cart::new();
//! cart.add(&catalog, &ProductId::new("1"), 2);
//! cart.add(&catalog, &ProductId::new("2"), 1);
//! let pricing = cart.compute_pricing(&catalog, &PricingConfig::default())?;
//! assert_eq!(pricing.subtotal.amount_minor, 250);
//! assert_eq!(pricing.total_discount.amount_minor, 40);
//! # Ok::<(), StorefrontError>(())
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod config;
pub mod search;
pub mod wishlist;

pub use catalog::ProductLookup;
pub use error::{Result, StorefrontError};
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::StorefrontError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    pub use crate::config::{CatalogConfig, PricingConfig, StorefrontConfig};

    // Catalog
    pub use crate::catalog::{CatalogStore, Product, ProductLookup, ProductRecord};

    // Search
    pub use crate::search::{
        build_predicate, query, sort, CriteriaUpdate, FilterCriteria, PriceRange, ProductQuery,
        QueryResult, SortKey,
    };

    // Cart
    pub use crate::cart::{Cart, CartLine, PricingBreakdown, SharedCart};
    pub use crate::wishlist::Wishlist;
}
