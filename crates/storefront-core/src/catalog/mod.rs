//! Product catalog module.
//!
//! Contains the product type, the repository record shape, and the
//! read-only catalog store the query pipeline and cart resolve against.

mod product;
mod store;

pub use product::{derive_discount_percent, parse_created_at, Product, ProductRecord, MAX_RATING};
pub use store::{CatalogStore, ProductLookup, ValueCount};
pub(crate) use store::count_values;
