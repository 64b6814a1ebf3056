//! Sort strategy.

use crate::catalog::Product;
use crate::error::StorefrontError;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Sort options for query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Catalog order.
    #[default]
    Featured,
    /// Sort by price, low to high.
    PriceAsc,
    /// Sort by price, high to low.
    PriceDesc,
    /// Sort by highest rated.
    RatingDesc,
    /// Sort by newest first.
    Newest,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Featured,
        SortKey::PriceAsc,
        SortKey::PriceDesc,
        SortKey::RatingDesc,
        SortKey::Newest,
    ];

    /// The canonical key string (e.g. `price-asc`).
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Featured => "featured",
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
            SortKey::RatingDesc => "rating-desc",
            SortKey::Newest => "newest",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortKey::Featured => "Featured",
            SortKey::PriceAsc => "Price: Low to High",
            SortKey::PriceDesc => "Price: High to Low",
            SortKey::RatingDesc => "Highest Rated",
            SortKey::Newest => "Newest",
        }
    }

    /// Compare two products under this key, tie-breaks included.
    ///
    /// `Featured` treats every pair as equal so a stable sort keeps input order.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortKey::Featured => Ordering::Equal,
            SortKey::PriceAsc => a
                .price
                .amount_minor
                .cmp(&b.price.amount_minor)
                .then_with(|| id_key(a).cmp(&id_key(b))),
            SortKey::PriceDesc => b
                .price
                .amount_minor
                .cmp(&a.price.amount_minor)
                .then_with(|| id_key(a).cmp(&id_key(b))),
            SortKey::RatingDesc => b
                .rating
                .total_cmp(&a.rating)
                .then_with(|| b.review_count.cmp(&a.review_count)),
            SortKey::Newest => match (a.created_at, b.created_at) {
                (Some(x), Some(y)) => y.cmp(&x),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
            .then_with(|| id_key(b).cmp(&id_key(a))),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = StorefrontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "featured" | "" => Ok(SortKey::Featured),
            "price-asc" | "price-low" => Ok(SortKey::PriceAsc),
            "price-desc" | "price-high" => Ok(SortKey::PriceDesc),
            "rating-desc" | "rating" => Ok(SortKey::RatingDesc),
            "newest" => Ok(SortKey::Newest),
            other => Err(StorefrontError::UnknownSortKey(other.to_string())),
        }
    }
}

/// Id ordering used for tie-breaks.
///
/// Numeric ids compare numerically and sort before non-numeric ids, which
/// compare lexically. This keeps the order total for mixed catalogs.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum IdKey<'a> {
    Num(u64, &'a str),
    Text(&'a str),
}

fn id_key(product: &Product) -> IdKey<'_> {
    match product.id.numeric() {
        Some(n) => IdKey::Num(n, product.id.as_str()),
        None => IdKey::Text(product.id.as_str()),
    }
}

/// Return a sorted copy of `products`; the input is left untouched.
///
/// The sort is stable, so sorting an already sorted sequence by the same key
/// returns it unchanged.
pub fn sort<P>(products: &[P], key: SortKey) -> Vec<P>
where
    P: Borrow<Product> + Clone,
{
    let mut sorted = products.to_vec();
    if key != SortKey::Featured {
        sorted.sort_by(|a, b| key.compare(a.borrow(), b.borrow()));
    }
    sorted
}
