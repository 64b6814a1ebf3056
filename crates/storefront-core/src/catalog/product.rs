//! Product types and the external record shape they are loaded from.

use crate::error::{Result, StorefrontError};
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Highest rating a product can carry.
pub const MAX_RATING: f64 = 5.0;

/// A product in the catalog.
///
/// Products are immutable once loaded into a [`CatalogStore`](super::CatalogStore).
/// `discount_percent` is always the value derived from `price` and
/// `original_price`; [`Product::validate`] rejects anything else.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique, stable product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Current selling price.
    pub price: Money,
    /// List price before markdown (never below `price`).
    pub original_price: Money,
    /// Markdown as a whole percentage of `original_price`.
    pub discount_percent: u8,
    /// Brand name.
    pub brand: String,
    /// Category name or id.
    pub category: String,
    /// Average rating, 0.0 to 5.0.
    pub rating: f64,
    /// Number of reviews behind `rating`.
    pub review_count: u32,
    /// Whether the product can be bought right now.
    pub in_stock: bool,
    /// Units on hand.
    pub stock_count: u32,
    /// Eligible for expedited delivery.
    pub fast_delivery: bool,
    /// When the product was listed.
    pub created_at: Option<DateTime<Utc>>,
    /// Primary image URL as returned by the asset store.
    pub image_url: Option<String>,
}

impl Product {
    /// Create an in-stock product with no markdown.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            original_price: price,
            discount_percent: 0,
            brand: String::new(),
            category: String::new(),
            rating: 0.0,
            review_count: 0,
            in_stock: true,
            stock_count: 0,
            fast_delivery: false,
            created_at: None,
            image_url: None,
        }
    }

    /// Set the list price and re-derive the discount.
    pub fn with_original_price(mut self, original_price: Money) -> Self {
        self.original_price = original_price;
        self.discount_percent = derive_discount_percent(
            self.price.amount_minor,
            self.original_price.amount_minor,
        );
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_rating(mut self, rating: f64, review_count: u32) -> Self {
        self.rating = rating;
        self.review_count = review_count;
        self
    }

    /// Set units on hand; stock status follows the count.
    pub fn with_stock(mut self, stock_count: u32) -> Self {
        self.stock_count = stock_count;
        self.in_stock = stock_count > 0;
        self
    }

    pub fn with_fast_delivery(mut self, fast_delivery: bool) -> Self {
        self.fast_delivery = fast_delivery;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Check the catalog invariants for this product.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| StorefrontError::InvalidProduct {
            id: self.id.to_string(),
            reason: reason.to_string(),
        };

        if self.id.as_str().trim().is_empty() {
            return Err(invalid("id is empty"));
        }
        if self.name.trim().is_empty() {
            return Err(invalid("name is empty"));
        }
        if self.price.currency != self.original_price.currency {
            return Err(StorefrontError::CurrencyMismatch {
                expected: self.price.currency.code().to_string(),
                got: self.original_price.currency.code().to_string(),
            });
        }
        if self.price.is_negative() {
            return Err(invalid("price is negative"));
        }
        if self.original_price.amount_minor < self.price.amount_minor {
            return Err(invalid("original price is below price"));
        }
        if !(0.0..=MAX_RATING).contains(&self.rating) {
            return Err(invalid("rating outside 0.0-5.0"));
        }
        let derived = derive_discount_percent(
            self.price.amount_minor,
            self.original_price.amount_minor,
        );
        if self.discount_percent != derived {
            return Err(invalid(&format!(
                "discount {}% disagrees with derived {}%",
                self.discount_percent, derived
            )));
        }
        Ok(())
    }

    /// Check if the product is marked down.
    pub fn is_on_sale(&self) -> bool {
        self.original_price.amount_minor > self.price.amount_minor
    }

    /// Amount saved per unit against the list price.
    pub fn savings(&self) -> Money {
        Money::new(
            self.original_price.amount_minor - self.price.amount_minor,
            self.price.currency,
        )
    }
}

/// Derive the whole-percent markdown, rounding halves up.
///
/// A zero list price has no markdown.
pub fn derive_discount_percent(price: i64, original_price: i64) -> u8 {
    if original_price <= 0 || price >= original_price {
        return 0;
    }
    let saved = (original_price - price) as i128;
    let original = original_price as i128;
    let percent = (saved * 200 + original) / (original * 2);
    percent.clamp(0, 100) as u8
}

/// A product as served by the product repository.
///
/// Amounts are integers in minor currency units. `discount` is optional; when
/// present it must agree with the value derived from the two prices.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub price: i64,
    #[serde(default)]
    pub original_price: Option<i64>,
    #[serde(default)]
    pub discount: Option<i64>,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub reviews: i64,
    #[serde(default)]
    pub in_stock: Option<bool>,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub fast_delivery: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl ProductRecord {
    /// Convert into a validated [`Product`] priced in `currency`.
    pub fn into_product(self, currency: Currency) -> Result<Product> {
        let invalid = |reason: String| StorefrontError::InvalidProduct {
            id: self.id.clone(),
            reason,
        };

        let original_price = self.original_price.unwrap_or(self.price);
        let review_count = u32::try_from(self.reviews)
            .map_err(|_| invalid(format!("review count {} out of range", self.reviews)))?;
        let stock_count = u32::try_from(self.stock)
            .map_err(|_| invalid(format!("stock {} out of range", self.stock)))?;
        let derived = derive_discount_percent(self.price, original_price);
        if let Some(discount) = self.discount {
            if discount != i64::from(derived) {
                return Err(invalid(format!(
                    "discount {}% disagrees with derived {}%",
                    discount, derived
                )));
            }
        }
        let created_at = match self.created_at.as_deref() {
            Some(raw) => Some(
                parse_created_at(raw)
                    .ok_or_else(|| invalid(format!("unparseable createdAt '{}'", raw)))?,
            ),
            None => None,
        };

        let product = Product {
            id: ProductId::new(self.id.clone()),
            name: self.name.clone(),
            price: Money::new(self.price, currency),
            original_price: Money::new(original_price, currency),
            discount_percent: derived,
            brand: self.brand.clone(),
            category: self.category.clone(),
            rating: self.rating,
            review_count,
            in_stock: self.in_stock.unwrap_or(stock_count > 0),
            stock_count,
            fast_delivery: self.fast_delivery,
            created_at,
            image_url: self.image.clone(),
        };
        product.validate()?;
        Ok(product)
    }
}

/// Parse an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC).
pub fn parse_created_at(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
