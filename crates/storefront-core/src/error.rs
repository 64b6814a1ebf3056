//! Storefront error types.

use thiserror::Error;

/// Errors that can occur in catalog, query, and cart operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StorefrontError {
    /// No product with this id exists in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A product with this id was loaded twice.
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(String),

    /// Product data violates a catalog invariant.
    #[error("Invalid product {id}: {reason}")]
    InvalidProduct { id: String, reason: String },

    /// Price range lower bound exceeds the upper bound.
    #[error("Invalid price range: min {min} exceeds max {max}")]
    InvalidRange { min: i64, max: i64 },

    /// Price range bound below zero.
    #[error("Price bound must not be negative: {0}")]
    NegativeBound(i64),

    /// Rating threshold outside 0.0-5.0.
    #[error("Rating threshold out of range: {0}")]
    InvalidRating(f64),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Sort key not recognized.
    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O error while reading catalog or configuration files.
    #[error("I/O error: {0}")]
    Io(String),
}

/// Result alias for storefront operations.
pub type Result<T> = std::result::Result<T, StorefrontError>;

impl From<serde_json::Error> for StorefrontError {
    fn from(e: serde_json::Error) -> Self {
        StorefrontError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for StorefrontError {
    fn from(e: toml::de::Error) -> Self {
        StorefrontError::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for StorefrontError {
    fn from(e: toml::ser::Error) -> Self {
        StorefrontError::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for StorefrontError {
    fn from(e: std::io::Error) -> Self {
        StorefrontError::Io(e.to_string())
    }
}

impl StorefrontError {
    /// Whether this error means a referenced product is gone.
    ///
    /// Cart and wishlist treat these as stale entries and prune them.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorefrontError::ProductNotFound(_))
    }
}
