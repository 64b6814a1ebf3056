//! Storefront configuration.
//!
//! Monetary amounts are in minor currency units. Pricing reads them in the
//! currency of the products being priced.

use crate::error::{Result, StorefrontError};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StorefrontConfig {
    /// Cart pricing rules.
    #[serde(default)]
    pub pricing: PricingConfig,

    /// Catalog presentation settings.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl StorefrontConfig {
    /// Load config from a file. Files ending in `.json` are parsed as JSON,
    /// everything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| StorefrontError::Io(format!("{}: {}", path.display(), e)))?;

        let config: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .map_err(|e| StorefrontError::Config(format!("{}: {}", path.display(), e)))?
        } else {
            toml::from_str(&content)
                .map_err(|e| StorefrontError::Config(format!("{}: {}", path.display(), e)))?
        };
        config.validate()?;
        Ok(config)
    }

    /// Save config to a file, in the format its extension selects.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        self.pricing.validate()?;
        self.catalog.validate()
    }

    /// A commented default configuration file.
    pub fn default_toml() -> String {
        let pricing = PricingConfig::default();
        let catalog = CatalogConfig::default();
        format!(
            r#"# Storefront configuration
# Amounts are in minor units of the currency (paise for INR).

[pricing]
currency = "{currency}"
# Shipping is free when the subtotal is strictly above this amount.
free_shipping_threshold = {threshold}
flat_shipping_fee = {fee}
tax_rate = {tax}

[catalog]
featured_count = {featured}
# Deals are products discounted by more than this percentage.
deal_discount_percent = {deal}
trending_min_rating = {trending}
page_size = {page_size}
"#,
            currency = pricing.currency.code(),
            threshold = pricing.free_shipping_threshold,
            fee = pricing.flat_shipping_fee,
            tax = pricing.tax_rate,
            featured = catalog.featured_count,
            deal = catalog.deal_discount_percent,
            trending = catalog.trending_min_rating,
            page_size = catalog.page_size,
        )
    }
}

/// Shipping and tax rules applied by the cart ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricingConfig {
    /// Currency catalogs are loaded in, and the one an empty cart is priced in.
    #[serde(default)]
    pub currency: Currency,

    /// Subtotal above which shipping is free.
    #[serde(default = "default_free_shipping_threshold")]
    pub free_shipping_threshold: i64,

    /// Shipping charged at or below the threshold.
    #[serde(default = "default_flat_shipping_fee")]
    pub flat_shipping_fee: i64,

    /// Tax as a fraction of the subtotal (0.18 is 18%).
    #[serde(default = "default_tax_rate")]
    pub tax_rate: f64,
}

fn default_free_shipping_threshold() -> i64 {
    50_000
}

fn default_flat_shipping_fee() -> i64 {
    5_000
}

fn default_tax_rate() -> f64 {
    0.18
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            free_shipping_threshold: default_free_shipping_threshold(),
            flat_shipping_fee: default_flat_shipping_fee(),
            tax_rate: default_tax_rate(),
        }
    }
}

impl PricingConfig {
    pub fn threshold(&self) -> Money {
        self.threshold_in(self.currency)
    }

    pub fn shipping_fee(&self) -> Money {
        self.shipping_fee_in(self.currency)
    }

    /// The threshold amount read in `currency`.
    pub fn threshold_in(&self, currency: Currency) -> Money {
        Money::new(self.free_shipping_threshold, currency)
    }

    /// The flat fee amount read in `currency`.
    pub fn shipping_fee_in(&self, currency: Currency) -> Money {
        Money::new(self.flat_shipping_fee, currency)
    }

    pub fn validate(&self) -> Result<()> {
        if self.free_shipping_threshold < 0 {
            return Err(StorefrontError::Config(format!(
                "free_shipping_threshold must not be negative, got {}",
                self.free_shipping_threshold
            )));
        }
        if self.flat_shipping_fee < 0 {
            return Err(StorefrontError::Config(format!(
                "flat_shipping_fee must not be negative, got {}",
                self.flat_shipping_fee
            )));
        }
        if !(0.0..=1.0).contains(&self.tax_rate) {
            return Err(StorefrontError::Config(format!(
                "tax_rate must be within 0.0-1.0, got {}",
                self.tax_rate
            )));
        }
        Ok(())
    }
}

/// Settings for collections and paging.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    /// Products shown in the featured strip.
    #[serde(default = "default_featured_count")]
    pub featured_count: usize,

    #[serde(default = "default_deal_discount_percent")]
    pub deal_discount_percent: u8,

    #[serde(default = "default_trending_min_rating")]
    pub trending_min_rating: f64,

    /// Products per result page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_featured_count() -> usize {
    4
}

fn default_deal_discount_percent() -> u8 {
    20
}

fn default_trending_min_rating() -> f64 {
    4.5
}

fn default_page_size() -> usize {
    24
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            featured_count: default_featured_count(),
            deal_discount_percent: default_deal_discount_percent(),
            trending_min_rating: default_trending_min_rating(),
            page_size: default_page_size(),
        }
    }
}

impl CatalogConfig {
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(StorefrontError::Config("page_size must be at least 1".into()));
        }
        if self.deal_discount_percent > 100 {
            return Err(StorefrontError::Config(format!(
                "deal_discount_percent must be at most 100, got {}",
                self.deal_discount_percent
            )));
        }
        if !(0.0..=crate::catalog::MAX_RATING).contains(&self.trending_min_rating) {
            return Err(StorefrontError::Config(format!(
                "trending_min_rating must be within 0.0-5.0, got {}",
                self.trending_min_rating
            )));
        }
        Ok(())
    }
}
