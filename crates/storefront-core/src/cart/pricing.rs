//! Cart pricing calculations.

use crate::catalog::Product;
use crate::config::PricingConfig;
use crate::error::Result;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Complete pricing breakdown for a cart.
///
/// Always derived from current entries and product data; never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricingBreakdown {
    /// Sum of current price times quantity.
    pub subtotal: Money,
    /// Sum of list price times quantity.
    pub original_total: Money,
    /// `original_total - subtotal`.
    pub total_discount: Money,
    pub shipping_cost: Money,
    /// Tax on the subtotal, rounded to the nearest minor unit.
    pub tax_amount: Money,
    /// `subtotal + shipping_cost + tax_amount`.
    pub grand_total: Money,
    /// Units across all priced lines.
    pub item_count: i64,
    /// Whether the subtotal cleared the free shipping threshold.
    pub free_shipping_applied: bool,
    /// Extra subtotal needed before shipping becomes free; zero once it is.
    pub amount_to_free_shipping: Money,
}

impl PricingBreakdown {
    /// Derive the breakdown from line totals.
    ///
    /// Figures are in the subtotal's currency; the configured threshold and
    /// fee amounts are read in that currency.
    pub fn from_totals(
        subtotal: Money,
        original_total: Money,
        item_count: i64,
        config: &PricingConfig,
    ) -> Result<Self> {
        let currency = subtotal.currency;
        let threshold = config.threshold_in(currency);
        let free_shipping_applied = subtotal.amount_minor > threshold.amount_minor;

        let shipping_cost = if free_shipping_applied {
            Money::zero(currency)
        } else {
            config.shipping_fee_in(currency)
        };
        let amount_to_free_shipping = if free_shipping_applied {
            Money::zero(currency)
        } else {
            // strictly greater, so one more minor unit than the gap
            threshold.try_subtract(&subtotal)?.try_add(&Money::new(1, currency))?
        };
        let tax_amount = subtotal.apply_rate(config.tax_rate);
        let grand_total = subtotal.try_add(&shipping_cost)?.try_add(&tax_amount)?;

        Ok(Self {
            subtotal,
            original_total,
            total_discount: original_total.try_subtract(&subtotal)?,
            shipping_cost,
            tax_amount,
            grand_total,
            item_count,
            free_shipping_applied,
            amount_to_free_shipping,
        })
    }

    /// Breakdown of an empty cart.
    pub fn empty(config: &PricingConfig) -> Result<Self> {
        let zero = Money::zero(config.currency);
        Self::from_totals(zero, zero, 0, config)
    }

    /// Check if any line is marked down.
    pub fn has_savings(&self) -> bool {
        self.total_discount.is_positive()
    }

    /// Savings as a percentage of the original total.
    pub fn savings_percentage(&self) -> f64 {
        if self.original_total.amount_minor == 0 {
            return 0.0;
        }
        (self.total_discount.amount_minor as f64 / self.original_total.amount_minor as f64) * 100.0
    }
}

/// A cart entry resolved against current product data.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CartLine<'a> {
    pub product: &'a Product,
    pub quantity: i64,
    /// Price times quantity.
    pub line_total: Money,
    /// List price times quantity.
    pub line_original_total: Money,
    pub line_savings: Money,
}

impl<'a> CartLine<'a> {
    pub fn new(product: &'a Product, quantity: i64) -> Result<Self> {
        let line_total = product.price.try_multiply(quantity)?;
        let line_original_total = product.original_price.try_multiply(quantity)?;
        Ok(Self {
            product,
            quantity,
            line_total,
            line_original_total,
            line_savings: line_original_total.try_subtract(&line_total)?,
        })
    }
}
