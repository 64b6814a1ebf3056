//! Shopping cart module.
//!
//! Contains the cart ledger, derived pricing, and a thread-safe handle.

mod ledger;
mod pricing;
mod shared;

pub use ledger::{Cart, CartEntry, CartInput, MAX_QUANTITY_PER_ITEM};
pub use pricing::{CartLine, PricingBreakdown};
pub use shared::SharedCart;
