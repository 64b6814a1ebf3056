//! A cart shared between threads.

use crate::cart::{Cart, PricingBreakdown};
use crate::catalog::ProductLookup;
use crate::config::PricingConfig;
use crate::error::Result;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Cart handle where each mutation and the pricing that follows it happen
/// under one lock, so readers never see a half-applied change.
#[derive(Debug, Clone, Default)]
pub struct SharedCart {
    inner: Arc<Mutex<Cart>>,
}

impl SharedCart {
    pub fn new(cart: Cart) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cart)),
        }
    }

    /// Apply `mutate`, then price the result, without releasing the lock.
    pub fn mutate_and_price<L, F, R>(
        &self,
        lookup: &L,
        config: &PricingConfig,
        mutate: F,
    ) -> Result<(R, PricingBreakdown)>
    where
        L: ProductLookup,
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.lock();
        let outcome = mutate(&mut cart);
        let pricing = cart.compute_pricing(lookup, config)?;
        Ok((outcome, pricing))
    }

    /// Price the current contents.
    pub fn price(
        &self,
        lookup: &impl ProductLookup,
        config: &PricingConfig,
    ) -> Result<PricingBreakdown> {
        self.lock().compute_pricing(lookup, config)
    }

    /// A copy of the current cart.
    pub fn snapshot(&self) -> Cart {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Cart> {
        // cart operations keep entries valid even if a caller panicked mid-mutation
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
