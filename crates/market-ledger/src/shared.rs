//! # Shared Ledger Handle
//!
//! Lets several threads use one [`Market`].
//!
//! ## Locking
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  thread A ──► with_market_mut(|m| m.add_sale(s)) ──┐                    │
//! │                                                    ├──► Mutex<Market>   │
//! │  thread B ──► with_market(|m| m.get_sale_by_id(i)) ┘                    │
//! │                                                                         │
//! │  One closure runs per lock acquisition. A ledger operation therefore   │
//! │  never interleaves with another; several operations in one closure     │
//! │  run as a unit.                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Ledger operations leave the aggregate consistent before returning, so a
//! poisoned lock is recovered rather than propagated.

use std::sync::{Arc, Mutex, PoisonError};

use crate::config::MarketConfig;
use crate::market::Market;

/// Cloneable handle to a ledger behind `Arc<Mutex<_>>`. Clones share the
/// same ledger.
#[derive(Debug, Clone)]
pub struct SharedMarket {
    market: Arc<Mutex<Market>>,
}

impl SharedMarket {
    pub fn new(market: Market) -> Self {
        SharedMarket {
            market: Arc::new(Mutex::new(market)),
        }
    }

    pub fn with_config(config: MarketConfig) -> Self {
        Self::new(Market::with_config(config))
    }

    /// Executes a function with read access to the ledger.
    ///
    /// ## Usage
    /// ```rust
    /// use market_ledger::SharedMarket;
    ///
    /// let shared = SharedMarket::default();
    /// assert_eq!(shared.with_market(|m| m.product_count()), 0);
    /// ```
    pub fn with_market<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Market) -> R,
    {
        let market = self.market.lock().unwrap_or_else(PoisonError::into_inner);
        f(&market)
    }

    /// Executes a function with write access to the ledger.
    pub fn with_market_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Market) -> R,
    {
        let mut market = self.market.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut market)
    }
}

impl Default for SharedMarket {
    fn default() -> Self {
        Self::new(Market::new())
    }
}
