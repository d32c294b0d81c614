//! # market-ledger: In-Memory Inventory and Sales Ledger
//!
//! Owns the product catalog, the sale history and the per-ledger id
//! counters, and keeps stock, sale prices and line counts consistent through
//! sales and refunds.
//!
//! ## Module Structure
//! ```text
//! market-ledger/
//! ├── market.rs    - Market aggregate (catalog, sales, refunds)
//! ├── criteria.rs  - Ready-made query predicates
//! ├── summary.rs   - Serializable sale summaries
//! ├── shared.rs    - Arc<Mutex<Market>> handle for multi-threaded callers
//! ├── ids.rs       - Per-ledger id allocation
//! ├── config.rs    - Environment-driven configuration
//! └── bin/seed.rs  - Demo ledger generator
//! ```
//!
//! ## Example
//! ```rust
//! use chrono::NaiveDate;
//! use market_core::{Money, ProductCategory};
//! use market_ledger::Market;
//!
//! let mut market = Market::new();
//! let milk = market
//!     .create_product("Milk", Money::from_major_minor(2, 50), ProductCategory::Dairy, 10)
//!     .unwrap();
//!
//! let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! let sale = market.new_sale(date, &[(milk, 4)]).unwrap();
//! let sale_id = market.add_sale(sale).unwrap();
//! assert_eq!(market.get_product_by_id(milk).unwrap().quantity, 6);
//!
//! market.refund_product(sale_id, milk, 2).unwrap();
//! assert_eq!(market.get_sale_by_id(sale_id).unwrap().price().cents(), 500);
//! ```

pub mod config;
pub mod criteria;
pub mod ids;
pub mod market;
pub mod shared;
pub mod summary;

pub use config::{ConfigError, MarketConfig};
pub use ids::IdAllocator;
pub use market::Market;
pub use shared::SharedMarket;
pub use summary::{SaleLineSummary, SaleSummary};

use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber for logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=market_ledger=trace` - Trace the ledger only
/// - Default: INFO, with DEBUG for the ledger
///
/// Panics if a global subscriber is already installed.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,market_ledger=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
