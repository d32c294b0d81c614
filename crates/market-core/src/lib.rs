//! # market-core: Pure Domain Values for the Market Ledger
//!
//! This crate holds the value types the ledger is built from. It has zero
//! I/O and no global state.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Market Ledger Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Presentation (menus, tables) - external            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ validated primitives                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 market-ledger (Market aggregate)                │   │
//! │  │        catalog • sale history • id allocation • refunds         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ market-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   error   │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │MarketError│  │   rules   │  │   │
//! │  │   │   Sale    │  │           │  │ ErrorKind │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product, Sale, SaleItem, ids and categories
//! - [`money`] - Money type with integer arithmetic
//! - [`error`] - Ledger error taxonomy
//! - [`validation`] - Caller-side input checks
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use market_core::{Money, Product, ProductCategory, ProductId, Sale, SaleId};
//!
//! let milk = Product::new(ProductId::new(0), "Milk", Money::from_cents(250), ProductCategory::Dairy, 10);
//! let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! let sale = Sale::new(SaleId::new(0), date, [(&milk, 4)]).unwrap();
//!
//! assert_eq!(sale.price().to_string(), "$10.00");
//! ```

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

pub use error::{ErrorKind, MarketError, MarketResult, ValidationError};
pub use money::Money;
pub use types::*;
