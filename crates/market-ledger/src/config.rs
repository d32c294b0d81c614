//! # Ledger Configuration
//!
//! Store identity and the two policy switches the ledger honors.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`MARKET_*`)
//! 2. Defaults (this file)
//!
//! ## Policies
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  empty_query_is_error (default: true)                                   │
//! │    get_*_by_criteria with no match → NoMatches (NotFound)               │
//! │    false → Ok(vec![])                                                   │
//! │                                                                         │
//! │  guard_product_removal (default: false)                                 │
//! │    remove_product of a product still on a recorded sale                 │
//! │    false → removed anyway, warning logged                               │
//! │    true  → ProductInUse (Conflict)                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use market_core::Money;
use serde::{Deserialize, Serialize};

/// Ledger configuration. Read-only once the ledger is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketConfig {
    /// Store name (report headers)
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Treat a criteria query without matches as `NotFound`.
    pub empty_query_is_error: bool,

    /// Refuse to remove products that recorded sales still reference.
    pub guard_product_removal: bool,
}

impl Default for MarketConfig {
    fn default() -> Self {
        MarketConfig {
            store_name: "Corner Market".to_string(),
            currency_symbol: "$".to_string(),
            empty_query_is_error: true,
            guard_product_removal: false,
        }
    }
}

impl MarketConfig {
    /// Loads configuration from environment variables over the defaults.
    ///
    /// ## Environment Variables
    /// - `MARKET_STORE_NAME`: Override store name
    /// - `MARKET_CURRENCY_SYMBOL`: Override currency symbol
    /// - `MARKET_EMPTY_QUERY_IS_ERROR`: `true`/`false`
    /// - `MARKET_GUARD_PRODUCT_REMOVAL`: `true`/`false`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`MarketConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = MarketConfig::default();

        if let Some(store_name) = lookup("MARKET_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Some(symbol) = lookup("MARKET_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(raw) = lookup("MARKET_EMPTY_QUERY_IS_ERROR") {
            config.empty_query_is_error = parse_flag("MARKET_EMPTY_QUERY_IS_ERROR", &raw)?;
        }

        if let Some(raw) = lookup("MARKET_GUARD_PRODUCT_REMOVAL") {
            config.guard_product_removal = parse_flag("MARKET_GUARD_PRODUCT_REMOVAL", &raw)?;
        }

        Ok(config)
    }

    /// Formats an amount with the configured currency symbol.
    ///
    /// ## Example
    /// ```rust
    /// use market_core::Money;
    /// use market_ledger::MarketConfig;
    ///
    /// let config = MarketConfig::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        format!(
            "{}{}{}.{:02}",
            if amount.is_negative() { "-" } else { "" },
            self.currency_symbol,
            amount.dollars().abs(),
            amount.cents_part()
        )
    }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue(key.to_string())),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = MarketConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, MarketConfig::default());
        assert!(config.empty_query_is_error);
        assert!(!config.guard_product_removal);
    }

    #[test]
    fn test_overrides() {
        let config = MarketConfig::from_lookup(lookup_from(&[
            ("MARKET_STORE_NAME", "Night Owl"),
            ("MARKET_CURRENCY_SYMBOL", "€"),
            ("MARKET_EMPTY_QUERY_IS_ERROR", "false"),
            ("MARKET_GUARD_PRODUCT_REMOVAL", "YES"),
        ]))
        .unwrap();

        assert_eq!(config.store_name, "Night Owl");
        assert_eq!(config.currency_symbol, "€");
        assert!(!config.empty_query_is_error);
        assert!(config.guard_product_removal);
    }

    #[test]
    fn test_invalid_flag() {
        let err = MarketConfig::from_lookup(lookup_from(&[("MARKET_GUARD_PRODUCT_REMOVAL", "maybe")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue("MARKET_GUARD_PRODUCT_REMOVAL".to_string())
        );
        assert_eq!(err.to_string(), "Invalid value for MARKET_GUARD_PRODUCT_REMOVAL");
    }

    #[test]
    fn test_format_currency() {
        let config = MarketConfig::default();
        assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
        assert_eq!(config.format_currency(Money::from_cents(1)), "$0.01");
        assert_eq!(config.format_currency(Money::from_cents(-550)), "-$5.50");

        let euro = MarketConfig {
            currency_symbol: "€".to_string(),
            ..MarketConfig::default()
        };
        assert_eq!(euro.format_currency(Money::from_cents(999)), "€9.99");
    }
}
