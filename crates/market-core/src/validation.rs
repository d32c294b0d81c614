//! # Validation Module
//!
//! Input checks that run *before* values reach the ledger.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation (menus, forms)                                  │
//! │  ├── Parses text into numbers, dates, categories                       │
//! │  └── THIS MODULE: non-empty names, positive values and counts          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Ledger                                                       │
//! │  ├── Existence checks (ids, sales, lines)                              │
//! │  └── Refund quantity bounds                                            │
//! │                                                                         │
//! │  The ledger does NOT repeat layer 1: update_product                    │
//! │  overwrites fields with whatever it is given.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use market_core::validation::{validate_product_name, validate_bought_count};
//!
//! validate_product_name("Milk").unwrap();
//! assert!(validate_bought_count(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted product name.
pub const MAX_NAME_LEN: usize = 200;

/// Validates a product name.
///
/// ## Rules
/// - Must not be blank
/// - At most [`MAX_NAME_LEN`] characters after trimming
///
/// ## Returns
/// The trimmed name.
pub fn validate_product_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

/// Validates a unit value. Free products are not allowed.
pub fn validate_unit_value(value: Money) -> ValidationResult<()> {
    if !value.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "unit value".to_string(),
        });
    }

    Ok(())
}

/// Validates a stock level entered for a new or updated product.
pub fn validate_stock_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < 0 {
        return Err(ValidationError::Negative {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates the count on a sale line.
pub fn validate_bought_count(count: i64) -> ValidationResult<()> {
    if count <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "bought count".to_string(),
        });
    }

    Ok(())
}

/// Runs every product field check, returning the trimmed name.
pub fn validate_new_product(name: &str, unit_value: Money, quantity: i64) -> ValidationResult<String> {
    let name = validate_product_name(name)?;
    validate_unit_value(unit_value)?;
    validate_stock_quantity(quantity)?;
    Ok(name)
}
