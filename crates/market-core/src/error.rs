//! # Error Types
//!
//! Domain-specific error types for the market ledger.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  market-core errors (this file)                                        │
//! │  ├── MarketError      - Ledger operation failures                      │
//! │  └── ValidationError  - Caller-side input checks                       │
//! │                                                                         │
//! │  market-ledger errors                                                  │
//! │  └── ConfigError      - Bad environment configuration                  │
//! │                                                                         │
//! │  Every MarketError collapses to one ErrorKind:                         │
//! │    InvalidArgument | NotFound | Conflict                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The presentation layer is expected to match on [`MarketError::kind`],
//! show the message and keep its interaction loop going. Nothing is retried
//! or recovered inside the ledger.

use serde::Serialize;
use thiserror::Error;

use crate::types::{ProductId, SaleId};

// =============================================================================
// Error Kind
// =============================================================================

/// Coarse classification of a [`MarketError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Absent/uninitialized object, or an out-of-range refund quantity.
    InvalidArgument,
    /// Lookup by id or by criteria produced nothing.
    NotFound,
    /// Operation refused because another entity still depends on the target.
    Conflict,
}

// =============================================================================
// Market Error
// =============================================================================

/// Failures raised by ledger operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MarketError {
    /// A required object is absent or was not issued by this ledger.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Refund quantity is non-positive or exceeds what is left on the line.
    ///
    /// ## User Workflow
    /// ```text
    /// Sale #0: Milk × 2 remaining
    ///      │
    ///      ▼
    /// refund_product(0, milk, 3)
    ///      │
    ///      ▼
    /// InvalidRefundQuantity { requested: 3, bought: 2, .. }
    /// ```
    #[error("Cannot refund {requested} of product {product_id} from sale {sale_id}: {bought} bought")]
    InvalidRefundQuantity {
        sale_id: SaleId,
        product_id: ProductId,
        requested: i64,
        bought: i64,
    },

    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    #[error("Sale not found: {0}")]
    SaleNotFound(SaleId),

    /// The product exists in the catalog but has no line in the sale.
    #[error("Product {product_id} was not sold in sale {sale_id}")]
    ProductNotInSale {
        sale_id: SaleId,
        product_id: ProductId,
    },

    /// A criteria query matched nothing.
    #[error("No {entity} matches the given criteria")]
    NoMatches { entity: &'static str },

    /// Removal refused because a recorded sale still references the product.
    /// Only raised when the ledger guards product removal.
    #[error("Product {product_id} is still referenced by sale {sale_id}")]
    ProductInUse {
        product_id: ProductId,
        sale_id: SaleId,
    },

    /// A count, stock level or price left the representable range.
    #[error("Arithmetic overflow computing {what}")]
    Overflow { what: &'static str },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl MarketError {
    /// Shorthand for [`MarketError::InvalidArgument`].
    pub fn invalid(msg: impl Into<String>) -> Self {
        MarketError::InvalidArgument(msg.into())
    }

    /// Maps the variant onto the ledger's error taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MarketError::InvalidArgument(_)
            | MarketError::InvalidRefundQuantity { .. }
            | MarketError::Overflow { .. }
            | MarketError::Validation(_) => ErrorKind::InvalidArgument,
            MarketError::ProductNotFound(_)
            | MarketError::SaleNotFound(_)
            | MarketError::ProductNotInSale { .. }
            | MarketError::NoMatches { .. } => ErrorKind::NotFound,
            MarketError::ProductInUse { .. } => ErrorKind::Conflict,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub fn is_invalid_argument(&self) -> bool {
        self.kind() == ErrorKind::InvalidArgument
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by the checks in [`crate::validation`], which callers run before
/// handing values to the ledger.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    #[error("{field} must be positive")]
    MustBePositive { field: String },

    #[error("{field} cannot be negative")]
    Negative { field: String },

    /// Value could not be parsed (e.g. an unknown category label).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with MarketError.
pub type MarketResult<T> = Result<T, MarketError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = MarketError::InvalidRefundQuantity {
            sale_id: SaleId::new(0),
            product_id: ProductId::new(3),
            requested: 3,
            bought: 2,
        };
        assert_eq!(
            err.to_string(),
            "Cannot refund 3 of product 3 from sale 0: 2 bought"
        );

        let err = MarketError::ProductNotInSale {
            sale_id: SaleId::new(7),
            product_id: ProductId::new(1),
        };
        assert_eq!(err.to_string(), "Product 1 was not sold in sale 7");

        let err = MarketError::NoMatches { entity: "product" };
        assert_eq!(err.to_string(), "No product matches the given criteria");
    }

    #[test]
    fn test_kinds() {
        assert_eq!(
            MarketError::ProductNotFound(ProductId::new(1)).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            MarketError::SaleNotFound(SaleId::new(1)).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(MarketError::invalid("sale").kind(), ErrorKind::InvalidArgument);
        assert_eq!(
            MarketError::Overflow { what: "sale price" }.kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            MarketError::ProductInUse {
                product_id: ProductId::new(1),
                sale_id: SaleId::new(2),
            }
            .kind(),
            ErrorKind::Conflict
        );
    }

    #[test]
    fn test_validation_converts_to_market_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let err: MarketError = validation_err.into();
        assert!(matches!(err, MarketError::Validation(_)));
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_kind_serializes_screaming_snake() {
        let json = serde_json::to_string(&ErrorKind::InvalidArgument).unwrap();
        assert_eq!(json, "\"INVALID_ARGUMENT\"");
    }
}
