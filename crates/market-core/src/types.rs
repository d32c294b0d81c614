//! # Domain Types
//!
//! Core domain types of the market ledger.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐        ┌─────────────────┐                        │
//! │  │    Product      │        │      Sale       │                        │
//! │  │  ─────────────  │        │  ─────────────  │                        │
//! │  │  id (u64)       │◄───┐   │  id (u64)       │                        │
//! │  │  name           │    │   │  date           │                        │
//! │  │  unit_value     │    │   │  price          │                        │
//! │  │  category       │    │   │  items ─────────┼──┐                     │
//! │  │  quantity       │    │   └─────────────────┘  │                     │
//! │  └─────────────────┘    │                        ▼                     │
//! │                         │   ┌─────────────────────────┐                │
//! │                         └───┤  SaleItem               │                │
//! │                  foreign key│  product_id, bought_count│               │
//! │                             └─────────────────────────┘                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A `SaleItem` never owns or points at a `Product`; it stores the product id
//! and the ledger resolves it through its catalog.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{MarketError, MarketResult, ValidationError};
use crate::money::Money;

// =============================================================================
// Identifiers
// =============================================================================

/// Catalog identifier of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    #[inline]
    pub const fn new(raw: u64) -> Self {
        ProductId(raw)
    }

    #[inline]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Identifier of a recorded sale. Independent of the product sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SaleId(u64);

impl SaleId {
    #[inline]
    pub const fn new(raw: u64) -> Self {
        SaleId(raw)
    }

    #[inline]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// =============================================================================
// Product Category
// =============================================================================

/// The fixed set of shelf categories a product can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    Beverages,
    Snacks,
    Dairy,
    Frozen,
    Grocery,
    Bakery,
    Produce,
    Household,
}

impl ProductCategory {
    /// Every category, in declaration order.
    pub const ALL: [ProductCategory; 8] = [
        ProductCategory::Beverages,
        ProductCategory::Snacks,
        ProductCategory::Dairy,
        ProductCategory::Frozen,
        ProductCategory::Grocery,
        ProductCategory::Bakery,
        ProductCategory::Produce,
        ProductCategory::Household,
    ];

    pub const fn label(&self) -> &'static str {
        match self {
            ProductCategory::Beverages => "Beverages",
            ProductCategory::Snacks => "Snacks",
            ProductCategory::Dairy => "Dairy",
            ProductCategory::Frozen => "Frozen",
            ProductCategory::Grocery => "Grocery",
            ProductCategory::Bakery => "Bakery",
            ProductCategory::Produce => "Produce",
            ProductCategory::Household => "Household",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parses a category label, ignoring case and surrounding whitespace.
impl FromStr for ProductCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ProductCategory::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "category".to_string(),
                reason: format!(
                    "must be one of: {}",
                    ProductCategory::ALL
                        .iter()
                        .map(|c| c.label())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            })
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product tracked in the catalog.
///
/// Everything except `id` is mutable in place: by an explicit update, by a
/// sale (stock decrement) and by a refund (stock increment).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,

    /// Display name. Non-empty (checked by the caller).
    pub name: String,

    /// Price of one unit. Positive (checked by the caller).
    pub unit_value: Money,

    pub category: ProductCategory,

    /// Current stock. Overselling can drive this below zero.
    pub quantity: i64,
}

impl Product {
    /// Builds a product with an id already issued by a ledger.
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        unit_value: Money,
        category: ProductCategory,
        quantity: i64,
    ) -> Self {
        Product {
            id,
            name: name.into(),
            unit_value,
            category,
            quantity,
        }
    }

    #[inline]
    pub fn id(&self) -> ProductId {
        self.id
    }

    /// One-line developer description: `[p:Milk|v:$2.50|c:Dairy|q:10#0]`.
    pub fn code(&self) -> String {
        format!(
            "[p:{}|v:{}|c:{}|q:{}#{}]",
            self.name, self.unit_value, self.category, self.quantity, self.id
        )
    }
}

// =============================================================================
// Sale Item
// =============================================================================

/// One product/quantity line of a sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleItem {
    product_id: ProductId,
    bought_count: i64,
}

impl SaleItem {
    #[inline]
    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    /// Units still counted as sold. Drops to 0 after the whole line is
    /// refunded; the line itself stays on the sale.
    #[inline]
    pub fn bought_count(&self) -> i64 {
        self.bought_count
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A recorded (or about to be recorded) sales transaction.
///
/// ## Price Maintenance
/// ```text
/// Sale::new ─────────► price = Σ unit_value × bought_count   (once)
///      │
///      ▼
/// refund_line(p, k) ─► price -= k × unit_value               (incremental)
/// ```
/// The price is never recomputed from the items on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    id: SaleId,
    date: NaiveDate,
    price: Money,
    items: Vec<SaleItem>,
}

impl Sale {
    /// Builds a sale from `(product, count)` lines.
    ///
    /// Lines for the same product are merged into one item by summing their
    /// counts; items keep the order in which each product was first seen.
    /// Stock is not touched here, that happens when the ledger admits the
    /// sale.
    ///
    /// ## Errors
    /// `InvalidArgument` when a line count is zero or negative, or when a
    /// merged count or the price overflows (`Overflow`).
    ///
    /// ## Example
    /// ```rust
    /// use chrono::NaiveDate;
    /// use market_core::{Money, Product, ProductCategory, ProductId, Sale, SaleId};
    ///
    /// let a = Product::new(ProductId::new(0), "Milk", Money::from_cents(250), ProductCategory::Dairy, 10);
    /// let b = Product::new(ProductId::new(1), "Bread", Money::from_cents(300), ProductCategory::Bakery, 5);
    /// let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    ///
    /// let sale = Sale::new(SaleId::new(0), date, [(&a, 2), (&a, 3), (&b, 1)]).unwrap();
    /// assert_eq!(sale.items().len(), 2);
    /// assert_eq!(sale.price().cents(), 5 * 250 + 300);
    /// ```
    pub fn new<'a, I>(id: SaleId, date: NaiveDate, lines: I) -> MarketResult<Self>
    where
        I: IntoIterator<Item = (&'a Product, i64)>,
    {
        let mut items: Vec<SaleItem> = Vec::new();
        let mut price = Money::zero();

        for (product, count) in lines {
            if count <= 0 {
                return Err(MarketError::invalid(format!(
                    "bought count for product {} must be positive, got {}",
                    product.id(),
                    count
                )));
            }

            match items.iter_mut().find(|i| i.product_id == product.id()) {
                Some(existing) => {
                    existing.bought_count = existing
                        .bought_count
                        .checked_add(count)
                        .ok_or(MarketError::Overflow { what: "bought count" })?;
                }
                None => items.push(SaleItem {
                    product_id: product.id(),
                    bought_count: count,
                }),
            }

            price = product
                .unit_value
                .checked_multiply_quantity(count)
                .and_then(|line| price.checked_add(line))
                .ok_or(MarketError::Overflow { what: "sale price" })?;
        }

        Ok(Sale {
            id,
            date,
            price,
            items,
        })
    }

    #[inline]
    pub fn id(&self) -> SaleId {
        self.id
    }

    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    #[inline]
    pub fn price(&self) -> Money {
        self.price
    }

    pub fn items(&self) -> &[SaleItem] {
        &self.items
    }

    /// The line for `product_id`, if the product was sold in this sale.
    pub fn item(&self, product_id: ProductId) -> Option<&SaleItem> {
        self.items.iter().find(|i| i.product_id == product_id)
    }

    pub fn contains_product(&self, product_id: ProductId) -> bool {
        self.item(product_id).is_some()
    }

    /// Units still counted as sold across all lines.
    pub fn total_units(&self) -> i64 {
        self.items.iter().map(|i| i.bought_count).sum()
    }

    /// Checks a refund of `quantity` units of `product_id` without applying
    /// it, returning the price the sale would have afterwards.
    ///
    /// ## Errors
    /// - `ProductNotInSale` if no line references the product
    /// - `InvalidRefundQuantity` unless `0 < quantity <= bought_count`
    /// - `Overflow` if `quantity × unit_value` leaves the price range
    pub fn check_refund(
        &self,
        product_id: ProductId,
        quantity: i64,
        unit_value: Money,
    ) -> MarketResult<Money> {
        let item = self.item(product_id).ok_or(MarketError::ProductNotInSale {
            sale_id: self.id,
            product_id,
        })?;

        if quantity <= 0 || quantity > item.bought_count {
            return Err(MarketError::InvalidRefundQuantity {
                sale_id: self.id,
                product_id,
                requested: quantity,
                bought: item.bought_count,
            });
        }

        unit_value
            .checked_multiply_quantity(quantity)
            .and_then(|refunded| self.price.checked_sub(refunded))
            .ok_or(MarketError::Overflow { what: "sale price" })
    }

    /// Takes `quantity` units of `product_id` back off this sale.
    ///
    /// Lowers the line's bought count and reduces the price by
    /// `quantity × unit_value`. Restoring stock is the caller's half of the
    /// refund. The line is kept even when its count reaches zero.
    ///
    /// Fails exactly when [`Sale::check_refund`] does, and nothing is
    /// modified when an error is returned.
    pub fn refund_line(
        &mut self,
        product_id: ProductId,
        quantity: i64,
        unit_value: Money,
    ) -> MarketResult<()> {
        let price = self.check_refund(product_id, quantity, unit_value)?;

        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            item.bought_count -= quantity;
        }
        self.price = price;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u64, cents: i64) -> Product {
        Product::new(
            ProductId::new(id),
            format!("Product {}", id),
            Money::from_cents(cents),
            ProductCategory::Grocery,
            10,
        )
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn test_sale_merges_lines_for_same_product() {
        let a = product(0, 250);
        let b = product(1, 199);

        let sale = Sale::new(SaleId::new(0), day(), [(&a, 2), (&a, 3), (&b, 1)]).unwrap();

        assert_eq!(sale.items().len(), 2);
        assert_eq!(sale.item(a.id()).unwrap().bought_count(), 5);
        assert_eq!(sale.item(b.id()).unwrap().bought_count(), 1);
        assert_eq!(sale.price(), a.unit_value * 5 + b.unit_value);
        assert_eq!(sale.total_units(), 6);
    }

    #[test]
    fn test_sale_keeps_first_seen_order() {
        let a = product(0, 100);
        let b = product(1, 100);

        let sale = Sale::new(SaleId::new(0), day(), [(&b, 1), (&a, 1), (&b, 1)]).unwrap();
        let order: Vec<ProductId> = sale.items().iter().map(|i| i.product_id()).collect();
        assert_eq!(order, vec![b.id(), a.id()]);
    }

    #[test]
    fn test_sale_rejects_non_positive_count() {
        let a = product(0, 100);
        let err = Sale::new(SaleId::new(0), day(), [(&a, 0)]).unwrap_err();
        assert!(err.is_invalid_argument());

        let err = Sale::new(SaleId::new(0), day(), [(&a, 2), (&a, -1)]).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_empty_sale_is_free() {
        let sale = Sale::new(SaleId::new(4), day(), std::iter::empty()).unwrap();
        assert!(sale.items().is_empty());
        assert!(sale.price().is_zero());
    }

    #[test]
    fn test_refund_line_keeps_zero_count_item() {
        let a = product(0, 250);
        let mut sale = Sale::new(SaleId::new(0), day(), [(&a, 4)]).unwrap();

        sale.refund_line(a.id(), 4, a.unit_value).unwrap();

        let item = sale.item(a.id()).unwrap();
        assert_eq!(item.bought_count(), 0);
        assert!(sale.price().is_zero());
        assert_eq!(sale.items().len(), 1);
    }

    #[test]
    fn test_refund_line_rejects_bad_quantities_without_change() {
        let a = product(0, 250);
        let b = product(1, 250);
        let mut sale = Sale::new(SaleId::new(0), day(), [(&a, 2)]).unwrap();
        let before = sale.clone();

        let err = sale.refund_line(a.id(), 3, a.unit_value).unwrap_err();
        assert!(matches!(
            err,
            MarketError::InvalidRefundQuantity { requested: 3, bought: 2, .. }
        ));
        assert!(sale.refund_line(a.id(), 0, a.unit_value).is_err());
        assert!(sale.refund_line(a.id(), -1, a.unit_value).is_err());

        let err = sale.refund_line(b.id(), 1, b.unit_value).unwrap_err();
        assert!(matches!(err, MarketError::ProductNotInSale { .. }));

        assert_eq!(sale, before);
    }

    #[test]
    fn test_sale_rejects_overflowing_lines() {
        let a = product(0, 250);
        let penny = product(1, 1);
        let half = i64::MAX / 2 + 1;

        let err = Sale::new(SaleId::new(0), day(), [(&penny, half), (&penny, half)]).unwrap_err();
        assert_eq!(err, MarketError::Overflow { what: "bought count" });
        assert!(err.is_invalid_argument());

        let err = Sale::new(SaleId::new(0), day(), [(&a, i64::MAX / 100)]).unwrap_err();
        assert_eq!(err, MarketError::Overflow { what: "sale price" });
    }

    #[test]
    fn test_refund_overflow_leaves_sale_untouched() {
        let a = product(0, 250);
        let mut sale = Sale::new(SaleId::new(0), day(), [(&a, 4)]).unwrap();
        let before = sale.clone();

        let err = sale
            .refund_line(a.id(), 2, Money::from_cents(i64::MAX))
            .unwrap_err();
        assert_eq!(err, MarketError::Overflow { what: "sale price" });
        assert_eq!(sale, before);
    }

    #[test]
    fn test_check_refund_reports_resulting_price() {
        let a = product(0, 250);
        let sale = Sale::new(SaleId::new(0), day(), [(&a, 4)]).unwrap();

        assert_eq!(
            sale.check_refund(a.id(), 3, a.unit_value).unwrap(),
            Money::from_cents(250)
        );
        assert!(sale.check_refund(a.id(), 5, a.unit_value).is_err());
        assert_eq!(sale.item(a.id()).unwrap().bought_count(), 4);
    }

    #[test]
    fn test_product_code() {
        let milk = Product::new(
            ProductId::new(0),
            "Milk",
            Money::from_major_minor(2, 50),
            ProductCategory::Dairy,
            10,
        );
        assert_eq!(milk.code(), "[p:Milk|v:$2.50|c:Dairy|q:10#0]");
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("dairy".parse::<ProductCategory>().unwrap(), ProductCategory::Dairy);
        assert_eq!(
            "  HOUSEHOLD ".parse::<ProductCategory>().unwrap(),
            ProductCategory::Household
        );
        assert!("toys".parse::<ProductCategory>().is_err());

        for category in ProductCategory::ALL {
            assert_eq!(category.label().parse::<ProductCategory>().unwrap(), category);
        }
    }

    #[test]
    fn test_ids_display_as_numbers() {
        assert_eq!(ProductId::new(12).to_string(), "12");
        assert_eq!(SaleId::new(3).to_string(), "3");
        assert_eq!(serde_json::to_string(&SaleId::new(3)).unwrap(), "3");
    }
}
