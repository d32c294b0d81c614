//! # Canned Criteria
//!
//! Ready-made predicates for [`Market::get_products_by_criteria`] and
//! [`Market::get_sales_by_criteria`]. Any closure works with those queries;
//! these cover the searches a store front usually offers.
//!
//! ```rust
//! use market_core::{Money, ProductCategory};
//! use market_ledger::{criteria, Market};
//!
//! let mut market = Market::new();
//! market.create_product("Milk", Money::from_cents(250), ProductCategory::Dairy, 10).unwrap();
//! market.create_product("Cheese", Money::from_cents(700), ProductCategory::Dairy, 3).unwrap();
//!
//! let cheap = market
//!     .get_products_by_criteria(criteria::value_between(Money::zero(), Money::from_cents(500)))
//!     .unwrap();
//! assert_eq!(cheap.len(), 1);
//! ```
//!
//! [`Market::get_products_by_criteria`]: crate::Market::get_products_by_criteria
//! [`Market::get_sales_by_criteria`]: crate::Market::get_sales_by_criteria

use chrono::NaiveDate;
use market_core::{Money, Product, ProductCategory, ProductId, Sale};

// =============================================================================
// Products
// =============================================================================

pub fn in_category(category: ProductCategory) -> impl Fn(&Product) -> bool {
    move |p| p.category == category
}

/// Unit value within `[low, high]`.
pub fn value_between(low: Money, high: Money) -> impl Fn(&Product) -> bool {
    move |p| p.unit_value >= low && p.unit_value <= high
}

/// Case-insensitive substring match on the product name.
pub fn name_contains(needle: &str) -> impl Fn(&Product) -> bool {
    let needle = needle.to_lowercase();
    move |p| p.name.to_lowercase().contains(&needle)
}

// =============================================================================
// Sales
// =============================================================================

/// Sale date within `[start, end]`.
pub fn dated_between(start: NaiveDate, end: NaiveDate) -> impl Fn(&Sale) -> bool {
    move |s| s.date() >= start && s.date() <= end
}

pub fn dated_on(day: NaiveDate) -> impl Fn(&Sale) -> bool {
    move |s| s.date() == day
}

/// Current sale price within `[low, high]`. Refunds lower the price, so a
/// sale can drop out of a range it used to match.
pub fn priced_between(low: Money, high: Money) -> impl Fn(&Sale) -> bool {
    move |s| s.price() >= low && s.price() <= high
}

/// Sales with a line for `product_id`, including lines refunded down to zero.
pub fn contains_product(product_id: ProductId) -> impl Fn(&Sale) -> bool {
    move |s| s.contains_product(product_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Market;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn stocked_market() -> (Market, Vec<ProductId>) {
        let mut market = Market::new();
        let ids = vec![
            market
                .create_product("Orange Juice", Money::from_cents(399), ProductCategory::Beverages, 12)
                .unwrap(),
            market
                .create_product("Potato Chips", Money::from_cents(249), ProductCategory::Snacks, 30)
                .unwrap(),
            market
                .create_product("Apple Juice", Money::from_cents(349), ProductCategory::Beverages, 8)
                .unwrap(),
        ];
        (market, ids)
    }

    #[test]
    fn test_product_criteria() {
        let (market, ids) = stocked_market();

        let drinks = market
            .get_products_by_criteria(in_category(ProductCategory::Beverages))
            .unwrap();
        assert_eq!(drinks.iter().map(|p| p.id()).collect::<Vec<_>>(), vec![ids[0], ids[2]]);

        let juice = market.get_products_by_criteria(name_contains("JUICE")).unwrap();
        assert_eq!(juice.len(), 2);

        let mid = market
            .get_products_by_criteria(value_between(Money::from_cents(249), Money::from_cents(349)))
            .unwrap();
        assert_eq!(mid.iter().map(|p| p.id()).collect::<Vec<_>>(), vec![ids[1], ids[2]]);

        assert!(market
            .get_products_by_criteria(in_category(ProductCategory::Frozen))
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_sale_criteria() {
        let (mut market, ids) = stocked_market();
        let mut record = |date, lines: &[(ProductId, i64)]| {
            let sale = market.new_sale(date, lines).unwrap();
            market.add_sale(sale).unwrap()
        };
        let s1 = record(day(1), &[(ids[0], 1)]);
        let s2 = record(day(3), &[(ids[1], 2)]);
        let s3 = record(day(3), &[(ids[0], 1), (ids[2], 1)]);

        let ids_of = |sales: Vec<&Sale>| sales.iter().map(|s| s.id()).collect::<Vec<_>>();

        assert_eq!(
            ids_of(market.get_sales_by_criteria(dated_between(day(2), day(3))).unwrap()),
            vec![s2, s3]
        );
        assert_eq!(ids_of(market.get_sales_by_criteria(dated_on(day(1))).unwrap()), vec![s1]);
        assert_eq!(
            ids_of(market.get_sales_by_criteria(contains_product(ids[0])).unwrap()),
            vec![s1, s3]
        );
        // s3 = 3.99 + 3.49 = 7.48
        assert_eq!(
            ids_of(
                market
                    .get_sales_by_criteria(priced_between(Money::from_cents(500), Money::from_cents(748)))
                    .unwrap()
            ),
            vec![s3]
        );
    }

    #[test]
    fn test_priced_between_tracks_refunds() {
        let (mut market, ids) = stocked_market();
        let sale = market.new_sale(day(1), &[(ids[1], 4)]).unwrap();
        let sale = market.add_sale(sale).unwrap();
        let band = || priced_between(Money::from_cents(900), Money::from_cents(1000));

        assert_eq!(market.get_sales_by_criteria(band()).unwrap().len(), 1);
        market.refund_product(sale, ids[1], 1).unwrap();
        assert!(market.get_sales_by_criteria(band()).is_err());
    }
}
