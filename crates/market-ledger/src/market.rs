//! # Market Aggregate
//!
//! The inventory ledger: product catalog, sale history and the rules that
//! keep `Product::quantity`, `Sale::price` and `SaleItem::bought_count`
//! consistent with each other.
//!
//! ## Stock Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Quantity Bookkeeping                              │
//! │                                                                         │
//! │  add_sale(sale)                                                        │
//! │     └── product.quantity -= item.bought_count   (per item, no floor)   │
//! │                                                                         │
//! │  refund_product(sale, product, k)                                      │
//! │     ├── product.quantity += k                                          │
//! │     ├── item.bought_count -= k                  (item kept at 0)       │
//! │     └── sale.price       -= k × product.unit_value                     │
//! │                                                                         │
//! │  refund_entire_sale(sale)                                              │
//! │     ├── product.quantity += item.bought_count   (per item)             │
//! │     └── sale removed from history                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! Every mutating operation takes `&mut self` and runs to completion. Wrap
//! the ledger in [`crate::SharedMarket`] to share it between threads.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::config::MarketConfig;
use crate::ids::IdAllocator;
use crate::summary::{SaleLineSummary, SaleSummary};
use market_core::{
    MarketError, MarketResult, Money, Product, ProductCategory, ProductId, Sale, SaleId,
};

/// In-memory catalog and sale history of a single store.
#[derive(Debug, Clone, Default)]
pub struct Market {
    catalog: Vec<Product>,
    sales: Vec<Sale>,
    ids: IdAllocator,
    config: MarketConfig,
}

impl Market {
    /// Creates an empty ledger with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: MarketConfig) -> Self {
        Market {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    // =========================================================================
    // Id Allocation
    // =========================================================================

    /// Issues the next product id. Ids are never reused.
    pub fn next_product_id(&mut self) -> ProductId {
        self.ids.next_product_id()
    }

    /// Issues the next sale id. Independent of the product sequence.
    pub fn next_sale_id(&mut self) -> SaleId {
        self.ids.next_sale_id()
    }

    // =========================================================================
    // Product Operations
    // =========================================================================

    /// Builds a product with a fresh id. The product is *not* added to the
    /// catalog; pass it to [`Market::add_product`].
    pub fn new_product(
        &mut self,
        name: impl Into<String>,
        unit_value: Money,
        category: ProductCategory,
        quantity: i64,
    ) -> Product {
        let id = self.ids.next_product_id();
        debug!(product_id = %id, "Allocated product id");
        Product::new(id, name, unit_value, category, quantity)
    }

    /// Adds a product to the catalog and returns the id it was built with.
    ///
    /// ## Errors
    /// `InvalidArgument` when the product was not built by this ledger
    /// (its id was never issued here), is already in the catalog, or was
    /// removed from it earlier.
    pub fn add_product(&mut self, product: Product) -> MarketResult<ProductId> {
        let id = product.id();

        if !self.ids.issued_product(id) {
            return Err(MarketError::invalid(format!(
                "product {} was not issued by this market",
                id
            )));
        }

        if self.ids.is_retired_product(id) {
            return Err(MarketError::invalid(format!(
                "product {} was removed and cannot be re-added",
                id
            )));
        }

        if self.catalog.iter().any(|p| p.id() == id) {
            return Err(MarketError::invalid(format!(
                "product {} is already in the catalog",
                id
            )));
        }

        info!(product_id = %id, name = %product.name, quantity = product.quantity, "Product added");
        self.catalog.push(product);
        Ok(id)
    }

    /// [`Market::new_product`] followed by [`Market::add_product`].
    pub fn create_product(
        &mut self,
        name: impl Into<String>,
        unit_value: Money,
        category: ProductCategory,
        quantity: i64,
    ) -> MarketResult<ProductId> {
        let product = self.new_product(name, unit_value, category, quantity);
        self.add_product(product)
    }

    /// Looks a product up by id.
    pub fn get_product_by_id(&self, id: ProductId) -> MarketResult<&Product> {
        self.catalog
            .iter()
            .find(|p| p.id() == id)
            .ok_or(MarketError::ProductNotFound(id))
    }

    /// Every catalog product satisfying `criteria`, in catalog order.
    ///
    /// With `empty_query_is_error` (the default) an empty result is a
    /// `NoMatches` error rather than an empty vector.
    pub fn get_products_by_criteria<F>(&self, criteria: F) -> MarketResult<Vec<&Product>>
    where
        F: Fn(&Product) -> bool,
    {
        let found: Vec<&Product> = self.catalog.iter().filter(|&p| criteria(p)).collect();
        debug!(matches = found.len(), "Product criteria query");
        self.check_matches("product", found)
    }

    /// Overwrites every mutable field of a product.
    ///
    /// The ledger does not validate the new values; see
    /// `market_core::validation` for the checks callers are expected to run.
    pub fn update_product(
        &mut self,
        id: ProductId,
        new_name: impl Into<String>,
        new_value: Money,
        new_category: ProductCategory,
        new_quantity: i64,
    ) -> MarketResult<()> {
        let product = self.product_mut(id)?;

        product.name = new_name.into();
        product.unit_value = new_value;
        product.category = new_category;
        product.quantity = new_quantity;

        info!(product_id = %id, code = %product.code(), "Product updated");
        Ok(())
    }

    /// Removes a product from the catalog.
    ///
    /// Recorded sales may still reference the product. Unless
    /// `guard_product_removal` is set, the removal goes ahead anyway and the
    /// dangling reference is logged; refunds then skip or reject that line.
    pub fn remove_product(&mut self, id: ProductId) -> MarketResult<()> {
        let index = self.product_index(id)?;

        if let Some(sale) = self.sales.iter().find(|s| s.contains_product(id)) {
            if self.config.guard_product_removal {
                return Err(MarketError::ProductInUse {
                    product_id: id,
                    sale_id: sale.id(),
                });
            }
            warn!(product_id = %id, sale_id = %sale.id(), "Removing product still referenced by a recorded sale");
        }

        let removed = self.catalog.remove(index);
        self.ids.retire_product(id);
        info!(product_id = %id, name = %removed.name, "Product removed");
        Ok(())
    }

    pub fn products(&self) -> &[Product] {
        &self.catalog
    }

    pub fn product_count(&self) -> usize {
        self.catalog.len()
    }

    // =========================================================================
    // Sale Operations
    // =========================================================================

    /// Builds a sale from `(product id, count)` lines resolved through the
    /// catalog. The sale is *not* recorded; pass it to [`Market::add_sale`].
    ///
    /// Price is fixed from the products' current unit values. Duplicate
    /// product ids are merged.
    ///
    /// ## Errors
    /// - `ProductNotFound` if a line names a product outside the catalog
    /// - `InvalidArgument` if a count is not positive, or a merged count or
    ///   the price overflows
    ///
    /// No sale id is consumed when an error is returned.
    pub fn new_sale(&mut self, date: NaiveDate, lines: &[(ProductId, i64)]) -> MarketResult<Sale> {
        let mut resolved: Vec<(&Product, i64)> = Vec::with_capacity(lines.len());
        for &(product_id, count) in lines {
            let product = self
                .catalog
                .iter()
                .find(|p| p.id() == product_id)
                .ok_or(MarketError::ProductNotFound(product_id))?;
            if count <= 0 {
                return Err(MarketError::invalid(format!(
                    "bought count for product {} must be positive, got {}",
                    product_id, count
                )));
            }
            resolved.push((product, count));
        }

        let sale = Sale::new(self.ids.upcoming_sale_id(), date, resolved)?;
        let id = self.ids.next_sale_id();
        debug!(sale_id = %id, lines = lines.len(), "Allocated sale id");
        Ok(sale)
    }

    /// Records a sale and takes its items out of stock.
    ///
    /// Stock sufficiency is not checked: overselling drives the product
    /// quantity negative.
    ///
    /// ## Errors
    /// - `InvalidArgument` if the sale was not built by this ledger, is
    ///   already recorded, or was refunded in full earlier
    /// - `ProductNotFound` if an item references a product no longer in
    ///   the catalog
    /// - `InvalidArgument` (`Overflow`) if a stock level would leave the
    ///   `i64` range
    ///
    /// All checks run before any stock moves, so a rejected sale leaves the
    /// ledger untouched.
    pub fn add_sale(&mut self, sale: Sale) -> MarketResult<SaleId> {
        let id = sale.id();

        if !self.ids.issued_sale(id) {
            return Err(MarketError::invalid(format!(
                "sale {} was not issued by this market",
                id
            )));
        }

        if self.ids.is_retired_sale(id) {
            return Err(MarketError::invalid(format!(
                "sale {} was refunded and cannot be recorded again",
                id
            )));
        }

        if self.sales.iter().any(|s| s.id() == id) {
            return Err(MarketError::invalid(format!("sale {} is already recorded", id)));
        }

        // Items hold distinct products, so each stock level moves once.
        let mut updates = Vec::with_capacity(sale.items().len());
        for item in sale.items() {
            let index = self.product_index(item.product_id())?;
            let remaining = self.catalog[index]
                .quantity
                .checked_sub(item.bought_count())
                .ok_or(MarketError::Overflow { what: "product quantity" })?;
            updates.push((index, remaining));
        }

        for (index, remaining) in updates {
            let product = &mut self.catalog[index];
            product.quantity = remaining;
            if product.quantity < 0 {
                warn!(product_id = %product.id(), quantity = product.quantity, "Product oversold");
            }
        }

        info!(sale_id = %id, price = %sale.price(), items = sale.items().len(), "Sale recorded");
        self.sales.push(sale);
        Ok(id)
    }

    /// Records several sales in order and returns their ids in the same
    /// order.
    ///
    /// Stops at the first sale that fails. Sales before it stay recorded;
    /// there is no rollback across the batch.
    pub fn add_sales<I>(&mut self, sales: I) -> MarketResult<Vec<SaleId>>
    where
        I: IntoIterator<Item = Sale>,
    {
        let mut ids = Vec::new();
        for sale in sales {
            ids.push(self.add_sale(sale)?);
        }
        Ok(ids)
    }

    pub fn get_sale_by_id(&self, id: SaleId) -> MarketResult<&Sale> {
        self.sales
            .iter()
            .find(|s| s.id() == id)
            .ok_or(MarketError::SaleNotFound(id))
    }

    /// Every recorded sale satisfying `criteria`, in recording order.
    ///
    /// Same empty-result policy as [`Market::get_products_by_criteria`].
    pub fn get_sales_by_criteria<F>(&self, criteria: F) -> MarketResult<Vec<&Sale>>
    where
        F: Fn(&Sale) -> bool,
    {
        let found: Vec<&Sale> = self.sales.iter().filter(|&s| criteria(s)).collect();
        debug!(matches = found.len(), "Sale criteria query");
        self.check_matches("sale", found)
    }

    /// Returns `quantity` units of a product from a recorded sale.
    ///
    /// ## Checks (in order)
    /// 1. sale exists → `SaleNotFound`
    /// 2. product is in the catalog → `ProductNotFound`
    /// 3. the sale has a line for it → `ProductNotInSale`
    /// 4. `0 < quantity <= bought_count` → `InvalidRefundQuantity`
    /// 5. new price and stock stay in range → `Overflow`
    ///
    /// On success stock goes up by `quantity`, the line's bought count goes
    /// down by `quantity` and the sale price drops by `quantity` times the
    /// product's current unit value. A line refunded down to zero stays on
    /// the sale.
    pub fn refund_product(
        &mut self,
        sale_id: SaleId,
        product_id: ProductId,
        quantity: i64,
    ) -> MarketResult<()> {
        let sale_index = self.sale_index(sale_id)?;
        let product_index = self.product_index(product_id)?;

        let unit_value = self.catalog[product_index].unit_value;
        self.sales[sale_index].check_refund(product_id, quantity, unit_value)?;
        let restored = self.catalog[product_index]
            .quantity
            .checked_add(quantity)
            .ok_or(MarketError::Overflow { what: "product quantity" })?;

        self.sales[sale_index].refund_line(product_id, quantity, unit_value)?;
        self.catalog[product_index].quantity = restored;

        info!(
            sale_id = %sale_id,
            product_id = %product_id,
            quantity,
            price = %self.sales[sale_index].price(),
            "Product refunded"
        );
        Ok(())
    }

    /// Reverses a whole sale: every line's bought count goes back to stock
    /// and the sale leaves the history.
    ///
    /// Succeeds for any recorded sale regardless of what was refunded
    /// before. Lines whose product has since been removed from the catalog
    /// are skipped. Stock saturates at `i64::MAX`. The sale id is retired.
    pub fn refund_entire_sale(&mut self, sale_id: SaleId) -> MarketResult<()> {
        let sale_index = self.sale_index(sale_id)?;
        let sale = self.sales.remove(sale_index);
        self.ids.retire_sale(sale_id);

        for item in sale.items() {
            match self.catalog.iter_mut().find(|p| p.id() == item.product_id()) {
                Some(product) => match product.quantity.checked_add(item.bought_count()) {
                    Some(restored) => product.quantity = restored,
                    None => {
                        warn!(product_id = %product.id(), "Restored stock saturated");
                        product.quantity = i64::MAX;
                    }
                },
                None => warn!(
                    sale_id = %sale_id,
                    product_id = %item.product_id(),
                    bought_count = item.bought_count(),
                    "Refunded line references a removed product; stock not restored"
                ),
            }
        }

        info!(sale_id = %sale_id, price = %sale.price(), "Sale refunded");
        Ok(())
    }

    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    pub fn sale_count(&self) -> usize {
        self.sales.len()
    }

    /// Receipt-style view of a recorded sale with product names resolved.
    pub fn sale_summary(&self, sale_id: SaleId) -> MarketResult<SaleSummary> {
        let sale = self.get_sale_by_id(sale_id)?;

        let lines = sale
            .items()
            .iter()
            .map(|item| SaleLineSummary {
                product_id: item.product_id(),
                product_name: self
                    .get_product_by_id(item.product_id())
                    .ok()
                    .map(|p| p.name.clone()),
                bought_count: item.bought_count(),
            })
            .collect();

        Ok(SaleSummary {
            sale_id: sale.id(),
            date: sale.date(),
            price: sale.price(),
            lines,
        })
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn product_index(&self, id: ProductId) -> MarketResult<usize> {
        self.catalog
            .iter()
            .position(|p| p.id() == id)
            .ok_or(MarketError::ProductNotFound(id))
    }

    fn product_mut(&mut self, id: ProductId) -> MarketResult<&mut Product> {
        self.catalog
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or(MarketError::ProductNotFound(id))
    }

    fn sale_index(&self, id: SaleId) -> MarketResult<usize> {
        self.sales
            .iter()
            .position(|s| s.id() == id)
            .ok_or(MarketError::SaleNotFound(id))
    }

    fn check_matches<'a, T>(&self, entity: &'static str, found: Vec<&'a T>) -> MarketResult<Vec<&'a T>> {
        if found.is_empty() && self.config.empty_query_is_error {
            return Err(MarketError::NoMatches { entity });
        }
        Ok(found)
    }
}
