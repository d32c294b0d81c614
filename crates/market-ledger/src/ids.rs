//! # Id Allocation
//!
//! Per-ledger id sequences for products and sales.
//!
//! ```text
//! Market A ── IdAllocator { next_product: 3, next_sale: 1 }
//! Market B ── IdAllocator { next_product: 0, next_sale: 0 }   (independent)
//! ```
//!
//! Ids start at 0, only ever grow, and are never handed out twice, even
//! after the entity they were issued for is removed. Ids whose entity left
//! the ledger are retired and never admitted again.

use std::collections::HashSet;

use market_core::{ProductId, SaleId};

#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next_product: u64,
    next_sale: u64,
    retired_products: HashSet<ProductId>,
    retired_sales: HashSet<SaleId>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_product_id(&mut self) -> ProductId {
        let id = ProductId::new(self.next_product);
        self.next_product += 1;
        id
    }

    pub fn next_sale_id(&mut self) -> SaleId {
        let id = self.upcoming_sale_id();
        self.next_sale += 1;
        id
    }

    /// The id the next call to [`IdAllocator::next_sale_id`] will return.
    pub fn upcoming_sale_id(&self) -> SaleId {
        SaleId::new(self.next_sale)
    }

    /// Whether `id` came out of this allocator.
    pub fn issued_product(&self, id: ProductId) -> bool {
        id.get() < self.next_product
    }

    /// Whether `id` came out of this allocator.
    pub fn issued_sale(&self, id: SaleId) -> bool {
        id.get() < self.next_sale
    }

    pub fn retire_product(&mut self, id: ProductId) {
        self.retired_products.insert(id);
    }

    pub fn retire_sale(&mut self, id: SaleId) {
        self.retired_sales.insert(id);
    }

    pub fn is_retired_product(&self, id: ProductId) -> bool {
        self.retired_products.contains(&id)
    }

    pub fn is_retired_sale(&self, id: SaleId) -> bool {
        self.retired_sales.contains(&id)
    }
}
