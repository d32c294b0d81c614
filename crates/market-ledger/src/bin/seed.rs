//! # Demo Ledger Generator
//!
//! Builds an in-memory ledger with a stocked catalog and a few days of
//! sales, runs a partial and a full refund, and prints the result.
//!
//! ## Usage
//! ```bash
//! # 24 products (default)
//! cargo run -p market-ledger --bin seed
//!
//! # Custom catalog size
//! cargo run -p market-ledger --bin seed -- --count 60
//!
//! # Sale summaries as JSON
//! cargo run -p market-ledger --bin seed -- --json
//! ```
//!
//! `MARKET_*` environment variables configure the ledger, `RUST_LOG` the
//! log output.

use std::env;

use anyhow::{bail, Context};
use chrono::{Days, NaiveDate};
use market_core::{Money, ProductCategory, ProductId};
use market_ledger::{criteria, Market, MarketConfig, SaleSummary};
use tracing::info;

/// Product names per category, cycled when the catalog is larger.
const NAMES: &[(ProductCategory, &[&str])] = &[
    (ProductCategory::Beverages, &["Orange Juice", "Sparkling Water", "Iced Tea", "Cola"]),
    (ProductCategory::Snacks, &["Potato Chips", "Pretzels", "Trail Mix", "Chocolate Bar"]),
    (ProductCategory::Dairy, &["Milk", "Cheddar", "Greek Yogurt", "Butter"]),
    (ProductCategory::Frozen, &["Ice Cream", "Frozen Pizza", "Peas", "Waffles"]),
    (ProductCategory::Grocery, &["Pasta", "Rice", "Peanut Butter", "Canned Tomatoes"]),
    (ProductCategory::Bakery, &["Sourdough", "Bagels", "Croissant", "Muffin"]),
    (ProductCategory::Produce, &["Apples", "Bananas", "Avocado", "Carrots"]),
    (ProductCategory::Household, &["Dish Soap", "Paper Towels", "Sponges", "Trash Bags"]),
];

const DEFAULT_COUNT: usize = 24;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    let mut count = DEFAULT_COUNT;
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                let raw = args.get(i + 1).context("--count needs a value")?;
                count = raw
                    .parse()
                    .with_context(|| format!("invalid --count value: {}", raw))?;
                i += 1;
            }
            "--json" => json = true,
            "--help" | "-h" => {
                println!("Market Ledger Seed");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to generate (default: {})", DEFAULT_COUNT);
                println!("      --json         Print sale summaries as JSON");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => bail!("unknown argument: {}", other),
        }
        i += 1;
    }

    if count == 0 {
        bail!("--count must be at least 1");
    }

    market_ledger::init_tracing();

    let config = MarketConfig::from_env().context("reading MARKET_* configuration")?;
    let mut market = Market::with_config(config);

    let products = stock_catalog(&mut market, count)?;
    info!(products = products.len(), "Catalog stocked");

    let start = NaiveDate::from_ymd_opt(2024, 3, 1).context("invalid start date")?;
    let sale_ids = record_sales(&mut market, &products, start)?;
    info!(sales = sale_ids.len(), "Sales recorded");

    // Customer brings back part of the first sale, then all of the second.
    if let Some(&first) = sale_ids.first() {
        let line = market.get_sale_by_id(first)?.items()[0].clone();
        market.refund_product(first, line.product_id(), 1)?;
    }
    if let Some(&second) = sale_ids.get(1) {
        market.refund_entire_sale(second)?;
    }

    let summaries = market
        .sales()
        .iter()
        .map(|s| market.sale_summary(s.id()))
        .collect::<Result<Vec<SaleSummary>, _>>()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    print_report(&market, &summaries, start)?;
    Ok(())
}

/// Adds `count` products spread across every category.
fn stock_catalog(market: &mut Market, count: usize) -> anyhow::Result<Vec<ProductId>> {
    let mut ids = Vec::with_capacity(count);

    for seed in 0..count {
        let (category, names) = NAMES[seed % NAMES.len()];
        let round = seed / NAMES.len();
        let base = names[round % names.len()];
        let name = if round < names.len() {
            base.to_string()
        } else {
            format!("{} #{}", base, round / names.len() + 1)
        };

        // $0.99 - $9.98, stock 5 - 44
        let unit_value = Money::from_cents(99 + ((seed as i64 * 37) % 900));
        let quantity = 5 + (seed as i64 * 13) % 40;

        ids.push(market.create_product(name, unit_value, category, quantity)?);
    }

    Ok(ids)
}

/// One sale per day for a week, each with up to three lines.
fn record_sales(
    market: &mut Market,
    products: &[ProductId],
    start: NaiveDate,
) -> anyhow::Result<Vec<market_core::SaleId>> {
    let mut sales = Vec::new();

    for day in 0..7u64 {
        let date = start
            .checked_add_days(Days::new(day))
            .context("date out of range")?;
        let lines: Vec<(ProductId, i64)> = (0..3)
            .map(|k| {
                let idx = (day as usize * 5 + k * 3) % products.len();
                (products[idx], 1 + ((day as i64 + k as i64) % 4))
            })
            .collect();

        sales.push(market.new_sale(date, &lines)?);
    }

    Ok(market.add_sales(sales)?)
}

fn print_report(market: &Market, summaries: &[SaleSummary], start: NaiveDate) -> anyhow::Result<()> {
    let config = market.config();

    println!("{}", config.store_name);
    println!("{}", "=".repeat(config.store_name.chars().count()));
    println!();

    println!("Catalog ({} products)", market.product_count());
    for product in market.products() {
        println!(
            "  #{:<4} {:<24} {:<10} {:>9}  qty {}",
            product.id().to_string(),
            product.name,
            product.category.label(),
            config.format_currency(product.unit_value),
            product.quantity
        );
    }
    println!();

    println!("Sales ({})", market.sale_count());
    for summary in summaries {
        println!("{}", summary);
    }
    println!();

    let revenue: Money = market.sales().iter().map(|s| s.price()).sum();
    println!("Revenue: {}", config.format_currency(revenue));

    let end = start.checked_add_days(Days::new(2)).context("date out of range")?;
    let early = market
        .get_sales_by_criteria(criteria::dated_between(start, end))
        .map(|found| found.len())
        .unwrap_or(0);
    println!("Sales from {} to {}: {}", start, end, early);

    let low_stock = market
        .get_products_by_criteria(|p| p.quantity < 10)
        .map(|found| found.len())
        .unwrap_or(0);
    println!("Products below 10 units: {}", low_stock);

    Ok(())
}
