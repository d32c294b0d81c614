//! # Sale Summaries
//!
//! Flat, serializable views of recorded sales for reports and receipts.
//! Built by [`crate::Market::sale_summary`].

use std::fmt;

use chrono::NaiveDate;
use market_core::{Money, ProductId, SaleId};
use serde::{Deserialize, Serialize};

/// One line of a [`SaleSummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleLineSummary {
    pub product_id: ProductId,

    /// `None` once the product has been removed from the catalog.
    pub product_name: Option<String>,

    pub bought_count: i64,
}

/// Receipt-style view of a recorded sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleSummary {
    pub sale_id: SaleId,
    pub date: NaiveDate,
    pub price: Money,
    pub lines: Vec<SaleLineSummary>,
}

impl SaleSummary {
    /// Units still counted as sold across all lines.
    pub fn total_units(&self) -> i64 {
        self.lines.iter().map(|l| l.bought_count).sum()
    }
}

/// Renders as a small fixed-width table:
///
/// ```text
/// Sale #0  2024-03-01  $10.00
///   #0    Milk                      x4
/// ```
impl fmt::Display for SaleSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sale #{}  {}  {}", self.sale_id, self.date, self.price)?;
        for line in &self.lines {
            let name = line.product_name.as_deref().unwrap_or("<removed>");
            write!(
                f,
                "\n  #{:<4} {:<24} x{}",
                line.product_id.to_string(),
                name,
                line.bought_count
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> SaleSummary {
        SaleSummary {
            sale_id: SaleId::new(0),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            price: Money::from_cents(1300),
            lines: vec![
                SaleLineSummary {
                    product_id: ProductId::new(0),
                    product_name: Some("Milk".to_string()),
                    bought_count: 4,
                },
                SaleLineSummary {
                    product_id: ProductId::new(7),
                    product_name: None,
                    bought_count: 1,
                },
            ],
        }
    }

    #[test]
    fn test_display() {
        let text = summary().to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Sale #0  2024-03-01  $13.00");
        assert!(lines[1].contains("Milk"));
        assert!(lines[1].ends_with("x4"));
        assert!(lines[2].contains("<removed>"));
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(summary()).unwrap();

        assert_eq!(json["saleId"], 0);
        assert_eq!(json["date"], "2024-03-01");
        assert_eq!(json["price"], 1300);
        assert_eq!(json["lines"][0]["productName"], "Milk");
        assert_eq!(json["lines"][1]["productName"], serde_json::Value::Null);
        assert_eq!(json["lines"][0]["boughtCount"], 4);
    }

    #[test]
    fn test_total_units() {
        assert_eq!(summary().total_units(), 5);
    }
}
