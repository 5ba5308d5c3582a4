//! # Display View Models
//!
//! What the checkout table renders, computed from a catalog snapshot.
//!
//! ```text
//! ┌────┬────────────┬───────────┬─────────┬─────┬─────────┬───────┐
//! │ ID │ Name       │ Available │ Price   │ Qty │ Total   │       │
//! ├────┼────────────┼───────────┼─────────┼─────┼─────────┼───────┤
//! │ 1  │ Headphones │ 5         │ $200.00 │ 5   │ $1000.00│ [-]   │  + disabled
//! │ 2  │ Cable      │ 3         │ $9.99   │ 0   │ $0.00   │ [+]   │  - disabled
//! └────┴────────────┴───────────┴─────────┴─────┴─────────┴───────┘
//!   Discount: 100.00$        ← only when discount > 0
//!   Total: 1009.99$          ← always, net total
//! ```
//!
//! Amounts in the view models are already formatted to two decimals; the
//! currency symbol is left to the renderer.

use serde::Serialize;
use ts_rs::TS;

use crate::catalog::Catalog;
use crate::engine::{DiscountPolicy, OrderSummary};
use crate::money::format_money;
use crate::types::Product;

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductRow {
    pub id: String,
    pub name: String,
    pub available_count: u32,
    pub price: String,
    pub ordered_quantity: u32,
    pub total: String,
    /// "+" enabled: `ordered_quantity < available_count`
    pub can_increase: bool,
    /// "-" enabled: `ordered_quantity > 0`
    pub can_decrease: bool,
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        ProductRow {
            id: product.id().to_string(),
            name: product.name().to_string(),
            available_count: product.available_count(),
            price: format_money(product.price()),
            ordered_quantity: product.ordered_quantity(),
            total: format_money(product.total()),
            can_increase: product.can_increase(),
            can_decrease: product.can_decrease(),
        }
    }
}

/// The lines under the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SummaryView {
    /// Formatted discount, present only when a discount applies.
    pub discount_line: Option<String>,

    /// Formatted net total, always present.
    pub total_line: String,
}

impl From<&OrderSummary> for SummaryView {
    fn from(summary: &OrderSummary) -> Self {
        SummaryView {
            discount_line: summary.has_discount().then(|| format_money(summary.discount)),
            total_line: format_money(summary.net_total),
        }
    }
}

/// Everything the checkout table shows for one catalog snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckoutView {
    pub rows: Vec<ProductRow>,
    pub summary: SummaryView,
}

impl CheckoutView {
    pub fn build(catalog: &Catalog, policy: &DiscountPolicy) -> Self {
        CheckoutView {
            rows: catalog.iter().map(ProductRow::from).collect(),
            summary: SummaryView::from(&OrderSummary::with_policy(catalog, policy)),
        }
    }
}
