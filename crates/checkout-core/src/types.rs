//! # Domain Types
//!
//! Core domain types of the checkout table.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐          ┌─────────────────────┐               │
//! │  │   ProductRecord     │  valid-  │      Product        │               │
//! │  │  ─────────────────  │  ation   │  ─────────────────  │               │
//! │  │  id (num | text)    │ ───────► │  id (ProductId)     │               │
//! │  │  name               │          │  name               │               │
//! │  │  availableCount i64 │          │  available_count u32│               │
//! │  │  price f64          │          │  price Money        │               │
//! │  │  orderedQuantity?   │ ignored  │  ordered_quantity 0 │               │
//! │  │  total?             │ ignored  │  total Money 0      │               │
//! │  └─────────────────────┘          └─────────────────────┘               │
//! │     provider contract                 catalog row                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Row Invariants
//! A [`Product`] can only be built or changed through methods that keep
//! `0 <= ordered_quantity <= available_count` and
//! `total == ordered_quantity * price`. Its fields are private.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product Id
// =============================================================================

/// Opaque, stable product key.
///
/// Providers send ids as JSON numbers or strings; both are kept as their
/// canonical text so `1`, `1.0` and `"1"` name the same product. Only
/// strings are compared verbatim: `"1.0"` stays `"1.0"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a product id from its text form.
    pub fn new(id: impl Into<String>) -> Self {
        ProductId(id.into())
    }

    /// Returns the id as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        ProductId(id.to_string())
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        ProductId(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        ProductId(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => ProductId(text),
            RawId::Number(number) => ProductId(canonical_number(&number)),
        })
    }
}

/// Integral numbers print without a fraction; anything else as JSON wrote it.
fn canonical_number(number: &serde_json::Number) -> String {
    // beyond 2^53 an f64 no longer names a single integer
    const EXACT_F64_INT: f64 = 9_007_199_254_740_992.0;

    match number.as_f64() {
        Some(value) if number.is_f64() && value.fract() == 0.0 && value.abs() <= EXACT_F64_INT => {
            format!("{}", value as i64)
        }
        _ => number.to_string(),
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog row: a product together with its ordered quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Stable key.
    id: ProductId,

    /// Display name.
    name: String,

    /// Upper bound on the ordered quantity.
    available_count: u32,

    /// Unit price.
    price: Money,

    /// Quantity the customer is ordering, within `0..=available_count`.
    ordered_quantity: u32,

    /// `ordered_quantity × price`, recomputed on every quantity change.
    total: Money,
}

impl Product {
    /// Creates a product with nothing ordered yet.
    pub fn new(id: ProductId, name: impl Into<String>, available_count: u32, price: Money) -> Self {
        Product {
            id,
            name: name.into(),
            available_count,
            price,
            ordered_quantity: 0,
            total: Money::zero(),
        }
    }

    #[inline]
    pub fn id(&self) -> &ProductId {
        &self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn available_count(&self) -> u32 {
        self.available_count
    }

    #[inline]
    pub fn price(&self) -> Money {
        self.price
    }

    #[inline]
    pub fn ordered_quantity(&self) -> u32 {
        self.ordered_quantity
    }

    /// Row total (`ordered_quantity × price`).
    #[inline]
    pub fn total(&self) -> Money {
        self.total
    }

    /// Whether one more unit may be ordered.
    #[inline]
    pub fn can_increase(&self) -> bool {
        self.ordered_quantity < self.available_count
    }

    /// Whether one unit may be taken off the order.
    #[inline]
    pub fn can_decrease(&self) -> bool {
        self.ordered_quantity > 0
    }

    /// Returns this product with the ordered quantity set to `quantity`,
    /// clamped to `0..=available_count`, and the row total recomputed.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::{Money, Product, ProductId};
    ///
    /// let tv = Product::new(ProductId::new("1"), "TV", 5, Money::from_cents(20000))
    ///     .with_quantity(9);
    /// assert_eq!(tv.ordered_quantity(), 5);
    /// assert_eq!(tv.total().cents(), 100_000);
    /// ```
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.ordered_quantity = quantity.min(self.available_count);
        self.total = self.price.multiply_quantity(self.ordered_quantity);
        self
    }

    /// One more unit, or `None` at the upper bound.
    pub fn incremented(&self) -> Option<Self> {
        if !self.can_increase() {
            return None;
        }
        Some(self.clone().with_quantity(self.ordered_quantity + 1))
    }

    /// One fewer unit, or `None` at zero.
    pub fn decremented(&self) -> Option<Self> {
        if !self.can_decrease() {
            return None;
        }
        Some(self.clone().with_quantity(self.ordered_quantity - 1))
    }
}

// =============================================================================
// Provider Record
// =============================================================================

/// A product as delivered by the external provider.
///
/// ## Wire Format
/// ```json
/// { "id": 1, "name": "Headphones", "availableCount": 5, "price": 200 }
/// ```
/// `orderedQuantity` and `total` may be present but are ignored: a freshly
/// loaded catalog always starts with nothing ordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    pub available_count: i64,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordered_quantity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
}

impl ProductRecord {
    /// Builds a record with no pre-populated quantity.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, available_count: i64, price: f64) -> Self {
        ProductRecord {
            id: id.into(),
            name: name.into(),
            available_count,
            price,
            ordered_quantity: None,
            total: None,
        }
    }

    /// Whether the provider sent a non-zero quantity or total that the
    /// loaded catalog will discard.
    pub fn has_prefilled_order(&self) -> bool {
        self.ordered_quantity.is_some_and(|q| q != 0) || self.total.is_some_and(|t| t != 0.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(available: u32, price_cents: i64) -> Product {
        Product::new(ProductId::from(1u64), "Headphones", available, Money::from_cents(price_cents))
    }

    #[test]
    fn test_new_product_has_nothing_ordered() {
        let p = product(5, 20000);
        assert_eq!(p.ordered_quantity(), 0);
        assert!(p.total().is_zero());
        assert!(p.can_increase());
        assert!(!p.can_decrease());
    }

    #[test]
    fn test_with_quantity_recomputes_total() {
        let p = product(5, 20000).with_quantity(4);
        assert_eq!(p.ordered_quantity(), 4);
        assert_eq!(p.total().cents(), 80000);
    }

    #[test]
    fn test_with_quantity_clamps_to_available() {
        let p = product(2, 999).with_quantity(10);
        assert_eq!(p.ordered_quantity(), 2);
        assert_eq!(p.total().cents(), 1998);
        assert!(!p.can_increase());
    }

    #[test]
    fn test_incremented_and_decremented_bounds() {
        let at_max = product(1, 100).with_quantity(1);
        assert!(at_max.incremented().is_none());
        assert_eq!(at_max.decremented().map(|p| p.ordered_quantity()), Some(0));

        let at_zero = product(1, 100);
        assert!(at_zero.decremented().is_none());
        assert_eq!(at_zero.incremented().map(|p| p.total().cents()), Some(100));
    }

    #[test]
    fn test_zero_stock_product_cannot_change() {
        let p = product(0, 500);
        assert!(p.incremented().is_none());
        assert!(p.decremented().is_none());
    }

    #[test]
    fn test_product_id_from_number_or_text() {
        let numeric: ProductId = serde_json::from_str("1").unwrap();
        let text: ProductId = serde_json::from_str("\"1\"").unwrap();
        assert_eq!(numeric, text);
        assert_eq!(numeric, ProductId::from(1u64));
        assert_eq!(serde_json::to_string(&numeric).unwrap(), "\"1\"");
    }

    #[test]
    fn test_integral_float_id_matches_integer_id() {
        let float: ProductId = serde_json::from_str("1.0").unwrap();
        let negative_zero: ProductId = serde_json::from_str("-0.0").unwrap();
        let fractional: ProductId = serde_json::from_str("1.5").unwrap();
        let quoted: ProductId = serde_json::from_str("\"1.0\"").unwrap();

        assert_eq!(float, ProductId::from(1u64));
        assert_eq!(negative_zero.as_str(), "0");
        assert_eq!(fractional.as_str(), "1.5");
        assert_eq!(quoted.as_str(), "1.0");
    }

    #[test]
    fn test_record_wire_format() {
        let record: ProductRecord = serde_json::from_str(
            r#"{"id": 3, "name": "Speaker", "availableCount": 7, "price": 49.99}"#,
        )
        .unwrap();
        assert_eq!(record.id, ProductId::from(3u64));
        assert_eq!(record.available_count, 7);
        assert_eq!(record.ordered_quantity, None);
        assert!(!record.has_prefilled_order());
    }

    #[test]
    fn test_record_with_prefilled_order() {
        let record: ProductRecord = serde_json::from_str(
            r#"{"id": "a", "name": "Cable", "availableCount": 2, "price": 5, "orderedQuantity": 1, "total": 5}"#,
        )
        .unwrap();
        assert!(record.has_prefilled_order());
    }

    #[test]
    fn test_product_serializes_camel_case() {
        let json = serde_json::to_value(product(5, 20000).with_quantity(1)).unwrap();
        assert_eq!(json["availableCount"], 5);
        assert_eq!(json["orderedQuantity"], 1);
        assert_eq!(json["total"], 20000);
    }
}
