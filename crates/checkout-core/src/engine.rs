//! # Order Engine
//!
//! Bounded quantity updates and the totals derived from a catalog.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Order Engine                                    │
//! │                                                                         │
//! │  "+" clicked ──► increment(catalog, id) ──► new Catalog snapshot        │
//! │  "-" clicked ──► decrement(catalog, id) ──► new Catalog snapshot        │
//! │                                                  │                      │
//! │                                                  ▼                      │
//! │                          raw_total(catalog)  = Σ product.total          │
//! │                                                  │                      │
//! │                          discount(raw_total) = 10% if > $1000.00        │
//! │                                                  │                      │
//! │                          net_total(raw, discount) = raw - discount      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding
//! Row totals and the raw total are exact in cents. The discount and the net
//! total are each rounded once, half-up, from the exact raw total: on
//! 1000.25 the discount is 100.025 → 100.03 and the net is 900.225 →
//! 900.23. The two rounded figures may therefore differ from the raw total
//! by one cent in sum.
//!
//! ## No-ops, not errors
//! An unknown id, an increment at `available_count` and a decrement at zero
//! all return the input catalog unchanged. Callers may invoke the engine
//! unconditionally; the display surface disabling its buttons is a
//! convenience, not a requirement.
//!
//! ## Derived, never stored
//! [`OrderSummary`] is recomputed from the catalog on every read. There is
//! no running total that could drift away from the row totals.

use serde::Serialize;
use ts_rs::TS;

use crate::catalog::Catalog;
use crate::money::Money;
use crate::types::ProductId;
use crate::{DISCOUNT_RATE_BPS, DISCOUNT_THRESHOLD};

// =============================================================================
// Quantity Updates
// =============================================================================

/// Orders one more unit of `id`.
///
/// Returns `catalog` unchanged when the id is unknown or the product is
/// already at its available count.
///
/// ## Example
/// ```rust
/// use checkout_core::{engine, Catalog, Money, Product, ProductId};
///
/// let id = ProductId::new("1");
/// let catalog = Catalog::new(vec![Product::new(id.clone(), "TV", 1, Money::from_cents(500))]);
///
/// let once = engine::increment(&catalog, &id);
/// let twice = engine::increment(&once, &id);
/// assert_eq!(twice.find_by_id(&id).unwrap().ordered_quantity(), 1);
/// ```
pub fn increment(catalog: &Catalog, id: &ProductId) -> Catalog {
    catalog.update(id, |product| product.incremented())
}

/// Takes one unit of `id` off the order.
///
/// Returns `catalog` unchanged when the id is unknown or nothing of it is
/// ordered.
pub fn decrement(catalog: &Catalog, id: &ProductId) -> Catalog {
    catalog.update(id, |product| product.decremented())
}

// =============================================================================
// Totals
// =============================================================================

/// Sum of every row total.
pub fn raw_total(catalog: &Catalog) -> Money {
    catalog.iter().map(|p| p.total()).sum()
}

/// Discount earned by `raw_total` under the default policy: 10% when the
/// raw total is strictly above $1000.00, zero otherwise.
///
/// ## Example
/// ```rust
/// use checkout_core::{engine, Money};
///
/// assert!(engine::discount(Money::from_cents(100_000)).is_zero());
/// assert_eq!(engine::discount(Money::from_cents(130_000)).cents(), 13_000);
/// ```
pub fn discount(raw_total: Money) -> Money {
    DiscountPolicy::default().discount(raw_total)
}

/// Amount due after an already exact discount.
///
/// [`OrderSummary`] does not use this with a rounded discount; it rounds
/// the net from the raw total instead (see [`DiscountPolicy::net_total`]).
#[inline]
pub fn net_total(raw_total: Money, discount: Money) -> Money {
    raw_total - discount
}

// =============================================================================
// Discount Policy
// =============================================================================

/// Flat-rate discount above a spending threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DiscountPolicy {
    /// Raw totals strictly above this amount earn the discount.
    pub threshold: Money,

    /// Discount rate in basis points (1000 = 10%).
    pub rate_bps: u32,
}

impl DiscountPolicy {
    pub const fn new(threshold: Money, rate_bps: u32) -> Self {
        DiscountPolicy {
            threshold,
            rate_bps,
        }
    }

    /// A policy that never discounts.
    pub const fn none() -> Self {
        DiscountPolicy {
            threshold: Money::zero(),
            rate_bps: 0,
        }
    }

    /// Discount for `raw_total`, rounded half-up to the cent.
    ///
    /// The threshold comparison is strict: exactly reaching it earns
    /// nothing.
    pub fn discount(&self, raw_total: Money) -> Money {
        if raw_total > self.threshold {
            raw_total.percentage(self.rate_bps)
        } else {
            Money::zero()
        }
    }

    /// Amount due for `raw_total`: `raw_total × (1 − rate)` rounded half-up
    /// to the cent, or `raw_total` itself when no discount applies.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::{DiscountPolicy, Money};
    ///
    /// // 1000.25 - 100.025 = 900.225
    /// let net = DiscountPolicy::default().net_total(Money::from_cents(100_025));
    /// assert_eq!(net.to_string(), "900.23");
    /// ```
    pub fn net_total(&self, raw_total: Money) -> Money {
        if raw_total > self.threshold {
            raw_total.percentage(10_000u32.saturating_sub(self.rate_bps))
        } else {
            raw_total
        }
    }
}

impl Default for DiscountPolicy {
    /// `> $1000.00 → 10%`
    fn default() -> Self {
        DiscountPolicy::new(DISCOUNT_THRESHOLD, DISCOUNT_RATE_BPS)
    }
}

// =============================================================================
// Order Summary
// =============================================================================

/// Order-level figures derived from a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderSummary {
    /// Sum of row totals.
    pub raw_total: Money,

    /// Discount earned by `raw_total`.
    pub discount: Money,

    /// `raw_total - raw_total × rate`, rounded once.
    pub net_total: Money,
}

impl OrderSummary {
    /// Derives the summary under the default discount policy.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self::with_policy(catalog, &DiscountPolicy::default())
    }

    /// Derives the summary under `policy`.
    pub fn with_policy(catalog: &Catalog, policy: &DiscountPolicy) -> Self {
        Self::from_raw_total(raw_total(catalog), policy)
    }

    /// Derives discount and net total from an already computed raw total.
    pub fn from_raw_total(raw_total: Money, policy: &DiscountPolicy) -> Self {
        OrderSummary {
            raw_total,
            discount: policy.discount(raw_total),
            net_total: policy.net_total(raw_total),
        }
    }

    /// Whether a discount line should be shown.
    pub fn has_discount(&self) -> bool {
        self.discount.is_positive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Product;

    fn id(n: u64) -> ProductId {
        ProductId::from(n)
    }

    fn product(n: u64, available: u32, price_cents: i64) -> Product {
        Product::new(id(n), format!("Product {}", n), available, Money::from_cents(price_cents))
    }

    fn assert_invariants(catalog: &Catalog) {
        for p in catalog {
            assert!(p.ordered_quantity() <= p.available_count());
            assert_eq!(p.total(), p.price() * p.ordered_quantity());
        }
        let summary = OrderSummary::from_catalog(catalog);
        assert_eq!(summary.raw_total, catalog.iter().map(|p| p.total()).sum::<Money>());
        // each figure is rounded separately, so they agree within a cent
        let gap = (summary.raw_total - summary.discount - summary.net_total).cents();
        assert!((0..=1).contains(&gap.abs()), "gap of {gap} cents");
    }

    #[test]
    fn test_five_increments_reach_threshold_without_discount() {
        let mut catalog = Catalog::new(vec![product(1, 5, 20000)]);
        for _ in 0..5 {
            catalog = increment(&catalog, &id(1));
        }

        let p = catalog.find_by_id(&id(1)).unwrap();
        assert_eq!(p.ordered_quantity(), 5);
        assert_eq!(p.total().to_string(), "1000.00");

        let summary = OrderSummary::from_catalog(&catalog);
        assert_eq!(summary.raw_total.to_string(), "1000.00");
        assert_eq!(summary.discount.to_string(), "0.00");
        assert_eq!(summary.net_total.to_string(), "1000.00");
        assert!(!summary.has_discount());

        // sixth increment is refused
        let again = increment(&catalog, &id(1));
        assert!(again.shares_storage_with(&catalog));
        assert_eq!(again.find_by_id(&id(1)).unwrap().ordered_quantity(), 5);

        let fewer = decrement(&again, &id(1));
        let p = fewer.find_by_id(&id(1)).unwrap();
        assert_eq!(p.ordered_quantity(), 4);
        assert_eq!(p.total().to_string(), "800.00");
        assert_eq!(raw_total(&fewer).to_string(), "800.00");
    }

    #[test]
    fn test_two_products_over_threshold() {
        let catalog = Catalog::new(vec![
            product(1, 5, 60000).with_quantity(2),
            product(2, 5, 10000).with_quantity(1),
        ]);

        let summary = OrderSummary::from_catalog(&catalog);
        assert_eq!(summary.raw_total.to_string(), "1300.00");
        assert_eq!(summary.discount.to_string(), "130.00");
        assert_eq!(summary.net_total.to_string(), "1170.00");
        assert!(summary.has_discount());
    }

    #[test]
    fn test_discount_threshold_is_strict() {
        assert!(discount(Money::from_cents(100_000)).is_zero());

        let summary = OrderSummary::from_raw_total(Money::from_cents(100_001), &DiscountPolicy::default());
        assert_eq!(summary.discount.to_string(), "100.00");
        assert_eq!(summary.net_total.to_string(), "900.01");
    }

    #[test]
    fn test_net_total_rounds_once_on_half_cent() {
        // 1000.25 → discount 100.025, net 900.225
        let catalog = Catalog::new(vec![product(1, 1, 100_025).with_quantity(1)]);
        let summary = OrderSummary::from_catalog(&catalog);

        assert_eq!(summary.raw_total.to_string(), "1000.25");
        assert_eq!(summary.discount.to_string(), "100.03");
        assert_eq!(summary.net_total.to_string(), "900.23");
    }

    #[test]
    fn test_net_total_without_discount_is_raw_total() {
        let policy = DiscountPolicy::default();
        assert_eq!(policy.net_total(Money::from_cents(100_000)), Money::from_cents(100_000));
        assert_eq!(net_total(Money::from_cents(130_000), discount(Money::from_cents(130_000))).cents(), 117_000);
    }

    #[test]
    fn test_full_order_at_value_cap_does_not_overflow() {
        let catalog = Catalog::try_from_records(vec![crate::ProductRecord::new(1u64, "Tanker", 100, 1e14)]).unwrap();

        let full = (0..150).fold(catalog, |c, _| increment(&c, &id(1)));
        let summary = OrderSummary::from_catalog(&full);

        assert_eq!(full.find_by_id(&id(1)).map(|p| p.ordered_quantity()), Some(100));
        assert_eq!(summary.raw_total, crate::MAX_CATALOG_VALUE);
        assert_eq!(summary.discount, crate::MAX_CATALOG_VALUE.percentage(1000));
        assert_invariants(&full);
    }

    #[test]
    fn test_decrement_at_zero_is_noop() {
        let catalog = Catalog::new(vec![product(1, 5, 100)]);
        let after = decrement(&catalog, &id(1));
        assert!(after.shares_storage_with(&catalog));
        assert_eq!(after, catalog);
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let catalog = Catalog::new(vec![product(1, 5, 100)]);
        assert!(increment(&catalog, &id(7)).shares_storage_with(&catalog));
        assert!(decrement(&catalog, &id(7)).shares_storage_with(&catalog));
    }

    #[test]
    fn test_empty_catalog_totals() {
        let summary = OrderSummary::from_catalog(&Catalog::empty());
        assert!(summary.raw_total.is_zero());
        assert!(summary.discount.is_zero());
        assert!(summary.net_total.is_zero());
    }

    #[test]
    fn test_bounds_hold_over_long_sequence() {
        let mut catalog = Catalog::new(vec![product(1, 3, 1999), product(2, 0, 500), product(3, 10, 1)]);

        // deterministic mix of ups and downs, heavily skewed to hit both bounds
        for step in 0u64..200 {
            let target = id(step % 4 + 1);
            catalog = if step % 7 < 4 {
                increment(&catalog, &target)
            } else {
                decrement(&catalog, &target)
            };
            assert_invariants(&catalog);
        }
    }

    #[test]
    fn test_action_order_does_not_matter() {
        let start = Catalog::new(vec![product(1, 4, 33333), product(2, 2, 10)]);
        // (product, is_increment) - a fixed multiset applied in every rotation
        let actions = [(1, true), (1, true), (2, true), (1, false), (2, true), (1, true)];

        let apply = |order: &[(u64, bool)]| {
            order.iter().fold(start.clone(), |c, &(n, up)| {
                if up {
                    increment(&c, &id(n))
                } else {
                    decrement(&c, &id(n))
                }
            })
        };

        let expected = apply(&actions);
        for shift in 1..actions.len() {
            let mut rotated = actions.to_vec();
            rotated.rotate_left(shift);
            let mut reversed = rotated.clone();
            reversed.reverse();

            // decrements scheduled before any increment are refused at zero,
            // so only compare orders that never decrement below zero
            for order in [rotated, reversed] {
                if never_underflows(&order) {
                    let result = apply(&order);
                    assert_eq!(result, expected);
                    assert_eq!(raw_total(&result), raw_total(&expected));
                }
            }
        }
    }

    fn never_underflows(order: &[(u64, bool)]) -> bool {
        let mut counts = std::collections::HashMap::new();
        order.iter().all(|&(n, up)| {
            let c = counts.entry(n).or_insert(0i32);
            *c += if up { 1 } else { -1 };
            *c >= 0
        })
    }

    #[test]
    fn test_custom_policy() {
        let policy = DiscountPolicy::new(Money::from_cents(5000), 2500);
        assert!(policy.discount(Money::from_cents(5000)).is_zero());
        assert_eq!(policy.discount(Money::from_cents(10000)).cents(), 2500);
        assert_eq!(policy.net_total(Money::from_cents(10000)).cents(), 7500);
        assert!(DiscountPolicy::none().discount(Money::from_cents(1_000_000)).is_zero());
    }
}
