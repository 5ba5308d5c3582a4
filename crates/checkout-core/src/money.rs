//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely, plus the
//! two-decimal currency formatting used by the checkout table.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Adding and removing a $0.10 item with floats:                          │
//! │    0.1 + 0.2 - 0.1 = 0.20000000000000004  ❌ drift                      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Every row total and the order total are sums of cents.              │
//! │    The only rounding step is the discount, computed once from the      │
//! │    raw total, never accumulated.                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use checkout_core::money::Money;
//!
//! let price = Money::from_cents(1099); // $10.99
//! let row_total = price * 3u32;        // $32.97
//! assert_eq!(row_total.to_string(), "32.97");
//!
//! // Provider prices arrive as decimal text and are parsed exactly
//! let parsed = Money::parse_decimal("19.99").unwrap();
//! assert_eq!(parsed.cents(), 1999);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in cents.
///
/// ## Design Decisions
/// - **i64 (signed)**: differences (`raw - discount`) stay representable
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: serde support so view models can carry raw cents
///
/// ## Where Money is Used
/// ```text
/// ProductRecord.price ──► Product.price ──► Product.total (qty × price)
///                                                 │
///                                                 ▼
///                         OrderSummary.raw_total (Σ totals)
///                                                 │
///                              ┌──────────────────┴──────────┐
///                              ▼                             ▼
///                   OrderSummary.discount        OrderSummary.net_total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Parses a decimal amount such as `"19.99"`, `"200"` or `"0.5"`.
    ///
    /// ## Rules
    /// - Optional leading `-`
    /// - Digits, with at most one decimal point
    /// - Fractional digits beyond the cent are rounded half-up
    /// - Exponent notation is rejected
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("200").unwrap().cents(), 20000);
    /// assert_eq!(Money::parse_decimal("0.5").unwrap().cents(), 50);
    /// assert_eq!(Money::parse_decimal("9.999").unwrap().cents(), 1000);
    /// assert!(Money::parse_decimal("1e3").is_err());
    /// ```
    pub fn parse_decimal(text: &str) -> CoreResult<Self> {
        let invalid = |reason: &str| CoreError::InvalidAmount {
            value: text.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = text.trim();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let (major, fraction) = match unsigned.split_once('.') {
            Some((major, fraction)) => (major, fraction),
            None => (unsigned, ""),
        };

        if major.is_empty() && fraction.is_empty() {
            return Err(invalid("no digits"));
        }
        if fraction.contains('.') {
            return Err(invalid("more than one decimal point"));
        }
        if !major.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid("only digits and a single decimal point are allowed"));
        }

        let major_value: i64 = if major.is_empty() {
            0
        } else {
            major.parse().map_err(|_| invalid("amount too large"))?
        };

        let digits = fraction.as_bytes();
        let digit = |i: usize| digits.get(i).map_or(0, |d| i64::from(d - b'0'));
        let mut minor = digit(0) * 10 + digit(1);
        if digit(2) >= 5 {
            minor += 1;
        }

        let magnitude = major_value
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(|| invalid("amount too large"))?;

        Ok(Money(if negative { -magnitude } else { magnitude }))
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).dollars(), 10);
    /// assert_eq!(Money::from_cents(-550).dollars(), -5);
    /// ```
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by an ordered quantity.
    ///
    /// Saturates at the `i64` bounds. Validated catalogs never get there:
    /// every row's `price × available_count` is capped by
    /// [`MAX_CATALOG_VALUE`](crate::MAX_CATALOG_VALUE).
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(20000); // $200.00
    /// assert_eq!(unit_price.multiply_quantity(5).cents(), 100_000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }

    /// Returns `rate_bps` basis points of this amount, rounded half-up to
    /// the cent.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// // 10% of $1000.01 is $100.001, which is $100.00 at cent precision
    /// let raw = Money::from_cents(100_001);
    /// assert_eq!(raw.percentage(1000).cents(), 10_000);
    /// ```
    pub fn percentage(&self, rate_bps: u32) -> Money {
        // i128 keeps amount * bps from overflowing
        let cents = (self.0 as i128 * rate_bps as i128 + 5000) / 10000;
        Money(cents as i64)
    }
}

// =============================================================================
// Formatting
// =============================================================================

/// Formats a decimal amount with exactly two fractional digits.
///
/// An absent amount, or NaN, is formatted as zero. Never fails.
///
/// ## Example
/// ```rust
/// use checkout_core::money::format_currency;
///
/// assert_eq!(format_currency(None), "0.00");
/// assert_eq!(format_currency(3.0), "3.00");
/// assert_eq!(format_currency(9.999), "10.00");
/// ```
pub fn format_currency(amount: impl Into<Option<f64>>) -> String {
    let value = amount.into().filter(|v| !v.is_nan()).unwrap_or(0.0);
    let formatted = format!("{:.2}", value);
    // -0.004 rounds to "-0.00"
    if formatted == "-0.00" {
        "0.00".to_string()
    } else {
        formatted
    }
}

/// Formats a [`Money`] value with exactly two fractional digits, treating
/// an absent amount as zero.
///
/// ## Example
/// ```rust
/// use checkout_core::money::{format_money, Money};
///
/// assert_eq!(format_money(None), "0.00");
/// assert_eq!(format_money(Money::from_cents(90_001)), "900.01");
/// ```
pub fn format_money(amount: impl Into<Option<Money>>) -> String {
    amount.into().unwrap_or_default().to_string()
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Two-decimal rendering without a currency symbol, e.g. `"10.99"`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by an ordered quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
