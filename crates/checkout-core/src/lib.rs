//! # checkout-core: Pure Order Logic for the Checkout Table
//!
//! This crate holds everything the checkout table computes, as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Checkout Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Display surface                              │   │
//! │  │    Product rows (+ / -) ──► Discount line ──► Total line        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    checkout-loader                              │   │
//! │  │    ProductProvider ──► CatalogLoader ──► CheckoutSession        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ checkout-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐  │   │
//! │  │   │ money   │ │ catalog │ │ engine  │ │ display │ │validate │  │   │
//! │  │   │ Money   │ │ Catalog │ │ +1 / -1 │ │ rows    │ │ records │  │   │
//! │  │   │ format  │ │ Product │ │ summary │ │ summary │ │         │  │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO ASYNC • PURE FUNCTIONS                            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic and currency formatting
//! - [`types`] - Product identity, product rows and provider records
//! - [`catalog`] - Copy-on-write product catalog
//! - [`engine`] - Bounded quantity updates, totals and discount
//! - [`display`] - View models for the checkout table
//! - [`validation`] - Provider record validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use checkout_core::{engine, Catalog, Money, Product, ProductId};
//!
//! let catalog = Catalog::new(vec![Product::new(
//!     ProductId::from(1u64),
//!     "Headphones",
//!     5,
//!     Money::from_cents(20000),
//! )]);
//!
//! let id = ProductId::from(1u64);
//! let catalog = engine::increment(&catalog, &id);
//! let catalog = engine::increment(&catalog, &id);
//!
//! let summary = engine::OrderSummary::from_catalog(&catalog);
//! assert_eq!(summary.raw_total.cents(), 40000);
//! assert!(summary.discount.is_zero());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod display;
pub mod engine;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::Catalog;
pub use engine::{DiscountPolicy, OrderSummary};
pub use error::{CoreError, ValidationError};
pub use money::{format_currency, format_money, Money};
pub use types::{Product, ProductId, ProductRecord};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Order totals strictly above this amount earn the discount ($1000.00).
pub const DISCOUNT_THRESHOLD: Money = Money::from_cents(100_000);

/// Discount rate in basis points (1000 = 10%).
pub const DISCOUNT_RATE_BPS: u32 = 1000;

/// Upper bound on `Σ price × available_count` over a catalog (10^18 cents).
///
/// Any order a validated catalog allows, and its total, stays below this,
/// so quantity and total arithmetic cannot overflow `i64`.
pub const MAX_CATALOG_VALUE: Money = Money::from_cents(1_000_000_000_000_000_000);

/// Maximum length of a product display name.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;
