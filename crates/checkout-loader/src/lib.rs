//! # checkout-loader: Async Catalog Loading
//!
//! The single suspension point of the checkout table: ask a provider for
//! the product list once, validate it, and track the load in a session.
//!
//! ## Module Organization
//!
//! - [`provider`] - `ProductProvider` contract, static and JSON providers
//! - [`loader`] - `CatalogLoader`: one attempt, optional timeout
//! - [`session`] - `CheckoutSession`: load state plus quantity updates
//! - [`error`] - `LoadError`, `ProviderError`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use checkout_loader::{CatalogLoader, CheckoutSession, JsonFileProvider};
//!
//! let mut session = CheckoutSession::new(CatalogLoader::new().timeout(Duration::from_secs(5)));
//! session.start(&JsonFileProvider::new("products.json")).await?;
//!
//! session.increment(&ProductId::new("1"));
//! let summary = session.summary();
//! ```

pub mod error;
pub mod loader;
pub mod provider;
pub mod session;

pub use error::{LoadError, ProviderError};
pub use loader::CatalogLoader;
pub use provider::{JsonFileProvider, ProductProvider, StaticProvider};
pub use session::{CheckoutSession, LoadPhase, LoadState, StartError};
