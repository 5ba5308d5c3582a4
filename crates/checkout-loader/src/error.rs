//! # Loader Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  provider.fetch_products() ── Err(e) ───────► LoadError::Provider(e)    │
//! │          │                                    (e passed through as-is)  │
//! │          │ timeout elapsed ─────────────────► LoadError::Timeout        │
//! │          ▼                                                              │
//! │  Catalog::try_from_records ── Err(v) ───────► LoadError::InvalidRecord  │
//! │          │                                                              │
//! │          ▼                                                              │
//! │       Catalog                                                           │
//! │                                                                         │
//! │  Every variant is terminal for the load: no retry, no partial catalog.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use checkout_core::ValidationError;
use thiserror::Error;

/// Why a catalog load failed.
///
/// Generic over the provider's own error type so the provider failure
/// reaches the caller unchanged.
#[derive(Debug, Error)]
pub enum LoadError<E>
where
    E: std::error::Error + 'static,
{
    /// The provider rejected the request.
    #[error("Product provider failed: {0}")]
    Provider(#[source] E),

    /// The provider did not answer within the configured timeout.
    #[error("Product provider did not respond within {0:?}")]
    Timeout(Duration),

    /// The provider answered with a record that cannot become a product.
    #[error("Invalid product record: {0}")]
    InvalidRecord(#[from] ValidationError),
}

impl<E> LoadError<E>
where
    E: std::error::Error + 'static,
{
    /// Returns the provider's error, if that is what failed.
    pub fn provider_error(&self) -> Option<&E> {
        match self {
            LoadError::Provider(e) => Some(e),
            _ => None,
        }
    }
}

/// Errors raised by [`JsonFileProvider`](crate::JsonFileProvider).
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The product file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The product file is not a JSON array of product records.
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
