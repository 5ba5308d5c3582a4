//! # Product Providers
//!
//! The external collaborator that supplies the initial product list.
//!
//! ## Implementations
//! - [`StaticProvider`] - in-memory records, optional simulated latency
//! - [`JsonFileProvider`] - a JSON array of records read from disk
//!
//! Anything else (an HTTP client, a database query) only needs to implement
//! [`ProductProvider`].

use std::convert::Infallible;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use checkout_core::ProductRecord;
use tracing::debug;

use crate::error::ProviderError;

// =============================================================================
// Provider Contract
// =============================================================================

/// Asynchronous source of product records.
///
/// Called once per load. Whatever error the provider returns is handed to
/// the caller unchanged inside [`LoadError::Provider`](crate::LoadError).
pub trait ProductProvider: Send + Sync {
    /// The provider's failure type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetches every product record.
    fn fetch_products(&self) -> impl Future<Output = Result<Vec<ProductRecord>, Self::Error>> + Send;
}

// =============================================================================
// Static Provider
// =============================================================================

/// Serves a fixed list of records, optionally after a delay.
///
/// ## Usage
/// ```rust,ignore
/// let provider = StaticProvider::new(records).with_latency(Duration::from_millis(500));
/// let catalog = CatalogLoader::new().load(&provider).await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    records: Vec<ProductRecord>,
    latency: Option<Duration>,
}

impl StaticProvider {
    pub fn new(records: Vec<ProductRecord>) -> Self {
        StaticProvider {
            records,
            latency: None,
        }
    }

    /// Delays every response by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }
}

impl ProductProvider for StaticProvider {
    type Error = Infallible;

    fn fetch_products(&self) -> impl Future<Output = Result<Vec<ProductRecord>, Self::Error>> + Send {
        async move {
            if let Some(latency) = self.latency {
                tokio::time::sleep(latency).await;
            }
            Ok(self.records.clone())
        }
    }
}

// =============================================================================
// JSON File Provider
// =============================================================================

/// Reads a JSON array of product records from a file.
///
/// ## File Format
/// ```json
/// [
///   { "id": 1, "name": "Headphones", "availableCount": 5, "price": 200 },
///   { "id": 2, "name": "USB-C Cable", "availableCount": 12, "price": 9.99 }
/// ]
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    path: PathBuf,
}

impl JsonFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileProvider { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl ProductProvider for JsonFileProvider {
    type Error = ProviderError;

    fn fetch_products(&self) -> impl Future<Output = Result<Vec<ProductRecord>, Self::Error>> + Send {
        async move {
            let path = self.path.display().to_string();
            debug!(%path, "Reading product file");

            let bytes = tokio::fs::read(&self.path)
                .await
                .map_err(|source| ProviderError::Io {
                    path: path.clone(),
                    source,
                })?;

            serde_json::from_slice(&bytes).map_err(|source| ProviderError::Parse { path, source })
        }
    }
}
