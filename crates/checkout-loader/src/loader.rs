//! # Catalog Loader
//!
//! Turns one provider call into an initial [`Catalog`].
//!
//! ## Load Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  1. fetch_products()        single attempt, optionally under timeout    │
//! │  2. try_from_records()      validate every record, reject duplicates    │
//! │  3. Catalog                 every quantity and total starts at 0        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::{Duration, Instant};

use checkout_core::Catalog;
use tracing::{info, warn};

use crate::error::LoadError;
use crate::provider::ProductProvider;

/// Loader configuration.
///
/// ## Example
/// ```rust,ignore
/// let loader = CatalogLoader::new().timeout(Duration::from_secs(5));
/// let catalog = loader.load(&provider).await?;
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogLoader {
    /// Upper bound on the provider call. `None` waits indefinitely.
    timeout: Option<Duration>,
}

impl CatalogLoader {
    /// A loader without a timeout.
    pub fn new() -> Self {
        CatalogLoader::default()
    }

    /// Sets the provider timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets or clears the provider timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Loads the initial catalog from `provider`.
    ///
    /// ## Returns
    /// * `Ok(Catalog)` - every product with nothing ordered
    /// * `Err(LoadError::Provider)` - the provider's own error, unchanged
    /// * `Err(LoadError::Timeout)` - the timeout elapsed first
    /// * `Err(LoadError::InvalidRecord)` - a record failed validation
    ///
    /// The provider is called exactly once; failures are not retried.
    pub async fn load<P>(&self, provider: &P) -> Result<Catalog, LoadError<P::Error>>
    where
        P: ProductProvider,
    {
        let started = Instant::now();
        info!(timeout = ?self.timeout, "Loading product catalog");

        let fetch = provider.fetch_products();
        let records = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, fetch)
                .await
                .map_err(|_| LoadError::Timeout(limit))?,
            None => fetch.await,
        }
        .map_err(LoadError::Provider)?;

        let prefilled = records.iter().filter(|r| r.has_prefilled_order()).count();
        if prefilled > 0 {
            warn!(prefilled, "Ignoring quantities sent by the provider");
        }

        let catalog = Catalog::try_from_records(records)?;

        info!(
            products = catalog.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Product catalog loaded"
        );

        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::StaticProvider;
    use checkout_core::{ProductId, ProductRecord};
    use std::future::Future;

    /// Provider that always fails with an I/O error.
    struct FailingProvider;

    impl ProductProvider for FailingProvider {
        type Error = std::io::Error;

        fn fetch_products(&self) -> impl Future<Output = Result<Vec<ProductRecord>, Self::Error>> + Send {
            async { Err(std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "offline")) }
        }
    }

    /// Provider that counts how often it was called.
    struct CountingProvider(std::sync::atomic::AtomicUsize);

    impl ProductProvider for CountingProvider {
        type Error = std::io::Error;

        fn fetch_products(&self) -> impl Future<Output = Result<Vec<ProductRecord>, Self::Error>> + Send {
            self.0.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            async { Err(std::io::Error::new(std::io::ErrorKind::Other, "flaky")) }
        }
    }

    fn records() -> Vec<ProductRecord> {
        vec![
            ProductRecord::new(1u64, "Headphones", 5, 200.0),
            ProductRecord::new(2u64, "Cable", 12, 9.99),
        ]
    }

    #[tokio::test]
    async fn test_load_builds_zeroed_catalog() {
        let mut prefilled = records();
        prefilled[0].ordered_quantity = Some(4);

        let catalog = CatalogLoader::new()
            .load(&StaticProvider::new(prefilled))
            .await
            .unwrap();

        assert_eq!(catalog.len(), 2);
        let headphones = catalog.find_by_id(&ProductId::from(1u64)).unwrap();
        assert_eq!(headphones.ordered_quantity(), 0);
        assert!(headphones.total().is_zero());
        assert_eq!(
            catalog.find_by_id(&ProductId::from(2u64)).map(|p| p.price().cents()),
            Some(999)
        );
    }

    #[tokio::test]
    async fn test_provider_error_is_passed_through() {
        let err = CatalogLoader::new().load(&FailingProvider).await.unwrap_err();
        let inner = err.provider_error().unwrap();
        assert_eq!(inner.kind(), std::io::ErrorKind::ConnectionRefused);
        assert_eq!(inner.to_string(), "offline");
    }

    #[tokio::test]
    async fn test_failure_is_not_retried() {
        let provider = CountingProvider(std::sync::atomic::AtomicUsize::new(0));
        assert!(CatalogLoader::new().load(&provider).await.is_err());
        assert_eq!(provider.0.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_elapses() {
        let provider = StaticProvider::new(records()).with_latency(Duration::from_secs(10));
        let err = CatalogLoader::new()
            .timeout(Duration::from_secs(1))
            .load(&provider)
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Timeout(d) if d == Duration::from_secs(1)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_within_timeout() {
        let provider = StaticProvider::new(records()).with_latency(Duration::from_millis(200));
        let catalog = CatalogLoader::new()
            .with_timeout(Some(Duration::from_secs(1)))
            .load(&provider)
            .await
            .unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_record_fails_whole_load() {
        let mut bad = records();
        bad.push(ProductRecord::new(3u64, "", 1, 1.0));

        let err = CatalogLoader::new()
            .load(&StaticProvider::new(bad))
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::InvalidRecord(_)));
    }
}
