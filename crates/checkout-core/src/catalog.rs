//! # Catalog
//!
//! The ordered product list behind the checkout table.
//!
//! ## Copy-on-Write Snapshots
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  before ──► Arc<Vec<Product>> ◄── after   (no-op: storage shared)       │
//! │                                                                         │
//! │  before ──► Arc<Vec<Product>>             (update: before untouched)    │
//! │  after  ──► Arc<Vec<Product>>'  ← one product replaced                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! Cloning a catalog is an `Arc` bump. An update clones the product vector
//! only when it actually changes a row, so every snapshot a caller holds
//! stays valid and comparable.

use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::sync::Arc;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Product, ProductId, ProductRecord};
use crate::validation::{stock_value_error, validate_record, ValidationResult};
use crate::MAX_CATALOG_VALUE;

/// An ordered sequence of products keyed by id; insertion order is display
/// order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Arc<Vec<Product>>,
}

impl Catalog {
    /// Creates a catalog from already-built products.
    ///
    /// Ids are expected to be unique. Lookups return the first match.
    pub fn new(products: Vec<Product>) -> Self {
        Catalog {
            products: Arc::new(products),
        }
    }

    /// Creates an empty catalog.
    pub fn empty() -> Self {
        Catalog::default()
    }

    /// Builds the initial catalog from provider records.
    ///
    /// Every product starts with `ordered_quantity == 0` and a zero total,
    /// whatever the record carried. The first invalid record, the first
    /// repeated id, or a combined stock value above [`MAX_CATALOG_VALUE`]
    /// fails the whole build.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::{Catalog, ProductRecord};
    ///
    /// let catalog = Catalog::try_from_records(vec![
    ///     ProductRecord::new(1u64, "Headphones", 5, 200.0),
    ///     ProductRecord::new(2u64, "Cable", 10, 9.99),
    /// ])
    /// .unwrap();
    /// assert_eq!(catalog.len(), 2);
    /// ```
    pub fn try_from_records(records: Vec<ProductRecord>) -> ValidationResult<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        let mut products = Vec::with_capacity(records.len());
        let mut stock_value = Money::zero();

        for record in &records {
            if !seen.insert(record.id.clone()) {
                return Err(ValidationError::Duplicate {
                    field: "id".to_string(),
                    value: record.id.to_string(),
                });
            }
            let product = validate_record(record)?;

            stock_value = stock_value
                .cents()
                .checked_add(product.price().multiply_quantity(product.available_count()).cents())
                .filter(|total| *total <= MAX_CATALOG_VALUE.cents())
                .map(Money::from_cents)
                .ok_or_else(|| stock_value_error("catalogValue"))?;

            products.push(product);
        }

        Ok(Catalog::new(products))
    }

    /// All products in display order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Looks up a product by id. `None` when absent; never an error.
    pub fn find_by_id(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id() == id)
    }

    /// Returns a new snapshot with the product `id` replaced by whatever
    /// `f` returns.
    ///
    /// When the id is absent or `f` returns `None`, the result shares
    /// storage with `self`. Otherwise only the returned snapshot sees the
    /// change.
    pub fn update<F>(&self, id: &ProductId, f: F) -> Catalog
    where
        F: FnOnce(&Product) -> Option<Product>,
    {
        let Some(index) = self.products.iter().position(|p| p.id() == id) else {
            return self.clone();
        };
        let Some(updated) = f(&self.products[index]) else {
            return self.clone();
        };

        let mut next = self.clone();
        Arc::make_mut(&mut next.products)[index] = updated;
        next
    }

    /// Whether two snapshots are backed by the same storage.
    pub fn shares_storage_with(&self, other: &Catalog) -> bool {
        Arc::ptr_eq(&self.products, &other.products)
    }
}

impl PartialEq for Catalog {
    fn eq(&self, other: &Self) -> bool {
        self.shares_storage_with(other) || self.products == other.products
    }
}

impl Eq for Catalog {}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Serializes as a plain JSON array of products.
impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.products.iter())
    }
}
