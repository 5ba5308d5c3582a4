//! # Validation Module
//!
//! Checks provider records before they become catalog rows.
//!
//! ## Rules
//! | Field            | Rule                                            |
//! |------------------|-------------------------------------------------|
//! | `id`             | non-empty                                       |
//! | `name`           | non-empty after trimming, at most 200 chars     |
//! | `availableCount` | `0..=u32::MAX`                                  |
//! | `price`          | finite, `>= 0`, representable in cents          |
//! | stock value      | `price × availableCount <= MAX_CATALOG_VALUE`   |
//!
//! Uniqueness of ids, and the stock value of the whole list, are checked by
//! [`Catalog::try_from_records`](crate::Catalog::try_from_records).

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Product, ProductId, ProductRecord};
use crate::{MAX_CATALOG_VALUE, MAX_PRODUCT_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a product id.
pub fn validate_product_id(id: &ProductId) -> ValidationResult<()> {
    if id.as_str().trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Example
/// ```rust
/// use checkout_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Noise Cancelling Headphones").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates an available count and narrows it to `u32`.
pub fn validate_available_count(count: i64) -> ValidationResult<u32> {
    u32::try_from(count).map_err(|_| ValidationError::OutOfRange {
        field: "availableCount".to_string(),
        min: 0,
        max: i64::from(u32::MAX),
    })
}

/// Validates a unit price and converts it to [`Money`].
///
/// The price is taken through its shortest decimal rendering, so `19.99`
/// becomes exactly 1999 cents.
///
/// ## Example
/// ```rust
/// use checkout_core::validation::validate_price;
///
/// assert_eq!(validate_price(19.99).unwrap().cents(), 1999);
/// assert!(validate_price(-1.0).is_err());
/// ```
pub fn validate_price(price: f64) -> ValidationResult<Money> {
    if !price.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if price < 0.0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Money::parse_decimal(&price.to_string()).map_err(|e| ValidationError::InvalidFormat {
        field: "price".to_string(),
        reason: e.to_string(),
    })
}

/// Value of the full stock of one product, `price × available_count`.
///
/// Fails when it exceeds [`MAX_CATALOG_VALUE`].
pub fn validate_stock_value(price: Money, available_count: u32) -> ValidationResult<Money> {
    price
        .cents()
        .checked_mul(i64::from(available_count))
        .filter(|value| *value <= MAX_CATALOG_VALUE.cents())
        .map(Money::from_cents)
        .ok_or_else(|| stock_value_error("stockValue"))
}

pub(crate) fn stock_value_error(field: &str) -> ValidationError {
    ValidationError::OutOfRange {
        field: field.to_string(),
        min: 0,
        max: MAX_CATALOG_VALUE.cents(),
    }
}

/// Validates a provider record and builds the catalog row for it.
///
/// Any `orderedQuantity`/`total` on the record is discarded.
pub fn validate_record(record: &ProductRecord) -> ValidationResult<Product> {
    validate_product_id(&record.id)?;
    validate_product_name(&record.name)?;
    let available_count = validate_available_count(record.available_count)?;
    let price = validate_price(record.price)?;
    validate_stock_value(price, available_count)?;

    Ok(Product::new(
        record.id.clone(),
        record.name.trim(),
        available_count,
        price,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_id() {
        assert!(validate_product_id(&ProductId::from(1u64)).is_ok());
        assert!(validate_product_id(&ProductId::new("")).is_err());
        assert!(validate_product_id(&ProductId::new("  ")).is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Speaker").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"A".repeat(201)).is_err());
        assert!(validate_product_name(&"A".repeat(200)).is_ok());
    }

    #[test]
    fn test_validate_available_count() {
        assert_eq!(validate_available_count(0), Ok(0));
        assert_eq!(validate_available_count(5), Ok(5));
        assert!(validate_available_count(-1).is_err());
        assert!(validate_available_count(i64::from(u32::MAX) + 1).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert_eq!(validate_price(0.0).map(|m| m.cents()), Ok(0));
        assert_eq!(validate_price(200.0).map(|m| m.cents()), Ok(20000));
        assert_eq!(validate_price(1000.01).map(|m| m.cents()), Ok(100_001));
        assert!(validate_price(-0.01).is_err());
        assert!(validate_price(f64::NAN).is_err());
        assert!(validate_price(f64::INFINITY).is_err());
        assert!(validate_price(1e300).is_err());
    }

    #[test]
    fn test_validate_stock_value() {
        let price = Money::from_cents(10_000_000_000_000_000);
        assert_eq!(validate_stock_value(price, 100), Ok(MAX_CATALOG_VALUE));
        assert!(validate_stock_value(price, 101).is_err());
        assert!(validate_stock_value(Money::from_cents(i64::MAX), u32::MAX).is_err());
        assert_eq!(validate_stock_value(Money::from_cents(999), 0), Ok(Money::zero()));
    }

    #[test]
    fn test_validate_record_trims_name() {
        let record = ProductRecord::new(4u64, "  Tablet  ", 2, 300.0);
        let product = validate_record(&record).unwrap();
        assert_eq!(product.name(), "Tablet");
        assert_eq!(product.available_count(), 2);
        assert_eq!(product.ordered_quantity(), 0);
    }
}
