//! # Error Types
//!
//! Domain-specific error types for checkout-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  checkout-core errors (this file)                                      │
//! │  ├── CoreError        - Amounts that cannot be parsed into cents       │
//! │  └── ValidationError  - Provider record validation failures            │
//! │                                                                         │
//! │  checkout-loader errors (separate crate)                               │
//! │  └── LoadError<E>     - Provider failure, timeout, invalid record      │
//! │                                                                         │
//! │  Flow: ValidationError → LoadError → AppError → exit code              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What is NOT an error
//! Unknown product ids and quantity updates at a bound are silent no-ops in
//! the order engine. They never produce a value of these types.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors from turning decimal text into money.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A price could not be turned into cents.
    #[error("Invalid amount '{value}': {reason}")]
    InvalidAmount { value: String, reason: String },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Provider record validation errors.
///
/// Raised while turning provider records into a catalog. One failing record
/// fails the whole load; there is no partial catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Missing or blank after trimming.
    #[error("{field} is required")]
    Required { field: String },

    /// Longer than the display allows.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Stock count or price outside its allowed range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g. a price with a malformed decimal form).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (two records share a product id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

/// Result of money parsing.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::Duplicate {
            field: "id".to_string(),
            value: "7".to_string(),
        };
        assert_eq!(err.to_string(), "id '7' already exists");
    }

    #[test]
    fn test_invalid_amount_message() {
        let err = CoreError::InvalidAmount {
            value: "1.2.3".to_string(),
            reason: "more than one decimal point".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid amount '1.2.3': more than one decimal point"
        );
    }
}
