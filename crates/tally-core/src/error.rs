//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                         │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  Terminal register errors (in app)                                     │
//! │  ├── ConfigError      - Config file / environment failures             │
//! │  └── ApiError         - What the operator sees                         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Operator               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! Rejected increments and checkouts that commit nothing leave state
//! untouched and are reported as outcomes (`QuantityChange`,
//! `CheckoutOutcome`), not as `Err`.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Item id is not part of the catalog.
    ///
    /// ## When This Occurs
    /// - Operator typed an id that was never seeded
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// Two catalog entries share the same id.
    #[error("Duplicate item id in catalog: {0}")]
    DuplicateItem(String),

    /// Summed `price * stock` no longer fits in `Money` once this item is added.
    #[error("Catalog value out of range at item: {0}")]
    CatalogValueOverflow(String),

    /// Payment method string is not `cash` or `online`.
    #[error("Invalid payment method: {0} (expected cash or online)")]
    InvalidPaymentMethod(String),

    /// Stock policy string is not recognised.
    #[error("Invalid stock policy: {0} (expected reject, clamp or backorder)")]
    InvalidStockPolicy(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is below zero.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::ItemNotFound("item9".to_string());
        assert_eq!(err.to_string(), "Item not found: item9");

        let err = CoreError::InvalidPaymentMethod("card".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid payment method: card (expected cash or online)"
        );
    }

    #[test]
    fn test_catalog_value_message() {
        let err = CoreError::CatalogValueOverflow("big".to_string());
        assert_eq!(err.to_string(), "Catalog value out of range at item: big");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "item id".to_string(),
        };
        assert_eq!(err.to_string(), "item id is required");

        let err = ValidationError::MustBePositive {
            field: "price".to_string(),
        };
        assert_eq!(err.to_string(), "price must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
