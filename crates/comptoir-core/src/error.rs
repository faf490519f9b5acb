//! # Error Types
//!
//! Domain-specific error types for comptoir-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  comptoir-core errors (this file)                                      │
//! │  ├── CoreError        - Order/session rule violations                  │
//! │  ├── ValidationError  - Input validation failures (form layer)         │
//! │  └── PricingError     - Non-finite totals (refuse to display/submit)   │
//! │                                                                         │
//! │  Application errors (apps/comptoir)                                    │
//! │  ├── ConfigError      - Settings file problems                         │
//! │  └── ApiError         - What the frontend sees (serialized)            │
//! │                                                                         │
//! │  Flow: ValidationError / PricingError → CoreError → ApiError           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pricing engine itself never returns an error: unresolved references
//! degrade to zero. `PricingError` is raised by callers that check the
//! engine's output before using it.

use thiserror::Error;

use crate::types::DocumentKind;

// =============================================================================
// Core Error
// =============================================================================

/// Order editing errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No line with this id in the order.
    #[error("Order line not found: {0}")]
    LineNotFound(String),

    /// Catalog item cannot be found.
    #[error("Catalog item not found: {0}")]
    ItemNotFound(String),

    /// Order has reached the maximum number of lines.
    #[error("Order cannot have more than {max} lines")]
    CartTooLarge { max: usize },

    /// Checkout attempted on an order with no priced line.
    #[error("Order has no lines")]
    EmptyOrder,

    /// The numbering sequence of this document kind has no number left.
    #[error("No {0} number left to assign")]
    NumberingExhausted(DocumentKind),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Pricing produced an unusable total.
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by the form layer before anything reaches the pricing engine.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Integer value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Decimal value is out of range.
    #[error("{field} must be between {min} and {max}, got {value}")]
    AmountOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Value is NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Duplicate value (e.g. two tax rates with the same id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Pricing Error
// =============================================================================

/// A computed total that must not be shown or submitted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PricingError {
    #[error("{field} is not a finite amount")]
    NonFinite { field: &'static str },
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
        let err = CoreError::LineNotFound("line-7".to_string());
        assert_eq!(err.to_string(), "Order line not found: line-7");

        let err = CoreError::CartTooLarge { max: 100 };
        assert_eq!(err.to_string(), "Order cannot have more than 100 lines");

        let err = CoreError::NumberingExhausted(DocumentKind::Invoice);
        assert_eq!(err.to_string(), "No invoice number left to assign");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: 9999,
        };
        assert_eq!(err.to_string(), "quantity must be between 1 and 9999");

        let err = ValidationError::AmountOutOfRange {
            field: "discount".to_string(),
            min: 0.0,
            max: 100.0,
            value: 120.0,
        };
        assert_eq!(err.to_string(), "discount must be between 0 and 100, got 120");
    }

    #[test]
    fn test_pricing_error_message() {
        let err = PricingError::NonFinite { field: "totalTTC" };
        assert_eq!(err.to_string(), "totalTTC is not a finite amount");
    }

    #[test]
    fn test_conversions_to_core_error() {
        let core_err: CoreError = ValidationError::Required {
            field: "itemId".to_string(),
        }
        .into();
        assert!(matches!(core_err, CoreError::Validation(_)));

        let core_err: CoreError = PricingError::NonFinite { field: "netToPay" }.into();
        assert!(matches!(core_err, CoreError::Pricing(_)));
    }
}
