//! # Validation Module
//!
//! Input rules that order lines, deposits and tax rates must satisfy before
//! they reach the pricing engine.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend forms                                               │
//! │  └── Immediate feedback while typing                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Order session (apps/comptoir)                                │
//! │  └── THIS MODULE: every edit is validated before it mutates the cart  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Pricing engine                                               │
//! │  └── Trusts its input; degrades unresolved references to zero          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use comptoir_core::validation::{validate_discount, validate_quantity};
//! use comptoir_core::types::Discount;
//!
//! assert!(validate_quantity(5).is_ok());
//! assert!(validate_discount(&Discount::Percent(120.0)).is_err());
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::types::{Discount, OrderLine, TaxRate};
use crate::MAX_LINE_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

fn require_finite(value: f64, field: &str) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }
    Ok(())
}

fn require_non_negative(value: f64, field: &str) -> ValidationResult<()> {
    require_finite(value, field)?;
    if value < 0.0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Line Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - At least 1 (a zero quantity is a delete, not an edit)
/// - At most [`MAX_LINE_QUANTITY`]
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if !(1..=MAX_LINE_QUANTITY).contains(&qty) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }
    Ok(())
}

/// Validates a tax-inclusive unit price. Zero is allowed (free items).
pub fn validate_unit_price(price: f64) -> ValidationResult<()> {
    require_non_negative(price, "unitPriceTTC")
}

/// Validates a discount.
///
/// ## Rules
/// - Percent: finite, between 0 and 100
/// - Fixed: finite, not negative (an amount larger than the line is allowed
///   and floors the line at zero)
pub fn validate_discount(discount: &Discount) -> ValidationResult<()> {
    match *discount {
        Discount::Percent(pct) => {
            require_finite(pct, "discount")?;
            if !(0.0..=100.0).contains(&pct) {
                return Err(ValidationError::AmountOutOfRange {
                    field: "discount".to_string(),
                    min: 0.0,
                    max: 100.0,
                    value: pct,
                });
            }
            Ok(())
        }
        Discount::Fixed(amount) => require_non_negative(amount, "discount"),
    }
}

/// Validates a deposit ("acompte").
pub fn validate_deposit(deposit: f64) -> ValidationResult<()> {
    require_non_negative(deposit, "deposit")
}

/// Validates that a catalog reference is present.
pub fn validate_item_reference(item_id: &str) -> ValidationResult<()> {
    if item_id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "itemId".to_string(),
        });
    }
    Ok(())
}

/// Validates every field of an order line.
pub fn validate_line(line: &OrderLine) -> ValidationResult<()> {
    validate_item_reference(&line.item_id)?;
    validate_unit_price(line.unit_price_ttc)?;
    validate_quantity(line.quantity)?;
    validate_discount(&line.discount)?;
    Ok(())
}

// =============================================================================
// Settings Validators
// =============================================================================

/// Validates a tax rate percentage as typed in settings.
pub fn validate_tax_rate_percentage(pct: f64) -> ValidationResult<()> {
    require_finite(pct, "rate")?;
    if !(0.0..=100.0).contains(&pct) {
        return Err(ValidationError::AmountOutOfRange {
            field: "rate".to_string(),
            min: 0.0,
            max: 100.0,
            value: pct,
        });
    }
    Ok(())
}

/// Validates a configured tax rate table: ids present and unique, rates
/// within 0-100 %.
pub fn validate_tax_rates(rates: &[TaxRate]) -> ValidationResult<()> {
    let mut seen = HashSet::new();
    for rate in rates {
        if rate.id.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "tax rate id".to_string(),
            });
        }
        if !seen.insert(rate.id.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "tax rate id".to_string(),
                value: rate.id.clone(),
            });
        }
        validate_tax_rate_percentage(rate.rate.percentage())?;
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rate;

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(9999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(10_000).is_err());
    }

    #[test]
    fn test_validate_unit_price() {
        assert!(validate_unit_price(0.0).is_ok());
        assert!(validate_unit_price(12.5).is_ok());
        assert_eq!(
            validate_unit_price(-1.0),
            Err(ValidationError::Negative {
                field: "unitPriceTTC".to_string()
            })
        );
        assert!(validate_unit_price(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_discount() {
        assert!(validate_discount(&Discount::Percent(0.0)).is_ok());
        assert!(validate_discount(&Discount::Percent(100.0)).is_ok());
        assert!(validate_discount(&Discount::Percent(100.5)).is_err());
        assert!(validate_discount(&Discount::Percent(-5.0)).is_err());
        assert!(validate_discount(&Discount::Percent(f64::NAN)).is_err());

        assert!(validate_discount(&Discount::Fixed(0.0)).is_ok());
        assert!(validate_discount(&Discount::Fixed(1_000.0)).is_ok());
        assert!(validate_discount(&Discount::Fixed(-1.0)).is_err());
    }

    #[test]
    fn test_validate_deposit() {
        assert!(validate_deposit(0.0).is_ok());
        assert!(validate_deposit(100.0).is_ok());
        assert!(validate_deposit(-0.01).is_err());
        assert!(validate_deposit(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_line() {
        let mut line = OrderLine::new("l1", "item-1", "Café", 1.2, "tva-20");
        assert!(validate_line(&line).is_ok());

        line.item_id = " ".to_string();
        assert_eq!(
            validate_line(&line),
            Err(ValidationError::Required {
                field: "itemId".to_string()
            })
        );

        line.item_id = "item-1".to_string();
        line.quantity = 0;
        assert!(validate_line(&line).is_err());
    }

    #[test]
    fn test_validate_tax_rates() {
        let ok = vec![
            TaxRate::new("tva-20", Rate::from_percentage(20.0), "1"),
            TaxRate::new("tva-5.5", Rate::from_percentage(5.5), "3"),
        ];
        assert!(validate_tax_rates(&ok).is_ok());

        let dup = vec![
            TaxRate::new("tva-20", Rate::from_percentage(20.0), "1"),
            TaxRate::new("tva-20", Rate::from_percentage(10.0), "2"),
        ];
        assert!(matches!(
            validate_tax_rates(&dup),
            Err(ValidationError::Duplicate { .. })
        ));

        let too_high = vec![TaxRate::new("x", Rate::from_percentage(120.0), "9")];
        assert!(validate_tax_rates(&too_high).is_err());
    }

    #[test]
    fn test_validate_tax_rate_percentage() {
        assert!(validate_tax_rate_percentage(0.0).is_ok());
        assert!(validate_tax_rate_percentage(5.5).is_ok());
        assert!(validate_tax_rate_percentage(100.0).is_ok());
        assert!(validate_tax_rate_percentage(100.1).is_err());
        assert!(validate_tax_rate_percentage(-1.0).is_err());
    }
}
