//! # comptoir-core: Pure Pricing Logic for Comptoir
//!
//! This crate holds the order pricing model shared by every order-editing
//! surface: tax-inclusive/exclusive conversion, VAT breakdown by rate,
//! discounts, deposits and margins. It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Comptoir Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend surfaces                            │   │
//! │  │  POS summary ─ Order form ─ Supplier order ─ Invoice print     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               apps/comptoir (session, config)                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ lines + rates + deposit                │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ comptoir-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  pricing  │  │   money   │  │ validation│  │   │
//! │  │   │ TaxRate   │  │ LineHT    │  │  Money    │  │   rules   │  │   │
//! │  │   │ OrderLine │  │ Totals    │  │ (display) │  │  checks   │  │   │
//! │  │   │ Discount  │  │ Margin    │  │           │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (TaxRate, OrderLine, Discount, CatalogItem, Sale)
//! - [`pricing`] - The pricing engine (line HT, order totals, margin)
//! - [`money`] - Presentation amounts rounded to cents
//! - [`error`] - Domain error types
//! - [`validation`] - Form-level input rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = bit-identical output
//! 2. **Full precision**: the engine keeps `f64` precision while
//!    accumulating; rounding to cents happens only in [`Money::from_amount`]
//! 3. **Graceful degradation**: unknown tax rates price at 0 %, unresolved
//!    items are excluded from totals, the engine never fails
//!
//! ## Example Usage
//!
//! ```rust
//! use comptoir_core::pricing::compute_order_totals;
//! use comptoir_core::types::{Discount, OrderLine, Rate, TaxRate, TaxRateTable};
//! use comptoir_core::Money;
//!
//! let rates = TaxRateTable::new(vec![TaxRate::new("tva-20", Rate::from_percentage(20.0), "1")]);
//! let mut line = OrderLine::new("line-1", "item-1", "Café", 12.0, "tva-20");
//! line.quantity = 3;
//! line.discount = Discount::Percent(10.0);
//!
//! let totals = compute_order_totals(&[line], &rates, 0.0);
//! assert_eq!(Money::from_amount(totals.total_ttc).unwrap().cents(), 3240);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, PricingError, ValidationError};
pub use money::Money;
pub use pricing::{Margin, OrderTotals, VatBreakdownEntry};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum lines allowed in a single order.
pub const MAX_ORDER_LINES: usize = 100;

/// Maximum quantity of a single line.
///
/// ## Business Reason
/// Catches typing mistakes (10000 instead of 10) before they reach a printed
/// document.
pub const MAX_LINE_QUANTITY: i64 = 9999;

/// Tolerance used when reconciling amounts (one cent).
pub const AMOUNT_TOLERANCE: f64 = 0.01;
