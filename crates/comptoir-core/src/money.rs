//! # Money Module
//!
//! Provides the `Money` type for amounts shown to people: order summaries,
//! printed invoices, reports.
//!
//! ## When Does Rounding Happen?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ROUND ONCE, AT THE END                                                 │
//! │                                                                         │
//! │  Pricing engine (f64, full precision)                                   │
//! │    line HT ──► Σ subtotal HT ──► Σ VAT per rate ──► total TTC           │
//! │                                                          │              │
//! │                                                          ▼              │
//! │  Presentation (Money, integer cents)       Money::from_amount(total)    │
//! │                                                                         │
//! │  Rounding each line first and summing the rounded values drifts by     │
//! │  whole cents on long carts. Money is never fed back into the engine.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use comptoir_core::money::Money;
//!
//! let total = Money::from_amount(32.399999999).unwrap();
//! assert_eq!(total.cents(), 3240);
//! assert_eq!(total.to_string(), "32.40");
//! assert_eq!(total.format_with("€"), "32.40 €");
//! ```

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use ts_rs::TS;

/// Decimal places of a cent amount.
const CENT_DECIMALS: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// A presentation amount in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: `netToPay` is negative when the deposit exceeds the
///   total, and credit notes carry negative amounts
/// - **Single field tuple struct**: zero-cost abstraction over i64
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use comptoir_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Rounds an engine amount to cents.
    ///
    /// ## Rounding Policy
    /// The exact binary value of `amount` is rounded to two decimals, half
    /// away from zero. This is what `Number.prototype.toFixed(2)` prints on
    /// the order surfaces: `1.005` is stored as `1.00499999...` and shows as
    /// `1.00`, while a true half cent such as `0.125` shows as `0.13`.
    ///
    /// Returns `None` for `NaN`, infinities and amounts beyond the `i64` cent
    /// range, so a broken total can never be displayed as a number.
    ///
    /// ```rust
    /// use comptoir_core::money::Money;
    ///
    /// assert_eq!(Money::from_amount(0.125).unwrap().cents(), 13);
    /// assert_eq!(Money::from_amount(-0.125).unwrap().cents(), -13);
    /// assert_eq!(Money::from_amount(1.005).unwrap().cents(), 100);
    /// assert!(Money::from_amount(f64::NAN).is_none());
    /// ```
    pub fn from_amount(amount: f64) -> Option<Self> {
        let exact = Decimal::from_f64_retain(amount)?;
        let rounded =
            exact.round_dp_with_strategy(CENT_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
        rounded
            .checked_mul(Decimal::ONE_HUNDRED)?
            .to_i64()
            .map(Money)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the value as a currency amount (`f64`), for display widgets
    /// that want a number.
    #[inline]
    pub fn amount(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the major unit (euros) portion.
    ///
    /// ```rust
    /// use comptoir_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).units(), 10);
    /// assert_eq!(Money::from_cents(-550).units(), -5);
    /// ```
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Formats with a trailing currency symbol, as printed on documents.
    pub fn format_with(&self, symbol: &str) -> String {
        format!("{} {}", self, symbol)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Two decimals, `.` separator, leading `-` for negative amounts.
///
/// Locale-specific formatting (`32,40 €`) is left to the frontend.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.units().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
