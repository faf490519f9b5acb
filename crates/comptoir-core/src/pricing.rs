//! # Pricing Engine
//!
//! Turns a cart of [`OrderLine`]s plus the tax rate table into the derived
//! totals every order surface displays: HT subtotal, VAT breakdown by rate,
//! TTC total, deposit and net to pay. Also derives sale margins for reports.
//!
//! ## Computation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  For each line (quantity > 0, item reference resolves)                  │
//! │                                                                         │
//! │    unit TTC ──► ÷ (1 + rate/100) ──► price HT                           │
//! │                                          │                              │
//! │                                          ▼                              │
//! │                        × quantity, then apply_discount ──► line HT      │
//! │                                          │                              │
//! │             ┌────────────────────────────┼──────────────┐               │
//! │             ▼                            ▼              ▼               │
//! │       subtotal HT +=        breakdown[rate].base +=   .total += HT×rate │
//! │                                                                         │
//! │  total TVA = Σ breakdown totals (rate order)                            │
//! │  total TTC = subtotal HT + total TVA                                    │
//! │  net to pay = total TTC − deposit          (not clamped at zero)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Discounts always apply to the HT amount, after the tax-inclusive to
//! tax-exclusive conversion. Nothing here rounds: see [`crate::Money`].
//!
//! ## Failure Semantics
//! None of these functions fail. An unknown tax rate prices at 0 %, an
//! unresolved item is left out of the totals, and `NaN` inputs propagate to
//! `NaN` totals which callers detect with [`OrderTotals::ensure_finite`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::PricingError;
use crate::types::{CatalogLookup, Discount, OrderLine, Rate, Sale, TaxRateTable};

// =============================================================================
// Output Types
// =============================================================================

/// VAT collected at one rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct VatBreakdownEntry {
    pub rate: Rate,

    /// Sum of the HT line totals taxed at this rate.
    pub base: f64,

    /// VAT amount for this rate.
    pub total: f64,

    /// Tax code for display.
    pub code: String,
}

/// Derived totals of an order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    #[serde(rename = "subtotalHT")]
    pub subtotal_ht: f64,

    /// One entry per distinct rate, in ascending rate order.
    pub vat_breakdown: Vec<VatBreakdownEntry>,

    #[serde(rename = "totalTVA")]
    pub total_tva: f64,

    #[serde(rename = "totalTTC")]
    pub total_ttc: f64,

    /// Acompte already paid.
    pub deposit: f64,

    /// `total_ttc - deposit`. Negative when the deposit exceeds the total.
    pub net_to_pay: f64,
}

impl OrderTotals {
    /// Refuses totals that contain `NaN` or an infinity.
    ///
    /// The calling surface must not display or submit an order whose totals
    /// fail this check.
    pub fn ensure_finite(&self) -> Result<(), PricingError> {
        let fields = [
            ("subtotalHT", self.subtotal_ht),
            ("totalTVA", self.total_tva),
            ("totalTTC", self.total_ttc),
            ("deposit", self.deposit),
            ("netToPay", self.net_to_pay),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(PricingError::NonFinite { field });
            }
        }
        for entry in &self.vat_breakdown {
            if !entry.base.is_finite() || !entry.total.is_finite() {
                return Err(PricingError::NonFinite {
                    field: "vatBreakdown",
                });
            }
        }
        Ok(())
    }

    /// Breakdown entries in ascending rate order.
    pub fn vat_entries(&self) -> impl Iterator<Item = &VatBreakdownEntry> {
        self.vat_breakdown.iter()
    }

    /// The breakdown entry for `rate`, if any priced line uses it.
    pub fn vat_entry(&self, rate: Rate) -> Option<&VatBreakdownEntry> {
        self.vat_breakdown.iter().find(|entry| entry.rate == rate)
    }
}

/// Margin of a sale, for reporting views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Margin {
    #[serde(rename = "subtotalHT")]
    pub subtotal_ht: f64,
    pub total_cost: f64,
    pub margin: f64,
}

impl Margin {
    /// Margin as a percentage of the HT subtotal (0 for an empty sale).
    pub fn rate(&self) -> f64 {
        if self.subtotal_ht == 0.0 {
            return 0.0;
        }
        self.margin / self.subtotal_ht * 100.0
    }
}

impl std::ops::Add for Margin {
    type Output = Margin;

    fn add(self, other: Margin) -> Margin {
        Margin {
            subtotal_ht: self.subtotal_ht + other.subtotal_ht,
            total_cost: self.total_cost + other.total_cost,
            margin: self.margin + other.margin,
        }
    }
}

impl std::iter::Sum for Margin {
    fn sum<I: Iterator<Item = Margin>>(iter: I) -> Self {
        iter.fold(Margin::default(), |acc, m| acc + m)
    }
}

// =============================================================================
// Line Computations
// =============================================================================

/// Tax-exclusive unit price of a line.
///
/// The rate is resolved through `tax_rates`; an unknown id prices at 0 %.
pub fn compute_line_ht(line: &OrderLine, tax_rates: &TaxRateTable) -> f64 {
    price_ht(line.unit_price_ttc, tax_rates.rate_for(&line.vat_rate_id))
}

fn price_ht(unit_price_ttc: f64, rate: Rate) -> f64 {
    let ht = unit_price_ttc / (1.0 + rate.percentage() / 100.0);
    if ht.is_finite() {
        ht
    } else {
        unit_price_ttc
    }
}

/// HT total of a line: `price_ht × quantity`, then the line discount.
pub fn compute_line_total(line: &OrderLine, price_ht: f64) -> f64 {
    apply_discount(price_ht * line.quantity as f64, &line.discount)
}

/// Applies a discount to an HT amount.
///
/// - `Percent(p)`: `base × (1 − p/100)`
/// - `Fixed(a)`: `base − a`, floored at zero
///
/// ```rust
/// use comptoir_core::pricing::apply_discount;
/// use comptoir_core::types::Discount;
///
/// assert_eq!(apply_discount(100.0, &Discount::Percent(25.0)), 75.0);
/// assert_eq!(apply_discount(10.0, &Discount::Fixed(15.0)), 0.0);
/// ```
pub fn apply_discount(base: f64, discount: &Discount) -> f64 {
    match *discount {
        Discount::Percent(pct) => base * (1.0 - pct / 100.0),
        Discount::Fixed(amount) => {
            let discounted = base - amount;
            // NaN must survive the floor
            if discounted < 0.0 {
                0.0
            } else {
                discounted
            }
        }
    }
}

// =============================================================================
// Order Computations
// =============================================================================

/// Computes the totals of an order.
///
/// Lines with a zero/negative quantity or a blank item reference are left
/// out. Calling this twice with the same arguments yields bit-identical
/// results.
pub fn compute_order_totals(
    lines: &[OrderLine],
    tax_rates: &TaxRateTable,
    deposit: f64,
) -> OrderTotals {
    accumulate(
        lines.iter().filter(|line| line.has_item_reference()),
        tax_rates,
        deposit,
    )
}

/// Same as [`compute_order_totals`], but a line only counts when its item
/// still resolves in `catalog` (an item deleted mid-session drops out).
pub fn compute_order_totals_with_catalog<C>(
    lines: &[OrderLine],
    tax_rates: &TaxRateTable,
    catalog: &C,
    deposit: f64,
) -> OrderTotals
where
    C: CatalogLookup + ?Sized,
{
    accumulate(
        lines
            .iter()
            .filter(|line| catalog.lookup(&line.item_id).is_some()),
        tax_rates,
        deposit,
    )
}

fn accumulate<'a>(
    lines: impl Iterator<Item = &'a OrderLine>,
    tax_rates: &TaxRateTable,
    deposit: f64,
) -> OrderTotals {
    let mut subtotal_ht = 0.0;
    let mut buckets: BTreeMap<Rate, VatBreakdownEntry> = BTreeMap::new();

    for line in lines.filter(|line| line.quantity > 0) {
        let tax = tax_rates.find(&line.vat_rate_id);
        let rate = tax.map(|t| t.rate).unwrap_or_default();
        let line_total = compute_line_total(line, price_ht(line.unit_price_ttc, rate));

        subtotal_ht += line_total;

        // Two rate ids sharing a percentage share a bucket; first code wins.
        let entry = buckets
            .entry(rate)
            .or_insert_with(|| VatBreakdownEntry {
                rate,
                base: 0.0,
                total: 0.0,
                code: tax.map(|t| t.code.clone()).unwrap_or_default(),
            });
        entry.base += line_total;
        entry.total += line_total * rate.percentage() / 100.0;
    }

    let vat_breakdown: Vec<VatBreakdownEntry> = buckets.into_values().collect();
    let total_tva: f64 = vat_breakdown.iter().map(|e| e.total).sum();
    let total_ttc = subtotal_ht + total_tva;

    OrderTotals {
        subtotal_ht,
        vat_breakdown,
        total_tva,
        total_ttc,
        deposit,
        net_to_pay: total_ttc - deposit,
    }
}

/// Sum of the discounted tax-inclusive line amounts, computed from the TTC
/// side.
///
/// `compute_order_totals(..).total_ttc` must match this within
/// [`crate::AMOUNT_TOLERANCE`]; a gap means the discount or tax was applied
/// in the wrong order somewhere.
pub fn tax_inclusive_total(lines: &[OrderLine], tax_rates: &TaxRateTable) -> f64 {
    lines
        .iter()
        .filter(|line| line.has_item_reference() && line.quantity > 0)
        .map(|line| {
            let rate = tax_rates.rate_for(&line.vat_rate_id);
            let gross = line.unit_price_ttc * line.quantity as f64;
            match line.discount {
                Discount::Percent(pct) => gross * (1.0 - pct / 100.0),
                Discount::Fixed(amount) => {
                    let discounted = gross - amount * (1.0 + rate.percentage() / 100.0);
                    if discounted < 0.0 {
                        0.0
                    } else {
                        discounted
                    }
                }
            }
        })
        .sum()
}

// =============================================================================
// Margin
// =============================================================================

/// Margin of a finalized sale.
///
/// `total_cost` sums `purchase_price × quantity` over the sale lines. A line
/// whose item is gone from the catalog, or has no purchase price, costs 0:
/// the margin is overstated rather than the report failing.
pub fn compute_margin<C>(sale: &Sale, catalog: &C) -> Margin
where
    C: CatalogLookup + ?Sized,
{
    let total_cost: f64 = sale
        .lines
        .iter()
        .map(|line| {
            let unit_cost = catalog
                .lookup(&line.item_id)
                .and_then(|item| item.purchase_price)
                .unwrap_or(0.0);
            unit_cost * line.quantity as f64
        })
        .sum();

    Margin {
        subtotal_ht: sale.totals.subtotal_ht,
        total_cost,
        margin: sale.totals.subtotal_ht - total_cost,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
