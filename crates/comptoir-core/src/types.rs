//! # Domain Types
//!
//! Core domain types consumed by the pricing engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TaxRate      │   │   OrderLine     │   │  CatalogItem    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  vat_rate_id    │   │  id             │       │
//! │  │  rate (Rate)    │   │  item_id ───────┼──►│  purchase_price │       │
//! │  │  code           │   │  unit_price_ttc │   │  vat_rate_id    │       │
//! │  └─────────────────┘   │  quantity       │   └─────────────────┘       │
//! │                        │  discount       │                              │
//! │  ┌─────────────────┐   └─────────────────┘   ┌─────────────────┐       │
//! │  │      Rate       │   ┌─────────────────┐   │  DocumentKind   │       │
//! │  │  pct (f64)      │   │    Discount     │   │  Invoice  FA    │       │
//! │  │  5.5 = 5.5%     │   │  Percent(f64)   │   │  Quote    DE    │       │
//! │  └─────────────────┘   │  Fixed(f64)     │   │  ...            │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Amounts are plain `f64` currency units (euros, not cents): the engine
//! keeps full precision and only [`crate::Money`] rounds.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::pricing::OrderTotals;

// =============================================================================
// Rate
// =============================================================================

/// A VAT percentage (20.0 for 20 %), kept exactly as configured.
///
/// ## Design Notes
/// - `f64` at full precision: `8.875` prices at 8.875 %, never a rounded
///   neighbour
/// - Totally ordered through [`f64::total_cmp`], so the VAT breakdown can
///   bucket and sort by rate
/// - Never negative or `NaN`: construction collapses those to zero and
///   deserialization rejects them
/// - Serialized as the bare percentage: `"rate": 5.5`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(try_from = "f64", into = "f64")]
pub struct Rate(f64);

impl Rate {
    /// Creates a rate from a percentage.
    ///
    /// Negative and non-finite percentages collapse to zero; validation is
    /// expected to have rejected them already.
    pub fn from_percentage(pct: f64) -> Self {
        if !pct.is_finite() || pct <= 0.0 {
            return Rate::zero();
        }
        Rate(pct)
    }

    /// Returns the rate as a percentage (20.0 for 20%).
    #[inline]
    pub const fn percentage(&self) -> f64 {
        self.0
    }

    /// Zero rate (exempt, or unresolved reference).
    #[inline]
    pub const fn zero() -> Self {
        Rate(0.0)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::zero()
    }
}

impl PartialEq for Rate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for Rate {}

impl PartialOrd for Rate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for Rate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl TryFrom<f64> for Rate {
    type Error = ValidationError;

    fn try_from(pct: f64) -> Result<Self, Self::Error> {
        if !pct.is_finite() {
            return Err(ValidationError::NotFinite {
                field: "rate".to_string(),
            });
        }
        if pct < 0.0 {
            return Err(ValidationError::Negative {
                field: "rate".to_string(),
            });
        }
        Ok(Rate::from_percentage(pct))
    }
}

impl From<Rate> for f64 {
    fn from(rate: Rate) -> f64 {
        rate.0
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

// =============================================================================
// Tax Rate Table
// =============================================================================

/// One configured VAT rate.
///
/// Configured once by the settings collaborator and immutable while an order
/// is being edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate {
    /// Opaque identifier referenced by order lines and catalog items.
    pub id: String,

    /// Percentage, e.g. `20` or `5.5`.
    pub rate: Rate,

    /// Short tax code printed for legal reporting.
    pub code: String,
}

impl TaxRate {
    pub fn new(id: impl Into<String>, rate: Rate, code: impl Into<String>) -> Self {
        TaxRate {
            id: id.into(),
            rate,
            code: code.into(),
        }
    }
}

/// Lookup table of the configured VAT rates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxRateTable {
    rates: Vec<TaxRate>,
}

impl TaxRateTable {
    pub fn new(rates: Vec<TaxRate>) -> Self {
        TaxRateTable { rates }
    }

    /// Finds a rate by id.
    pub fn find(&self, id: &str) -> Option<&TaxRate> {
        self.rates.iter().find(|t| t.id == id)
    }

    /// Returns the rate for `id`, or zero when it does not resolve.
    pub fn rate_for(&self, id: &str) -> Rate {
        self.find(id).map(|t| t.rate).unwrap_or_default()
    }

    /// Returns the reporting code for `id`, or an empty string.
    pub fn code_for(&self, id: &str) -> &str {
        self.find(id).map(|t| t.code.as_str()).unwrap_or("")
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaxRate> {
        self.rates.iter()
    }

    pub fn as_slice(&self) -> &[TaxRate] {
        &self.rates
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl From<Vec<TaxRate>> for TaxRateTable {
    fn from(rates: Vec<TaxRate>) -> Self {
        TaxRateTable::new(rates)
    }
}

// =============================================================================
// Discount ("remise")
// =============================================================================

/// A line discount, either a percentage or a fixed currency amount.
///
/// Serialized as `{ "mode": "percent", "value": 10 }` or
/// `{ "mode": "fixed", "value": 2.5 }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "mode", content = "value", rename_all = "camelCase")]
pub enum Discount {
    /// Percentage of the line total, 0 to 100.
    Percent(f64),
    /// Amount subtracted from the line total (HT).
    Fixed(f64),
}

impl Discount {
    /// No discount.
    pub const NONE: Discount = Discount::Percent(0.0);

    /// Returns true when the discount changes nothing.
    pub fn is_none(&self) -> bool {
        match *self {
            Discount::Percent(p) => p == 0.0,
            Discount::Fixed(a) => a == 0.0,
        }
    }
}

impl Default for Discount {
    fn default() -> Self {
        Discount::NONE
    }
}

// =============================================================================
// Order Line
// =============================================================================

/// One cart entry.
///
/// ## Design Notes
/// - `id` is unique within the order and survives quantity/price edits
/// - `unit_price_ttc` is a snapshot of the catalog price when the line was
///   added; later catalog edits do not reprice the line
/// - HT amounts are never stored, see [`crate::pricing`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub id: String,

    /// Catalog item reference. Blank means unresolved.
    pub item_id: String,

    pub name: String,

    /// Tax-inclusive unit price.
    #[serde(rename = "unitPriceTTC")]
    pub unit_price_ttc: f64,

    pub quantity: i64,

    /// Reference into the tax rate table.
    pub vat_rate_id: String,

    #[serde(default)]
    pub discount: Discount,
}

impl OrderLine {
    /// Creates a line with quantity 1 and no discount.
    pub fn new(
        id: impl Into<String>,
        item_id: impl Into<String>,
        name: impl Into<String>,
        unit_price_ttc: f64,
        vat_rate_id: impl Into<String>,
    ) -> Self {
        OrderLine {
            id: id.into(),
            item_id: item_id.into(),
            name: name.into(),
            unit_price_ttc,
            quantity: 1,
            vat_rate_id: vat_rate_id.into(),
            discount: Discount::NONE,
        }
    }

    /// Creates a fresh line for a catalog item, freezing its current price.
    pub fn from_catalog_item(item: &CatalogItem) -> Self {
        OrderLine::new(
            Uuid::new_v4().to_string(),
            item.id.clone(),
            item.name.clone(),
            item.unit_price_ttc,
            item.vat_rate_id.clone(),
        )
    }

    /// Returns true when the line references a catalog item at all.
    #[inline]
    pub fn has_item_reference(&self) -> bool {
        !self.item_id.trim().is_empty()
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// A sellable catalog item, as seen by pricing and margin reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: String,
    pub name: String,

    #[serde(rename = "unitPriceTTC")]
    pub unit_price_ttc: f64,

    /// Purchase price (HT), used for margin. Unknown costs count as 0.
    #[serde(default)]
    pub purchase_price: Option<f64>,

    pub vat_rate_id: String,
}

/// Read access to the catalog collaborator.
pub trait CatalogLookup {
    fn lookup(&self, item_id: &str) -> Option<&CatalogItem>;
}

impl CatalogLookup for HashMap<String, CatalogItem> {
    fn lookup(&self, item_id: &str) -> Option<&CatalogItem> {
        self.get(item_id)
    }
}

impl CatalogLookup for [CatalogItem] {
    fn lookup(&self, item_id: &str) -> Option<&CatalogItem> {
        self.iter().find(|item| item.id == item_id)
    }
}

/// In-memory catalog keyed by item id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: HashMap<String, CatalogItem>,
}

impl Catalog {
    pub fn new(items: impl IntoIterator<Item = CatalogItem>) -> Self {
        Catalog {
            items: items.into_iter().map(|i| (i.id.clone(), i)).collect(),
        }
    }

    /// Removes an item (e.g. deleted while an order still references it).
    pub fn remove(&mut self, item_id: &str) -> Option<CatalogItem> {
        self.items.remove(item_id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl CatalogLookup for Catalog {
    fn lookup(&self, item_id: &str) -> Option<&CatalogItem> {
        self.items.get(item_id)
    }
}

// =============================================================================
// Document Kind ("pièce")
// =============================================================================

/// The kind of commercial document an order becomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Facture.
    #[default]
    Invoice,
    /// Devis.
    Quote,
    /// Bon de livraison.
    DeliveryNote,
    /// Avoir.
    CreditNote,
    /// Commande fournisseur.
    SupplierOrder,
}

impl DocumentKind {
    /// Numbering prefix printed on the document.
    pub const fn prefix(&self) -> &'static str {
        match self {
            DocumentKind::Invoice => "FA",
            DocumentKind::Quote => "DE",
            DocumentKind::DeliveryNote => "BL",
            DocumentKind::CreditNote => "AV",
            DocumentKind::SupplierOrder => "CF",
        }
    }

    /// Renders the document reference for a sequence number, e.g. `FA-000042`.
    pub fn reference(&self, seq: u32) -> String {
        format!("{}-{:06}", self.prefix(), seq)
    }

    /// Whether an "acompte" can be recorded against this kind of document.
    pub const fn accepts_deposit(&self) -> bool {
        matches!(
            self,
            DocumentKind::Invoice | DocumentKind::Quote | DocumentKind::SupplierOrder
        )
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DocumentKind::Invoice => "invoice",
            DocumentKind::Quote => "quote",
            DocumentKind::DeliveryNote => "delivery_note",
            DocumentKind::CreditNote => "credit_note",
            DocumentKind::SupplierOrder => "supplier_order",
        };
        f.write_str(label)
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A finalized order, frozen with the totals computed at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    /// Unique identifier (UUID v4).
    pub id: String,
    /// Document reference, e.g. `FA-000042`.
    pub number: String,
    pub kind: DocumentKind,
    pub lines: Vec<OrderLine>,
    pub totals: OrderTotals,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Sale {
    pub fn new(kind: DocumentKind, seq: u32, lines: Vec<OrderLine>, totals: OrderTotals) -> Self {
        Sale {
            id: Uuid::new_v4().to_string(),
            number: kind.reference(seq),
            kind,
            lines,
            totals,
            created_at: Utc::now(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
