//! # Order Commands
//!
//! Editing the current order and reading its summary.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Order Lifecycle                                      │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ Editing  │────►│ Summary  │────►│   Sale   │       │
//! │  │  Order   │     │          │     │ (Money)  │     │ FA-00001 │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                                 ▲              │
//! │                   add_item                           checkout          │
//! │                   update_quantity                                       │
//! │                   update_discount                                       │
//! │                   set_deposit                                           │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_order ─────────────────────►                   │
//! │                                                      (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every edit returns the fresh [`OrderSummary`], so a surface never prices
//! anything itself.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use comptoir_core::pricing::{compute_line_ht, compute_line_total};
use comptoir_core::types::{
    CatalogLookup, Discount, DocumentKind, OrderLine, Sale, TaxRateTable,
};
use comptoir_core::{CoreError, Money, OrderTotals, PricingError, VatBreakdownEntry};

use crate::error::{ApiError, ApiResult};
use crate::state::{AppConfig, OrderSession, SessionState};

// =============================================================================
// Response Types
// =============================================================================

/// One order line as displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineSummary {
    pub id: String,
    pub item_id: String,
    pub name: String,
    pub quantity: i64,
    pub discount: Discount,

    #[serde(rename = "unitPriceTTC")]
    pub unit_price_ttc: Money,

    #[serde(rename = "unitPriceHT")]
    pub unit_price_ht: Money,

    /// HT line total after discount.
    #[serde(rename = "totalHT")]
    pub total_ht: Money,

    /// Percentage applied to the line (0 for an unknown rate id).
    pub vat_rate: f64,

    /// False when the item left the catalog; the line is then left out of
    /// the totals and of the sale.
    pub resolved: bool,
}

/// One VAT breakdown row as displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VatSummary {
    pub rate: f64,
    pub code: String,
    pub base: Money,
    pub total: Money,
}

/// Order totals rounded for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsSummary {
    #[serde(rename = "subtotalHT")]
    pub subtotal_ht: Money,

    /// Ascending rate order.
    pub vat_breakdown: Vec<VatSummary>,

    #[serde(rename = "totalTVA")]
    pub total_tva: Money,

    #[serde(rename = "totalTTC")]
    pub total_ttc: Money,

    pub deposit: Money,

    /// Negative when the deposit exceeds the total.
    pub net_to_pay: Money,
}

/// The totals printed with the configured currency symbol ("32.40 €").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedTotals {
    #[serde(rename = "subtotalHT")]
    pub subtotal_ht: String,

    #[serde(rename = "totalTVA")]
    pub total_tva: String,

    #[serde(rename = "totalTTC")]
    pub total_ttc: String,

    pub deposit: String,
    pub net_to_pay: String,
}

impl FormattedTotals {
    fn new(totals: &TotalsSummary, symbol: &str) -> Self {
        FormattedTotals {
            subtotal_ht: totals.subtotal_ht.format_with(symbol),
            total_tva: totals.total_tva.format_with(symbol),
            total_ttc: totals.total_ttc.format_with(symbol),
            deposit: totals.deposit.format_with(symbol),
            net_to_pay: totals.net_to_pay.format_with(symbol),
        }
    }
}

/// Order response: lines plus totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub kind: DocumentKind,
    pub lines: Vec<LineSummary>,
    pub totals: TotalsSummary,
    pub formatted: FormattedTotals,
}

fn money(amount: f64, field: &'static str) -> Result<Money, PricingError> {
    Money::from_amount(amount).ok_or(PricingError::NonFinite { field })
}

impl LineSummary {
    fn build(
        line: &OrderLine,
        tax_rates: &TaxRateTable,
        resolved: bool,
    ) -> Result<Self, PricingError> {
        let price_ht = compute_line_ht(line, tax_rates);
        Ok(LineSummary {
            id: line.id.clone(),
            item_id: line.item_id.clone(),
            name: line.name.clone(),
            quantity: line.quantity,
            discount: line.discount,
            unit_price_ttc: money(line.unit_price_ttc, "unitPriceTTC")?,
            unit_price_ht: money(price_ht, "unitPriceHT")?,
            total_ht: money(compute_line_total(line, price_ht), "totalHT")?,
            vat_rate: tax_rates.rate_for(&line.vat_rate_id).percentage(),
            resolved,
        })
    }
}

impl TryFrom<&VatBreakdownEntry> for VatSummary {
    type Error = PricingError;

    fn try_from(entry: &VatBreakdownEntry) -> Result<Self, Self::Error> {
        Ok(VatSummary {
            rate: entry.rate.percentage(),
            code: entry.code.clone(),
            base: money(entry.base, "vatBreakdown")?,
            total: money(entry.total, "vatBreakdown")?,
        })
    }
}

impl TryFrom<&OrderTotals> for TotalsSummary {
    type Error = PricingError;

    fn try_from(totals: &OrderTotals) -> Result<Self, Self::Error> {
        totals.ensure_finite()?;

        Ok(TotalsSummary {
            subtotal_ht: money(totals.subtotal_ht, "subtotalHT")?,
            vat_breakdown: totals
                .vat_entries()
                .map(VatSummary::try_from)
                .collect::<Result<_, _>>()?,
            total_tva: money(totals.total_tva, "totalTVA")?,
            total_ttc: money(totals.total_ttc, "totalTTC")?,
            deposit: money(totals.deposit, "deposit")?,
            net_to_pay: money(totals.net_to_pay, "netToPay")?,
        })
    }
}

/// Builds the display summary of a session, priced against `catalog`.
///
/// Lines whose item left the catalog are listed with `resolved: false` and
/// contribute nothing to the totals. Totals containing `NaN` or an infinity
/// are refused with `PRICING_ERROR` and logged; they are never rounded into
/// a number.
pub fn summarize<C>(
    session: &OrderSession,
    config: &AppConfig,
    catalog: &C,
) -> ApiResult<OrderSummary>
where
    C: CatalogLookup + ?Sized,
{
    let totals = session.totals_with_catalog(&config.tax_rates, catalog);
    build_summary(session, config, &totals, |line| {
        catalog.lookup(&line.item_id).is_some()
    })
    .map_err(|err| refuse(session, err))
}

/// Builds the display summary of an order with no catalog to check against
/// (an order file priced offline). Every line with an item reference counts.
pub fn summarize_without_catalog(
    session: &OrderSession,
    config: &AppConfig,
) -> ApiResult<OrderSummary> {
    let totals = session.totals(&config.tax_rates);
    build_summary(session, config, &totals, OrderLine::has_item_reference)
        .map_err(|err| refuse(session, err))
}

fn refuse(session: &OrderSession, err: PricingError) -> ApiError {
    warn!(kind = %session.kind, error = %err, "Refusing to display unusable totals");
    ApiError::from(err)
}

fn build_summary<F>(
    session: &OrderSession,
    config: &AppConfig,
    totals: &OrderTotals,
    is_resolved: F,
) -> Result<OrderSummary, PricingError>
where
    F: Fn(&OrderLine) -> bool,
{
    let totals = TotalsSummary::try_from(totals)?;

    Ok(OrderSummary {
        kind: session.kind,
        lines: session
            .lines
            .iter()
            .map(|line| LineSummary::build(line, &config.tax_rates, is_resolved(line)))
            .collect::<Result<_, _>>()?,
        formatted: FormattedTotals::new(&totals, &config.currency_symbol),
        totals,
    })
}

// =============================================================================
// Commands
// =============================================================================

/// Gets the current order with its totals.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Order summary (always visible next to the lines)                      │
/// │                                                                         │
/// │  ┌────────────────────────────────────────────────────────────────┐    │
/// │  │  Café moulu 250g      x3   -10%              27.00 HT         │    │
/// │  ├────────────────────────────────────────────────────────────────┤    │
/// │  │  Total HT                                    27.00 €          │    │
/// │  │  TVA 20 %  (code 1)                           5.40 €          │    │
/// │  │  Total TTC                                   32.40 €          │    │
/// │  │  Acompte                                      0.00 €          │    │
/// │  │  ──────────────────────────────────────────────────           │    │
/// │  │  NET À PAYER                                 32.40 €          │    │
/// │  └────────────────────────────────────────────────────────────────┘    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn get_order_summary<C>(
    session: &SessionState,
    config: &AppConfig,
    catalog: &C,
) -> ApiResult<OrderSummary>
where
    C: CatalogLookup + ?Sized,
{
    debug!("get_order_summary command");
    session.with_session(|s| summarize(s, config, catalog))
}

/// Adds a catalog item to the order.
///
/// ## Behavior
/// - Item already in the order: its quantity increases by one
/// - Item not in the order: added with its current price frozen
/// - Item without a VAT rate: gets the configured default rate
pub fn add_item<C>(
    session: &SessionState,
    config: &AppConfig,
    catalog: &C,
    item_id: &str,
) -> ApiResult<OrderSummary>
where
    C: CatalogLookup + ?Sized,
{
    debug!(item_id = %item_id, "add_item command");

    let mut item = catalog
        .lookup(item_id)
        .cloned()
        .ok_or_else(|| CoreError::ItemNotFound(item_id.to_string()))?;
    if item.vat_rate_id.trim().is_empty() {
        item.vat_rate_id = config.default_vat_rate_id.clone();
    }

    session.with_session_mut(|s| {
        s.add_item(&item)?;
        summarize(s, config, catalog)
    })
}

/// Sets a line's quantity (1 to 9999; use [`remove_line`] to delete).
pub fn update_quantity<C>(
    session: &SessionState,
    config: &AppConfig,
    catalog: &C,
    line_id: &str,
    quantity: i64,
) -> ApiResult<OrderSummary>
where
    C: CatalogLookup + ?Sized,
{
    debug!(line_id = %line_id, quantity = %quantity, "update_quantity command");

    session.with_session_mut(|s| {
        s.set_quantity(line_id, quantity)?;
        summarize(s, config, catalog)
    })
}

/// Overrides a line's tax-inclusive unit price.
pub fn update_unit_price<C>(
    session: &SessionState,
    config: &AppConfig,
    catalog: &C,
    line_id: &str,
    unit_price_ttc: f64,
) -> ApiResult<OrderSummary>
where
    C: CatalogLookup + ?Sized,
{
    debug!(line_id = %line_id, unit_price_ttc = %unit_price_ttc, "update_unit_price command");

    session.with_session_mut(|s| {
        s.set_unit_price(line_id, unit_price_ttc)?;
        summarize(s, config, catalog)
    })
}

/// Sets a line's discount ("remise").
pub fn update_discount<C>(
    session: &SessionState,
    config: &AppConfig,
    catalog: &C,
    line_id: &str,
    discount: Discount,
) -> ApiResult<OrderSummary>
where
    C: CatalogLookup + ?Sized,
{
    debug!(line_id = %line_id, ?discount, "update_discount command");

    session.with_session_mut(|s| {
        s.set_discount(line_id, discount)?;
        summarize(s, config, catalog)
    })
}

pub fn remove_line<C>(
    session: &SessionState,
    config: &AppConfig,
    catalog: &C,
    line_id: &str,
) -> ApiResult<OrderSummary>
where
    C: CatalogLookup + ?Sized,
{
    debug!(line_id = %line_id, "remove_line command");

    session.with_session_mut(|s| {
        s.remove_line(line_id)?;
        summarize(s, config, catalog)
    })
}

pub fn clear_order<C>(
    session: &SessionState,
    config: &AppConfig,
    catalog: &C,
) -> ApiResult<OrderSummary>
where
    C: CatalogLookup + ?Sized,
{
    debug!("clear_order command");

    session.with_session_mut(|s| {
        s.clear();
        summarize(s, config, catalog)
    })
}

/// Records the acompte already paid.
///
/// Kept on the session for every kind, but only deducted for kinds that take
/// a deposit.
pub fn set_deposit<C>(
    session: &SessionState,
    config: &AppConfig,
    catalog: &C,
    deposit: f64,
) -> ApiResult<OrderSummary>
where
    C: CatalogLookup + ?Sized,
{
    debug!(deposit = %deposit, "set_deposit command");

    session.with_session_mut(|s| {
        s.set_deposit(deposit)?;
        summarize(s, config, catalog)
    })
}

/// Switches the document being drafted (invoice, quote, ...).
pub fn set_document_kind<C>(
    session: &SessionState,
    config: &AppConfig,
    catalog: &C,
    kind: DocumentKind,
) -> ApiResult<OrderSummary>
where
    C: CatalogLookup + ?Sized,
{
    debug!(kind = %kind, "set_document_kind command");

    session.with_session_mut(|s| {
        s.set_kind(kind);
        summarize(s, config, catalog)
    })
}

/// Finalizes the order into a numbered [`Sale`] and empties the session.
///
/// Lines whose item left the catalog are not invoiced.
pub fn checkout<C>(session: &SessionState, config: &AppConfig, catalog: &C) -> ApiResult<Sale>
where
    C: CatalogLookup + ?Sized,
{
    debug!("checkout command");
    Ok(session.checkout(&config.tax_rates, catalog)?)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use comptoir_core::types::{Catalog, CatalogItem};

    fn catalog() -> Catalog {
        Catalog::new(vec![
            CatalogItem {
                id: "cafe".to_string(),
                name: "Café moulu 250g".to_string(),
                unit_price_ttc: 12.0,
                purchase_price: Some(4.0),
                vat_rate_id: "tva-20".to_string(),
            },
            CatalogItem {
                id: "riz".to_string(),
                name: "Riz 1kg".to_string(),
                unit_price_ttc: 211.0,
                purchase_price: None,
                vat_rate_id: "tva-5.5".to_string(),
            },
            CatalogItem {
                id: "the".to_string(),
                name: "Thé vert".to_string(),
                unit_price_ttc: 60.0,
                purchase_price: None,
                vat_rate_id: "tva-20".to_string(),
            },
            CatalogItem {
                id: "sac".to_string(),
                name: "Sac".to_string(),
                unit_price_ttc: 1.2,
                purchase_price: None,
                vat_rate_id: String::new(),
            },
        ])
    }

    fn line_id(summary: &OrderSummary, item_id: &str) -> String {
        summary
            .lines
            .iter()
            .find(|l| l.item_id == item_id)
            .map(|l| l.id.clone())
            .unwrap()
    }

    #[test]
    fn test_empty_order_summary() {
        let summary =
            get_order_summary(&SessionState::default(), &AppConfig::default(), &catalog()).unwrap();
        assert!(summary.lines.is_empty());
        assert!(summary.totals.vat_breakdown.is_empty());
        assert_eq!(summary.totals.total_ttc, Money::zero());
        assert_eq!(summary.totals.net_to_pay, Money::zero());
        assert_eq!(summary.formatted.net_to_pay, "0.00 €");
    }

    #[test]
    fn test_cafe_scenario() {
        let session = SessionState::default();
        let config = AppConfig::default();
        let catalog = catalog();

        let summary = add_item(&session, &config, &catalog, "cafe").unwrap();
        let id = line_id(&summary, "cafe");
        update_quantity(&session, &config, &catalog, &id, 3).unwrap();
        let summary =
            update_discount(&session, &config, &catalog, &id, Discount::Percent(10.0)).unwrap();

        let line = &summary.lines[0];
        assert_eq!(line.unit_price_ht.cents(), 1_000);
        assert_eq!(line.total_ht.cents(), 2_700);
        assert_eq!(line.vat_rate, 20.0);
        assert!(line.resolved);

        let totals = &summary.totals;
        assert_eq!(totals.subtotal_ht.cents(), 2_700);
        assert_eq!(totals.total_tva.cents(), 540);
        assert_eq!(totals.total_ttc.cents(), 3_240);
        assert_eq!(totals.net_to_pay.cents(), 3_240);
        assert_eq!(totals.vat_breakdown.len(), 1);
        assert_eq!(totals.vat_breakdown[0].code, "1");
    }

    #[test]
    fn test_totals_are_formatted_with_currency_symbol() {
        let session = SessionState::default();
        let config = AppConfig {
            currency_symbol: "CHF".to_string(),
            ..AppConfig::default()
        };
        let catalog = catalog();

        let summary = add_item(&session, &config, &catalog, "cafe").unwrap();
        let id = line_id(&summary, "cafe");
        let summary = update_quantity(&session, &config, &catalog, &id, 3).unwrap();

        assert_eq!(summary.formatted.subtotal_ht, "30.00 CHF");
        assert_eq!(summary.formatted.total_tva, "6.00 CHF");
        assert_eq!(summary.formatted.total_ttc, "36.00 CHF");
    }

    #[test]
    fn test_two_rates_and_deposit() {
        let session = SessionState::default();
        let config = AppConfig::default();
        let catalog = catalog();

        // 120 TTC at 20 % and 211 TTC at 5.5 % → bases 100 and 200.
        let summary = add_item(&session, &config, &catalog, "cafe").unwrap();
        update_unit_price(&session, &config, &catalog, &line_id(&summary, "cafe"), 120.0).unwrap();
        add_item(&session, &config, &catalog, "riz").unwrap();
        let summary = set_deposit(&session, &config, &catalog, 100.0).unwrap();

        let totals = &summary.totals;
        let rates: Vec<f64> = totals.vat_breakdown.iter().map(|v| v.rate).collect();
        assert_eq!(rates, vec![5.5, 20.0]);
        assert_eq!(totals.total_tva.cents(), 3_100);
        assert_eq!(totals.total_ttc.cents(), 33_100);
        assert_eq!(totals.net_to_pay.cents(), 23_100);

        // A deposit larger than the total is shown as a negative net.
        let summary = set_deposit(&session, &config, &catalog, 400.0).unwrap();
        assert_eq!(summary.totals.net_to_pay.cents(), -6_900);
        assert_eq!(summary.formatted.net_to_pay, "-69.00 €");
    }

    #[test]
    fn test_deleted_catalog_item_is_not_priced_or_invoiced() {
        let session = SessionState::default();
        let config = AppConfig::default();
        let mut catalog = catalog();

        let summary = add_item(&session, &config, &catalog, "cafe").unwrap();
        update_unit_price(&session, &config, &catalog, &line_id(&summary, "cafe"), 120.0).unwrap();
        let summary = add_item(&session, &config, &catalog, "the").unwrap();
        assert_eq!(summary.totals.total_ttc.cents(), 18_000);

        catalog.remove("the");

        let summary = get_order_summary(&session, &config, &catalog).unwrap();
        assert_eq!(summary.lines.len(), 2);
        let the = summary.lines.iter().find(|l| l.item_id == "the").unwrap();
        assert!(!the.resolved);
        assert_eq!(summary.totals.subtotal_ht.cents(), 10_000);
        assert_eq!(summary.totals.total_ttc.cents(), 12_000);

        let sale = checkout(&session, &config, &catalog).unwrap();
        assert_eq!(sale.lines.len(), 1);
        assert_eq!(sale.lines[0].item_id, "cafe");
        assert_eq!(Money::from_amount(sale.totals.total_ttc).unwrap().cents(), 12_000);
    }

    #[test]
    fn test_delivery_note_ignores_deposit() {
        let session = SessionState::default();
        let config = AppConfig::default();
        let catalog = catalog();

        add_item(&session, &config, &catalog, "cafe").unwrap();
        set_deposit(&session, &config, &catalog, 5.0).unwrap();
        let summary =
            set_document_kind(&session, &config, &catalog, DocumentKind::DeliveryNote).unwrap();

        assert_eq!(summary.totals.deposit, Money::zero());
        assert_eq!(summary.totals.net_to_pay.cents(), 1_200);
    }

    #[test]
    fn test_item_without_rate_gets_default() {
        let session = SessionState::default();
        let summary = add_item(&session, &AppConfig::default(), &catalog(), "sac").unwrap();

        assert_eq!(summary.lines[0].vat_rate, 20.0);
        assert_eq!(summary.totals.subtotal_ht.cents(), 100);
    }

    #[test]
    fn test_unknown_item_and_line() {
        let session = SessionState::default();
        let config = AppConfig::default();
        let catalog = catalog();

        let err = add_item(&session, &config, &catalog, "absent").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = remove_line(&session, &config, &catalog, "absent").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_invalid_edits_are_validation_errors() {
        let session = SessionState::default();
        let config = AppConfig::default();
        let catalog = catalog();
        let summary = add_item(&session, &config, &catalog, "cafe").unwrap();
        let id = line_id(&summary, "cafe");

        let err = update_quantity(&session, &config, &catalog, &id, 0).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        let err =
            update_discount(&session, &config, &catalog, &id, Discount::Fixed(-1.0)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        let err = set_deposit(&session, &config, &catalog, f64::NAN).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_non_finite_totals_are_pricing_errors() {
        let session = SessionState::default();
        let config = AppConfig::default();
        let catalog = catalog();
        add_item(&session, &config, &catalog, "cafe").unwrap();
        session.with_session_mut(|s| s.deposit = f64::INFINITY);

        let err = get_order_summary(&session, &config, &catalog).unwrap_err();
        assert_eq!(err.code, ErrorCode::PricingError);
    }

    #[test]
    fn test_checkout_and_clear() {
        let session = SessionState::default();
        let config = AppConfig::default();
        let catalog = catalog();

        let err = checkout(&session, &config, &catalog).unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderError);

        add_item(&session, &config, &catalog, "cafe").unwrap();
        let sale = checkout(&session, &config, &catalog).unwrap();
        assert_eq!(sale.number, "FA-000001");
        assert!(get_order_summary(&session, &config, &catalog).unwrap().lines.is_empty());

        add_item(&session, &config, &catalog, "riz").unwrap();
        let summary = clear_order(&session, &config, &catalog).unwrap();
        assert!(summary.lines.is_empty());
    }

    #[test]
    fn test_summary_json_shape() {
        let session = SessionState::default();
        let config = AppConfig::default();
        let summary = add_item(&session, &config, &catalog(), "cafe").unwrap();

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["kind"], "invoice");
        assert_eq!(json["lines"][0]["unitPriceTTC"], 1200);
        assert_eq!(json["lines"][0]["discount"]["mode"], "percent");
        assert_eq!(json["lines"][0]["resolved"], true);
        assert_eq!(json["totals"]["totalTTC"], 1200);
        assert_eq!(json["totals"]["vatBreakdown"][0]["rate"], 20.0);
        assert_eq!(json["formatted"]["totalTTC"], "12.00 €");
    }

    #[test]
    fn test_summary_without_catalog_counts_every_referenced_line() {
        let line = OrderLine::new("l1", "cafe", "Café", 12.0, "tva-20");
        let session = OrderSession::from_lines(DocumentKind::Invoice, vec![line], 0.0).unwrap();

        let summary = summarize_without_catalog(&session, &AppConfig::default()).unwrap();
        assert!(summary.lines[0].resolved);
        assert_eq!(summary.totals.total_ttc.cents(), 1_200);
    }
}
