//! # Report Commands
//!
//! Margins over finalized sales, for the reporting views.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Sale          Total HT      Cost        Margin      Rate              │
//! │  FA-000001      27.00 €     12.00 €     15.00 €     55.6 %             │
//! │  FA-000002     100.00 €      0.00 €    100.00 €    100.0 %  (no cost)  │
//! │  ─────────────────────────────────────────────────────────             │
//! │  Total         127.00 €     12.00 €    115.00 €     90.6 %             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Costs come from the catalog as it is now; items no longer in the catalog
//! cost nothing.

use serde::{Deserialize, Serialize};
use tracing::debug;

use comptoir_core::pricing::compute_margin;
use comptoir_core::types::{CatalogLookup, Sale};
use comptoir_core::{Margin, Money, PricingError};

use crate::error::ApiResult;

/// Margin of one sale, rounded for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginSummary {
    #[serde(rename = "subtotalHT")]
    pub subtotal_ht: Money,
    pub total_cost: Money,
    pub margin: Money,
    /// Percentage of the HT subtotal.
    pub margin_rate: f64,
}

impl TryFrom<Margin> for MarginSummary {
    type Error = PricingError;

    fn try_from(margin: Margin) -> Result<Self, Self::Error> {
        let rate = margin.rate();
        if !rate.is_finite() {
            return Err(PricingError::NonFinite {
                field: "marginRate",
            });
        }
        Ok(MarginSummary {
            subtotal_ht: Money::from_amount(margin.subtotal_ht).ok_or(PricingError::NonFinite {
                field: "subtotalHT",
            })?,
            total_cost: Money::from_amount(margin.total_cost).ok_or(PricingError::NonFinite {
                field: "totalCost",
            })?,
            margin: Money::from_amount(margin.margin)
                .ok_or(PricingError::NonFinite { field: "margin" })?,
            margin_rate: rate,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleMargin {
    pub sale_id: String,
    pub number: String,
    #[serde(flatten)]
    pub margin: MarginSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginReport {
    pub sales: Vec<SaleMargin>,
    pub total: MarginSummary,
}

/// Computes per-sale margins and their aggregate.
///
/// The aggregate rate is computed on the summed amounts, not averaged over
/// sales.
pub fn margin_report<C>(sales: &[Sale], catalog: &C) -> ApiResult<MarginReport>
where
    C: CatalogLookup + ?Sized,
{
    debug!(sales = sales.len(), "margin_report command");

    let margins: Vec<(&Sale, Margin)> = sales
        .iter()
        .map(|sale| (sale, compute_margin(sale, catalog)))
        .collect();

    let total: Margin = margins.iter().map(|(_, m)| *m).sum();

    let sales = margins
        .into_iter()
        .map(|(sale, margin)| {
            Ok(SaleMargin {
                sale_id: sale.id.clone(),
                number: sale.number.clone(),
                margin: MarginSummary::try_from(margin)?,
            })
        })
        .collect::<Result<Vec<_>, PricingError>>()?;

    Ok(MarginReport {
        sales,
        total: MarginSummary::try_from(total)?,
    })
}
