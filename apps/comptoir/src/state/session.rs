//! # Order Session
//!
//! Owns the order being edited (the cart) and hands it to the pricing engine.
//!
//! ## Session Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Order Session Operations                             │
//! │                                                                         │
//! │  Surface action           Command                 Session change        │
//! │  ──────────────           ───────                 ──────────────        │
//! │                                                                         │
//! │  Pick catalog item ─────► add_item() ───────────► lines.push(line)     │
//! │                                                   (or quantity += 1)   │
//! │  Change quantity ───────► update_quantity() ────► line.quantity = n    │
//! │                                                                         │
//! │  Edit remise ───────────► update_discount() ────► line.discount = d    │
//! │                                                                         │
//! │  Enter acompte ─────────► set_deposit() ────────► deposit = x          │
//! │                                                                         │
//! │  Delete / Clear ────────► remove_line() ────────► lines.remove(i)      │
//! │                           clear_order()           lines.clear()        │
//! │                                                                         │
//! │  Validate ──────────────► checkout() ───────────► Sale, then cleared   │
//! │                                                                         │
//! │  Every edit is validated first; a rejected edit leaves the session     │
//! │  untouched. Totals are never stored, always recomputed.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use comptoir_core::error::CoreResult;
use comptoir_core::pricing::{compute_order_totals, compute_order_totals_with_catalog};
use comptoir_core::types::{
    CatalogItem, CatalogLookup, Discount, DocumentKind, OrderLine, Sale, TaxRateTable,
};
use comptoir_core::validation::{
    validate_deposit, validate_discount, validate_item_reference, validate_line,
    validate_quantity, validate_unit_price,
};
use comptoir_core::{CoreError, OrderTotals, MAX_ORDER_LINES};

/// The order currently being edited.
///
/// ## Invariants
/// - Line ids are unique and stable across edits
/// - Adding an item already in the order increments its line's quantity
/// - At most [`MAX_ORDER_LINES`] lines
/// - Every stored line passes `validate_line`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSession {
    pub kind: DocumentKind,
    pub lines: Vec<OrderLine>,
    /// Acompte entered by the user; see [`OrderSession::effective_deposit`].
    pub deposit: f64,
    pub opened_at: DateTime<Utc>,
}

impl OrderSession {
    pub fn new(kind: DocumentKind) -> Self {
        OrderSession {
            kind,
            lines: Vec::new(),
            deposit: 0.0,
            opened_at: Utc::now(),
        }
    }

    /// Builds a session from existing lines (e.g. a saved quote), validating
    /// each of them.
    pub fn from_lines(kind: DocumentKind, lines: Vec<OrderLine>, deposit: f64) -> CoreResult<Self> {
        if lines.len() > MAX_ORDER_LINES {
            return Err(CoreError::CartTooLarge {
                max: MAX_ORDER_LINES,
            });
        }
        for line in &lines {
            validate_line(line)?;
        }
        validate_deposit(deposit)?;

        Ok(OrderSession {
            lines,
            deposit,
            ..OrderSession::new(kind)
        })
    }

    /// Adds a catalog item, or bumps the quantity of its existing line.
    ///
    /// Returns the id of the affected line.
    pub fn add_item(&mut self, item: &CatalogItem) -> CoreResult<String> {
        validate_item_reference(&item.id)?;
        validate_unit_price(item.unit_price_ttc)?;

        if let Some(line) = self.lines.iter_mut().find(|l| l.item_id == item.id) {
            let quantity = line.quantity + 1;
            validate_quantity(quantity)?;
            line.quantity = quantity;
            return Ok(line.id.clone());
        }

        if self.lines.len() >= MAX_ORDER_LINES {
            return Err(CoreError::CartTooLarge {
                max: MAX_ORDER_LINES,
            });
        }

        let line = OrderLine::from_catalog_item(item);
        let id = line.id.clone();
        self.lines.push(line);
        Ok(id)
    }

    pub fn set_quantity(&mut self, line_id: &str, quantity: i64) -> CoreResult<()> {
        validate_quantity(quantity)?;
        self.line_mut(line_id)?.quantity = quantity;
        Ok(())
    }

    pub fn set_unit_price(&mut self, line_id: &str, unit_price_ttc: f64) -> CoreResult<()> {
        validate_unit_price(unit_price_ttc)?;
        self.line_mut(line_id)?.unit_price_ttc = unit_price_ttc;
        Ok(())
    }

    pub fn set_discount(&mut self, line_id: &str, discount: Discount) -> CoreResult<()> {
        validate_discount(&discount)?;
        self.line_mut(line_id)?.discount = discount;
        Ok(())
    }

    pub fn remove_line(&mut self, line_id: &str) -> CoreResult<OrderLine> {
        let index = self
            .lines
            .iter()
            .position(|l| l.id == line_id)
            .ok_or_else(|| CoreError::LineNotFound(line_id.to_string()))?;
        Ok(self.lines.remove(index))
    }

    pub fn set_deposit(&mut self, deposit: f64) -> CoreResult<()> {
        validate_deposit(deposit)?;
        self.deposit = deposit;
        Ok(())
    }

    pub fn set_kind(&mut self, kind: DocumentKind) {
        self.kind = kind;
    }

    /// Empties the order; the document kind is kept.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.deposit = 0.0;
        self.opened_at = Utc::now();
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Deposit that applies to this kind of document (0 when the kind takes
    /// no acompte).
    pub fn effective_deposit(&self) -> f64 {
        if self.kind.accepts_deposit() {
            self.deposit
        } else {
            0.0
        }
    }

    /// Current totals.
    pub fn totals(&self, tax_rates: &TaxRateTable) -> OrderTotals {
        compute_order_totals(&self.lines, tax_rates, self.effective_deposit())
    }

    /// Current totals, leaving out lines whose item left the catalog.
    pub fn totals_with_catalog<C>(&self, tax_rates: &TaxRateTable, catalog: &C) -> OrderTotals
    where
        C: CatalogLookup + ?Sized,
    {
        compute_order_totals_with_catalog(
            &self.lines,
            tax_rates,
            catalog,
            self.effective_deposit(),
        )
    }

    /// Finalizes the order into a [`Sale`] numbered with `seq`, then clears
    /// the session.
    ///
    /// Lines whose item left `catalog` are not invoiced: they are dropped
    /// from the sale and its totals. Refuses orders with no invoiceable line,
    /// invalid lines and non-finite totals; on refusal the session is left
    /// as it was.
    pub fn checkout<C>(
        &mut self,
        tax_rates: &TaxRateTable,
        catalog: &C,
        seq: u32,
    ) -> CoreResult<Sale>
    where
        C: CatalogLookup + ?Sized,
    {
        for line in &self.lines {
            validate_line(line)?;
        }

        let (lines, dropped): (Vec<&OrderLine>, Vec<&OrderLine>) = self
            .lines
            .iter()
            .partition(|line| catalog.lookup(&line.item_id).is_some());
        if lines.is_empty() {
            return Err(CoreError::EmptyOrder);
        }
        if !dropped.is_empty() {
            warn!(
                kind = %self.kind,
                dropped = dropped.len(),
                "Leaving lines for deleted catalog items out of the sale"
            );
        }

        let totals = self.totals_with_catalog(tax_rates, catalog);
        if let Err(err) = totals.ensure_finite() {
            warn!(kind = %self.kind, error = %err, "Refusing checkout with unusable totals");
            return Err(err.into());
        }

        let lines: Vec<OrderLine> = lines.into_iter().cloned().collect();
        let sale = Sale::new(self.kind, seq, lines, totals);
        info!(
            number = %sale.number,
            lines = sale.lines.len(),
            total_ttc = sale.totals.total_ttc,
            "Order checked out"
        );
        self.clear();
        Ok(sale)
    }

    fn line_mut(&mut self, line_id: &str) -> CoreResult<&mut OrderLine> {
        self.lines
            .iter_mut()
            .find(|l| l.id == line_id)
            .ok_or_else(|| CoreError::LineNotFound(line_id.to_string()))
    }
}

impl Default for OrderSession {
    fn default() -> Self {
        OrderSession::new(DocumentKind::default())
    }
}

/// Next document number per kind.
#[derive(Debug, Default)]
struct DocumentCounters {
    last: HashMap<DocumentKind, u32>,
}

impl DocumentCounters {
    fn peek(&self, kind: DocumentKind) -> CoreResult<u32> {
        self.last
            .get(&kind)
            .copied()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or(CoreError::NumberingExhausted(kind))
    }

    fn commit(&mut self, kind: DocumentKind, seq: u32) {
        self.last.insert(kind, seq);
    }
}

/// Shared order session state.
///
/// ## Thread Safety
/// `Arc<Mutex<_>>`: any surface may edit the order, one edit at a time.
/// A poisoned lock is recovered; the session data stays valid because
/// every mutation validates before writing.
#[derive(Debug, Clone)]
pub struct SessionState {
    session: Arc<Mutex<OrderSession>>,
    counters: Arc<Mutex<DocumentCounters>>,
}

impl SessionState {
    pub fn new(kind: DocumentKind) -> Self {
        SessionState {
            session: Arc::new(Mutex::new(OrderSession::new(kind))),
            counters: Arc::new(Mutex::new(DocumentCounters::default())),
        }
    }

    /// Runs `f` with read access to the session.
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&OrderSession) -> R,
    {
        let session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        f(&session)
    }

    /// Runs `f` with write access to the session.
    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut OrderSession) -> R,
    {
        let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut session)
    }

    /// Checks the session out under the next number for its document kind.
    ///
    /// A refused checkout does not consume a number.
    pub fn checkout<C>(&self, tax_rates: &TaxRateTable, catalog: &C) -> CoreResult<Sale>
    where
        C: CatalogLookup + ?Sized,
    {
        let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        let mut counters = self.counters.lock().unwrap_or_else(PoisonError::into_inner);

        let kind = session.kind;
        let seq = counters.peek(kind)?;
        let sale = session.checkout(tax_rates, catalog, seq)?;
        counters.commit(kind, seq);
        Ok(sale)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::new(DocumentKind::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use comptoir_core::types::{Rate, TaxRate};
    use comptoir_core::{Money, ValidationError};

    fn rates() -> TaxRateTable {
        TaxRateTable::new(vec![
            TaxRate::new("tva-20", Rate::from_percentage(20.0), "1"),
            TaxRate::new("tva-5.5", Rate::from_percentage(5.5), "3"),
        ])
    }

    fn item(id: &str, price: f64) -> CatalogItem {
        CatalogItem {
            id: id.to_string(),
            name: format!("Item {}", id),
            unit_price_ttc: price,
            purchase_price: None,
            vat_rate_id: "tva-20".to_string(),
        }
    }

    fn cents(amount: f64) -> i64 {
        Money::from_amount(amount).unwrap().cents()
    }

    fn catalog() -> Vec<CatalogItem> {
        vec![item("a", 12.0), item("b", 5.0)]
    }

    #[test]
    fn test_add_item_creates_line_with_defaults() {
        let mut session = OrderSession::default();
        let id = session.add_item(&item("a", 12.0)).unwrap();

        assert_eq!(session.lines.len(), 1);
        let line = &session.lines[0];
        assert_eq!(line.id, id);
        assert_eq!(line.quantity, 1);
        assert_eq!(line.discount, Discount::NONE);
    }

    #[test]
    fn test_add_same_item_increments_quantity() {
        let mut session = OrderSession::default();
        let first = session.add_item(&item("a", 12.0)).unwrap();
        let second = session.add_item(&item("a", 12.0)).unwrap();

        assert_eq!(first, second);
        assert_eq!(session.lines.len(), 1);
        assert_eq!(session.lines[0].quantity, 2);
    }

    #[test]
    fn test_line_id_is_stable_across_edits() {
        let mut session = OrderSession::default();
        let id = session.add_item(&item("a", 12.0)).unwrap();

        session.set_quantity(&id, 3).unwrap();
        session.set_unit_price(&id, 14.4).unwrap();
        session.set_discount(&id, Discount::Percent(10.0)).unwrap();

        assert_eq!(session.lines[0].id, id);
        assert_eq!(session.lines[0].quantity, 3);
    }

    #[test]
    fn test_rejected_edit_leaves_line_untouched() {
        let mut session = OrderSession::default();
        let id = session.add_item(&item("a", 12.0)).unwrap();

        let err = session.set_quantity(&id, 0).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::OutOfRange { .. })
        ));
        assert!(session.set_discount(&id, Discount::Percent(150.0)).is_err());
        assert!(session.set_deposit(-5.0).is_err());

        assert_eq!(session.lines[0].quantity, 1);
        assert_eq!(session.lines[0].discount, Discount::NONE);
        assert_eq!(session.deposit, 0.0);
    }

    #[test]
    fn test_unknown_line() {
        let mut session = OrderSession::default();
        assert!(matches!(
            session.set_quantity("missing", 2),
            Err(CoreError::LineNotFound(_))
        ));
        assert!(session.remove_line("missing").is_err());
    }

    #[test]
    fn test_cart_limit() {
        let mut session = OrderSession::default();
        for i in 0..MAX_ORDER_LINES {
            session.add_item(&item(&format!("i{}", i), 1.0)).unwrap();
        }
        assert!(matches!(
            session.add_item(&item("one-more", 1.0)),
            Err(CoreError::CartTooLarge { .. })
        ));
    }

    #[test]
    fn test_totals_apply_deposit_per_document_kind() {
        let mut session = OrderSession::new(DocumentKind::Invoice);
        session.add_item(&item("a", 120.0)).unwrap();
        session.set_deposit(20.0).unwrap();

        assert_eq!(cents(session.totals(&rates()).net_to_pay), 10_000);

        session.set_kind(DocumentKind::DeliveryNote);
        let totals = session.totals(&rates());
        assert_eq!(totals.deposit, 0.0);
        assert_eq!(cents(totals.net_to_pay), 12_000);
    }

    #[test]
    fn test_totals_with_catalog_drop_deleted_items() {
        let mut session = OrderSession::default();
        session.add_item(&item("a", 120.0)).unwrap();
        session.add_item(&item("b", 60.0)).unwrap();

        let catalog = vec![item("a", 120.0)];
        let totals = session.totals_with_catalog(&rates(), catalog.as_slice());
        assert_eq!(cents(totals.total_ttc), 12_000);
    }

    #[test]
    fn test_checkout_produces_sale_and_clears() {
        let mut session = OrderSession::default();
        let id = session.add_item(&item("a", 12.0)).unwrap();
        session.set_quantity(&id, 3).unwrap();
        session.set_discount(&id, Discount::Percent(10.0)).unwrap();

        let sale = session.checkout(&rates(), catalog().as_slice(), 42).unwrap();
        assert_eq!(sale.number, "FA-000042");
        assert_eq!(sale.lines.len(), 1);
        assert_eq!(cents(sale.totals.total_ttc), 3_240);
        assert!(session.is_empty());
    }

    #[test]
    fn test_checkout_leaves_deleted_items_out_of_the_sale() {
        let mut session = OrderSession::default();
        session.add_item(&item("a", 120.0)).unwrap();
        session.add_item(&item("b", 60.0)).unwrap();

        let catalog = vec![item("a", 120.0)];
        let sale = session.checkout(&rates(), catalog.as_slice(), 1).unwrap();

        assert_eq!(sale.lines.len(), 1);
        assert_eq!(sale.lines[0].item_id, "a");
        assert_eq!(cents(sale.totals.total_ttc), 12_000);
        assert!(session.is_empty());
    }

    #[test]
    fn test_checkout_refuses_empty_order() {
        let mut session = OrderSession::default();
        assert!(matches!(
            session.checkout(&rates(), catalog().as_slice(), 1),
            Err(CoreError::EmptyOrder)
        ));
    }

    #[test]
    fn test_checkout_refuses_order_with_only_deleted_items() {
        let mut session = OrderSession::default();
        session.add_item(&item("gone", 10.0)).unwrap();

        assert!(matches!(
            session.checkout(&rates(), catalog().as_slice(), 1),
            Err(CoreError::EmptyOrder)
        ));
        assert_eq!(session.lines.len(), 1);
    }

    #[test]
    fn test_checkout_refuses_non_finite_totals() {
        // A NaN deposit can only come from outside the validated edits.
        let mut session = OrderSession::default();
        session.add_item(&item("a", 12.0)).unwrap();
        session.deposit = f64::NAN;

        assert!(matches!(
            session.checkout(&rates(), catalog().as_slice(), 1),
            Err(CoreError::Pricing(_))
        ));
        assert_eq!(session.lines.len(), 1);
    }

    #[test]
    fn test_from_lines_validates() {
        let mut line = OrderLine::new("l1", "item-1", "Café", 1.2, "tva-20");
        assert!(OrderSession::from_lines(DocumentKind::Quote, vec![line.clone()], 0.0).is_ok());

        line.discount = Discount::Percent(-1.0);
        assert!(OrderSession::from_lines(DocumentKind::Quote, vec![line], 0.0).is_err());
    }

    #[test]
    fn test_session_state_numbers_per_kind() {
        let state = SessionState::default();

        let catalog = catalog();

        state.with_session_mut(|s| s.add_item(&item("a", 12.0)).map(|_| ())).unwrap();
        assert_eq!(state.checkout(&rates(), catalog.as_slice()).unwrap().number, "FA-000001");

        // Refused checkout does not consume a number.
        assert!(state.checkout(&rates(), catalog.as_slice()).is_err());

        state.with_session_mut(|s| s.add_item(&item("a", 12.0)).map(|_| ())).unwrap();
        assert_eq!(state.checkout(&rates(), catalog.as_slice()).unwrap().number, "FA-000002");

        state.with_session_mut(|s| {
            s.set_kind(DocumentKind::Quote);
            s.add_item(&item("b", 5.0)).map(|_| ())
        })
        .unwrap();
        assert_eq!(state.checkout(&rates(), catalog.as_slice()).unwrap().number, "DE-000001");
        assert!(state.with_session(|s| s.is_empty()));
    }

    #[test]
    fn test_exhausted_numbering_refuses_checkout() {
        let state = SessionState::default();
        state.counters.lock().unwrap().commit(DocumentKind::Invoice, u32::MAX);
        state.with_session_mut(|s| s.add_item(&item("a", 12.0)).map(|_| ())).unwrap();

        let err = state.checkout(&rates(), catalog().as_slice()).unwrap_err();
        assert!(matches!(err, CoreError::NumberingExhausted(DocumentKind::Invoice)));
        assert!(!state.with_session(|s| s.is_empty()));
    }
}
