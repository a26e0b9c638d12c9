//! Stock transaction ledger with optimistic counters.
//!
//! Stock is never edited as a bare number: every change is a signed
//! transaction appended to the product's ledger. The ledger keeps two
//! counters, total owned stock and currently available stock, and applies
//! accepted transactions to them optimistically so the screen updates
//! without a refetch. [`StockLedger::reconcile`] replaces the optimistic
//! counters with server truth whenever the product is reloaded.

use chrono::{DateTime, Utc};
use thiserror::Error;

use arenda_client::ApiError;
use arenda_core::{OrderId, ProductId};

use crate::api::types::{AdminProduct, StockTransaction, StockTransactionInput};
use crate::api::AdminApi;

/// Stock operation errors.
#[derive(Debug, Error)]
pub enum StockError {
    /// Quantities are entered as positive integers; rejected before any
    /// network call.
    #[error("quantity must be a positive whole number")]
    InvalidQuantity,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Parse a user-entered quantity.
///
/// # Errors
///
/// Returns [`StockError::InvalidQuantity`] for anything that is not a
/// positive integer.
pub fn parse_quantity(raw: &str) -> Result<u32, StockError> {
    match raw.trim().parse::<u32>() {
        Ok(quantity) if quantity > 0 => Ok(quantity),
        _ => Err(StockError::InvalidQuantity),
    }
}

/// One product's stock view: counters plus transaction history.
#[derive(Debug, Clone)]
pub struct StockLedger {
    product_id: ProductId,
    stock_qty: i64,
    available_stock_qty: i64,
    /// Newest first.
    transactions: Vec<StockTransaction>,
}

impl StockLedger {
    /// Build the ledger from a loaded product's counters.
    #[must_use]
    pub fn new(product: &AdminProduct) -> Self {
        Self {
            product_id: product.id,
            stock_qty: product.stock_qty,
            available_stock_qty: product.available_stock_qty,
            transactions: Vec::new(),
        }
    }

    /// Total units owned.
    #[must_use]
    pub const fn stock_qty(&self) -> i64 {
        self.stock_qty
    }

    /// Units not reserved by open orders.
    #[must_use]
    pub const fn available_stock_qty(&self) -> i64 {
        self.available_stock_qty
    }

    /// Transaction history, newest first.
    #[must_use]
    pub fn transactions(&self) -> &[StockTransaction] {
        &self.transactions
    }

    /// Fetch the full transaction history.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn load_history<A: AdminApi>(&mut self, api: &A) -> Result<(), ApiError> {
        self.transactions = api.stock_transactions(self.product_id).await?;
        Ok(())
    }

    /// Record newly received units.
    ///
    /// Both counters move up once the backend accepts the transaction.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-positive quantity or a failed API call.
    pub async fn receive<A: AdminApi>(
        &mut self,
        api: &A,
        quantity: &str,
        note: Option<String>,
    ) -> Result<(), StockError> {
        let quantity = parse_quantity(quantity)?;
        self.post(
            api,
            StockTransactionInput {
                product_id: self.product_id,
                delta: i64::from(quantity),
                affects_available: true,
                scheduled_for: None,
                order_id: None,
                note,
            },
        )
        .await
    }

    /// Write off lost or damaged units.
    ///
    /// `affects_available` is false when the written-off units were already
    /// reserved, so only the total moves.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-positive quantity or a failed API call.
    pub async fn write_off<A: AdminApi>(
        &mut self,
        api: &A,
        quantity: &str,
        affects_available: bool,
        note: Option<String>,
    ) -> Result<(), StockError> {
        let quantity = parse_quantity(quantity)?;
        self.post(
            api,
            StockTransactionInput {
                product_id: self.product_id,
                delta: -i64::from(quantity),
                affects_available,
                scheduled_for: None,
                order_id: None,
                note,
            },
        )
        .await
    }

    /// Schedule a future reservation for an order.
    ///
    /// The backend applies it when `scheduled_for` arrives; until then it
    /// sits in the history with `applied = false` and moves no counter.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-positive quantity or a failed API call.
    pub async fn schedule_reservation<A: AdminApi>(
        &mut self,
        api: &A,
        quantity: &str,
        scheduled_for: DateTime<Utc>,
        order_id: OrderId,
    ) -> Result<(), StockError> {
        let quantity = parse_quantity(quantity)?;
        self.post(
            api,
            StockTransactionInput {
                product_id: self.product_id,
                delta: -i64::from(quantity),
                affects_available: true,
                scheduled_for: Some(scheduled_for),
                order_id: Some(order_id),
                note: None,
            },
        )
        .await
    }

    async fn post<A: AdminApi>(
        &mut self,
        api: &A,
        input: StockTransactionInput,
    ) -> Result<(), StockError> {
        let transaction = api.create_stock_transaction(input).await?;
        self.apply(transaction);
        Ok(())
    }

    /// Apply an accepted transaction to the optimistic counters.
    ///
    /// Unapplied (scheduled) transactions only enter the history.
    pub fn apply(&mut self, transaction: StockTransaction) {
        if transaction.applied {
            self.stock_qty += transaction.delta;
            if transaction.affects_available {
                self.available_stock_qty += transaction.delta;
            }
        }
        self.transactions.insert(0, transaction);
    }

    /// Replace the optimistic counters with server truth.
    pub fn reconcile(&mut self, product: &AdminProduct) {
        self.stock_qty = product.stock_qty;
        self.available_stock_qty = product.available_stock_qty;
    }
}

#[cfg(test)]
mod tests {
    use arenda_core::StockTransactionId;

    use super::*;

    fn transaction(delta: i64, affects_available: bool, applied: bool) -> StockTransaction {
        StockTransaction {
            id: StockTransactionId::new(1),
            product_id: ProductId::new(7),
            delta,
            affects_available,
            applied,
            scheduled_for: None,
            order_id: None,
            note: None,
            created_at: Utc::now(),
        }
    }

    fn ledger(stock: i64, available: i64) -> StockLedger {
        StockLedger {
            product_id: ProductId::new(7),
            stock_qty: stock,
            available_stock_qty: available,
            transactions: Vec::new(),
        }
    }

    #[test]
    fn test_parse_quantity_rejects_non_positive() {
        assert!(parse_quantity("0").is_err());
        assert!(parse_quantity("-3").is_err());
        assert!(parse_quantity("2.5").is_err());
        assert!(parse_quantity("").is_err());
        assert!(matches!(parse_quantity("5"), Ok(5)));
    }

    #[test]
    fn test_write_off_moves_both_counters() {
        let mut ledger = ledger(20, 20);
        ledger.apply(transaction(-5, true, true));
        assert_eq!(ledger.stock_qty(), 15);
        assert_eq!(ledger.available_stock_qty(), 15);
    }

    #[test]
    fn test_reserved_write_off_keeps_available() {
        let mut ledger = ledger(20, 12);
        ledger.apply(transaction(-5, false, true));
        assert_eq!(ledger.stock_qty(), 15);
        assert_eq!(ledger.available_stock_qty(), 12);
    }

    #[test]
    fn test_scheduled_transaction_moves_nothing() {
        let mut ledger = ledger(20, 20);
        ledger.apply(transaction(-5, true, false));
        assert_eq!(ledger.stock_qty(), 20);
        assert_eq!(ledger.available_stock_qty(), 20);
        assert_eq!(ledger.transactions().len(), 1);
    }

    #[test]
    fn test_newest_transaction_first() {
        let mut ledger = ledger(0, 0);
        ledger.apply(transaction(1, true, true));
        ledger.apply(transaction(2, true, true));
        assert_eq!(ledger.transactions()[0].delta, 2);
    }

    #[test]
    fn test_reconcile_replaces_counters() {
        let mut ledger = ledger(20, 20);
        ledger.apply(transaction(-5, true, true));
        let product_json = serde_json::json!({
            "id": 7,
            "name": "Стул",
            "category_id": 1,
            "price_rub": "100",
            "dimensions": { "shape": "line__length", "length_cm": "120" },
            "delivery": {
                "volume_m3": "0.1",
                "weight_kg": "5",
                "self_pickup_allowed": true
            },
            "setup": {
                "install_minutes": 0,
                "uninstall_minutes": 0,
                "min_installers": 1
            },
            "rental": { "mode": "flat", "base_days": 1, "price_per_day": "100" },
            "stock_qty": 18,
            "available_stock_qty": 16
        });
        let product: AdminProduct = serde_json::from_value(product_json).expect("product");
        ledger.reconcile(&product);
        assert_eq!(ledger.stock_qty(), 18);
        assert_eq!(ledger.available_stock_qty(), 16);
    }
}
