//! # Register
//!
//! The owned state of one till: catalog, cart, ledger and transaction log,
//! plus the operator's session choices. Every operation the presentation
//! layer needs is a method here; nothing is global.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Reads (&self)                     Writes (&mut self)                   │
//! │  ─────────────                     ──────────────────                   │
//! │  inventory_snapshot()              update_quantity(item, delta)         │
//! │  cart_snapshot()                   select_payment_method(method)        │
//! │  cart_total()                      checkout(method)                     │
//! │  can_increment(item)               checkout_selected()                  │
//! │  sales_summary()                                                        │
//! │  transaction_history()                                                  │
//! │  offers()                                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::{ItemId, PaymentMethod, Register};
//!
//! let mut register = Register::seeded().unwrap();
//! let item1: ItemId = "item1".parse().unwrap();
//!
//! register.update_quantity(&item1, 5).unwrap();
//! register.checkout(PaymentMethod::Cash).unwrap();
//!
//! assert_eq!(register.sales_summary().cash_total.minor(), 100);
//! ```

use std::collections::BTreeMap;

use crate::cart::{CartStore, QuantityChange};
use crate::catalog::CatalogStore;
use crate::checkout::{CheckoutOutcome, CheckoutProcessor};
use crate::error::CoreResult;
use crate::ledger::{SalesLedger, TransactionLog};
use crate::money::Money;
use crate::pricing::{self, Offer};
use crate::types::{
    CartLine, InventoryRecord, ItemId, PaymentMethod, SalesSummary, StockPolicy, Transaction,
};
use crate::DEFAULT_LOW_STOCK_THRESHOLD;

/// Session settings chosen at start-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterOptions {
    pub stock_policy: StockPolicy,
    pub payment_method: PaymentMethod,
    pub low_stock_threshold: i64,
}

impl Default for RegisterOptions {
    fn default() -> Self {
        RegisterOptions {
            stock_policy: StockPolicy::default(),
            payment_method: PaymentMethod::default(),
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}

/// One till's complete state.
#[derive(Debug, Clone)]
pub struct Register {
    catalog: CatalogStore,
    cart: CartStore,
    ledger: SalesLedger,
    log: TransactionLog,
    processor: CheckoutProcessor,
    selected_payment: PaymentMethod,
    low_stock_threshold: i64,
}

impl Register {
    /// Creates a register over `catalog` with an empty cart and ledger.
    pub fn new(catalog: CatalogStore, options: RegisterOptions) -> Self {
        let cart = CartStore::from_catalog(&catalog);
        Register {
            catalog,
            cart,
            ledger: SalesLedger::new(),
            log: TransactionLog::new(),
            processor: CheckoutProcessor::new(options.stock_policy),
            selected_payment: options.payment_method,
            low_stock_threshold: options.low_stock_threshold,
        }
    }

    /// Register over the fixed seed catalog with default options.
    pub fn seeded() -> CoreResult<Self> {
        Ok(Register::new(CatalogStore::seeded()?, RegisterOptions::default()))
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Name, price, stock and low-stock flag for every item.
    pub fn inventory_snapshot(&self) -> BTreeMap<ItemId, InventoryRecord> {
        self.catalog.snapshot(self.low_stock_threshold)
    }

    /// Every cart line, including empty ones.
    pub fn cart_snapshot(&self) -> BTreeMap<ItemId, CartLine> {
        self.cart.snapshot()
    }

    pub fn cart_total(&self) -> Money {
        self.cart.total()
    }

    /// Whether `+1` on this item would be accepted.
    pub fn can_increment(&self, item_id: &ItemId) -> CoreResult<bool> {
        self.cart.can_increment(&self.catalog, item_id)
    }

    pub fn sales_summary(&self) -> SalesSummary {
        self.ledger.summary()
    }

    /// Committed transactions, oldest first.
    pub fn transaction_history(&self) -> &[Transaction] {
        self.log.entries()
    }

    pub fn offers(&self) -> Vec<Offer> {
        pricing::offers()
    }

    pub fn selected_payment_method(&self) -> PaymentMethod {
        self.selected_payment
    }

    pub fn stock_policy(&self) -> StockPolicy {
        self.processor.policy()
    }

    pub fn is_low_stock(&self, item_id: &ItemId) -> CoreResult<bool> {
        Ok(self.catalog.get(item_id)?.stock < self.low_stock_threshold)
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// See [`CartStore::update_quantity`].
    pub fn update_quantity(&mut self, item_id: &ItemId, delta: i64) -> CoreResult<QuantityChange> {
        self.cart.update_quantity(&self.catalog, item_id, delta)
    }

    pub fn select_payment_method(&mut self, method: PaymentMethod) {
        self.selected_payment = method;
    }

    /// See [`CheckoutProcessor::checkout`].
    pub fn checkout(&mut self, payment_method: PaymentMethod) -> CoreResult<CheckoutOutcome> {
        self.processor.checkout(
            &mut self.catalog,
            &mut self.cart,
            &mut self.ledger,
            &mut self.log,
            payment_method,
        )
    }

    /// Checks out with the currently selected payment method.
    pub fn checkout_selected(&mut self) -> CoreResult<CheckoutOutcome> {
        self.checkout(self.selected_payment)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ItemId {
        ItemId::new(s).unwrap()
    }

    fn assert_ledger_matches_log(register: &Register) {
        let logged: Money = register.transaction_history().iter().map(|tx| tx.total).sum();
        let summary = register.sales_summary();
        assert_eq!(summary.cash_total + summary.online_total, logged);
        assert_eq!(summary.grand_total, logged);
    }

    #[test]
    fn test_scenario_cash_checkout() {
        let mut register = Register::seeded().unwrap();
        let item1 = id("item1");

        register.update_quantity(&item1, 5).unwrap();
        let line = &register.cart_snapshot()[&item1];
        assert_eq!((line.quantity, line.bonus), (5, 1));

        let outcome = register.checkout(PaymentMethod::Cash).unwrap();
        assert!(matches!(
            outcome,
            CheckoutOutcome::Committed { ref transaction } if transaction.total.minor() == 100
        ));
        assert_eq!(register.sales_summary().cash_total.minor(), 100);
        assert_eq!(register.inventory_snapshot()[&item1].stock, 994);

        let line = &register.cart_snapshot()[&item1];
        assert_eq!((line.quantity, line.bonus), (0, 0));
        assert_ledger_matches_log(&register);
    }

    #[test]
    fn test_scenario_online_checkout() {
        let mut register = Register::seeded().unwrap();
        let item2 = id("item2");

        register.update_quantity(&item2, 10).unwrap();
        assert_eq!(register.cart_snapshot()[&item2].bonus, 4);
        assert_eq!(register.cart_total().minor(), 300);

        register.checkout(PaymentMethod::Online).unwrap();
        assert_eq!(register.sales_summary().online_total.minor(), 300);
        assert_eq!(register.inventory_snapshot()[&item2].stock, 1986);
    }

    #[test]
    fn test_scenario_over_stock_rejected() {
        let mut register = Register::seeded().unwrap();
        let item3 = id("item3");

        let change = register.update_quantity(&item3, 1001).unwrap();
        assert!(change.is_rejected());

        let line = &register.cart_snapshot()[&item3];
        assert_eq!((line.quantity, line.bonus), (0, 0));
    }

    #[test]
    fn test_scenario_two_checkouts() {
        let mut register = Register::seeded().unwrap();

        register.update_quantity(&id("item1"), 2).unwrap();
        register.checkout(PaymentMethod::Cash).unwrap();
        register.update_quantity(&id("item2"), 6).unwrap();
        register.checkout(PaymentMethod::Online).unwrap();

        let history = register.transaction_history();
        assert_eq!(history.len(), 2);
        assert_ne!(history[0].id, history[1].id);
        assert_eq!(history[0].total.minor(), 40);
        assert_eq!(history[0].payment_method, PaymentMethod::Cash);
        assert_eq!(history[1].total.minor(), 180);
        assert_eq!(history[1].payment_method, PaymentMethod::Online);
        assert_ledger_matches_log(&register);
    }

    #[test]
    fn test_empty_checkout_leaves_state() {
        let mut register = Register::seeded().unwrap();
        let inventory = register.inventory_snapshot();

        let outcome = register.checkout_selected().unwrap();

        assert_eq!(outcome, CheckoutOutcome::EmptyCart);
        assert_eq!(register.inventory_snapshot(), inventory);
        assert!(register.transaction_history().is_empty());
        assert_eq!(register.sales_summary(), SalesSummary::default());
    }

    #[test]
    fn test_selected_payment_method() {
        let mut register = Register::seeded().unwrap();
        assert_eq!(register.selected_payment_method(), PaymentMethod::Cash);

        register.select_payment_method(PaymentMethod::Online);
        register.update_quantity(&id("item3"), 1).unwrap();
        register.checkout_selected().unwrap();

        assert_eq!(register.sales_summary().online_total.minor(), 40);
        assert_eq!(
            register.transaction_history()[0].payment_method,
            PaymentMethod::Online
        );
    }

    #[test]
    fn test_largest_catalog_totals_fit() {
        use crate::types::Item;

        let price = Money::from_minor(i64::MAX / 10);
        let catalog = CatalogStore::new([Item {
            id: id("gold"),
            name: "Gold".to_string(),
            price,
            stock: 10,
        }])
        .unwrap();
        let options = RegisterOptions {
            stock_policy: StockPolicy::Clamp,
            ..RegisterOptions::default()
        };
        let mut register = Register::new(catalog, options);
        let gold = id("gold");

        assert!(!register.update_quantity(&gold, 10).unwrap().is_rejected());
        assert_eq!(register.cart_total(), price.multiply_quantity(10));

        assert!(matches!(
            register.checkout(PaymentMethod::Cash).unwrap(),
            CheckoutOutcome::Committed { .. }
        ));
        assert_eq!(register.sales_summary().grand_total, price.multiply_quantity(10));
        assert!(register.update_quantity(&gold, 1).unwrap().is_rejected());
        assert_ledger_matches_log(&register);
    }

    #[test]
    fn test_low_stock_flag() {
        let options = RegisterOptions {
            low_stock_threshold: 995,
            ..RegisterOptions::default()
        };
        let mut register = Register::new(CatalogStore::seeded().unwrap(), options);
        let item1 = id("item1");

        assert!(!register.is_low_stock(&item1).unwrap());
        register.update_quantity(&item1, 5).unwrap();
        register.checkout(PaymentMethod::Cash).unwrap();

        assert!(register.is_low_stock(&item1).unwrap());
        assert!(register.inventory_snapshot()[&item1].low_stock);
    }
}
