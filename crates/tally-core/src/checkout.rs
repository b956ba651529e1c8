//! # Checkout Processor
//!
//! Validates and commits a cart.
//!
//! ## Commit Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  checkout(method)                                                       │
//! │       │                                                                 │
//! │       ├── cart total == 0? ──────────────► EmptyCart (nothing changes)  │
//! │       │                                                                 │
//! │       ├── policy = Reject and any line                                  │
//! │       │   needs quantity + bonus > stock? ─► InsufficientStock          │
//! │       │                                      (nothing changes)          │
//! │       ▼                                                                 │
//! │  1. stock -= quantity + bonus   (per non-empty line)                    │
//! │  2. ledger[method] += total                                             │
//! │  3. log.append(snapshot)                                                │
//! │  4. cart.reset()                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Committed(transaction)                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every check happens before the first write, and the processor holds
//! `&mut` to all four stores for the whole call, so a caller sees either
//! all four steps or none.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::CartStore;
use crate::catalog::CatalogStore;
use crate::error::CoreResult;
use crate::ledger::{SalesLedger, TransactionLog};
use crate::types::{PaymentMethod, StockPolicy, StockShortfall, Transaction};

/// Result of a checkout attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckoutOutcome {
    /// The cart was committed.
    Committed { transaction: Transaction },
    /// Cart total was zero; nothing changed.
    EmptyCart,
    /// Stock cannot cover paid plus bonus units; nothing changed.
    InsufficientStock { shortfalls: Vec<StockShortfall> },
}

/// Commits carts under a fixed stock policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckoutProcessor {
    policy: StockPolicy,
}

impl CheckoutProcessor {
    pub fn new(policy: StockPolicy) -> Self {
        CheckoutProcessor { policy }
    }

    pub fn policy(&self) -> StockPolicy {
        self.policy
    }

    /// Lines whose paid plus bonus units exceed current stock.
    pub fn shortfalls(
        &self,
        catalog: &CatalogStore,
        cart: &CartStore,
    ) -> CoreResult<Vec<StockShortfall>> {
        let mut shortfalls = Vec::new();

        for line in cart.lines().filter(|line| !line.is_empty()) {
            let item = catalog.get(&line.item_id)?;
            let requested = line.units_out();
            if !item.can_supply(requested) {
                shortfalls.push(StockShortfall {
                    item_id: line.item_id.clone(),
                    available: item.stock,
                    requested,
                });
            }
        }

        Ok(shortfalls)
    }

    /// Commits the cart as a single unit.
    ///
    /// ## Errors
    /// `CoreError::ItemNotFound` if the cart references an item the catalog
    /// lacks. The error is raised before anything is written.
    pub fn checkout(
        &self,
        catalog: &mut CatalogStore,
        cart: &mut CartStore,
        ledger: &mut SalesLedger,
        log: &mut TransactionLog,
        payment_method: PaymentMethod,
    ) -> CoreResult<CheckoutOutcome> {
        let total = cart.total();
        if !total.is_positive() {
            return Ok(CheckoutOutcome::EmptyCart);
        }

        // Also proves every line's item exists before the first write.
        let shortfalls = self.shortfalls(catalog, cart)?;
        if self.policy == StockPolicy::Reject && !shortfalls.is_empty() {
            return Ok(CheckoutOutcome::InsufficientStock { shortfalls });
        }

        for line in cart.lines().filter(|line| !line.is_empty()) {
            catalog.withdraw(&line.item_id, line.units_out(), self.policy)?;
        }

        ledger.record(payment_method, total);

        let transaction = log.append(cart.snapshot(), total, payment_method).clone();

        cart.reset();

        Ok(CheckoutOutcome::Committed { transaction })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
