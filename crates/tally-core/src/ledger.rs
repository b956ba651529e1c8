//! # Sales Ledger & Transaction Log
//!
//! Running totals by payment method, and the append-only list of
//! committed transactions.
//!
//! ## Consistency
//! ```text
//! cash_total + online_total == Σ transaction.total
//! ```
//! Both are written only by the checkout processor, in the same call.

use std::collections::BTreeMap;

use chrono::Utc;
use uuid::Uuid;

use crate::money::Money;
use crate::types::{CartLine, ItemId, PaymentMethod, SalesSummary, Transaction};

// =============================================================================
// Sales Ledger
// =============================================================================

/// Running sales totals, partitioned by payment method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SalesLedger {
    cash_total: Money,
    online_total: Money,
}

impl SalesLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a committed sale to the bucket for `method`.
    pub(crate) fn record(&mut self, method: PaymentMethod, amount: Money) {
        match method {
            PaymentMethod::Cash => self.cash_total += amount,
            PaymentMethod::Online => self.online_total += amount,
        }
    }

    /// Totals plus their sum.
    pub fn summary(&self) -> SalesSummary {
        SalesSummary {
            cash_total: self.cash_total,
            online_total: self.online_total,
            grand_total: self.cash_total + self.online_total,
        }
    }
}

// =============================================================================
// Transaction Log
// =============================================================================

/// Ordered, append-only record of checkouts, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionLog {
    entries: Vec<Transaction>,
}

impl TransactionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Freezes a cart snapshot into a new transaction and appends it.
    ///
    /// ## Identity
    /// - `id`: fresh UUID v4, unique even within one clock tick
    /// - `sequence`: position in this log, starting at 1
    pub(crate) fn append(
        &mut self,
        lines: BTreeMap<ItemId, CartLine>,
        total: Money,
        payment_method: PaymentMethod,
    ) -> &Transaction {
        let sequence = self.entries.len() as u64 + 1;
        self.entries.push(Transaction {
            id: Uuid::new_v4(),
            sequence,
            lines,
            total,
            payment_method,
            timestamp: Utc::now(),
        });

        &self.entries[self.entries.len() - 1]
    }

    /// All transactions in commit order.
    pub fn entries(&self) -> &[Transaction] {
        &self.entries
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
