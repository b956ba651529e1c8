//! # Cart Store
//!
//! Per-item selected quantity and bonus for the in-progress order.
//!
//! ## Line State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │            update_quantity(+n)                                          │
//! │   ┌───────┐ ─────────────────────► ┌────────┐                           │
//! │   │ Empty │                        │ Filled │ ◄── update_quantity(±n)   │
//! │   │ q = 0 │ ◄───────────────────── │ q > 0  │                           │
//! │   └───────┘  decrement to zero     └────────┘                           │
//! │               or checkout reset                                         │
//! │                                                                         │
//! │  Every catalog item always has a line; "empty" means quantity 0.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Stock Rule
//! An increase is rejected when the new paid quantity would exceed current
//! stock. Bonus units are not counted here; see `StockPolicy` for how
//! checkout handles them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::CatalogStore;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pricing;
use crate::types::{CartLine, ItemId};

/// Result of a quantity update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QuantityChange {
    /// Line now holds `quantity` paid and `bonus` free units.
    Applied {
        previous: u32,
        quantity: u32,
        bonus: u32,
    },
    /// Not enough stock to raise the line to `requested`; nothing changed.
    Rejected {
        quantity: u32,
        requested: i64,
        available: i64,
    },
}

impl QuantityChange {
    /// Checks if the cart was left untouched because of stock.
    pub fn is_rejected(&self) -> bool {
        matches!(self, QuantityChange::Rejected { .. })
    }
}

/// The in-progress order: one line per catalog item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartStore {
    lines: BTreeMap<ItemId, CartLine>,
}

impl CartStore {
    /// Creates an empty line for every catalog item.
    pub fn from_catalog(catalog: &CatalogStore) -> Self {
        CartStore {
            lines: catalog
                .items()
                .map(|item| (item.id.clone(), CartLine::empty(item)))
                .collect(),
        }
    }

    /// Adds `delta` paid units to a line (negative removes).
    ///
    /// ## Behavior
    /// - The result is floored at zero; decreases are always accepted
    /// - Increases beyond current stock are rejected and leave the line as is
    /// - On success quantity and bonus change together
    ///
    /// ## Errors
    /// `CoreError::ItemNotFound` if the item is not in the catalog.
    pub fn update_quantity(
        &mut self,
        catalog: &CatalogStore,
        item_id: &ItemId,
        delta: i64,
    ) -> CoreResult<QuantityChange> {
        let available = catalog.get(item_id)?.stock;
        let line = self
            .lines
            .get_mut(item_id)
            .ok_or_else(|| CoreError::ItemNotFound(item_id.to_string()))?;

        let previous = line.quantity;
        let requested = i64::from(previous).saturating_add(delta).max(0);

        let rejected = QuantityChange::Rejected {
            quantity: previous,
            requested,
            available,
        };

        if delta > 0 && requested > available {
            return Ok(rejected);
        }

        let Ok(quantity) = u32::try_from(requested) else {
            return Ok(rejected);
        };

        line.set_quantity(quantity);

        Ok(QuantityChange::Applied {
            previous,
            quantity: line.quantity,
            bonus: line.bonus,
        })
    }

    /// Whether a single-unit increase would be accepted right now.
    pub fn can_increment(&self, catalog: &CatalogStore, item_id: &ItemId) -> CoreResult<bool> {
        let stock = catalog.get(item_id)?.stock;
        let line = self.line(item_id)?;
        Ok(stock >= i64::from(line.quantity) + 1)
    }

    /// Looks up a line.
    pub fn line(&self, item_id: &ItemId) -> CoreResult<&CartLine> {
        self.lines
            .get(item_id)
            .ok_or_else(|| CoreError::ItemNotFound(item_id.to_string()))
    }

    /// Iterates over lines in id order.
    pub fn lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.values()
    }

    /// Copy of every line, keyed by item id.
    pub fn snapshot(&self) -> BTreeMap<ItemId, CartLine> {
        self.lines.clone()
    }

    /// Total price of paid units.
    pub fn total(&self) -> Money {
        pricing::cart_total(self.lines.values())
    }

    /// Puts every line back to zero quantity and bonus.
    pub(crate) fn reset(&mut self) {
        for line in self.lines.values_mut() {
            line.set_quantity(0);
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
