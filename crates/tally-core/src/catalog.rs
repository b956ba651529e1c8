//! # Catalog Store
//!
//! Canonical item definitions and current stock levels.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Register start ──► CatalogStore::seeded()                              │
//! │                       item1  Item 1   20   stock 1000                   │
//! │                       item2  Item 2   30   stock 2000                   │
//! │                       item3  Item 3   40   stock 1000                   │
//! │                                                                         │
//! │  Only checkout changes stock. Items are never added or removed          │
//! │  after construction.                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{InventoryRecord, Item, ItemId, StockPolicy};
use crate::validation::{validate_initial_stock, validate_item_name, validate_price};

/// Seed data: `(id, name, price, stock)`.
pub const SEED_CATALOG: &[(&str, &str, i64, i64)] = &[
    ("item1", "Item 1", 20, 1000),
    ("item2", "Item 2", 30, 2000),
    ("item3", "Item 3", 40, 1000),
];

/// Holds every catalog item keyed by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogStore {
    items: BTreeMap<ItemId, Item>,
}

impl CatalogStore {
    /// Builds a catalog from explicit items.
    ///
    /// ## Errors
    /// - `CoreError::Validation` for a blank name, negative price or negative stock
    /// - `CoreError::DuplicateItem` when two items share an id
    /// - `CoreError::CatalogValueOverflow` when the summed `price * stock`
    ///   is out of range
    pub fn new(items: impl IntoIterator<Item = Item>) -> CoreResult<Self> {
        let mut map = BTreeMap::new();
        let mut value = Money::zero();

        for item in items {
            validate_item_name(&item.name)?;
            validate_price(item.price)?;
            validate_initial_stock(item.stock)?;

            if map.contains_key(&item.id) {
                return Err(CoreError::DuplicateItem(item.id.to_string()));
            }

            value = item
                .price
                .checked_mul(item.stock)
                .and_then(|item_value| value.checked_add(item_value))
                .ok_or_else(|| CoreError::CatalogValueOverflow(item.id.to_string()))?;

            map.insert(item.id.clone(), item);
        }

        Ok(CatalogStore { items: map })
    }

    /// Builds the fixed three-item catalog.
    pub fn seeded() -> CoreResult<Self> {
        let items = SEED_CATALOG
            .iter()
            .map(|&(id, name, price, stock)| -> CoreResult<Item> {
                Ok(Item {
                    id: ItemId::new(id)?,
                    name: name.to_string(),
                    price: Money::from_minor(price),
                    stock,
                })
            })
            .collect::<CoreResult<Vec<_>>>()?;

        CatalogStore::new(items)
    }

    /// Looks up an item.
    pub fn get(&self, id: &ItemId) -> CoreResult<&Item> {
        self.items
            .get(id)
            .ok_or_else(|| CoreError::ItemNotFound(id.to_string()))
    }

    /// Iterates over items in id order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// Read-only view for presentation, flagging items below `low_stock_threshold`.
    pub fn snapshot(&self, low_stock_threshold: i64) -> BTreeMap<ItemId, InventoryRecord> {
        self.items
            .iter()
            .map(|(id, item)| {
                (
                    id.clone(),
                    InventoryRecord {
                        name: item.name.clone(),
                        price: item.price,
                        stock: item.stock,
                        low_stock: item.stock < low_stock_threshold,
                    },
                )
            })
            .collect()
    }

    /// Removes `units` from stock according to `policy`.
    ///
    /// Callers must have checked availability first when `policy` is
    /// `Reject`; this method does not re-check.
    pub(crate) fn withdraw(&mut self, id: &ItemId, units: i64, policy: StockPolicy) -> CoreResult<i64> {
        let item = self
            .items
            .get_mut(id)
            .ok_or_else(|| CoreError::ItemNotFound(id.to_string()))?;

        item.stock = match policy {
            StockPolicy::Clamp => (item.stock - units).max(0),
            StockPolicy::Reject | StockPolicy::Backorder => item.stock - units,
        };

        Ok(item.stock)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
