//! # Domain Types
//!
//! Core domain types used throughout Tally POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Item       │   │    CartLine     │   │   Transaction   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (ItemId)    │   │  item_id        │   │  id (UUID)      │       │
//! │  │  name           │   │  price (frozen) │   │  sequence       │       │
//! │  │  price          │   │  quantity       │   │  lines          │       │
//! │  │  stock          │   │  bonus          │   │  total, method  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ PaymentMethod   │   │  StockPolicy    │   │  SalesSummary   │       │
//! │  │  Cash           │   │  Reject         │   │  cash_total     │       │
//! │  │  Online         │   │  Clamp          │   │  online_total   │       │
//! │  └─────────────────┘   │  Backorder      │   │  grand_total    │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation::validate_item_id;

// =============================================================================
// Item Id
// =============================================================================

/// Catalog key for an item (e.g. `item1`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct ItemId(String);

impl ItemId {
    /// Creates an item id after checking its format.
    pub fn new(id: impl Into<String>) -> CoreResult<Self> {
        let id = id.into();
        validate_item_id(&id)?;
        Ok(ItemId(id))
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ItemId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemId::new(s.trim())
    }
}

// =============================================================================
// Item
// =============================================================================

/// A catalog entry.
///
/// ## Stock Sign
/// `stock` is signed so that the backorder policy can record a deficit.
/// Under the default policy it never drops below zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Item {
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Unit price in minor units.
    pub price: Money,
    /// Units physically available.
    pub stock: i64,
}

impl Item {
    /// Checks if `units` can leave inventory without going below zero.
    #[inline]
    pub fn can_supply(&self, units: i64) -> bool {
        self.stock >= units
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One catalog item's slot in the cart.
///
/// ## Invariant
/// `bonus == pricing::bonus_tier(quantity)` at all times. Only
/// `CartLine::set_quantity` changes either field, and it changes both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    pub item_id: ItemId,
    /// Name at time of adding (frozen).
    pub name: String,
    /// Unit price at time of adding (frozen).
    pub price: Money,
    /// Paid units.
    pub quantity: u32,
    /// Free units granted by the bonus tier.
    pub bonus: u32,
}

impl CartLine {
    /// Creates an empty line for a catalog item.
    pub fn empty(item: &Item) -> Self {
        CartLine {
            item_id: item.id.clone(),
            name: item.name.clone(),
            price: item.price,
            quantity: 0,
            bonus: 0,
        }
    }

    /// Sets the quantity and recomputes the bonus in one step.
    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
        self.bonus = crate::pricing::bonus_tier(quantity);
    }

    /// Units that leave inventory on checkout (paid plus free).
    #[inline]
    pub fn units_out(&self) -> i64 {
        i64::from(self.quantity) + i64::from(self.bonus)
    }

    /// Checks if the line holds nothing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.quantity == 0
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer paid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment.
    #[default]
    Cash,
    /// Any online/electronic payment.
    Online,
}

impl PaymentMethod {
    /// Returns the wire name (`cash` / `online`).
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Online => "online",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "online" => Ok(PaymentMethod::Online),
            other => Err(CoreError::InvalidPaymentMethod(other.to_string())),
        }
    }
}

// =============================================================================
// Stock Policy
// =============================================================================

/// What checkout does when paid plus bonus units exceed stock.
///
/// Increments only check paid units against stock, so bonus units granted
/// near the stock boundary can ask for more than is on the shelf.
///
/// ```text
///  stock = 7, quantity = 7, bonus = 1  → needs 8 units
///
///  Reject     → checkout commits nothing, reports a shortfall of 1
///  Clamp      → commits, stock ends at 0
///  Backorder  → commits, stock ends at -1
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StockPolicy {
    #[default]
    Reject,
    Clamp,
    Backorder,
}

impl fmt::Display for StockPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StockPolicy::Reject => "reject",
            StockPolicy::Clamp => "clamp",
            StockPolicy::Backorder => "backorder",
        })
    }
}

impl FromStr for StockPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reject" => Ok(StockPolicy::Reject),
            "clamp" => Ok(StockPolicy::Clamp),
            "backorder" => Ok(StockPolicy::Backorder),
            other => Err(CoreError::InvalidStockPolicy(other.to_string())),
        }
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// A committed checkout.
/// Uses snapshot pattern to freeze the cart as it was at commit time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Transaction {
    #[ts(as = "String")]
    pub id: Uuid,
    /// 1-based position in the transaction log.
    pub sequence: u64,
    /// Every cart line at checkout, including empty ones.
    pub lines: BTreeMap<ItemId, CartLine>,
    pub total: Money,
    pub payment_method: PaymentMethod,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    /// Lines that were actually purchased (quantity > 0), for receipts.
    pub fn purchased_lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.values().filter(|line| !line.is_empty())
    }
}

// =============================================================================
// Snapshots
// =============================================================================

/// Read-only view of one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    pub name: String,
    pub price: Money,
    pub stock: i64,
    /// Stock is below the register's low-stock threshold.
    pub low_stock: bool,
}

/// Running totals by payment method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub cash_total: Money,
    pub online_total: Money,
    pub grand_total: Money,
}

/// One line that checkout could not supply under `StockPolicy::Reject`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StockShortfall {
    pub item_id: ItemId,
    pub available: i64,
    pub requested: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================
