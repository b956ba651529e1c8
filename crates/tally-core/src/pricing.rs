//! # Pricing Engine
//!
//! Pure functions for bonus tiers and totals.
//!
//! ## Bonus Tiers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  quantity    0 ─────── 4 │ 5 ─────── 9 │ 10 ───────────────► ∞          │
//! │  bonus           0       │      1      │           4                    │
//! │                                                                         │
//! │  Tiers never stack: 10 units earn 4 free, not 1 + 4.                    │
//! │  Free units never add to the price.                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::CartLine;

/// A quantity threshold and the free units it grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BonusTier {
    pub min_quantity: u32,
    pub free_units: u32,
}

/// Active tiers, highest threshold first.
pub const BONUS_TIERS: &[BonusTier] = &[
    BonusTier {
        min_quantity: 10,
        free_units: 4,
    },
    BonusTier {
        min_quantity: 5,
        free_units: 1,
    },
];

/// Returns the free units earned by `quantity` paid units.
///
/// ## Example
/// ```rust
/// use tally_core::pricing::bonus_tier;
///
/// assert_eq!(bonus_tier(4), 0);
/// assert_eq!(bonus_tier(5), 1);
/// assert_eq!(bonus_tier(10), 4);
/// ```
pub fn bonus_tier(quantity: u32) -> u32 {
    BONUS_TIERS
        .iter()
        .find(|tier| quantity >= tier.min_quantity)
        .map_or(0, |tier| tier.free_units)
}

/// Price of the paid units on a line.
#[inline]
pub fn line_total(line: &CartLine) -> Money {
    line.price.multiply_quantity(line.quantity)
}

/// Sum of all line totals.
pub fn cart_total<'a, I>(lines: I) -> Money
where
    I: IntoIterator<Item = &'a CartLine>,
{
    lines.into_iter().map(line_total).sum()
}

// =============================================================================
// Offers
// =============================================================================

/// A promotion as shown to the customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub tier: BonusTier,
    pub description: String,
}

/// Lists the active tiers, lowest threshold first.
pub fn offers() -> Vec<Offer> {
    BONUS_TIERS
        .iter()
        .rev()
        .map(|tier| Offer {
            tier: *tier,
            description: format!(
                "Buy {} items: Get {} Free",
                tier.min_quantity, tier.free_units
            ),
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
