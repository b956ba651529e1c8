//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Minor Units                                      │
//! │    Prices, line totals and ledger totals are whole numbers of the       │
//! │    smallest currency unit. Formatting happens at the edge.              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::money::Money;
//!
//! let price = Money::from_minor(20);
//! let line_total = price.multiply_quantity(5);
//! assert_eq!(line_total.minor(), 100);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit.
///
/// ## Design Decisions
/// - **i64**: `CatalogStore::new` caps the catalog's total value, so every
///   reachable cart and ledger total fits
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serialized transparently**: JSON sees a plain number
///
/// ## Where Money is Used
/// ```text
/// Item.price ──► CartLine.price ──► line_total ──► cart_total
///                                                      │
///                                   Transaction.total ◄┘──► SalesLedger
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(transparent)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// let price = Money::from_minor(40);
    /// assert_eq!(price.minor(), 40);
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// let unit_price = Money::from_minor(30);
    /// assert_eq!(unit_price.multiply_quantity(10).minor(), 300);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }

    /// Multiplies by a unit count, returning `None` on overflow.
    #[inline]
    pub const fn checked_mul(&self, units: i64) -> Option<Self> {
        match self.0.checked_mul(units) {
            Some(v) => Some(Money(v)),
            None => None,
        }
    }

    /// Adds two amounts, returning `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Money(v)),
            None => None,
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the raw minor-unit amount.
///
/// ## Note
/// Currency symbols and decimal places belong to the presentation layer,
/// which knows the configured currency.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_minor() {
        let money = Money::from_minor(1099);
        assert_eq!(money.minor(), 1099);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_minor(300).to_string(), "300");
        assert_eq!(Money::from_minor(0).to_string(), "0");
        assert_eq!(Money::from_minor(-5).to_string(), "-5");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_minor(100);
        let b = Money::from_minor(300);

        assert_eq!((a + b).minor(), 400);

        let mut total = Money::zero();
        total += a;
        total += b;
        assert_eq!(total, Money::from_minor(400));
    }

    #[test]
    fn test_sum() {
        let amounts = [Money::from_minor(20), Money::from_minor(30), Money::from_minor(40)];
        let by_ref: Money = amounts.iter().sum();
        let by_value: Money = amounts.into_iter().sum();
        assert_eq!(by_ref.minor(), 90);
        assert_eq!(by_value, by_ref);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert_eq!(zero.minor(), 0);
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let positive = Money::from_minor(100);
        assert!(positive.is_positive());

        let negative = Money::from_minor(-100);
        assert!(negative.is_negative());
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_minor(20);
        assert_eq!(unit_price.multiply_quantity(5).minor(), 100);
        assert_eq!(unit_price.multiply_quantity(0), Money::zero());
    }

    #[test]
    fn test_checked_arithmetic() {
        let big = Money::from_minor(i64::MAX / 2 + 1);
        assert_eq!(big.checked_mul(10), None);
        assert_eq!(big.checked_add(big), None);
        assert_eq!(
            Money::from_minor(30).checked_mul(2000),
            Some(Money::from_minor(60_000))
        );
        assert_eq!(
            Money::from_minor(20).checked_add(Money::from_minor(40)),
            Some(Money::from_minor(60))
        );
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_string(&Money::from_minor(300)).unwrap();
        assert_eq!(json, "300");
    }
}
