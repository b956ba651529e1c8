//! # tally-core: Pure Business Logic for Tally POS
//!
//! This crate is the **heart** of Tally POS. It owns the catalog, cart,
//! checkout and sales ledger as plain in-memory state with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Terminal register (apps/tally-cli)             │   │
//! │  │    add / remove ──► pay ──► checkout ──► sales / history        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ direct method calls                    │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │   cart    │  │ checkout  │  │  ledger   │  │   │
//! │  │   │  stock    │  │ qty/bonus │  │  commit   │  │ totals/log│  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                   register: owns all of the above               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Item, CartLine, Transaction, etc.)
//! - [`money`] - Money type with integer arithmetic
//! - [`pricing`] - Bonus tiers and totals
//! - [`catalog`] - Items and stock
//! - [`cart`] - Quantity updates
//! - [`checkout`] - The commit sequence
//! - [`ledger`] - Sales totals and transaction log
//! - [`register`] - Owned state exposing every operation
//! - [`error`] / [`validation`] - Typed errors and input rules
//!
//! ## Design Principles
//!
//! 1. **No I/O**: Terminal, file system and logging setup live in the app
//! 2. **Integer Money**: All amounts are whole minor units
//! 3. **No-ops are outcomes**: Rejected updates and checkouts return a value
//!    describing why nothing changed; `Err` is reserved for bad input
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::{CheckoutOutcome, ItemId, PaymentMethod, Register};
//!
//! let mut register = Register::seeded().unwrap();
//! let item2: ItemId = "item2".parse().unwrap();
//!
//! register.update_quantity(&item2, 10).unwrap();
//! assert_eq!(register.cart_snapshot()[&item2].bonus, 4);
//!
//! let outcome = register.checkout(PaymentMethod::Online).unwrap();
//! assert!(matches!(outcome, CheckoutOutcome::Committed { .. }));
//! assert_eq!(register.inventory_snapshot()[&item2].stock, 1986);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod ledger;
pub mod money;
pub mod pricing;
pub mod register;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartStore, QuantityChange};
pub use catalog::CatalogStore;
pub use checkout::{CheckoutOutcome, CheckoutProcessor};
pub use error::{CoreError, CoreResult, ValidationError};
pub use ledger::{SalesLedger, TransactionLog};
pub use money::Money;
pub use pricing::{BonusTier, Offer};
pub use register::{Register, RegisterOptions};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Items with stock below this are flagged in inventory snapshots.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 100;
