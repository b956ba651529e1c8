//! # Cart Commands
//!
//! Commands for cart manipulation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│   Pay    │────►│Committed │       │
//! │  │  Cart    │     │          │     │  choice  │     │   Sale   │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                                  │            │
//! │                   add / remove                       checkout          │
//! │                                                      (sale.rs)         │
//! │                                                           │            │
//! │       ◄───────────────────────────────────────────────────┘            │
//! │                      (cart resets to empty)                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tally_core::pricing::line_total;
use tally_core::{ItemId, Money, PaymentMethod, Register};
use tracing::{debug, warn};

use crate::commands::Response;
use crate::error::ApiError;
use crate::state::RegisterState;

/// One cart line with its computed totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineResponse {
    pub item_id: ItemId,
    pub name: String,
    pub price: Money,
    pub quantity: u32,
    pub bonus: u32,
    pub line_total: Money,
    /// Whether `add <item>` would be accepted right now.
    pub can_increment: bool,
    /// Stock is below the low-stock threshold.
    pub low_stock: bool,
}

/// Cart response including lines and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub lines: Vec<CartLineResponse>,
    pub total: Money,
    pub payment_method: PaymentMethod,
}

impl CartResponse {
    fn from_register(register: &Register) -> Result<Self, ApiError> {
        let lines = register
            .cart_snapshot()
            .into_values()
            .map(|line| -> Result<CartLineResponse, ApiError> {
                Ok(CartLineResponse {
                    can_increment: register.can_increment(&line.item_id)?,
                    low_stock: register.is_low_stock(&line.item_id)?,
                    line_total: line_total(&line),
                    item_id: line.item_id,
                    name: line.name,
                    price: line.price,
                    quantity: line.quantity,
                    bonus: line.bonus,
                })
            })
            .collect::<Result<Vec<_>, ApiError>>()?;

        Ok(CartResponse {
            lines,
            total: register.cart_total(),
            payment_method: register.selected_payment_method(),
        })
    }
}

/// Gets the current cart contents.
///
/// ## Returns
/// Every line (empty ones included), the total and the selected payment method
pub fn get_cart(state: &RegisterState) -> Result<Response, ApiError> {
    debug!("get_cart command");
    state
        .with_register(CartResponse::from_register)
        .map(Response::Cart)
}

/// Changes an item's quantity by `delta`.
///
/// ## Behavior
/// - Positive delta: rejected without change if stock would be exceeded
/// - Negative delta: always accepted, floors at zero
/// - Bonus is recomputed with the quantity
pub fn update_cart_item(
    state: &RegisterState,
    item_id: ItemId,
    delta: i64,
) -> Result<Response, ApiError> {
    debug!(item_id = %item_id, delta = %delta, "update_cart_item command");

    let change = state.with_register_mut(|r| r.update_quantity(&item_id, delta))?;

    if change.is_rejected() {
        warn!(item_id = %item_id, change = ?change, "Quantity increase rejected: insufficient stock");
    }

    Ok(Response::QuantityChanged { item_id, change })
}

/// Gets the cart total.
pub fn get_total(state: &RegisterState) -> Response {
    debug!("get_total command");
    Response::Total {
        total: state.with_register(Register::cart_total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> RegisterState {
        RegisterState::new(Register::seeded().unwrap())
    }

    fn id(s: &str) -> ItemId {
        s.parse().unwrap()
    }

    fn checkout_all(state: &RegisterState) {
        state
            .with_register_mut(|r| r.checkout(PaymentMethod::Cash))
            .unwrap();
    }

    #[test]
    fn test_get_cart_lists_every_line() {
        let state = state();
        update_cart_item(&state, id("item2"), 10).unwrap();

        let Response::Cart(cart) = get_cart(&state).unwrap() else {
            panic!("expected cart response");
        };

        assert_eq!(cart.lines.len(), 3);
        assert_eq!(cart.total.minor(), 300);
        assert_eq!(cart.payment_method, PaymentMethod::Cash);

        let item2 = cart.lines.iter().find(|l| l.item_id == id("item2")).unwrap();
        assert_eq!((item2.quantity, item2.bonus), (10, 4));
        assert_eq!(item2.line_total.minor(), 300);
        assert!(item2.can_increment);
        assert!(!item2.low_stock);
    }

    #[test]
    fn test_cart_flags_low_stock() {
        let state = state();
        update_cart_item(&state, id("item1"), 950).unwrap();
        checkout_all(&state);

        let Response::Cart(cart) = get_cart(&state).unwrap() else {
            panic!("expected cart response");
        };
        let item1 = cart.lines.iter().find(|l| l.item_id == id("item1")).unwrap();
        assert!(item1.low_stock);
    }

    #[test]
    fn test_rejected_update_is_not_an_error() {
        let state = state();
        let response = update_cart_item(&state, id("item3"), 1001).unwrap();

        match response {
            Response::QuantityChanged { change, .. } => assert!(change.is_rejected()),
            other => panic!("unexpected response: {:?}", other),
        }
        assert_eq!(state.with_register(|r| r.cart_total()), Money::zero());
    }

    #[test]
    fn test_get_total() {
        let state = state();
        update_cart_item(&state, id("item1"), 2).unwrap();
        update_cart_item(&state, id("item3"), 1).unwrap();

        match get_total(&state) {
            Response::Total { total } => assert_eq!(total.minor(), 80),
            other => panic!("unexpected response: {:?}", other),
        }
    }
}
