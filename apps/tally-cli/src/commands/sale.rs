//! # Sale Commands
//!
//! Payment selection, checkout, and the sales views.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operator: "checkout" (or "checkout online")                            │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  ┌────────────────────────────────────────────────────────────────┐    │
//! │  │  One lock on the register for the whole sequence:              │    │
//! │  │  1. total == 0?            → EmptyCart, nothing changes        │    │
//! │  │  2. stock short (reject)?  → InsufficientStock, nothing changes│    │
//! │  │  3. stock, ledger, log, cart reset                             │    │
//! │  └────────────────────────────────────────────────────────────────┘    │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  Receipt printed from the committed transaction                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tally_core::{CheckoutOutcome, PaymentMethod};
use tracing::{debug, info, warn};

use crate::commands::Response;
use crate::error::ApiError;
use crate::state::RegisterState;

/// Selects the payment method used by a bare `checkout`.
pub fn select_payment_method(state: &RegisterState, method: PaymentMethod) -> Response {
    debug!(method = %method, "select_payment_method command");
    state.with_register_mut(|r| r.select_payment_method(method));
    Response::PaymentSelected {
        payment_method: method,
    }
}

/// Commits the cart.
///
/// ## Arguments
/// * `method` - Payment method; `None` uses the selected one
pub fn checkout(state: &RegisterState, method: Option<PaymentMethod>) -> Result<Response, ApiError> {
    debug!(method = ?method, "checkout command");

    let outcome = state.with_register_mut(|r| match method {
        Some(method) => r.checkout(method),
        None => r.checkout_selected(),
    })?;

    match &outcome {
        CheckoutOutcome::Committed { transaction } => info!(
            transaction_id = %transaction.id,
            sequence = transaction.sequence,
            total = %transaction.total,
            method = %transaction.payment_method,
            "Checkout committed"
        ),
        CheckoutOutcome::EmptyCart => debug!("Checkout skipped: cart total is zero"),
        CheckoutOutcome::InsufficientStock { shortfalls } => warn!(
            lines = shortfalls.len(),
            "Checkout refused: bonus units exceed stock"
        ),
    }

    Ok(Response::Checkout { outcome })
}

/// Gets running totals by payment method.
pub fn get_sales_summary(state: &RegisterState) -> Response {
    debug!("get_sales_summary command");
    Response::Sales {
        summary: state.with_register(|r| r.sales_summary()),
    }
}

/// Gets every committed transaction, oldest first.
pub fn get_transaction_history(state: &RegisterState) -> Response {
    debug!("get_transaction_history command");
    Response::History {
        transactions: state.with_register(|r| r.transaction_history().to_vec()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::update_cart_item;
    use tally_core::{ItemId, Register};

    fn state() -> RegisterState {
        RegisterState::new(Register::seeded().unwrap())
    }

    fn id(s: &str) -> ItemId {
        s.parse().unwrap()
    }

    #[test]
    fn test_checkout_uses_selected_method() {
        let state = state();
        select_payment_method(&state, PaymentMethod::Online);
        update_cart_item(&state, id("item1"), 5).unwrap();

        let Response::Checkout {
            outcome: CheckoutOutcome::Committed { transaction: tx },
        } = checkout(&state, None).unwrap()
        else {
            panic!("expected committed checkout");
        };
        assert_eq!(tx.payment_method, PaymentMethod::Online);
        assert_eq!(tx.total.minor(), 100);
    }

    #[test]
    fn test_explicit_method_overrides_selection() {
        let state = state();
        select_payment_method(&state, PaymentMethod::Online);
        update_cart_item(&state, id("item3"), 1).unwrap();
        checkout(&state, Some(PaymentMethod::Cash)).unwrap();

        match get_sales_summary(&state) {
            Response::Sales { summary } => {
                assert_eq!(summary.cash_total.minor(), 40);
                assert_eq!(summary.online_total.minor(), 0);
                assert_eq!(summary.grand_total.minor(), 40);
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[test]
    fn test_empty_checkout_records_nothing() {
        let state = state();
        let Response::Checkout { outcome } = checkout(&state, None).unwrap() else {
            panic!("expected checkout response");
        };
        assert_eq!(outcome, CheckoutOutcome::EmptyCart);

        match get_transaction_history(&state) {
            Response::History { transactions } => assert!(transactions.is_empty()),
            other => panic!("unexpected response: {:?}", other),
        }
    }
}
