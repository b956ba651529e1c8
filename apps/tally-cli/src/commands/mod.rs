//! # Commands Module
//!
//! Operator commands and their responses.
//!
//! ## Command Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Register Commands                                  │
//! │                                                                         │
//! │  inventory.rs                                                           │
//! │  ├── inventory            - Stock levels with low-stock flags           │
//! │  └── offers               - Active bonus tiers                          │
//! │                                                                         │
//! │  cart.rs                                                                │
//! │  ├── cart                 - Lines, totals, selected payment             │
//! │  ├── add <item> [n]       - Raise quantity (stock-checked)              │
//! │  ├── remove <item> [n]    - Lower quantity (floors at zero)             │
//! │  └── total                - Cart total                                  │
//! │                                                                         │
//! │  sale.rs                                                                │
//! │  ├── pay <cash|online>    - Select payment method                       │
//! │  ├── checkout [method]    - Commit the cart                             │
//! │  ├── sales                - Totals by payment method                    │
//! │  └── history              - Committed transactions, oldest first        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;
pub mod inventory;
pub mod sale;

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::Serialize;
use tally_core::validation::validate_step;
use tally_core::{
    CheckoutOutcome, InventoryRecord, ItemId, Money, Offer, PaymentMethod, QuantityChange,
    SalesSummary, Transaction,
};

use crate::error::ApiError;
use crate::state::RegisterState;

pub use cart::{CartLineResponse, CartResponse};

/// Help text listing every command.
pub const HELP: &str = "\
Commands:
  inventory               show stock levels
  offers                  show bonus offers
  cart                    show the cart
  add <item> [n]          add n units (default 1)
  remove <item> [n]       remove n units (default 1)
  total                   show the cart total
  pay <cash|online>       select the payment method
  checkout [cash|online]  commit the cart
  sales                   show sales totals
  history                 show committed transactions
  help                    show this text
  quit                    leave the register";

// =============================================================================
// Command
// =============================================================================

/// A parsed operator command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Inventory,
    Offers,
    Cart,
    Add { item_id: ItemId, quantity: i64 },
    Remove { item_id: ItemId, quantity: i64 },
    Total,
    Pay(PaymentMethod),
    Checkout(Option<PaymentMethod>),
    Sales,
    History,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = ApiError;

    /// Parses one input line, e.g. `add item1 5`.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words
            .next()
            .ok_or_else(|| ApiError::unknown_command("Empty command"))?
            .to_lowercase();
        let args: Vec<&str> = words.collect();

        let command = match (verb.as_str(), args.as_slice()) {
            ("inventory" | "inv", []) => Command::Inventory,
            ("offers", []) => Command::Offers,
            ("cart", []) => Command::Cart,
            ("add" | "+", [item, rest @ ..]) => Command::Add {
                item_id: item.parse()?,
                quantity: parse_step(rest)?,
            },
            ("remove" | "rm" | "-", [item, rest @ ..]) => Command::Remove {
                item_id: item.parse()?,
                quantity: parse_step(rest)?,
            },
            ("total", []) => Command::Total,
            ("pay", [method]) => Command::Pay(method.parse()?),
            ("checkout", []) => Command::Checkout(None),
            ("checkout", [method]) => Command::Checkout(Some(method.parse()?)),
            ("sales", []) => Command::Sales,
            ("history", []) => Command::History,
            ("help" | "?", []) => Command::Help,
            ("quit" | "exit", []) => Command::Quit,
            _ => {
                return Err(ApiError::unknown_command(format!(
                    "Unknown command: {} (type `help`)",
                    line.trim()
                )))
            }
        };

        Ok(command)
    }
}

/// Parses the optional unit count after an item id.
fn parse_step(rest: &[&str]) -> Result<i64, ApiError> {
    let step = match rest {
        [] => 1,
        [n] => n
            .parse::<i64>()
            .map_err(|_| ApiError::validation(format!("Not a whole number: {}", n)))?,
        _ => return Err(ApiError::unknown_command("Too many arguments")),
    };

    validate_step(step).map_err(|e| ApiError::validation(e.to_string()))?;
    Ok(step)
}

// =============================================================================
// Response
// =============================================================================

/// What a command produced, ready to render.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Response {
    Inventory {
        items: BTreeMap<ItemId, InventoryRecord>,
    },
    Offers {
        offers: Vec<Offer>,
    },
    Cart(CartResponse),
    QuantityChanged {
        item_id: ItemId,
        change: QuantityChange,
    },
    Total {
        total: Money,
    },
    PaymentSelected {
        payment_method: PaymentMethod,
    },
    Checkout {
        outcome: CheckoutOutcome,
    },
    Sales {
        summary: SalesSummary,
    },
    History {
        transactions: Vec<Transaction>,
    },
    Help {
        text: &'static str,
    },
    Quit,
}

/// Runs a command against the register.
pub fn execute(state: &RegisterState, command: Command) -> Result<Response, ApiError> {
    match command {
        Command::Inventory => Ok(inventory::get_inventory(state)),
        Command::Offers => Ok(inventory::get_offers(state)),
        Command::Cart => cart::get_cart(state),
        Command::Add { item_id, quantity } => cart::update_cart_item(state, item_id, quantity),
        Command::Remove { item_id, quantity } => cart::update_cart_item(state, item_id, -quantity),
        Command::Total => Ok(cart::get_total(state)),
        Command::Pay(method) => Ok(sale::select_payment_method(state, method)),
        Command::Checkout(method) => sale::checkout(state, method),
        Command::Sales => Ok(sale::get_sales_summary(state)),
        Command::History => Ok(sale::get_transaction_history(state)),
        Command::Help => Ok(Response::Help { text: HELP }),
        Command::Quit => Ok(Response::Quit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use tally_core::Register;

    fn id(s: &str) -> ItemId {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!("inventory".parse::<Command>().unwrap(), Command::Inventory);
        assert_eq!(
            "add item1".parse::<Command>().unwrap(),
            Command::Add {
                item_id: id("item1"),
                quantity: 1
            }
        );
        assert_eq!(
            "  REMOVE item2 3 ".parse::<Command>().unwrap(),
            Command::Remove {
                item_id: id("item2"),
                quantity: 3
            }
        );
        assert_eq!(
            "pay online".parse::<Command>().unwrap(),
            Command::Pay(PaymentMethod::Online)
        );
        assert_eq!("checkout".parse::<Command>().unwrap(), Command::Checkout(None));
        assert_eq!(
            "checkout cash".parse::<Command>().unwrap(),
            Command::Checkout(Some(PaymentMethod::Cash))
        );
    }

    #[test]
    fn test_parse_errors() {
        let err = "dance".parse::<Command>().unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownCommand);

        let err = "add item1 lots".parse::<Command>().unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = "add item1 0".parse::<Command>().unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = "pay card".parse::<Command>().unwrap_err();
        assert_eq!(err.code, ErrorCode::PaymentError);

        let err = "add".parse::<Command>().unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownCommand);
    }

    #[test]
    fn test_execute_unknown_item() {
        let state = RegisterState::new(Register::seeded().unwrap());
        let err = execute(
            &state,
            Command::Add {
                item_id: id("item9"),
                quantity: 1,
            },
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_remove_negates_quantity() {
        let state = RegisterState::new(Register::seeded().unwrap());
        execute(
            &state,
            Command::Add {
                item_id: id("item1"),
                quantity: 4,
            },
        )
        .unwrap();
        let response = execute(
            &state,
            Command::Remove {
                item_id: id("item1"),
                quantity: 1,
            },
        )
        .unwrap();

        match response {
            Response::QuantityChanged { change, .. } => assert_eq!(
                change,
                QuantityChange::Applied {
                    previous: 4,
                    quantity: 3,
                    bonus: 0
                }
            ),
            other => panic!("unexpected response: {:?}", other),
        }
    }
}
