//! # Rendering
//!
//! Turns command responses into text or JSON for stdout.

use std::fmt;

use tally_core::{CheckoutOutcome, Money, QuantityChange, Transaction};

use crate::commands::Response;
use crate::error::ApiError;
use crate::state::{ConfigState, OutputFormat};

/// Renders a successful response in the configured format.
pub fn render(response: &Response, config: &ConfigState) -> serde_json::Result<String> {
    match config.output {
        OutputFormat::Json => serde_json::to_string(response),
        OutputFormat::Text => Ok(render_text(response, config)),
    }
}

/// Renders a command error in the configured format.
pub fn render_error(err: &ApiError, config: &ConfigState) -> serde_json::Result<String> {
    match config.output {
        OutputFormat::Json => serde_json::to_string(err),
        OutputFormat::Text => Ok(err.to_string()),
    }
}

fn render_text(response: &Response, config: &ConfigState) -> String {
    TextView { response, config }.to_string()
}

/// Human-readable view of a response.
struct TextView<'a> {
    response: &'a Response,
    config: &'a ConfigState,
}

impl TextView<'_> {
    fn money(&self, amount: Money) -> String {
        self.config.format_currency(amount.minor())
    }
}

impl fmt::Display for TextView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.response {
            Response::Inventory { items } => {
                f.write_str("Inventory")?;
                for (id, record) in items {
                    write!(
                        f,
                        "\n  {:<8} {:<12} {:>8}  stock {}",
                        id,
                        record.name,
                        self.money(record.price),
                        record.stock
                    )?;
                    if record.low_stock {
                        f.write_str(" (low)")?;
                    }
                }
                Ok(())
            }
            Response::Offers { offers } => {
                f.write_str("Special offers")?;
                for offer in offers {
                    write!(f, "\n  * {}", offer.description)?;
                }
                Ok(())
            }
            Response::Cart(cart) => {
                write!(f, "Cart (payment: {})", cart.payment_method)?;
                for line in &cart.lines {
                    write!(
                        f,
                        "\n  {:<8} {:<12} x{:<4} {:>8}",
                        line.item_id,
                        line.name,
                        line.quantity,
                        self.money(line.line_total)
                    )?;
                    if line.bonus > 0 {
                        write!(f, "  +{} free", line.bonus)?;
                    }
                    if !line.can_increment {
                        f.write_str("  (max)")?;
                    }
                    if line.low_stock {
                        f.write_str("  (low)")?;
                    }
                }
                write!(f, "\nTotal: {}", self.money(cart.total))
            }
            Response::QuantityChanged { item_id, change } => match change {
                QuantityChange::Applied {
                    quantity, bonus, ..
                } => {
                    write!(f, "{}: {} in cart", item_id, quantity)?;
                    if *bonus > 0 {
                        write!(f, " (+{} free)", bonus)?;
                    }
                    Ok(())
                }
                QuantityChange::Rejected {
                    quantity,
                    requested,
                    available,
                } => write!(
                    f,
                    "{}: not enough stock for {} (available {}); still {} in cart",
                    item_id, requested, available, quantity
                ),
            },
            Response::Total { total } => write!(f, "Total: {}", self.money(*total)),
            Response::PaymentSelected { payment_method } => {
                write!(f, "Payment method: {}", payment_method)
            }
            Response::Checkout { outcome } => match outcome {
                CheckoutOutcome::Committed { transaction } => {
                    f.write_str("Checkout committed\n")?;
                    self.receipt(f, transaction)
                }
                CheckoutOutcome::EmptyCart => f.write_str("Cart is empty; nothing to check out"),
                CheckoutOutcome::InsufficientStock { shortfalls } => {
                    f.write_str("Checkout refused: not enough stock for bonus units")?;
                    for s in shortfalls {
                        write!(
                            f,
                            "\n  {} needs {}, only {} in stock",
                            s.item_id, s.requested, s.available
                        )?;
                    }
                    Ok(())
                }
            },
            Response::Sales { summary } => write!(
                f,
                "Cash sales:   {}\nOnline sales: {}\nTotal sales:  {}",
                self.money(summary.cash_total),
                self.money(summary.online_total),
                self.money(summary.grand_total)
            ),
            Response::History { transactions } => {
                if transactions.is_empty() {
                    return f.write_str("No transactions yet");
                }
                for (i, tx) in transactions.iter().enumerate() {
                    if i > 0 {
                        f.write_str("\n")?;
                    }
                    self.receipt(f, tx)?;
                }
                Ok(())
            }
            Response::Help { text } => f.write_str(text),
            Response::Quit => f.write_str("Bye"),
        }
    }
}

impl TextView<'_> {
    /// Receipt block: header plus purchased lines.
    fn receipt(&self, f: &mut fmt::Formatter<'_>, tx: &Transaction) -> fmt::Result {
        write!(
            f,
            "#{} {}  {:<6} {}",
            tx.sequence,
            tx.timestamp.format("%Y-%m-%d %H:%M:%S"),
            tx.payment_method,
            self.money(tx.total)
        )?;
        for line in tx.purchased_lines() {
            write!(f, "\n  {} x{}", line.name, line.quantity)?;
            if line.bonus > 0 {
                write!(f, " (+{} free)", line.bonus)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::{ItemId, SalesSummary};

    #[test]
    fn test_render_sales_text() {
        let response = Response::Sales {
            summary: SalesSummary {
                cash_total: Money::from_minor(100),
                online_total: Money::from_minor(300),
                grand_total: Money::from_minor(400),
            },
        };
        let text = render(&response, &ConfigState::default()).unwrap();
        assert_eq!(text, "Cash sales:   ₹100\nOnline sales: ₹300\nTotal sales:  ₹400");
    }

    #[test]
    fn test_render_rejected_update() {
        let response = Response::QuantityChanged {
            item_id: "item3".parse::<ItemId>().unwrap(),
            change: QuantityChange::Rejected {
                quantity: 0,
                requested: 1001,
                available: 1000,
            },
        };
        let text = render(&response, &ConfigState::default()).unwrap();
        assert_eq!(
            text,
            "item3: not enough stock for 1001 (available 1000); still 0 in cart"
        );
    }

    #[test]
    fn test_render_cart_text() {
        let response = Response::Cart(crate::commands::CartResponse {
            lines: vec![crate::commands::CartLineResponse {
                item_id: "item1".parse::<ItemId>().unwrap(),
                name: "Item 1".to_string(),
                price: Money::from_minor(100),
                quantity: 10,
                bonus: 4,
                line_total: Money::from_minor(1000),
                can_increment: false,
                low_stock: true,
            }],
            total: Money::from_minor(1000),
            payment_method: tally_core::PaymentMethod::Cash,
        });
        let text = render(&response, &ConfigState::default()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Cart (payment: cash)");
        assert!(lines[1].contains("x10"));
        assert!(lines[1].ends_with("+4 free  (max)  (low)"));
        assert_eq!(lines[2], "Total: ₹1000");
    }

    #[test]
    fn test_render_empty_history() {
        let response = Response::History {
            transactions: Vec::new(),
        };
        let text = render(&response, &ConfigState::default()).unwrap();
        assert_eq!(text, "No transactions yet");
    }

    #[test]
    fn test_render_json() {
        let config = ConfigState {
            output: OutputFormat::Json,
            ..ConfigState::default()
        };
        let response = Response::Total {
            total: Money::from_minor(300),
        };
        assert_eq!(
            render(&response, &config).unwrap(),
            r#"{"kind":"total","total":300}"#
        );

        let err = ApiError::not_found("Item", "item9");
        assert_eq!(
            render_error(&err, &config).unwrap(),
            r#"{"code":"NOT_FOUND","message":"Item not found: item9"}"#
        );
    }
}
