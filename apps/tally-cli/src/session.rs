//! # Register Session
//!
//! Reads operator commands line by line, runs them against the register
//! and writes each rendered response.
//!
//! Blank lines and lines starting with `#` are skipped, so the same loop
//! drives an interactive terminal and a `--script` file. A command error
//! is printed and the session carries on.

use std::io::{self, BufRead, Write};

use tracing::{debug, error, info};

use crate::commands::{self, Command, Response};
use crate::render;
use crate::state::{ConfigState, OutputFormat, RegisterState};

/// Counters reported when a session ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Commands executed (successfully or not)
    pub commands: usize,
    /// Commands that produced an error
    pub errors: usize,
}

/// Runs commands from `input` until it ends or the operator quits.
pub fn run_session<R: BufRead, W: Write>(
    state: &RegisterState,
    config: &ConfigState,
    input: R,
    mut output: W,
) -> io::Result<SessionSummary> {
    let mut summary = SessionSummary::default();

    if config.output == OutputFormat::Text {
        writeln!(output, "{} register. Type `help` for commands.", config.store_name)?;
    }

    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        summary.commands += 1;
        debug!(command = trimmed, "session input");

        let result = trimmed
            .parse::<Command>()
            .and_then(|command| commands::execute(state, command));

        let (rendered, quit) = match result {
            Ok(response) => (
                render::render(&response, config),
                matches!(response, Response::Quit),
            ),
            Err(err) => {
                summary.errors += 1;
                (render::render_error(&err, config), false)
            }
        };

        match rendered {
            Ok(text) => writeln!(output, "{}", text)?,
            Err(e) => {
                summary.errors += 1;
                error!(error = %e, "Failed to serialize response");
            }
        }

        if quit {
            break;
        }
    }

    output.flush()?;
    info!(
        commands = summary.commands,
        errors = summary.errors,
        "Session ended"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tally_core::{ItemId, Register};

    fn run(script: &str, config: &ConfigState) -> (RegisterState, SessionSummary, String) {
        let state = RegisterState::new(Register::seeded().unwrap());
        let mut out = Vec::new();
        let summary = run_session(&state, config, Cursor::new(script), &mut out).unwrap();
        (state, summary, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_bonus_checkout_script() {
        let script = "\
# ten units of item2, paid online
add item2 10
pay online
checkout
sales
";
        let (state, summary, out) = run(script, &ConfigState::default());

        assert_eq!(summary, SessionSummary { commands: 4, errors: 0 });
        assert!(out.starts_with("Tally POS register."));
        assert!(out.contains("Checkout committed"));
        assert!(out.contains("Item 2 x10 (+4 free)"));
        assert!(out.contains("Online sales: ₹300"));

        let stock = state.with_register(|r| r.inventory_snapshot());
        assert_eq!(stock[&"item2".parse::<ItemId>().unwrap()].stock, 1986);
    }

    #[test]
    fn test_errors_do_not_end_session() {
        let (_, summary, out) = run("dance\nadd item9\ntotal\n", &ConfigState::default());

        assert_eq!(summary, SessionSummary { commands: 3, errors: 2 });
        assert!(out.contains("error[UNKNOWN_COMMAND]"));
        assert!(out.contains("error[NOT_FOUND]: Item not found: item9"));
        assert!(out.trim_end().ends_with("Total: ₹0"));
    }

    #[test]
    fn test_quit_stops_reading() {
        let (state, summary, _) = run("add item1\nquit\nadd item1\n", &ConfigState::default());

        assert_eq!(summary.commands, 2);
        assert_eq!(state.with_register(|r| r.cart_total()).minor(), 20);
    }

    #[test]
    fn test_json_session_has_no_banner() {
        let config = ConfigState {
            output: OutputFormat::Json,
            ..ConfigState::default()
        };
        let (_, _, out) = run("checkout\n", &config);

        assert_eq!(
            out,
            "{\"kind\":\"checkout\",\"outcome\":{\"status\":\"empty_cart\"}}\n"
        );
    }
}
