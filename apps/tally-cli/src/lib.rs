//! # Tally Register Library
//!
//! Terminal front end for the Tally POS register.
//!
//! ## Module Organization
//! ```text
//! tally_cli_lib/
//! ├── lib.rs          ◄─── You are here (arguments, logging, startup)
//! ├── session.rs      ◄─── Read-execute-print loop
//! ├── render.rs       ◄─── Text and JSON output
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── register.rs ◄─── Register behind a mutex
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command parsing and dispatch
//! │   ├── inventory.rs◄─── Stock and offers
//! │   ├── cart.rs     ◄─── Cart manipulation commands
//! │   └── sale.rs     ◄─── Payment, checkout, sales views
//! └── error.rs        ◄─── Command and startup error types
//! ```

pub mod commands;
pub mod error;
pub mod render;
pub mod session;
pub mod state;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tally_core::{CatalogStore, Register};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use error::AppError;
use state::{ConfigState, OutputFormat, RegisterState};

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(name = "tally", version, about = "Point-of-sale register with bonus-unit offers")]
pub struct Cli {
    /// Config file (defaults to $TALLY_CONFIG, then the platform config dir)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print responses as JSON, one document per line
    #[arg(long)]
    pub json: bool,

    /// Read commands from a file instead of stdin
    #[arg(short, long, value_name = "PATH")]
    pub script: Option<PathBuf>,
}

/// Runs the register.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Register Startup                                  │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: INFO, can be overridden with RUST_LOG                    │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → tally.toml → TALLY_* env → --json                      │
/// │                                                                         │
/// │  3. Open Register ────────────────────────────────────────────────────► │
/// │     • Seed catalog, empty cart, zero totals                             │
/// │                                                                         │
/// │  4. Run Session ──────────────────────────────────────────────────────► │
/// │     • stdin or --script, output to stdout                               │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    init_tracing();

    match run_with(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Register stopped");
            eprintln!("tally: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run_with(cli: Cli) -> Result<(), AppError> {
    let mut config = ConfigState::load(cli.config)?;
    if cli.json {
        config.output = OutputFormat::Json;
    }

    let register = Register::new(CatalogStore::seeded()?, config.register_options());
    info!(
        store = %config.store_name,
        stock_policy = %register.stock_policy(),
        payment_method = %register.selected_payment_method(),
        "Starting Tally POS register"
    );
    let state = RegisterState::new(register);

    let stdout = io::stdout();
    let summary = match cli.script {
        Some(path) => {
            info!(?path, "Running script");
            let file = File::open(&path)?;
            session::run_session(&state, &config, BufReader::new(file), stdout.lock())?
        }
        None => session::run_session(&state, &config, io::stdin().lock(), stdout.lock())?,
    };

    if summary.errors > 0 {
        info!(errors = summary.errors, "Session finished with command errors");
    }

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=tally=trace` - Show trace for tally crates only
/// - Default: INFO level
///
/// Logs go to stderr so stdout carries only register output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tally=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_args() {
        let cli = Cli::try_parse_from(["tally", "--json", "--script", "sale.txt"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.script, Some(PathBuf::from("sale.txt")));
        assert_eq!(cli.config, None);

        let cli = Cli::try_parse_from(["tally", "-c", "shop.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("shop.toml")));
        assert!(!cli.json);
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(Cli::try_parse_from(["tally", "--colour"]).is_err());
    }
}
