//! # Tally Register Entry Point
//!
//! ```text
//! $ tally                       # interactive register on stdin
//! $ tally --script sale.txt     # replay a command file
//! $ tally --json                # JSON responses, one per line
//! ```

use std::process::ExitCode;

fn main() -> ExitCode {
    tally_cli_lib::run()
}
