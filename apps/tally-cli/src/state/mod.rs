//! # State Module
//!
//! Application state for the terminal register.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────┐      ┌──────────────────────────┐        │
//! │  │     RegisterState        │      │      ConfigState         │        │
//! │  │                          │      │                          │        │
//! │  │  Arc<Mutex<Register>>    │      │  store_name, currency    │        │
//! │  │  catalog · cart · ledger │      │  stock_policy, output    │        │
//! │  │  transaction log         │      │                          │        │
//! │  └──────────────────────────┘      └──────────────────────────┘        │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • RegisterState: Protected by Arc<Mutex<T>> for exclusive access      │
//! │  • ConfigState: Read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod register;

pub use config::{ConfigError, ConfigState, OutputFormat, CONFIG_PATH_ENV};
pub use register::RegisterState;
