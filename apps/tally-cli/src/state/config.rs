//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command line (`--json`)
//! 2. Environment variables (`TALLY_*`)
//! 3. Config file (`tally.toml`)
//! 4. Defaults (this file)
//!
//! ## Configuration File Format
//! ```toml
//! store_name = "Corner Shop"
//! currency_symbol = "₹"
//! currency_decimals = 0
//! low_stock_threshold = 100
//! stock_policy = "reject"     # reject | clamp | backorder
//! payment_method = "cash"     # cash | online
//! output = "text"             # text | json
//! ```
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tally_core::{PaymentMethod, RegisterOptions, StockPolicy, DEFAULT_LOW_STOCK_THRESHOLD};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "TALLY_CONFIG";

/// Config loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema.
    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A value is outside its allowed range.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// How responses are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable lines
    #[default]
    Text,

    /// One JSON document per response
    Json,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigState {
    /// Store name (shown in the banner)
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places in one major unit
    pub currency_decimals: u8,

    /// Items with stock below this are flagged as low
    pub low_stock_threshold: i64,

    /// What checkout does when bonus units exceed stock
    pub stock_policy: StockPolicy,

    /// Payment method selected when the register opens
    pub payment_method: PaymentMethod,

    /// Response format
    pub output: OutputFormat,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Store: "Tally POS"
    /// - Currency: ₹ with no decimal places (prices are whole rupees)
    /// - Low stock: below 100
    /// - Stock policy: reject
    /// - Payment: cash
    fn default() -> Self {
        ConfigState {
            store_name: "Tally POS".to_string(),
            currency_symbol: "₹".to_string(),
            currency_decimals: 0,
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            stock_policy: StockPolicy::default(),
            payment_method: PaymentMethod::default(),
            output: OutputFormat::default(),
        }
    }
}

impl ConfigState {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file: `path`, else `$TALLY_CONFIG`, else the platform
    ///    config dir. Only an explicitly named file must exist.
    /// 3. Environment variables
    pub fn load(path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let explicit = path.or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from));

        let mut config = match explicit {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Reads a TOML config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        info!(?path, "Loading config from file");

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.currency_decimals > 4 {
            return Err(ConfigError::Invalid(format!(
                "currency_decimals must be at most 4, got {}",
                self.currency_decimals
            )));
        }

        if self.low_stock_threshold < 0 {
            return Err(ConfigError::Invalid(format!(
                "low_stock_threshold must not be negative, got {}",
                self.low_stock_threshold
            )));
        }

        Ok(())
    }

    /// Applies `TALLY_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup.
    ///
    /// ## Keys
    /// - `TALLY_STORE_NAME`
    /// - `TALLY_CURRENCY_SYMBOL`
    /// - `TALLY_CURRENCY_DECIMALS`
    /// - `TALLY_LOW_STOCK_THRESHOLD`
    /// - `TALLY_STOCK_POLICY`
    /// - `TALLY_PAYMENT_METHOD`
    /// - `TALLY_OUTPUT`
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup("TALLY_STORE_NAME") {
            self.store_name = name;
        }

        if let Some(symbol) = lookup("TALLY_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        if let Some(decimals) = lookup("TALLY_CURRENCY_DECIMALS") {
            match decimals.parse::<u8>() {
                Ok(d) => self.currency_decimals = d,
                Err(_) => warn!(value = %decimals, "Ignoring invalid TALLY_CURRENCY_DECIMALS"),
            }
        }

        if let Some(threshold) = lookup("TALLY_LOW_STOCK_THRESHOLD") {
            match threshold.parse::<i64>() {
                Ok(t) => self.low_stock_threshold = t,
                Err(_) => warn!(value = %threshold, "Ignoring invalid TALLY_LOW_STOCK_THRESHOLD"),
            }
        }

        if let Some(policy) = lookup("TALLY_STOCK_POLICY") {
            match policy.parse::<StockPolicy>() {
                Ok(p) => {
                    debug!(policy = %p, "Overriding stock policy from environment");
                    self.stock_policy = p;
                }
                Err(e) => warn!(error = %e, "Ignoring TALLY_STOCK_POLICY"),
            }
        }

        if let Some(method) = lookup("TALLY_PAYMENT_METHOD") {
            match method.parse::<PaymentMethod>() {
                Ok(m) => self.payment_method = m,
                Err(e) => warn!(error = %e, "Ignoring TALLY_PAYMENT_METHOD"),
            }
        }

        if let Some(output) = lookup("TALLY_OUTPUT") {
            match output.to_lowercase().as_str() {
                "text" => self.output = OutputFormat::Text,
                "json" => self.output = OutputFormat::Json,
                _ => warn!(value = %output, "Unknown output format in environment"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "tally", "pos")
            .map(|dirs| dirs.config_dir().join("tally.toml"))
    }

    /// Register settings derived from this config.
    pub fn register_options(&self) -> RegisterOptions {
        RegisterOptions {
            stock_policy: self.stock_policy,
            payment_method: self.payment_method,
            low_stock_threshold: self.low_stock_threshold,
        }
    }

    /// Formats a minor-unit amount as a currency string.
    ///
    /// ## Example
    /// ```rust
    /// use tally_cli_lib::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(300), "₹300");
    /// ```
    pub fn format_currency(&self, minor: i64) -> String {
        let divisor = 10_i64.pow(u32::from(self.currency_decimals));
        let whole = minor / divisor;
        let frac = (minor % divisor).abs();

        format!(
            "{}{}{}",
            if minor < 0 { "-" } else { "" },
            self.currency_symbol,
            if self.currency_decimals > 0 {
                format!(
                    "{}.{:0width$}",
                    whole.abs(),
                    frac,
                    width = usize::from(self.currency_decimals)
                )
            } else {
                whole.abs().to_string()
            }
        )
    }
}
