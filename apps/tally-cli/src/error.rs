//! # API Error Type
//!
//! Unified error type for register commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Tally POS                              │
//! │                                                                         │
//! │  Operator types: "add item9 2"                                          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Parse error? ─── bad verb / bad number ─────────┐                      │
//! │         │                                        │                      │
//! │         ▼                                        ▼                      │
//! │  Core error?  ─── CoreError::ItemNotFound ───► ApiError ──► rendered    │
//! │         │                                                  and the      │
//! │         ▼                                                  session      │
//! │  Success ──► Response ──► rendered                         continues    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rejected increments and empty checkouts are NOT errors; they come back
//! as normal responses describing why nothing changed.

use serde::Serialize;
use tally_core::CoreError;

/// Error returned from a register command.
///
/// ## Serialization
/// In JSON mode the operator sees:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Item not found: item9"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Item id not in the catalog
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Command verb or arguments not understood
    UnknownCommand,

    /// Payment method not recognised
    PaymentError,

    /// Internal error
    Internal,
}

impl ErrorCode {
    /// Code as printed in text mode.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::UnknownCommand => "UNKNOWN_COMMAND",
            ErrorCode::PaymentError => "PAYMENT_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an unknown command error.
    pub fn unknown_command(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::UnknownCommand, message)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "error[{}]: {}", self.code.as_str(), self.message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ItemNotFound(id) => ApiError::not_found("Item", &id),
            CoreError::InvalidPaymentMethod(_) => {
                ApiError::new(ErrorCode::PaymentError, err.to_string())
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
            CoreError::InvalidStockPolicy(_) => ApiError::validation(err.to_string()),
            CoreError::DuplicateItem(_) | CoreError::CatalogValueOverflow(_) => {
                tracing::error!("Catalog invariant broken: {}", err);
                ApiError::new(ErrorCode::Internal, err.to_string())
            }
        }
    }
}

/// Startup and I/O failures that end the program.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] crate::state::ConfigError),

    #[error("Failed to open register: {0}")]
    Core(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::ValidationError;

    #[test]
    fn test_from_core_error() {
        let err: ApiError = CoreError::ItemNotFound("item9".to_string()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Item not found: item9");

        let err: ApiError = CoreError::InvalidPaymentMethod("card".to_string()).into();
        assert_eq!(err.code, ErrorCode::PaymentError);

        let err: ApiError = CoreError::Validation(ValidationError::Required {
            field: "item id".to_string(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "item id is required");

        let err: ApiError = CoreError::CatalogValueOverflow("big".to_string()).into();
        assert_eq!(err.code, ErrorCode::Internal);
    }

    #[test]
    fn test_display_and_json() {
        let err = ApiError::unknown_command("Unknown command: dance");
        assert_eq!(err.to_string(), "error[UNKNOWN_COMMAND]: Unknown command: dance");

        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(
            json,
            r#"{"code":"UNKNOWN_COMMAND","message":"Unknown command: dance"}"#
        );
    }
}
