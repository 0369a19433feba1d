//! # App Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Command Function                                                       │
//! │  Result<T, AppError>                                                    │
//! │       │                                                                 │
//! │       ├── Unknown menu item? ──── AppError::not_found ─────┐            │
//! │       ├── Bad config file? ────── ErrorCode::ConfigError ──┤            │
//! │       ├── Order blocked? ──────── CheckoutError ───────────┤            │
//! │       ├── Bad order move? ─────── ErrorCode::BusinessLogic ┤            │
//! │       ├── Data dir unusable? ──── StorageError ────────────┤            │
//! │       │                                                    ▼            │
//! │       │                                         stderr + exit code 1    │
//! │       ▼                                                                 │
//! │  Success ──► notices + cart printed                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart policy rejections (closed restaurant, other restaurant) are not
//! errors; they come back as notices and the command still succeeds.

use serde::Serialize;

use foodie_core::{CheckoutError, CoreError, StorageError};

/// Convenience alias for command results.
pub type AppResult<T> = Result<T, AppError>;

/// Error reported by a storefront command.
///
/// ## Serialization
/// With `--json`, a failing command prints:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Menu item not found: m42"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
}

/// Error codes for command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Restaurant or menu item not in the catalog
    NotFound,
    /// Input validation failed
    ValidationError,
    /// Order cannot be placed from the current cart
    CheckoutError,
    /// Order lifecycle rule broken
    BusinessLogic,
    /// Data directory or slot unusable
    StorageError,
    /// Config file or environment invalid
    ConfigError,
    /// Anything else
    Internal,
}

impl AppError {
    /// Creates a new app error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        AppError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ConfigError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidOrderTransition { .. } => {
                AppError::new(ErrorCode::BusinessLogic, err.to_string())
            }
            CoreError::CorruptSnapshot(detail) => {
                tracing::error!("Corrupt snapshot: {}", detail);
                AppError::new(ErrorCode::StorageError, "Stored data is unreadable")
            }
        }
    }
}

impl From<CheckoutError> for AppError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::InvalidAddress(e) => AppError::validation(e.to_string()),
            other => AppError::new(ErrorCode::CheckoutError, other.to_string()),
        }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        tracing::error!("Storage failed: {}", err);
        AppError::new(ErrorCode::StorageError, err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::internal(format!("JSON encoding failed: {}", err))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;
    use foodie_core::{Money, ValidationError};

    #[test]
    fn test_checkout_errors_map_to_codes() {
        let err = AppError::from(CheckoutError::EmptyCart);
        assert_eq!(err.code, ErrorCode::CheckoutError);

        let err = AppError::from(CheckoutError::BelowMinimumOrder {
            minimum: Money::from_major(150),
            shortfall: Money::from_major(50),
        });
        assert!(err.message.contains("₹50.00"));

        let err = AppError::from(CheckoutError::InvalidAddress(ValidationError::Required {
            field: "city".to_string(),
        }));
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_core_errors_map_to_codes() {
        let err = AppError::from(CoreError::InvalidOrderTransition {
            order_id: "o1".to_string(),
            from: "delivered".to_string(),
            to: "cancelled".to_string(),
        });
        assert_eq!(err.code, ErrorCode::BusinessLogic);
        assert!(err.message.contains("o1"));

        let err = AppError::from(CoreError::CorruptSnapshot("eof".to_string()));
        assert_eq!(err.code, ErrorCode::StorageError);
    }

    #[test]
    fn test_serializes_screaming_code() {
        let json = serde_json::to_value(AppError::not_found("Menu item", "m42")).unwrap();

        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Menu item not found: m42");
    }

    #[test]
    fn test_display() {
        let err = AppError::config("tax rate out of range");
        assert_eq!(err.to_string(), "[ConfigError] tax rate out of range");
    }
}
