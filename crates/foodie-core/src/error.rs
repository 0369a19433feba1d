//! # Error Types
//!
//! Domain-specific error types for foodie-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  foodie-core errors (this file)                                        │
//! │  ├── CoreError        - General domain errors                          │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  ├── StorageError     - KeyValueStore port failures                    │
//! │  └── CheckoutError    - Why an order cannot be placed                  │
//! │                                                                         │
//! │  Storefront errors (in app)                                            │
//! │  └── AppError         - What the CLI reports                           │
//! │                                                                         │
//! │  NOTE: Cart policy rejections are NOT errors. They travel as           │
//! │        `Outcome::Rejected` + a queued `Notice` (see notice.rs).        │
//! │        StorageError never escapes the cart facade; it is logged.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An order was asked to move to a status its lifecycle does not allow.
    ///
    /// ## When This Occurs
    /// - Advancing a delivered or cancelled order
    /// - Cancelling an order that has already been delivered
    #[error("Order {order_id} cannot move from {from} to {to}")]
    InvalidOrderTransition {
        order_id: String,
        from: String,
        to: String,
    },

    /// Persisted data violates an invariant or does not parse.
    ///
    /// ## When This Occurs
    /// - A cart snapshot holds lines from two restaurants or zero quantities
    /// - A stored order is not valid JSON
    #[error("Corrupt snapshot: {0}")]
    CorruptSnapshot(String),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Field value must have an exact length.
    #[error("{field} must be exactly {len} characters")]
    WrongLength { field: String, len: usize },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., non-digit pincode).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Storage Error
// =============================================================================

/// Failures reported by a [`KeyValueStore`](crate::store::KeyValueStore).
///
/// The cart facade treats every variant the same way: log and carry on.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing medium failed (disk, permissions, ...).
    #[error("Storage I/O failed for '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The store refused the write because it is full.
    #[error("Storage quota exceeded while writing '{key}'")]
    QuotaExceeded { key: String },

    /// The key cannot be represented by this store.
    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),
}

// =============================================================================
// Checkout Error
// =============================================================================

/// Reasons an order cannot be placed from the current cart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("Your cart is empty")]
    EmptyCart,

    #[error("{restaurant_name} is currently closed")]
    RestaurantClosed { restaurant_name: String },

    #[error("Minimum order amount is {minimum}. Add {shortfall} more to proceed.")]
    BelowMinimumOrder { minimum: Money, shortfall: Money },

    #[error("Invalid delivery address: {0}")]
    InvalidAddress(#[from] ValidationError),

    #[error("Delivery time of {minutes} minutes cannot be scheduled")]
    DeliveryTimeOutOfRange { minutes: i64 },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Convenience type alias for storage port results.
pub type StorageResult<T> = Result<T, StorageError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "city".to_string(),
        };
        assert_eq!(err.to_string(), "city is required");

        let err = ValidationError::WrongLength {
            field: "pincode".to_string(),
            len: 6,
        };
        assert_eq!(err.to_string(), "pincode must be exactly 6 characters");
    }

    #[test]
    fn test_invalid_transition_names_both_statuses() {
        let err = CoreError::InvalidOrderTransition {
            order_id: "o1".to_string(),
            from: "delivered".to_string(),
            to: "cancelled".to_string(),
        };
        assert_eq!(err.to_string(), "Order o1 cannot move from delivered to cancelled");
    }

    #[test]
    fn test_checkout_error_states_shortfall() {
        let err = CheckoutError::BelowMinimumOrder {
            minimum: Money::from_major(150),
            shortfall: Money::from_major(50),
        };
        assert_eq!(
            err.to_string(),
            "Minimum order amount is ₹150.00. Add ₹50.00 more to proceed."
        );
    }

    #[test]
    fn test_storage_error_keeps_key() {
        let err = StorageError::QuotaExceeded {
            key: "foodie-cart".to_string(),
        };
        assert!(err.to_string().contains("foodie-cart"));
    }
}
