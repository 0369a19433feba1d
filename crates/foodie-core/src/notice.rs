//! # Notices and Outcomes
//!
//! The cart never talks to the UI. Each facade operation returns an
//! [`Outcome`], and anything worth telling the user is queued as a [`Notice`]
//! that the consumer drains with
//! [`CartSession::take_notices`](crate::session::CartSession::take_notices)
//! and renders however it likes (toast, stderr, log line).

use serde::Serialize;
use std::fmt;
use ts_rs::TS;

use crate::policy::Rejection;

/// How a consumer should style a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// A user-facing message produced by a cart operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(tag = "type", rename_all = "camelCase")]
#[ts(export)]
pub enum Notice {
    /// A new line was added (not emitted when a quantity is merely bumped).
    #[serde(rename_all = "camelCase")]
    ItemAdded { item_name: String },
    CartCleared,
    /// The stored cart was older than the expiry window and was dropped.
    CartExpired,
    #[serde(rename_all = "camelCase")]
    OrderPlaced { order_id: String },
    Rejected { reason: Rejection },
}

impl Notice {
    pub fn level(&self) -> NoticeLevel {
        match self {
            Notice::ItemAdded { .. } | Notice::CartCleared | Notice::OrderPlaced { .. } => {
                NoticeLevel::Success
            }
            Notice::CartExpired => NoticeLevel::Info,
            Notice::Rejected { .. } => NoticeLevel::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.level() == NoticeLevel::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::ItemAdded { item_name } => write!(f, "{} added to cart", item_name),
            Notice::CartCleared => f.write_str("Cart cleared"),
            Notice::CartExpired => {
                f.write_str("Your cart has expired and was cleared. Please add items again.")
            }
            Notice::OrderPlaced { order_id } => write!(f, "Order {} placed", order_id),
            Notice::Rejected { reason } => write!(f, "{}", reason),
        }
    }
}

impl From<Rejection> for Notice {
    fn from(reason: Rejection) -> Self {
        Notice::Rejected { reason }
    }
}

/// Result of a facade operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The cart changed and was persisted.
    Applied,
    /// Nothing to do (e.g. removing a dish that is not in the cart).
    Unchanged,
    /// A policy rule refused the change; the cart is untouched.
    Rejected(Rejection),
}

impl Outcome {
    /// True unless a policy rule refused the change.
    pub fn is_admitted(&self) -> bool {
        !matches!(self, Outcome::Rejected(_))
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Outcome::Rejected(reason) => Some(reason),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    #[test]
    fn test_levels() {
        assert_eq!(
            Notice::ItemAdded {
                item_name: "Garlic Naan".to_string()
            }
            .level(),
            NoticeLevel::Success
        );
        assert_eq!(Notice::CartExpired.level(), NoticeLevel::Info);
        assert!(Notice::from(Rejection::BelowMinimumOrder {
            minimum: Money::from_major(150),
            shortfall: Money::from_major(50),
        })
        .is_error());
    }

    #[test]
    fn test_messages() {
        let notice = Notice::ItemAdded {
            item_name: "Butter Chicken".to_string(),
        };
        assert_eq!(notice.to_string(), "Butter Chicken added to cart");
        assert_eq!(Notice::CartCleared.to_string(), "Cart cleared");
    }

    #[test]
    fn test_outcome_helpers() {
        assert!(Outcome::Applied.is_admitted());
        assert!(Outcome::Unchanged.is_admitted());

        let rejected = Outcome::Rejected(Rejection::RestaurantClosed {
            restaurant_name: "Mediterranean Delights".to_string(),
        });
        assert!(!rejected.is_admitted());
        assert!(rejected.rejection().is_some());
    }
}
