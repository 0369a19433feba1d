//! # Cart Policy
//!
//! Rules deciding whether a cart change is admitted.
//!
//! ## Add-Item Rules (evaluated in order, first failure wins)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add_item(menu_item, restaurant_id, restaurant_name, restaurant?)       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. restaurant supplied && !restaurant.is_open                          │
//! │       ├── yes → Rejected(RestaurantClosed)                              │
//! │       ▼                                                                 │
//! │  2. cart non-empty && cart.restaurant_id != restaurant_id               │
//! │       ├── yes → Rejected(DifferentRestaurant)                           │
//! │       ▼                                                                 │
//! │  3. admitted                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The minimum-order and restaurant-closed checks are standalone; the cart
//! page and checkout call them on demand.

use serde::Serialize;
use thiserror::Error;
use ts_rs::TS;

use crate::cart::Cart;
use crate::money::Money;
use crate::types::Restaurant;

/// Why a cart change was refused.
///
/// These are expected, user-correctable situations. The `Display` text is the
/// message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, TS)]
#[serde(tag = "kind", rename_all = "camelCase")]
#[ts(export)]
pub enum Rejection {
    #[error("{restaurant_name} is currently closed. Please try again later.")]
    #[serde(rename_all = "camelCase")]
    RestaurantClosed { restaurant_name: String },

    #[error("Your cart contains items from {current_restaurant}. Clear cart first.")]
    #[serde(rename_all = "camelCase")]
    DifferentRestaurant {
        current_restaurant: String,
        requested_restaurant: String,
    },

    #[error("Minimum order amount is {minimum}. Add {shortfall} more to proceed.")]
    #[serde(rename_all = "camelCase")]
    BelowMinimumOrder { minimum: Money, shortfall: Money },
}

/// Runs the add-item rules against the current cart.
///
/// `restaurant_name` names the requested restaurant in the rejection when the
/// catalog snapshot is not supplied.
pub fn check_add(
    cart: &Cart,
    restaurant_id: &str,
    restaurant_name: &str,
    restaurant: Option<&Restaurant>,
) -> Result<(), Rejection> {
    if let Some(restaurant) = restaurant {
        if !restaurant.is_open {
            return Err(Rejection::RestaurantClosed {
                restaurant_name: restaurant.name.clone(),
            });
        }
    }

    if let Some(current) = cart.restaurant_id() {
        if current != restaurant_id {
            return Err(Rejection::DifferentRestaurant {
                current_restaurant: cart.restaurant_name().unwrap_or(current).to_string(),
                requested_restaurant: restaurant_name.to_string(),
            });
        }
    }

    Ok(())
}

/// Passes when `subtotal` reaches `minimum`.
pub fn check_minimum_order(subtotal: Money, minimum: Money) -> Result<(), Rejection> {
    if subtotal >= minimum {
        return Ok(());
    }

    Err(Rejection::BelowMinimumOrder {
        minimum,
        shortfall: subtotal.shortfall_to(minimum),
    })
}

/// True iff a cached restaurant snapshot exists and says it is closed.
///
/// No snapshot means "unknown", which is reported as open.
pub fn is_closed(status: Option<&Restaurant>) -> bool {
    status.is_some_and(|r| !r.is_open)
}

// =============================================================================
// Unit Tests
// =============================================================================
