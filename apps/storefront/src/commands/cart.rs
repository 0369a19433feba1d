//! # Cart Commands
//!
//! Each command runs one cart facade operation and returns the cart with the
//! notices it produced.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  Placed  │       │
//! │  │  Cart    │     │          │     │ Summary  │     │  Order   │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                                 │              │
//! │                   add / set / remove               place (order.rs)     │
//! │                        │                                 │              │
//! │                        ▼                                 ▼              │
//! │                   clear ──────────────────────► (back to empty)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::debug;

use foodie_core::{CartLine, CartSession, CartTotals, KeyValueStore, Notice};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Cart contents, totals, and notices from the last operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurant_name: Option<String>,
    pub items: Vec<CartLine>,
    pub totals: CartTotals,
    pub notices: Vec<Notice>,
}

impl CartResponse {
    /// Snapshots the cart and drains the session's notices.
    pub fn drain<S: KeyValueStore>(session: &mut CartSession<S>) -> Self {
        let cart = session.cart();
        let restaurant_name = cart.restaurant_name().map(str::to_string);
        let items = cart.items().to_vec();
        let totals = session.totals();

        CartResponse {
            restaurant_name,
            items,
            totals,
            notices: session.take_notices(),
        }
    }
}

/// Shows the current cart.
pub fn show_cart<S: KeyValueStore>(state: &mut AppState<S>) -> CartResponse {
    debug!("show_cart command");
    CartResponse::drain(&mut state.session)
}

/// Adds one of a catalog dish to the cart.
///
/// ## Behavior
/// - Dish already in cart: quantity increases
/// - Restaurant closed or cart holds another restaurant: rejected with a
///   notice, cart unchanged
pub fn add_to_cart<S: KeyValueStore>(
    state: &mut AppState<S>,
    menu_item_id: &str,
) -> AppResult<CartResponse> {
    debug!(menu_item_id = %menu_item_id, "add_to_cart command");

    let item = state
        .catalog
        .menu_item(menu_item_id)
        .ok_or_else(|| AppError::not_found("Menu item", menu_item_id))?;
    let restaurant = state
        .catalog
        .restaurant(&item.restaurant_id)
        .ok_or_else(|| AppError::not_found("Restaurant", &item.restaurant_id))?;

    state
        .session
        .add_item(item, &restaurant.id, &restaurant.name, Some(restaurant));

    Ok(CartResponse::drain(&mut state.session))
}

/// Sets a line's quantity; zero or less removes it.
pub fn update_cart_item<S: KeyValueStore>(
    state: &mut AppState<S>,
    menu_item_id: &str,
    quantity: i64,
) -> CartResponse {
    debug!(menu_item_id = %menu_item_id, quantity, "update_cart_item command");

    state.session.update_quantity(menu_item_id, quantity);
    CartResponse::drain(&mut state.session)
}

/// Removes a line from the cart.
pub fn remove_from_cart<S: KeyValueStore>(
    state: &mut AppState<S>,
    menu_item_id: &str,
) -> CartResponse {
    debug!(menu_item_id = %menu_item_id, "remove_from_cart command");

    state.session.remove_item(menu_item_id);
    CartResponse::drain(&mut state.session)
}

/// Empties the cart.
pub fn clear_cart<S: KeyValueStore>(state: &mut AppState<S>) -> CartResponse {
    debug!("clear_cart command");

    state.session.clear_cart();
    CartResponse::drain(&mut state.session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Catalog, StorefrontConfig};
    use foodie_core::{MemoryStore, Money, Rejection};

    fn state() -> AppState<MemoryStore> {
        AppState::with_store(
            StorefrontConfig::default(),
            Catalog::builtin(),
            MemoryStore::new(),
        )
    }

    #[test]
    fn test_add_then_add_again() {
        let mut state = state();

        let first = add_to_cart(&mut state, "m1").unwrap();
        assert_eq!(first.notices.len(), 1);
        assert_eq!(first.restaurant_name.as_deref(), Some("The Spice Garden"));

        let second = add_to_cart(&mut state, "m1").unwrap();
        assert!(second.notices.is_empty());
        assert_eq!(second.totals.total_items, 2);
        assert_eq!(second.totals.subtotal, Money::from_major(640));
    }

    #[test]
    fn test_add_from_other_restaurant_is_reported_not_failed() {
        let mut state = state();
        add_to_cart(&mut state, "m1").unwrap();

        let response = add_to_cart(&mut state, "m9").unwrap();

        assert_eq!(response.items.len(), 1);
        assert!(matches!(
            &response.notices[..],
            [Notice::Rejected {
                reason: Rejection::DifferentRestaurant { .. }
            }]
        ));
    }

    #[test]
    fn test_add_from_closed_restaurant() {
        let mut state = state();

        let response = add_to_cart(&mut state, "m11").unwrap();

        assert!(response.items.is_empty());
        assert!(response.notices[0].to_string().contains("currently closed"));
        assert!(state.session.is_restaurant_closed());
    }

    #[test]
    fn test_unknown_item_is_not_found() {
        let mut state = state();
        let err = add_to_cart(&mut state, "m42").unwrap_err();

        assert_eq!(err.code, crate::error::ErrorCode::NotFound);
    }

    #[test]
    fn test_set_remove_clear() {
        let mut state = state();
        add_to_cart(&mut state, "m1").unwrap();
        add_to_cart(&mut state, "m3").unwrap();

        let response = update_cart_item(&mut state, "m3", 3);
        assert_eq!(response.totals.total_items, 4);

        let response = remove_from_cart(&mut state, "m1");
        assert_eq!(response.totals.line_count, 1);

        let response = clear_cart(&mut state);
        assert!(response.items.is_empty());
        assert_eq!(response.notices, vec![Notice::CartCleared]);
        assert_eq!(response.restaurant_name, None);
    }

    #[test]
    fn test_show_cart_drains_nothing_new() {
        let mut state = state();
        add_to_cart(&mut state, "m5").unwrap();

        let response = show_cart(&mut state);

        assert!(response.notices.is_empty());
        assert_eq!(response.items[0].menu_item.name, "Classic Smash Burger");
    }
}
