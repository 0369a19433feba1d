//! # Checkout and Order Commands
//!
//! ```text
//! checkout ──► CheckoutSummary (+ minimum-order notice)
//! place ─────► Order, cart emptied, order kept as the last order
//! order show / advance / cancel ──► last order, moved along its lifecycle
//! ```
//!
//! The restaurant snapshot is refreshed from the catalog before pricing,
//! because it does not survive between invocations.

use serde::Serialize;
use tracing::{debug, info, warn};

use foodie_core::{Address, CheckoutSummary, KeyValueStore, Notice, Order};

use crate::error::AppResult;
use crate::state::AppState;

/// Priced cart plus whether an order can be placed now.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub summary: CheckoutSummary,
    pub can_place_order: bool,
    pub notices: Vec<Notice>,
}

/// A placed order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub order: Order,
    pub notices: Vec<Notice>,
}

/// Delivery details typed on the command line.
#[derive(Debug, Clone)]
pub struct PlaceOrderRequest {
    pub user_id: String,
    pub label: String,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

impl PlaceOrderRequest {
    fn address(&self) -> Address {
        Address {
            id: format!("{}-{}", self.user_id, self.label.to_lowercase()),
            user_id: self.user_id.clone(),
            label: self.label.clone(),
            address_line1: self.address_line1.clone(),
            address_line2: self.address_line2.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            pincode: self.pincode.clone(),
            is_default: false,
        }
    }
}

/// Prices the cart and checks the restaurant's minimum order.
pub fn checkout<S: KeyValueStore>(state: &mut AppState<S>) -> CheckoutResponse {
    debug!("checkout command");

    state.refresh_restaurant_status();
    let summary = state.session.checkout(&state.config.pricing());

    if let Some(minimum) = summary.minimum_order {
        state.session.validate_minimum_order(minimum);
    }

    CheckoutResponse {
        can_place_order: summary.can_place_order(),
        summary,
        notices: state.session.take_notices(),
    }
}

/// Places the order and empties the cart.
pub fn place_order<S: KeyValueStore>(
    state: &mut AppState<S>,
    request: &PlaceOrderRequest,
) -> AppResult<OrderResponse> {
    debug!(user_id = %request.user_id, "place_order command");

    state.refresh_restaurant_status();
    let pricing = state.config.pricing();
    let order = state
        .session
        .place_order(&pricing, &request.user_id, &request.address())?;

    info!(order_id = %order.id, total = %order.total_amount, "Order placed");

    // The order exists once placed; a failed write only loses `order show`.
    if let Err(e) = state.save_last_order(&order) {
        warn!(order_id = %order.id, error = %e, "Failed to keep last order");
    }

    Ok(OrderResponse {
        order,
        notices: state.session.take_notices(),
    })
}

/// Shows the last placed order.
pub fn show_order<S: KeyValueStore>(state: &mut AppState<S>) -> AppResult<OrderResponse> {
    debug!("show_order command");

    Ok(OrderResponse {
        order: state.last_order()?,
        notices: state.session.take_notices(),
    })
}

/// Moves the last order to its next status.
pub fn advance_order<S: KeyValueStore>(state: &mut AppState<S>) -> AppResult<OrderResponse> {
    debug!("advance_order command");

    let mut order = state.last_order()?;
    let status = order.advance()?;
    state.save_last_order(&order)?;
    info!(order_id = %order.id, %status, "Order advanced");

    Ok(OrderResponse {
        order,
        notices: state.session.take_notices(),
    })
}

/// Cancels the last order unless it already finished.
pub fn cancel_order<S: KeyValueStore>(state: &mut AppState<S>) -> AppResult<OrderResponse> {
    debug!("cancel_order command");

    let mut order = state.last_order()?;
    order.cancel()?;
    state.save_last_order(&order)?;
    info!(order_id = %order.id, "Order cancelled");

    Ok(OrderResponse {
        order,
        notices: state.session.take_notices(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::add_to_cart;
    use crate::error::ErrorCode;
    use crate::state::{Catalog, StorefrontConfig};
    use foodie_core::{MemoryStore, Money, OrderStatus, Rejection};

    fn state() -> AppState<MemoryStore> {
        AppState::with_store(
            StorefrontConfig::default(),
            Catalog::builtin(),
            MemoryStore::new(),
        )
    }

    fn request() -> PlaceOrderRequest {
        PlaceOrderRequest {
            user_id: "u1".to_string(),
            label: "Home".to_string(),
            address_line1: "12 MG Road".to_string(),
            address_line2: None,
            city: "Bengaluru".to_string(),
            state: "Karnataka".to_string(),
            pincode: "560001".to_string(),
        }
    }

    #[test]
    fn test_checkout_below_minimum() {
        let mut state = state();
        add_to_cart(&mut state, "m3").unwrap();

        let response = checkout(&mut state);

        assert!(!response.can_place_order);
        assert_eq!(response.summary.shortfall, Money::from_major(90));
        assert!(matches!(
            &response.notices[..],
            [Notice::Rejected {
                reason: Rejection::BelowMinimumOrder { .. }
            }]
        ));
    }

    #[test]
    fn test_checkout_totals() {
        let mut state = state();
        add_to_cart(&mut state, "m1").unwrap();

        let response = checkout(&mut state);

        assert!(response.can_place_order);
        assert!(response.notices.is_empty());
        assert_eq!(response.summary.subtotal, Money::from_major(320));
        assert_eq!(response.summary.delivery_fee, Money::from_major(40));
        assert_eq!(response.summary.tax, Money::from_minor(2560));
        assert_eq!(response.summary.total, Money::from_minor(32000 + 4000 + 2560));
    }

    #[test]
    fn test_place_order_empties_cart() {
        let mut state = state();
        add_to_cart(&mut state, "m4").unwrap();

        let response = place_order(&mut state, &request()).unwrap();

        assert_eq!(response.order.status, OrderStatus::Placed);
        assert_eq!(response.order.restaurant_name, "The Spice Garden");
        assert!(state.session.cart().is_empty());
        assert!(matches!(&response.notices[..], [Notice::OrderPlaced { .. }]));
    }

    #[test]
    fn test_place_order_on_empty_cart_fails() {
        let mut state = state();
        let err = place_order(&mut state, &request()).unwrap_err();

        assert_eq!(err.code, ErrorCode::CheckoutError);
    }

    #[test]
    fn test_place_order_with_bad_pincode_keeps_cart() {
        let mut state = state();
        add_to_cart(&mut state, "m4").unwrap();
        let mut request = request();
        request.pincode = "12".to_string();

        let err = place_order(&mut state, &request).unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(state.session.total_items(), 1);
    }

    #[test]
    fn test_placed_order_moves_through_lifecycle() {
        let mut state = state();
        add_to_cart(&mut state, "m4").unwrap();
        let placed = place_order(&mut state, &request()).unwrap().order;

        let shown = show_order(&mut state).unwrap().order;
        assert_eq!(shown, placed);

        for expected in [
            OrderStatus::Confirmed,
            OrderStatus::Preparing,
            OrderStatus::OutForDelivery,
            OrderStatus::Delivered,
        ] {
            assert_eq!(advance_order(&mut state).unwrap().order.status, expected);
        }
        assert_eq!(show_order(&mut state).unwrap().order.status, OrderStatus::Delivered);

        let err = cancel_order(&mut state).unwrap_err();
        assert_eq!(err.code, ErrorCode::BusinessLogic);
        let err = advance_order(&mut state).unwrap_err();
        assert_eq!(err.code, ErrorCode::BusinessLogic);
    }

    #[test]
    fn test_cancel_then_advance_is_refused() {
        let mut state = state();
        add_to_cart(&mut state, "m4").unwrap();
        place_order(&mut state, &request()).unwrap();

        let cancelled = cancel_order(&mut state).unwrap().order;
        assert_eq!(cancelled.status, OrderStatus::Cancelled);

        let err = advance_order(&mut state).unwrap_err();
        assert_eq!(err.code, ErrorCode::BusinessLogic);
        assert_eq!(show_order(&mut state).unwrap().order.status, OrderStatus::Cancelled);
    }

    #[test]
    fn test_no_order_yet_is_not_found() {
        let mut state = state();

        assert_eq!(show_order(&mut state).unwrap_err().code, ErrorCode::NotFound);
        assert_eq!(advance_order(&mut state).unwrap_err().code, ErrorCode::NotFound);
    }

    #[test]
    fn test_unreadable_order_is_a_storage_error() {
        let mut slots = MemoryStore::new();
        slots.set(crate::state::LAST_ORDER_KEY, "{not json").unwrap();
        let mut state =
            AppState::with_store(StorefrontConfig::default(), Catalog::builtin(), slots);

        let err = show_order(&mut state).unwrap_err();

        assert_eq!(err.code, ErrorCode::StorageError);
    }
}
