//! # Storefront Commands
//!
//! One function per CLI subcommand. Commands take the [`AppState`] and
//! return a serializable response; printing happens in `render`.
//!
//! [`AppState`]: crate::state::AppState

pub mod cart;
pub mod catalog;
pub mod order;

use serde::Serialize;

use foodie_core::Restaurant;

pub use cart::CartResponse;
pub use catalog::MenuResponse;
pub use order::{CheckoutResponse, OrderResponse, PlaceOrderRequest};

/// What a command produced.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Output {
    Restaurants(Vec<Restaurant>),
    Menu(MenuResponse),
    Cart(CartResponse),
    Checkout(CheckoutResponse),
    Order(OrderResponse),
}
