//! # Storefront State
//!
//! Everything a command needs, built once per invocation.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────────┐   │
//! │  │ StorefrontConfig │ │    Catalog       │ │ CartSession          │   │
//! │  │                  │ │                  │ │   <FileStore>        │   │
//! │  │  • data dir      │ │  • restaurants   │ │  • current cart      │   │
//! │  │  • pricing       │ │  • menu items    │ │  • notices           │   │
//! │  │  • expiry        │ │                  │ │  • status snapshot   │   │
//! │  └──────────────────┘ └──────────────────┘ └──────────────────────┘   │
//! │                                                                         │
//! │  orders slot: the last placed order, kept next to the cart file        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod catalog;
mod config;

pub use catalog::Catalog;
pub use config::StorefrontConfig;

use foodie_core::{CartSession, CartStore, CoreError, KeyValueStore, Order};
use foodie_store::FileStore;
use tracing::debug;

use crate::error::{AppError, AppResult};

/// Storage key of the most recently placed order.
pub const LAST_ORDER_KEY: &str = "foodie-last-order";

/// Config, catalog, and the open cart session.
#[derive(Debug)]
pub struct AppState<S> {
    pub config: StorefrontConfig,
    pub catalog: Catalog,
    pub session: CartSession<S>,
    orders: S,
}

impl AppState<FileStore> {
    /// Opens the cart stored in the configured data directory.
    pub fn open(config: StorefrontConfig) -> AppResult<Self> {
        let data_dir = config.resolved_data_dir()?;
        debug!(?data_dir, "Opening cart store");

        let slots = FileStore::open(data_dir)?;
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::from_file(path)?,
            None => Catalog::builtin(),
        };

        Ok(AppState::with_store(config, catalog, slots))
    }
}

impl<S: KeyValueStore + Clone> AppState<S> {
    /// Builds state over any storage slot.
    pub fn with_store(config: StorefrontConfig, catalog: Catalog, slots: S) -> Self {
        let orders = slots.clone();
        let store = CartStore::new(slots)
            .with_key(config.storage_key.clone())
            .with_expiry(config.cart_expiry());

        AppState {
            config,
            catalog,
            session: CartSession::open(store),
            orders,
        }
    }
}

impl<S: KeyValueStore> AppState<S> {
    /// Reads the last placed order.
    pub fn last_order(&self) -> AppResult<Order> {
        let raw = self
            .orders
            .get(LAST_ORDER_KEY)?
            .ok_or_else(|| AppError::not_found("Order", "no order has been placed"))?;

        let order: Order = serde_json::from_str(&raw)
            .map_err(|e| CoreError::CorruptSnapshot(format!("{}: {}", LAST_ORDER_KEY, e)))?;
        Ok(order)
    }

    /// Replaces the last placed order.
    pub fn save_last_order(&mut self, order: &Order) -> AppResult<()> {
        let json = serde_json::to_string(order)?;
        self.orders.set(LAST_ORDER_KEY, &json)?;
        debug!(order_id = %order.id, status = %order.status, "Saved last order");
        Ok(())
    }

    /// Re-supplies the catalog snapshot of the cart's restaurant.
    ///
    /// The restaurant status is not persisted with the cart, so commands
    /// that read it refresh it first.
    pub fn refresh_restaurant_status(&mut self) {
        let restaurant = self
            .session
            .cart()
            .restaurant_id()
            .and_then(|id| self.catalog.restaurant(id));

        if let Some(restaurant) = restaurant {
            self.session.refresh_restaurant_status(restaurant);
        }
    }
}
