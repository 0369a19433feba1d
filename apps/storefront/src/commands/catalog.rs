//! # Catalog Commands
//!
//! Browsing restaurants and menus before adding to the cart.

use serde::Serialize;
use tracing::debug;

use foodie_core::{KeyValueStore, MenuItem, Restaurant};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// A restaurant and its menu.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuResponse {
    pub restaurant: Restaurant,
    pub items: Vec<MenuItem>,
}

/// Lists all restaurants, open ones first.
pub fn list_restaurants<S: KeyValueStore>(state: &AppState<S>) -> Vec<Restaurant> {
    debug!("list_restaurants command");

    let mut restaurants = state.catalog.restaurants.clone();
    restaurants.sort_by_key(|r| !r.is_open);
    restaurants
}

/// Shows one restaurant's menu.
pub fn get_menu<S: KeyValueStore>(state: &AppState<S>, restaurant_id: &str) -> AppResult<MenuResponse> {
    debug!(restaurant_id = %restaurant_id, "get_menu command");

    let restaurant = state
        .catalog
        .restaurant(restaurant_id)
        .ok_or_else(|| AppError::not_found("Restaurant", restaurant_id))?;

    Ok(MenuResponse {
        restaurant: restaurant.clone(),
        items: state.catalog.menu_for(restaurant_id).cloned().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Catalog, StorefrontConfig};
    use foodie_core::MemoryStore;

    fn state() -> AppState<MemoryStore> {
        AppState::with_store(
            StorefrontConfig::default(),
            Catalog::builtin(),
            MemoryStore::new(),
        )
    }

    #[test]
    fn test_closed_restaurants_listed_last() {
        let restaurants = list_restaurants(&state());

        assert_eq!(restaurants.len(), 6);
        assert_eq!(restaurants[0].name, "The Spice Garden");
        assert_eq!(restaurants[5].name, "Mediterranean Delights");
    }

    #[test]
    fn test_menu() {
        let menu = get_menu(&state(), "2").unwrap();

        assert_eq!(menu.restaurant.name, "Burger Barn");
        assert_eq!(menu.items.len(), 3);
        assert!(get_menu(&state(), "99").is_err());
    }
}
