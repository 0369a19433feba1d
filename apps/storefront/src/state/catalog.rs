//! # Catalog
//!
//! Restaurants and menus the CLI can put in the cart.
//!
//! The built-in catalog is the storefront's demo data. A JSON file with the
//! same shape (`{ "restaurants": [...], "menuItems": [...] }`, prices in
//! paise) can replace it via `catalog_path`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use foodie_core::validation::validate_menu_item;
use foodie_core::{MenuItem, Money, Restaurant};

use crate::error::{AppError, AppResult};

/// (id, name, cuisines, rating, reviews, delivery time, fee ₹, min order ₹, open, distance, featured)
type RestaurantRow = (
    &'static str,
    &'static str,
    &'static [&'static str],
    f32,
    u32,
    &'static str,
    i64,
    i64,
    bool,
    &'static str,
    bool,
);

const RESTAURANTS: &[RestaurantRow] = &[
    ("1", "The Spice Garden", &["Indian", "North Indian", "Mughlai"], 4.5, 2340, "25-35 min", 40, 150, true, "1.2 km", true),
    ("2", "Burger Barn", &["American", "Burgers", "Fast Food"], 4.3, 1856, "15-25 min", 30, 100, true, "0.8 km", true),
    ("3", "Sushi Master", &["Japanese", "Sushi", "Asian"], 4.7, 3201, "30-40 min", 50, 250, true, "2.1 km", false),
    ("4", "Pizza Paradise", &["Italian", "Pizza", "Pasta"], 4.4, 4521, "20-30 min", 35, 120, true, "1.5 km", true),
    ("5", "Thai Orchid", &["Thai", "Asian", "Curry"], 4.6, 1923, "25-35 min", 40, 180, true, "1.8 km", false),
    ("6", "Mediterranean Delights", &["Mediterranean", "Greek", "Healthy"], 4.5, 1567, "30-40 min", 40, 200, false, "2.5 km", false),
];

/// (id, restaurant id, name, description, price ₹, category, veg, popular, best seller)
type MenuRow = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    i64,
    &'static str,
    bool,
    bool,
    bool,
);

const MENU_ITEMS: &[MenuRow] = &[
    ("m1", "1", "Butter Chicken", "Tender chicken in creamy tomato-based curry with aromatic spices", 320, "Main Course", false, false, true),
    ("m2", "1", "Paneer Tikka Masala", "Grilled cottage cheese cubes in rich, spiced gravy", 280, "Main Course", true, true, false),
    ("m3", "1", "Garlic Naan", "Freshly baked flatbread with garlic and butter", 60, "Breads", true, false, false),
    ("m4", "1", "Biryani", "Fragrant basmati rice with tender meat and aromatic spices", 380, "Rice", false, false, true),
    ("m5", "2", "Classic Smash Burger", "Double patty with American cheese, lettuce, tomato, and special sauce", 250, "Burgers", false, false, true),
    ("m6", "2", "Crispy Chicken Burger", "Crispy fried chicken with coleslaw and mayo", 220, "Burgers", false, true, false),
    ("m7", "2", "Loaded Fries", "Crispy fries topped with cheese, bacon, and jalapeños", 150, "Sides", false, false, false),
    ("m8", "4", "Margherita Pizza", "Fresh mozzarella, tomato sauce, and basil on thin crust", 280, "Pizza", true, true, false),
    ("m9", "4", "Pepperoni Supreme", "Loaded with pepperoni, mozzarella, and Italian herbs", 350, "Pizza", false, false, true),
    ("m10", "4", "Garlic Breadsticks", "Warm breadsticks with garlic butter and parmesan", 120, "Sides", true, false, false),
    ("m11", "6", "Falafel Wrap", "Crispy falafel, hummus and pickled vegetables in warm pita", 180, "Wraps", true, true, false),
    ("m12", "6", "Greek Salad", "Tomato, cucumber, olives and feta with oregano dressing", 220, "Salads", true, false, false),
];

/// Restaurants and their menus.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub restaurants: Vec<Restaurant>,
    pub menu_items: Vec<MenuItem>,
}

impl Catalog {
    /// The built-in demo catalog.
    pub fn builtin() -> Self {
        let restaurants = RESTAURANTS
            .iter()
            .map(
                |&(id, name, cuisine, rating, review_count, delivery_time, fee, min, is_open, distance, featured)| {
                    Restaurant {
                        id: id.to_string(),
                        name: name.to_string(),
                        image: String::new(),
                        cuisine: cuisine.iter().map(|c| c.to_string()).collect(),
                        rating,
                        review_count,
                        delivery_time: delivery_time.to_string(),
                        delivery_fee: Money::from_major(fee),
                        min_order: Money::from_major(min),
                        is_open,
                        distance: distance.to_string(),
                        featured,
                    }
                },
            )
            .collect();

        let menu_items = MENU_ITEMS
            .iter()
            .map(
                |&(id, restaurant_id, name, description, price, category, is_veg, popular, best_seller)| {
                    MenuItem {
                        id: id.to_string(),
                        restaurant_id: restaurant_id.to_string(),
                        name: name.to_string(),
                        description: description.to_string(),
                        price: Money::from_major(price),
                        image: String::new(),
                        category: category.to_string(),
                        is_veg,
                        is_popular: popular.then_some(true),
                        is_best_seller: best_seller.then_some(true),
                    }
                },
            )
            .collect();

        Catalog {
            restaurants,
            menu_items,
        }
    }

    /// Reads a catalog file, validating every menu item.
    pub fn from_file(path: &Path) -> AppResult<Self> {
        info!(?path, "Loading catalog from file");

        let contents = std::fs::read_to_string(path)
            .map_err(|e| AppError::config(format!("Cannot read {}: {}", path.display(), e)))?;
        let catalog: Catalog = serde_json::from_str(&contents)
            .map_err(|e| AppError::config(format!("Invalid catalog {}: {}", path.display(), e)))?;

        for item in &catalog.menu_items {
            validate_menu_item(item)
                .map_err(|e| AppError::validation(format!("Menu item '{}': {}", item.id, e)))?;
            if catalog.restaurant(&item.restaurant_id).is_none() {
                return Err(AppError::validation(format!(
                    "Menu item '{}' refers to unknown restaurant '{}'",
                    item.id, item.restaurant_id
                )));
            }
        }

        Ok(catalog)
    }

    pub fn restaurant(&self, id: &str) -> Option<&Restaurant> {
        self.restaurants.iter().find(|r| r.id == id)
    }

    pub fn menu_item(&self, id: &str) -> Option<&MenuItem> {
        self.menu_items.iter().find(|m| m.id == id)
    }

    /// Menu of one restaurant, in catalog order.
    pub fn menu_for<'a>(&'a self, restaurant_id: &'a str) -> impl Iterator<Item = &'a MenuItem> + 'a {
        self.menu_items
            .iter()
            .filter(move |m| m.restaurant_id == restaurant_id)
    }
}
