//! # Domain Types
//!
//! Catalog records the cart consumes. They come from the external catalog
//! (the document store) and are treated as read-only inputs here.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   Restaurant    │   │    MenuItem     │   │    Address      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  restaurant_id  │   │  label          │       │
//! │  │  name           │   │  name           │   │  address_line1  │       │
//! │  │  is_open        │   │  price (Money)  │   │  city / state   │       │
//! │  │  min_order      │   │  is_veg         │   │  pincode        │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐                                                   │
//! │  │    TaxRate      │  bps (u32), 800 = 8% GST                          │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All records serialize with camelCase field names so they match the
//! document-store shape and the persisted cart snapshot.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 800 bps = 8% (GST on food delivery).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

// =============================================================================
// Restaurant
// =============================================================================

/// A restaurant as listed by the catalog.
///
/// The cart only reads `id`, `name`, `is_open` and `min_order`; the rest is
/// carried so the same record can be rendered by consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub image: String,
    pub cuisine: Vec<String>,
    pub rating: f32,
    pub review_count: u32,
    /// Human-readable estimate such as "25-35 min".
    pub delivery_time: String,
    pub delivery_fee: Money,
    /// Smallest subtotal this restaurant accepts.
    pub min_order: Money,
    pub is_open: bool,
    pub distance: String,
    #[serde(default)]
    pub featured: bool,
}

impl Restaurant {
    /// Creates a restaurant with the fields the cart cares about; display
    /// fields start empty.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        min_order: Money,
        is_open: bool,
    ) -> Self {
        Restaurant {
            id: id.into(),
            name: name.into(),
            image: String::new(),
            cuisine: Vec::new(),
            rating: 0.0,
            review_count: 0,
            delivery_time: String::new(),
            delivery_fee: Money::zero(),
            min_order,
            is_open,
            distance: String::new(),
            featured: false,
        }
    }
}

// =============================================================================
// Menu Item
// =============================================================================

/// A dish on a restaurant's menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MenuItem {
    pub id: String,
    /// Restaurant that serves this dish.
    pub restaurant_id: String,
    pub name: String,
    pub description: String,
    /// Unit price, never negative.
    pub price: Money,
    pub image: String,
    pub category: String,
    /// Vegetarian (`true`) or non-vegetarian (`false`).
    pub is_veg: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub is_popular: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub is_best_seller: Option<bool>,
}

impl MenuItem {
    /// Creates a menu item with the fields the cart cares about.
    pub fn new(
        id: impl Into<String>,
        restaurant_id: impl Into<String>,
        name: impl Into<String>,
        price: Money,
    ) -> Self {
        MenuItem {
            id: id.into(),
            restaurant_id: restaurant_id.into(),
            name: name.into(),
            description: String::new(),
            price,
            image: String::new(),
            category: String::new(),
            is_veg: false,
            is_popular: None,
            is_best_seller: None,
        }
    }

    #[inline]
    pub fn is_popular(&self) -> bool {
        self.is_popular.unwrap_or(false)
    }

    #[inline]
    pub fn is_best_seller(&self) -> bool {
        self.is_best_seller.unwrap_or(false)
    }
}

// =============================================================================
// Address
// =============================================================================

/// A delivery address captured at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Address {
    pub id: String,
    pub user_id: String,
    /// Short name such as "Home" or "Office".
    pub label: String,
    pub address_line1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    /// Six-digit Indian postal code.
    pub pincode: String,
    #[serde(default)]
    pub is_default: bool,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(800);
        assert_eq!(rate.bps(), 800);
        assert!((rate.percentage() - 8.0).abs() < 0.001);
    }

    #[test]
    fn test_menu_item_reads_document_shape() {
        let json = r#"{
            "id": "m1",
            "restaurantId": "1",
            "name": "Butter Chicken",
            "description": "Creamy tomato curry",
            "price": 32000,
            "image": "butter-chicken.jpg",
            "category": "Main Course",
            "isVeg": false,
            "isBestSeller": true
        }"#;

        let item: MenuItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.restaurant_id, "1");
        assert_eq!(item.price, Money::from_major(320));
        assert!(item.is_best_seller());
        assert!(!item.is_popular());
    }

    #[test]
    fn test_restaurant_featured_defaults_to_false() {
        let json = r#"{
            "id": "6",
            "name": "Mediterranean Delights",
            "image": "",
            "cuisine": ["Mediterranean"],
            "rating": 4.2,
            "reviewCount": 890,
            "deliveryTime": "35-45 min",
            "deliveryFee": 4500,
            "minOrder": 20000,
            "isOpen": false,
            "distance": "3.0 km"
        }"#;

        let restaurant: Restaurant = serde_json::from_str(json).unwrap();
        assert!(!restaurant.featured);
        assert!(!restaurant.is_open);
        assert_eq!(restaurant.min_order, Money::from_major(200));
    }
}
