//! # Cart
//!
//! The single-restaurant shopping cart and its lines.
//!
//! ## Invariants
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. items empty  ⇔  restaurant_id is None  ⇔  restaurant_name is None  │
//! │  2. every line.restaurant_id == cart.restaurant_id                      │
//! │  3. at most one line per menu_item.id                                   │
//! │  4. every line.quantity >= 1                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Mutators are crate-private: consumers go through
//! [`CartSession`](crate::session::CartSession), which runs the policy rules
//! first. Every mutator here preserves the invariants on its own, so the
//! session never has to repair a cart after the fact.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::MenuItem;

// =============================================================================
// Cart Line
// =============================================================================

/// One entry in the cart: a dish and how many of it.
///
/// The restaurant id/name are copied onto each line so a line can be shown on
/// its own (order history, receipts) without looking up the cart header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    pub menu_item: MenuItem,
    pub quantity: u32,
    pub restaurant_id: String,
    pub restaurant_name: String,
}

impl CartLine {
    fn new(menu_item: &MenuItem, restaurant_id: &str, restaurant_name: &str) -> Self {
        CartLine {
            menu_item: menu_item.clone(),
            quantity: 1,
            restaurant_id: restaurant_id.to_string(),
            restaurant_name: restaurant_name.to_string(),
        }
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.menu_item.price * self.quantity
    }
}

// =============================================================================
// Cart
// =============================================================================

/// What happened when a menu item was put into the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineChange {
    /// A new line with quantity 1 was appended.
    Appended,
    /// An existing line's quantity went up by one.
    Incremented,
}

/// The in-progress cart.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Cart {
    items: Vec<CartLine>,
    restaurant_id: Option<String>,
    restaurant_name: Option<String>,
}

impl Cart {
    /// The canonical empty cart.
    pub fn empty() -> Self {
        Cart::default()
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[CartLine] {
        &self.items
    }

    pub fn restaurant_id(&self) -> Option<&str> {
        self.restaurant_id.as_deref()
    }

    pub fn restaurant_name(&self) -> Option<&str> {
        self.restaurant_name.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Finds the line holding `menu_item_id`.
    pub fn line(&self, menu_item_id: &str) -> Option<&CartLine> {
        self.items.iter().find(|l| l.menu_item.id == menu_item_id)
    }

    /// Number of distinct dishes.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of all line quantities.
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Exact sum of price × quantity over all lines.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(CartLine::line_total).sum()
    }

    /// Checks every cart invariant.
    ///
    /// Used when a snapshot comes back from storage: anything that fails here
    /// is treated as corrupt data.
    pub fn validate(&self) -> CoreResult<()> {
        match (&self.restaurant_id, &self.restaurant_name, self.items.is_empty()) {
            (None, None, true) => return Ok(()),
            (Some(_), Some(_), false) => {}
            _ => {
                return Err(CoreError::CorruptSnapshot(
                    "restaurant fields disagree with item list".to_string(),
                ))
            }
        }

        for (i, line) in self.items.iter().enumerate() {
            if line.quantity == 0 {
                return Err(CoreError::CorruptSnapshot(format!(
                    "line {} has zero quantity",
                    line.menu_item.id
                )));
            }
            if self.restaurant_id.as_deref() != Some(line.restaurant_id.as_str()) {
                return Err(CoreError::CorruptSnapshot(format!(
                    "line {} belongs to restaurant {}",
                    line.menu_item.id, line.restaurant_id
                )));
            }
            if self.items[..i]
                .iter()
                .any(|earlier| earlier.menu_item.id == line.menu_item.id)
            {
                return Err(CoreError::CorruptSnapshot(format!(
                    "duplicate line for {}",
                    line.menu_item.id
                )));
            }
        }

        Ok(())
    }

    // =========================================================================
    // Mutators (crate-private; callers must have run the policy rules)
    // =========================================================================

    /// Bumps an existing line or appends a new one.
    ///
    /// The first line into an empty cart adopts the restaurant id/name.
    pub(crate) fn put(
        &mut self,
        menu_item: &MenuItem,
        restaurant_id: &str,
        restaurant_name: &str,
    ) -> LineChange {
        if let Some(line) = self
            .items
            .iter_mut()
            .find(|l| l.menu_item.id == menu_item.id)
        {
            line.quantity = line.quantity.saturating_add(1);
            return LineChange::Incremented;
        }

        if self.items.is_empty() {
            self.restaurant_id = Some(restaurant_id.to_string());
            self.restaurant_name = Some(restaurant_name.to_string());
        }

        // The line carries the cart's restaurant, which is the requested one
        // once the policy has admitted the add.
        self.items
            .push(CartLine::new(menu_item, restaurant_id, restaurant_name));
        LineChange::Appended
    }

    /// Removes the line for `menu_item_id`. Returns false if there was none.
    pub(crate) fn remove(&mut self, menu_item_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|l| l.menu_item.id != menu_item_id);

        if self.items.is_empty() {
            self.restaurant_id = None;
            self.restaurant_name = None;
        }

        self.items.len() != before
    }

    /// Sets a line's quantity. `quantity` must be at least 1.
    /// Returns false if the line does not exist.
    pub(crate) fn set_quantity(&mut self, menu_item_id: &str, quantity: u32) -> bool {
        debug_assert!(quantity >= 1, "zero quantity must go through remove");
        match self
            .items
            .iter_mut()
            .find(|l| l.menu_item.id == menu_item_id)
        {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    pub(crate) fn clear(&mut self) {
        *self = Cart::empty();
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Cart totals summary for consumers (badge counts, cart page).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    pub line_count: usize,
    pub total_items: u64,
    pub subtotal: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            total_items: cart.total_items(),
            subtotal: cart.subtotal(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
