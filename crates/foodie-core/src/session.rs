//! # Cart Session
//!
//! The cart facade: the only way consumers change the cart.
//!
//! A `CartSession` lives for one user session and is passed explicitly to
//! whatever needs cart access. It owns the canonical [`Cart`], the cached
//! restaurant snapshot, and the queue of notices waiting to be shown.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Session Operations                              │
//! │                                                                         │
//! │  Consumer Action          Session Method          Cart State Change     │
//! │  ───────────────          ──────────────          ─────────────────     │
//! │                                                                         │
//! │  Tap "Add" ──────────────► add_item() ──policy──► put line / qty + 1   │
//! │                                                                         │
//! │  Change quantity ────────► update_quantity() ───► qty = n (≤0 removes) │
//! │                                                                         │
//! │  Tap remove ─────────────► remove_item() ───────► drop line            │
//! │                                                                         │
//! │  Tap clear ──────────────► clear_cart() ────────► canonical empty      │
//! │                                                                         │
//! │  Every change ───────────► CartStore::save() (best-effort)             │
//! │  Every message ──────────► notices queue ──► take_notices()            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## State Machine
//! ```text
//!            add_item (admitted)
//!   ┌───────┐ ───────────────────► ┌────────┐ ◄─┐ add / update keeping ≥1 line
//!   │ Empty │                      │ Active │ ──┘
//!   └───────┘ ◄─────────────────── └────────┘
//!       remove/update to zero lines, clear_cart
//! ```
//!
//! ## Restaurant Status Cache
//! The snapshot passed to `add_item` is cached, even when the add is
//! rejected, and is never invalidated by other operations. After the cart
//! switches restaurants through a path that did not pass a snapshot,
//! `is_restaurant_closed` may describe the previous restaurant. Consumers
//! that care call [`CartSession::refresh_restaurant_status`] first.

use tracing::debug;

use crate::cart::{Cart, CartTotals, LineChange};
use crate::checkout::{CheckoutPricing, CheckoutSummary, Order};
use crate::error::CheckoutError;
use crate::money::Money;
use crate::notice::{Notice, Outcome};
use crate::policy::{self, Rejection};
use crate::store::{CartStore, KeyValueStore, LoadOutcome};
use crate::types::{Address, MenuItem, Restaurant};

/// The cart facade for one user session.
///
/// ## Usage
/// ```rust
/// use foodie_core::{CartSession, CartStore, MemoryStore, MenuItem, Money, Notice};
///
/// let mut session = CartSession::open(CartStore::new(MemoryStore::new()));
/// let naan = MenuItem::new("m3", "1", "Garlic Naan", Money::from_major(60));
///
/// session.add_item(&naan, "1", "The Spice Garden", None);
/// session.update_quantity("m3", 3);
///
/// assert_eq!(session.total_items(), 3);
/// assert_eq!(
///     session.take_notices(),
///     vec![Notice::ItemAdded { item_name: "Garlic Naan".to_string() }]
/// );
/// ```
#[derive(Debug)]
pub struct CartSession<S> {
    store: CartStore<S>,
    cart: Cart,
    restaurant_status: Option<Restaurant>,
    notices: Vec<Notice>,
}

impl<S: KeyValueStore> CartSession<S> {
    /// Starts a session from whatever the store holds.
    ///
    /// An expired snapshot is replaced by the empty cart on disk too, and a
    /// [`Notice::CartExpired`] is queued.
    pub fn open(mut store: CartStore<S>) -> Self {
        let mut notices = Vec::new();

        let cart = match store.load() {
            LoadOutcome::Restored(cart) => cart,
            LoadOutcome::Expired { written_at } => {
                debug!(%written_at, "Discarding expired cart");
                notices.push(Notice::CartExpired);
                let empty = Cart::empty();
                store.save(&empty);
                empty
            }
            LoadOutcome::Missing | LoadOutcome::Unusable => Cart::empty(),
        };

        CartSession {
            store,
            cart,
            restaurant_status: None,
            notices,
        }
    }

    // =========================================================================
    // Read Access
    // =========================================================================

    /// The current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Exact sum of price × quantity.
    pub fn subtotal(&self) -> Money {
        self.cart.subtotal()
    }

    /// Sum of line quantities.
    pub fn total_items(&self) -> u64 {
        self.cart.total_items()
    }

    pub fn totals(&self) -> CartTotals {
        CartTotals::from(&self.cart)
    }

    /// The most recently supplied restaurant snapshot, if any.
    pub fn restaurant_status(&self) -> Option<&Restaurant> {
        self.restaurant_status.as_ref()
    }

    pub fn store(&self) -> &CartStore<S> {
        &self.store
    }

    /// Ends the session, handing back the store.
    pub fn into_store(self) -> CartStore<S> {
        self.store
    }

    // =========================================================================
    // Notices
    // =========================================================================

    /// Notices queued since the last call, oldest first.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Notices queued so far, without draining them.
    pub fn pending_notices(&self) -> &[Notice] {
        &self.notices
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds one of `menu_item` to the cart.
    ///
    /// ## Behavior
    /// - Closed restaurant (when `restaurant` is given) → rejected
    /// - Cart holds another restaurant's dishes → rejected
    /// - Dish already in cart → quantity + 1, no notice
    /// - New dish → appended with quantity 1, "added to cart" notice
    ///
    /// A supplied `restaurant` replaces the cached status whether or not the
    /// add is admitted.
    pub fn add_item(
        &mut self,
        menu_item: &MenuItem,
        restaurant_id: &str,
        restaurant_name: &str,
        restaurant: Option<&Restaurant>,
    ) -> Outcome {
        debug!(
            menu_item_id = %menu_item.id,
            restaurant_id = %restaurant_id,
            with_snapshot = restaurant.is_some(),
            "add_item"
        );

        let verdict = policy::check_add(&self.cart, restaurant_id, restaurant_name, restaurant);

        if let Some(restaurant) = restaurant {
            self.restaurant_status = Some(restaurant.clone());
        }

        if let Err(reason) = verdict {
            return self.reject(reason);
        }

        if self.cart.put(menu_item, restaurant_id, restaurant_name) == LineChange::Appended {
            self.notices.push(Notice::ItemAdded {
                item_name: menu_item.name.clone(),
            });
        }

        self.persist();
        Outcome::Applied
    }

    /// Removes the line for `menu_item_id`; absent lines are a no-op.
    pub fn remove_item(&mut self, menu_item_id: &str) -> Outcome {
        debug!(menu_item_id = %menu_item_id, "remove_item");

        if !self.cart.remove(menu_item_id) {
            return Outcome::Unchanged;
        }

        self.persist();
        Outcome::Applied
    }

    /// Sets a line's quantity. Zero or negative removes the line; a missing
    /// line is a silent no-op.
    pub fn update_quantity(&mut self, menu_item_id: &str, quantity: i64) -> Outcome {
        debug!(menu_item_id = %menu_item_id, quantity, "update_quantity");

        if quantity <= 0 {
            return self.remove_item(menu_item_id);
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if !self.cart.set_quantity(menu_item_id, quantity) {
            return Outcome::Unchanged;
        }

        self.persist();
        Outcome::Applied
    }

    /// Empties the cart unconditionally.
    pub fn clear_cart(&mut self) -> Outcome {
        debug!("clear_cart");

        self.cart.clear();
        self.notices.push(Notice::CartCleared);
        self.persist();
        Outcome::Applied
    }

    /// Replaces the cached restaurant snapshot without touching the cart.
    pub fn refresh_restaurant_status(&mut self, restaurant: &Restaurant) {
        debug!(restaurant_id = %restaurant.id, is_open = restaurant.is_open, "refresh_restaurant_status");
        self.restaurant_status = Some(restaurant.clone());
    }

    // =========================================================================
    // Standalone Policy Checks
    // =========================================================================

    /// True when the subtotal reaches `min_order`. Otherwise queues a notice
    /// stating the shortfall and returns false.
    pub fn validate_minimum_order(&mut self, min_order: Money) -> bool {
        match policy::check_minimum_order(self.subtotal(), min_order) {
            Ok(()) => true,
            Err(reason) => {
                self.reject(reason);
                false
            }
        }
    }

    /// True iff a cached restaurant snapshot exists and says closed.
    pub fn is_restaurant_closed(&self) -> bool {
        policy::is_closed(self.restaurant_status.as_ref())
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Prices the current cart.
    pub fn checkout(&self, pricing: &CheckoutPricing) -> CheckoutSummary {
        CheckoutSummary::for_cart(&self.cart, pricing, self.restaurant_status.as_ref())
    }

    /// Turns the cart into an order and empties the cart.
    ///
    /// On error the cart is left untouched.
    pub fn place_order(
        &mut self,
        pricing: &CheckoutPricing,
        user_id: &str,
        address: &Address,
    ) -> Result<Order, CheckoutError> {
        let summary = self.checkout(pricing);
        let order = Order::place(&self.cart, &summary, user_id, address, self.store.now())?;

        debug!(order_id = %order.id, total = %order.total_amount, "Order placed");

        self.cart.clear();
        self.persist();
        self.notices.push(Notice::OrderPlaced {
            order_id: order.id.clone(),
        });
        Ok(order)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn reject(&mut self, reason: Rejection) -> Outcome {
        debug!(reason = %reason, "Cart change rejected");
        self.notices.push(Notice::from(reason.clone()));
        Outcome::Rejected(reason)
    }

    fn persist(&mut self) {
        self.store.save(&self.cart);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
