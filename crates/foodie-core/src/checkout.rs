//! # Checkout
//!
//! Prices the cart and turns it into an [`Order`].
//!
//! ## Pricing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Order Summary                                                          │
//! │                                                                         │
//! │  Subtotal        Σ price × quantity                                     │
//! │  Delivery fee    flat fee, only when the cart has items                 │
//! │  Taxes (GST)     subtotal × rate, rounded half-up to the paisa          │
//! │  ──────────────                                                         │
//! │  Total           subtotal + delivery fee + taxes                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Order Lifecycle
//! ```text
//!   placed ──► confirmed ──► preparing ──► out_for_delivery ──► delivered
//!     │            │             │                │
//!     └────────────┴─────────────┴────────────────┴──────► cancelled
//! ```

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::{Cart, CartLine};
use crate::error::{CheckoutError, CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Address, Restaurant, TaxRate};
use crate::validation::validate_address;
use crate::{DEFAULT_DELIVERY_FEE_RUPEES, DEFAULT_DELIVERY_TIME_MINUTES, DEFAULT_TAX_RATE_BPS};

// =============================================================================
// Pricing
// =============================================================================

/// Charges applied on top of the cart subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckoutPricing {
    pub delivery_fee: Money,
    pub tax_rate: TaxRate,
    /// Promised delivery time, used for the order's estimate.
    pub delivery_minutes: i64,
}

impl Default for CheckoutPricing {
    fn default() -> Self {
        CheckoutPricing {
            delivery_fee: Money::from_major(DEFAULT_DELIVERY_FEE_RUPEES),
            tax_rate: TaxRate::from_bps(DEFAULT_TAX_RATE_BPS),
            delivery_minutes: DEFAULT_DELIVERY_TIME_MINUTES,
        }
    }
}

// =============================================================================
// Checkout Summary
// =============================================================================

/// The priced cart, as shown on the cart page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckoutSummary {
    pub item_count: u64,
    pub subtotal: Money,
    pub delivery_fee: Money,
    pub tax: Money,
    pub total: Money,
    /// Minimum order of the cart's restaurant, when its snapshot is known.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub minimum_order: Option<Money>,
    /// How much is missing to reach `minimum_order`; zero when reached.
    pub shortfall: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub restaurant_name: Option<String>,
    /// False only when the cart's restaurant is known to be closed.
    pub restaurant_open: bool,
    pub delivery_minutes: i64,
}

impl CheckoutSummary {
    /// Prices `cart`.
    ///
    /// `restaurant` contributes the minimum order and open state only when it
    /// describes the restaurant the cart belongs to.
    pub fn for_cart(cart: &Cart, pricing: &CheckoutPricing, restaurant: Option<&Restaurant>) -> Self {
        let subtotal = cart.subtotal();
        let delivery_fee = if cart.is_empty() {
            Money::zero()
        } else {
            pricing.delivery_fee
        };
        let tax = subtotal.calculate_tax(pricing.tax_rate);

        let restaurant = restaurant.filter(|r| cart.restaurant_id() == Some(r.id.as_str()));
        let minimum_order = restaurant.map(|r| r.min_order);
        let shortfall = minimum_order
            .map(|minimum| subtotal.shortfall_to(minimum))
            .unwrap_or_default();

        CheckoutSummary {
            item_count: cart.total_items(),
            subtotal,
            delivery_fee,
            tax,
            total: subtotal + delivery_fee + tax,
            minimum_order,
            shortfall,
            restaurant_name: cart.restaurant_name().map(str::to_string),
            restaurant_open: restaurant.map_or(true, |r| r.is_open),
            delivery_minutes: pricing.delivery_minutes,
        }
    }

    /// The first reason this summary cannot become an order, if any.
    pub fn blocker(&self) -> Option<CheckoutError> {
        if self.item_count == 0 {
            return Some(CheckoutError::EmptyCart);
        }

        if !self.restaurant_open {
            return Some(CheckoutError::RestaurantClosed {
                restaurant_name: self.restaurant_name.clone().unwrap_or_default(),
            });
        }

        match self.minimum_order {
            Some(minimum) if self.shortfall.is_positive() => Some(CheckoutError::BelowMinimumOrder {
                minimum,
                shortfall: self.shortfall,
            }),
            _ => None,
        }
    }

    pub fn can_place_order(&self) -> bool {
        self.blocker().is_none()
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// Where an order is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum OrderStatus {
    #[default]
    Placed,
    Confirmed,
    Preparing,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// The status that follows this one on the happy path.
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Placed => Some(OrderStatus::Confirmed),
            OrderStatus::Confirmed => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::OutForDelivery),
            OrderStatus::OutForDelivery => Some(OrderStatus::Delivered),
            OrderStatus::Delivered | OrderStatus::Cancelled => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Placed => "placed",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::OutForDelivery => "out_for_delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment state of an order. Payment itself happens elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
}

// =============================================================================
// Order
// =============================================================================

/// A placed order. Lines are frozen copies of the cart at placement time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub restaurant_id: String,
    pub restaurant_name: String,
    pub items: Vec<CartLine>,
    pub subtotal: Money,
    pub delivery_fee: Money,
    pub tax: Money,
    pub total_amount: Money,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub delivery_address: Address,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub estimated_delivery: DateTime<Utc>,
}

impl Order {
    /// Builds an order from the cart and its summary.
    ///
    /// ## Errors
    /// - The summary has a [`blocker`](CheckoutSummary::blocker)
    /// - The delivery address fails validation
    /// - `delivery_minutes` is negative or pushes the estimate out of range
    pub fn place(
        cart: &Cart,
        summary: &CheckoutSummary,
        user_id: &str,
        address: &Address,
        now: DateTime<Utc>,
    ) -> Result<Order, CheckoutError> {
        if let Some(blocker) = summary.blocker() {
            return Err(blocker);
        }
        validate_address(address)?;

        // A non-empty cart always carries its restaurant.
        let (restaurant_id, restaurant_name) = match (cart.restaurant_id(), cart.restaurant_name()) {
            (Some(id), Some(name)) => (id.to_string(), name.to_string()),
            _ => return Err(CheckoutError::EmptyCart),
        };

        let minutes = summary.delivery_minutes;
        let estimated_delivery = Duration::try_minutes(minutes)
            .filter(|_| minutes >= 0)
            .and_then(|eta| now.checked_add_signed(eta))
            .ok_or(CheckoutError::DeliveryTimeOutOfRange { minutes })?;

        Ok(Order {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            restaurant_id,
            restaurant_name,
            items: cart.items().to_vec(),
            subtotal: summary.subtotal,
            delivery_fee: summary.delivery_fee,
            tax: summary.tax,
            total_amount: summary.total,
            status: OrderStatus::Placed,
            payment_status: PaymentStatus::Pending,
            delivery_address: address.clone(),
            created_at: now,
            estimated_delivery,
        })
    }

    /// Moves the order one step along the happy path.
    pub fn advance(&mut self) -> CoreResult<OrderStatus> {
        let next = self
            .status
            .next()
            .ok_or_else(|| self.invalid_transition("next status"))?;
        self.status = next;
        Ok(next)
    }

    /// Cancels the order unless it has already finished.
    pub fn cancel(&mut self) -> CoreResult<()> {
        if self.status.is_terminal() {
            return Err(self.invalid_transition(OrderStatus::Cancelled.as_str()));
        }
        self.status = OrderStatus::Cancelled;
        Ok(())
    }

    fn invalid_transition(&self, to: &str) -> CoreError {
        CoreError::InvalidOrderTransition {
            order_id: self.id.clone(),
            from: self.status.to_string(),
            to: to.to_string(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
