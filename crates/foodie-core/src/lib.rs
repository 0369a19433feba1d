//! # foodie-core: Pure Cart Logic for the Foodie Storefront
//!
//! This crate is the **heart** of the storefront. It owns the single-restaurant
//! shopping cart: its invariants, the rules that admit or reject a change, the
//! snapshot that survives between visits, and the totals shown at checkout.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Foodie Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                Consumers (web views, CLI)                       │   │
//! │  │    Menu ──► Add to cart ──► Cart page ──► Checkout              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ &mut CartSession                       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ foodie-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  session  │─►│  policy   │  │   cart    │  │ checkout  │  │   │
//! │  │   │  (facade) │─►│  rules    │  │ Cart/Line │  │ Order     │  │   │
//! │  │   └─────┬─────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │         ▼                                                       │   │
//! │  │   ┌───────────┐                                                 │   │
//! │  │   │   store   │  load/save + expiry over a KeyValueStore port   │   │
//! │  │   └─────┬─────┘                                                 │   │
//! │  └─────────┼───────────────────────────────────────────────────────┘   │
//! │            ▼                                                            │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │      foodie-store (file slots) / MemoryStore (tests)            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog records (Restaurant, MenuItem, Address)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Cart and CartLine with their invariants
//! - [`policy`] - Rules deciding whether a cart change is admitted
//! - [`notice`] - Notifications and operation outcomes for consumers
//! - [`store`] - Persisted snapshot, expiry, storage port
//! - [`session`] - The cart facade consumers talk to
//! - [`checkout`] - Order summary and order placement
//! - [`validation`] - Input validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use foodie_core::{CartSession, CartStore, MemoryStore, MenuItem, Money, Outcome};
//!
//! let mut session = CartSession::open(CartStore::new(MemoryStore::new()));
//!
//! let item = MenuItem::new("m1", "r1", "Butter Chicken", Money::from_major(320));
//! let outcome = session.add_item(&item, "r1", "The Spice Garden", None);
//!
//! assert_eq!(outcome, Outcome::Applied);
//! assert_eq!(session.subtotal(), Money::from_major(320));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod checkout;
pub mod error;
pub mod money;
pub mod notice;
pub mod policy;
pub mod session;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine, CartTotals};
pub use checkout::{CheckoutPricing, CheckoutSummary, Order, OrderStatus, PaymentStatus};
pub use error::{CheckoutError, CoreError, StorageError, ValidationError};
pub use money::Money;
pub use notice::{Notice, NoticeLevel, Outcome};
pub use policy::Rejection;
pub use session::CartSession;
pub use store::{
    CartStore, Clock, KeyValueStore, LoadOutcome, ManualClock, MemoryStore, PersistedCart,
    SystemClock,
};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage key under which the cart snapshot is persisted.
pub const CART_STORAGE_KEY: &str = "foodie-cart";

/// Maximum age of a persisted cart before it is discarded on load.
pub const CART_EXPIRY_HOURS: i64 = 24;

/// Delivery fee charged on every non-empty order, in rupees.
pub const DEFAULT_DELIVERY_FEE_RUPEES: i64 = 40;

/// GST applied to the order subtotal, in basis points (800 = 8%).
pub const DEFAULT_TAX_RATE_BPS: u32 = 800;

/// Promised delivery time used for the order's estimate.
pub const DEFAULT_DELIVERY_TIME_MINUTES: i64 = 45;
