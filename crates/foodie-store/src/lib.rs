//! # foodie-store: Durable Storage for the Foodie Storefront
//!
//! Implements the [`KeyValueStore`](foodie_core::KeyValueStore) port from
//! foodie-core on the local file system, so a cart survives between CLI runs.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Foodie Storage Flow                               │
//! │                                                                         │
//! │  CartSession::add_item                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CartStore::save  ──── serializes { ...cart, timestamp }                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  foodie-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   FileStore::set("foodie-cart", json)                           │   │
//! │  │        └── write foodie-cart.json.tmp, rename over              │   │
//! │  │            foodie-cart.json                                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ~/.local/share/foodie/foodie-cart.json                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use foodie_core::{CartSession, CartStore};
//! use foodie_store::FileStore;
//!
//! let slots = FileStore::open("/tmp/foodie").unwrap();
//! let session = CartSession::open(CartStore::new(slots));
//! println!("{} items", session.total_items());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod file;

// =============================================================================
// Re-exports
// =============================================================================

pub use file::FileStore;
