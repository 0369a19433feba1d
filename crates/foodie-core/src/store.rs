//! # Cart Store
//!
//! Persists the cart snapshot through a pluggable key-value port and drops
//! snapshots that outlive the expiry window.
//!
//! ## Load / Save Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store                                           │
//! │                                                                         │
//! │  load()                                  save(cart)                     │
//! │    │                                       │                            │
//! │    ▼                                       ▼                            │
//! │  slot.get(key)                           stamp timestamp = clock.now()  │
//! │    ├── None ─────────► Missing            │                            │
//! │    ├── Err ──────────► Unusable (warn)    ▼                            │
//! │    ▼                                     serde_json::to_string          │
//! │  parse + Cart::validate                   │                            │
//! │    ├── bad ──────────► Unusable (warn)    ▼                            │
//! │    ▼                                     slot.set(key, json)            │
//! │  now - timestamp > expiry?                ├── Err → warn!, dropped     │
//! │    ├── yes ──────────► Expired (info)     ▼                            │
//! │    ▼                                     done (never an error)          │
//! │  Restored(cart)                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Format
//! ```json
//! {
//!   "items": [{ "menuItem": {...}, "quantity": 2,
//!               "restaurantId": "1", "restaurantName": "The Spice Garden" }],
//!   "restaurantId": "1",
//!   "restaurantName": "The Spice Garden",
//!   "timestamp": 1760000000000
//! }
//! ```
//! `timestamp` is epoch milliseconds of the last write.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};
use ts_rs::TS;

use crate::cart::Cart;
use crate::error::{StorageError, StorageResult};
use crate::{CART_EXPIRY_HOURS, CART_STORAGE_KEY};

// =============================================================================
// Storage Port
// =============================================================================

/// A durable string slot keyed by name.
///
/// Browser `localStorage`, a file per key, or an embedded key-value database
/// can all sit behind this trait. Writes replace the whole value.
pub trait KeyValueStore {
    /// Reads the value stored under `key`, `None` if nothing is there.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replaces the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }
}

/// In-process store, the equivalent of a browser's `localStorage`.
///
/// An optional byte quota makes writes fail the way a full browser store does.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// A store that refuses writes once the total stored bytes would exceed
    /// `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        MemoryStore {
            slots: HashMap::new(),
            quota_bytes: Some(quota_bytes),
        }
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.slots
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        if let Some(quota) = self.quota_bytes {
            if self.used_bytes_without(key) + key.len() + value.len() > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                });
            }
        }

        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// =============================================================================
// Clock
// =============================================================================

/// Source of "now" for timestamps and expiry.
pub trait Clock: fmt::Debug + Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to. Clones share the same time.
///
/// ## Usage
/// ```rust
/// use chrono::Duration;
/// use foodie_core::{Clock, ManualClock};
///
/// let clock = ManualClock::starting_at(chrono::Utc::now());
/// let handle = clock.clone();
/// let before = clock.now();
/// handle.advance(Duration::hours(25));
/// assert_eq!(clock.now() - before, Duration::hours(25));
/// ```
#[derive(Debug, Clone)]
pub struct ManualClock {
    millis: Arc<AtomicI64>,
}

impl ManualClock {
    pub fn starting_at(at: DateTime<Utc>) -> Self {
        ManualClock {
            millis: Arc::new(AtomicI64::new(at.timestamp_millis())),
        }
    }

    pub fn set(&self, at: DateTime<Utc>) {
        self.millis.store(at.timestamp_millis(), Ordering::SeqCst);
    }

    pub fn advance(&self, by: Duration) {
        self.millis.fetch_add(by.num_milliseconds(), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let millis = self.millis.load(Ordering::SeqCst);
        DateTime::from_timestamp_millis(millis).unwrap_or_default()
    }
}

// =============================================================================
// Persisted Snapshot
// =============================================================================

/// The cart as written to storage: the cart fields plus the write instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PersistedCart {
    #[serde(flatten)]
    pub cart: Cart,
    /// Epoch milliseconds of the last write.
    pub timestamp: i64,
}

/// Borrowing twin of [`PersistedCart`] so saving does not clone the cart.
#[derive(Serialize)]
struct PersistedCartRef<'a> {
    #[serde(flatten)]
    cart: &'a Cart,
    timestamp: i64,
}

/// What `load` found in the slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A fresh snapshot; the cart is returned as stored.
    Restored(Cart),
    /// Nothing stored under the key.
    Missing,
    /// The snapshot is older than the expiry window.
    Expired { written_at: DateTime<Utc> },
    /// Read failure or malformed data.
    Unusable,
}

// =============================================================================
// Cart Store
// =============================================================================

/// Reads and writes the cart snapshot under one storage key.
///
/// ## Example
/// ```rust
/// use chrono::Duration;
/// use foodie_core::{CartStore, LoadOutcome, MemoryStore};
///
/// let store = CartStore::new(MemoryStore::new())
///     .with_key("foodie-cart")
///     .with_expiry(Duration::hours(24));
///
/// assert_eq!(store.load(), LoadOutcome::Missing);
/// ```
#[derive(Debug)]
pub struct CartStore<S> {
    slot: S,
    key: String,
    expiry: Duration,
    clock: Box<dyn Clock>,
}

impl<S: KeyValueStore> CartStore<S> {
    /// A store with the default key, a 24 hour expiry and the system clock.
    pub fn new(slot: S) -> Self {
        CartStore {
            slot,
            key: CART_STORAGE_KEY.to_string(),
            expiry: Duration::hours(CART_EXPIRY_HOURS),
            clock: Box::new(SystemClock),
        }
    }

    /// Sets the storage key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Sets the expiry window.
    pub fn with_expiry(mut self, expiry: Duration) -> Self {
        self.expiry = expiry;
        self
    }

    /// Replaces the clock (tests use [`ManualClock`]).
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn expiry(&self) -> Duration {
        self.expiry
    }

    /// The current instant according to this store's clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Read access to the underlying slot.
    pub fn slot(&self) -> &S {
        &self.slot
    }

    /// Reads the stored snapshot. Never fails: faults are logged and reported
    /// as [`LoadOutcome::Unusable`].
    pub fn load(&self) -> LoadOutcome {
        let raw = match self.slot.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "No persisted cart");
                return LoadOutcome::Missing;
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read persisted cart");
                return LoadOutcome::Unusable;
            }
        };

        let persisted: PersistedCart = match serde_json::from_str(&raw) {
            Ok(persisted) => persisted,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Persisted cart is not valid JSON");
                return LoadOutcome::Unusable;
            }
        };

        if let Err(e) = persisted.cart.validate() {
            warn!(key = %self.key, error = %e, "Persisted cart breaks cart invariants");
            return LoadOutcome::Unusable;
        }

        let Some(written_at) = DateTime::from_timestamp_millis(persisted.timestamp) else {
            warn!(key = %self.key, timestamp = persisted.timestamp, "Persisted cart timestamp out of range");
            return LoadOutcome::Unusable;
        };

        let age = self.clock.now() - written_at;
        if age > self.expiry {
            info!(
                key = %self.key,
                age_hours = age.num_hours(),
                expiry_hours = self.expiry.num_hours(),
                "Persisted cart expired"
            );
            return LoadOutcome::Expired { written_at };
        }

        debug!(key = %self.key, lines = persisted.cart.line_count(), "Restored persisted cart");
        LoadOutcome::Restored(persisted.cart)
    }

    /// Stamps the cart with the current instant and writes it.
    ///
    /// Best-effort: returns whether the write landed, failures are logged.
    pub fn save(&mut self, cart: &Cart) -> bool {
        let snapshot = PersistedCartRef {
            cart,
            timestamp: self.clock.now().timestamp_millis(),
        };

        let json = match serde_json::to_string(&snapshot) {
            Ok(json) => json,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to serialize cart");
                return false;
            }
        };

        match self.slot.set(&self.key, &json) {
            Ok(()) => {
                debug!(key = %self.key, bytes = json.len(), "Cart persisted");
                true
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to persist cart; keeping it in memory only");
                false
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
