//! # Storage Module
//!
//! The key/value persistence port every store writes through.
//!
//! ## Persistence Port
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Stores never touch a backend directly                │
//! │                                                                         │
//! │  CartStore / WishlistStore / SessionStore                              │
//! │       │                                                                 │
//! │       │  save_json(storage, keys::CART, &items)                        │
//! │       ▼                                                                 │
//! │  Arc<dyn KeyValueStorage>                                              │
//! │  ├── get(&self, key)                                                   │
//! │  ├── set(&self, key, value)                                            │
//! │  └── remove(&self, key)                                                │
//! │       │                                                                 │
//! │       ├──► MemoryStorage   (tests, ephemeral sessions)                 │
//! │       └──► FileStorage     (<data_dir>/<key>.json)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Slots
//! | Key        | Value                                         |
//! |------------|-----------------------------------------------|
//! | `user`     | current session user, no password             |
//! | `users`    | registered users, with password hash          |
//! | `cart`     | `Vec<CartItem>`                               |
//! | `wishlist` | `Vec<WishlistItem>`                           |
//!
//! There is no schema version. Writers sharing one backend are
//! last-write-wins.

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::StoreResult;

/// Fixed slot names.
pub mod keys {
    pub const USER: &str = "user";
    pub const USERS: &str = "users";
    pub const CART: &str = "cart";
    pub const WISHLIST: &str = "wishlist";
}

/// A string key/value backend.
///
/// Implementations must be usable behind `Arc<dyn KeyValueStorage>`.
pub trait KeyValueStorage: Send + Sync {
    /// Reads a slot. `Ok(None)` when the key was never written.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Overwrites a slot.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Deletes a slot. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> StoreResult<()>;
}

/// Reads and decodes a JSON slot.
///
/// ## Fallback
/// - Absent key: `T::default()`
/// - Undecodable value (legacy shape, truncated write): `T::default()`
///   with a warning
/// - Backend failure: `Err`
pub fn load_json<T>(storage: &dyn KeyValueStorage, key: &str) -> StoreResult<T>
where
    T: DeserializeOwned + Default,
{
    let Some(raw) = storage.get(key)? else {
        debug!(key = %key, "Slot empty, starting from default");
        return Ok(T::default());
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(e) => {
            warn!(key = %key, error = %e, "Discarding undecodable slot");
            Ok(T::default())
        }
    }
}

/// Encodes `value` as JSON and writes it to `key`.
pub fn save_json<T>(storage: &dyn KeyValueStorage, key: &str, value: &T) -> StoreResult<()>
where
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    storage.set(key, &raw)?;
    debug!(key = %key, bytes = raw.len(), "Slot saved");
    Ok(())
}
