//! # voltmart-store: Persisted Client State for VoltMart
//!
//! The cart, wishlist and session stores, and the key/value port they
//! persist through.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        VoltMart State Flow                              │
//! │                                                                         │
//! │  storefront command (add_to_cart)                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   voltmart-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐   ┌───────────────┐   ┌────────────────┐   │   │
//! │  │   │  CartStore    │   │ WishlistStore │   │  SessionStore  │   │   │
//! │  │   │  (cart.rs)    │   │ (wishlist.rs) │   │  (session.rs)  │   │   │
//! │  │   └───────┬───────┘   └───────┬───────┘   └───────┬────────┘   │   │
//! │  │           │  watch::Sender    │  snapshot         │            │   │
//! │  │           ▼  per mutation     ▼                   ▼            │   │
//! │  │   ┌─────────────────────────────────────────────────────────┐  │   │
//! │  │   │        Arc<dyn KeyValueStorage>  (storage/)             │  │   │
//! │  │   │        MemoryStorage │ FileStorage                      │  │   │
//! │  │   └─────────────────────────────────────────────────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! Stores take `&mut self`: each mutation is one synchronous step, saved
//! and published before it returns. Callers that share a store across
//! tasks wrap it in a lock.
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use voltmart_core::Catalog;
//! use voltmart_store::{CartStore, MemoryStorage};
//!
//! let catalog = Catalog::seeded();
//! let mut cart = CartStore::open(Arc::new(MemoryStorage::new())).unwrap();
//! cart.add(&catalog.list()[0], 2).unwrap();
//! assert_eq!(cart.count(), 2);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod credentials;
pub mod error;
pub mod session;
pub mod storage;
pub mod wishlist;

// =============================================================================
// Re-exports
// =============================================================================

pub use cart::{CartStore, CartTotals};
pub use error::{StoreError, StoreResult};
pub use session::SessionStore;
pub use storage::{keys, FileStorage, KeyValueStorage, MemoryStorage};
pub use wishlist::WishlistStore;
