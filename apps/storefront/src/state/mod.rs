//! # State Module
//!
//! Application state handed to the command functions.
//!
//! ## Multiple State Types
//! Each command receives only the state it touches, so a cart command
//! never locks the session and vice versa.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐ ┌──────────────┐ ┌───────────────┐ ┌──────────────┐  │
//! │  │ Arc<Catalog> │ │  CartState   │ │ WishlistState │ │ SessionState │  │
//! │  │              │ │              │ │               │ │              │  │
//! │  │ read-only    │ │ Arc<Mutex<   │ │ Arc<Mutex<    │ │ Arc<Mutex<   │  │
//! │  │ after boot   │ │  CartStore>> │ │ WishlistStore>│ │ SessionStore>│  │
//! │  └──────────────┘ └──────────────┘ └───────────────┘ └──────────────┘  │
//! │                                                                         │
//! │  ConfigState: Arc<ShopConfig>, read-only after boot                    │
//! │                                                                         │
//! │  Locks are held only for one synchronous store call, never across     │
//! │  an `.await`.                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod stores;

pub use stores::{CartState, SessionState, StoreState, WishlistState};

use std::sync::Arc;

use crate::config::ShopConfig;

/// Configuration is read-only after boot, so no lock is needed.
pub type ConfigState = Arc<ShopConfig>;
