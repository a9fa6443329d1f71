//! # Store State
//!
//! Lock wrappers around the persisted stores.
//!
//! ## Usage
//! ```rust,ignore
//! let count = cart_state.with(|cart| cart.count());
//! cart_state.with_mut(|cart| cart.add(&product, 1))?;
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use voltmart_store::{CartStore, SessionStore, WishlistStore};

/// A store shared between commands. Poisoned locks are recovered.
#[derive(Debug)]
pub struct StoreState<S> {
    store: Arc<Mutex<S>>,
}

impl<S> StoreState<S> {
    pub fn new(store: S) -> Self {
        StoreState {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Executes a function with read access to the store.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&S) -> R,
    {
        let store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        f(&store)
    }

    /// Executes a function with write access to the store.
    pub fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut S) -> R,
    {
        let mut store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut store)
    }
}

impl<S> Clone for StoreState<S> {
    fn clone(&self) -> Self {
        StoreState {
            store: Arc::clone(&self.store),
        }
    }
}

pub type CartState = StoreState<CartStore>;
pub type WishlistState = StoreState<WishlistStore>;
pub type SessionState = StoreState<SessionStore>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_the_store() {
        let state = StoreState::new(Vec::<u32>::new());
        let other = state.clone();

        other.with_mut(|v| v.push(7));
        assert_eq!(state.with(|v| v.clone()), vec![7]);
    }

    #[test]
    fn test_recovers_from_poisoned_lock() {
        let state = StoreState::new(1u32);
        let poisoner = state.clone();
        let _ = std::thread::spawn(move || {
            poisoner.with_mut(|_| panic!("boom"));
        })
        .join();

        assert_eq!(state.with(|v| *v), 1);
    }
}
