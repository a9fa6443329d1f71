//! # Cart Store
//!
//! Reactive, persisted mapping of product → quantity.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  User Action              Store Method             State Change         │
//! │  ───────────              ────────────             ────────────         │
//! │                                                                         │
//! │  Add to cart ────────────► add(product, n) ──────► qty += n / push      │
//! │                                                                         │
//! │  Change quantity ────────► set_quantity(id, n) ──► qty = n, or remove   │
//! │                                                  when n <= 0            │
//! │                                                                         │
//! │  Click remove ───────────► remove(id) ───────────► retain(id != ..)     │
//! │                                                                         │
//! │  Order placed ───────────► clear() ──────────────► items.clear()        │
//! │                                                                         │
//! │  Every mutation: save `cart` slot, then publish the new snapshot.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line per product id
//! - Every line has quantity >= 1
//! - No upper bound on quantity (the presentation layer caps at stock)

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::debug;
use voltmart_core::{CartItem, Money, Product};

use crate::error::StoreResult;
use crate::storage::{keys, load_json, save_json, KeyValueStorage};

/// Cart totals summary for the cart badge and cart page header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Distinct products.
    pub line_count: usize,
    /// Sum of quantities. Wider than a line quantity so it cannot overflow.
    pub count: u64,
    pub subtotal: Money,
}

impl From<&CartStore> for CartTotals {
    fn from(cart: &CartStore) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            count: cart.count(),
            subtotal: cart.total(),
        }
    }
}

/// The persisted cart.
///
/// The in-memory list is authoritative; the `cart` slot is rewritten in
/// full after each mutation. If the write fails the in-memory change is
/// kept and the error is returned.
pub struct CartStore {
    storage: Arc<dyn KeyValueStorage>,
    items: Vec<CartItem>,
    snapshot_tx: watch::Sender<Vec<CartItem>>,
}

impl CartStore {
    /// Hydrates from the `cart` slot, or starts empty.
    pub fn open(storage: Arc<dyn KeyValueStorage>) -> StoreResult<Self> {
        let items: Vec<CartItem> = load_json(storage.as_ref(), keys::CART)?;
        // Drop lines a legacy writer may have left at zero
        let items: Vec<CartItem> = items.into_iter().filter(|i| i.quantity > 0).collect();
        debug!(lines = items.len(), "Cart hydrated");

        let (snapshot_tx, _) = watch::channel(items.clone());
        Ok(CartStore {
            storage,
            items,
            snapshot_tx,
        })
    }

    /// Subscribes to cart snapshots. The receiver starts at the current cart.
    pub fn subscribe(&self) -> watch::Receiver<Vec<CartItem>> {
        self.snapshot_tx.subscribe()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds `quantity` of `product`, merging with an existing line.
    ///
    /// Adding zero is a no-op.
    pub fn add(&mut self, product: &Product, quantity: u32) -> StoreResult<()> {
        if quantity == 0 {
            return Ok(());
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            item.quantity = item.quantity.saturating_add(quantity);
        } else {
            self.items.push(CartItem::new(product.clone(), quantity));
        }

        debug!(product_id = %product.id, quantity, count = self.count(), "Cart add");
        self.commit()
    }

    /// Removes a line. Absent ids are ignored.
    pub fn remove(&mut self, product_id: &str) -> StoreResult<()> {
        let before = self.items.len();
        self.items.retain(|i| i.product.id != product_id);
        if self.items.len() == before {
            return Ok(());
        }

        debug!(product_id = %product_id, count = self.count(), "Cart remove");
        self.commit()
    }

    /// Sets a line's quantity.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: removes the line
    /// - Product not in cart: no-op
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> StoreResult<()> {
        if quantity <= 0 {
            return self.remove(product_id);
        }

        let Some(item) = self.items.iter_mut().find(|i| i.product.id == product_id) else {
            return Ok(());
        };
        item.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        debug!(product_id = %product_id, quantity, count = self.count(), "Cart set quantity");
        self.commit()
    }

    /// Empties the cart.
    pub fn clear(&mut self) -> StoreResult<()> {
        self.items.clear();
        debug!("Cart cleared");
        self.commit()
    }

    fn commit(&self) -> StoreResult<()> {
        save_json(self.storage.as_ref(), keys::CART, &self.items)?;
        self.snapshot_tx.send_replace(self.items.clone());
        Ok(())
    }

    // =========================================================================
    // Derived Values
    // =========================================================================

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn quantity_of(&self, product_id: &str) -> u32 {
        self.items
            .iter()
            .find(|i| i.product.id == product_id)
            .map(|i| i.quantity)
            .unwrap_or(0)
    }

    /// Sum of quantities.
    pub fn count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Sum of `price × quantity`.
    pub fn total(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn totals(&self) -> CartTotals {
        CartTotals::from(self)
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
