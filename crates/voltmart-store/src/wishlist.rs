//! # Wishlist Store
//!
//! Reactive, persisted set of saved products with the time each was saved.
//! Same persistence discipline as the cart, under the `wishlist` slot.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::watch;
use tracing::debug;
use voltmart_core::{Product, WishlistItem};

use crate::error::StoreResult;
use crate::storage::{keys, load_json, save_json, KeyValueStorage};

pub struct WishlistStore {
    storage: Arc<dyn KeyValueStorage>,
    items: Vec<WishlistItem>,
    snapshot_tx: watch::Sender<Vec<WishlistItem>>,
}

impl WishlistStore {
    /// Hydrates from the `wishlist` slot, or starts empty.
    pub fn open(storage: Arc<dyn KeyValueStorage>) -> StoreResult<Self> {
        let items: Vec<WishlistItem> = load_json(storage.as_ref(), keys::WISHLIST)?;
        debug!(items = items.len(), "Wishlist hydrated");

        let (snapshot_tx, _) = watch::channel(items.clone());
        Ok(WishlistStore {
            storage,
            items,
            snapshot_tx,
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<WishlistItem>> {
        self.snapshot_tx.subscribe()
    }

    /// Saves a product. Already-saved products keep their original timestamp.
    pub fn add(&mut self, product: &Product) -> StoreResult<()> {
        if self.has(&product.id) {
            return Ok(());
        }

        self.items.push(WishlistItem {
            product: product.clone(),
            added_at: Utc::now(),
        });
        debug!(product_id = %product.id, count = self.count(), "Wishlist add");
        self.commit()
    }

    pub fn remove(&mut self, product_id: &str) -> StoreResult<()> {
        let before = self.items.len();
        self.items.retain(|i| i.product.id != product_id);
        if self.items.len() == before {
            return Ok(());
        }

        debug!(product_id = %product_id, count = self.count(), "Wishlist remove");
        self.commit()
    }

    /// Adds the product if absent, removes it otherwise. Returns the new
    /// membership.
    pub fn toggle(&mut self, product: &Product) -> StoreResult<bool> {
        if self.has(&product.id) {
            self.remove(&product.id)?;
            Ok(false)
        } else {
            self.add(product)?;
            Ok(true)
        }
    }

    fn commit(&self) -> StoreResult<()> {
        save_json(self.storage.as_ref(), keys::WISHLIST, &self.items)?;
        self.snapshot_tx.send_replace(self.items.clone());
        Ok(())
    }

    pub fn has(&self, product_id: &str) -> bool {
        self.items.iter().any(|i| i.product.id == product_id)
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[WishlistItem] {
        &self.items
    }
}

impl std::fmt::Debug for WishlistStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WishlistStore")
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use voltmart_core::Catalog;

    #[test]
    fn test_add_twice_keeps_one_entry() {
        let catalog = Catalog::seeded();
        let product = catalog.product_by_id("2").unwrap();
        let mut wishlist = WishlistStore::open(Arc::new(MemoryStorage::new())).unwrap();

        wishlist.add(product).unwrap();
        let first_added = wishlist.items()[0].added_at;
        wishlist.add(product).unwrap();

        assert_eq!(wishlist.count(), 1);
        assert_eq!(wishlist.items()[0].added_at, first_added);
        assert!(wishlist.has("2"));

        wishlist.remove("2").unwrap();
        assert_eq!(wishlist.count(), 0);
        assert!(!wishlist.has("2"));
    }

    #[test]
    fn test_toggle() {
        let catalog = Catalog::seeded();
        let product = catalog.product_by_id("5").unwrap();
        let mut wishlist = WishlistStore::open(Arc::new(MemoryStorage::new())).unwrap();

        assert!(wishlist.toggle(product).unwrap());
        assert!(wishlist.has("5"));
        assert!(!wishlist.toggle(product).unwrap());
        assert!(!wishlist.has("5"));
    }

    #[test]
    fn test_persists_across_reopen() {
        let catalog = Catalog::seeded();
        let storage = Arc::new(MemoryStorage::new());
        let mut wishlist = WishlistStore::open(storage.clone()).unwrap();
        wishlist.add(catalog.product_by_id("1").unwrap()).unwrap();
        wishlist.add(catalog.product_by_id("12").unwrap()).unwrap();

        let reopened = WishlistStore::open(storage).unwrap();
        assert_eq!(reopened.count(), 2);
        assert!(reopened.has("12"));
        assert_eq!(reopened.items(), wishlist.items());
    }

    #[test]
    fn test_subscribe() {
        let catalog = Catalog::seeded();
        let mut wishlist = WishlistStore::open(Arc::new(MemoryStorage::new())).unwrap();
        let rx = wishlist.subscribe();

        wishlist.add(catalog.product_by_id("1").unwrap()).unwrap();
        assert_eq!(rx.borrow().len(), 1);
    }
}
