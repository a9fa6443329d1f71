//! # Wishlist Commands
//!
//! Saving products for later. The wishlist page lists items; product
//! cards use `toggle_wishlist` for the heart button.

use serde::{Deserialize, Serialize};
use tracing::debug;
use voltmart_core::{Catalog, CoreError, WishlistItem};
use voltmart_store::WishlistStore;

use crate::error::ApiResult;
use crate::state::WishlistState;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistResponse {
    pub items: Vec<WishlistItem>,
    pub count: usize,
}

/// Result of pressing the heart button.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResponse {
    /// Whether the product is saved after the toggle.
    pub saved: bool,
    pub count: usize,
}

fn snapshot(wishlist: &WishlistStore) -> WishlistResponse {
    WishlistResponse {
        items: wishlist.items().to_vec(),
        count: wishlist.count(),
    }
}

pub fn get_wishlist(wishlist: &WishlistState) -> WishlistResponse {
    debug!("get_wishlist command");
    wishlist.with(|w| snapshot(w))
}

/// Saves a product. Already-saved products are left as they are.
pub fn add_to_wishlist(
    catalog: &Catalog,
    wishlist: &WishlistState,
    product_id: &str,
) -> ApiResult<WishlistResponse> {
    debug!(product_id = %product_id, "add_to_wishlist command");

    let product = catalog
        .product_by_id(product_id)
        .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;

    wishlist.with_mut(|w| -> ApiResult<WishlistResponse> {
        w.add(product)?;
        Ok(snapshot(w))
    })
}

pub fn remove_from_wishlist(
    wishlist: &WishlistState,
    product_id: &str,
) -> ApiResult<WishlistResponse> {
    debug!(product_id = %product_id, "remove_from_wishlist command");

    wishlist.with_mut(|w| -> ApiResult<WishlistResponse> {
        w.remove(product_id)?;
        Ok(snapshot(w))
    })
}

pub fn toggle_wishlist(
    catalog: &Catalog,
    wishlist: &WishlistState,
    product_id: &str,
) -> ApiResult<ToggleResponse> {
    debug!(product_id = %product_id, "toggle_wishlist command");

    let product = catalog
        .product_by_id(product_id)
        .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;

    wishlist.with_mut(|w| -> ApiResult<ToggleResponse> {
        let saved = w.toggle(product)?;
        Ok(ToggleResponse {
            saved,
            count: w.count(),
        })
    })
}

pub fn is_in_wishlist(wishlist: &WishlistState, product_id: &str) -> bool {
    wishlist.with(|w| w.has(product_id))
}
