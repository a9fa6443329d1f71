//! # Cart Commands
//!
//! Cart manipulation and the cart page quote.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  Order   │       │
//! │  │  Cart    │     │          │     │   Form   │     │  Placed  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                 │                              │
//! │                   add_to_cart       place_order                        │
//! │                   update_cart_item  (checkout.rs)                      │
//! │                   remove_from_cart                                     │
//! │                   quote_cart                                           │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────►                   │
//! │                                                      (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;
use voltmart_core::checkout::{self, Coupon, OrderTotals};
use voltmart_core::validation::validate_quantity;
use voltmart_core::{CartItem, Catalog, CoreError};
use voltmart_store::{CartStore, CartTotals};

use crate::error::ApiResult;
use crate::state::{CartState, ConfigState};

/// Cart response including items and totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub totals: CartTotals,
}

impl From<&CartStore> for CartResponse {
    fn from(cart: &CartStore) -> Self {
        CartResponse {
            items: cart.items().to_vec(),
            totals: cart.totals(),
        }
    }
}

/// Gets the current cart contents.
pub fn get_cart(cart: &CartState) -> CartResponse {
    debug!("get_cart command");
    cart.with(|c| CartResponse::from(c))
}

/// Adds a product to the cart.
///
/// ## Behavior
/// - Product already in cart: quantity increases
/// - Product not in cart: appended as a new line
/// - Stock is not checked here; the product page caps the picker
///
/// ## Arguments
/// * `product_id` - Catalog id of the product
/// * `quantity` - Quantity to add (default: 1)
pub fn add_to_cart(
    catalog: &Catalog,
    cart: &CartState,
    product_id: &str,
    quantity: Option<u32>,
) -> ApiResult<CartResponse> {
    let quantity = quantity.unwrap_or(1);
    debug!(product_id = %product_id, quantity = %quantity, "add_to_cart command");

    validate_quantity(quantity)?;
    let product = catalog
        .product_by_id(product_id)
        .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;

    cart.with_mut(|c| -> ApiResult<CartResponse> {
        c.add(product, quantity)?;
        Ok(CartResponse::from(&*c))
    })
}

/// Sets a line's quantity. Zero or less removes the line.
pub fn update_cart_item(
    cart: &CartState,
    product_id: &str,
    quantity: i64,
) -> ApiResult<CartResponse> {
    debug!(product_id = %product_id, quantity = %quantity, "update_cart_item command");

    cart.with_mut(|c| -> ApiResult<CartResponse> {
        c.set_quantity(product_id, quantity)?;
        Ok(CartResponse::from(&*c))
    })
}

pub fn remove_from_cart(cart: &CartState, product_id: &str) -> ApiResult<CartResponse> {
    debug!(product_id = %product_id, "remove_from_cart command");

    cart.with_mut(|c| -> ApiResult<CartResponse> {
        c.remove(product_id)?;
        Ok(CartResponse::from(&*c))
    })
}

pub fn clear_cart(cart: &CartState) -> ApiResult<CartResponse> {
    debug!("clear_cart command");

    cart.with_mut(|c| -> ApiResult<CartResponse> {
        c.clear()?;
        Ok(CartResponse::from(&*c))
    })
}

/// Cart page order summary, with an optional coupon code.
///
/// A blank code means no coupon. Codes are matched case-insensitively;
/// an unknown code is an `INVALID_COUPON` error.
pub fn quote_cart(
    config: &ConfigState,
    cart: &CartState,
    coupon_code: Option<&str>,
) -> ApiResult<OrderTotals> {
    debug!(coupon = ?coupon_code, "quote_cart command");

    let coupon = match coupon_code {
        Some(code) => Coupon::parse(code)?,
        None => None,
    };
    if let Some(coupon) = &coupon {
        debug!(coupon = coupon.code(), "Coupon applied");
    }
    let rules = config.pricing_rules();
    Ok(cart.with(|c| checkout::quote(c.items(), coupon, &rules)))
}
