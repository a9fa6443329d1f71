//! # Checkout Commands
//!
//! Turning the cart into an order.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Place Order Flow                                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  1. Snapshot cart (empty ──► CART_ERROR, nothing else happens)  │   │
//! │  │  2. Validate shipping address, parse payment method             │   │
//! │  │  3. Simulated processing (checkout.simulated_delay_ms)          │   │
//! │  │  4. build_order: totals, ORD/TRK codes, status = processing     │   │
//! │  │  5. Signed in?  yes ─► append to user's orders                  │   │
//! │  │                 no  ─► order is returned but not recorded       │   │
//! │  │  6. Clear the cart (always)                                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  No payment is taken and stock is not decremented.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use voltmart_core::checkout::{self, OrderTotals};
use voltmart_core::validation::validate_address;
use voltmart_core::{CoreError, NewAddress, Order, PaymentMethod};

use crate::error::ApiResult;
use crate::state::{CartState, ConfigState, SessionState};

/// Checkout form payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub shipping_address: NewAddress,
    /// `card`, `upi`, `netbanking` or `cod`.
    pub payment_method: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderResponse {
    pub order: Order,
    /// False for guest checkouts: the order exists only in this response.
    pub recorded: bool,
}

/// Order summary shown beside the checkout form. Coupons do not carry
/// over from the cart page.
pub fn checkout_summary(config: &ConfigState, cart: &CartState) -> ApiResult<OrderTotals> {
    debug!("checkout_summary command");
    let rules = config.pricing_rules();
    cart.with(|c| -> ApiResult<OrderTotals> {
        if c.is_empty() {
            return Err(CoreError::EmptyCart.into());
        }
        Ok(checkout::quote(c.items(), None, &rules))
    })
}

/// Places an order from the current cart.
pub async fn place_order(
    config: &ConfigState,
    cart: &CartState,
    session: &SessionState,
    request: CheckoutRequest,
) -> ApiResult<PlaceOrderResponse> {
    debug!(payment_method = %request.payment_method, "place_order command");

    let items = cart.with(|c| c.items().to_vec());
    if items.is_empty() {
        return Err(CoreError::EmptyCart.into());
    }

    validate_address(&request.shipping_address)?;
    let payment_method: PaymentMethod = request.payment_method.parse()?;

    let delay = config.checkout_delay();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let order = checkout::build_order(
        &items,
        request.shipping_address.into_address(),
        payment_method,
        &config.pricing_rules(),
    )?;

    let recorded = session.with_mut(|s| s.add_order(order.clone()))?;
    cart.with_mut(|c| c.clear())?;

    info!(
        order_id = %order.order_id,
        total = %order.total,
        units = order.unit_count(),
        recorded = recorded,
        "Order placed"
    );

    Ok(PlaceOrderResponse { order, recorded })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::ShopConfig;
    use crate::error::ErrorCode;
    use crate::state::StoreState;
    use voltmart_core::{Catalog, Money, OrderStatus};
    use voltmart_store::session::{DEMO_EMAIL, DEMO_PASSWORD};
    use voltmart_store::{CartStore, MemoryStorage, SessionStore};

    struct Fixture {
        config: ConfigState,
        cart: CartState,
        session: SessionState,
    }

    fn fixture() -> Fixture {
        let storage = Arc::new(MemoryStorage::new());
        Fixture {
            config: Arc::new(ShopConfig::default().without_delays()),
            cart: StoreState::new(CartStore::open(storage.clone()).unwrap()),
            session: StoreState::new(SessionStore::open(storage).unwrap()),
        }
    }

    fn request(payment_method: &str) -> CheckoutRequest {
        CheckoutRequest {
            shipping_address: NewAddress {
                name: "Ravi Kumar".to_string(),
                phone: "9876543210".to_string(),
                address_line1: "42 Residency Road".to_string(),
                address_line2: None,
                city: "Bengaluru".to_string(),
                state: "Karnataka".to_string(),
                pincode: "560025".to_string(),
                is_default: false,
            },
            payment_method: payment_method.to_string(),
        }
    }

    fn fill_cart(fx: &Fixture, lines: &[(&str, u32)]) {
        let catalog = Catalog::seeded();
        fx.cart.with_mut(|c| {
            for (id, qty) in lines {
                c.add(catalog.product_by_id(id).unwrap(), *qty).unwrap();
            }
        });
    }

    #[tokio::test]
    async fn test_place_order_signed_in() {
        let fx = fixture();
        fx.session
            .with_mut(|s| s.login(DEMO_EMAIL, DEMO_PASSWORD))
            .unwrap();
        fill_cart(&fx, &[("1", 1), ("7", 3)]);

        let response = place_order(&fx.config, &fx.cart, &fx.session, request("upi"))
            .await
            .unwrap();

        assert!(response.recorded);
        let order = response.order;
        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(order.payment_method, PaymentMethod::Upi);
        assert!(order.order_id.starts_with("ORD"));
        assert!(order.tracking_id.as_deref().unwrap().starts_with("TRK"));
        // 1299 + 3 x 99
        assert_eq!(order.subtotal, Money::from_units(1596));
        assert_eq!(order.shipping, Money::zero());
        assert_eq!(order.total, order.subtotal + order.shipping + order.tax);

        assert!(fx.cart.with(|c| c.is_empty()));
        assert_eq!(fx.session.with(|s| s.recent_orders(3).len()), 1);
    }

    #[tokio::test]
    async fn test_guest_checkout_not_recorded() {
        let fx = fixture();
        fill_cart(&fx, &[("7", 1)]);

        let response = place_order(&fx.config, &fx.cart, &fx.session, request("cod"))
            .await
            .unwrap();

        assert!(!response.recorded);
        assert_eq!(response.order.shipping, Money::from_units(50));
        assert!(fx.cart.with(|c| c.is_empty()));
    }

    #[tokio::test]
    async fn test_empty_cart_rejected() {
        let fx = fixture();
        let err = place_order(&fx.config, &fx.cart, &fx.session, request("card"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);

        assert!(checkout_summary(&fx.config, &fx.cart).is_err());
    }

    #[tokio::test]
    async fn test_invalid_form_keeps_cart() {
        let fx = fixture();
        fill_cart(&fx, &[("3", 2)]);

        let err = place_order(&fx.config, &fx.cart, &fx.session, request("bitcoin"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let mut bad_address = request("card");
        bad_address.shipping_address.phone = "12345".to_string();
        assert!(place_order(&fx.config, &fx.cart, &fx.session, bad_address)
            .await
            .is_err());

        assert_eq!(fx.cart.with(|c| c.count()), 2);
    }

    #[test]
    fn test_checkout_summary_uses_config_rules() {
        let mut config = ShopConfig::default();
        config.checkout.tax_rate_bps = 0;
        config.checkout.shipping_fee = 80;
        let fx = Fixture {
            config: Arc::new(config),
            ..fixture()
        };
        fill_cart(&fx, &[("10", 1)]);

        let totals = checkout_summary(&fx.config, &fx.cart).unwrap();
        assert!(totals.tax.is_zero());
        assert_eq!(totals.shipping, Money::from_units(80));
        assert_eq!(totals.total, Money::from_units(149 + 80));
    }
}
