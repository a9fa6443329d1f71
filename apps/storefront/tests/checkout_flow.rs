//! End-to-end shopping flows through the command layer.

use std::sync::Arc;

use voltmart_core::{Money, NewAddress};
use voltmart_storefront::commands::account::{self, RegisterRequest};
use voltmart_storefront::commands::checkout::{self, CheckoutRequest};
use voltmart_storefront::commands::{cart, catalog, orders, wishlist};
use voltmart_storefront::config::ShopConfig;
use voltmart_storefront::error::ErrorCode;
use voltmart_storefront::Storefront;
use voltmart_store::{FileStorage, MemoryStorage};

fn config() -> ShopConfig {
    ShopConfig::default().without_delays()
}

fn register_request() -> RegisterRequest {
    RegisterRequest {
        name: "Meera Nair".to_string(),
        email: "meera@example.com".to_string(),
        password: "solder42".to_string(),
        phone: Some("9123456780".to_string()),
    }
}

fn checkout_request() -> CheckoutRequest {
    CheckoutRequest {
        shipping_address: NewAddress {
            name: "Meera Nair".to_string(),
            phone: "9123456780".to_string(),
            address_line1: "12 MG Road".to_string(),
            address_line2: Some("Flat 3B".to_string()),
            city: "Kochi".to_string(),
            state: "Kerala".to_string(),
            pincode: "682016".to_string(),
            is_default: true,
        },
        payment_method: "card".to_string(),
    }
}

#[tokio::test]
async fn registered_user_checkout_records_order() {
    let shop = Storefront::open(config(), Arc::new(MemoryStorage::new())).unwrap();

    let auth = account::register(&shop.config, &shop.session, register_request())
        .await
        .unwrap();
    assert!(auth.success);

    let page = catalog::get_product(&shop.catalog, "esp32-devkitc").unwrap();
    cart::add_to_cart(&shop.catalog, &shop.cart, &page.product.id, Some(1)).unwrap();
    cart::add_to_cart(&shop.catalog, &shop.cart, "15", Some(3)).unwrap();

    let quoted = checkout::checkout_summary(&shop.config, &shop.cart).unwrap();
    let placed = checkout::place_order(&shop.config, &shop.cart, &shop.session, checkout_request())
        .await
        .unwrap();

    assert!(placed.recorded);
    let order = &placed.order;
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.unit_count(), 4);
    // 549 + 3 x 129
    assert_eq!(order.subtotal, Money::from_units(936));
    assert_eq!(order.subtotal, quoted.subtotal);
    let expected_shipping = if order.subtotal > Money::from_units(500) {
        Money::zero()
    } else {
        Money::from_units(50)
    };
    assert_eq!(order.shipping, expected_shipping);
    assert_eq!(order.total, order.subtotal + order.shipping + order.tax);
    assert_eq!(order.total, quoted.total);

    assert!(cart::get_cart(&shop.cart).items.is_empty());

    let history = orders::list_orders(&shop.session).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].order_id, order.order_id);

    let tracking_id = order.tracking_id.clone().unwrap();
    let tracked = orders::track_order(&shop.session, &tracking_id).unwrap();
    assert_eq!(tracked.order.order_id, order.order_id);
}

#[tokio::test]
async fn guest_checkout_clears_cart_without_history() {
    let shop = Storefront::open(config(), Arc::new(MemoryStorage::new())).unwrap();
    cart::add_to_cart(&shop.catalog, &shop.cart, "10", None).unwrap();

    let placed = checkout::place_order(&shop.config, &shop.cart, &shop.session, checkout_request())
        .await
        .unwrap();

    assert!(!placed.recorded);
    assert_eq!(placed.order.shipping, Money::from_units(50));
    assert!(cart::get_cart(&shop.cart).items.is_empty());
    assert!(orders::recent_orders(&shop.session).is_empty());
}

#[tokio::test]
async fn empty_cart_checkout_is_rejected() {
    let shop = Storefront::open(config(), Arc::new(MemoryStorage::new())).unwrap();

    let err = checkout::place_order(&shop.config, &shop.cart, &shop.session, checkout_request())
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::CartError);
}

#[tokio::test]
async fn state_persists_across_restarts_on_disk() {
    let dir = tempfile::tempdir().unwrap();

    {
        let storage = Arc::new(FileStorage::open(dir.path()).unwrap());
        let shop = Storefront::open(config(), storage).unwrap();

        account::register(&shop.config, &shop.session, register_request())
            .await
            .unwrap();
        cart::add_to_cart(&shop.catalog, &shop.cart, "2", Some(1)).unwrap();
        wishlist::toggle_wishlist(&shop.catalog, &shop.wishlist, "12").unwrap();
        checkout::place_order(&shop.config, &shop.cart, &shop.session, checkout_request())
            .await
            .unwrap();
        cart::add_to_cart(&shop.catalog, &shop.cart, "7", Some(2)).unwrap();
    }

    let storage = Arc::new(FileStorage::open(dir.path()).unwrap());
    let shop = Storefront::open(config(), storage).unwrap();

    let user = account::current_user(&shop.session).unwrap();
    assert_eq!(user.email, "meera@example.com");
    assert_eq!(user.orders.len(), 1);
    assert_eq!(cart::get_cart(&shop.cart).totals.count, 2);
    assert!(wishlist::is_in_wishlist(&shop.wishlist, "12"));

    // The registry survives logout, so the password still works
    account::logout(&shop.session).unwrap();
    let auth = account::login(&shop.config, &shop.session, "meera@example.com", "solder42")
        .await
        .unwrap();
    assert!(auth.success);
    assert_eq!(auth.user.unwrap().orders.len(), 1);
}

#[test]
fn category_browse_matches_search() {
    let shop = Storefront::open(config(), Arc::new(MemoryStorage::new())).unwrap();

    let page = catalog::browse_category(&shop.catalog, "motors-drivers", None, Some("price-high"))
        .unwrap();
    let prices: Vec<i64> = page.products.iter().map(|p| p.price.units()).collect();
    assert_eq!(prices, vec![899, 199, 149]);

    let hits = catalog::search_products(&shop.catalog, "stepper").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "11");
}
