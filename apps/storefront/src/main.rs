//! # VoltMart Storefront Entry Point
//!
//! Boots the storefront against on-disk storage and reports what it
//! restored. The presentation layer links the library directly; this
//! binary is the smoke check for a data directory.
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load configuration
//! 3. Open the data directory
//! 4. Hydrate cart, wishlist and session
//! 5. Log the home page shelves and session summary

use tracing::info;
use voltmart_storefront::commands::{account, cart, catalog, orders};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // The actual setup is in lib.rs for better testability
    let storefront = voltmart_storefront::run()?;

    let home = catalog::get_home(&storefront.catalog);
    info!(
        featured = home.featured.len(),
        trending = home.trending.len(),
        deals = home.deals_of_day.len(),
        categories = home.categories.len(),
        "Home page ready"
    );

    let cart_view = cart::get_cart(&storefront.cart);
    info!(
        lines = cart_view.totals.line_count,
        units = cart_view.totals.count,
        subtotal = %cart_view.totals.subtotal,
        "Cart restored"
    );

    match account::current_user(&storefront.session) {
        Some(user) => info!(
            user = %user.email,
            recent_orders = orders::recent_orders(&storefront.session).len(),
            "Session restored"
        ),
        None => info!("No active session"),
    }

    Ok(())
}
