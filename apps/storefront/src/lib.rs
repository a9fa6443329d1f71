//! # VoltMart Storefront Library
//!
//! Application layer for the VoltMart storefront: configuration, logging,
//! store wiring and the command functions a presentation layer calls.
//!
//! ## Module Organization
//! ```text
//! voltmart_storefront/
//! ├── lib.rs          ◄─── You are here (startup & wiring)
//! ├── config.rs       ◄─── voltmart.toml + VOLTMART_* overrides
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   └── stores.rs   ◄─── Lock wrapper around the persisted stores
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── catalog.rs  ◄─── Browsing and search
//! │   ├── cart.rs     ◄─── Cart manipulation
//! │   ├── wishlist.rs ◄─── Saved products
//! │   ├── account.rs  ◄─── Auth, profile, addresses
//! │   ├── checkout.rs ◄─── Place order
//! │   └── orders.rs   ◄─── History and tracking
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod state;

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use voltmart_core::Catalog;
use voltmart_store::{
    CartStore, FileStorage, KeyValueStorage, SessionStore, StoreResult, WishlistStore,
};

use config::ShopConfig;
use state::{CartState, ConfigState, SessionState, StoreState, WishlistState};

/// Everything the commands need, built once at startup.
///
/// Cloning is cheap and every clone shares the same stores.
#[derive(Clone)]
pub struct Storefront {
    pub config: ConfigState,
    pub catalog: Arc<Catalog>,
    pub cart: CartState,
    pub wishlist: WishlistState,
    pub session: SessionState,
}

impl Storefront {
    /// Hydrates the cart, wishlist and session from `storage`.
    ///
    /// Missing or corrupt slots come back empty; only a failing backend
    /// is an error.
    pub fn open(config: ShopConfig, storage: Arc<dyn KeyValueStorage>) -> StoreResult<Self> {
        let cart = CartStore::open(Arc::clone(&storage))?;
        let wishlist = WishlistStore::open(Arc::clone(&storage))?;
        let session =
            SessionStore::open(storage)?.with_demo_account(config.auth.demo_account_enabled);

        Ok(Storefront {
            config: Arc::new(config),
            catalog: Arc::new(Catalog::seeded()),
            cart: StoreState::new(cart),
            wishlist: StoreState::new(wishlist),
            session: StoreState::new(session),
        })
    }
}

impl std::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("store", &self.config.store.name)
            .field("products", &self.catalog.list().len())
            .field("cart_count", &self.cart.with(|c| c.count()))
            .field("wishlist_count", &self.wishlist.with(|w| w.count()))
            .field("signed_in", &self.session.with(|s| s.is_authenticated()))
            .finish()
    }
}

/// Boots the storefront against on-disk storage.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Storefront Startup                                │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter                                │
/// │     • Default: INFO, voltmart crates at DEBUG; RUST_LOG overrides       │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults ◄ voltmart.toml ◄ VOLTMART_* environment                 │
/// │                                                                         │
/// │  3. Open Storage ─────────────────────────────────────────────────────► │
/// │     • Linux: ~/.local/share/storefront/                                 │
/// │     • Override: [storage] data_dir or VOLTMART_DATA_DIR                 │
/// │                                                                         │
/// │  4. Hydrate Stores ───────────────────────────────────────────────────► │
/// │     • cart, wishlist, session from their JSON slots                     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> Result<Storefront, Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting VoltMart storefront");

    let config = ShopConfig::load_or_default(None);
    let data_dir = config
        .data_dir()
        .ok_or("Could not determine app data directory")?;
    info!(?data_dir, store = %config.store.name, "Configuration loaded");

    let storage = Arc::new(FileStorage::open(data_dir)?);
    let storefront = Storefront::open(config, storage)?;

    info!(storefront = ?storefront, "Stores hydrated");
    Ok(storefront)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=voltmart_store=trace` - Trace a single crate
/// - Default: INFO, with DEBUG for voltmart crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVE));

    log_subscriber(filter).init();
}

const DEFAULT_LOG_DIRECTIVE: &str =
    "info,voltmart_core=debug,voltmart_store=debug,voltmart_storefront=debug";

/// The `EnvFilter` is the only level gate.
fn log_subscriber(filter: EnvFilter) -> impl tracing::Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt().with_env_filter(filter).finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use voltmart_core::Money;
    use voltmart_store::MemoryStorage;

    #[test]
    fn test_state_survives_reopen() {
        let storage: Arc<dyn KeyValueStorage> = Arc::new(MemoryStorage::new());

        let first = Storefront::open(ShopConfig::default(), Arc::clone(&storage)).unwrap();
        commands::cart::add_to_cart(&first.catalog, &first.cart, "6", Some(2)).unwrap();
        commands::wishlist::add_to_wishlist(&first.catalog, &first.wishlist, "12").unwrap();
        drop(first);

        let second = Storefront::open(ShopConfig::default(), storage).unwrap();
        let cart = commands::cart::get_cart(&second.cart);
        assert_eq!(cart.totals.count, 2);
        assert_eq!(cart.totals.subtotal, Money::from_units(698));
        assert!(commands::wishlist::is_in_wishlist(&second.wishlist, "12"));
    }

    #[test]
    fn test_log_filter_controls_levels() {
        let quiet = log_subscriber(EnvFilter::new("warn"));
        tracing::subscriber::with_default(quiet, || {
            assert!(tracing::enabled!(tracing::Level::WARN));
            assert!(!tracing::enabled!(tracing::Level::INFO));
            assert!(!tracing::enabled!(tracing::Level::DEBUG));
        });

        let default = log_subscriber(EnvFilter::new(DEFAULT_LOG_DIRECTIVE));
        tracing::subscriber::with_default(default, || {
            assert!(tracing::enabled!(tracing::Level::DEBUG));
            assert!(!tracing::enabled!(tracing::Level::TRACE));
        });
    }

    #[test]
    fn test_demo_account_follows_config() {
        let mut config = ShopConfig::default();
        config.auth.demo_account_enabled = false;
        let storefront = Storefront::open(config, Arc::new(MemoryStorage::new())).unwrap();

        let ok = storefront.session.with_mut(|s| {
            s.login(
                voltmart_store::session::DEMO_EMAIL,
                voltmart_store::session::DEMO_PASSWORD,
            )
        });
        assert!(!ok.unwrap());
    }
}
