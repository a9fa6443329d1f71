//! # Storefront Commands Module
//!
//! Every operation a presentation layer can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── catalog.rs   ◄─── Home shelves, category pages, product page, search
//! ├── cart.rs      ◄─── Cart manipulation and the coupon quote
//! ├── wishlist.rs  ◄─── Saved products
//! ├── account.rs   ◄─── Login, registration, profile, address book
//! ├── checkout.rs  ◄─── Place order
//! └── orders.rs    ◄─── Order history and tracking
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Presentation layer                                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  commands::cart::add_to_cart(                                           │
//! │      &storefront.catalog,   ◄── read-only, no lock                     │
//! │      &storefront.cart,      ◄── CartState, locked for one call         │
//! │      "3",                   ◄── product id                              │
//! │      Some(2),               ◄── optional quantity                       │
//! │  ) -> Result<CartResponse, ApiError>                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Serialize with serde_json for the UI                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## State Injection
//! Each command takes only the state it needs:
//! ```rust,ignore
//! // Only needs the catalog
//! fn search_products(catalog: &Catalog, query: &str)
//!
//! // Only needs the cart
//! fn get_cart(cart: &CartState)
//!
//! // Needs config, cart and session
//! async fn place_order(config: &ConfigState, cart: &CartState, session: &SessionState, ...)
//! ```
//!
//! Commands that simulate latency (`login`, `register`, `place_order`)
//! are `async`; everything else is synchronous.

pub mod account;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod orders;
pub mod wishlist;
