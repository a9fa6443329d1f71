//! # voltmart-core: Pure Business Logic for VoltMart
//!
//! This crate is the **heart** of VoltMart. It holds the catalog, the
//! catalog query engine and the order pricing rules as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        VoltMart Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                Presentation Layer (out of scope)                │   │
//! │  │    Category page ──► Cart page ──► Checkout ──► Order detail    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 apps/storefront (commands)                      │   │
//! │  └──────────────┬──────────────────────────────┬───────────────────┘   │
//! │                 │                              │                        │
//! │  ┌──────────────▼──────────────┐  ┌────────────▼───────────────────┐   │
//! │  │ ★ voltmart-core (THIS) ★    │  │ voltmart-store                 │   │
//! │  │  catalog  query  checkout   │◄─│  CartStore  WishlistStore      │   │
//! │  │  money    types  validation │  │  SessionStore  KeyValueStorage │   │
//! │  └─────────────────────────────┘  └────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, CartItem, User, Order, ...)
//! - [`money`] - Integer money with tax and percentage helpers
//! - [`catalog`] - The static, read-only product catalog
//! - [`query`] - Filtering, sorting and search over products
//! - [`checkout`] - Order totals, coupons and order codes
//! - [`error`] - Domain error types
//! - [`validation`] - Form-level business rules
//!
//! ## Example Usage
//!
//! ```rust
//! use voltmart_core::catalog::Catalog;
//! use voltmart_core::query::{self, SortKey};
//!
//! let catalog = Catalog::seeded();
//! let cheapest_first = query::sort(catalog.list(), SortKey::PriceAsc);
//! assert_eq!(cheapest_first.len(), catalog.list().len());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod checkout;
pub mod error;
pub mod money;
pub mod query;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::Catalog;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// GST applied at checkout, in basis points (18%).
pub const DEFAULT_TAX_RATE_BPS: u32 = 1800;

/// Orders with a subtotal strictly above this ship for free.
pub const FREE_SHIPPING_THRESHOLD: Money = Money::from_units(500);

/// Flat shipping fee charged at or below the free-shipping threshold.
pub const DEFAULT_SHIPPING_FEE: Money = Money::from_units(50);
