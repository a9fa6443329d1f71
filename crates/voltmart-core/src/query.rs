//! # Query Engine
//!
//! Pure, stateless filtering and sorting over catalog listings.
//!
//! ## Category Page Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Catalog::list()                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  filter_by_category(products, Some("Sensors"))                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  apply_filters(products, &FilterCriteria)   price ∧ brand ∧ rating ∧    │
//! │       │                                     stock, all ANDed            │
//! │       ▼                                                                 │
//! │  sort(products, SortKey)                    stable for ties             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function takes a slice and returns a fresh `Vec`; nothing here can
//! fail, and an empty input always yields an empty output.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::Product;

/// Upper bound of the price slider on the category page.
pub const DEFAULT_MAX_PRICE: Money = Money::from_units(10_000);

// =============================================================================
// Filter Criteria
// =============================================================================

/// Category page filter state.
///
/// `brands` empty means "any brand".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FilterCriteria {
    /// Inclusive `(min, max)` price bounds.
    pub price_range: (Money, Money),
    pub brands: BTreeSet<String>,
    pub min_rating: f64,
    pub in_stock_only: bool,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        FilterCriteria {
            price_range: (Money::zero(), DEFAULT_MAX_PRICE),
            brands: BTreeSet::new(),
            min_rating: 0.0,
            in_stock_only: false,
        }
    }
}

impl FilterCriteria {
    /// Returns true if `product` passes every predicate.
    pub fn matches(&self, product: &Product) -> bool {
        let (min, max) = self.price_range;
        min <= product.price
            && product.price <= max
            && (self.brands.is_empty() || self.brands.contains(&product.brand))
            && product.rating >= self.min_rating
            && (!self.in_stock_only || product.stock > 0)
    }
}

// =============================================================================
// Sort Key
// =============================================================================

/// Sort orders offered by listing pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum SortKey {
    /// Catalog order.
    #[default]
    Popularity,
    PriceAsc,
    PriceDesc,
    RatingDesc,
    /// Reverse of the incoming order.
    Newest,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Popularity => "popularity",
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
            SortKey::RatingDesc => "rating-desc",
            SortKey::Newest => "newest",
        }
    }

    /// Parses a UI sort string, falling back to popularity for anything
    /// unrecognised.
    pub fn parse_lenient(s: &str) -> SortKey {
        s.parse().unwrap_or_default()
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "popularity" => Ok(SortKey::Popularity),
            "price-asc" | "price-low" => Ok(SortKey::PriceAsc),
            "price-desc" | "price-high" => Ok(SortKey::PriceDesc),
            "rating-desc" | "rating" => Ok(SortKey::RatingDesc),
            "newest" => Ok(SortKey::Newest),
            other => Err(UnknownSortKey(other.to_string())),
        }
    }
}

/// Returned by `SortKey::from_str` for strings outside the known set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort key: {0}")]
pub struct UnknownSortKey(pub String);

// =============================================================================
// Pipeline Stages
// =============================================================================

/// Keeps products whose category name equals `category`; `None` passes all.
pub fn filter_by_category(products: &[Product], category: Option<&str>) -> Vec<Product> {
    match category {
        None => products.to_vec(),
        Some(name) => products
            .iter()
            .filter(|p| p.category == name)
            .cloned()
            .collect(),
    }
}

/// Keeps products matching every predicate of `criteria`.
pub fn apply_filters(products: &[Product], criteria: &FilterCriteria) -> Vec<Product> {
    products
        .iter()
        .filter(|p| criteria.matches(p))
        .cloned()
        .collect()
}

/// Sorts a copy of `products` by `key`.
///
/// `sort_by` is a stable sort, so ties keep their incoming order.
pub fn sort(products: &[Product], key: SortKey) -> Vec<Product> {
    let mut sorted = products.to_vec();
    match key {
        SortKey::Popularity => {}
        SortKey::PriceAsc => sorted.sort_by(|a, b| a.price.cmp(&b.price)),
        SortKey::PriceDesc => sorted.sort_by(|a, b| b.price.cmp(&a.price)),
        SortKey::RatingDesc => sorted.sort_by(|a, b| {
            b.rating
                .partial_cmp(&a.rating)
                .unwrap_or(Ordering::Equal)
        }),
        SortKey::Newest => sorted.reverse(),
    }
    sorted
}

/// Case-insensitive substring search over name, category, brand and tags.
///
/// The query is trimmed, and a blank query returns no results rather than
/// the whole catalog.
///
/// ## Example
/// ```rust
/// use voltmart_core::catalog::Catalog;
/// use voltmart_core::query::search;
///
/// let catalog = Catalog::seeded();
/// assert!(search(catalog.list(), "   ").is_empty());
/// assert!(!search(catalog.list(), "ESP32").is_empty());
/// ```
pub fn search(products: &[Product], query: &str) -> Vec<Product> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    products
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.category.to_lowercase().contains(&needle)
                || p.brand.to_lowercase().contains(&needle)
                || p.tags.iter().any(|t| t.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// The category page: filter by category, apply filters, then sort.
pub fn browse(
    products: &[Product],
    category: Option<&str>,
    criteria: &FilterCriteria,
    key: SortKey,
) -> Vec<Product> {
    let in_category = filter_by_category(products, category);
    let filtered = apply_filters(&in_category, criteria);
    sort(&filtered, key)
}

/// Percentage saved against the original price, rounded to the nearest
/// whole percent. Zero when there is no markdown.
pub fn discount_percent(original: Option<Money>, price: Money) -> u32 {
    match original {
        Some(original) if original > price && original.is_positive() => {
            let saved = (original - price).units() as i128;
            let pct = (saved * 200 + original.units() as i128) / (original.units() as i128 * 2);
            pct as u32
        }
        _ => 0,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
