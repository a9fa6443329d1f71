//! # Catalog Commands
//!
//! Read-only browsing: home page shelves, category pages, product pages
//! and search. None of these touch persisted state.
//!
//! ## Category Page
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  /category/sensors?sort=price-low                                       │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌─────────────────────────────────────────────┐  │
//! │  │ FILTERS          │  │ 3 products                 Sort: price-low  │  │
//! │  │ Price 0 - 10000  │  │ ┌───────────┐ ┌───────────┐ ┌───────────┐   │  │
//! │  │ ☐ Adafruit       │  │ │ HC-SR04   │ │ MPU6050   │ │ DHT22     │   │  │
//! │  │ ☐ SparkFun       │  │ │ ₹99       │ │ ₹249      │ │ ₹349      │   │  │
//! │  │ Rating ≥ 0       │  │ └───────────┘ └───────────┘ └───────────┘   │  │
//! │  │ ☐ In stock only  │  │                                             │  │
//! │  └──────────────────┘  └─────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  browse_category(catalog, "sensors", None, Some("price-low"))          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;
use voltmart_core::catalog::{
    DEALS_SHELF_LEN, FEATURED_SHELF_LEN, RELATED_LEN, TRENDING_SHELF_LEN,
};
use voltmart_core::query::{self, FilterCriteria, SortKey};
use voltmart_core::validation::validate_search_query;
use voltmart_core::{Brand, Catalog, Category, CoreError, Product};

use crate::error::ApiResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePage {
    pub featured: Vec<Product>,
    pub trending: Vec<Product>,
    pub deals_of_day: Vec<Product>,
    pub categories: Vec<Category>,
    pub brands: Vec<Brand>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPage {
    pub category: Category,
    /// Brands present in this category, for the filter sidebar.
    pub available_brands: Vec<String>,
    pub criteria: FilterCriteria,
    pub sort: SortKey,
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub product: Product,
    pub related: Vec<Product>,
}

pub fn get_home(catalog: &Catalog) -> HomePage {
    debug!("get_home command");
    HomePage {
        featured: catalog.featured(FEATURED_SHELF_LEN),
        trending: catalog.trending(TRENDING_SHELF_LEN),
        deals_of_day: catalog.deals_of_day(DEALS_SHELF_LEN),
        categories: catalog.categories().to_vec(),
        brands: catalog.brands().to_vec(),
    }
}

pub fn list_categories(catalog: &Catalog) -> Vec<Category> {
    catalog.categories().to_vec()
}

pub fn list_brands(catalog: &Catalog) -> Vec<Brand> {
    catalog.brands().to_vec()
}

/// Runs the category page pipeline.
///
/// ## Arguments
/// * `criteria` - Sidebar filters; `None` means the initial state
/// * `sort` - UI sort string; unknown values fall back to popularity
pub fn browse_category(
    catalog: &Catalog,
    slug: &str,
    criteria: Option<FilterCriteria>,
    sort: Option<&str>,
) -> ApiResult<CategoryPage> {
    debug!(slug = %slug, sort = ?sort, "browse_category command");

    let category = catalog
        .category_by_slug(slug)
        .cloned()
        .ok_or_else(|| CoreError::CategoryNotFound(slug.to_string()))?;
    let criteria = criteria.unwrap_or_default();
    let sort = sort.map(SortKey::parse_lenient).unwrap_or_default();

    let in_category = query::filter_by_category(catalog.list(), Some(category.name.as_str()));
    let available_brands = in_category
        .iter()
        .map(|p| p.brand.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let products = query::sort(&query::apply_filters(&in_category, &criteria), sort);

    Ok(CategoryPage {
        category,
        available_brands,
        criteria,
        sort,
        products,
    })
}

/// Product detail plus up to four related products.
pub fn get_product(catalog: &Catalog, slug: &str) -> ApiResult<ProductPage> {
    debug!(slug = %slug, "get_product command");

    let product = catalog
        .product_by_slug(slug)
        .cloned()
        .ok_or_else(|| CoreError::ProductNotFound(slug.to_string()))?;
    let related = catalog.related(&product, RELATED_LEN);

    Ok(ProductPage { product, related })
}

/// Search box. A blank query yields no results.
pub fn search_products(catalog: &Catalog, query: &str) -> ApiResult<Vec<Product>> {
    let query = validate_search_query(query)?;
    debug!(query = %query, "search_products command");
    Ok(query::search(catalog.list(), &query))
}
