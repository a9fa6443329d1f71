//! # Domain Types
//!
//! Core domain types used throughout VoltMart.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    CartItem     │   │  WishlistItem   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id, slug       │◄──│  product        │   │  product        │       │
//! │  │  brand/category │   │  quantity       │   │  added_at       │       │
//! │  │  price, stock   │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │     Address     │   │      Order      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id, email      │──►│  id, postal     │   │  order_id (ORD) │       │
//! │  │  addresses      │   │  is_default     │   │  items snapshot │       │
//! │  │  orders ────────┼──────────────────────►│  totals, status │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! Cart items, wishlist items and order lines embed a full copy of the
//! product. Persisted state therefore renders even if the catalog changes
//! between sessions, and placed orders keep the price the customer paid.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so GST at 18% is 1800 bps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for config convenience).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate(crate::DEFAULT_TAX_RATE_BPS)
    }
}

// =============================================================================
// Catalog Types
// =============================================================================

/// A product in the catalog. Immutable for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub brand: String,
    /// Category display name (matches `Category::name`).
    pub category: String,
    #[serde(default)]
    pub subcategory: String,
    pub price: Money,
    /// List price before the storefront discount, if any.
    #[serde(default)]
    pub original_price: Option<Money>,
    /// Advertised discount percentage, if the catalog states one.
    #[serde(default)]
    pub discount: Option<u32>,
    #[serde(default)]
    pub images: Vec<String>,
    /// Average review score, 0.0 - 5.0.
    pub rating: f64,
    pub reviews_count: u32,
    pub stock: u32,
    #[serde(default)]
    pub description: String,
    /// Free-form specification table (e.g. "Voltage" -> "5V").
    #[serde(default)]
    pub specs: BTreeMap<String, String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub trending: bool,
    #[serde(default)]
    pub deal_of_day: bool,
}

impl Product {
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// A top-level catalog category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub image: String,
    pub product_count: u32,
    pub subcategories: Vec<String>,
}

/// A product brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Brand {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub logo: String,
}

// =============================================================================
// Cart & Wishlist
// =============================================================================

/// A line in the shopping cart. At most one per product id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    pub fn new(product: Product, quantity: u32) -> Self {
        CartItem { product, quantity }
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.product.price * self.quantity
    }
}

/// A saved product. At most one per product id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct WishlistItem {
    pub product: Product,
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

// =============================================================================
// Addresses
// =============================================================================

/// A postal address in a user's address book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Address {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub address_line1: String,
    #[serde(default)]
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: String,
    #[serde(default)]
    pub is_default: bool,
}

/// Address form input: everything but the id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewAddress {
    pub name: String,
    pub phone: String,
    pub address_line1: String,
    #[serde(default)]
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: String,
    #[serde(default)]
    pub is_default: bool,
}

impl NewAddress {
    /// Assigns a fresh id.
    pub fn into_address(self) -> Address {
        Address {
            id: uuid::Uuid::new_v4().to_string(),
            name: self.name,
            phone: self.phone,
            address_line1: self.address_line1,
            address_line2: self.address_line2,
            city: self.city,
            state: self.state,
            pincode: self.pincode,
            is_default: self.is_default,
        }
    }
}

/// Partial address update. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AddressPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<Option<String>>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub is_default: Option<bool>,
}

impl AddressPatch {
    pub fn apply_to(self, address: &mut Address) {
        if let Some(name) = self.name {
            address.name = name;
        }
        if let Some(phone) = self.phone {
            address.phone = phone;
        }
        if let Some(line1) = self.address_line1 {
            address.address_line1 = line1;
        }
        if let Some(line2) = self.address_line2 {
            address.address_line2 = line2;
        }
        if let Some(city) = self.city {
            address.city = city;
        }
        if let Some(state) = self.state {
            address.state = state;
        }
        if let Some(pincode) = self.pincode {
            address.pincode = pincode;
        }
        if let Some(is_default) = self.is_default {
            address.is_default = is_default;
        }
    }
}

// =============================================================================
// Users
// =============================================================================

/// A storefront account as held by the session (never carries a password).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub addresses: Vec<Address>,
    #[serde(default)]
    pub orders: Vec<Order>,
}

impl User {
    pub fn default_address(&self) -> Option<&Address> {
        self.addresses.iter().find(|a| a.is_default)
    }

    pub fn find_order(&self, order_id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.order_id == order_id)
    }
}

/// Partial profile update from the edit-profile page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<Option<String>>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none()
    }

    pub fn apply_to(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(phone) = &self.phone {
            user.phone = phone.clone();
        }
    }
}

// =============================================================================
// Orders
// =============================================================================

/// Fulfilment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Position on the tracking timeline
    /// (pending → processing → shipped → delivered).
    ///
    /// Cancelled orders are off the timeline and return `None`.
    pub fn progress_step(&self) -> Option<usize> {
        match self {
            OrderStatus::Pending => Some(0),
            OrderStatus::Processing => Some(1),
            OrderStatus::Shipped => Some(2),
            OrderStatus::Delivered => Some(3),
            OrderStatus::Cancelled => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the customer chose to pay. Nothing is charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum PaymentMethod {
    #[default]
    Card,
    Upi,
    Netbanking,
    Cod,
}

impl std::str::FromStr for PaymentMethod {
    type Err = crate::error::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "card" => Ok(PaymentMethod::Card),
            "upi" => Ok(PaymentMethod::Upi),
            "netbanking" => Ok(PaymentMethod::Netbanking),
            "cod" => Ok(PaymentMethod::Cod),
            other => Err(crate::error::ValidationError::InvalidFormat {
                field: "paymentMethod".to_string(),
                reason: format!("unknown payment method '{}'", other),
            }),
        }
    }
}

/// A placed order. Items and totals are frozen at purchase time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Order {
    /// Internal id (UUID v4).
    pub id: String,
    /// Human-facing id, `ORD` + 10 characters.
    pub order_id: String,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
    pub status: OrderStatus,
    pub items: Vec<CartItem>,
    pub subtotal: Money,
    pub discount: Money,
    pub tax: Money,
    pub shipping: Money,
    pub total: Money,
    pub shipping_address: Address,
    pub payment_method: PaymentMethod,
    /// Carrier-facing id, `TRK` + 10 characters.
    #[serde(default)]
    pub tracking_id: Option<String>,
}

impl Order {
    /// Total number of units across all lines.
    pub fn unit_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_default_is_gst() {
        assert_eq!(TaxRate::default().bps(), 1800);
        assert_eq!(TaxRate::from_percentage(18.0).bps(), 1800);
        assert!((TaxRate::from_bps(1800).percentage() - 18.0).abs() < 0.001);
    }

    #[test]
    fn test_order_status_progress() {
        assert_eq!(OrderStatus::Pending.progress_step(), Some(0));
        assert_eq!(OrderStatus::Delivered.progress_step(), Some(3));
        assert_eq!(OrderStatus::Cancelled.progress_step(), None);
    }

    #[test]
    fn test_order_status_wire_format() {
        let json = serde_json::to_string(&OrderStatus::Processing).unwrap();
        assert_eq!(json, "\"processing\"");
    }

    #[test]
    fn test_payment_method_parsing() {
        assert_eq!("UPI".parse::<PaymentMethod>().unwrap(), PaymentMethod::Upi);
        assert_eq!("cod".parse::<PaymentMethod>().unwrap(), PaymentMethod::Cod);
        assert!("bitcoin".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_address_patch_only_touches_given_fields() {
        let mut address = NewAddress {
            name: "Asha".to_string(),
            phone: "9876543210".to_string(),
            address_line1: "12 MG Road".to_string(),
            address_line2: Some("Flat 4".to_string()),
            city: "Pune".to_string(),
            state: "MH".to_string(),
            pincode: "411001".to_string(),
            is_default: false,
        }
        .into_address();

        AddressPatch {
            city: Some("Mumbai".to_string()),
            address_line2: Some(None),
            ..Default::default()
        }
        .apply_to(&mut address);

        assert_eq!(address.city, "Mumbai");
        assert_eq!(address.address_line2, None);
        assert_eq!(address.name, "Asha");
    }

    #[test]
    fn test_user_decodes_without_optional_lists() {
        let json = r#"{"id":"u1","email":"a@x.com","name":"A"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert!(user.addresses.is_empty());
        assert!(user.orders.is_empty());
        assert_eq!(user.phone, None);
    }
}
