//! # Checkout Module
//!
//! Order pricing, coupons and order-code generation.
//!
//! ## Pricing Formula
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  subtotal = Σ price × quantity                                          │
//! │  shipping = 0      if subtotal > 500                                    │
//! │           = 50     otherwise                                            │
//! │  tax      = round_half_up(subtotal × 18%)                               │
//! │  discount = coupon discount (cart page quote only)                      │
//! │                                                                         │
//! │  total    = subtotal + shipping + tax - discount                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tax is charged on the subtotal *before* any coupon discount. Placed
//! orders never carry a coupon, so their `discount` is always zero.
//!
//! ## Usage
//! ```rust
//! use voltmart_core::checkout::{OrderTotals, PricingRules};
//! use voltmart_core::money::Money;
//!
//! let totals = OrderTotals::compute(Money::from_units(1299), Money::zero(), &PricingRules::default());
//! assert_eq!(totals.shipping, Money::zero());
//! assert_eq!(totals.tax.units(), 234);
//! assert_eq!(totals.total.units(), 1533);
//! ```

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Address, CartItem, Order, OrderStatus, PaymentMethod, TaxRate};
use crate::{DEFAULT_SHIPPING_FEE, DEFAULT_TAX_RATE_BPS, FREE_SHIPPING_THRESHOLD};

pub const ORDER_ID_PREFIX: &str = "ORD";
pub const TRACKING_ID_PREFIX: &str = "TRK";
/// Characters after the prefix in an order or tracking id.
pub const CODE_LEN: usize = 10;

const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

// =============================================================================
// Pricing Rules
// =============================================================================

/// Store-wide pricing parameters, normally built from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingRules {
    pub tax_rate: TaxRate,
    /// Subtotals strictly above this ship free.
    pub free_shipping_threshold: Money,
    pub shipping_fee: Money,
}

impl Default for PricingRules {
    fn default() -> Self {
        PricingRules {
            tax_rate: TaxRate::from_bps(DEFAULT_TAX_RATE_BPS),
            free_shipping_threshold: FREE_SHIPPING_THRESHOLD,
            shipping_fee: DEFAULT_SHIPPING_FEE,
        }
    }
}

impl PricingRules {
    pub fn shipping_for(&self, subtotal: Money) -> Money {
        if subtotal > self.free_shipping_threshold {
            Money::zero()
        } else {
            self.shipping_fee
        }
    }
}

// =============================================================================
// Order Totals
// =============================================================================

/// Price breakdown shown on the cart page and frozen into each order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderTotals {
    pub subtotal: Money,
    pub discount: Money,
    pub tax: Money,
    pub shipping: Money,
    pub total: Money,
}

impl OrderTotals {
    pub fn compute(subtotal: Money, discount: Money, rules: &PricingRules) -> Self {
        let shipping = rules.shipping_for(subtotal);
        let tax = subtotal.calculate_tax(rules.tax_rate);

        OrderTotals {
            subtotal,
            discount,
            tax,
            shipping,
            total: subtotal + shipping + tax - discount,
        }
    }
}

/// Sum of line totals.
pub fn subtotal(items: &[CartItem]) -> Money {
    items.iter().map(CartItem::line_total).sum()
}

/// Cart page quote: totals for `items` with an optional coupon applied.
pub fn quote(items: &[CartItem], coupon: Option<Coupon>, rules: &PricingRules) -> OrderTotals {
    let subtotal = subtotal(items);
    let discount = coupon
        .map(|c| c.discount_for(subtotal))
        .unwrap_or_default();
    OrderTotals::compute(subtotal, discount, rules)
}

// =============================================================================
// Coupons
// =============================================================================

/// Coupon codes the cart page accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "UPPERCASE")]
#[ts(export)]
pub enum Coupon {
    /// 10% off the subtotal.
    Save10,
}

impl Coupon {
    /// Looks up a coupon code, ignoring case and surrounding whitespace.
    ///
    /// A blank code means "no coupon"; anything else unknown is rejected.
    pub fn parse(code: &str) -> CoreResult<Option<Coupon>> {
        let code = code.trim();
        if code.is_empty() {
            return Ok(None);
        }
        match code.to_ascii_uppercase().as_str() {
            "SAVE10" => Ok(Some(Coupon::Save10)),
            _ => Err(CoreError::InvalidCoupon(code.to_string())),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Coupon::Save10 => "SAVE10",
        }
    }

    pub fn discount_for(&self, subtotal: Money) -> Money {
        match self {
            Coupon::Save10 => subtotal.percentage(1000),
        }
    }
}

// =============================================================================
// Order Codes
// =============================================================================

/// `prefix` followed by ten characters from `[A-Z0-9]`.
pub fn generate_code<R: Rng + ?Sized>(prefix: &str, rng: &mut R) -> String {
    let mut code = String::with_capacity(prefix.len() + CODE_LEN);
    code.push_str(prefix);
    for _ in 0..CODE_LEN {
        let idx = rng.gen_range(0..CODE_ALPHABET.len());
        code.push(CODE_ALPHABET[idx] as char);
    }
    code
}

pub fn generate_order_id() -> String {
    generate_code(ORDER_ID_PREFIX, &mut rand::thread_rng())
}

pub fn generate_tracking_id() -> String {
    generate_code(TRACKING_ID_PREFIX, &mut rand::thread_rng())
}

// =============================================================================
// Order Construction
// =============================================================================

/// Freezes the cart into a new order.
///
/// ## Behavior
/// - Empty cart: `CoreError::EmptyCart`
/// - Status starts at `processing`
/// - No coupon: `discount` is zero
/// - Fresh UUID, order id and tracking id; no collision detection
pub fn build_order(
    items: &[CartItem],
    shipping_address: Address,
    payment_method: PaymentMethod,
    rules: &PricingRules,
) -> CoreResult<Order> {
    if items.is_empty() {
        return Err(CoreError::EmptyCart);
    }

    let totals = OrderTotals::compute(subtotal(items), Money::zero(), rules);

    Ok(Order {
        id: Uuid::new_v4().to_string(),
        order_id: generate_order_id(),
        date: Utc::now(),
        status: OrderStatus::Processing,
        items: items.to_vec(),
        subtotal: totals.subtotal,
        discount: totals.discount,
        tax: totals.tax,
        shipping: totals.shipping,
        total: totals.total,
        shipping_address,
        payment_method,
        tracking_id: Some(generate_tracking_id()),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::types::NewAddress;

    fn items(lines: &[(&str, u32)]) -> Vec<CartItem> {
        let catalog = Catalog::seeded();
        lines
            .iter()
            .map(|(id, qty)| CartItem::new(catalog.product_by_id(id).unwrap().clone(), *qty))
            .collect()
    }

    fn address() -> Address {
        NewAddress {
            name: "Ravi Kumar".to_string(),
            phone: "9876543210".to_string(),
            address_line1: "42 Residency Road".to_string(),
            address_line2: None,
            city: "Bengaluru".to_string(),
            state: "Karnataka".to_string(),
            pincode: "560025".to_string(),
            is_default: true,
        }
        .into_address()
    }

    #[test]
    fn test_shipping_threshold_is_strict() {
        let rules = PricingRules::default();
        assert_eq!(rules.shipping_for(Money::from_units(500)).units(), 50);
        assert_eq!(rules.shipping_for(Money::from_units(501)).units(), 0);
        assert_eq!(rules.shipping_for(Money::zero()).units(), 50);
    }

    #[test]
    fn test_totals_small_order_pays_shipping() {
        // HC-SR04 ₹99 × 2 = ₹198; tax 35.64 → 36
        let totals = quote(&items(&[("7", 2)]), None, &PricingRules::default());
        assert_eq!(totals.subtotal.units(), 198);
        assert_eq!(totals.shipping.units(), 50);
        assert_eq!(totals.tax.units(), 36);
        assert_eq!(totals.total.units(), 198 + 50 + 36);
    }

    #[test]
    fn test_quote_with_coupon() {
        // Uno ₹1299: discount 130, tax on the pre-discount subtotal
        let totals = quote(
            &items(&[("1", 1)]),
            Some(Coupon::Save10),
            &PricingRules::default(),
        );
        assert_eq!(totals.discount.units(), 130);
        assert_eq!(totals.tax.units(), 234);
        assert_eq!(totals.total.units(), 1299 + 234 - 130);
    }

    #[test]
    fn test_coupon_parse() {
        assert_eq!(Coupon::parse("save10").unwrap(), Some(Coupon::Save10));
        assert_eq!(Coupon::parse(" SAVE10 ").unwrap(), Some(Coupon::Save10));
        assert_eq!(Coupon::Save10.code(), "SAVE10");
        assert_eq!(Coupon::parse("").unwrap(), None);
        assert!(matches!(
            Coupon::parse("FREESHIP"),
            Err(CoreError::InvalidCoupon(code)) if code == "FREESHIP"
        ));
    }

    #[test]
    fn test_generated_codes() {
        let order_id = generate_order_id();
        assert_eq!(order_id.len(), 13);
        assert!(order_id.starts_with("ORD"));
        assert!(order_id[3..]
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));

        assert!(generate_tracking_id().starts_with("TRK"));
    }

    #[test]
    fn test_build_order() {
        let lines = items(&[("1", 1), ("6", 3)]);
        let order = build_order(
            &lines,
            address(),
            PaymentMethod::Upi,
            &PricingRules::default(),
        )
        .unwrap();

        assert_eq!(order.items.len(), 2);
        assert_eq!(order.unit_count(), 4);
        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(order.discount, Money::zero());
        // 1299 + 3 × 349 = 2346
        assert_eq!(order.subtotal.units(), 2346);
        assert_eq!(order.shipping, Money::zero());
        assert_eq!(order.total, order.subtotal + order.shipping + order.tax);
        assert!(order.tracking_id.as_deref().unwrap().starts_with("TRK"));
    }

    #[test]
    fn test_unit_count_does_not_overflow() {
        let lines = items(&[("1", u32::MAX), ("6", 2)]);
        let order = build_order(&lines, address(), PaymentMethod::Cod, &PricingRules::default())
            .unwrap();
        assert_eq!(order.unit_count(), u64::from(u32::MAX) + 2);
    }

    #[test]
    fn test_build_order_rejects_empty_cart() {
        let result = build_order(&[], address(), PaymentMethod::Cod, &PricingRules::default());
        assert!(matches!(result, Err(CoreError::EmptyCart)));
    }
}
