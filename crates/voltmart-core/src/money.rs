//! # Money Module
//!
//! Provides the `Money` type for handling rupee amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer rupees                                           │
//! │    The catalog never prices below one rupee, and every derived amount   │
//! │    (tax, coupon discount) is rounded to a whole rupee.                  │
//! │    GST on ₹1,299 at 18% = 233.82 → ₹234                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use voltmart_core::money::Money;
//!
//! let price = Money::from_units(1299);
//! let doubled = price * 2;
//! assert_eq!(doubled.units(), 2598);
//! assert_eq!(doubled.to_string(), "₹2,598");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole rupees.
///
/// ## Design Decisions
/// - **i64 (signed)**: discounts subtract, so intermediate values may dip
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Transparent serde**: persisted and sent to the frontend as a number
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[serde(transparent)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole rupees.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the value in whole rupees.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Zero rupees.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Calculates tax at the given rate, rounded half up to a whole rupee.
    ///
    /// ## Implementation
    /// Integer math in basis points: `(amount * bps + 5000) / 10000`.
    /// The +5000 is the half-rupee rounding term.
    ///
    /// ## Example
    /// ```rust
    /// use voltmart_core::money::Money;
    /// use voltmart_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_units(1299);
    /// // 1299 × 18% = 233.82 → 234
    /// assert_eq!(subtotal.calculate_tax(TaxRate::from_bps(1800)).units(), 234);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        self.percentage(rate.bps())
    }

    /// Returns `bps` basis points of this amount, rounded half up.
    ///
    /// Used for coupon discounts as well as tax: 1000 bps is 10%.
    pub fn percentage(&self, bps: u32) -> Money {
        // i128 keeps large carts from overflowing before the division
        let scaled = (self.0 as i128 * bps as i128 + 5000) / 10000;
        Money(scaled as i64)
    }

    /// Multiplies a unit price by a quantity.
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Rupee display with Indian digit grouping: `₹1,23,456`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}₹{}", sign, group_indian(self.0.unsigned_abs()))
    }
}

/// Groups digits the en-IN way: last three, then pairs.
fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by a cart quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_indian_grouping() {
        assert_eq!(Money::from_units(0).to_string(), "₹0");
        assert_eq!(Money::from_units(999).to_string(), "₹999");
        assert_eq!(Money::from_units(1299).to_string(), "₹1,299");
        assert_eq!(Money::from_units(123456).to_string(), "₹1,23,456");
        assert_eq!(Money::from_units(12345678).to_string(), "₹1,23,45,678");
        assert_eq!(Money::from_units(-550).to_string(), "-₹550");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_units(1000);
        let b = Money::from_units(500);

        assert_eq!((a + b).units(), 1500);
        assert_eq!((a - b).units(), 500);
        assert_eq!((a * 3).units(), 3000);

        let total: Money = [a, b, b].into_iter().sum();
        assert_eq!(total.units(), 2000);
    }

    #[test]
    fn test_tax_rounds_half_up() {
        let rate = TaxRate::from_bps(1800);
        // 250 × 18% = 45.0
        assert_eq!(Money::from_units(250).calculate_tax(rate).units(), 45);
        // 25 × 18% = 4.5 → 5
        assert_eq!(Money::from_units(25).calculate_tax(rate).units(), 5);
        // 1299 × 18% = 233.82 → 234
        assert_eq!(Money::from_units(1299).calculate_tax(rate).units(), 234);
        // 1201 × 18% = 216.18 → 216
        assert_eq!(Money::from_units(1201).calculate_tax(rate).units(), 216);
    }

    #[test]
    fn test_percentage_for_coupons() {
        // 10% of 1299 = 129.9 → 130
        assert_eq!(Money::from_units(1299).percentage(1000).units(), 130);
        assert_eq!(Money::from_units(0).percentage(1000).units(), 0);
    }

    #[test]
    fn test_serializes_as_plain_number() {
        let json = serde_json::to_string(&Money::from_units(499)).unwrap();
        assert_eq!(json, "499");
        let back: Money = serde_json::from_str("499").unwrap();
        assert_eq!(back, Money::from_units(499));
    }
}
