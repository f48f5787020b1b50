//! # Money Module
//!
//! Provides the `Money` type for prices, subtotals and discounts.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With floats:  0.1 + 0.2 = 0.30000000000000004                          │
//! │                                                                         │
//! │  A bundle of 3 × $150.00 at 30% off must show exactly:                  │
//! │    subtotal $450.00, discount $135.00, total $315.00                    │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    45000 cents × 3000 bps / 10000 = 13500 cents                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bundle_core::money::Money;
//! use bundle_core::types::DiscountRate;
//!
//! let price = Money::from_cents(15000); // $150.00
//! let subtotal = price.multiply_quantity(3);
//! let discount = subtotal.percentage(DiscountRate::from_percent(30));
//!
//! assert_eq!(discount.cents(), 13500);
//! assert_eq!((subtotal - discount).to_string(), "$315.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use ts_rs::TS;

use crate::types::DiscountRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Where Money Flows
/// ```text
/// Product.price ──► line total (× quantity) ──► subtotal
///                                                  │
///                          discount (% of subtotal) ┤
///                                                  ▼
///                                                total
/// ```
///
/// Single currency only. Values produced by the engine are never negative,
/// but the type stays signed so `Sub` cannot wrap.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use bundle_core::money::Money;
    ///
    /// let price = Money::from_cents(15000); // $150.00
    /// assert_eq!(price.cents(), 15000);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from dollars and cents.
    ///
    /// ```rust
    /// use bundle_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(150, 0).cents(), 15000);
    /// assert_eq!(Money::from_major_minor(19, 99).cents(), 1999);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-dollar portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a selected quantity.
    ///
    /// Saturates instead of overflowing on extreme price × quantity.
    ///
    /// ```rust
    /// use bundle_core::money::Money;
    ///
    /// let line_total = Money::from_cents(15000).multiply_quantity(2);
    /// assert_eq!(line_total.cents(), 30000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }

    /// Returns `rate` of this amount, rounded half-up to the cent.
    ///
    /// ## Implementation
    /// `(amount * bps + 5000) / 10000` in i128, the same rounding the
    /// price summary has always shown.
    ///
    /// ```rust
    /// use bundle_core::money::Money;
    /// use bundle_core::types::DiscountRate;
    ///
    /// let subtotal = Money::from_cents(60000); // $600.00
    /// let discount = subtotal.percentage(DiscountRate::from_percent(30));
    /// assert_eq!(discount.cents(), 18000); // $180.00
    /// ```
    pub fn percentage(&self, rate: DiscountRate) -> Money {
        let share = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(share as i64)
    }

    /// Subtracts, flooring the result at zero.
    #[inline]
    pub fn saturating_sub_floor(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0).max(0))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as `$150.00`. Display-currency formatting with a configured
/// symbol lives in the presentation layer.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(15000).to_string(), "$150.00");
        assert_eq!(Money::from_cents(500).to_string(), "$5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_percentage_of_bundle_subtotals() {
        let thirty = DiscountRate::from_percent(30);
        assert_eq!(Money::from_cents(45000).percentage(thirty).cents(), 13500);
        assert_eq!(Money::from_cents(60000).percentage(thirty).cents(), 18000);
        assert_eq!(Money::zero().percentage(thirty), Money::zero());
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        // $0.05 × 30% = 1.5 cents → 2 cents
        let share = Money::from_cents(5).percentage(DiscountRate::from_percent(30));
        assert_eq!(share.cents(), 2);

        // $0.01 × 30% = 0.3 cents → 0 cents
        let share = Money::from_cents(1).percentage(DiscountRate::from_percent(30));
        assert_eq!(share.cents(), 0);
    }

    #[test]
    fn test_full_and_zero_rate() {
        let amount = Money::from_cents(12345);
        assert_eq!(amount.percentage(DiscountRate::from_percent(100)), amount);
        assert_eq!(amount.percentage(DiscountRate::zero()), Money::zero());
    }

    #[test]
    fn test_multiply_quantity_saturates() {
        assert_eq!(Money::from_cents(299).multiply_quantity(3).cents(), 897);
        assert_eq!(Money::from_cents(i64::MAX).multiply_quantity(2).cents(), i64::MAX);
    }

    #[test]
    fn test_sum_and_floor() {
        let total: Money = [100, 250, 650].into_iter().map(Money::from_cents).sum();
        assert_eq!(total.cents(), 1000);

        let floored = Money::from_cents(100).saturating_sub_floor(Money::from_cents(300));
        assert!(floored.is_zero());
        assert!(!floored.is_negative());
    }
}
