//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With f64:                                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Discounts make it worse:                                               │
//! │    $19.99 × 3 × 0.95 = 56.971499999...  → which cent?                  │
//! │                                                                         │
//! │  OUR SOLUTION: Exact base-10 decimals                                   │
//! │    19.99 × 3 × 0.95 = 56.9715 exactly                                  │
//! │    Rounding happens once, at display time                              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shopcart_core::money::Money;
//!
//! // Create from cents or whole units
//! let price = Money::from_cents(1099); // $10.99
//! let laptop = Money::from_major(1000); // $1000.00
//!
//! // Arithmetic operations
//! let doubled = price * 2;                    // $21.98
//! let total = price + Money::from_cents(500); // $15.99
//! assert_eq!(total.to_string(), "$15.99");
//! assert_eq!((laptop * 4).halve(), Money::from_major(2000));
//! # let _ = doubled;
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::types::Percentage;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in currency units, held as an exact decimal.
///
/// ## Design Decisions
/// - **Decimal (signed)**: negative values appear when a percentage above
///   100 is applied; they are kept rather than clamped
/// - **Single field tuple struct**: zero-cost wrapper over `Decimal`
/// - **Transparent serde**: serializes exactly like the inner decimal
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product.price ──► CartItem snapshot ──► line total                     │
/// │                                              │                          │
/// │                        DiscountStrategy ◄────┤                          │
/// │                                              ▼                          │
/// │                                   Cart::calculate_total_bill            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Wraps an exact decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use shopcart_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.to_string(), "$10.99");
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    /// Creates a Money value from whole currency units.
    #[inline]
    pub fn from_major(units: i64) -> Self {
        Money(Decimal::from(units))
    }

    /// Returns the exact underlying amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use shopcart_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299); // $2.99
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total, Money::from_cents(897)); // $8.97
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * Decimal::from(qty))
    }

    /// Divides the amount by two with no rounding.
    ///
    /// Odd cent amounts keep their half cent: `$0.01 / 2 = $0.005`.
    #[inline]
    pub fn halve(&self) -> Self {
        Money(self.0 / Decimal::from(2))
    }

    /// Applies a percentage discount and returns the discounted amount.
    ///
    /// `amount * (1 - percentage / 100)`, computed exactly. The percentage is
    /// not bounds checked: 150% yields a negative amount.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal_macros::dec;
    /// use shopcart_core::money::Money;
    /// use shopcart_core::types::Percentage;
    ///
    /// let subtotal = Money::from_major(2000);
    /// let discounted = subtotal.apply_percentage_discount(Percentage::new(dec!(5)));
    /// assert_eq!(discounted, Money::from_major(1900));
    /// ```
    pub fn apply_percentage_discount(&self, percentage: Percentage) -> Money {
        Money(self.0 * percentage.remaining_fraction())
    }

    /// Returns the amount rounded to cents (banker's rounding).
    pub fn round_to_cents(&self) -> Money {
        Money(self.0.round_dp(2))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as `$1234.50`, rounded to cents for display only.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.round_to_cents().0;
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        write!(f, "{}${:.2}", sign, rounded.abs())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
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

/// Multiplication by a quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
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
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.amount(), dec!(10.99));
        assert_eq!(money, Money::new(dec!(10.990)));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::zero()), "$0.00");
        assert_eq!(format!("{}", Money::from_major(1900)), "$1900.00");
    }

    #[test]
    fn test_display_rounds_half_cents() {
        // Banker's rounding: 0.005 → 0.00, 0.015 → 0.02
        assert_eq!(Money::new(dec!(0.005)).to_string(), "$0.00");
        assert_eq!(Money::new(dec!(0.015)).to_string(), "$0.02");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_major(10);
        let b = Money::from_major(5);

        assert_eq!(a + b, Money::from_major(15));
        assert_eq!(a - b, Money::from_major(5));
        assert_eq!(a * 3, Money::from_major(30));

        let mut c = a;
        c += b;
        c -= Money::from_major(1);
        assert_eq!(c, Money::from_major(14));
    }

    #[test]
    fn test_halve_keeps_fractions() {
        assert_eq!(Money::from_major(4000).halve(), Money::from_major(2000));
        assert_eq!(Money::from_major(3000).halve(), Money::from_major(1500));
        assert_eq!(Money::from_cents(1).halve(), Money::new(dec!(0.005)));
    }

    #[test]
    fn test_percentage_discount() {
        let subtotal = Money::from_major(100);
        let discounted = subtotal.apply_percentage_discount(Percentage::new(dec!(10)));
        assert_eq!(discounted, Money::from_major(90));
    }

    #[test]
    fn test_percentage_discount_out_of_range_is_not_clamped() {
        let subtotal = Money::from_major(100);
        let over = subtotal.apply_percentage_discount(Percentage::new(dec!(150)));
        assert_eq!(over, Money::from_major(-50));
        assert!(over.is_negative());

        let under = subtotal.apply_percentage_discount(Percentage::new(dec!(-10)));
        assert_eq!(under, Money::from_major(110));
    }

    #[test]
    fn test_sum() {
        let total: Money = [Money::from_major(1), Money::from_cents(50)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::from_cents(150));
    }

    #[test]
    fn test_zero_and_checks() {
        assert!(Money::zero().is_zero());
        assert!(!Money::zero().is_negative());
        assert!(Money::from_cents(-1).is_negative());
        assert_eq!(Money::default(), Money::zero());
    }

    #[test]
    fn test_round_to_cents() {
        assert_eq!(
            Money::new(dec!(56.9715)).round_to_cents(),
            Money::from_cents(5697)
        );
    }

    #[test]
    fn test_serializes_as_decimal_string() {
        let json = serde_json::to_string(&Money::from_cents(1099)).unwrap();
        assert_eq!(json, "\"10.99\"");
    }
}
