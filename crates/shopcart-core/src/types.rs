//! # Domain Types
//!
//! Core value types used throughout shopcart.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐            ┌─────────────────────┐            │
//! │  │      Product        │            │     Percentage      │            │
//! │  │  ─────────────────  │            │  ─────────────────  │            │
//! │  │  name (identity)    │            │  value (Decimal)    │            │
//! │  │  price (Money)      │            │  5 = 5% off         │            │
//! │  │  available_count    │            └─────────────────────┘            │
//! │  │  available (derived)│                                               │
//! │  └─────────────────────┘                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! `Product` is a plain value. A cart line stores its own clone, so the
//! inventory count inside a cart line never flows back into the catalog.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::Money;

// =============================================================================
// Percentage
// =============================================================================

/// A discount percentage, where `5` means 5% off.
///
/// 0-100 is the expected range. Values outside it are accepted as-is and
/// produce inflated or negative totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(Decimal);

impl Percentage {
    /// Creates a percentage from its decimal value.
    #[inline]
    pub const fn new(value: Decimal) -> Self {
        Percentage(value)
    }

    /// Creates a percentage from a whole number (for convenience).
    pub fn from_whole(value: u32) -> Self {
        Percentage(Decimal::from(value))
    }

    /// Returns the percentage value (5 for 5%).
    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Returns `1 - value / 100`, the share of the price still charged.
    pub fn remaining_fraction(&self) -> Decimal {
        Decimal::ONE - self.0 / Decimal::from(100)
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog entry.
///
/// ## Invariant
/// `available == (available_count > 0)` at all times. The fields are private
/// so every mutation goes through a method that recomputes the flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Display name; also the cart lookup key.
    name: String,

    /// Unit price.
    price: Money,

    /// Derived from `available_count`.
    available: bool,

    /// Units remaining.
    available_count: u32,
}

impl Product {
    /// Creates a product with the given stock level.
    pub fn new(name: impl Into<String>, price: Money, available_count: u32) -> Self {
        Product {
            name: name.into(),
            price,
            available: available_count > 0,
            available_count,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn price(&self) -> Money {
        self.price
    }

    /// True while at least one unit remains.
    #[inline]
    pub fn is_available(&self) -> bool {
        self.available
    }

    #[inline]
    pub fn available_count(&self) -> u32 {
        self.available_count
    }

    /// Sets the stock level directly.
    pub fn set_available_count(&mut self, available_count: u32) {
        self.available_count = available_count;
        self.available = available_count > 0;
    }

    /// Takes `quantity` units out of stock.
    ///
    /// Does nothing when fewer than `quantity` units remain. Callers that need
    /// to know whether the units were reserved must check
    /// [`available_count`](Self::available_count) first.
    pub fn decrease_available_count(&mut self, quantity: u32) {
        if self.available_count >= quantity {
            self.available_count -= quantity;
            self.available = self.available_count > 0;
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{name: \"{}\", price: {}, available {}}}",
            self.name, self.price, self.available
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn laptop(count: u32) -> Product {
        Product::new("Laptop", Money::from_major(1000), count)
    }

    #[test]
    fn test_available_follows_count() {
        let mut product = laptop(3);
        assert!(product.is_available());

        product.set_available_count(0);
        assert!(!product.is_available());

        product.set_available_count(7);
        assert!(product.is_available());
        assert_eq!(product.available_count(), 7);
    }

    #[test]
    fn test_new_with_zero_stock_is_unavailable() {
        assert!(!laptop(0).is_available());
    }

    #[test]
    fn test_decrease_available_count() {
        let mut product = laptop(5);
        product.decrease_available_count(2);
        assert_eq!(product.available_count(), 3);
        assert!(product.is_available());

        product.decrease_available_count(3);
        assert_eq!(product.available_count(), 0);
        assert!(!product.is_available());
    }

    #[test]
    fn test_decrease_beyond_stock_is_noop() {
        let mut product = laptop(2);
        product.decrease_available_count(5);
        assert_eq!(product.available_count(), 2);
        assert!(product.is_available());
    }

    #[test]
    fn test_clone_is_independent() {
        let original = laptop(10);
        let mut copy = original.clone();
        copy.decrease_available_count(4);

        assert_eq!(original.available_count(), 10);
        assert_eq!(copy.available_count(), 6);
        assert_eq!(copy.name(), original.name());
        assert_eq!(copy.price(), original.price());
    }

    #[test]
    fn test_product_display() {
        assert_eq!(
            laptop(1).to_string(),
            "{name: \"Laptop\", price: $1000.00, available true}"
        );
        assert_eq!(
            Product::new("Headphones", Money::from_major(50), 0).to_string(),
            "{name: \"Headphones\", price: $50.00, available false}"
        );
    }

    #[test]
    fn test_percentage() {
        let five = Percentage::from_whole(5);
        assert_eq!(five.value(), dec!(5));
        assert_eq!(five.remaining_fraction(), dec!(0.95));
        assert_eq!(five.to_string(), "5%");
        assert_eq!(Percentage::new(dec!(12.50)).to_string(), "12.5%");
    }
}
