//! # Discount Strategies
//!
//! A closed set of pricing rules applied to one cart line.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    apply_discount(unit_price, quantity)                 │
//! │                                                                         │
//! │  Percentage(p)        price × qty × (1 - p/100)                        │
//! │                       $1000 × 2 at 5%   → $1900                        │
//! │                                                                         │
//! │  BuyOneGetOneFree     price × (qty/2 + qty%2)   (pay for ceil(qty/2))  │
//! │                       $50 × 5           → $150                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The strategy knows nothing about which products qualify for buy one get
//! one free. The cart checks eligibility before pricing a line.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::Money;
use crate::types::Percentage;

/// The pricing rule active on a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum DiscountStrategy {
    /// Fixed percentage off every line.
    Percentage { percentage: Percentage },
    /// Every second unit of an eligible line is free.
    BuyOneGetOneFree,
}

impl DiscountStrategy {
    /// Shorthand for `DiscountStrategy::Percentage { percentage }`.
    pub fn percentage(percentage: Percentage) -> Self {
        DiscountStrategy::Percentage { percentage }
    }

    /// Prices `quantity` units at `unit_price` under this rule.
    ///
    /// ## Example
    /// ```rust
    /// use shopcart_core::{DiscountStrategy, Money, Percentage};
    ///
    /// let bogo = DiscountStrategy::BuyOneGetOneFree;
    /// assert_eq!(bogo.apply_discount(Money::from_major(50), 5), Money::from_major(150));
    ///
    /// let five_off = DiscountStrategy::percentage(Percentage::from_whole(5));
    /// assert_eq!(five_off.apply_discount(Money::from_major(1000), 2), Money::from_major(1900));
    /// ```
    pub fn apply_discount(&self, unit_price: Money, quantity: u32) -> Money {
        match self {
            DiscountStrategy::Percentage { percentage } => unit_price
                .multiply_quantity(quantity)
                .apply_percentage_discount(*percentage),
            DiscountStrategy::BuyOneGetOneFree => {
                let pairs = quantity / 2;
                let remainder = quantity % 2;
                unit_price.multiply_quantity(pairs + remainder)
            }
        }
    }

    #[inline]
    pub fn is_buy_one_get_one(&self) -> bool {
        matches!(self, DiscountStrategy::BuyOneGetOneFree)
    }

    pub fn kind(&self) -> DiscountKind {
        match self {
            DiscountStrategy::Percentage { .. } => DiscountKind::Percentage,
            DiscountStrategy::BuyOneGetOneFree => DiscountKind::BuyOneGetOneFree,
        }
    }
}

impl fmt::Display for DiscountStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscountStrategy::Percentage { percentage } => write!(f, "{} off", percentage),
            DiscountStrategy::BuyOneGetOneFree => write!(f, "buy one get one free"),
        }
    }
}

// =============================================================================
// Discount Kind
// =============================================================================

/// Which strategy a user picked, before any parameters are attached.
///
/// The session turns a kind into a strategy using its configured percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    Percentage,
    BuyOneGetOneFree,
}

impl fmt::Display for DiscountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscountKind::Percentage => write!(f, "percentage"),
            DiscountKind::BuyOneGetOneFree => write!(f, "bogo"),
        }
    }
}

impl std::str::FromStr for DiscountKind {
    type Err = crate::error::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "percentage" | "percent" | "1" => Ok(DiscountKind::Percentage),
            "bogo" | "buy-one-get-one" | "2" => Ok(DiscountKind::BuyOneGetOneFree),
            other => Err(crate::error::ValidationError::InvalidFormat {
                field: "discount".to_string(),
                reason: format!("unknown discount '{}', expected percentage or bogo", other),
            }),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
