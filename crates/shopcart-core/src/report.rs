//! # Reports
//!
//! Read-only views of the cart, returned as values that implement `Display`.
//! The core never prints; the caller chooses where a report goes.

use serde::Serialize;
use std::fmt;

use crate::cart::Cart;
use crate::discount::DiscountStrategy;
use crate::money::Money;
use crate::types::Product;

// =============================================================================
// Cart Report
// =============================================================================

/// One cart line as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartReportLine {
    pub name: String,
    pub quantity: u32,
    /// Line total under the active discount.
    pub total: Money,
}

/// Cart contents plus the discounted total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartReport {
    pub lines: Vec<CartReportLine>,
    pub discount: Option<DiscountStrategy>,
    /// Every line at full price.
    pub subtotal: Money,
    pub total: Money,
}

impl From<&Cart> for CartReport {
    fn from(cart: &Cart) -> Self {
        CartReport {
            lines: cart
                .items()
                .map(|item| CartReportLine {
                    name: item.product().name().to_string(),
                    quantity: item.quantity(),
                    total: cart.price_line(item),
                })
                .collect(),
            discount: cart.discount_strategy(),
            subtotal: cart.subtotal(),
            total: cart.calculate_total_bill(),
        }
    }
}

impl fmt::Display for CartReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lines.is_empty() {
            writeln!(f, "Cart Items: Your cart is empty.")?;
        } else {
            let contents = self
                .lines
                .iter()
                .map(|line| format!("{} {}", line.quantity, line.name))
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(f, "Cart Items: You have {} in your cart.", contents)?;
        }
        if let Some(discount) = &self.discount {
            writeln!(f, "Discount: {} (subtotal {})", discount, self.subtotal)?;
        }
        write!(f, "Total Bill: Your total bill is {}.", self.total)
    }
}

// =============================================================================
// Eligible Products Report
// =============================================================================

/// Products registered for buy one get one free.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EligibleProductsReport {
    pub entries: Vec<String>,
}

impl EligibleProductsReport {
    pub fn from_names(names: &[String]) -> Self {
        EligibleProductsReport {
            entries: names.to_vec(),
        }
    }

    pub fn from_products<'a>(products: impl IntoIterator<Item = &'a Product>) -> Self {
        EligibleProductsReport {
            entries: products.into_iter().map(Product::to_string).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for EligibleProductsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Eligible Products for Buy One Get One Free Discount:")?;
        if self.entries.is_empty() {
            return write!(f, " none");
        }
        for entry in &self.entries {
            write!(f, "\n{}", entry)?;
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
