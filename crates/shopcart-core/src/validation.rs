//! # Validation Module
//!
//! Input validation utilities for shopcart.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI command parsing                                          │
//! │  ├── Command word, argument count                                      │
//! │  └── THIS MODULE: quantity parsing                                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Catalog construction                                         │
//! │  └── THIS MODULE: names, prices, uniqueness                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart business rules (cart.rs)                                │
//! │  └── Stock checks, discount slot transitions                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shopcart_core::validation::{parse_quantity, validate_product_name};
//!
//! assert!(validate_product_name("Laptop").is_ok());
//! assert_eq!(parse_quantity("3").unwrap(), 3);
//! assert!(parse_quantity("three").is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest product name accepted into the catalog.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

/// Highest unit price accepted into the catalog, in dollars.
///
/// Keeps `price × u32::MAX` and the sum of every line well inside
/// `Decimal`'s range.
pub const MAX_PRICE_DOLLARS: i64 = 1_000_000_000;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty or whitespace
/// - At most [`MAX_PRODUCT_NAME_LEN`] characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Parses a user-typed quantity.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  add Laptop 3                                                          │
/// │             │                                                           │
/// │             ▼                                                           │
/// │  parse_quantity("3") ← THIS FUNCTION                                   │
/// │       │                                                                 │
/// │       ├── not a number? → Error: "quantity has invalid format"         │
/// │       ├── qty <= 0?     → Error: "quantity must be positive"           │
/// │       ├── too large?    → Error: "quantity must be between ..."        │
/// │       └── OK → Session::add_to_cart                                    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn parse_quantity(input: &str) -> ValidationResult<u32> {
    let qty: i64 = input
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidFormat {
            field: "quantity".to_string(),
            reason: format!("'{}' is not a whole number", input.trim()),
        })?;
    validate_quantity(qty)
}

/// Checks that a quantity is positive and fits the cart's counter.
pub fn validate_quantity(qty: i64) -> ValidationResult<u32> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    u32::try_from(qty).map_err(|_| ValidationError::OutOfRange {
        field: "quantity".to_string(),
        min: 1,
        max: i64::from(u32::MAX),
    })
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative
/// - Zero is allowed (free items)
/// - At most [`MAX_PRICE_DOLLARS`]
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() || price > Money::from_major(MAX_PRICE_DOLLARS) {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_DOLLARS,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Laptop").is_ok());
        assert!(validate_product_name("USB-C Cable 2m").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("1").unwrap(), 1);
        assert_eq!(parse_quantity(" 42 ").unwrap(), 42);

        assert!(matches!(
            parse_quantity("0"),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            parse_quantity("-3"),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            parse_quantity("abc"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse_quantity("1.5"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse_quantity("99999999999"),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_cents(1099)).is_ok());
        assert!(validate_price(Money::from_cents(-100)).is_err());

        assert!(validate_price(Money::from_major(MAX_PRICE_DOLLARS)).is_ok());
        assert!(matches!(
            validate_price(Money::from_major(MAX_PRICE_DOLLARS) + Money::from_cents(1)),
            Err(ValidationError::OutOfRange { max: MAX_PRICE_DOLLARS, .. })
        ));
        assert!(validate_price(Money::new(rust_decimal::Decimal::MAX)).is_err());
    }

    #[test]
    fn test_max_price_times_max_quantity_fits() {
        let line = Money::from_major(MAX_PRICE_DOLLARS).multiply_quantity(u32::MAX);
        assert_eq!(
            line,
            Money::from_major(MAX_PRICE_DOLLARS * i64::from(u32::MAX))
        );
    }
}
