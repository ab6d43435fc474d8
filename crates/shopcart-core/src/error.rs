//! # Error Types
//!
//! Domain-specific error types for shopcart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shopcart-core errors (this file)                                      │
//! │  ├── CoreError        - Refused cart / discount operations             │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  shopcart-cli errors (separate crate)                                  │
//! │  └── CliError         - Config loading, I/O, bad commands              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → printed to the user    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Contract
//! Every operation that returns `Err(CoreError)` has left the cart exactly
//! as it was. Nothing in the core panics on a business condition.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// A cart or discount operation that was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// No catalog entry matches the requested name.
    #[error("Invalid product name: {0}")]
    ProductNotFound(String),

    /// Not enough stock for the requested quantity.
    ///
    /// ## User Workflow
    /// ```text
    /// update Laptop 12
    ///      │
    ///      ▼
    /// line holds 3, snapshot says 7 more remain → 10 available
    ///      │
    ///      ▼
    /// InsufficientStock { product: "Laptop", available: 10 }
    ///      │
    ///      ▼
    /// "Not enough quantity available for Laptop. Available quantity: 10"
    /// ```
    #[error("Not enough quantity available for {product}. Available quantity: {available}")]
    InsufficientStock { product: String, available: u32 },

    /// The product has no line in the cart.
    #[error("The item {0} is not present in the cart")]
    ItemNotFound(String),

    /// A discount is already active; use the change operation instead.
    #[error("Discount is already applied. Use change-discount to switch it.")]
    DiscountAlreadyApplied,

    /// Buy one get one free is active and can no longer be replaced.
    #[error("Cannot change discount type. Buy One Get One Free discount is already applied.")]
    DiscountLocked,

    /// No product is registered for buy one get one free.
    #[error("No products eligible for Buy One Get One Free Discount.")]
    NoEligibleProducts,

    /// Buy one get one was asked for with nothing eligible, and setting the
    /// percentage discount instead was refused too. Carries that refusal.
    #[error("No products eligible for Buy One Get One Free Discount. {0}")]
    FallbackRefused(Box<CoreError>),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised while building the catalog and while checking user input,
/// before any business logic runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. a quantity that is not a number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g. two catalog entries with one name).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
