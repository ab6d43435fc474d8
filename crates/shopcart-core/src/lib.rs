//! # shopcart-core: Pure Business Logic for shopcart
//!
//! This crate is the **heart** of shopcart. It holds the cart, the discount
//! rules and the inventory bookkeeping as plain values with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        shopcart Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    shopcart-cli                                 │   │
//! │  │    config ──► parse command ──► dispatch ──► print report      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Session methods                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shopcart-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  session  │  │   cart    │  │ discount  │  │   types   │  │   │
//! │  │   │  Session  │  │   Cart    │  │ Strategy  │  │  Product  │  │   │
//! │  │   │  Catalog  │  │ CartItem  │  │ BOGO reg. │  │   Money   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO PRINTING • NO GLOBAL STATE                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product and Percentage
//! - [`money`] - Exact decimal Money type
//! - [`discount`] - Percentage and buy one get one free strategies
//! - [`eligibility`] - Buy one get one product registry
//! - [`cart`] - Cart and CartItem
//! - [`catalog`] - The session's fixed product list
//! - [`session`] - Catalog + cart + discount settings for one run
//! - [`report`] - Printable views of the cart
//! - [`validation`] - Input validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **No I/O**: printing, config files and logging belong to the caller
//! 2. **Exact Money**: decimals, never floats
//! 3. **Refusals are values**: a refused operation returns `Err(CoreError)`
//!    and changes nothing
//! 4. **Snapshots, not references**: a cart line owns its copy of the product
//!
//! ## Example Usage
//!
//! ```rust
//! use shopcart_core::{DiscountKind, Money, Session};
//!
//! let mut session = Session::demo();
//! session.add_to_cart("laptop", 4).unwrap();
//! session.apply_discount(DiscountKind::BuyOneGetOneFree).unwrap();
//!
//! // Eligible lines are halved under buy one get one
//! assert_eq!(session.total(), Money::from_major(2000));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod discount;
pub mod eligibility;
pub mod error;
pub mod money;
pub mod report;
pub mod session;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use shopcart_core::Money` instead of
// `use shopcart_core::money::Money`

pub use cart::{Cart, CartItem};
pub use catalog::Catalog;
pub use discount::{DiscountKind, DiscountStrategy};
pub use eligibility::BuyOneGetOneEligibility;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use report::{CartReport, CartReportLine, EligibleProductsReport};
pub use session::{DiscountOutcome, Session};
pub use types::*;
