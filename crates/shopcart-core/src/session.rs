//! # Session
//!
//! One shopper's run of the program: a catalog, a cart and the configured
//! percentage discount, owned together and passed explicitly to every
//! operation.
//!
//! ## Responsibilities
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Caller (CLI)            Session                      Cart              │
//! │  ────────────            ───────                      ────              │
//! │                                                                         │
//! │  "add laptop 3" ───────► catalog.find("laptop") ────► add_item(&p, 3)  │
//! │                          (case-insensitive)                             │
//! │                                                                         │
//! │  "discount bogo" ──────► any eligible products? ────► set_discount_    │
//! │                          build strategy from kind     strategy(..)      │
//! │                                                                         │
//! │  "change-discount      ► none eligible → fall back ─► set_discount_    │
//! │   bogo"                  to the percentage rate       strategy(pct)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use uuid::Uuid;

use crate::cart::{Cart, CartItem};
use crate::catalog::Catalog;
use crate::discount::{DiscountKind, DiscountStrategy};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::report::{CartReport, EligibleProductsReport};
use crate::types::{Percentage, Product};

/// Percentage used by [`Session::demo`].
pub const DEFAULT_PERCENTAGE_DISCOUNT: u32 = 5;

/// Units of each product in [`Session::demo`].
pub const DEFAULT_STOCK: u32 = 10;

/// What a successful discount request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome", content = "strategy")]
pub enum DiscountOutcome {
    /// First discount of the session.
    Applied(DiscountStrategy),
    /// Replaced (or set) through the change path.
    Changed(DiscountStrategy),
    /// Buy one get one was asked for with nothing eligible; the percentage
    /// discount was set instead.
    FellBackToPercentage(DiscountStrategy),
}

impl DiscountOutcome {
    pub fn strategy(&self) -> DiscountStrategy {
        match self {
            DiscountOutcome::Applied(s)
            | DiscountOutcome::Changed(s)
            | DiscountOutcome::FellBackToPercentage(s) => *s,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    catalog: Catalog,
    cart: Cart,
    percentage: Percentage,
}

impl Session {
    pub fn new(catalog: Catalog, percentage: Percentage) -> Self {
        Session {
            id: Uuid::new_v4(),
            catalog,
            cart: Cart::new(),
            percentage,
        }
    }

    /// Demo catalog, 5% discount, Laptop eligible for buy one get one.
    pub fn demo() -> Self {
        let mut session = Session::new(
            Catalog::demo(DEFAULT_STOCK),
            Percentage::from_whole(DEFAULT_PERCENTAGE_DISCOUNT),
        );
        if let Some(laptop) = session.catalog.find("Laptop") {
            session.cart.add_eligible_product_for_buy_one_get_one(laptop);
        }
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn products(&self) -> &[Product] {
        self.catalog.products()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn percentage(&self) -> Percentage {
        self.percentage
    }

    /// Registers a catalog product for buy one get one free.
    pub fn register_buy_one_get_one(&mut self, name: &str) -> CoreResult<()> {
        let product = self
            .catalog
            .find(name)
            .ok_or_else(|| CoreError::ProductNotFound(name.to_string()))?;
        self.cart.add_eligible_product_for_buy_one_get_one(product);
        Ok(())
    }

    // =========================================================================
    // Items
    // =========================================================================

    /// Looks the product up in the catalog and adds it to the cart.
    pub fn add_to_cart(&mut self, name: &str, quantity: u32) -> CoreResult<&CartItem> {
        let product = self
            .catalog
            .find(name)
            .ok_or_else(|| CoreError::ProductNotFound(name.trim().to_string()))?;
        self.cart.add_item(product, quantity)
    }

    /// Sets a line's quantity; the name is matched like the catalog does.
    pub fn update_quantity(&mut self, name: &str, quantity: u32) -> CoreResult<&CartItem> {
        let name = name.trim();
        let name = self.catalog.find(name).map(Product::name).unwrap_or(name);
        self.cart.update_quantity(name, quantity)
    }

    /// Drops a line; unknown names are a no-op.
    pub fn remove_from_cart(&mut self, name: &str) -> Option<CartItem> {
        let name = name.trim();
        let name = self.catalog.find(name).map(Product::name).unwrap_or(name);
        self.cart.remove_item(name)
    }

    // =========================================================================
    // Discounts
    // =========================================================================

    /// Picks the session's first discount.
    ///
    /// ## Errors
    /// - `DiscountAlreadyApplied` if any discount is active
    /// - `NoEligibleProducts` for buy one get one with an empty registry
    pub fn apply_discount(&mut self, kind: DiscountKind) -> CoreResult<DiscountOutcome> {
        if self.cart.discount_strategy().is_some() {
            return Err(CoreError::DiscountAlreadyApplied);
        }

        let strategy = match kind {
            DiscountKind::Percentage => self.percentage_strategy(),
            DiscountKind::BuyOneGetOneFree => {
                if !self.cart.has_buy_one_get_one_items() {
                    return Err(CoreError::NoEligibleProducts);
                }
                DiscountStrategy::BuyOneGetOneFree
            }
        };

        self.cart.set_discount_strategy(strategy)?;
        Ok(DiscountOutcome::Applied(strategy))
    }

    /// Switches the discount.
    ///
    /// Asking for buy one get one with nothing eligible falls back to setting
    /// the percentage discount, which only succeeds if no discount is active.
    ///
    /// ## Errors
    /// - `DiscountLocked` if buy one get one is active
    /// - `FallbackRefused` carrying the set refusal if the fallback was
    ///   refused as well
    pub fn change_discount(&mut self, kind: DiscountKind) -> CoreResult<DiscountOutcome> {
        match kind {
            DiscountKind::Percentage => {
                let strategy = self.percentage_strategy();
                self.cart.change_discount_strategy(strategy)?;
                Ok(DiscountOutcome::Changed(strategy))
            }
            DiscountKind::BuyOneGetOneFree if self.cart.has_buy_one_get_one_items() => {
                let strategy = DiscountStrategy::BuyOneGetOneFree;
                self.cart.change_discount_strategy(strategy)?;
                Ok(DiscountOutcome::Changed(strategy))
            }
            DiscountKind::BuyOneGetOneFree => {
                let strategy = self.percentage_strategy();
                self.cart
                    .set_discount_strategy(strategy)
                    .map_err(|cause| CoreError::FallbackRefused(Box::new(cause)))?;
                Ok(DiscountOutcome::FellBackToPercentage(strategy))
            }
        }
    }

    fn percentage_strategy(&self) -> DiscountStrategy {
        DiscountStrategy::percentage(self.percentage)
    }

    // =========================================================================
    // Reports
    // =========================================================================

    pub fn total(&self) -> Money {
        self.cart.calculate_total_bill()
    }

    pub fn cart_report(&self) -> CartReport {
        self.cart.display_cart()
    }

    /// Eligible products with their catalog details.
    ///
    /// Registration only goes through [`register_buy_one_get_one`], so every
    /// registered name resolves in the catalog.
    ///
    /// [`register_buy_one_get_one`]: Self::register_buy_one_get_one
    pub fn eligible_report(&self) -> EligibleProductsReport {
        let names = self.cart.buy_one_get_one().eligible_product_names();
        EligibleProductsReport::from_products(names.iter().filter_map(|n| self.catalog.find(n)))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
