//! # Cart
//!
//! Line items, the active discount, and the buy one get one registry.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Operation                 Precondition            State Change         │
//! │  ─────────                 ────────────            ────────────         │
//! │                                                                         │
//! │  add_item(p, q) ─────────► p has any stock ──────► upsert line (+q)    │
//! │                                                                         │
//! │  update_quantity(n, q) ──► line exists,    ──────► line.qty = q,       │
//! │                            q ≤ snapshot + qty      snapshot adjusted   │
//! │                                                                         │
//! │  remove_item(n) ─────────► none ─────────────────► line dropped        │
//! │                                                                         │
//! │  calculate_total_bill() ─► none ─────────────────► (read only)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Discount Slot
//! ```text
//!   Unset ──set / change──► Set(Percentage) ──change──► Set(any)
//!                           Set(BOGO)       ──change──► refused (locked)
//!   Set(_) ──set──► refused (already applied)
//! ```
//!
//! ## Inventory Model
//! Each line owns a clone of the product taken when it was first added.
//! `add_item` reads the catalog product but never writes to it, and
//! `remove_item` returns nothing to stock.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::discount::DiscountStrategy;
use crate::eligibility::BuyOneGetOneEligibility;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::report::{CartReport, EligibleProductsReport};
use crate::types::Product;

// =============================================================================
// Cart Item
// =============================================================================

/// One line in the cart.
///
/// ## Design Notes
/// - `product`: snapshot owned by the line. Its `available_count` is how many
///   units were left when the line was created or last updated, not the live
///   catalog count.
/// - `quantity`: may reach zero through `update_quantity`; the line stays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    product: Product,
    quantity: u32,
}

impl CartItem {
    pub fn new(product: Product, quantity: u32) -> Self {
        CartItem { product, quantity }
    }

    #[inline]
    pub fn product(&self) -> &Product {
        &self.product
    }

    #[inline]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }

    /// Unit price × quantity, before any discount.
    pub fn line_total(&self) -> Money {
        self.product.price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by product name (adding again increases quantity)
/// - Once a discount is set it is never cleared, only replaced via
///   [`change_discount_strategy`](Self::change_discount_strategy)
/// - An active buy one get one free discount is never replaced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    items: BTreeMap<String, CartItem>,
    discount_strategy: Option<DiscountStrategy>,
    buy_one_get_one: BuyOneGetOneEligibility,
    created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart with no discount.
    pub fn new() -> Self {
        Cart {
            items: BTreeMap::new(),
            discount_strategy: None,
            buy_one_get_one: BuyOneGetOneEligibility::new(),
            created_at: Utc::now(),
        }
    }

    // =========================================================================
    // Buy One Get One Registry
    // =========================================================================

    pub fn add_eligible_product_for_buy_one_get_one(&mut self, product: &Product) {
        self.buy_one_get_one.add_eligible_product(product);
    }

    /// True when at least one product is registered for buy one get one.
    pub fn has_buy_one_get_one_items(&self) -> bool {
        !self.buy_one_get_one.is_empty()
    }

    pub fn buy_one_get_one(&self) -> &BuyOneGetOneEligibility {
        &self.buy_one_get_one
    }

    // =========================================================================
    // Discount Slot
    // =========================================================================

    /// Sets the first discount of the session.
    ///
    /// ## Errors
    /// `DiscountAlreadyApplied` if any discount is active; nothing changes.
    pub fn set_discount_strategy(&mut self, strategy: DiscountStrategy) -> CoreResult<()> {
        if self.discount_strategy.is_some() {
            return Err(CoreError::DiscountAlreadyApplied);
        }
        self.discount_strategy = Some(strategy);
        Ok(())
    }

    /// Replaces the active discount, or sets one if none is active.
    ///
    /// ## Errors
    /// `DiscountLocked` if buy one get one free is active; nothing changes.
    pub fn change_discount_strategy(&mut self, strategy: DiscountStrategy) -> CoreResult<()> {
        if self
            .discount_strategy
            .is_some_and(|current| current.is_buy_one_get_one())
        {
            return Err(CoreError::DiscountLocked);
        }
        self.discount_strategy = Some(strategy);
        Ok(())
    }

    pub fn discount_strategy(&self) -> Option<DiscountStrategy> {
        self.discount_strategy
    }

    // =========================================================================
    // Items
    // =========================================================================

    /// Adds `quantity` units of `product`, or grows its existing line.
    ///
    /// ## Behavior
    /// - Only checks that the product has *some* stock, not `quantity` units
    /// - New line: stores a clone of `product` with `quantity` taken off its
    ///   count (left unchanged if the clone has fewer than `quantity` units)
    /// - Existing line: quantity grows, the stored snapshot is kept as is
    /// - `product` itself is never modified
    ///
    /// ## Errors
    /// `InsufficientStock` with the product's count when it is out of stock.
    pub fn add_item(&mut self, product: &Product, quantity: u32) -> CoreResult<&CartItem> {
        if !product.is_available() {
            return Err(CoreError::InsufficientStock {
                product: product.name().to_string(),
                available: product.available_count(),
            });
        }

        let mut snapshot = product.clone();
        snapshot.decrease_available_count(quantity);

        let item = match self.items.entry(product.name().to_string()) {
            Entry::Occupied(entry) => {
                let item = entry.into_mut();
                item.quantity = item.quantity.saturating_add(quantity);
                item
            }
            Entry::Vacant(entry) => entry.insert(CartItem::new(snapshot, quantity)),
        };
        Ok(item)
    }

    /// Sets the quantity of an existing line.
    ///
    /// The line's ceiling is its snapshot count plus its current quantity,
    /// i.e. what would remain if the whole line went back on the shelf. On
    /// success the snapshot count moves by the opposite of the quantity
    /// change: `snapshot_new = snapshot_old - (new_quantity - old_quantity)`.
    ///
    /// ## Errors
    /// - `ItemNotFound` if there is no line for `product_name`
    /// - `InsufficientStock` with the ceiling if `new_quantity` exceeds it
    pub fn update_quantity(
        &mut self,
        product_name: &str,
        new_quantity: u32,
    ) -> CoreResult<&CartItem> {
        let item = self
            .items
            .get_mut(product_name)
            .ok_or_else(|| CoreError::ItemNotFound(product_name.to_string()))?;

        let available = item.product.available_count().saturating_add(item.quantity);
        if new_quantity > available {
            return Err(CoreError::InsufficientStock {
                product: item.product.name().to_string(),
                available,
            });
        }

        item.quantity = new_quantity;
        item.product.set_available_count(available - new_quantity);
        Ok(item)
    }

    /// Drops the line for `product_name`, returning it if there was one.
    ///
    /// Absent names are a no-op. The removed quantity is not restocked.
    pub fn remove_item(&mut self, product_name: &str) -> Option<CartItem> {
        self.items.remove(product_name)
    }

    pub fn item(&self, product_name: &str) -> Option<&CartItem> {
        self.items.get(product_name)
    }

    /// Lines ordered by product name.
    pub fn items(&self) -> impl Iterator<Item = &CartItem> {
        self.items.values()
    }

    /// Number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of all line quantities.
    pub fn total_quantity(&self) -> u64 {
        self.items.values().map(|i| u64::from(i.quantity)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    // =========================================================================
    // Totals
    // =========================================================================

    /// Prices one line under the active discount.
    ///
    /// ```text
    /// BOGO active, product eligible  →  price × qty / 2
    /// Percentage active              →  strategy.apply_discount(price, qty)
    /// otherwise                      →  price × qty
    /// ```
    ///
    /// The BOGO branch halves the line outright; it does not go through
    /// [`DiscountStrategy::apply_discount`], so an odd quantity is charged
    /// for half a unit less than the pair-based rule would charge.
    pub fn price_line(&self, item: &CartItem) -> Money {
        let price = item.product.price();
        let quantity = item.quantity;

        match self.discount_strategy {
            Some(DiscountStrategy::BuyOneGetOneFree)
                if self.buy_one_get_one.is_product_eligible(&item.product) =>
            {
                price.multiply_quantity(quantity).halve()
            }
            Some(strategy @ DiscountStrategy::Percentage { .. }) => {
                strategy.apply_discount(price, quantity)
            }
            _ => price.multiply_quantity(quantity),
        }
    }

    /// Total of every line under the active discount.
    pub fn calculate_total_bill(&self) -> Money {
        self.items.values().map(|item| self.price_line(item)).sum()
    }

    /// Total of every line at full price.
    pub fn subtotal(&self) -> Money {
        self.items.values().map(CartItem::line_total).sum()
    }

    // =========================================================================
    // Reports
    // =========================================================================

    /// Cart contents and total, ready to print.
    pub fn display_cart(&self) -> CartReport {
        CartReport::from(self)
    }

    /// Registered buy one get one product names, ready to print.
    pub fn display_eligible_products_for_buy_one_get_one(&self) -> EligibleProductsReport {
        EligibleProductsReport::from_names(self.buy_one_get_one.eligible_product_names())
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
