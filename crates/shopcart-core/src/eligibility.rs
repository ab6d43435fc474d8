//! # Buy One Get One Eligibility
//!
//! The registry of products that buy one get one free applies to.

use serde::{Deserialize, Serialize};

use crate::types::Product;

/// Names of products that qualify for buy one get one free.
///
/// Matching is exact and case-sensitive. Registering a name twice is allowed
/// and changes nothing observable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyOneGetOneEligibility {
    eligible: Vec<String>,
}

impl BuyOneGetOneEligibility {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_eligible_product(&mut self, product: &Product) {
        self.eligible.push(product.name().to_string());
    }

    pub fn is_product_eligible(&self, product: &Product) -> bool {
        self.is_name_eligible(product.name())
    }

    pub fn is_name_eligible(&self, name: &str) -> bool {
        self.eligible.iter().any(|n| n == name)
    }

    /// Registered names in registration order, duplicates included.
    pub fn eligible_product_names(&self) -> &[String] {
        &self.eligible
    }

    pub fn is_empty(&self) -> bool {
        self.eligible.is_empty()
    }
}
