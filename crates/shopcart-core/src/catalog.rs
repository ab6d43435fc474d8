//! # Catalog
//!
//! The fixed set of products offered in a session.
//!
//! Names are looked up case-insensitively, so they must also be unique
//! case-insensitively. The catalog's products are only ever read by the cart.

use serde::{Deserialize, Serialize};

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::types::Product;
use crate::validation::{validate_price, validate_product_name};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Builds a catalog, validating every entry.
    ///
    /// ## Errors
    /// `Validation` for an empty or overlong name, a negative price, or two
    /// names that differ only in case.
    pub fn new(products: Vec<Product>) -> CoreResult<Self> {
        for (idx, product) in products.iter().enumerate() {
            validate_product_name(product.name())?;
            validate_price(product.price())?;

            let clash = products[..idx]
                .iter()
                .any(|p| p.name().eq_ignore_ascii_case(product.name()));
            if clash {
                return Err(ValidationError::Duplicate {
                    field: "product".to_string(),
                    value: product.name().to_string(),
                }
                .into());
            }
        }

        Ok(Catalog { products })
    }

    /// The demo catalog: a $1000 laptop and $50 headphones.
    pub fn demo(stock: u32) -> Self {
        Catalog {
            products: vec![
                Product::new("Laptop", Money::from_major(1000), stock),
                Product::new("Headphones", Money::from_major(50), stock),
            ],
        }
    }

    /// Case-insensitive lookup by name.
    pub fn find(&self, name: &str) -> Option<&Product> {
        let name = name.trim();
        self.products
            .iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
    }

    /// Products in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
