//! # Cart Configuration
//!
//! Catalog, stock and discount settings for a shopcart session.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     SHOPCART_PERCENTAGE_DISCOUNT=10                                    │
//! │     SHOPCART_DEFAULT_STOCK=25                                          │
//! │     SHOPCART_BOGO_PRODUCTS=Laptop,Headphones                           │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, otherwise                                         │
//! │     ~/.config/shopcart/shopcart.toml (Linux)                           │
//! │     ~/Library/Application Support/com.shopcart.shopcart/... (macOS)    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     Laptop $1000 ×10, Headphones $50 ×10, 5% off, Laptop BOGO          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # shopcart.toml
//! [discount]
//! percentage = 5
//!
//! [catalog]
//! buy_one_get_one = ["Laptop"]
//!
//! [[catalog.products]]
//! name = "Laptop"
//! price = 1000
//! stock = 10
//!
//! [[catalog.products]]
//! name = "Headphones"
//! price = "49.99"
//! ```

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shopcart_core::session::{DEFAULT_PERCENTAGE_DISCOUNT, DEFAULT_STOCK};
use shopcart_core::{Catalog, Money, Percentage, Product, Session};
use tracing::{debug, info, warn};

use crate::error::{CliError, CliResult};

/// Name of the config file inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "shopcart.toml";

// =============================================================================
// Discount Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountSettings {
    /// Percentage taken off every line when the percentage discount is
    /// chosen. 5 means 5% off.
    #[serde(default = "default_percentage")]
    pub percentage: Decimal,
}

fn default_percentage() -> Decimal {
    Decimal::from(DEFAULT_PERCENTAGE_DISCOUNT)
}

impl Default for DiscountSettings {
    fn default() -> Self {
        DiscountSettings {
            percentage: default_percentage(),
        }
    }
}

// =============================================================================
// Catalog Settings
// =============================================================================

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSettings {
    pub name: String,

    /// Unit price in dollars. Accepts a TOML number or a decimal string.
    pub price: Decimal,

    /// Units in stock at session start.
    #[serde(default = "default_stock")]
    pub stock: u32,
}

fn default_stock() -> u32 {
    DEFAULT_STOCK
}

impl ProductSettings {
    fn new(name: &str, price: i64) -> Self {
        ProductSettings {
            name: name.to_string(),
            price: Decimal::from(price),
            stock: default_stock(),
        }
    }

    fn to_product(&self) -> Product {
        Product::new(self.name.clone(), Money::new(self.price), self.stock)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSettings {
    #[serde(default = "default_products")]
    pub products: Vec<ProductSettings>,

    /// Product names registered for buy one get one free.
    #[serde(default = "default_buy_one_get_one")]
    pub buy_one_get_one: Vec<String>,
}

fn default_products() -> Vec<ProductSettings> {
    vec![
        ProductSettings::new("Laptop", 1000),
        ProductSettings::new("Headphones", 50),
    ]
}

fn default_buy_one_get_one() -> Vec<String> {
    vec!["Laptop".to_string()]
}

impl Default for CatalogSettings {
    fn default() -> Self {
        CatalogSettings {
            products: default_products(),
            buy_one_get_one: default_buy_one_get_one(),
        }
    }
}

// =============================================================================
// Main Cart Configuration
// =============================================================================

/// Complete session configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartConfig {
    #[serde(default)]
    pub discount: DiscountSettings,

    #[serde(default)]
    pub catalog: CatalogSettings,
}

impl CartConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (shopcart.toml)
    /// 3. Environment variables
    ///
    /// A missing file at the default location means "use defaults"; a
    /// missing file that was asked for explicitly is an error.
    pub fn load(config_path: Option<PathBuf>) -> CliResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    fn from_file(path: &Path) -> CliResult<Self> {
        info!(?path, "Loading cart config from file");
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> CliResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Renders the configuration the way it would be written to disk.
    pub fn to_toml_string(&self) -> CliResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validates the configuration.
    ///
    /// Product names and prices are checked again by [`Catalog::new`]; this
    /// catches what the catalog cannot see.
    pub fn validate(&self) -> CliResult<()> {
        if self.catalog.products.is_empty() {
            return Err(CliError::InvalidConfig(
                "catalog must list at least one product".into(),
            ));
        }

        for name in &self.catalog.buy_one_get_one {
            let known = self
                .catalog
                .products
                .iter()
                .any(|p| p.name.eq_ignore_ascii_case(name.trim()));
            if !known {
                return Err(CliError::InvalidConfig(format!(
                    "buy_one_get_one lists '{}', which is not in the catalog",
                    name
                )));
            }
        }

        let pct = self.discount.percentage;
        if pct < Decimal::ZERO || pct > Decimal::from(100) {
            warn!(percentage = %pct, "Discount percentage outside 0-100, totals will look odd");
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // Percentage
        if let Some(value) = lookup("SHOPCART_PERCENTAGE_DISCOUNT") {
            match value.trim().parse::<Decimal>() {
                Ok(pct) => {
                    debug!(percentage = %pct, "Overriding discount percentage from environment");
                    self.discount.percentage = pct;
                }
                Err(_) => warn!(value = %value, "Ignoring unparseable SHOPCART_PERCENTAGE_DISCOUNT"),
            }
        }

        // Stock for every product
        if let Some(value) = lookup("SHOPCART_DEFAULT_STOCK") {
            match value.trim().parse::<u32>() {
                Ok(stock) => {
                    debug!(stock, "Overriding product stock from environment");
                    for product in &mut self.catalog.products {
                        product.stock = stock;
                    }
                }
                Err(_) => warn!(value = %value, "Ignoring unparseable SHOPCART_DEFAULT_STOCK"),
            }
        }

        // Buy one get one registry
        if let Some(value) = lookup("SHOPCART_BOGO_PRODUCTS") {
            debug!(products = %value, "Overriding buy one get one products from environment");
            self.catalog.buy_one_get_one = value
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect();
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "shopcart", "shopcart")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Session Construction
    // =========================================================================

    pub fn percentage(&self) -> Percentage {
        Percentage::new(self.discount.percentage)
    }

    /// Builds the catalog and the session, registering buy one get one
    /// products.
    pub fn build_session(&self) -> CliResult<Session> {
        let products = self
            .catalog
            .products
            .iter()
            .map(ProductSettings::to_product)
            .collect();
        let catalog = Catalog::new(products)?;

        let mut session = Session::new(catalog, self.percentage());
        for name in &self.catalog.buy_one_get_one {
            session.register_buy_one_get_one(name)?;
        }

        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use shopcart_core::{CoreError, ValidationError};
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = CartConfig::default();
        assert_eq!(config.discount.percentage, dec!(5));
        assert_eq!(config.catalog.products.len(), 2);
        assert_eq!(config.catalog.products[0].name, "Laptop");
        assert_eq!(config.catalog.products[0].price, dec!(1000));
        assert_eq!(config.catalog.products[1].stock, 10);
        assert_eq!(config.catalog.buy_one_get_one, vec!["Laptop".to_string()]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_session_matches_demo() {
        let session = CartConfig::default().build_session().unwrap();
        let demo = Session::demo();

        assert_eq!(session.catalog(), demo.catalog());
        assert_eq!(session.percentage(), demo.percentage());
        assert_eq!(
            session.cart().buy_one_get_one(),
            demo.cart().buy_one_get_one()
        );
    }

    #[test]
    fn test_parse_toml() {
        let config = CartConfig::from_toml_str(
            r#"
            [discount]
            percentage = 10

            [catalog]
            buy_one_get_one = ["Mouse"]

            [[catalog.products]]
            name = "Mouse"
            price = "19.99"
            stock = 3

            [[catalog.products]]
            name = "Monitor"
            price = 200
            "#,
        )
        .unwrap();

        assert_eq!(config.discount.percentage, dec!(10));
        assert_eq!(config.catalog.products[0].price, dec!(19.99));
        assert_eq!(config.catalog.products[0].stock, 3);
        assert_eq!(config.catalog.products[1].stock, 10);
        assert!(config.validate().is_ok());

        let session = config.build_session().unwrap();
        assert_eq!(session.products().len(), 2);
        assert!(session.cart().buy_one_get_one().is_name_eligible("Mouse"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = CartConfig::from_toml_str("[discount]\npercentage = 15\n").unwrap();
        assert_eq!(config.discount.percentage, dec!(15));
        assert_eq!(config.catalog, CatalogSettings::default());
    }

    #[test]
    fn test_invalid_toml() {
        let err = CartConfig::from_toml_str("[discount\npercentage = 5").unwrap_err();
        assert!(matches!(err, CliError::ConfigParse(_)));
    }

    #[test]
    fn test_config_validation() {
        let mut config = CartConfig::default();
        assert!(config.validate().is_ok());

        // Eligible product must exist in the catalog
        config.catalog.buy_one_get_one = vec!["Phone".to_string()];
        assert!(matches!(config.validate(), Err(CliError::InvalidConfig(_))));

        // Lookup is case-insensitive
        config.catalog.buy_one_get_one = vec!["laptop".to_string()];
        assert!(config.validate().is_ok());

        // Empty catalog should fail
        config.catalog.products.clear();
        config.catalog.buy_one_get_one.clear();
        assert!(matches!(config.validate(), Err(CliError::InvalidConfig(_))));
    }

    #[test]
    fn test_duplicate_products_rejected_by_catalog() {
        let mut config = CartConfig::default();
        config
            .catalog
            .products
            .push(ProductSettings::new("LAPTOP", 900));

        let err = config.build_session().unwrap_err();
        assert!(matches!(err, CliError::Core(_)));
    }

    #[test]
    fn test_huge_price_rejected_before_session_starts() {
        let config = CartConfig::from_toml_str(
            r#"
            [catalog]
            buy_one_get_one = []

            [[catalog.products]]
            name = "Yacht"
            price = "79228162514264337593543950335"
            "#,
        )
        .unwrap();
        assert!(config.validate().is_ok());

        let err = config.build_session().unwrap_err();
        assert!(matches!(
            err,
            CliError::Core(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = CartConfig::default();
        config.apply_overrides(lookup_from(&[
            ("SHOPCART_PERCENTAGE_DISCOUNT", "12.5"),
            ("SHOPCART_DEFAULT_STOCK", "3"),
            ("SHOPCART_BOGO_PRODUCTS", " Headphones , Laptop ,"),
        ]));

        assert_eq!(config.discount.percentage, dec!(12.5));
        assert!(config.catalog.products.iter().all(|p| p.stock == 3));
        assert_eq!(
            config.catalog.buy_one_get_one,
            vec!["Headphones".to_string(), "Laptop".to_string()]
        );
    }

    #[test]
    fn test_bad_env_values_are_ignored() {
        let mut config = CartConfig::default();
        config.apply_overrides(lookup_from(&[
            ("SHOPCART_PERCENTAGE_DISCOUNT", "lots"),
            ("SHOPCART_DEFAULT_STOCK", "-1"),
        ]));
        assert_eq!(config, CartConfig::default());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = CartConfig::default();
        let rendered = config.to_toml_string().unwrap();
        assert!(rendered.contains("[discount]"));
        assert_eq!(CartConfig::from_toml_str(&rendered).unwrap(), config);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let path = PathBuf::from("/nonexistent/shopcart/shopcart.toml");
        assert!(matches!(CartConfig::load(Some(path)), Err(CliError::Io(_))));
    }

    #[test]
    fn test_default_path_file_name() {
        if let Some(path) = CartConfig::default_config_path() {
            assert!(path.ends_with(CONFIG_FILE_NAME));
        }
    }
}
