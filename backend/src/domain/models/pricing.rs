//! Domain model for product prices.
use serde::{Deserialize, Serialize};
use shared::{ProductUnit, UnitsSold};
use std::collections::BTreeMap;

pub const PRODUCT_LARGE: &str = "large";
pub const PRODUCT_SMALL: &str = "small";
pub const PRODUCT_BY_VOLUME: &str = "by_volume";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductConfig {
    pub name: String,
    pub unit_price: f64,
    pub unit_cost: f64,
    pub unit: ProductUnit,
    pub active: bool,
}

/// Product id -> pricing. Persisted as a single YAML document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceConfig {
    pub products: BTreeMap<String, ProductConfig>,
}

impl Default for PriceConfig {
    fn default() -> Self {
        let mut products = BTreeMap::new();
        products.insert(
            PRODUCT_LARGE.to_string(),
            ProductConfig {
                name: "20 L jug".to_string(),
                unit_price: 30.0,
                unit_cost: 0.0,
                unit: ProductUnit::Unit,
                active: true,
            },
        );
        products.insert(
            PRODUCT_SMALL.to_string(),
            ProductConfig {
                name: "10 L jug".to_string(),
                unit_price: 18.0,
                unit_cost: 0.0,
                unit: ProductUnit::Unit,
                active: true,
            },
        );
        products.insert(
            PRODUCT_BY_VOLUME.to_string(),
            ProductConfig {
                name: "Bulk litre".to_string(),
                unit_price: 2.0,
                unit_cost: 0.0,
                unit: ProductUnit::Liter,
                active: true,
            },
        );
        Self { products }
    }
}

impl PriceConfig {
    pub fn unit_price(&self, product_id: &str) -> Option<f64> {
        self.products.get(product_id).map(|p| p.unit_price)
    }

    /// Overlay stored products on top of the defaults so the three sold
    /// product lines always have a price.
    pub fn merged_with_defaults(self) -> Self {
        let mut merged = PriceConfig::default();
        merged.products.extend(self.products);
        merged
    }

    /// Revenue of a unit breakdown at the current prices
    pub fn revenue_for(&self, units: &UnitsSold) -> Option<f64> {
        let large = self.unit_price(PRODUCT_LARGE)?;
        let small = self.unit_price(PRODUCT_SMALL)?;
        let by_volume = self.unit_price(PRODUCT_BY_VOLUME)?;
        Some(
            units.large as f64 * large
                + units.small as f64 * small
                + units.by_volume as f64 * by_volume,
        )
    }
}
