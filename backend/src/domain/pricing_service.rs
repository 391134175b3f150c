//! Product price configuration.
//!
//! The stored document is always read merged over the defaults, so the three
//! product lines sold at the station have a price even before anything was
//! saved.
//!
//! Updates read, change and store the whole document under one lock shared by
//! every clone of the service.

use log::info;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::commands::pricing::UpsertProductCommand;
use super::errors::{DomainError, DomainResult};
use super::models::pricing::{PriceConfig, ProductConfig};
use crate::storage::{Connection, PriceConfigStorage};

fn validate_amount(name: &str, value: f64) -> DomainResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(DomainError::validation(format!(
            "{} must be a non-negative number",
            name
        )));
    }
    Ok(())
}

#[derive(Clone)]
pub struct PricingService<C: Connection> {
    price_repository: C::PriceConfigRepository,
    update_lock: Arc<Mutex<()>>,
}

impl<C: Connection> PricingService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            price_repository: connection.create_price_config_repository(),
            update_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Current prices, stored values over defaults
    pub async fn get_config(&self) -> DomainResult<PriceConfig> {
        let stored = self.price_repository.get_price_config().await?;
        Ok(stored.unwrap_or_default().merged_with_defaults())
    }

    /// Create or partially update one product
    pub async fn upsert_product(&self, command: UpsertProductCommand) -> DomainResult<PriceConfig> {
        let product_id = command.product_id.trim().to_string();
        if product_id.is_empty() {
            return Err(DomainError::validation("product id cannot be empty"));
        }
        if let Some(price) = command.unit_price {
            validate_amount("unit_price", price)?;
        }
        if let Some(cost) = command.unit_cost {
            validate_amount("unit_cost", cost)?;
        }
        if let Some(name) = &command.name {
            if name.trim().is_empty() {
                return Err(DomainError::validation("product name cannot be empty"));
            }
        }

        let _guard = self.update_lock.lock().await;
        let mut config = self.get_config().await?;
        match config.products.get_mut(&product_id) {
            Some(product) => {
                if let Some(name) = command.name {
                    product.name = name.trim().to_string();
                }
                if let Some(price) = command.unit_price {
                    product.unit_price = price;
                }
                if let Some(cost) = command.unit_cost {
                    product.unit_cost = cost;
                }
                if let Some(unit) = command.unit {
                    product.unit = unit;
                }
                if let Some(active) = command.active {
                    product.active = active;
                }
            }
            None => {
                let (Some(name), Some(unit_price)) = (command.name, command.unit_price) else {
                    return Err(DomainError::validation(
                        "a new product needs a name and a unit price",
                    ));
                };
                config.products.insert(
                    product_id.clone(),
                    ProductConfig {
                        name: name.trim().to_string(),
                        unit_price,
                        unit_cost: command.unit_cost.unwrap_or(0.0),
                        unit: command.unit.unwrap_or(shared::ProductUnit::Unit),
                        active: command.active.unwrap_or(true),
                    },
                );
            }
        }

        self.price_repository.store_price_config(&config).await?;
        info!("Updated price of product {}", product_id);
        Ok(config)
    }
}
