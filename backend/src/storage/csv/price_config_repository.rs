//! # YAML Price Configuration Repository
//!
//! Product prices are a single document, `price_config.yaml`:
//!
//! ```yaml
//! products:
//!   large:
//!     name: 20 L jug
//!     unit_price: 30.0
//!     unit_cost: 0.0
//!     unit: unit
//!     active: true
//! ```
//!
//! Reads and writes hold the document's lock from the connection. Writes go
//! through a uniquely named temp file that is renamed over the original.

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info};
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use super::connection::{CsvConnection, PRICE_CONFIG};
use crate::domain::models::pricing::PriceConfig;
use crate::storage::traits::PriceConfigStorage;

#[derive(Debug, Clone)]
pub struct PriceConfigRepository {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl PriceConfigRepository {
    pub fn new(connection: CsvConnection) -> Self {
        let path = connection.document_path(PRICE_CONFIG);
        let lock = connection.file_lock(&path);
        Self { path, lock }
    }
}

#[async_trait]
impl PriceConfigStorage for PriceConfigRepository {
    async fn get_price_config(&self) -> Result<Option<PriceConfig>> {
        let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let path = &self.path;
        if !path.exists() {
            debug!("No price configuration at {}", path.display());
            return Ok(None);
        }

        let yaml = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: PriceConfig = serde_yaml::from_str(&yaml)
            .with_context(|| format!("Malformed price configuration in {}", path.display()))?;
        Ok(Some(config))
    }

    async fn store_price_config(&self, config: &PriceConfig) -> Result<()> {
        let yaml = serde_yaml::to_string(config)?;

        let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let path = &self.path;
        let temp_path = path.with_extension(format!("{}.tmp", Uuid::new_v4().simple()));
        if let Err(e) = fs::write(&temp_path, yaml) {
            let _ = fs::remove_file(&temp_path);
            return Err(e).with_context(|| format!("Failed to write {}", temp_path.display()));
        }
        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;

        info!("Stored price configuration with {} products", config.products.len());
        Ok(())
    }
}
