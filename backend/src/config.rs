//! # Application Configuration
//!
//! The server reads an optional YAML file, by default `water-ops.yaml` in the
//! working directory (override the path with `WATER_OPS_CONFIG`). A missing
//! file means all defaults. `WATER_OPS_DATA_DIR` and `WATER_OPS_BIND_ADDRESS`
//! override the file.
//!
//! ```yaml
//! data_directory: /srv/water-ops
//! bind_address: 0.0.0.0:3000
//! allowed_origin: http://localhost:8080
//! static_directory: ../frontend/dist
//! quality:
//!   measurement_interval_hours: 4
//! planner:
//!   measurement_stale_days: 6
//!   maintenance_lookahead_days: 2
//! ```
//!
//! Intervals are checked on load: the measurement interval and the stale
//! window must be positive, the lookahead may be zero, and none may exceed
//! ten years.

use anyhow::{anyhow, bail, Context, Result};
use chrono::Duration;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::quality_service::DEFAULT_MEASUREMENT_INTERVAL_HOURS;
use crate::domain::PlannerSettings;

pub const CONFIG_PATH_ENV: &str = "WATER_OPS_CONFIG";
pub const DATA_DIR_ENV: &str = "WATER_OPS_DATA_DIR";
pub const BIND_ADDRESS_ENV: &str = "WATER_OPS_BIND_ADDRESS";
pub const DEFAULT_CONFIG_FILE: &str = "water-ops.yaml";

const MAX_INTERVAL_DAYS: i64 = 3650;

fn checked_days(name: &str, days: i64, min: i64) -> Result<Duration> {
    if !(min..=MAX_INTERVAL_DAYS).contains(&days) {
        bail!("{} must be between {} and {}, got {}", name, min, MAX_INTERVAL_DAYS, days);
    }
    Duration::try_days(days).ok_or_else(|| anyhow!("{} is out of range", name))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    pub measurement_interval_hours: i64,
}

impl QualityConfig {
    pub fn measurement_interval(&self) -> Result<Duration> {
        let hours = self.measurement_interval_hours;
        let max_hours = MAX_INTERVAL_DAYS * 24;
        if !(1..=max_hours).contains(&hours) {
            bail!(
                "quality.measurement_interval_hours must be between 1 and {}, got {}",
                max_hours,
                hours
            );
        }
        Duration::try_hours(hours)
            .ok_or_else(|| anyhow!("quality.measurement_interval_hours is out of range"))
    }
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            measurement_interval_hours: DEFAULT_MEASUREMENT_INTERVAL_HOURS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub measurement_stale_days: i64,
    pub maintenance_lookahead_days: i64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            measurement_stale_days: 6,
            maintenance_lookahead_days: 2,
        }
    }
}

impl PlannerConfig {
    pub fn settings(&self) -> Result<PlannerSettings> {
        Ok(PlannerSettings {
            measurement_stale_after: checked_days(
                "planner.measurement_stale_days",
                self.measurement_stale_days,
                1,
            )?,
            maintenance_lookahead: checked_days(
                "planner.maintenance_lookahead_days",
                self.maintenance_lookahead_days,
                0,
            )?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_directory: PathBuf,
    pub bind_address: String,
    pub allowed_origin: String,
    /// Built UI served for any non-API path
    pub static_directory: Option<PathBuf>,
    pub quality: QualityConfig,
    pub planner: PlannerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_directory: default_data_directory(),
            bind_address: "127.0.0.1:3000".to_string(),
            allowed_origin: "http://localhost:8080".to_string(),
            static_directory: None,
            quality: QualityConfig::default(),
            planner: PlannerConfig::default(),
        }
    }
}

/// `~/Documents/Water Station Ops`, or the working directory when the
/// platform has no documents folder
pub fn default_data_directory() -> PathBuf {
    dirs::document_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Water Station Ops")
}

impl AppConfig {
    /// Read a config file. A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let yaml = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: AppConfig = serde_yaml::from_str(&yaml)
            .with_context(|| format!("Malformed config file {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Check that every interval converts to a usable duration
    pub fn validate(&self) -> Result<()> {
        self.quality.measurement_interval()?;
        self.planner.settings()?;
        Ok(())
    }

    /// Apply overrides from a variable lookup
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(DATA_DIR_ENV).filter(|v| !v.trim().is_empty()) {
            self.data_directory = PathBuf::from(dir);
        }
        if let Some(address) = lookup(BIND_ADDRESS_ENV).filter(|v| !v.trim().is_empty()) {
            self.bind_address = address;
        }
        self
    }

    /// Load from the file named by `WATER_OPS_CONFIG` with environment overrides
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        let config = Self::from_file(Path::new(&path))?;
        Ok(config.with_overrides(|key| std::env::var(key).ok()))
    }
}
