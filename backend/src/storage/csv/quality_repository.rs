//! Quality readings stored in `quality_readings.csv`.
//!
//! Hardness is written as the reagent colour (`blue`, `purple`, `red`).

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::HardnessLevel;

use super::connection::{CsvConnection, QUALITY_READINGS};
use super::table::CsvTable;
use crate::domain::dates::{format_instant, parse_stored_instant};
use crate::domain::models::quality::QualityReading;
use crate::storage::traits::QualityReadingStorage;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct QualityReadingRow {
    id: String,
    timestamp: String,
    residual_chlorine: f64,
    total_dissolved_solids: f64,
    hardness: String,
    recorded_by: String,
    notes: Option<String>,
    next_due_at: String,
}

impl QualityReadingRow {
    fn from_domain(reading: &QualityReading) -> Self {
        Self {
            id: reading.id.clone(),
            timestamp: format_instant(reading.timestamp),
            residual_chlorine: reading.residual_chlorine,
            total_dissolved_solids: reading.total_dissolved_solids,
            hardness: reading.hardness.color_tag().to_string(),
            recorded_by: reading.recorded_by.clone(),
            notes: reading.notes.clone(),
            next_due_at: format_instant(reading.next_due_at),
        }
    }

    fn into_domain(self) -> Result<QualityReading> {
        let hardness = HardnessLevel::from_color_tag(&self.hardness)
            .ok_or_else(|| anyhow!("Unknown hardness colour '{}' in reading {}", self.hardness, self.id))?;
        Ok(QualityReading {
            timestamp: parse_stored_instant(&self.timestamp)?,
            next_due_at: parse_stored_instant(&self.next_due_at)?,
            id: self.id,
            residual_chlorine: self.residual_chlorine,
            total_dissolved_solids: self.total_dissolved_solids,
            hardness,
            recorded_by: self.recorded_by,
            notes: self.notes,
        })
    }
}

#[derive(Debug, Clone)]
pub struct QualityReadingRepository {
    table: CsvTable<QualityReadingRow>,
}

impl QualityReadingRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self {
            table: connection.table(QUALITY_READINGS),
        }
    }

    fn read_readings(&self) -> Result<Vec<QualityReading>> {
        let mut readings = self
            .table
            .read_all()?
            .into_iter()
            .map(QualityReadingRow::into_domain)
            .collect::<Result<Vec<_>>>()?;
        readings.sort_by_key(|r| r.timestamp);
        Ok(readings)
    }
}

#[async_trait]
impl QualityReadingStorage for QualityReadingRepository {
    async fn store_reading(&self, reading: &QualityReading) -> Result<()> {
        self.table.append(QualityReadingRow::from_domain(reading))
    }

    async fn list_readings(&self) -> Result<Vec<QualityReading>> {
        self.read_readings()
    }

    async fn get_reading(&self, reading_id: &str) -> Result<Option<QualityReading>> {
        Ok(self.read_readings()?.into_iter().find(|r| r.id == reading_id))
    }

    async fn get_latest_reading(&self) -> Result<Option<QualityReading>> {
        Ok(self.read_readings()?.pop())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::test_utils::TestEnvironment;
    use chrono::{Duration, TimeZone, Utc};

    fn reading(id: &str, hours: i64, hardness: HardnessLevel) -> QualityReading {
        let timestamp = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap() + Duration::hours(hours);
        QualityReading {
            id: id.to_string(),
            timestamp,
            residual_chlorine: 0.2,
            total_dissolved_solids: 95.0,
            hardness,
            recorded_by: "Soto".to_string(),
            notes: None,
            next_due_at: timestamp + Duration::hours(4),
        }
    }

    #[tokio::test]
    async fn test_latest_reading_is_by_timestamp_not_insertion() {
        let env = TestEnvironment::new().unwrap();
        let repo = QualityReadingRepository::new(env.connection.clone());

        repo.store_reading(&reading("late", 48, HardnessLevel::High)).await.unwrap();
        repo.store_reading(&reading("early", 0, HardnessLevel::None)).await.unwrap();

        let latest = repo.get_latest_reading().await.unwrap().unwrap();
        assert_eq!(latest.id, "late");
        assert_eq!(latest.hardness, HardnessLevel::High);

        let all = repo.list_readings().await.unwrap();
        assert_eq!(all.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(), vec!["early", "late"]);
    }

    #[tokio::test]
    async fn test_hardness_is_stored_as_colour() {
        let env = TestEnvironment::new().unwrap();
        let repo = QualityReadingRepository::new(env.connection.clone());
        repo.store_reading(&reading("r1", 0, HardnessLevel::Medium)).await.unwrap();

        let raw = std::fs::read_to_string(env.connection.collection_path(QUALITY_READINGS)).unwrap();
        assert!(raw.contains("purple"));
        assert_eq!(repo.get_reading("r1").await.unwrap().unwrap().hardness, HardnessLevel::Medium);
        assert!(repo.get_reading("missing").await.unwrap().is_none());
    }
}
