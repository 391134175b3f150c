//! Quality Status Classifier and the quality reading recorder.
//!
//! A reading is **optimal** when every parameter is within range, **critical**
//! when chlorine is present in the product water or hardness is detected, and
//! **attention** when only the dissolved solids are out of range.
//!
//! | Parameter               | In range          |
//! |-------------------------|-------------------|
//! | residual chlorine (ppm) | `<= 0.5`          |
//! | total dissolved solids  | `50..=150`        |
//! | hardness                | reagent turns blue |

use chrono::{DateTime, Duration, Utc};
use log::{info, warn};
use shared::{HardnessLevel, QualityStatus};
use std::sync::Arc;

use super::commands::quality::{QualityAssessment, RecordReadingCommand};
use super::dates::instant_or_now;
use super::errors::{DomainError, DomainResult};
use super::models::quality::QualityReading;
use crate::storage::{Connection, QualityReadingStorage};

pub const MAX_RESIDUAL_CHLORINE: f64 = 0.5;
pub const MIN_DISSOLVED_SOLIDS: f64 = 50.0;
pub const MAX_DISSOLVED_SOLIDS: f64 = 150.0;

/// Hours between two routine measurements
pub const DEFAULT_MEASUREMENT_INTERVAL_HOURS: i64 = 4;

/// Classify a reading. Pure and total over every reading.
pub fn classify_reading(reading: &QualityReading) -> QualityAssessment {
    let chlorine_ok = reading.residual_chlorine <= MAX_RESIDUAL_CHLORINE;
    let tds_ok = (MIN_DISSOLVED_SOLIDS..=MAX_DISSOLVED_SOLIDS)
        .contains(&reading.total_dissolved_solids);
    let hardness_ok = reading.hardness == HardnessLevel::None;

    let status = if chlorine_ok && tds_ok && hardness_ok {
        QualityStatus::Optimal
    } else if !chlorine_ok || !hardness_ok {
        QualityStatus::Critical
    } else {
        QualityStatus::Attention
    };

    QualityAssessment {
        status,
        chlorine_ok,
        tds_ok,
        hardness_ok,
    }
}

#[derive(Clone)]
pub struct QualityService<C: Connection> {
    reading_repository: C::QualityReadingRepository,
    measurement_interval: Duration,
}

impl<C: Connection> QualityService<C> {
    pub fn new(connection: Arc<C>, measurement_interval: Duration) -> Self {
        Self {
            reading_repository: connection.create_quality_reading_repository(),
            measurement_interval,
        }
    }

    /// Validate and store a new reading
    pub async fn record_reading(
        &self,
        command: RecordReadingCommand,
        now: DateTime<Utc>,
    ) -> DomainResult<QualityReading> {
        for (name, value) in [
            ("residual chlorine", command.residual_chlorine),
            ("total dissolved solids", command.total_dissolved_solids),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(DomainError::validation(format!(
                    "{} must be a non-negative number",
                    name
                )));
            }
        }
        let recorded_by = command.recorded_by.trim();
        if recorded_by.is_empty() {
            return Err(DomainError::validation("recorded_by cannot be empty"));
        }
        let timestamp = instant_or_now(command.timestamp.as_deref(), now)?;

        let reading = QualityReading {
            id: QualityReading::generate_id(),
            timestamp,
            residual_chlorine: command.residual_chlorine,
            total_dissolved_solids: command.total_dissolved_solids,
            hardness: command.hardness,
            recorded_by: recorded_by.to_string(),
            notes: command.notes.filter(|n| !n.trim().is_empty()),
            next_due_at: timestamp + self.measurement_interval,
        };
        self.reading_repository.store_reading(&reading).await?;

        let assessment = classify_reading(&reading);
        if assessment.status == QualityStatus::Optimal {
            info!("Recorded quality reading {}", reading.id);
        } else {
            warn!(
                "Recorded quality reading {} with status {:?} (chlorine ok: {}, tds ok: {}, hardness ok: {})",
                reading.id, assessment.status, assessment.chlorine_ok, assessment.tds_ok, assessment.hardness_ok
            );
        }
        Ok(reading)
    }

    pub async fn list_readings(&self) -> DomainResult<Vec<QualityReading>> {
        Ok(self.reading_repository.list_readings().await?)
    }

    pub async fn latest_reading(&self) -> DomainResult<Option<QualityReading>> {
        Ok(self.reading_repository.get_latest_reading().await?)
    }

    /// Classify a stored reading
    pub async fn reading_status(&self, reading_id: &str) -> DomainResult<QualityAssessment> {
        let reading = self
            .reading_repository
            .get_reading(reading_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Quality reading {}", reading_id)))?;
        Ok(classify_reading(&reading))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::test_utils::TestEnvironment;
    use crate::storage::CsvConnection;
    use chrono::TimeZone;

    fn reading(chlorine: f64, tds: f64, hardness: HardnessLevel) -> QualityReading {
        let timestamp = Utc.with_ymd_and_hms(2025, 4, 2, 9, 0, 0).unwrap();
        QualityReading {
            id: "quality::test".to_string(),
            timestamp,
            residual_chlorine: chlorine,
            total_dissolved_solids: tds,
            hardness,
            recorded_by: "Ana".to_string(),
            notes: None,
            next_due_at: timestamp,
        }
    }

    fn command(chlorine: f64, tds: f64) -> RecordReadingCommand {
        RecordReadingCommand {
            residual_chlorine: chlorine,
            total_dissolved_solids: tds,
            hardness: HardnessLevel::None,
            recorded_by: " Ana ".to_string(),
            notes: Some("   ".to_string()),
            timestamp: None,
        }
    }

    #[test]
    fn test_classify_boundaries_are_inclusive() {
        let assessment = classify_reading(&reading(0.5, 50.0, HardnessLevel::None));
        assert_eq!(assessment.status, QualityStatus::Optimal);
        assert_eq!(
            classify_reading(&reading(0.0, 150.0, HardnessLevel::None)).status,
            QualityStatus::Optimal
        );
    }

    #[test]
    fn test_classify_tds_only_is_attention() {
        let assessment = classify_reading(&reading(0.2, 151.0, HardnessLevel::None));
        assert_eq!(assessment.status, QualityStatus::Attention);
        assert!(assessment.chlorine_ok && assessment.hardness_ok && !assessment.tds_ok);
        assert_eq!(
            classify_reading(&reading(0.2, 49.9, HardnessLevel::None)).status,
            QualityStatus::Attention
        );
    }

    #[test]
    fn test_classify_chlorine_or_hardness_is_critical() {
        assert_eq!(
            classify_reading(&reading(0.51, 100.0, HardnessLevel::None)).status,
            QualityStatus::Critical
        );
        assert_eq!(
            classify_reading(&reading(0.1, 100.0, HardnessLevel::Medium)).status,
            QualityStatus::Critical
        );
        // Critical wins over an out-of-range TDS
        assert_eq!(
            classify_reading(&reading(0.1, 400.0, HardnessLevel::High)).status,
            QualityStatus::Critical
        );
    }

    #[tokio::test]
    async fn test_record_reading_sets_next_due_and_trims() {
        let env = TestEnvironment::new().unwrap();
        let service: QualityService<CsvConnection> =
            QualityService::new(Arc::new(env.connection.clone()), Duration::hours(4));
        let now = Utc.with_ymd_and_hms(2025, 4, 2, 9, 0, 0).unwrap();

        let stored = service.record_reading(command(0.1, 90.0), now).await.unwrap();

        assert_eq!(stored.timestamp, now);
        assert_eq!(stored.next_due_at, now + Duration::hours(4));
        assert_eq!(stored.recorded_by, "Ana");
        assert_eq!(stored.notes, None);
        assert_eq!(service.latest_reading().await.unwrap(), Some(stored.clone()));
        assert_eq!(
            service.reading_status(&stored.id).await.unwrap().status,
            QualityStatus::Optimal
        );
    }

    #[tokio::test]
    async fn test_record_reading_rejects_bad_input_without_storing() {
        let env = TestEnvironment::new().unwrap();
        let service: QualityService<CsvConnection> =
            QualityService::new(Arc::new(env.connection.clone()), Duration::hours(4));
        let now = Utc::now();

        let err = service.record_reading(command(-0.1, 90.0), now).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        let err = service.record_reading(command(0.1, f64::NAN), now).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let mut anonymous = command(0.1, 90.0);
        anonymous.recorded_by = "  ".to_string();
        assert!(service.record_reading(anonymous, now).await.is_err());

        assert!(service.list_readings().await.unwrap().is_empty());
        assert!(matches!(
            service.reading_status("quality::missing").await.unwrap_err(),
            DomainError::NotFound(_)
        ));
    }
}
