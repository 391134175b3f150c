//! Domain model for a water quality reading.
use chrono::{DateTime, Utc};
use shared::HardnessLevel;

#[derive(Debug, Clone, PartialEq)]
pub struct QualityReading {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub residual_chlorine: f64, // ppm
    pub total_dissolved_solids: f64, // ppm
    pub hardness: HardnessLevel,
    pub recorded_by: String,
    pub notes: Option<String>,
    pub next_due_at: DateTime<Utc>, // always timestamp + measurement interval
}

impl QualityReading {
    pub fn generate_id() -> String {
        super::generate_id("quality")
    }
}
