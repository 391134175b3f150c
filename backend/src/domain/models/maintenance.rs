//! Domain models for the maintenance catalog and its run history.
use chrono::{DateTime, Duration, Months, Utc};
use shared::{FrequencyClass, MaintenanceCategory};

#[derive(Debug, Clone, PartialEq)]
pub struct MaintenanceStep {
    pub number: u32,
    pub description: String,
    pub warning: Option<String>,
    pub completed: bool,
}

impl MaintenanceStep {
    pub fn new(number: u32, description: &str) -> Self {
        Self {
            number,
            description: description.to_string(),
            warning: None,
            completed: false,
        }
    }

    pub fn with_warning(mut self, warning: &str) -> Self {
        self.warning = Some(warning.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaintenanceDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: MaintenanceCategory,
    pub frequency: FrequencyClass,
    pub estimated_minutes: u32,
    pub required_materials: Vec<String>,
    pub steps: Vec<MaintenanceStep>,
}

impl MaintenanceDefinition {
    /// Clear the per-run completion flags
    pub fn reset_steps(&mut self) {
        for step in &mut self.steps {
            step.completed = false;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaintenanceLogEntry {
    pub id: String,
    pub maintenance_definition_id: String,
    pub performed_at: DateTime<Utc>,
    pub performed_by: String,
    pub notes: Option<String>,
    pub next_due_at: DateTime<Utc>,
    pub duration_minutes: Option<u32>,
}

impl MaintenanceLogEntry {
    pub fn generate_id() -> String {
        super::generate_id("maintenance_log")
    }
}

/// When a task performed at `performed_at` is due again.
///
/// Monthly and yearly intervals follow the calendar (Jan 31 + 1 month is the
/// last day of February). A variable task has no nominal interval and is due
/// again immediately.
pub fn next_due_after(frequency: FrequencyClass, performed_at: DateTime<Utc>) -> DateTime<Utc> {
    let next = match frequency {
        FrequencyClass::Daily => Some(performed_at + Duration::days(1)),
        FrequencyClass::Weekly => Some(performed_at + Duration::days(7)),
        FrequencyClass::Monthly => performed_at.checked_add_months(Months::new(1)),
        FrequencyClass::Yearly => performed_at.checked_add_months(Months::new(12)),
        FrequencyClass::Variable => Some(performed_at),
    };
    next.unwrap_or(performed_at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_next_due_follows_frequency() {
        let performed = Utc.with_ymd_and_hms(2025, 1, 31, 9, 0, 0).unwrap();

        assert_eq!(
            next_due_after(FrequencyClass::Daily, performed),
            Utc.with_ymd_and_hms(2025, 2, 1, 9, 0, 0).unwrap()
        );
        assert_eq!(
            next_due_after(FrequencyClass::Weekly, performed),
            Utc.with_ymd_and_hms(2025, 2, 7, 9, 0, 0).unwrap()
        );
        assert_eq!(
            next_due_after(FrequencyClass::Monthly, performed),
            Utc.with_ymd_and_hms(2025, 2, 28, 9, 0, 0).unwrap()
        );
        assert_eq!(
            next_due_after(FrequencyClass::Yearly, performed),
            Utc.with_ymd_and_hms(2026, 1, 31, 9, 0, 0).unwrap()
        );
        assert_eq!(next_due_after(FrequencyClass::Variable, performed), performed);
    }

    #[test]
    fn test_reset_steps_clears_flags() {
        let mut definition = MaintenanceDefinition {
            id: "x".to_string(),
            name: "x".to_string(),
            description: String::new(),
            category: MaintenanceCategory::Filters,
            frequency: FrequencyClass::Weekly,
            estimated_minutes: 5,
            required_materials: vec![],
            steps: vec![MaintenanceStep::new(1, "a"), MaintenanceStep::new(2, "b")],
        };
        definition.steps[1].completed = true;
        definition.reset_steps();
        assert!(definition.steps.iter().all(|s| !s.completed));
    }
}
