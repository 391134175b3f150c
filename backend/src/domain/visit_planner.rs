//! Visit Planner.
//!
//! Builds the ordered checklist for the next visit to the station from the
//! maintenance catalog, the maintenance history and the latest quality
//! reading. Planning is a pure function of its inputs.
//!
//! Emission order:
//! 1. quality measurement, when no reading exists or the last one is stale
//! 2. maintenance routines that are overdue or due within the lookahead, in
//!    catalog order
//! 3. the sales registration, always

use chrono::{DateTime, Duration, Utc};
use shared::{FrequencyClass, TaskKind, TaskPriority};
use std::collections::{HashMap, HashSet};

use super::models::maintenance::{MaintenanceDefinition, MaintenanceLogEntry};
use super::models::quality::QualityReading;
use super::models::visit::VisitTask;

pub const MEASUREMENT_TASK_ID: &str = "measurement";
pub const REGISTRATION_TASK_ID: &str = "registration";
pub const MEASUREMENT_TASK_TITLE: &str = "Quality Measurement";
pub const REGISTRATION_TASK_TITLE: &str = "Close Weekly Sales";

const MEASUREMENT_TASK_MINUTES: u32 = 15;
const REGISTRATION_TASK_MINUTES: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannerSettings {
    /// A reading at least this old asks for a new measurement
    pub measurement_stale_after: Duration,
    /// Routines due within this window are pulled into the visit
    pub maintenance_lookahead: Duration,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            measurement_stale_after: Duration::days(6),
            maintenance_lookahead: Duration::days(2),
        }
    }
}

/// Task id of the routine with the given definition id
pub fn maintenance_task_id(definition_id: &str) -> String {
    format!("maintenance::{}", definition_id)
}

fn priority_for(frequency: FrequencyClass) -> TaskPriority {
    match frequency {
        FrequencyClass::Daily | FrequencyClass::Weekly => TaskPriority::Urgent,
        FrequencyClass::Monthly | FrequencyClass::Yearly | FrequencyClass::Variable => {
            TaskPriority::Normal
        }
    }
}

/// Latest log entry per definition id, by `performed_at`
fn latest_runs(logs: &[MaintenanceLogEntry]) -> HashMap<&str, &MaintenanceLogEntry> {
    let mut latest: HashMap<&str, &MaintenanceLogEntry> = HashMap::new();
    for entry in logs {
        latest
            .entry(entry.maintenance_definition_id.as_str())
            .and_modify(|current| {
                if entry.performed_at >= current.performed_at {
                    *current = entry;
                }
            })
            .or_insert(entry);
    }
    latest
}

/// Produce the checklist for a visit happening at `now`.
///
/// Every task has a gap-free `order` starting at 1, no routine appears twice,
/// and the registration task is always last.
pub fn plan_visit(
    now: DateTime<Utc>,
    catalog: &[MaintenanceDefinition],
    logs: &[MaintenanceLogEntry],
    last_reading: Option<&QualityReading>,
    settings: &PlannerSettings,
) -> Vec<VisitTask> {
    let mut tasks = Vec::new();

    let measurement_due = match last_reading {
        None => true,
        Some(reading) => now - reading.timestamp >= settings.measurement_stale_after,
    };
    if measurement_due {
        tasks.push(VisitTask {
            id: MEASUREMENT_TASK_ID.to_string(),
            source_maintenance_id: None,
            kind: TaskKind::Measurement,
            title: MEASUREMENT_TASK_TITLE.to_string(),
            description: "Measure residual chlorine, TDS and hardness".to_string(),
            priority: TaskPriority::Urgent,
            estimated_minutes: MEASUREMENT_TASK_MINUTES,
            completed: false,
            order: 0,
        });
    }

    let latest = latest_runs(logs);
    let horizon = now + settings.maintenance_lookahead;
    let mut planned: HashSet<&str> = HashSet::new();
    for definition in catalog {
        if !planned.insert(definition.id.as_str()) {
            continue;
        }
        let next_due = latest
            .get(definition.id.as_str())
            .map(|entry| entry.next_due_at)
            .unwrap_or(now);
        if next_due > horizon {
            continue;
        }
        tasks.push(VisitTask {
            id: maintenance_task_id(&definition.id),
            source_maintenance_id: Some(definition.id.clone()),
            kind: TaskKind::Maintenance,
            title: definition.name.clone(),
            description: definition.description.clone(),
            priority: priority_for(definition.frequency),
            estimated_minutes: definition.estimated_minutes,
            completed: false,
            order: 0,
        });
    }

    tasks.push(VisitTask {
        id: REGISTRATION_TASK_ID.to_string(),
        source_maintenance_id: None,
        kind: TaskKind::Registration,
        title: REGISTRATION_TASK_TITLE.to_string(),
        description: "Record or import the sales of the period".to_string(),
        priority: TaskPriority::Urgent,
        estimated_minutes: REGISTRATION_TASK_MINUTES,
        completed: false,
        order: 0,
    });

    for (index, task) in tasks.iter_mut().enumerate() {
        task.order = index as u32 + 1;
    }
    tasks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::seed_catalog;
    use crate::domain::models::maintenance::next_due_after;
    use chrono::TimeZone;
    use shared::HardnessLevel;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 14, 9, 0, 0).unwrap()
    }

    fn reading_at(timestamp: DateTime<Utc>) -> QualityReading {
        QualityReading {
            id: "quality::1".to_string(),
            timestamp,
            residual_chlorine: 0.0,
            total_dissolved_solids: 100.0,
            hardness: HardnessLevel::None,
            recorded_by: "Ana".to_string(),
            notes: None,
            next_due_at: timestamp + Duration::hours(4),
        }
    }

    fn log(definition: &MaintenanceDefinition, performed_at: DateTime<Utc>) -> MaintenanceLogEntry {
        MaintenanceLogEntry {
            id: format!("log-{}-{}", definition.id, performed_at.timestamp()),
            maintenance_definition_id: definition.id.clone(),
            performed_at,
            performed_by: "Luis".to_string(),
            notes: None,
            next_due_at: next_due_after(definition.frequency, performed_at),
            duration_minutes: None,
        }
    }

    fn log_due_at(definition_id: &str, next_due_at: DateTime<Utc>) -> MaintenanceLogEntry {
        MaintenanceLogEntry {
            id: format!("log-{}", definition_id),
            maintenance_definition_id: definition_id.to_string(),
            performed_at: now() - Duration::days(30),
            performed_by: "Luis".to_string(),
            notes: None,
            next_due_at,
            duration_minutes: None,
        }
    }

    #[test]
    fn test_first_run_plans_everything() {
        let catalog = seed_catalog();
        let tasks = plan_visit(now(), &catalog, &[], None, &PlannerSettings::default());

        assert_eq!(tasks.len(), catalog.len() + 2);
        assert_eq!(tasks[0].id, MEASUREMENT_TASK_ID);
        assert_eq!(tasks[0].title, "Quality Measurement");
        assert_eq!(tasks[0].estimated_minutes, 15);
        assert_eq!(tasks[1].id, maintenance_task_id("1"));
        let last = tasks.last().unwrap();
        assert_eq!(last.kind, TaskKind::Registration);
        assert_eq!(last.title, "Close Weekly Sales");
        assert_eq!(last.priority, TaskPriority::Urgent);
        assert_eq!(last.estimated_minutes, 10);
    }

    #[test]
    fn test_order_is_gap_free_and_ids_unique() {
        let mut catalog = seed_catalog();
        catalog.push(catalog[1].clone());
        let tasks = plan_visit(now(), &catalog, &[], None, &PlannerSettings::default());

        let orders: Vec<u32> = tasks.iter().map(|t| t.order).collect();
        assert_eq!(orders, (1..=tasks.len() as u32).collect::<Vec<_>>());
        let ids: HashSet<_> = tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids.len(), tasks.len());
    }

    #[test]
    fn test_measurement_staleness_threshold() {
        let settings = PlannerSettings::default();
        let fresh = reading_at(now() - Duration::days(6) + Duration::seconds(1));
        let stale = reading_at(now() - Duration::days(6));

        let tasks = plan_visit(now(), &[], &[], Some(&fresh), &settings);
        assert!(tasks.iter().all(|t| t.kind != TaskKind::Measurement));

        let tasks = plan_visit(now(), &[], &[], Some(&stale), &settings);
        assert_eq!(tasks[0].kind, TaskKind::Measurement);
        assert_eq!(tasks[0].priority, TaskPriority::Urgent);
    }

    #[test]
    fn test_registration_is_always_present() {
        let fresh = reading_at(now());
        let tasks = plan_visit(now(), &[], &[], Some(&fresh), &PlannerSettings::default());
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, REGISTRATION_TASK_ID);
        assert_eq!(tasks[0].order, 1);
    }

    #[test]
    fn test_lookahead_boundary_is_inclusive() {
        let catalog = seed_catalog();
        let weekly = &catalog[1];
        let fresh = reading_at(now());
        let settings = PlannerSettings::default();

        let at_boundary = vec![log_due_at(&weekly.id, now() + Duration::days(2))];
        let tasks = plan_visit(now(), &catalog[1..2], &at_boundary, Some(&fresh), &settings);
        assert_eq!(tasks[0].id, maintenance_task_id(&weekly.id));

        let beyond = vec![log_due_at(&weekly.id, now() + Duration::days(2) + Duration::seconds(1))];
        let tasks = plan_visit(now(), &catalog[1..2], &beyond, Some(&fresh), &settings);
        assert_eq!(tasks.len(), 1);

        let overdue = vec![log_due_at(&weekly.id, now() - Duration::days(20))];
        let tasks = plan_visit(now(), &catalog[1..2], &overdue, Some(&fresh), &settings);
        assert_eq!(tasks.len(), 2);
    }

    #[test]
    fn test_latest_run_decides_due_date() {
        let catalog = seed_catalog();
        let yearly = &catalog[2];
        let fresh = reading_at(now());
        // An old run and a recent one: the recent one pushes the routine out
        let logs = vec![
            log(yearly, now() - Duration::days(1)),
            log(yearly, now() - Duration::days(800)),
        ];
        let tasks = plan_visit(now(), &catalog[2..3], &logs, Some(&fresh), &PlannerSettings::default());
        assert_eq!(tasks.len(), 1);
    }

    #[test]
    fn test_priority_follows_frequency() {
        let catalog = seed_catalog();
        let tasks = plan_visit(now(), &catalog, &[], None, &PlannerSettings::default());
        let priority_of = |definition_id: &str| {
            tasks
                .iter()
                .find(|t| t.source_maintenance_id.as_deref() == Some(definition_id))
                .map(|t| t.priority)
        };

        assert_eq!(priority_of("1"), Some(TaskPriority::Urgent)); // daily
        assert_eq!(priority_of("2"), Some(TaskPriority::Urgent)); // weekly
        assert_eq!(priority_of("3"), Some(TaskPriority::Normal)); // yearly
        assert_eq!(priority_of("5"), Some(TaskPriority::Normal)); // variable
        assert_eq!(priority_of("6"), Some(TaskPriority::Normal)); // monthly
    }

    #[test]
    fn test_same_inputs_same_plan() {
        let catalog = seed_catalog();
        let logs = vec![log(&catalog[0], now() - Duration::hours(30))];
        let first = plan_visit(now(), &catalog, &logs, None, &PlannerSettings::default());
        let second = plan_visit(now(), &catalog, &logs, None, &PlannerSettings::default());
        assert_eq!(first, second);
    }
}
