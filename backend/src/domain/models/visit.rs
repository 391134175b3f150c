//! Transient visit plan and the persisted visit log.
use chrono::NaiveDate;
use shared::{TaskKind, TaskPriority};

/// One item of the visit checklist. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct VisitTask {
    pub id: String,
    pub source_maintenance_id: Option<String>,
    pub kind: TaskKind,
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    pub estimated_minutes: u32,
    pub completed: bool,
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VisitLogEntry {
    pub id: String,
    pub date: NaiveDate,
    pub duration_seconds: i64,
    pub completed_task_titles: Vec<String>,
    pub notes: Option<String>,
}

impl VisitLogEntry {
    pub fn generate_id() -> String {
        super::generate_id("visit")
    }
}
