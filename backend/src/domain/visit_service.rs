//! Visit session: the transient checklist of the visit in progress.
//!
//! The plan is rebuilt from fresh store data every time it is generated and
//! lives only in memory. Finishing a visit is the one operation that writes:
//! it appends a [`VisitLogEntry`] with the titles of the completed tasks.

use chrono::{DateTime, Utc};
use log::{info, warn};
use shared::TaskPriority;
use std::sync::{Arc, Mutex, MutexGuard};

use super::commands::visit::{VisitPlan, VisitProgressSummary};
use super::dates::local_date_of;
use super::errors::{DomainError, DomainResult};
use super::maintenance_service::MaintenanceService;
use super::models::visit::{VisitLogEntry, VisitTask};
use super::visit_planner::{plan_visit, PlannerSettings};
use crate::storage::{Connection, MaintenanceLogStorage, QualityReadingStorage, VisitLogStorage};

#[derive(Debug, Default)]
struct VisitSession {
    tasks: Vec<VisitTask>,
    started_at: Option<DateTime<Utc>>,
}

impl VisitSession {
    fn snapshot(&self) -> VisitPlan {
        VisitPlan {
            tasks: self.tasks.clone(),
            started_at: self.started_at,
        }
    }
}

#[derive(Clone)]
pub struct VisitService<C: Connection> {
    maintenance_service: MaintenanceService<C>,
    maintenance_log_repository: C::MaintenanceLogRepository,
    reading_repository: C::QualityReadingRepository,
    visit_log_repository: C::VisitLogRepository,
    settings: PlannerSettings,
    session: Arc<Mutex<VisitSession>>,
}

impl<C: Connection> VisitService<C> {
    pub fn new(
        connection: Arc<C>,
        maintenance_service: MaintenanceService<C>,
        settings: PlannerSettings,
    ) -> Self {
        Self {
            maintenance_service,
            maintenance_log_repository: connection.create_maintenance_log_repository(),
            reading_repository: connection.create_quality_reading_repository(),
            visit_log_repository: connection.create_visit_log_repository(),
            settings,
            session: Arc::new(Mutex::new(VisitSession::default())),
        }
    }

    fn lock_session(&self) -> MutexGuard<'_, VisitSession> {
        self.session.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Plan the visit from current data, replacing any previous plan
    pub async fn generate_plan(&self, now: DateTime<Utc>) -> DomainResult<VisitPlan> {
        let catalog = self.maintenance_service.catalog();
        let logs = self.maintenance_log_repository.list_log_entries().await?;
        let last_reading = self.reading_repository.get_latest_reading().await?;

        let tasks = plan_visit(now, &catalog, &logs, last_reading.as_ref(), &self.settings);
        info!("Planned visit with {} tasks", tasks.len());

        let mut session = self.lock_session();
        *session = VisitSession {
            tasks,
            started_at: None,
        };
        Ok(session.snapshot())
    }

    pub fn current_plan(&self) -> VisitPlan {
        self.lock_session().snapshot()
    }

    /// Mark the visit as started. Starting twice keeps the first start time.
    pub fn start_visit(&self, now: DateTime<Utc>) -> VisitPlan {
        let mut session = self.lock_session();
        if session.started_at.is_none() {
            session.started_at = Some(now);
            info!("Visit started at {}", now);
        }
        session.snapshot()
    }

    pub fn complete_task(&self, task_id: &str) -> DomainResult<VisitTask> {
        let mut session = self.lock_session();
        let task = session
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| DomainError::not_found(format!("Visit task {}", task_id)))?;
        task.completed = true;
        Ok(task.clone())
    }

    pub fn progress(&self) -> VisitProgressSummary {
        let session = self.lock_session();
        let total_tasks = session.tasks.len();
        let completed_tasks = session.tasks.iter().filter(|t| t.completed).count();
        let percent_complete = if total_tasks == 0 {
            0
        } else {
            (completed_tasks as f64 * 100.0 / total_tasks as f64).round() as u32
        };
        let pending = |priority: TaskPriority| {
            session
                .tasks
                .iter()
                .filter(|t| !t.completed && t.priority == priority)
                .count()
        };

        VisitProgressSummary {
            total_tasks,
            completed_tasks,
            percent_complete,
            estimated_minutes_total: session.tasks.iter().map(|t| t.estimated_minutes).sum(),
            estimated_minutes_completed: session
                .tasks
                .iter()
                .filter(|t| t.completed)
                .map(|t| t.estimated_minutes)
                .sum(),
            pending_urgent: pending(TaskPriority::Urgent),
            pending_normal: pending(TaskPriority::Normal),
            pending_low: pending(TaskPriority::Low),
            started_at: session.started_at,
        }
    }

    /// Close the visit and append it to the visit log.
    ///
    /// If the store write fails the session stays started and untouched.
    pub async fn finish_visit(
        &self,
        notes: Option<String>,
        now: DateTime<Utc>,
    ) -> DomainResult<VisitLogEntry> {
        let (started_at, completed_task_titles) = {
            let session = self.lock_session();
            let started_at = session
                .started_at
                .ok_or_else(|| DomainError::validation("No visit in progress"))?;
            let titles: Vec<String> = session
                .tasks
                .iter()
                .filter(|t| t.completed)
                .map(|t| t.title.clone())
                .collect();
            (started_at, titles)
        };

        let entry = VisitLogEntry {
            id: VisitLogEntry::generate_id(),
            date: local_date_of(started_at),
            duration_seconds: (now - started_at).num_seconds().max(0),
            completed_task_titles,
            notes: notes.filter(|n| !n.trim().is_empty()),
        };
        if let Err(e) = self.visit_log_repository.store_visit_log(&entry).await {
            warn!("Visit log write failed, visit stays open: {}", e);
            return Err(e.into());
        }

        self.lock_session().started_at = None;
        info!(
            "Visit finished after {}s with {} completed tasks",
            entry.duration_seconds,
            entry.completed_task_titles.len()
        );
        Ok(entry)
    }

    pub async fn list_visit_logs(&self) -> DomainResult<Vec<VisitLogEntry>> {
        Ok(self.visit_log_repository.list_visit_logs().await?)
    }
}
