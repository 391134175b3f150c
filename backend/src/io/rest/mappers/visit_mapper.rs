use shared::{VisitLogEntry, VisitPlanResponse, VisitProgress, VisitTask};

use crate::domain::commands::visit::{VisitPlan, VisitProgressSummary};
use crate::domain::models::visit::{
    VisitLogEntry as DomainVisitLogEntry, VisitTask as DomainVisitTask,
};

pub struct VisitMapper;

impl VisitMapper {
    pub fn task_to_dto(domain: DomainVisitTask) -> VisitTask {
        VisitTask {
            id: domain.id,
            source_maintenance_id: domain.source_maintenance_id,
            kind: domain.kind,
            title: domain.title,
            description: domain.description,
            priority: domain.priority,
            estimated_minutes: domain.estimated_minutes,
            completed: domain.completed,
            order: domain.order,
        }
    }

    pub fn plan_to_dto(plan: VisitPlan) -> VisitPlanResponse {
        VisitPlanResponse {
            tasks: plan.tasks.into_iter().map(Self::task_to_dto).collect(),
            started_at: plan.started_at,
        }
    }

    pub fn progress_to_dto(summary: VisitProgressSummary) -> VisitProgress {
        VisitProgress {
            total_tasks: summary.total_tasks,
            completed_tasks: summary.completed_tasks,
            percent_complete: summary.percent_complete,
            estimated_minutes_total: summary.estimated_minutes_total,
            estimated_minutes_completed: summary.estimated_minutes_completed,
            pending_urgent: summary.pending_urgent,
            pending_normal: summary.pending_normal,
            pending_low: summary.pending_low,
            started_at: summary.started_at,
        }
    }

    pub fn log_to_dto(domain: DomainVisitLogEntry) -> VisitLogEntry {
        VisitLogEntry {
            id: domain.id,
            date: domain.date,
            duration_seconds: domain.duration_seconds,
            completed_task_titles: domain.completed_task_titles,
            notes: domain.notes,
        }
    }
}
