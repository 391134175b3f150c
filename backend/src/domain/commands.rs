//! Domain-level command and query types.
//!
//! These structs are used by services inside the domain layer and are not
//! exposed over the public API. The REST layer maps the DTOs of the `shared`
//! crate to these internal types.

pub mod quality {
    use shared::{HardnessLevel, QualityStatus};

    #[derive(Debug, Clone)]
    pub struct RecordReadingCommand {
        pub residual_chlorine: f64,
        pub total_dissolved_solids: f64,
        pub hardness: HardnessLevel,
        pub recorded_by: String,
        pub notes: Option<String>,
        /// RFC 3339 or YYYY-MM-DD; current time if absent
        pub timestamp: Option<String>,
    }

    /// Outcome of classifying a reading, with the per-parameter checks
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct QualityAssessment {
        pub status: QualityStatus,
        pub chlorine_ok: bool,
        pub tds_ok: bool,
        pub hardness_ok: bool,
    }
}

pub mod maintenance {
    use chrono::{DateTime, Utc};

    #[derive(Debug, Clone)]
    pub struct CompleteMaintenanceCommand {
        pub maintenance_definition_id: String,
        pub performed_by: String,
        pub duration_minutes: Option<u32>,
        pub notes: Option<String>,
        pub performed_at: Option<String>,
    }

    /// A scheduled run joined with its definition name
    #[derive(Debug, Clone, PartialEq)]
    pub struct AgendaItem {
        pub log_id: String,
        pub maintenance_definition_id: String,
        pub maintenance_name: Option<String>,
        pub next_due_at: DateTime<Utc>,
    }
}

pub mod visit {
    use chrono::{DateTime, Utc};

    use crate::domain::models::visit::VisitTask;

    #[derive(Debug, Clone, PartialEq)]
    pub struct VisitPlan {
        pub tasks: Vec<VisitTask>,
        pub started_at: Option<DateTime<Utc>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct VisitProgressSummary {
        pub total_tasks: usize,
        pub completed_tasks: usize,
        pub percent_complete: u32,
        pub estimated_minutes_total: u32,
        pub estimated_minutes_completed: u32,
        pub pending_urgent: usize,
        pub pending_normal: usize,
        pub pending_low: usize,
        pub started_at: Option<DateTime<Utc>>,
    }
}

pub mod sales {
    /// Unit counts as received; negative values are rejected by the service
    #[derive(Debug, Clone)]
    pub struct RecordSaleCommand {
        pub date: String,
        pub large: i64,
        pub small: i64,
        pub by_volume: i64,
    }
}

pub mod expenses {
    use shared::ExpenseCategory;

    #[derive(Debug, Clone)]
    pub struct RecordExpenseCommand {
        pub date: String,
        pub concept: String,
        pub amount: f64,
        pub category: ExpenseCategory,
        pub is_recurring: bool,
        pub notes: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct CreateFixedExpenseCommand {
        pub concept: String,
        pub amount: f64,
        pub category: Option<ExpenseCategory>,
        pub due_day_of_month: u8,
    }

    #[derive(Debug, Clone, Default)]
    pub struct UpdateFixedExpenseCommand {
        pub concept: Option<String>,
        pub amount: Option<f64>,
        pub due_day_of_month: Option<u8>,
    }
}

pub mod cash {
    use chrono::{DateTime, Utc};

    #[derive(Debug, Clone)]
    pub struct RecordReconciliationCommand {
        pub withdrawn_amount: f64,
        pub notes: Option<String>,
    }

    /// Expected drawer contents since the last count
    #[derive(Debug, Clone, PartialEq)]
    pub struct ExpectedCash {
        pub checkpoint: Option<DateTime<Utc>>,
        pub opening_cash: f64,
        pub sales_since: f64,
        pub expenses_since: f64,
        pub expected_cash: f64,
    }
}

pub mod pricing {
    use shared::ProductUnit;

    /// Partial product update. Creating a product needs a name and a price.
    #[derive(Debug, Clone, Default)]
    pub struct UpsertProductCommand {
        pub product_id: String,
        pub name: Option<String>,
        pub unit_price: Option<f64>,
        pub unit_cost: Option<f64>,
        pub unit: Option<ProductUnit>,
        pub active: Option<bool>,
    }
}

pub mod notifications {
    use shared::NotificationKind;

    #[derive(Debug, Clone)]
    pub struct CreateNotificationCommand {
        pub kind: NotificationKind,
        pub title: String,
        pub message: String,
        pub action_label: Option<String>,
        pub action_route: Option<String>,
    }
}

pub mod dashboard {
    use chrono::NaiveDate;
    use shared::{ExpenseCategory, QualityStatus, SystemStatus};

    #[derive(Debug, Clone, PartialEq)]
    pub struct DashboardOverview {
        pub status: SystemStatus,
        pub unread_alerts: usize,
        pub days_since_last_measurement: Option<i64>,
        pub latest_quality_status: Option<QualityStatus>,
        pub pending_visit_tasks: usize,
        pub expected_cash: f64,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct FinanceOverview {
        pub total_income: f64,
        pub variable_expenses: f64,
        pub fixed_expenses: f64,
        pub total_expenses: f64,
        pub profit: f64,
        pub margin_percent: Option<f64>,
        pub expenses_by_category: Vec<(ExpenseCategory, f64)>,
        pub weekly_revenue: Vec<(NaiveDate, f64)>,
    }
}
