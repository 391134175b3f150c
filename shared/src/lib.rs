use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Water quality
// ---------------------------------------------------------------------------

/// Hardness reading from the reagent kit.
///
/// The kit reports a colour: blue means no hardness, purple medium, red high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HardnessLevel {
    None,
    Medium,
    High,
}

impl HardnessLevel {
    /// Reagent colour used when the level is persisted
    pub fn color_tag(&self) -> &'static str {
        match self {
            HardnessLevel::None => "blue",
            HardnessLevel::Medium => "purple",
            HardnessLevel::High => "red",
        }
    }

    /// Parse a reagent colour back into a level
    pub fn from_color_tag(tag: &str) -> Option<Self> {
        match tag {
            "blue" => Some(HardnessLevel::None),
            "purple" => Some(HardnessLevel::Medium),
            "red" => Some(HardnessLevel::High),
            _ => None,
        }
    }
}

/// Classification of a single quality reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityStatus {
    Optimal,
    Attention,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReading {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    /// Residual chlorine in ppm
    pub residual_chlorine: f64,
    /// Total dissolved solids in ppm
    pub total_dissolved_solids: f64,
    pub hardness: HardnessLevel,
    pub recorded_by: String,
    pub notes: Option<String>,
    /// When the next measurement is due
    pub next_due_at: DateTime<Utc>,
    pub status: QualityStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordQualityReadingRequest {
    pub residual_chlorine: f64,
    pub total_dissolved_solids: f64,
    pub hardness: HardnessLevel,
    pub recorded_by: String,
    pub notes: Option<String>,
    /// Optional timestamp override (RFC 3339 or YYYY-MM-DD) - uses current time if not provided
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityStatusResponse {
    pub reading_id: String,
    pub status: QualityStatus,
    pub chlorine_ok: bool,
    pub tds_ok: bool,
    pub hardness_ok: bool,
}

// ---------------------------------------------------------------------------
// Maintenance
// ---------------------------------------------------------------------------

/// Nominal recurrence of a maintenance task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrequencyClass {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Variable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceCategory {
    Filters,
    Tanks,
    Disinfection,
    Measurement,
    Cleaning,
    Valves,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceStep {
    pub number: u32,
    pub description: String,
    pub warning: Option<String>,
    /// Session-only completion flag, reset every time a run is opened
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
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

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceLogEntry {
    pub id: String,
    pub maintenance_definition_id: String,
    pub performed_at: DateTime<Utc>,
    pub performed_by: String,
    pub notes: Option<String>,
    pub next_due_at: DateTime<Utc>,
    /// Actual duration of the run in minutes
    pub duration_minutes: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompleteMaintenanceRequest {
    pub maintenance_definition_id: String,
    pub performed_by: String,
    pub duration_minutes: Option<u32>,
    pub notes: Option<String>,
    /// Optional override (RFC 3339 or YYYY-MM-DD) - uses current time if not provided
    pub performed_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToggleStepRequest {
    pub completed: bool,
}

/// A scheduled maintenance shown in the agenda
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgendaEntry {
    pub log_id: String,
    pub maintenance_definition_id: String,
    pub maintenance_name: Option<String>,
    pub next_due_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgendaDayRequest {
    /// Day to look up (YYYY-MM-DD)
    pub date: String,
}

// ---------------------------------------------------------------------------
// Visit plan
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    Maintenance,
    Measurement,
    Registration,
    Review,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Urgent,
    Normal,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitTask {
    pub id: String,
    pub source_maintenance_id: Option<String>,
    pub kind: TaskKind,
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    pub estimated_minutes: u32,
    pub completed: bool,
    /// 1-based position in the plan
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitPlanResponse {
    pub tasks: Vec<VisitTask>,
    pub started_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitProgress {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    /// Rounded completion percentage (0-100)
    pub percent_complete: u32,
    pub estimated_minutes_total: u32,
    pub estimated_minutes_completed: u32,
    pub pending_urgent: usize,
    pub pending_normal: usize,
    pub pending_low: usize,
    pub started_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinishVisitRequest {
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitLogEntry {
    pub id: String,
    pub date: NaiveDate,
    pub duration_seconds: i64,
    pub completed_task_titles: Vec<String>,
    pub notes: Option<String>,
}

// ---------------------------------------------------------------------------
// Sales
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UnitsSold {
    /// 20 L jugs
    pub large: u32,
    /// 10 L jugs
    pub small: u32,
    /// Litres sold in bulk
    pub by_volume: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub id: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub units_sold: UnitsSold,
    pub total_revenue: f64,
    pub daily_average_revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSaleRequest {
    /// Day of the sales log (YYYY-MM-DD)
    pub date: String,
    /// Signed so that negative counts can be rejected instead of failing deserialization
    pub large: i64,
    pub small: i64,
    pub by_volume: i64,
}

// ---------------------------------------------------------------------------
// Expenses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Utilities,
    Supplies,
    Maintenance,
    Inventory,
    Other,
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExpenseCategory::Utilities => "utilities",
            ExpenseCategory::Supplies => "supplies",
            ExpenseCategory::Maintenance => "maintenance",
            ExpenseCategory::Inventory => "inventory",
            ExpenseCategory::Other => "other",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub date: NaiveDate,
    pub concept: String,
    pub amount: f64,
    pub category: ExpenseCategory,
    pub is_recurring: bool,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordExpenseRequest {
    /// Day of the expense (YYYY-MM-DD)
    pub date: String,
    pub concept: String,
    pub amount: f64,
    pub category: ExpenseCategory,
    #[serde(default)]
    pub is_recurring: bool,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedExpense {
    pub id: String,
    pub concept: String,
    pub amount: f64,
    pub category: ExpenseCategory,
    /// Day of the month the obligation is paid (1-31)
    pub due_day_of_month: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateFixedExpenseRequest {
    pub concept: String,
    pub amount: f64,
    pub category: Option<ExpenseCategory>,
    pub due_day_of_month: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateFixedExpenseRequest {
    pub concept: Option<String>,
    pub amount: Option<f64>,
    pub due_day_of_month: Option<u8>,
}

// ---------------------------------------------------------------------------
// Cash reconciliation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashReconciliationEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub opening_cash: f64,
    pub accumulated_sales_since_last: f64,
    pub accumulated_expenses_since_last: f64,
    pub withdrawn_amount: f64,
    pub closing_cash: f64,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectedCashResponse {
    /// Timestamp of the last reconciliation, if any
    pub checkpoint: Option<DateTime<Utc>>,
    pub opening_cash: f64,
    pub sales_since: f64,
    pub expenses_since: f64,
    pub expected_cash: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordReconciliationRequest {
    pub withdrawn_amount: f64,
    pub notes: Option<String>,
}

// ---------------------------------------------------------------------------
// Prices
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductUnit {
    Unit,
    Liter,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductConfig {
    pub id: String,
    pub name: String,
    pub unit_price: f64,
    pub unit_cost: f64,
    pub unit: ProductUnit,
    pub active: bool,
    /// unit_price - unit_cost
    pub unit_margin: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceConfigResponse {
    pub products: Vec<ProductConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpsertProductRequest {
    pub name: Option<String>,
    pub unit_price: Option<f64>,
    pub unit_cost: Option<f64>,
    pub unit: Option<ProductUnit>,
    pub active: Option<bool>,
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Alert,
    Reminder,
    Info,
    Success,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationAction {
    pub label: String,
    pub route: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub read: bool,
    pub action: Option<NotificationAction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateNotificationRequest {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub action: Option<NotificationAction>,
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Overall health of the station shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemStatus {
    Optimal,
    Attention,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub status: SystemStatus,
    pub unread_alerts: usize,
    /// Whole days since the last quality measurement, None if never measured
    pub days_since_last_measurement: Option<i64>,
    pub latest_quality_status: Option<QualityStatus>,
    pub pending_visit_tasks: usize,
    pub expected_cash: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: ExpenseCategory,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyRevenue {
    /// Sunday starting the week
    pub week_start: NaiveDate,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceSummary {
    pub total_income: f64,
    pub variable_expenses: f64,
    pub fixed_expenses: f64,
    pub total_expenses: f64,
    pub profit: f64,
    /// Profit as a percentage of income, None when there is no income
    pub margin_percent: Option<f64>,
    pub expenses_by_category: Vec<CategoryTotal>,
    pub weekly_revenue: Vec<WeeklyRevenue>,
}

// ---------------------------------------------------------------------------
// Generic responses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
