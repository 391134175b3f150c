//! Domain model for a cash count ("corte de caja").
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct CashReconciliationEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub opening_cash: f64,
    pub accumulated_sales_since_last: f64,
    pub accumulated_expenses_since_last: f64,
    pub withdrawn_amount: f64,
    /// opening + sales - expenses - withdrawn; may be negative
    pub closing_cash: f64,
    pub notes: Option<String>,
}

impl CashReconciliationEntry {
    pub fn generate_id() -> String {
        super::generate_id("cash")
    }
}
