//! Domain model for a sales log entry.
//!
//! Entries are recorded per day (`period_start == period_end`); the period
//! fields and the seven-day average are kept from the weekly sheet the
//! station used before.
use chrono::NaiveDate;
use shared::UnitsSold;

/// Divisor of the average revenue column
pub const DAYS_PER_PERIOD: f64 = 7.0;

#[derive(Debug, Clone, PartialEq)]
pub struct SaleRecord {
    pub id: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub units_sold: UnitsSold,
    pub total_revenue: f64,
    pub daily_average_revenue: f64,
}

impl SaleRecord {
    pub fn generate_id() -> String {
        super::generate_id("sale")
    }
}
