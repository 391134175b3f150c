//! Domain models for one-off and fixed monthly expenses.
use chrono::NaiveDate;
use shared::ExpenseCategory;

#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: String,
    pub date: NaiveDate,
    pub concept: String,
    pub amount: f64,
    pub category: ExpenseCategory,
    pub is_recurring: bool,
    pub notes: Option<String>,
}

impl Expense {
    pub fn generate_id() -> String {
        super::generate_id("expense")
    }
}

/// A recurring monthly obligation. It never generates transactions by itself.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedExpense {
    pub id: String,
    pub concept: String,
    pub amount: f64,
    pub category: ExpenseCategory,
    pub due_day_of_month: u8, // 1-31
}

impl FixedExpense {
    pub fn generate_id() -> String {
        super::generate_id("fixed_expense")
    }

    pub fn is_valid_due_day(day: u8) -> bool {
        (1..=31).contains(&day)
    }
}
