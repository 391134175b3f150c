//! # CSV Expense Repositories
//!
//! One-off expenses live in `expenses.csv`, fixed monthly obligations in
//! `fixed_expenses.csv`:
//!
//! ```text
//! id,date,concept,amount,category,is_recurring,notes
//! expense::3f2a...,2025-06-14,Filter cartridges,120.0,supplies,false,
//!
//! id,concept,amount,category,due_day_of_month
//! fixed_expense::91bc...,Rent,3500.0,utilities,1
//! ```

use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use shared::ExpenseCategory;

use super::connection::{CsvConnection, EXPENSES, FIXED_EXPENSES};
use super::table::CsvTable;
use crate::domain::dates::{format_date, parse_stored_date};
use crate::domain::models::expense::{Expense, FixedExpense};
use crate::storage::traits::{ExpenseStorage, FixedExpenseStorage};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ExpenseRow {
    id: String,
    date: String,
    concept: String,
    amount: f64,
    category: ExpenseCategory,
    is_recurring: bool,
    notes: Option<String>,
}

impl ExpenseRow {
    fn from_domain(expense: &Expense) -> Self {
        Self {
            id: expense.id.clone(),
            date: format_date(expense.date),
            concept: expense.concept.clone(),
            amount: expense.amount,
            category: expense.category,
            is_recurring: expense.is_recurring,
            notes: expense.notes.clone(),
        }
    }

    fn into_domain(self) -> Result<Expense> {
        Ok(Expense {
            date: parse_stored_date(&self.date)?,
            id: self.id,
            concept: self.concept,
            amount: self.amount,
            category: self.category,
            is_recurring: self.is_recurring,
            notes: self.notes,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FixedExpenseRow {
    id: String,
    concept: String,
    amount: f64,
    category: ExpenseCategory,
    due_day_of_month: u8,
}

impl From<&FixedExpense> for FixedExpenseRow {
    fn from(expense: &FixedExpense) -> Self {
        Self {
            id: expense.id.clone(),
            concept: expense.concept.clone(),
            amount: expense.amount,
            category: expense.category,
            due_day_of_month: expense.due_day_of_month,
        }
    }
}

impl From<FixedExpenseRow> for FixedExpense {
    fn from(row: FixedExpenseRow) -> Self {
        Self {
            id: row.id,
            concept: row.concept,
            amount: row.amount,
            category: row.category,
            due_day_of_month: row.due_day_of_month,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    table: CsvTable<ExpenseRow>,
}

impl ExpenseRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self {
            table: connection.table(EXPENSES),
        }
    }
}

#[async_trait]
impl ExpenseStorage for ExpenseRepository {
    async fn store_expense(&self, expense: &Expense) -> Result<()> {
        debug!("Storing expense {} ({})", expense.id, expense.concept);
        self.table.append(ExpenseRow::from_domain(expense))
    }

    async fn list_expenses(&self) -> Result<Vec<Expense>> {
        let mut expenses = self
            .table
            .read_all()?
            .into_iter()
            .map(ExpenseRow::into_domain)
            .collect::<Result<Vec<_>>>()?;
        expenses.sort_by_key(|e| e.date);
        Ok(expenses)
    }

    async fn delete_expense(&self, expense_id: &str) -> Result<bool> {
        let removed = self.table.modify(|rows| {
            let before = rows.len();
            rows.retain(|row| row.id != expense_id);
            (rows.len() < before).then_some(())
        })?;
        Ok(removed.is_some())
    }
}

#[derive(Debug, Clone)]
pub struct FixedExpenseRepository {
    table: CsvTable<FixedExpenseRow>,
}

impl FixedExpenseRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self {
            table: connection.table(FIXED_EXPENSES),
        }
    }
}

#[async_trait]
impl FixedExpenseStorage for FixedExpenseRepository {
    async fn store_fixed_expense(&self, expense: &FixedExpense) -> Result<()> {
        self.table.append(FixedExpenseRow::from(expense))
    }

    async fn list_fixed_expenses(&self) -> Result<Vec<FixedExpense>> {
        Ok(self.table.read_all()?.into_iter().map(FixedExpense::from).collect())
    }

    async fn update_fixed_expense(&self, expense: &FixedExpense) -> Result<bool> {
        let updated = self.table.modify(|rows| {
            let row = rows.iter_mut().find(|row| row.id == expense.id)?;
            *row = FixedExpenseRow::from(expense);
            Some(())
        })?;
        Ok(updated.is_some())
    }

    async fn delete_fixed_expense(&self, expense_id: &str) -> Result<bool> {
        let removed = self.table.modify(|rows| {
            let before = rows.len();
            rows.retain(|row| row.id != expense_id);
            (rows.len() < before).then_some(())
        })?;
        Ok(removed.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::test_utils::TestEnvironment;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_expense_category_is_snake_case_on_disk() {
        let env = TestEnvironment::new().unwrap();
        let repo = ExpenseRepository::new(env.connection.clone());
        let expense = Expense {
            id: "expense::1".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 6, 14).unwrap(),
            concept: "Salt, 25 kg".to_string(),
            amount: 120.0,
            category: ExpenseCategory::Supplies,
            is_recurring: false,
            notes: None,
        };
        repo.store_expense(&expense).await.unwrap();

        let raw = std::fs::read_to_string(env.connection.collection_path(EXPENSES)).unwrap();
        assert!(raw.contains(",supplies,"));
        assert_eq!(repo.list_expenses().await.unwrap(), vec![expense]);
    }

    #[tokio::test]
    async fn test_fixed_expense_update_and_delete() {
        let env = TestEnvironment::new().unwrap();
        let repo = FixedExpenseRepository::new(env.connection.clone());
        let mut rent = FixedExpense {
            id: "fixed_expense::rent".to_string(),
            concept: "Rent".to_string(),
            amount: 3500.0,
            category: ExpenseCategory::Utilities,
            due_day_of_month: 1,
        };
        repo.store_fixed_expense(&rent).await.unwrap();

        rent.amount = 3800.0;
        assert!(repo.update_fixed_expense(&rent).await.unwrap());
        assert_eq!(repo.list_fixed_expenses().await.unwrap()[0].amount, 3800.0);

        let ghost = FixedExpense { id: "nope".to_string(), ..rent.clone() };
        assert!(!repo.update_fixed_expense(&ghost).await.unwrap());

        assert!(repo.delete_fixed_expense(&rent.id).await.unwrap());
        assert!(repo.list_fixed_expenses().await.unwrap().is_empty());
    }
}
