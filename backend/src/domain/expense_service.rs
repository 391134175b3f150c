//! Expense recorder and fixed monthly obligations.

use log::info;
use shared::ExpenseCategory;
use std::sync::Arc;

use super::commands::expenses::{
    CreateFixedExpenseCommand, RecordExpenseCommand, UpdateFixedExpenseCommand,
};
use super::dates::parse_local_date;
use super::errors::{DomainError, DomainResult};
use super::models::expense::{Expense, FixedExpense};
use crate::storage::{Connection, ExpenseStorage, FixedExpenseStorage};

/// Monthly obligations every station starts with
const DEFAULT_FIXED_EXPENSES: [(&str, f64); 4] = [
    ("Water", 800.0),
    ("Electricity", 1200.0),
    ("Internet", 500.0),
    ("Rent", 3500.0),
];

const DEFAULT_DUE_DAY: u8 = 1;

fn validate_amount(amount: f64) -> DomainResult<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(DomainError::validation("amount must be a non-negative number"));
    }
    Ok(())
}

fn validate_concept(concept: &str) -> DomainResult<String> {
    let trimmed = concept.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation("concept cannot be empty"));
    }
    Ok(trimmed.to_string())
}

fn validate_due_day(day: u8) -> DomainResult<()> {
    if !FixedExpense::is_valid_due_day(day) {
        return Err(DomainError::validation(format!(
            "due day {} is not a day of the month",
            day
        )));
    }
    Ok(())
}

#[derive(Clone)]
pub struct ExpenseService<C: Connection> {
    expense_repository: C::ExpenseRepository,
    fixed_expense_repository: C::FixedExpenseRepository,
}

impl<C: Connection> ExpenseService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            expense_repository: connection.create_expense_repository(),
            fixed_expense_repository: connection.create_fixed_expense_repository(),
        }
    }

    pub async fn record_expense(&self, command: RecordExpenseCommand) -> DomainResult<Expense> {
        validate_amount(command.amount)?;
        let concept = validate_concept(&command.concept)?;
        let date = parse_local_date(&command.date)?;

        let expense = Expense {
            id: Expense::generate_id(),
            date,
            concept,
            amount: command.amount,
            category: command.category,
            is_recurring: command.is_recurring,
            notes: command.notes.filter(|n| !n.trim().is_empty()),
        };
        self.expense_repository.store_expense(&expense).await?;

        info!("Recorded expense {} '{}' ${:.2}", expense.id, expense.concept, expense.amount);
        Ok(expense)
    }

    pub async fn list_expenses(&self) -> DomainResult<Vec<Expense>> {
        Ok(self.expense_repository.list_expenses().await?)
    }

    pub async fn delete_expense(&self, expense_id: &str) -> DomainResult<()> {
        if !self.expense_repository.delete_expense(expense_id).await? {
            return Err(DomainError::not_found(format!("Expense {}", expense_id)));
        }
        info!("Deleted expense {}", expense_id);
        Ok(())
    }

    /// Store the default obligations when none exist yet.
    ///
    /// Returns the number of obligations created.
    pub async fn seed_default_fixed_expenses(&self) -> DomainResult<usize> {
        if !self.fixed_expense_repository.list_fixed_expenses().await?.is_empty() {
            return Ok(0);
        }
        for (concept, amount) in DEFAULT_FIXED_EXPENSES {
            let expense = FixedExpense {
                id: FixedExpense::generate_id(),
                concept: concept.to_string(),
                amount,
                category: ExpenseCategory::Utilities,
                due_day_of_month: DEFAULT_DUE_DAY,
            };
            self.fixed_expense_repository.store_fixed_expense(&expense).await?;
        }
        info!("Seeded {} default fixed expenses", DEFAULT_FIXED_EXPENSES.len());
        Ok(DEFAULT_FIXED_EXPENSES.len())
    }

    pub async fn list_fixed_expenses(&self) -> DomainResult<Vec<FixedExpense>> {
        Ok(self.fixed_expense_repository.list_fixed_expenses().await?)
    }

    pub async fn create_fixed_expense(
        &self,
        command: CreateFixedExpenseCommand,
    ) -> DomainResult<FixedExpense> {
        validate_amount(command.amount)?;
        validate_due_day(command.due_day_of_month)?;
        let concept = validate_concept(&command.concept)?;

        let expense = FixedExpense {
            id: FixedExpense::generate_id(),
            concept,
            amount: command.amount,
            category: command.category.unwrap_or(ExpenseCategory::Utilities),
            due_day_of_month: command.due_day_of_month,
        };
        self.fixed_expense_repository.store_fixed_expense(&expense).await?;
        info!("Created fixed expense {} '{}'", expense.id, expense.concept);
        Ok(expense)
    }

    pub async fn update_fixed_expense(
        &self,
        expense_id: &str,
        command: UpdateFixedExpenseCommand,
    ) -> DomainResult<FixedExpense> {
        if let Some(amount) = command.amount {
            validate_amount(amount)?;
        }
        if let Some(day) = command.due_day_of_month {
            validate_due_day(day)?;
        }
        let concept = command.concept.as_deref().map(validate_concept).transpose()?;

        let mut expense = self
            .fixed_expense_repository
            .list_fixed_expenses()
            .await?
            .into_iter()
            .find(|e| e.id == expense_id)
            .ok_or_else(|| DomainError::not_found(format!("Fixed expense {}", expense_id)))?;

        if let Some(concept) = concept {
            expense.concept = concept;
        }
        if let Some(amount) = command.amount {
            expense.amount = amount;
        }
        if let Some(day) = command.due_day_of_month {
            expense.due_day_of_month = day;
        }

        if !self.fixed_expense_repository.update_fixed_expense(&expense).await? {
            return Err(DomainError::not_found(format!("Fixed expense {}", expense_id)));
        }
        Ok(expense)
    }

    pub async fn delete_fixed_expense(&self, expense_id: &str) -> DomainResult<()> {
        if !self.fixed_expense_repository.delete_fixed_expense(expense_id).await? {
            return Err(DomainError::not_found(format!("Fixed expense {}", expense_id)));
        }
        info!("Deleted fixed expense {}", expense_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::test_utils::TestEnvironment;
    use crate::storage::CsvConnection;

    fn setup() -> (TestEnvironment, ExpenseService<CsvConnection>) {
        let env = TestEnvironment::new().unwrap();
        let service = ExpenseService::new(Arc::new(env.connection.clone()));
        (env, service)
    }

    fn expense(amount: f64, concept: &str) -> RecordExpenseCommand {
        RecordExpenseCommand {
            date: "2025-06-14".to_string(),
            concept: concept.to_string(),
            amount,
            category: ExpenseCategory::Supplies,
            is_recurring: false,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_record_and_delete_expense() {
        let (_env, service) = setup();
        let stored = service.record_expense(expense(120.0, " Salt ")).await.unwrap();
        assert_eq!(stored.concept, "Salt");

        assert_eq!(service.list_expenses().await.unwrap(), vec![stored.clone()]);
        service.delete_expense(&stored.id).await.unwrap();
        assert!(matches!(
            service.delete_expense(&stored.id).await,
            Err(DomainError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_record_expense_validation() {
        let (_env, service) = setup();
        assert!(service.record_expense(expense(-5.0, "Salt")).await.is_err());
        assert!(service.record_expense(expense(f64::INFINITY, "Salt")).await.is_err());
        assert!(service.record_expense(expense(5.0, "  ")).await.is_err());
        let mut bad_date = expense(5.0, "Salt");
        bad_date.date = "tomorrow".to_string();
        assert!(service.record_expense(bad_date).await.is_err());
        assert!(service.list_expenses().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_seed_runs_once() {
        let (_env, service) = setup();
        assert_eq!(service.seed_default_fixed_expenses().await.unwrap(), 4);
        assert_eq!(service.seed_default_fixed_expenses().await.unwrap(), 0);

        let fixed = service.list_fixed_expenses().await.unwrap();
        let total: f64 = fixed.iter().map(|e| e.amount).sum();
        assert_eq!(total, 6000.0);
        assert!(fixed.iter().all(|e| e.category == ExpenseCategory::Utilities));
    }

    #[tokio::test]
    async fn test_fixed_expense_due_day_validation_and_update() {
        let (_env, service) = setup();
        let create = |day| CreateFixedExpenseCommand {
            concept: "Security".to_string(),
            amount: 300.0,
            category: None,
            due_day_of_month: day,
        };
        assert!(matches!(
            service.create_fixed_expense(create(0)).await,
            Err(DomainError::Validation(_))
        ));
        assert!(service.create_fixed_expense(create(32)).await.is_err());

        let created = service.create_fixed_expense(create(31)).await.unwrap();
        let updated = service
            .update_fixed_expense(
                &created.id,
                UpdateFixedExpenseCommand {
                    amount: Some(350.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.amount, 350.0);
        assert_eq!(updated.due_day_of_month, 31);

        assert!(matches!(
            service
                .update_fixed_expense("fixed_expense::nope", UpdateFixedExpenseCommand::default())
                .await,
            Err(DomainError::NotFound(_))
        ));
        service.delete_fixed_expense(&created.id).await.unwrap();
        assert!(service.list_fixed_expenses().await.unwrap().is_empty());
    }
}
