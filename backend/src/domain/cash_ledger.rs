//! Cash Reconciliation Ledger.
//!
//! Tracks how much cash should be in the drawer between physical counts. The
//! most recent count is the checkpoint: everything sold or spent after it is
//! added to its closing cash to give the expected amount.
//!
//! Sale days and expense days are local calendar days. A day belongs to the
//! period after a checkpoint only if the day *begins* after the checkpoint,
//! so sales recorded for the same day as a count are treated as already
//! counted.
//!
//! Closing cash has no floor. Withdrawing more than expected leaves a negative
//! balance on record.
//!
//! Counts are recorded one at a time: the expected amount is computed and the
//! entry stored under one lock shared by every clone of the service.

use chrono::{DateTime, Utc};
use log::{info, warn};
use std::sync::Arc;
use tokio::sync::Mutex;

use super::commands::cash::{ExpectedCash, RecordReconciliationCommand};
use super::dates::local_midnight;
use super::errors::{DomainError, DomainResult};
use super::models::cash::CashReconciliationEntry;
use crate::storage::{CashReconciliationStorage, Connection, ExpenseStorage, SaleStorage};

#[derive(Clone)]
pub struct CashLedgerService<C: Connection> {
    reconciliation_repository: C::CashReconciliationRepository,
    sale_repository: C::SaleRepository,
    expense_repository: C::ExpenseRepository,
    record_lock: Arc<Mutex<()>>,
}

impl<C: Connection> CashLedgerService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            reconciliation_repository: connection.create_cash_reconciliation_repository(),
            sale_repository: connection.create_sale_repository(),
            expense_repository: connection.create_expense_repository(),
            record_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Derive the expected cash from freshly fetched collections.
    ///
    /// Read-only. Nothing is cached between calls.
    pub async fn compute_expected_cash(&self) -> DomainResult<ExpectedCash> {
        let checkpoint = self.reconciliation_repository.get_latest_entry().await?;
        self.expected_since(checkpoint.as_ref()).await
    }

    async fn expected_since(
        &self,
        checkpoint: Option<&CashReconciliationEntry>,
    ) -> DomainResult<ExpectedCash> {
        let checkpoint_at: Option<DateTime<Utc>> = checkpoint.map(|entry| entry.timestamp);
        let after_checkpoint = |day_start: DateTime<Utc>| match checkpoint_at {
            Some(at) => day_start > at,
            None => true,
        };

        let sales_since: f64 = self
            .sale_repository
            .list_sales()
            .await?
            .iter()
            .filter(|sale| after_checkpoint(local_midnight(sale.period_start)))
            .map(|sale| sale.total_revenue)
            .sum();
        let expenses_since: f64 = self
            .expense_repository
            .list_expenses()
            .await?
            .iter()
            .filter(|expense| after_checkpoint(local_midnight(expense.date)))
            .map(|expense| expense.amount)
            .sum();

        let opening_cash = checkpoint.map(|entry| entry.closing_cash).unwrap_or(0.0);
        Ok(ExpectedCash {
            checkpoint: checkpoint_at,
            opening_cash,
            sales_since,
            expenses_since,
            expected_cash: opening_cash + sales_since - expenses_since,
        })
    }

    /// Record a cash count and the amount taken out of the drawer.
    ///
    /// The new entry becomes the checkpoint of every later computation.
    pub async fn record_reconciliation(
        &self,
        command: RecordReconciliationCommand,
        now: DateTime<Utc>,
    ) -> DomainResult<CashReconciliationEntry> {
        if !command.withdrawn_amount.is_finite() || command.withdrawn_amount < 0.0 {
            return Err(DomainError::validation(
                "withdrawn amount must be a non-negative number",
            ));
        }

        let _guard = self.record_lock.lock().await;
        let expected = self.compute_expected_cash().await?;
        let entry = CashReconciliationEntry {
            id: CashReconciliationEntry::generate_id(),
            timestamp: now,
            opening_cash: expected.opening_cash,
            accumulated_sales_since_last: expected.sales_since,
            accumulated_expenses_since_last: expected.expenses_since,
            withdrawn_amount: command.withdrawn_amount,
            closing_cash: expected.expected_cash - command.withdrawn_amount,
            notes: command.notes.filter(|n| !n.trim().is_empty()),
        };
        self.reconciliation_repository.store_entry(&entry).await?;

        if entry.closing_cash < 0.0 {
            warn!(
                "Cash count {} leaves a negative balance of ${:.2}",
                entry.id, entry.closing_cash
            );
        }
        info!(
            "Recorded cash count {}: expected ${:.2}, withdrawn ${:.2}, closing ${:.2}",
            entry.id, expected.expected_cash, entry.withdrawn_amount, entry.closing_cash
        );
        Ok(entry)
    }

    /// Cash count history, most recent first
    pub async fn list_reconciliations(&self) -> DomainResult<Vec<CashReconciliationEntry>> {
        Ok(self.reconciliation_repository.list_entries().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::expenses::RecordExpenseCommand;
    use crate::domain::commands::sales::RecordSaleCommand;
    use crate::domain::expense_service::ExpenseService;
    use crate::domain::pricing_service::PricingService;
    use crate::domain::sales_service::SalesService;
    use crate::storage::csv::test_utils::TestEnvironment;
    use crate::storage::CsvConnection;
    use chrono::{Duration, NaiveDate};
    use shared::ExpenseCategory;

    struct Ledger {
        _env: TestEnvironment,
        cash: CashLedgerService<CsvConnection>,
        sales: SalesService<CsvConnection>,
        expenses: ExpenseService<CsvConnection>,
    }

    fn setup() -> Ledger {
        let env = TestEnvironment::new().unwrap();
        let connection = Arc::new(env.connection.clone());
        let pricing = PricingService::new(connection.clone());
        Ledger {
            cash: CashLedgerService::new(connection.clone()),
            sales: SalesService::new(connection.clone(), pricing),
            expenses: ExpenseService::new(connection),
            _env: env,
        }
    }

    impl Ledger {
        /// By-volume litres sell at 2.00, so `revenue / 2` litres
        async fn sale(&self, date: &str, revenue: i64) {
            self.sales
                .record_sale(RecordSaleCommand {
                    date: date.to_string(),
                    large: 0,
                    small: 0,
                    by_volume: revenue / 2,
                })
                .await
                .unwrap();
        }

        async fn expense(&self, date: &str, amount: f64) {
            self.expenses
                .record_expense(RecordExpenseCommand {
                    date: date.to_string(),
                    concept: "Salt".to_string(),
                    amount,
                    category: ExpenseCategory::Supplies,
                    is_recurring: false,
                    notes: None,
                })
                .await
                .unwrap();
        }

        async fn withdraw(&self, amount: f64, at: DateTime<Utc>) -> DomainResult<CashReconciliationEntry> {
            self.cash
                .record_reconciliation(
                    RecordReconciliationCommand {
                        withdrawn_amount: amount,
                        notes: None,
                    },
                    at,
                )
                .await
        }
    }

    fn evening_of(date: &str) -> DateTime<Utc> {
        let day = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        local_midnight(day) + Duration::hours(20)
    }

    #[tokio::test]
    async fn test_first_count_scenario() {
        let ledger = setup();
        ledger.sale("2025-06-14", 500).await;
        ledger.expense("2025-06-14", 120.0).await;

        let expected = ledger.cash.compute_expected_cash().await.unwrap();
        assert_eq!(expected.checkpoint, None);
        assert_eq!(expected.opening_cash, 0.0);
        assert_eq!(expected.expected_cash, 380.0);

        let entry = ledger.withdraw(300.0, evening_of("2025-06-14")).await.unwrap();
        assert_eq!(entry.opening_cash, 0.0);
        assert_eq!(entry.accumulated_sales_since_last, 500.0);
        assert_eq!(entry.accumulated_expenses_since_last, 120.0);
        assert_eq!(entry.closing_cash, 80.0);

        let after = ledger.cash.compute_expected_cash().await.unwrap();
        assert_eq!(after.expected_cash, 80.0);
        assert_eq!(after.checkpoint, Some(entry.timestamp));
    }

    #[tokio::test]
    async fn test_closing_identity_over_several_counts() {
        let ledger = setup();
        ledger.sale("2025-06-01", 1234).await;
        ledger.expense("2025-06-01", 99.9).await;
        ledger.withdraw(1000.0, evening_of("2025-06-01")).await.unwrap();
        ledger.sale("2025-06-02", 78).await;
        ledger.expense("2025-06-03", 0.3).await;
        ledger.withdraw(10.1, evening_of("2025-06-03")).await.unwrap();

        for entry in ledger.cash.list_reconciliations().await.unwrap() {
            assert_eq!(
                entry.closing_cash,
                entry.opening_cash + entry.accumulated_sales_since_last
                    - entry.accumulated_expenses_since_last
                    - entry.withdrawn_amount
            );
        }
    }

    #[tokio::test]
    async fn test_same_day_entries_after_count_are_excluded() {
        let ledger = setup();
        ledger.withdraw(0.0, evening_of("2025-06-14")).await.unwrap();

        ledger.sale("2025-06-14", 200).await;
        ledger.sale("2025-06-15", 50).await;
        ledger.expense("2025-06-14", 10.0).await;

        let expected = ledger.cash.compute_expected_cash().await.unwrap();
        assert_eq!(expected.sales_since, 50.0);
        assert_eq!(expected.expenses_since, 0.0);
    }

    #[tokio::test]
    async fn test_negative_closing_is_allowed_but_negative_withdrawal_is_not() {
        let ledger = setup();
        ledger.sale("2025-06-14", 100).await;

        let err = ledger.withdraw(-1.0, Utc::now()).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(ledger.withdraw(f64::NAN, Utc::now()).await.is_err());
        assert!(ledger.cash.list_reconciliations().await.unwrap().is_empty());

        let entry = ledger.withdraw(150.0, evening_of("2025-06-14")).await.unwrap();
        assert_eq!(entry.closing_cash, -50.0);
        assert_eq!(ledger.cash.compute_expected_cash().await.unwrap().expected_cash, -50.0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_counts_never_count_a_sale_twice() {
        let ledger = setup();
        ledger.sale("2025-06-01", 100).await;
        ledger.sale("2025-06-02", 60).await;

        let counted_at = evening_of("2025-06-02");
        let handles: Vec<_> = (0..20)
            .map(|i| {
                let cash = ledger.cash.clone();
                tokio::spawn(async move {
                    cash.record_reconciliation(
                        RecordReconciliationCommand {
                            withdrawn_amount: 0.0,
                            notes: None,
                        },
                        counted_at + Duration::seconds(i),
                    )
                    .await
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let history = ledger.cash.list_reconciliations().await.unwrap();
        assert_eq!(history.len(), 20);
        let counted: f64 = history.iter().map(|e| e.accumulated_sales_since_last).sum();
        assert_eq!(counted, 160.0);
    }

    #[tokio::test]
    async fn test_backdated_sale_does_not_rewrite_history() {
        let ledger = setup();
        ledger.sale("2025-06-10", 100).await;
        let first = ledger.withdraw(0.0, evening_of("2025-06-10")).await.unwrap();

        ledger.sale("2025-06-09", 40).await;

        let history = ledger.cash.list_reconciliations().await.unwrap();
        assert_eq!(history, vec![first]);
        assert_eq!(ledger.cash.compute_expected_cash().await.unwrap().expected_cash, 100.0);
    }
}
