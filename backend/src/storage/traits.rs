//! # Storage Traits
//!
//! This module defines the record store abstraction used by the domain layer.
//! Each collection gets its own repository trait; every operation is an atomic
//! insert, update, delete or query against that one collection. No operation
//! spans two collections.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::{
    cash::CashReconciliationEntry,
    expense::{Expense, FixedExpense},
    maintenance::MaintenanceLogEntry,
    notification::Notification,
    pricing::PriceConfig,
    quality::QualityReading,
    sale::SaleRecord,
    visit::VisitLogEntry,
};

/// Water quality readings. Immutable once stored.
#[async_trait]
pub trait QualityReadingStorage: Send + Sync {
    async fn store_reading(&self, reading: &QualityReading) -> Result<()>;

    /// All readings ordered by timestamp ascending
    async fn list_readings(&self) -> Result<Vec<QualityReading>>;

    async fn get_reading(&self, reading_id: &str) -> Result<Option<QualityReading>>;

    /// The reading with the greatest timestamp
    async fn get_latest_reading(&self) -> Result<Option<QualityReading>>;
}

/// Completed maintenance runs. Append-only.
#[async_trait]
pub trait MaintenanceLogStorage: Send + Sync {
    async fn store_log_entry(&self, entry: &MaintenanceLogEntry) -> Result<()>;

    /// All runs ordered by performed_at ascending
    async fn list_log_entries(&self) -> Result<Vec<MaintenanceLogEntry>>;
}

#[async_trait]
pub trait SaleStorage: Send + Sync {
    async fn store_sale(&self, sale: &SaleRecord) -> Result<()>;

    /// All sales ordered by period_start ascending
    async fn list_sales(&self) -> Result<Vec<SaleRecord>>;

    /// Returns true if the sale was found and deleted
    async fn delete_sale(&self, sale_id: &str) -> Result<bool>;
}

#[async_trait]
pub trait ExpenseStorage: Send + Sync {
    async fn store_expense(&self, expense: &Expense) -> Result<()>;

    /// All expenses ordered by date ascending
    async fn list_expenses(&self) -> Result<Vec<Expense>>;

    /// Returns true if the expense was found and deleted
    async fn delete_expense(&self, expense_id: &str) -> Result<bool>;
}

#[async_trait]
pub trait FixedExpenseStorage: Send + Sync {
    async fn store_fixed_expense(&self, expense: &FixedExpense) -> Result<()>;

    /// All fixed expenses in insertion order
    async fn list_fixed_expenses(&self) -> Result<Vec<FixedExpense>>;

    /// Replace a stored fixed expense; returns false if the id is unknown
    async fn update_fixed_expense(&self, expense: &FixedExpense) -> Result<bool>;

    async fn delete_fixed_expense(&self, expense_id: &str) -> Result<bool>;
}

/// Cash counts. Append-only history.
#[async_trait]
pub trait CashReconciliationStorage: Send + Sync {
    async fn store_entry(&self, entry: &CashReconciliationEntry) -> Result<()>;

    /// All entries ordered by timestamp descending (most recent first)
    async fn list_entries(&self) -> Result<Vec<CashReconciliationEntry>>;

    /// The checkpoint for the next expected-cash computation
    async fn get_latest_entry(&self) -> Result<Option<CashReconciliationEntry>>;
}

#[async_trait]
pub trait NotificationStorage: Send + Sync {
    async fn store_notification(&self, notification: &Notification) -> Result<()>;

    /// All notifications ordered by created_at descending
    async fn list_notifications(&self) -> Result<Vec<Notification>>;

    /// Replace a stored notification; returns false if the id is unknown
    async fn update_notification(&self, notification: &Notification) -> Result<bool>;
}

#[async_trait]
pub trait PriceConfigStorage: Send + Sync {
    /// The stored configuration, or None if prices were never saved
    async fn get_price_config(&self) -> Result<Option<PriceConfig>>;

    async fn store_price_config(&self, config: &PriceConfig) -> Result<()>;
}

#[async_trait]
pub trait VisitLogStorage: Send + Sync {
    async fn store_visit_log(&self, entry: &VisitLogEntry) -> Result<()>;

    /// All visit logs ordered by date ascending
    async fn list_visit_logs(&self) -> Result<Vec<VisitLogEntry>>;
}

/// Trait defining the interface for storage connections
///
/// The connection is a factory for repositories, so the domain layer can work
/// with any record store without knowing its implementation details.
pub trait Connection: Send + Sync + Clone + 'static {
    type QualityReadingRepository: QualityReadingStorage + Clone;
    type MaintenanceLogRepository: MaintenanceLogStorage + Clone;
    type SaleRepository: SaleStorage + Clone;
    type ExpenseRepository: ExpenseStorage + Clone;
    type FixedExpenseRepository: FixedExpenseStorage + Clone;
    type CashReconciliationRepository: CashReconciliationStorage + Clone;
    type NotificationRepository: NotificationStorage + Clone;
    type PriceConfigRepository: PriceConfigStorage + Clone;
    type VisitLogRepository: VisitLogStorage + Clone;

    fn create_quality_reading_repository(&self) -> Self::QualityReadingRepository;
    fn create_maintenance_log_repository(&self) -> Self::MaintenanceLogRepository;
    fn create_sale_repository(&self) -> Self::SaleRepository;
    fn create_expense_repository(&self) -> Self::ExpenseRepository;
    fn create_fixed_expense_repository(&self) -> Self::FixedExpenseRepository;
    fn create_cash_reconciliation_repository(&self) -> Self::CashReconciliationRepository;
    fn create_notification_repository(&self) -> Self::NotificationRepository;
    fn create_price_config_repository(&self) -> Self::PriceConfigRepository;
    fn create_visit_log_repository(&self) -> Self::VisitLogRepository;
}
