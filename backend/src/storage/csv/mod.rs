//! File-backed record store.
//!
//! ```text
//! data/
//! ├── quality_readings.csv
//! ├── maintenance_logs.csv
//! ├── sales.csv
//! ├── expenses.csv
//! ├── fixed_expenses.csv
//! ├── cash_reconciliations.csv
//! ├── notifications.csv
//! ├── visit_logs.csv
//! └── price_config.yaml
//! ```

pub mod cash_repository;
pub mod connection;
pub mod expense_repository;
pub mod maintenance_log_repository;
pub mod notification_repository;
pub mod price_config_repository;
pub mod quality_repository;
pub mod sale_repository;
pub mod table;
pub mod visit_log_repository;

#[cfg(test)]
pub mod test_utils;

pub use cash_repository::CashReconciliationRepository;
pub use connection::CsvConnection;
pub use expense_repository::{ExpenseRepository, FixedExpenseRepository};
pub use maintenance_log_repository::MaintenanceLogRepository;
pub use notification_repository::NotificationRepository;
pub use price_config_repository::PriceConfigRepository;
pub use quality_repository::QualityReadingRepository;
pub use sale_repository::SaleRepository;
pub use visit_log_repository::VisitLogRepository;
