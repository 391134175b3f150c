use anyhow::Result;
use log::info;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::table::CsvTable;
use super::{
    CashReconciliationRepository, ExpenseRepository, FixedExpenseRepository,
    MaintenanceLogRepository, NotificationRepository, PriceConfigRepository,
    QualityReadingRepository, SaleRepository, VisitLogRepository,
};
use crate::storage::traits::Connection;

pub const QUALITY_READINGS: &str = "quality_readings";
pub const MAINTENANCE_LOGS: &str = "maintenance_logs";
pub const SALES: &str = "sales";
pub const EXPENSES: &str = "expenses";
pub const FIXED_EXPENSES: &str = "fixed_expenses";
pub const CASH_RECONCILIATIONS: &str = "cash_reconciliations";
pub const NOTIFICATIONS: &str = "notifications";
pub const VISIT_LOGS: &str = "visit_logs";
pub const PRICE_CONFIG: &str = "price_config";

/// CsvConnection owns the data directory and hands out file paths per collection.
///
/// Clones share one lock per file, so repositories created from the same
/// connection serialize their writes to a collection.
#[derive(Debug, Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
    file_locks: Arc<Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>>,
}

impl CsvConnection {
    /// Create a new CSV connection, creating the data directory if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
            info!("Created data directory {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
            file_locks: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Path of the CSV file backing a collection
    pub fn collection_path(&self, collection: &str) -> PathBuf {
        self.base_directory.join(format!("{}.csv", collection))
    }

    /// Path of a YAML document
    pub fn document_path(&self, name: &str) -> PathBuf {
        self.base_directory.join(format!("{}.yaml", name))
    }

    /// The write lock of a file, shared by every clone of this connection
    pub fn file_lock(&self, path: &Path) -> Arc<Mutex<()>> {
        let mut locks = self
            .file_locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        locks.entry(path.to_path_buf()).or_default().clone()
    }

    /// A table over a collection, guarded by that collection's lock
    pub fn table<R>(&self, collection: &str) -> CsvTable<R>
    where
        R: Serialize + DeserializeOwned,
    {
        let path = self.collection_path(collection);
        let lock = self.file_lock(&path);
        CsvTable::with_lock(path, lock)
    }
}

impl Connection for CsvConnection {
    type QualityReadingRepository = QualityReadingRepository;
    type MaintenanceLogRepository = MaintenanceLogRepository;
    type SaleRepository = SaleRepository;
    type ExpenseRepository = ExpenseRepository;
    type FixedExpenseRepository = FixedExpenseRepository;
    type CashReconciliationRepository = CashReconciliationRepository;
    type NotificationRepository = NotificationRepository;
    type PriceConfigRepository = PriceConfigRepository;
    type VisitLogRepository = VisitLogRepository;

    fn create_quality_reading_repository(&self) -> Self::QualityReadingRepository {
        QualityReadingRepository::new(self.clone())
    }

    fn create_maintenance_log_repository(&self) -> Self::MaintenanceLogRepository {
        MaintenanceLogRepository::new(self.clone())
    }

    fn create_sale_repository(&self) -> Self::SaleRepository {
        SaleRepository::new(self.clone())
    }

    fn create_expense_repository(&self) -> Self::ExpenseRepository {
        ExpenseRepository::new(self.clone())
    }

    fn create_fixed_expense_repository(&self) -> Self::FixedExpenseRepository {
        FixedExpenseRepository::new(self.clone())
    }

    fn create_cash_reconciliation_repository(&self) -> Self::CashReconciliationRepository {
        CashReconciliationRepository::new(self.clone())
    }

    fn create_notification_repository(&self) -> Self::NotificationRepository {
        NotificationRepository::new(self.clone())
    }

    fn create_price_config_repository(&self) -> Self::PriceConfigRepository {
        PriceConfigRepository::new(self.clone())
    }

    fn create_visit_log_repository(&self) -> Self::VisitLogRepository {
        VisitLogRepository::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = temp_dir.path().join("nested").join("data");

        let connection = CsvConnection::new(&data_dir).unwrap();

        assert!(data_dir.is_dir());
        assert_eq!(connection.collection_path(SALES), data_dir.join("sales.csv"));
        assert_eq!(
            connection.document_path(PRICE_CONFIG),
            data_dir.join("price_config.yaml")
        );
    }

    #[test]
    fn test_clones_share_file_locks() {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();
        let clone = connection.clone();

        let path = connection.collection_path(SALES);
        assert!(Arc::ptr_eq(&connection.file_lock(&path), &clone.file_lock(&path)));
        assert!(!Arc::ptr_eq(
            &connection.file_lock(&path),
            &connection.file_lock(&connection.collection_path(EXPENSES))
        ));
    }
}
