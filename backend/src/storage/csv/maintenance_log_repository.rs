//! Maintenance runs stored in `maintenance_logs.csv`.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::connection::{CsvConnection, MAINTENANCE_LOGS};
use super::table::CsvTable;
use crate::domain::dates::{format_instant, parse_stored_instant};
use crate::domain::models::maintenance::MaintenanceLogEntry;
use crate::storage::traits::MaintenanceLogStorage;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct MaintenanceLogRow {
    id: String,
    maintenance_definition_id: String,
    performed_at: String,
    performed_by: String,
    notes: Option<String>,
    next_due_at: String,
    duration_minutes: Option<u32>,
}

impl MaintenanceLogRow {
    fn from_domain(entry: &MaintenanceLogEntry) -> Self {
        Self {
            id: entry.id.clone(),
            maintenance_definition_id: entry.maintenance_definition_id.clone(),
            performed_at: format_instant(entry.performed_at),
            performed_by: entry.performed_by.clone(),
            notes: entry.notes.clone(),
            next_due_at: format_instant(entry.next_due_at),
            duration_minutes: entry.duration_minutes,
        }
    }

    fn into_domain(self) -> Result<MaintenanceLogEntry> {
        Ok(MaintenanceLogEntry {
            performed_at: parse_stored_instant(&self.performed_at)?,
            next_due_at: parse_stored_instant(&self.next_due_at)?,
            id: self.id,
            maintenance_definition_id: self.maintenance_definition_id,
            performed_by: self.performed_by,
            notes: self.notes,
            duration_minutes: self.duration_minutes,
        })
    }
}

#[derive(Debug, Clone)]
pub struct MaintenanceLogRepository {
    table: CsvTable<MaintenanceLogRow>,
}

impl MaintenanceLogRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self {
            table: connection.table(MAINTENANCE_LOGS),
        }
    }
}

#[async_trait]
impl MaintenanceLogStorage for MaintenanceLogRepository {
    async fn store_log_entry(&self, entry: &MaintenanceLogEntry) -> Result<()> {
        self.table.append(MaintenanceLogRow::from_domain(entry))
    }

    async fn list_log_entries(&self) -> Result<Vec<MaintenanceLogEntry>> {
        let mut entries = self
            .table
            .read_all()?
            .into_iter()
            .map(MaintenanceLogRow::into_domain)
            .collect::<Result<Vec<_>>>()?;
        entries.sort_by_key(|e| e.performed_at);
        Ok(entries)
    }
}
