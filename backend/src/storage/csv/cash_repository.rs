//! Cash counts stored in `cash_reconciliations.csv`.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::connection::{CsvConnection, CASH_RECONCILIATIONS};
use super::table::CsvTable;
use crate::domain::dates::{format_instant, parse_stored_instant};
use crate::domain::models::cash::CashReconciliationEntry;
use crate::storage::traits::CashReconciliationStorage;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CashReconciliationRow {
    id: String,
    timestamp: String,
    opening_cash: f64,
    accumulated_sales_since_last: f64,
    accumulated_expenses_since_last: f64,
    withdrawn_amount: f64,
    closing_cash: f64,
    notes: Option<String>,
}

impl CashReconciliationRow {
    fn from_domain(entry: &CashReconciliationEntry) -> Self {
        Self {
            id: entry.id.clone(),
            timestamp: format_instant(entry.timestamp),
            opening_cash: entry.opening_cash,
            accumulated_sales_since_last: entry.accumulated_sales_since_last,
            accumulated_expenses_since_last: entry.accumulated_expenses_since_last,
            withdrawn_amount: entry.withdrawn_amount,
            closing_cash: entry.closing_cash,
            notes: entry.notes.clone(),
        }
    }

    fn into_domain(self) -> Result<CashReconciliationEntry> {
        Ok(CashReconciliationEntry {
            timestamp: parse_stored_instant(&self.timestamp)?,
            id: self.id,
            opening_cash: self.opening_cash,
            accumulated_sales_since_last: self.accumulated_sales_since_last,
            accumulated_expenses_since_last: self.accumulated_expenses_since_last,
            withdrawn_amount: self.withdrawn_amount,
            closing_cash: self.closing_cash,
            notes: self.notes,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CashReconciliationRepository {
    table: CsvTable<CashReconciliationRow>,
}

impl CashReconciliationRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self {
            table: connection.table(CASH_RECONCILIATIONS),
        }
    }
}

#[async_trait]
impl CashReconciliationStorage for CashReconciliationRepository {
    async fn store_entry(&self, entry: &CashReconciliationEntry) -> Result<()> {
        self.table.append(CashReconciliationRow::from_domain(entry))
    }

    async fn list_entries(&self) -> Result<Vec<CashReconciliationEntry>> {
        let mut entries = self
            .table
            .read_all()?
            .into_iter()
            .map(CashReconciliationRow::into_domain)
            .collect::<Result<Vec<_>>>()?;
        // Stable sort keeps insertion order for equal timestamps, so reverse
        // afterwards to put the later insert first.
        entries.sort_by_key(|e| e.timestamp);
        entries.reverse();
        Ok(entries)
    }

    async fn get_latest_entry(&self) -> Result<Option<CashReconciliationEntry>> {
        Ok(self.list_entries().await?.into_iter().next())
    }
}
