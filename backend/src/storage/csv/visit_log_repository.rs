//! Finished visits stored in `visit_logs.csv`.
//!
//! The completed task titles are kept in a single JSON array column.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::connection::{CsvConnection, VISIT_LOGS};
use super::table::CsvTable;
use crate::domain::dates::{format_date, parse_stored_date};
use crate::domain::models::visit::VisitLogEntry;
use crate::storage::traits::VisitLogStorage;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct VisitLogRow {
    id: String,
    date: String,
    duration_seconds: i64,
    completed_task_titles: String,
    notes: Option<String>,
}

impl VisitLogRow {
    fn from_domain(entry: &VisitLogEntry) -> Result<Self> {
        Ok(Self {
            id: entry.id.clone(),
            date: format_date(entry.date),
            duration_seconds: entry.duration_seconds,
            completed_task_titles: serde_json::to_string(&entry.completed_task_titles)?,
            notes: entry.notes.clone(),
        })
    }

    fn into_domain(self) -> Result<VisitLogEntry> {
        let completed_task_titles = serde_json::from_str(&self.completed_task_titles)
            .with_context(|| format!("Malformed task list in visit log {}", self.id))?;
        Ok(VisitLogEntry {
            date: parse_stored_date(&self.date)?,
            id: self.id,
            duration_seconds: self.duration_seconds,
            completed_task_titles,
            notes: self.notes,
        })
    }
}

#[derive(Debug, Clone)]
pub struct VisitLogRepository {
    table: CsvTable<VisitLogRow>,
}

impl VisitLogRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self {
            table: connection.table(VISIT_LOGS),
        }
    }
}

#[async_trait]
impl VisitLogStorage for VisitLogRepository {
    async fn store_visit_log(&self, entry: &VisitLogEntry) -> Result<()> {
        self.table.append(VisitLogRow::from_domain(entry)?)
    }

    async fn list_visit_logs(&self) -> Result<Vec<VisitLogEntry>> {
        let mut entries = self
            .table
            .read_all()?
            .into_iter()
            .map(VisitLogRow::into_domain)
            .collect::<Result<Vec<_>>>()?;
        entries.sort_by_key(|e| e.date);
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::test_utils::TestEnvironment;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_task_titles_survive_commas_and_quotes() {
        let env = TestEnvironment::new().unwrap();
        let repo = VisitLogRepository::new(env.connection.clone());
        let entry = VisitLogEntry {
            id: "visit::1".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 8, 2).unwrap(),
            duration_seconds: 2700,
            completed_task_titles: vec![
                "Quality Measurement".to_string(),
                "Backwash, dual filter \"A\"".to_string(),
            ],
            notes: None,
        };
        repo.store_visit_log(&entry).await.unwrap();

        assert_eq!(repo.list_visit_logs().await.unwrap(), vec![entry]);
    }
}
