//! Maintenance catalog, per-run step checklist and the maintenance log.
//!
//! The catalog itself is static. Step completion flags are session state: they
//! are reset every time a run is opened and are never persisted. Completing a
//! run appends a log entry whose `next_due_at` follows the definition's
//! frequency.

use chrono::{DateTime, NaiveDate, Utc};
use log::{debug, info};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::catalog::seed_catalog;
use super::commands::maintenance::{AgendaItem, CompleteMaintenanceCommand};
use super::dates::{instant_or_now, local_date_of};
use super::errors::{DomainError, DomainResult};
use super::models::maintenance::{next_due_after, MaintenanceDefinition, MaintenanceLogEntry};
use crate::storage::{Connection, MaintenanceLogStorage};

#[derive(Clone)]
pub struct MaintenanceService<C: Connection> {
    log_repository: C::MaintenanceLogRepository,
    catalog: Arc<Mutex<Vec<MaintenanceDefinition>>>,
}

impl<C: Connection> MaintenanceService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self::with_catalog(connection, seed_catalog())
    }

    pub fn with_catalog(connection: Arc<C>, catalog: Vec<MaintenanceDefinition>) -> Self {
        Self {
            log_repository: connection.create_maintenance_log_repository(),
            catalog: Arc::new(Mutex::new(catalog)),
        }
    }

    fn lock_catalog(&self) -> MutexGuard<'_, Vec<MaintenanceDefinition>> {
        self.catalog.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Snapshot of the catalog including the current step flags
    pub fn catalog(&self) -> Vec<MaintenanceDefinition> {
        self.lock_catalog().clone()
    }

    pub fn get_definition(&self, definition_id: &str) -> DomainResult<MaintenanceDefinition> {
        self.lock_catalog()
            .iter()
            .find(|d| d.id == definition_id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("Maintenance definition {}", definition_id)))
    }

    fn update_definition<F>(&self, definition_id: &str, update: F) -> DomainResult<MaintenanceDefinition>
    where
        F: FnOnce(&mut MaintenanceDefinition) -> DomainResult<()>,
    {
        let mut catalog = self.lock_catalog();
        let definition = catalog
            .iter_mut()
            .find(|d| d.id == definition_id)
            .ok_or_else(|| DomainError::not_found(format!("Maintenance definition {}", definition_id)))?;
        update(definition)?;
        Ok(definition.clone())
    }

    /// Start a fresh run of a routine: every step goes back to pending
    pub fn open_run(&self, definition_id: &str) -> DomainResult<MaintenanceDefinition> {
        debug!("Opening maintenance run for {}", definition_id);
        self.update_definition(definition_id, |definition| {
            definition.reset_steps();
            Ok(())
        })
    }

    pub fn toggle_step(
        &self,
        definition_id: &str,
        step_number: u32,
        completed: bool,
    ) -> DomainResult<MaintenanceDefinition> {
        self.update_definition(definition_id, |definition| {
            let step = definition
                .steps
                .iter_mut()
                .find(|s| s.number == step_number)
                .ok_or_else(|| {
                    DomainError::not_found(format!("Step {} of {}", step_number, definition_id))
                })?;
            step.completed = completed;
            Ok(())
        })
    }

    /// Record a performed routine and schedule its next occurrence
    pub async fn complete_maintenance(
        &self,
        command: CompleteMaintenanceCommand,
        now: DateTime<Utc>,
    ) -> DomainResult<MaintenanceLogEntry> {
        let definition = self.get_definition(&command.maintenance_definition_id)?;
        let performed_by = command.performed_by.trim();
        if performed_by.is_empty() {
            return Err(DomainError::validation("performed_by cannot be empty"));
        }
        let performed_at = instant_or_now(command.performed_at.as_deref(), now)?;

        let entry = MaintenanceLogEntry {
            id: MaintenanceLogEntry::generate_id(),
            maintenance_definition_id: definition.id.clone(),
            performed_at,
            performed_by: performed_by.to_string(),
            notes: command.notes.filter(|n| !n.trim().is_empty()),
            next_due_at: next_due_after(definition.frequency, performed_at),
            duration_minutes: command.duration_minutes,
        };
        self.log_repository.store_log_entry(&entry).await?;

        // The run is over; the checklist starts clean next time
        self.open_run(&definition.id)?;

        info!(
            "Completed '{}' ({}), next due {}",
            definition.name, entry.id, entry.next_due_at
        );
        Ok(entry)
    }

    pub async fn list_logs(&self) -> DomainResult<Vec<MaintenanceLogEntry>> {
        Ok(self.log_repository.list_log_entries().await?)
    }

    /// Scheduled runs due at or after `now`, soonest first
    pub async fn upcoming(&self, now: DateTime<Utc>) -> DomainResult<Vec<AgendaItem>> {
        let mut items: Vec<AgendaItem> = self
            .agenda_items()
            .await?
            .into_iter()
            .filter(|item| item.next_due_at >= now)
            .collect();
        items.sort_by_key(|item| item.next_due_at);
        Ok(items)
    }

    /// Scheduled runs whose due date falls on the given local day
    pub async fn due_on(&self, date: NaiveDate) -> DomainResult<Vec<AgendaItem>> {
        let mut items: Vec<AgendaItem> = self
            .agenda_items()
            .await?
            .into_iter()
            .filter(|item| local_date_of(item.next_due_at) == date)
            .collect();
        items.sort_by_key(|item| item.next_due_at);
        Ok(items)
    }

    async fn agenda_items(&self) -> DomainResult<Vec<AgendaItem>> {
        let names: HashMap<String, String> = self
            .lock_catalog()
            .iter()
            .map(|d| (d.id.clone(), d.name.clone()))
            .collect();

        let logs = self.log_repository.list_log_entries().await?;
        Ok(logs
            .into_iter()
            .map(|log| AgendaItem {
                maintenance_name: names.get(&log.maintenance_definition_id).cloned(),
                log_id: log.id,
                maintenance_definition_id: log.maintenance_definition_id,
                next_due_at: log.next_due_at,
            })
            .collect())
    }
}
