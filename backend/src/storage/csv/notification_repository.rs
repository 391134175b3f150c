//! Notifications stored in `notifications.csv`.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::NotificationKind;

use super::connection::{CsvConnection, NOTIFICATIONS};
use super::table::CsvTable;
use crate::domain::dates::{format_instant, parse_stored_instant};
use crate::domain::models::notification::Notification;
use crate::storage::traits::NotificationStorage;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct NotificationRow {
    id: String,
    kind: NotificationKind,
    title: String,
    message: String,
    created_at: String,
    read: bool,
    action_label: Option<String>,
    action_route: Option<String>,
}

impl NotificationRow {
    fn from_domain(notification: &Notification) -> Self {
        Self {
            id: notification.id.clone(),
            kind: notification.kind,
            title: notification.title.clone(),
            message: notification.message.clone(),
            created_at: format_instant(notification.created_at),
            read: notification.read,
            action_label: notification.action_label.clone(),
            action_route: notification.action_route.clone(),
        }
    }

    fn into_domain(self) -> Result<Notification> {
        Ok(Notification {
            created_at: parse_stored_instant(&self.created_at)?,
            id: self.id,
            kind: self.kind,
            title: self.title,
            message: self.message,
            read: self.read,
            action_label: self.action_label,
            action_route: self.action_route,
        })
    }
}

#[derive(Debug, Clone)]
pub struct NotificationRepository {
    table: CsvTable<NotificationRow>,
}

impl NotificationRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self {
            table: connection.table(NOTIFICATIONS),
        }
    }
}

#[async_trait]
impl NotificationStorage for NotificationRepository {
    async fn store_notification(&self, notification: &Notification) -> Result<()> {
        self.table.append(NotificationRow::from_domain(notification))
    }

    async fn list_notifications(&self) -> Result<Vec<Notification>> {
        let mut notifications = self
            .table
            .read_all()?
            .into_iter()
            .map(NotificationRow::into_domain)
            .collect::<Result<Vec<_>>>()?;
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notifications)
    }

    async fn update_notification(&self, notification: &Notification) -> Result<bool> {
        let updated = self.table.modify(|rows| {
            let row = rows.iter_mut().find(|row| row.id == notification.id)?;
            *row = NotificationRow::from_domain(notification);
            Some(())
        })?;
        Ok(updated.is_some())
    }
}
