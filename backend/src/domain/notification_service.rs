//! Dashboard notifications. Only the `read` flag changes after creation.

use chrono::{DateTime, Utc};
use log::info;
use std::sync::Arc;

use super::commands::notifications::CreateNotificationCommand;
use super::errors::{DomainError, DomainResult};
use super::models::notification::Notification;
use crate::storage::{Connection, NotificationStorage};

#[derive(Clone)]
pub struct NotificationService<C: Connection> {
    notification_repository: C::NotificationRepository,
}

impl<C: Connection> NotificationService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            notification_repository: connection.create_notification_repository(),
        }
    }

    pub async fn add_notification(
        &self,
        command: CreateNotificationCommand,
        now: DateTime<Utc>,
    ) -> DomainResult<Notification> {
        let title = command.title.trim();
        if title.is_empty() {
            return Err(DomainError::validation("notification title cannot be empty"));
        }
        // An action needs both a label and a route
        let (action_label, action_route) = match (command.action_label, command.action_route) {
            (Some(label), Some(route)) => (Some(label), Some(route)),
            (None, None) => (None, None),
            _ => {
                return Err(DomainError::validation(
                    "notification action needs a label and a route",
                ))
            }
        };

        let notification = Notification {
            id: Notification::generate_id(),
            kind: command.kind,
            title: title.to_string(),
            message: command.message,
            created_at: now,
            read: false,
            action_label,
            action_route,
        };
        self.notification_repository.store_notification(&notification).await?;
        info!("Added {:?} notification {}", notification.kind, notification.id);
        Ok(notification)
    }

    /// Newest first
    pub async fn list_notifications(&self) -> DomainResult<Vec<Notification>> {
        Ok(self.notification_repository.list_notifications().await?)
    }

    pub async fn mark_read(&self, notification_id: &str) -> DomainResult<Notification> {
        let mut notification = self
            .notification_repository
            .list_notifications()
            .await?
            .into_iter()
            .find(|n| n.id == notification_id)
            .ok_or_else(|| DomainError::not_found(format!("Notification {}", notification_id)))?;
        if notification.read {
            return Ok(notification);
        }

        notification.read = true;
        if !self.notification_repository.update_notification(&notification).await? {
            return Err(DomainError::not_found(format!("Notification {}", notification_id)));
        }
        Ok(notification)
    }

    pub async fn unread_alert_count(&self) -> DomainResult<usize> {
        Ok(self
            .list_notifications()
            .await?
            .iter()
            .filter(|n| n.is_unread_alert())
            .count())
    }
}
