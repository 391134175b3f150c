use shared::{CreateNotificationRequest, Notification, NotificationAction};

use crate::domain::commands::notifications::CreateNotificationCommand;
use crate::domain::models::notification::Notification as DomainNotification;

pub struct NotificationMapper;

impl NotificationMapper {
    pub fn to_dto(domain: DomainNotification) -> Notification {
        let action = match (domain.action_label, domain.action_route) {
            (Some(label), Some(route)) => Some(NotificationAction { label, route }),
            _ => None,
        };
        Notification {
            id: domain.id,
            kind: domain.kind,
            title: domain.title,
            message: domain.message,
            created_at: domain.created_at,
            read: domain.read,
            action,
        }
    }

    pub fn to_command(request: CreateNotificationRequest) -> CreateNotificationCommand {
        let (action_label, action_route) = match request.action {
            Some(action) => (Some(action.label), Some(action.route)),
            None => (None, None),
        };
        CreateNotificationCommand {
            kind: request.kind,
            title: request.title,
            message: request.message,
            action_label,
            action_route,
        }
    }
}
