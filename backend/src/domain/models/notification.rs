//! Domain model for dashboard notifications.
use chrono::{DateTime, Utc};
use shared::NotificationKind;

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub read: bool,
    pub action_label: Option<String>,
    pub action_route: Option<String>,
}

impl Notification {
    pub fn generate_id() -> String {
        super::generate_id("notification")
    }

    pub fn is_unread_alert(&self) -> bool {
        self.kind == NotificationKind::Alert && !self.read
    }
}
