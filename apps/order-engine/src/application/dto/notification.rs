//! Notification DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::notifications::{Notification, NotificationType};
use crate::domain::shared::NotificationId;

/// Notification representation returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationDto {
    /// Notification id.
    pub id: NotificationId,
    /// Category.
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    /// Short title.
    pub title: String,
    /// Message body.
    pub message: String,
    /// Kind of entity the notification refers to, if any.
    pub related_entity_type: Option<String>,
    /// Id of the entity the notification refers to, if any.
    pub related_entity_id: Option<String>,
    /// Whether the recipient has read it.
    pub is_read: bool,
    /// When it was created.
    pub created_at: DateTime<Utc>,
}

impl NotificationDto {
    /// Build from a domain notification.
    #[must_use]
    pub fn from_notification(notification: &Notification) -> Self {
        Self {
            id: notification.id().clone(),
            notification_type: notification.notification_type(),
            title: notification.title().to_string(),
            message: notification.message().to_string(),
            related_entity_type: notification.related_entity_type().map(ToString::to_string),
            related_entity_id: notification.related_entity_id().map(ToString::to_string),
            is_read: notification.is_read(),
            created_at: notification.created_at(),
        }
    }
}
