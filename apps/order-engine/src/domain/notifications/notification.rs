//! Notification entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::shared::{NotificationId, UserId};

/// Category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    /// An order changed lifecycle status.
    OrderStatus,
    /// An order's content changed (item adjusted or removed).
    OrderChange,
    /// Production progress update.
    ProductionUpdate,
    /// Operational message from the system itself.
    System,
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OrderStatus => write!(f, "ORDER_STATUS"),
            Self::OrderChange => write!(f, "ORDER_CHANGE"),
            Self::ProductionUpdate => write!(f, "PRODUCTION_UPDATE"),
            Self::System => write!(f, "SYSTEM"),
        }
    }
}

/// A message addressed to one user.
///
/// Notifications are a side channel: they are written best-effort after the
/// primary operation succeeds and are never part of its transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    id: NotificationId,
    recipient_id: UserId,
    notification_type: NotificationType,
    title: String,
    message: String,
    related_entity_type: Option<String>,
    related_entity_id: Option<String>,
    is_read: bool,
    created_at: DateTime<Utc>,
}

impl Notification {
    /// Create an unread notification addressed to `recipient_id`.
    #[must_use]
    pub fn new(
        recipient_id: UserId,
        notification_type: NotificationType,
        title: String,
        message: String,
    ) -> Self {
        Self {
            id: NotificationId::generate(),
            recipient_id,
            notification_type,
            title,
            message,
            related_entity_type: None,
            related_entity_id: None,
            is_read: false,
            created_at: Utc::now(),
        }
    }

    /// Attach a weak reference to the entity this notification is about.
    ///
    /// Deleting the referenced entity does not delete the notification.
    #[must_use]
    pub fn with_related(mut self, entity_type: impl Into<String>, entity_id: impl Into<String>) -> Self {
        self.related_entity_type = Some(entity_type.into());
        self.related_entity_id = Some(entity_id.into());
        self
    }

    /// Notification id.
    #[must_use]
    pub const fn id(&self) -> &NotificationId {
        &self.id
    }

    /// Addressee.
    #[must_use]
    pub const fn recipient_id(&self) -> &UserId {
        &self.recipient_id
    }

    /// Category.
    #[must_use]
    pub const fn notification_type(&self) -> NotificationType {
        self.notification_type
    }

    /// Short title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Message body.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Kind of entity this notification refers to, if any.
    #[must_use]
    pub fn related_entity_type(&self) -> Option<&str> {
        self.related_entity_type.as_deref()
    }

    /// Id of the entity this notification refers to, if any.
    #[must_use]
    pub fn related_entity_id(&self) -> Option<&str> {
        self.related_entity_id.as_deref()
    }

    /// Whether the recipient has read it.
    #[must_use]
    pub const fn is_read(&self) -> bool {
        self.is_read
    }

    /// When it was created.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Mark as read.
    pub fn mark_read(&mut self) {
        self.is_read = true;
    }
}
