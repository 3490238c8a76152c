//! Notification repository trait.

use async_trait::async_trait;

use super::errors::NotificationError;
use super::notification::Notification;
use crate::domain::shared::{NotificationId, UserId};

/// Repository trait for Notification persistence.
///
/// All read and mutate operations are scoped to a recipient: a user can
/// only see and mark their own notifications.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Save one notification.
    ///
    /// # Errors
    ///
    /// Returns error if the notification cannot be persisted.
    async fn save(&self, notification: &Notification) -> Result<(), NotificationError>;

    /// Save a batch of notifications (broadcasts).
    ///
    /// # Errors
    ///
    /// Returns error if any notification cannot be persisted.
    async fn save_bulk(&self, notifications: &[Notification]) -> Result<(), NotificationError>;

    /// List a user's notifications, newest first.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Notification>, NotificationError>;

    /// Mark one of the user's notifications as read.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the notification does not exist or belongs to
    /// someone else.
    async fn mark_read(
        &self,
        user_id: &UserId,
        id: &NotificationId,
    ) -> Result<(), NotificationError>;

    /// Mark all of the user's notifications as read.
    ///
    /// # Errors
    ///
    /// Returns error if the update fails.
    async fn mark_all_read(&self, user_id: &UserId) -> Result<(), NotificationError>;

    /// Delete one of the user's notifications.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the notification does not exist or belongs to
    /// someone else.
    async fn delete(&self, user_id: &UserId, id: &NotificationId)
        -> Result<(), NotificationError>;
}
