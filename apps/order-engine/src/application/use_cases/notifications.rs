//! Notification Use Cases

use std::sync::Arc;

use crate::application::dto::NotificationDto;
use crate::application::errors::AppError;
use crate::domain::access::User;
use crate::domain::notifications::NotificationRepository;
use crate::domain::shared::NotificationId;

/// Use case for a user's notification inbox.
///
/// Everything here is scoped to the calling user; there is no way to read
/// or mutate someone else's inbox.
pub struct NotificationsUseCase<N>
where
    N: NotificationRepository,
{
    notification_repo: Arc<N>,
}

impl<N> NotificationsUseCase<N>
where
    N: NotificationRepository,
{
    /// Create a new NotificationsUseCase.
    pub fn new(notification_repo: Arc<N>) -> Self {
        Self { notification_repo }
    }

    /// List the caller's notifications, newest first.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    pub async fn list(
        &self,
        actor: &User,
        unread_only: bool,
    ) -> Result<Vec<NotificationDto>, AppError> {
        let notifications = self.notification_repo.list_for_user(&actor.id).await?;
        Ok(notifications
            .iter()
            .filter(|n| !unread_only || !n.is_read())
            .map(NotificationDto::from_notification)
            .collect())
    }

    /// Mark one of the caller's notifications as read.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the notification does not exist or belongs to
    /// someone else.
    pub async fn mark_read(&self, actor: &User, id: &NotificationId) -> Result<(), AppError> {
        self.notification_repo.mark_read(&actor.id, id).await?;
        Ok(())
    }

    /// Mark all of the caller's notifications as read.
    ///
    /// # Errors
    ///
    /// Returns error if the update fails.
    pub async fn mark_all_read(&self, actor: &User) -> Result<(), AppError> {
        self.notification_repo.mark_all_read(&actor.id).await?;
        Ok(())
    }

    /// Delete one of the caller's notifications.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the notification does not exist or belongs to
    /// someone else.
    pub async fn delete(&self, actor: &User, id: &NotificationId) -> Result<(), AppError> {
        self.notification_repo.delete(&actor.id, id).await?;
        Ok(())
    }
}
