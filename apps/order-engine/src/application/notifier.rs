//! Best-effort notification delivery.
//!
//! Notifications are a side channel: the primary write has already
//! succeeded by the time a notification is attempted, so a failure here is
//! logged and swallowed rather than surfaced to the caller.

use std::sync::Arc;

use crate::domain::access::UserRepository;
use crate::domain::notifications::{Notification, NotificationRepository, NotificationType};
use crate::domain::shared::UserId;

/// Wraps the notification store with the catch-log-continue contract.
pub struct Notifier<N, U>
where
    N: NotificationRepository,
    U: UserRepository,
{
    notification_repo: Arc<N>,
    user_repo: Arc<U>,
}

impl<N, U> Notifier<N, U>
where
    N: NotificationRepository,
    U: UserRepository,
{
    /// Create a new Notifier.
    pub fn new(notification_repo: Arc<N>, user_repo: Arc<U>) -> Self {
        Self {
            notification_repo,
            user_repo,
        }
    }

    /// Deliver one notification. Failures are logged, never returned.
    ///
    /// `related` optionally records which entity the message is about, as a
    /// weak (type, id) reference.
    pub async fn notify(
        &self,
        recipient_id: &UserId,
        notification_type: NotificationType,
        title: &str,
        message: &str,
        related: Option<(&str, &str)>,
    ) {
        let mut notification = Notification::new(
            recipient_id.clone(),
            notification_type,
            title.to_string(),
            message.to_string(),
        );
        if let Some((entity_type, entity_id)) = related {
            notification = notification.with_related(entity_type, entity_id);
        }
        if let Err(e) = self.notification_repo.save(&notification).await {
            tracing::warn!(
                recipient_id = %recipient_id,
                error = %e,
                "failed to deliver notification"
            );
        }
    }

    /// Fan one message out to every active distributor. Failures are
    /// logged, never returned.
    pub async fn notify_all_distributors(
        &self,
        notification_type: NotificationType,
        title: &str,
        message: &str,
    ) {
        let distributors = match self.user_repo.list_active_distributors().await {
            Ok(distributors) => distributors,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load distributors for broadcast");
                return;
            }
        };

        let notifications: Vec<Notification> = distributors
            .iter()
            .map(|user| {
                Notification::new(
                    user.id.clone(),
                    notification_type,
                    title.to_string(),
                    message.to_string(),
                )
            })
            .collect();

        if let Err(e) = self.notification_repo.save_bulk(&notifications).await {
            tracing::warn!(error = %e, "failed to deliver broadcast notifications");
        }
    }
}
