//! Notifications context errors.

use std::fmt;

use crate::domain::shared::NotificationId;

/// Errors from notification persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationError {
    /// Notification not found for this recipient.
    NotFound {
        /// Notification id used for the lookup.
        id: NotificationId,
    },

    /// Persistence failure.
    Storage {
        /// Error message.
        message: String,
    },
}

impl fmt::Display for NotificationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { id } => write!(f, "Notification not found: {id}"),
            Self::Storage { message } => write!(f, "Notification storage error: {message}"),
        }
    }
}

impl std::error::Error for NotificationError {}
