//! Access context errors.

use std::fmt;

/// Errors from user lookup and persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// User not found.
    NotFound {
        /// Lookup key used (user id or telegram id).
        key: String,
    },

    /// Telegram id already registered.
    DuplicateTelegramId {
        /// The conflicting telegram id.
        telegram_id: i64,
    },

    /// Persistence failure.
    Storage {
        /// Error message.
        message: String,
    },
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { key } => write!(f, "User not found: {key}"),
            Self::DuplicateTelegramId { telegram_id } => {
                write!(f, "Telegram id already registered: {telegram_id}")
            }
            Self::Storage { message } => write!(f, "User storage error: {message}"),
        }
    }
}

impl std::error::Error for AccessError {}
