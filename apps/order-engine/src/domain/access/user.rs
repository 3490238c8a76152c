//! User entity and roles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::UserId;

/// Role of a user in the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Places orders (customer-side).
    Distributor,
    /// Confirms orders, adjusts quantities, runs production batches.
    Producer,
    /// Full access, including user approval.
    Admin,
}

impl Role {
    /// Returns true for roles on the production side (producer or admin).
    #[must_use]
    pub const fn is_staff(&self) -> bool {
        matches!(self, Self::Producer | Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Distributor => write!(f, "DISTRIBUTOR"),
            Self::Producer => write!(f, "PRODUCER"),
            Self::Admin => write!(f, "ADMIN"),
        }
    }
}

/// A user of the system.
///
/// Created inactive on first bot contact (or seeded); activated only by an
/// explicit admin/producer approval action, never automatically. `is_active`
/// gates all access.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned identifier.
    pub id: UserId,
    /// Telegram account id. Unique, immutable.
    pub telegram_id: i64,
    /// Role of this user.
    pub role: Role,
    /// Display name.
    pub name: String,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Company name (distributors).
    pub company_name: Option<String>,
    /// Whether the user may access the system.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a user pending approval, as registered on first bot contact.
    #[must_use]
    pub fn pending(telegram_id: i64, name: impl Into<String>) -> Self {
        Self {
            id: UserId::generate(),
            telegram_id,
            role: Role::Distributor,
            name: name.into(),
            phone: None,
            company_name: None,
            is_active: false,
            created_at: Utc::now(),
        }
    }

    /// Activate the user (admin/producer approval action).
    pub fn activate(&mut self) {
        self.is_active = true;
    }
}
