//! Status history entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::order_status::OrderStatus;
use crate::domain::shared::{OrderId, UserId};

/// One recorded status change of an order.
///
/// Entries are append-only; they are written alongside every status update
/// and once at creation for the initial status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusHistoryEntry {
    order_id: OrderId,
    status: OrderStatus,
    changed_by: UserId,
    notes: Option<String>,
    created_at: DateTime<Utc>,
}

impl StatusHistoryEntry {
    /// Record a status change made now.
    #[must_use]
    pub fn new(
        order_id: OrderId,
        status: OrderStatus,
        changed_by: UserId,
        notes: Option<String>,
    ) -> Self {
        Self {
            order_id,
            status,
            changed_by,
            notes,
            created_at: Utc::now(),
        }
    }

    /// Order the entry belongs to.
    #[must_use]
    pub const fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    /// Status the order entered.
    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        self.status
    }

    /// User who made the change.
    #[must_use]
    pub const fn changed_by(&self) -> &UserId {
        &self.changed_by
    }

    /// Optional free-form notes.
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// When the change was recorded.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
