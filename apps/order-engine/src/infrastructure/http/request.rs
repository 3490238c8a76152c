//! HTTP request query types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::ordering::{OrderFilter, OrderStatus};
use crate::domain::production::{BatchFilter, BatchStatus};
use crate::domain::shared::UserId;

/// Query parameters for order listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderListQuery {
    /// Restrict to one distributor (staff only; distributors are always
    /// narrowed to themselves).
    #[serde(default)]
    pub distributor_id: Option<UserId>,
    /// Restrict to one lifecycle status.
    #[serde(default)]
    pub status: Option<OrderStatus>,
    /// Start of an inclusive order-date range.
    #[serde(default)]
    pub from: Option<NaiveDate>,
    /// End of an inclusive order-date range.
    #[serde(default)]
    pub to: Option<NaiveDate>,
}

impl OrderListQuery {
    /// Convert to a repository filter. An open end of the range defaults to
    /// the other bound.
    #[must_use]
    pub fn into_filter(self) -> OrderFilter {
        let date_range = match (self.from, self.to) {
            (Some(from), Some(to)) => Some((from, to)),
            (Some(day), None) | (None, Some(day)) => Some((day, day)),
            (None, None) => None,
        };
        OrderFilter {
            distributor_id: self.distributor_id,
            status: self.status,
            date_range,
        }
    }
}

/// Query parameters for the daily demand summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryQuery {
    /// The day to aggregate.
    pub date: NaiveDate,
}

/// Query parameters for batch listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchListQuery {
    /// Restrict to one status.
    #[serde(default)]
    pub status: Option<BatchStatus>,
    /// Restrict to one production date.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl BatchListQuery {
    /// Convert to a repository filter.
    #[must_use]
    pub fn into_filter(self) -> BatchFilter {
        BatchFilter {
            status: self.status,
            production_date: self.date,
        }
    }
}

/// Query parameters for notification listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationListQuery {
    /// Return only unread notifications.
    #[serde(default)]
    pub unread_only: bool,
}
