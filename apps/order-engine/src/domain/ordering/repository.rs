//! Order repository trait.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::aggregate::Order;
use super::errors::OrderError;
use super::value_objects::{OrderStatus, StatusHistoryEntry};
use crate::domain::shared::{OrderId, UserId};

/// Filter for order listing.
///
/// All fields are conjunctive; `None` means "any".
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    /// Restrict to one distributor's orders.
    pub distributor_id: Option<UserId>,
    /// Restrict to one lifecycle status.
    pub status: Option<OrderStatus>,
    /// Restrict to orders whose order date falls in this inclusive range.
    pub date_range: Option<(NaiveDate, NaiveDate)>,
}

/// Repository trait for Order persistence.
///
/// Status history is persisted alongside orders and cascades on delete.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Save an order (insert or update).
    ///
    /// # Errors
    ///
    /// Returns error if the order cannot be persisted.
    async fn save(&self, order: &Order) -> Result<(), OrderError>;

    /// Find an order by id.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, OrderError>;

    /// List orders matching the filter, newest first.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn list(&self, filter: &OrderFilter) -> Result<Vec<Order>, OrderError>;

    /// Load all orders with the given order date (full-day window).
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_by_order_date(&self, date: NaiveDate) -> Result<Vec<Order>, OrderError>;

    /// Delete an order together with its items and history rows.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the order does not exist.
    async fn delete(&self, id: &OrderId) -> Result<(), OrderError>;

    /// Append a status history entry.
    ///
    /// # Errors
    ///
    /// Returns error if the entry cannot be persisted.
    async fn append_history(&self, entry: &StatusHistoryEntry) -> Result<(), OrderError>;

    /// Load an order's status history, newest first.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn history_for(&self, id: &OrderId) -> Result<Vec<StatusHistoryEntry>, OrderError>;
}
