//! Production batch aggregate.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::errors::BatchError;
use crate::domain::ordering::BatchNumber;
use crate::domain::shared::{BatchId, BatchItemId, ProductId, Quantity};

/// Production batch status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BatchStatus {
    /// Planned, production not started.
    Planned,
    /// Currently in production.
    InProgress,
    /// Production finished, actuals recorded.
    Completed,
}

impl std::fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Planned => write!(f, "PLANNED"),
            Self::InProgress => write!(f, "IN_PROGRESS"),
            Self::Completed => write!(f, "COMPLETED"),
        }
    }
}

/// One product line in a production batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionBatchItem {
    id: BatchItemId,
    product_id: ProductId,
    planned_quantity: Quantity,
    actual_quantity: Option<Quantity>,
}

impl ProductionBatchItem {
    /// Create a planned batch line.
    #[must_use]
    pub fn new(product_id: ProductId, planned_quantity: Quantity) -> Self {
        Self {
            id: BatchItemId::generate(),
            product_id,
            planned_quantity,
            actual_quantity: None,
        }
    }

    /// Line id.
    #[must_use]
    pub const fn id(&self) -> &BatchItemId {
        &self.id
    }

    /// Product being produced.
    #[must_use]
    pub const fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    /// Planned output quantity.
    #[must_use]
    pub const fn planned_quantity(&self) -> Quantity {
        self.planned_quantity
    }

    /// Actually produced quantity, once recorded.
    #[must_use]
    pub const fn actual_quantity(&self) -> Option<Quantity> {
        self.actual_quantity
    }
}

/// One requested line in a batch create command.
#[derive(Debug, Clone)]
pub struct BatchItemRequest {
    /// Product to produce.
    pub product_id: ProductId,
    /// Planned output quantity.
    pub planned_quantity: Quantity,
}

/// Command to plan a new production batch.
#[derive(Debug, Clone)]
pub struct CreateBatchCommand {
    /// Date production is planned for.
    pub production_date: NaiveDate,
    /// Capacity ceiling for the batch.
    pub total_capacity: Quantity,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Planned lines.
    pub items: Vec<BatchItemRequest>,
}

/// A planned run of production for one date.
///
/// Capacity is validated once, at creation: the sum of planned quantities
/// must not exceed `total_capacity`. Later mutations (actuals, notes) are
/// not re-checked against capacity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionBatch {
    id: BatchId,
    batch_number: BatchNumber,
    production_date: NaiveDate,
    total_capacity: Quantity,
    used_capacity: Quantity,
    status: BatchStatus,
    notes: Option<String>,
    items: Vec<ProductionBatchItem>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProductionBatch {
    /// Plan a new batch.
    ///
    /// # Errors
    ///
    /// Returns `EmptyItems` when no lines were given, `InvalidQuantity` for
    /// a non-positive planned quantity, and `CapacityExceeded` when the
    /// planned total is over the ceiling.
    pub fn new(cmd: CreateBatchCommand) -> Result<Self, BatchError> {
        if cmd.items.is_empty() {
            return Err(BatchError::EmptyItems);
        }
        for item in &cmd.items {
            if !item.planned_quantity.is_positive() {
                return Err(BatchError::InvalidQuantity {
                    quantity: item.planned_quantity.to_string(),
                });
            }
        }

        let used_capacity: Quantity = cmd.items.iter().map(|item| item.planned_quantity).sum();
        if used_capacity > cmd.total_capacity {
            return Err(BatchError::CapacityExceeded {
                planned: used_capacity.to_string(),
                capacity: cmd.total_capacity.to_string(),
            });
        }

        let now = Utc::now();
        let items = cmd
            .items
            .into_iter()
            .map(|req| ProductionBatchItem::new(req.product_id, req.planned_quantity))
            .collect();

        Ok(Self {
            id: BatchId::generate(),
            batch_number: BatchNumber::generate(cmd.production_date),
            production_date: cmd.production_date,
            total_capacity: cmd.total_capacity,
            used_capacity,
            status: BatchStatus::Planned,
            notes: cmd.notes,
            items,
            created_at: now,
            updated_at: now,
        })
    }

    /// Batch id.
    #[must_use]
    pub const fn id(&self) -> &BatchId {
        &self.id
    }

    /// Human-facing batch number.
    #[must_use]
    pub const fn batch_number(&self) -> &BatchNumber {
        &self.batch_number
    }

    /// Date production is planned for.
    #[must_use]
    pub const fn production_date(&self) -> NaiveDate {
        self.production_date
    }

    /// Capacity ceiling.
    #[must_use]
    pub const fn total_capacity(&self) -> Quantity {
        self.total_capacity
    }

    /// Sum of planned quantities at creation.
    #[must_use]
    pub const fn used_capacity(&self) -> Quantity {
        self.used_capacity
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> BatchStatus {
        self.status
    }

    /// Free-form notes.
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Batch lines.
    #[must_use]
    pub fn items(&self) -> &[ProductionBatchItem] {
        &self.items
    }

    /// Creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Move the batch to a new status.
    pub fn set_status(&mut self, status: BatchStatus) {
        self.status = status;
        self.touch();
    }

    /// Replace the notes.
    pub fn set_notes(&mut self, notes: Option<String>) {
        self.notes = notes;
        self.touch();
    }

    /// Record the actually produced quantity for one line.
    ///
    /// Capacity is not re-validated here.
    ///
    /// # Errors
    ///
    /// Returns `ItemNotFound` when the line is not in this batch.
    pub fn record_actual(
        &mut self,
        item_id: &BatchItemId,
        actual_quantity: Quantity,
    ) -> Result<(), BatchError> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id() == item_id)
            .ok_or_else(|| BatchError::ItemNotFound {
                item_id: item_id.clone(),
            })?;

        item.actual_quantity = Some(actual_quantity);
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
