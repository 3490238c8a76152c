//! Production batch DTOs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::production::{BatchStatus, ProductionBatch, ProductionBatchItem};
use crate::domain::shared::{BatchId, BatchItemId, ProductId, Quantity};

/// One planned line in a batch create request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBatchItemDto {
    /// Product to produce.
    pub product_id: ProductId,
    /// Planned output quantity.
    pub planned_quantity: Quantity,
}

/// Request body for batch creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBatchDto {
    /// Date production is planned for.
    pub production_date: NaiveDate,
    /// Capacity ceiling for the batch.
    pub total_capacity: Quantity,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Planned lines.
    pub items: Vec<CreateBatchItemDto>,
}

/// One recorded actual in a batch update request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchActualDto {
    /// Line to record the actual for.
    pub item_id: BatchItemId,
    /// Actually produced quantity.
    pub actual_quantity: Quantity,
}

/// Request body for batch update. Absent fields stay unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateBatchDto {
    /// New status.
    #[serde(default)]
    pub status: Option<BatchStatus>,
    /// New notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Actuals to record.
    #[serde(default)]
    pub actuals: Vec<BatchActualDto>,
}

/// One line in a batch response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchItemDto {
    /// Line id.
    pub id: BatchItemId,
    /// Product being produced.
    pub product_id: ProductId,
    /// Planned output quantity.
    pub planned_quantity: Quantity,
    /// Actually produced quantity, once recorded.
    pub actual_quantity: Option<Quantity>,
}

impl BatchItemDto {
    /// Build from a domain batch line.
    #[must_use]
    pub fn from_item(item: &ProductionBatchItem) -> Self {
        Self {
            id: item.id().clone(),
            product_id: item.product_id().clone(),
            planned_quantity: item.planned_quantity(),
            actual_quantity: item.actual_quantity(),
        }
    }
}

/// Batch representation returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchDto {
    /// Batch id.
    pub id: BatchId,
    /// Human-facing batch number.
    pub batch_number: String,
    /// Date production is planned for.
    pub production_date: NaiveDate,
    /// Capacity ceiling.
    pub total_capacity: Quantity,
    /// Sum of planned quantities at creation.
    pub used_capacity: Quantity,
    /// Current status.
    pub status: BatchStatus,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Batch lines.
    pub items: Vec<BatchItemDto>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl BatchDto {
    /// Build from a domain batch.
    #[must_use]
    pub fn from_batch(batch: &ProductionBatch) -> Self {
        Self {
            id: batch.id().clone(),
            batch_number: batch.batch_number().as_str().to_string(),
            production_date: batch.production_date(),
            total_capacity: batch.total_capacity(),
            used_capacity: batch.used_capacity(),
            status: batch.status(),
            notes: batch.notes().map(ToString::to_string),
            items: batch.items().iter().map(BatchItemDto::from_item).collect(),
            created_at: batch.created_at(),
            updated_at: batch.updated_at(),
        }
    }
}
