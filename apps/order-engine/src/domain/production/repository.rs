//! Production batch repository trait.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::batch::{BatchStatus, ProductionBatch};
use super::errors::BatchError;
use crate::domain::shared::BatchId;

/// Filter for batch listing. Fields are conjunctive; `None` means "any".
#[derive(Debug, Clone, Default)]
pub struct BatchFilter {
    /// Restrict to one status.
    pub status: Option<BatchStatus>,
    /// Restrict to one production date.
    pub production_date: Option<NaiveDate>,
}

/// Repository trait for ProductionBatch persistence.
#[async_trait]
pub trait BatchRepository: Send + Sync {
    /// Save a batch (insert or update).
    ///
    /// # Errors
    ///
    /// Returns error if the batch cannot be persisted.
    async fn save(&self, batch: &ProductionBatch) -> Result<(), BatchError>;

    /// Find a batch by id.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_by_id(&self, id: &BatchId) -> Result<Option<ProductionBatch>, BatchError>;

    /// List batches matching the filter, newest production date first.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn list(&self, filter: &BatchFilter) -> Result<Vec<ProductionBatch>, BatchError>;
}
