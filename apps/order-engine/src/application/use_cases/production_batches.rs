//! Production Batch Use Cases

use std::sync::Arc;

use crate::application::dto::{BatchDto, CreateBatchDto, UpdateBatchDto};
use crate::application::errors::AppError;
use crate::domain::access::{capabilities, User};
use crate::domain::production::{
    BatchError, BatchFilter, BatchItemRequest, BatchRepository, CreateBatchCommand,
    ProductionBatch,
};
use crate::domain::shared::BatchId;

/// Use case for planning a new production batch.
pub struct CreateBatchUseCase<B>
where
    B: BatchRepository,
{
    batch_repo: Arc<B>,
}

impl<B> CreateBatchUseCase<B>
where
    B: BatchRepository,
{
    /// Create a new CreateBatchUseCase.
    pub fn new(batch_repo: Arc<B>) -> Self {
        Self { batch_repo }
    }

    /// Execute the use case.
    ///
    /// Capacity is validated once, here.
    ///
    /// # Errors
    ///
    /// Returns `Authorization` for non-staff callers and `Validation` for
    /// empty items, non-positive quantities, or a plan over capacity.
    pub async fn execute(&self, actor: &User, dto: CreateBatchDto) -> Result<BatchDto, AppError> {
        if !capabilities::can_manage_production(actor.role) {
            return Err(AppError::Authorization(
                "Only producers and admins can manage production batches".to_string(),
            ));
        }

        let batch = ProductionBatch::new(CreateBatchCommand {
            production_date: dto.production_date,
            total_capacity: dto.total_capacity,
            notes: dto.notes,
            items: dto
                .items
                .into_iter()
                .map(|item| BatchItemRequest {
                    product_id: item.product_id,
                    planned_quantity: item.planned_quantity,
                })
                .collect(),
        })?;
        self.batch_repo.save(&batch).await?;

        tracing::info!(
            batch_id = %batch.id(),
            batch_number = %batch.batch_number(),
            "production batch planned"
        );

        Ok(BatchDto::from_batch(&batch))
    }
}

/// Use case for updating a batch: status, notes, recorded actuals.
///
/// Capacity is not re-validated on update.
pub struct UpdateBatchUseCase<B>
where
    B: BatchRepository,
{
    batch_repo: Arc<B>,
}

impl<B> UpdateBatchUseCase<B>
where
    B: BatchRepository,
{
    /// Create a new UpdateBatchUseCase.
    pub fn new(batch_repo: Arc<B>) -> Self {
        Self { batch_repo }
    }

    /// Execute the use case.
    ///
    /// # Errors
    ///
    /// Returns `Authorization` for non-staff callers, `NotFound` for a
    /// missing batch or line.
    pub async fn execute(
        &self,
        actor: &User,
        batch_id: &BatchId,
        dto: UpdateBatchDto,
    ) -> Result<BatchDto, AppError> {
        if !capabilities::can_manage_production(actor.role) {
            return Err(AppError::Authorization(
                "Only producers and admins can manage production batches".to_string(),
            ));
        }

        let mut batch = self
            .batch_repo
            .find_by_id(batch_id)
            .await?
            .ok_or_else(|| BatchError::NotFound {
                batch_id: batch_id.clone(),
            })?;

        if let Some(status) = dto.status {
            batch.set_status(status);
        }
        if let Some(notes) = dto.notes {
            batch.set_notes(Some(notes));
        }
        for actual in dto.actuals {
            batch.record_actual(&actual.item_id, actual.actual_quantity)?;
        }
        self.batch_repo.save(&batch).await?;

        Ok(BatchDto::from_batch(&batch))
    }
}

/// Use case for reading batches.
pub struct ListBatchesUseCase<B>
where
    B: BatchRepository,
{
    batch_repo: Arc<B>,
}

impl<B> ListBatchesUseCase<B>
where
    B: BatchRepository,
{
    /// Create a new ListBatchesUseCase.
    pub fn new(batch_repo: Arc<B>) -> Self {
        Self { batch_repo }
    }

    /// List batches matching the filter.
    ///
    /// # Errors
    ///
    /// Returns `Authorization` for non-staff callers.
    pub async fn list(&self, actor: &User, filter: &BatchFilter) -> Result<Vec<BatchDto>, AppError> {
        if !capabilities::can_manage_production(actor.role) {
            return Err(AppError::Authorization(
                "Only producers and admins can view production batches".to_string(),
            ));
        }
        let batches = self.batch_repo.list(filter).await?;
        Ok(batches.iter().map(BatchDto::from_batch).collect())
    }

    /// Load one batch.
    ///
    /// # Errors
    ///
    /// Returns `Authorization` for non-staff callers and `NotFound` for a
    /// missing batch.
    pub async fn get(&self, actor: &User, batch_id: &BatchId) -> Result<BatchDto, AppError> {
        if !capabilities::can_manage_production(actor.role) {
            return Err(AppError::Authorization(
                "Only producers and admins can view production batches".to_string(),
            ));
        }
        let batch = self
            .batch_repo
            .find_by_id(batch_id)
            .await?
            .ok_or_else(|| BatchError::NotFound {
                batch_id: batch_id.clone(),
            })?;
        Ok(BatchDto::from_batch(&batch))
    }
}
