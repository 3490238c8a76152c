//! Production context: planned batches and recorded actuals.

pub mod batch;
pub mod errors;
pub mod repository;

pub use batch::{
    BatchItemRequest, BatchStatus, CreateBatchCommand, ProductionBatch, ProductionBatchItem,
};
pub use errors::BatchError;
pub use repository::{BatchFilter, BatchRepository};
