//! Application-edge error taxonomy.
//!
//! Domain errors are folded into this taxonomy at the use-case boundary so
//! transports (HTTP, bot) can map them to responses without inspecting each
//! context's error type.

use thiserror::Error;

use crate::domain::access::AccessError;
use crate::domain::catalog::CatalogError;
use crate::domain::notifications::NotificationError;
use crate::domain::ordering::OrderError;
use crate::domain::production::BatchError;

/// Transport-facing error.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request was well-formed but semantically invalid.
    #[error("{0}")]
    Validation(String),

    /// Caller could not be identified.
    #[error("{0}")]
    Authentication(String),

    /// Caller is identified but not allowed to do this.
    #[error("{0}")]
    Authorization(String),

    /// Referenced entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Request conflicts with existing state.
    #[error("{0}")]
    Conflict(String),

    /// Anything else.
    #[error("{0}")]
    Internal(String),
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::EmptyItems
            | OrderError::InvalidQuantity { .. }
            | OrderError::LastItem
            | OrderError::AdjustmentReasonRequired
            | OrderError::NotDraft { .. } => Self::Validation(err.to_string()),
            OrderError::NotFound { .. } | OrderError::ItemNotFound { .. } => {
                Self::NotFound(err.to_string())
            }
            OrderError::Storage { .. } => Self::Internal(err.to_string()),
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound { .. } => Self::NotFound(err.to_string()),
            CatalogError::DuplicateCode { .. } => Self::Conflict(err.to_string()),
            CatalogError::Storage { .. } => Self::Internal(err.to_string()),
        }
    }
}

impl From<AccessError> for AppError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::NotFound { .. } => Self::NotFound(err.to_string()),
            AccessError::DuplicateTelegramId { .. } => Self::Conflict(err.to_string()),
            AccessError::Storage { .. } => Self::Internal(err.to_string()),
        }
    }
}

impl From<NotificationError> for AppError {
    fn from(err: NotificationError) -> Self {
        match err {
            NotificationError::NotFound { .. } => Self::NotFound(err.to_string()),
            NotificationError::Storage { .. } => Self::Internal(err.to_string()),
        }
    }
}

impl From<BatchError> for AppError {
    fn from(err: BatchError) -> Self {
        match err {
            BatchError::EmptyItems
            | BatchError::InvalidQuantity { .. }
            | BatchError::CapacityExceeded { .. } => Self::Validation(err.to_string()),
            BatchError::NotFound { .. } | BatchError::ItemNotFound { .. } => {
                Self::NotFound(err.to_string())
            }
            BatchError::Storage { .. } => Self::Internal(err.to_string()),
        }
    }
}
