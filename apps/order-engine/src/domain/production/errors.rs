//! Production context errors.

use std::fmt;

use crate::domain::shared::{BatchId, BatchItemId};

/// Errors from production batch planning and persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchError {
    /// Batch was planned with no lines.
    EmptyItems,

    /// A line carried a non-positive planned quantity.
    InvalidQuantity {
        /// Offending quantity rendered as given.
        quantity: String,
    },

    /// Planned total exceeds the batch capacity.
    CapacityExceeded {
        /// Sum of planned quantities.
        planned: String,
        /// Capacity ceiling.
        capacity: String,
    },

    /// Batch not found.
    NotFound {
        /// Batch id used for the lookup.
        batch_id: BatchId,
    },

    /// Line not found in the batch.
    ItemNotFound {
        /// Line id used for the lookup.
        item_id: BatchItemId,
    },

    /// Persistence failure.
    Storage {
        /// Error message.
        message: String,
    },
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyItems => write!(f, "Batch must contain at least one item"),
            Self::InvalidQuantity { quantity } => {
                write!(f, "Planned quantity must be positive, got {quantity}")
            }
            Self::CapacityExceeded { planned, capacity } => {
                write!(f, "Planned total {planned} exceeds batch capacity {capacity}")
            }
            Self::NotFound { batch_id } => write!(f, "Batch not found: {batch_id}"),
            Self::ItemNotFound { item_id } => write!(f, "Batch item not found: {item_id}"),
            Self::Storage { message } => write!(f, "Batch storage error: {message}"),
        }
    }
}

impl std::error::Error for BatchError {}
