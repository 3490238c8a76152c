//! Ordering context errors.

use std::fmt;

use super::value_objects::OrderStatus;
use crate::domain::shared::{OrderId, OrderItemId};

/// Errors from order validation, mutation and persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// Order was created or updated with no line items.
    EmptyItems,

    /// A line item carried a non-positive quantity.
    InvalidQuantity {
        /// Offending quantity rendered as given.
        quantity: String,
    },

    /// Order not found.
    NotFound {
        /// Order id used for the lookup.
        order_id: OrderId,
    },

    /// Line item not found on the order.
    ItemNotFound {
        /// Item id used for the lookup.
        item_id: OrderItemId,
    },

    /// Removing the item would leave the order empty.
    LastItem,

    /// Quantity adjustment submitted without a reason.
    AdjustmentReasonRequired,

    /// Deletion attempted on a non-draft order.
    NotDraft {
        /// Current status of the order.
        status: OrderStatus,
    },

    /// Persistence failure.
    Storage {
        /// Error message.
        message: String,
    },
}

impl fmt::Display for OrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyItems => write!(f, "Order must contain at least one item"),
            Self::InvalidQuantity { quantity } => {
                write!(f, "Item quantity must be positive, got {quantity}")
            }
            Self::NotFound { order_id } => write!(f, "Order not found: {order_id}"),
            Self::ItemNotFound { item_id } => write!(f, "Order item not found: {item_id}"),
            Self::LastItem => write!(f, "Cannot remove the last item from an order"),
            Self::AdjustmentReasonRequired => {
                write!(f, "A reason is required when adjusting an item quantity")
            }
            Self::NotDraft { status } => {
                write!(f, "Only DRAFT orders can be deleted, current status is {status}")
            }
            Self::Storage { message } => write!(f, "Order storage error: {message}"),
        }
    }
}

impl std::error::Error for OrderError {}
