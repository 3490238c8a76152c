//! Shared value objects used across bounded contexts.

mod document;
mod identifiers;
mod quantity;

pub use document::Document;
pub use identifiers::{
    BatchId, BatchItemId, NotificationId, OrderId, OrderItemId, ProductId, UserId,
};
pub use quantity::Quantity;
