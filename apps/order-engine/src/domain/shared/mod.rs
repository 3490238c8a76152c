//! Shared kernel: value objects common to all bounded contexts.

pub mod value_objects;

pub use value_objects::{
    BatchId, BatchItemId, Document, NotificationId, OrderId, OrderItemId, ProductId, Quantity,
    UserId,
};
