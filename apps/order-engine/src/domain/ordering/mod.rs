//! Ordering context: order aggregate, lifecycle, status history.

pub mod aggregate;
pub mod errors;
pub mod repository;
pub mod value_objects;

pub use aggregate::{
    CreateOrderCommand, Order, OrderDetailsPatch, OrderItem, OrderItemRequest,
    ReconstitutedOrderParams,
};
pub use errors::OrderError;
pub use repository::{OrderFilter, OrderRepository};
pub use value_objects::{BatchNumber, OrderNumber, OrderStatus, StatusHistoryEntry};
