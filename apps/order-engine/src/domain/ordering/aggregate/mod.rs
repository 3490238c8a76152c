//! Order aggregate.

pub mod order;
pub mod order_item;

pub use order::{
    CreateOrderCommand, Order, OrderDetailsPatch, OrderItemRequest, ReconstitutedOrderParams,
};
pub use order_item::OrderItem;
