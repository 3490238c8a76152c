//! Value objects for the ordering context.

pub mod order_number;
pub mod order_status;
pub mod status_history;

pub use order_number::{BatchNumber, OrderNumber};
pub use order_status::OrderStatus;
pub use status_history::StatusHistoryEntry;
