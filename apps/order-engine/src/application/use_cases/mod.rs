//! Application use cases.

pub mod adjust_item;
pub mod create_order;
pub mod daily_summary;
pub mod delete_order;
pub mod notifications;
pub mod production_batches;
pub mod products;
pub mod query_orders;
pub mod update_order;
pub mod update_status;

pub use adjust_item::AdjustItemUseCase;
pub use create_order::CreateOrderUseCase;
pub use daily_summary::DailySummaryUseCase;
pub use delete_order::DeleteOrderUseCase;
pub use notifications::NotificationsUseCase;
pub use production_batches::{CreateBatchUseCase, ListBatchesUseCase, UpdateBatchUseCase};
pub use products::ProductsUseCase;
pub use query_orders::OrderQueriesUseCase;
pub use update_order::UpdateOrderUseCase;
pub use update_status::UpdateStatusUseCase;
