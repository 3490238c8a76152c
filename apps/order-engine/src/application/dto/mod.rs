//! Data transfer objects crossing the application boundary.

pub mod notification;
pub mod order;
pub mod product;
pub mod production;
pub mod summary;

pub use notification::NotificationDto;
pub use order::{
    AdjustItemDto, CreateOrderDto, CreateOrderItemDto, OrderDto, OrderItemDto, StatusHistoryDto,
    UpdateOrderDto, UpdateStatusDto,
};
pub use product::{CreateProductDto, ProductDto, UpdateProductDto};
pub use production::{
    BatchActualDto, BatchDto, BatchItemDto, CreateBatchDto, CreateBatchItemDto, UpdateBatchDto,
};
pub use summary::{DailySummaryDto, ProductSummaryDto};
