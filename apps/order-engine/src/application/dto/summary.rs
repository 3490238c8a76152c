//! Daily demand summary DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::catalog::Unit;
use crate::domain::shared::Quantity;

/// Aggregated demand for one product on one day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSummaryDto {
    /// Product SKU.
    pub product_code: String,
    /// Product display name.
    pub product_name: String,
    /// Unit the quantity is in.
    pub unit: Unit,
    /// Sum of effective quantities across all counted line items.
    pub total_quantity: Quantity,
    /// Number of line items that contributed (one order can contribute
    /// several rows for the same product).
    pub order_count: u64,
}

/// Demand summary for one production day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySummaryDto {
    /// The day summarized.
    pub date: NaiveDate,
    /// Number of non-cancelled orders for that day.
    pub total_orders: u64,
    /// Per-product rows in first-encounter order. Empty when no orders.
    pub summary: Vec<ProductSummaryDto>,
}
