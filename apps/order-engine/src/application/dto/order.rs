//! Order DTOs.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::ordering::{Order, OrderItem, OrderStatus, StatusHistoryEntry};
use crate::domain::shared::{OrderId, OrderItemId, ProductId, Quantity, UserId};

/// One requested line item in a create request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderItemDto {
    /// Product to order.
    pub product_id: ProductId,
    /// Requested quantity.
    pub quantity: Quantity,
}

/// Request body for order creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderDto {
    /// Distributor the order is for. Ignored for distributor callers (their
    /// own id is used); required for staff callers.
    #[serde(default)]
    pub distributor_id: Option<UserId>,
    /// Business date of the order.
    pub order_date: NaiveDate,
    /// Requested delivery date.
    pub delivery_date: NaiveDate,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Requested line items.
    pub items: Vec<CreateOrderItemDto>,
}

/// Request body for order-details update. Absent fields stay unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateOrderDto {
    /// New business date.
    #[serde(default)]
    pub order_date: Option<NaiveDate>,
    /// New delivery date.
    #[serde(default)]
    pub delivery_date: Option<NaiveDate>,
    /// New notes value. Present-but-null clears the notes.
    #[serde(default, with = "double_option")]
    pub notes: Option<Option<String>>,
}

/// Request body for a status change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusDto {
    /// Status to record.
    pub status: OrderStatus,
    /// Optional notes for the history entry.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Request body for a line-item quantity adjustment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustItemDto {
    /// Corrected quantity.
    pub adjusted_quantity: Quantity,
    /// Reason for the correction. Required.
    pub reason: String,
}

/// One line item in an order response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemDto {
    /// Line item id.
    pub id: OrderItemId,
    /// Product being ordered.
    pub product_id: ProductId,
    /// Originally requested quantity.
    pub quantity: Quantity,
    /// Copy of the request taken at creation.
    pub original_quantity: Quantity,
    /// Producer correction, if any.
    pub adjusted_quantity: Option<Quantity>,
    /// Reason recorded with the correction.
    pub adjustment_reason: Option<String>,
    /// The quantity that counts for production.
    pub effective_quantity: Quantity,
    /// Unit price (always zero).
    pub unit_price: Decimal,
    /// Total price (always zero).
    pub total_price: Decimal,
}

impl OrderItemDto {
    /// Build from a domain line item.
    #[must_use]
    pub fn from_item(item: &OrderItem) -> Self {
        Self {
            id: item.id().clone(),
            product_id: item.product_id().clone(),
            quantity: item.quantity(),
            original_quantity: item.original_quantity(),
            adjusted_quantity: item.adjusted_quantity(),
            adjustment_reason: item.adjustment_reason().map(ToString::to_string),
            effective_quantity: item.effective_quantity(),
            unit_price: item.unit_price(),
            total_price: item.total_price(),
        }
    }
}

/// Order representation returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDto {
    /// Order id.
    pub id: OrderId,
    /// Human-facing order number.
    pub order_number: String,
    /// Distributor who placed the order.
    pub distributor_id: UserId,
    /// Business date of the order.
    pub order_date: NaiveDate,
    /// Requested delivery date.
    pub delivery_date: NaiveDate,
    /// Current lifecycle status.
    pub status: OrderStatus,
    /// Order total (always zero).
    pub total_amount: Decimal,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Line items.
    pub items: Vec<OrderItemDto>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl OrderDto {
    /// Build from a domain order.
    #[must_use]
    pub fn from_order(order: &Order) -> Self {
        Self {
            id: order.id().clone(),
            order_number: order.order_number().as_str().to_string(),
            distributor_id: order.distributor_id().clone(),
            order_date: order.order_date(),
            delivery_date: order.delivery_date(),
            status: order.status(),
            total_amount: order.total_amount(),
            notes: order.notes().map(ToString::to_string),
            items: order.items().iter().map(OrderItemDto::from_item).collect(),
            created_at: order.created_at(),
            updated_at: order.updated_at(),
        }
    }
}

/// One row of an order's status history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusHistoryDto {
    /// Status the order entered.
    pub status: OrderStatus,
    /// User who made the change.
    pub changed_by: UserId,
    /// Optional notes.
    pub notes: Option<String>,
    /// When the change was recorded.
    pub created_at: DateTime<Utc>,
}

impl StatusHistoryDto {
    /// Build from a domain history entry.
    #[must_use]
    pub fn from_entry(entry: &StatusHistoryEntry) -> Self {
        Self {
            status: entry.status(),
            changed_by: entry.changed_by().clone(),
            notes: entry.notes().map(ToString::to_string),
            created_at: entry.created_at(),
        }
    }
}

/// Serde helper distinguishing an absent field from an explicit null.
mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<T, S>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}
