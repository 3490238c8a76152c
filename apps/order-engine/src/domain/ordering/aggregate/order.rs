//! Order Aggregate Root
//!
//! The Order aggregate manages the lifecycle of a distributor order, from
//! DRAFT through delivery, including producer quantity adjustments.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::OrderItem;
use crate::domain::ordering::errors::OrderError;
use crate::domain::ordering::value_objects::{OrderNumber, OrderStatus};
use crate::domain::shared::{OrderId, OrderItemId, ProductId, Quantity, UserId};

/// Parameters for reconstituting an Order from storage.
///
/// Used by repositories to rebuild aggregates from persisted state.
/// No validation is performed during reconstitution.
#[derive(Debug, Clone)]
pub struct ReconstitutedOrderParams {
    /// Order identifier.
    pub id: OrderId,
    /// Human-facing order number.
    pub order_number: OrderNumber,
    /// Distributor who placed the order.
    pub distributor_id: UserId,
    /// Business date of the order.
    pub order_date: NaiveDate,
    /// Requested delivery date.
    pub delivery_date: NaiveDate,
    /// Current lifecycle status.
    pub status: OrderStatus,
    /// Order total (always zero, pricing unimplemented).
    pub total_amount: Decimal,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Line items.
    pub items: Vec<OrderItem>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// One requested line in a create command.
#[derive(Debug, Clone)]
pub struct OrderItemRequest {
    /// Product to order.
    pub product_id: ProductId,
    /// Requested quantity.
    pub quantity: Quantity,
}

/// Command to create a new order.
#[derive(Debug, Clone)]
pub struct CreateOrderCommand {
    /// Distributor placing the order.
    pub distributor_id: UserId,
    /// Business date of the order.
    pub order_date: NaiveDate,
    /// Requested delivery date.
    pub delivery_date: NaiveDate,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Requested line items.
    pub items: Vec<OrderItemRequest>,
}

impl CreateOrderCommand {
    /// Validate the command parameters.
    ///
    /// # Errors
    ///
    /// Returns `EmptyItems` when no line items were given, or
    /// `InvalidQuantity` when any line carries a non-positive quantity.
    pub fn validate(&self) -> Result<(), OrderError> {
        if self.items.is_empty() {
            return Err(OrderError::EmptyItems);
        }

        for item in &self.items {
            if !item.quantity.is_positive() {
                return Err(OrderError::InvalidQuantity {
                    quantity: item.quantity.to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Patch applied by the order-details update operation.
///
/// Absent fields leave the current value untouched. `notes` uses a double
/// Option so the caller can distinguish "leave as is" from "clear".
#[derive(Debug, Clone, Default)]
pub struct OrderDetailsPatch {
    /// New business date.
    pub order_date: Option<NaiveDate>,
    /// New delivery date.
    pub delivery_date: Option<NaiveDate>,
    /// New notes value, `Some(None)` clears them.
    pub notes: Option<Option<String>>,
}

/// Order Aggregate Root.
///
/// The distributor id is fixed at creation. Status changes are recorded
/// unconditionally; the lifecycle graph is advisory, not enforced. The one
/// structural invariant is that a persisted order always carries at least
/// one line item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    order_number: OrderNumber,
    distributor_id: UserId,
    order_date: NaiveDate,
    delivery_date: NaiveDate,
    status: OrderStatus,
    total_amount: Decimal,
    notes: Option<String>,
    items: Vec<OrderItem>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Order {
    /// Create a new order in DRAFT status from a command.
    ///
    /// # Errors
    ///
    /// Returns error if command validation fails.
    pub fn new(cmd: CreateOrderCommand) -> Result<Self, OrderError> {
        cmd.validate()?;

        let now = Utc::now();
        let items = cmd
            .items
            .into_iter()
            .map(|req| OrderItem::new(req.product_id, req.quantity))
            .collect();

        Ok(Self {
            id: OrderId::generate(),
            order_number: OrderNumber::generate(cmd.order_date),
            distributor_id: cmd.distributor_id,
            order_date: cmd.order_date,
            delivery_date: cmd.delivery_date,
            status: OrderStatus::Draft,
            total_amount: Decimal::ZERO,
            notes: cmd.notes,
            items,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute an order from persisted state.
    #[must_use]
    pub fn reconstitute(params: ReconstitutedOrderParams) -> Self {
        Self {
            id: params.id,
            order_number: params.order_number,
            distributor_id: params.distributor_id,
            order_date: params.order_date,
            delivery_date: params.delivery_date,
            status: params.status,
            total_amount: params.total_amount,
            notes: params.notes,
            items: params.items,
            created_at: params.created_at,
            updated_at: params.updated_at,
        }
    }

    /// Order identifier.
    #[must_use]
    pub const fn id(&self) -> &OrderId {
        &self.id
    }

    /// Human-facing order number.
    #[must_use]
    pub const fn order_number(&self) -> &OrderNumber {
        &self.order_number
    }

    /// Distributor who placed the order.
    #[must_use]
    pub const fn distributor_id(&self) -> &UserId {
        &self.distributor_id
    }

    /// Business date of the order.
    #[must_use]
    pub const fn order_date(&self) -> NaiveDate {
        self.order_date
    }

    /// Requested delivery date.
    #[must_use]
    pub const fn delivery_date(&self) -> NaiveDate {
        self.delivery_date
    }

    /// Current lifecycle status.
    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        self.status
    }

    /// Order total (always zero, pricing unimplemented).
    #[must_use]
    pub const fn total_amount(&self) -> Decimal {
        self.total_amount
    }

    /// Free-form notes.
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Line items.
    #[must_use]
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Record a status change. Any status may follow any status; the caller
    /// is responsible for appending the matching history entry.
    pub fn set_status(&mut self, new_status: OrderStatus) {
        self.status = new_status;
        self.touch();
    }

    /// Apply a details patch (dates, notes).
    pub fn update_details(&mut self, patch: OrderDetailsPatch) {
        if let Some(order_date) = patch.order_date {
            self.order_date = order_date;
        }
        if let Some(delivery_date) = patch.delivery_date {
            self.delivery_date = delivery_date;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        self.touch();
    }

    /// Adjust a line item's quantity, recording the reason.
    ///
    /// Returns the item's previous effective quantity so callers can phrase
    /// the change notification.
    ///
    /// # Errors
    ///
    /// Returns `InvalidQuantity` for a non-positive adjustment,
    /// `AdjustmentReasonRequired` when the reason is empty, and
    /// `ItemNotFound` when the item is not on this order.
    pub fn adjust_item(
        &mut self,
        item_id: &OrderItemId,
        adjusted_quantity: Quantity,
        reason: &str,
    ) -> Result<Quantity, OrderError> {
        if !adjusted_quantity.is_positive() {
            return Err(OrderError::InvalidQuantity {
                quantity: adjusted_quantity.to_string(),
            });
        }
        if reason.trim().is_empty() {
            return Err(OrderError::AdjustmentReasonRequired);
        }

        let item = self
            .items
            .iter_mut()
            .find(|item| item.id() == item_id)
            .ok_or_else(|| OrderError::ItemNotFound {
                item_id: item_id.clone(),
            })?;

        let previous = item.effective_quantity();
        item.apply_adjustment(adjusted_quantity, reason.trim().to_string());
        self.touch();

        Ok(previous)
    }

    /// Remove a line item.
    ///
    /// # Errors
    ///
    /// Returns `LastItem` when the item is the only one left, and
    /// `ItemNotFound` when the item is not on this order.
    pub fn remove_item(&mut self, item_id: &OrderItemId) -> Result<(), OrderError> {
        let index = self
            .items
            .iter()
            .position(|item| item.id() == item_id)
            .ok_or_else(|| OrderError::ItemNotFound {
                item_id: item_id.clone(),
            })?;

        if self.items.len() == 1 {
            return Err(OrderError::LastItem);
        }

        self.items.remove(index);
        self.touch();
        Ok(())
    }

    /// Check that the order may be deleted.
    ///
    /// # Errors
    ///
    /// Returns `NotDraft` for any status other than DRAFT.
    pub fn ensure_deletable(&self) -> Result<(), OrderError> {
        if self.status.is_draft() {
            Ok(())
        } else {
            Err(OrderError::NotDraft {
                status: self.status,
            })
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
