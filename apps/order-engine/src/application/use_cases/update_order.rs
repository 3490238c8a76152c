//! Update Order Use Case

use std::sync::Arc;

use crate::application::dto::{OrderDto, UpdateOrderDto};
use crate::application::errors::AppError;
use crate::domain::access::{capabilities, Role, User};
use crate::domain::ordering::{OrderDetailsPatch, OrderError, OrderRepository};
use crate::domain::shared::OrderId;

/// Use case for patching an order's details (dates, notes).
pub struct UpdateOrderUseCase<O>
where
    O: OrderRepository,
{
    order_repo: Arc<O>,
}

impl<O> UpdateOrderUseCase<O>
where
    O: OrderRepository,
{
    /// Create a new UpdateOrderUseCase.
    pub fn new(order_repo: Arc<O>) -> Self {
        Self { order_repo }
    }

    /// Execute the use case.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing order, `Authorization` when a
    /// distributor touches someone else's order, and `Validation` when a
    /// distributor edits past the SUBMITTED stage.
    pub async fn execute(
        &self,
        actor: &User,
        order_id: &OrderId,
        dto: UpdateOrderDto,
    ) -> Result<OrderDto, AppError> {
        let mut order = self
            .order_repo
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| OrderError::NotFound {
                order_id: order_id.clone(),
            })?;

        let is_owner = order.distributor_id() == &actor.id;
        if actor.role == Role::Distributor && !is_owner {
            return Err(AppError::Authorization(
                "You can only edit your own orders".to_string(),
            ));
        }
        if !capabilities::can_edit_order(actor.role, is_owner, order.status()) {
            return Err(AppError::Validation(format!(
                "Order can no longer be edited in status {}",
                order.status()
            )));
        }

        order.update_details(OrderDetailsPatch {
            order_date: dto.order_date,
            delivery_date: dto.delivery_date,
            notes: dto.notes,
        });
        self.order_repo.save(&order).await?;

        Ok(OrderDto::from_order(&order))
    }
}
