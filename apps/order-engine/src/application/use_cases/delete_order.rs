//! Delete Order Use Case

use std::sync::Arc;

use crate::application::errors::AppError;
use crate::domain::access::{capabilities, User};
use crate::domain::ordering::{OrderError, OrderRepository};
use crate::domain::shared::OrderId;

/// Use case for deleting a DRAFT order.
pub struct DeleteOrderUseCase<O>
where
    O: OrderRepository,
{
    order_repo: Arc<O>,
}

impl<O> DeleteOrderUseCase<O>
where
    O: OrderRepository,
{
    /// Create a new DeleteOrderUseCase.
    pub fn new(order_repo: Arc<O>) -> Self {
        Self { order_repo }
    }

    /// Execute the use case.
    ///
    /// Deleting removes the order together with its items and history.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing order, `Authorization` when a
    /// distributor deletes someone else's order, and `Validation` for any
    /// status other than DRAFT.
    pub async fn execute(&self, actor: &User, order_id: &OrderId) -> Result<(), AppError> {
        let order = self
            .order_repo
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| OrderError::NotFound {
                order_id: order_id.clone(),
            })?;

        let is_owner = order.distributor_id() == &actor.id;
        if !capabilities::can_delete_order(actor.role, is_owner) {
            return Err(AppError::Authorization(
                "You can only delete your own orders".to_string(),
            ));
        }

        order.ensure_deletable()?;
        self.order_repo.delete(order_id).await?;

        tracing::info!(order_id = %order_id, deleted_by = %actor.id, "order deleted");
        Ok(())
    }
}
