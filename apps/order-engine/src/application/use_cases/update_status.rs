//! Update Status Use Case

use std::sync::Arc;

use crate::application::dto::{OrderDto, UpdateStatusDto};
use crate::application::errors::AppError;
use crate::application::notifier::Notifier;
use crate::domain::access::{capabilities, User, UserRepository};
use crate::domain::notifications::{NotificationRepository, NotificationType};
use crate::domain::ordering::{OrderError, OrderRepository, StatusHistoryEntry};
use crate::domain::shared::OrderId;

/// Use case for recording an order status change.
///
/// The status write and its history row are the primary operation; the
/// distributor notification afterwards is best-effort and never fails the
/// request.
pub struct UpdateStatusUseCase<O, N, U>
where
    O: OrderRepository,
    N: NotificationRepository,
    U: UserRepository,
{
    order_repo: Arc<O>,
    notifier: Arc<Notifier<N, U>>,
}

impl<O, N, U> UpdateStatusUseCase<O, N, U>
where
    O: OrderRepository,
    N: NotificationRepository,
    U: UserRepository,
{
    /// Create a new UpdateStatusUseCase.
    pub fn new(order_repo: Arc<O>, notifier: Arc<Notifier<N, U>>) -> Self {
        Self {
            order_repo,
            notifier,
        }
    }

    /// Execute the use case.
    ///
    /// Any status may follow any status. Appends exactly one history row
    /// and attempts exactly one notification.
    ///
    /// # Errors
    ///
    /// Returns `Authorization` for non-staff callers and `NotFound` for a
    /// missing order.
    pub async fn execute(
        &self,
        actor: &User,
        order_id: &OrderId,
        dto: UpdateStatusDto,
    ) -> Result<OrderDto, AppError> {
        if !capabilities::can_update_status(actor.role) {
            return Err(AppError::Authorization(
                "Only producers and admins can change order status".to_string(),
            ));
        }

        let mut order = self
            .order_repo
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| OrderError::NotFound {
                order_id: order_id.clone(),
            })?;

        let old_status = order.status();
        order.set_status(dto.status);
        self.order_repo.save(&order).await?;

        let entry = StatusHistoryEntry::new(
            order.id().clone(),
            dto.status,
            actor.id.clone(),
            dto.notes,
        );
        self.order_repo.append_history(&entry).await?;

        tracing::info!(
            order_id = %order.id(),
            old_status = %old_status,
            new_status = %dto.status,
            changed_by = %actor.id,
            "order status changed"
        );

        self.notifier
            .notify(
                order.distributor_id(),
                NotificationType::OrderStatus,
                "Order status updated",
                &format!(
                    "Order {}: {} -> {}",
                    order.order_number(),
                    old_status,
                    dto.status
                ),
                Some(("order", order.id().as_str())),
            )
            .await;

        Ok(OrderDto::from_order(&order))
    }
}
