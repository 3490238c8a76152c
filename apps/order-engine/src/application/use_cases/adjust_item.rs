//! Adjust Item Use Case

use std::sync::Arc;

use crate::application::dto::{AdjustItemDto, OrderDto};
use crate::application::errors::AppError;
use crate::application::notifier::Notifier;
use crate::domain::access::{capabilities, User, UserRepository};
use crate::domain::catalog::ProductRepository;
use crate::domain::notifications::{NotificationRepository, NotificationType};
use crate::domain::ordering::{OrderError, OrderRepository};
use crate::domain::shared::{OrderId, OrderItemId, ProductId};

/// Use case for producer corrections to order line quantities, including
/// line removal. Each successful change sends one best-effort ORDER_CHANGE
/// notification to the order's distributor.
pub struct AdjustItemUseCase<O, P, N, U>
where
    O: OrderRepository,
    P: ProductRepository,
    N: NotificationRepository,
    U: UserRepository,
{
    order_repo: Arc<O>,
    product_repo: Arc<P>,
    notifier: Arc<Notifier<N, U>>,
}

impl<O, P, N, U> AdjustItemUseCase<O, P, N, U>
where
    O: OrderRepository,
    P: ProductRepository,
    N: NotificationRepository,
    U: UserRepository,
{
    /// Create a new AdjustItemUseCase.
    pub fn new(order_repo: Arc<O>, product_repo: Arc<P>, notifier: Arc<Notifier<N, U>>) -> Self {
        Self {
            order_repo,
            product_repo,
            notifier,
        }
    }

    /// Record a corrected quantity for one line.
    ///
    /// The original request is preserved; only the effective quantity
    /// changes.
    ///
    /// # Errors
    ///
    /// Returns `Authorization` for non-staff callers, `NotFound` for a
    /// missing order or line, and `Validation` for a non-positive quantity
    /// or an empty reason.
    pub async fn execute(
        &self,
        actor: &User,
        order_id: &OrderId,
        item_id: &OrderItemId,
        dto: AdjustItemDto,
    ) -> Result<OrderDto, AppError> {
        if !capabilities::can_adjust_items(actor.role) {
            return Err(AppError::Authorization(
                "Only producers and admins can adjust order items".to_string(),
            ));
        }

        let mut order = self.load_order(order_id).await?;
        let previous = order.adjust_item(item_id, dto.adjusted_quantity, &dto.reason)?;
        self.order_repo.save(&order).await?;

        let item = order
            .items()
            .iter()
            .find(|item| item.id() == item_id)
            .ok_or_else(|| OrderError::ItemNotFound {
                item_id: item_id.clone(),
            })?;
        let product_name = self.product_name(item.product_id()).await;

        tracing::info!(
            order_id = %order_id,
            item_id = %item_id,
            previous = %previous,
            adjusted = %dto.adjusted_quantity,
            "order item adjusted"
        );

        self.notifier
            .notify(
                order.distributor_id(),
                NotificationType::OrderChange,
                "Order quantity adjusted",
                &format!(
                    "Order {}, {}: {} -> {}. Reason: {}",
                    order.order_number(),
                    product_name,
                    previous,
                    dto.adjusted_quantity,
                    dto.reason.trim()
                ),
                Some(("order", order.id().as_str())),
            )
            .await;

        Ok(OrderDto::from_order(&order))
    }

    /// Remove one line from the order.
    ///
    /// # Errors
    ///
    /// Returns `Authorization` for non-staff callers, `NotFound` for a
    /// missing order or line, and `Validation` when the line is the last
    /// one on the order.
    pub async fn remove(
        &self,
        actor: &User,
        order_id: &OrderId,
        item_id: &OrderItemId,
    ) -> Result<OrderDto, AppError> {
        if !capabilities::can_adjust_items(actor.role) {
            return Err(AppError::Authorization(
                "Only producers and admins can adjust order items".to_string(),
            ));
        }

        let mut order = self.load_order(order_id).await?;
        let product_id = order
            .items()
            .iter()
            .find(|item| item.id() == item_id)
            .map(|item| item.product_id().clone());

        order.remove_item(item_id)?;
        self.order_repo.save(&order).await?;

        let product_name = match product_id {
            Some(id) => self.product_name(&id).await,
            None => item_id.to_string(),
        };

        tracing::info!(order_id = %order_id, item_id = %item_id, "order item removed");

        self.notifier
            .notify(
                order.distributor_id(),
                NotificationType::OrderChange,
                "Order item removed",
                &format!(
                    "Order {}: {} was removed from the order",
                    order.order_number(),
                    product_name
                ),
                Some(("order", order.id().as_str())),
            )
            .await;

        Ok(OrderDto::from_order(&order))
    }

    async fn load_order(
        &self,
        order_id: &OrderId,
    ) -> Result<crate::domain::ordering::Order, AppError> {
        Ok(self
            .order_repo
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| OrderError::NotFound {
                order_id: order_id.clone(),
            })?)
    }

    /// Resolve a display name for the notification text, falling back to
    /// the raw id when the product is gone.
    async fn product_name(&self, product_id: &ProductId) -> String {
        match self.product_repo.find_by_id(product_id).await {
            Ok(Some(product)) => product.name,
            Ok(None) => product_id.to_string(),
            Err(e) => {
                tracing::warn!(product_id = %product_id, error = %e, "product lookup failed");
                product_id.to_string()
            }
        }
    }
}
