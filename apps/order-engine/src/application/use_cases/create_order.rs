//! Create Order Use Case

use std::sync::Arc;

use crate::application::dto::{CreateOrderDto, OrderDto};
use crate::application::errors::AppError;
use crate::domain::access::{Role, User};
use crate::domain::ordering::{
    CreateOrderCommand, Order, OrderItemRequest, OrderRepository, StatusHistoryEntry,
};
use crate::domain::shared::UserId;

/// Use case for creating a new order in DRAFT status.
pub struct CreateOrderUseCase<O>
where
    O: OrderRepository,
{
    order_repo: Arc<O>,
}

impl<O> CreateOrderUseCase<O>
where
    O: OrderRepository,
{
    /// Create a new CreateOrderUseCase.
    pub fn new(order_repo: Arc<O>) -> Self {
        Self { order_repo }
    }

    /// Execute the use case.
    ///
    /// Distributor callers always order for themselves; staff callers must
    /// name the distributor. Validation happens before anything is
    /// persisted. No notification is sent on creation.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for empty items, non-positive quantities, or a
    /// staff request without a distributor id.
    pub async fn execute(&self, actor: &User, dto: CreateOrderDto) -> Result<OrderDto, AppError> {
        let distributor_id = self.resolve_distributor(actor, dto.distributor_id)?;

        let command = CreateOrderCommand {
            distributor_id,
            order_date: dto.order_date,
            delivery_date: dto.delivery_date,
            notes: dto.notes,
            items: dto
                .items
                .into_iter()
                .map(|item| OrderItemRequest {
                    product_id: item.product_id,
                    quantity: item.quantity,
                })
                .collect(),
        };

        let order = Order::new(command)?;
        self.order_repo.save(&order).await?;

        let entry = StatusHistoryEntry::new(
            order.id().clone(),
            order.status(),
            actor.id.clone(),
            Some("Order created".to_string()),
        );
        self.order_repo.append_history(&entry).await?;

        tracing::info!(
            order_id = %order.id(),
            order_number = %order.order_number(),
            distributor_id = %order.distributor_id(),
            "order created"
        );

        Ok(OrderDto::from_order(&order))
    }

    fn resolve_distributor(
        &self,
        actor: &User,
        requested: Option<UserId>,
    ) -> Result<UserId, AppError> {
        match actor.role {
            Role::Distributor => Ok(actor.id.clone()),
            Role::Producer | Role::Admin => requested.ok_or_else(|| {
                AppError::Validation(
                    "distributor_id is required when ordering on behalf of a distributor"
                        .to_string(),
                )
            }),
        }
    }
}
