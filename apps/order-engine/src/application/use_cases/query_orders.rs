//! Order Query Use Cases

use std::sync::Arc;

use crate::application::dto::{OrderDto, OrderItemDto, StatusHistoryDto};
use crate::application::errors::AppError;
use crate::domain::access::{capabilities, Role, User};
use crate::domain::ordering::{Order, OrderError, OrderFilter, OrderRepository};
use crate::domain::shared::OrderId;

/// Read-side use case for orders.
///
/// Distributors are silently narrowed to their own orders on list and get a
/// 403 on direct access to someone else's order.
pub struct OrderQueriesUseCase<O>
where
    O: OrderRepository,
{
    order_repo: Arc<O>,
}

impl<O> OrderQueriesUseCase<O>
where
    O: OrderRepository,
{
    /// Create a new OrderQueriesUseCase.
    pub fn new(order_repo: Arc<O>) -> Self {
        Self { order_repo }
    }

    /// List orders matching the filter, newest first.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    pub async fn list(&self, actor: &User, mut filter: OrderFilter) -> Result<Vec<OrderDto>, AppError> {
        if actor.role == Role::Distributor {
            filter.distributor_id = Some(actor.id.clone());
        }
        let orders = self.order_repo.list(&filter).await?;
        Ok(orders.iter().map(OrderDto::from_order).collect())
    }

    /// Load one order.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing order and `Authorization` when a
    /// distributor reads someone else's order.
    pub async fn get(&self, actor: &User, order_id: &OrderId) -> Result<OrderDto, AppError> {
        let order = self.load_visible(actor, order_id).await?;
        Ok(OrderDto::from_order(&order))
    }

    /// Load one order's line items.
    ///
    /// # Errors
    ///
    /// Same visibility rules as `get`.
    pub async fn items(
        &self,
        actor: &User,
        order_id: &OrderId,
    ) -> Result<Vec<OrderItemDto>, AppError> {
        let order = self.load_visible(actor, order_id).await?;
        Ok(order.items().iter().map(OrderItemDto::from_item).collect())
    }

    /// Load one order's status history, newest first.
    ///
    /// # Errors
    ///
    /// Same visibility rules as `get`.
    pub async fn history(
        &self,
        actor: &User,
        order_id: &OrderId,
    ) -> Result<Vec<StatusHistoryDto>, AppError> {
        self.load_visible(actor, order_id).await?;
        let history = self.order_repo.history_for(order_id).await?;
        Ok(history.iter().map(StatusHistoryDto::from_entry).collect())
    }

    async fn load_visible(&self, actor: &User, order_id: &OrderId) -> Result<Order, AppError> {
        let order = self
            .order_repo
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| OrderError::NotFound {
                order_id: order_id.clone(),
            })?;

        let is_owner = order.distributor_id() == &actor.id;
        if !capabilities::can_view_order(actor.role, is_owner) {
            return Err(AppError::Authorization(
                "You can only view your own orders".to_string(),
            ));
        }
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::{CreateOrderDto, CreateOrderItemDto};
    use crate::application::use_cases::create_order::CreateOrderUseCase;
    use crate::domain::shared::{ProductId, Quantity};
    use crate::infrastructure::persistence::in_memory::InMemoryOrderRepository;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn distributor(telegram_id: i64) -> User {
        let mut user = User::pending(telegram_id, "Distributor");
        user.activate();
        user
    }

    fn producer() -> User {
        let mut user = User::pending(200, "Producer");
        user.role = Role::Producer;
        user.activate();
        user
    }

    async fn seed_order(repo: &Arc<InMemoryOrderRepository>, owner: &User) -> OrderDto {
        let create = CreateOrderUseCase::new(Arc::clone(repo));
        create
            .execute(
                owner,
                CreateOrderDto {
                    distributor_id: None,
                    order_date: NaiveDate::from_ymd_opt(2026, 1, 24).unwrap(),
                    delivery_date: NaiveDate::from_ymd_opt(2026, 1, 25).unwrap(),
                    notes: None,
                    items: vec![CreateOrderItemDto {
                        product_id: ProductId::generate(),
                        quantity: Quantity::new(dec!(5)),
                    }],
                },
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn distributor_list_is_narrowed_to_own_orders() {
        let repo = Arc::new(InMemoryOrderRepository::new());
        let alice = distributor(100);
        let bob = distributor(101);
        seed_order(&repo, &alice).await;
        seed_order(&repo, &bob).await;

        let queries = OrderQueriesUseCase::new(Arc::clone(&repo));
        let mine = queries.list(&alice, OrderFilter::default()).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].distributor_id, alice.id);

        let all = queries.list(&producer(), OrderFilter::default()).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn foreign_order_get_is_forbidden() {
        let repo = Arc::new(InMemoryOrderRepository::new());
        let alice = distributor(100);
        let bob = distributor(101);
        let order = seed_order(&repo, &alice).await;

        let queries = OrderQueriesUseCase::new(repo);
        let err = queries.get(&bob, &order.id).await.unwrap_err();
        assert!(matches!(err, AppError::Authorization(_)));

        let err = queries.get(&bob, &OrderId::generate()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn history_is_newest_first() {
        let repo = Arc::new(InMemoryOrderRepository::new());
        let alice = distributor(100);
        let order = seed_order(&repo, &alice).await;

        let queries = OrderQueriesUseCase::new(repo);
        let history = queries.history(&alice, &order.id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].changed_by, alice.id);
    }
}
