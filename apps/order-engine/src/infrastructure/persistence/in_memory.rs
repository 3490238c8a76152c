//! In-memory repository adapters.
//!
//! Backed by `RwLock<HashMap>`; suitable for development and tests.
//! Concurrent writers are serialized by the lock, and concurrent status
//! updates resolve last-write-wins.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::access::{AccessError, Role, User, UserRepository};
use crate::domain::catalog::{CatalogError, Product, ProductRepository};
use crate::domain::notifications::{Notification, NotificationError, NotificationRepository};
use crate::domain::ordering::{
    Order, OrderError, OrderFilter, OrderRepository, StatusHistoryEntry,
};
use crate::domain::production::{BatchError, BatchFilter, BatchRepository, ProductionBatch};
use crate::domain::shared::{BatchId, NotificationId, OrderId, ProductId, UserId};

/// In-memory implementation of `UserRepository`.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: &User) -> Result<(), AccessError> {
        let mut users = self.users.write().unwrap();
        let taken = users
            .values()
            .any(|u| u.telegram_id == user.telegram_id && u.id != user.id);
        if taken {
            return Err(AccessError::DuplicateTelegramId {
                telegram_id: user.telegram_id,
            });
        }
        users.insert(user.id.to_string(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AccessError> {
        let users = self.users.read().unwrap();
        Ok(users.get(id.as_str()).cloned())
    }

    async fn find_by_telegram_id(&self, telegram_id: i64) -> Result<Option<User>, AccessError> {
        let users = self.users.read().unwrap();
        Ok(users
            .values()
            .find(|u| u.telegram_id == telegram_id)
            .cloned())
    }

    async fn list_active_distributors(&self) -> Result<Vec<User>, AccessError> {
        let users = self.users.read().unwrap();
        Ok(users
            .values()
            .filter(|u| u.is_active && u.role == Role::Distributor)
            .cloned()
            .collect())
    }
}

/// In-memory implementation of `ProductRepository`.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    products: RwLock<HashMap<String, Product>>,
}

impl InMemoryProductRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            products: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn save(&self, product: &Product) -> Result<(), CatalogError> {
        let mut products = self.products.write().unwrap();
        let taken = products
            .values()
            .any(|p| p.code == product.code && p.id != product.id);
        if taken {
            return Err(CatalogError::DuplicateCode {
                code: product.code.clone(),
            });
        }
        products.insert(product.id.to_string(), product.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, CatalogError> {
        let products = self.products.read().unwrap();
        Ok(products.get(id.as_str()).cloned())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Product>, CatalogError> {
        let products = self.products.read().unwrap();
        Ok(products.values().find(|p| p.code == code).cloned())
    }

    async fn list(&self) -> Result<Vec<Product>, CatalogError> {
        let products = self.products.read().unwrap();
        let mut all: Vec<Product> = products.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn list_active(&self) -> Result<Vec<Product>, CatalogError> {
        let products = self.products.read().unwrap();
        let mut active: Vec<Product> = products
            .values()
            .filter(|p| p.is_active)
            .cloned()
            .collect();
        active.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(active)
    }
}

/// In-memory implementation of `OrderRepository`.
///
/// Orders are keyed by OrderId; history entries live in a parallel map and
/// are removed together with the order.
#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    orders: RwLock<HashMap<String, Order>>,
    history: RwLock<HashMap<String, Vec<StatusHistoryEntry>>>,
}

impl InMemoryOrderRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            orders: RwLock::new(HashMap::new()),
            history: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn save(&self, order: &Order) -> Result<(), OrderError> {
        let mut orders = self.orders.write().unwrap();
        orders.insert(order.id().to_string(), order.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, OrderError> {
        let orders = self.orders.read().unwrap();
        Ok(orders.get(id.as_str()).cloned())
    }

    async fn list(&self, filter: &OrderFilter) -> Result<Vec<Order>, OrderError> {
        let orders = self.orders.read().unwrap();
        let mut matching: Vec<Order> = orders
            .values()
            .filter(|o| {
                filter
                    .distributor_id
                    .as_ref()
                    .is_none_or(|d| o.distributor_id() == d)
            })
            .filter(|o| filter.status.is_none_or(|s| o.status() == s))
            .filter(|o| {
                filter
                    .date_range
                    .is_none_or(|(from, to)| o.order_date() >= from && o.order_date() <= to)
            })
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(matching)
    }

    async fn find_by_order_date(&self, date: NaiveDate) -> Result<Vec<Order>, OrderError> {
        let orders = self.orders.read().unwrap();
        Ok(orders
            .values()
            .filter(|o| o.order_date() == date)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: &OrderId) -> Result<(), OrderError> {
        let mut orders = self.orders.write().unwrap();
        if orders.remove(id.as_str()).is_none() {
            return Err(OrderError::NotFound {
                order_id: id.clone(),
            });
        }
        let mut history = self.history.write().unwrap();
        history.remove(id.as_str());
        Ok(())
    }

    async fn append_history(&self, entry: &StatusHistoryEntry) -> Result<(), OrderError> {
        let mut history = self.history.write().unwrap();
        history
            .entry(entry.order_id().to_string())
            .or_default()
            .push(entry.clone());
        Ok(())
    }

    async fn history_for(&self, id: &OrderId) -> Result<Vec<StatusHistoryEntry>, OrderError> {
        let history = self.history.read().unwrap();
        let mut entries = history.get(id.as_str()).cloned().unwrap_or_default();
        entries.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(entries)
    }
}

/// In-memory implementation of `NotificationRepository`.
#[derive(Debug, Default)]
pub struct InMemoryNotificationRepository {
    notifications: RwLock<HashMap<String, Notification>>,
}

impl InMemoryNotificationRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            notifications: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn save(&self, notification: &Notification) -> Result<(), NotificationError> {
        let mut notifications = self.notifications.write().unwrap();
        notifications.insert(notification.id().to_string(), notification.clone());
        Ok(())
    }

    async fn save_bulk(&self, batch: &[Notification]) -> Result<(), NotificationError> {
        let mut notifications = self.notifications.write().unwrap();
        for notification in batch {
            notifications.insert(notification.id().to_string(), notification.clone());
        }
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Notification>, NotificationError> {
        let notifications = self.notifications.read().unwrap();
        let mut inbox: Vec<Notification> = notifications
            .values()
            .filter(|n| n.recipient_id() == user_id)
            .cloned()
            .collect();
        inbox.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(inbox)
    }

    async fn mark_read(
        &self,
        user_id: &UserId,
        id: &NotificationId,
    ) -> Result<(), NotificationError> {
        let mut notifications = self.notifications.write().unwrap();
        match notifications.get_mut(id.as_str()) {
            Some(n) if n.recipient_id() == user_id => {
                n.mark_read();
                Ok(())
            }
            _ => Err(NotificationError::NotFound { id: id.clone() }),
        }
    }

    async fn mark_all_read(&self, user_id: &UserId) -> Result<(), NotificationError> {
        let mut notifications = self.notifications.write().unwrap();
        for n in notifications
            .values_mut()
            .filter(|n| n.recipient_id() == user_id)
        {
            n.mark_read();
        }
        Ok(())
    }

    async fn delete(
        &self,
        user_id: &UserId,
        id: &NotificationId,
    ) -> Result<(), NotificationError> {
        let mut notifications = self.notifications.write().unwrap();
        match notifications.get(id.as_str()) {
            Some(n) if n.recipient_id() == user_id => {
                notifications.remove(id.as_str());
                Ok(())
            }
            _ => Err(NotificationError::NotFound { id: id.clone() }),
        }
    }
}

/// In-memory implementation of `BatchRepository`.
#[derive(Debug, Default)]
pub struct InMemoryBatchRepository {
    batches: RwLock<HashMap<String, ProductionBatch>>,
}

impl InMemoryBatchRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            batches: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl BatchRepository for InMemoryBatchRepository {
    async fn save(&self, batch: &ProductionBatch) -> Result<(), BatchError> {
        let mut batches = self.batches.write().unwrap();
        batches.insert(batch.id().to_string(), batch.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &BatchId) -> Result<Option<ProductionBatch>, BatchError> {
        let batches = self.batches.read().unwrap();
        Ok(batches.get(id.as_str()).cloned())
    }

    async fn list(&self, filter: &BatchFilter) -> Result<Vec<ProductionBatch>, BatchError> {
        let batches = self.batches.read().unwrap();
        let mut matching: Vec<ProductionBatch> = batches
            .values()
            .filter(|b| filter.status.is_none_or(|s| b.status() == s))
            .filter(|b| {
                filter
                    .production_date
                    .is_none_or(|d| b.production_date() == d)
            })
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.production_date().cmp(&a.production_date()));
        Ok(matching)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::Unit;
    use crate::domain::ordering::{CreateOrderCommand, OrderItemRequest, OrderStatus};
    use crate::domain::shared::Quantity;
    use rust_decimal_macros::dec;

    fn sample_order(distributor_id: &UserId, date: NaiveDate) -> Order {
        Order::new(CreateOrderCommand {
            distributor_id: distributor_id.clone(),
            order_date: date,
            delivery_date: date,
            notes: None,
            items: vec![OrderItemRequest {
                product_id: ProductId::generate(),
                quantity: Quantity::new(dec!(5)),
            }],
        })
        .unwrap()
    }

    #[tokio::test]
    async fn duplicate_telegram_id_is_rejected() {
        let repo = InMemoryUserRepository::new();
        let first = User::pending(42, "First");
        repo.save(&first).await.unwrap();

        let second = User::pending(42, "Second");
        let err = repo.save(&second).await.unwrap_err();
        assert!(matches!(err, AccessError::DuplicateTelegramId { .. }));

        // Re-saving the same user is an update, not a conflict.
        repo.save(&first).await.unwrap();
    }

    #[tokio::test]
    async fn product_code_uniqueness() {
        let repo = InMemoryProductRepository::new();
        let product = Product::new("KLB-01", "Smoked sausage", Unit::Kg);
        repo.save(&product).await.unwrap();

        let clash = Product::new("KLB-01", "Other sausage", Unit::Kg);
        let err = repo.save(&clash).await.unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateCode { .. }));

        assert!(repo.find_by_code("KLB-01").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn list_active_products_sorted_by_name() {
        let repo = InMemoryProductRepository::new();
        let mut inactive = Product::new("A-01", "Aspic", Unit::Piece);
        inactive.is_active = false;
        repo.save(&inactive).await.unwrap();
        repo.save(&Product::new("Z-01", "Ham", Unit::Kg)).await.unwrap();
        repo.save(&Product::new("B-01", "Bacon", Unit::Kg)).await.unwrap();

        let active = repo.list_active().await.unwrap();
        let names: Vec<&str> = active.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Bacon", "Ham"]);
    }

    #[tokio::test]
    async fn order_filters_are_conjunctive() {
        let repo = InMemoryOrderRepository::new();
        let alice = UserId::generate();
        let bob = UserId::generate();
        let day = NaiveDate::from_ymd_opt(2026, 1, 24).unwrap();
        let other_day = NaiveDate::from_ymd_opt(2026, 1, 25).unwrap();

        repo.save(&sample_order(&alice, day)).await.unwrap();
        repo.save(&sample_order(&alice, other_day)).await.unwrap();
        repo.save(&sample_order(&bob, day)).await.unwrap();

        let filter = OrderFilter {
            distributor_id: Some(alice.clone()),
            status: Some(OrderStatus::Draft),
            date_range: Some((day, day)),
        };
        let matching = repo.list(&filter).await.unwrap();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].distributor_id(), &alice);

        assert_eq!(repo.find_by_order_date(day).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn delete_cascades_history() {
        let repo = InMemoryOrderRepository::new();
        let alice = UserId::generate();
        let day = NaiveDate::from_ymd_opt(2026, 1, 24).unwrap();
        let order = sample_order(&alice, day);
        repo.save(&order).await.unwrap();
        repo.append_history(&StatusHistoryEntry::new(
            order.id().clone(),
            OrderStatus::Draft,
            alice,
            None,
        ))
        .await
        .unwrap();

        repo.delete(order.id()).await.unwrap();
        assert!(repo.find_by_id(order.id()).await.unwrap().is_none());
        assert!(repo.history_for(order.id()).await.unwrap().is_empty());

        let err = repo.delete(order.id()).await.unwrap_err();
        assert!(matches!(err, OrderError::NotFound { .. }));
    }
}
