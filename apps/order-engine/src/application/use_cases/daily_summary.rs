//! Daily Summary Use Case

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::application::dto::{DailySummaryDto, ProductSummaryDto};
use crate::application::errors::AppError;
use crate::domain::catalog::ProductRepository;
use crate::domain::ordering::OrderRepository;

/// Use case for aggregating one day's demand per product.
///
/// Cancelled orders are excluded. Only effective quantities are read, so
/// producer adjustments flow straight into the production plan. A day with
/// no orders yields an empty summary, not an error.
pub struct DailySummaryUseCase<O, P>
where
    O: OrderRepository,
    P: ProductRepository,
{
    order_repo: Arc<O>,
    product_repo: Arc<P>,
}

impl<O, P> DailySummaryUseCase<O, P>
where
    O: OrderRepository,
    P: ProductRepository,
{
    /// Create a new DailySummaryUseCase.
    pub fn new(order_repo: Arc<O>, product_repo: Arc<P>) -> Self {
        Self {
            order_repo,
            product_repo,
        }
    }

    /// Execute the use case.
    ///
    /// `order_count` increments once per contributing line item, so an
    /// order listing the same product twice counts twice.
    ///
    /// # Errors
    ///
    /// Returns error if orders cannot be loaded.
    pub async fn execute(&self, date: NaiveDate) -> Result<DailySummaryDto, AppError> {
        let orders = self.order_repo.find_by_order_date(date).await?;

        let mut rows: Vec<ProductSummaryDto> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut total_orders: u64 = 0;

        for order in &orders {
            if order.status().is_cancelled() {
                continue;
            }
            total_orders += 1;

            for item in order.items() {
                let product = match self.product_repo.find_by_id(item.product_id()).await? {
                    Some(product) => product,
                    None => {
                        tracing::warn!(
                            product_id = %item.product_id(),
                            order_id = %order.id(),
                            "product missing during aggregation, line skipped"
                        );
                        continue;
                    }
                };

                match index.get(&product.code) {
                    Some(&i) => {
                        rows[i].total_quantity += item.effective_quantity();
                        rows[i].order_count += 1;
                    }
                    None => {
                        index.insert(product.code.clone(), rows.len());
                        rows.push(ProductSummaryDto {
                            product_code: product.code,
                            product_name: product.name,
                            unit: product.unit,
                            total_quantity: item.effective_quantity(),
                            order_count: 1,
                        });
                    }
                }
            }
        }

        Ok(DailySummaryDto {
            date,
            total_orders,
            summary: rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::{CreateOrderDto, CreateOrderItemDto};
    use crate::application::use_cases::create_order::CreateOrderUseCase;
    use crate::domain::access::User;
    use crate::domain::catalog::{Product, Unit};
    use crate::domain::ordering::OrderStatus;
    use crate::domain::shared::{ProductId, Quantity};
    use crate::infrastructure::persistence::in_memory::{
        InMemoryOrderRepository, InMemoryProductRepository,
    };
    use rust_decimal_macros::dec;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 24).unwrap()
    }

    fn distributor(telegram_id: i64) -> User {
        let mut user = User::pending(telegram_id, "Distributor");
        user.activate();
        user
    }

    struct Fixture {
        order_repo: Arc<InMemoryOrderRepository>,
        product_repo: Arc<InMemoryProductRepository>,
        use_case: DailySummaryUseCase<InMemoryOrderRepository, InMemoryProductRepository>,
    }

    fn fixture() -> Fixture {
        let order_repo = Arc::new(InMemoryOrderRepository::new());
        let product_repo = Arc::new(InMemoryProductRepository::new());
        let use_case =
            DailySummaryUseCase::new(Arc::clone(&order_repo), Arc::clone(&product_repo));
        Fixture {
            order_repo,
            product_repo,
            use_case,
        }
    }

    async fn seed_product(f: &Fixture, code: &str, name: &str) -> Product {
        let product = Product::new(code, name, Unit::Kg);
        f.product_repo.save(&product).await.unwrap();
        product
    }

    async fn seed_order(
        f: &Fixture,
        owner: &User,
        items: Vec<(ProductId, rust_decimal::Decimal)>,
    ) -> crate::application::dto::OrderDto {
        let create = CreateOrderUseCase::new(Arc::clone(&f.order_repo));
        create
            .execute(
                owner,
                CreateOrderDto {
                    distributor_id: None,
                    order_date: day(),
                    delivery_date: day(),
                    notes: None,
                    items: items
                        .into_iter()
                        .map(|(product_id, quantity)| CreateOrderItemDto {
                            product_id,
                            quantity: Quantity::new(quantity),
                        })
                        .collect(),
                },
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn empty_day_yields_zero_struct() {
        let f = fixture();
        let summary = f.use_case.execute(day()).await.unwrap();
        assert_eq!(summary.total_orders, 0);
        assert!(summary.summary.is_empty());
    }

    #[tokio::test]
    async fn two_orders_accumulate_per_product() {
        let f = fixture();
        let sausage = seed_product(&f, "KLB-01", "Smoked sausage").await;
        let ham = seed_product(&f, "VET-01", "Ham").await;

        let a = distributor(100);
        let b = distributor(101);
        seed_order(&f, &a, vec![(sausage.id.clone(), dec!(10))]).await;
        seed_order(
            &f,
            &b,
            vec![(sausage.id.clone(), dec!(5)), (ham.id.clone(), dec!(4))],
        )
        .await;

        let summary = f.use_case.execute(day()).await.unwrap();
        assert_eq!(summary.total_orders, 2);
        assert_eq!(summary.summary.len(), 2);

        // First-encounter ordering.
        assert_eq!(summary.summary[0].product_code, "KLB-01");
        assert_eq!(summary.summary[0].total_quantity, Quantity::new(dec!(15)));
        assert_eq!(summary.summary[0].order_count, 2);
        assert_eq!(summary.summary[1].product_code, "VET-01");
        assert_eq!(summary.summary[1].total_quantity, Quantity::new(dec!(4)));
        assert_eq!(summary.summary[1].order_count, 1);
    }

    #[tokio::test]
    async fn cancelled_orders_are_excluded() {
        let f = fixture();
        let sausage = seed_product(&f, "KLB-01", "Smoked sausage").await;
        let a = distributor(100);

        let order_dto = seed_order(&f, &a, vec![(sausage.id.clone(), dec!(10))]).await;
        let mut order = f.order_repo.find_by_id(&order_dto.id).await.unwrap().unwrap();
        order.set_status(OrderStatus::Cancelled);
        f.order_repo.save(&order).await.unwrap();

        let summary = f.use_case.execute(day()).await.unwrap();
        assert_eq!(summary.total_orders, 0);
        assert!(summary.summary.is_empty());
    }

    #[tokio::test]
    async fn aggregation_reads_effective_quantity() {
        let f = fixture();
        let sausage = seed_product(&f, "KLB-01", "Smoked sausage").await;
        let a = distributor(100);

        let order_dto = seed_order(&f, &a, vec![(sausage.id.clone(), dec!(10))]).await;
        let mut order = f.order_repo.find_by_id(&order_dto.id).await.unwrap().unwrap();
        let item_id = order.items()[0].id().clone();
        order
            .adjust_item(&item_id, Quantity::new(dec!(7)), "shortfall")
            .unwrap();
        f.order_repo.save(&order).await.unwrap();

        let summary = f.use_case.execute(day()).await.unwrap();
        assert_eq!(summary.summary[0].total_quantity, Quantity::new(dec!(7)));
    }

    #[tokio::test]
    async fn same_product_twice_in_one_order_counts_twice() {
        let f = fixture();
        let sausage = seed_product(&f, "KLB-01", "Smoked sausage").await;
        let a = distributor(100);

        seed_order(
            &f,
            &a,
            vec![(sausage.id.clone(), dec!(3)), (sausage.id.clone(), dec!(2))],
        )
        .await;

        let summary = f.use_case.execute(day()).await.unwrap();
        assert_eq!(summary.total_orders, 1);
        assert_eq!(summary.summary[0].total_quantity, Quantity::new(dec!(5)));
        assert_eq!(summary.summary[0].order_count, 2);
    }

    #[tokio::test]
    async fn missing_product_line_is_skipped() {
        let f = fixture();
        let a = distributor(100);
        let known = seed_product(&f, "KLB-01", "Smoked sausage").await;

        seed_order(
            &f,
            &a,
            vec![
                (known.id.clone(), dec!(3)),
                (ProductId::generate(), dec!(99)),
            ],
        )
        .await;

        let summary = f.use_case.execute(day()).await.unwrap();
        assert_eq!(summary.summary.len(), 1);
        assert_eq!(summary.summary[0].total_quantity, Quantity::new(dec!(3)));
    }
}
