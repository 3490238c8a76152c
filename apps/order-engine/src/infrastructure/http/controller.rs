//! HTTP Controller (Driver Adapter)
//!
//! Axum-based REST API that delegates to application use cases.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post, put},
    Json, Router,
};

use crate::application::dto::{
    AdjustItemDto, CreateBatchDto, CreateOrderDto, CreateProductDto, UpdateBatchDto,
    UpdateOrderDto, UpdateProductDto, UpdateStatusDto,
};
use crate::application::use_cases::{
    AdjustItemUseCase, CreateBatchUseCase, CreateOrderUseCase, DailySummaryUseCase,
    DeleteOrderUseCase, ListBatchesUseCase, NotificationsUseCase, OrderQueriesUseCase,
    ProductsUseCase, UpdateBatchUseCase, UpdateOrderUseCase, UpdateStatusUseCase,
};
use crate::application::AppError;
use crate::domain::access::UserRepository;
use crate::domain::catalog::ProductRepository;
use crate::domain::notifications::NotificationRepository;
use crate::domain::ordering::OrderRepository;
use crate::domain::production::BatchRepository;
use crate::domain::shared::{BatchId, NotificationId, OrderId, OrderItemId, ProductId};

use super::auth::AuthUser;
use super::request::{BatchListQuery, NotificationListQuery, OrderListQuery, SummaryQuery};
use super::response::HealthResponse;

/// Application state shared across handlers.
pub struct AppState<O, P, N, U, B>
where
    O: OrderRepository,
    P: ProductRepository,
    N: NotificationRepository,
    U: UserRepository,
    B: BatchRepository,
{
    /// Use case for creating orders.
    pub create_order: Arc<CreateOrderUseCase<O>>,
    /// Use case for patching order details.
    pub update_order: Arc<UpdateOrderUseCase<O>>,
    /// Use case for status changes.
    pub update_status: Arc<UpdateStatusUseCase<O, N, U>>,
    /// Use case for deleting draft orders.
    pub delete_order: Arc<DeleteOrderUseCase<O>>,
    /// Use case for item adjustments and removals.
    pub adjust_item: Arc<AdjustItemUseCase<O, P, N, U>>,
    /// Read side for orders.
    pub order_queries: Arc<OrderQueriesUseCase<O>>,
    /// Use case for the daily demand summary.
    pub daily_summary: Arc<DailySummaryUseCase<O, P>>,
    /// Use case for planning batches.
    pub create_batch: Arc<CreateBatchUseCase<B>>,
    /// Use case for updating batches.
    pub update_batch: Arc<UpdateBatchUseCase<B>>,
    /// Read side for batches.
    pub list_batches: Arc<ListBatchesUseCase<B>>,
    /// Use case for the notification inbox.
    pub notifications: Arc<NotificationsUseCase<N>>,
    /// Use case for the product catalog.
    pub products: Arc<ProductsUseCase<P>>,
    /// User repository for credential resolution.
    pub user_repo: Arc<U>,
    /// Application version.
    pub version: String,
}

impl<O, P, N, U, B> Clone for AppState<O, P, N, U, B>
where
    O: OrderRepository,
    P: ProductRepository,
    N: NotificationRepository,
    U: UserRepository,
    B: BatchRepository,
{
    fn clone(&self) -> Self {
        Self {
            create_order: Arc::clone(&self.create_order),
            update_order: Arc::clone(&self.update_order),
            update_status: Arc::clone(&self.update_status),
            delete_order: Arc::clone(&self.delete_order),
            adjust_item: Arc::clone(&self.adjust_item),
            order_queries: Arc::clone(&self.order_queries),
            daily_summary: Arc::clone(&self.daily_summary),
            create_batch: Arc::clone(&self.create_batch),
            update_batch: Arc::clone(&self.update_batch),
            list_batches: Arc::clone(&self.list_batches),
            notifications: Arc::clone(&self.notifications),
            products: Arc::clone(&self.products),
            user_repo: Arc::clone(&self.user_repo),
            version: self.version.clone(),
        }
    }
}

/// Create the HTTP router with all endpoints.
pub fn create_router<O, P, N, U, B>(state: AppState<O, P, N, U, B>) -> Router
where
    O: OrderRepository + 'static,
    P: ProductRepository + 'static,
    N: NotificationRepository + 'static,
    U: UserRepository + 'static,
    B: BatchRepository + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/orders", post(create_order).get(list_orders))
        .route(
            "/api/v1/orders/{id}",
            get(get_order).put(update_order).delete(delete_order),
        )
        .route("/api/v1/orders/{id}/status", patch(update_status))
        .route("/api/v1/orders/{id}/items", get(list_order_items))
        .route("/api/v1/orders/{id}/history", get(order_history))
        .route(
            "/api/v1/orders/{order_id}/items/{item_id}",
            patch(adjust_item).delete(remove_item),
        )
        .route("/api/v1/production/summary", get(daily_summary))
        .route(
            "/api/v1/production/batches",
            post(create_batch).get(list_batches),
        )
        .route(
            "/api/v1/production/batches/{id}",
            get(get_batch).put(update_batch),
        )
        .route("/api/v1/notifications", get(list_notifications))
        .route(
            "/api/v1/notifications/read-all",
            patch(mark_all_notifications_read),
        )
        .route(
            "/api/v1/notifications/{id}/read",
            patch(mark_notification_read),
        )
        .route("/api/v1/notifications/{id}", delete(delete_notification))
        .route("/api/v1/products", get(list_products).post(create_product))
        .route("/api/v1/products/{id}", put(update_product))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check<O, P, N, U, B>(State(state): State<AppState<O, P, N, U, B>>) -> impl IntoResponse
where
    O: OrderRepository,
    P: ProductRepository,
    N: NotificationRepository,
    U: UserRepository,
    B: BatchRepository,
{
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
    })
}

async fn create_order<O, P, N, U, B>(
    State(state): State<AppState<O, P, N, U, B>>,
    AuthUser(actor): AuthUser,
    Json(dto): Json<CreateOrderDto>,
) -> Result<impl IntoResponse, AppError>
where
    O: OrderRepository + 'static,
    P: ProductRepository + 'static,
    N: NotificationRepository + 'static,
    U: UserRepository + 'static,
    B: BatchRepository + 'static,
{
    let order = state.create_order.execute(&actor, dto).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

async fn list_orders<O, P, N, U, B>(
    State(state): State<AppState<O, P, N, U, B>>,
    AuthUser(actor): AuthUser,
    Query(query): Query<OrderListQuery>,
) -> Result<impl IntoResponse, AppError>
where
    O: OrderRepository + 'static,
    P: ProductRepository + 'static,
    N: NotificationRepository + 'static,
    U: UserRepository + 'static,
    B: BatchRepository + 'static,
{
    let orders = state
        .order_queries
        .list(&actor, query.into_filter())
        .await?;
    Ok(Json(orders))
}

async fn get_order<O, P, N, U, B>(
    State(state): State<AppState<O, P, N, U, B>>,
    AuthUser(actor): AuthUser,
    Path(id): Path<OrderId>,
) -> Result<impl IntoResponse, AppError>
where
    O: OrderRepository + 'static,
    P: ProductRepository + 'static,
    N: NotificationRepository + 'static,
    U: UserRepository + 'static,
    B: BatchRepository + 'static,
{
    let order = state.order_queries.get(&actor, &id).await?;
    Ok(Json(order))
}

async fn update_order<O, P, N, U, B>(
    State(state): State<AppState<O, P, N, U, B>>,
    AuthUser(actor): AuthUser,
    Path(id): Path<OrderId>,
    Json(dto): Json<UpdateOrderDto>,
) -> Result<impl IntoResponse, AppError>
where
    O: OrderRepository + 'static,
    P: ProductRepository + 'static,
    N: NotificationRepository + 'static,
    U: UserRepository + 'static,
    B: BatchRepository + 'static,
{
    let order = state.update_order.execute(&actor, &id, dto).await?;
    Ok(Json(order))
}

async fn update_status<O, P, N, U, B>(
    State(state): State<AppState<O, P, N, U, B>>,
    AuthUser(actor): AuthUser,
    Path(id): Path<OrderId>,
    Json(dto): Json<UpdateStatusDto>,
) -> Result<impl IntoResponse, AppError>
where
    O: OrderRepository + 'static,
    P: ProductRepository + 'static,
    N: NotificationRepository + 'static,
    U: UserRepository + 'static,
    B: BatchRepository + 'static,
{
    let order = state.update_status.execute(&actor, &id, dto).await?;
    Ok(Json(order))
}

async fn delete_order<O, P, N, U, B>(
    State(state): State<AppState<O, P, N, U, B>>,
    AuthUser(actor): AuthUser,
    Path(id): Path<OrderId>,
) -> Result<impl IntoResponse, AppError>
where
    O: OrderRepository + 'static,
    P: ProductRepository + 'static,
    N: NotificationRepository + 'static,
    U: UserRepository + 'static,
    B: BatchRepository + 'static,
{
    state.delete_order.execute(&actor, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_order_items<O, P, N, U, B>(
    State(state): State<AppState<O, P, N, U, B>>,
    AuthUser(actor): AuthUser,
    Path(id): Path<OrderId>,
) -> Result<impl IntoResponse, AppError>
where
    O: OrderRepository + 'static,
    P: ProductRepository + 'static,
    N: NotificationRepository + 'static,
    U: UserRepository + 'static,
    B: BatchRepository + 'static,
{
    let items = state.order_queries.items(&actor, &id).await?;
    Ok(Json(items))
}

async fn order_history<O, P, N, U, B>(
    State(state): State<AppState<O, P, N, U, B>>,
    AuthUser(actor): AuthUser,
    Path(id): Path<OrderId>,
) -> Result<impl IntoResponse, AppError>
where
    O: OrderRepository + 'static,
    P: ProductRepository + 'static,
    N: NotificationRepository + 'static,
    U: UserRepository + 'static,
    B: BatchRepository + 'static,
{
    let history = state.order_queries.history(&actor, &id).await?;
    Ok(Json(history))
}

async fn adjust_item<O, P, N, U, B>(
    State(state): State<AppState<O, P, N, U, B>>,
    AuthUser(actor): AuthUser,
    Path((order_id, item_id)): Path<(OrderId, OrderItemId)>,
    Json(dto): Json<AdjustItemDto>,
) -> Result<impl IntoResponse, AppError>
where
    O: OrderRepository + 'static,
    P: ProductRepository + 'static,
    N: NotificationRepository + 'static,
    U: UserRepository + 'static,
    B: BatchRepository + 'static,
{
    let order = state
        .adjust_item
        .execute(&actor, &order_id, &item_id, dto)
        .await?;
    Ok(Json(order))
}

async fn remove_item<O, P, N, U, B>(
    State(state): State<AppState<O, P, N, U, B>>,
    AuthUser(actor): AuthUser,
    Path((order_id, item_id)): Path<(OrderId, OrderItemId)>,
) -> Result<impl IntoResponse, AppError>
where
    O: OrderRepository + 'static,
    P: ProductRepository + 'static,
    N: NotificationRepository + 'static,
    U: UserRepository + 'static,
    B: BatchRepository + 'static,
{
    let order = state.adjust_item.remove(&actor, &order_id, &item_id).await?;
    Ok(Json(order))
}

async fn daily_summary<O, P, N, U, B>(
    State(state): State<AppState<O, P, N, U, B>>,
    AuthUser(_actor): AuthUser,
    Query(query): Query<SummaryQuery>,
) -> Result<impl IntoResponse, AppError>
where
    O: OrderRepository + 'static,
    P: ProductRepository + 'static,
    N: NotificationRepository + 'static,
    U: UserRepository + 'static,
    B: BatchRepository + 'static,
{
    let summary = state.daily_summary.execute(query.date).await?;
    Ok(Json(summary))
}

async fn create_batch<O, P, N, U, B>(
    State(state): State<AppState<O, P, N, U, B>>,
    AuthUser(actor): AuthUser,
    Json(dto): Json<CreateBatchDto>,
) -> Result<impl IntoResponse, AppError>
where
    O: OrderRepository + 'static,
    P: ProductRepository + 'static,
    N: NotificationRepository + 'static,
    U: UserRepository + 'static,
    B: BatchRepository + 'static,
{
    let batch = state.create_batch.execute(&actor, dto).await?;
    Ok((StatusCode::CREATED, Json(batch)))
}

async fn list_batches<O, P, N, U, B>(
    State(state): State<AppState<O, P, N, U, B>>,
    AuthUser(actor): AuthUser,
    Query(query): Query<BatchListQuery>,
) -> Result<impl IntoResponse, AppError>
where
    O: OrderRepository + 'static,
    P: ProductRepository + 'static,
    N: NotificationRepository + 'static,
    U: UserRepository + 'static,
    B: BatchRepository + 'static,
{
    let batches = state
        .list_batches
        .list(&actor, &query.into_filter())
        .await?;
    Ok(Json(batches))
}

async fn get_batch<O, P, N, U, B>(
    State(state): State<AppState<O, P, N, U, B>>,
    AuthUser(actor): AuthUser,
    Path(id): Path<BatchId>,
) -> Result<impl IntoResponse, AppError>
where
    O: OrderRepository + 'static,
    P: ProductRepository + 'static,
    N: NotificationRepository + 'static,
    U: UserRepository + 'static,
    B: BatchRepository + 'static,
{
    let batch = state.list_batches.get(&actor, &id).await?;
    Ok(Json(batch))
}

async fn update_batch<O, P, N, U, B>(
    State(state): State<AppState<O, P, N, U, B>>,
    AuthUser(actor): AuthUser,
    Path(id): Path<BatchId>,
    Json(dto): Json<UpdateBatchDto>,
) -> Result<impl IntoResponse, AppError>
where
    O: OrderRepository + 'static,
    P: ProductRepository + 'static,
    N: NotificationRepository + 'static,
    U: UserRepository + 'static,
    B: BatchRepository + 'static,
{
    let batch = state.update_batch.execute(&actor, &id, dto).await?;
    Ok(Json(batch))
}

async fn list_notifications<O, P, N, U, B>(
    State(state): State<AppState<O, P, N, U, B>>,
    AuthUser(actor): AuthUser,
    Query(query): Query<NotificationListQuery>,
) -> Result<impl IntoResponse, AppError>
where
    O: OrderRepository + 'static,
    P: ProductRepository + 'static,
    N: NotificationRepository + 'static,
    U: UserRepository + 'static,
    B: BatchRepository + 'static,
{
    let inbox = state
        .notifications
        .list(&actor, query.unread_only)
        .await?;
    Ok(Json(inbox))
}

async fn mark_notification_read<O, P, N, U, B>(
    State(state): State<AppState<O, P, N, U, B>>,
    AuthUser(actor): AuthUser,
    Path(id): Path<NotificationId>,
) -> Result<impl IntoResponse, AppError>
where
    O: OrderRepository + 'static,
    P: ProductRepository + 'static,
    N: NotificationRepository + 'static,
    U: UserRepository + 'static,
    B: BatchRepository + 'static,
{
    state.notifications.mark_read(&actor, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn mark_all_notifications_read<O, P, N, U, B>(
    State(state): State<AppState<O, P, N, U, B>>,
    AuthUser(actor): AuthUser,
) -> Result<impl IntoResponse, AppError>
where
    O: OrderRepository + 'static,
    P: ProductRepository + 'static,
    N: NotificationRepository + 'static,
    U: UserRepository + 'static,
    B: BatchRepository + 'static,
{
    state.notifications.mark_all_read(&actor).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_notification<O, P, N, U, B>(
    State(state): State<AppState<O, P, N, U, B>>,
    AuthUser(actor): AuthUser,
    Path(id): Path<NotificationId>,
) -> Result<impl IntoResponse, AppError>
where
    O: OrderRepository + 'static,
    P: ProductRepository + 'static,
    N: NotificationRepository + 'static,
    U: UserRepository + 'static,
    B: BatchRepository + 'static,
{
    state.notifications.delete(&actor, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_products<O, P, N, U, B>(
    State(state): State<AppState<O, P, N, U, B>>,
    AuthUser(_actor): AuthUser,
) -> Result<impl IntoResponse, AppError>
where
    O: OrderRepository + 'static,
    P: ProductRepository + 'static,
    N: NotificationRepository + 'static,
    U: UserRepository + 'static,
    B: BatchRepository + 'static,
{
    let products = state.products.list().await?;
    Ok(Json(products))
}

async fn create_product<O, P, N, U, B>(
    State(state): State<AppState<O, P, N, U, B>>,
    AuthUser(actor): AuthUser,
    Json(dto): Json<CreateProductDto>,
) -> Result<impl IntoResponse, AppError>
where
    O: OrderRepository + 'static,
    P: ProductRepository + 'static,
    N: NotificationRepository + 'static,
    U: UserRepository + 'static,
    B: BatchRepository + 'static,
{
    let product = state.products.create(&actor, dto).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

async fn update_product<O, P, N, U, B>(
    State(state): State<AppState<O, P, N, U, B>>,
    AuthUser(actor): AuthUser,
    Path(id): Path<ProductId>,
    Json(dto): Json<UpdateProductDto>,
) -> Result<impl IntoResponse, AppError>
where
    O: OrderRepository + 'static,
    P: ProductRepository + 'static,
    N: NotificationRepository + 'static,
    U: UserRepository + 'static,
    B: BatchRepository + 'static,
{
    let product = state.products.update(&actor, &id, dto).await?;
    Ok(Json(product))
}
