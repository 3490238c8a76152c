//! End-to-end tests driving the bot conversation core and the HTTP router
//! against the same repositories.
//!
//! The bot and the REST surface are two transports over one application
//! layer; these tests check that work done on one side is visible on the
//! other.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use order_engine::application::use_cases::{
    AdjustItemUseCase, CreateBatchUseCase, CreateOrderUseCase, DailySummaryUseCase,
    DeleteOrderUseCase, ListBatchesUseCase, NotificationsUseCase, OrderQueriesUseCase,
    ProductsUseCase, UpdateBatchUseCase, UpdateOrderUseCase, UpdateStatusUseCase,
};
use order_engine::application::Notifier;
use order_engine::bot::{BotEvent, BotHandlers, BotReply};
use order_engine::domain::access::{Role, User, UserRepository};
use order_engine::domain::catalog::{Product, ProductRepository, Unit};
use order_engine::infrastructure::http::{create_router, AppState};
use order_engine::infrastructure::persistence::in_memory::{
    InMemoryBatchRepository, InMemoryNotificationRepository, InMemoryOrderRepository,
    InMemoryProductRepository, InMemoryUserRepository,
};

type Handlers = BotHandlers<
    InMemoryOrderRepository,
    InMemoryProductRepository,
    InMemoryNotificationRepository,
    InMemoryUserRepository,
>;

struct TestApp {
    router: Router,
    handlers: Handlers,
    user_repo: Arc<InMemoryUserRepository>,
    product_repo: Arc<InMemoryProductRepository>,
}

fn make_app() -> TestApp {
    let orders = Arc::new(InMemoryOrderRepository::new());
    let products = Arc::new(InMemoryProductRepository::new());
    let notifications = Arc::new(InMemoryNotificationRepository::new());
    let users = Arc::new(InMemoryUserRepository::new());
    let batches = Arc::new(InMemoryBatchRepository::new());

    let notifier = Arc::new(Notifier::new(
        Arc::clone(&notifications),
        Arc::clone(&users),
    ));

    let create_order = Arc::new(CreateOrderUseCase::new(Arc::clone(&orders)));
    let update_status = Arc::new(UpdateStatusUseCase::new(
        Arc::clone(&orders),
        Arc::clone(&notifier),
    ));
    let adjust_item = Arc::new(AdjustItemUseCase::new(
        Arc::clone(&orders),
        Arc::clone(&products),
        notifier,
    ));
    let daily_summary = Arc::new(DailySummaryUseCase::new(
        Arc::clone(&orders),
        Arc::clone(&products),
    ));
    let order_queries = Arc::new(OrderQueriesUseCase::new(Arc::clone(&orders)));

    let state = AppState {
        create_order: Arc::clone(&create_order),
        update_order: Arc::new(UpdateOrderUseCase::new(Arc::clone(&orders))),
        update_status: Arc::clone(&update_status),
        delete_order: Arc::new(DeleteOrderUseCase::new(Arc::clone(&orders))),
        adjust_item: Arc::clone(&adjust_item),
        order_queries: Arc::clone(&order_queries),
        daily_summary: Arc::clone(&daily_summary),
        create_batch: Arc::new(CreateBatchUseCase::new(Arc::clone(&batches))),
        update_batch: Arc::new(UpdateBatchUseCase::new(Arc::clone(&batches))),
        list_batches: Arc::new(ListBatchesUseCase::new(batches)),
        notifications: Arc::new(NotificationsUseCase::new(notifications)),
        products: Arc::new(ProductsUseCase::new(Arc::clone(&products))),
        user_repo: Arc::clone(&users),
        version: "test".to_string(),
    };

    let handlers = BotHandlers::new(
        create_order,
        update_status,
        adjust_item,
        daily_summary,
        order_queries,
        Arc::clone(&products),
        Arc::clone(&users),
    );

    TestApp {
        router: create_router(state),
        handlers,
        user_repo: users,
        product_repo: products,
    }
}

async fn seed_user(app: &TestApp, role: Role, telegram_id: i64) -> User {
    let mut user = User::pending(telegram_id, "Test user");
    user.role = role;
    user.activate();
    app.user_repo.save(&user).await.unwrap();
    user
}

async fn seed_product(app: &TestApp, code: &str, name: &str) -> Product {
    let product = Product::new(code, name, Unit::Kg);
    app.product_repo.save(&product).await.unwrap();
    product
}

async fn bot_text(app: &TestApp, chat: i64, tg: i64, s: &str) -> BotReply {
    app.handlers
        .handle(chat, tg, "Test user", BotEvent::Text(s.to_string()))
        .await
}

async fn bot_action(app: &TestApp, chat: i64, tg: i64, s: &str) -> BotReply {
    app.handlers
        .handle(chat, tg, "Test user", BotEvent::Action(s.to_string()))
        .await
}

/// Drive a full order-builder conversation for one product.
async fn bot_build_order(app: &TestApp, chat: i64, tg: i64, product: &Product, quantity: &str) {
    bot_action(app, chat, tg, "new_order").await;
    bot_action(app, chat, tg, &format!("select_product:{}", product.id)).await;
    bot_text(app, chat, tg, quantity).await;
    bot_action(app, chat, tg, "confirm_order").await;
    bot_text(app, chat, tg, "2026-01-24").await;
    let reply = bot_text(app, chat, tg, "2026-01-25").await;
    assert!(reply.text.contains("created"), "reply: {}", reply.text);
}

fn get(uri: &str, actor: &User) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", format!("Bearer {}", actor.id))
        .body(Body::empty())
        .unwrap()
}

fn patch(uri: &str, actor: &User, body: Value) -> Request<Body> {
    Request::builder()
        .method("PATCH")
        .uri(uri)
        .header("authorization", format!("Bearer {}", actor.id))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: &TestApp, req: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .router
        .clone()
        .oneshot(req)
        .await
        .expect("request should succeed");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("should read body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("should parse body as JSON")
    };
    (status, value)
}

#[tokio::test]
async fn bot_order_is_visible_over_rest() {
    let app = make_app();
    let alice = seed_user(&app, Role::Distributor, 100).await;
    let product = seed_product(&app, "KLB-01", "Smoked sausage").await;

    bot_build_order(&app, 1, 100, &product, "5").await;

    let (status, orders) = send(&app, get("/api/v1/orders", &alice)).await;
    assert_eq!(status, StatusCode::OK);
    let orders = orders.as_array().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["status"], "DRAFT");
    assert!(orders[0]["order_number"]
        .as_str()
        .unwrap()
        .starts_with("ORD-20260124-"));
    assert_eq!(orders[0]["items"][0]["effective_quantity"], "5");
}

#[tokio::test]
async fn rest_adjustment_shows_in_bot_item_view() {
    let app = make_app();
    seed_user(&app, Role::Distributor, 100).await;
    let producer = seed_user(&app, Role::Producer, 200).await;
    let product = seed_product(&app, "KLB-01", "Smoked sausage").await;

    bot_build_order(&app, 1, 100, &product, "10").await;

    let (_, orders) = send(&app, get("/api/v1/orders", &producer)).await;
    let order_id = orders[0]["id"].as_str().unwrap().to_string();
    let item_id = orders[0]["items"][0]["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        patch(
            &format!("/api/v1/orders/{order_id}/items/{item_id}"),
            &producer,
            serde_json::json!({"adjusted_quantity": "8", "reason": "short on raw stock"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let reply = bot_action(&app, 2, 200, &format!("order_items:{order_id}")).await;
    assert!(reply.text.contains("8 x Smoked sausage"));
}

#[tokio::test]
async fn bot_status_change_writes_history_and_inbox() {
    let app = make_app();
    let alice = seed_user(&app, Role::Distributor, 100).await;
    seed_user(&app, Role::Producer, 200).await;
    let product = seed_product(&app, "KLB-01", "Smoked sausage").await;

    bot_build_order(&app, 1, 100, &product, "5").await;

    let (_, orders) = send(&app, get("/api/v1/orders", &alice)).await;
    let order_id = orders[0]["id"].as_str().unwrap().to_string();

    let reply = bot_action(&app, 2, 200, &format!("set_status:{order_id}:SUBMITTED")).await;
    assert!(reply.text.contains("SUBMITTED"));

    let (status, history) = send(
        &app,
        get(&format!("/api/v1/orders/{order_id}/history"), &alice),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let history = history.as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["status"], "SUBMITTED");

    let (_, inbox) = send(&app, get("/api/v1/notifications", &alice)).await;
    let inbox = inbox.as_array().unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0]["type"], "ORDER_STATUS");
    assert_eq!(inbox[0]["related_entity_id"], order_id);
}

#[tokio::test]
async fn drafts_are_isolated_per_conversation() {
    let app = make_app();
    let alice = seed_user(&app, Role::Distributor, 100).await;
    let bob = seed_user(&app, Role::Distributor, 101).await;
    let producer = seed_user(&app, Role::Producer, 200).await;
    let product = seed_product(&app, "KLB-01", "Smoked sausage").await;

    // Interleave the two conversations step by step.
    bot_action(&app, 1, 100, "new_order").await;
    bot_action(&app, 2, 101, "new_order").await;
    bot_action(&app, 1, 100, &format!("select_product:{}", product.id)).await;
    bot_action(&app, 2, 101, &format!("select_product:{}", product.id)).await;
    bot_text(&app, 1, 100, "5").await;
    bot_text(&app, 2, 101, "3").await;
    bot_action(&app, 1, 100, "confirm_order").await;
    bot_action(&app, 2, 101, "confirm_order").await;
    bot_text(&app, 1, 100, "2026-01-24").await;
    bot_text(&app, 2, 101, "2026-01-24").await;
    bot_text(&app, 1, 100, "2026-01-25").await;
    bot_text(&app, 2, 101, "2026-01-26").await;

    let (_, all) = send(&app, get("/api/v1/orders", &producer)).await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (_, mine) = send(&app, get("/api/v1/orders", &alice)).await;
    let mine = mine.as_array().unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["items"][0]["quantity"], "5");

    let (_, theirs) = send(&app, get("/api/v1/orders", &bob)).await;
    let theirs = theirs.as_array().unwrap();
    assert_eq!(theirs.len(), 1);
    assert_eq!(theirs[0]["items"][0]["quantity"], "3");
}
