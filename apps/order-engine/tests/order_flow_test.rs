//! End-to-end tests driving the HTTP router.
//!
//! Each test builds the full application state on in-memory repositories,
//! seeds users and products directly through the repository traits, and
//! exercises the REST surface with `tower::ServiceExt::oneshot`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use order_engine::application::use_cases::{
    AdjustItemUseCase, CreateBatchUseCase, CreateOrderUseCase, DailySummaryUseCase,
    DeleteOrderUseCase, ListBatchesUseCase, NotificationsUseCase, OrderQueriesUseCase,
    ProductsUseCase, UpdateBatchUseCase, UpdateOrderUseCase, UpdateStatusUseCase,
};
use order_engine::application::Notifier;
use order_engine::domain::access::{Role, User, UserRepository};
use order_engine::domain::catalog::{Product, ProductRepository, Unit};
use order_engine::infrastructure::http::{create_router, AppState};
use order_engine::infrastructure::persistence::in_memory::{
    InMemoryBatchRepository, InMemoryNotificationRepository, InMemoryOrderRepository,
    InMemoryProductRepository, InMemoryUserRepository,
};

struct TestApp {
    router: Router,
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

    let state = AppState {
        create_order: Arc::new(CreateOrderUseCase::new(Arc::clone(&orders))),
        update_order: Arc::new(UpdateOrderUseCase::new(Arc::clone(&orders))),
        update_status: Arc::new(UpdateStatusUseCase::new(
            Arc::clone(&orders),
            Arc::clone(&notifier),
        )),
        delete_order: Arc::new(DeleteOrderUseCase::new(Arc::clone(&orders))),
        adjust_item: Arc::new(AdjustItemUseCase::new(
            Arc::clone(&orders),
            Arc::clone(&products),
            notifier,
        )),
        order_queries: Arc::new(OrderQueriesUseCase::new(Arc::clone(&orders))),
        daily_summary: Arc::new(DailySummaryUseCase::new(
            Arc::clone(&orders),
            Arc::clone(&products),
        )),
        create_batch: Arc::new(CreateBatchUseCase::new(Arc::clone(&batches))),
        update_batch: Arc::new(UpdateBatchUseCase::new(Arc::clone(&batches))),
        list_batches: Arc::new(ListBatchesUseCase::new(Arc::clone(&batches))),
        notifications: Arc::new(NotificationsUseCase::new(Arc::clone(&notifications))),
        products: Arc::new(ProductsUseCase::new(Arc::clone(&products))),
        user_repo: Arc::clone(&users),
        version: "test".to_string(),
    };

    TestApp {
        router: create_router(state),
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

fn request(method: &str, uri: &str, actor: Option<&User>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = actor {
        builder = builder.header("authorization", format!("Bearer {}", user.id));
    }
    match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
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

fn order_body(product_id: &str, quantity: &str) -> Value {
    json!({
        "order_date": "2026-01-24",
        "delivery_date": "2026-01-25",
        "items": [{"product_id": product_id, "quantity": quantity}]
    })
}

async fn create_order(app: &TestApp, actor: &User, body: Value) -> Value {
    let (status, order) = send(app, request("POST", "/api/v1/orders", Some(actor), Some(body))).await;
    assert_eq!(status, StatusCode::CREATED);
    order
}

#[tokio::test]
async fn health_is_open() {
    let app = make_app();
    let (status, body) = send(&app, request("GET", "/health", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn missing_credential_is_unauthorized() {
    let app = make_app();
    let (status, body) = send(&app, request("GET", "/api/v1/orders", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "AUTHENTICATION_ERROR");
}

#[tokio::test]
async fn inactive_account_is_forbidden() {
    let app = make_app();
    let pending = User::pending(1, "Pending user");
    app.user_repo.save(&pending).await.unwrap();

    let (status, body) = send(&app, request("GET", "/api/v1/orders", Some(&pending), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "AUTHORIZATION_ERROR");
}

#[tokio::test]
async fn create_order_happy_path_and_empty_items() {
    let app = make_app();
    let alice = seed_user(&app, Role::Distributor, 100).await;
    let product = seed_product(&app, "KLB-01", "Smoked sausage").await;

    let order = create_order(&app, &alice, order_body(product.id.as_str(), "5")).await;
    assert_eq!(order["status"], "DRAFT");
    assert!(order["order_number"]
        .as_str()
        .unwrap()
        .starts_with("ORD-20260124-"));
    assert_eq!(order["items"][0]["effective_quantity"], "5");

    let empty = json!({
        "order_date": "2026-01-24",
        "delivery_date": "2026-01-25",
        "items": []
    });
    let (status, body) = send(&app, request("POST", "/api/v1/orders", Some(&alice), Some(empty))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn foreign_order_access_is_forbidden() {
    let app = make_app();
    let alice = seed_user(&app, Role::Distributor, 100).await;
    let bob = seed_user(&app, Role::Distributor, 101).await;
    let product = seed_product(&app, "KLB-01", "Smoked sausage").await;

    let order = create_order(&app, &alice, order_body(product.id.as_str(), "5")).await;
    let uri = format!("/api/v1/orders/{}", order["id"].as_str().unwrap());

    let (status, body) = send(&app, request("GET", &uri, Some(&bob), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "AUTHORIZATION_ERROR");

    let (status, _) = send(
        &app,
        request("GET", "/api/v1/orders/no-such-order", Some(&bob), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn status_change_writes_history_and_notification() {
    let app = make_app();
    let alice = seed_user(&app, Role::Distributor, 100).await;
    let producer = seed_user(&app, Role::Producer, 200).await;
    let product = seed_product(&app, "KLB-01", "Smoked sausage").await;

    let order = create_order(&app, &alice, order_body(product.id.as_str(), "5")).await;
    let order_id = order["id"].as_str().unwrap().to_string();

    // Distributors cannot change status.
    let (status, _) = send(
        &app,
        request(
            "PATCH",
            &format!("/api/v1/orders/{order_id}/status"),
            Some(&alice),
            Some(json!({"status": "SUBMITTED"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, updated) = send(
        &app,
        request(
            "PATCH",
            &format!("/api/v1/orders/{order_id}/status"),
            Some(&producer),
            Some(json!({"status": "SUBMITTED", "notes": "looks good"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "SUBMITTED");

    // One creation row plus exactly one change row, newest first.
    let (status, history) = send(
        &app,
        request(
            "GET",
            &format!("/api/v1/orders/{order_id}/history"),
            Some(&alice),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let history = history.as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["status"], "SUBMITTED");
    assert_eq!(history[0]["notes"], "looks good");

    // The distributor got exactly one notification about it.
    let (status, inbox) = send(
        &app,
        request("GET", "/api/v1/notifications", Some(&alice), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let inbox = inbox.as_array().unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0]["type"], "ORDER_STATUS");
    assert!(inbox[0]["message"]
        .as_str()
        .unwrap()
        .contains("DRAFT -> SUBMITTED"));
    assert_eq!(inbox[0]["related_entity_id"], order_id);
}

#[tokio::test]
async fn delete_requires_draft() {
    let app = make_app();
    let alice = seed_user(&app, Role::Distributor, 100).await;
    let producer = seed_user(&app, Role::Producer, 200).await;
    let product = seed_product(&app, "KLB-01", "Smoked sausage").await;

    let draft = create_order(&app, &alice, order_body(product.id.as_str(), "5")).await;
    let draft_uri = format!("/api/v1/orders/{}", draft["id"].as_str().unwrap());

    let (status, _) = send(&app, request("DELETE", &draft_uri, Some(&alice), None)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, request("GET", &draft_uri, Some(&alice), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // A submitted order refuses deletion and stays intact.
    let submitted = create_order(&app, &alice, order_body(product.id.as_str(), "7")).await;
    let submitted_id = submitted["id"].as_str().unwrap().to_string();
    send(
        &app,
        request(
            "PATCH",
            &format!("/api/v1/orders/{submitted_id}/status"),
            Some(&producer),
            Some(json!({"status": "SUBMITTED"})),
        ),
    )
    .await;

    let (status, body) = send(
        &app,
        request(
            "DELETE",
            &format!("/api/v1/orders/{submitted_id}"),
            Some(&alice),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, order) = send(
        &app,
        request(
            "GET",
            &format!("/api/v1/orders/{submitted_id}"),
            Some(&alice),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["status"], "SUBMITTED");
}

#[tokio::test]
async fn adjustment_flows_into_daily_summary() {
    let app = make_app();
    let alice = seed_user(&app, Role::Distributor, 100).await;
    let producer = seed_user(&app, Role::Producer, 200).await;
    let product = seed_product(&app, "KLB-01", "Smoked sausage").await;

    let order = create_order(&app, &alice, order_body(product.id.as_str(), "10")).await;
    let order_id = order["id"].as_str().unwrap().to_string();
    let item_id = order["items"][0]["id"].as_str().unwrap().to_string();

    // Summary before the adjustment sees the requested quantity.
    let (status, summary) = send(
        &app,
        request(
            "GET",
            "/api/v1/production/summary?date=2026-01-24",
            Some(&producer),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["total_orders"], 1);
    assert_eq!(summary["summary"][0]["total_quantity"], "10");

    let (status, adjusted) = send(
        &app,
        request(
            "PATCH",
            &format!("/api/v1/orders/{order_id}/items/{item_id}"),
            Some(&producer),
            Some(json!({"adjusted_quantity": "8", "reason": "short on raw stock"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(adjusted["items"][0]["quantity"], "10");
    assert_eq!(adjusted["items"][0]["effective_quantity"], "8");

    // The same summary re-run now reads the corrected quantity.
    let (_, summary) = send(
        &app,
        request(
            "GET",
            "/api/v1/production/summary?date=2026-01-24",
            Some(&producer),
            None,
        ),
    )
    .await;
    assert_eq!(summary["summary"][0]["total_quantity"], "8");
    assert_eq!(summary["summary"][0]["order_count"], 1);

    // A missing reason is rejected.
    let (status, body) = send(
        &app,
        request(
            "PATCH",
            &format!("/api/v1/orders/{order_id}/items/{item_id}"),
            Some(&producer),
            Some(json!({"adjusted_quantity": "6", "reason": "  "})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn last_item_removal_is_refused() {
    let app = make_app();
    let alice = seed_user(&app, Role::Distributor, 100).await;
    let producer = seed_user(&app, Role::Producer, 200).await;
    let product = seed_product(&app, "KLB-01", "Smoked sausage").await;

    let order = create_order(&app, &alice, order_body(product.id.as_str(), "5")).await;
    let order_id = order["id"].as_str().unwrap().to_string();
    let item_id = order["items"][0]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        request(
            "DELETE",
            &format!("/api/v1/orders/{order_id}/items/{item_id}"),
            Some(&producer),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (_, unchanged) = send(
        &app,
        request("GET", &format!("/api/v1/orders/{order_id}"), Some(&alice), None),
    )
    .await;
    assert_eq!(unchanged["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn cancelled_orders_are_excluded_from_summary() {
    let app = make_app();
    let alice = seed_user(&app, Role::Distributor, 100).await;
    let producer = seed_user(&app, Role::Producer, 200).await;
    let product = seed_product(&app, "KLB-01", "Smoked sausage").await;

    let keep = create_order(&app, &alice, order_body(product.id.as_str(), "5")).await;
    let cancel = create_order(&app, &alice, order_body(product.id.as_str(), "100")).await;
    send(
        &app,
        request(
            "PATCH",
            &format!("/api/v1/orders/{}/status", cancel["id"].as_str().unwrap()),
            Some(&producer),
            Some(json!({"status": "CANCELLED"})),
        ),
    )
    .await;

    let (_, summary) = send(
        &app,
        request(
            "GET",
            "/api/v1/production/summary?date=2026-01-24",
            Some(&producer),
            None,
        ),
    )
    .await;
    assert_eq!(summary["total_orders"], 1);
    assert_eq!(summary["summary"][0]["total_quantity"], "5");
    let _ = keep;
}

#[tokio::test]
async fn duplicate_product_code_conflicts() {
    let app = make_app();
    let producer = seed_user(&app, Role::Producer, 200).await;
    seed_product(&app, "KLB-01", "Smoked sausage").await;

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/v1/products",
            Some(&producer),
            Some(json!({"code": "KLB-01", "name": "Another sausage", "unit": "KG"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");
}

#[tokio::test]
async fn notification_inbox_read_flow() {
    let app = make_app();
    let alice = seed_user(&app, Role::Distributor, 100).await;
    let producer = seed_user(&app, Role::Producer, 200).await;
    let product = seed_product(&app, "KLB-01", "Smoked sausage").await;

    let order = create_order(&app, &alice, order_body(product.id.as_str(), "5")).await;
    let order_id = order["id"].as_str().unwrap();
    for status in ["SUBMITTED", "CONFIRMED"] {
        send(
            &app,
            request(
                "PATCH",
                &format!("/api/v1/orders/{order_id}/status"),
                Some(&producer),
                Some(json!({"status": status})),
            ),
        )
        .await;
    }

    let (_, inbox) = send(
        &app,
        request(
            "GET",
            "/api/v1/notifications?unread_only=true",
            Some(&alice),
            None,
        ),
    )
    .await;
    let inbox = inbox.as_array().unwrap().clone();
    assert_eq!(inbox.len(), 2);

    let first_id = inbox[0]["id"].as_str().unwrap();
    let (status, _) = send(
        &app,
        request(
            "PATCH",
            &format!("/api/v1/notifications/{first_id}/read"),
            Some(&alice),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // The producer cannot touch the distributor's notification.
    let (status, _) = send(
        &app,
        request(
            "DELETE",
            &format!("/api/v1/notifications/{first_id}"),
            Some(&producer),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, unread) = send(
        &app,
        request(
            "GET",
            "/api/v1/notifications?unread_only=true",
            Some(&alice),
            None,
        ),
    )
    .await;
    assert_eq!(unread.as_array().unwrap().len(), 1);

    let (status, _) = send(
        &app,
        request(
            "PATCH",
            "/api/v1/notifications/read-all",
            Some(&alice),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, unread) = send(
        &app,
        request(
            "GET",
            "/api/v1/notifications?unread_only=true",
            Some(&alice),
            None,
        ),
    )
    .await;
    assert!(unread.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn production_batches_lifecycle() {
    let app = make_app();
    let alice = seed_user(&app, Role::Distributor, 100).await;
    let producer = seed_user(&app, Role::Producer, 200).await;
    let product = seed_product(&app, "KLB-01", "Smoked sausage").await;

    let body = json!({
        "production_date": "2026-01-25",
        "total_capacity": "500",
        "items": [{"product_id": product.id.as_str(), "planned_quantity": "120"}]
    });

    // Distributors cannot plan batches.
    let (status, _) = send(
        &app,
        request(
            "POST",
            "/api/v1/production/batches",
            Some(&alice),
            Some(body.clone()),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, batch) = send(
        &app,
        request(
            "POST",
            "/api/v1/production/batches",
            Some(&producer),
            Some(body),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(batch["status"], "PLANNED");
    assert!(batch["batch_number"]
        .as_str()
        .unwrap()
        .starts_with("BATCH-20260125-"));

    let batch_id = batch["id"].as_str().unwrap();
    let item_id = batch["items"][0]["id"].as_str().unwrap();
    let (status, updated) = send(
        &app,
        request(
            "PUT",
            &format!("/api/v1/production/batches/{batch_id}"),
            Some(&producer),
            Some(json!({
                "status": "COMPLETED",
                "actuals": [{"item_id": item_id, "actual_quantity": "118"}]
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "COMPLETED");
    assert_eq!(updated["items"][0]["actual_quantity"], "118");

    // Over-capacity creation is rejected up front.
    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/v1/production/batches",
            Some(&producer),
            Some(json!({
                "production_date": "2026-01-25",
                "total_capacity": "100",
                "items": [{"product_id": product.id.as_str(), "planned_quantity": "120"}]
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn distributor_list_is_scoped_to_own_orders() {
    let app = make_app();
    let alice = seed_user(&app, Role::Distributor, 100).await;
    let bob = seed_user(&app, Role::Distributor, 101).await;
    let producer = seed_user(&app, Role::Producer, 200).await;
    let product = seed_product(&app, "KLB-01", "Smoked sausage").await;

    create_order(&app, &alice, order_body(product.id.as_str(), "5")).await;
    create_order(&app, &bob, order_body(product.id.as_str(), "3")).await;

    let (_, mine) = send(&app, request("GET", "/api/v1/orders", Some(&alice), None)).await;
    assert_eq!(mine.as_array().unwrap().len(), 1);

    let (_, all) = send(&app, request("GET", "/api/v1/orders", Some(&producer), None)).await;
    assert_eq!(all.as_array().unwrap().len(), 2);
}
