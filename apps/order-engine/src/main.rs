//! Order Engine Binary
//!
//! Starts the Meatline order engine: in-memory repositories, application
//! use cases, and the axum HTTP server.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin order-engine
//! ```
//!
//! # Environment Variables
//!
//! - `ORDER_ENGINE_CONFIG`: path to the YAML config (default: config.yaml;
//!   defaults are used when the file is absent)
//! - `RUST_LOG`: log filter, overrides `logging.level`

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;

use order_engine::application::use_cases::{
    AdjustItemUseCase, CreateBatchUseCase, CreateOrderUseCase, DailySummaryUseCase,
    DeleteOrderUseCase, ListBatchesUseCase, NotificationsUseCase, OrderQueriesUseCase,
    ProductsUseCase, UpdateBatchUseCase, UpdateOrderUseCase, UpdateStatusUseCase,
};
use order_engine::application::Notifier;
use order_engine::config::{load_config, Config};
use order_engine::infrastructure::http::{create_router, AppState};
use order_engine::infrastructure::persistence::in_memory::{
    InMemoryBatchRepository, InMemoryNotificationRepository, InMemoryOrderRepository,
    InMemoryProductRepository, InMemoryUserRepository,
};
use order_engine::observability::init_tracing;

/// In-memory repositories shared by the use cases.
struct Repositories {
    orders: Arc<InMemoryOrderRepository>,
    products: Arc<InMemoryProductRepository>,
    notifications: Arc<InMemoryNotificationRepository>,
    users: Arc<InMemoryUserRepository>,
    batches: Arc<InMemoryBatchRepository>,
}

impl Repositories {
    fn new() -> Self {
        Self {
            orders: Arc::new(InMemoryOrderRepository::new()),
            products: Arc::new(InMemoryProductRepository::new()),
            notifications: Arc::new(InMemoryNotificationRepository::new()),
            users: Arc::new(InMemoryUserRepository::new()),
            batches: Arc::new(InMemoryBatchRepository::new()),
        }
    }
}

type ConcreteAppState = AppState<
    InMemoryOrderRepository,
    InMemoryProductRepository,
    InMemoryNotificationRepository,
    InMemoryUserRepository,
    InMemoryBatchRepository,
>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = resolve_config()?;
    init_tracing(&config.logging);

    tracing::info!("Starting Meatline Order Engine");
    tracing::info!(
        http_port = config.server.http_port,
        bind_address = %config.server.bind_address,
        bot_enabled = config.bot.enabled,
        "Configuration loaded"
    );

    let repos = Repositories::new();
    let state = build_state(&repos);
    let app = create_router(state);

    let addr: SocketAddr =
        format!("{}:{}", config.server.bind_address, config.server.http_port).parse()?;
    tracing::info!(%addr, "HTTP server starting");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Order engine stopped");
    Ok(())
}

/// Load the YAML config, falling back to defaults when the file is absent.
fn resolve_config() -> anyhow::Result<Config> {
    let path = std::env::var("ORDER_ENGINE_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());
    if std::path::Path::new(&path).exists() {
        Ok(load_config(Some(&path))?)
    } else {
        Ok(Config::default())
    }
}

/// Wire repositories and use cases into the HTTP application state.
fn build_state(repos: &Repositories) -> ConcreteAppState {
    let notifier = Arc::new(Notifier::new(
        Arc::clone(&repos.notifications),
        Arc::clone(&repos.users),
    ));

    AppState {
        create_order: Arc::new(CreateOrderUseCase::new(Arc::clone(&repos.orders))),
        update_order: Arc::new(UpdateOrderUseCase::new(Arc::clone(&repos.orders))),
        update_status: Arc::new(UpdateStatusUseCase::new(
            Arc::clone(&repos.orders),
            Arc::clone(&notifier),
        )),
        delete_order: Arc::new(DeleteOrderUseCase::new(Arc::clone(&repos.orders))),
        adjust_item: Arc::new(AdjustItemUseCase::new(
            Arc::clone(&repos.orders),
            Arc::clone(&repos.products),
            Arc::clone(&notifier),
        )),
        order_queries: Arc::new(OrderQueriesUseCase::new(Arc::clone(&repos.orders))),
        daily_summary: Arc::new(DailySummaryUseCase::new(
            Arc::clone(&repos.orders),
            Arc::clone(&repos.products),
        )),
        create_batch: Arc::new(CreateBatchUseCase::new(Arc::clone(&repos.batches))),
        update_batch: Arc::new(UpdateBatchUseCase::new(Arc::clone(&repos.batches))),
        list_batches: Arc::new(ListBatchesUseCase::new(Arc::clone(&repos.batches))),
        notifications: Arc::new(NotificationsUseCase::new(Arc::clone(&repos.notifications))),
        products: Arc::new(ProductsUseCase::new(Arc::clone(&repos.products))),
        user_repo: Arc::clone(&repos.users),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

/// Wait for shutdown signal (SIGTERM or SIGINT).
///
/// # Panics
///
/// Panics if signal handlers cannot be installed; a process that cannot
/// respond to termination signals should fail fast at startup.
#[allow(clippy::expect_used)]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("signal handler installation is critical for graceful shutdown");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler installation is critical for graceful shutdown")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }
}
