//! Conversation routing for the messenger bot.
//!
//! All replies go through the application use cases; the bot adds no
//! business rules of its own. Use-case errors are rendered as reply text,
//! never surfaced as transport failures.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::application::dto::{
    AdjustItemDto, CreateOrderDto, CreateOrderItemDto, DailySummaryDto, OrderDto, UpdateStatusDto,
};
use crate::application::errors::AppError;
use crate::application::use_cases::{
    AdjustItemUseCase, CreateOrderUseCase, DailySummaryUseCase, OrderQueriesUseCase,
    UpdateStatusUseCase,
};
use crate::domain::access::{User, UserRepository};
use crate::domain::catalog::{Product, ProductRepository};
use crate::domain::notifications::NotificationRepository;
use crate::domain::ordering::{OrderFilter, OrderRepository, OrderStatus};
use crate::domain::shared::{OrderId, OrderItemId, ProductId, Quantity};

use super::events::{BotChoice, BotEvent, BotReply};
use super::session::{
    DraftItem, OrderBuilderSession, OrderBuilderStep, QuantityChangeSession, QuantityChangeStep,
    Session, SessionStore,
};

const DATE_FORMAT: &str = "%Y-%m-%d";
const MY_ORDERS_LIMIT: usize = 10;
const STAFF_ORDERS_LIMIT: usize = 15;

/// Bot conversation core.
///
/// Holds the use cases it drives plus the per-conversation session store.
pub struct BotHandlers<O, P, N, U>
where
    O: OrderRepository,
    P: ProductRepository,
    N: NotificationRepository,
    U: UserRepository,
{
    create_order: Arc<CreateOrderUseCase<O>>,
    update_status: Arc<UpdateStatusUseCase<O, N, U>>,
    adjust_item: Arc<AdjustItemUseCase<O, P, N, U>>,
    daily_summary: Arc<DailySummaryUseCase<O, P>>,
    order_queries: Arc<OrderQueriesUseCase<O>>,
    product_repo: Arc<P>,
    user_repo: Arc<U>,
    sessions: SessionStore,
}

impl<O, P, N, U> BotHandlers<O, P, N, U>
where
    O: OrderRepository,
    P: ProductRepository,
    N: NotificationRepository,
    U: UserRepository,
{
    /// Create a new BotHandlers.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        create_order: Arc<CreateOrderUseCase<O>>,
        update_status: Arc<UpdateStatusUseCase<O, N, U>>,
        adjust_item: Arc<AdjustItemUseCase<O, P, N, U>>,
        daily_summary: Arc<DailySummaryUseCase<O, P>>,
        order_queries: Arc<OrderQueriesUseCase<O>>,
        product_repo: Arc<P>,
        user_repo: Arc<U>,
    ) -> Self {
        Self {
            create_order,
            update_status,
            adjust_item,
            daily_summary,
            order_queries,
            product_repo,
            user_repo,
            sessions: SessionStore::new(),
        }
    }

    /// Handle one incoming event and produce the reply.
    ///
    /// First contact from an unknown account registers an inactive user and
    /// asks them to wait for approval. Inactive accounts get the same answer
    /// for every event.
    pub async fn handle(
        &self,
        chat_id: i64,
        telegram_id: i64,
        display_name: &str,
        event: BotEvent,
    ) -> BotReply {
        let user = match self.resolve_user(telegram_id, display_name).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                return BotReply::text(
                    "Welcome! Your account has been registered and is pending approval. \
                     You will be able to place orders once a manager activates it.",
                );
            }
            Err(reply) => return reply,
        };

        if !user.is_active {
            return BotReply::text("Your account is pending approval. Please wait.");
        }

        match event {
            BotEvent::Action(action) => self.handle_action(chat_id, &user, &action).await,
            BotEvent::Text(text) => self.handle_text(chat_id, &user, &text).await,
        }
    }

    /// Look up the caller, registering a pending user on first contact.
    ///
    /// `Ok(None)` means a new registration just happened.
    async fn resolve_user(
        &self,
        telegram_id: i64,
        display_name: &str,
    ) -> Result<Option<User>, BotReply> {
        match self.user_repo.find_by_telegram_id(telegram_id).await {
            Ok(Some(user)) => Ok(Some(user)),
            Ok(None) => {
                let user = User::pending(telegram_id, display_name);
                if let Err(e) = self.user_repo.save(&user).await {
                    tracing::warn!(telegram_id, error = %e, "failed to register bot user");
                    return Err(BotReply::text("Something went wrong. Please try again."));
                }
                tracing::info!(telegram_id, user_id = %user.id, "new bot user registered");
                Ok(None)
            }
            Err(e) => {
                tracing::warn!(telegram_id, error = %e, "user lookup failed");
                Err(BotReply::text("Something went wrong. Please try again."))
            }
        }
    }

    async fn handle_action(&self, chat_id: i64, user: &User, action: &str) -> BotReply {
        match action {
            "new_order" => self.start_order(chat_id, user).await,
            "confirm_order" => self.confirm_order(chat_id),
            "cancel_order" => {
                self.sessions.clear(chat_id);
                BotReply::text("Order draft discarded.")
            }
            "my_orders" => self.my_orders(user).await,
            "orders_all" => self.staff_orders(user, OrderFilter::default(), "All orders").await,
            "orders_today" => {
                let today = Utc::now().date_naive();
                let filter = OrderFilter {
                    date_range: Some((today, today)),
                    ..OrderFilter::default()
                };
                self.staff_orders(user, filter, "Today's orders").await
            }
            "orders_pending" => self.pending_orders(user).await,
            "daily_summary" => self.summary_today(user).await,
            "confirm_remove" => self.confirm_remove(chat_id, user).await,
            "keep_item" => {
                self.sessions.clear(chat_id);
                BotReply::text("Item kept unchanged.")
            }
            other => {
                if let Some(product_id) = other.strip_prefix("select_product:") {
                    self.select_product(chat_id, product_id).await
                } else if let Some(order_id) = other.strip_prefix("order_items:") {
                    self.order_items(user, &OrderId::new(order_id)).await
                } else if let Some(rest) = other.strip_prefix("set_status:") {
                    self.set_status(user, rest).await
                } else if let Some(rest) = other.strip_prefix("adjust_item:") {
                    self.start_quantity_change(chat_id, user, rest)
                } else {
                    self.menu(user)
                }
            }
        }
    }

    async fn handle_text(&self, chat_id: i64, user: &User, text: &str) -> BotReply {
        match self.sessions.get(chat_id) {
            Some(Session::OrderBuilder(session)) => match session.step {
                OrderBuilderStep::EnteringQuantity => {
                    self.enter_quantity(chat_id, session, text).await
                }
                OrderBuilderStep::SelectingDates => {
                    self.enter_date(chat_id, user, session, text).await
                }
                OrderBuilderStep::SelectingProducts => {
                    BotReply::text("Pick a product from the list, or tap Cancel.")
                }
            },
            Some(Session::QuantityChange(session)) => {
                self.quantity_change_text(chat_id, user, session, text).await
            }
            None => self.menu(user),
        }
    }

    /// Top-level menu, shaped by role.
    fn menu(&self, user: &User) -> BotReply {
        let choices = if user.role.is_staff() {
            vec![
                BotChoice::new("All orders", "orders_all"),
                BotChoice::new("Today's orders", "orders_today"),
                BotChoice::new("Pending orders", "orders_pending"),
                BotChoice::new("Daily summary", "daily_summary"),
            ]
        } else {
            vec![
                BotChoice::new("New order", "new_order"),
                BotChoice::new("My orders", "my_orders"),
            ]
        };
        BotReply::with_choices(format!("Hello, {}! What would you like to do?", user.name), choices)
    }

    async fn start_order(&self, chat_id: i64, user: &User) -> BotReply {
        if user.role.is_staff() {
            return self.menu(user);
        }

        let products = match self.product_repo.list_active().await {
            Ok(products) => products,
            Err(e) => {
                tracing::warn!(error = %e, "product list failed");
                return BotReply::text("Something went wrong. Please try again.");
            }
        };
        if products.is_empty() {
            return BotReply::text("No products are available for ordering right now.");
        }

        let session = OrderBuilderSession::new();
        let reply = self.product_picker(&session, &products);
        self.sessions.put(chat_id, Session::OrderBuilder(session));
        reply
    }

    /// Render the product picker, excluding products already in the draft.
    fn product_picker(&self, session: &OrderBuilderSession, products: &[Product]) -> BotReply {
        let mut choices: Vec<BotChoice> = products
            .iter()
            .filter(|p| !session.items.iter().any(|item| item.product_id == p.id))
            .map(|p| {
                BotChoice::new(
                    format!("{} ({})", p.name, p.unit),
                    format!("select_product:{}", p.id),
                )
            })
            .collect();
        if !session.items.is_empty() {
            choices.push(BotChoice::new("Confirm order", "confirm_order"));
        }
        choices.push(BotChoice::new("Cancel", "cancel_order"));

        let text = if session.items.is_empty() {
            "Pick a product to add:".to_string()
        } else {
            let mut lines = vec!["Your order so far:".to_string()];
            for item in &session.items {
                lines.push(format!("  {} x {}", item.quantity, item.product_name));
            }
            lines.push("Add another product or confirm:".to_string());
            lines.join("\n")
        };
        BotReply::with_choices(text, choices)
    }

    async fn select_product(&self, chat_id: i64, product_id: &str) -> BotReply {
        let Some(Session::OrderBuilder(mut session)) = self.sessions.get(chat_id) else {
            return BotReply::text("Start a new order first.");
        };

        let product_id = ProductId::new(product_id);
        let product = match self.product_repo.find_by_id(&product_id).await {
            Ok(Some(product)) => product,
            Ok(None) => return BotReply::text("That product is no longer available."),
            Err(e) => {
                tracing::warn!(product_id = %product_id, error = %e, "product lookup failed");
                return BotReply::text("Something went wrong. Please try again.");
            }
        };

        let prompt = format!("Enter the quantity for {} ({}):", product.name, product.unit);
        session.items.push(DraftItem {
            product_id: product.id,
            product_name: product.name,
            quantity: Quantity::ZERO,
        });
        session.step = OrderBuilderStep::EnteringQuantity;
        self.sessions.put(chat_id, Session::OrderBuilder(session));
        BotReply::text(prompt)
    }

    async fn enter_quantity(
        &self,
        chat_id: i64,
        mut session: OrderBuilderSession,
        text: &str,
    ) -> BotReply {
        let Some(quantity) = parse_quantity(text) else {
            return BotReply::text("Please enter a positive number, e.g. 5 or 2.5.");
        };

        if let Some(item) = session.items.last_mut() {
            item.quantity = quantity;
        }
        session.step = OrderBuilderStep::SelectingProducts;

        let products = match self.product_repo.list_active().await {
            Ok(products) => products,
            Err(e) => {
                tracing::warn!(error = %e, "product list failed");
                return BotReply::text("Something went wrong. Please try again.");
            }
        };
        let reply = self.product_picker(&session, &products);
        self.sessions.put(chat_id, Session::OrderBuilder(session));
        reply
    }

    fn confirm_order(&self, chat_id: i64) -> BotReply {
        let Some(Session::OrderBuilder(mut session)) = self.sessions.get(chat_id) else {
            return BotReply::text("Start a new order first.");
        };
        if session.items.is_empty() {
            return BotReply::text("Add at least one product first.");
        }

        session.step = OrderBuilderStep::SelectingDates;
        self.sessions.put(chat_id, Session::OrderBuilder(session));
        BotReply::text("Enter the order date (YYYY-MM-DD):")
    }

    async fn enter_date(
        &self,
        chat_id: i64,
        user: &User,
        mut session: OrderBuilderSession,
        text: &str,
    ) -> BotReply {
        let Ok(date) = NaiveDate::parse_from_str(text.trim(), DATE_FORMAT) else {
            return BotReply::text("Please enter a date as YYYY-MM-DD, e.g. 2026-01-24.");
        };

        let Some(order_date) = session.order_date else {
            session.order_date = Some(date);
            self.sessions.put(chat_id, Session::OrderBuilder(session));
            return BotReply::text("Enter the delivery date (YYYY-MM-DD):");
        };

        let dto = CreateOrderDto {
            distributor_id: None,
            order_date,
            delivery_date: date,
            notes: None,
            items: session
                .items
                .iter()
                .map(|item| CreateOrderItemDto {
                    product_id: item.product_id.clone(),
                    quantity: item.quantity,
                })
                .collect(),
        };

        self.sessions.clear(chat_id);
        match self.create_order.execute(user, dto).await {
            Ok(order) => BotReply::text(format!(
                "Order {} created with {} item(s). Delivery on {}.",
                order.order_number,
                order.items.len(),
                order.delivery_date
            )),
            Err(e) => error_reply(&e),
        }
    }

    async fn my_orders(&self, user: &User) -> BotReply {
        match self.order_queries.list(user, OrderFilter::default()).await {
            Ok(orders) => {
                if orders.is_empty() {
                    return BotReply::text("You have no orders yet.");
                }
                let lines: Vec<String> = orders
                    .iter()
                    .take(MY_ORDERS_LIMIT)
                    .map(format_order_line)
                    .collect();
                BotReply::text(format!("Your recent orders:\n{}", lines.join("\n")))
            }
            Err(e) => error_reply(&e),
        }
    }

    async fn staff_orders(&self, user: &User, filter: OrderFilter, title: &str) -> BotReply {
        match self.order_queries.list(user, filter).await {
            Ok(orders) => render_order_list(title, &orders, STAFF_ORDERS_LIMIT),
            Err(e) => error_reply(&e),
        }
    }

    /// Orders a producer still has to act on (SUBMITTED or CONFIRMED).
    async fn pending_orders(&self, user: &User) -> BotReply {
        let orders = match self.order_queries.list(user, OrderFilter::default()).await {
            Ok(orders) => orders,
            Err(e) => return error_reply(&e),
        };
        let pending: Vec<OrderDto> = orders
            .into_iter()
            .filter(|o| o.status.is_pending())
            .collect();
        if pending.is_empty() {
            return BotReply::text("No pending orders.");
        }

        let mut reply = render_order_list("Pending orders", &pending, STAFF_ORDERS_LIMIT);
        for order in pending.iter().take(STAFF_ORDERS_LIMIT) {
            let next = match order.status {
                OrderStatus::Submitted => OrderStatus::Confirmed,
                _ => OrderStatus::InProduction,
            };
            reply.choices.push(BotChoice::new(
                format!("{}: mark {}", order.order_number, next),
                format!("set_status:{}:{}", order.id, next),
            ));
            reply.choices.push(BotChoice::new(
                format!("{}: items", order.order_number),
                format!("order_items:{}", order.id),
            ));
        }
        reply
    }

    /// Line items of one order, with a change button per line.
    async fn order_items(&self, user: &User, order_id: &OrderId) -> BotReply {
        let items = match self.order_queries.items(user, order_id).await {
            Ok(items) => items,
            Err(e) => return error_reply(&e),
        };

        let mut lines = Vec::with_capacity(items.len());
        let mut choices = Vec::with_capacity(items.len());
        for item in &items {
            let name = self.product_name(&item.product_id).await;
            lines.push(format!("  {} x {}", item.effective_quantity, name));
            choices.push(BotChoice::new(
                format!("Change {name}"),
                format!("adjust_item:{}:{}", order_id, item.id),
            ));
        }
        BotReply::with_choices(format!("Order items:\n{}", lines.join("\n")), choices)
    }

    /// Handle a `set_status:{order_id}:{STATUS}` action.
    async fn set_status(&self, user: &User, args: &str) -> BotReply {
        let Some((order_id, status)) = args.rsplit_once(':') else {
            return BotReply::text("Unknown action.");
        };
        let Ok(status) = status.parse::<OrderStatus>() else {
            return BotReply::text("Unknown order status.");
        };

        let dto = UpdateStatusDto {
            status,
            notes: None,
        };
        match self
            .update_status
            .execute(user, &OrderId::new(order_id), dto)
            .await
        {
            Ok(order) => BotReply::text(format!(
                "Order {} is now {}.",
                order.order_number, order.status
            )),
            Err(e) => error_reply(&e),
        }
    }

    /// Handle an `adjust_item:{order_id}:{item_id}` action.
    fn start_quantity_change(&self, chat_id: i64, user: &User, args: &str) -> BotReply {
        if !user.role.is_staff() {
            return BotReply::text("Only producers can adjust quantities.");
        }
        let Some((order_id, item_id)) = args.split_once(':') else {
            return BotReply::text("Unknown action.");
        };

        self.sessions.put(
            chat_id,
            Session::QuantityChange(QuantityChangeSession {
                order_id: OrderId::new(order_id),
                item_id: OrderItemId::new(item_id),
                step: QuantityChangeStep::EnteringQuantity,
            }),
        );
        BotReply::text("Enter the new quantity (0 removes the item):")
    }

    async fn quantity_change_text(
        &self,
        chat_id: i64,
        user: &User,
        mut session: QuantityChangeSession,
        text: &str,
    ) -> BotReply {
        match session.step {
            QuantityChangeStep::EnteringQuantity => {
                let Ok(amount) = text.trim().parse::<Decimal>() else {
                    return BotReply::text("Please enter a number, e.g. 8 or 2.5 (0 removes the item).");
                };
                if amount < Decimal::ZERO {
                    return BotReply::text("Please enter a number, e.g. 8 or 2.5 (0 removes the item).");
                }
                if amount == Decimal::ZERO {
                    session.step = QuantityChangeStep::ConfirmingRemoval;
                    self.sessions.put(chat_id, Session::QuantityChange(session));
                    return BotReply::with_choices(
                        "Remove this item from the order?",
                        vec![
                            BotChoice::new("Remove item", "confirm_remove"),
                            BotChoice::new("Keep item", "keep_item"),
                        ],
                    );
                }
                session.step = QuantityChangeStep::EnteringReason(Quantity::new(amount));
                self.sessions.put(chat_id, Session::QuantityChange(session));
                BotReply::text("Enter the reason for the change:")
            }
            QuantityChangeStep::EnteringReason(quantity) => {
                if text.trim().is_empty() {
                    return BotReply::text("A reason is required. Please enter one.");
                }
                self.sessions.clear(chat_id);
                let dto = AdjustItemDto {
                    adjusted_quantity: quantity,
                    reason: text.trim().to_string(),
                };
                match self
                    .adjust_item
                    .execute(user, &session.order_id, &session.item_id, dto)
                    .await
                {
                    Ok(order) => BotReply::text(format!(
                        "Quantity updated on order {}.",
                        order.order_number
                    )),
                    Err(e) => error_reply(&e),
                }
            }
            QuantityChangeStep::ConfirmingRemoval => {
                BotReply::text("Tap Remove item or Keep item.")
            }
        }
    }

    async fn confirm_remove(&self, chat_id: i64, user: &User) -> BotReply {
        let Some(Session::QuantityChange(session)) = self.sessions.get(chat_id) else {
            return BotReply::text("Nothing to remove.");
        };
        self.sessions.clear(chat_id);

        match self
            .adjust_item
            .remove(user, &session.order_id, &session.item_id)
            .await
        {
            Ok(order) => BotReply::text(format!(
                "Item removed from order {}.",
                order.order_number
            )),
            Err(e) => error_reply(&e),
        }
    }

    async fn summary_today(&self, user: &User) -> BotReply {
        if !user.role.is_staff() {
            return self.menu(user);
        }
        match self.daily_summary.execute(Utc::now().date_naive()).await {
            Ok(summary) => BotReply::text(format_summary(&summary)),
            Err(e) => error_reply(&e),
        }
    }

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

fn parse_quantity(text: &str) -> Option<Quantity> {
    let amount = text.trim().parse::<Decimal>().ok()?;
    let quantity = Quantity::new(amount);
    quantity.is_positive().then_some(quantity)
}

fn format_order_line(order: &OrderDto) -> String {
    format!(
        "  {} | {} | {} | {} item(s)",
        order.order_number,
        order.status,
        order.order_date,
        order.items.len()
    )
}

fn render_order_list(title: &str, orders: &[OrderDto], limit: usize) -> BotReply {
    if orders.is_empty() {
        return BotReply::text(format!("{title}: none."));
    }
    let lines: Vec<String> = orders.iter().take(limit).map(format_order_line).collect();
    BotReply::text(format!("{title}:\n{}", lines.join("\n")))
}

/// Render a use-case error as reply text.
fn error_reply(error: &AppError) -> BotReply {
    BotReply::text(error.to_string())
}

fn format_summary(summary: &DailySummaryDto) -> String {
    let mut lines = vec![format!(
        "Demand for {} ({} order(s)):",
        summary.date, summary.total_orders
    )];
    if summary.summary.is_empty() {
        lines.push("  nothing to produce".to_string());
    }
    for row in &summary.summary {
        lines.push(format!(
            "  {} [{}]: {} {} across {} line(s)",
            row.product_name, row.product_code, row.total_quantity, row.unit, row.order_count
        ));
    }
    lines.join("\n")
}
