//! In-memory conversation sessions.
//!
//! Sessions live only in process memory and are lost on restart; an
//! interrupted conversation simply starts over. Starting a new flow
//! overwrites whatever incomplete session the conversation had.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::NaiveDate;

use crate::domain::shared::{OrderId, OrderItemId, ProductId, Quantity};

/// Where the order-builder conversation currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderBuilderStep {
    /// Showing the product picker.
    SelectingProducts,
    /// Waiting for a quantity for the last picked product.
    EnteringQuantity,
    /// Waiting for the order date, then the delivery date.
    SelectingDates,
}

/// One line collected so far.
#[derive(Debug, Clone)]
pub struct DraftItem {
    /// Picked product.
    pub product_id: ProductId,
    /// Product name, kept for re-rendering the running list.
    pub product_name: String,
    /// Entered quantity; zero until the quantity step fills it.
    pub quantity: Quantity,
}

/// State machine for building an order in conversation.
#[derive(Debug, Clone)]
pub struct OrderBuilderSession {
    /// Current step.
    pub step: OrderBuilderStep,
    /// Lines collected so far.
    pub items: Vec<DraftItem>,
    /// First date entered (order date).
    pub order_date: Option<NaiveDate>,
}

impl OrderBuilderSession {
    /// Start a fresh session at the product picker.
    #[must_use]
    pub fn new() -> Self {
        Self {
            step: OrderBuilderStep::SelectingProducts,
            items: Vec::new(),
            order_date: None,
        }
    }
}

impl Default for OrderBuilderSession {
    fn default() -> Self {
        Self::new()
    }
}

/// What the quantity-change conversation is waiting for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuantityChangeStep {
    /// Waiting for the new quantity (0 asks to remove the item).
    EnteringQuantity,
    /// Waiting for the adjustment reason, quantity already entered.
    EnteringReason(Quantity),
    /// Waiting for the user to confirm removing the item.
    ConfirmingRemoval,
}

/// State machine for the producer's quantity-change flow.
#[derive(Debug, Clone)]
pub struct QuantityChangeSession {
    /// Order being corrected.
    pub order_id: OrderId,
    /// Line being corrected.
    pub item_id: OrderItemId,
    /// Current step.
    pub step: QuantityChangeStep,
}

/// A conversation's active session, at most one per conversation.
#[derive(Debug, Clone)]
pub enum Session {
    /// Distributor building an order.
    OrderBuilder(OrderBuilderSession),
    /// Producer changing a line quantity.
    QuantityChange(QuantityChangeSession),
}

/// Conversation-keyed session storage.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<i64, Session>>,
}

impl SessionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Store a session, overwriting any existing one for the conversation.
    pub fn put(&self, conversation: i64, session: Session) {
        let mut sessions = self.sessions.lock().unwrap();
        sessions.insert(conversation, session);
    }

    /// Get a clone of the conversation's session, if any.
    #[must_use]
    pub fn get(&self, conversation: i64) -> Option<Session> {
        let sessions = self.sessions.lock().unwrap();
        sessions.get(&conversation).cloned()
    }

    /// Discard the conversation's session.
    pub fn clear(&self, conversation: i64) {
        let mut sessions = self.sessions.lock().unwrap();
        sessions.remove(&conversation);
    }
}
