//! Messenger bot core: events, sessions, and conversation routing.
//!
//! The core is transport-agnostic; wiring it to a concrete messenger API is
//! a thin adapter concern outside this module.

pub mod events;
pub mod handlers;
pub mod session;

pub use events::{BotChoice, BotEvent, BotReply};
pub use handlers::BotHandlers;
pub use session::{Session, SessionStore};
