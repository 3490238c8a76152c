// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::option_if_let_else,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Order Engine - Meatline Core Library
//!
//! Order-management backend for a meat-production business. Distributors
//! place orders, producers confirm them, correct quantities, and plan
//! production; a daily demand summary rolls ordered quantities up per
//! product.
//!
//! # Architecture (Clean Architecture + DDD)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: bounded contexts with aggregates, value objects, and
//!   repository traits as ports
//!   - `ordering`: Order aggregate, status lifecycle, quantity adjustments
//!   - `catalog`: products and units
//!   - `access`: users, roles, capability checks
//!   - `notifications`: the best-effort message side channel
//!   - `production`: production batches
//!
//! - **Application**: use cases, DTOs, the `AppError` taxonomy, and the
//!   `Notifier` side-channel helper
//!
//! - **Infrastructure**: axum HTTP controller and in-memory persistence
//!   adapters
//!
//! - **Bot**: transport-agnostic conversational adapter (sessions, events,
//!   handlers)

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// Application layer - use cases, DTOs, and the error taxonomy.
pub mod application;

/// Bot transport core - sessions, events, and conversation routing.
pub mod bot;

/// Configuration loading and validation.
pub mod config;

/// Domain layer - bounded contexts with no external dependencies.
pub mod domain;

/// Infrastructure layer - HTTP controller and persistence adapters.
pub mod infrastructure;

/// Observability - tracing-subscriber setup.
pub mod observability;

pub use application::AppError;
pub use domain::access::{Role, User};
pub use domain::catalog::{Product, Unit};
pub use domain::ordering::{Order, OrderStatus};
pub use infrastructure::http::{create_router, AppState};
