//! HTTP adapter.

pub mod auth;
pub mod controller;
pub mod request;
pub mod response;

pub use auth::AuthUser;
pub use controller::{create_router, AppState};
