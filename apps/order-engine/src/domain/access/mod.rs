//! Access context: users, roles, and capability checks.

pub mod capabilities;
pub mod errors;
pub mod repository;
pub mod user;

pub use errors::AccessError;
pub use repository::UserRepository;
pub use user::{Role, User};
