//! Application layer: use cases, DTOs, and the edge error taxonomy.

pub mod dto;
pub mod errors;
pub mod notifier;
pub mod use_cases;

pub use errors::AppError;
pub use notifier::Notifier;
