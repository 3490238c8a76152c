//! Notifications context: best-effort user-facing messages.

pub mod errors;
pub mod notification;
pub mod repository;

pub use errors::NotificationError;
pub use notification::{Notification, NotificationType};
pub use repository::NotificationRepository;
