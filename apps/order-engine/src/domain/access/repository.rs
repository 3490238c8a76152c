//! User repository trait.

use async_trait::async_trait;

use super::errors::AccessError;
use super::user::User;
use crate::domain::shared::UserId;

/// Repository trait for User persistence.
///
/// Implemented by adapters in the infrastructure layer.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Save a user (insert or update).
    ///
    /// # Errors
    ///
    /// Returns error if persistence fails.
    async fn save(&self, user: &User) -> Result<(), AccessError>;

    /// Find a user by internal id.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AccessError>;

    /// Find a user by telegram id.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_by_telegram_id(&self, telegram_id: i64) -> Result<Option<User>, AccessError>;

    /// List all active distributors (for broadcast notifications).
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn list_active_distributors(&self) -> Result<Vec<User>, AccessError>;
}
