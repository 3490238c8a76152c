//! Product repository trait.

use async_trait::async_trait;

use super::errors::CatalogError;
use super::product::Product;
use crate::domain::shared::ProductId;

/// Repository trait for Product persistence.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Save a product (insert or update).
    ///
    /// # Errors
    ///
    /// Returns `DuplicateCode` when inserting a product whose SKU is taken
    /// by a different product.
    async fn save(&self, product: &Product) -> Result<(), CatalogError>;

    /// Find a product by id.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, CatalogError>;

    /// Find a product by SKU.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_by_code(&self, code: &str) -> Result<Option<Product>, CatalogError>;

    /// List all products, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn list(&self) -> Result<Vec<Product>, CatalogError>;

    /// List active products, ordered by name (the bot's product picker).
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn list_active(&self) -> Result<Vec<Product>, CatalogError>;
}
