//! Product Catalog Use Cases

use std::sync::Arc;

use crate::application::dto::{CreateProductDto, ProductDto, UpdateProductDto};
use crate::application::errors::AppError;
use crate::domain::access::{capabilities, User};
use crate::domain::catalog::{CatalogError, Product, ProductRepository};
use crate::domain::shared::ProductId;

/// Use case for managing the product catalog.
pub struct ProductsUseCase<P>
where
    P: ProductRepository,
{
    product_repo: Arc<P>,
}

impl<P> ProductsUseCase<P>
where
    P: ProductRepository,
{
    /// Create a new ProductsUseCase.
    pub fn new(product_repo: Arc<P>) -> Self {
        Self { product_repo }
    }

    /// List the catalog. Visible to every authenticated user.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    pub async fn list(&self) -> Result<Vec<ProductDto>, AppError> {
        Ok(self.product_repo.list().await?)
    }

    /// Add a product to the catalog.
    ///
    /// # Errors
    ///
    /// Returns `Authorization` for non-staff callers and `Conflict` when
    /// the SKU is already taken.
    pub async fn create(&self, actor: &User, dto: CreateProductDto) -> Result<ProductDto, AppError> {
        if !capabilities::can_manage_production(actor.role) {
            return Err(AppError::Authorization(
                "Only producers and admins can manage products".to_string(),
            ));
        }

        let mut product = Product::new(dto.code, dto.name, dto.unit);
        if let Some(recipe) = dto.base_recipe {
            product.base_recipe = recipe;
        }
        if let Some(parameters) = dto.production_parameters {
            product.production_parameters = parameters;
        }
        self.product_repo.save(&product).await?;

        tracing::info!(product_id = %product.id, code = %product.code, "product created");
        Ok(product)
    }

    /// Patch a product. Absent fields stay unchanged.
    ///
    /// # Errors
    ///
    /// Returns `Authorization` for non-staff callers and `NotFound` for a
    /// missing product.
    pub async fn update(
        &self,
        actor: &User,
        product_id: &ProductId,
        dto: UpdateProductDto,
    ) -> Result<ProductDto, AppError> {
        if !capabilities::can_manage_production(actor.role) {
            return Err(AppError::Authorization(
                "Only producers and admins can manage products".to_string(),
            ));
        }

        let mut product = self
            .product_repo
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| CatalogError::NotFound {
                key: product_id.to_string(),
            })?;

        if let Some(name) = dto.name {
            product.name = name;
        }
        if let Some(unit) = dto.unit {
            product.unit = unit;
        }
        if let Some(recipe) = dto.base_recipe {
            product.base_recipe = recipe;
        }
        if let Some(parameters) = dto.production_parameters {
            product.production_parameters = parameters;
        }
        if let Some(is_active) = dto.is_active {
            product.is_active = is_active;
        }
        self.product_repo.save(&product).await?;

        Ok(product)
    }
}
