//! Product DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::{Product, Unit};
use crate::domain::shared::Document;

/// Request body for product creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductDto {
    /// Human-assigned SKU. Must be unique.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Measurement unit.
    pub unit: Unit,
    /// Ingredient list + yield.
    #[serde(default)]
    pub base_recipe: Option<Document>,
    /// Timing/temperature/batch-size hints.
    #[serde(default)]
    pub production_parameters: Option<Document>,
}

/// Request body for product update. Absent fields stay unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProductDto {
    /// New display name.
    #[serde(default)]
    pub name: Option<String>,
    /// New measurement unit.
    #[serde(default)]
    pub unit: Option<Unit>,
    /// New recipe document.
    #[serde(default)]
    pub base_recipe: Option<Document>,
    /// New production parameters document.
    #[serde(default)]
    pub production_parameters: Option<Document>,
    /// Activate or deactivate the product.
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Product representation returned by the API. The domain entity already
/// has the wire shape, so it is re-serialized directly.
pub type ProductDto = Product;
