//! Product entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::{Document, ProductId};

/// Unit a product is measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Unit {
    /// Sold by weight.
    Kg,
    /// Sold by count.
    Piece,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kg => write!(f, "KG"),
            Self::Piece => write!(f, "PIECE"),
        }
    }
}

/// A producible product.
///
/// `base_recipe` and `production_parameters` are schema-flexible documents;
/// the core stores them opaquely. `is_active` gates visibility in the bot's
/// product picker but is deliberately not consulted on order creation,
/// matching the reference behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Store-assigned identifier.
    pub id: ProductId,
    /// Human-assigned SKU. Unique.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Measurement unit.
    pub unit: Unit,
    /// Ingredient list + yield.
    pub base_recipe: Document,
    /// Timing/temperature/batch-size hints.
    pub production_parameters: Document,
    /// Whether the product is offered for new orders.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Create a new active product.
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>, unit: Unit) -> Self {
        Self {
            id: ProductId::generate(),
            code: code.into(),
            name: name.into(),
            unit,
            base_recipe: Document::new(),
            production_parameters: Document::new(),
            is_active: true,
            created_at: Utc::now(),
        }
    }
}
