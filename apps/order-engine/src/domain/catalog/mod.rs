//! Catalog context: products, recipes, production parameters.

pub mod errors;
pub mod product;
pub mod repository;

pub use errors::CatalogError;
pub use product::{Product, Unit};
pub use repository::ProductRepository;
