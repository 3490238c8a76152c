//! Catalog context errors.

use std::fmt;

/// Errors from product lookup and persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Product not found.
    NotFound {
        /// Product id or code used for the lookup.
        key: String,
    },

    /// Product code already taken.
    DuplicateCode {
        /// The conflicting SKU.
        code: String,
    },

    /// Persistence failure.
    Storage {
        /// Error message.
        message: String,
    },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { key } => write!(f, "Product not found: {key}"),
            Self::DuplicateCode { code } => write!(f, "Product code already exists: {code}"),
            Self::Storage { message } => write!(f, "Product storage error: {message}"),
        }
    }
}

impl std::error::Error for CatalogError {}
