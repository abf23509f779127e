//! Catalog error types.

use thiserror::Error;

/// Errors that can occur while reading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// An error occurred in the relational store.
    #[error("Store error: {0}")]
    Store(#[from] store::StoreError),
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
