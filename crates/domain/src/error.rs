//! Domain error types.

use store::{PackageRef, StoreError};
use thiserror::Error;

/// A request was rejected before anything was written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was absent or blank.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A field was present but could not be interpreted.
    #[error("Invalid field: {0}")]
    InvalidField(&'static str),
}

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The request failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The referenced package does not exist.
    #[error("{0} not found")]
    PackageNotFound(PackageRef),

    /// Every generated booking number collided with an existing one.
    #[error("No unique booking number after {attempts} attempts")]
    BookingNumberExhausted { attempts: u32 },

    /// An error occurred in the relational store.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl DomainError {
    /// Returns true if the caller is at fault and retrying the same request
    /// cannot succeed.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DomainError::Validation(_) | DomainError::PackageNotFound(_)
        )
    }
}
