use thiserror::Error;

use crate::BookingNo;

/// Errors that can occur when interacting with the relational store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The booking number is already taken. The whole booking unit was
    /// rolled back and can be retried with a fresh number.
    #[error("Booking number {0} already exists")]
    DuplicateBookingNo(BookingNo),

    /// A referenced row disappeared before the write landed.
    #[error("Foreign key violation on {constraint}")]
    ForeignKeyViolation { constraint: String },

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
