//! HTTP route handlers.

pub mod bookings;
pub mod catalog;
pub mod customers;
pub mod health;
pub mod metrics;

use serde::Serialize;

/// Success envelope for list endpoints.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub ok: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { ok: true, data }
    }
}
