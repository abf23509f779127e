//! Booking creation endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use domain::{BookingConfirmation, PlaceBooking, TravelerCount, package_ref_from_input};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use store::TravelStore;

use super::customers::ContactFields;
use crate::error::{ApiError, Operation};
use crate::state::AppState;

/// Booking request as posted by the client.
///
/// `TravelerCount` and `PackageId` are kept loosely typed; the domain layer
/// decides how to read them.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BookingRequest {
    #[serde(flatten)]
    pub contact: ContactFields,
    pub traveler_count: Option<Value>,
    pub package_id: Option<Value>,
    #[serde(alias = "package")]
    pub pkg_name: Option<String>,
}

#[derive(Serialize)]
pub struct BookingResponse {
    pub ok: bool,
    pub booking: BookingConfirmation,
}

/// POST /api/bookings (also mounted at /api/orders).
#[tracing::instrument(skip(state, payload))]
pub async fn create<S: TravelStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<Json<BookingResponse>, ApiError> {
    let Json(req) = payload?;
    let bad_request = |e: domain::ValidationError| ApiError::from_domain(Operation::Order, e.into());

    let package = package_ref_from_input(req.package_id.as_ref(), req.pkg_name.as_deref())
        .map_err(bad_request)?;
    let traveler_count = TravelerCount::from_input(req.traveler_count.as_ref());
    let cmd = PlaceBooking::new(req.contact.into(), traveler_count, package).map_err(bad_request)?;

    let booking = state
        .bookings
        .place_booking(cmd)
        .await
        .map_err(|e| ApiError::from_domain(Operation::Order, e))?;

    Ok(Json(BookingResponse { ok: true, booking }))
}
