//! Booking service placing customer-linked bookings.

use chrono::{DateTime, Utc};
use common::{BookingId, BookingNo, CustomerId};
use serde::Serialize;
use store::{NewBooking, StoreError, TravelStore};

use super::number::{BookingNumberGenerator, RandomBookingNumbers};
use super::request::PlaceBooking;
use crate::error::DomainError;

/// How many booking numbers are tried before giving up.
pub const MAX_BOOKING_NO_ATTEMPTS: u32 = 5;

/// What the client is shown after a successful booking.
///
/// Built from the validated request and the keys returned by the store,
/// not re-read from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BookingConfirmation {
    pub booking_no: BookingNo,
    pub booking_id: BookingId,
    pub customer_id: CustomerId,
    pub pkg_name: String,
    pub booking_date: DateTime<Utc>,
    pub traveler_count: i32,
    pub cust_first_name: String,
    pub cust_last_name: String,
    pub cust_email: String,
}

/// Service for placing bookings.
///
/// Every booking creates a new customer row; the customer and booking are
/// written in one store transaction.
pub struct BookingService<S, G = RandomBookingNumbers>
where
    S: TravelStore,
    G: BookingNumberGenerator,
{
    store: S,
    numbers: G,
}

impl<S: TravelStore> BookingService<S> {
    /// Creates a booking service drawing random booking numbers.
    pub fn new(store: S) -> Self {
        Self::with_generator(store, RandomBookingNumbers)
    }
}

impl<S, G> BookingService<S, G>
where
    S: TravelStore,
    G: BookingNumberGenerator,
{
    /// Creates a booking service with a custom booking number source.
    pub fn with_generator(store: S, numbers: G) -> Self {
        Self { store, numbers }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Places a booking.
    ///
    /// Resolves the package reference, then writes the customer and booking
    /// as one unit. A booking number collision rolls the unit back and is
    /// retried with a fresh number, up to [`MAX_BOOKING_NO_ATTEMPTS`] times.
    #[tracing::instrument(
        skip(self, cmd),
        fields(correlation_id = %uuid::Uuid::new_v4(), package = %cmd.package)
    )]
    pub async fn place_booking(
        &self,
        cmd: PlaceBooking,
    ) -> Result<BookingConfirmation, DomainError> {
        let started = std::time::Instant::now();
        let result = self.place(cmd).await;
        metrics::histogram!("booking_duration_seconds").record(started.elapsed().as_secs_f64());

        match &result {
            Ok(confirmation) => {
                metrics::counter!("bookings_created_total").increment(1);
                tracing::info!(
                    booking_id = %confirmation.booking_id,
                    booking_no = %confirmation.booking_no,
                    "booking placed"
                );
            }
            Err(err) if err.is_client_error() => {
                tracing::info!(error = %err, "booking rejected");
            }
            Err(err) => {
                metrics::counter!("bookings_failed_total").increment(1);
                tracing::error!(error = %err, "booking failed");
            }
        }

        result
    }

    async fn place(&self, cmd: PlaceBooking) -> Result<BookingConfirmation, DomainError> {
        let package = self
            .store
            .find_package(&cmd.package)
            .await?
            .ok_or_else(|| DomainError::PackageNotFound(cmd.package.clone()))?;

        let customer = cmd.customer.to_new_customer();
        let booking_date = Utc::now();

        for attempt in 1..=MAX_BOOKING_NO_ATTEMPTS {
            let booking = NewBooking {
                customer: customer.clone(),
                package_id: package.package_id,
                traveler_count: cmd.traveler_count.get(),
                booking_no: self.numbers.generate(),
                booking_date,
            };

            match self.store.place_booking(&booking).await {
                Ok(placed) => {
                    return Ok(BookingConfirmation {
                        booking_no: booking.booking_no,
                        booking_id: placed.booking_id,
                        customer_id: placed.customer_id,
                        pkg_name: package.pkg_name,
                        booking_date,
                        traveler_count: booking.traveler_count,
                        cust_first_name: cmd.customer.first_name().to_string(),
                        cust_last_name: cmd.customer.last_name().to_string(),
                        cust_email: cmd.customer.email().to_string(),
                    });
                }
                Err(StoreError::DuplicateBookingNo(booking_no)) => {
                    metrics::counter!("booking_number_collisions_total").increment(1);
                    tracing::warn!(%booking_no, attempt, "booking number collision");
                }
                Err(err) => return Err(err.into()),
            }
        }

        Err(DomainError::BookingNumberExhausted {
            attempts: MAX_BOOKING_NO_ATTEMPTS,
        })
    }
}
