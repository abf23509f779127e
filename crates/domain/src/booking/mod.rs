//! Booking placement.

mod number;
mod request;
mod service;

pub use number::{BookingNumberGenerator, RandomBookingNumbers};
pub use request::{PlaceBooking, TravelerCount, package_ref_from_input};
pub use service::{BookingConfirmation, BookingService, MAX_BOOKING_NO_ATTEMPTS};
