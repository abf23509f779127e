//! Domain layer for the travel booking backend.
//!
//! This crate provides:
//! - Validation of customer contact fields and booking requests
//! - Booking number generation
//! - [`BookingService`], which places a customer-linked booking as one
//!   atomic unit and retries on booking number collisions
//! - [`RegistrationService`] for standalone customer registration

pub mod booking;
pub mod customer;
pub mod error;
pub mod registration;

pub use booking::{
    BookingConfirmation, BookingNumberGenerator, BookingService, MAX_BOOKING_NO_ATTEMPTS,
    PlaceBooking, RandomBookingNumbers, TravelerCount, package_ref_from_input,
};
pub use customer::{ContactInput, CustomerDetails};
pub use error::{DomainError, ValidationError};
pub use registration::{RegisterCustomer, RegistrationService};
