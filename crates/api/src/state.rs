//! Shared application state.

use catalog::Catalog;
use domain::{BookingService, RegistrationService};
use store::TravelStore;

/// Services shared by all handlers; each holds its own handle to the store.
pub struct AppState<S: TravelStore> {
    pub catalog: Catalog<S>,
    pub bookings: BookingService<S>,
    pub registration: RegistrationService<S>,
}

impl<S: TravelStore + Clone> AppState<S> {
    /// Builds every service over clones of the same store handle.
    pub fn new(store: S) -> Self {
        Self {
            catalog: Catalog::new(store.clone()),
            bookings: BookingService::new(store.clone()),
            registration: RegistrationService::new(store),
        }
    }
}
