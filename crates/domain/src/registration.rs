//! Standalone customer registration.

use common::CustomerId;
use store::TravelStore;

use crate::customer::{ContactInput, CustomerDetails};
use crate::error::{DomainError, ValidationError};

/// Command to register a customer without booking anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterCustomer {
    pub customer: CustomerDetails,
}

impl RegisterCustomer {
    pub fn new(contact: ContactInput) -> Result<Self, ValidationError> {
        Ok(Self {
            customer: CustomerDetails::from_input(contact)?,
        })
    }
}

/// Service inserting customer rows.
pub struct RegistrationService<S: TravelStore> {
    store: S,
}

impl<S: TravelStore> RegistrationService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Inserts one customer row and returns its generated id.
    #[tracing::instrument(skip(self, cmd))]
    pub async fn register(&self, cmd: RegisterCustomer) -> Result<CustomerId, DomainError> {
        let customer_id = self
            .store
            .insert_customer(&cmd.customer.to_new_customer())
            .await
            .inspect_err(|err| tracing::error!(error = %err, "customer registration failed"))?;

        metrics::counter!("customers_registered_total").increment(1);
        tracing::info!(%customer_id, "customer registered");

        Ok(customer_id)
    }
}
