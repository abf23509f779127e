//! Relational store boundary for the travel booking backend.
//!
//! The [`TravelStore`] trait is the only way the catalog and booking layers
//! touch persisted rows. Two implementations are provided:
//! - [`PgTravelStore`] backed by a PostgreSQL pool (sqlx)
//! - [`InMemoryTravelStore`] with the same constraint semantics, for tests and
//!   local development

pub mod error;
pub mod memory;
pub mod postgres;
pub mod query;
pub mod rows;
pub mod store;

pub use common::{AgencyId, AgentId, BookingId, BookingNo, CustomerId, PackageId};
pub use error::{Result, StoreError};
pub use memory::{AgencyRecord, AgentRecord, InMemoryTravelStore, StoredBooking, StoredCustomer};
pub use postgres::PgTravelStore;
pub use query::PackageRef;
pub use rows::{
    AgencyAgentRow, AgentRow, DEFAULT_TRIP_TYPE_ID, DEFAULT_TRIP_TYPE_NAME, NewBooking,
    NewCustomer, PackageRow, PlacedBooking,
};
pub use store::TravelStore;
