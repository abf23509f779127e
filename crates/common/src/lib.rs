//! Shared identifier types for the travel booking backend.

mod types;

pub use types::{AgencyId, AgentId, BookingId, BookingNo, CustomerId, PackageId};
