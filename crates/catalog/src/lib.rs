//! Read-side aggregation for the travel catalog.
//!
//! This crate turns flat relational rows into API-facing structures:
//! - [`PackageListing`] with the per-request `Started` flag
//! - [`AgencyListing`] with its nested [`AgentListing`]s, folded from an
//!   agency/agent outer join
//! - [`Catalog`] service that reads from a [`store::TravelStore`]

pub mod agencies;
pub mod error;
pub mod packages;
pub mod service;

pub use agencies::{AgencyListing, AgentListing, fold_agency_rows};
pub use error::{CatalogError, Result};
pub use packages::{PackageListing, expiry_cutoff};
pub use service::Catalog;
