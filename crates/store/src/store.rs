use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    AgencyAgentRow, CustomerId, NewBooking, NewCustomer, PackageRef, PackageRow, PlacedBooking,
    Result,
};

/// Core trait for relational store implementations.
///
/// Implementations own every persisted row; callers hold nothing beyond the
/// lifetime of one request. All implementations must be thread-safe
/// (Send + Sync) since one handle is shared by every request.
#[async_trait]
pub trait TravelStore: Send + Sync {
    /// Lists packages whose end date is on or after `cutoff`.
    ///
    /// Ordered by start date ascending, ties broken by package id so the
    /// order is stable between calls.
    async fn list_packages_ending_after(&self, cutoff: DateTime<Utc>) -> Result<Vec<PackageRow>>;

    /// Lists every agency outer-joined with its agents.
    ///
    /// Ordered by agency id, then agent last name, then agent id. An agency
    /// without agents yields exactly one row with `agent: None`.
    async fn list_agency_agent_rows(&self) -> Result<Vec<AgencyAgentRow>>;

    /// Finds a package by id or by exact name.
    async fn find_package(&self, reference: &PackageRef) -> Result<Option<PackageRow>>;

    /// Inserts a single customer row.
    async fn insert_customer(&self, customer: &NewCustomer) -> Result<CustomerId>;

    /// Writes a booking as one atomic unit.
    ///
    /// Inside a single transaction: resolves a trip type (seeding the default
    /// one if the table is empty, tolerating a concurrent seed), inserts the
    /// customer, then inserts the booking. Either everything commits or
    /// nothing is visible.
    ///
    /// Fails with `DuplicateBookingNo` if the booking number is taken.
    async fn place_booking(&self, booking: &NewBooking) -> Result<PlacedBooking>;
}
