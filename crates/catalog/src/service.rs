//! Catalog service reading listings from the relational store.

use chrono::{DateTime, Utc};
use store::TravelStore;

use crate::Result;
use crate::agencies::{AgencyListing, fold_agency_rows};
use crate::packages::{PackageListing, expiry_cutoff};

/// Read-only catalog over a [`TravelStore`].
///
/// Holds no cached rows; every call reads the store.
pub struct Catalog<S: TravelStore> {
    store: S,
}

impl<S: TravelStore> Catalog<S> {
    /// Creates a catalog over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Lists packages that have not ended yet, in start-date order.
    pub async fn list_packages(&self) -> Result<Vec<PackageListing>> {
        self.list_packages_at(Utc::now()).await
    }

    /// Lists packages as seen at `now`.
    #[tracing::instrument(skip(self))]
    pub async fn list_packages_at(&self, now: DateTime<Utc>) -> Result<Vec<PackageListing>> {
        metrics::counter!("catalog_requests_total", "listing" => "packages").increment(1);

        let rows = self
            .store
            .list_packages_ending_after(expiry_cutoff(now))
            .await?;

        let listings: Vec<_> = rows
            .into_iter()
            .map(|row| PackageListing::from_row(row, now))
            .collect();

        tracing::debug!(count = listings.len(), "listed packages");
        Ok(listings)
    }

    /// Lists every agency with its agents.
    #[tracing::instrument(skip(self))]
    pub async fn list_agencies(&self) -> Result<Vec<AgencyListing>> {
        metrics::counter!("catalog_requests_total", "listing" => "agencies").increment(1);

        let rows = self.store.list_agency_agent_rows().await?;
        let listings = fold_agency_rows(rows);

        tracing::debug!(count = listings.len(), "listed agencies");
        Ok(listings)
    }
}
