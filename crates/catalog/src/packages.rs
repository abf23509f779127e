//! Package listing with the derived `Started` flag.

use chrono::{DateTime, Utc};
use common::PackageId;
use rust_decimal::Decimal;
use serde::Serialize;
use store::PackageRow;

/// A package as shown in the catalog.
///
/// `started` is derived per request and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PackageListing {
    pub package_id: PackageId,
    pub pkg_name: String,
    pub pkg_desc: Option<String>,
    pub pkg_start_date: DateTime<Utc>,
    pub pkg_end_date: DateTime<Utc>,
    pub pkg_base_price: Decimal,
    pub pkg_agency_commission: Option<Decimal>,
    pub started: bool,
}

impl PackageListing {
    /// Builds the listing for `row` as seen at `now`.
    pub fn from_row(row: PackageRow, now: DateTime<Utc>) -> Self {
        Self {
            started: row.pkg_start_date < now,
            package_id: row.package_id,
            pkg_name: row.pkg_name,
            pkg_desc: row.pkg_desc,
            pkg_start_date: row.pkg_start_date,
            pkg_end_date: row.pkg_end_date,
            pkg_base_price: row.pkg_base_price,
            pkg_agency_commission: row.pkg_agency_commission,
        }
    }
}

/// Returns the earliest end date a listed package may have at `now`:
/// midnight (UTC) of the current day.
///
/// Expiry is by calendar day, not instant: a package whose end time passed
/// earlier today is still listed until the UTC day is over. Days are UTC
/// regardless of the server's local zone.
pub fn expiry_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive()
        .and_hms_opt(0, 0, 0)
        .map(|midnight| midnight.and_utc())
        .unwrap_or(now)
}
