use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AgencyId, AgentId, BookingId, BookingNo, CustomerId, PackageId};

/// Trip type code seeded when `triptypes` is empty.
pub const DEFAULT_TRIP_TYPE_ID: &str = "L";

/// Display name of the seeded trip type.
pub const DEFAULT_TRIP_TYPE_NAME: &str = "Leisure";

/// One row of `packages`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageRow {
    pub package_id: PackageId,
    pub pkg_name: String,
    pub pkg_desc: Option<String>,
    pub pkg_start_date: DateTime<Utc>,
    pub pkg_end_date: DateTime<Utc>,
    pub pkg_base_price: Decimal,
    pub pkg_agency_commission: Option<Decimal>,
}

impl PackageRow {
    /// Creates a package row with no description and no commission.
    pub fn new(
        package_id: PackageId,
        pkg_name: impl Into<String>,
        pkg_start_date: DateTime<Utc>,
        pkg_end_date: DateTime<Utc>,
        pkg_base_price: Decimal,
    ) -> Self {
        Self {
            package_id,
            pkg_name: pkg_name.into(),
            pkg_desc: None,
            pkg_start_date,
            pkg_end_date,
            pkg_base_price,
            pkg_agency_commission: None,
        }
    }
}

/// Agent columns of an agency/agent outer join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRow {
    pub agent_id: AgentId,
    pub agt_first_name: Option<String>,
    pub agt_last_name: Option<String>,
    pub agt_bus_phone: Option<String>,
    pub agt_email: Option<String>,
}

/// One row of `agencies LEFT JOIN agents`.
///
/// `agent` is `None` for an agency that has no agents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgencyAgentRow {
    pub agency_id: AgencyId,
    pub agncy_address: Option<String>,
    pub agncy_city: Option<String>,
    pub agncy_prov: Option<String>,
    pub agncy_postal: Option<String>,
    pub agncy_country: Option<String>,
    pub agncy_phone: Option<String>,
    pub agncy_fax: Option<String>,
    pub agent: Option<AgentRow>,
}

/// Insertable contact fields of a customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub cust_first_name: String,
    pub cust_last_name: String,
    pub cust_email: String,
    pub cust_address: Option<String>,
    pub cust_city: Option<String>,
    pub cust_prov: Option<String>,
    pub cust_postal: Option<String>,
    pub cust_country: Option<String>,
    pub cust_home_phone: Option<String>,
    pub cust_bus_phone: Option<String>,
}

/// Everything written by one booking unit: the customer row and the booking
/// that references it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub customer: NewCustomer,
    pub package_id: PackageId,
    pub traveler_count: i32,
    pub booking_no: BookingNo,
    pub booking_date: DateTime<Utc>,
}

/// Keys produced by a committed booking unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedBooking {
    pub booking_id: BookingId,
    pub customer_id: CustomerId,
    pub trip_type_id: String,
}
