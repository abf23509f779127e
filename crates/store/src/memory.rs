use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::{
    AgencyAgentRow, AgencyId, AgentId, AgentRow, BookingId, BookingNo, CustomerId,
    DEFAULT_TRIP_TYPE_ID, DEFAULT_TRIP_TYPE_NAME, NewBooking, NewCustomer, PackageId, PackageRef,
    PackageRow, PlacedBooking, Result, StoreError, TravelStore,
};

/// An agency row as held by the in-memory store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgencyRecord {
    pub agency_id: AgencyId,
    pub agncy_address: Option<String>,
    pub agncy_city: Option<String>,
    pub agncy_prov: Option<String>,
    pub agncy_postal: Option<String>,
    pub agncy_country: Option<String>,
    pub agncy_phone: Option<String>,
    pub agncy_fax: Option<String>,
}

impl AgencyRecord {
    /// Creates an agency with only a city filled in.
    pub fn new(agency_id: AgencyId, city: impl Into<String>) -> Self {
        Self {
            agency_id,
            agncy_address: None,
            agncy_city: Some(city.into()),
            agncy_prov: None,
            agncy_postal: None,
            agncy_country: None,
            agncy_phone: None,
            agncy_fax: None,
        }
    }
}

/// An agent row as held by the in-memory store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentRecord {
    pub agent_id: AgentId,
    pub agency_id: AgencyId,
    pub agt_first_name: Option<String>,
    pub agt_last_name: Option<String>,
    pub agt_bus_phone: Option<String>,
    pub agt_email: Option<String>,
}

impl AgentRecord {
    /// Creates an agent with a name and no contact details.
    pub fn new(
        agent_id: AgentId,
        agency_id: AgencyId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            agent_id,
            agency_id,
            agt_first_name: Some(first_name.into()),
            agt_last_name: Some(last_name.into()),
            agt_bus_phone: None,
            agt_email: None,
        }
    }
}

/// A committed customer row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCustomer {
    pub customer_id: CustomerId,
    pub customer: NewCustomer,
}

/// A committed booking row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBooking {
    pub booking_id: BookingId,
    pub booking_no: BookingNo,
    pub booking_date: DateTime<Utc>,
    pub traveler_count: i32,
    pub customer_id: CustomerId,
    pub package_id: PackageId,
    pub trip_type_id: String,
}

#[derive(Debug, Default)]
struct Tables {
    customers: Vec<StoredCustomer>,
    packages: Vec<PackageRow>,
    agencies: Vec<AgencyRecord>,
    agents: Vec<AgentRecord>,
    trip_types: Vec<(String, String)>,
    bookings: Vec<StoredBooking>,
    next_customer_id: i32,
    next_booking_id: i32,
    fail_on_place_booking: bool,
}

/// In-memory travel store implementation for testing.
///
/// Enforces the same constraints as the PostgreSQL schema that matter to
/// callers: unique booking numbers, the booking-to-package foreign key, and
/// a single default trip type. A booking unit holds the write lock from the
/// first check to the last insert, so it is all-or-nothing.
#[derive(Clone, Default)]
pub struct InMemoryTravelStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryTravelStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a package to the catalog.
    pub async fn add_package(&self, package: PackageRow) {
        self.tables.write().await.packages.push(package);
    }

    /// Adds an agency.
    pub async fn add_agency(&self, agency: AgencyRecord) {
        self.tables.write().await.agencies.push(agency);
    }

    /// Adds an agent.
    pub async fn add_agent(&self, agent: AgentRecord) {
        self.tables.write().await.agents.push(agent);
    }

    /// Adds a trip type.
    pub async fn add_trip_type(&self, trip_type_id: impl Into<String>, name: impl Into<String>) {
        self.tables
            .write()
            .await
            .trip_types
            .push((trip_type_id.into(), name.into()));
    }

    /// Makes every subsequent `place_booking` fail as if the database were
    /// unreachable mid-transaction.
    pub async fn set_fail_on_place_booking(&self, fail: bool) {
        self.tables.write().await.fail_on_place_booking = fail;
    }

    /// Returns all committed customers.
    pub async fn customers(&self) -> Vec<StoredCustomer> {
        self.tables.read().await.customers.clone()
    }

    /// Returns all committed bookings.
    pub async fn bookings(&self) -> Vec<StoredBooking> {
        self.tables.read().await.bookings.clone()
    }

    /// Returns the trip type codes in insertion order.
    pub async fn trip_type_ids(&self) -> Vec<String> {
        self.tables
            .read()
            .await
            .trip_types
            .iter()
            .map(|(id, _)| id.clone())
            .collect()
    }
}

impl Tables {
    fn insert_customer(&mut self, customer: &NewCustomer) -> CustomerId {
        self.next_customer_id += 1;
        let customer_id = CustomerId::new(self.next_customer_id);
        self.customers.push(StoredCustomer {
            customer_id,
            customer: customer.clone(),
        });
        customer_id
    }

    fn agency_rows(&self, agency: &AgencyRecord) -> Vec<AgencyAgentRow> {
        let mut agents: Vec<&AgentRecord> = self
            .agents
            .iter()
            .filter(|a| a.agency_id == agency.agency_id)
            .collect();
        // PostgreSQL sorts NULL last names after every other name.
        agents.sort_by(|a, b| {
            a.agt_last_name
                .is_none()
                .cmp(&b.agt_last_name.is_none())
                .then(a.agt_last_name.cmp(&b.agt_last_name))
                .then(a.agent_id.cmp(&b.agent_id))
        });

        let base = AgencyAgentRow {
            agency_id: agency.agency_id,
            agncy_address: agency.agncy_address.clone(),
            agncy_city: agency.agncy_city.clone(),
            agncy_prov: agency.agncy_prov.clone(),
            agncy_postal: agency.agncy_postal.clone(),
            agncy_country: agency.agncy_country.clone(),
            agncy_phone: agency.agncy_phone.clone(),
            agncy_fax: agency.agncy_fax.clone(),
            agent: None,
        };

        if agents.is_empty() {
            return vec![base];
        }

        agents
            .into_iter()
            .map(|a| AgencyAgentRow {
                agent: Some(AgentRow {
                    agent_id: a.agent_id,
                    agt_first_name: a.agt_first_name.clone(),
                    agt_last_name: a.agt_last_name.clone(),
                    agt_bus_phone: a.agt_bus_phone.clone(),
                    agt_email: a.agt_email.clone(),
                }),
                ..base.clone()
            })
            .collect()
    }
}

#[async_trait]
impl TravelStore for InMemoryTravelStore {
    async fn list_packages_ending_after(&self, cutoff: DateTime<Utc>) -> Result<Vec<PackageRow>> {
        let tables = self.tables.read().await;
        let mut packages: Vec<_> = tables
            .packages
            .iter()
            .filter(|p| p.pkg_end_date >= cutoff)
            .cloned()
            .collect();

        packages.sort_by(|a, b| {
            a.pkg_start_date
                .cmp(&b.pkg_start_date)
                .then(a.package_id.cmp(&b.package_id))
        });

        Ok(packages)
    }

    async fn list_agency_agent_rows(&self) -> Result<Vec<AgencyAgentRow>> {
        let tables = self.tables.read().await;
        let mut agencies: Vec<&AgencyRecord> = tables.agencies.iter().collect();
        agencies.sort_by_key(|a| a.agency_id);

        Ok(agencies
            .into_iter()
            .flat_map(|agency| tables.agency_rows(agency))
            .collect())
    }

    async fn find_package(&self, reference: &PackageRef) -> Result<Option<PackageRow>> {
        let tables = self.tables.read().await;
        let found = match reference {
            PackageRef::Id(id) => tables.packages.iter().find(|p| p.package_id == *id),
            PackageRef::Name(name) => tables
                .packages
                .iter()
                .filter(|p| &p.pkg_name == name)
                .min_by_key(|p| p.package_id),
        };
        Ok(found.cloned())
    }

    async fn insert_customer(&self, customer: &NewCustomer) -> Result<CustomerId> {
        Ok(self.tables.write().await.insert_customer(customer))
    }

    async fn place_booking(&self, booking: &NewBooking) -> Result<PlacedBooking> {
        let mut tables = self.tables.write().await;

        // Every check runs before the first mutation.
        if tables.fail_on_place_booking {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        if !tables
            .packages
            .iter()
            .any(|p| p.package_id == booking.package_id)
        {
            return Err(StoreError::ForeignKeyViolation {
                constraint: "bookings_package_id_fkey".to_string(),
            });
        }
        if tables
            .bookings
            .iter()
            .any(|b| b.booking_no == booking.booking_no)
        {
            return Err(StoreError::DuplicateBookingNo(booking.booking_no.clone()));
        }

        let existing = tables.trip_types.iter().map(|(id, _)| id).min().cloned();
        let trip_type_id = match existing {
            Some(id) => id,
            None => {
                tables.trip_types.push((
                    DEFAULT_TRIP_TYPE_ID.to_string(),
                    DEFAULT_TRIP_TYPE_NAME.to_string(),
                ));
                DEFAULT_TRIP_TYPE_ID.to_string()
            }
        };

        let customer_id = tables.insert_customer(&booking.customer);

        tables.next_booking_id += 1;
        let booking_id = BookingId::new(tables.next_booking_id);
        tables.bookings.push(StoredBooking {
            booking_id,
            booking_no: booking.booking_no.clone(),
            booking_date: booking.booking_date,
            traveler_count: booking.traveler_count,
            customer_id,
            package_id: booking.package_id,
            trip_type_id: trip_type_id.clone(),
        });

        Ok(PlacedBooking {
            booking_id,
            customer_id,
            trip_type_id,
        })
    }
}
