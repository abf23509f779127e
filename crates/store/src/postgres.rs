use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgExecutor, PgPool, Row, postgres::PgRow};

use crate::{
    AgencyAgentRow, AgencyId, AgentId, AgentRow, BookingId, BookingNo, CustomerId,
    DEFAULT_TRIP_TYPE_ID, DEFAULT_TRIP_TYPE_NAME, NewBooking, NewCustomer, PackageId, PackageRef,
    PackageRow, PlacedBooking, Result, StoreError, TravelStore,
};

const BOOKING_NO_CONSTRAINT: &str = "bookings_booking_no_key";

const PACKAGE_COLUMNS: &str = "package_id, pkg_name, pkg_desc, pkg_start_date, pkg_end_date, \
                               pkg_base_price, pkg_agency_commission";

/// PostgreSQL-backed travel store.
///
/// Holds the pool it was constructed with; every operation acquires its own
/// connection or transaction and releases it before returning.
#[derive(Clone)]
pub struct PgTravelStore {
    pool: PgPool,
}

impl PgTravelStore {
    /// Creates a new PostgreSQL travel store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }

    fn row_to_package(row: PgRow) -> Result<PackageRow> {
        Ok(PackageRow {
            package_id: PackageId::new(row.try_get("package_id")?),
            pkg_name: row.try_get("pkg_name")?,
            pkg_desc: row.try_get("pkg_desc")?,
            pkg_start_date: row.try_get("pkg_start_date")?,
            pkg_end_date: row.try_get("pkg_end_date")?,
            pkg_base_price: row.try_get("pkg_base_price")?,
            pkg_agency_commission: row.try_get("pkg_agency_commission")?,
        })
    }

    fn row_to_agency_agent(row: PgRow) -> Result<AgencyAgentRow> {
        let agent = match row.try_get::<Option<i32>, _>("agent_id")? {
            Some(agent_id) => Some(AgentRow {
                agent_id: AgentId::new(agent_id),
                agt_first_name: row.try_get("agt_first_name")?,
                agt_last_name: row.try_get("agt_last_name")?,
                agt_bus_phone: row.try_get("agt_bus_phone")?,
                agt_email: row.try_get("agt_email")?,
            }),
            None => None,
        };

        Ok(AgencyAgentRow {
            agency_id: AgencyId::new(row.try_get("agency_id")?),
            agncy_address: row.try_get("agncy_address")?,
            agncy_city: row.try_get("agncy_city")?,
            agncy_prov: row.try_get("agncy_prov")?,
            agncy_postal: row.try_get("agncy_postal")?,
            agncy_country: row.try_get("agncy_country")?,
            agncy_phone: row.try_get("agncy_phone")?,
            agncy_fax: row.try_get("agncy_fax")?,
            agent,
        })
    }

    async fn insert_customer_with<'e, E: PgExecutor<'e>>(
        executor: E,
        customer: &NewCustomer,
    ) -> Result<CustomerId> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO customers
                (cust_first_name, cust_last_name, cust_address, cust_city, cust_prov,
                 cust_postal, cust_country, cust_home_phone, cust_bus_phone, cust_email)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING customer_id
            "#,
        )
        .bind(&customer.cust_first_name)
        .bind(&customer.cust_last_name)
        .bind(&customer.cust_address)
        .bind(&customer.cust_city)
        .bind(&customer.cust_prov)
        .bind(&customer.cust_postal)
        .bind(&customer.cust_country)
        .bind(&customer.cust_home_phone)
        .bind(&customer.cust_bus_phone)
        .bind(&customer.cust_email)
        .fetch_one(executor)
        .await?;

        Ok(CustomerId::new(id))
    }

    /// Returns an existing trip type code, seeding the default one if the
    /// table is empty.
    ///
    /// A concurrent transaction seeding the same row makes the insert wait
    /// for it and then do nothing, which leaves the default row in place
    /// either way.
    async fn ensure_trip_type(conn: &mut PgConnection) -> Result<String> {
        let existing: Option<String> =
            sqlx::query_scalar("SELECT trip_type_id FROM triptypes ORDER BY trip_type_id LIMIT 1")
                .fetch_optional(&mut *conn)
                .await?;

        if let Some(trip_type_id) = existing {
            return Ok(trip_type_id);
        }

        let seeded = sqlx::query(
            r#"
            INSERT INTO triptypes (trip_type_id, tt_name)
            VALUES ($1, $2)
            ON CONFLICT (trip_type_id) DO NOTHING
            "#,
        )
        .bind(DEFAULT_TRIP_TYPE_ID)
        .bind(DEFAULT_TRIP_TYPE_NAME)
        .execute(&mut *conn)
        .await?;

        if seeded.rows_affected() == 0 {
            tracing::debug!("default trip type seeded concurrently");
        } else {
            tracing::info!(trip_type_id = DEFAULT_TRIP_TYPE_ID, "seeded default trip type");
        }

        Ok(DEFAULT_TRIP_TYPE_ID.to_string())
    }

    async fn insert_booking(
        conn: &mut PgConnection,
        booking: &NewBooking,
        customer_id: CustomerId,
        trip_type_id: &str,
    ) -> Result<BookingId> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO bookings
                (booking_date, booking_no, traveler_count, customer_id, package_id, trip_type_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING booking_id
            "#,
        )
        .bind(booking.booking_date)
        .bind(booking.booking_no.as_str())
        .bind(booking.traveler_count)
        .bind(customer_id.as_i32())
        .bind(booking.package_id.as_i32())
        .bind(trip_type_id)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| classify_booking_error(e, &booking.booking_no))?;

        Ok(BookingId::new(id))
    }
}

/// Maps constraint violations raised by the booking insert to typed errors.
fn classify_booking_error(err: sqlx::Error, booking_no: &BookingNo) -> StoreError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.is_unique_violation() && db_err.constraint() == Some(BOOKING_NO_CONSTRAINT) {
            return StoreError::DuplicateBookingNo(booking_no.clone());
        }
        if db_err.is_foreign_key_violation() {
            return StoreError::ForeignKeyViolation {
                constraint: db_err.constraint().unwrap_or("unknown").to_string(),
            };
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl TravelStore for PgTravelStore {
    async fn list_packages_ending_after(&self, cutoff: DateTime<Utc>) -> Result<Vec<PackageRow>> {
        let sql = format!(
            "SELECT {PACKAGE_COLUMNS} FROM packages \
             WHERE pkg_end_date >= $1 \
             ORDER BY pkg_start_date ASC, package_id ASC"
        );
        let rows = sqlx::query(&sql).bind(cutoff).fetch_all(&self.pool).await?;

        rows.into_iter().map(Self::row_to_package).collect()
    }

    async fn list_agency_agent_rows(&self) -> Result<Vec<AgencyAgentRow>> {
        let rows = sqlx::query(
            r#"
            SELECT a.agency_id, a.agncy_address, a.agncy_city, a.agncy_prov, a.agncy_postal,
                   a.agncy_country, a.agncy_phone, a.agncy_fax,
                   g.agent_id, g.agt_first_name, g.agt_last_name, g.agt_bus_phone, g.agt_email
            FROM agencies a
            LEFT JOIN agents g ON g.agency_id = a.agency_id
            ORDER BY a.agency_id ASC, g.agt_last_name ASC, g.agent_id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_agency_agent).collect()
    }

    async fn find_package(&self, reference: &PackageRef) -> Result<Option<PackageRow>> {
        let row = match reference {
            PackageRef::Id(id) => {
                let sql = format!("SELECT {PACKAGE_COLUMNS} FROM packages WHERE package_id = $1");
                sqlx::query(&sql)
                    .bind(id.as_i32())
                    .fetch_optional(&self.pool)
                    .await?
            }
            PackageRef::Name(name) => {
                let sql = format!(
                    "SELECT {PACKAGE_COLUMNS} FROM packages \
                     WHERE pkg_name = $1 ORDER BY package_id ASC LIMIT 1"
                );
                sqlx::query(&sql)
                    .bind(name)
                    .fetch_optional(&self.pool)
                    .await?
            }
        };

        row.map(Self::row_to_package).transpose()
    }

    async fn insert_customer(&self, customer: &NewCustomer) -> Result<CustomerId> {
        Self::insert_customer_with(&self.pool, customer).await
    }

    async fn place_booking(&self, booking: &NewBooking) -> Result<PlacedBooking> {
        // Dropping `tx` on any early return rolls the whole unit back.
        let mut tx = self.pool.begin().await?;

        let trip_type_id = Self::ensure_trip_type(&mut tx).await?;
        let customer_id = Self::insert_customer_with(&mut *tx, &booking.customer).await?;
        let booking_id =
            Self::insert_booking(&mut tx, booking, customer_id, &trip_type_id).await?;

        tx.commit().await?;

        Ok(PlacedBooking {
            booking_id,
            customer_id,
            trip_type_id,
        })
    }
}
