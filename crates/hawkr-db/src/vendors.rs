//! Database operations for the `vendors` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A row from the `vendors` table, with the geography column unpacked into
/// plain coordinates.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct VendorRow {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub business_hours: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Insert a new vendor with its registration location and return the
/// generated id (`v_` + 8 hex chars).
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn create_vendor(
    pool: &PgPool,
    name: &str,
    phone: &str,
    lat: f64,
    lng: f64,
) -> Result<String, DbError> {
    let vendor_id = hawkr_core::prefixed_id('v');

    sqlx::query(
        "INSERT INTO vendors (id, name, phone, location) \
         VALUES ($1, $2, $3, ST_SetSRID(ST_MakePoint($4, $5), 4326)::geography)",
    )
    .bind(&vendor_id)
    .bind(name)
    .bind(phone)
    .bind(lng)
    .bind(lat)
    .execute(pool)
    .await?;

    Ok(vendor_id)
}

/// Fetch a single vendor by id, or `None` if it does not exist.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_vendor(pool: &PgPool, vendor_id: &str) -> Result<Option<VendorRow>, DbError> {
    let row = sqlx::query_as::<_, VendorRow>(
        "SELECT id, name, phone, business_hours, \
                ST_Y(location::geometry) AS lat, \
                ST_X(location::geometry) AS lng, \
                created_at, updated_at \
         FROM vendors \
         WHERE id = $1",
    )
    .bind(vendor_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Sparse update of vendor-owned fields. `None` keeps the current value.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no vendor has this id, or
/// [`DbError::Sqlx`] if the update fails.
pub async fn update_vendor(
    pool: &PgPool,
    vendor_id: &str,
    name: Option<&str>,
    business_hours: Option<&str>,
) -> Result<(), DbError> {
    let result = sqlx::query(
        "UPDATE vendors \
         SET name = COALESCE($2, name), \
             business_hours = COALESCE($3, business_hours), \
             updated_at = NOW() \
         WHERE id = $1",
    )
    .bind(vendor_id)
    .bind(name)
    .bind(business_hours)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}
