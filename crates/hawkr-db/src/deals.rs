//! Database operations for the `deals` table.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// Input record for creating a deal.
#[derive(Debug, Clone)]
pub struct NewDeal {
    pub vendor_id: String,
    pub item_name: String,
    pub original_price: Option<Decimal>,
    pub deal_price: Decimal,
    pub expires_at: Option<DateTime<Utc>>,
}

/// An active deal near a query point, joined with its vendor.
///
/// `distance_m` is `None` when the deal carries no location (the vendor had
/// none at deal creation); such rows sort last.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DealNearbyRow {
    pub deal_id: String,
    pub vendor_id: String,
    pub vendor_name: Option<String>,
    pub item_name: String,
    pub original_price: Option<Decimal>,
    pub deal_price: Decimal,
    pub expires_at: Option<DateTime<Utc>>,
    pub distance_m: Option<f64>,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Create a deal for a vendor, pinning it to the vendor's current location.
///
/// Returns the generated deal id (`d_` + 8 hex).
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if the vendor does not exist, or
/// [`DbError::Sqlx`] if the insert fails.
pub async fn create_deal(pool: &PgPool, deal: &NewDeal) -> Result<String, DbError> {
    let deal_id = hawkr_core::prefixed_id('d');

    let inserted = sqlx::query_scalar::<_, String>(
        "INSERT INTO deals \
             (id, vendor_id, item_name, original_price, deal_price, expires_at, location, is_active) \
         SELECT $1::text, v.id, $3::text, $4::numeric, $5::numeric, $6::timestamptz, v.location, true \
         FROM vendors v \
         WHERE v.id = $2 \
         RETURNING id",
    )
    .bind(&deal_id)
    .bind(&deal.vendor_id)
    .bind(&deal.item_name)
    .bind(deal.original_price)
    .bind(deal.deal_price)
    .bind(deal.expires_at)
    .fetch_optional(pool)
    .await?;

    inserted.ok_or(DbError::NotFound)
}

/// Active, unexpired deals ordered by distance to `(lat, lng)` ascending,
/// capped at `limit`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_deals_nearby(
    pool: &PgPool,
    lat: f64,
    lng: f64,
    limit: i64,
) -> Result<Vec<DealNearbyRow>, DbError> {
    let rows = sqlx::query_as::<_, DealNearbyRow>(
        "SELECT d.id AS deal_id, \
                d.vendor_id, \
                v.name AS vendor_name, \
                d.item_name, \
                d.original_price, \
                d.deal_price, \
                d.expires_at, \
                ST_Distance(d.location, ST_SetSRID(ST_MakePoint($2, $1), 4326)::geography) AS distance_m \
         FROM deals d \
         LEFT JOIN vendors v ON v.id = d.vendor_id \
         WHERE d.is_active = true \
           AND (d.expires_at IS NULL OR d.expires_at > NOW()) \
         ORDER BY distance_m ASC \
         LIMIT $3",
    )
    .bind(lat)
    .bind(lng)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Deactivate deals whose expiry has passed. Returns the number of rows
/// flipped; the background sweep logs this.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the update fails.
pub async fn deactivate_expired_deals(pool: &PgPool) -> Result<u64, DbError> {
    let result = sqlx::query(
        "UPDATE deals \
         SET is_active = false \
         WHERE is_active = true \
           AND expires_at IS NOT NULL \
           AND expires_at <= NOW()",
    )
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
