//! Database operations for the `menu_items` table.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `menu_items` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MenuItemRow {
    pub id: String,
    pub vendor_id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

/// Input record for bulk menu insertion. Ids are caller-supplied so the
/// extraction pipeline can hand its generated candidate ids straight through.
#[derive(Debug, Clone)]
pub struct NewMenuItem {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Insert a single menu item and return its generated id (`m_` + 8 hex).
///
/// A zero price is allowed here ("unpriced"); only the extraction pipeline
/// guarantees positive prices.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails (including a foreign-key
/// violation for an unknown vendor).
pub async fn insert_menu_item(
    pool: &PgPool,
    vendor_id: &str,
    name: &str,
    description: Option<&str>,
    price: Decimal,
    is_available: bool,
) -> Result<String, DbError> {
    let item_id = hawkr_core::prefixed_id('m');

    sqlx::query(
        "INSERT INTO menu_items (id, vendor_id, name, description, price, is_available) \
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(&item_id)
    .bind(vendor_id)
    .bind(name)
    .bind(description)
    .bind(price)
    .bind(is_available)
    .execute(pool)
    .await?;

    Ok(item_id)
}

/// Bulk-insert menu items for one vendor in a single round-trip.
///
/// Uses `INSERT … SELECT * FROM UNNEST(…)` so the whole batch is one
/// statement regardless of size. Returns the number of rows inserted.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_menu_items(
    pool: &PgPool,
    vendor_id: &str,
    items: &[NewMenuItem],
) -> Result<u64, DbError> {
    if items.is_empty() {
        return Ok(0);
    }

    let mut ids: Vec<String> = Vec::with_capacity(items.len());
    let mut names: Vec<String> = Vec::with_capacity(items.len());
    let mut descriptions: Vec<Option<String>> = Vec::with_capacity(items.len());
    let mut prices: Vec<Decimal> = Vec::with_capacity(items.len());

    for item in items {
        ids.push(item.id.clone());
        names.push(item.name.clone());
        descriptions.push(item.description.clone());
        prices.push(item.price);
    }

    let result = sqlx::query(
        "INSERT INTO menu_items (vendor_id, id, name, description, price) \
         SELECT $1, * FROM UNNEST($2::text[], $3::text[], $4::text[], $5::numeric[])",
    )
    .bind(vendor_id)
    .bind(&ids)
    .bind(&names)
    .bind(&descriptions)
    .bind(&prices)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// All menu items for a vendor, ordered by name.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_menu_items(pool: &PgPool, vendor_id: &str) -> Result<Vec<MenuItemRow>, DbError> {
    let rows = sqlx::query_as::<_, MenuItemRow>(
        "SELECT id, vendor_id, name, description, price, is_available, created_at \
         FROM menu_items \
         WHERE vendor_id = $1 \
         ORDER BY name",
    )
    .bind(vendor_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
