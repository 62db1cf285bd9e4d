//! The Postgres-backed candidate store for the ranking engine.
//!
//! Distance is computed here, in SQL, over the `geography` column — the
//! engine never re-derives it. Vendors without a location are filtered out
//! at the query level, which is what keeps the ranking function total.

use sqlx::PgPool;

use hawkr_search::{CandidateMenuItem, CandidateStore, StoreError, VendorCandidate};

/// [`CandidateStore`] implementation over the `vendors`/`menu_items` tables.
#[derive(Debug, Clone)]
pub struct PgCandidateStore {
    pool: PgPool,
}

impl PgCandidateStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CandidateRow {
    id: String,
    name: String,
    phone: String,
    business_hours: Option<String>,
    lat: f64,
    lng: f64,
    distance_m: f64,
}

#[derive(Debug, sqlx::FromRow)]
struct CandidateItemRow {
    id: String,
    name: String,
    price: rust_decimal::Decimal,
}

impl CandidateStore for PgCandidateStore {
    async fn vendor_candidates(
        &self,
        lat: f64,
        lng: f64,
        ceiling: i64,
    ) -> Result<Vec<VendorCandidate>, StoreError> {
        let rows = sqlx::query_as::<_, CandidateRow>(
            "SELECT id, name, phone, business_hours, \
                    ST_Y(location::geometry) AS lat, \
                    ST_X(location::geometry) AS lng, \
                    ST_Distance(location, ST_SetSRID(ST_MakePoint($2, $1), 4326)::geography) AS distance_m \
             FROM vendors \
             WHERE location IS NOT NULL \
             ORDER BY location <-> ST_SetSRID(ST_MakePoint($2, $1), 4326)::geography \
             LIMIT $3",
        )
        .bind(lat)
        .bind(lng)
        .bind(ceiling)
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::new)?;

        Ok(rows
            .into_iter()
            .map(|row| VendorCandidate {
                vendor_id: row.id,
                name: row.name,
                phone: row.phone,
                business_hours: row.business_hours,
                lat: row.lat,
                lng: row.lng,
                distance_m: row.distance_m,
            })
            .collect())
    }

    async fn menu_items(&self, vendor_id: &str) -> Result<Vec<CandidateMenuItem>, StoreError> {
        let rows = sqlx::query_as::<_, CandidateItemRow>(
            "SELECT id, name, price \
             FROM menu_items \
             WHERE vendor_id = $1 \
             ORDER BY name",
        )
        .bind(vendor_id)
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::new)?;

        Ok(rows
            .into_iter()
            .map(|row| CandidateMenuItem {
                item_id: row.id,
                name: row.name,
                price: row.price,
            })
            .collect())
    }
}
