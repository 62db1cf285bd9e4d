//! The record-store boundary the ranking engine calls across.

use rust_decimal::Decimal;
use thiserror::Error;

/// A located vendor near the query point, as returned by the store.
///
/// `distance_m` is computed by the store (vendors without a location never
/// appear here); the engine uses it verbatim and performs no geodesic math
/// of its own.
#[derive(Debug, Clone)]
pub struct VendorCandidate {
    pub vendor_id: String,
    pub name: String,
    pub phone: String,
    pub business_hours: Option<String>,
    pub lat: f64,
    pub lng: f64,
    pub distance_m: f64,
}

/// A menu item belonging to a candidate vendor.
#[derive(Debug, Clone)]
pub struct CandidateMenuItem {
    pub item_id: String,
    pub name: String,
    pub price: Decimal,
}

/// The record store failed mid-call.
#[derive(Debug, Error)]
#[error("record store unavailable: {0}")]
pub struct StoreError(#[source] pub Box<dyn std::error::Error + Send + Sync + 'static>);

impl StoreError {
    pub fn new(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Box::new(source))
    }
}

/// Abstract geo record store supplying ranking candidates.
///
/// Implementations fetch complete collections — no pagination contract at
/// this layer. Both methods are read-only and safely re-issuable; the engine
/// itself never retries.
#[allow(async_fn_in_trait)]
pub trait CandidateStore {
    /// Vendors that have a location set, ordered by distance to
    /// `(lat, lng)` ascending, capped at `ceiling` rows.
    async fn vendor_candidates(
        &self,
        lat: f64,
        lng: f64,
        ceiling: i64,
    ) -> Result<Vec<VendorCandidate>, StoreError>;

    /// All menu items for one vendor.
    async fn menu_items(&self, vendor_id: &str) -> Result<Vec<CandidateMenuItem>, StoreError>;
}
