//! Deal creation and nearest-first browsing.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use hawkr_core::GeoPoint;
use hawkr_db::NewDeal;

use crate::middleware::RequestId;

use super::{map_db_error, normalize_limit, ApiError, ApiResponse, AppState, ResponseMeta};

// ---------------------------------------------------------------------------
// Request/response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(super) struct DealsNearbyQuery {
    pub lat: f64,
    pub lng: f64,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub(super) struct DealBody {
    pub deal_id: String,
    pub vendor_id: String,
    pub vendor_name: Option<String>,
    pub item_name: String,
    pub original_price: Option<Decimal>,
    pub deal_price: Decimal,
    pub expires_at: Option<DateTime<Utc>>,
    /// Whole meters; absent when the deal has no location.
    pub distance_m: Option<i64>,
}

#[derive(Debug, Serialize)]
pub(super) struct DealsNearbyResponse {
    pub deals: Vec<DealBody>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CreateDealRequest {
    pub vendor_id: String,
    pub item_name: String,
    pub original_price: Option<Decimal>,
    pub deal_price: Decimal,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub(super) struct CreateDealResponse {
    pub deal_id: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/deals/nearby — active, unexpired deals nearest first.
pub(super) async fn list_deals_nearby(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<DealsNearbyQuery>,
) -> Result<Json<ApiResponse<DealsNearbyResponse>>, ApiError> {
    let rid = &req_id.0;

    let point = GeoPoint {
        lat: params.lat,
        lng: params.lng,
    };
    if !point.is_valid() {
        return Err(ApiError::new(
            rid,
            "validation_error",
            format!("invalid coordinates: ({}, {})", params.lat, params.lng),
        ));
    }
    let limit = normalize_limit(params.limit);

    let rows = hawkr_db::list_deals_nearby(&state.pool, params.lat, params.lng, limit)
        .await
        .map_err(|e| map_db_error(rid.clone(), &e))?;

    let deals = rows
        .into_iter()
        .map(|row| DealBody {
            deal_id: row.deal_id,
            vendor_id: row.vendor_id,
            vendor_name: row.vendor_name,
            item_name: row.item_name,
            original_price: row.original_price,
            deal_price: row.deal_price,
            expires_at: row.expires_at,
            distance_m: row.distance_m.map(|d| d.max(0.0) as i64),
        })
        .collect();

    Ok(Json(ApiResponse {
        data: DealsNearbyResponse { deals },
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// POST /api/v1/deals — create a deal pinned to the vendor's location.
pub(super) async fn create_deal(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<CreateDealRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CreateDealResponse>>), ApiError> {
    let rid = &req_id.0;

    let item_name = body.item_name.trim().to_owned();
    if item_name.is_empty() || item_name.len() > 200 {
        return Err(ApiError::new(
            rid,
            "validation_error",
            "item_name must be 1–200 characters",
        ));
    }
    if body.deal_price < Decimal::ZERO {
        return Err(ApiError::new(
            rid,
            "validation_error",
            "deal_price must be non-negative",
        ));
    }

    let deal_id = hawkr_db::create_deal(
        &state.pool,
        &NewDeal {
            vendor_id: body.vendor_id,
            item_name,
            original_price: body.original_price,
            deal_price: body.deal_price,
            expires_at: body.expires_at,
        },
    )
    .await
    .map_err(|e| map_db_error(rid.clone(), &e))?;

    tracing::info!(%deal_id, "deal created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: CreateDealResponse { deal_id },
            meta: ResponseMeta::new(req_id.0),
        }),
    ))
}
