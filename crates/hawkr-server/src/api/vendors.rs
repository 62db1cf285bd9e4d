//! Vendor registration, detail, update, and the discovery endpoint.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use hawkr_core::GeoPoint;
use hawkr_db::PgCandidateStore;
use hawkr_search::{RankedResult, VendorRanker};

use crate::middleware::RequestId;

use super::{map_db_error, map_search_error, ApiError, ApiResponse, AppState, ResponseMeta};

/// Default result count for discovery when the caller sends no limit.
const DEFAULT_SEARCH_LIMIT: i64 = 10;

// ---------------------------------------------------------------------------
// Request/response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(super) struct CreateVendorRequest {
    pub name: String,
    pub phone: String,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Serialize)]
pub(super) struct CreateVendorResponse {
    pub vendor_id: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct UpdateVendorRequest {
    pub name: Option<String>,
    pub business_hours: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct MenuItemBody {
    pub item_id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub is_available: bool,
}

#[derive(Debug, Serialize)]
pub(super) struct VendorDetailResponse {
    pub vendor_id: String,
    pub name: String,
    pub phone: String,
    pub business_hours: Option<String>,
    pub location: Option<GeoPoint>,
    pub menu: Vec<MenuItemBody>,
}

#[derive(Debug, Deserialize)]
pub(super) struct NearbyQuery {
    pub q: Option<String>,
    pub lat: f64,
    pub lng: f64,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub(super) struct NearbyResponse {
    pub results: Vec<RankedResult>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/vendors — register a vendor with its pitch location.
pub(super) async fn create_vendor(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<CreateVendorRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CreateVendorResponse>>), ApiError> {
    let rid = &req_id.0;

    let name = body.name.trim().to_owned();
    if name.is_empty() || name.len() > 120 {
        return Err(ApiError::new(
            rid,
            "validation_error",
            "name must be 1–120 characters",
        ));
    }
    if body.phone.trim().is_empty() {
        return Err(ApiError::new(rid, "validation_error", "phone is required"));
    }
    let point = GeoPoint {
        lat: body.lat,
        lng: body.lng,
    };
    if !point.is_valid() {
        return Err(ApiError::new(
            rid,
            "validation_error",
            format!("invalid coordinates: ({}, {})", body.lat, body.lng),
        ));
    }

    let vendor_id =
        hawkr_db::create_vendor(&state.pool, &name, body.phone.trim(), body.lat, body.lng)
            .await
            .map_err(|e| map_db_error(rid.clone(), &e))?;

    tracing::info!(%vendor_id, "vendor registered");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: CreateVendorResponse { vendor_id },
            meta: ResponseMeta::new(req_id.0),
        }),
    ))
}

/// GET /api/v1/vendors/:vendor_id — vendor profile plus full menu.
pub(super) async fn get_vendor(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(vendor_id): Path<String>,
) -> Result<Json<ApiResponse<VendorDetailResponse>>, ApiError> {
    let rid = &req_id.0;

    let vendor = hawkr_db::get_vendor(&state.pool, &vendor_id)
        .await
        .map_err(|e| map_db_error(rid.clone(), &e))?
        .ok_or_else(|| ApiError::new(rid, "not_found", "no such vendor"))?;

    let menu = hawkr_db::list_menu_items(&state.pool, &vendor_id)
        .await
        .map_err(|e| map_db_error(rid.clone(), &e))?;

    let location = match (vendor.lat, vendor.lng) {
        (Some(lat), Some(lng)) => Some(GeoPoint { lat, lng }),
        _ => None,
    };

    Ok(Json(ApiResponse {
        data: VendorDetailResponse {
            vendor_id: vendor.id,
            name: vendor.name,
            phone: vendor.phone,
            business_hours: vendor.business_hours,
            location,
            menu: menu
                .into_iter()
                .map(|item| MenuItemBody {
                    item_id: item.id,
                    name: item.name,
                    description: item.description,
                    price: item.price,
                    is_available: item.is_available,
                })
                .collect(),
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// PATCH /api/v1/vendors/:vendor_id — sparse update of name / business hours.
pub(super) async fn update_vendor(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(vendor_id): Path<String>,
    Json(body): Json<UpdateVendorRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let rid = &req_id.0;

    let trimmed_name = body.name.as_ref().map(|n| n.trim().to_owned());
    if let Some(ref name) = trimmed_name {
        if name.is_empty() || name.len() > 120 {
            return Err(ApiError::new(
                rid,
                "validation_error",
                "name must be 1–120 characters",
            ));
        }
    }

    hawkr_db::update_vendor(
        &state.pool,
        &vendor_id,
        trimmed_name.as_deref(),
        body.business_hours.as_deref(),
    )
    .await
    .map_err(|e| map_db_error(rid.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: serde_json::json!({ "vendor_id": vendor_id, "status": "updated" }),
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// GET /api/v1/vendors/nearby — ranked vendor discovery.
///
/// `q` may be absent or blank (distance-only browse). A non-positive limit is
/// a validation error; a limit above the engine maximum is capped, not
/// rejected.
pub(super) async fn search_nearby(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<NearbyQuery>,
) -> Result<Json<ApiResponse<NearbyResponse>>, ApiError> {
    let rid = &req_id.0;

    let limit = params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
    let Ok(limit) = usize::try_from(limit) else {
        return Err(ApiError::new(
            rid,
            "validation_error",
            "limit must be positive",
        ));
    };

    let query = params.q.unwrap_or_default();
    let ranker = VendorRanker::new(PgCandidateStore::new(state.pool.clone()));
    let results = ranker
        .rank(&query, params.lat, params.lng, limit)
        .await
        .map_err(|e| map_search_error(rid.clone(), &e))?;

    tracing::debug!(
        query = %query.trim(),
        results = results.len(),
        "vendor discovery served"
    );

    Ok(Json(ApiResponse {
        data: NearbyResponse { results },
        meta: ResponseMeta::new(req_id.0),
    }))
}
