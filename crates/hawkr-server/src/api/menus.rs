//! Menu management: manual item addition and OCR-text ingestion.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use hawkr_db::NewMenuItem;

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

// ---------------------------------------------------------------------------
// Request/response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(super) struct AddMenuItemRequest {
    pub name: String,
    pub description: Option<String>,
    /// Absent means "unpriced" — stored as zero, allowed for manual entry.
    pub price: Option<Decimal>,
    pub is_available: Option<bool>,
}

#[derive(Debug, Serialize)]
pub(super) struct AddMenuItemResponse {
    pub item_id: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct IngestMenuRequest {
    /// Raw OCR output for a menu photo. Image-to-text happens upstream; this
    /// endpoint only parses.
    pub text: String,
}

#[derive(Debug, Serialize)]
pub(super) struct IngestedItem {
    pub item_id: String,
    pub name: String,
    pub price: Decimal,
}

#[derive(Debug, Serialize)]
pub(super) struct IngestMenuResponse {
    pub vendor_id: String,
    pub item_count: usize,
    pub items: Vec<IngestedItem>,
}

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

/// Map a foreign-key violation (unknown vendor) to a 404.
fn map_fk_violation(req_id: &str, e: &hawkr_db::DbError) -> ApiError {
    if let hawkr_db::DbError::Sqlx(sqlx::Error::Database(db_err)) = e {
        if db_err.code().as_deref() == Some("23503") {
            return ApiError::new(req_id, "not_found", "no such vendor");
        }
    }
    map_db_error(req_id.to_owned(), e)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/vendors/:vendor_id/menu/items — add one item by hand.
pub(super) async fn add_menu_item(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(vendor_id): Path<String>,
    Json(body): Json<AddMenuItemRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AddMenuItemResponse>>), ApiError> {
    let rid = &req_id.0;

    let name = body.name.trim().to_owned();
    if name.is_empty() || name.len() > 200 {
        return Err(ApiError::new(
            rid,
            "validation_error",
            "name must be 1–200 characters",
        ));
    }
    let price = body.price.unwrap_or(Decimal::ZERO);
    if price < Decimal::ZERO {
        return Err(ApiError::new(
            rid,
            "validation_error",
            "price must be non-negative",
        ));
    }

    let item_id = hawkr_db::insert_menu_item(
        &state.pool,
        &vendor_id,
        &name,
        body.description.as_deref(),
        price,
        body.is_available.unwrap_or(true),
    )
    .await
    .map_err(|e| map_fk_violation(rid, &e))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: AddMenuItemResponse { item_id },
            meta: ResponseMeta::new(req_id.0),
        }),
    ))
}

/// POST /api/v1/vendors/:vendor_id/menu/ingest — parse OCR text and insert
/// every valid item.
///
/// Zero extracted items is not an error: the caller gets an empty list and
/// decides whether to prompt the vendor for manual entry.
pub(super) async fn ingest_menu(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(vendor_id): Path<String>,
    Json(body): Json<IngestMenuRequest>,
) -> Result<Json<ApiResponse<IngestMenuResponse>>, ApiError> {
    let rid = &req_id.0;

    hawkr_db::get_vendor(&state.pool, &vendor_id)
        .await
        .map_err(|e| map_db_error(rid.clone(), &e))?
        .ok_or_else(|| ApiError::new(rid, "not_found", "no such vendor"))?;

    let candidates = hawkr_ocr::extract_items(&body.text);
    tracing::info!(
        %vendor_id,
        extracted = candidates.len(),
        "menu ingestion parsed OCR text"
    );

    let new_items: Vec<NewMenuItem> = candidates
        .iter()
        .map(|c| NewMenuItem {
            id: c.id.clone(),
            name: c.name.clone(),
            description: None,
            price: c.price,
        })
        .collect();

    if !new_items.is_empty() {
        hawkr_db::insert_menu_items(&state.pool, &vendor_id, &new_items)
            .await
            .map_err(|e| map_fk_violation(rid, &e))?;
    }

    let items = candidates
        .into_iter()
        .map(|c| IngestedItem {
            item_id: c.id,
            name: c.name,
            price: c.price,
        })
        .collect::<Vec<_>>();

    Ok(Json(ApiResponse {
        data: IngestMenuResponse {
            vendor_id,
            item_count: items.len(),
            items,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
