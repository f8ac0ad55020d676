//! `GET /api/v1/hotels` (list) and `GET /api/v1/hotels/{slug}` (detail).

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::{NaiveDate, Utc};
use hotelsearch_aggregator::DetailError;
use hotelsearch_core::{AggregatedHotelResult, HotelDetail, SearchCriteria};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

const DEFAULT_ADULTS: u32 = 2;
const DEFAULT_CHILDREN: u32 = 0;

/// Raw query parameters. Occupancy arrives as strings so malformed numbers
/// get the JSON error envelope instead of axum's plain-text rejection.
#[derive(Debug, Default, Deserialize)]
pub(super) struct SearchQuery {
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub adults: Option<String>,
    pub children: Option<String>,
}

impl SearchQuery {
    pub(super) fn criteria(&self, today: NaiveDate) -> Result<SearchCriteria, String> {
        let check_in = required(self.check_in.as_deref(), "check_in")?;
        let check_out = required(self.check_out.as_deref(), "check_out")?;
        let adults = count(self.adults.as_deref(), "adults", DEFAULT_ADULTS)?;
        let children = count(self.children.as_deref(), "children", DEFAULT_CHILDREN)?;

        SearchCriteria::parse(check_in, check_out, adults, children, today).map_err(|e| e.to_string())
    }
}

fn required<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| format!("{field} is required (YYYY-MM-DD)"))
}

fn count(value: Option<&str>, field: &str, default: u32) -> Result<u32, String> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(default),
        Some(raw) => raw
            .parse::<u32>()
            .map_err(|_| format!("{field} must be a non-negative integer, got '{raw}'")),
    }
}

#[derive(Debug, Serialize)]
pub(super) struct HotelListData {
    #[serde(flatten)]
    criteria: SearchCriteria,
    nights: u64,
    hotels: Vec<AggregatedHotelResult>,
}

fn validated(query: &SearchQuery, req_id: &str) -> Result<SearchCriteria, ApiError> {
    query.criteria(Utc::now().date_naive()).map_err(|message| {
        tracing::debug!(%message, "rejected search query");
        ApiError::new(req_id, "validation_error", message)
    })
}

pub(super) async fn list_hotels(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<HotelListData>>, ApiError> {
    let criteria = validated(&query, &req_id.0)?;

    let hotels = if let Some(cached) = state.search_cache.get(&criteria).await {
        tracing::debug!(check_in = %criteria.check_in, "serving cached hotel search");
        cached
    } else {
        let fresh = state.service.fetch_all_hotels(&criteria).await;
        state
            .search_cache
            .insert(criteria.clone(), fresh.clone())
            .await;
        fresh
    };

    Ok(Json(ApiResponse {
        data: HotelListData {
            nights: criteria.nights(),
            criteria,
            hotels,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn get_hotel(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(slug): Path<String>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<HotelDetail>>, ApiError> {
    let criteria = validated(&query, &req_id.0)?;

    let detail = state
        .service
        .fetch_hotel_detail(&slug, &criteria)
        .await
        .map_err(|e| match e {
            DetailError::UnknownSlug { .. } => ApiError::new(&*req_id.0, "not_found", e.to_string()),
        })?;

    Ok(Json(ApiResponse {
        data: detail,
        meta: ResponseMeta::new(req_id.0),
    }))
}
