//! Salon Routes
//!
//! - GET /api/v1/salons - Discovery list (search, category, sort)
//! - POST /api/v1/salons - Register a salon
//! - GET /api/v1/salons/:id - Get a listed salon

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use std::sync::Arc;

use crate::api::dto::{RegisterSalonRequest, SalonListQuery, SalonListResponse, SalonResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::salon::{CategoryFilter, DiscoveryQuery, SalonId, SortBy};

/// GET /api/v1/salons
///
/// Verified salons matching the query, sorted.
pub async fn list_salons(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SalonListQuery>,
) -> ApiResult<Json<SalonListResponse>> {
    let query = parse_query(params)?;

    let session = state.session.read().await;
    let salons: Vec<SalonResponse> = session
        .discover(&query)
        .into_iter()
        .map(SalonResponse::from)
        .collect();

    Ok(Json(SalonListResponse {
        total: salons.len(),
        salons,
    }))
}

/// GET /api/v1/salons/:id
///
/// Looks up any salon by id, including a freshly registered one still
/// awaiting verification. Only discovery hides unverified salons.
pub async fn get_salon(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SalonId>,
) -> ApiResult<Json<SalonResponse>> {
    let session = state.session.read().await;
    let salon = session
        .salon(id)
        .ok_or_else(|| ApiError::NotFound(format!("Salon with id {} not found", id)))?;

    Ok(Json(SalonResponse::from(salon)))
}

/// POST /api/v1/salons
///
/// Lists a new, unverified salon and opens its dashboard.
pub async fn register_salon(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterSalonRequest>,
) -> ApiResult<(StatusCode, Json<SalonResponse>)> {
    let new = req.into_new_salon().map_err(ApiError::Validation)?;

    let response =
        SalonResponse::from(state.session.write().await.register_salon(new, Utc::now()));

    state.sync_timers().await;
    state.publish_toast().await;

    Ok((StatusCode::CREATED, Json(response)))
}

fn parse_query(params: SalonListQuery) -> ApiResult<DiscoveryQuery> {
    let category = params
        .category
        .as_deref()
        .map(str::parse::<CategoryFilter>)
        .transpose()
        .map_err(ApiError::Validation)?
        .unwrap_or_default();

    let sort = params
        .sort
        .as_deref()
        .map(str::parse::<SortBy>)
        .transpose()
        .map_err(ApiError::Validation)?
        .unwrap_or_default();

    Ok(DiscoveryQuery::new()
        .search(params.search.unwrap_or_default())
        .category(category)
        .sort(sort))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::salon::SalonType;

    #[test]
    fn test_parse_query_defaults() {
        let query = parse_query(SalonListQuery::default()).unwrap();
        assert_eq!(query, DiscoveryQuery::new());
    }

    #[test]
    fn test_parse_query_values() {
        let query = parse_query(SalonListQuery {
            search: Some("cut".to_string()),
            category: Some("Men Only".to_string()),
            sort: Some("rating".to_string()),
        })
        .unwrap();
        assert_eq!(query.search, "cut");
        assert_eq!(query.category, CategoryFilter::Only(SalonType::MenOnly));
        assert_eq!(query.sort, SortBy::Rating);
    }

    #[test]
    fn test_parse_query_rejects_bad_sort() {
        let result = parse_query(SalonListQuery {
            sort: Some("price".to_string()),
            ..Default::default()
        });
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }
}
