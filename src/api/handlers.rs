use axum::{
    extract::{rejection::JsonRejection, Query, RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::AppResult;
use crate::models::{CatalogQuery, FilterOptions, SearchCriteria};
use crate::services::Recommendations;

use super::AppState;

// Request types

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub criteria: SearchCriteria,
    #[serde(default = "first_page")]
    pub page: usize,
}

fn first_page() -> usize {
    1
}

// Handlers

/// Root status endpoint
pub async fn root_status() -> Json<Value> {
    Json(json!({ "status": "Server is running" }))
}

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Catalog listing.
///
/// Without paging parameters the whole catalog is returned as an array; with
/// any of `page`, `limit` or `search` a page envelope is returned instead.
pub async fn get_movies(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
    Query(query): Query<CatalogQuery>,
) -> AppResult<Response> {
    if wants_page(raw.as_deref()) {
        let page = state.catalog.fetch_page(&query).await?;
        tracing::info!(
            search = ?query.search_term(),
            page = page.current_page,
            returned = page.movies.len(),
            total = page.total,
            "Returning catalog page"
        );
        Ok(Json(page).into_response())
    } else {
        let movies = state.catalog.fetch_all().await?;
        tracing::info!(count = movies.len(), "Returning full catalog");
        Ok(Json(movies).into_response())
    }
}

/// Precomputed filter options for the criteria form
pub async fn get_filter_options(State(state): State<AppState>) -> AppResult<Json<FilterOptions>> {
    let options = state.filter_options.load().await?;
    Ok(Json(options))
}

/// Runs the filter engine over a fresh catalog and returns one page of matches
pub async fn recommend(
    State(state): State<AppState>,
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> AppResult<Json<Recommendations>> {
    let Json(request) = payload?;
    tracing::info!(
        criteria = ?request.criteria,
        page = request.page,
        "Processing recommendation request"
    );

    let recommendations = state
        .recommender
        .recommend(&request.criteria, request.page)
        .await?;

    Ok(Json(recommendations))
}

fn wants_page(raw_query: Option<&str>) -> bool {
    raw_query
        .unwrap_or("")
        .split('&')
        .filter_map(|pair| pair.split('=').next())
        .any(|key| matches!(key, "page" | "limit" | "search"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wants_page() {
        assert!(!wants_page(None));
        assert!(!wants_page(Some("")));
        assert!(!wants_page(Some("foo=bar")));
        assert!(wants_page(Some("page=2")));
        assert!(wants_page(Some("foo=1&search=heat")));
        assert!(wants_page(Some("limit")));
    }

    #[test]
    fn test_request_defaults() {
        let request: RecommendationRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.page, 1);
        assert_eq!(request.criteria, SearchCriteria::default());
    }
}
