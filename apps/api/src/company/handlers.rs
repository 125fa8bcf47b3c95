//! Axum route handlers for the Company API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::company::{CompanyProfile, SearchResult};
use crate::state::AppState;

use super::search::{DEFAULT_LIST_LIMIT, MIN_QUERY_LEN};

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<SearchResult>,
}

#[derive(Debug, Serialize)]
pub struct CompanyResponse {
    pub success: bool,
    pub data: CompanyProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/company/search/:query
pub async fn handle_search_companies(
    State(state): State<AppState>,
    Path(query): Path<String>,
) -> Result<Json<ListResponse>, AppError> {
    if query.trim().len() < MIN_QUERY_LEN {
        return Err(AppError::Validation(format!(
            "Search query must be at least {MIN_QUERY_LEN} characters"
        )));
    }

    let data = state.search.search(&query).await;
    Ok(Json(ListResponse {
        success: true,
        count: data.len(),
        data,
    }))
}

/// GET /api/company/:name
///
/// Always resolves cache-first, then the full cascade. Resolution
/// shortfalls still produce a renderable profile with `success: false`.
pub async fn handle_get_company(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<CompanyResponse>, AppError> {
    if name.trim().is_empty() {
        return Err(AppError::Validation("Company name is required".to_string()));
    }

    let outcome = state.resolver.resolve(&name).await;
    Ok(Json(CompanyResponse {
        success: outcome.success,
        data: outcome.profile,
        error: outcome.error,
    }))
}

/// GET /api/company?limit=&offset=
pub async fn handle_list_companies(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse>, AppError> {
    let data = state
        .search
        .list(
            params.limit.unwrap_or(DEFAULT_LIST_LIMIT),
            params.offset.unwrap_or(0),
        )
        .await;
    Ok(Json(ListResponse {
        success: true,
        count: data.len(),
        data,
    }))
}
