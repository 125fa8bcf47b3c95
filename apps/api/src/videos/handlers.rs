//! Axum route handlers for the video search API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::video::VideoCandidate;
use crate::state::AppState;

use super::{DEFAULT_MAX_RESULTS, MAX_RESULTS_CAP};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSearchParams {
    /// Free-form query; treated as the job-title phrase when no explicit
    /// company/jobTitle pair is given.
    pub query: Option<String>,
    pub company: Option<String>,
    pub job_title: Option<String>,
    pub max_results: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total_results: usize,
    pub results_per_page: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSearchResponse {
    pub success: bool,
    pub items: Vec<VideoCandidate>,
    pub page_info: PageInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

/// GET /api/job/youtube-search?query=&company=&jobTitle=&maxResults=
pub async fn handle_youtube_search(
    State(state): State<AppState>,
    Query(params): Query<VideoSearchParams>,
) -> Result<Json<VideoSearchResponse>, AppError> {
    let company = params.company.unwrap_or_default();
    let job_title = params
        .job_title
        .or(params.query)
        .unwrap_or_default();
    let max_results = params
        .max_results
        .unwrap_or(DEFAULT_MAX_RESULTS)
        .min(MAX_RESULTS_CAP);

    let items = state.videos.search(&company, &job_title, max_results).await?;

    Ok(Json(VideoSearchResponse {
        success: true,
        page_info: PageInfo {
            total_results: items.len(),
            results_per_page: max_results,
        },
        items,
        next_page_token: None,
    }))
}
