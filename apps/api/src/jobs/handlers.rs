//! Axum route handlers for the Jobs API.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::jobs::{extract_job_details, JobDetails};
use crate::models::company::{is_filled, CompanyProfile};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct JobQueryRequest {
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct JobQueryResponse {
    pub success: bool,
    pub job_details: JobDetails,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_info: Option<CompanyProfile>,
    pub timestamp: DateTime<Utc>,
}

/// POST /api/jobs/query
///
/// Extracts structured details from a job description, then resolves the
/// extracted company through the pipeline. A company the model could not
/// identify simply yields no `company_info`.
pub async fn handle_job_query(
    State(state): State<AppState>,
    Json(request): Json<JobQueryRequest>,
) -> Result<Json<JobQueryResponse>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    let Some(llm) = state.llm.as_ref() else {
        return Err(AppError::Configuration(
            "LLM_API_URL is not set; job analysis is unavailable".to_string(),
        ));
    };

    let job_details = extract_job_details(&request.job_description, llm).await?;

    let company_info = if is_filled(&job_details.company) {
        Some(state.resolver.resolve(&job_details.company).await.profile)
    } else {
        None
    };

    Ok(Json(JobQueryResponse {
        success: true,
        job_details,
        company_info,
        timestamp: Utc::now(),
    }))
}
