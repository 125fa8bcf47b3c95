pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::company::handlers as company_handlers;
use crate::jobs::handlers as job_handlers;
use crate::state::AppState;
use crate::videos::handlers as video_handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Company API
        .route(
            "/api/company",
            get(company_handlers::handle_list_companies),
        )
        .route(
            "/api/company/search/:query",
            get(company_handlers::handle_search_companies),
        )
        .route(
            "/api/company/:name",
            get(company_handlers::handle_get_company),
        )
        // Jobs API
        .route("/api/jobs/query", post(job_handlers::handle_job_query))
        // Video search API
        .route(
            "/api/job/youtube-search",
            get(video_handlers::handle_youtube_search),
        )
        .with_state(state)
}
