use std::sync::Arc;

use crate::company::search::SearchService;
use crate::company::CompanyResolver;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::videos::VideoSearchEngine;

/// Shared application state injected into all route handlers via Axum
/// extractors. Built once by the composition root in `main`.
#[derive(Clone)]
pub struct AppState {
    /// Kept on the state for handlers that need raw settings later.
    #[allow(dead_code)]
    pub config: Config,
    pub resolver: Arc<CompanyResolver>,
    pub search: Arc<SearchService>,
    pub videos: Arc<VideoSearchEngine>,
    /// Present only when `LLM_API_URL` is configured; the jobs endpoint
    /// degrades to a configuration error without it.
    pub llm: Option<LlmClient>,
}
