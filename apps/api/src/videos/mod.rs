//! Interview-video search — query synthesis, parallel fetch, heuristic
//! ranking.
//!
//! A pure per-request pipeline: generate query variants, fetch the first
//! three concurrently, score and dedupe, truncate. Each fetch swallows its
//! own failure and contributes nothing; only a missing API key or empty
//! input fails the request.

pub mod handlers;
pub mod queries;
pub mod scoring;
pub mod youtube;

use tracing::warn;

use crate::errors::AppError;
use crate::models::video::VideoCandidate;

use queries::{build_query_variants, GENERIC_FALLBACK_QUERY};
use scoring::rank;
use youtube::YouTubeClient;

pub const DEFAULT_MAX_RESULTS: usize = 6;
pub const MAX_RESULTS_CAP: usize = 20;
/// Per-variant fetch size; the ranker sees up to three times this.
const FETCH_SIZE: u32 = 10;

pub struct VideoSearchEngine {
    client: Option<YouTubeClient>,
}

impl VideoSearchEngine {
    pub fn new(http: reqwest::Client, api_key: Option<String>) -> Self {
        Self {
            client: api_key.map(|key| YouTubeClient::new(http, key)),
        }
    }

    pub async fn search(
        &self,
        company: &str,
        job_title: &str,
        max_results: usize,
    ) -> Result<Vec<VideoCandidate>, AppError> {
        let company = company.trim();
        let job_title = job_title.trim();
        if company.is_empty() && job_title.is_empty() {
            return Err(AppError::Validation(
                "Provide a company, a job title, or a search query".to_string(),
            ));
        }

        let Some(client) = self.client.as_ref() else {
            return Err(AppError::Configuration(
                "GOOGLE_API_KEY is not set; video search is unavailable".to_string(),
            ));
        };

        let variants = build_query_variants(company, job_title);
        let mut variant_iter = variants.iter();
        let (first, second, third) = tokio::join!(
            fetch_or_empty(client, variant_iter.next()),
            fetch_or_empty(client, variant_iter.next()),
            fetch_or_empty(client, variant_iter.next()),
        );

        let mut candidates: Vec<VideoCandidate> = first;
        candidates.extend(second);
        candidates.extend(third);

        // one synchronous generic retry before giving up
        if candidates.is_empty() {
            let generic = GENERIC_FALLBACK_QUERY.to_string();
            candidates = fetch_or_empty(client, Some(&generic)).await;
        }

        Ok(rank(
            candidates,
            company,
            job_title,
            max_results.clamp(1, MAX_RESULTS_CAP),
        ))
    }
}

async fn fetch_or_empty(client: &YouTubeClient, query: Option<&String>) -> Vec<VideoCandidate> {
    let Some(query) = query else {
        return Vec::new();
    };
    match client.search(query, FETCH_SIZE).await {
        Ok(candidates) => candidates,
        Err(e) => {
            warn!(query = %query, error = %e, "video fetch failed, contributing no results");
            Vec::new()
        }
    }
}
