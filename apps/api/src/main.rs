mod company;
mod config;
mod dataset;
mod db;
mod errors;
mod jobs;
mod llm_client;
mod models;
mod routes;
mod sources;
mod state;
mod store;
mod videos;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::company::search::SearchService;
use crate::company::CompanyResolver;
use crate::config::Config;
use crate::dataset::CompanyDataset;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::sources::encyclopedia::EncyclopediaSource;
use crate::sources::instant_answer::InstantAnswerSource;
use crate::sources::knowledge_graph::KnowledgeGraphSource;
use crate::sources::linked_data::LinkedDataSource;
use crate::sources::SourceAdapter;
use crate::state::AppState;
use crate::store::{CompanyStore, PgCompanyStore};
use crate::videos::VideoSearchEngine;

/// Timeout for every outbound call to an external data source — one slow
/// source must not stall the whole cascade.
const OUTBOUND_TIMEOUT: Duration = Duration::from_secs(6);

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Placement API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL and the company store schema
    let db = create_pool(&config.database_url).await?;
    let pg_store = PgCompanyStore::new(db);
    pg_store.ensure_schema().await?;
    let store: Arc<dyn CompanyStore> = Arc::new(pg_store);

    // One shared HTTP client with a bounded timeout for every source
    let http = reqwest::Client::builder()
        .timeout(OUTBOUND_TIMEOUT)
        .user_agent(concat!("placement-api/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("Failed to build HTTP client");

    // Bulk dataset: warm the single-flight load in the background so the
    // first lookup does not pay for the file read
    let dataset = Arc::new(CompanyDataset::new(config.dataset_path.clone()));
    {
        let dataset = dataset.clone();
        tokio::spawn(async move {
            let records = dataset.records().await;
            info!("company dataset warm ({} records)", records.len());
        });
    }

    // External sources in cascade priority order
    let external: Vec<Arc<dyn SourceAdapter>> = vec![
        Arc::new(KnowledgeGraphSource::new(
            http.clone(),
            config.serp_api_key.clone(),
        )),
        Arc::new(LinkedDataSource::new(http.clone())),
        Arc::new(EncyclopediaSource::new(http.clone())),
        Arc::new(InstantAnswerSource::new(http.clone())),
    ];

    let resolver = Arc::new(CompanyResolver::new(
        store.clone(),
        dataset.clone(),
        external,
    ));
    let search = Arc::new(SearchService::new(store, dataset));
    let videos = Arc::new(VideoSearchEngine::new(
        http.clone(),
        config.google_api_key.clone(),
    ));

    let llm = config
        .llm_api_url
        .clone()
        .map(|url| LlmClient::new(http, url, config.llm_model.clone()));
    if llm.is_none() {
        info!("LLM_API_URL not set; job analysis endpoint disabled");
    }

    let state = AppState {
        config: config.clone(),
        resolver,
        search,
        videos,
        llm,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // frontend runs on a different dev port

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
