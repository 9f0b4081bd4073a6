mod applications;
mod config;
mod errors;
mod extraction;
mod jobs;
mod llm_client;
mod matching;
mod models;
mod routes;
mod state;
mod store;
mod users;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::extraction::PdfExtractor;
use crate::jobs::seed::seed_demo_data;
use crate::llm_client::GeminiClient;
use crate::matching::MatchEvaluator;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{RedisStore, Store};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting JobMatch API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize persistence: Redis when configured, otherwise process memory
    let store = match &config.redis_url {
        Some(url) => Store::new(Arc::new(RedisStore::connect(url).await?)),
        None => {
            info!("REDIS_URL not set; using in-memory store");
            Store::in_memory()
        }
    };
    seed_demo_data(&store).await?;

    // Initialize LLM backend
    let gemini = GeminiClient::new(
        config.gemini_api_key.clone(),
        config.gemini_api_base.clone(),
        config.llm_timeout,
    )?;
    info!(
        "LLM client initialized (model: {}, timeout: {}s)",
        llm_client::MODEL,
        config.llm_timeout.as_secs()
    );
    let evaluator = MatchEvaluator::new(Arc::new(gemini));

    // Build app state
    let state = AppState {
        store,
        evaluator,
        extractor: Arc::new(PdfExtractor),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
