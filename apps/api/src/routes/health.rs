use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::llm_client::MODEL;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub service: &'static str,
    pub model: &'static str,
    pub store: &'static str,
}

/// GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let store = if state.config.redis_url.is_some() {
        "redis"
    } else {
        "memory"
    };
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        service: "jobmatch-api",
        model: MODEL,
        store,
    })
}
