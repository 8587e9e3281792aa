use anyhow::Result;
use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::config::AppConfig;
use crate::store::SheetStore;

use super::middleware::host_auth_middleware;
use super::{ApiState, questions, scores, standings, teams};

/// Assembles the API router. Score submission and question generation sit
/// behind the host-secret middleware; registration and standings are
/// public.
pub fn build_router(state: ApiState, host_secret: Arc<String>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let protected_routes = Router::new()
        .route("/api/scores", post(scores::submit_score))
        .route("/api/questions", post(questions::generate_questions))
        .layer(middleware::from_fn_with_state(
            host_secret,
            host_auth_middleware,
        ));

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/teams", get(teams::list_teams).post(teams::register_team))
        .route("/api/standings", get(standings::get_standings))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

pub async fn run_api_server(config: &AppConfig, store: Arc<dyn SheetStore>) -> Result<()> {
    let state = ApiState {
        store,
        http: reqwest::Client::new(),
        question_api_url: config.question_api_url.clone(),
        question_api_key: config.question_api_key.clone(),
    };
    let app = build_router(state, Arc::new(config.host_secret.clone()));

    let listener = TcpListener::bind(&config.bind_addr).await?;
    info!("API server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("API server error: {}", e))
}

async fn health_check() -> &'static str {
    "OK"
}
