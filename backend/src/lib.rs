pub mod config;
pub mod error;
pub mod forward;

use std::{path::PathBuf, sync::Arc};

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use shared::{AppConfig, RouteRequest};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::error::ServerError;
use crate::forward::RouteForwarder;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub forwarder: Arc<RouteForwarder>,
}

pub fn create_router(state: AppState, static_dir: Option<PathBuf>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = Router::new()
        .route("/api/config", get(config_handler))
        .route("/api/generate-route", post(generate_route_handler))
        .with_state(state);

    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router.layer(cors).layer(TraceLayer::new_for_http())
}

async fn config_handler(State(state): State<AppState>) -> Json<AppConfig> {
    Json(state.config.as_ref().clone())
}

async fn generate_route_handler(
    State(state): State<AppState>,
    payload: Result<Json<RouteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ServerError> {
    let Json(request) = payload.map_err(|err| ServerError::InvalidRequest(err.body_text()))?;
    let (status, body) = state.forwarder.forward(&request).await?;
    Ok((status, Json(body)))
}
