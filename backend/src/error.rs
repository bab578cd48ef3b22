use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::ApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config definition: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("walk setting `{0}` must satisfy min <= default <= max")]
    InconsistentRange(&'static str),
    #[error("map default center is not a valid coordinate")]
    InvalidCenter,
    #[error("map default zoom {0} is out of range")]
    InvalidZoom(u8),
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid route request: {0}")]
    InvalidRequest(String),
    #[error("route generator unreachable: {0}")]
    Upstream(#[from] reqwest::Error),
    #[error("route generator returned a malformed body: {0}")]
    UpstreamBody(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Upstream(err) => {
                tracing::error!("route generator unreachable: {err}");
                StatusCode::BAD_GATEWAY
            }
            ServerError::UpstreamBody(err) => {
                tracing::error!("route generator body: {err}");
                StatusCode::BAD_GATEWAY
            }
        };
        (
            status,
            Json(ApiError {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
