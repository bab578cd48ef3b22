use seed::prelude::*;
use shared::{ApiError, AppConfig, RouteRequest, RouteResult};

use crate::error::{ClientError, GENERIC_FAILURE};

pub const CONFIG_ENDPOINT: &str = "/api/config";
pub const GENERATE_ENDPOINT: &str = "/api/generate-route";

pub async fn fetch_config() -> Result<AppConfig, ClientError> {
    let response = fetch(CONFIG_ENDPOINT)
        .await
        .map_err(|err| ClientError::Network(format!("{err:?}")))?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|err| ClientError::Network(format!("{err:?}")))?;
    if !status.is_ok() {
        return Err(failure_from_body(status.code, &body));
    }
    serde_json::from_str(&body).map_err(|err| ClientError::Decode(err.to_string()))
}

pub async fn generate_route(payload: &RouteRequest) -> Result<RouteResult, ClientError> {
    tracing::debug!(
        places = payload.places_count,
        radius = payload.radius,
        "sending route request"
    );
    let request = Request::new(GENERATE_ENDPOINT)
        .method(Method::Post)
        .json(payload)
        .map_err(|err| ClientError::Network(format!("{err:?}")))?;
    let response = request
        .fetch()
        .await
        .map_err(|err| ClientError::Network(format!("{err:?}")))?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|err| ClientError::Network(format!("{err:?}")))?;
    decode_route_response(status.is_ok(), status.code, &body)
}

pub fn decode_route_response(
    ok: bool,
    status: u16,
    body: &str,
) -> Result<RouteResult, ClientError> {
    if !ok {
        return Err(failure_from_body(status, body));
    }
    let route: RouteResult =
        serde_json::from_str(body).map_err(|err| ClientError::Decode(err.to_string()))?;
    if route.route.is_empty() {
        return Err(ClientError::EmptyRoute);
    }
    Ok(route)
}

/// Reads `{"error": "..."}` from a failed response, falling back to a
/// generic message when the body has no usable text.
pub fn failure_from_body(status: u16, body: &str) -> ClientError {
    let message = serde_json::from_str::<ApiError>(body)
        .ok()
        .map(|e| e.error)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| GENERIC_FAILURE.to_string());
    ClientError::Status { status, message }
}
