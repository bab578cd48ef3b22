use axum::http::StatusCode;
use serde_json::Value;
use shared::RouteRequest;

use crate::error::ServerError;

/// Relays route requests to the external generation service. The service's
/// status and JSON body are passed back untouched.
#[derive(Debug, Clone)]
pub struct RouteForwarder {
    client: reqwest::Client,
    target: String,
}

impl RouteForwarder {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            target: target.into(),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub async fn forward(&self, request: &RouteRequest) -> Result<(StatusCode, Value), ServerError> {
        tracing::info!(
            places = request.places_count,
            radius_km = request.radius,
            return_to_start = request.return_to_start,
            "forwarding route request"
        );
        let response = self.client.post(&self.target).json(request).send().await?;
        let status = StatusCode::from_u16(response.status().as_u16())
            .unwrap_or(StatusCode::BAD_GATEWAY);
        let bytes = response.bytes().await?;
        let body: Value = serde_json::from_slice(&bytes)
            .map_err(|err| ServerError::UpstreamBody(err.to_string()))?;

        if status.is_success() {
            tracing::debug!(%status, "route generator answered");
        } else {
            tracing::warn!(%status, "route generator rejected the request");
        }
        Ok((status, body))
    }
}
