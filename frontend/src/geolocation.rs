use serde::Deserialize;
use shared::Coordinate;

use crate::bridge;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocationStatus {
    #[default]
    Idle,
    Pending,
    Located,
    Unsupported,
    Failed,
}

impl LocationStatus {
    pub fn is_error(self) -> bool {
        matches!(self, Self::Unsupported | Self::Failed)
    }

    /// Banner text shown on the Settings screen.
    pub fn banner(self) -> Option<&'static str> {
        match self {
            Self::Idle => None,
            Self::Pending => Some("Determining your location..."),
            Self::Located => Some("✓ Location found"),
            Self::Unsupported => Some("⚠️ Geolocation is not supported by your browser"),
            Self::Failed => Some("⚠️ Could not get your location. Using the city center."),
        }
    }
}

/// Payload of the `walk-location` window event raised by the JS glue.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum LocationOutcome {
    Located { lat: f64, lon: f64 },
    Unsupported,
    Failed { message: String },
}

#[derive(Debug, Deserialize)]
pub struct LocationEvent {
    pub session: u32,
    #[serde(flatten)]
    pub outcome: LocationOutcome,
}

/// Maps an outcome to the coordinate to store and the status to show.
/// Failures fall back to `fallback`, which is unset when no config loaded.
pub fn resolve(
    outcome: &LocationOutcome,
    fallback: Option<Coordinate>,
) -> (Option<Coordinate>, LocationStatus) {
    match outcome {
        LocationOutcome::Located { lat, lon } => {
            (Some(Coordinate::new(*lat, *lon)), LocationStatus::Located)
        }
        LocationOutcome::Unsupported => (fallback, LocationStatus::Unsupported),
        LocationOutcome::Failed { message } => {
            tracing::warn!("geolocation failed: {message}");
            (fallback, LocationStatus::Failed)
        }
    }
}

/// Fires the one-shot platform query; the answer comes back as a
/// `walk-location` event tagged with `session`.
pub fn request(session: u32) {
    tracing::debug!(session, "requesting geolocation");
    bridge::request_location(session);
}
