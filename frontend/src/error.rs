use shared::MissingField;
use thiserror::Error;

pub const GENERIC_FAILURE: &str = "Route generation failed";

/// Everything that can stop a route from being shown. The `Display` text is
/// what the blocking alert says.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(String),
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("no places were returned for this route")]
    EmptyRoute,
    #[error("{} is not known yet", .0.label())]
    Missing(MissingField),
    #[error("the map is not available")]
    MapUnavailable,
}

impl From<MissingField> for ClientError {
    fn from(field: MissingField) -> Self {
        Self::Missing(field)
    }
}
