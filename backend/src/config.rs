use std::{fs::File, io::Read, path::Path};

use shared::AppConfig;

use crate::error::ConfigError;

const MAX_ZOOM: u8 = 22;

/// Loads and validates the config file. Unknown keys are ignored, so only
/// the fields of [`AppConfig`] are ever published.
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let file = File::open(path)?;
    from_reader(file)
}

pub fn from_reader(reader: impl Read) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = serde_json::from_reader(reader)?;
    validate(&config)?;
    Ok(config)
}

pub fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    let walk = &config.walk_settings;
    if !walk.duration.is_consistent() {
        return Err(ConfigError::InconsistentRange("duration"));
    }
    if !walk.radius.is_consistent() {
        return Err(ConfigError::InconsistentRange("radius"));
    }
    if !walk.places_count.is_consistent() {
        return Err(ConfigError::InconsistentRange("places_count"));
    }
    if !config.map.center().is_valid() {
        return Err(ConfigError::InvalidCenter);
    }
    if config.map.default_zoom > MAX_ZOOM {
        return Err(ConfigError::InvalidZoom(config.map.default_zoom));
    }
    Ok(())
}
