use tracker_types::TrackerConfig;

use crate::error::TrackerError;

/// Name the config file is stored under (`~/.config/rebirth-tracker/...`).
pub const APP_NAME: &str = "rebirth-tracker";

/// Load the tracker config, creating a default one on first run.
pub fn load_config() -> Result<TrackerConfig, TrackerError> {
    Ok(confy::load(APP_NAME, None)?)
}

/// Load the tracker config, falling back to defaults if the file is unreadable.
pub fn load_config_or_default() -> TrackerConfig {
    load_config().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        TrackerConfig::default()
    })
}
