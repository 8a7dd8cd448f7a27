//! Shared configuration types for the tracker.
//!
//! Everything here is plain data with serde derives so the core, the CLI and
//! the on-disk config file all agree on one shape.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Default poll interval for the log file, in milliseconds.
pub const DEFAULT_READ_DELAY_MS: u64 = 1000;

/// Default margin (in log lines) for the co-op duplicate window.
pub const DEFAULT_COOP_WINDOW_MARGIN: usize = 10;

// ─────────────────────────────────────────────────────────────────────────────
// Game Version
// ─────────────────────────────────────────────────────────────────────────────

/// The game edition whose log format we are reading.
///
/// The log grammar for floor lines differs between editions, and Antibirth
/// needs its own run-start detection, so most parsing decisions key off this.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameVersion {
    Rebirth,
    Afterbirth,
    #[default]
    #[serde(rename = "Afterbirth+")]
    AfterbirthPlus,
    Antibirth,
    /// Any tag we don't know about. Floors are never produced for it.
    #[serde(other)]
    Unknown,
}

impl GameVersion {
    pub const ALL: [GameVersion; 4] = [
        GameVersion::Rebirth,
        GameVersion::Afterbirth,
        GameVersion::AfterbirthPlus,
        GameVersion::Antibirth,
    ];

    pub fn label(self) -> &'static str {
        match self {
            GameVersion::Rebirth => "Rebirth",
            GameVersion::Afterbirth => "Afterbirth",
            GameVersion::AfterbirthPlus => "Afterbirth+",
            GameVersion::Antibirth => "Antibirth",
            GameVersion::Unknown => "Unknown",
        }
    }

    /// Parse a user-facing label (case-insensitive). Returns `None` for
    /// anything outside the known set.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.label().eq_ignore_ascii_case(label.trim()))
    }
}

impl fmt::Display for GameVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tracker Config
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub game_version: GameVersion,
    /// Explicit log path. When unset the log finder searches the game's
    /// default data directory.
    pub log_file: Option<PathBuf>,
    pub read_delay_ms: u64,
    /// Added to the item count to size the post co-op-join duplicate window.
    pub coop_window_margin: usize,
    /// Directory of user TOML files describing modded items.
    pub custom_items_dir: Option<PathBuf>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            game_version: GameVersion::default(),
            log_file: None,
            read_delay_ms: DEFAULT_READ_DELAY_MS,
            coop_window_margin: DEFAULT_COOP_WINDOW_MARGIN,
            custom_items_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults_fill_missing_fields() {
        let config: TrackerConfig = toml::from_str(r#"game_version = "Rebirth""#).unwrap();
        assert_eq!(config.game_version, GameVersion::Rebirth);
        assert_eq!(config.read_delay_ms, DEFAULT_READ_DELAY_MS);
        assert_eq!(config.coop_window_margin, 10);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_afterbirth_plus_uses_display_label() {
        let config: TrackerConfig = toml::from_str(r#"game_version = "Afterbirth+""#).unwrap();
        assert_eq!(config.game_version, GameVersion::AfterbirthPlus);

        let out = toml::to_string(&config).unwrap();
        assert!(out.contains(r#"game_version = "Afterbirth+""#));
    }

    #[test]
    fn test_unknown_version_tag_does_not_fail() {
        let config: TrackerConfig = toml::from_str(r#"game_version = "Repentance""#).unwrap();
        assert_eq!(config.game_version, GameVersion::Unknown);
    }

    #[test]
    fn test_from_label() {
        assert_eq!(GameVersion::from_label("antibirth"), Some(GameVersion::Antibirth));
        assert_eq!(GameVersion::from_label("Afterbirth+"), Some(GameVersion::AfterbirthPlus));
        assert_eq!(GameVersion::from_label("Afterbirth"), Some(GameVersion::Afterbirth));
        assert_eq!(GameVersion::from_label("Unknown"), None);
    }
}
