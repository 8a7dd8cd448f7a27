use std::path::PathBuf;

use tracker_types::{GameVersion, TrackerConfig};

const LOG_FILE_NAME: &str = "log.txt";

/// Resolves where the game is currently writing its log.
pub trait LogFinder {
    fn find_log_path(&self) -> Option<PathBuf>;
}

/// Uses the configured override if any, otherwise the game's standard data
/// directory for the configured edition.
#[derive(Debug, Clone)]
pub struct DefaultLogFinder {
    override_path: Option<PathBuf>,
    game_version: GameVersion,
}

impl DefaultLogFinder {
    pub fn new(config: &TrackerConfig) -> Self {
        Self {
            override_path: config.log_file.clone(),
            game_version: config.game_version,
        }
    }

    /// Every location the log could plausibly be in, most likely first.
    pub fn candidates(&self) -> Vec<PathBuf> {
        let mut out = Vec::new();
        if let Some(path) = &self.override_path {
            out.push(path.clone());
        }

        let Some(folder) = game_folder_name(self.game_version) else {
            return out;
        };

        if cfg!(target_os = "windows") {
            if let Some(docs) = dirs::document_dir() {
                out.push(docs.join("My Games").join(folder).join(LOG_FILE_NAME));
            }
        } else if cfg!(target_os = "macos") {
            if let Some(data) = dirs::data_dir() {
                out.push(data.join(folder).join(LOG_FILE_NAME));
            }
        } else if let Some(data) = dirs::data_local_dir() {
            // Linux builds lowercase the folder name
            out.push(data.join(folder.to_lowercase()).join(LOG_FILE_NAME));
        }
        out
    }
}

impl LogFinder for DefaultLogFinder {
    fn find_log_path(&self) -> Option<PathBuf> {
        let found = self.candidates().into_iter().find(|p| p.is_file());
        if found.is_none() {
            tracing::debug!(version = %self.game_version, "No log file found");
        }
        found
    }
}

/// Always resolves to one fixed path, whether or not it exists yet.
#[derive(Debug, Clone)]
pub struct FixedLogFinder(pub PathBuf);

impl LogFinder for FixedLogFinder {
    fn find_log_path(&self) -> Option<PathBuf> {
        Some(self.0.clone())
    }
}

fn game_folder_name(version: GameVersion) -> Option<&'static str> {
    match version {
        // Antibirth runs on top of a Rebirth install and logs there
        GameVersion::Rebirth | GameVersion::Antibirth => Some("Binding of Isaac Rebirth"),
        GameVersion::Afterbirth => Some("Binding of Isaac Afterbirth"),
        GameVersion::AfterbirthPlus => Some("Binding of Isaac Afterbirth+"),
        GameVersion::Unknown => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_is_first_candidate() {
        let config = TrackerConfig {
            log_file: Some(PathBuf::from("/tmp/custom/log.txt")),
            ..Default::default()
        };
        let finder = DefaultLogFinder::new(&config);
        assert_eq!(finder.candidates()[0], PathBuf::from("/tmp/custom/log.txt"));
    }

    #[test]
    fn test_existing_override_is_found() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("log.txt");
        std::fs::write(&log, "").unwrap();

        let config = TrackerConfig {
            log_file: Some(log.clone()),
            ..Default::default()
        };
        assert_eq!(DefaultLogFinder::new(&config).find_log_path(), Some(log));
    }

    #[test]
    fn test_unknown_version_only_uses_override() {
        let config = TrackerConfig {
            game_version: GameVersion::Unknown,
            ..Default::default()
        };
        assert!(DefaultLogFinder::new(&config).candidates().is_empty());
    }

    #[test]
    fn test_candidates_end_in_log_txt() {
        let config = TrackerConfig::default();
        for path in DefaultLogFinder::new(&config).candidates() {
            assert_eq!(path.file_name().unwrap(), LOG_FILE_NAME);
        }
    }
}
