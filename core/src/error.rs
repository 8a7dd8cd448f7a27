use std::path::PathBuf;

/// Errors raised while loading the tracker's inputs.
///
/// None of these ever escape [`LogParser::parse`](crate::LogParser::parse);
/// the engine logs them and reports "not ready" instead.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to load config: {0}")]
    Config(#[from] confy::ConfyError),

    #[error("parse error in {path:?}: {source}")]
    CatalogParse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl TrackerError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
