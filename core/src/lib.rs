pub mod context;
pub mod error;
pub mod game_data;
pub mod log;
pub mod parser;
pub mod state;

// Re-exports for convenience
pub use context::{DefaultLogFinder, FixedLogFinder, LogFinder};
pub use error::TrackerError;
pub use game_data::{ItemCatalog, ItemLookup};
pub use parser::{LogParser, SessionCursor};
pub use state::{Curse, Floor, Item, SessionState, TrackerState};
pub use tracker_types::{GameVersion, TrackerConfig};
