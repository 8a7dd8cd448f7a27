//! Raw log access: tailing the file and cleaning up individual lines.

mod normalize;
mod tailer;

pub use normalize::normalize_line;
pub use tailer::{LoadOutcome, LogTailer};
