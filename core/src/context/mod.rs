mod app_config;
mod log_finder;

pub use app_config::{APP_NAME, load_config, load_config_or_default};
pub use log_finder::{DefaultLogFinder, FixedLogFinder, LogFinder};
