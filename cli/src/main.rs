use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracker_core::context::load_config_or_default;
use tracker_core::{DefaultLogFinder, ItemCatalog, ItemLookup, LogParser, TrackerState};
use tracker_types::{GameVersion, TrackerConfig};

#[derive(Parser)]
#[command(version, about = "Follow the game log and print the current run")]
struct Cli {
    /// Read this log instead of the game's default location
    #[arg(short, long)]
    log_file: Option<PathBuf>,

    /// Rebirth, Afterbirth, Afterbirth+ or Antibirth
    #[arg(short, long, value_parser = parse_game_version)]
    game_version: Option<GameVersion>,

    /// Poll interval in milliseconds
    #[arg(short, long)]
    interval_ms: Option<u64>,

    /// Parse what's there and exit
    #[arg(long)]
    once: bool,

    /// Print the full state as JSON
    #[arg(long)]
    json: bool,
}

fn parse_game_version(label: &str) -> Result<GameVersion, String> {
    GameVersion::from_label(label).ok_or_else(|| {
        let known: Vec<_> = GameVersion::ALL.iter().map(|v| v.label()).collect();
        format!("unknown game version '{label}', expected one of: {}", known.join(", "))
    })
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    // Keep stdout clean for the summary / JSON output
    if let Ok(path) = std::env::var("TRACKER_LOG_PATH") {
        if let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
        {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_ansi(false)
                .with_writer(file)
                .init();
            return;
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn build_config(cli: &Cli) -> TrackerConfig {
    let mut config = load_config_or_default();
    if let Some(path) = &cli.log_file {
        config.log_file = Some(path.clone());
    }
    if let Some(version) = cli.game_version {
        config.game_version = version;
    }
    if let Some(interval) = cli.interval_ms {
        config.read_delay_ms = interval;
    }
    config
}

fn build_catalog(config: &TrackerConfig) -> ItemCatalog {
    let mut catalog = ItemCatalog::new();
    if let Some(dir) = &config.custom_items_dir {
        match catalog.load_custom_dir(dir) {
            Ok(count) => tracing::info!(count, dir = %dir.display(), "Loaded custom items"),
            Err(e) => tracing::warn!(error = %e, "Failed to load custom items"),
        }
    }
    catalog
}

/// Counts that decide whether anything worth printing happened.
fn fingerprint(state: &TrackerState) -> (String, usize, usize, u32) {
    (
        state.seed.clone(),
        state.floor_list.len(),
        state.item_list.len(),
        state.reroll_count,
    )
}

fn print_state(state: &TrackerState, json: bool) {
    if json {
        match serde_json::to_string(state) {
            Ok(out) => println!("{out}"),
            Err(e) => tracing::error!(error = %e, "Failed to serialize state"),
        }
        return;
    }

    let floor = state.floor_list.last().map(|f| f.id()).unwrap_or("-");
    let items: Vec<_> = state
        .item_list
        .iter()
        .map(|item| state.catalog().name(&item.id).unwrap_or(item.id.as_str()))
        .collect();
    println!(
        "[{}] seed {} | floor {} ({} total) | {} items, {} rerolls | {}",
        state.game_version,
        if state.seed.is_empty() { "?" } else { &state.seed },
        floor,
        state.floor_list.len(),
        state.item_list.len(),
        state.reroll_count,
        items.join(", ")
    );
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), String> {
    init_logging();

    let cli = Cli::parse();
    let config = build_config(&cli);
    let catalog = Arc::new(build_catalog(&config));
    let finder = DefaultLogFinder::new(&config);

    tracing::info!(
        version = %config.game_version,
        interval_ms = config.read_delay_ms,
        "Starting tracker"
    );

    let mut parser = LogParser::new(&config, Box::new(finder), catalog);

    if cli.once {
        let state = parser.parse().ok_or("Log file not found")?;
        print_state(state, cli.json);
        return Ok(());
    }

    let mut interval = tokio::time::interval(Duration::from_millis(config.read_delay_ms.max(1)));
    let mut last_seen = None;
    let mut waiting_logged = false;

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down");
                break;
            }
        }

        let Some(state) = parser.parse() else {
            if !waiting_logged {
                tracing::info!("Waiting for the game log to appear");
                waiting_logged = true;
            }
            continue;
        };
        waiting_logged = false;

        let current = fingerprint(state);
        if last_seen.as_ref() != Some(&current) {
            print_state(state, cli.json);
            last_seen = Some(current);
        }
    }

    Ok(())
}
