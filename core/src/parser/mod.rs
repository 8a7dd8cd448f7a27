//! Incremental log parser.
//!
//! [`LogParser::parse`] is meant to be called on a timer. Each call pulls any
//! new bytes from the log, runs every new complete line through the
//! classifier, and applies the resulting events to the session state.
//!
//! ```text
//! log.txt ──► LogTailer ──► normalize_line ──► classify ──► handlers ──► SessionState
//!                                                             │
//!                                         VersionPolicy / DedupGuard
//! ```
//!
//! Nothing in here is fatal. A missing log makes `parse` return `None`; every
//! other oddity is logged at debug level and the line is skipped.

mod classify;
mod dedup;
mod extract;
mod floor;


pub use classify::{LineKind, classify};
pub use dedup::{DedupGuard, Suppression};
pub use extract::{
    CollectibleLine, modded_item_id, parse_collectible_line, parse_curse, parse_room_id,
    parse_seed, parse_trinket_id, parse_version_number, resolve_item_id, resolve_removal_id,
    resolve_trinket_id,
};
pub use floor::{ResolvedFloor, RunStart, StageNumbering, VersionPolicy};

use std::sync::Arc;

use tracker_types::{GameVersion, TrackerConfig};

use crate::context::LogFinder;
use crate::game_data::{BLACK_CANDLE_ID, ItemCatalog, ItemLookup};
use crate::log::{LoadOutcome, LogTailer, normalize_line};
use crate::state::{Curse, Floor, Item, SessionState, TrackerState};

/// Parser bookkeeping between `parse` calls. Reset when the log is replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionCursor {
    /// Number of complete lines already processed.
    pub line_seek: usize,
    /// Byte offset just past the last processed line.
    pub consumed_bytes: usize,
    pub run_start_line: usize,
    /// Line index of the last "Spawn co-player!" marker.
    pub spawned_coop_baby_line: Option<usize>,
    /// Set on floor init, cleared on leaving the start room.
    pub getting_start_items: bool,
    pub current_seed: String,
    pub current_room: String,
    /// Raw text of the last processed line.
    pub previous_line: Option<String>,
}

pub struct LogParser<S: SessionState = TrackerState> {
    game_version: GameVersion,
    policy: Option<VersionPolicy>,
    dedup: DedupGuard,
    finder: Box<dyn LogFinder + Send + Sync>,
    items: Arc<dyn ItemLookup + Send + Sync>,
    tailer: LogTailer,
    cursor: SessionCursor,
    state: S,
}

impl LogParser<TrackerState> {
    pub fn new(
        config: &TrackerConfig,
        finder: Box<dyn LogFinder + Send + Sync>,
        catalog: Arc<ItemCatalog>,
    ) -> Self {
        let state = TrackerState::new("", config.game_version, Arc::clone(&catalog));
        Self::with_state(config, finder, catalog, state)
    }
}

impl<S: SessionState> LogParser<S> {
    pub fn with_state(
        config: &TrackerConfig,
        finder: Box<dyn LogFinder + Send + Sync>,
        items: Arc<dyn ItemLookup + Send + Sync>,
        state: S,
    ) -> Self {
        let mut parser = Self {
            game_version: config.game_version,
            policy: VersionPolicy::for_version(config.game_version),
            dedup: DedupGuard::new(config.coop_window_margin),
            finder,
            items,
            tailer: LogTailer::new(),
            cursor: SessionCursor::default(),
            state,
        };
        parser.reset_session();
        parser
    }

    // --- Accessors ---

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn cursor(&self) -> &SessionCursor {
        &self.cursor
    }

    pub fn tailer(&self) -> &LogTailer {
        &self.tailer
    }

    // --- Lifecycle ---

    /// Forget the log entirely: close it, drop the cache, reset the session.
    pub fn reset(&mut self) {
        self.tailer.reset();
        self.reset_session();
    }

    fn reset_session(&mut self) {
        self.cursor = SessionCursor::default();
        self.state.reset(&self.cursor.current_seed, self.game_version);
    }

    fn trigger_new_run(&mut self, line_index: usize) {
        tracing::info!(seed = %self.cursor.current_seed, line = line_index, "Starting new run");
        self.cursor.run_start_line = line_index;
        self.state.reset(&self.cursor.current_seed, self.game_version);
    }

    /// Process whatever the game has written since the last call.
    ///
    /// Returns `None` while the log can't be found or read; the caller should
    /// simply try again on its next tick.
    pub fn parse(&mut self) -> Option<&S> {
        match self.tailer.load(self.finder.as_ref()) {
            Ok(LoadOutcome::NotReady) => return None,
            Ok(LoadOutcome::Replaced) => self.reset_session(),
            Ok(LoadOutcome::Unchanged | LoadOutcome::Appended(_)) => {}
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read log file");
                return None;
            }
        }

        let (lines, consumed_bytes) = self.tailer.complete_lines(self.cursor.consumed_bytes);
        let line_seek = self.cursor.line_seek;
        let line_count = lines.len();

        for (line_number, line) in lines.into_iter().enumerate() {
            self.parse_line(line_number + line_seek, &line);
            self.cursor.previous_line = Some(line);
        }

        self.cursor.line_seek += line_count;
        self.cursor.consumed_bytes = consumed_bytes;
        Some(&self.state)
    }

    fn parse_line(&mut self, line_index: usize, raw: &str) {
        let line = normalize_line(raw);

        for kind in classify(line) {
            match kind {
                LineKind::VersionBanner => self.handle_version_banner(line),
                LineKind::SeedStart => self.handle_seed(line_index, line),
                LineKind::RoomChange => self.handle_room(line),
                LineKind::FloorInit => self.handle_floor(line_index, line),
                LineKind::Curse => self.handle_curse(line),
                LineKind::CoopJoin => self.cursor.spawned_coop_baby_line = Some(line_index),
                LineKind::BulkReroll => {
                    tracing::debug!("Reroll detected!");
                    self.state.reroll();
                }
                LineKind::ItemAdd => self.handle_item_add(line_index, raw, line),
                LineKind::TrinketGulp => self.handle_trinket_gulp(line_index, raw, line),
                LineKind::ItemRemove => self.handle_item_remove(line),
            }
        }
    }

    // --- Handlers ---

    fn handle_version_banner(&mut self, line: &str) {
        if let Some(version) = parse_version_number(line) {
            self.state.set_version_number(version);
        }
    }

    fn handle_seed(&mut self, line_index: usize, line: &str) {
        self.cursor.current_seed = parse_seed(line).to_string();

        if self
            .policy
            .is_some_and(|policy| policy.run_start == RunStart::SeedLine)
        {
            self.trigger_new_run(line_index);
        }
    }

    fn handle_room(&mut self, line: &str) {
        if !line.contains("Start Room") {
            self.cursor.getting_start_items = false;
        }

        if let Some(room_id) = parse_room_id(line) {
            self.cursor.current_room = room_id.to_string();
            self.state.change_room(room_id);
        }
    }

    fn handle_floor(&mut self, line_index: usize, line: &str) {
        let Some(policy) = self.policy else {
            tracing::debug!(version = %self.game_version, "No floor format for game version");
            return;
        };
        let Some(floor) = policy.resolve_floor(line) else {
            tracing::debug!(
                line,
                pattern = policy.floor_pattern(),
                "Log line doesn't match expected floor pattern"
            );
            return;
        };

        self.cursor.getting_start_items = true;

        if floor.stage == 1 && policy.run_start == RunStart::FirstFloor {
            self.trigger_new_run(line_index);
        }

        self.state.add_floor(Floor::new(floor.id));
    }

    fn handle_curse(&mut self, line: &str) {
        if let Some(curse) = parse_curse(line) {
            self.state.add_curse(curse);
        }
    }

    fn handle_item_add(&mut self, line_index: usize, raw: &str, line: &str) {
        let Some(pickup) = parse_collectible_line(line) else {
            tracing::debug!(line, "Malformed collectible line");
            return;
        };
        let item_id = resolve_item_id(self.items.as_ref(), &pickup);
        tracing::debug!(item_id = %item_id, name = pickup.name, "Picked up item");

        if self.is_duplicate_pickup(line_index, raw, &item_id) {
            return;
        }

        // Blind pickups are hidden from the player unless they hold the Black Candle
        let blind = self
            .state
            .last_floor()
            .is_some_and(|floor| floor.has_curse(Curse::Blind))
            && !self.state.contains_item(BLACK_CANDLE_ID);

        let item = Item::new(
            item_id,
            self.state.last_floor(),
            self.cursor.getting_start_items,
            blind,
        );
        self.add_item(item);
    }

    fn handle_trinket_gulp(&mut self, line_index: usize, raw: &str, line: &str) {
        let Some(trinket_id) = parse_trinket_id(line) else {
            tracing::debug!(line, "Malformed trinket line");
            return;
        };
        let item_id = resolve_trinket_id(self.items.as_ref(), trinket_id);
        tracing::debug!(item_id = %item_id, "Gulped trinket");

        if self.is_duplicate_pickup(line_index, raw, &item_id) {
            return;
        }

        let item = Item::new(
            item_id,
            self.state.last_floor(),
            self.cursor.getting_start_items,
            false,
        );
        self.add_item(item);
    }

    fn handle_item_remove(&mut self, line: &str) {
        let Some(removal) = parse_collectible_line(line) else {
            tracing::debug!(line, "Malformed collectible line");
            return;
        };
        let item_id = resolve_removal_id(self.items.as_ref(), &removal);
        tracing::debug!(item_id = %item_id, "Removed item");
        self.state.remove_item(&item_id);
    }

    fn is_duplicate_pickup(&self, line_index: usize, raw: &str, item_id: &str) -> bool {
        let suppression = self.dedup.check(
            self.cursor.previous_line.as_deref(),
            raw,
            line_index,
            self.cursor.spawned_coop_baby_line,
            self.state.item_count(),
            || self.state.contains_item(item_id),
        );
        match suppression {
            Some(Suppression::ExactEcho) => {
                tracing::debug!(item_id, "Skipped duplicate item line from co-op baby presence");
                true
            }
            Some(Suppression::CoopWindow) => {
                tracing::debug!(item_id, "Skipped duplicate item line from co-op baby entry");
                true
            }
            None => false,
        }
    }

    fn add_item(&mut self, item: Item) {
        let item_id = item.id.clone();
        if !self.state.add_item(item) {
            tracing::debug!(item_id = %item_id, "Skipped adding item to avoid space-bar duplicate");
        }
    }
}
