pub mod info;
pub mod tracker;

pub use info::{Curse, Floor, Item};
pub use tracker::TrackerState;

use tracker_types::GameVersion;

/// Mutation interface the log parser drives.
///
/// The parser decides *what* happened; implementors decide how it is stored.
pub trait SessionState {
    /// Throw away everything from the previous run.
    fn reset(&mut self, seed: &str, game_version: GameVersion);

    fn set_version_number(&mut self, version: &str);

    fn change_room(&mut self, room_id: &str);

    fn add_floor(&mut self, floor: Floor);

    /// Apply a curse to the most recently added floor.
    fn add_curse(&mut self, curse: Curse);

    /// Returns false when the pickup is rejected as a space-bar repeat.
    fn add_item(&mut self, item: Item) -> bool;

    /// Returns false when no such item is held.
    fn remove_item(&mut self, item_id: &str) -> bool;

    fn contains_item(&self, item_id: &str) -> bool;

    fn reroll(&mut self);

    fn item_count(&self) -> usize;

    fn last_floor(&self) -> Option<&Floor>;
}
