use std::sync::Arc;

use serde::Serialize;
use tracker_types::GameVersion;

use crate::game_data::{ItemCatalog, ItemLookup};
use crate::state::info::{Curse, Floor, Item};
use crate::state::SessionState;

/// Pure storage for the current run.
/// Routing logic lives in LogParser.
#[derive(Debug, Clone, Serialize)]
pub struct TrackerState {
    pub seed: String,
    pub game_version: GameVersion,
    /// Game build from the log banner, e.g. `v1.06.0109`. Survives resets.
    pub version_number: String,
    pub current_room: String,
    pub floor_list: Vec<Floor>,
    pub item_list: Vec<Item>,
    pub reroll_count: u32,

    #[serde(skip)]
    catalog: Arc<ItemCatalog>,
}

impl TrackerState {
    pub fn new(seed: &str, game_version: GameVersion, catalog: Arc<ItemCatalog>) -> Self {
        Self {
            seed: seed.to_string(),
            game_version,
            version_number: String::new(),
            current_room: String::new(),
            floor_list: Vec::new(),
            item_list: Vec::new(),
            reroll_count: 0,
            catalog,
        }
    }

    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }
}

impl SessionState for TrackerState {
    fn reset(&mut self, seed: &str, game_version: GameVersion) {
        self.seed = seed.to_string();
        self.game_version = game_version;
        self.current_room.clear();
        self.floor_list.clear();
        self.item_list.clear();
        self.reroll_count = 0;
    }

    fn set_version_number(&mut self, version: &str) {
        self.version_number = version.to_string();
    }

    fn change_room(&mut self, room_id: &str) {
        self.current_room = room_id.to_string();
    }

    fn add_floor(&mut self, floor: Floor) {
        self.floor_list.push(floor);
    }

    fn add_curse(&mut self, curse: Curse) {
        match self.floor_list.last_mut() {
            Some(floor) => floor.add_curse(curse),
            None => tracing::debug!(?curse, "Curse announced before any floor, ignoring"),
        }
    }

    fn add_item(&mut self, item: Item) -> bool {
        // Re-grabbing an active item you already hold doesn't give you anything new
        if self.catalog.is_space_item(&item.id) && self.contains_item(&item.id) {
            return false;
        }
        self.item_list.push(item);
        true
    }

    fn remove_item(&mut self, item_id: &str) -> bool {
        match self.item_list.iter().rposition(|item| item.id == item_id) {
            Some(idx) => {
                self.item_list.remove(idx);
                true
            }
            None => {
                tracing::debug!(item_id, "Tried to remove an item that isn't held");
                false
            }
        }
    }

    fn contains_item(&self, item_id: &str) -> bool {
        self.item_list.iter().any(|item| item.id == item_id)
    }

    fn reroll(&mut self) {
        self.reroll_count += 1;
        let catalog = &self.catalog;
        for item in self
            .item_list
            .iter_mut()
            .filter(|item| !catalog.is_space_item(&item.id))
        {
            item.rerolled += 1;
        }
    }

    fn item_count(&self) -> usize {
        self.item_list.len()
    }

    fn last_floor(&self) -> Option<&Floor> {
        self.floor_list.last()
    }
}
