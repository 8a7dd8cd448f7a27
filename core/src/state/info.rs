use serde::{Deserialize, Serialize};

/// Run modifiers the tracker cares about. They only ever attach to the floor
/// they were announced on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Curse {
    Labyrinth,
    Blind,
    Lost,
}

/// One level of a run, e.g. `f1`, or `f10g` for a Greed-mode floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Floor {
    id: String,
    curses: Vec<Curse>,
}

impl Floor {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            curses: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn curses(&self) -> &[Curse] {
        &self.curses
    }

    pub fn has_curse(&self, curse: Curse) -> bool {
        self.curses.contains(&curse)
    }

    pub(crate) fn add_curse(&mut self, curse: Curse) {
        if !self.has_curse(curse) {
            self.curses.push(curse);
        }
    }
}

/// An item pickup as extracted from the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Numeric id, `2000 + n` for trinkets, `m<name>` for modded items, or
    /// `NEW` when unrecognized.
    pub id: String,
    /// Floor the item was picked up on; `None` if no floor had been seen yet.
    pub floor_id: Option<String>,
    pub is_starting_item: bool,
    /// Picked up under Curse of Blind without the Black Candle.
    pub blind: bool,
    /// How many rerolls this item has been through while held.
    pub rerolled: u32,
}

impl Item {
    pub fn new(
        id: impl Into<String>,
        floor: Option<&Floor>,
        is_starting_item: bool,
        blind: bool,
    ) -> Self {
        Self {
            id: id.into(),
            floor_id: floor.map(|f| f.id().to_string()),
            is_starting_item,
            blind,
            rerolled: 0,
        }
    }
}
