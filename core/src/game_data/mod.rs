//! Item metadata lookup.
//!
//! Builtin items are compiled from `data/items.csv` into a static table by the
//! build script. Modded items are loaded at runtime from TOML files:
//!
//! ```toml
//! [[item]]
//! id = "mSpooky Sword"
//! name = "Spooky Sword"
//! space = false
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::TrackerError;

include!(concat!(env!("OUT_DIR"), "/builtin_items.rs"));

/// Id prefix marking an item that was identified by name rather than number.
pub const MODDED_ITEM_ID_PREFIX: &str = "m";

/// Trinkets are stored alongside collectibles, shifted into this id range.
pub const TRINKET_ID_OFFSET: u32 = 2000;

/// Placeholder id for anything the catalog doesn't recognize.
pub const UNKNOWN_ITEM_ID: &str = "NEW";

/// Black Candle: removes the Blind curse, so pickups under it aren't hidden.
pub const BLACK_CANDLE_ID: &str = "260";

/// Read access to item metadata, keyed by tracker item id.
pub trait ItemLookup {
    fn has_info(&self, id: &str) -> bool;

    /// Active ("space bar") items can be picked up repeatedly without the
    /// player gaining anything new.
    fn is_space_item(&self, id: &str) -> bool;

    fn name(&self, id: &str) -> Option<&str>;
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CustomItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub space: bool,
}

#[derive(Debug, Default, Deserialize)]
struct CustomItemFile {
    #[serde(default, rename = "item")]
    items: Vec<CustomItem>,
}

/// Builtin item table plus any user-supplied modded items.
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    custom: HashMap<String, CustomItem>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add custom items. Later entries override earlier ones and builtins.
    pub fn add_custom(&mut self, items: impl IntoIterator<Item = CustomItem>) {
        for item in items {
            self.custom.insert(item.id.clone(), item);
        }
    }

    /// Load every `*.toml` file in `dir`. Files that fail to parse are logged
    /// and skipped; only an unreadable directory is an error.
    pub fn load_custom_dir(&mut self, dir: &Path) -> Result<usize, TrackerError> {
        let entries = fs::read_dir(dir).map_err(|e| TrackerError::io(dir, e))?;

        let mut loaded = 0;
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == "toml") {
                continue;
            }
            match load_custom_file(&path) {
                Ok(items) => {
                    loaded += items.len();
                    self.add_custom(items);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to load custom item file");
                }
            }
        }

        Ok(loaded)
    }
}

impl ItemLookup for ItemCatalog {
    fn has_info(&self, id: &str) -> bool {
        self.custom.contains_key(id) || BUILTIN_ITEMS.contains_key(id)
    }

    fn is_space_item(&self, id: &str) -> bool {
        match self.custom.get(id) {
            Some(item) => item.space,
            None => BUILTIN_ITEMS.get(id).is_some_and(|(_, space)| *space),
        }
    }

    fn name(&self, id: &str) -> Option<&str> {
        match self.custom.get(id) {
            Some(item) => Some(item.name.as_str()),
            None => BUILTIN_ITEMS.get(id).map(|(name, _)| *name),
        }
    }
}

/// Parse one custom item TOML file.
pub fn load_custom_file(path: &Path) -> Result<Vec<CustomItem>, TrackerError> {
    let contents = fs::read_to_string(path).map_err(|e| TrackerError::io(path, e))?;
    let file: CustomItemFile =
        toml::from_str(&contents).map_err(|e| TrackerError::CatalogParse {
            path: path.to_path_buf(),
            source: e,
        })?;
    Ok(file.items)
}
