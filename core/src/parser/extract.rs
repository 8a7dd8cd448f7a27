//! Field extraction from individual (normalized) log lines.

use std::sync::LazyLock;

use regex::Regex;

use crate::game_data::{ItemLookup, MODDED_ITEM_ID_PREFIX, TRINKET_ID_OFFSET, UNKNOWN_ITEM_ID};
use crate::state::Curse;

static ROOM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Room (.+?)\(").expect("valid room pattern"));

/// The seed sits at a fixed column: `RNG Start Seed: 8GBH PZ3K (...)`.
const SEED_OFFSET: usize = 16;
const SEED_LEN: usize = 9;

/// A collectible add/remove line: `Adding collectible 105 (The D6)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectibleLine<'a> {
    pub numeric_id: &'a str,
    pub name: &'a str,
}

pub fn parse_collectible_line(line: &str) -> Option<CollectibleLine<'_>> {
    let mut parts = line.splitn(4, ' ');
    let numeric_id = parts.nth(2)?;
    let rest = parts.next().unwrap_or_default();
    let name = rest.strip_prefix('(').unwrap_or(rest);
    let name = name.strip_suffix(')').unwrap_or(name);
    Some(CollectibleLine { numeric_id, name })
}

/// Trinket id shifted into the tracker's trinket range: `Gulping trinket 10` -> 2010.
pub fn parse_trinket_id(line: &str) -> Option<u32> {
    line.split(' ')
        .nth(2)?
        .trim()
        .parse::<u32>()
        .ok()?
        .checked_add(TRINKET_ID_OFFSET)
}

pub fn modded_item_id(name: &str) -> String {
    format!("{MODDED_ITEM_ID_PREFIX}{name}")
}

/// Numeric id if known, else the modded id for the name if known, else `NEW`.
pub fn resolve_item_id(lookup: &dyn ItemLookup, pickup: &CollectibleLine<'_>) -> String {
    if lookup.has_info(pickup.numeric_id) {
        return pickup.numeric_id.to_string();
    }
    let modded = modded_item_id(pickup.name);
    if lookup.has_info(&modded) {
        modded
    } else {
        UNKNOWN_ITEM_ID.to_string()
    }
}

/// Trinkets have no name to fall back on.
pub fn resolve_trinket_id(lookup: &dyn ItemLookup, trinket_id: u32) -> String {
    let id = trinket_id.to_string();
    if lookup.has_info(&id) {
        id
    } else {
        UNKNOWN_ITEM_ID.to_string()
    }
}

/// Removal never resolves to `NEW`: an unknown numeric id is assumed modded.
pub fn resolve_removal_id(lookup: &dyn ItemLookup, line: &CollectibleLine<'_>) -> String {
    if lookup.has_info(line.numeric_id) {
        line.numeric_id.to_string()
    } else {
        modded_item_id(line.name)
    }
}

pub fn parse_curse(line: &str) -> Option<Curse> {
    if line.starts_with("Curse of the Labyrinth!") {
        Some(Curse::Labyrinth)
    } else if line.starts_with("Curse of Blind") {
        Some(Curse::Blind)
    } else if line.starts_with("Curse of the Lost!") {
        Some(Curse::Lost)
    } else {
        None
    }
}

/// Up to nine bytes from column 16. Shorter lines yield what's there.
pub fn parse_seed(line: &str) -> &str {
    let end = line.len().min(SEED_OFFSET + SEED_LEN);
    line.get(SEED_OFFSET..end).unwrap_or_default()
}

pub fn parse_room_id(line: &str) -> Option<&str> {
    ROOM_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Last whitespace-separated word of the banner, e.g. `v1.06.0109`.
pub fn parse_version_number(line: &str) -> Option<&str> {
    line.split_whitespace().last()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_data::{CustomItem, ItemCatalog};

    fn catalog() -> ItemCatalog {
        let mut catalog = ItemCatalog::new();
        catalog.add_custom([CustomItem {
            id: "mSpooky Sword".to_string(),
            name: "Spooky Sword".to_string(),
            space: false,
        }]);
        catalog
    }

    #[test]
    fn test_collectible_line_fields() {
        let line = parse_collectible_line("Adding collectible 105 (The D6)").unwrap();
        assert_eq!(line.numeric_id, "105");
        assert_eq!(line.name, "The D6");

        // Names can themselves contain parentheses
        let line = parse_collectible_line("Adding collectible 120 (Odd Mushroom (Thin))").unwrap();
        assert_eq!(line.name, "Odd Mushroom (Thin)");

        assert!(parse_collectible_line("Adding collectible").is_none());
    }

    #[test]
    fn test_item_resolution_order() {
        let catalog = catalog();
        let known = parse_collectible_line("Adding collectible 105 (The D6)").unwrap();
        assert_eq!(resolve_item_id(&catalog, &known), "105");

        let modded = parse_collectible_line("Adding collectible 733 (Spooky Sword)").unwrap();
        assert_eq!(resolve_item_id(&catalog, &modded), "mSpooky Sword");

        let unknown = parse_collectible_line("Adding collectible 734 (Mystery)").unwrap();
        assert_eq!(resolve_item_id(&catalog, &unknown), UNKNOWN_ITEM_ID);
    }

    #[test]
    fn test_trinket_offset() {
        assert_eq!(parse_trinket_id("Gulping trinket 10"), Some(2010));
        assert_eq!(parse_trinket_id("Gulping trinket"), None);
        assert_eq!(parse_trinket_id("Gulping trinket x"), None);

        let catalog = catalog();
        assert_eq!(resolve_trinket_id(&catalog, 2010), "2010");
        assert_eq!(resolve_trinket_id(&catalog, 2999), UNKNOWN_ITEM_ID);
    }

    #[test]
    fn test_removal_falls_back_to_modded_id() {
        let catalog = catalog();
        let line = parse_collectible_line("Removing collectible 901 (Whatever)").unwrap();
        assert_eq!(resolve_removal_id(&catalog, &line), "mWhatever");
    }

    #[test]
    fn test_seed_is_nine_bytes_at_column_16() {
        assert_eq!(parse_seed("RNG Start Seed: 8GBH PZ3K (2887283412)"), "8GBH PZ3K");
        assert_eq!(parse_seed("RNG Start Seed: AAAA11111"), "AAAA11111");
        assert_eq!(parse_seed("RNG Start Seed: AB"), "AB");
        assert_eq!(parse_seed("RNG Start Seed:"), "");
    }

    #[test]
    fn test_room_id() {
        assert_eq!(parse_room_id("Room 1.1(Start Room)"), Some("1.1"));
        assert_eq!(parse_room_id("Room 5.12 (Treasure)"), Some("5.12 "));
        assert_eq!(parse_room_id("Room without id"), None);
    }

    #[test]
    fn test_curses() {
        assert_eq!(parse_curse("Curse of the Labyrinth!"), Some(Curse::Labyrinth));
        assert_eq!(parse_curse("Curse of Blind"), Some(Curse::Blind));
        assert_eq!(parse_curse("Curse of the Lost!"), Some(Curse::Lost));
        assert_eq!(parse_curse("Curse of Darkness!"), None);
    }

    #[test]
    fn test_version_number() {
        assert_eq!(
            parse_version_number("Binding of Isaac: Afterbirth+ v1.06.0109"),
            Some("v1.06.0109")
        );
    }
}
