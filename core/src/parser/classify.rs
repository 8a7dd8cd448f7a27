//! Line classification.
//!
//! Every rule is tested against every line; one line can match several rules
//! and each match is handled in table order.

use std::sync::LazyLock;

use regex::Regex;

/// The kinds of log line the tracker reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    VersionBanner,
    SeedStart,
    RoomChange,
    FloorInit,
    Curse,
    CoopJoin,
    BulkReroll,
    ItemAdd,
    TrinketGulp,
    ItemRemove,
}

#[derive(Debug)]
enum Matcher {
    Prefix(&'static str),
    Pattern(&'static LazyLock<Regex>),
}

impl Matcher {
    fn matches(&self, line: &str) -> bool {
        match self {
            Matcher::Prefix(prefix) => line.starts_with(prefix),
            Matcher::Pattern(re) => re.is_match(line),
        }
    }
}

static BULK_REROLL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Added \d+ Collectibles").expect("valid reroll pattern"));

static LINE_RULES: [(Matcher, LineKind); 11] = [
    // Afterbirth and Afterbirth+ banners share this text (AB+ adds a '+')
    (
        Matcher::Prefix("Binding of Isaac: Afterbirth"),
        LineKind::VersionBanner,
    ),
    (
        Matcher::Prefix("Binding of Isaac: Rebirth"),
        LineKind::VersionBanner,
    ),
    (Matcher::Prefix("RNG Start Seed:"), LineKind::SeedStart),
    (Matcher::Prefix("Room"), LineKind::RoomChange),
    (Matcher::Prefix("Level::Init"), LineKind::FloorInit),
    (Matcher::Prefix("Curse"), LineKind::Curse),
    (Matcher::Prefix("Spawn co-player!"), LineKind::CoopJoin),
    (Matcher::Pattern(&BULK_REROLL_RE), LineKind::BulkReroll),
    (Matcher::Prefix("Adding collectible "), LineKind::ItemAdd),
    (Matcher::Prefix("Gulping trinket "), LineKind::TrinketGulp),
    (Matcher::Prefix("Removing collectible "), LineKind::ItemRemove),
];

/// All rule kinds matching a normalized line, in handling order.
pub fn classify(line: &str) -> impl Iterator<Item = LineKind> + '_ {
    LINE_RULES
        .iter()
        .filter(move |(matcher, _)| matcher.matches(line))
        .map(|(_, kind)| *kind)
}
