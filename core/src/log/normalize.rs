/// Afterbirth+ tags nearly every line with this.
const INFO_PREFIX: &str = "[INFO] - ";

/// Lines printed by mods through the debug channel.
const LUA_DEBUG_PREFIX: &str = "Lua Debug: ";

/// Strip the known framework prefixes so every matcher sees the bare message.
///
/// Mod output is stripped too, which lets a mod emit a line that is handled
/// exactly like the engine's own.
pub fn normalize_line(line: &str) -> &str {
    let line = line.strip_prefix(INFO_PREFIX).unwrap_or(line);
    line.strip_prefix(LUA_DEBUG_PREFIX).unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_info_then_lua_prefix() {
        assert_eq!(
            normalize_line("[INFO] - Lua Debug: Adding collectible 1 (The Sad Onion)"),
            "Adding collectible 1 (The Sad Onion)"
        );
        assert_eq!(normalize_line("[INFO] - Room 1.1(Start Room)"), "Room 1.1(Start Room)");
        assert_eq!(normalize_line("Lua Debug: Curse of Blind"), "Curse of Blind");
    }

    #[test]
    fn test_prefixes_only_stripped_at_start() {
        let line = "Room 4.2 [INFO] - (Treasure)";
        assert_eq!(normalize_line(line), line);
        // Order matters: the debug tag is never outside the info tag
        assert_eq!(
            normalize_line("Lua Debug: [INFO] - Spawn co-player!"),
            "[INFO] - Spawn co-player!"
        );
    }
}
