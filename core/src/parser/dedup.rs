//! Suppression of duplicate pickups echoed by a co-op secondary player.

use tracker_types::DEFAULT_COOP_WINDOW_MARGIN;

/// Why a pickup line was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suppression {
    /// The previous raw line was byte-identical.
    ExactEcho,
    /// Already-held item re-announced shortly after a co-player joined.
    CoopWindow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DedupGuard {
    window_margin: usize,
}

impl Default for DedupGuard {
    fn default() -> Self {
        Self::new(DEFAULT_COOP_WINDOW_MARGIN)
    }
}

impl DedupGuard {
    pub fn new(window_margin: usize) -> Self {
        Self { window_margin }
    }

    pub fn is_exact_echo(previous_line: Option<&str>, line: &str) -> bool {
        previous_line == Some(line)
    }

    /// When a co-player joins, the game re-announces the items the player
    /// already holds, roughly one line each. Anything inside that window is
    /// suspect.
    pub fn in_coop_window(
        &self,
        line_index: usize,
        coop_join_line: Option<usize>,
        item_count: usize,
    ) -> bool {
        coop_join_line
            .is_some_and(|join| line_index.saturating_sub(join) < item_count + self.window_margin)
    }

    /// Check both rules for a pickup. `already_held` is only consulted by the
    /// window rule.
    pub fn check(
        &self,
        previous_line: Option<&str>,
        raw_line: &str,
        line_index: usize,
        coop_join_line: Option<usize>,
        item_count: usize,
        already_held: impl FnOnce() -> bool,
    ) -> Option<Suppression> {
        if Self::is_exact_echo(previous_line, raw_line) {
            return Some(Suppression::ExactEcho);
        }
        if self.in_coop_window(line_index, coop_join_line, item_count) && already_held() {
            return Some(Suppression::CoopWindow);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_echo() {
        let line = "Adding collectible 3 (Spoon Bender)";
        assert!(DedupGuard::is_exact_echo(Some(line), line));
        assert!(!DedupGuard::is_exact_echo(None, line));
        assert!(!DedupGuard::is_exact_echo(
            Some("Adding collectible 3 (Spoon Bender) "),
            line
        ));
    }

    #[test]
    fn test_window_needs_coop_marker() {
        let guard = DedupGuard::default();
        assert!(!guard.in_coop_window(3, None, 0));
    }

    #[test]
    fn test_window_grows_with_item_count() {
        let guard = DedupGuard::default();
        // join at line 100, 4 items held -> lines 100..114 are in the window
        assert!(guard.in_coop_window(113, Some(100), 4));
        assert!(!guard.in_coop_window(114, Some(100), 4));
        assert!(guard.in_coop_window(114, Some(100), 5));
    }

    #[test]
    fn test_margin_is_configurable() {
        let guard = DedupGuard::new(0);
        assert!(!guard.in_coop_window(101, Some(100), 1));
        assert!(guard.in_coop_window(100, Some(100), 1));
    }

    #[test]
    fn test_check_only_suppresses_held_items_in_window() {
        let guard = DedupGuard::default();
        let line = "Adding collectible 1 (The Sad Onion)";

        assert_eq!(
            guard.check(None, line, 5, Some(2), 1, || true),
            Some(Suppression::CoopWindow)
        );
        assert_eq!(guard.check(None, line, 5, Some(2), 1, || false), None);
        assert_eq!(
            guard.check(Some(line), line, 500, None, 0, || false),
            Some(Suppression::ExactEcho)
        );
    }
}
