//! Per-version floor numbering.
//!
//! Rebirth-era logs report `m_AltStage`, Afterbirth-era logs report
//! `m_StageType`, and the two disagree on where the alternate final floors
//! (Cathedral, The Chest) sit. Everything is normalized to the Rebirth
//! numbering, e.g. `f9` Sheol, `f10` Cathedral, `f11` Dark Room, `f12` Chest.

use std::sync::LazyLock;

use regex::Regex;
use tracker_types::GameVersion;

static STAGE_TYPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Level::Init m_Stage (\d+), m_StageType (\d+)").expect("valid floor pattern")
});

static ALT_STAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Level::Init m_Stage (\d+), m_AltStage (\d+)").expect("valid floor pattern")
});

/// Alternate stage code the game uses for Greed mode floors.
const GREED_ALT_STAGE: &str = "3";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageNumbering {
    /// Cathedral reported as stage 10 type 0, Chest as stage 11 type 1.
    Afterbirth,
    /// Cathedral and Chest reported as altstage 1 of stages 9 and 11.
    Rebirth,
}

/// What marks the start of a fresh run in this version's log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStart {
    /// A floor init for stage 1.
    FirstFloor,
    /// Any seed line. Continuing a saved run also prints one, so a
    /// save-and-quit wipes the tracker.
    SeedLine,
}

#[derive(Debug, Clone, Copy)]
pub struct VersionPolicy {
    pub numbering: StageNumbering,
    pub run_start: RunStart,
    floor_pattern: &'static LazyLock<Regex>,
}

/// A floor init line resolved to the normalized numbering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFloor {
    pub stage: u32,
    pub id: String,
}

impl VersionPolicy {
    /// Policy for a version, or `None` if we don't know how it logs floors.
    pub fn for_version(version: GameVersion) -> Option<Self> {
        let (numbering, run_start, floor_pattern) = match version {
            GameVersion::Afterbirth | GameVersion::AfterbirthPlus => {
                (StageNumbering::Afterbirth, RunStart::FirstFloor, &STAGE_TYPE_RE)
            }
            GameVersion::Rebirth => (StageNumbering::Rebirth, RunStart::FirstFloor, &ALT_STAGE_RE),
            GameVersion::Antibirth => (StageNumbering::Rebirth, RunStart::SeedLine, &ALT_STAGE_RE),
            GameVersion::Unknown => return None,
        };
        Some(Self {
            numbering,
            run_start,
            floor_pattern,
        })
    }

    pub fn floor_pattern(&self) -> &str {
        self.floor_pattern.as_str()
    }

    /// Resolve a `Level::Init` line. `None` if it doesn't fit this version's format.
    pub fn resolve_floor(&self, line: &str) -> Option<ResolvedFloor> {
        let caps = self.floor_pattern.captures(line)?;
        let stage: u32 = caps.get(1)?.as_str().parse().ok()?;
        let alt = caps.get(2)?.as_str();

        let stage = self.normalize_stage(stage, alt);
        let mut id = format!("f{stage}");
        if alt == GREED_ALT_STAGE {
            id.push('g');
        }
        Some(ResolvedFloor { stage, id })
    }

    fn normalize_stage(&self, stage: u32, alt: &str) -> u32 {
        match self.numbering {
            StageNumbering::Afterbirth => match (stage, alt) {
                // Cathedral is an alternate of Sheol, Chest an alternate of Dark Room
                (10, "0") => 9,
                (11, "1") => 12,
                _ => stage,
            },
            StageNumbering::Rebirth => match (stage, alt) {
                (9 | 11, "1") => stage + 1,
                _ => stage,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor_id(version: GameVersion, line: &str) -> Option<String> {
        VersionPolicy::for_version(version)?
            .resolve_floor(line)
            .map(|f| f.id)
    }

    fn ab(stage: u32, stage_type: &str) -> Option<String> {
        floor_id(
            GameVersion::AfterbirthPlus,
            &format!("Level::Init m_Stage {stage}, m_StageType {stage_type}"),
        )
    }

    fn rb(stage: u32, alt: &str) -> Option<String> {
        floor_id(
            GameVersion::Rebirth,
            &format!("Level::Init m_Stage {stage}, m_AltStage {alt}"),
        )
    }

    #[test]
    fn test_afterbirth_special_floors() {
        assert_eq!(ab(10, "0").as_deref(), Some("f9"));
        assert_eq!(ab(10, "1").as_deref(), Some("f10"));
        assert_eq!(ab(11, "1").as_deref(), Some("f12"));
        assert_eq!(ab(11, "0").as_deref(), Some("f11"));
        assert_eq!(ab(1, "0").as_deref(), Some("f1"));
    }

    #[test]
    fn test_afterbirth_greed_suffix() {
        assert_eq!(ab(3, "3").as_deref(), Some("f3g"));
        assert!(ab(7, "3").unwrap().ends_with('g'));
    }

    #[test]
    fn test_rebirth_special_floors() {
        assert_eq!(rb(9, "1").as_deref(), Some("f10"));
        assert_eq!(rb(11, "1").as_deref(), Some("f12"));
        assert_eq!(rb(9, "0").as_deref(), Some("f9"));
        assert_eq!(rb(3, "0").as_deref(), Some("f3"));
        assert_eq!(rb(3, "1").as_deref(), Some("f3"));
        assert_eq!(rb(2, "3").as_deref(), Some("f2g"));
    }

    #[test]
    fn test_antibirth_shares_rebirth_numbering() {
        let policy = VersionPolicy::for_version(GameVersion::Antibirth).unwrap();
        assert_eq!(policy.numbering, StageNumbering::Rebirth);
        assert_eq!(policy.run_start, RunStart::SeedLine);
        assert_eq!(
            floor_id(GameVersion::Antibirth, "Level::Init m_Stage 9, m_AltStage 1").as_deref(),
            Some("f10")
        );
    }

    #[test]
    fn test_wrong_format_for_version_does_not_resolve() {
        assert_eq!(
            floor_id(GameVersion::Rebirth, "Level::Init m_Stage 1, m_StageType 0"),
            None
        );
        assert_eq!(
            floor_id(GameVersion::Afterbirth, "Level::Init m_Stage 1, m_AltStage 0"),
            None
        );
        assert_eq!(floor_id(GameVersion::Afterbirth, "Level::Init"), None);
    }

    #[test]
    fn test_unknown_version_has_no_policy() {
        assert!(VersionPolicy::for_version(GameVersion::Unknown).is_none());
    }

    #[test]
    fn test_resolved_stage_reported() {
        let policy = VersionPolicy::for_version(GameVersion::Afterbirth).unwrap();
        let floor = policy
            .resolve_floor("Level::Init m_Stage 10, m_StageType 0")
            .unwrap();
        assert_eq!(floor.stage, 9);
    }
}
