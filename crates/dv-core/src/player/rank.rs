//! Experience ranks
//!
//! Cumulative xp thresholds, titles and the max-hp gained on reaching each
//! rank. Levels are 1-based.

/// One experience rank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rank {
    pub title: &'static str,
    /// Experience needed to reach this rank
    pub xp: u32,
    /// Max hp gained on reaching this rank
    pub hp_gain: i32,
}

const fn rank(title: &'static str, xp: u32, hp_gain: i32) -> Rank {
    Rank { title, xp, hp_gain }
}

pub static RANKS: [Rank; 20] = [
    rank("Guild Novice", 0, 0),
    rank("Apprentice", 10, 4),
    rank("Journeyman", 20, 4),
    rank("Adventurer", 40, 5),
    rank("Fighter", 80, 5),
    rank("Warrior", 160, 5),
    rank("Rogue", 320, 6),
    rank("Champion", 640, 6),
    rank("Master Rogue", 1300, 6),
    rank("Warlord", 2600, 7),
    rank("Hero", 5200, 7),
    rank("Guild Master", 10000, 7),
    rank("Dragonlord", 20000, 8),
    rank("Wizard", 40000, 8),
    rank("Rogue Geek", 80000, 8),
    rank("Rogue Addict", 160000, 9),
    rank("Schmendrick", 320000, 9),
    rank("Gunfighter", 1000000, 9),
    rank("Time Waster", 3333333, 10),
    rank("Bug Chaser", 6666666, 10),
];

pub const MAX_LEVEL: i32 = RANKS.len() as i32;

fn entry(level: i32) -> &'static Rank {
    let idx = (level.clamp(1, MAX_LEVEL) - 1) as usize;
    &RANKS[idx]
}

/// Highest level whose threshold `xp` meets
pub fn level_for_xp(xp: u32) -> i32 {
    RANKS.iter().rposition(|r| xp >= r.xp).map_or(1, |i| i as i32 + 1)
}

/// Title for a level
pub fn rank_title(level: i32) -> &'static str {
    entry(level).title
}

/// Experience needed to reach a level
pub fn xp_threshold(level: i32) -> u32 {
    entry(level).xp
}

/// Max hp gained on reaching a level
pub fn hp_gain(level: i32) -> i32 {
    if level <= 1 { 0 } else { entry(level).hp_gain }
}

/// Total max hp gained when moving from `from` up to `to`
pub fn hp_gain_between(from: i32, to: i32) -> i32 {
    ((from + 1)..=to).map(hp_gain).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_monotonic() {
        for pair in RANKS.windows(2) {
            assert!(pair[0].xp < pair[1].xp);
        }
    }

    #[test]
    fn test_level_for_xp_takes_highest() {
        assert_eq!(level_for_xp(0), 1);
        assert_eq!(level_for_xp(9), 1);
        assert_eq!(level_for_xp(10), 2);
        assert_eq!(level_for_xp(45), 4);
        assert_eq!(level_for_xp(u32::MAX), MAX_LEVEL);
    }

    #[test]
    fn test_hp_gain_sums() {
        assert_eq!(hp_gain_between(1, 4), 4 + 4 + 5);
        assert_eq!(hp_gain_between(3, 3), 0);
        assert_eq!(hp_gain(1), 0);
    }

    #[test]
    fn test_titles_clamp() {
        assert_eq!(rank_title(1), "Guild Novice");
        assert_eq!(rank_title(0), "Guild Novice");
        assert_eq!(rank_title(99), "Bug Chaser");
    }
}
