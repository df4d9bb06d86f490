//! Hall of fame: the best finished games, highest score first

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dv_core::GameState;

use crate::SaveError;

/// Maximum number of entries kept
pub const MAX_SCORES: usize = 10;

const ESCAPE_BONUS: u64 = 1000;

/// One finished game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u64,
    pub gold: u32,
    pub xp_level: i32,
    /// Deepest dungeon level reached
    pub max_depth: i32,
    pub escaped: bool,
    /// How the game ended
    pub cause: String,
    pub turns: u64,
    pub timestamp: DateTime<Utc>,
}

impl ScoreEntry {
    /// Score a finished (or abandoned) game
    pub fn from_state(state: &GameState) -> Self {
        let player = &state.player;
        let mut score = u64::from(player.gold)
            + 10 * u64::from(player.xp)
            + 100 * state.max_depth.max(0) as u64;
        if state.escaped {
            score += ESCAPE_BONUS;
        }

        Self {
            name: player.name.clone(),
            score,
            gold: player.gold,
            xp_level: player.xp_level,
            max_depth: state.max_depth,
            escaped: state.escaped,
            cause: describe_cause(state.cause_of_death.as_deref()),
            turns: state.turn,
            timestamp: Utc::now(),
        }
    }

    /// One display line
    pub fn format_line(&self) -> String {
        if self.escaped {
            format!(
                "{:>7} {} escaped with {} gold from level {} (turn {})",
                self.score, self.name, self.gold, self.max_depth, self.turns
            )
        } else {
            format!(
                "{:>7} {}, {} on level {} (turn {})",
                self.score, self.name, self.cause, self.max_depth, self.turns
            )
        }
    }
}

/// Turn the recorded cause of death into a readable phrase
fn describe_cause(cause: Option<&str>) -> String {
    match cause {
        None => "quit".to_string(),
        Some("starvation") => "starved to death".to_string(),
        Some(plain @ ("killed" | "escaped the dungeon")) => plain.to_string(),
        Some(killer) => format!("killed by {killer}"),
    }
}

/// Sorted top-N score table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HallOfFame {
    pub entries: Vec<ScoreEntry>,
}

impl HallOfFame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from file; a missing file is an empty table
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SaveError> {
        let file = match File::open(path.as_ref()) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    /// Write to file, creating parent directories as needed
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SaveError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Insert an entry, keeping the table sorted.
    /// Returns the 1-based rank if the entry made the list.
    pub fn add(&mut self, entry: ScoreEntry) -> Option<usize> {
        // Ties go below older entries
        let pos = self
            .entries
            .iter()
            .position(|e| entry.score > e.score)
            .unwrap_or(self.entries.len());
        if pos >= MAX_SCORES {
            return None;
        }

        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_SCORES);
        Some(pos + 1)
    }

    pub fn highest(&self) -> Option<&ScoreEntry> {
        self.entries.first()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dv_core::dungeon::Position;
    use dv_core::player::Player;
    use dv_core::{GameConfig, GameRng};

    fn entry(name: &str, score: u64) -> ScoreEntry {
        ScoreEntry {
            name: name.to_string(),
            score,
            gold: 0,
            xp_level: 1,
            max_depth: 1,
            escaped: false,
            cause: "killed by an orc".to_string(),
            turns: 100,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_add_keeps_order() {
        let mut hof = HallOfFame::new();
        assert_eq!(hof.add(entry("Alice", 1000)), Some(1));
        assert_eq!(hof.add(entry("Bob", 2000)), Some(1));
        assert_eq!(hof.add(entry("Carol", 500)), Some(3));

        let names: Vec<_> = hof.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Bob", "Alice", "Carol"]);
        assert_eq!(hof.highest().map(|e| e.score), Some(2000));
    }

    #[test]
    fn test_full_table_rejects_low_scores() {
        let mut hof = HallOfFame::new();
        for i in 0..MAX_SCORES as u64 {
            hof.add(entry("filler", 100 + i));
        }
        assert_eq!(hof.add(entry("late", 50)), None);
        assert_eq!(hof.add(entry("tie", 100)), None);
        assert_eq!(hof.add(entry("champ", 5000)), Some(1));
        assert_eq!(hof.entries.len(), MAX_SCORES);
        assert_eq!(hof.entries.last().map(|e| e.score), Some(101));
    }

    #[test]
    fn test_score_formula() {
        let config = GameConfig {
            seed: Some(1),
            ..Default::default()
        };
        let mut state = GameState::new(&config, &mut GameRng::new(1));
        state.player = Player::new("Scorer", Position::new(1, 1));
        state.player.gold = 120;
        state.player.xp = 7;
        state.max_depth = 3;

        let plain = ScoreEntry::from_state(&state);
        assert_eq!(plain.score, 120 + 70 + 300);
        assert_eq!(plain.cause, "quit");

        state.escaped = true;
        state.cause_of_death = Some("escaped the dungeon".into());
        let escaped = ScoreEntry::from_state(&state);
        assert_eq!(escaped.score, plain.score + ESCAPE_BONUS);
        assert!(escaped.format_line().contains("escaped with 120 gold"));
    }

    #[test]
    fn test_death_line_names_the_killer() {
        let config = GameConfig {
            seed: Some(2),
            ..Default::default()
        };
        let mut state = GameState::new(&config, &mut GameRng::new(2));
        state.player = Player::new("Rodney", Position::new(1, 1));
        state.max_depth = 3;
        state.dead = true;
        state.cause_of_death = Some("an orc".into());

        let entry = ScoreEntry::from_state(&state);
        assert_eq!(entry.cause, "killed by an orc");
        assert!(entry.format_line().contains("Rodney, killed by an orc on level 3"));

        state.cause_of_death = Some("starvation".into());
        let starved = ScoreEntry::from_state(&state);
        assert!(starved.format_line().contains("Rodney, starved to death on level 3"));
    }
}
