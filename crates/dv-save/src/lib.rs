//! dv-save: Save files and hall of fame for delve
//!
//! A save file is one JSON document holding a [`SaveHeader`] and the full
//! [`GameState`]. The header is checked before the state is trusted.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use dv_core::{GameState, StateError};

mod hall_of_fame;

pub use hall_of_fame::{HallOfFame, MAX_SCORES, ScoreEntry};

/// Current save file format version
pub const SAVE_VERSION: u32 = 1;

/// Save/restore errors
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Save file not found")]
    NotFound,

    #[error("Incompatible save version: expected {expected}, found {found}")]
    IncompatibleVersion { expected: u32, found: u32 },

    #[error("Invalid save file header")]
    InvalidHeader,

    #[error("Corrupted game state: {0}")]
    State(#[from] StateError),
}

/// Save file header for versioning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveHeader {
    /// Magic identifier
    pub magic: String,
    /// Save format version
    pub version: u32,
    pub player_name: String,
    /// Turn count at save time
    pub turn: u64,
    pub dungeon_level: i32,
    pub timestamp: DateTime<Utc>,
}

impl SaveHeader {
    pub const MAGIC: &'static str = "DLVS";

    pub fn new(state: &GameState) -> Self {
        Self {
            magic: Self::MAGIC.to_string(),
            version: SAVE_VERSION,
            player_name: state.player.name.clone(),
            turn: state.turn,
            dungeon_level: state.dungeon_level,
            timestamp: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), SaveError> {
        if self.magic != Self::MAGIC {
            return Err(SaveError::InvalidHeader);
        }
        if self.version != SAVE_VERSION {
            return Err(SaveError::IncompatibleVersion {
                expected: SAVE_VERSION,
                found: self.version,
            });
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct SaveFileRef<'a> {
    header: SaveHeader,
    state: &'a GameState,
}

/// Complete save file structure
#[derive(Debug, Serialize, Deserialize)]
pub struct SaveFile {
    pub header: SaveHeader,
    pub state: GameState,
}

/// Save game state to a file
pub fn save_game(state: &GameState, path: impl AsRef<Path>) -> Result<(), SaveError> {
    let path = path.as_ref();
    let save_file = SaveFileRef {
        header: SaveHeader::new(state),
        state,
    };

    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(writer, &save_file)?;
    tracing::debug!(path = %path.display(), turn = state.turn, "game saved");
    Ok(())
}

fn read_save(path: &Path) -> Result<SaveFile, SaveError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => SaveError::NotFound,
        _ => SaveError::Io(e),
    })?;
    let save_file: SaveFile = serde_json::from_reader(BufReader::new(file))?;
    save_file.header.validate()?;
    Ok(save_file)
}

/// Load game state from a file
pub fn load_game(path: impl AsRef<Path>) -> Result<GameState, SaveError> {
    let save_file = read_save(path.as_ref())?;
    save_file.state.validate()?;
    Ok(save_file.state)
}

/// Load only the header from a save file
pub fn load_header(path: impl AsRef<Path>) -> Result<SaveHeader, SaveError> {
    Ok(read_save(path.as_ref())?.header)
}
