//! Map cell types

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Terrain type of a single cell
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Tile {
    #[default]
    Void = 0,
    Wall = 1,
    Floor = 2,
    Corridor = 3,
    Door = 4,
    StairsUp = 5,
    StairsDown = 6,
}

impl Tile {
    /// Check if this tile stops line of sight
    ///
    /// Doors are transparent; opacity and walkability are separate questions.
    pub const fn blocks_sight(&self) -> bool {
        matches!(self, Tile::Void | Tile::Wall)
    }

    /// Check if this is passable (can walk through)
    pub const fn is_walkable(&self) -> bool {
        matches!(
            self,
            Tile::Floor | Tile::Corridor | Tile::Door | Tile::StairsUp | Tile::StairsDown
        )
    }

    /// Check if this is a staircase
    pub const fn is_stairs(&self) -> bool {
        matches!(self, Tile::StairsUp | Tile::StairsDown)
    }

    /// Get the display character for this tile
    pub const fn symbol(&self) -> char {
        match self {
            Tile::Void => ' ',
            Tile::Wall => '#',
            Tile::Floor => '.',
            Tile::Corridor => ',',
            Tile::Door => '+',
            Tile::StairsUp => '<',
            Tile::StairsDown => '>',
        }
    }
}

/// A single map cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Terrain type
    pub tile: Tile,

    /// In the player's field of view this turn
    pub visible: bool,

    /// Has been seen by the player at some point (never reset)
    pub visited: bool,

    /// Part of a lit room the player has entered
    pub always_visible: bool,
}

impl Cell {
    /// Create a new void cell
    pub const fn void() -> Self {
        Self::new(Tile::Void)
    }

    pub const fn new(tile: Tile) -> Self {
        Self {
            tile,
            visible: false,
            visited: false,
            always_visible: false,
        }
    }

    /// Mark the cell as seen this turn
    pub fn reveal(&mut self) {
        self.visible = true;
        self.visited = true;
    }
}
