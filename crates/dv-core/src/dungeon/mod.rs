//! Dungeon system
//!
//! Contains the cell grid, sectors, rooms, corridors and the level generator.

mod cell;
mod corridor;
mod generation;
mod grid;
mod level;
mod room;

pub use cell::{Cell, Tile};
pub use corridor::{Corridor, adjacency_pairs};
pub use generation::{GenerationParams, generate, generate_seeded, lit_chance};
pub use grid::{Grid, Position};
pub use level::Dungeon;
pub use room::{Room, Sector, place_room, sector_layout};
